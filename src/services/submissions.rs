//! Submission service

use tracing::info;

use crate::models::submission::SubmissionStatusRequest;
use crate::models::{FileAttachment, ReviewRequest, Submission, SubmissionDraft, SubmissionStatus};
use crate::utils::errors::{EventHubError, Result};

use super::http::{ApiClient, ApiRequest, FormPart};

/// Check a review before it is sent
pub fn validate_review(score: f64, comment: &str, status: SubmissionStatus) -> Result<ReviewRequest> {
    if !(0.0..=100.0).contains(&score) {
        return Err(EventHubError::Validation("Score must be between 0 and 100".to_string()));
    }
    let comment = comment.trim();
    if status == SubmissionStatus::Rejected && comment.is_empty() {
        return Err(EventHubError::Validation(
            "Comment is required for rejected submissions".to_string(),
        ));
    }
    Ok(ReviewRequest {
        score,
        comment: comment.to_string(),
        status,
    })
}

fn draft_parts(draft: &SubmissionDraft, file: FileAttachment) -> Vec<FormPart> {
    let mut parts = vec![
        FormPart::Text { name: "title".into(), value: draft.title.clone() },
        FormPart::Text { name: "description".into(), value: draft.description.clone() },
        FormPart::Text { name: "contentType".into(), value: draft.content_type.as_str().into() },
    ];
    if let Some(content) = &draft.content {
        parts.push(FormPart::Text { name: "content".into(), value: content.clone() });
    }
    for link in &draft.links {
        parts.push(FormPart::Text { name: "links".into(), value: link.clone() });
    }
    parts.push(FormPart::File {
        name: "file".into(),
        file_name: file.file_name,
        mime_type: file.mime_type,
        bytes: file.bytes,
    });
    parts
}

#[derive(Clone, Debug)]
pub struct SubmissionService {
    client: ApiClient,
}

impl SubmissionService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, event_id: &str, submission_id: &str) -> Result<Submission> {
        self.client
            .get(&format!("/events/{}/submissions/{}", event_id, submission_id))
            .await
    }

    /// Create a submission, as multipart when a file is attached
    pub async fn create(
        &self,
        event_id: &str,
        draft: &SubmissionDraft,
        file: Option<FileAttachment>,
    ) -> Result<Submission> {
        if draft.title.trim().is_empty() {
            return Err(EventHubError::Validation("Title is required".to_string()));
        }
        let path = format!("/events/{}/submissions", event_id);
        let request = match file {
            Some(file) => ApiRequest::post(path).multipart(draft_parts(draft, file)),
            None => ApiRequest::post(path).json(draft)?,
        };
        let submission: Submission = self.client.send(request).await?;
        info!(event_id = %event_id, submission_id = %submission.id, "Submission created");
        Ok(submission)
    }

    pub async fn update(&self, event_id: &str, submission_id: &str, draft: &SubmissionDraft) -> Result<Submission> {
        self.client
            .put(&format!("/events/{}/submissions/{}", event_id, submission_id), draft)
            .await
    }

    /// Move a draft to SUBMITTED
    pub async fn submit(&self, event_id: &str, submission_id: &str) -> Result<Submission> {
        let submission: Submission = self
            .client
            .send(ApiRequest::post(format!("/events/{}/submissions/{}/submit", event_id, submission_id)))
            .await?;
        info!(event_id = %event_id, submission_id = %submission_id, "Submission submitted");
        Ok(submission)
    }

    pub async fn my_submissions(&self, event_id: &str) -> Result<Vec<Submission>> {
        self.client.get(&format!("/events/{}/my-submissions", event_id)).await
    }

    /// The caller's submission for the event; none when missing or not permitted
    pub async fn my_submission(&self, event_id: &str) -> Result<Option<Submission>> {
        match self.my_submissions(event_id).await {
            Ok(submissions) => Ok(submissions.into_iter().next()),
            Err(e) if matches!(e.status(), Some(403) | Some(404)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn list(&self, event_id: &str) -> Result<Vec<Submission>> {
        self.client.get(&format!("/events/{}/submissions", event_id)).await
    }

    pub async fn review(&self, event_id: &str, submission_id: &str, review: &ReviewRequest) -> Result<Submission> {
        let checked = validate_review(review.score, &review.comment, review.status)?;
        let submission: Submission = self
            .client
            .post(&format!("/events/{}/submissions/{}/review", event_id, submission_id), &checked)
            .await?;
        info!(submission_id = %submission_id, status = %submission.status, "Submission reviewed");
        Ok(submission)
    }

    pub async fn update_status(&self, event_id: &str, submission_id: &str, status: SubmissionStatus) -> Result<Submission> {
        self.client
            .patch(
                &format!("/events/{}/submissions/{}/status", event_id, submission_id),
                &SubmissionStatusRequest { status },
            )
            .await
    }
}

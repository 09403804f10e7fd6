//! Submission and review handlers

use std::path::Path;

use tracing::{debug, info};

use crate::handlers::render;
use crate::models::{FileAttachment, Submission, SubmissionDraft};
use crate::services::submissions::validate_review;
use crate::services::ServiceFactory;
use crate::state::Viewer;
use crate::utils::errors::{EventHubError, Result};
use crate::utils::helpers::EMPTY_PLACEHOLDER;

use super::SubmissionsCommand;

fn guess_mime_type(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "zip" => "application/zip",
        "txt" | "md" => "text/plain",
        _ => return None,
    };
    Some(mime.to_string())
}

async fn read_attachment(path: &Path) -> Result<FileAttachment> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| EventHubError::InvalidInput(format!("not a file: {}", path.display())))?;
    debug!(file = %file_name, size = bytes.len(), "Attachment read");
    Ok(FileAttachment { file_name, mime_type: guess_mime_type(path), bytes })
}

fn print_submission(submission: &Submission) {
    println!("{} [{}]", submission.title, submission.status);
    println!("  id:      {}", submission.id);
    println!("  type:    {}", submission.content_type.as_str());
    if !submission.description.is_empty() {
        println!("  about:   {}", submission.description);
    }
    if let Some(content) = &submission.content {
        println!("  content: {}", content);
    }
    for file in submission.file.iter().chain(submission.files.iter()) {
        println!(
            "  file:    {} {}",
            file.original_name.as_deref().unwrap_or(EMPTY_PLACEHOLDER),
            file.url.as_deref().unwrap_or_default()
        );
    }
    for link in &submission.links {
        println!("  link:    {}", link);
    }
    if let Some(review) = &submission.review {
        println!("  review:  {}/100", review.score);
        if !review.comment.is_empty() {
            println!("           {}", review.comment);
        }
    }
}

pub async fn handle_submissions(services: &ServiceFactory, action: SubmissionsCommand) -> Result<()> {
    match action {
        SubmissionsCommand::Mine { event_id } => {
            services.auth.require_user()?;
            match services.submissions.my_submission(&event_id).await? {
                Some(submission) => print_submission(&submission),
                None => println!("You have not created a submission for this event."),
            }
        }
        SubmissionsCommand::List { event_id } => {
            let submissions = services.submissions.list(&event_id).await?;
            if submissions.is_empty() {
                println!("No submissions yet.");
            }
            for submission in &submissions {
                println!("{}", render::submission_line(submission));
            }
        }
        SubmissionsCommand::Show { event_id, submission_id } => {
            let submission = services.submissions.get(&event_id, &submission_id).await?;
            print_submission(&submission);
        }
        SubmissionsCommand::Create {
            event_id,
            title,
            description,
            content_type,
            content,
            file,
            links,
        } => {
            let user = services.auth.require_user()?;
            let (event, existing) = futures::try_join!(
                services.events.get(&event_id),
                services.submissions.my_submission(&event_id),
            )?;
            if !Viewer::new(&event, Some(&user), None).can_create_submission(existing.as_ref()) {
                return Err(EventHubError::Validation(
                    "You cannot create a submission for this event.".to_string(),
                ));
            }

            let draft = SubmissionDraft { title, description, content_type, content, links };
            let attachment = match file {
                Some(path) => Some(read_attachment(&path).await?),
                None => None,
            };
            let submission = services.submissions.create(&event_id, &draft, attachment).await?;
            println!("Draft saved ({}). Submit it with:", submission.id);
            println!("  eventhub submissions submit {} {}", event_id, submission.id);
        }
        SubmissionsCommand::Submit { event_id, submission_id } => {
            let submission = services.submissions.submit(&event_id, &submission_id).await?;
            println!("{} is now {}.", submission.title, submission.status);
        }
        SubmissionsCommand::Review { event_id, submission_id, score, comment, status } => {
            let user = services.auth.require_user()?;
            let request = validate_review(score, &comment, status)?;
            let (event, submission) = futures::try_join!(
                services.events.get(&event_id),
                services.submissions.get(&event_id, &submission_id),
            )?;
            if !Viewer::new(&event, Some(&user), None).can_review_submission(&submission) {
                return Err(EventHubError::Validation(
                    "You cannot review this submission.".to_string(),
                ));
            }
            let reviewed = services.submissions.review(&event_id, &submission_id, &request).await?;
            info!(submission_id = %reviewed.id, status = %reviewed.status, "Review recorded");
            println!("Review saved. {} is now {}.", reviewed.title, reviewed.status);
        }
    }
    Ok(())
}

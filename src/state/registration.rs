//! Registration form answers

use std::collections::BTreeMap;

use serde_json::Value;

use crate::models::{Answers, FormField};

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Bool(b)) => !b,
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

/// Errors keyed by field id; empty when the answers can be sent
pub fn validate_answers(fields: &[FormField], answers: &Answers) -> BTreeMap<String, String> {
    fields
        .iter()
        .filter(|field| field.required && is_missing(answers.get(&field.id)))
        .map(|field| (field.id.clone(), format!("{} is required", field.label)))
        .collect()
}

/// Parse `id=value` pairs typed on the console into answers.
///
/// Values are coerced according to the field's type when the field is
/// known; unknown ids are kept as strings.
pub fn parse_answers(fields: &[FormField], pairs: &[String]) -> crate::Result<Answers> {
    use crate::models::FormFieldType;
    use crate::utils::errors::EventHubError;

    let mut answers = Answers::new();
    for pair in pairs {
        let (id, raw) = pair
            .split_once('=')
            .ok_or_else(|| EventHubError::InvalidInput(format!("expected id=value, got '{}'", pair)))?;
        let id = id.trim();
        let raw = raw.trim();
        let kind = fields.iter().find(|f| f.id == id).map(|f| f.field_type);

        let value = match kind {
            Some(FormFieldType::Checkbox) => {
                Value::Bool(matches!(raw.to_ascii_lowercase().as_str(), "true" | "yes" | "y" | "1"))
            }
            Some(FormFieldType::Number) => match raw.parse::<f64>() {
                Ok(n) => serde_json::Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null),
                Err(_) => {
                    return Err(EventHubError::InvalidInput(format!("'{}' expects a number", id)))
                }
            },
            _ => Value::String(raw.to_string()),
        };
        answers.insert(id.to_string(), value);
    }
    Ok(answers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields() -> Vec<FormField> {
        serde_json::from_value(json!([
            {"id": "college", "label": "College", "type": "text", "required": true},
            {"id": "agree", "label": "Code of conduct", "type": "checkbox", "required": true},
            {"id": "tracks", "label": "Tracks", "type": "select", "required": true, "options": ["A", "B"]},
            {"id": "age", "label": "Age", "type": "number", "required": true},
            {"id": "notes", "label": "Notes", "type": "textarea"}
        ]))
        .unwrap()
    }

    #[test]
    fn test_missing_values_are_reported_by_label() {
        let mut answers = Answers::new();
        answers.insert("college".into(), json!("   "));
        answers.insert("agree".into(), json!(false));
        answers.insert("tracks".into(), json!([]));

        let errors = validate_answers(&fields(), &answers);
        assert_eq!(errors.get("college").map(String::as_str), Some("College is required"));
        assert_eq!(errors.get("agree").map(String::as_str), Some("Code of conduct is required"));
        assert_eq!(errors.get("tracks").map(String::as_str), Some("Tracks is required"));
        assert_eq!(errors.get("age").map(String::as_str), Some("Age is required"));
        assert!(!errors.contains_key("notes"));
    }

    #[test]
    fn test_zero_counts_as_answered() {
        let answers = parse_answers(
            &fields(),
            &[
                "college=MIT".to_string(),
                "agree=yes".to_string(),
                "tracks=A".to_string(),
                "age=0".to_string(),
            ],
        )
        .unwrap();

        assert_eq!(answers.get("agree"), Some(&json!(true)));
        assert!(validate_answers(&fields(), &answers).is_empty());
    }

    #[test]
    fn test_parse_rejects_malformed_pairs() {
        assert!(parse_answers(&fields(), &["college".to_string()]).is_err());
        assert!(parse_answers(&fields(), &["age=old".to_string()]).is_err());
    }
}

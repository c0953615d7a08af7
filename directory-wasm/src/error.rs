use serde::Deserialize;

use crate::models::FieldIssue;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    Network(String),
    Http { status: u16, message: String },
    Validation(Vec<FieldIssue>),
    Decode(String),
    Encode(String),
}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "network error: {msg}"),
            Self::Http { status, message } => write!(f, "http error {status}: {message}"),
            Self::Validation(issues) => {
                let details = issues
                    .iter()
                    .map(|issue| format!("{} {}", issue.field, issue.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "validation failed: {details}")
            }
            Self::Decode(msg) => write!(f, "decode error: {msg}"),
            Self::Encode(msg) => write!(f, "request body error: {msg}"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    message: Option<String>,
}

impl ApiError {
    /// Разбирает не-2xx ответ сервиса по статусу и телу.
    pub fn from_response(status: u16, body: &str) -> Self {
        if status == 422 {
            if let Ok(issues) = serde_json::from_str::<Vec<FieldIssue>>(body) {
                if !issues.is_empty() {
                    return Self::Validation(issues);
                }
            }
        }

        let message = serde_json::from_str::<MessageBody>(body)
            .ok()
            .and_then(|body| body.message)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| fallback_message(status));

        Self::Http { status, message }
    }

    pub fn field_issues(&self) -> &[FieldIssue] {
        match self {
            Self::Validation(issues) => issues,
            _ => &[],
        }
    }
}

fn fallback_message(status: u16) -> String {
    match status {
        401 => "Authentication failed".to_string(),
        403 => "Not allowed for this token".to_string(),
        404 => "Resource not found".to_string(),
        429 => "Too many requests".to_string(),
        500..=599 => "Directory service error".to_string(),
        _ => format!("HTTP error {status}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unprocessable_entity_becomes_validation() {
        let err = ApiError::from_response(422, r#"[{"field":"email","message":"is invalid"}]"#);
        assert_eq!(err.field_issues().len(), 1);
        assert_eq!(err.to_string(), "validation failed: email is invalid");
    }

    #[test]
    fn message_body_is_preferred() {
        let err = ApiError::from_response(404, r#"{"message":"Resource not found"}"#);
        assert_eq!(
            err,
            ApiError::Http {
                status: 404,
                message: "Resource not found".to_string()
            }
        );
    }

    #[test]
    fn unreadable_body_uses_status_fallback() {
        let err = ApiError::from_response(503, "<html>");
        assert_eq!(err.to_string(), "http error 503: Directory service error");
        assert!(err.field_issues().is_empty());
    }

    #[test]
    fn body_encoding_failure_is_not_reported_as_network() {
        let err = ApiError::Encode("key must be a string".to_string());
        assert_eq!(err.to_string(), "request body error: key must be a string");
        assert!(!err.to_string().contains("network"));
    }
}

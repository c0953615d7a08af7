use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Замечание сервиса к конкретному полю запроса (ответ `422`).
pub struct FieldIssue {
    /// Имя поля, например `email`.
    pub field: String,
    /// Текст ошибки, например `has already been taken`.
    pub message: String,
}

#[derive(Debug, Error)]
/// Ошибка запроса к Directory Service.
///
/// Единственный тип ошибки клиента: сеть, не-2xx статус и невалидное тело
/// ответа сводятся к нему, а вариант позволяет показать пользователю
/// осмысленное сообщение.
pub enum RequestError {
    /// Ошибка HTTP-транспорта (`reqwest`): сервис недоступен, таймаут и т.п.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Токен отсутствует или не принят сервисом (`401`/`403`).
    #[error("unauthorized")]
    Unauthorized,

    /// Запрошенный ресурс не найден (`404`).
    #[error("not found")]
    NotFound,

    /// Сервис отклонил данные (`422`) с замечаниями по полям.
    #[error("validation failed: {}", format_issues(.0))]
    Validation(Vec<FieldIssue>),

    /// Любой другой не-2xx ответ.
    #[error("http status {status}: {message}")]
    Status {
        /// HTTP-код ответа.
        status: u16,
        /// Сообщение сервиса или описание статуса.
        message: String,
    },

    /// Тело ответа не соответствует ожидаемой структуре.
    #[error("decode error: {0}")]
    Decode(String),

    /// Некорректная конфигурация клиента.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Результат операций `directory-client`.
pub type RequestResult<T> = Result<T, RequestError>;

#[derive(Debug, Deserialize)]
struct MessageBody {
    message: Option<String>,
}

impl RequestError {
    /// Строит ошибку по статусу и сырому телу не-2xx ответа.
    pub(crate) fn from_http_status(status: reqwest::StatusCode, body: &str) -> Self {
        match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                Self::Unauthorized
            }
            reqwest::StatusCode::NOT_FOUND => Self::NotFound,
            reqwest::StatusCode::UNPROCESSABLE_ENTITY => {
                match serde_json::from_str::<Vec<FieldIssue>>(body) {
                    Ok(issues) if !issues.is_empty() => Self::Validation(issues),
                    _ => Self::Status {
                        status: status.as_u16(),
                        message: message_from_body(body)
                            .unwrap_or_else(|| format!("http status {status}")),
                    },
                }
            }
            _ => Self::Status {
                status: status.as_u16(),
                message: message_from_body(body).unwrap_or_else(|| format!("http status {status}")),
            },
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::Decode(err.to_string());
        }
        if let Some(status) = err.status() {
            return Self::from_http_status(status, "");
        }
        Self::Network(err)
    }

    /// Замечания по полям, если сервис вернул `422`.
    pub fn field_issues(&self) -> &[FieldIssue] {
        match self {
            Self::Validation(issues) => issues,
            _ => &[],
        }
    }
}

fn message_from_body(body: &str) -> Option<String> {
    serde_json::from_str::<MessageBody>(body)
        .ok()
        .and_then(|body| body.message)
        .map(|message| message.trim().to_string())
        .filter(|message| !message.is_empty())
}

fn format_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("{} {}", issue.field, issue.message))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn unauthorized_and_forbidden_collapse() {
        assert!(matches!(
            RequestError::from_http_status(StatusCode::UNAUTHORIZED, ""),
            RequestError::Unauthorized
        ));
        assert!(matches!(
            RequestError::from_http_status(StatusCode::FORBIDDEN, ""),
            RequestError::Unauthorized
        ));
    }

    #[test]
    fn unprocessable_entity_keeps_field_issues() {
        let body = r#"[{"field":"email","message":"has already been taken"}]"#;
        let err = RequestError::from_http_status(StatusCode::UNPROCESSABLE_ENTITY, body);

        assert_eq!(
            err.field_issues(),
            &[FieldIssue {
                field: "email".to_string(),
                message: "has already been taken".to_string(),
            }]
        );
        assert_eq!(err.to_string(), "validation failed: email has already been taken");
    }

    #[test]
    fn status_uses_message_from_body() {
        let err = RequestError::from_http_status(
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"message":"slow down"}"#,
        );
        match err {
            RequestError::Status { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "slow down");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn status_falls_back_to_status_text() {
        let err = RequestError::from_http_status(StatusCode::INTERNAL_SERVER_ERROR, "oops");
        match err {
            RequestError::Status { status, message } => {
                assert_eq!(status, 500);
                assert!(message.contains("500"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

use std::time::Duration;

use crate::error::{RequestError, RequestResult};

/// Базовый URL публичного Directory Service.
pub const DEFAULT_BASE_URL: &str = "https://gorest.co.in/public/v2";

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone)]
/// Фиксированная конфигурация клиента.
pub struct ClientConfig {
    /// Базовый URL сервиса.
    pub base_url: String,
    /// Токен доступа; без него доступны только чтения.
    pub token: Option<String>,
    /// Таймаут установки соединения.
    pub connect_timeout: Duration,
    /// Таймаут всего запроса.
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Конфигурация с базовым URL и таймаутами по умолчанию.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Устанавливает токен; пустая строка означает отсутствие токена.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = parse_token(&token.into());
        self
    }

    /// Читает `DIRECTORY_BASE_URL`, `DIRECTORY_TOKEN`, `DIRECTORY_TIMEOUT_SECS`.
    pub fn from_env() -> RequestResult<Self> {
        let base_url =
            std::env::var("DIRECTORY_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let base_url = base_url.trim().to_string();
        if base_url.is_empty() {
            return Err(RequestError::InvalidConfig(
                "DIRECTORY_BASE_URL must not be empty".to_string(),
            ));
        }

        let token = std::env::var("DIRECTORY_TOKEN")
            .ok()
            .and_then(|raw| parse_token(&raw));
        let timeout_secs = parse_timeout(
            std::env::var("DIRECTORY_TIMEOUT_SECS").ok().as_deref(),
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;

        Ok(Self {
            base_url,
            token,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn parse_token(raw: &str) -> Option<String> {
    let token = raw.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

fn parse_timeout(raw: Option<&str>, default: u64) -> RequestResult<u64> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    let value = raw.trim().parse::<u64>().map_err(|_| {
        RequestError::InvalidConfig(
            "DIRECTORY_TIMEOUT_SECS must be a positive integer".to_string(),
        )
    })?;
    if value == 0 {
        return Err(RequestError::InvalidConfig(
            "DIRECTORY_TIMEOUT_SECS must be > 0".to_string(),
        ));
    }
    Ok(value)
}

use serde::Serialize;
use thiserror::Error;

/// Message carried by every failed resolution.
pub const NOT_RUNNING_MESSAGE: &str = "No such application running.";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidArgs,
    AppNotFound,
    ConnectionFailed,
    PlatformNotSupported,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidArgs => "INVALID_ARGS",
            ErrorCode::AppNotFound => "APP_NOT_FOUND",
            ErrorCode::ConnectionFailed => "CONNECTION_FAILED",
            ErrorCode::PlatformNotSupported => "PLATFORM_NOT_SUPPORTED",
        }
    }
}

#[derive(Debug, Error, Clone)]
#[error("{message}")]
pub struct AdapterError {
    pub code: ErrorCode,
    pub message: String,
    pub suggestion: Option<String>,
    pub platform_detail: Option<String>,
}

impl AdapterError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            suggestion: None,
            platform_detail: None,
        }
    }

    pub fn with_suggestion(mut self, s: impl Into<String>) -> Self {
        self.suggestion = Some(s.into());
        self
    }

    pub fn with_platform_detail(mut self, d: impl Into<String>) -> Self {
        self.platform_detail = Some(d.into());
        self
    }

    pub fn invalid_args(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidArgs, msg)
    }

    /// Timeout and genuine absence share this error.
    pub fn not_running(timeout_ms: u64) -> Self {
        Self::new(ErrorCode::AppNotFound, NOT_RUNNING_MESSAGE)
            .with_suggestion(
                "The app may still be starting; retry with a larger --timeout-ms",
            )
            .with_platform_detail(format!("gave up after {timeout_ms}ms"))
    }

    pub fn connection(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConnectionFailed, msg)
    }

    pub fn not_supported(method: &str) -> Self {
        Self::new(
            ErrorCode::PlatformNotSupported,
            format!("{method} is not supported on this platform"),
        )
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    pub fn code(&self) -> &str {
        match self {
            AppError::Adapter(e) => e.code.as_str(),
            AppError::Io(_) | AppError::Json(_) => "INTERNAL",
        }
    }

    pub fn suggestion(&self) -> Option<&str> {
        match self {
            AppError::Adapter(e) => e.suggestion.as_deref(),
            _ => None,
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        AppError::Adapter(AdapterError::invalid_args(msg))
    }
}

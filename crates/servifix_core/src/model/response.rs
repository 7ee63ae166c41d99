//! Uniform result envelope returned by every service operation.

use serde::{Deserialize, Serialize};

/// Outcome tag of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Success,
    Error,
}

/// Failure category carried by `Status::Error` envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    NotFound,
    InvalidInput,
    Internal,
}

/// `{message, status, data}` wrapper, plus an explicit kind on errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub message: String,
    pub status: Status,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            message: message.into(),
            status: Status::Success,
            data,
            error_kind: None,
        }
    }

    pub fn error(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: Status::Error,
            data: None,
            error_kind: Some(kind),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

//! Unified error type
//!
//! Core operations return structured errors (code + message); the transport
//! boundary maps codes to its own representation. Codes follow the
//! E-prefixed convention:
//!
//! | Code  | Meaning                 |
//! |-------|-------------------------|
//! | E0002 | Validation failed       |
//! | E0003 | Resource not found      |
//! | E0004 | Resource already exists |
//! | E0005 | Business rule violation |
//! | E2001 | Permission denied       |
//! | E9001 | Internal error          |
//! | E9002 | Database error          |

use serde::{Deserialize, Serialize};

/// Error classification, stable across the API surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    Validation,
    NotFound,
    Conflict,
    BusinessRule,
    Forbidden,
    Internal,
    Database,
}

impl ErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation => "E0002",
            Self::NotFound => "E0003",
            Self::Conflict => "E0004",
            Self::BusinessRule => "E0005",
            Self::Forbidden => "E2001",
            Self::Internal => "E9001",
            Self::Database => "E9002",
        }
    }

    /// Get the default message for this code
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::Validation => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::Conflict => "Resource already exists",
            Self::BusinessRule => "Business rule violation",
            Self::Forbidden => "Permission denied",
            Self::Internal => "Internal server error",
            Self::Database => "Database error",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Application error: classification plus a human-readable reason.
#[derive(Debug, Clone, thiserror::Error, Serialize, Deserialize)]
#[error("[{code}] {message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
}

impl AppError {
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            message: code.default_message().to_string(),
        }
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::Validation, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::NotFound, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::Conflict, message)
    }

    pub fn business_rule(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::BusinessRule, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::Forbidden, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::Internal, message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::Database, message)
    }
}

/// Result type for operations returning [`AppError`]
pub type AppResult<T> = Result<T, AppError>;

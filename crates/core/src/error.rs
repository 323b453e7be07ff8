//! Backend API errors
//!
//! The backend reports most failures as free text, so callers classify
//! them by status code and message content.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static NOT_FOUND_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)404|not found").expect("valid regex"));

static APPLICATION_MISSING_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)404|application not found").expect("valid regex"));

static READ_ONLY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)read-only file system|errno\s*30").expect("valid regex"));

static LETTER_MISSING_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)sanction letter not found").expect("valid regex"));

/// Errors returned by a `LoanBackend`
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Non-success HTTP status; `message` is the backend detail or a synthesized summary
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("All endpoints failed: {}", .0.join(" | "))]
    AllEndpointsFailed(Vec<String>),

    #[error("{0}")]
    Unavailable(String),
}

impl ApiError {
    /// Route-level miss: the caller may try the next endpoint variant
    pub fn is_not_found(&self) -> bool {
        match self {
            ApiError::Http { status: 404, .. } => true,
            other => NOT_FOUND_PATTERN.is_match(&other.to_string()),
        }
    }

    /// The application id held by the session is no longer known to the backend
    pub fn is_application_missing(&self) -> bool {
        APPLICATION_MISSING_PATTERN.is_match(&self.to_string())
    }

    /// Backend could not write the sanction letter to disk
    pub fn is_read_only_filesystem(&self) -> bool {
        READ_ONLY_PATTERN.is_match(&self.to_string())
    }

    pub fn is_letter_missing(&self) -> bool {
        LETTER_MISSING_PATTERN.is_match(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

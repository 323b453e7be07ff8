//! Session errors

use loan_chat_core::ApiError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AgentError {
    #[error("No application ID available")]
    NoApplication,

    #[error(transparent)]
    Backend(#[from] ApiError),
}

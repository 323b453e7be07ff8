//! Core types and traits for the loan chat client
//!
//! Everything here is shared between the extractor, the HTTP client and
//! the session driver:
//! - Domain types (agents, conversation context, extracted fields)
//! - Wire types exchanged with the loan advisor backend
//! - The `LoanBackend` seam and its error type

pub mod domain;
pub mod error;
pub mod traits;
pub mod wire;

pub use domain::{AgentKind, ConversationContext, ExtractedFields, IntentStatus, ParseAgentError};
pub use error::{ApiError, Result};
pub use traits::LoanBackend;
pub use wire::{
    ApplicationRecord, CustomerRecord, DataUpdate, HealthStatus, LoanChatRequest,
    LoanChatResponse,
};

//! Loan advisor chat session
//!
//! Owns the conversation state for one customer: active agent,
//! application id, salary cue and message history. Each turn runs the
//! extractor, posts to a `LoanBackend` and records the reply.

mod cues;
pub mod error;
pub mod message;
pub mod preview;
pub mod session;

pub use error::AgentError;
pub use message::{ChatMessage, Role};
pub use preview::{render_preview, LetterPreview};
pub use session::{ChatSession, TurnOutcome};

//! Text processing for loan chat messages
//!
//! Turns one raw user message plus the conversation context into an
//! outbound message and a set of structured fields for the backend.

pub mod extraction;

pub use extraction::{prepare_message, PreparedMessage};

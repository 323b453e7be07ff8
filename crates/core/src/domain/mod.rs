//! Conversation Domain Types
//!
//! Types the extractor reads (agent, context) and produces (fields,
//! intent status). None of them own any state beyond a single turn.

mod agents;
mod fields;

pub use agents::{AgentKind, ConversationContext, ParseAgentError};
pub use fields::{ExtractedFields, IntentStatus};

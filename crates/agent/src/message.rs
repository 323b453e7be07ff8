//! Conversation transcript entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in the transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    /// Agent key for user messages, backend agent name for replies
    pub agent: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn new(role: Role, agent: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            agent: agent.into(),
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(agent: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(Role::User, agent, content)
    }

    pub fn assistant(agent: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, agent, content)
    }

    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = ChatMessage::user("Master", "hi");
        let b = ChatMessage::user("Master", "hi");
        assert_ne!(a.id, b.id);
        assert!(!a.is_assistant());
    }

    #[test]
    fn test_role_wire_format() {
        let msg = ChatMessage::assistant("Sales Agent", "Your EMI is ₹16,488");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["agent"], "Sales Agent");
    }
}

//! Backend agents and the per-turn conversation context

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Specialized backend agent the user is currently addressing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AgentKind {
    /// Guided conversation and orchestration
    #[default]
    Master,
    /// Collects loan details, computes EMI
    Sales,
    /// PAN/Aadhaar verification
    #[serde(rename = "KYC")]
    Kyc,
    /// Credit score and risk
    Underwriting,
    /// Approval rules and policy
    Eligibility,
    /// Sanction letter generation
    #[serde(rename = "PDF")]
    Pdf,
}

impl AgentKind {
    pub const ALL: [AgentKind; 6] = [
        AgentKind::Master,
        AgentKind::Sales,
        AgentKind::Kyc,
        AgentKind::Underwriting,
        AgentKind::Eligibility,
        AgentKind::Pdf,
    ];

    /// Key used in the outbound `[Agent: <key>]` prefix
    pub fn key(&self) -> &'static str {
        match self {
            AgentKind::Master => "Master",
            AgentKind::Sales => "Sales",
            AgentKind::Kyc => "KYC",
            AgentKind::Underwriting => "Underwriting",
            AgentKind::Eligibility => "Eligibility",
            AgentKind::Pdf => "PDF",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            AgentKind::Master => "Master Agent",
            AgentKind::Sales => "Sales Agent",
            AgentKind::Kyc => "KYC Agent",
            AgentKind::Underwriting => "Underwriting Agent",
            AgentKind::Eligibility => "Eligibility Agent",
            AgentKind::Pdf => "PDF Agent",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AgentKind::Master => "Guided conversation and orchestration",
            AgentKind::Sales => "Collect loan details, compute EMI",
            AgentKind::Kyc => "PAN/Aadhaar verification",
            AgentKind::Underwriting => "Credit score and risk",
            AgentKind::Eligibility => "Approval rules and policy",
            AgentKind::Pdf => "Generate sanction letter",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Unknown agent key
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown agent '{0}' (expected one of: Master, Sales, KYC, Underwriting, Eligibility, PDF)")]
pub struct ParseAgentError(pub String);

impl FromStr for AgentKind {
    type Err = ParseAgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        let key = key.strip_suffix(" agent").unwrap_or(&key);
        match key {
            "master" => Ok(AgentKind::Master),
            "sales" => Ok(AgentKind::Sales),
            "kyc" | "verification" => Ok(AgentKind::Kyc),
            "underwriting" => Ok(AgentKind::Underwriting),
            "eligibility" => Ok(AgentKind::Eligibility),
            "pdf" => Ok(AgentKind::Pdf),
            _ => Err(ParseAgentError(s.to_string())),
        }
    }
}

/// Conversation cues supplied by the caller for one extraction call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConversationContext {
    /// Agent the user is addressing
    pub active_agent: AgentKind,
    /// The previous assistant reply asked for a salary figure
    pub awaiting_salary: bool,
}

impl ConversationContext {
    pub fn new(active_agent: AgentKind, awaiting_salary: bool) -> Self {
        Self {
            active_agent,
            awaiting_salary,
        }
    }

    /// Context for a given agent with no pending salary prompt
    pub fn for_agent(active_agent: AgentKind) -> Self {
        Self::new(active_agent, false)
    }
}

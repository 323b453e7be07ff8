//! Structured fields extracted from one user message

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse status hint telling the backend orchestrator which agent should act next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentStatus {
    EligibilityCheck,
    KycVerification,
    SalesDiscussion,
    Underwriting,
    Approved,
}

impl IntentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentStatus::EligibilityCheck => "eligibility_check",
            IntentStatus::KycVerification => "kyc_verification",
            IntentStatus::SalesDiscussion => "sales_discussion",
            IntentStatus::Underwriting => "underwriting",
            IntentStatus::Approved => "approved",
        }
    }
}

impl fmt::Display for IntentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields detected in a message
///
/// Every field is optional: `None` means "not detected", never zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedFields {
    /// Salary normalized to a monthly rupee amount
    pub monthly_salary: Option<f64>,
    /// Principal in rupees
    pub loan_amount: Option<f64>,
    /// Definitive tenure, only set when exactly one unambiguous mention exists
    pub tenure_months: Option<u32>,
    /// Backend status hint
    pub intent_status: Option<IntentStatus>,
}

impl ExtractedFields {
    /// Check if anything was detected
    pub fn is_empty(&self) -> bool {
        self.monthly_salary.is_none()
            && self.loan_amount.is_none()
            && self.tenure_months.is_none()
            && self.intent_status.is_none()
    }

    /// Merge with another set of fields, preferring detected values from `other`
    pub fn merge(&mut self, other: &ExtractedFields) {
        if other.monthly_salary.is_some() {
            self.monthly_salary = other.monthly_salary;
        }
        if other.loan_amount.is_some() {
            self.loan_amount = other.loan_amount;
        }
        if other.tenure_months.is_some() {
            self.tenure_months = other.tenure_months;
        }
        if other.intent_status.is_some() {
            self.intent_status = other.intent_status;
        }
    }
}

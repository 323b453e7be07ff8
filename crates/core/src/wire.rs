//! Wire types for the loan advisor backend
//!
//! The backend is a FastAPI service; shapes mirror its request and
//! response models. Optional fields are omitted from outgoing JSON when
//! absent, never sent as zero or empty string.

use serde::{Deserialize, Serialize};

use crate::domain::{ExtractedFields, IntentStatus};

/// Structured side-channel payload merged into the backend application
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_context: Option<String>,
    /// Monthly salary in rupees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenure_months: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<IntentStatus>,
}

impl DataUpdate {
    /// Build the payload from extracted fields
    ///
    /// Zero amounts and blank context count as absent.
    pub fn from_fields(fields: &ExtractedFields, user_context: Option<&str>) -> Self {
        Self {
            user_context: user_context
                .filter(|ctx| !ctx.trim().is_empty())
                .map(str::to_string),
            salary: fields.monthly_salary.filter(|v| *v != 0.0),
            loan_amount: fields.loan_amount.filter(|v| *v != 0.0),
            tenure_months: fields.tenure_months.filter(|v| *v != 0),
            status: fields.intent_status,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.user_context.is_none()
            && self.salary.is_none()
            && self.loan_amount.is_none()
            && self.tenure_months.is_none()
            && self.status.is_none()
    }
}

/// POST /chat request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanChatRequest {
    pub customer_id: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_update: Option<DataUpdate>,
}

/// POST /chat response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanChatResponse {
    #[serde(default)]
    pub application_id: String,
    #[serde(default)]
    pub agent_name: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_required: Option<String>,
}

/// Customer block of an application
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    #[serde(default)]
    pub customer_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// GET /application/{id} response body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub application_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenure_months: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emi: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ApplicationRecord {
    /// Applicant display name, falling back to the customer id
    pub fn applicant(&self) -> Option<&str> {
        let customer = self.customer.as_ref()?;
        customer
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .or(Some(customer.customer_id.as_str()).filter(|id| !id.is_empty()))
    }
}

/// GET /health response body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthStatus {
    /// Short status label: `status`, then `message`, then "unknown"
    pub fn summary(&self) -> &str {
        self.status
            .as_deref()
            .or(self.message.as_deref())
            .unwrap_or("unknown")
    }
}

//! Backend seam
//!
//! The session driver talks to the loan advisor through this trait so it
//! can run against the HTTP client or an in-memory double.

use async_trait::async_trait;

use crate::error::Result;
use crate::wire::{ApplicationRecord, HealthStatus, LoanChatRequest, LoanChatResponse};

/// Remote loan advisor API
#[async_trait]
pub trait LoanBackend: Send + Sync {
    /// Send one chat turn
    async fn loan_chat(&self, request: &LoanChatRequest) -> Result<LoanChatResponse>;

    /// Fetch the current state of an application
    async fn get_application(&self, application_id: &str) -> Result<ApplicationRecord>;

    /// Fetch the sanction letter PDF bytes
    async fn get_sanction_letter(&self, application_id: &str) -> Result<Vec<u8>>;

    /// Probe backend availability
    async fn health_check(&self) -> Result<HealthStatus>;
}

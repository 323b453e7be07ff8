//! Chat Session
//!
//! One conversation with the loan advisor backend. The session is
//! driven by a single task and owns its state; backend failures become
//! assistant messages rather than errors so the transcript always shows
//! what happened.

use std::sync::Arc;

use loan_chat_core::{
    AgentKind, ApiError, ConversationContext, DataUpdate, ExtractedFields, LoanBackend,
    LoanChatRequest, LoanChatResponse,
};
use loan_chat_text_processing::{prepare_message, PreparedMessage};

use crate::cues::asks_for_salary;
use crate::error::AgentError;
use crate::message::ChatMessage;
use crate::preview::{render_preview, LetterPreview};

const PREVIEW_AGENT: &str = "PDF Agent";
const PREVIEW_NOTICE: &str = "Sanction letter preview generated inline due to backend file restriction.";

/// What happened during one `send`
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub prepared: PreparedMessage,
    /// Assistant messages added this turn
    pub replies: Vec<ChatMessage>,
    /// The turn was resent without a stale application id
    pub retried: bool,
    /// Final backend error, if the turn did not get a reply
    pub error: Option<ApiError>,
}

impl TurnOutcome {
    pub fn is_delivered(&self) -> bool {
        self.error.is_none()
    }
}

/// Conversation state for one customer
pub struct ChatSession {
    backend: Arc<dyn LoanBackend>,
    customer_id: String,
    active_agent: AgentKind,
    application_id: Option<String>,
    awaiting_salary: bool,
    detected_monthly_salary: Option<f64>,
    user_context: Option<String>,
    known_fields: ExtractedFields,
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(backend: Arc<dyn LoanBackend>, customer_id: impl Into<String>) -> Self {
        Self {
            backend,
            customer_id: customer_id.into(),
            active_agent: AgentKind::default(),
            application_id: None,
            awaiting_salary: false,
            detected_monthly_salary: None,
            user_context: None,
            known_fields: ExtractedFields::default(),
            messages: Vec::new(),
        }
    }

    pub fn with_agent(mut self, agent: AgentKind) -> Self {
        self.active_agent = agent;
        self
    }

    pub fn with_user_context(mut self, context: Option<String>) -> Self {
        self.set_user_context(context);
        self
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn active_agent(&self) -> AgentKind {
        self.active_agent
    }

    pub fn set_active_agent(&mut self, agent: AgentKind) {
        tracing::debug!(from = %self.active_agent, to = %agent, "Switching agent");
        self.active_agent = agent;
    }

    pub fn application_id(&self) -> Option<&str> {
        self.application_id.as_deref()
    }

    pub fn awaiting_salary(&self) -> bool {
        self.awaiting_salary
    }

    /// Last positive monthly salary sent to the backend
    pub fn detected_monthly_salary(&self) -> Option<f64> {
        self.detected_monthly_salary
    }

    pub fn user_context(&self) -> Option<&str> {
        self.user_context.as_deref()
    }

    /// Blank context clears it
    pub fn set_user_context(&mut self, context: Option<String>) {
        self.user_context = context
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
    }

    /// Fields detected so far in this conversation, latest values win
    pub fn known_fields(&self) -> &ExtractedFields {
        &self.known_fields
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn context(&self) -> ConversationContext {
        ConversationContext::new(self.active_agent, self.awaiting_salary)
    }

    /// Start over: forget the transcript and the application
    pub fn new_chat(&mut self) {
        tracing::info!(application_id = ?self.application_id, "Starting new chat");
        self.messages.clear();
        self.application_id = None;
        self.awaiting_salary = false;
        self.known_fields = ExtractedFields::default();
    }

    /// Send one user message; `None` for blank input
    pub async fn send(&mut self, text: &str) -> Option<TurnOutcome> {
        let prepared = prepare_message(text, &self.context())?;
        self.known_fields.merge(&prepared.fields);
        self.messages
            .push(ChatMessage::user(self.active_agent.key(), prepared.original.as_str()));
        let first_reply = self.messages.len();

        let request = LoanChatRequest {
            customer_id: self.customer_id.clone(),
            message: prepared.agent_prefixed(self.active_agent),
            application_id: self.application_id.clone(),
            data_update: Some(DataUpdate::from_fields(
                &prepared.fields,
                self.user_context.as_deref(),
            )),
        };

        let mut retried = false;
        let mut error = None;
        let result = self.backend.loan_chat(&request).await;
        match result {
            Ok(response) => self.accept_reply(response, &prepared),
            Err(e) if self.application_id.is_some() && e.is_application_missing() => {
                tracing::warn!(
                    application_id = ?self.application_id,
                    error = %e,
                    "Application unknown to backend, retrying without it"
                );
                self.application_id = None;
                retried = true;

                let retry = LoanChatRequest {
                    application_id: None,
                    ..request
                };
                let result = self.backend.loan_chat(&retry).await;
                match result {
                    Ok(response) => self.accept_reply(response, &prepared),
                    Err(e) => {
                        self.push_assistant(
                            self.active_agent.key(),
                            format!("Connection issue after retry: {}", e),
                        );
                        error = Some(e);
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Loan chat request failed");
                self.push_assistant(self.active_agent.key(), format!("Connection issue: {}", e));
                if e.is_read_only_filesystem() || e.is_letter_missing() {
                    if let Some(application_id) = self.application_id.clone() {
                        self.push_inline_preview(&application_id).await;
                    }
                }
                error = Some(e);
            }
        }

        Some(TurnOutcome {
            prepared,
            replies: self.messages[first_reply..].to_vec(),
            retried,
            error,
        })
    }

    fn accept_reply(&mut self, response: LoanChatResponse, prepared: &PreparedMessage) {
        if self.application_id.is_none() && !response.application_id.is_empty() {
            tracing::info!(application_id = %response.application_id, "Tracking application");
            self.application_id = Some(response.application_id.clone());
        }
        if let Some(salary) = prepared.fields.monthly_salary.filter(|s| *s > 0.0) {
            self.detected_monthly_salary = Some(salary);
        }

        let agent = if response.agent_name.is_empty() {
            self.active_agent.key().to_string()
        } else {
            response.agent_name
        };
        self.awaiting_salary = asks_for_salary(&response.message);
        tracing::debug!(
            agent = %agent,
            status = %response.status,
            awaiting_salary = self.awaiting_salary,
            "Reply received"
        );
        self.push_assistant(agent, response.message);
    }

    fn push_assistant(&mut self, agent: impl Into<String>, content: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(agent, content));
    }

    async fn push_inline_preview(&mut self, application_id: &str) {
        match self.backend.get_application(application_id).await {
            Ok(app) => {
                let content = format!("{}\n\n{}", PREVIEW_NOTICE, render_preview(&app));
                self.push_assistant(PREVIEW_AGENT, content);
            }
            Err(e) => {
                tracing::debug!(error = %e, "Could not fetch application for inline preview");
            }
        }
    }

    /// Fetch the sanction letter, falling back to a text preview
    pub async fn preview_letter(&self) -> Result<LetterPreview, AgentError> {
        let application_id = self.application_id.as_deref().ok_or(AgentError::NoApplication)?;

        match self.backend.get_sanction_letter(application_id).await {
            Ok(bytes) => Ok(LetterPreview::Pdf(bytes)),
            Err(letter_err) => {
                tracing::warn!(error = %letter_err, "Sanction letter unavailable, rendering preview");
                let app = self.backend.get_application(application_id).await?;
                Ok(LetterPreview::Inline {
                    text: render_preview(&app),
                    reason: letter_err.to_string(),
                })
            }
        }
    }

    /// Backend status line, `Online (<status>)` or `Offline (<reason>)`
    pub async fn check_backend(&self) -> String {
        match self.backend.health_check().await {
            Ok(health) => format!("Online ({})", health.summary()),
            Err(e) => format!("Offline ({})", e),
        }
    }
}

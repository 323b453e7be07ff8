//! Integration tests for the chat session against a scripted backend
//!
//! These tests verify the turn flow: extraction -> request -> reply
//! handling, including retries and the inline letter preview.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use loan_chat_agent::{AgentError, ChatSession, LetterPreview, Role};
use loan_chat_core::{
    AgentKind, ApiError, ApplicationRecord, CustomerRecord, HealthStatus, IntentStatus,
    LoanBackend, LoanChatRequest, LoanChatResponse, Result,
};

/// Backend that replays queued chat results and records every request
#[derive(Default)]
struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<LoanChatResponse>>>,
    requests: Mutex<Vec<LoanChatRequest>>,
    application: Option<ApplicationRecord>,
    letter: Option<Vec<u8>>,
}

impl ScriptedBackend {
    fn with_replies(replies: Vec<Result<LoanChatResponse>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            ..Self::default()
        }
    }

    fn requests(&self) -> Vec<LoanChatRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl LoanBackend for ScriptedBackend {
    async fn loan_chat(&self, request: &LoanChatRequest) -> Result<LoanChatResponse> {
        self.requests.lock().push(request.clone());
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted reply".to_string())))
    }

    async fn get_application(&self, application_id: &str) -> Result<ApplicationRecord> {
        match &self.application {
            Some(app) if app.application_id == application_id => Ok(app.clone()),
            _ => Err(ApiError::Http {
                status: 404,
                message: "Application not found".to_string(),
            }),
        }
    }

    async fn get_sanction_letter(&self, _application_id: &str) -> Result<Vec<u8>> {
        self.letter.clone().ok_or_else(|| ApiError::Http {
            status: 500,
            message: "[Errno 30] Read-only file system: 'letters/APP-1.pdf'".to_string(),
        })
    }

    async fn health_check(&self) -> Result<HealthStatus> {
        Ok(HealthStatus {
            status: Some("healthy".to_string()),
            ..HealthStatus::default()
        })
    }
}

fn reply(application_id: &str, agent_name: &str, message: &str) -> Result<LoanChatResponse> {
    Ok(LoanChatResponse {
        application_id: application_id.to_string(),
        agent_name: agent_name.to_string(),
        message: message.to_string(),
        status: "in_progress".to_string(),
        action_required: None,
    })
}

fn application() -> ApplicationRecord {
    ApplicationRecord {
        application_id: "APP-1".to_string(),
        customer: Some(CustomerRecord {
            customer_id: "cust-1".to_string(),
            name: Some("Priya Nair".to_string()),
        }),
        loan_amount: Some(500_000.0),
        interest_rate: Some(11.5),
        tenure_months: Some(36),
        emi: Some(16_488.0),
        status: Some("approved".to_string()),
    }
}

/// Salary prompt followed by an unlabelled figure
#[tokio::test]
async fn test_salary_prompt_then_figure() {
    let backend = Arc::new(ScriptedBackend::with_replies(vec![
        reply("APP-1", "Eligibility Agent", "Please share your monthly salary."),
        reply("APP-9", "Eligibility Agent", "Thanks, you are eligible."),
    ]));
    let mut session = ChatSession::new(backend.clone(), "cust-1");

    let first = session.send("I want a loan of 5 lakh").await.unwrap();
    assert!(first.is_delivered());
    assert_eq!(session.application_id(), Some("APP-1"));
    assert!(session.awaiting_salary());
    assert_eq!(first.replies[0].agent, "Eligibility Agent");

    let second = session.send("2 lakh a month").await.unwrap();
    assert!(second.is_delivered());
    // the first application id is kept
    assert_eq!(session.application_id(), Some("APP-1"));
    assert!(!session.awaiting_salary());
    assert_eq!(session.detected_monthly_salary(), Some(200_000.0));

    let requests = backend.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].message, "[Agent: Master] I want a loan of 5 lakh");
    assert_eq!(requests[0].application_id, None);
    let update = requests[0].data_update.as_ref().unwrap();
    assert_eq!(update.loan_amount, Some(500_000.0));
    assert_eq!(update.status, Some(IntentStatus::SalesDiscussion));

    assert_eq!(requests[1].application_id.as_deref(), Some("APP-1"));
    let update = requests[1].data_update.as_ref().unwrap();
    assert_eq!(update.salary, Some(200_000.0));
    assert_eq!(update.status, Some(IntentStatus::EligibilityCheck));

    assert_eq!(session.messages().len(), 4);
    assert_eq!(session.messages()[2].role, Role::User);
    assert_eq!(session.messages()[2].content, "2 lakh a month");
    assert_eq!(session.known_fields().monthly_salary, Some(200_000.0));
}

/// A stale application id is dropped and the turn resent once
#[tokio::test]
async fn test_stale_application_retried() {
    let backend = Arc::new(ScriptedBackend::with_replies(vec![
        reply("APP-1", "Master Agent", "Welcome"),
        Err(ApiError::Http {
            status: 404,
            message: "Application not found".to_string(),
        }),
        reply("APP-2", "Sales Agent", "Let's start again."),
    ]));
    let mut session = ChatSession::new(backend.clone(), "cust-1");

    session.send("hello").await.unwrap();
    let outcome = session.send("36 months").await.unwrap();

    assert!(outcome.retried);
    assert!(outcome.is_delivered());
    assert_eq!(session.application_id(), Some("APP-2"));
    assert_eq!(outcome.replies.len(), 1);
    assert_eq!(outcome.replies[0].content, "Let's start again.");

    let requests = backend.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[1].application_id.as_deref(), Some("APP-1"));
    assert_eq!(requests[2].application_id, None);
    assert_eq!(requests[2].message, requests[1].message);
    assert_eq!(
        requests[2].data_update.as_ref().unwrap().tenure_months,
        Some(36)
    );
}

#[tokio::test]
async fn test_failed_retry_reported() {
    let backend = Arc::new(ScriptedBackend::with_replies(vec![
        reply("APP-1", "Master Agent", "Welcome"),
        Err(ApiError::Http {
            status: 404,
            message: "Application not found".to_string(),
        }),
        Err(ApiError::Transport("timed out".to_string())),
    ]));
    let mut session = ChatSession::new(backend, "cust-1");

    session.send("hello").await.unwrap();
    let outcome = session.send("hello again").await.unwrap();

    assert!(outcome.retried);
    assert!(!outcome.is_delivered());
    assert_eq!(session.application_id(), None);
    assert_eq!(
        outcome.replies[0].content,
        "Connection issue after retry: transport error: timed out"
    );
}

/// Without an application id a not-found is reported, not retried
#[tokio::test]
async fn test_not_found_without_application() {
    let backend = Arc::new(ScriptedBackend::with_replies(vec![Err(
        ApiError::AllEndpointsFailed(vec!["HTTP 404: Not Found (endpoint: /chat)".to_string()]),
    )]));
    let mut session = ChatSession::new(backend.clone(), "cust-1").with_agent(AgentKind::Sales);

    let outcome = session.send("hello").await.unwrap();

    assert!(!outcome.retried);
    assert_eq!(backend.requests().len(), 1);
    assert_eq!(outcome.replies[0].agent, "Sales");
    assert_eq!(
        outcome.replies[0].content,
        "Connection issue: All endpoints failed: HTTP 404: Not Found (endpoint: /chat)"
    );
}

/// Read-only disk on the backend produces an inline letter preview
#[tokio::test]
async fn test_read_only_failure_adds_preview() {
    let backend = Arc::new(ScriptedBackend {
        application: Some(application()),
        ..ScriptedBackend::with_replies(vec![
            reply("APP-1", "Underwriting Agent", "You are approved."),
            Err(ApiError::Http {
                status: 500,
                message: "[Errno 30] Read-only file system: 'letters/APP-1.pdf'".to_string(),
            }),
        ])
    });
    let mut session = ChatSession::new(backend, "cust-1").with_agent(AgentKind::Pdf);

    session.send("hello").await.unwrap();
    let outcome = session.send("send the sanction letter").await.unwrap();

    assert_eq!(outcome.replies.len(), 2);
    assert!(outcome.replies[0].content.starts_with("Connection issue: [Errno 30]"));
    assert_eq!(outcome.replies[1].agent, "PDF Agent");
    assert!(outcome.replies[1]
        .content
        .starts_with("Sanction letter preview generated inline due to backend file restriction."));
    assert!(outcome.replies[1].content.contains("Application ID: APP-1"));
    assert_eq!(outcome.prepared.fields.intent_status, Some(IntentStatus::Approved));
}

#[tokio::test]
async fn test_letter_preview_pdf_and_fallback() {
    let pdf_backend = Arc::new(ScriptedBackend {
        letter: Some(b"%PDF-1.4".to_vec()),
        ..ScriptedBackend::with_replies(vec![reply("APP-1", "PDF Agent", "Letter ready")])
    });
    let mut session = ChatSession::new(pdf_backend, "cust-1");
    session.send("hello").await.unwrap();
    assert_eq!(
        session.preview_letter().await.unwrap(),
        LetterPreview::Pdf(b"%PDF-1.4".to_vec())
    );

    let inline_backend = Arc::new(ScriptedBackend {
        application: Some(application()),
        ..ScriptedBackend::with_replies(vec![reply("APP-1", "PDF Agent", "Letter ready")])
    });
    let mut session = ChatSession::new(inline_backend, "cust-1");
    session.send("hello").await.unwrap();
    match session.preview_letter().await.unwrap() {
        LetterPreview::Inline { text, reason } => {
            assert!(text.contains("Loan Amount: ₹5,00,000"));
            assert!(reason.contains("Read-only file system"));
        }
        other => panic!("expected inline preview, got {other:?}"),
    }
}

#[tokio::test]
async fn test_letter_preview_without_record() {
    let backend = Arc::new(ScriptedBackend::with_replies(vec![reply(
        "APP-5",
        "PDF Agent",
        "Letter ready",
    )]));
    let mut session = ChatSession::new(backend, "cust-1");
    session.send("hello").await.unwrap();

    let err = session.preview_letter().await.unwrap_err();
    assert!(matches!(err, AgentError::Backend(_)));
}

#[tokio::test]
async fn test_agent_name_falls_back_to_active_agent() {
    let backend = Arc::new(ScriptedBackend::with_replies(vec![reply("", "", "Hi there")]));
    let mut session = ChatSession::new(backend, "cust-1").with_agent(AgentKind::Kyc);

    let outcome = session.send("hello").await.unwrap();
    assert_eq!(outcome.replies[0].agent, "KYC");
    assert_eq!(session.application_id(), None);
}

#[tokio::test]
async fn test_user_context_forwarded_and_new_chat_resets() {
    let backend = Arc::new(ScriptedBackend::with_replies(vec![reply("APP-1", "Master Agent", "Hi")]));
    let mut session = ChatSession::new(backend.clone(), "cust-1")
        .with_user_context(Some("salaried, Pune".to_string()));

    session.send("hello").await.unwrap();
    let update = backend.requests()[0].data_update.clone().unwrap();
    assert_eq!(update.user_context.as_deref(), Some("salaried, Pune"));

    session.new_chat();
    assert!(session.messages().is_empty());
    assert_eq!(session.application_id(), None);
    assert_eq!(session.customer_id(), "cust-1");
}

#[tokio::test]
async fn test_backend_status_line() {
    let session = ChatSession::new(Arc::new(ScriptedBackend::default()), "cust-1");
    assert_eq!(session.check_backend().await, "Online (healthy)");
}

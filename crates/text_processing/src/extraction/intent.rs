//! Backend status inference from message keywords

use loan_chat_core::{AgentKind, ConversationContext, IntentStatus};
use once_cell::sync::Lazy;
use regex::Regex;

static PAN_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]{5}[0-9]{4}[A-Z]").unwrap());

static AADHAAR_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[0-9]{12}\b").unwrap());

const KYC_KEYWORDS: &[&str] = &["kyc", "pan", "aadhar"];

const SALES_KEYWORDS: &[&str] = &[
    "emi", "interest", "rate", "tenure", "months", "years", "loan", "amount", "rupees", "₹",
    "lakh", "lac", "crore",
];

const UNDERWRITING_KEYWORDS: &[&str] = &["credit score", "underwriting"];

const ELIGIBILITY_KEYWORDS: &[&str] = &["eligibility", "approve", "approval", "salary"];

const APPROVAL_KEYWORDS: &[&str] = &["sanction letter", "pdf"];

fn contains_any(lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| lower.contains(k))
}

/// Classify the outbound text into a backend status hint
///
/// Keyword checks are plain substring tests, so "rate" also fires on
/// "separate". The first matching rule wins.
pub fn classify_intent(text: &str, ctx: &ConversationContext) -> Option<IntentStatus> {
    if ctx.awaiting_salary || ctx.active_agent == AgentKind::Eligibility {
        return Some(IntentStatus::EligibilityCheck);
    }

    let lower = text.to_lowercase();

    if contains_any(&lower, KYC_KEYWORDS)
        || PAN_SHAPE.is_match(&text.to_uppercase())
        || AADHAAR_SHAPE.is_match(text)
    {
        return Some(IntentStatus::KycVerification);
    }
    if contains_any(&lower, SALES_KEYWORDS) {
        return Some(IntentStatus::SalesDiscussion);
    }
    if contains_any(&lower, UNDERWRITING_KEYWORDS) {
        return Some(IntentStatus::Underwriting);
    }
    if contains_any(&lower, ELIGIBILITY_KEYWORDS) {
        return Some(IntentStatus::EligibilityCheck);
    }
    if contains_any(&lower, APPROVAL_KEYWORDS) {
        return Some(IntentStatus::Approved);
    }
    None
}

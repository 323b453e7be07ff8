//! Message preparation
//!
//! One pass over a raw user message:
//! name normalization, loan amount, tenure, salary, salary tag,
//! ambiguity annotation and finally intent classification on the
//! outbound text. Extraction never fails; every rule yields a value or
//! `None`.

mod amount;
mod intent;
mod loan_amount;
mod name;
mod salary;
mod tenure;

pub use amount::{parse_amount, AmountUnit};
pub use intent::classify_intent;
pub use loan_amount::{extract_loan_amount, loan_extraction_allowed};
pub use name::{format_name, normalize_name};
pub use salary::{extract_monthly_salary, mentions_salary};
pub use tenure::{expresses_uncertainty, extract_tenure, tenure_candidates, TenureReading};

use loan_chat_core::{AgentKind, ConversationContext, ExtractedFields};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Uncertainty already voiced strongly enough for the backend to notice
static STATED_UNCERTAINTY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:unsure|not sure|uncertain|confuse|confused)\b").unwrap()
});

/// A user message ready to send
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreparedMessage {
    /// Trimmed user input, shown in the transcript
    pub original: String,
    /// Text sent to the backend (normalized, tagged, annotated)
    pub outbound: String,
    /// Structured side-channel fields
    pub fields: ExtractedFields,
    /// Every tenure mention, in months
    pub tenure_candidates: Vec<u32>,
    /// The user expressed doubt
    pub uncertain: bool,
}

impl PreparedMessage {
    /// Outbound text addressed to an agent, e.g. `[Agent: Sales] ...`
    pub fn agent_prefixed(&self, agent: AgentKind) -> String {
        format!("[Agent: {}] {}", agent.key(), self.outbound)
    }
}

/// Prepare one raw message; `None` for blank input
pub fn prepare_message(raw: &str, ctx: &ConversationContext) -> Option<PreparedMessage> {
    let original = raw.trim();
    if original.is_empty() {
        return None;
    }

    let text = normalize_name(original);

    let loan_amount = if loan_extraction_allowed(&text, ctx.active_agent) {
        extract_loan_amount(&text).filter(|v| *v > 0.0)
    } else {
        None
    };

    let tenure = TenureReading::read(&text);

    let salary_allowed = mentions_salary(&text)
        || ctx.active_agent == AgentKind::Eligibility
        || ctx.awaiting_salary;
    let monthly_salary = if salary_allowed {
        extract_monthly_salary(&text).filter(|v| *v > 0.0)
    } else {
        None
    };

    let mut outbound = text;
    if let Some(salary) = monthly_salary {
        if !mentions_salary(&outbound) && ctx.active_agent == AgentKind::Eligibility {
            outbound = format!("{}. My salary is {}", outbound, salary);
        }
    }

    if tenure.is_ambiguous() {
        outbound = annotate_tenure(outbound, &tenure.candidates);
    }

    let fields = ExtractedFields {
        monthly_salary,
        loan_amount,
        tenure_months: tenure.definitive(),
        intent_status: classify_intent(&outbound, ctx),
    };

    tracing::debug!(
        agent = %ctx.active_agent,
        salary = ?fields.monthly_salary,
        loan_amount = ?fields.loan_amount,
        tenure_months = ?fields.tenure_months,
        candidates = tenure.candidates.len(),
        status = ?fields.intent_status,
        "Prepared message"
    );

    Some(PreparedMessage {
        original: original.to_string(),
        outbound,
        fields,
        tenure_candidates: tenure.candidates,
        uncertain: tenure.uncertain,
    })
}

fn months_list(candidates: &[u32]) -> String {
    candidates
        .iter()
        .map(|n| format!("{} months", n))
        .collect::<Vec<_>>()
        .join(" or ")
}

/// Append a tenure clarification so the backend asks instead of guessing
fn annotate_tenure(text: String, candidates: &[u32]) -> String {
    if !STATED_UNCERTAINTY.is_match(&text) {
        if candidates.is_empty() {
            format!("{}. I am unsure about the tenure", text)
        } else {
            format!(
                "{}. I am unsure about the tenure (considering {})",
                text,
                months_list(candidates)
            )
        }
    } else if candidates.len() >= 2 {
        format!("{}. I am considering {}", text, months_list(candidates))
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_chat_core::IntentStatus;

    fn ctx(agent: AgentKind) -> ConversationContext {
        ConversationContext::for_agent(agent)
    }

    #[test]
    fn test_blank_input() {
        assert!(prepare_message("", &ctx(AgentKind::Master)).is_none());
        assert!(prepare_message("   \n\t", &ctx(AgentKind::Master)).is_none());
    }

    #[test]
    fn test_loan_request() {
        let prepared = prepare_message("  I want a loan of 5 lakh ", &ctx(AgentKind::Master)).unwrap();
        assert_eq!(prepared.original, "I want a loan of 5 lakh");
        assert_eq!(prepared.outbound, "I want a loan of 5 lakh");
        assert_eq!(prepared.fields.loan_amount, Some(500_000.0));
        assert_eq!(prepared.fields.monthly_salary, None);
        assert_eq!(prepared.fields.intent_status, Some(IntentStatus::SalesDiscussion));
    }

    #[test]
    fn test_aadhaar_is_not_a_loan() {
        let prepared = prepare_message("491234567890", &ctx(AgentKind::Sales)).unwrap();
        assert_eq!(prepared.fields.loan_amount, None);
        assert_eq!(prepared.fields.intent_status, Some(IntentStatus::KycVerification));
    }

    #[test]
    fn test_pan_with_loan_is_kyc() {
        let prepared =
            prepare_message("my PAN is ABCDE1234F and I need a loan", &ctx(AgentKind::Master)).unwrap();
        assert_eq!(prepared.fields.intent_status, Some(IntentStatus::KycVerification));
    }

    #[test]
    fn test_definitive_tenure() {
        let prepared = prepare_message("36 months", &ctx(AgentKind::Master)).unwrap();
        assert_eq!(prepared.fields.tenure_months, Some(36));
        assert_eq!(prepared.outbound, "36 months");

        let prepared = prepare_message("3 years", &ctx(AgentKind::Master)).unwrap();
        assert_eq!(prepared.fields.tenure_months, Some(36));
    }

    #[test]
    fn test_uncertain_tenure_lists_candidates() {
        let prepared = prepare_message("4 or 5 years, I'm not sure", &ctx(AgentKind::Sales)).unwrap();
        assert_eq!(prepared.fields.tenure_months, None);
        assert_eq!(prepared.tenure_candidates, vec![48, 60]);
        assert!(prepared.uncertain);
        assert!(prepared.outbound.ends_with(". I am considering 48 months or 60 months"));
    }

    #[test]
    fn test_ambiguous_tenure_without_doubt_words() {
        let prepared = prepare_message("3 years or 48 months", &ctx(AgentKind::Master)).unwrap();
        assert_eq!(prepared.fields.tenure_months, None);
        assert_eq!(
            prepared.outbound,
            "3 years or 48 months. I am unsure about the tenure (considering 36 months or 48 months)"
        );
    }

    #[test]
    fn test_worry_without_candidates() {
        let prepared = prepare_message("Rates look high, I'm worried", &ctx(AgentKind::Master)).unwrap();
        assert_eq!(
            prepared.outbound,
            "Rates look high, I'm worried. I am unsure about the tenure"
        );
    }

    #[test]
    fn test_salary_tag_for_eligibility() {
        let prepared = prepare_message("2 lakh per month", &ctx(AgentKind::Eligibility)).unwrap();
        assert_eq!(prepared.fields.monthly_salary, Some(200_000.0));
        assert_eq!(prepared.outbound, "2 lakh per month. My salary is 200000");
        assert_eq!(prepared.fields.intent_status, Some(IntentStatus::EligibilityCheck));
    }

    #[test]
    fn test_salary_needs_gate() {
        let prepared = prepare_message("I earn 80k every month", &ctx(AgentKind::Master)).unwrap();
        assert_eq!(prepared.fields.monthly_salary, None);

        let awaiting = ConversationContext::new(AgentKind::Master, true);
        let prepared = prepare_message("I earn 80k every month", &awaiting).unwrap();
        assert_eq!(prepared.fields.monthly_salary, Some(80_000.0));
        // tag only applies to the eligibility agent
        assert_eq!(prepared.outbound, "I earn 80k every month");
    }

    #[test]
    fn test_explicit_salary_not_tagged() {
        let prepared =
            prepare_message("my salary is 12 lakh yearly", &ctx(AgentKind::Eligibility)).unwrap();
        assert_eq!(prepared.fields.monthly_salary, Some(100_000.0));
        assert_eq!(prepared.outbound, "my salary is 12 lakh yearly");
    }

    #[test]
    fn test_bare_name() {
        let prepared = prepare_message("rahul sharma", &ctx(AgentKind::Master)).unwrap();
        assert_eq!(prepared.outbound, "My name is Rahul Sharma");
        assert_eq!(prepared.original, "rahul sharma");
        assert!(prepared.fields.is_empty());
    }

    #[test]
    fn test_agent_prefix() {
        let prepared = prepare_message("hello", &ctx(AgentKind::Kyc)).unwrap();
        assert_eq!(prepared.agent_prefixed(AgentKind::Kyc), "[Agent: KYC] hello");
    }

    #[test]
    fn test_serializes_for_display() {
        let prepared = prepare_message("36 months", &ctx(AgentKind::Master)).unwrap();
        let json = serde_json::to_value(&prepared).unwrap();
        assert_eq!(json["fields"]["tenure_months"], 36);
        assert_eq!(json["uncertain"], false);
    }
}

//! Loan principal extraction
//!
//! Loan amounts only take lakh/crore units. "50k" style figures are read
//! as plain numbers here even though salary parsing accepts them.

use loan_chat_core::AgentKind;
use once_cell::sync::Lazy;
use regex::Regex;

use super::amount::{parse_amount, NUMBER};

static LOAN_AMOUNT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)({NUMBER})\s*(lakh|lakhs|crore|crores)?")).unwrap()
});

static MONETARY_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:loan|amount|rupees|lakh|lakhs|crore|crores)\b|₹").unwrap()
});

/// A message that is nothing but an Aadhaar-shaped number
static BARE_AADHAAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[0-9]{12}\s*$").unwrap());

/// Whether loan amount extraction should run for this message
pub fn loan_extraction_allowed(text: &str, active_agent: AgentKind) -> bool {
    let monetary = active_agent == AgentKind::Sales || MONETARY_KEYWORD.is_match(text);
    if monetary && BARE_AADHAAR.is_match(text) {
        tracing::debug!("Skipping loan amount extraction - looks like an Aadhaar number");
        return false;
    }
    monetary
}

/// Extract the first amount in the text as a loan principal in rupees
pub fn extract_loan_amount(text: &str) -> Option<f64> {
    let caps = LOAN_AMOUNT_PATTERN.captures(text)?;
    parse_amount(caps.get(1)?.as_str(), caps.get(2).map(|u| u.as_str()))
}

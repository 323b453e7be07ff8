//! Loan tenure extraction

use once_cell::sync::Lazy;
use regex::Regex;

static TENURE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+)\s*(months?|years?)").unwrap());

/// `[<n> or|to|-|/] <n> <unit>`; a leading number borrows the unit
static TENURE_LIST_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:([0-9]+)\s*(?:or|to|-|/)\s*)?([0-9]+)\s*(months?|month|years?|yrs?|y)").unwrap()
});

static UNCERTAINTY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:unsure|not sure|confuse|confused|uncertain|hesitant|nervous|worried|dilemma|overwhelmed)\b",
    )
    .unwrap()
});

/// First tenure mention in months, e.g. "3 years" -> 36
///
/// Standalone helper for callers that want a single figure; message
/// preparation reads every mention through [`TenureReading`] instead.
pub fn extract_tenure(text: &str) -> Option<u32> {
    let lower = text.to_lowercase();
    let caps = TENURE_PATTERN.captures(&lower)?;
    let n: u32 = caps.get(1)?.as_str().parse().ok()?;
    to_months(n, caps.get(2)?.as_str())
}

/// Every tenure mention in months, in order of appearance
pub fn tenure_candidates(text: &str) -> Vec<u32> {
    let lower = text.to_lowercase();
    let mut candidates = Vec::new();
    for caps in TENURE_LIST_PATTERN.captures_iter(&lower) {
        let unit = caps.get(3).map(|m| m.as_str()).unwrap_or("");
        for number in [caps.get(1), caps.get(2)].into_iter().flatten() {
            // digits too large for u32 are dropped
            let months = number
                .as_str()
                .parse::<u32>()
                .ok()
                .and_then(|n| to_months(n, unit));
            if let Some(months) = months.filter(|m| *m > 0) {
                candidates.push(months);
            }
        }
    }
    candidates
}

/// Whether the text expresses doubt about the decision
pub fn expresses_uncertainty(text: &str) -> bool {
    UNCERTAINTY.is_match(text)
}

fn to_months(n: u32, unit: &str) -> Option<u32> {
    if unit.starts_with('y') {
        n.checked_mul(12)
    } else {
        Some(n)
    }
}

/// Tenure verdict for one message
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TenureReading {
    pub candidates: Vec<u32>,
    pub uncertain: bool,
}

impl TenureReading {
    pub fn read(text: &str) -> Self {
        Self {
            candidates: tenure_candidates(text),
            uncertain: expresses_uncertainty(text),
        }
    }

    /// Single tenure the customer committed to
    pub fn definitive(&self) -> Option<u32> {
        match self.candidates.as_slice() {
            [only] if !self.uncertain => Some(*only),
            _ => None,
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        self.candidates.len() > 1 || self.uncertain
    }
}

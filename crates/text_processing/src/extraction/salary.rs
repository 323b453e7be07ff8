//! Monthly salary extraction
//!
//! Rules, first success wins:
//! 1. "salary ... <amount>": qualified by month/year words anywhere, monthly by default
//! 2. first amount in the text, only when a month/year qualifier is present
//! 3. two or more amounts: the one nearest to "month" (else "year")

use once_cell::sync::Lazy;
use regex::Regex;

use super::amount::{amount_mentions, first_amount, parse_amount, AmountMention, NUMBER, SALARY_UNITS};

static SALARY_AMOUNT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)salary[^0-9]*({NUMBER})\s*({SALARY_UNITS})?")).unwrap()
});

static SALARY_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bsalary\b").unwrap());

static MONTHLY_QUALIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:month|monthly)\b").unwrap());

static YEARLY_QUALIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:year|yearly|annum|annual)\b").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Period {
    Monthly,
    Yearly,
}

impl Period {
    /// Period stated anywhere in the text; monthly wins when both appear
    fn stated_in(text: &str) -> Option<Period> {
        if MONTHLY_QUALIFIER.is_match(text) {
            Some(Period::Monthly)
        } else if YEARLY_QUALIFIER.is_match(text) {
            Some(Period::Yearly)
        } else {
            None
        }
    }

    fn to_monthly(self, value: f64) -> f64 {
        match self {
            Period::Monthly => value,
            Period::Yearly => (value / 12.0).round(),
        }
    }
}

/// Whether the text mentions salary as a whole word
pub fn mentions_salary(text: &str) -> bool {
    SALARY_WORD.is_match(text)
}

/// Extract a salary figure normalized to a monthly rupee amount
pub fn extract_monthly_salary(text: &str) -> Option<f64> {
    let lower = text.to_lowercase();
    let period = Period::stated_in(&lower);

    // Rule 1: explicit salary mention
    if let Some(caps) = SALARY_AMOUNT_PATTERN.captures(&lower) {
        let value = caps
            .get(1)
            .and_then(|num| parse_amount(num.as_str(), caps.get(2).map(|u| u.as_str())));
        if let Some(value) = value {
            let monthly = period.unwrap_or(Period::Monthly).to_monthly(value);
            tracing::trace!(value, monthly, "Salary matched explicit mention");
            return Some(monthly);
        }
    }

    // Rule 2: first amount with a month/year qualifier
    if let Some(mention) = first_amount(&lower) {
        let value = mention.value?;
        if let Some(period) = period {
            return Some(period.to_monthly(value));
        }
    }

    // Rule 3: several amounts, pick the one nearest to the period keyword
    let mentions = amount_mentions(&lower);
    if mentions.len() >= 2 {
        if let Some(keyword_at) = char_index(&lower, "month") {
            if let Some(value) = nearest(&mentions, keyword_at).value {
                return Some(value);
            }
        }
        if let Some(keyword_at) = char_index(&lower, "year") {
            if let Some(value) = nearest(&mentions, keyword_at).value {
                return Some(Period::Yearly.to_monthly(value));
            }
        }
    }

    None
}

/// Character offset of the first occurrence of `needle`
fn char_index(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .find(needle)
        .map(|byte_at| haystack[..byte_at].chars().count())
}

/// Mention whose start is closest to `target`; the earliest wins ties
fn nearest(mentions: &[AmountMention], target: usize) -> &AmountMention {
    let mut best = &mentions[0];
    let mut best_distance = usize::MAX;
    for mention in mentions {
        let distance = mention.start.abs_diff(target);
        if distance < best_distance {
            best_distance = distance;
            best = mention;
        }
    }
    best
}

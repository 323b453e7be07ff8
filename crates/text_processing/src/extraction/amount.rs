//! Monetary amount parsing with Indian numbering units

use once_cell::sync::Lazy;
use regex::Regex;

/// Numeric token: digits with optional thousands separators and fraction
pub(crate) const NUMBER: &str = r"[0-9][0-9,]*(?:\.[0-9]+)?";

/// Every unit a salary figure may carry, in match priority order
pub(crate) const SALARY_UNITS: &str = r"k|thousand|thousands|lakh|lakhs|lac|lacs|lkhs|lkh|crore|crores";

/// First/all `<number> [unit]` occurrences; unit may be glued on ("2lakh")
static AMOUNT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)({NUMBER})\s*({SALARY_UNITS})?")).unwrap()
});

/// Amount multiplier for a unit word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountUnit {
    Unit,     // 1
    Thousand, // 1,000
    Lakh,     // 100,000
    Crore,    // 10,000,000
}

impl AmountUnit {
    pub fn value(&self) -> f64 {
        match self {
            AmountUnit::Unit => 1.0,
            AmountUnit::Thousand => 1_000.0,
            AmountUnit::Lakh => 100_000.0,
            AmountUnit::Crore => 10_000_000.0,
        }
    }

    /// Classify a unit word (case-insensitive); unknown words multiply by one
    pub fn from_word(word: &str) -> Self {
        match word.to_lowercase().as_str() {
            "crore" | "crores" => AmountUnit::Crore,
            "lakh" | "lakhs" | "lac" | "lacs" | "lkh" | "lkhs" => AmountUnit::Lakh,
            "k" | "thousand" | "thousands" => AmountUnit::Thousand,
            _ => AmountUnit::Unit,
        }
    }
}

/// Convert a numeric token plus optional unit word into rupees
///
/// Returns `None` when the token does not parse to a finite number.
pub fn parse_amount(number: &str, unit: Option<&str>) -> Option<f64> {
    let cleaned = number.replace(',', "");
    let base: f64 = cleaned.parse().ok()?;
    if !base.is_finite() {
        return None;
    }
    let multiplier = unit.map(AmountUnit::from_word).unwrap_or(AmountUnit::Unit);
    let value = base * multiplier.value();
    value.is_finite().then_some(value)
}

/// One `<number> [unit]` occurrence
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AmountMention {
    /// Rupee value, `None` if the token failed to parse
    pub(crate) value: Option<f64>,
    /// Character offset of the match start
    pub(crate) start: usize,
}

/// First amount occurrence in the text
pub(crate) fn first_amount(text: &str) -> Option<AmountMention> {
    AMOUNT_PATTERN
        .captures(text)
        .map(|caps| mention_from(text, &caps))
}

/// All amount occurrences, in order of appearance
pub(crate) fn amount_mentions(text: &str) -> Vec<AmountMention> {
    AMOUNT_PATTERN
        .captures_iter(text)
        .map(|caps| mention_from(text, &caps))
        .collect()
}

fn mention_from(text: &str, caps: &regex::Captures<'_>) -> AmountMention {
    // group 0 always participates in a match
    let whole = caps.get(0).map(|m| m.start()).unwrap_or(0);
    let value = caps
        .get(1)
        .and_then(|num| parse_amount(num.as_str(), caps.get(2).map(|u| u.as_str())));
    AmountMention {
        value,
        start: text[..whole].chars().count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_multipliers() {
        assert_eq!(parse_amount("2", Some("lakh")), Some(200_000.0));
        assert_eq!(parse_amount("2", Some("LKHS")), Some(200_000.0));
        assert_eq!(parse_amount("3", Some("lacs")), Some(300_000.0));
        assert_eq!(parse_amount("1.5", Some("crore")), Some(15_000_000.0));
        assert_eq!(parse_amount("50", Some("k")), Some(50_000.0));
        assert_eq!(parse_amount("20", Some("Thousands")), Some(20_000.0));
        assert_eq!(parse_amount("20,000", None), Some(20_000.0));
    }

    #[test]
    fn test_unparseable_token_is_absent() {
        assert_eq!(parse_amount("", None), None);
        assert_eq!(parse_amount(",", Some("lakh")), None);
        assert_eq!(parse_amount("abc", None), None);
    }

    #[test]
    fn test_amount_round_trip() {
        for (token, unit) in [("2.5", "lakh"), ("1.25", "crore"), ("75", "k"), ("12,500", "thousand")] {
            let rupees = parse_amount(token, Some(unit)).unwrap();
            let back = rupees / AmountUnit::from_word(unit).value();
            let original: f64 = token.replace(',', "").parse().unwrap();
            assert!((back - original).abs() < 1e-9, "{token} {unit}");
        }
    }

    #[test]
    fn test_glued_unit() {
        let mention = first_amount("about 2lakh per month").unwrap();
        assert_eq!(mention.value, Some(200_000.0));
        assert_eq!(mention.start, 6);
    }

    #[test]
    fn test_mentions_in_order() {
        let mentions = amount_mentions("2 lakh a month or 24 lakh a year");
        let values: Vec<_> = mentions.iter().map(|m| m.value).collect();
        assert_eq!(values, vec![Some(200_000.0), Some(2_400_000.0)]);
        assert_eq!(mentions[1].start, 18);
    }

    #[test]
    fn test_offsets_are_characters() {
        let mentions = amount_mentions("₹₹ 5 lakh");
        assert_eq!(mentions[0].start, 3);
    }
}

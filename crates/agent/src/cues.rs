//! Reply cues that change how the next turn is read

use once_cell::sync::Lazy;
use regex::Regex;

static SALARY_PROMPT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)monthly\s+salary|provide\s+your\s+salary|salary\b").unwrap()
});

/// The assistant asked the customer for their salary
pub(crate) fn asks_for_salary(reply: &str) -> bool {
    SALARY_PROMPT.is_match(reply)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salary_prompts() {
        assert!(asks_for_salary("Please share your Monthly  Salary."));
        assert!(asks_for_salary("Could you provide your salary details?"));
        assert!(asks_for_salary("What is your net salary?"));
        assert!(!asks_for_salary("Your KYC is complete."));
        assert!(!asks_for_salary("salaryman"));
    }
}

//! Sanction letter preview
//!
//! When the backend cannot serve the PDF (read-only disk on hosted
//! instances), a plain-text letter is rendered from the application
//! record instead.

use loan_chat_core::ApplicationRecord;

/// Result of asking for the sanction letter
#[derive(Debug, Clone, PartialEq)]
pub enum LetterPreview {
    /// PDF bytes as served by the backend
    Pdf(Vec<u8>),
    /// Text rendering; `reason` is why the PDF could not be fetched
    Inline { text: String, reason: String },
}

/// Plain-text sanction letter; missing or zero values show as "-"
pub fn render_preview(app: &ApplicationRecord) -> String {
    let dash = || "-".to_string();
    let lines = [
        "Sanction Letter (Preview)".to_string(),
        format!("Applicant: {}", app.applicant().unwrap_or("-")),
        format!("Application ID: {}", app.application_id),
        format!(
            "Loan Amount: {}",
            positive(app.loan_amount).map(rupees).unwrap_or_else(dash)
        ),
        format!(
            "Interest Rate: {}",
            positive(app.interest_rate)
                .map(|rate| format!("{}%", rate))
                .unwrap_or_else(dash)
        ),
        format!(
            "Tenure: {}",
            app.tenure_months
                .filter(|m| *m > 0)
                .map(|m| format!("{} months", m))
                .unwrap_or_else(dash)
        ),
        format!("EMI: {}", positive(app.emi).map(rupees).unwrap_or_else(dash)),
        format!(
            "Status: {}",
            app.status.as_deref().filter(|s| !s.is_empty()).unwrap_or("-")
        ),
        "Note: PDF file couldn't be fetched; showing text preview.".to_string(),
    ];
    lines.join("\n")
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0 && v.is_finite())
}

fn rupees(value: f64) -> String {
    format!("₹{}", group_indian(value))
}

/// Indian digit grouping: 1234567.5 -> "12,34,567.5"
fn group_indian(value: f64) -> String {
    let rounded = (value.abs() * 100.0).round() / 100.0;
    let whole = rounded.trunc() as u64;
    let paise = ((rounded - rounded.trunc()) * 100.0).round() as u64;

    let digits = whole.to_string();
    let mut grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut pairs = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(2);
            pairs.push(&head[start..end]);
            end = start;
        }
        pairs.reverse();
        format!("{},{}", pairs.join(","), tail)
    };

    if paise > 0 {
        let fraction = format!("{:02}", paise);
        grouped.push('.');
        grouped.push_str(fraction.trim_end_matches('0'));
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_chat_core::CustomerRecord;

    #[test]
    fn test_indian_grouping() {
        assert_eq!(group_indian(999.0), "999");
        assert_eq!(group_indian(1_000.0), "1,000");
        assert_eq!(group_indian(16_488.0), "16,488");
        assert_eq!(group_indian(500_000.0), "5,00,000");
        assert_eq!(group_indian(12_345_678.5), "1,23,45,678.5");
        assert_eq!(group_indian(20_000.25), "20,000.25");
    }

    #[test]
    fn test_full_preview() {
        let app = ApplicationRecord {
            application_id: "APP-7".to_string(),
            customer: Some(CustomerRecord {
                customer_id: "cust-1".to_string(),
                name: Some("Priya Nair".to_string()),
            }),
            loan_amount: Some(500_000.0),
            interest_rate: Some(11.5),
            tenure_months: Some(36),
            emi: Some(16_488.0),
            status: Some("approved".to_string()),
        };
        let text = render_preview(&app);
        assert!(text.starts_with("Sanction Letter (Preview)\n"));
        assert!(text.contains("Applicant: Priya Nair\n"));
        assert!(text.contains("Loan Amount: ₹5,00,000\n"));
        assert!(text.contains("Interest Rate: 11.5%\n"));
        assert!(text.contains("Tenure: 36 months\n"));
        assert!(text.contains("EMI: ₹16,488\n"));
        assert!(text.contains("Status: approved\n"));
    }

    #[test]
    fn test_missing_values_dashed() {
        let app = ApplicationRecord {
            application_id: "APP-8".to_string(),
            loan_amount: Some(0.0),
            ..ApplicationRecord::default()
        };
        let text = render_preview(&app);
        assert!(text.contains("Applicant: -\n"));
        assert!(text.contains("Loan Amount: -\n"));
        assert!(text.contains("Interest Rate: -\n"));
        assert!(text.contains("Tenure: -\n"));
        assert!(text.contains("EMI: -\n"));
        assert!(text.contains("Status: -\n"));
    }
}

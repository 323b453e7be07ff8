//! Customer name detection and title-casing

use once_cell::sync::Lazy;
use regex::Regex;

static SINGLE_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap());

static GREETING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:hello|hi|hey|howdy|namaste|hola|bonjour)$").unwrap());

static BARE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Za-z][A-Za-z'.-]+)(?:\s+[A-Za-z][A-Za-z'.-]+)+$").unwrap()
});

static INTRODUCTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(?:my name is|i am|i'm)").unwrap());

static NAME_PHRASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:my name is|i am|i'm)\s+([A-Za-z][A-Za-z'.-]+(?:\s+[A-Za-z][A-Za-z'.-]+)+)")
        .unwrap()
});

/// Title-case a name, keeping hyphenated parts ("mary-jane o'neil" -> "Mary-Jane O'neil")
pub fn format_name(name: &str) -> String {
    name.split_whitespace()
        .map(|part| {
            part.split('-')
                .map(capitalize)
                .collect::<Vec<_>>()
                .join("-")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Whether a trimmed message is just a multi-word name
fn is_bare_name(text: &str) -> bool {
    !GREETING.is_match(text)
        && !SINGLE_WORD.is_match(text)
        && BARE_NAME.is_match(text)
        && !INTRODUCTION.is_match(text)
}

/// Rewrite bare names into an introduction and title-case introduced names
pub fn normalize_name(text: &str) -> String {
    let mut normalized = if is_bare_name(text) {
        tracing::debug!("Rewriting bare name as an introduction");
        format!("My name is {}", format_name(text))
    } else {
        text.to_string()
    };

    let raw_name = NAME_PHRASE
        .captures(&normalized)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());
    if let Some(raw_name) = raw_name {
        let formatted = format_name(&raw_name);
        normalized = normalized.replacen(&raw_name, &formatted, 1);
    }
    normalized
}

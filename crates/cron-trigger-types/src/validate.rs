//! Field validators
//!
//! Each validator takes a candidate value and returns zero or one
//! diagnostics. Validators never short-circuit each other; callers
//! concatenate the results to report every bad field at once.

use crate::schedule::Schedule;
use crate::trigger::{FIELD_EXPRESSION, FIELD_MESSAGE, FIELD_PIPELINE_ID};
use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::fmt;

/// Allowed trigger message: 2 to 128 characters from a fixed class
pub const MESSAGE_PATTERN: &str = r"^[A-Za-z0-9_+\s\-#?.:]{2,128}$";

lazy_static! {
    // ASCII mode: `\s` means ASCII whitespace and the length counts characters.
    static ref MESSAGE_RE: Regex = RegexBuilder::new(MESSAGE_PATTERN)
        .unicode(false)
        .build()
        .expect("message pattern is valid");
}

/// A validation error for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub field: &'static str,
    pub summary: String,
    pub detail: String,
}

impl Diagnostic {
    pub fn error(field: &'static str, summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            field,
            summary: summary.into(),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {}", self.field, self.summary, self.detail)
    }
}

/// Check a schedule expression against the six-field grammar
pub fn validate_expression(value: &str) -> Vec<Diagnostic> {
    match Schedule::parse(value) {
        Ok(_) => Vec::new(),
        Err(e) => vec![Diagnostic::error(
            FIELD_EXPRESSION,
            "Invalid cron expression.",
            format!("The cron expression {:?} is invalid: {}", value, e),
        )],
    }
}

/// Check a trigger message against [`MESSAGE_PATTERN`]
pub fn validate_message(value: &str) -> Vec<Diagnostic> {
    if MESSAGE_RE.is_match(value) {
        return Vec::new();
    }
    vec![Diagnostic::error(
        FIELD_MESSAGE,
        "Invalid message.",
        format!(
            "The message {:?} is invalid (must match {:?}).",
            value, MESSAGE_PATTERN
        ),
    )]
}

pub fn validate_pipeline_id(value: &str) -> Vec<Diagnostic> {
    if !value.is_empty() {
        return Vec::new();
    }
    vec![Diagnostic::error(
        FIELD_PIPELINE_ID,
        "Missing pipeline ID.",
        "A cron trigger must reference an existing pipeline.",
    )]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noon_daily_is_accepted() {
        assert!(validate_expression("0 0 12 * * ?").is_empty());
    }

    #[test]
    fn test_sunday_is_day_zero() {
        assert!(validate_expression("0 0 0 * * 0").is_empty());
        assert!(validate_expression("0 0 0 * * 0-6").is_empty());

        let diagnostics = validate_expression("0 0 0 * * 7");
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].detail.contains("above maximum (6)"));
    }

    #[test]
    fn test_diagnostic_serializes_without_severity() {
        let json = serde_json::to_value(&validate_pipeline_id("")[0]).unwrap();
        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["detail", "field", "summary"]);
    }

    #[test]
    fn test_descriptor_is_accepted() {
        assert!(validate_expression("@yearly").is_empty());
        assert!(validate_expression("@every 5m").is_empty());
    }

    #[test]
    fn test_invalid_expression_embeds_input() {
        let diagnostics = validate_expression("not a cron");
        assert_eq!(diagnostics.len(), 1);
        let diagnostic = &diagnostics[0];
        assert_eq!(diagnostic.field, FIELD_EXPRESSION);
        assert_eq!(diagnostic.summary, "Invalid cron expression.");
        assert!(diagnostic.detail.contains("not a cron"));
    }

    #[test]
    fn test_message_accepted() {
        assert!(validate_message("Build #42: release-candidate").is_empty());
        assert!(validate_message("ok").is_empty());
        assert!(validate_message(&"a".repeat(128)).is_empty());
    }

    #[test]
    fn test_message_too_short() {
        assert_eq!(validate_message("a").len(), 1);
        assert_eq!(validate_message("").len(), 1);
    }

    #[test]
    fn test_message_too_long() {
        assert_eq!(validate_message(&"a".repeat(129)).len(), 1);
    }

    #[test]
    fn test_message_disallowed_character() {
        let diagnostics = validate_message("user@example");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].summary, "Invalid message.");
        assert!(diagnostics[0].detail.contains(MESSAGE_PATTERN.replace('\\', "\\\\").as_str()));
    }

    #[test]
    fn test_message_non_ascii_rejected() {
        assert_eq!(validate_message("héllo").len(), 1);
    }

    #[test]
    fn test_pipeline_id() {
        assert!(validate_pipeline_id("p-1").is_empty());
        assert_eq!(validate_pipeline_id("").len(), 1);
    }
}

//! Field validators.
//!
//! Each validator checks one present, non-blank raw JSON value and returns
//! the normalized value or a human-readable message. Validators are pure:
//! beyond the raw value they only see the fields that already passed.
//! Messages name the field, never its value.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

/// Normalized value or the message describing why the field was rejected.
pub type FieldResult = std::result::Result<Value, String>;

// local@domain.tld, each domain label non-empty, at least one dot.
#[allow(clippy::expect_used)]
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(?:\.[^\s@.]+)+$").expect("email pattern is a valid literal")
});

/// Inclusive character-count bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Length {
    pub min: usize,
    pub max: usize,
}

impl Length {
    pub fn new(min: Option<usize>, max: Option<usize>) -> Self {
        Self {
            min: min.unwrap_or(0),
            max: max.unwrap_or(usize::MAX),
        }
    }

    fn check(self, field: &str, value: &str) -> Result<(), String> {
        let n = value.chars().count();
        if n < self.min || n > self.max {
            return Err(format!(
                "{field} must be between {} and {} characters",
                self.min, self.max
            ));
        }
        Ok(())
    }
}

/// Absent, `null`, or a string that is empty after trimming.
pub fn is_blank(raw: Option<&Value>) -> bool {
    match raw {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

fn as_text<'a>(field: &str, raw: &'a Value) -> Result<&'a str, String> {
    raw.as_str().ok_or_else(|| format!("{field} must be a string"))
}

/// Trimmed text within `len`.
pub fn validate_string(field: &str, raw: &Value, len: Length) -> FieldResult {
    let text = as_text(field, raw)?.trim();
    len.check(field, text)?;
    Ok(Value::String(text.to_string()))
}

/// Trimmed, lowercased address. Shape is checked before length so a
/// malformed address gets the dedicated message.
///
/// A `compare` field pointing at an email sees this normalized value, so a
/// confirmation typed as `A@b.com` does not match `A@b.com`: the raw
/// confirmation is compared against `a@b.com`.
pub fn validate_email(field: &str, raw: &Value, len: Length) -> FieldResult {
    let text = as_text(field, raw)?.trim().to_lowercase();
    if !EMAIL_REGEX.is_match(&text) {
        return Err(format!("{field} must be a valid email address"));
    }
    len.check(field, &text)?;
    Ok(Value::String(text))
}

pub fn validate_enum(field: &str, raw: &Value, allowed: &[String]) -> FieldResult {
    let text = as_text(field, raw)?.trim();
    if allowed.iter().any(|a| a == text) {
        Ok(Value::String(text.to_string()))
    } else {
        Err(format!("{field} must be one of: {}", allowed.join(", ")))
    }
}

/// Length-only check. The secret is kept byte-for-byte (no trimming) and is
/// never part of the message.
pub fn validate_password(field: &str, raw: &Value, len: Length) -> FieldResult {
    let text = as_text(field, raw)?;
    len.check(field, text)?;
    Ok(Value::String(text.to_string()))
}

/// Raw value must deep-equal the already validated value of `compare_to`.
/// A target that failed (or is absent) never matches.
pub fn validate_compare(
    field: &str,
    raw: &Value,
    compare_to: &str,
    validated: &Map<String, Value>,
) -> FieldResult {
    match validated.get(compare_to) {
        Some(target) if target == raw => Ok(raw.clone()),
        _ => Err(format!("{field} must match {compare_to}")),
    }
}

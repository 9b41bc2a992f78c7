//! Declared per-field rules.
//!
//! `FieldKind` is the tagged variant; `FieldConstraint::check` is the single
//! entry point that dispatches to the matching validator. The compare target
//! and the enum's allowed set live inside their variants, so they exist
//! exactly when the kind needs them.

use serde_json::{Map, Value};

use super::validators::{self, is_blank, Length};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Email,
    Enum { allowed: Vec<String> },
    Password,
    Compare { compare_to: String },
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Email => "email",
            FieldKind::Enum { .. } => "enum",
            FieldKind::Password => "password",
            FieldKind::Compare { .. } => "compare",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldConstraint {
    kind: FieldKind,
    min: Option<usize>,
    max: Option<usize>,
    required: bool,
}

impl FieldConstraint {
    fn with_kind(kind: FieldKind, min: Option<usize>, max: Option<usize>) -> Self {
        Self {
            kind,
            min,
            max,
            required: false,
        }
    }

    pub fn string(min: usize, max: usize) -> Self {
        Self::with_kind(FieldKind::String, Some(min), Some(max))
    }

    pub fn email(min: usize, max: usize) -> Self {
        Self::with_kind(FieldKind::Email, Some(min), Some(max))
    }

    pub fn password(min: usize, max: usize) -> Self {
        Self::with_kind(FieldKind::Password, Some(min), Some(max))
    }

    pub fn one_of<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed = allowed.into_iter().map(Into::into).collect();
        Self::with_kind(FieldKind::Enum { allowed }, None, None)
    }

    pub fn compare(compare_to: impl Into<String>) -> Self {
        Self::with_kind(
            FieldKind::Compare {
                compare_to: compare_to.into(),
            },
            None,
            None,
        )
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn min(&self) -> Option<usize> {
        self.min
    }

    pub fn max(&self) -> Option<usize> {
        self.max
    }

    pub fn compare_to(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Compare { compare_to } => Some(compare_to),
            _ => None,
        }
    }

    pub fn is_compare(&self) -> bool {
        matches!(self.kind, FieldKind::Compare { .. })
    }

    /// Validate one field.
    ///
    /// - `Ok(Some(v))`: passed, `v` is the normalized value.
    /// - `Ok(None)`: optional and absent, nothing to record.
    /// - `Err(msg)`: exactly one message for this field.
    ///
    /// `validated` holds the fields that already passed; compare kinds
    /// resolve their target there.
    pub fn check(
        &self,
        field: &str,
        raw: Option<&Value>,
        validated: &Map<String, Value>,
    ) -> Result<Option<Value>, String> {
        let raw = match raw {
            Some(v) if !is_blank(Some(v)) => v,
            _ if self.required => return Err(format!("{field} is required")),
            _ => return Ok(None),
        };

        let len = Length::new(self.min, self.max);
        let value = match &self.kind {
            FieldKind::String => validators::validate_string(field, raw, len),
            FieldKind::Email => validators::validate_email(field, raw, len),
            FieldKind::Enum { allowed } => validators::validate_enum(field, raw, allowed),
            FieldKind::Password => validators::validate_password(field, raw, len),
            FieldKind::Compare { compare_to } => {
                validators::validate_compare(field, raw, compare_to, validated)
            }
        }?;
        Ok(Some(value))
    }
}

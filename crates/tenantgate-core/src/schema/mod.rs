//! Schema-driven validation of untrusted request bodies.
//!
//! A [`Schema`] is an ordered, immutable list of `(field, constraint)` pairs
//! built once at startup and shared read-only across requests.
//!
//! Validation is two-phase:
//! 1. every non-compare field is checked against its raw value;
//! 2. every compare field is checked against the *validated* map from phase 1.
//!
//! All fields are checked (collect-all, not fail-fast) and errors are
//! reported in declaration order. Undeclared input keys are ignored.

pub mod constraint;
pub mod validators;

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::error::{GateError, Result};

pub use constraint::{FieldConstraint, FieldKind};

/// Result of validating one input object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationOutcome {
    /// Normalized values of the fields that passed.
    pub validated: Map<String, Value>,
    /// One message per failed field, in declaration order.
    pub errors: Vec<String>,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Validated string value of `field`, if it passed.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.validated.get(field).and_then(Value::as_str)
    }
}

#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    fields: Vec<(String, FieldConstraint)>,
}

impl Schema {
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Validate `input` against every declared field.
    ///
    /// Non-object input is treated as an empty object.
    pub fn validate(&self, input: &Value) -> ValidationOutcome {
        let empty = Map::new();
        let object = input.as_object().unwrap_or(&empty);

        let mut validated = Map::new();
        let mut verdicts: Vec<Option<String>> = vec![None; self.fields.len()];

        for compare_phase in [false, true] {
            for (idx, (name, constraint)) in self.fields.iter().enumerate() {
                if constraint.is_compare() != compare_phase {
                    continue;
                }
                match constraint.check(name, object.get(name), &validated) {
                    Ok(Some(value)) => {
                        validated.insert(name.clone(), value);
                    }
                    Ok(None) => {}
                    Err(msg) => {
                        if let Some(slot) = verdicts.get_mut(idx) {
                            *slot = Some(msg);
                        }
                    }
                }
            }
        }

        let errors: Vec<String> = verdicts.into_iter().flatten().collect();
        tracing::debug!(schema = %self.name, failed = errors.len(), "schema validated");

        ValidationOutcome { validated, errors }
    }
}

pub struct SchemaBuilder {
    name: String,
    fields: Vec<(String, FieldConstraint)>,
}

impl SchemaBuilder {
    pub fn field(mut self, name: impl Into<String>, constraint: FieldConstraint) -> Self {
        self.fields.push((name.into(), constraint));
        self
    }

    /// Freeze the schema.
    ///
    /// Rejects duplicate fields, `min > max`, empty enums, and compare fields
    /// whose target is undeclared or is itself a compare field.
    pub fn build(self) -> Result<Schema> {
        let mut seen = HashSet::new();
        for (name, c) in &self.fields {
            if !seen.insert(name.as_str()) {
                return Err(self.invalid(format!("duplicate field {name}")));
            }
            if let (Some(min), Some(max)) = (c.min(), c.max()) {
                if min > max {
                    return Err(self.invalid(format!("{name}: min {min} exceeds max {max}")));
                }
            }
            if let FieldKind::Enum { allowed } = c.kind() {
                if allowed.is_empty() {
                    return Err(self.invalid(format!("{name}: enum has no allowed values")));
                }
            }
        }

        for (name, c) in &self.fields {
            let Some(target) = c.compare_to() else { continue };
            match self.fields.iter().find(|(n, _)| n == target) {
                None => {
                    return Err(self.invalid(format!("{name}: compare target {target} is not declared")));
                }
                Some((_, t)) if t.is_compare() => {
                    return Err(self.invalid(format!("{name}: compare target {target} is itself a compare field")));
                }
                Some(_) => {}
            }
        }

        Ok(Schema {
            name: self.name,
            fields: self.fields,
        })
    }

    fn invalid(&self, msg: String) -> GateError {
        GateError::BadRequest(format!("schema {}: {msg}", self.name))
    }
}

//! Validation error taxonomy shared by every schema
//!
//! A `ValidationError` always carries at least one `Violation`. Each
//! violation names the offending field (or `None` when the whole object
//! is at fault) and a human-readable message.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A single rejected rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Field path, `None` for model-level rules
    pub field: Option<String>,
    /// Human-readable message
    pub message: String,
}

impl Violation {
    /// Violation attached to a named field
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Violation of a rule spanning the whole object
    pub fn model(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{}: {}", field, self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Error returned when a payload does not satisfy a schema
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
#[error("{} validation error(s): {}", .violations.len(), summary(.violations))]
pub struct ValidationError {
    violations: Vec<Violation>,
}

fn summary(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Error with a single field violation
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violations: vec![Violation::field(field, message)],
        }
    }

    /// Error with a single model-level violation
    pub fn model(message: impl Into<String>) -> Self {
        Self {
            violations: vec![Violation::model(message)],
        }
    }

    /// All violations, in the order they were found
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Number of violations
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Always false, a `ValidationError` is never empty
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// First violation reported for `field`
    pub fn for_field(&self, field: &str) -> Option<&Violation> {
        self.violations
            .iter()
            .find(|v| v.field.as_deref() == Some(field))
    }

    /// Whether any violation message contains `needle`
    pub fn has_message(&self, needle: &str) -> bool {
        self.violations.iter().any(|v| v.message.contains(needle))
    }
}

/// Accumulates violations across independent fields
///
/// Each field reports only the first rule it breaks; independent fields
/// are all collected so the caller sees every problem at once.
#[derive(Debug, Default)]
pub struct Violations {
    items: Vec<Violation>,
}

impl Violations {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of a field parser, returning the value on success
    pub fn check<T>(&mut self, field: &str, result: Result<T, String>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(message) => {
                self.items.push(Violation::field(field, message));
                None
            }
        }
    }

    /// Record a violation directly
    pub fn push(&mut self, violation: Violation) {
        self.items.push(violation);
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `Ok(())` when empty, otherwise the collected error
    pub fn into_result(self) -> ValidationResult<()> {
        if self.items.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { violations: self.items })
        }
    }
}

impl From<Violations> for ValidationError {
    fn from(violations: Violations) -> Self {
        Self {
            violations: violations.items,
        }
    }
}

/// Type alias for Result with ValidationError
pub type ValidationResult<T> = Result<T, ValidationError>;

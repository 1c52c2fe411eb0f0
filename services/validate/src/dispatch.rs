//! Mapping of schema names onto schemas

use anyhow::{Result, anyhow};
use common::ValidationError;
use schemas::{
    CalculationBase, CalculationCreate, CalculationRead, CalculationUpdate, Schema, UserBase,
    UserCreate, UserLogin, UserRead,
};
use serde::Serialize;
use serde_json::Value;
use std::{fmt, str::FromStr};

/// Schema selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    User,
    UserCreate,
    UserRead,
    UserLogin,
    Calculation,
    CalculationCreate,
    CalculationUpdate,
    CalculationRead,
}

impl SchemaKind {
    const NAMES: [(&'static str, SchemaKind); 8] = [
        ("user", SchemaKind::User),
        ("user-create", SchemaKind::UserCreate),
        ("user-read", SchemaKind::UserRead),
        ("user-login", SchemaKind::UserLogin),
        ("calculation", SchemaKind::Calculation),
        ("calculation-create", SchemaKind::CalculationCreate),
        ("calculation-update", SchemaKind::CalculationUpdate),
        ("calculation-read", SchemaKind::CalculationRead),
    ];
}

impl FromStr for SchemaKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::NAMES
            .iter()
            .find(|(name, _)| *name == s)
            .map(|(_, kind)| *kind)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::NAMES.iter().map(|(name, _)| *name).collect();
                anyhow!("Unknown schema '{}', expected one of: {}", s, known.join(", "))
            })
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = Self::NAMES
            .iter()
            .find(|(_, kind)| kind == self)
            .map(|(name, _)| *name)
            .unwrap_or("unknown");
        f.write_str(name)
    }
}

/// Result of running a schema over a payload
#[derive(Debug)]
pub enum Outcome {
    /// Normalized payload
    Valid(Value),
    /// Violations found
    Invalid(ValidationError),
}

fn normalize<S: Schema + Serialize>(payload: &Value) -> Result<Outcome> {
    match S::from_payload(payload) {
        Ok(value) => Ok(Outcome::Valid(serde_json::to_value(value)?)),
        Err(err) => Ok(Outcome::Invalid(err)),
    }
}

/// Validate `payload` with the schema named by `kind`
pub fn run(kind: SchemaKind, payload: &Value) -> Result<Outcome> {
    match kind {
        SchemaKind::User => normalize::<UserBase>(payload),
        SchemaKind::UserCreate => normalize::<UserCreate>(payload),
        SchemaKind::UserRead => normalize::<UserRead>(payload),
        SchemaKind::UserLogin => normalize::<UserLogin>(payload),
        SchemaKind::Calculation => normalize::<CalculationBase>(payload),
        SchemaKind::CalculationCreate => normalize::<CalculationCreate>(payload),
        SchemaKind::CalculationUpdate => normalize::<CalculationUpdate>(payload),
        SchemaKind::CalculationRead => normalize::<CalculationRead>(payload),
    }
}

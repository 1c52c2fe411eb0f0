//! Calculation schemas
//!
//! Operands and type are validated per field first. The divide-by-zero
//! rule only runs once every field has parsed, and it runs before any
//! arithmetic is attempted downstream.

use chrono::{DateTime, Utc};
use common::{ValidationError, ValidationResult, Violations};
use serde::Serialize;
use serde_json::Value;
use std::{fmt, str::FromStr};
use uuid::Uuid;

use crate::{
    payload::{self, Object},
    schema::{Schema, impl_try_from_value},
};

pub const DIVIDE_BY_ZERO: &str = "Cannot divide by zero";
pub const OPERANDS_REQUIRED: &str = "Both operands 'a' and 'b' must be provided";
pub const UPDATE_OPERANDS_REQUIRED: &str = "Both operands 'a' and 'b' must be provided for update";

/// Arithmetic operation of a calculation, serialized in lowercase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculationType {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl CalculationType {
    pub const ALL: [CalculationType; 4] = [
        CalculationType::Addition,
        CalculationType::Subtraction,
        CalculationType::Multiplication,
        CalculationType::Division,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CalculationType::Addition => "addition",
            CalculationType::Subtraction => "subtraction",
            CalculationType::Multiplication => "multiplication",
            CalculationType::Division => "division",
        }
    }

    /// Normalize a raw `type` value; text is matched case-insensitively
    pub fn normalize(value: &Value) -> Result<Self, String> {
        value
            .as_str()
            .ok_or_else(invalid_type_message)
            .and_then(str::parse)
    }
}

fn invalid_type_message() -> String {
    let mut allowed: Vec<&str> = CalculationType::ALL.iter().map(|t| t.as_str()).collect();
    allowed.sort_unstable();
    format!("Type must be one of: {}", allowed.join(", "))
}

impl FromStr for CalculationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        CalculationType::ALL
            .into_iter()
            .find(|t| t.as_str() == lowered)
            .ok_or_else(invalid_type_message)
    }
}

impl fmt::Display for CalculationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operand that must be present, non-null and numeric
fn operand(object: &Object, key: &str) -> Result<f64, String> {
    match object.get(key) {
        None => Err(payload::FIELD_REQUIRED.to_string()),
        Some(Value::Null) => Err(OPERANDS_REQUIRED.to_string()),
        Some(value) => float(value),
    }
}

fn optional_operand(object: &Object, key: &str) -> Result<Option<f64>, String> {
    payload::optional(object, key).map(float).transpose()
}

fn float(value: &Value) -> Result<f64, String> {
    payload::number(value).map_err(|_| "Input should be a valid float".to_string())
}

fn ensure_divisor(calculation_type: Option<CalculationType>, b: f64) -> ValidationResult<()> {
    if calculation_type == Some(CalculationType::Division) && b == 0.0 {
        return Err(ValidationError::model(DIVIDE_BY_ZERO));
    }
    Ok(())
}

/// Operands and type shared by the create and read schemas
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationBase {
    pub a: f64,
    pub b: f64,
    #[serde(rename = "type")]
    pub calculation_type: CalculationType,
}

impl CalculationBase {
    pub(crate) fn collect(object: &Object, violations: &mut Violations) -> Option<Self> {
        let a = violations.check("a", operand(object, "a"));
        let b = violations.check("b", operand(object, "b"));
        let calculation_type = violations.check(
            "type",
            payload::required(object, "type").and_then(CalculationType::normalize),
        );

        Some(Self {
            a: a?,
            b: b?,
            calculation_type: calculation_type?,
        })
    }

    /// Cross-field rules, valid only on a fully parsed value
    pub fn check_business_rules(&self) -> ValidationResult<()> {
        ensure_divisor(Some(self.calculation_type), self.b)
    }
}

impl Schema for CalculationBase {
    const NAME: &'static str = "CalculationBase";

    fn validate(payload: &Value) -> ValidationResult<Self> {
        let object = payload::as_object(payload)?;
        let mut violations = Violations::new();
        let base = Self::collect(object, &mut violations).ok_or(violations)?;
        base.check_business_rules()?;
        Ok(base)
    }
}

/// New calculation owned by `user_id`
///
/// `user_id` is taken from the payload; callers should overwrite it with
/// the authenticated user before trusting it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationCreate {
    #[serde(flatten)]
    pub base: CalculationBase,
    pub user_id: Uuid,
}

impl Schema for CalculationCreate {
    const NAME: &'static str = "CalculationCreate";

    fn validate(payload: &Value) -> ValidationResult<Self> {
        let object = payload::as_object(payload)?;
        let mut violations = Violations::new();

        let base = CalculationBase::collect(object, &mut violations);
        let user_id = violations.check(
            "user_id",
            payload::required(object, "user_id").and_then(payload::uuid),
        );

        let (Some(base), Some(user_id)) = (base, user_id) else {
            return Err(violations.into());
        };
        base.check_business_rules()?;

        Ok(Self { base, user_id })
    }
}

/// Changes to an existing calculation
///
/// The operands are declared optional but both are still required: a
/// payload missing either one is rejected, so partial operand updates
/// are not possible. The type is not compared against the stored
/// record; keeping it unchanged is left to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationUpdate {
    pub a: Option<f64>,
    pub b: Option<f64>,
    #[serde(rename = "type")]
    pub calculation_type: Option<CalculationType>,
}

impl CalculationUpdate {
    pub fn check_business_rules(&self) -> ValidationResult<()> {
        let (Some(_), Some(b)) = (self.a, self.b) else {
            return Err(ValidationError::model(UPDATE_OPERANDS_REQUIRED));
        };
        ensure_divisor(self.calculation_type, b)
    }
}

impl Schema for CalculationUpdate {
    const NAME: &'static str = "CalculationUpdate";

    fn validate(payload: &Value) -> ValidationResult<Self> {
        let object = payload::as_object(payload)?;
        let mut violations = Violations::new();

        let a = violations.check("a", optional_operand(object, "a"));
        let b = violations.check("b", optional_operand(object, "b"));
        let calculation_type = violations.check(
            "type",
            payload::optional(object, "type")
                .map(CalculationType::normalize)
                .transpose(),
        );

        let (Some(a), Some(b), Some(calculation_type)) = (a, b, calculation_type) else {
            return Err(violations.into());
        };
        let update = Self {
            a,
            b,
            calculation_type,
        };
        update.check_business_rules()?;

        Ok(update)
    }
}

/// Stored calculation as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationRead {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(flatten)]
    pub base: CalculationBase,
    pub result: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Schema for CalculationRead {
    const NAME: &'static str = "CalculationRead";

    fn validate(payload: &Value) -> ValidationResult<Self> {
        let object = payload::as_object(payload)?;
        let mut violations = Violations::new();

        let base = CalculationBase::collect(object, &mut violations);
        let id = violations.check("id", payload::required(object, "id").and_then(payload::uuid));
        let user_id = violations.check(
            "user_id",
            payload::required(object, "user_id").and_then(payload::uuid),
        );
        let result = violations.check(
            "result",
            payload::required(object, "result").and_then(payload::number),
        );
        let created_at = violations.check(
            "created_at",
            payload::required(object, "created_at").and_then(payload::timestamp),
        );
        let updated_at = violations.check(
            "updated_at",
            payload::required(object, "updated_at").and_then(payload::timestamp),
        );

        let (
            Some(base),
            Some(id),
            Some(user_id),
            Some(result),
            Some(created_at),
            Some(updated_at),
        ) = (base, id, user_id, result, created_at, updated_at)
        else {
            return Err(violations.into());
        };
        base.check_business_rules()?;

        Ok(Self {
            id,
            user_id,
            base,
            result,
            created_at,
            updated_at,
        })
    }
}

impl_try_from_value!(
    CalculationBase,
    CalculationCreate,
    CalculationUpdate,
    CalculationRead,
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_calculation_type_values() {
        assert_eq!(CalculationType::Addition.as_str(), "addition");
        assert_eq!(CalculationType::Subtraction.as_str(), "subtraction");
        assert_eq!(CalculationType::Multiplication.as_str(), "multiplication");
        assert_eq!(CalculationType::Division.as_str(), "division");
        assert_eq!(
            serde_json::to_value(CalculationType::Division).unwrap(),
            json!("division")
        );
    }

    #[test]
    fn test_calculation_type_parse_is_case_insensitive() {
        for variant in ["Addition", "ADDITION", "AdDiTiOn", "addition"] {
            assert_eq!(variant.parse::<CalculationType>(), Ok(CalculationType::Addition));
        }
    }

    #[test]
    fn test_non_text_type_is_rejected_with_sorted_set() {
        assert_eq!(
            CalculationType::normalize(&json!(3)),
            Err("Type must be one of: addition, division, multiplication, subtraction".to_string())
        );
        assert!(CalculationType::normalize(&Value::Null).is_err());
    }

    #[test]
    fn test_null_operand_has_dedicated_message() {
        let payload = json!({ "a": 1, "b": null, "type": "multiplication" });
        let object = payload.as_object().unwrap();

        assert_eq!(operand(object, "b"), Err(OPERANDS_REQUIRED.to_string()));
        assert_eq!(operand(object, "c"), Err(payload::FIELD_REQUIRED.to_string()));
        assert_eq!(operand(object, "a"), Ok(1.0));
    }

    #[test]
    fn test_ensure_divisor_treats_negative_zero_as_zero() {
        assert!(ensure_divisor(Some(CalculationType::Division), -0.0).is_err());
        assert!(ensure_divisor(Some(CalculationType::Addition), 0.0).is_ok());
        assert!(ensure_divisor(None, 0.0).is_ok());
    }
}

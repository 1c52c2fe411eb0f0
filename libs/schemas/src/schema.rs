//! Entry points shared by every schema

use common::{ValidationError, ValidationResult};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// A structure built only from a payload that satisfies its rules
pub trait Schema: Sized {
    /// Name used in logs
    const NAME: &'static str;

    /// Parse and validate a raw payload
    fn validate(payload: &Value) -> ValidationResult<Self>;

    /// Validate a raw payload, logging rejections
    ///
    /// Only the schema name and violation count are logged, never values.
    fn from_payload(payload: &Value) -> ValidationResult<Self> {
        Self::validate(payload).inspect_err(|err| {
            debug!("{} payload rejected with {} violation(s)", Self::NAME, err.len());
        })
    }

    /// Re-validate any serializable record, such as a stored row
    fn from_attributes<T: Serialize + ?Sized>(record: &T) -> ValidationResult<Self> {
        let payload = serde_json::to_value(record).map_err(|e| {
            ValidationError::model(format!("Record attributes could not be read: {}", e))
        })?;
        Self::from_payload(&payload)
    }
}

/// `TryFrom<serde_json::Value>` for schemas, so they can sit behind `?`
macro_rules! impl_try_from_value {
    ($($schema:ty),+ $(,)?) => {
        $(
            impl TryFrom<serde_json::Value> for $schema {
                type Error = common::ValidationError;

                fn try_from(payload: serde_json::Value) -> Result<Self, Self::Error> {
                    <$schema as $crate::schema::Schema>::from_payload(&payload)
                }
            }
        )+
    };
}

pub(crate) use impl_try_from_value;

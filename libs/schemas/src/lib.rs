//! Validation schemas for the calculator API
//!
//! Each schema turns a raw JSON payload into a normalized, typed value or
//! a `ValidationError` listing every offending field. Schemas are pure
//! and stateless; persistence, routing and authentication live elsewhere
//! and only exchange these structures.
//!
//! ```rust
//! use schemas::{CalculationCreate, CalculationType, Schema};
//! use serde_json::json;
//!
//! let payload = json!({
//!     "a": 10.5,
//!     "b": 3,
//!     "type": "Addition",
//!     "user_id": "123e4567-e89b-12d3-a456-426614174000",
//! });
//! let calculation = CalculationCreate::from_payload(&payload).unwrap();
//! assert_eq!(calculation.base.calculation_type, CalculationType::Addition);
//!
//! let err = CalculationCreate::from_payload(&json!({
//!     "a": 100, "b": 0, "type": "division",
//!     "user_id": "123e4567-e89b-12d3-a456-426614174000",
//! }))
//! .unwrap_err();
//! assert!(err.has_message("Cannot divide by zero"));
//! ```

pub mod models;
pub mod payload;
pub mod schema;
pub mod validation;

pub use common::{ValidationError, ValidationResult, Violation};
pub use models::{
    CalculationBase, CalculationCreate, CalculationRead, CalculationType, CalculationUpdate,
    Password, Token, UserBase, UserCreate, UserLogin, UserRead,
};
pub use schema::Schema;

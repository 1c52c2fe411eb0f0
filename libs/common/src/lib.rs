//! Common library for the calculator schemas
//!
//! This crate provides the shared validation error taxonomy and its
//! mapping onto HTTP responses, used by the schema crate and by whatever
//! web layer consumes it.
//!
//! ```rust
//! use common::error::{ValidationResult, Violations};
//!
//! fn check_positive(value: f64) -> ValidationResult<f64> {
//!     let mut violations = Violations::new();
//!     let value = violations.check(
//!         "value",
//!         if value > 0.0 { Ok(value) } else { Err("must be positive".to_string()) },
//!     );
//!     violations.into_result()?;
//!     Ok(value.unwrap_or_default())
//! }
//!
//! assert!(check_positive(1.0).is_ok());
//! assert!(check_positive(-1.0).is_err());
//! ```

pub mod error;
pub mod http;

pub use error::{ValidationError, ValidationResult, Violation, Violations};

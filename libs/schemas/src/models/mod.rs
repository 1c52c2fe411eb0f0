//! Request and response schemas

pub mod calculation;
pub mod user;

// Re-export for convenience
pub use calculation::{
    CalculationBase, CalculationCreate, CalculationRead, CalculationType, CalculationUpdate,
};
pub use user::{Password, Token, UserBase, UserCreate, UserLogin, UserRead};

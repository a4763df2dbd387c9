//! # Core Error Types
//!
//! Typed failures reported synchronously to the caller. A call either fully
//! succeeds with a numeric result or fails atomically; nothing is clamped.

use thiserror::Error;

/// Core errors shared by the estimator and the staking primitives
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub enum CoreError {
    // ========================================================================
    // Math Errors
    // ========================================================================

    #[error("Math overflow")]
    MathOverflow,

    #[error("Math underflow")]
    MathUnderflow,

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Mul div overflow")]
    MulDivOverflow,

    #[error("Invalid logarithm input")]
    InvalidLogarithmInput,

    // ========================================================================
    // Caller-Input Errors
    // ========================================================================

    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("No active stake position")]
    NoPosition,
}

/// Result type using core errors
pub type CoreResult<T> = Result<T, CoreError>;

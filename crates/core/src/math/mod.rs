//! # Mathematical Functions
//!
//! Checked integer arithmetic and the deterministic logarithm used by the
//! price revision estimator.

pub mod big_int;
pub mod log_approx;
pub mod safe_math;

// Re-export commonly used functions
pub use big_int::*;
pub use log_approx::*;
pub use safe_math::*;

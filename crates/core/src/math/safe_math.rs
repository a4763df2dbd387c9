//! # Safe Math Operations
//!
//! Overflow-checked arithmetic for token-scale integer amounts.

use crate::errors::{CoreError, CoreResult};

/// Macro to generate safe arithmetic functions
macro_rules! safe_arith {
    // Binary operations with checked methods
    ($fn_name:ident, $type:ty, $checked_method:ident, $error:expr) => {
        /// Safe $fn_name with overflow/underflow check
        pub fn $fn_name(a: $type, b: $type) -> CoreResult<$type> {
            a.$checked_method(b).ok_or($error)
        }
    };

    // Division operations with zero check
    (div, $fn_name:ident, $type:ty) => {
        /// Safe division with zero check
        pub fn $fn_name(a: $type, b: $type) -> CoreResult<$type> {
            if b == 0 {
                return Err(CoreError::DivisionByZero);
            }
            Ok(a / b)
        }
    };
}

// Generate basic arithmetic functions
safe_arith!(safe_add_u64, u64, checked_add, CoreError::MathOverflow);
safe_arith!(safe_sub_u64, u64, checked_sub, CoreError::MathUnderflow);
safe_arith!(safe_mul_u64, u64, checked_mul, CoreError::MathOverflow);
safe_arith!(div, safe_div_u64, u64);

safe_arith!(safe_add_u128, u128, checked_add, CoreError::MathOverflow);
safe_arith!(safe_sub_u128, u128, checked_sub, CoreError::MathUnderflow);
safe_arith!(safe_mul_u128, u128, checked_mul, CoreError::MathOverflow);
safe_arith!(div, safe_div_u128, u128);

/// Mul-div operation with u128 using a 256-bit intermediate, rounding down
pub fn safe_mul_div_u128(a: u128, b: u128, denominator: u128) -> CoreResult<u128> {
    crate::math::big_int::mul_div_u128(a, b, denominator, crate::math::big_int::Rounding::Down)
}

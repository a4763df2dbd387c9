//! # Deterministic Natural Logarithm
//!
//! The revision estimator must reproduce the same factor for the same inputs
//! on every platform, so it cannot depend on the host libm. This logarithm
//! uses only IEEE-754 add/mul/div (all correctly rounded): the argument is
//! split into mantissa and exponent from its bit pattern, the mantissa is
//! reduced to `[sqrt(1/2), sqrt(2))`, and `ln` of the reduced mantissa is
//! summed from the odd-power atanh series.

use crate::errors::{CoreError, CoreResult};
use std::f64::consts::{LN_2, SQRT_2};

/// Natural logarithm of a positive finite value.
///
/// Relative error is below 1e-15 over the full range, comfortably inside
/// the 1e-10 reproducibility bound the estimator promises.
pub fn natural_log(x: f64) -> CoreResult<f64> {
    if !x.is_finite() || x <= 0.0 {
        return Err(CoreError::InvalidLogarithmInput);
    }

    let (mantissa, exponent) = split_mantissa_exponent(x);

    // Reduce to [sqrt(1/2), sqrt(2)) so the series argument stays small
    let (m, e) = if mantissa >= SQRT_2 {
        (mantissa * 0.5, exponent + 1)
    } else {
        (mantissa, exponent)
    };

    // ln(m) = 2 * atanh(z) with z = (m - 1) / (m + 1), |z| < 0.172
    let z = (m - 1.0) / (m + 1.0);
    let z2 = z * z;
    let mut term = z;
    let mut sum = z;
    for k in 1..=9u32 {
        term *= z2;
        sum += term / (2 * k + 1) as f64;
    }

    Ok(e as f64 * LN_2 + 2.0 * sum)
}

/// Decompose into `m * 2^e` with `m` in `[1, 2)`
fn split_mantissa_exponent(x: f64) -> (f64, i32) {
    let bits = x.to_bits();
    let raw_exponent = ((bits >> 52) & 0x7ff) as i32;

    if raw_exponent == 0 {
        // Subnormal: renormalize by scaling with 2^64 first
        let scaled = x * f64::from_bits((1023u64 + 64) << 52);
        let (m, e) = split_mantissa_exponent(scaled);
        return (m, e - 64);
    }

    let mantissa = f64::from_bits((bits & 0x000f_ffff_ffff_ffff) | (1023u64 << 52));
    (mantissa, raw_exponent - 1023)
}

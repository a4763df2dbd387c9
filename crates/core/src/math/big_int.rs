//! # Big Integer Operations
//!
//! A minimal 256-bit unsigned integer and the mul-div primitive built on it.
//! Token amounts are 1e18-scaled u128 values, so products like
//! `principal * elapsed * rate` routinely exceed 128 bits; every such
//! product is widened through [`U256`] before the final division brings it
//! back into range.

use crate::errors::{CoreError, CoreResult};

/// Rounding mode for division operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub enum Rounding {
    /// Round down (towards zero)
    Down,
    /// Round up (away from zero)
    Up,
}

/// 256-bit unsigned integer for intermediate calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct U256 {
    /// Low 128 bits
    pub lo: u128,
    /// High 128 bits
    pub hi: u128,
}

impl U256 {
    pub const ZERO: U256 = U256 { lo: 0, hi: 0 };

    /// Create a new U256 from low and high parts
    pub const fn new(lo: u128, hi: u128) -> Self {
        Self { lo, hi }
    }

    /// Create from a single u128 value
    pub const fn from_u128(value: u128) -> Self {
        Self { lo: value, hi: 0 }
    }

    /// Check if the value is zero
    pub const fn is_zero(&self) -> bool {
        self.lo == 0 && self.hi == 0
    }

    /// Convert to u128, returning None if the value does not fit
    pub fn to_u128(&self) -> Option<u128> {
        if self.hi == 0 {
            Some(self.lo)
        } else {
            None
        }
    }

    /// Add two U256 values
    pub fn checked_add(&self, other: &U256) -> Option<U256> {
        let (lo, carry) = self.lo.overflowing_add(other.lo);
        let hi = self.hi.checked_add(other.hi)?.checked_add(carry as u128)?;
        Some(U256::new(lo, hi))
    }

    /// Subtract two U256 values
    pub fn checked_sub(&self, other: &U256) -> Option<U256> {
        let (lo, borrow) = self.lo.overflowing_sub(other.lo);
        let hi = self.hi.checked_sub(other.hi)?.checked_sub(borrow as u128)?;
        Some(U256::new(lo, hi))
    }

    /// Shift left by one bit, failing if the top bit would be lost
    fn shl1(&self) -> Option<U256> {
        if self.hi >> 127 != 0 {
            return None;
        }
        Some(U256::new(self.lo << 1, (self.hi << 1) | (self.lo >> 127)))
    }

    /// Value of bit `i` (0 = least significant)
    fn bit(&self, i: u32) -> bool {
        if i < 128 {
            (self.lo >> i) & 1 == 1
        } else {
            (self.hi >> (i - 128)) & 1 == 1
        }
    }

    /// Set bit `i` to one
    fn set_bit(&mut self, i: u32) {
        if i < 128 {
            self.lo |= 1u128 << i;
        } else {
            self.hi |= 1u128 << (i - 128);
        }
    }

    /// Number of leading zero bits
    fn leading_zeros(&self) -> u32 {
        if self.hi != 0 {
            self.hi.leading_zeros()
        } else {
            128 + self.lo.leading_zeros()
        }
    }

    /// Long division: quotient and remainder of `self / divisor`.
    ///
    /// Shift-subtract over the significant bits of the dividend. Exact for
    /// any 256-bit dividend; the intermediate remainder never overflows
    /// because it stays below the divisor between steps.
    pub fn div_rem(&self, divisor: &U256) -> Option<(U256, U256)> {
        if divisor.is_zero() {
            return None;
        }
        if self.lt(divisor) {
            return Some((U256::ZERO, *self));
        }

        let mut quotient = U256::ZERO;
        let mut rem = U256::ZERO;
        let top = 255 - self.leading_zeros();
        for i in (0..=top).rev() {
            rem = rem.shl1()?;
            if self.bit(i) {
                rem.lo |= 1;
            }
            if rem.ge(divisor) {
                rem = rem.checked_sub(divisor)?;
                quotient.set_bit(i);
            }
        }
        Some((quotient, rem))
    }

    /// Compare if self < other
    pub fn lt(&self, other: &U256) -> bool {
        self.hi < other.hi || (self.hi == other.hi && self.lo < other.lo)
    }

    /// Compare if self >= other
    pub fn ge(&self, other: &U256) -> bool {
        !self.lt(other)
    }
}

impl PartialOrd for U256 {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for U256 {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.hi.cmp(&other.hi) {
            std::cmp::Ordering::Equal => self.lo.cmp(&other.lo),
            ordering => ordering,
        }
    }
}

/// Multiply two u128 values into a full 256-bit product
pub fn mul_u128_to_u256(a: u128, b: u128) -> U256 {
    // Split into 64-bit parts for schoolbook multiplication
    let a_lo = a & 0xFFFF_FFFF_FFFF_FFFF;
    let a_hi = a >> 64;
    let b_lo = b & 0xFFFF_FFFF_FFFF_FFFF;
    let b_hi = b >> 64;

    let ll = a_lo * b_lo;
    let lh = a_lo * b_hi;
    let hl = a_hi * b_lo;
    let hh = a_hi * b_hi;

    // Cross terms: carry out of the middle word feeds the high word
    let (mid, mid_carry) = lh.overflowing_add(hl);
    let (lo, lo_carry) = ll.overflowing_add(mid << 64);
    let hi = hh + (mid >> 64) + ((mid_carry as u128) << 64) + lo_carry as u128;

    U256::new(lo, hi)
}

/// Multiply two values and divide by a third with specified rounding
/// result = (a * b) / denominator
pub fn mul_div_u128(
    a: u128,
    b: u128,
    denominator: u128,
    rounding: Rounding,
) -> CoreResult<u128> {
    if denominator == 0 {
        return Err(CoreError::DivisionByZero);
    }

    let product = mul_u128_to_u256(a, b);
    let (quotient, remainder) = product
        .div_rem(&U256::from_u128(denominator))
        .ok_or(CoreError::DivisionByZero)?;

    let quotient = if rounding == Rounding::Up && !remainder.is_zero() {
        quotient
            .checked_add(&U256::from_u128(1))
            .ok_or(CoreError::MulDivOverflow)?
    } else {
        quotient
    };

    quotient.to_u128().ok_or(CoreError::MulDivOverflow)
}

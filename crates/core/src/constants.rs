//! # Protocol Constants

// ============================================================================
// Token Amount Scales
// ============================================================================

/// Smallest-unit scale for 18-decimal token amounts
pub const UNIT_SCALE: u128 = 1_000_000_000_000_000_000;

/// Fixed-point scale used to bridge the revision factor into integer
/// price arithmetic (10^12, i.e. 12 decimal places of the factor survive)
pub const REVISION_SCALE: u128 = 1_000_000_000_000;

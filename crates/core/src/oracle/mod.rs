//! # Oracle Module
//!
//! Price revision estimation for stale-oracle protection. Given two
//! consecutive oracle posts, produces the multiplicative factor that
//! penalizes a taker for the blocks elapsed since the last post.

pub mod revision;

pub use revision::*;

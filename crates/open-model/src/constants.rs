//! Numeric constants shared by the codec.

/// Largest integer an `f64` holds exactly (2^53 - 1).
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

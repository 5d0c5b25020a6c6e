//! Integer fixed-point helpers.
//!
//! Every division that produces a stored value rounds half up. Truncation
//! would bias averages and EMAs downward over long streams.
//!
//! # Examples
//!
//! ```
//! use vouch_core::fixed::{avg_round_half_up, div_round_half_up};
//!
//! assert_eq!(avg_round_half_up(&[33, 34, 34]), Some(34));
//! assert_eq!(avg_round_half_up(&[0, 0, 1]), Some(0));
//! assert_eq!(div_round_half_up(5, 2), 3);
//! ```

use crate::constants::BPS;

/// Fractional bits carried by [`log2_fixed`].
pub const LOG2_FRAC_BITS: u32 = 16;

/// `ln(2)` scaled by `2^16`.
pub const LN2_FIXED: u64 = 45_426;

/// `num / den`, rounding half up. Returns 0 when `den` is 0.
pub fn div_round_half_up(num: u64, den: u64) -> u64 {
    if den == 0 {
        return 0;
    }
    let quotient = num / den;
    let remainder = num % den;
    // remainder < den, so the doubling cannot overflow for den <= u64::MAX / 2.
    if remainder >= den - remainder {
        quotient + 1
    } else {
        quotient
    }
}

/// Round-half-up mean of a list of scores. `None` for an empty list.
pub fn avg_round_half_up(values: &[u8]) -> Option<u8> {
    if values.is_empty() {
        return None;
    }
    let sum: u64 = values.iter().map(|&v| u64::from(v)).sum();
    let avg = div_round_half_up(sum, values.len() as u64);
    Some(avg.min(u64::from(u8::MAX)) as u8)
}

/// `round(value * out_max / in_max)` clamped to `out_max`. 0 when `in_max` is 0.
pub fn scale_clamped(value: u64, in_max: u64, out_max: u64) -> u64 {
    if in_max == 0 {
        return 0;
    }
    div_round_half_up(value.saturating_mul(out_max), in_max).min(out_max)
}

/// One exponential-moving-average step in basis points:
/// `round(alpha * target + (1 - alpha) * old)`.
///
/// If rounding would leave the average where it was while it still differs
/// from `target`, it moves one unit toward `target`, so repeated samples
/// always converge.
pub fn ema_step(old: u32, target: u32, alpha_bps: u32) -> u32 {
    let alpha = u64::from(alpha_bps.min(BPS));
    let blended = alpha * u64::from(target) + (u64::from(BPS) - alpha) * u64::from(old);
    let next = div_round_half_up(blended, u64::from(BPS)) as u32;
    if next == old && old != target {
        if target > old {
            old + 1
        } else {
            old - 1
        }
    } else {
        next
    }
}

/// `log2(x)` with [`LOG2_FRAC_BITS`] fractional bits. `log2_fixed(0) == 0`.
///
/// Runs a fixed 16-step squaring loop.
pub fn log2_fixed(x: u64) -> u32 {
    if x == 0 {
        return 0;
    }
    let int_part = 63 - x.leading_zeros();
    // Mantissa in [1, 2) with 32 fractional bits.
    let mut mantissa: u128 = (u128::from(x) << 32) >> int_part;
    let mut frac: u32 = 0;
    for bit in (0..LOG2_FRAC_BITS).rev() {
        mantissa = (mantissa * mantissa) >> 32;
        if mantissa >= 1u128 << 33 {
            mantissa >>= 1;
            frac |= 1 << bit;
        }
    }
    (int_part << LOG2_FRAC_BITS) | frac
}

/// `log2(x) * 100`, rounded half up. Used for arrival-gap scoring.
pub fn log2_centi(x: u64) -> u32 {
    div_round_half_up(u64::from(log2_fixed(x)) * 100, 1 << LOG2_FRAC_BITS) as u32
}

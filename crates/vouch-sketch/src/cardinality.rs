//! Distinct-rater estimator over 256 four-bit registers.
//!
//! Each fingerprint selects a register by its low byte and proposes
//! `rho = leading zeros of the remaining 56 bits + 1` (capped at 15). The
//! register keeps the maximum it has seen, so observing the same fingerprint
//! again never changes anything.
//!
//! The estimate is a harmonic mean over the registers, switching to linear
//! counting while the raw estimate is small and registers are still empty.
//! All arithmetic is integer.
//!
//! # Examples
//!
//! ```
//! use vouch_core::models::Fingerprint;
//! use vouch_sketch::CardinalityEstimator;
//!
//! let mut est = CardinalityEstimator::new();
//! assert_eq!(est.estimate(), 0);
//! est.observe(Fingerprint::new(0x1234_5678));
//! let once = est.estimate();
//! assert!(!est.observe(Fingerprint::new(0x1234_5678)));
//! assert_eq!(est.estimate(), once);
//! ```

use vouch_core::constants::{REGISTER_COUNT, RHO_MAX};
use vouch_core::fixed::{div_round_half_up, log2_fixed, LN2_FIXED, LOG2_FRAC_BITS};
use vouch_core::models::Fingerprint;
use vouch_core::{VouchError, VouchResult};

/// `alpha_m * m^2` for m = 256, where `alpha_m = 0.7213 / (1 + 1.079 / m)`.
const ALPHA_MM: u64 = 47_073;

/// Raw estimates at or below `5m/2` use linear counting when possible.
const SMALL_RANGE_LIMIT: u64 = 5 * REGISTER_COUNT as u64 / 2;

/// Bits of the mixed hash left after the register index is taken.
const REST_BITS: u32 = 56;

/// Largest estimate the registers can express (every register at `RHO_MAX`).
pub const ESTIMATE_CEILING: u32 = (ALPHA_MM * (1 << RHO_MAX) / REGISTER_COUNT as u64) as u32;

/// Register array with `max` merge semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardinalityEstimator {
    registers: [u8; REGISTER_COUNT],
}

impl CardinalityEstimator {
    pub fn new() -> Self {
        Self {
            registers: [0; REGISTER_COUNT],
        }
    }

    /// Rebuild from persisted registers. Rejects values above [`RHO_MAX`].
    pub fn from_registers(registers: [u8; REGISTER_COUNT]) -> VouchResult<Self> {
        if let Some(bad) = registers.iter().find(|&&r| r > RHO_MAX) {
            return Err(VouchError::Codec(format!(
                "cardinality register value {bad} exceeds {RHO_MAX}"
            )));
        }
        Ok(Self { registers })
    }

    pub fn registers(&self) -> &[u8; REGISTER_COUNT] {
        &self.registers
    }

    /// Fold a fingerprint into its register. Returns whether the register grew.
    pub fn observe(&mut self, fingerprint: Fingerprint) -> bool {
        let (index, rho) = register_update(fingerprint);
        let current = &mut self.registers[index];
        if rho > *current {
            *current = rho;
            true
        } else {
            false
        }
    }

    /// Per-register maximum of two estimators.
    pub fn merge(&mut self, other: &Self) {
        for (mine, theirs) in self.registers.iter_mut().zip(other.registers.iter()) {
            *mine = (*mine).max(*theirs);
        }
    }

    /// Number of registers still at zero.
    pub fn zero_registers(&self) -> usize {
        self.registers.iter().filter(|&&r| r == 0).count()
    }

    /// Best-effort distinct-fingerprint estimate.
    pub fn estimate(&self) -> u32 {
        let mut sum: u64 = 0;
        let mut zeros: u64 = 0;
        for &r in &self.registers {
            sum += 1u64 << u32::from(RHO_MAX - r.min(RHO_MAX));
            if r == 0 {
                zeros += 1;
            }
        }
        let raw = div_round_half_up(ALPHA_MM << u32::from(RHO_MAX), sum);
        let estimate = if raw <= SMALL_RANGE_LIMIT && zeros > 0 {
            linear_counting(zeros)
        } else {
            raw
        };
        estimate.min(u64::from(ESTIMATE_CEILING)) as u32
    }
}

impl Default for CardinalityEstimator {
    fn default() -> Self {
        Self::new()
    }
}

/// Register index and proposed rho for a fingerprint.
fn register_update(fingerprint: Fingerprint) -> (usize, u8) {
    let h = splitmix64(fingerprint.value());
    let index = (h & 0xff) as usize;
    let rest = h >> 8;
    // `rest` has REST_BITS significant bits; leading_zeros counts from bit 63.
    let run = rest.leading_zeros() - (64 - REST_BITS);
    let rho = (run + 1).min(u32::from(RHO_MAX)) as u8;
    (index, rho)
}

/// `m * ln(m / zeros)` in integer arithmetic.
fn linear_counting(zeros: u64) -> u64 {
    let m = REGISTER_COUNT as u64;
    let log2_m = u64::from(log2_fixed(m));
    let log2_v = u64::from(log2_fixed(zeros));
    let diff = log2_m.saturating_sub(log2_v);
    div_round_half_up(m * diff * LN2_FIXED, 1u64 << (2 * LOG2_FRAC_BITS))
}

/// SplitMix64 finaliser. Spreads fingerprint bits across the whole word.
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}

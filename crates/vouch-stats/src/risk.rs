//! Risk weighting.
//!
//! Six signals, each in `0..=100`, combined with weights that sum to 100:
//!
//! | Signal | Rises when |
//! |---|---|
//! | sybil | few distinct raters relative to feedback volume |
//! | burst | the same raters come back in quick succession |
//! | stagnation | the fast and slow EMAs never separate |
//! | shock | the EMAs diverge sharply or low scores pile up |
//! | volatility | the EMA gap keeps swinging |
//! | arrival | events arrive closer together than the reference gap |

use serde::{Deserialize, Serialize};

use vouch_core::config::RiskConfig;
use vouch_core::constants::{DIVERSITY_MAX, PRESSURE_MAX, RISK_MAX};
use vouch_core::fixed::{div_round_half_up, scale_clamped};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RiskInputs {
    pub feedback_count: u32,
    pub diversity: u8,
    pub burst_pressure: u8,
    pub neg_pressure: u8,
    pub ema_fast: u32,
    pub ema_slow: u32,
    pub ema_volatility: u32,
    pub ema_arrival: u32,
    pub arrival_seeded: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskSignals {
    pub sybil: u8,
    pub burst: u8,
    pub stagnation: u8,
    pub shock: u8,
    pub volatility: u8,
    pub arrival: u8,
}

impl RiskSignals {
    /// Compute every signal. Stagnation stays 0 until `min_samples` feedbacks.
    pub fn compute(inputs: &RiskInputs, config: &RiskConfig, min_samples: u32) -> Self {
        let pct = u64::from(RISK_MAX);

        let sybil = if inputs.feedback_count == 0 {
            0
        } else {
            pct - scale_clamped(u64::from(inputs.diversity), u64::from(DIVERSITY_MAX), pct)
        };

        let burst = scale_clamped(u64::from(inputs.burst_pressure), u64::from(PRESSURE_MAX), pct);

        let volatility_pct = scale_clamped(
            u64::from(inputs.ema_volatility),
            u64::from(config.stagnation_ref),
            pct,
        );
        let stagnation = if inputs.feedback_count >= min_samples {
            pct - volatility_pct
        } else {
            0
        };

        let gap = u64::from(inputs.ema_fast.abs_diff(inputs.ema_slow));
        let shock = scale_clamped(gap, u64::from(config.shock_ref), pct).max(scale_clamped(
            u64::from(inputs.neg_pressure),
            u64::from(PRESSURE_MAX),
            pct,
        ));

        let volatility = scale_clamped(
            u64::from(inputs.ema_volatility),
            u64::from(config.volatility_ref),
            pct,
        );

        let reference = config.arrival_fast_ref;
        let arrival = if inputs.arrival_seeded && inputs.ema_arrival < reference {
            scale_clamped(
                u64::from(reference - inputs.ema_arrival),
                u64::from(reference),
                pct,
            )
        } else {
            0
        };

        Self {
            sybil: sybil as u8,
            burst: burst as u8,
            stagnation: stagnation as u8,
            shock: shock as u8,
            volatility: volatility as u8,
            arrival: arrival as u8,
        }
    }

    /// `min(100, round(sum(w_i * s_i) / 100))`.
    pub fn weighted(&self, config: &RiskConfig) -> u8 {
        let pairs = [
            (self.sybil, config.sybil_weight),
            (self.burst, config.burst_weight),
            (self.stagnation, config.stagnation_weight),
            (self.shock, config.shock_weight),
            (self.volatility, config.volatility_weight),
            (self.arrival, config.arrival_weight),
        ];
        let total: u64 = pairs
            .iter()
            .map(|&(signal, weight)| u64::from(signal) * u64::from(weight))
            .sum();
        div_round_half_up(total, 100).min(u64::from(RISK_MAX)) as u8
    }
}

pub fn risk_score(inputs: &RiskInputs, config: &RiskConfig, min_samples: u32) -> u8 {
    RiskSignals::compute(inputs, config, min_samples).weighted(config)
}

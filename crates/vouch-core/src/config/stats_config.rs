use serde::{Deserialize, Serialize};

use super::{check_bps, defaults};
use crate::errors::{VouchError, VouchResult};

/// Streaming statistics tuning. Alphas are in basis points (10000 = 1.0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    pub alpha_fast_bps: u32,
    pub alpha_slow_bps: u32,
    pub alpha_volatility_bps: u32,
    pub alpha_arrival_bps: u32,
    /// Pull of a rapid repeat write toward full burst pressure.
    pub burst_alpha_up_bps: u32,
    /// Share of burst and negative pressure kept by a non-bursty write (percent).
    pub burst_decay_pct: u8,
    /// Scores strictly below this raise negative pressure.
    pub neg_score_threshold: u8,
    pub neg_alpha_up_bps: u32,
    /// A repeat rater returning after at least this gap counts as loyal;
    /// anything sooner counts as a burst.
    pub loyalty_min_delta_secs: u64,
    pub loyalty_step: u8,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            alpha_fast_bps: defaults::DEFAULT_ALPHA_FAST_BPS,
            alpha_slow_bps: defaults::DEFAULT_ALPHA_SLOW_BPS,
            alpha_volatility_bps: defaults::DEFAULT_ALPHA_VOLATILITY_BPS,
            alpha_arrival_bps: defaults::DEFAULT_ALPHA_ARRIVAL_BPS,
            burst_alpha_up_bps: defaults::DEFAULT_BURST_ALPHA_UP_BPS,
            burst_decay_pct: defaults::DEFAULT_BURST_DECAY_PCT,
            neg_score_threshold: defaults::DEFAULT_NEG_SCORE_THRESHOLD,
            neg_alpha_up_bps: defaults::DEFAULT_NEG_ALPHA_UP_BPS,
            loyalty_min_delta_secs: defaults::DEFAULT_LOYALTY_MIN_DELTA_SECS,
            loyalty_step: defaults::DEFAULT_LOYALTY_STEP,
        }
    }
}

impl StatsConfig {
    pub fn validate(&self) -> VouchResult<()> {
        check_bps("stats.alpha_fast_bps", self.alpha_fast_bps)?;
        check_bps("stats.alpha_slow_bps", self.alpha_slow_bps)?;
        check_bps("stats.alpha_volatility_bps", self.alpha_volatility_bps)?;
        check_bps("stats.alpha_arrival_bps", self.alpha_arrival_bps)?;
        check_bps("stats.burst_alpha_up_bps", self.burst_alpha_up_bps)?;
        check_bps("stats.neg_alpha_up_bps", self.neg_alpha_up_bps)?;
        if self.alpha_slow_bps > self.alpha_fast_bps {
            return Err(VouchError::config_bounds(
                "stats.alpha_slow_bps",
                "slow alpha must not exceed fast alpha",
            ));
        }
        if self.burst_decay_pct > 99 {
            return Err(VouchError::config_bounds("stats.burst_decay_pct", "must be in 0..=99"));
        }
        if self.neg_score_threshold > 100 {
            return Err(VouchError::config_bounds(
                "stats.neg_score_threshold",
                "must be in 0..=100",
            ));
        }
        Ok(())
    }
}

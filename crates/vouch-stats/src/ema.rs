//! Streaming statistics over accepted scores.
//!
//! Every field is a bounded integer. Scores `0..=100` are lifted to the
//! `0..=10000` EMA scale before blending; pressures and loyalty live in
//! `0..=255`; the arrival EMA tracks `log2(gap) * 100` and is capped at
//! [`ARRIVAL_MAX`].

use serde::{Deserialize, Serialize};

use vouch_core::config::StatsConfig;
use vouch_core::constants::{ARRIVAL_MAX, LOYALTY_MAX, PRESSURE_MAX};
use vouch_core::fixed::{ema_step, log2_centi};

/// How a write relates to a rater's previous write still held in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatKind {
    /// No previous write is resident.
    Fresh,
    /// Repeat inside the loyalty window. Feeds burst pressure.
    Rapid,
    /// Repeat after the loyalty window. Earns loyalty.
    Returning,
}

impl RepeatKind {
    pub fn classify(previous_written_at: Option<u64>, now: u64, min_delta_secs: u64) -> Self {
        match previous_written_at {
            None => Self::Fresh,
            Some(then) if now.saturating_sub(then) < min_delta_secs => Self::Rapid,
            Some(_) => Self::Returning,
        }
    }
}

/// One accepted score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub score: u8,
    /// Seconds since the entity's previous event, `None` for the first.
    pub gap: Option<u64>,
    pub repeat: RepeatKind,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamingStats {
    pub ema_fast: u32,
    pub ema_slow: u32,
    pub ema_volatility: u32,
    pub ema_arrival: u32,
    /// Set once the first inter-arrival gap has been seen.
    pub arrival_seeded: bool,
    pub burst_pressure: u8,
    pub neg_pressure: u8,
    pub loyalty_score: u8,
    pub peak_ema: u32,
    pub max_drawdown: u32,
}

impl StreamingStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one accepted score into every statistic.
    pub fn update(&mut self, sample: Sample, config: &StatsConfig) {
        let target = u32::from(sample.score.min(100)) * 100;
        self.ema_fast = ema_step(self.ema_fast, target, config.alpha_fast_bps);
        self.ema_slow = ema_step(self.ema_slow, target, config.alpha_slow_bps);
        self.ema_volatility = ema_step(
            self.ema_volatility,
            self.ema_fast.abs_diff(self.ema_slow),
            config.alpha_volatility_bps,
        );

        self.burst_pressure = match sample.repeat {
            RepeatKind::Rapid => raise(self.burst_pressure, config.burst_alpha_up_bps),
            RepeatKind::Fresh | RepeatKind::Returning => {
                decay(self.burst_pressure, config.burst_decay_pct)
            }
        };
        if sample.repeat == RepeatKind::Returning {
            self.loyalty_score = self
                .loyalty_score
                .saturating_add(config.loyalty_step)
                .min(LOYALTY_MAX);
        }

        self.neg_pressure = if sample.score < config.neg_score_threshold {
            raise(self.neg_pressure, config.neg_alpha_up_bps)
        } else {
            decay(self.neg_pressure, config.burst_decay_pct)
        };

        if let Some(gap) = sample.gap {
            let observed = log2_centi(gap).min(ARRIVAL_MAX);
            self.ema_arrival = if self.arrival_seeded {
                ema_step(self.ema_arrival, observed, config.alpha_arrival_bps)
            } else {
                self.arrival_seeded = true;
                observed
            };
        }

        self.track_drawdown();
    }

    /// Best-effort correction after a revoke.
    ///
    /// EMAs cannot be inverted, so fast and slow take one step toward the
    /// mean of the scores still live in memory. With nothing live they stay
    /// put. A revoked low score also relieves negative pressure.
    pub fn correct_for_revoke(
        &mut self,
        revoked_score: u8,
        live_mean: Option<u8>,
        config: &StatsConfig,
    ) {
        if let Some(mean) = live_mean {
            let target = u32::from(mean.min(100)) * 100;
            self.ema_fast = ema_step(self.ema_fast, target, config.alpha_fast_bps);
            self.ema_slow = ema_step(self.ema_slow, target, config.alpha_slow_bps);
        }
        if revoked_score < config.neg_score_threshold {
            self.neg_pressure = decay(self.neg_pressure, config.burst_decay_pct);
        }
        self.track_drawdown();
    }

    fn track_drawdown(&mut self) {
        self.peak_ema = self.peak_ema.max(self.ema_slow);
        self.max_drawdown = self.max_drawdown.max(self.peak_ema - self.ema_slow);
    }
}

/// `alpha_up * 255 + (1 - alpha_up) * value`.
fn raise(value: u8, alpha_bps: u32) -> u8 {
    ema_step(u32::from(value), u32::from(PRESSURE_MAX), alpha_bps).min(u32::from(PRESSURE_MAX)) as u8
}

/// `floor(pct * value / 100)`. Reaches zero on a quiet stream.
fn decay(value: u8, pct: u8) -> u8 {
    (u32::from(value) * u32::from(pct.min(99)) / 100) as u8
}

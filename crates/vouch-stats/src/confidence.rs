//! Diversity, confidence and quality.
//!
//! Confidence is built from four bounded parts: a cold-start base that grows
//! with feedback count up to a ceiling, a uniqueness bonus from the diversity
//! ratio, an epoch-spread bonus, and a loyalty bonus. Quality is the blended
//! EMA damped by confidence, so a young entity cannot jump straight to the top
//! of the scale.

use vouch_core::config::ConfidenceConfig;
use vouch_core::constants::{CONFIDENCE_MAX, DIVERSITY_MAX, QUALITY_MAX};
use vouch_core::fixed::{div_round_half_up, scale_clamped};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfidenceInputs {
    pub feedback_count: u32,
    pub diversity: u8,
    pub epoch_count: u32,
    pub loyalty_score: u8,
}

/// `min(255, round(255 * unique_estimate / feedback_count))`, 0 without feedback.
pub fn diversity_ratio(unique_estimate: u32, feedback_count: u32) -> u8 {
    scale_clamped(
        u64::from(unique_estimate).min(u64::from(feedback_count)),
        u64::from(feedback_count),
        u64::from(DIVERSITY_MAX),
    ) as u8
}

pub fn confidence(inputs: &ConfidenceInputs, config: &ConfidenceConfig) -> u8 {
    let count = u64::from(inputs.feedback_count);
    let min_samples = u64::from(config.cold_start_min_samples);

    let base = if count < min_samples {
        count * u64::from(config.cold_start_step)
    } else {
        let grown = u64::from(config.cold_start_floor)
            .saturating_add((count - min_samples).saturating_mul(u64::from(config.per_feedback)));
        grown.min(u64::from(config.ceiling))
    };

    let uniqueness = div_round_half_up(
        u64::from(inputs.diversity) * u64::from(config.uniqueness_bonus_max),
        u64::from(DIVERSITY_MAX),
    );
    let spread = u64::from(inputs.epoch_count)
        .saturating_mul(u64::from(config.epoch_bonus))
        .min(u64::from(config.epoch_bonus_max));
    let loyalty = (u64::from(inputs.loyalty_score) / u64::from(config.loyalty_divisor.max(1)))
        .min(u64::from(config.loyalty_bonus_max));

    (base + uniqueness + spread + loyalty).min(u64::from(CONFIDENCE_MAX)) as u8
}

/// Blended EMA scaled by confidence, in `0..=QUALITY_MAX`.
pub fn quality(ema_fast: u32, ema_slow: u32, confidence: u8, config: &ConfidenceConfig) -> u32 {
    let fast_weight = u64::from(config.quality_fast_weight_pct.min(100));
    let blended = u64::from(ema_fast) * fast_weight + u64::from(ema_slow) * (100 - fast_weight);
    let damped = div_round_half_up(blended * u64::from(confidence.min(CONFIDENCE_MAX)), 100 * 100);
    damped.min(u64::from(QUALITY_MAX)) as u32
}

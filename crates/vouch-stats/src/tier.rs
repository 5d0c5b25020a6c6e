//! Trust tier state machine with promotion vesting.
//!
//! Eligibility is recomputed on every event. Moving up requires the entity to
//! stay above its confirmed tier for `vesting_epochs` epochs; moving down is
//! immediate. A demotion leaves an open candidacy and its start epoch alone,
//! so a short dip does not erase vesting progress. Candidacy closes only when
//! eligibility settles back at the confirmed tier.

use serde::{Deserialize, Serialize};

use vouch_core::config::TierConfig;
use vouch_core::models::{TierTransition, TrustTier};

/// Metrics the tier thresholds are checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierMetrics {
    pub quality: u32,
    pub risk: u8,
    pub confidence: u8,
    pub loyalty_score: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierMachine {
    confirmed: TrustTier,
    candidate: Option<TrustTier>,
    candidate_epoch: u64,
}

impl TierMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(
        confirmed: TrustTier,
        candidate: Option<TrustTier>,
        candidate_epoch: u64,
    ) -> Self {
        Self {
            confirmed,
            candidate,
            candidate_epoch,
        }
    }

    /// The tier other systems see.
    pub fn effective(&self) -> TrustTier {
        self.confirmed
    }

    pub fn confirmed(&self) -> TrustTier {
        self.confirmed
    }

    pub fn candidate(&self) -> Option<TrustTier> {
        self.candidate
    }

    pub fn candidate_epoch(&self) -> u64 {
        self.candidate_epoch
    }

    /// Highest tier whose thresholds the metrics meet right now.
    pub fn eligible(metrics: &TierMetrics, config: &TierConfig) -> TrustTier {
        TrustTier::RATED
            .iter()
            .rev()
            .copied()
            .find(|&tier| meets(tier, metrics, config))
            .unwrap_or(TrustTier::Unrated)
    }

    /// Advance the machine for an event in `epoch`.
    pub fn evaluate(
        &mut self,
        metrics: &TierMetrics,
        epoch: u64,
        config: &TierConfig,
    ) -> TierTransition {
        let eligible = Self::eligible(metrics, config);
        let from = self.confirmed;

        if eligible < from {
            self.confirmed = eligible;
            return TierTransition::Demoted { from, to: eligible };
        }

        if eligible == from {
            self.candidate = None;
            return TierTransition::Unchanged;
        }

        // A lower candidate has qualified all along and keeps its clock. A
        // higher one starts vesting now.
        match self.candidate {
            Some(candidate) if eligible <= candidate => {}
            _ => self.candidate_epoch = epoch,
        }
        self.candidate = Some(eligible);

        if epoch.saturating_sub(self.candidate_epoch) >= u64::from(config.vesting_epochs) {
            self.confirmed = eligible;
            self.candidate = None;
            return TierTransition::Promoted { from, to: eligible };
        }
        TierTransition::Unchanged
    }
}

fn meets(tier: TrustTier, metrics: &TierMetrics, config: &TierConfig) -> bool {
    let Some(threshold) = config.threshold(tier) else {
        return true;
    };
    let loyal = tier != TrustTier::Platinum || metrics.loyalty_score >= config.platinum_loyalty_gate;
    metrics.quality >= threshold.min_quality
        && metrics.risk <= threshold.max_risk
        && metrics.confidence >= threshold.min_confidence
        && loyal
}

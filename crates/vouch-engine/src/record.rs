//! The fixed-size per-entity record.

use vouch_core::config::VouchConfig;
use vouch_core::models::{EntityId, EntitySummary, TierTransition, TrustTier};
use vouch_core::{VouchError, VouchResult};
use vouch_digest::DigestChain;
use vouch_sketch::{CardinalityEstimator, RecencyBuffer};
use vouch_stats::{
    confidence, diversity_ratio, quality, risk_score, ConfidenceInputs, RiskInputs,
    StreamingStats, TierMachine, TierMetrics,
};

/// Everything the engine remembers about one entity.
///
/// The shape never grows: 256 registers, a 24-slot ring, a 10-slot bypass
/// list, and scalars. Cached scores are recomputed on every accepted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityStats {
    pub entity: EntityId,
    /// Fixed at first ingest.
    pub salt: u64,
    pub registers: CardinalityEstimator,
    pub recency: RecencyBuffer,
    pub stats: StreamingStats,
    pub tier: TierMachine,
    pub digests: DigestChain,

    pub quality: u32,
    pub risk: u8,
    pub confidence: u8,
    pub diversity: u8,

    pub feedback_count: u32,
    pub revoked_count: u32,
    pub response_count: u32,
    pub min_score: u8,
    pub max_score: u8,
    pub first_score: u8,
    pub last_score: u8,
    pub epoch_count: u32,
    pub current_epoch: u64,
    pub first_seen_time: u64,
    pub last_seen_time: u64,
}

impl EntityStats {
    /// Empty record opened by the first ingest at `first_seen_time`.
    pub fn new(entity: EntityId, salt: u64, first_seen_time: u64) -> Self {
        Self {
            entity,
            salt,
            registers: CardinalityEstimator::new(),
            recency: RecencyBuffer::new(first_seen_time),
            stats: StreamingStats::new(),
            tier: TierMachine::new(),
            digests: DigestChain::new(),
            quality: 0,
            risk: 0,
            confidence: 0,
            diversity: 0,
            feedback_count: 0,
            revoked_count: 0,
            response_count: 0,
            min_score: 0,
            max_score: 0,
            first_score: 0,
            last_score: 0,
            epoch_count: 0,
            current_epoch: 0,
            first_seen_time,
            last_seen_time: first_seen_time,
        }
    }

    pub fn unique_estimate(&self) -> u32 {
        self.registers.estimate()
    }

    pub fn trust_tier(&self) -> TrustTier {
        self.tier.effective()
    }

    /// Fold a score into the bookkeeping counters.
    pub(crate) fn record_score(
        &mut self,
        score: u8,
        time_marker: u64,
        epoch: u64,
    ) -> VouchResult<()> {
        let first = self.feedback_count == 0;
        self.feedback_count = self
            .feedback_count
            .checked_add(1)
            .ok_or(VouchError::Overflow { counter: "feedback_count" })?;
        if first {
            self.first_score = score;
            self.min_score = score;
            self.max_score = score;
        } else {
            self.min_score = self.min_score.min(score);
            self.max_score = self.max_score.max(score);
        }
        self.last_score = score;

        if first || epoch != self.current_epoch {
            self.epoch_count = self
                .epoch_count
                .checked_add(1)
                .ok_or(VouchError::Overflow { counter: "epoch_count" })?;
            self.current_epoch = epoch;
        }
        self.last_seen_time = time_marker;
        Ok(())
    }

    /// Recompute cached scores and advance the tier machine.
    pub(crate) fn rescore(&mut self, epoch: u64, config: &VouchConfig) -> TierTransition {
        self.diversity = diversity_ratio(self.unique_estimate(), self.feedback_count);
        self.confidence = confidence(
            &ConfidenceInputs {
                feedback_count: self.feedback_count,
                diversity: self.diversity,
                epoch_count: self.epoch_count,
                loyalty_score: self.stats.loyalty_score,
            },
            &config.confidence,
        );
        self.quality = quality(
            self.stats.ema_fast,
            self.stats.ema_slow,
            self.confidence,
            &config.confidence,
        );
        self.risk = risk_score(
            &RiskInputs {
                feedback_count: self.feedback_count,
                diversity: self.diversity,
                burst_pressure: self.stats.burst_pressure,
                neg_pressure: self.stats.neg_pressure,
                ema_fast: self.stats.ema_fast,
                ema_slow: self.stats.ema_slow,
                ema_volatility: self.stats.ema_volatility,
                ema_arrival: self.stats.ema_arrival,
                arrival_seeded: self.stats.arrival_seeded,
            },
            &config.risk,
            config.confidence.cold_start_min_samples,
        );
        self.tier.evaluate(
            &TierMetrics {
                quality: self.quality,
                risk: self.risk,
                confidence: self.confidence,
                loyalty_score: self.stats.loyalty_score,
            },
            epoch,
            &config.tiers,
        )
    }

    pub fn summary(&self) -> EntitySummary {
        EntitySummary {
            entity: self.entity,
            tier: self.trust_tier(),
            quality: self.quality,
            risk: self.risk,
            confidence: self.confidence,
            diversity_ratio: self.diversity,
            feedback_count: self.feedback_count,
            unique_estimate: self.unique_estimate(),
            ema_fast: self.stats.ema_fast,
            ema_slow: self.stats.ema_slow,
            loyalty_score: self.stats.loyalty_score,
            first_seen_time: self.first_seen_time,
            last_seen_time: self.last_seen_time,
        }
    }
}

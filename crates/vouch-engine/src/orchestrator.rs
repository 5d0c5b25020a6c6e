//! Atomic ingest, revoke and respond over a single entity record.
//!
//! Each operation works on a scratch copy of the record and hands back the
//! new record only when every step succeeded. The caller swaps it in under
//! the entity's lock. A validation or overflow error therefore leaves the
//! stored record exactly as it was.

use vouch_core::config::VouchConfig;
use vouch_core::models::{
    FeedbackInput, ResponseInput, ResponseResult, RevokeInput, RevokeOutcome,
    RevokeResult, TierTransition, TrustTier, UpdateResult,
};
use vouch_core::{VouchError, VouchResult};
use vouch_digest::{ChainKind, EventLeaf};
use vouch_sketch::{derive_fingerprint, derive_salt, RevokeLookup};
use vouch_stats::{RepeatKind, Sample};

use crate::record::EntityStats;

/// A committed ingest: the new record and the caller-facing result.
#[derive(Debug, Clone)]
pub struct Ingested {
    pub record: EntityStats,
    pub result: UpdateResult,
}

/// A revoke. `record` is `None` for soft fails, which change nothing.
#[derive(Debug, Clone)]
pub struct Revoked {
    pub record: Option<EntityStats>,
    pub result: RevokeResult,
    pub transition: TierTransition,
}

#[derive(Debug, Clone)]
pub struct Responded {
    pub record: EntityStats,
    pub result: ResponseResult,
}

pub fn epoch_of(time_marker: u64, config: &VouchConfig) -> u64 {
    time_marker / config.tiers.epoch_length_secs.max(1)
}

pub fn ingest(
    current: Option<&EntityStats>,
    input: &FeedbackInput,
    config: &VouchConfig,
) -> VouchResult<Ingested> {
    input.validate()?;
    let time = input.time_marker;

    let mut scratch = match current {
        Some(record) => {
            check_time(record, time)?;
            record.clone()
        }
        None => EntityStats::new(
            input.entity,
            derive_salt(input.entity, &input.rater, time),
            time,
        ),
    };

    let gap = (scratch.feedback_count > 0).then(|| time - scratch.last_seen_time);
    let fingerprint = derive_fingerprint(scratch.salt, input.entity, &input.rater);

    let write = scratch.recency.write(
        fingerprint,
        input.score,
        input.sequence_index,
        time,
        &config.ring,
    );
    // Registers only grow, so a fingerprint that comes back after eviction
    // can no longer raise its register.
    let is_unique = !write.placement.is_repeat() && scratch.registers.observe(fingerprint);

    let repeat = RepeatKind::classify(
        write.previous.map(|slot| slot.written_at),
        time,
        config.stats.loyalty_min_delta_secs,
    );
    scratch.stats.update(
        Sample {
            score: input.score,
            gap,
            repeat,
        },
        &config.stats,
    );

    let epoch = epoch_of(time, config);
    scratch.record_score(input.score, time, epoch)?;
    let transition = scratch.rescore(epoch, config);
    scratch
        .digests
        .append(ChainKind::Feedback, &EventLeaf::from(input).hash());

    let result = UpdateResult {
        entity: input.entity,
        tier: scratch.trust_tier(),
        quality: scratch.quality,
        confidence: scratch.confidence,
        risk: scratch.risk,
        diversity: scratch.diversity,
        is_unique,
        placement: write.placement,
        transition,
    };
    Ok(Ingested {
        record: scratch,
        result,
    })
}

pub fn revoke(
    current: Option<&EntityStats>,
    input: &RevokeInput,
    config: &VouchConfig,
) -> VouchResult<Revoked> {
    input.validate()?;

    let Some(record) = current else {
        return Ok(soft_fail(None, input, RevokeOutcome::NotFound));
    };
    check_time(record, input.time_marker)?;

    let mut scratch = record.clone();
    let fingerprint = derive_fingerprint(scratch.salt, input.entity, &input.rater);
    let score = match scratch.recency.revoke(fingerprint, input.sequence_index) {
        RevokeLookup::Revoked { score, .. } => score,
        RevokeLookup::AlreadyRevoked => {
            return Ok(soft_fail(Some(record), input, RevokeOutcome::AlreadyRevoked))
        }
        RevokeLookup::NotFound => {
            return Ok(soft_fail(Some(record), input, RevokeOutcome::NotFound))
        }
    };

    let live_mean = scratch.recency.live_mean();
    scratch
        .stats
        .correct_for_revoke(score, live_mean, &config.stats);
    scratch.revoked_count = scratch
        .revoked_count
        .checked_add(1)
        .ok_or(VouchError::Overflow {
            counter: "revoked_count",
        })?;

    let transition = scratch.rescore(epoch_of(input.time_marker, config), config);
    scratch
        .digests
        .append(ChainKind::Revoke, &EventLeaf::from(input).hash());

    let result = RevokeResult {
        entity: input.entity,
        original_score: Some(score),
        had_impact: true,
        outcome: RevokeOutcome::Revoked,
        new_tier: scratch.trust_tier(),
        new_quality: scratch.quality,
        new_confidence: scratch.confidence,
    };
    Ok(Revoked {
        record: Some(scratch),
        result,
        transition,
    })
}

/// Attach an owner response. Statistics are untouched.
pub fn respond(current: Option<&EntityStats>, input: &ResponseInput) -> VouchResult<Responded> {
    input.validate()?;
    let record = current.ok_or(VouchError::UnknownEntity(input.entity))?;

    let mut scratch = record.clone();
    scratch.response_count = scratch
        .response_count
        .checked_add(1)
        .ok_or(VouchError::Overflow {
            counter: "response_count",
        })?;
    let head = scratch
        .digests
        .append(ChainKind::Response, &EventLeaf::from(input).hash());

    let result = ResponseResult {
        entity: input.entity,
        response_count: scratch.response_count,
        response_digest: head,
    };
    Ok(Responded {
        record: scratch,
        result,
    })
}

fn check_time(record: &EntityStats, time_marker: u64) -> VouchResult<()> {
    if time_marker < record.last_seen_time {
        return Err(VouchError::validation(
            "time_marker",
            format!(
                "{time_marker} is earlier than the last event at {}",
                record.last_seen_time
            ),
        ));
    }
    Ok(())
}

fn soft_fail(
    record: Option<&EntityStats>,
    input: &RevokeInput,
    outcome: RevokeOutcome,
) -> Revoked {
    let (new_tier, new_quality, new_confidence) = record
        .map(|r| (r.trust_tier(), r.quality, r.confidence))
        .unwrap_or((TrustTier::Unrated, 0, 0));
    Revoked {
        record: None,
        result: RevokeResult {
            entity: input.entity,
            original_score: None,
            had_impact: false,
            outcome,
            new_tier,
            new_quality,
            new_confidence,
        },
        transition: TierTransition::Unchanged,
    }
}


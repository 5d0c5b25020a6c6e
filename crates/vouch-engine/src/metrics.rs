//! Engine counters.
//!
//! Counters are lock-free so every worker thread can bump them without
//! touching the entity locks. [`EngineMetrics::snapshot`] copies them into a
//! plain serialisable struct.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use vouch_core::models::{Placement, TierTransition};
use vouch_core::VouchResult;

#[derive(Debug, Default)]
pub struct EngineMetrics {
    ingests: AtomicU64,
    unique_ingests: AtomicU64,
    ring_inserts: AtomicU64,
    ring_overwrites: AtomicU64,
    ring_evictions: AtomicU64,
    bypass_writes: AtomicU64,
    revokes_with_impact: AtomicU64,
    revokes_without_impact: AtomicU64,
    responses: AtomicU64,
    rejected: AtomicU64,
    promotions: AtomicU64,
    demotions: AtomicU64,
}

/// Point-in-time copy of [`EngineMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub ingests: u64,
    pub unique_ingests: u64,
    pub ring_inserts: u64,
    pub ring_overwrites: u64,
    pub ring_evictions: u64,
    pub bypass_writes: u64,
    pub revokes_with_impact: u64,
    pub revokes_without_impact: u64,
    pub responses: u64,
    pub rejected: u64,
    pub promotions: u64,
    pub demotions: u64,
}

impl EngineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_ingest(&self, placement: Placement, is_unique: bool) {
        bump(&self.ingests);
        if is_unique {
            bump(&self.unique_ingests);
        }
        match placement {
            Placement::RingInsert => bump(&self.ring_inserts),
            Placement::RingOverwrite => bump(&self.ring_overwrites),
            Placement::RingEvict { .. } => bump(&self.ring_evictions),
            Placement::Bypass | Placement::BypassOverwrite => bump(&self.bypass_writes),
        }
    }

    pub(crate) fn record_revoke(&self, had_impact: bool) {
        if had_impact {
            bump(&self.revokes_with_impact);
        } else {
            bump(&self.revokes_without_impact);
        }
    }

    pub(crate) fn record_response(&self) {
        bump(&self.responses);
    }

    pub(crate) fn record_rejected(&self) {
        bump(&self.rejected);
    }

    pub(crate) fn record_transition(&self, transition: TierTransition) {
        match transition {
            TierTransition::Promoted { .. } => bump(&self.promotions),
            TierTransition::Demoted { .. } => bump(&self.demotions),
            TierTransition::Unchanged => {}
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            ingests: read(&self.ingests),
            unique_ingests: read(&self.unique_ingests),
            ring_inserts: read(&self.ring_inserts),
            ring_overwrites: read(&self.ring_overwrites),
            ring_evictions: read(&self.ring_evictions),
            bypass_writes: read(&self.bypass_writes),
            revokes_with_impact: read(&self.revokes_with_impact),
            revokes_without_impact: read(&self.revokes_without_impact),
            responses: read(&self.responses),
            rejected: read(&self.rejected),
            promotions: read(&self.promotions),
            demotions: read(&self.demotions),
        }
    }

    pub fn to_json(&self) -> VouchResult<String> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }
}

fn bump(counter: &AtomicU64) {
    counter.fetch_add(1, Ordering::Relaxed);
}

fn read(counter: &AtomicU64) -> u64 {
    counter.load(Ordering::Relaxed)
}

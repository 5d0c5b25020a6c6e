//! ReputationEngine: the concurrent entry point.
//!
//! Records live in a `DashMap` keyed by entity, each behind its own mutex,
//! so calls for one entity run in a single total order while different
//! entities proceed in parallel. The config sits behind an `RwLock<Arc<_>>`
//! and every call works from one snapshot of it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use dashmap::DashMap;
use rayon::prelude::*;
use tracing::debug;

use vouch_core::config::VouchConfig;
use vouch_core::models::{
    DigestHeads, EntityId, EntitySummary, FeedbackInput, ResponseInput, ResponseResult,
    RevokeInput, RevokeResult, TierTransition, UpdateResult,
};
use vouch_core::{VouchError, VouchResult};

use crate::metrics::EngineMetrics;
use crate::orchestrator;
use crate::record::EntityStats;
use crate::tracing_setup::events;

type Slot = Arc<Mutex<Option<EntityStats>>>;

pub struct ReputationEngine {
    records: DashMap<EntityId, Slot>,
    config: RwLock<Arc<VouchConfig>>,
    metrics: EngineMetrics,
}

impl ReputationEngine {
    /// Create an engine after validating `config`.
    pub fn new(config: VouchConfig) -> VouchResult<Self> {
        config.validate()?;
        Ok(Self {
            records: DashMap::new(),
            config: RwLock::new(Arc::new(config)),
            metrics: EngineMetrics::new(),
        })
    }

    pub fn metrics(&self) -> &EngineMetrics {
        &self.metrics
    }

    /// Consistent snapshot of the active config.
    pub fn config(&self) -> VouchResult<Arc<VouchConfig>> {
        self.config
            .read()
            .map(|guard| Arc::clone(&guard))
            .map_err(|e| VouchError::LockPoisoned(e.to_string()))
    }

    /// Replace the config. On a bounds violation the old config stays active.
    pub fn update_config(&self, config: VouchConfig) -> VouchResult<()> {
        if let Err(e) = config.validate() {
            events::config_rejected(&e);
            return Err(e);
        }
        let mut guard = self
            .config
            .write()
            .map_err(|e| VouchError::LockPoisoned(e.to_string()))?;
        *guard = Arc::new(config);
        events::config_updated();
        Ok(())
    }

    /// Ingest one feedback event.
    pub fn ingest(&self, input: &FeedbackInput) -> VouchResult<UpdateResult> {
        let span = crate::ingest_span!(input.entity, input.sequence_index);
        let _enter = span.enter();

        let config = self.config()?;
        // Malformed input never reaches the registry.
        if let Err(e) = input.validate() {
            return Err(self.reject(input.entity, "ingest", e));
        }
        let slot = self.slot_or_insert(input.entity);
        let mut guard = lock(&slot)?;

        let ingested = match orchestrator::ingest(guard.as_ref(), input, &config) {
            Ok(ingested) => ingested,
            Err(e) => return Err(self.reject(input.entity, "ingest", e)),
        };
        *guard = Some(ingested.record);
        drop(guard);

        let result = ingested.result;
        debug!(
            entity = %result.entity,
            placement = ?result.placement,
            tier = %result.tier,
            quality = result.quality,
            risk = result.risk,
            "feedback ingested"
        );
        self.metrics.record_ingest(result.placement, result.is_unique);
        self.after_transition(result.entity, result.transition);
        Ok(result)
    }

    /// Revoke a rater's feedback. Soft fails come back with `had_impact = false`.
    pub fn revoke(&self, input: &RevokeInput) -> VouchResult<RevokeResult> {
        let span = crate::revoke_span!(input.entity, input.sequence_index);
        let _enter = span.enter();

        let config = self.config()?;
        let slot = self.slot(input.entity);
        let revoked = match &slot {
            Some(slot) => {
                let mut guard = lock(slot)?;
                let mut revoked = orchestrator::revoke(guard.as_ref(), input, &config);
                if let Some(record) = revoked.as_mut().ok().and_then(|r| r.record.take()) {
                    *guard = Some(record);
                }
                revoked
            }
            None => orchestrator::revoke(None, input, &config),
        };

        let revoked = match revoked {
            Ok(revoked) => revoked,
            Err(e) => return Err(self.reject(input.entity, "revoke", e)),
        };

        debug!(
            entity = %input.entity,
            outcome = ?revoked.result.outcome,
            had_impact = revoked.result.had_impact,
            "revoke processed"
        );
        self.metrics.record_revoke(revoked.result.had_impact);
        self.after_transition(input.entity, revoked.transition);
        Ok(revoked.result)
    }

    /// Attach an owner response to an entity's feedback.
    pub fn respond(&self, input: &ResponseInput) -> VouchResult<ResponseResult> {
        let span = crate::response_span!(input.entity, input.sequence_index);
        let _enter = span.enter();

        let slot = self
            .slot(input.entity)
            .ok_or(VouchError::UnknownEntity(input.entity))?;
        let mut guard = lock(&slot)?;
        let responded = match orchestrator::respond(guard.as_ref(), input) {
            Ok(responded) => responded,
            Err(e) => return Err(self.reject(input.entity, "respond", e)),
        };
        *guard = Some(responded.record);
        drop(guard);

        debug!(
            entity = %input.entity,
            responses = responded.result.response_count,
            "response recorded"
        );
        self.metrics.record_response();
        Ok(responded.result)
    }

    /// Ingest many events. Events for one entity keep their input order;
    /// different entities run in parallel. Results come back in input order.
    pub fn ingest_batch(&self, inputs: Vec<FeedbackInput>) -> Vec<VouchResult<UpdateResult>> {
        let total = inputs.len();
        let mut groups: HashMap<EntityId, Vec<(usize, FeedbackInput)>> = HashMap::new();
        for (index, input) in inputs.into_iter().enumerate() {
            groups.entry(input.entity).or_default().push((index, input));
        }

        let span = crate::batch_span!(total, groups.len());
        let mut indexed: Vec<(usize, VouchResult<UpdateResult>)> = span.in_scope(|| {
            groups
                .into_par_iter()
                .flat_map_iter(|(_, group)| {
                    group
                        .into_iter()
                        .map(move |(index, input)| (index, self.ingest(&input)))
                })
                .collect()
        });
        indexed.sort_unstable_by_key(|(index, _)| *index);
        indexed.into_iter().map(|(_, result)| result).collect()
    }

    pub fn summary(&self, entity: EntityId) -> VouchResult<Option<EntitySummary>> {
        self.with_record(entity, EntityStats::summary)
    }

    pub fn digest_heads(&self, entity: EntityId) -> VouchResult<Option<DigestHeads>> {
        self.with_record(entity, |record| record.digests.heads())
    }

    /// Cloned copy of one record.
    pub fn record(&self, entity: EntityId) -> VouchResult<Option<EntityStats>> {
        self.with_record(entity, EntityStats::clone)
    }

    /// Number of entities with a record.
    pub fn entity_count(&self) -> VouchResult<usize> {
        Ok(self.export_records()?.len())
    }

    /// Registry entries, counting entities whose first ingest is in flight.
    pub fn slot_count(&self) -> usize {
        self.records.len()
    }

    /// Clone every record, ordered by entity id.
    pub fn export_records(&self) -> VouchResult<Vec<EntityStats>> {
        let slots: Vec<Slot> = self.records.iter().map(|r| Arc::clone(r.value())).collect();
        let mut records = Vec::with_capacity(slots.len());
        for slot in slots {
            if let Some(record) = lock(&slot)?.as_ref() {
                records.push(record.clone());
            }
        }
        records.sort_by_key(|r| r.entity);
        Ok(records)
    }

    /// Install a record, replacing any existing one for the same entity.
    pub fn import_record(&self, record: EntityStats) -> VouchResult<()> {
        let slot = self.slot_or_insert(record.entity);
        let mut guard = lock(&slot)?;
        *guard = Some(record);
        Ok(())
    }

    fn with_record<T>(
        &self,
        entity: EntityId,
        f: impl FnOnce(&EntityStats) -> T,
    ) -> VouchResult<Option<T>> {
        let Some(slot) = self.slot(entity) else {
            return Ok(None);
        };
        let guard = lock(&slot)?;
        Ok(guard.as_ref().map(f))
    }

    fn slot(&self, entity: EntityId) -> Option<Slot> {
        self.records.get(&entity).map(|r| Arc::clone(r.value()))
    }

    fn slot_or_insert(&self, entity: EntityId) -> Slot {
        let entry = self.records.entry(entity).or_default();
        Arc::clone(entry.value())
    }

    fn reject(&self, entity: EntityId, op: &'static str, err: VouchError) -> VouchError {
        self.metrics.record_rejected();
        events::input_rejected(entity, op, &err);
        err
    }

    fn after_transition(&self, entity: EntityId, transition: TierTransition) {
        self.metrics.record_transition(transition);
        match transition {
            TierTransition::Promoted { from, to } => events::tier_promoted(entity, from, to),
            TierTransition::Demoted { from, to } => events::tier_demoted(entity, from, to),
            TierTransition::Unchanged => {}
        }
    }
}

impl Default for ReputationEngine {
    fn default() -> Self {
        Self {
            records: DashMap::new(),
            config: RwLock::new(Arc::new(VouchConfig::default())),
            metrics: EngineMetrics::new(),
        }
    }
}

fn lock(slot: &Slot) -> VouchResult<MutexGuard<'_, Option<EntityStats>>> {
    slot.lock().map_err(|e| VouchError::LockPoisoned(e.to_string()))
}

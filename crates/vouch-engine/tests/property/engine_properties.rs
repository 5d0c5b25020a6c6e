use std::collections::HashSet;

use proptest::prelude::*;
use vouch_core::constants::{
    ARRIVAL_MAX, BYPASS_CAPACITY, CONFIDENCE_MAX, EMA_SCALE, QUALITY_MAX, RING_CAPACITY, RISK_MAX,
};
use vouch_core::models::{EntityId, FeedbackInput, RaterId, RevokeInput, SealHash};
use vouch_engine::{decode, encode, ReputationEngine};

#[derive(Debug, Clone)]
enum Op {
    Ingest { rater: u64, score: u8, gap: u64 },
    Revoke { rater: u64, gap: u64 },
}

fn ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![
            4 => (0u64..60, 0u8..=100, 0u64..5_000)
                .prop_map(|(rater, score, gap)| Op::Ingest { rater, score, gap }),
            1 => (0u64..60, 0u64..5_000).prop_map(|(rater, gap)| Op::Revoke { rater, gap }),
        ],
        1..150,
    )
}

fn run(engine: &ReputationEngine, ops: &[Op]) -> Vec<bool> {
    let entity = EntityId(1);
    let mut now = 1_000_000;
    let mut impacts = Vec::new();
    for op in ops {
        match *op {
            Op::Ingest { rater, score, gap } => {
                now += gap;
                engine
                    .ingest(&FeedbackInput {
                        entity,
                        rater: RaterId::from_seed(rater),
                        score,
                        sequence_index: 1,
                        time_marker: now,
                        seal: SealHash([rater as u8; 32]),
                    })
                    .unwrap();
            }
            Op::Revoke { rater, gap } => {
                now += gap;
                let r = engine
                    .revoke(&RevokeInput {
                        entity,
                        rater: RaterId::from_seed(rater),
                        sequence_index: 1,
                        time_marker: now,
                        claimed_seal: SealHash([rater as u8; 32]),
                    })
                    .unwrap();
                impacts.push(r.had_impact);
            }
        }
    }
    impacts
}

// ── Every bounded field stays in range after every operation ────────────

proptest! {
    #[test]
    fn record_stays_within_bounds(ops in ops()) {
        let engine = ReputationEngine::default();
        run(&engine, &ops);
        if let Some(record) = engine.record(EntityId(1)).unwrap() {
            prop_assert!(record.recency.ring_len() <= RING_CAPACITY);
            prop_assert!(record.recency.bypass_len() <= BYPASS_CAPACITY);
            prop_assert!(record.quality <= QUALITY_MAX);
            prop_assert!(record.risk <= RISK_MAX);
            prop_assert!(record.confidence <= CONFIDENCE_MAX);
            prop_assert!(record.stats.ema_fast <= EMA_SCALE);
            prop_assert!(record.stats.ema_slow <= EMA_SCALE);
            prop_assert!(record.stats.ema_arrival <= ARRIVAL_MAX);
            prop_assert!(record.min_score <= record.max_score);
            prop_assert_eq!(decode(&encode(&record)).unwrap(), record);
        }
    }
}

// ── Replaying the same stream gives the same digests ────────────────────

proptest! {
    #[test]
    fn replay_is_deterministic(ops in ops()) {
        let a = ReputationEngine::default();
        let b = ReputationEngine::default();
        let impacts_a = run(&a, &ops);
        let impacts_b = run(&b, &ops);
        prop_assert_eq!(impacts_a, impacts_b);
        prop_assert_eq!(
            a.digest_heads(EntityId(1)).unwrap(),
            b.digest_heads(EntityId(1)).unwrap()
        );
    }
}

// ── A revoke has impact at most once per write ──────────────────────────

proptest! {
    #[test]
    fn second_revoke_never_has_impact(ops in ops(), rater in 0u64..60) {
        let engine = ReputationEngine::default();
        run(&engine, &ops);
        let tail = [Op::Revoke { rater, gap: 1 }, Op::Revoke { rater, gap: 1 }];
        let impacts = run_from_now(&engine, &tail);
        prop_assert!(!impacts[1]);
    }
}

fn run_from_now(engine: &ReputationEngine, ops: &[Op]) -> Vec<bool> {
    let last = engine
        .record(EntityId(1))
        .ok()
        .flatten()
        .map(|r| r.last_seen_time)
        .unwrap_or(0);
    let mut impacts = Vec::new();
    for op in ops {
        if let Op::Revoke { rater, gap } = *op {
            let r = engine
                .revoke(&RevokeInput {
                    entity: EntityId(1),
                    rater: RaterId::from_seed(rater),
                    sequence_index: 1,
                    time_marker: last + gap,
                    claimed_seal: SealHash::default(),
                })
                .unwrap();
            impacts.push(r.had_impact);
        }
    }
    impacts
}

// ── A rater is reported unique at most once ─────────────────────────────

proptest! {
    #[test]
    fn rater_is_unique_at_most_once(
        writes in prop::collection::vec((0u64..40, 0u64..8_000), 1..200),
    ) {
        let engine = ReputationEngine::default();
        let mut seen = HashSet::new();
        let mut now = 1_000_000;
        for (rater, gap) in writes {
            now += gap;
            let r = engine
                .ingest(&FeedbackInput {
                    entity: EntityId(1),
                    rater: RaterId::from_seed(rater),
                    score: 60,
                    sequence_index: 1,
                    time_marker: now,
                    seal: SealHash::default(),
                })
                .unwrap();
            if r.is_unique {
                prop_assert!(seen.insert(rater), "rater {} unique twice", rater);
            }
        }
    }
}

use std::thread;

use vouch_core::models::{EntityId, FeedbackInput, RaterId, SealHash};
use vouch_engine::ReputationEngine;

fn event(entity: u64, rater: u64, score: u8, time: u64) -> FeedbackInput {
    FeedbackInput {
        entity: EntityId(entity),
        rater: RaterId::from_seed(rater),
        score,
        sequence_index: 1,
        time_marker: time,
        seal: SealHash([(rater % 251) as u8; 32]),
    }
}

fn interleaved() -> Vec<FeedbackInput> {
    (0..90u64)
        .map(|i| event(i % 3, i / 3 + (i % 3) * 1_000, (i * 37 % 101) as u8, 10_000 + i / 3 * 60))
        .collect()
}

// ── Batch ingest ────────────────────────────────────────────────────────

#[test]
fn batch_matches_sequential_ingest() {
    let events = interleaved();

    let sequential = ReputationEngine::default();
    let expected: Vec<_> = events
        .iter()
        .map(|e| sequential.ingest(e).unwrap())
        .collect();

    let batched = ReputationEngine::default();
    let results = batched.ingest_batch(events);
    assert_eq!(results.len(), expected.len());
    for (got, want) in results.into_iter().zip(expected) {
        assert_eq!(got.unwrap(), want);
    }
    assert_eq!(batched.export_records().unwrap(), sequential.export_records().unwrap());
}

#[test]
fn batch_failures_stay_local() {
    let mut events = interleaved();
    events[4].score = 150;
    let engine = ReputationEngine::default();
    let results = engine.ingest_batch(events);
    assert!(results[4].as_ref().unwrap_err().is_validation());
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 89);
}

// ── Threads ─────────────────────────────────────────────────────────────

#[test]
fn parallel_writers_on_shared_entities_lose_nothing() {
    let engine = ReputationEngine::default();
    thread::scope(|scope| {
        for worker in 0..4u64 {
            let engine = &engine;
            scope.spawn(move || {
                for k in 0..50u64 {
                    let entity = k % 2;
                    // One shared time marker: interleaving can never run time backwards.
                    engine
                        .ingest(&event(entity, worker * 100 + k, 60, 5_000))
                        .unwrap();
                }
            });
        }
    });

    let records = engine.export_records().unwrap();
    assert_eq!(records.len(), 2);
    let total: u32 = records.iter().map(|r| r.feedback_count).sum();
    assert_eq!(total, 200);
    assert_eq!(engine.metrics().snapshot().ingests, 200);
    for record in records {
        assert!(record.recency.ring_len() <= 24);
        assert!(record.recency.bypass_len() <= 10);
    }
}

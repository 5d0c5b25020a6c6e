use vouch_core::config::ObservabilityConfig;
use vouch_core::models::{EntityId, FeedbackInput, RaterId, RevokeInput, SealHash};
use vouch_engine::tracing_setup::spans::names;
use vouch_engine::{init_tracing, MetricsSnapshot, ReputationEngine};

fn feedback(rater: u64, time: u64) -> FeedbackInput {
    FeedbackInput {
        entity: EntityId(1),
        rater: RaterId::from_seed(rater),
        score: 75,
        sequence_index: 1,
        time_marker: time,
        seal: SealHash::default(),
    }
}

#[test]
fn init_tracing_is_idempotent() {
    let config = ObservabilityConfig::default();
    init_tracing(&config);
    init_tracing(&ObservabilityConfig {
        json_logs: true,
        ..config
    });
}

#[test]
fn span_names_are_namespaced() {
    for name in [names::INGEST, names::REVOKE, names::RESPONSE, names::BATCH] {
        assert!(name.starts_with("vouch."));
    }
}

#[test]
fn metrics_follow_placements_and_revokes() {
    let engine = ReputationEngine::default();
    let mut unique = 0;
    for i in 0..26 {
        unique += u64::from(engine.ingest(&feedback(i, 100 + i)).unwrap().is_unique);
    }
    assert!(!engine.ingest(&feedback(3, 200)).unwrap().is_unique);
    let revoke = |rater: u64| RevokeInput {
        entity: EntityId(1),
        rater: RaterId::from_seed(rater),
        sequence_index: 1,
        time_marker: 300,
        claimed_seal: SealHash::default(),
    };
    engine.revoke(&revoke(3)).unwrap();
    engine.revoke(&revoke(3)).unwrap();

    let snapshot = engine.metrics().snapshot();
    assert_eq!(snapshot.ingests, 27);
    assert_eq!(snapshot.unique_ingests, unique);
    assert_eq!(snapshot.ring_inserts, 24);
    assert_eq!(snapshot.bypass_writes, 2);
    assert_eq!(snapshot.ring_overwrites, 1);
    assert_eq!(snapshot.revokes_with_impact, 1);
    assert_eq!(snapshot.revokes_without_impact, 1);

    let json = engine.metrics().to_json().unwrap();
    let parsed: MetricsSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, snapshot);
}

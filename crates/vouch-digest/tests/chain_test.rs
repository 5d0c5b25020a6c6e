use vouch_core::models::{EntityId, FeedbackInput, RaterId, RevokeInput, SealHash};
use vouch_digest::{ChainKind, DigestChain, EventLeaf};

fn feedback(seq: u64, time: u64) -> FeedbackInput {
    FeedbackInput {
        entity: EntityId(7),
        rater: RaterId::from_seed(seq),
        score: 80,
        sequence_index: seq,
        time_marker: time,
        seal: SealHash([seq as u8; 32]),
    }
}

fn leaves(events: &[FeedbackInput]) -> Vec<[u8; 32]> {
    events.iter().map(|e| EventLeaf::from(e).hash()).collect()
}

// ── Leaves ──────────────────────────────────────────────────────────────

#[test]
fn every_leaf_field_is_committed() {
    let base = EventLeaf::from(&feedback(1, 100));
    let variants = [
        EventLeaf { entity: EntityId(8), ..base },
        EventLeaf { rater: RaterId::from_seed(99), ..base },
        EventLeaf { sequence_index: 2, ..base },
        EventLeaf { seal: SealHash([0xee; 32]), ..base },
        EventLeaf { time_marker: 101, ..base },
    ];
    for variant in variants {
        assert_ne!(variant.hash(), base.hash());
    }
}

#[test]
fn score_is_not_part_of_the_leaf() {
    let mut a = feedback(1, 100);
    let b = a.clone();
    a.score = 10;
    assert_eq!(EventLeaf::from(&a).hash(), EventLeaf::from(&b).hash());
}

#[test]
fn revoke_leaf_uses_claimed_seal() {
    let revoke = RevokeInput {
        entity: EntityId(7),
        rater: RaterId::from_seed(1),
        sequence_index: 1,
        time_marker: 100,
        claimed_seal: SealHash([1; 32]),
    };
    assert_eq!(
        EventLeaf::from(&revoke).hash(),
        EventLeaf::from(&feedback(1, 100)).hash()
    );
}

// ── Chains ──────────────────────────────────────────────────────────────

#[test]
fn heads_start_at_zero() {
    let chain = DigestChain::new();
    for kind in ChainKind::ALL {
        assert_eq!(chain.head(kind), [0u8; 32]);
    }
    let none: [[u8; 32]; 0] = [];
    assert_eq!(DigestChain::replay(ChainKind::Feedback, &none), [0u8; 32]);
}

#[test]
fn replay_matches_incremental_appends() {
    let events: Vec<_> = (1..=20).map(|i| feedback(i, 1_000 + i)).collect();
    let mut chain = DigestChain::new();
    for leaf in leaves(&events) {
        chain.append(ChainKind::Feedback, &leaf);
    }
    let replayed = DigestChain::replay(ChainKind::Feedback, &leaves(&events));
    assert_eq!(chain.head(ChainKind::Feedback), replayed);
    assert!(chain.verify(ChainKind::Feedback, &leaves(&events)));
}

#[test]
fn reordering_two_events_changes_the_head() {
    let mut events: Vec<_> = (1..=5).map(|i| feedback(i, 1_000 + i)).collect();
    let original = DigestChain::replay(ChainKind::Feedback, &leaves(&events));
    events.swap(1, 2);
    let reordered = DigestChain::replay(ChainKind::Feedback, &leaves(&events));
    assert_ne!(original, reordered);
}

#[test]
fn dropping_an_event_fails_verification() {
    let events: Vec<_> = (1..=5).map(|i| feedback(i, 1_000 + i)).collect();
    let mut chain = DigestChain::new();
    for leaf in leaves(&events) {
        chain.append(ChainKind::Feedback, &leaf);
    }
    let mut partial = leaves(&events);
    partial.remove(3);
    assert!(!chain.verify(ChainKind::Feedback, &partial));
}

#[test]
fn chains_are_independent_and_domain_separated() {
    let leaf = EventLeaf::from(&feedback(1, 100)).hash();
    let mut chain = DigestChain::new();
    let feedback_head = chain.append(ChainKind::Feedback, &leaf);
    assert_eq!(chain.head(ChainKind::Revoke), [0u8; 32]);
    assert_eq!(chain.head(ChainKind::Response), [0u8; 32]);

    let revoke_head = chain.append(ChainKind::Revoke, &leaf);
    assert_ne!(feedback_head, revoke_head);
    assert_eq!(chain.head(ChainKind::Feedback), feedback_head);
}

#[test]
fn heads_round_trip_through_digest_heads() {
    let mut chain = DigestChain::new();
    chain.append(ChainKind::Response, &[9u8; 32]);
    let restored = DigestChain::from_heads(chain.heads());
    assert_eq!(restored, chain);
    assert_eq!(chain.heads().response_hex().len(), 64);
}

#[test]
fn chain_kind_serializes_snake_case() {
    assert_eq!(
        serde_json::to_string(&ChainKind::Response).unwrap(),
        "\"response\""
    );
}

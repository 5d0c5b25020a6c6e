use proptest::prelude::*;
use vouch_core::config::RingConfig;
use vouch_core::constants::{BYPASS_CAPACITY, RING_CAPACITY};
use vouch_core::models::Fingerprint;
use vouch_sketch::{CardinalityEstimator, RecencyBuffer};

// ── Ring and bypass never exceed their capacities ───────────────────────

proptest! {
    #[test]
    fn buffer_stays_bounded(
        writes in prop::collection::vec((0u64..80, 0u8..=100, 0u64..50), 1..400),
        mrt in 1u64..200,
        cap in 1u8..=10,
    ) {
        let policy = RingConfig { mrt_min_secs: mrt, mrt_max_bypass: cap };
        let mut buf = RecencyBuffer::new(0);
        let mut now = 0;
        for (id, score, gap) in writes {
            now += gap;
            buf.write(Fingerprint::new(id), score, 1, now, &policy);
            prop_assert!(buf.ring_len() <= RING_CAPACITY);
            prop_assert!(buf.bypass_len() <= BYPASS_CAPACITY);
            prop_assert!(buf.bypass_window_count() <= cap);
        }
    }
}

// ── A resident fingerprint occupies exactly one slot ────────────────────

proptest! {
    #[test]
    fn no_duplicate_residents(ids in prop::collection::vec(0u64..40, 1..300)) {
        let policy = RingConfig { mrt_min_secs: 10, mrt_max_bypass: 10 };
        let mut buf = RecencyBuffer::new(0);
        for (t, id) in ids.iter().enumerate() {
            buf.write(Fingerprint::new(*id), 50, 1, t as u64, &policy);
        }
        let mut seen = std::collections::HashSet::new();
        for slot in buf.ring().iter().chain(buf.bypass().iter()).flatten() {
            prop_assert!(seen.insert(slot.fingerprint));
        }
    }
}

// ── Cardinality registers are idempotent and monotone ───────────────────

proptest! {
    #[test]
    fn cardinality_is_idempotent(raw in prop::collection::vec(any::<u64>(), 1..200)) {
        let mut est = CardinalityEstimator::new();
        for r in &raw {
            est.observe(Fingerprint::new(*r));
        }
        let snapshot = est.clone();
        for r in &raw {
            prop_assert!(!est.observe(Fingerprint::new(*r)));
        }
        prop_assert_eq!(est, snapshot);
    }
}

use vouch_core::models::{EntityId, RaterId};
use vouch_sketch::cardinality::ESTIMATE_CEILING;
use vouch_sketch::{derive_fingerprint, CardinalityEstimator};

fn observe_distinct(est: &mut CardinalityEstimator, count: u64) {
    for i in 0..count {
        est.observe(derive_fingerprint(42, EntityId(1), &RaterId::from_seed(i)));
    }
}

#[test]
fn small_counts_are_close() {
    for n in [1u64, 5, 24, 100] {
        let mut est = CardinalityEstimator::new();
        observe_distinct(&mut est, n);
        let e = u64::from(est.estimate());
        let tolerance = (n / 5).max(2);
        assert!(e.abs_diff(n) <= tolerance, "n={n} estimate={e}");
    }
}

#[test]
fn large_counts_are_within_hll_error() {
    let n = 5_000u64;
    let mut est = CardinalityEstimator::new();
    observe_distinct(&mut est, n);
    let e = u64::from(est.estimate());
    // Standard error at m = 256 is ~6.5%; allow four sigma.
    assert!(e.abs_diff(n) <= n * 26 / 100, "estimate={e}");
}

#[test]
fn repeated_fingerprints_do_not_move_estimate() {
    let mut est = CardinalityEstimator::new();
    observe_distinct(&mut est, 50);
    let before = est.clone();
    let estimate = est.estimate();
    observe_distinct(&mut est, 50);
    assert_eq!(est, before);
    assert_eq!(est.estimate(), estimate);
}

#[test]
fn merge_is_per_register_max() {
    let mut a = CardinalityEstimator::new();
    let mut b = CardinalityEstimator::new();
    observe_distinct(&mut a, 30);
    for i in 30..60 {
        b.observe(derive_fingerprint(42, EntityId(1), &RaterId::from_seed(i)));
    }
    let mut merged = a.clone();
    merged.merge(&b);
    for i in 0..256 {
        assert_eq!(merged.registers()[i], a.registers()[i].max(b.registers()[i]));
    }
    assert!(merged.estimate() >= a.estimate());
}

#[test]
fn estimate_never_exceeds_ceiling() {
    let mut est = CardinalityEstimator::new();
    observe_distinct(&mut est, 20_000);
    assert!(est.estimate() <= ESTIMATE_CEILING);
}

#[test]
fn corrupt_registers_are_rejected() {
    let mut registers = [0u8; 256];
    registers[7] = 16;
    assert!(CardinalityEstimator::from_registers(registers).is_err());
}

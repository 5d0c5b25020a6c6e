use std::collections::HashSet;

use vouch_core::constants::FINGERPRINT_MASK;
use vouch_core::models::{EntityId, RaterId};
use vouch_sketch::{derive_fingerprint, derive_salt};

#[test]
fn fingerprints_are_entity_scoped() {
    let rater = RaterId::from_seed(11);
    let a = derive_fingerprint(1, EntityId(1), &rater);
    let b = derive_fingerprint(1, EntityId(2), &rater);
    assert_ne!(a, b);
}

#[test]
fn salt_changes_fingerprint() {
    let rater = RaterId::from_seed(11);
    assert_ne!(
        derive_fingerprint(1, EntityId(1), &rater),
        derive_fingerprint(2, EntityId(1), &rater)
    );
}

#[test]
fn fingerprints_fit_56_bits_and_rarely_collide() {
    let mut seen = HashSet::new();
    for i in 0..10_000 {
        let fp = derive_fingerprint(99, EntityId(5), &RaterId::from_seed(i));
        assert_eq!(fp.value() & !FINGERPRINT_MASK, 0);
        seen.insert(fp);
    }
    assert_eq!(seen.len(), 10_000);
}

#[test]
fn salt_is_reproducible() {
    let rater = RaterId::from_seed(3);
    assert_eq!(
        derive_salt(EntityId(8), &rater, 1_000),
        derive_salt(EntityId(8), &rater, 1_000)
    );
    assert_ne!(
        derive_salt(EntityId(8), &rater, 1_000),
        derive_salt(EntityId(8), &rater, 1_001)
    );
}

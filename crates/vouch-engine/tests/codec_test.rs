use vouch_core::models::{EntityId, FeedbackInput, RaterId, RevokeInput, SealHash};
use vouch_core::VouchError;
use vouch_engine::{decode, encode, EntityStats, ReputationEngine, RECORD_LEN};

const ENTITY: EntityId = EntityId(77);

fn busy_record() -> EntityStats {
    let engine = ReputationEngine::default();
    for i in 0..40u64 {
        engine
            .ingest(&FeedbackInput {
                entity: ENTITY,
                rater: RaterId::from_seed(i % 30),
                score: (i * 13 % 101) as u8,
                sequence_index: i + 1,
                time_marker: 50_000 + i * 100,
                seal: SealHash([i as u8; 32]),
            })
            .unwrap();
    }
    engine
        .revoke(&RevokeInput {
            entity: ENTITY,
            rater: RaterId::from_seed(29),
            sequence_index: 30,
            time_marker: 60_000,
            claimed_seal: SealHash([29; 32]),
        })
        .unwrap();
    engine.record(ENTITY).unwrap().unwrap()
}

#[test]
fn busy_record_survives_encoding() {
    let record = busy_record();
    let bytes = encode(&record);
    assert_eq!(decode(&bytes).unwrap(), record);
}

#[test]
fn size_does_not_depend_on_history() {
    let fresh = EntityStats::new(ENTITY, 1, 0);
    assert_eq!(encode(&fresh).len(), RECORD_LEN);
    assert_eq!(encode(&busy_record()).len(), RECORD_LEN);
    assert_eq!(decode(&encode(&fresh)).unwrap(), fresh);
}

#[test]
fn wrong_length_is_rejected() {
    let bytes = encode(&busy_record());
    assert!(matches!(decode(&bytes[..RECORD_LEN - 1]), Err(VouchError::Codec(_))));
    let mut long = bytes.to_vec();
    long.push(0);
    assert!(decode(&long).is_err());
}

#[test]
fn unknown_version_is_rejected() {
    let mut bytes = encode(&busy_record());
    bytes[0] = 2;
    assert!(matches!(decode(&bytes), Err(VouchError::Codec(_))));
}

#[test]
fn out_of_range_cached_values_are_rejected() {
    let mut record = busy_record();
    record.quality = 20_000;
    assert!(decode(&encode(&record)).is_err());

    let mut record = busy_record();
    record.last_score = 101;
    assert!(decode(&encode(&record)).is_err());
}

#[test]
fn corrupt_slot_score_is_rejected() {
    let mut bytes = encode(&busy_record());
    // First ring slot word starts after version, entity, salt, registers and the bitmap.
    let offset = 1 + 8 + 8 + 128 + 4;
    bytes[offset] = 0xfe;
    assert!(matches!(decode(&bytes), Err(VouchError::Codec(_))));
}

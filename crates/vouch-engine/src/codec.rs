//! Fixed-size binary encoding of [`EntityStats`].
//!
//! Every record encodes to exactly [`RECORD_LEN`] bytes no matter how much
//! history the entity has. Integers are little-endian. Registers are packed
//! two per byte. Ring and bypass slots are packed into one word each, plus
//! their sequence index and write time, with an occupancy bitmap in front.
//!
//! Decoding re-checks every bound the engine relies on and reports
//! violations as [`VouchError::Codec`].

use vouch_core::constants::{
    BYPASS_CAPACITY, CONFIDENCE_MAX, QUALITY_MAX, REGISTER_COUNT, RING_CAPACITY, RISK_MAX,
    SCORE_MAX,
};
use vouch_core::models::{DigestHeads, EntityId, TrustTier};
use vouch_core::{VouchError, VouchResult};
use vouch_digest::DigestChain;
use vouch_sketch::{CardinalityEstimator, RecencyBuffer, Slot};
use vouch_stats::{StreamingStats, TierMachine};

use crate::record::EntityStats;

pub const RECORD_VERSION: u8 = 1;

const SLOT_LEN: usize = 24;
const NO_CANDIDATE: u8 = 0xff;

/// Encoded size of one record.
pub const RECORD_LEN: usize = 1 // version
    + 8 + 8 // entity, salt
    + REGISTER_COUNT / 2
    + 4 + RING_CAPACITY * SLOT_LEN + 1 + 8 // ring bitmap, slots, cursor, base time
    + 2 + BYPASS_CAPACITY * SLOT_LEN + 1 + 1 // bypass bitmap, slots, cursor, window count
    + 4 * 4 + 1 + 3 + 4 + 4 // emas, arrival flag, pressures + loyalty, peak, drawdown
    + 1 + 1 + 8 // tier confirmed, candidate, candidate epoch
    + 3 * 32 // digest heads
    + 4 + 3 // quality, risk, confidence, diversity
    + 4 * 3 // feedback, revoked, response counts
    + 4 // min, max, first, last score
    + 4 + 8 + 8 + 8; // epoch count, current epoch, first and last seen

pub fn encode(record: &EntityStats) -> [u8; RECORD_LEN] {
    let mut out = [0u8; RECORD_LEN];
    let mut w = Writer::new(&mut out);

    w.u8(RECORD_VERSION);
    w.u64(record.entity.0);
    w.u64(record.salt);

    for pair in record.registers.registers().chunks(2) {
        w.u8((pair[0] & 0x0f) | (pair[1] << 4));
    }

    let ring = record.recency.ring();
    w.u32(occupancy(ring) as u32);
    for slot in ring {
        w.slot(slot);
    }
    w.u8(record.recency.eviction_cursor());
    w.u64(record.recency.ring_base_time());

    let bypass = record.recency.bypass();
    w.u16(occupancy(bypass) as u16);
    for slot in bypass {
        w.slot(slot);
    }
    w.u8(record.recency.bypass_cursor());
    w.u8(record.recency.bypass_window_count());

    let s = &record.stats;
    w.u32(s.ema_fast);
    w.u32(s.ema_slow);
    w.u32(s.ema_volatility);
    w.u32(s.ema_arrival);
    w.u8(u8::from(s.arrival_seeded));
    w.u8(s.burst_pressure);
    w.u8(s.neg_pressure);
    w.u8(s.loyalty_score);
    w.u32(s.peak_ema);
    w.u32(s.max_drawdown);

    w.u8(record.tier.confirmed().as_u8());
    w.u8(record.tier.candidate().map_or(NO_CANDIDATE, TrustTier::as_u8));
    w.u64(record.tier.candidate_epoch());

    let heads = record.digests.heads();
    w.bytes(&heads.feedback);
    w.bytes(&heads.revoke);
    w.bytes(&heads.response);

    w.u32(record.quality);
    w.u8(record.risk);
    w.u8(record.confidence);
    w.u8(record.diversity);

    w.u32(record.feedback_count);
    w.u32(record.revoked_count);
    w.u32(record.response_count);
    w.u8(record.min_score);
    w.u8(record.max_score);
    w.u8(record.first_score);
    w.u8(record.last_score);
    w.u32(record.epoch_count);
    w.u64(record.current_epoch);
    w.u64(record.first_seen_time);
    w.u64(record.last_seen_time);

    out
}

pub fn decode(bytes: &[u8]) -> VouchResult<EntityStats> {
    if bytes.len() != RECORD_LEN {
        return Err(VouchError::Codec(format!(
            "record is {} bytes, expected {RECORD_LEN}",
            bytes.len()
        )));
    }
    let mut r = Reader::new(bytes);

    let version = r.u8()?;
    if version != RECORD_VERSION {
        return Err(VouchError::Codec(format!(
            "unsupported record version {version}"
        )));
    }
    let entity = EntityId(r.u64()?);
    let salt = r.u64()?;

    let mut registers = [0u8; REGISTER_COUNT];
    for pair in registers.chunks_mut(2) {
        let byte = r.u8()?;
        pair[0] = byte & 0x0f;
        pair[1] = byte >> 4;
    }
    let registers = CardinalityEstimator::from_registers(registers)?;

    let ring_bits = u64::from(r.u32()?);
    let mut ring = [None; RING_CAPACITY];
    for (i, slot) in ring.iter_mut().enumerate() {
        *slot = r.slot(ring_bits & (1 << i) != 0)?;
    }
    let eviction_cursor = r.u8()?;
    let ring_base_time = r.u64()?;

    let bypass_bits = u64::from(r.u16()?);
    let mut bypass = [None; BYPASS_CAPACITY];
    for (i, slot) in bypass.iter_mut().enumerate() {
        *slot = r.slot(bypass_bits & (1 << i) != 0)?;
    }
    let bypass_cursor = r.u8()?;
    let bypass_window_count = r.u8()?;
    let recency = RecencyBuffer::from_parts(
        ring,
        eviction_cursor,
        ring_base_time,
        bypass,
        bypass_cursor,
        bypass_window_count,
    )?;

    let stats = StreamingStats {
        ema_fast: r.u32()?,
        ema_slow: r.u32()?,
        ema_volatility: r.u32()?,
        ema_arrival: r.u32()?,
        arrival_seeded: r.u8()? != 0,
        burst_pressure: r.u8()?,
        neg_pressure: r.u8()?,
        loyalty_score: r.u8()?,
        peak_ema: r.u32()?,
        max_drawdown: r.u32()?,
    };

    let confirmed = tier_from(r.u8()?)?;
    let candidate = match r.u8()? {
        NO_CANDIDATE => None,
        raw => Some(tier_from(raw)?),
    };
    let tier = TierMachine::from_parts(confirmed, candidate, r.u64()?);

    let digests = DigestChain::from_heads(DigestHeads {
        feedback: r.array()?,
        revoke: r.array()?,
        response: r.array()?,
    });

    let record = EntityStats {
        entity,
        salt,
        registers,
        recency,
        stats,
        tier,
        digests,
        quality: r.u32()?,
        risk: r.u8()?,
        confidence: r.u8()?,
        diversity: r.u8()?,
        feedback_count: r.u32()?,
        revoked_count: r.u32()?,
        response_count: r.u32()?,
        min_score: r.u8()?,
        max_score: r.u8()?,
        first_score: r.u8()?,
        last_score: r.u8()?,
        epoch_count: r.u32()?,
        current_epoch: r.u64()?,
        first_seen_time: r.u64()?,
        last_seen_time: r.u64()?,
    };
    check_bounds(&record)?;
    Ok(record)
}

fn check_bounds(record: &EntityStats) -> VouchResult<()> {
    let scores = [
        record.min_score,
        record.max_score,
        record.first_score,
        record.last_score,
    ];
    if scores.iter().any(|&s| s > SCORE_MAX)
        || record.quality > QUALITY_MAX
        || record.risk > RISK_MAX
        || record.confidence > CONFIDENCE_MAX
    {
        return Err(VouchError::Codec(format!(
            "entity {} has a cached value out of range",
            record.entity
        )));
    }
    Ok(())
}

fn tier_from(raw: u8) -> VouchResult<TrustTier> {
    TrustTier::from_u8(raw).ok_or_else(|| VouchError::Codec(format!("unknown tier byte {raw}")))
}

fn occupancy(slots: &[Option<Slot>]) -> u64 {
    slots
        .iter()
        .enumerate()
        .filter(|(_, s)| s.is_some())
        .fold(0, |bits, (i, _)| bits | (1 << i))
}

struct Writer<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Writer<'a> {
    fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn bytes(&mut self, data: &[u8]) {
        self.buf[self.pos..self.pos + data.len()].copy_from_slice(data);
        self.pos += data.len();
    }

    fn u8(&mut self, v: u8) {
        self.bytes(&[v]);
    }

    fn u16(&mut self, v: u16) {
        self.bytes(&v.to_le_bytes());
    }

    fn u32(&mut self, v: u32) {
        self.bytes(&v.to_le_bytes());
    }

    fn u64(&mut self, v: u64) {
        self.bytes(&v.to_le_bytes());
    }

    fn slot(&mut self, slot: &Option<Slot>) {
        match slot {
            Some(s) => {
                self.u64(s.pack());
                self.u64(s.sequence_index);
                self.u64(s.written_at);
            }
            None => self.bytes(&[0u8; SLOT_LEN]),
        }
    }
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn array<const N: usize>(&mut self) -> VouchResult<[u8; N]> {
        let end = self.pos + N;
        let chunk = self
            .buf
            .get(self.pos..end)
            .ok_or_else(|| VouchError::Codec("record truncated".to_string()))?;
        let mut out = [0u8; N];
        out.copy_from_slice(chunk);
        self.pos = end;
        Ok(out)
    }

    fn u8(&mut self) -> VouchResult<u8> {
        Ok(self.array::<1>()?[0])
    }

    fn u16(&mut self) -> VouchResult<u16> {
        Ok(u16::from_le_bytes(self.array()?))
    }

    fn u32(&mut self) -> VouchResult<u32> {
        Ok(u32::from_le_bytes(self.array()?))
    }

    fn u64(&mut self) -> VouchResult<u64> {
        Ok(u64::from_le_bytes(self.array()?))
    }

    fn slot(&mut self, occupied: bool) -> VouchResult<Option<Slot>> {
        let word = self.u64()?;
        let sequence_index = self.u64()?;
        let written_at = self.u64()?;
        if occupied {
            Slot::unpack(word, sequence_index, written_at).map(Some)
        } else {
            Ok(None)
        }
    }
}

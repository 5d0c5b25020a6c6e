//! Recency ring with residency-guarded eviction.
//!
//! The ring keeps the last [`RING_CAPACITY`] distinct fingerprints so their
//! feedback can still be revoked. Once it is full, the slot under the
//! eviction cursor is replaced only if the current residency window is older
//! than `mrt_min_secs`, or if the window has already absorbed
//! `mrt_max_bypass` writes into the bypass list. Otherwise the write goes to
//! the bypass list and the ring is left alone. An attacker flooding the ring
//! with fresh identities can therefore shield at most `mrt_max_bypass`
//! writes per window from normal eviction.
//!
//! A forced eviction (bypass cap reached) keeps the current window; only an
//! eviction after the residency time has elapsed opens a new window.
//!
//! A slot remembers the sequence index of its latest write. Revoking an
//! older index of the same rater finds nothing.

use vouch_core::config::RingConfig;
use vouch_core::constants::{BYPASS_CAPACITY, FINGERPRINT_MASK, RING_CAPACITY, SCORE_MAX};
use vouch_core::fixed::avg_round_half_up;
use vouch_core::models::{Fingerprint, Placement};
use vouch_core::{VouchError, VouchResult};

/// One remembered write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub fingerprint: Fingerprint,
    pub score: u8,
    pub revoked: bool,
    /// Sequence index of the latest write to this slot.
    pub sequence_index: u64,
    /// Time marker of the latest write to this slot.
    pub written_at: u64,
}

impl Slot {
    /// Pack `{fingerprint:56, score:7, revoked:1}` into one word.
    pub fn pack(&self) -> u64 {
        (self.fingerprint.value() << 8) | (u64::from(self.score & 0x7f) << 1) | u64::from(self.revoked)
    }

    /// Inverse of [`Slot::pack`].
    pub fn unpack(word: u64, sequence_index: u64, written_at: u64) -> VouchResult<Self> {
        let score = ((word >> 1) & 0x7f) as u8;
        if score > SCORE_MAX {
            return Err(VouchError::Codec(format!("slot score {score} exceeds {SCORE_MAX}")));
        }
        Ok(Self {
            fingerprint: Fingerprint::new((word >> 8) & FINGERPRINT_MASK),
            score,
            revoked: word & 1 == 1,
            sequence_index,
            written_at,
        })
    }
}

/// Where a resident fingerprint lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotLocation {
    Ring(usize),
    Bypass(usize),
}

/// Result of [`RecencyBuffer::write`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOutcome {
    pub placement: Placement,
    /// The slot as it was before an in-place overwrite.
    pub previous: Option<Slot>,
}

/// Result of [`RecencyBuffer::revoke`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevokeLookup {
    Revoked { score: u8, location: SlotLocation },
    AlreadyRevoked,
    NotFound,
}

/// Fixed-size recency ring plus bypass overflow list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecencyBuffer {
    ring: [Option<Slot>; RING_CAPACITY],
    eviction_cursor: u8,
    ring_base_time: u64,
    bypass: [Option<Slot>; BYPASS_CAPACITY],
    bypass_cursor: u8,
    /// Bypass writes in the current residency window.
    bypass_window_count: u8,
}

impl RecencyBuffer {
    /// Empty buffer whose first residency window opens at `base_time`.
    pub fn new(base_time: u64) -> Self {
        Self {
            ring: [None; RING_CAPACITY],
            eviction_cursor: 0,
            ring_base_time: base_time,
            bypass: [None; BYPASS_CAPACITY],
            bypass_cursor: 0,
            bypass_window_count: 0,
        }
    }

    /// Rebuild from persisted parts, checking cursor and count bounds.
    pub fn from_parts(
        ring: [Option<Slot>; RING_CAPACITY],
        eviction_cursor: u8,
        ring_base_time: u64,
        bypass: [Option<Slot>; BYPASS_CAPACITY],
        bypass_cursor: u8,
        bypass_window_count: u8,
    ) -> VouchResult<Self> {
        if usize::from(eviction_cursor) >= RING_CAPACITY
            || usize::from(bypass_cursor) >= BYPASS_CAPACITY
            || usize::from(bypass_window_count) > BYPASS_CAPACITY
        {
            return Err(VouchError::Codec("recency cursor out of range".to_string()));
        }
        Ok(Self {
            ring,
            eviction_cursor,
            ring_base_time,
            bypass,
            bypass_cursor,
            bypass_window_count,
        })
    }

    pub fn ring(&self) -> &[Option<Slot>; RING_CAPACITY] {
        &self.ring
    }

    pub fn bypass(&self) -> &[Option<Slot>; BYPASS_CAPACITY] {
        &self.bypass
    }

    pub fn eviction_cursor(&self) -> u8 {
        self.eviction_cursor
    }

    pub fn ring_base_time(&self) -> u64 {
        self.ring_base_time
    }

    pub fn bypass_cursor(&self) -> u8 {
        self.bypass_cursor
    }

    pub fn bypass_window_count(&self) -> u8 {
        self.bypass_window_count
    }

    /// Occupied ring slots.
    pub fn ring_len(&self) -> usize {
        self.ring.iter().flatten().count()
    }

    /// Occupied bypass slots.
    pub fn bypass_len(&self) -> usize {
        self.bypass.iter().flatten().count()
    }

    /// Locate a resident fingerprint, ring first.
    pub fn find(&self, fingerprint: Fingerprint) -> Option<SlotLocation> {
        if let Some(i) = position(&self.ring, fingerprint) {
            return Some(SlotLocation::Ring(i));
        }
        position(&self.bypass, fingerprint).map(SlotLocation::Bypass)
    }

    pub fn slot(&self, location: SlotLocation) -> Option<&Slot> {
        match location {
            SlotLocation::Ring(i) => self.ring.get(i).and_then(Option::as_ref),
            SlotLocation::Bypass(i) => self.bypass.get(i).and_then(Option::as_ref),
        }
    }

    /// Record write `sequence_index` of `score` by `fingerprint` at time `now`.
    pub fn write(
        &mut self,
        fingerprint: Fingerprint,
        score: u8,
        sequence_index: u64,
        now: u64,
        policy: &RingConfig,
    ) -> WriteOutcome {
        let fresh = Slot {
            fingerprint,
            score,
            revoked: false,
            sequence_index,
            written_at: now,
        };

        // Resident: overwrite in place, cursors untouched.
        if let Some(location) = self.find(fingerprint) {
            let (slot, placement) = match location {
                SlotLocation::Ring(i) => (&mut self.ring[i], Placement::RingOverwrite),
                SlotLocation::Bypass(i) => (&mut self.bypass[i], Placement::BypassOverwrite),
            };
            let previous = slot.replace(fresh);
            return WriteOutcome {
                placement,
                previous,
            };
        }

        if let Some(free) = self.ring.iter().position(Option::is_none) {
            self.ring[free] = Some(fresh);
            self.eviction_cursor = next_index(free, RING_CAPACITY);
            return WriteOutcome {
                placement: Placement::RingInsert,
                previous: None,
            };
        }

        let window_elapsed = now.saturating_sub(self.ring_base_time) >= policy.mrt_min_secs;
        let bypass_exhausted = self.bypass_window_count >= policy.mrt_max_bypass;

        if window_elapsed || bypass_exhausted {
            let cursor = usize::from(self.eviction_cursor);
            let evicted = self.ring[cursor]
                .replace(fresh)
                .map(|s| s.fingerprint)
                .unwrap_or(fingerprint);
            self.eviction_cursor = next_index(cursor, RING_CAPACITY);
            if window_elapsed {
                self.ring_base_time = now;
                self.bypass_window_count = 0;
            }
            return WriteOutcome {
                placement: Placement::RingEvict { evicted },
                previous: None,
            };
        }

        let cursor = usize::from(self.bypass_cursor);
        self.bypass[cursor] = Some(fresh);
        self.bypass_cursor = next_index(cursor, BYPASS_CAPACITY);
        self.bypass_window_count = self.bypass_window_count.saturating_add(1);
        WriteOutcome {
            placement: Placement::Bypass,
            previous: None,
        }
    }

    /// Mark a resident fingerprint's write as revoked, provided it is still
    /// write `sequence_index`.
    pub fn revoke(&mut self, fingerprint: Fingerprint, sequence_index: u64) -> RevokeLookup {
        let Some(location) = self.find(fingerprint) else {
            return RevokeLookup::NotFound;
        };
        let slot = match location {
            SlotLocation::Ring(i) => self.ring[i].as_mut(),
            SlotLocation::Bypass(i) => self.bypass[i].as_mut(),
        };
        match slot {
            Some(slot) if slot.sequence_index != sequence_index => RevokeLookup::NotFound,
            Some(slot) if slot.revoked => RevokeLookup::AlreadyRevoked,
            Some(slot) => {
                slot.revoked = true;
                RevokeLookup::Revoked {
                    score: slot.score,
                    location,
                }
            }
            None => RevokeLookup::NotFound,
        }
    }

    /// Round-half-up mean of the scores that are resident and not revoked.
    pub fn live_mean(&self) -> Option<u8> {
        let mut scores = [0u8; RING_CAPACITY + BYPASS_CAPACITY];
        let mut n = 0;
        for slot in self.ring.iter().chain(self.bypass.iter()).flatten() {
            if !slot.revoked {
                scores[n] = slot.score;
                n += 1;
            }
        }
        avg_round_half_up(&scores[..n])
    }
}

fn position(slots: &[Option<Slot>], fingerprint: Fingerprint) -> Option<usize> {
    slots
        .iter()
        .position(|s| matches!(s, Some(slot) if slot.fingerprint == fingerprint))
}

fn next_index(index: usize, capacity: usize) -> u8 {
    ((index + 1) % capacity) as u8
}

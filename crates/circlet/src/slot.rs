//! Owning-or-empty atomic cell for a single resource record.
//!
//! A whole record packs into one `AtomicU64`: bit 63 is the occupancy bit,
//! bits 62 and 61 carry the `restricted` and `in_use` flags, and the low
//! 32 bits hold the checkout counter in two's complement. The all-zero
//! word is the empty sentinel; every occupied encoding has bit 63 set, so
//! no record collides with it. One atomic load therefore yields a
//! consistent snapshot of the slot, and replacing the record wholesale is
//! a single store.

use std::sync::atomic::{AtomicU64, Ordering};

const OCCUPIED: u64 = 1 << 63;
const RESTRICTED: u64 = 1 << 62;
const IN_USE: u64 = 1 << 61;
const COUNTER_MASK: u64 = u32::MAX as u64;

/// A slot holding this word has its record checked out.
const EMPTY: u64 = 0;

/// Decoded contents of an occupied slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Record {
    pub restricted: bool,
    pub in_use: bool,
    pub counter: i32,
}

fn encode(record: Record) -> u64 {
    let mut word = OCCUPIED | u64::from(record.counter as u32);
    if record.restricted {
        word |= RESTRICTED;
    }
    if record.in_use {
        word |= IN_USE;
    }
    word
}

fn decode(word: u64) -> Option<Record> {
    if word & OCCUPIED == 0 {
        return None;
    }
    Some(Record {
        restricted: word & RESTRICTED != 0,
        in_use: word & IN_USE != 0,
        counter: (word & COUNTER_MASK) as u32 as i32,
    })
}

/// One owning-or-empty cell. Empty doubles as the lock: while the slot is
/// empty, the caller who emptied it holds the only copy of the record.
#[derive(Debug)]
pub(crate) struct Slot {
    word: AtomicU64,
}

impl Slot {
    pub(crate) fn occupied(record: Record) -> Self {
        Self { word: AtomicU64::new(encode(record)) }
    }

    /// Snapshot of the slot, `None` while the record is checked out.
    pub(crate) fn load(&self) -> Option<Record> {
        decode(self.word.load(Ordering::Acquire))
    }

    /// Swap the observed record for the empty sentinel.
    ///
    /// Fails when the slot no longer holds `observed`; the caller re-reads
    /// and decides whether to try again.
    pub(crate) fn take(&self, observed: Record) -> bool {
        self.word
            .compare_exchange(encode(observed), EMPTY, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Store a record into an empty slot.
    ///
    /// Refuses when the slot is occupied. This path needs no compare and
    /// swap: only the holder of the checked-out record can be filling the
    /// slot, so between the emptiness check and the store nobody else may
    /// write here.
    pub(crate) fn put_back(&self, record: Record) -> bool {
        if self.word.load(Ordering::Acquire) != EMPTY {
            return false;
        }
        self.word.store(encode(record), Ordering::Release);
        true
    }
}

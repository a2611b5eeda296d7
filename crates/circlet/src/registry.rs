//! The checkout registry: a fixed array of independently lock-free slots.

use thiserror::Error;

use crate::checkout::Checkout;
use crate::slot::{Record, Slot};

/// Error from [`Registry::acquire`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AcquireError {
    #[error("slot {id} is out of range, registry holds {slots} slots")]
    OutOfRange { id: usize, slots: usize },
}

/// Fixed collection of loanable resources, one per slot.
///
/// Every slot is an owning-or-empty atomic cell:
/// - occupied: the resource is on the shelf and its record is readable in
///   a single atomic load
/// - empty: the resource is checked out and the caller who emptied the
///   slot holds the only copy of its record
///
/// Emptiness is the whole locking story. [`acquire`](Registry::acquire)
/// swaps a record out under a compare and swap; [`release`](Registry::release)
/// fills an empty slot back in with a plain store. No operation blocks, and
/// contention costs nothing but retries on the contended slot.
#[derive(Debug)]
pub struct Registry {
    slots: Vec<Slot>,
}

impl Registry {
    /// Create a registry of `slots` resources, every slot occupied by a
    /// restricted, not-in-use record with a zero checkout counter.
    pub fn new(slots: usize) -> Self {
        let slots = (0..slots)
            .map(|_| Slot::occupied(Record { restricted: true, in_use: false, counter: 0 }))
            .collect();
        Self { slots }
    }

    /// Try to check out the resource in slot `id` under the given access
    /// class.
    ///
    /// Returns `Ok(None)` when the slot is already checked out or when
    /// `restricted` does not match the record's access class; a mismatch
    /// leaves the slot untouched. An `id` outside the registry is an
    /// error, not a miss.
    ///
    /// Losing the swap race to a concurrent caller retries against the
    /// fresh slot contents. The call never blocks, but it has no bounded
    /// step count while the slot keeps changing under it.
    pub fn acquire(&self, id: usize, restricted: bool) -> Result<Option<Checkout>, AcquireError> {
        let slot = self
            .slots
            .get(id)
            .ok_or(AcquireError::OutOfRange { id, slots: self.slots.len() })?;

        loop {
            let Some(observed) = slot.load() else {
                // Checked out, possibly by a caller who beat us to the swap.
                return Ok(None);
            };
            if observed.restricted != restricted {
                return Ok(None);
            }
            if slot.take(observed) {
                let held = Record { counter: observed.counter + 1, ..observed };
                tracing::debug!(slot = id, counter = held.counter, "resource checked out");
                return Ok(Some(Checkout::new(id, held)));
            }
        }
    }

    /// Return a previously acquired resource to its slot.
    ///
    /// The checkout is consumed either way. Returns `false` when the slot
    /// is already occupied or the checkout does not address this registry;
    /// the record is discarded in that case and the registry is left
    /// untouched.
    pub fn release(&self, mut checkout: Checkout) -> bool {
        checkout.reconcile();

        let id = checkout.id();
        let Some(slot) = self.slots.get(id) else {
            tracing::warn!(slot = id, "release refused, checkout does not address this registry");
            return false;
        };

        let record = checkout.record();
        let returned = Record { counter: record.counter - 1, ..record };
        if !slot.put_back(returned) {
            tracing::warn!(slot = id, "release refused, slot already occupied");
            return false;
        }
        tracing::debug!(slot = id, counter = returned.counter, "resource returned");
        true
    }

    /// Number of resources currently checked out, counted as empty slots.
    ///
    /// Each slot is read atomically but the scan as a whole is not a
    /// snapshot; under concurrent traffic the result is advisory.
    pub fn outstanding_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.load().is_none()).count()
    }

    /// Sum of the checkout counters of all occupied slots.
    ///
    /// Counters of checked-out records travel with their holders and are
    /// invisible here, so a registry with every resource returned sums to
    /// zero. Advisory under concurrent traffic, like
    /// [`outstanding_count`](Registry::outstanding_count).
    pub fn theft_counter_sum(&self) -> i64 {
        self.slots
            .iter()
            .filter_map(Slot::load)
            .map(|record| i64::from(record.counter))
            .sum()
    }

    /// Capacity of the registry, fixed at construction.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

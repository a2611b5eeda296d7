//! The held side of a checkout.
//!
//! A successful acquire empties the slot and hands the caller the record
//! wrapped in a [`Checkout`]. The wrapper is the only copy in circulation:
//! it cannot be cloned, and release consumes it by value, so a reconciled
//! checkout cannot be replayed.

use crate::slot::Record;

/// Exclusive hold on one checked-out resource.
///
/// Produced by [`Registry::acquire`](crate::Registry::acquire) and consumed
/// by [`Registry::release`](crate::Registry::release). Dropping a checkout
/// without releasing it leaves its slot permanently outstanding.
#[must_use = "a dropped checkout leaves its slot outstanding; pass it to Registry::release"]
#[derive(Debug)]
pub struct Checkout {
    id: usize,
    record: Record,
    reconciled: bool,
}

impl Checkout {
    pub(crate) fn new(id: usize, record: Record) -> Self {
        Self { id, record, reconciled: false }
    }

    /// Slot this resource belongs to.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Access class of the resource, fixed at registry construction.
    pub fn restricted(&self) -> bool {
        self.record.restricted
    }

    /// Informational flag carried on the record. Never gates any operation.
    pub fn in_use(&self) -> bool {
        self.record.in_use
    }

    /// Net unreconciled checkouts of this resource, this one included. A
    /// first-time checkout of a fresh registry reads 1.
    pub fn checkout_counter(&self) -> i32 {
        self.record.counter
    }

    pub(crate) fn record(&self) -> Record {
        self.record
    }

    /// Mark the checkout as adjudicated by a release so `Drop` stays quiet.
    pub(crate) fn reconcile(&mut self) {
        self.reconciled = true;
    }
}

impl Drop for Checkout {
    fn drop(&mut self) {
        if !self.reconciled {
            tracing::warn!(
                slot = self.id,
                "checkout dropped without release; the slot stays outstanding"
            );
        }
    }
}

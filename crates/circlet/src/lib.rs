//! Lock-free checkout registry for a fixed collection of loanable
//! resources.
//!
//! A [`Registry`] holds one resource record per slot. Checking a resource
//! out empties its slot in a single compare and swap; the emptiness is the
//! lock, and the caller walks away with the only copy of the record as a
//! [`Checkout`]. Returning the checkout fills the slot back in. No slot
//! shares state with any other, so independent slots never contend.
//!
//! ```
//! use circlet::Registry;
//!
//! let registry = Registry::new(3);
//!
//! let checkout = registry.acquire(0, true)?.expect("slot 0 starts occupied");
//! assert_eq!(registry.outstanding_count(), 1);
//! assert!(registry.acquire(0, true)?.is_none());
//!
//! assert!(registry.release(checkout));
//! assert_eq!(registry.outstanding_count(), 0);
//! # Ok::<(), circlet::AcquireError>(())
//! ```

mod checkout;
mod registry;
mod slot;

pub use checkout::Checkout;
pub use registry::{AcquireError, Registry};

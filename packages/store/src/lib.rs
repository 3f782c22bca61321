//! A concurrent positional store with typed string indices.
//!
//! [`IndexedStore`] keeps owned elements in slots addressed by position. On
//! top of the slots sit two dense indices, one for narrow strings and one for
//! wide strings, so the n-th string still present can be found by its logical
//! number. Shift-erasing a slot renumbers both indices; no-shift erasing only
//! empties the slot.
//!
//! All arrays grow by doubling from a base of 4 and can be capped with a
//! [`StoreConfig`]. A growth failure leaves the store exactly as it was.

mod capacity;
mod config;
mod element;
mod error;
mod guard;
mod invariant;
mod state;
mod store;

pub use capacity::{next_capacity, BASE_CAPACITY};
pub use config::{
    StoreConfig, ENV_INITIAL_CAPACITY, ENV_SLOT_LIMIT, ENV_STR_LIMIT, ENV_WIDE_LIMIT,
};
pub use element::{Element, ElementKind};
pub use error::{ArrayKind, ConfigError, Rejected, StoreError};
pub use guard::StoreGuard;
pub use invariant::{InvariantMode, INVARIANT_MODE};
pub use store::IndexedStore;

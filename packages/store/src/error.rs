//! Error types for the store.

use std::collections::TryReserveError;
use std::fmt;

/// Which of the three backing arrays an operation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayKind {
    /// The primary array of payload slots.
    Slots,
    /// Positions of narrow-string entries.
    StrIndex,
    /// Positions of wide-string entries.
    WideIndex,
}

impl fmt::Display for ArrayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayKind::Slots => write!(f, "slot array"),
            ArrayKind::StrIndex => write!(f, "string index"),
            ArrayKind::WideIndex => write!(f, "wide-string index"),
        }
    }
}

/// Growth failures.
///
/// Whenever one of these is returned the store is exactly as it was before
/// the call.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Growing would pass the ceiling set in `StoreConfig`.
    #[error("{array} needs capacity {requested}, limit is {limit}")]
    CapacityExceeded {
        array: ArrayKind,
        requested: usize,
        limit: usize,
    },

    /// The allocator refused to grow the array.
    #[error("{array} allocation failed")]
    AllocationFailed {
        array: ArrayKind,
        #[source]
        source: TryReserveError,
    },

    /// Doubling the capacity overflowed `usize`.
    #[error("{array} capacity overflow")]
    CapacityOverflow { array: ArrayKind },
}

impl StoreError {
    /// The array whose growth failed.
    pub fn array(&self) -> ArrayKind {
        match self {
            StoreError::CapacityExceeded { array, .. }
            | StoreError::AllocationFailed { array, .. }
            | StoreError::CapacityOverflow { array } => *array,
        }
    }
}

/// A generic insert that failed, handing the payload back to the caller.
#[derive(thiserror::Error)]
#[error("payload rejected: {error}")]
pub struct Rejected<T> {
    payload: T,
    #[source]
    error: StoreError,
}

impl<T> Rejected<T> {
    pub(crate) fn new(payload: T, error: StoreError) -> Self {
        Self { payload, error }
    }

    pub fn error(&self) -> &StoreError {
        &self.error
    }

    /// Recover ownership of the payload.
    pub fn into_payload(self) -> T {
        self.payload
    }

    pub fn into_parts(self) -> (T, StoreError) {
        (self.payload, self.error)
    }
}

impl<T> fmt::Debug for Rejected<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rejected")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

/// Errors loading a `StoreConfig`.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {name}")]
    InvalidValue { name: String, value: String },

    #[error("initial capacity must be at least 1")]
    ZeroInitialCapacity,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

//! Capacity Manager.
//!
//! Each backing array of the store is a [`GrowableArray`]. Capacity starts at
//! a base (4 unless configured) and doubles until it covers the request.
//! Every slot up to the capacity exists and holds `E::default()` until it is
//! written, so "empty" is always observable as the default value.
//!
//! Arrays grow independently: growing one never touches another.

use tracing::{trace, warn};

use crate::error::{ArrayKind, StoreError};
use crate::invariant::assume;

pub const BASE_CAPACITY: usize = 4;

/// Smallest doubling of `current` (or of `base` when `current` is zero) that
/// is at least `min`. `None` on overflow.
pub fn next_capacity(current: usize, base: usize, min: usize) -> Option<usize> {
    if current >= min {
        return Some(current);
    }
    let mut capacity = if current == 0 { base.max(1) } else { current };
    while capacity < min {
        capacity = capacity.checked_mul(2)?;
    }
    Some(capacity)
}

/// A contiguous array with an explicit capacity and a separate length.
///
/// `items.len()` is the capacity; positions at or past `len` are default.
#[derive(Debug)]
pub(crate) struct GrowableArray<E> {
    kind: ArrayKind,
    items: Vec<E>,
    len: usize,
    base: usize,
    limit: Option<usize>,
}

impl<E: Default> GrowableArray<E> {
    pub fn new(kind: ArrayKind, base: usize, limit: Option<usize>) -> Self {
        Self {
            kind,
            items: Vec::new(),
            len: 0,
            base,
            limit,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    /// Grow so that at least `min` elements fit.
    ///
    /// On failure nothing changes.
    pub fn ensure_capacity(&mut self, min: usize) -> Result<(), StoreError> {
        let current = self.capacity();
        if current >= min {
            return Ok(());
        }

        let mut target = next_capacity(current, self.base, min)
            .ok_or(StoreError::CapacityOverflow { array: self.kind })?;

        if let Some(limit) = self.limit {
            if min > limit {
                warn!(array = %self.kind, min, limit, "capacity limit reached");
                return Err(StoreError::CapacityExceeded {
                    array: self.kind,
                    requested: min,
                    limit,
                });
            }
            target = target.min(limit);
        }

        self.items
            .try_reserve_exact(target - current)
            .map_err(|source| {
                warn!(array = %self.kind, target, "allocation failed");
                StoreError::AllocationFailed {
                    array: self.kind,
                    source,
                }
            })?;
        self.items.resize_with(target, E::default);

        trace!(array = %self.kind, from = current, to = target, "grew backing array");
        Ok(())
    }

    /// Make room for one more element.
    pub fn reserve_one(&mut self) -> Result<(), StoreError> {
        let min = self
            .len
            .checked_add(1)
            .ok_or(StoreError::CapacityOverflow { array: self.kind })?;
        self.ensure_capacity(min)
    }

    /// Append into capacity made by a successful [`reserve_one`](Self::reserve_one).
    pub fn push_reserved(&mut self, item: E) -> usize {
        assume!(
            self.len < self.items.len(),
            "{} push past capacity {}",
            self.kind,
            self.items.len()
        );
        let at = self.len;
        self.items[at] = item;
        self.len += 1;
        at
    }

    /// Append, handing the item back if the array cannot grow.
    pub fn try_push(&mut self, item: E) -> Result<usize, (E, StoreError)> {
        match self.reserve_one() {
            Ok(()) => Ok(self.push_reserved(item)),
            Err(error) => Err((item, error)),
        }
    }

    /// Take the last element, leaving its slot default.
    pub fn pop(&mut self) -> Option<E> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(std::mem::take(&mut self.items[self.len]))
    }

    /// Take the element at `index` and shift everything after it down by one.
    /// The vacated last slot is left default.
    pub fn remove(&mut self, index: usize) -> Option<E> {
        if index >= self.len {
            return None;
        }
        let removed = std::mem::take(&mut self.items[index]);
        self.items[index..self.len].rotate_left(1);
        self.len -= 1;
        Some(removed)
    }

    /// Keep the elements for which `keep` returns true, preserving order.
    /// `keep` may modify the elements it sees.
    pub fn retain(&mut self, mut keep: impl FnMut(&mut E) -> bool) {
        let mut kept = 0;
        for i in 0..self.len {
            if keep(&mut self.items[i]) {
                self.items.swap(kept, i);
                kept += 1;
            }
        }
        for slot in &mut self.items[kept..self.len] {
            *slot = E::default();
        }
        self.len = kept;
    }

    pub fn get(&self, index: usize) -> Option<&E> {
        self.as_slice().get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut E> {
        self.items[..self.len].get_mut(index)
    }

    pub fn as_slice(&self) -> &[E] {
        &self.items[..self.len]
    }
}

//! Explicit lock ownership.
//!
//! [`IndexedStore::lock`](crate::IndexedStore::lock) returns a [`StoreGuard`].
//! While the guard lives no other thread can touch the store, so a caller can
//! run several operations as one atomic step and read elements by reference
//! instead of cloning them out.

use std::sync::MutexGuard;

use xrt_text::WideStr;

use crate::element::Element;
use crate::error::{Rejected, StoreError};
use crate::state::{Overlay, StoreState};

/// Holds the store's lock. Dropping the guard releases it.
pub struct StoreGuard<'a, T> {
    state: MutexGuard<'a, StoreState<T>>,
}

impl<'a, T> StoreGuard<'a, T> {
    pub(crate) fn new(state: MutexGuard<'a, StoreState<T>>) -> Self {
        Self { state }
    }

    pub fn insert_locked(&mut self, payload: T) -> Result<usize, Rejected<T>> {
        self.state.insert(payload)
    }

    pub fn get_locked(&self, position: usize) -> Option<&Element<T>> {
        self.state.get(position)
    }

    pub fn exists_locked(&self, position: usize) -> bool {
        self.state.exists(position)
    }

    pub fn erase_locked(&mut self, position: usize) {
        self.state.erase(position)
    }

    pub fn erase_no_shift_locked(&mut self, position: usize) {
        self.state.erase_no_shift(position)
    }

    pub fn str_insert_locked(&mut self, s: &str) -> Result<usize, StoreError> {
        self.state.str_insert(s)
    }

    pub fn str_get_locked(&self, index: usize) -> Option<&str> {
        self.state.str_get(index)
    }

    pub fn str_exists_locked(&self, index: usize) -> bool {
        self.state.str_exists(index)
    }

    pub fn str_erase_locked(&mut self, index: usize) {
        self.state.str_erase(index)
    }

    pub fn str_erase_no_shift_locked(&mut self, index: usize) {
        self.state.str_erase_no_shift(index)
    }

    pub fn wstr_insert_locked(&mut self, s: &WideStr) -> Result<usize, StoreError> {
        self.state.wstr_insert(s)
    }

    pub fn wstr_get_locked(&self, index: usize) -> Option<&WideStr> {
        self.state.wstr_get(index)
    }

    pub fn wstr_exists_locked(&self, index: usize) -> bool {
        self.state.wstr_exists(index)
    }

    pub fn wstr_erase_locked(&mut self, index: usize) {
        self.state.wstr_erase(index)
    }

    pub fn wstr_erase_no_shift_locked(&mut self, index: usize) {
        self.state.wstr_erase_no_shift(index)
    }

    /// Slot length, counting emptied slots.
    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.state.capacity()
    }

    /// Slots that currently hold an element.
    pub fn live_count(&self) -> usize {
        self.state.live_count()
    }

    pub fn str_len(&self) -> usize {
        self.state.overlay_len(Overlay::Str)
    }

    pub fn str_capacity(&self) -> usize {
        self.state.overlay_capacity(Overlay::Str)
    }

    pub fn wstr_len(&self) -> usize {
        self.state.overlay_len(Overlay::Wide)
    }

    pub fn wstr_capacity(&self) -> usize {
        self.state.overlay_capacity(Overlay::Wide)
    }

    /// Occupied slots in position order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Element<T>)> {
        self.state.iter()
    }
}

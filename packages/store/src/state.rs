//! The store's data, without synchronization.
//!
//! `StoreState` owns three independently grown arrays:
//!
//! ```text
//! slots:  [ Some(Str "A") | Some(Wide "Y") | Some(Value ..) | Some(Str "Z") ]
//! strs:   [ 0, 3 ]        logical string i  -> slot position
//! wides:  [ 1 ]           logical wide i    -> slot position
//! ```
//!
//! Every overlay entry is a position below `slots.len()`. Shift-erasing slot
//! `p` deletes any overlay entry equal to `p` and decrements every entry above
//! it, in both overlays. No-shift erase only empties the slot, so an overlay
//! entry may keep pointing at an empty slot afterwards.
//!
//! Callers hold the store mutex for the duration of every method here.

use tracing::{debug, trace};
use xrt_text::{WideStr, WideString};

use crate::capacity::GrowableArray;
use crate::config::StoreConfig;
use crate::element::Element;
use crate::error::{ArrayKind, Rejected, StoreError};
use crate::invariant::assume;

/// One of the two typed position indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Overlay {
    Str,
    Wide,
}

#[derive(Debug)]
pub(crate) struct StoreState<T> {
    slots: GrowableArray<Option<Element<T>>>,
    strs: GrowableArray<usize>,
    wides: GrowableArray<usize>,
}

impl<T> StoreState<T> {
    pub fn new(config: &StoreConfig) -> Self {
        let base = config.initial_capacity;
        Self {
            slots: GrowableArray::new(ArrayKind::Slots, base, config.slot_limit),
            strs: GrowableArray::new(ArrayKind::StrIndex, base, config.str_index_limit),
            wides: GrowableArray::new(ArrayKind::WideIndex, base, config.wide_index_limit),
        }
    }

    fn overlay(&self, which: Overlay) -> &GrowableArray<usize> {
        match which {
            Overlay::Str => &self.strs,
            Overlay::Wide => &self.wides,
        }
    }

    fn overlay_mut(&mut self, which: Overlay) -> &mut GrowableArray<usize> {
        match which {
            Overlay::Str => &mut self.strs,
            Overlay::Wide => &mut self.wides,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub fn overlay_len(&self, which: Overlay) -> usize {
        self.overlay(which).len()
    }

    pub fn overlay_capacity(&self, which: Overlay) -> usize {
        self.overlay(which).capacity()
    }

    pub fn live_count(&self) -> usize {
        self.slots.as_slice().iter().filter(|s| s.is_some()).count()
    }

    // ------------------------------------------------------------------
    // Core Store
    // ------------------------------------------------------------------

    /// Append into a slot made by a successful `slots.reserve_one()`.
    fn push_element(&mut self, element: Element<T>) -> usize {
        let position = self.slots.push_reserved(Some(element));
        trace!(position, "inserted element");
        position
    }

    pub fn insert(&mut self, payload: T) -> Result<usize, Rejected<T>> {
        if let Err(error) = self.slots.reserve_one() {
            return Err(Rejected::new(payload, error));
        }
        Ok(self.push_element(Element::Value(payload)))
    }

    pub fn get(&self, position: usize) -> Option<&Element<T>> {
        self.slots.get(position).and_then(Option::as_ref)
    }

    pub fn exists(&self, position: usize) -> bool {
        self.get(position).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Element<T>)> {
        self.slots
            .as_slice()
            .iter()
            .enumerate()
            .filter_map(|(position, slot)| slot.as_ref().map(|e| (position, e)))
    }

    /// Shift-erase slot `position`. Empty or out-of-range slots are left alone.
    pub fn erase(&mut self, position: usize) {
        if !self.exists(position) {
            return;
        }
        let removed = self.slots.remove(position);
        self.close_gap(position);
        debug!(position, kind = ?removed.flatten().map(|e| e.kind()), "erased slot");
    }

    /// Free the payload at `position` and leave the slot empty.
    pub fn erase_no_shift(&mut self, position: usize) {
        if let Some(slot) = self.slots.get_mut(position) {
            if slot.take().is_some() {
                debug!(position, "cleared slot");
            }
        }
    }

    /// Renumber both overlays after slot `position` was shifted out.
    fn close_gap(&mut self, position: usize) {
        let renumber = |entry: &mut usize| {
            if *entry == position {
                return false;
            }
            if *entry > position {
                *entry -= 1;
            }
            true
        };
        self.strs.retain(renumber);
        self.wides.retain(renumber);
    }

    // ------------------------------------------------------------------
    // Typed Index Overlay
    // ------------------------------------------------------------------

    fn typed_insert(&mut self, which: Overlay, element: Element<T>) -> Result<usize, StoreError> {
        self.slots.reserve_one()?;
        let position = self.push_element(element);

        if let Err((_, error)) = self.overlay_mut(which).try_push(position) {
            // The copy made for the slot is dropped here.
            let rolled_back = self.slots.pop();
            assume!(
                matches!(rolled_back, Some(Some(_))) && self.slots.len() == position,
                "rollback of slot {} found an inconsistent slot array",
                position
            );
            debug!(position, %error, "rolled back insert after index growth failed");
            return Err(error);
        }

        Ok(self.overlay(which).len() - 1)
    }

    /// Resolve a logical index to a slot position.
    fn resolve(&self, which: Overlay, index: usize) -> Option<usize> {
        let position = *self.overlay(which).get(index)?;
        assume!(
            position < self.slots.len(),
            "{:?} index {} points at slot {} past length {}",
            which,
            index,
            position,
            self.slots.len()
        );
        Some(position)
    }

    fn typed_exists(&self, which: Overlay, index: usize) -> bool {
        self.resolve(which, index)
            .is_some_and(|position| self.exists(position))
    }

    fn typed_erase(&mut self, which: Overlay, index: usize) {
        let Some(position) = self.resolve(which, index) else {
            return;
        };
        self.slots.remove(position);
        self.overlay_mut(which).remove(index);
        self.close_gap(position);
        debug!(?which, index, position, "erased indexed entry");
    }

    fn typed_erase_no_shift(&mut self, which: Overlay, index: usize) {
        if let Some(position) = self.resolve(which, index) {
            self.erase_no_shift(position);
        }
    }

    pub fn str_insert(&mut self, s: &str) -> Result<usize, StoreError> {
        self.typed_insert(Overlay::Str, Element::Str(s.to_owned()))
    }

    pub fn str_get(&self, index: usize) -> Option<&str> {
        self.resolve(Overlay::Str, index)
            .and_then(|position| self.get(position))
            .and_then(Element::as_str)
    }

    pub fn str_exists(&self, index: usize) -> bool {
        self.typed_exists(Overlay::Str, index)
    }

    pub fn str_erase(&mut self, index: usize) {
        self.typed_erase(Overlay::Str, index)
    }

    pub fn str_erase_no_shift(&mut self, index: usize) {
        self.typed_erase_no_shift(Overlay::Str, index)
    }

    pub fn wstr_insert(&mut self, s: &WideStr) -> Result<usize, StoreError> {
        self.typed_insert(Overlay::Wide, Element::Wide(WideString::from(s)))
    }

    pub fn wstr_get(&self, index: usize) -> Option<&WideStr> {
        self.resolve(Overlay::Wide, index)
            .and_then(|position| self.get(position))
            .and_then(Element::as_wide)
    }

    pub fn wstr_exists(&self, index: usize) -> bool {
        self.typed_exists(Overlay::Wide, index)
    }

    pub fn wstr_erase(&mut self, index: usize) {
        self.typed_erase(Overlay::Wide, index)
    }

    pub fn wstr_erase_no_shift(&mut self, index: usize) {
        self.typed_erase_no_shift(Overlay::Wide, index)
    }

    /// Every overlay entry names a slot below the slot length.
    #[cfg(test)]
    pub(crate) fn check_consistency(&self) {
        for which in [Overlay::Str, Overlay::Wide] {
            for &position in self.overlay(which).as_slice() {
                assert!(
                    position < self.slots.len(),
                    "{:?} entry {} past slot length {}",
                    which,
                    position,
                    self.slots.len()
                );
            }
        }
    }

    #[cfg(test)]
    fn overlay_positions(&self, which: Overlay) -> Vec<usize> {
        self.overlay(which).as_slice().to_vec()
    }
}

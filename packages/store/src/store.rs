use std::sync::{Mutex, MutexGuard, PoisonError};

use bytes::Bytes;
use tracing::{debug, warn};
use xrt_text::{WideStr, WideString};

use crate::config::StoreConfig;
use crate::element::Element;
use crate::error::{Rejected, StoreError};
use crate::guard::StoreGuard;
use crate::state::{Overlay, StoreState};

/// A positional store of owned elements with typed string indices.
///
/// Every method takes the store's single mutex for its whole duration, so
/// calls from different threads behave as if run one after another. To run
/// several operations as one step, take the lock with [`IndexedStore::lock`]
/// and use the `*_locked` methods on the guard. Calling any method here while
/// the same thread holds a guard deadlocks.
///
/// ```
/// use xrt_store::IndexedStore;
///
/// let store: IndexedStore = IndexedStore::new();
/// store.str_insert("A").unwrap();
/// store.str_insert("B").unwrap();
/// store.str_erase(0);
/// assert_eq!(store.str_get(0).as_deref(), Some("B"));
/// ```
#[derive(Debug)]
pub struct IndexedStore<T = Bytes> {
    state: Mutex<StoreState<T>>,
}

impl<T> Default for IndexedStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IndexedStore<T> {
    /// An empty store with no capacity allocated yet.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        debug!(?config, "created store");
        Self {
            state: Mutex::new(StoreState::new(&config)),
        }
    }

    fn state(&self) -> MutexGuard<'_, StoreState<T>> {
        self.state.lock().unwrap_or_else(|poisoned| {
            warn!("store lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Take the lock and hold it until the guard is dropped.
    pub fn lock(&self) -> StoreGuard<'_, T> {
        StoreGuard::new(self.state())
    }

    /// Free every remaining element and the backing arrays.
    ///
    /// Returns how many elements were still live.
    pub fn destroy(self) -> usize {
        let state = self
            .state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        let freed = state.live_count();
        drop(state);
        debug!(freed, "destroyed store");
        freed
    }

    /// Append a payload. On failure the payload comes back inside the error.
    pub fn insert(&self, payload: T) -> Result<usize, Rejected<T>> {
        self.state().insert(payload)
    }

    /// A copy of the element at `position`.
    pub fn get(&self, position: usize) -> Option<Element<T>>
    where
        T: Clone,
    {
        self.state().get(position).cloned()
    }

    /// Run `f` on the element at `position` while holding the lock.
    pub fn with_element<R>(&self, position: usize, f: impl FnOnce(Option<&Element<T>>) -> R) -> R {
        f(self.state().get(position))
    }

    pub fn exists(&self, position: usize) -> bool {
        self.state().exists(position)
    }

    /// Free the element at `position` and shift later slots down.
    pub fn erase(&self, position: usize) {
        self.state().erase(position)
    }

    /// Free the element at `position`, leaving the slot empty in place.
    pub fn erase_no_shift(&self, position: usize) {
        self.state().erase_no_shift(position)
    }

    /// Store a copy of `s`. Returns its logical string index.
    pub fn str_insert(&self, s: &str) -> Result<usize, StoreError> {
        self.state().str_insert(s)
    }

    pub fn str_get(&self, index: usize) -> Option<String> {
        self.state().str_get(index).map(str::to_owned)
    }

    pub fn str_exists(&self, index: usize) -> bool {
        self.state().str_exists(index)
    }

    pub fn str_erase(&self, index: usize) {
        self.state().str_erase(index)
    }

    pub fn str_erase_no_shift(&self, index: usize) {
        self.state().str_erase_no_shift(index)
    }

    /// Store a copy of `s`. Returns its logical wide-string index.
    pub fn wstr_insert(&self, s: &WideStr) -> Result<usize, StoreError> {
        self.state().wstr_insert(s)
    }

    pub fn wstr_get(&self, index: usize) -> Option<WideString> {
        self.state().wstr_get(index).map(WideString::from)
    }

    pub fn wstr_exists(&self, index: usize) -> bool {
        self.state().wstr_exists(index)
    }

    pub fn wstr_erase(&self, index: usize) {
        self.state().wstr_erase(index)
    }

    pub fn wstr_erase_no_shift(&self, index: usize) {
        self.state().wstr_erase_no_shift(index)
    }

    pub fn len(&self) -> usize {
        self.state().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.state().capacity()
    }

    pub fn str_len(&self) -> usize {
        self.state().overlay_len(Overlay::Str)
    }

    pub fn str_capacity(&self) -> usize {
        self.state().overlay_capacity(Overlay::Str)
    }

    pub fn wstr_len(&self) -> usize {
        self.state().overlay_len(Overlay::Wide)
    }

    pub fn wstr_capacity(&self) -> usize {
        self.state().overlay_capacity(Overlay::Wide)
    }
}

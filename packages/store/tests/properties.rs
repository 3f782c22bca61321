use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use xrt_store::{ArrayKind, Element, IndexedStore, StoreConfig, StoreError};
use xrt_text::WideString;

/// Counts its own drops so tests can see when the store frees a payload.
#[derive(Debug)]
struct Tracked {
    id: usize,
    drops: Arc<AtomicUsize>,
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn test_append_then_read() {
    let store: IndexedStore<u32> = IndexedStore::new();
    for v in 0..37u32 {
        assert_eq!(store.insert(v * 3).unwrap(), v as usize);
    }
    for i in 0..37usize {
        assert_eq!(store.get(i), Some(Element::Value(i as u32 * 3)));
    }
    assert_eq!(store.get(37), None);
    assert_eq!(store.capacity(), 64);
}

#[test]
fn test_shift_erase_renumbers() {
    let store: IndexedStore = IndexedStore::new();
    for s in ["A", "B", "C"] {
        store.str_insert(s).unwrap();
    }
    store.str_erase(0);
    assert_eq!(store.str_get(0).as_deref(), Some("B"));
    assert_eq!(store.str_get(1).as_deref(), Some("C"));
    assert!(!store.str_exists(2));
    assert_eq!(store.str_len(), 2);
    assert_eq!(store.len(), 2);
}

#[test]
fn test_no_shift_erase_keeps_overlay_length() {
    let store: IndexedStore = IndexedStore::new();
    for s in ["A", "B", "C"] {
        store.str_insert(s).unwrap();
    }
    store.str_erase_no_shift(0);
    assert_eq!(store.str_len(), 3);
    assert_eq!(store.len(), 3);
    assert!(!store.str_exists(0));
    assert!(store.str_exists(1));
    assert!(store.str_exists(2));
    assert_eq!(store.str_get(2).as_deref(), Some("C"));

    // Erasing again through the stale entry changes nothing.
    store.str_erase_no_shift(0);
    assert_eq!(store.str_len(), 3);
}

#[test]
fn test_cross_overlay_renumbering() {
    let store: IndexedStore = IndexedStore::new();
    assert_eq!(store.str_insert("X").unwrap(), 0);
    assert_eq!(store.wstr_insert(&WideString::from("Y")).unwrap(), 0);
    assert_eq!(store.str_insert("Z").unwrap(), 1);

    store.str_erase(0);

    assert_eq!(store.get(0), Some(Element::Wide(WideString::from("Y"))));
    assert_eq!(store.get(1), Some(Element::Str("Z".to_string())));
    assert_eq!(store.wstr_get(0), Some(WideString::from("Y")));
    assert_eq!(store.str_get(0).as_deref(), Some("Z"));
    assert_eq!(store.str_len(), 1);
    assert_eq!(store.wstr_len(), 1);
}

#[test]
fn test_wide_erase_renumbers_narrow_overlay() {
    let store: IndexedStore = IndexedStore::new();
    store.wstr_insert(&WideString::from("w0")).unwrap();
    store.str_insert("n0").unwrap();
    store.wstr_insert(&WideString::from("w1")).unwrap();

    store.wstr_erase(0);
    assert_eq!(store.str_get(0).as_deref(), Some("n0"));
    assert_eq!(store.wstr_get(0), Some(WideString::from("w1")));
    assert!(!store.wstr_exists(1));
}

#[test]
fn test_destroy_frees_each_payload_once() {
    let drops = Arc::new(AtomicUsize::new(0));
    let store: IndexedStore<Tracked> = IndexedStore::new();
    for id in 0..10 {
        store
            .insert(Tracked {
                id,
                drops: Arc::clone(&drops),
            })
            .unwrap();
    }
    store.str_insert("mixed in").unwrap();

    store.erase(3);
    store.erase_no_shift(0);
    store.erase_no_shift(0);
    store.erase(0);
    assert_eq!(drops.load(Ordering::SeqCst), 2);

    // Slot 0 was emptied, so that shift-erase was a no-op.
    assert_eq!(store.len(), 10);
    assert_eq!(
        store.with_element(3, |e| e.and_then(Element::as_value).map(|t| t.id)),
        Some(4)
    );

    // Eight tracked payloads and the string are still live.
    assert_eq!(store.destroy(), 9);
    assert_eq!(drops.load(Ordering::SeqCst), 10);
}

#[test]
fn test_drop_frees_like_destroy() {
    let drops = Arc::new(AtomicUsize::new(0));
    {
        let store: IndexedStore<Tracked> = IndexedStore::new();
        for id in 0..5 {
            store
                .insert(Tracked {
                    id,
                    drops: Arc::clone(&drops),
                })
                .unwrap();
        }
        store.erase(1);
    }
    assert_eq!(drops.load(Ordering::SeqCst), 5);
}

#[test]
fn test_overlay_failure_restores_store() {
    let config = StoreConfig::new().with_str_index_limit(4);
    let store: IndexedStore<u32> = IndexedStore::with_config(config);
    for s in ["a", "b", "c", "d"] {
        store.str_insert(s).unwrap();
    }
    store.insert(7).unwrap();
    store.insert(8).unwrap();

    let before: Vec<_> = (0..store.len()).map(|i| store.get(i)).collect();
    let err = store.str_insert("e").unwrap_err();

    assert_eq!(err.array(), ArrayKind::StrIndex);
    assert!(matches!(
        err,
        StoreError::CapacityExceeded {
            requested: 5,
            limit: 4,
            ..
        }
    ));
    assert_eq!(store.len(), 6);
    assert_eq!(store.str_len(), 4);
    let after: Vec<_> = (0..store.len()).map(|i| store.get(i)).collect();
    assert_eq!(before, after);
    assert!(!store.exists(6));

    // The rolled back slot is reused by the next insert.
    assert_eq!(store.insert(9).unwrap(), 6);
}

#[test]
fn test_slot_failure_leaves_overlays_alone() {
    let store: IndexedStore<u32> = IndexedStore::with_config(StoreConfig::new().with_slot_limit(1));
    store.wstr_insert(&WideString::from("only")).unwrap();
    let err = store.wstr_insert(&WideString::from("more")).unwrap_err();
    assert_eq!(err.array(), ArrayKind::Slots);
    assert_eq!(store.wstr_len(), 1);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_concurrent_inserts_linearize() {
    const THREADS: usize = 16;
    const PER_THREAD: usize = 50;

    let store: IndexedStore<usize> = IndexedStore::new();
    thread::scope(|scope| {
        for t in 0..THREADS {
            let store = &store;
            scope.spawn(move || {
                for n in 0..PER_THREAD {
                    store.insert(t * PER_THREAD + n).unwrap();
                }
            });
        }
    });

    assert_eq!(store.len(), THREADS * PER_THREAD);
    let seen: HashSet<usize> = store
        .lock()
        .iter()
        .filter_map(|(_, e)| e.as_value().copied())
        .collect();
    assert_eq!(seen.len(), THREADS * PER_THREAD);
}

#[test]
fn test_concurrent_typed_inserts_keep_overlays_consistent() {
    let store: IndexedStore<u8> = IndexedStore::new();
    thread::scope(|scope| {
        for t in 0..4 {
            let store = &store;
            scope.spawn(move || {
                for n in 0..25 {
                    if t % 2 == 0 {
                        store.str_insert(&format!("s{t}-{n}")).unwrap();
                    } else {
                        store.wstr_insert(&WideString::from(format!("w{t}-{n}"))).unwrap();
                    }
                }
            });
        }
    });

    assert_eq!(store.str_len(), 50);
    assert_eq!(store.wstr_len(), 50);
    let guard = store.lock();
    for i in 0..50 {
        assert!(guard.str_get_locked(i).is_some_and(|s| s.starts_with('s')));
        assert!(guard
            .wstr_get_locked(i)
            .is_some_and(|w| w.to_string_lossy().starts_with('w')));
    }
}

#[test]
fn test_batch_insert_is_atomic() {
    let store: IndexedStore<u32> = IndexedStore::new();
    thread::scope(|scope| {
        for t in 0..8u32 {
            let store = &store;
            scope.spawn(move || {
                let mut guard = store.lock();
                let first = guard.insert_locked(t * 10).unwrap();
                let second = guard.insert_locked(t * 10 + 1).unwrap();
                assert_eq!(second, first + 1);
            });
        }
    });

    let guard = store.lock();
    for pair in 0..8 {
        let a = guard.get_locked(pair * 2).and_then(Element::as_value).copied();
        let b = guard.get_locked(pair * 2 + 1).and_then(Element::as_value).copied();
        assert_eq!(a.map(|v| v + 1), b);
    }
}

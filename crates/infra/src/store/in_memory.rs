use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, PoisonError, RwLock};

/// Key/value store abstraction backing entity stores.
pub trait Store<K, V>: Send + Sync {
    fn get(&self, key: &K) -> Option<V>;
    fn upsert(&self, key: K, value: V);
    fn list(&self) -> Vec<V>;
}

impl<K, V, S> Store<K, V> for Arc<S>
where
    S: Store<K, V> + ?Sized,
{
    fn get(&self, key: &K) -> Option<V> {
        (**self).get(key)
    }

    fn upsert(&self, key: K, value: V) {
        (**self).upsert(key, value)
    }

    fn list(&self) -> Vec<V> {
        (**self).list()
    }
}

/// In-memory store for tests/dev.
#[derive(Debug)]
pub struct InMemoryStore<K, V> {
    inner: RwLock<HashMap<K, V>>,
}

impl<K, V> InMemoryStore<K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl<K, V> Default for InMemoryStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Store<K, V> for InMemoryStore<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.get(key).cloned()
    }

    // A panicking writer cannot leave a half-inserted entry, so the map stays usable.
    fn upsert(&self, key: K, value: V) {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        map.insert(key, value);
    }

    fn list(&self) -> Vec<V> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_replaces_existing_value() {
        let store: InMemoryStore<u32, &str> = InMemoryStore::new();
        store.upsert(1, "first");
        store.upsert(1, "second");
        store.upsert(2, "other");

        assert_eq!(store.get(&1), Some("second"));
        assert_eq!(store.get(&3), None);

        let mut all = store.list();
        all.sort();
        assert_eq!(all, vec!["other", "second"]);
    }

    #[test]
    fn writes_survive_a_poisoned_lock() {
        let store = Arc::new(InMemoryStore::<u32, u32>::new());
        store.upsert(1, 1);

        let poisoner = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.inner.write().unwrap();
            panic!("poison the store lock");
        })
        .join();
        assert!(store.inner.is_poisoned());

        store.upsert(2, 4);
        assert_eq!(store.get(&2), Some(4));
        assert_eq!(store.list().len(), 2);
    }

    #[test]
    fn shared_store_is_visible_through_arc() {
        let store = Arc::new(InMemoryStore::<u32, u32>::new());
        let handle = store.clone();
        handle.upsert(7, 49);
        assert_eq!(store.get(&7), Some(49));
    }
}

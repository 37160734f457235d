//! # Component Registry
//!
//! The per-app cache of live component instances, keyed by namespace. Reads of cached
//! entries share a read lock. Loading a namespace that is not cached yet is serialized
//! per key through [`ComponentRegistry::key_lock`].

use super::component::Component;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

#[derive(Default)]
pub struct ComponentRegistry {
    entries: RwLock<HashMap<String, Component>>,
    key_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, namespace: &str) -> Option<Component> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(namespace)
            .cloned()
    }

    /// Stores `component` under `namespace`. The last write wins.
    pub fn insert(&self, namespace: &str, component: Component) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(namespace.to_string(), component);
    }

    pub fn contains(&self, namespace: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(namespace)
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cached namespaces, sorted.
    pub fn namespaces(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        keys.sort();
        keys
    }

    /// The mutex guarding the define/instantiate/cache sequence for `namespace`.
    /// Hand it back through [`release_key_lock`](Self::release_key_lock) when done.
    pub fn key_lock(&self, namespace: &str) -> Arc<Mutex<()>> {
        self.key_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(namespace.to_string())
            .or_default()
            .clone()
    }

    /// Drops the caller's handle on the key lock and forgets the lock once no other
    /// caller holds or waits on it.
    pub fn release_key_lock(&self, namespace: &str, lock: Arc<Mutex<()>>) {
        let mut locks = self.key_locks.lock().unwrap_or_else(PoisonError::into_inner);
        drop(lock);
        if locks
            .get(namespace)
            .is_some_and(|held| Arc::strong_count(held) == 1)
        {
            locks.remove(namespace);
        }
    }

    /// Number of namespaces with a load in flight.
    pub fn pending_loads(&self) -> usize {
        self.key_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_lock_is_forgotten_after_last_release() {
        let registry = ComponentRegistry::new();
        let first = registry.key_lock("workflow/blog/post");
        let second = registry.key_lock("workflow/blog/post");
        assert!(Arc::ptr_eq(&first, &second));

        registry.release_key_lock("workflow/blog/post", first);
        assert_eq!(registry.pending_loads(), 1);
        registry.release_key_lock("workflow/blog/post", second);
        assert_eq!(registry.pending_loads(), 0);
    }
}

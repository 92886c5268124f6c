use parking_lot::RwLock;
use std::sync::Arc;

use crate::ordered_map::OrderedMap;

/// Wrapper for an OrderedMap which is shareable across thread boundaries.
///
/// The map itself does no synchronization of its own; this is just the
/// external lock around it. Reads take the lock shared, anything that mutates
/// takes it exclusively.
pub struct SharedOrderedMap<K, V>(Arc<RwLock<OrderedMap<K, V>>>);

impl<K, V> SharedOrderedMap<K, V>
where
    K: PartialEq + Clone,
    V: Clone,
{
    /// Wraps a map into a shared accessor, making it safe to move across
    /// thread boundaries.
    pub fn with_map(map: OrderedMap<K, V>) -> Self {
        Self(Arc::from(RwLock::from(map)))
    }

    /// Associates a value with a key, returning the value it replaced.
    pub fn set(&self, k: K, v: V) -> Option<V> {
        self.0.write().set(k, v)
    }

    /// Gets a value, or the map's default for a miss. This clones it to
    /// minimize the lock time of the map.
    pub fn get(&self, k: &K) -> Option<V> {
        self.0.read().get(k).map(|v| v.into_owned())
    }

    /// Remove an entry, returning its value if it existed.
    pub fn remove(&self, k: &K) -> Option<V> {
        self.0.write().remove(k)
    }

    /// Clears the map.
    pub fn clear(&self) {
        self.0.write().clear()
    }

    /// The number of entries in the map at present.
    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    /// Runs `f` against the map while holding the lock shared.
    pub fn read<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&OrderedMap<K, V>) -> R,
    {
        f(&self.0.read())
    }

    /// Runs `f` against the map while holding the lock exclusively.
    pub fn write<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut OrderedMap<K, V>) -> R,
    {
        f(&mut self.0.write())
    }
}

impl<K, V> Clone for SharedOrderedMap<K, V> {
    fn clone(&self) -> Self {
        SharedOrderedMap(self.0.clone())
    }
}

//! Sorting. Without a comparator keys are ordered by their canonical text,
//! i.e. their [`Display`](fmt::Display) output, which gives keys of different
//! kinds a total order. All sorts are stable.

use std::{cmp::Ordering, fmt};

use tracing::trace;

use super::{Entry, OrderedMap};

impl<K, V> OrderedMap<K, V>
where
    K: fmt::Display,
{
    /// The entries in canonical key order. Recomputed on every call.
    fn sorted_by_text(&self) -> Vec<&Entry<K, V>> {
        let mut sorted: Vec<&Entry<K, V>> = self.entries.iter().collect();
        sorted.sort_by_cached_key(|e| e.key.to_string());
        sorted
    }

    /// Calls `f` with each pair, as a tuple, in canonical key order.
    pub fn for_each_sorted<F>(&self, mut f: F)
    where
        F: FnMut((&K, &V)),
    {
        for e in self.sorted_by_text() {
            f((&e.key, &e.value));
        }
    }

    /// Calls `f` with each key and value in canonical key order.
    pub fn for_each_sorted_pair<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        for e in self.sorted_by_text() {
            f(&e.key, &e.value);
        }
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: PartialEq + fmt::Display,
{
    /// Reorders this map's own entries by canonical key text.
    pub fn sort_in_place(&mut self) {
        let mut entries = std::mem::take(&mut self.entries);
        entries.sort_by_cached_key(|e| e.key.to_string());
        self.refill(entries);
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: PartialEq + Clone + fmt::Display,
    V: Clone,
{
    /// A new map holding this one's pairs in canonical key order. This map is
    /// left as it was.
    pub fn sort(&self) -> Self {
        self.sorted_by_text()
            .into_iter()
            .map(|e| (e.key.clone(), e.value.clone()))
            .collect()
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: PartialEq,
{
    /// Reorders this map's own entries with `cmp`, which sees whole pairs.
    pub fn sort_in_place_by<F>(&mut self, mut cmp: F)
    where
        F: FnMut((&K, &V), (&K, &V)) -> Ordering,
    {
        let mut entries = std::mem::take(&mut self.entries);
        entries.sort_by(|a, b| cmp((&a.key, &a.value), (&b.key, &b.value)));
        self.refill(entries);
    }

    /// Re-inserts `entries` one by one into the (emptied) map.
    fn refill(&mut self, entries: Vec<Entry<K, V>>) {
        self.entries.clear();
        trace!(len = entries.len(), "re-inserting sorted entries");
        for e in entries {
            self.set(e.key, e.value);
        }
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: PartialEq + Clone,
    V: Clone,
{
    /// A new map holding this one's pairs in the order given by `cmp`.
    pub fn sort_by<F>(&self, mut cmp: F) -> Self
    where
        F: FnMut((&K, &V), (&K, &V)) -> Ordering,
    {
        let mut sorted: Vec<&Entry<K, V>> = self.entries.iter().collect();
        sorted.sort_by(|a, b| cmp((&a.key, &a.value), (&b.key, &b.value)));
        sorted
            .into_iter()
            .map(|e| (e.key.clone(), e.value.clone()))
            .collect()
    }
}

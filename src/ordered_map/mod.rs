mod defaults;
mod ordering;
mod structural;

pub use structural::Diff;

use std::{
    borrow::Borrow,
    collections::HashMap,
    fmt,
    hash::{BuildHasher, Hash},
    iter::FromIterator,
    slice, vec,
};

use tracing::trace;

use crate::default_policy::DefaultPolicy;
use crate::errors::MapError;
use crate::Result;

/// One stored key/value pair.
#[derive(Clone)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
}

impl<K, V> fmt::Debug for Entry<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} => {:?}", self.key, self.value)
    }
}

/// A map which remembers the order keys were first inserted in.
///
/// Entries live in a single `Vec` and every lookup is a linear scan comparing
/// keys with [`PartialEq`]. There is no hashing and no index, so keys only
/// need to be comparable, which lets a single map hold keys of different
/// kinds (see [`Value`](crate::Value)). Reassigning a key overwrites its value
/// where it stands; new keys are always appended.
///
/// Each map also carries a [`DefaultPolicy`] which decides what [`get`]
/// returns on a miss.
///
/// [`get`]: OrderedMap::get
#[derive(Clone)]
pub struct OrderedMap<K, V> {
    entries: Vec<Entry<K, V>>,
    default: DefaultPolicy<K, V>,
}

/// Iterates over a map's pairs in insertion order.
pub struct Iter<'a, K, V> {
    inner: slice::Iter<'a, Entry<K, V>>,
}

/// Iterates over a map's pairs in insertion order, with mutable values.
pub struct IterMut<'a, K, V> {
    inner: slice::IterMut<'a, Entry<K, V>>,
}

/// Owning iterator over a map's pairs in insertion order.
pub struct IntoIter<K, V> {
    inner: vec::IntoIter<Entry<K, V>>,
}

impl<K, V> OrderedMap<K, V> {
    /// Makes a new, empty map with no default policy.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Makes a new, empty map with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            default: DefaultPolicy::None,
        }
    }

    /// Makes a new, empty map whose misses yield `value`.
    pub fn with_default(value: V) -> Self {
        let mut map = Self::new();
        map.default = DefaultPolicy::fixed(value);
        map
    }

    /// Makes a new, empty map whose misses are computed by `f`. The generator
    /// is responsible for storing anything it wants kept; plain reads never
    /// will.
    pub fn with_default_fn<F>(f: F) -> Self
    where
        F: Fn(&OrderedMap<K, V>, &K) -> V + Send + Sync + 'static,
    {
        let mut map = Self::new();
        map.default = DefaultPolicy::generator(f);
        map
    }

    /// The number of entries in the map.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Alias for [`len`](OrderedMap::len).
    pub fn size(&self) -> usize {
        self.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.entries.iter_mut(),
        }
    }

    /// The first pair in insertion order.
    pub fn first(&self) -> Result<(&K, &V)> {
        self.entries
            .first()
            .map(|e| (&e.key, &e.value))
            .ok_or(MapError::EmptyAccess { operation: "first" })
    }

    /// The last pair in insertion order.
    pub fn last(&self) -> Result<(&K, &V)> {
        self.entries
            .last()
            .map(|e| (&e.key, &e.value))
            .ok_or(MapError::EmptyAccess { operation: "last" })
    }

    /// Removes the first pair and hands it back.
    pub fn shift(&mut self) -> Result<(K, V)> {
        if self.entries.is_empty() {
            return Err(MapError::EmptyAccess { operation: "shift" });
        }

        let entry = self.entries.remove(0);
        Ok((entry.key, entry.value))
    }

    /// Drops every entry. The default policy stays in place.
    pub fn clear(&mut self) {
        trace!(dropped = self.entries.len(), "clearing ordered map");
        self.entries = Vec::new();
    }

    /// Calls `f` with each pair, as a tuple, in insertion order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut((&K, &V)),
    {
        for e in &self.entries {
            f((&e.key, &e.value));
        }
    }

    /// Calls `f` with each key and value in insertion order.
    pub fn for_each_pair<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        for e in &self.entries {
            f(&e.key, &e.value);
        }
    }

    pub fn for_each_key<F>(&self, mut f: F)
    where
        F: FnMut(&K),
    {
        self.entries.iter().for_each(|e| f(&e.key));
    }

    pub fn for_each_value<F>(&self, mut f: F)
    where
        F: FnMut(&V),
    {
        self.entries.iter().for_each(|e| f(&e.value));
    }

    /// Consumes the map into its pairs, in insertion order.
    pub fn into_pairs(self) -> Vec<(K, V)> {
        self.into_iter().collect()
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: PartialEq,
{
    /// Index of the entry holding `key`, if any.
    pub(crate) fn position<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.entries.iter().position(|e| e.key.borrow() == key)
    }

    /// Associates `value` with `key`. An existing entry keeps its position and
    /// has its value replaced, which is handed back; otherwise the pair is
    /// appended.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        match self.position(&key) {
            Some(idx) => {
                Some(std::mem::replace(&mut self.entries[idx].value, value))
            }
            None => {
                self.entries.push(Entry { key, value });
                None
            }
        }
    }

    /// Alias for [`set`](OrderedMap::set).
    pub fn store(&mut self, key: K, value: V) -> Option<V> {
        self.set(key, value)
    }

    /// Plain lookup which ignores the default policy.
    pub fn lookup<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.position(key).map(|idx| &self.entries[idx].value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        match self.position(key) {
            Some(idx) => Some(&mut self.entries[idx].value),
            None => None,
        }
    }

    pub fn has_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.position(key).is_some()
    }

    /// Removes the entry for `key`, returning its value if it was there.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.position(key).map(|idx| self.entries.remove(idx).value)
    }

    /// Values of the entries whose key appears in `keys`. The result follows
    /// the map's order, not the order of `keys`, and keys which aren't in the
    /// map are skipped.
    pub fn values_at(&self, keys: &[K]) -> Vec<&V> {
        self.entries
            .iter()
            .filter(|e| keys.contains(&e.key))
            .map(|e| &e.value)
            .collect()
    }
}

impl<K, V> OrderedMap<K, V>
where
    V: PartialEq,
{
    pub fn has_value(&self, value: &V) -> bool {
        self.entries.iter().any(|e| &e.value == value)
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: Clone,
    V: Clone,
{
    /// A snapshot of the keys in insertion order.
    pub fn keys(&self) -> Vec<K> {
        self.entries.iter().map(|e| e.key.clone()).collect()
    }

    /// A snapshot of the values in insertion order.
    pub fn values(&self) -> Vec<V> {
        self.entries.iter().map(|e| e.value.clone()).collect()
    }

    /// A snapshot of the pairs in insertion order.
    pub fn to_pairs(&self) -> Vec<(K, V)> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    /// Renders the map as `{k1 => v1, k2 => v2}` using the debug form of every
    /// key and value.
    pub fn inspect(&self) -> String {
        format!("{:?}", self)
    }
}

impl<K, V> fmt::Debug for OrderedMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (idx, entry) in self.entries.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:?}", entry)?;
        }
        f.write_str("}")
    }
}

impl<K, V> fmt::Display for OrderedMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Extend<(K, V)> for OrderedMap<K, V>
where
    K: PartialEq,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for OrderedMap<K, V>
where
    K: PartialEq,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|e| (&e.key, &e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|e| (&e.key, &e.value))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|e| (&e.key, &mut e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|e| (e.key, e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut OrderedMap<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V> IntoIterator for OrderedMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.entries.into_iter(),
        }
    }
}

/// Hands the pairs over to a std hash map. Insertion order is lost and the
/// default policy is dropped.
impl<K, V, S> From<OrderedMap<K, V>> for HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from(map: OrderedMap<K, V>) -> Self {
        map.into_iter().collect()
    }
}

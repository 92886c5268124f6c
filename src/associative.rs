use std::{
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
};

use crate::ordered_map::OrderedMap;

/// Describes what counts as a map when merging, comparing or diffing. All
/// that's needed is the ability to list pairs, from which the size follows.
///
/// Dynamic values may or may not hold a map, so `pairs` is allowed to say no.
pub trait Associative<K, V> {
    /// Every pair, or `None` when this value isn't associative at all.
    fn pairs(&self) -> Option<Vec<(&K, &V)>>;

    /// Short description used when a non-associative value is rejected.
    fn describe(&self) -> String {
        std::any::type_name::<Self>().to_owned()
    }
}

impl<K, V> Associative<K, V> for OrderedMap<K, V> {
    fn pairs(&self) -> Option<Vec<(&K, &V)>> {
        Some(self.iter().collect())
    }
}

impl<K, V, S> Associative<K, V> for HashMap<K, V, S>
where
    S: BuildHasher,
{
    fn pairs(&self) -> Option<Vec<(&K, &V)>> {
        Some(self.iter().collect())
    }
}

impl<K, V> Associative<K, V> for BTreeMap<K, V> {
    fn pairs(&self) -> Option<Vec<(&K, &V)>> {
        Some(self.iter().collect())
    }
}

impl<K, V> Associative<K, V> for [(K, V)] {
    fn pairs(&self) -> Option<Vec<(&K, &V)>> {
        Some(self.iter().map(|(k, v)| (k, v)).collect())
    }
}

impl<K, V> Associative<K, V> for Vec<(K, V)> {
    fn pairs(&self) -> Option<Vec<(&K, &V)>> {
        self.as_slice().pairs()
    }
}

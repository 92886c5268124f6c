//! Whole-map operations: filtering, removal, inversion, merging, equality
//! and diffing. Anything that produces a map produces a fresh one with its
//! own copies of the keys and values and no default policy.

use std::{borrow::Borrow, fmt};

use tracing::{debug, trace};

use super::OrderedMap;
use crate::associative::Associative;
use crate::errors::MapError;
use crate::Result;

/// Pairs only one side of a diff has: `(left_only, right_only)`.
pub type Diff<K, V> = (Vec<(K, V)>, Vec<(K, V)>);

fn not_associative<K, V, A>(other: &A) -> MapError
where
    A: Associative<K, V> + ?Sized,
{
    let found = other.describe();
    debug!(found = %found, "refusing to merge a non-associative value");
    MapError::TypeMismatch { found }
}

/// Pairs of `ours` with no exact key and value match in `theirs`.
fn unmatched<K, V>(ours: &[(&K, &V)], theirs: &[(&K, &V)]) -> Vec<(K, V)>
where
    K: PartialEq + Clone,
    V: PartialEq + Clone,
{
    ours.iter()
        .filter(|(k, v)| !theirs.iter().any(|(ok, ov)| k == ok && v == ov))
        .map(|(k, v)| ((*k).clone(), (*v).clone()))
        .collect()
}

impl<K, V> OrderedMap<K, V> {
    /// Pairs for which `pred` holds, in insertion order.
    pub fn select<F>(&self, mut pred: F) -> Vec<(&K, &V)>
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.iter().filter(|(k, v)| pred(*k, *v)).collect()
    }

    /// Removes every entry for which `pred` holds.
    pub fn delete_if<F>(&mut self, mut pred: F) -> &mut Self
    where
        F: FnMut(&K, &V) -> bool,
    {
        let before = self.entries.len();
        self.entries.retain(|e| !pred(&e.key, &e.value));
        trace!(removed = before - self.entries.len(), "delete_if");
        self
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: PartialEq + fmt::Debug,
    V: fmt::Debug,
{
    /// Removes the entry for `key`, describing what was removed as
    /// `Deleted: key => value`. Returns `None` when the key is absent.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<String>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.delete_or_else(key, |_| {})
    }

    /// Like [`delete`](OrderedMap::delete), but hands `key` to `not_found`
    /// when there's nothing to remove.
    pub fn delete_or_else<Q, F>(&mut self, key: &Q, not_found: F) -> Option<String>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
        F: FnOnce(&Q),
    {
        match self.position(key) {
            Some(idx) => {
                let removed = self.entries.remove(idx);
                Some(format!("Deleted: {:?}", removed))
            }
            None => {
                not_found(key);
                None
            }
        }
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: Clone,
    V: PartialEq + Clone,
{
    /// A new map from each value to its key. When values repeat, the entry
    /// inserted last wins.
    pub fn invert(&self) -> OrderedMap<V, K> {
        self.iter().map(|(k, v)| (v.clone(), k.clone())).collect()
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: PartialEq + Clone,
    V: Clone,
{
    /// A new map with this map's pairs overlaid by `other`'s; `other` wins
    /// where keys collide. Neither side is modified.
    pub fn merge<A>(&self, other: &A) -> Result<Self>
    where
        A: Associative<K, V> + ?Sized,
    {
        let theirs = other
            .pairs()
            .ok_or_else(|| not_associative::<K, V, A>(other))?;

        let mut merged: Self = self
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        for (k, v) in theirs {
            merged.set(k.clone(), v.clone());
        }

        Ok(merged)
    }

    /// Overlays `other`'s pairs onto this map; `other` wins where keys
    /// collide. Existing keys keep their positions, new ones are appended.
    pub fn merge_in_place<A>(&mut self, other: &A) -> Result<&mut Self>
    where
        A: Associative<K, V> + ?Sized,
    {
        let theirs = other
            .pairs()
            .ok_or_else(|| not_associative::<K, V, A>(other))?;

        trace!(incoming = theirs.len(), "merging in place");
        for (k, v) in theirs {
            self.set(k.clone(), v.clone());
        }

        Ok(self)
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: PartialEq,
    V: PartialEq,
{
    /// Order-independent equality: `other` must be associative, have the same
    /// number of pairs, and every pair here must have an exact match there.
    pub fn equals<A>(&self, other: &A) -> bool
    where
        A: Associative<K, V> + ?Sized,
    {
        let theirs = match other.pairs() {
            Some(pairs) => pairs,
            None => return false,
        };

        if theirs.len() != self.len() {
            return false;
        }

        // our keys are unique, so with equal sizes this also covers every
        // one of theirs, even when the other side repeats a pair
        self.iter().all(|(k, v)| {
            theirs.iter().any(|(ok, ov)| k == *ok && v == *ov)
        })
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: PartialEq + Clone,
    V: PartialEq + Clone,
{
    /// Pairs present on only one side, matched by exact key and value:
    /// `(only_in_self, only_in_other)`, each in its own map's order. Swapping
    /// the arguments swaps the halves. `None` when `other` isn't associative.
    pub fn diff<A>(&self, other: &A) -> Option<Diff<K, V>>
    where
        A: Associative<K, V> + ?Sized,
    {
        let theirs = other.pairs()?;
        let ours: Vec<(&K, &V)> = self.iter().collect();

        Some((unmatched(&ours, &theirs), unmatched(&theirs, &ours)))
    }
}

impl<K, V> PartialEq for OrderedMap<K, V>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use pretty_assertions::assert_eq;

    use crate::{OrderedMap, Value};

    fn map_of(pairs: Vec<(Value, Value)>) -> OrderedMap<Value, Value> {
        pairs.into_iter().collect()
    }

    #[test]
    fn select_keeps_matching_pairs_in_order() {
        let mut map = OrderedMap::new();
        map.set(Value::sym("key"), Value::from("5"));
        map.set(Value::from("cow"), Value::from("moooo..."));
        map.set(Value::from("4"), Value::from("2*2"));

        let selected = map.select(|k, _| *k == Value::from("4"));
        assert_eq!(vec![(&Value::from("4"), &Value::from("2*2"))], selected);

        assert!(map.select(|_, _| false).is_empty());
        assert_eq!(3, map.select(|_, _| true).len());
    }

    #[test]
    fn delete_if_removes_in_place() {
        let mut map: OrderedMap<&str, u64> = OrderedMap::new();
        map.set("key", 5);
        map.set("key2", 5);

        map.delete_if(|_, _| false);
        assert_eq!(2, map.len());

        map.delete_if(|k, _| *k == "key");
        assert!(!map.has_key("key"));
        assert!(map.has_key("key2"));

        assert!(map.delete_if(|_, v| *v == 5).is_empty());
    }

    #[test]
    fn delete_describes_the_removed_pair() {
        let mut map = OrderedMap::new();
        map.set(Value::sym("key"), Value::from(5));

        assert_eq!(
            Some("Deleted: :key => 5".to_owned()),
            map.delete(&Value::sym("key"))
        );
        assert!(map.is_empty());

        let mut missed = None;
        let result = map.delete_or_else(&Value::sym("key"), |k| {
            missed = Some(format!("{:?} Boooom!", k))
        });
        assert_eq!(None, result);
        assert_eq!(Some(":key Boooom!".to_owned()), missed);
    }

    #[test]
    fn invert_swaps_and_last_wins() {
        let mut map: OrderedMap<&str, u64> = OrderedMap::new();
        map.set("key", 5);
        assert_eq!(Some(&"key"), map.invert().lookup(&5));

        map.set("key1", 6);
        map.set("key2", 7);
        map.set("key3", 6);

        let inverted = map.invert();
        assert_eq!(vec![5, 6, 7], inverted.keys());
        assert_eq!(Some(&"key3"), inverted.lookup(&6));
        assert_eq!(Some(&"key2"), inverted.lookup(&7));
    }

    #[test]
    fn merge_prefers_the_other_side() {
        let a = map_of(vec![(Value::sym("x"), Value::from(1))]);
        let b = map_of(vec![
            (Value::sym("x"), Value::from(2)),
            (Value::sym("y"), Value::from(3)),
        ]);

        let merged = a.merge(&b).unwrap();
        assert_eq!(
            vec![
                (Value::sym("x"), Value::from(2)),
                (Value::sym("y"), Value::from(3)),
            ],
            merged.to_pairs()
        );
        assert_eq!(vec![(Value::sym("x"), Value::from(1))], a.to_pairs());

        let mut a = a;
        a.merge_in_place(&b).unwrap();
        assert_eq!(merged.to_pairs(), a.to_pairs());
    }

    #[test]
    fn merge_accepts_std_maps() {
        let mut map: OrderedMap<&str, u64> = OrderedMap::new();
        map.set("key", 5);
        map.set("key1", 55);

        let mut hash = HashMap::new();
        hash.insert("key2", 6);

        let merged = map.merge(&hash).unwrap();
        assert_eq!(Some(&5), merged.lookup("key"));
        assert_eq!(Some(&55), merged.lookup("key1"));
        assert_eq!(Some(&6), merged.lookup("key2"));

        hash.insert("key", 6);
        map.merge_in_place(&hash).unwrap();
        assert_eq!(vec!["key", "key1", "key2"], map.keys());
        assert_eq!(Some(&6), map.lookup("key"));
    }

    #[test]
    fn merge_rejects_non_associative_values() {
        let mut map = map_of(vec![(Value::sym("x"), Value::from(1))]);

        let err = map.merge(&Value::from(5)).unwrap_err();
        assert!(err.is_type_mismatch());

        assert!(map.merge_in_place(&Value::from("nope")).is_err());
        assert_eq!(1, map.len());

        let nested = Value::from(map_of(vec![(Value::sym("y"), Value::Nil)]));
        assert_eq!(2, map.merge(&nested).unwrap().len());
    }

    #[test]
    fn equality_ignores_order() {
        let a = map_of(vec![
            (Value::from("a"), Value::from(1)),
            (Value::from("b"), Value::from(2)),
        ]);
        let b = map_of(vec![
            (Value::from("b"), Value::from(2)),
            (Value::from("a"), Value::from(1)),
        ]);
        assert!(a.equals(&b));
        assert_eq!(a, b);

        let c = map_of(vec![
            (Value::from("a"), Value::from(1)),
            (Value::from("b"), Value::from(3)),
        ]);
        assert_ne!(a, c);

        let d = map_of(vec![(Value::from("a"), Value::from(1))]);
        assert_ne!(a, d);

        assert!(!a.equals(&Value::from(1)));
        assert!(a.equals(&Value::from(b.clone())));
    }

    #[test]
    fn equality_against_foreign_maps() {
        let mut map: OrderedMap<&str, u64> = OrderedMap::new();
        map.set("b", 2);
        map.set("a", 1);

        let mut hash = HashMap::new();
        hash.insert("a", 1);
        hash.insert("b", 2);
        assert!(map.equals(&hash));

        hash.insert("c", 3);
        assert!(!map.equals(&hash));

        assert!(map.equals(&vec![("a", 1), ("b", 2)]));
    }

    #[test]
    fn diff_is_symmetric() {
        let a = map_of(vec![
            (Value::from("r"), Value::from(5)),
            (Value::from("s"), Value::from(6)),
            (Value::from("d"), Value::from(5)),
            (Value::sym("h"), Value::from("ola")),
            (Value::sym("m"), Value::from(5)),
        ]);
        let b = map_of(vec![
            (Value::from("r"), Value::from(5)),
            (Value::from("s"), Value::from(6)),
            (Value::from("d"), Value::from(5)),
            (Value::from("t"), Value::from(5)),
        ]);

        let (left, right) = a.diff(&b).unwrap();
        assert_eq!(
            vec![
                (Value::sym("h"), Value::from("ola")),
                (Value::sym("m"), Value::from(5)),
            ],
            left
        );
        assert_eq!(vec![(Value::from("t"), Value::from(5))], right);

        let (left_swapped, right_swapped) = b.diff(&a).unwrap();
        assert_eq!(right, left_swapped);
        assert_eq!(left, right_swapped);

        assert!(a.diff(&Value::Nil).is_none());
    }

    #[test]
    fn diff_matches_on_value_too() {
        let a = map_of(vec![(Value::from("k"), Value::from(1))]);
        let b = map_of(vec![(Value::from("k"), Value::from(2))]);

        let (left, right) = a.diff(&b).unwrap();
        assert_eq!(vec![(Value::from("k"), Value::from(1))], left);
        assert_eq!(vec![(Value::from("k"), Value::from(2))], right);
    }

    #[test]
    fn repeated_pairs_do_not_stand_in_for_missing_ones() {
        let mut map: OrderedMap<&str, u64> = OrderedMap::new();
        map.set("a", 1);
        map.set("b", 2);

        assert!(!map.equals(&vec![("a", 1), ("a", 1)]));
        assert!(!map.equals(&[("b", 2), ("b", 2)][..]));
        assert!(map.equals(&[("b", 2), ("a", 1)][..]));

        let (left, right) =
            map.diff(&vec![("a", 1), ("a", 1), ("c", 3)]).unwrap();
        assert_eq!(vec![("b", 2)], left);
        assert_eq!(vec![("c", 3)], right);
    }

    #[test]
    fn diff_against_std_maps() {
        let mut map: OrderedMap<&str, u64> = OrderedMap::new();
        map.set("a", 1);
        map.set("b", 2);

        let mut hash = HashMap::new();
        hash.insert("a", 1);
        hash.insert("b", 3);
        let (left, right) = map.diff(&hash).unwrap();
        assert_eq!(vec![("b", 2)], left);
        assert_eq!(vec![("b", 3)], right);

        let mut tree = BTreeMap::new();
        tree.insert("b", 2);
        tree.insert("a", 1);
        let (left, right) = map.diff(&tree).unwrap();
        assert!(left.is_empty());
        assert!(right.is_empty());
        assert!(map.equals(&tree));
    }
}

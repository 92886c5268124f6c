//! What a map hands back when a lookup misses.

use std::{borrow::Cow, fmt, sync::Arc};

use crate::ordered_map::OrderedMap;

/// Signature of a default generator. It sees the map being read and the key
/// that missed.
pub type DefaultFn<K, V> = dyn Fn(&OrderedMap<K, V>, &K) -> V + Send + Sync;

/// The fallback behaviour applied when a lookup misses. A map carries exactly
/// one of these at any time.
pub enum DefaultPolicy<K, V> {
    /// Misses yield nothing.
    None,

    /// Misses yield a copy of this value. It sits behind an `Arc` so a map
    /// whose values are themselves maps stays finitely sized.
    Static(Arc<V>),

    /// Misses yield whatever the generator computes for the key.
    Generator(Arc<DefaultFn<K, V>>),
}

impl<K, V> DefaultPolicy<K, V> {
    /// Wraps a value into a static policy.
    pub fn fixed(value: V) -> Self {
        DefaultPolicy::Static(Arc::new(value))
    }

    /// Wraps a closure into a generator policy.
    pub fn generator<F>(f: F) -> Self
    where
        F: Fn(&OrderedMap<K, V>, &K) -> V + Send + Sync + 'static,
    {
        DefaultPolicy::Generator(Arc::new(f))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, DefaultPolicy::None)
    }

    /// Computes the default for `key` without touching `map`. Static values
    /// are borrowed, generated ones are owned.
    pub(crate) fn resolve<'a>(
        &'a self,
        map: &OrderedMap<K, V>,
        key: &K,
    ) -> Option<Cow<'a, V>>
    where
        V: Clone,
    {
        match self {
            DefaultPolicy::None => None,
            DefaultPolicy::Static(value) => Some(Cow::Borrowed(&**value)),
            DefaultPolicy::Generator(f) => Some(Cow::Owned(f(map, key))),
        }
    }
}

impl<K, V> Default for DefaultPolicy<K, V> {
    fn default() -> Self {
        DefaultPolicy::None
    }
}

impl<K, V> Clone for DefaultPolicy<K, V> {
    fn clone(&self) -> Self {
        match self {
            DefaultPolicy::None => DefaultPolicy::None,
            DefaultPolicy::Static(value) => DefaultPolicy::Static(value.clone()),
            DefaultPolicy::Generator(f) => DefaultPolicy::Generator(f.clone()),
        }
    }
}

impl<K, V> fmt::Debug for DefaultPolicy<K, V>
where
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultPolicy::None => f.write_str("None"),
            DefaultPolicy::Static(value) => {
                f.debug_tuple("Static").field(value).finish()
            }
            DefaultPolicy::Generator(_) => f.write_str("Generator(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::DefaultPolicy;
    use crate::OrderedMap;

    #[test]
    fn static_defaults_are_borrowed() {
        let map: OrderedMap<u64, String> = OrderedMap::new();
        let policy = DefaultPolicy::fixed("moo".to_owned());

        match policy.resolve(&map, &1) {
            Some(Cow::Borrowed(v)) => assert_eq!("moo", v),
            other => panic!("unexpected resolution {:?}", other),
        }
    }

    #[test]
    fn generators_see_the_map_and_key() {
        let mut map: OrderedMap<u64, u64> = OrderedMap::new();
        map.set(1, 10);
        map.set(2, 20);

        let policy: DefaultPolicy<u64, u64> =
            DefaultPolicy::generator(|map, key| map.len() as u64 * key);

        assert_eq!(Some(Cow::Owned(14)), policy.resolve(&map, &7));
        assert!(DefaultPolicy::<u64, u64>::None.resolve(&map, &7).is_none());
    }

    #[test]
    fn debug_hides_closures() {
        let policy: DefaultPolicy<u64, u64> =
            DefaultPolicy::generator(|_, _| 0);
        assert_eq!("Generator(..)", format!("{:?}", policy));
        assert_eq!("None", format!("{:?}", DefaultPolicy::<u64, u64>::None));
        assert_eq!(
            "Static(5)",
            format!("{:?}", DefaultPolicy::<u64, u64>::fixed(5))
        );
    }
}

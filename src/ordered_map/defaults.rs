//! Reads which fall back on the map's [`DefaultPolicy`], and the strict
//! `fetch` family which doesn't.

use std::{borrow::Borrow, borrow::Cow, fmt};

use tracing::{debug, trace};

use super::{Entry, OrderedMap};
use crate::default_policy::DefaultPolicy;
use crate::errors::MapError;
use crate::Result;

impl<K, V> OrderedMap<K, V> {
    /// Installs a static fallback value, replacing any previous policy.
    pub fn set_default(&mut self, value: V) {
        self.default = DefaultPolicy::fixed(value);
    }

    /// Installs a fallback generator, replacing any previous policy.
    pub fn set_default_fn<F>(&mut self, f: F)
    where
        F: Fn(&OrderedMap<K, V>, &K) -> V + Send + Sync + 'static,
    {
        self.default = DefaultPolicy::generator(f);
    }

    /// Removes the fallback; misses yield nothing again.
    pub fn clear_default(&mut self) {
        self.default = DefaultPolicy::None;
    }

    pub fn default_policy(&self) -> &DefaultPolicy<K, V> {
        &self.default
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: PartialEq,
    V: Clone,
{
    /// Looks `key` up, falling back on the default policy when it's absent.
    ///
    /// The fallback is computed fresh and never stored; use
    /// [`materialize_default`](OrderedMap::materialize_default) for that.
    /// Returns `None` only when the key is absent and there is no policy.
    ///
    /// `key` may be any borrowed form of the key type. A generator only ever
    /// sees owned keys, so a miss under one makes an owned copy first.
    pub fn get<Q>(&self, key: &Q) -> Option<Cow<'_, V>>
    where
        K: Borrow<Q>,
        Q: PartialEq + ToOwned<Owned = K> + ?Sized,
    {
        if let Some(idx) = self.position(key) {
            return Some(Cow::Borrowed(&self.entries[idx].value));
        }

        match &self.default {
            DefaultPolicy::None => None,
            DefaultPolicy::Static(value) => Some(Cow::Borrowed(&**value)),
            DefaultPolicy::Generator(_) => {
                self.default.resolve(self, &key.to_owned())
            }
        }
    }

    /// Populates a missing key with its default.
    ///
    /// When `key` is present its value is returned untouched. Otherwise the
    /// default is computed exactly as [`get`](OrderedMap::get) would and
    /// appended as a real entry. With no default policy nothing is stored.
    pub fn materialize_default(&mut self, key: K) -> Option<&V> {
        if let Some(idx) = self.position(&key) {
            return Some(&self.entries[idx].value);
        }

        let value = self.default.resolve(self, &key)?.into_owned();
        self.entries.push(Entry { key, value });
        trace!(len = self.entries.len(), "materialized default entry");

        self.entries.last().map(|e| &e.value)
    }

    /// Looks `key` up, handing it to `handler` when absent and returning
    /// whatever that produces. The default policy is not consulted.
    pub fn fetch_or_else<Q, F>(&self, key: &Q, handler: F) -> Cow<'_, V>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
        F: FnOnce(&Q) -> V,
    {
        match self.lookup(key) {
            Some(value) => Cow::Borrowed(value),
            None => Cow::Owned(handler(key)),
        }
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: PartialEq,
{
    /// Strict lookup: the value for `key`, or [`MapError::MissingKey`]. The
    /// default policy is not consulted.
    pub fn fetch<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: PartialEq + fmt::Debug + ?Sized,
    {
        self.lookup(key).ok_or_else(|| {
            debug!(key = ?key, "fetch missed");
            MapError::MissingKey {
                key: format!("{:?}", key),
            }
        })
    }
}

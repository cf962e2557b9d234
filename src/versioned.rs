//! Change-counting ordered map.
//!
//! [`VersionedMap`] is the storage behind a node's children, attributes and
//! style. Every mutation that actually changes the content bumps a version
//! counter; the owner compares it with the last version it rendered to decide
//! whether the map is dirty. Writing a value equal to the one already stored
//! is a no-op, which keeps repeated identical updates from forcing re-renders.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;

/// Callback fired synchronously after each effective mutation, with the new
/// version. A node hooks all three of its maps to learn when to notify its
/// ancestors.
pub type ChangeHook = Box<dyn FnMut(u64)>;

/// Insertion-ordered map with a version counter and a single change hook.
pub struct VersionedMap<K, V> {
    entries: IndexMap<K, V>,
    version: u64,
    seen: u64,
    hook: Option<ChangeHook>,
}

impl<K: Hash + Eq, V: PartialEq> VersionedMap<K, V> {
    /// Create an empty, unchanged map.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
            version: 0,
            seen: 0,
            hook: None,
        }
    }

    /// Store `value` under `key`.
    ///
    /// Returns `false` without touching the version when the key already
    /// holds an equal value.
    pub fn set(&mut self, key: K, value: V) -> bool {
        if self.entries.get(&key) == Some(&value) {
            return false;
        }
        self.entries.insert(key, value);
        self.on_change();
        true
    }

    /// Remove `key`, keeping the order of the remaining entries.
    ///
    /// A missing key is a silent no-op.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = self.entries.shift_remove(key)?;
        self.on_change();
        Some(removed)
    }

    /// Remove every entry. Clearing an empty map changes nothing.
    pub fn clear(&mut self) -> bool {
        if self.entries.is_empty() {
            return false;
        }
        self.entries.clear();
        self.on_change();
        true
    }

    /// Bulk update. Equal values are skipped per key; the version moves at
    /// most once for the whole batch.
    pub fn extend(&mut self, items: impl IntoIterator<Item = (K, V)>) -> bool {
        let mut changed = false;
        for (key, value) in items {
            if self.entries.get(&key) != Some(&value) {
                self.entries.insert(key, value);
                changed = true;
            }
        }
        if changed {
            self.on_change();
        }
        changed
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values()
    }

    /// Current version.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Whether the map changed since the last [`mark_seen`](Self::mark_seen).
    pub fn changed(&self) -> bool {
        self.version != self.seen
    }

    /// Record the current version as rendered.
    pub fn mark_seen(&mut self) {
        self.seen = self.version;
    }

    /// Install the change hook, replacing any previous one.
    pub fn on_change_hook(&mut self, hook: impl FnMut(u64) + 'static) {
        self.hook = Some(Box::new(hook));
    }

    fn on_change(&mut self) {
        self.version += 1;
        if let Some(hook) = self.hook.as_mut() {
            hook(self.version);
        }
    }
}

impl<K: Hash + Eq, V: PartialEq> Default for VersionedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for VersionedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VersionedMap")
            .field("entries", &self.entries)
            .field("version", &self.version)
            .field("seen", &self.seen)
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection vocabulary: the [`Selection`] key set and the mode/behavior enums.

use core::hash::Hash;

use hashbrown::HashSet;
use hashbrown::hash_set;

/// Which selection operations a collection permits.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectionMode {
    /// Nothing can be selected; every mutation is a no-op.
    #[default]
    None,
    /// At most one key is selected at a time.
    Single,
    /// Any number of keys can be selected, including ranges.
    Multiple,
}

/// What a plain select action does to an existing selection.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectionBehavior {
    /// Flip membership of the pressed key and keep the rest.
    #[default]
    Toggle,
    /// Replace the whole selection with the pressed key.
    Replace,
}

/// Where focus lands inside a focused composite item (for example a grid row).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FocusStrategy {
    /// Focus the first focusable child.
    First,
    /// Focus the last focusable child.
    Last,
}

/// The kind of pointer that produced an interaction.
///
/// Touch presses always toggle, whatever the configured [`SelectionBehavior`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerType {
    /// A mouse or trackpad.
    Mouse,
    /// A stylus.
    Pen,
    /// A finger on a touch surface.
    Touch,
    /// Keyboard activation (Enter or Space).
    Keyboard,
    /// Activation from assistive technology with no physical pointer.
    Virtual,
}

/// A set of selected keys plus the endpoints of the last range operation.
///
/// `anchor_key` is where a range selection started and `current_key` is where it was most
/// recently extended to. Neither has to be a member of the set: they only have to name keys
/// that were part of the collection when they were recorded.
#[derive(Clone, Debug)]
pub struct Selection<K> {
    keys: HashSet<K>,
    anchor_key: Option<K>,
    current_key: Option<K>,
}

impl<K> Default for Selection<K> {
    fn default() -> Self {
        Self {
            keys: HashSet::new(),
            anchor_key: None,
            current_key: None,
        }
    }
}

impl<K: Clone + Eq + Hash> Selection<K> {
    /// Create an empty selection with no anchor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a selection from keys, with explicit range endpoints.
    pub fn with_endpoints(
        keys: impl IntoIterator<Item = K>,
        anchor_key: Option<K>,
        current_key: Option<K>,
    ) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            anchor_key,
            current_key,
        }
    }

    /// Create a selection holding exactly `key`, anchored on it.
    pub fn single(key: K) -> Self {
        Self::with_endpoints([key.clone()], Some(key.clone()), Some(key))
    }

    /// Copy `other`'s keys, overriding its endpoints when `Some` is passed.
    pub fn derived_from(other: &Self, anchor_key: Option<K>, current_key: Option<K>) -> Self {
        Self {
            keys: other.keys.clone(),
            anchor_key: anchor_key.or_else(|| other.anchor_key.clone()),
            current_key: current_key.or_else(|| other.current_key.clone()),
        }
    }

    /// Key from which the last range selection started.
    pub fn anchor_key(&self) -> Option<&K> {
        self.anchor_key.as_ref()
    }

    /// Key the last range selection was extended to.
    pub fn current_key(&self) -> Option<&K> {
        self.current_key.as_ref()
    }

    /// Replace the anchor key.
    pub fn set_anchor_key(&mut self, key: Option<K>) {
        self.anchor_key = key;
    }

    /// Replace the current key.
    pub fn set_current_key(&mut self, key: Option<K>) {
        self.current_key = key;
    }

    /// Add `key`; returns `true` if it was not already present.
    pub fn insert(&mut self, key: K) -> bool {
        self.keys.insert(key)
    }

    /// Remove `key`; returns `true` if it was present.
    pub fn remove(&mut self, key: &K) -> bool {
        self.keys.remove(key)
    }

    /// Whether `key` is a member.
    pub fn contains(&self, key: &K) -> bool {
        self.keys.contains(key)
    }

    /// Number of selected keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no key is selected.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterate the selected keys in unspecified order.
    pub fn iter(&self) -> hash_set::Iter<'_, K> {
        self.keys.iter()
    }

    /// Membership equality, ignoring the range endpoints.
    pub fn same_keys(&self, other: &Self) -> bool {
        self.keys.len() == other.keys.len() && self.keys.iter().all(|k| other.keys.contains(k))
    }
}

impl<K: Clone + Eq + Hash> FromIterator<K> for Selection<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self::with_endpoints(iter, None, None)
    }
}

impl<'a, K> IntoIterator for &'a Selection<K> {
    type Item = &'a K;
    type IntoIter = hash_set::Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The selection policy engine.
//!
//! A [`SelectionManager`] borrows the widget's current [`Collection`] and its
//! [`SelectionState`] and is the only thing that writes selection state. It is cheap to build,
//! so callers construct one per event against the latest collection.
//!
//! Every mutation is a silent no-op when the mode is [`SelectionMode::None`], when a key does
//! not resolve to an item of the current collection, or when it would empty the selection while
//! [`SelectionState::disallow_empty_selection`] is set.

use core::hash::Hash;

use smallvec::SmallVec;

use crate::collection::{Collection, CollectionNode};
use crate::selection::{FocusStrategy, PointerType, Selection, SelectionBehavior, SelectionMode};
use crate::state::SelectionState;

const LOG_TARGET: &str = "trellis_selection::manager";

type KeyRange<K> = SmallVec<[K; 8]>;

/// Applies selection-mode rules to a collection's selection state.
pub struct SelectionManager<'a, K, C: ?Sized> {
    collection: &'a C,
    state: &'a mut SelectionState<K>,
}

impl<K: core::fmt::Debug, C: ?Sized> core::fmt::Debug for SelectionManager<'_, K, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SelectionManager")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<'a, K, C> SelectionManager<'a, K, C>
where
    K: Clone + Eq + Hash,
    C: Collection<K> + ?Sized,
{
    /// Wrap a collection and its state.
    pub fn new(collection: &'a C, state: &'a mut SelectionState<K>) -> Self {
        Self { collection, state }
    }

    /// The collection this manager resolves keys against.
    pub fn collection(&self) -> &'a C {
        self.collection
    }

    /// Read access to the underlying state.
    pub fn state(&self) -> &SelectionState<K> {
        self.state
    }

    /// Current selection mode.
    pub fn selection_mode(&self) -> SelectionMode {
        self.state.selection_mode()
    }

    /// Whether mutations may leave the selection empty.
    pub fn disallow_empty_selection(&self) -> bool {
        self.state.disallow_empty_selection()
    }

    /// The live selection behavior.
    pub fn selection_behavior(&self) -> SelectionBehavior {
        self.state.selection_behavior()
    }

    /// Switch the live selection behavior.
    pub fn set_selection_behavior(&mut self, behavior: SelectionBehavior) {
        self.state.set_selection_behavior(behavior);
    }

    /// Whether the collection has focus.
    pub fn is_focused(&self) -> bool {
        self.state.is_focused()
    }

    /// Record whether the collection has focus.
    pub fn set_focused(&mut self, focused: bool) {
        self.state.set_focused(focused);
    }

    /// The focused key.
    pub fn focused_key(&self) -> Option<&K> {
        self.state.focused_key()
    }

    /// Where focus should land inside the focused item.
    pub fn child_focus_strategy(&self) -> Option<FocusStrategy> {
        self.state.child_focus_strategy()
    }

    /// Focus `key`, or clear focus with `None`. Keys missing from the collection are ignored.
    pub fn set_focused_key(&mut self, key: Option<K>) {
        self.set_focused_key_with_strategy(key, None);
    }

    /// Focus `key` and record how focus should enter it.
    pub fn set_focused_key_with_strategy(
        &mut self,
        key: Option<K>,
        strategy: Option<FocusStrategy>,
    ) {
        if let Some(k) = &key {
            if self.collection.item(k).is_none() {
                tracing::debug!(
                    target: LOG_TARGET,
                    "ignoring focus of a key missing from the collection"
                );
                return;
            }
        }
        self.state.set_focused_key_with_strategy(key, strategy);
    }

    /// The selected keys.
    pub fn selected_keys(&self) -> &Selection<K> {
        self.state.selected_keys()
    }

    /// Number of selected keys.
    pub fn selection_size(&self) -> usize {
        self.state.selected_keys().len()
    }

    /// Whether no key is selected.
    pub fn is_empty(&self) -> bool {
        self.state.selected_keys().is_empty()
    }

    // Cells and other non-item nodes stand in for their nearest item ancestor.
    fn resolve(&self, key: &K) -> Option<&'a K> {
        let collection = self.collection;
        let mut node = collection.item(key)?;
        while !node.is_item() {
            node = collection.item(node.parent_key.as_ref()?)?;
        }
        Some(&node.key)
    }

    /// Whether `key` resolves to a selected item.
    pub fn is_selected(&self, key: &K) -> bool {
        if self.selection_mode() == SelectionMode::None {
            return false;
        }
        self.resolve(key)
            .is_some_and(|k| self.state.selected_keys().contains(k))
    }

    /// Whether every selectable item is selected (and at least one is).
    pub fn is_select_all(&self) -> bool {
        if self.is_empty() {
            return false;
        }
        let selected = self.state.selected_keys();
        self.selectable_nodes().all(|n| selected.contains(&n.key))
    }

    /// The selected item with the lowest index.
    pub fn first_selected_key(&self) -> Option<&'a K> {
        self.selected_nodes().min_by_key(|n| n.index).map(|n| &n.key)
    }

    /// The selected item with the highest index.
    pub fn last_selected_key(&self) -> Option<&'a K> {
        // `max_by_key` keeps the last maximum; fold keeps the first one seen.
        self.selected_nodes()
            .fold(None::<&CollectionNode<K>>, |best, n| match best {
                Some(b) if b.index >= n.index => Some(b),
                _ => Some(n),
            })
            .map(|n| &n.key)
    }

    fn selected_nodes(&self) -> impl Iterator<Item = &'a CollectionNode<K>> + '_ {
        let collection = self.collection;
        self.state
            .selected_keys()
            .iter()
            .filter_map(move |k| collection.item(k))
    }

    fn nodes(&self) -> impl Iterator<Item = &'a CollectionNode<K>> {
        let collection = self.collection;
        core::iter::successors(
            collection.first_key().and_then(|k| collection.item(k)),
            move |n| collection.key_after(&n.key).and_then(|k| collection.item(k)),
        )
    }

    fn selectable_nodes(&self) -> impl Iterator<Item = &'a CollectionNode<K>> + '_ {
        self.nodes()
            .filter(move |n| n.is_item() && self.can_select_item(&n.key))
    }

    /// Extend a range selection from the anchor to `to_key`.
    ///
    /// In single mode this degrades to [`replace_selection`](Self::replace_selection). In
    /// multiple mode the keys between the anchor and the previous current key are dropped and
    /// the selectable keys between the anchor and `to_key` are added.
    pub fn extend_selection(&mut self, to_key: &K) {
        match self.selection_mode() {
            SelectionMode::None => {}
            SelectionMode::Single => self.replace_selection(to_key),
            SelectionMode::Multiple => {
                let Some(to_key) = self.resolve(to_key) else {
                    tracing::debug!(target: LOG_TARGET, "extend_selection: key does not resolve");
                    return;
                };
                let selected = self.state.selected_keys();
                let selection = if selected.is_empty() {
                    if !self.can_select_item(to_key) {
                        return;
                    }
                    Selection::single(to_key.clone())
                } else {
                    let anchor = selected.anchor_key().unwrap_or(to_key).clone();
                    let current = selected.current_key().unwrap_or(to_key).clone();
                    let mut next = Selection::derived_from(
                        selected,
                        Some(anchor.clone()),
                        Some(to_key.clone()),
                    );
                    for key in self.key_range(&anchor, &current) {
                        next.remove(&key);
                    }
                    for key in self.key_range(to_key, &anchor) {
                        if self.can_select_item(&key) {
                            next.insert(key);
                        }
                    }
                    next
                };
                self.commit(selection);
            }
        }
    }

    // Item keys between `from` and `to` inclusive, in collection order.
    fn key_range(&self, from: &K, to: &K) -> KeyRange<K> {
        let collection = self.collection;
        let (Some(a), Some(b)) = (collection.item(from), collection.item(to)) else {
            return KeyRange::new();
        };
        let (start, end) = if a.index <= b.index { (a, b) } else { (b, a) };

        let mut keys = KeyRange::new();
        let mut cursor = Some(&start.key);
        while let Some(key) = cursor {
            if collection.item(key).is_some_and(|n| n.is_item()) {
                keys.push(key.clone());
            }
            if *key == end.key {
                return keys;
            }
            cursor = collection.key_after(key);
        }
        KeyRange::new()
    }

    /// Flip membership of `key`.
    ///
    /// Adding a key makes it both the anchor and the current key. In single mode an unselected
    /// key replaces the selection instead.
    pub fn toggle_selection(&mut self, key: &K) {
        let mode = self.selection_mode();
        if mode == SelectionMode::None {
            return;
        }
        if mode == SelectionMode::Single && !self.is_selected(key) {
            self.replace_selection(key);
            return;
        }
        let Some(key) = self.resolve(key) else {
            return;
        };

        let mut next = Selection::derived_from(self.state.selected_keys(), None, None);
        if next.contains(key) {
            next.remove(key);
        } else if self.can_select_item(key) {
            next.insert(key.clone());
            next.set_anchor_key(Some(key.clone()));
            next.set_current_key(Some(key.clone()));
        }

        if next.is_empty() && self.disallow_empty_selection() {
            tracing::debug!(
                target: LOG_TARGET,
                "toggle_selection would empty a non-empty selection"
            );
            return;
        }
        self.commit(next);
    }

    /// Replace the selection with `key`, or empty it if `key` cannot be selected.
    pub fn replace_selection(&mut self, key: &K) {
        if self.selection_mode() == SelectionMode::None {
            return;
        }
        let Some(key) = self.resolve(key) else {
            return;
        };
        let next = if self.can_select_item(key) {
            Selection::single(key.clone())
        } else {
            Selection::new()
        };
        if next.is_empty() && !self.is_empty() && self.disallow_empty_selection() {
            tracing::debug!(
                target: LOG_TARGET,
                "replace_selection would empty a non-empty selection"
            );
            return;
        }
        self.commit(next);
    }

    /// Replace the selection with the resolvable keys among `keys`.
    ///
    /// Single mode keeps only the first key that resolves.
    pub fn set_selected_keys<'k>(&mut self, keys: impl IntoIterator<Item = &'k K>)
    where
        K: 'k,
    {
        let mode = self.selection_mode();
        if mode == SelectionMode::None {
            return;
        }
        let mut next = Selection::new();
        for key in keys {
            if let Some(key) = self.resolve(key) {
                next.insert(key.clone());
                if mode == SelectionMode::Single {
                    break;
                }
            }
        }
        self.commit(next);
    }

    /// Select every selectable item. Multiple mode only.
    pub fn select_all(&mut self) {
        if self.selection_mode() != SelectionMode::Multiple {
            return;
        }
        let next: Selection<K> = self.selectable_nodes().map(|n| n.key.clone()).collect();
        self.commit(next);
    }

    /// Empty the selection, unless emptiness is disallowed.
    pub fn clear_selection(&mut self) {
        if self.selection_mode() == SelectionMode::None {
            return;
        }
        if self.disallow_empty_selection() && !self.is_empty() {
            tracing::debug!(
                target: LOG_TARGET,
                "clear_selection rejected: empty selection disallowed"
            );
            return;
        }
        self.commit(Selection::new());
    }

    /// Clear when everything is selected, otherwise select everything.
    pub fn toggle_select_all(&mut self) {
        if self.is_select_all() {
            self.clear_selection();
        } else {
            self.select_all();
        }
    }

    /// The primary entry point for item presses.
    ///
    /// Single mode toggles a selected key off (when allowed) and otherwise replaces. Multiple
    /// mode toggles when the behavior is [`SelectionBehavior::Toggle`] or the press came from
    /// touch, and replaces otherwise.
    pub fn select(&mut self, key: &K, pointer_type: Option<PointerType>) {
        match self.selection_mode() {
            SelectionMode::None => {}
            SelectionMode::Single => {
                if self.is_selected(key) && !self.disallow_empty_selection() {
                    self.toggle_selection(key);
                } else {
                    self.replace_selection(key);
                }
            }
            SelectionMode::Multiple => {
                if self.selection_behavior() == SelectionBehavior::Toggle
                    || pointer_type == Some(PointerType::Touch)
                {
                    self.toggle_selection(key);
                } else {
                    self.replace_selection(key);
                }
            }
        }
    }

    /// Whether `selection` has the same members as the current selection.
    pub fn is_selection_equal(&self, selection: &Selection<K>) -> bool {
        let current = self.state.selected_keys();
        core::ptr::eq(selection, current) || current.same_keys(selection)
    }

    /// Whether `key` names an enabled node and selection is enabled.
    pub fn can_select_item(&self, key: &K) -> bool {
        self.selection_mode() != SelectionMode::None
            && self.collection.item(key).is_some_and(|n| !n.disabled)
    }

    /// Whether `key` is missing from the collection or disabled.
    pub fn is_disabled(&self, key: &K) -> bool {
        self.collection.item(key).is_none_or(|n| n.disabled)
    }

    fn commit(&mut self, selection: Selection<K>) {
        if self.state.set_selected_keys(selection) {
            tracing::trace!(
                target: LOG_TARGET,
                size = self.state.selected_keys().len(),
                "selection changed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::{CollectionNode, ListCollection};
    use crate::state::SelectionConfig;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::Cell;

    fn list(keys: &[&'static str]) -> ListCollection<&'static str> {
        ListCollection::new(keys.iter().map(|&k| CollectionNode::item(k, k))).unwrap()
    }

    fn state(mode: SelectionMode) -> SelectionState<&'static str> {
        SelectionState::new(SelectionConfig {
            selection_mode: mode,
            ..SelectionConfig::default()
        })
    }

    fn sorted(sel: &Selection<&'static str>) -> Vec<&'static str> {
        let mut keys: Vec<_> = sel.iter().copied().collect();
        keys.sort_unstable();
        keys
    }

    #[test]
    fn extend_replaces_previous_range() {
        let items = list(&["a", "b", "c", "d", "e"]);
        let mut st = state(SelectionMode::Multiple);
        let mut m = SelectionManager::new(&items, &mut st);

        m.toggle_selection(&"c");
        m.extend_selection(&"a");
        assert_eq!(sorted(m.selected_keys()), ["a", "b", "c"]);
        assert_eq!(m.selected_keys().anchor_key(), Some(&"c"));
        assert_eq!(m.selected_keys().current_key(), Some(&"a"));

        m.extend_selection(&"e");
        assert_eq!(sorted(m.selected_keys()), ["c", "d", "e"]);
    }

    #[test]
    fn extend_keeps_keys_outside_the_range() {
        let items = list(&["a", "b", "c", "d", "e"]);
        let mut st = state(SelectionMode::Multiple);
        let mut m = SelectionManager::new(&items, &mut st);

        m.toggle_selection(&"a");
        m.toggle_selection(&"d");
        m.extend_selection(&"e");
        assert_eq!(sorted(m.selected_keys()), ["a", "d", "e"]);
    }

    #[test]
    fn extend_from_empty_selects_target() {
        let items = list(&["a", "b"]);
        let mut st = state(SelectionMode::Multiple);
        let mut m = SelectionManager::new(&items, &mut st);

        m.extend_selection(&"b");
        assert_eq!(sorted(m.selected_keys()), ["b"]);
        assert_eq!(m.selected_keys().anchor_key(), Some(&"b"));
    }

    #[test]
    fn extend_skips_disabled_items() {
        let items = ListCollection::new([
            CollectionNode::item("a", "a"),
            CollectionNode::item("b", "b").disabled(),
            CollectionNode::item("c", "c"),
        ])
        .unwrap();
        let mut st = state(SelectionMode::Multiple);
        let mut m = SelectionManager::new(&items, &mut st);

        m.toggle_selection(&"a");
        m.extend_selection(&"c");
        assert_eq!(sorted(m.selected_keys()), ["a", "c"]);
    }

    #[test]
    fn extend_in_single_mode_replaces() {
        let items = list(&["a", "b", "c"]);
        let mut st = state(SelectionMode::Single);
        let mut m = SelectionManager::new(&items, &mut st);

        m.replace_selection(&"a");
        m.extend_selection(&"c");
        assert_eq!(sorted(m.selected_keys()), ["c"]);
    }

    #[test]
    fn range_ignores_sections() {
        let items = ListCollection::new([
            CollectionNode::item("a", "a"),
            CollectionNode::section("s", "Section"),
            CollectionNode::item("b", "b"),
        ])
        .unwrap();
        let mut st = state(SelectionMode::Multiple);
        let mut m = SelectionManager::new(&items, &mut st);

        m.toggle_selection(&"a");
        m.extend_selection(&"b");
        assert_eq!(sorted(m.selected_keys()), ["a", "b"]);
    }

    #[test]
    fn mode_none_ignores_every_mutation() {
        let items = list(&["a", "b"]);
        let mut st = state(SelectionMode::None);
        let mut m = SelectionManager::new(&items, &mut st);

        m.toggle_selection(&"a");
        m.replace_selection(&"a");
        m.extend_selection(&"b");
        m.select_all();
        m.set_selected_keys([&"a", &"b"]);
        m.select(&"a", None);
        m.clear_selection();
        assert!(m.is_empty());
        assert!(!m.is_selected(&"a"));
        assert!(!m.can_select_item(&"a"));
    }

    #[test]
    fn disallow_empty_keeps_last_key() {
        let items = list(&["a", "b"]);
        let mut st = SelectionState::new(SelectionConfig {
            selection_mode: SelectionMode::Multiple,
            disallow_empty_selection: true,
            ..SelectionConfig::default()
        });
        let mut m = SelectionManager::new(&items, &mut st);

        m.toggle_selection(&"a");
        m.toggle_selection(&"a");
        assert_eq!(m.selection_size(), 1);
        m.clear_selection();
        assert_eq!(m.selection_size(), 1);
        assert!(m.is_selected(&"a"));
    }

    #[test]
    fn rejected_mutations_do_not_notify() {
        let items = list(&["a"]);
        let mut st = SelectionState::new(SelectionConfig {
            selection_mode: SelectionMode::Multiple,
            disallow_empty_selection: true,
            ..SelectionConfig::default()
        });
        let calls = Rc::new(Cell::new(0_u32));
        let sink = Rc::clone(&calls);
        st.subscribe(move |_| sink.set(sink.get() + 1));
        let mut m = SelectionManager::new(&items, &mut st);

        m.toggle_selection(&"a");
        assert_eq!(calls.get(), 1);
        m.clear_selection();
        m.toggle_selection(&"a");
        m.set_selected_keys([&"a"]);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn select_all_skips_disabled() {
        let items = ListCollection::new([
            CollectionNode::item("a", "a"),
            CollectionNode::item("b", "b").disabled(),
            CollectionNode::item("c", "c"),
        ])
        .unwrap();
        let mut st = state(SelectionMode::Multiple);
        let mut m = SelectionManager::new(&items, &mut st);

        m.select_all();
        assert_eq!(sorted(m.selected_keys()), ["a", "c"]);
        assert!(m.is_select_all());
    }

    #[test]
    fn toggle_select_all_round_trips() {
        let items = list(&["a", "b", "c"]);
        let mut st = state(SelectionMode::Multiple);
        let mut m = SelectionManager::new(&items, &mut st);

        m.toggle_select_all();
        assert_eq!(m.selection_size(), 3);
        m.toggle_select_all();
        assert!(m.is_empty());
    }

    #[test]
    fn select_all_requires_multiple_mode() {
        let items = list(&["a", "b"]);
        let mut st = state(SelectionMode::Single);
        let mut m = SelectionManager::new(&items, &mut st);

        m.select_all();
        assert!(m.is_empty());
    }

    #[test]
    fn touch_always_toggles() {
        let items = list(&["a", "b"]);
        let mut st = SelectionState::new(SelectionConfig {
            selection_mode: SelectionMode::Multiple,
            selection_behavior: SelectionBehavior::Replace,
            ..SelectionConfig::default()
        });
        let mut m = SelectionManager::new(&items, &mut st);

        m.select(&"a", Some(PointerType::Mouse));
        m.select(&"b", Some(PointerType::Mouse));
        assert_eq!(sorted(m.selected_keys()), ["b"]);

        m.select(&"a", Some(PointerType::Touch));
        assert_eq!(sorted(m.selected_keys()), ["a", "b"]);
        m.select(&"b", Some(PointerType::Touch));
        assert_eq!(sorted(m.selected_keys()), ["a"]);
    }

    #[test]
    fn single_select_toggles_off_selected_key() {
        let items = list(&["a", "b"]);
        let mut st = state(SelectionMode::Single);
        let mut m = SelectionManager::new(&items, &mut st);

        m.select(&"a", None);
        assert!(m.is_selected(&"a"));
        m.select(&"b", None);
        assert_eq!(sorted(m.selected_keys()), ["b"]);
        m.select(&"b", None);
        assert!(m.is_empty());
    }

    #[test]
    fn single_mode_set_keeps_first_resolvable_key() {
        let items = list(&["a", "b"]);
        let mut st = state(SelectionMode::Single);
        let mut m = SelectionManager::new(&items, &mut st);

        m.set_selected_keys([&"zzz", &"b", &"a"]);
        assert_eq!(sorted(m.selected_keys()), ["b"]);
    }

    #[test]
    fn replace_with_disabled_key_empties_unless_disallowed() {
        let items = ListCollection::new([
            CollectionNode::item("a", "a"),
            CollectionNode::item("b", "b").disabled(),
        ])
        .unwrap();
        let mut st = state(SelectionMode::Multiple);
        let mut m = SelectionManager::new(&items, &mut st);
        m.replace_selection(&"a");
        m.replace_selection(&"b");
        assert!(m.is_empty());

        let mut st = SelectionState::new(SelectionConfig {
            selection_mode: SelectionMode::Multiple,
            disallow_empty_selection: true,
            ..SelectionConfig::default()
        });
        let mut m = SelectionManager::new(&items, &mut st);
        m.replace_selection(&"a");
        m.replace_selection(&"b");
        assert_eq!(sorted(m.selected_keys()), ["a"]);
    }

    #[test]
    fn first_and_last_follow_collection_order() {
        let items = list(&["a", "b", "c", "d"]);
        let mut st = state(SelectionMode::Multiple);
        let mut m = SelectionManager::new(&items, &mut st);

        m.set_selected_keys([&"c", &"b", &"d"]);
        assert_eq!(m.first_selected_key(), Some(&"b"));
        assert_eq!(m.last_selected_key(), Some(&"d"));
    }

    #[test]
    fn cells_resolve_to_their_row() {
        let items = ListCollection::new([
            CollectionNode::item("row", "Row"),
            CollectionNode::cell("row/cell", "row", "Cell"),
        ])
        .unwrap();
        let mut st = state(SelectionMode::Multiple);
        let mut m = SelectionManager::new(&items, &mut st);

        m.toggle_selection(&"row/cell");
        assert!(m.is_selected(&"row"));
        assert!(m.is_selected(&"row/cell"));
        assert_eq!(sorted(m.selected_keys()), ["row"]);
    }

    #[test]
    fn stale_focus_keys_are_ignored() {
        let items = list(&["a"]);
        let mut st = state(SelectionMode::Single);
        let mut m = SelectionManager::new(&items, &mut st);

        m.set_focused_key(Some("a"));
        m.set_focused_key(Some("gone"));
        assert_eq!(m.focused_key(), Some(&"a"));
        m.set_focused_key(None);
        assert_eq!(m.focused_key(), None);
        assert!(m.is_disabled(&"gone"));
    }

    #[test]
    fn selection_equality_is_by_membership() {
        let items = list(&["a", "b"]);
        let mut st = state(SelectionMode::Multiple);
        let mut m = SelectionManager::new(&items, &mut st);

        m.set_selected_keys([&"a", &"b"]);
        let same: Selection<&str> = ["b", "a"].into_iter().collect();
        let other: Selection<&str> = ["a"].into_iter().collect();
        assert!(m.is_selection_equal(&same));
        assert!(!m.is_selection_equal(&other));
        assert!(m.is_selection_equal(m.selected_keys()));
    }
}

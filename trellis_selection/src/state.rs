// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Observable storage for selection and focus state.
//!
//! [`SelectionState`] is owned by the widget for its whole lifetime. It stores the selected keys,
//! the focused key, and the live [`SelectionBehavior`], and notifies subscribed listeners when
//! any of them change. Widgets never mutate it directly: all writes go through
//! [`SelectionManager`](crate::SelectionManager), which applies the selection-mode rules first.
//!
//! The selected keys are either *uncontrolled* (stored here, seeded from
//! [`SelectionConfig::default_selected_keys`]) or *controlled* (owned by the caller, see
//! [`SelectionState::controlled`]).

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use crate::selection::{FocusStrategy, Selection, SelectionBehavior, SelectionMode};

/// Construction options for a [`SelectionState`].
#[derive(Clone, Debug)]
pub struct SelectionConfig<K> {
    /// Which operations are permitted. Defaults to [`SelectionMode::None`].
    pub selection_mode: SelectionMode,
    /// What a plain select action does. Defaults to [`SelectionBehavior::Toggle`].
    pub selection_behavior: SelectionBehavior,
    /// Reject mutations that would leave the selection empty.
    pub disallow_empty_selection: bool,
    /// Emit a change even when the new keys equal the current ones.
    pub allow_duplicate_selection_events: bool,
    /// Initial keys of an uncontrolled state.
    pub default_selected_keys: Selection<K>,
}

impl<K> Default for SelectionConfig<K> {
    fn default() -> Self {
        Self {
            selection_mode: SelectionMode::None,
            selection_behavior: SelectionBehavior::Toggle,
            disallow_empty_selection: false,
            allow_duplicate_selection_events: false,
            default_selected_keys: Selection::default(),
        }
    }
}

/// A change reported to [`SelectionState`] listeners.
#[derive(Debug)]
pub enum StateChange<'a, K> {
    /// The selected keys changed (or were requested to change, when controlled).
    Selection(&'a Selection<K>),
    /// The collection gained or lost focus.
    Focused(bool),
    /// The focused key changed.
    FocusedKey(Option<&'a K>),
    /// The live selection behavior changed.
    Behavior(SelectionBehavior),
}

/// Handle returned by [`SelectionState::subscribe`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<K> = Box<dyn FnMut(&StateChange<'_, K>)>;

/// Selection and focus state for one collection widget.
pub struct SelectionState<K> {
    selection_mode: SelectionMode,
    disallow_empty_selection: bool,
    allow_duplicate_selection_events: bool,
    configured_behavior: SelectionBehavior,
    behavior: SelectionBehavior,
    selected: Selection<K>,
    controlled: bool,
    focused: bool,
    focused_key: Option<K>,
    child_focus_strategy: Option<FocusStrategy>,
    listeners: Vec<(ListenerId, Listener<K>)>,
    next_listener: u64,
}

impl<K: fmt::Debug> fmt::Debug for SelectionState<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionState")
            .field("selection_mode", &self.selection_mode)
            .field("disallow_empty_selection", &self.disallow_empty_selection)
            .field(
                "allow_duplicate_selection_events",
                &self.allow_duplicate_selection_events,
            )
            .field("configured_behavior", &self.configured_behavior)
            .field("behavior", &self.behavior)
            .field("selected", &self.selected)
            .field("controlled", &self.controlled)
            .field("focused", &self.focused)
            .field("focused_key", &self.focused_key)
            .field("child_focus_strategy", &self.child_focus_strategy)
            .field("listeners", &self.listeners.len())
            .field("next_listener", &self.next_listener)
            .finish()
    }
}

impl<K: Clone + Eq + Hash> SelectionState<K> {
    /// Create an uncontrolled state seeded from `config.default_selected_keys`.
    pub fn new(config: SelectionConfig<K>) -> Self {
        Self {
            selection_mode: config.selection_mode,
            disallow_empty_selection: config.disallow_empty_selection,
            allow_duplicate_selection_events: config.allow_duplicate_selection_events,
            configured_behavior: config.selection_behavior,
            behavior: config.selection_behavior,
            selected: config.default_selected_keys,
            controlled: false,
            focused: false,
            focused_key: None,
            child_focus_strategy: None,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Create a controlled state whose selected keys are owned by the caller.
    ///
    /// [`set_selected_keys`](Self::set_selected_keys) only notifies listeners; the caller
    /// decides whether to accept the value and pushes it back with
    /// [`sync_selected_keys`](Self::sync_selected_keys).
    pub fn controlled(config: SelectionConfig<K>, value: Selection<K>) -> Self {
        Self {
            selected: value,
            controlled: true,
            ..Self::new(config)
        }
    }

    /// Register a change listener.
    pub fn subscribe(&mut self, listener: impl FnMut(&StateChange<'_, K>) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn emit(listeners: &mut [(ListenerId, Listener<K>)], change: &StateChange<'_, K>) {
        for (_, listener) in listeners.iter_mut() {
            listener(change);
        }
    }

    /// Current selection mode.
    pub fn selection_mode(&self) -> SelectionMode {
        self.selection_mode
    }

    /// Update the selection mode.
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        self.selection_mode = mode;
    }

    /// Whether mutations may leave the selection empty.
    pub fn disallow_empty_selection(&self) -> bool {
        self.disallow_empty_selection
    }

    /// Update the disallow-empty flag.
    pub fn set_disallow_empty_selection(&mut self, disallow: bool) {
        self.disallow_empty_selection = disallow;
    }

    /// The live selection behavior.
    pub fn selection_behavior(&self) -> SelectionBehavior {
        self.behavior
    }

    /// Switch the live selection behavior (for example after a touch long press).
    pub fn set_selection_behavior(&mut self, behavior: SelectionBehavior) {
        if self.behavior != behavior {
            self.behavior = behavior;
            Self::emit(&mut self.listeners, &StateChange::Behavior(behavior));
        }
    }

    /// Change the configured behavior; the live behavior follows it.
    pub fn set_configured_behavior(&mut self, behavior: SelectionBehavior) {
        self.configured_behavior = behavior;
        self.set_selection_behavior(behavior);
    }

    /// Whether the selected keys are owned by the caller.
    pub fn is_controlled(&self) -> bool {
        self.controlled
    }

    /// The selected keys.
    pub fn selected_keys(&self) -> &Selection<K> {
        &self.selected
    }

    /// Request new selected keys; returns `true` if a change was emitted.
    ///
    /// Unless duplicate events are allowed, a value with the same members as the current
    /// selection is ignored entirely.
    pub fn set_selected_keys(&mut self, keys: Selection<K>) -> bool {
        if !self.allow_duplicate_selection_events && keys.same_keys(&self.selected) {
            return false;
        }
        let emptied = keys.is_empty();
        if self.controlled {
            Self::emit(&mut self.listeners, &StateChange::Selection(&keys));
        } else {
            self.selected = keys;
            Self::emit(&mut self.listeners, &StateChange::Selection(&self.selected));
        }
        if emptied {
            self.revert_behavior_on_empty();
        }
        true
    }

    /// Install the caller-owned value of a controlled state without notifying listeners.
    pub fn sync_selected_keys(&mut self, keys: Selection<K>) {
        let emptied = keys.is_empty();
        self.selected = keys;
        if emptied {
            self.revert_behavior_on_empty();
        }
    }

    // A long press can escalate `Replace` to `Toggle`; once the selection is empty again the
    // configured behavior comes back.
    fn revert_behavior_on_empty(&mut self) {
        if self.configured_behavior == SelectionBehavior::Replace
            && self.behavior == SelectionBehavior::Toggle
        {
            self.set_selection_behavior(SelectionBehavior::Replace);
        }
    }

    /// Whether the collection has focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Record whether the collection has focus.
    pub fn set_focused(&mut self, focused: bool) {
        if self.focused != focused {
            self.focused = focused;
            Self::emit(&mut self.listeners, &StateChange::Focused(focused));
        }
    }

    /// The focused key.
    pub fn focused_key(&self) -> Option<&K> {
        self.focused_key.as_ref()
    }

    /// Where focus should land inside the focused item, if it is a composite.
    pub fn child_focus_strategy(&self) -> Option<FocusStrategy> {
        self.child_focus_strategy
    }

    /// Set the focused key.
    pub fn set_focused_key(&mut self, key: Option<K>) {
        self.set_focused_key_with_strategy(key, None);
    }

    /// Set the focused key and the child focus strategy together.
    pub fn set_focused_key_with_strategy(
        &mut self,
        key: Option<K>,
        strategy: Option<FocusStrategy>,
    ) {
        self.child_focus_strategy = strategy;
        if self.focused_key != key {
            self.focused_key = key;
            Self::emit(
                &mut self.listeners,
                &StateChange::FocusedKey(self.focused_key.as_ref()),
            );
        }
    }
}

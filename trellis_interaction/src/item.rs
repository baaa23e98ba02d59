// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-item controller: decides when a press becomes a selection.
//!
//! A mouse selects on pointer down so dragging feels immediate. Touch, pen, keyboard, and
//! virtual activations select on click instead, after the press is known not to be a scroll or
//! a long press. `should_select_on_press_up` moves mouse selection to the release, and
//! `allows_different_press_origin` lets that release land on a different item than the press.

use core::hash::Hash;

use trellis_selection::{
    Collection, PointerType, SelectionBehavior, SelectionManager, SelectionMode,
};

use crate::event::{EventTarget, FocusEvent, Key, KeyEvent, Modifiers, Platform, PointerEvent};
use crate::host::ItemElement;

/// Options for a [`SelectableItem`].
#[derive(Copy, Clone, Debug, Default)]
pub struct ItemOptions {
    /// Mouse presses select on release rather than on press.
    pub should_select_on_press_up: bool,
    /// With `should_select_on_press_up`, select on pointer up even if the press began elsewhere.
    pub allows_different_press_origin: bool,
    /// Focus stays on the collection container.
    pub should_use_virtual_focus: bool,
    /// The item is disabled regardless of the collection.
    pub disabled: bool,
    /// The item is rendered by an external virtualizer.
    pub virtualized: bool,
    /// Modifier conventions.
    pub platform: Platform,
}

/// Selection controller for one item of a collection.
#[derive(Clone, Debug)]
pub struct SelectableItem<K> {
    key: K,
    options: ItemOptions,
    pointer_down_type: Option<PointerType>,
    long_pressed: bool,
}

impl<K: Clone + Eq + Hash> SelectableItem<K> {
    /// Create a controller for `key`.
    pub fn new(key: K, options: ItemOptions) -> Self {
        Self {
            key,
            options,
            pointer_down_type: None,
            long_pressed: false,
        }
    }

    /// The item's key.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Current options.
    pub fn options(&self) -> &ItemOptions {
        &self.options
    }

    /// Mutable options, for syncing changed widget properties.
    pub fn options_mut(&mut self) -> &mut ItemOptions {
        &mut self.options
    }

    /// Whether this item is selected.
    pub fn is_selected<C: Collection<K> + ?Sized>(
        &self,
        manager: &SelectionManager<'_, K, C>,
    ) -> bool {
        manager.is_selected(&self.key)
    }

    /// Whether this item is disabled, by its own options or by the collection.
    pub fn is_disabled<C: Collection<K> + ?Sized>(
        &self,
        manager: &SelectionManager<'_, K, C>,
    ) -> bool {
        self.options.disabled || manager.is_disabled(&self.key)
    }

    /// Whether pressing this item can change the selection.
    pub fn allows_selection<C: Collection<K> + ?Sized>(
        &self,
        manager: &SelectionManager<'_, K, C>,
    ) -> bool {
        !self.options.disabled && manager.can_select_item(&self.key)
    }

    /// Whether this item holds the collection's focus.
    pub fn is_focused<C: Collection<K> + ?Sized>(
        &self,
        manager: &SelectionManager<'_, K, C>,
    ) -> bool {
        manager.is_focused() && manager.focused_key() == Some(&self.key)
    }

    /// Tab index for the item element: `Some(0)` for the focused key, `Some(-1)` otherwise, and
    /// `None` with virtual focus or when disabled.
    pub fn tab_index<C: Collection<K> + ?Sized>(
        &self,
        manager: &SelectionManager<'_, K, C>,
    ) -> Option<i32> {
        if self.options.should_use_virtual_focus || self.is_disabled(manager) {
            None
        } else if manager.focused_key() == Some(&self.key) {
            Some(0)
        } else {
            Some(-1)
        }
    }

    /// The key to expose on the element for lookups, unless virtualized.
    pub fn data_key(&self) -> Option<&K> {
        (!self.options.virtualized).then_some(&self.key)
    }

    /// Handle pointer press.
    pub fn on_pointer_down<C: Collection<K> + ?Sized>(
        &mut self,
        event: &PointerEvent,
        manager: &mut SelectionManager<'_, K, C>,
    ) {
        self.pointer_down_type = Some(event.pointer_type);
        self.long_pressed = false;
        if event.is_primary_mouse() && !self.options.should_select_on_press_up {
            self.on_select(event.pointer_type, event.modifiers, manager);
        }
    }

    /// Handle pointer release over this item.
    pub fn on_pointer_up<C: Collection<K> + ?Sized>(
        &mut self,
        event: &PointerEvent,
        manager: &mut SelectionManager<'_, K, C>,
    ) {
        if event.is_primary_mouse()
            && self.options.should_select_on_press_up
            && self.options.allows_different_press_origin
        {
            self.on_select(event.pointer_type, event.modifiers, manager);
        }
    }

    /// Handle a completed press (click, tap, or keyboard activation forwarded by the host).
    pub fn on_click<C: Collection<K> + ?Sized>(
        &mut self,
        event: &PointerEvent,
        manager: &mut SelectionManager<'_, K, C>,
    ) {
        let down = self.pointer_down_type.take();
        if core::mem::take(&mut self.long_pressed) {
            return;
        }
        let press_up = self.options.should_select_on_press_up
            && !self.options.allows_different_press_origin;
        let non_mouse = down.unwrap_or(event.pointer_type) != PointerType::Mouse;
        if press_up || non_mouse {
            self.on_select(event.pointer_type, event.modifiers, manager);
        }
    }

    /// Handle Enter and Space on the item.
    pub fn on_key_down<C: Collection<K> + ?Sized>(
        &mut self,
        event: &mut KeyEvent,
        manager: &mut SelectionManager<'_, K, C>,
    ) {
        if !matches!(event.key, Key::Enter | Key::Character(' ')) || event.is_default_prevented() {
            return;
        }
        if !self.allows_selection(manager) {
            return;
        }
        event.prevent_default();
        if self
            .options
            .platform
            .is_non_contiguous_selection_modifier(event.modifiers)
        {
            manager.toggle_selection(&self.key);
        } else {
            self.on_select(PointerType::Keyboard, event.modifiers, manager);
        }
    }

    /// Handle mouse down; disabled items keep focus where it was.
    pub fn on_mouse_down<C: Collection<K> + ?Sized>(
        &self,
        event: &mut PointerEvent,
        manager: &SelectionManager<'_, K, C>,
    ) {
        if self.is_disabled(manager) {
            event.prevent_default();
        }
    }

    /// Handle the item element itself receiving real focus.
    pub fn on_focus<C: Collection<K> + ?Sized>(
        &self,
        event: &FocusEvent,
        manager: &mut SelectionManager<'_, K, C>,
    ) {
        if event.target == EventTarget::Current
            && !self.options.should_use_virtual_focus
            && !self.is_disabled(manager)
        {
            manager.set_focused_key(Some(self.key.clone()));
        }
    }

    /// Handle a long press: on touch in multiple mode with replace behavior, switch to toggle
    /// behavior and toggle this item.
    pub fn on_long_press<C: Collection<K> + ?Sized>(
        &mut self,
        event: &PointerEvent,
        manager: &mut SelectionManager<'_, K, C>,
    ) {
        if event.pointer_type != PointerType::Touch
            || !self.allows_selection(manager)
            || manager.selection_mode() != SelectionMode::Multiple
            || manager.selection_behavior() != SelectionBehavior::Replace
        {
            return;
        }
        manager.set_selection_behavior(SelectionBehavior::Toggle);
        manager.toggle_selection(&self.key);
        // The click ending this press must not toggle again.
        self.long_pressed = true;
    }

    /// Move real focus to `element` when this item became the focused key.
    ///
    /// Hosts call this after the focused key changes.
    pub fn sync_focus<C, E>(&self, manager: &SelectionManager<'_, K, C>, element: &mut E)
    where
        C: Collection<K> + ?Sized,
        E: ItemElement + ?Sized,
    {
        if self.is_focused(manager)
            && !self.options.should_use_virtual_focus
            && !element.has_focus()
        {
            element.focus();
        }
    }

    fn on_select<C: Collection<K> + ?Sized>(
        &self,
        pointer_type: PointerType,
        modifiers: Modifiers,
        manager: &mut SelectionManager<'_, K, C>,
    ) {
        if !self.allows_selection(manager) {
            return;
        }
        let platform = self.options.platform;
        let multiple = manager.selection_mode() == SelectionMode::Multiple;
        if multiple && modifiers.contains(Modifiers::SHIFT) {
            manager.extend_selection(&self.key);
        } else if multiple && platform.is_ctrl_key_pressed(modifiers) {
            manager.toggle_selection(&self.key);
        } else {
            manager.select(&self.key, Some(pointer_type));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use trellis_selection::{CollectionNode, ListCollection, SelectionConfig, SelectionState};

    type Items = ListCollection<&'static str>;

    fn items() -> Items {
        ListCollection::new([
            CollectionNode::item("a", "A"),
            CollectionNode::item("b", "B"),
            CollectionNode::item("c", "C").disabled(),
        ])
        .unwrap()
    }

    fn state(mode: SelectionMode, behavior: SelectionBehavior) -> SelectionState<&'static str> {
        SelectionState::new(SelectionConfig {
            selection_mode: mode,
            selection_behavior: behavior,
            ..SelectionConfig::default()
        })
    }

    fn selected(m: &SelectionManager<'_, &'static str, Items>) -> Vec<&'static str> {
        let mut keys: Vec<_> = m.selected_keys().iter().copied().collect();
        keys.sort_unstable();
        keys
    }

    #[test]
    fn mouse_selects_on_press() {
        let items = items();
        let mut state = state(SelectionMode::Multiple, SelectionBehavior::Replace);
        let mut m = SelectionManager::new(&items, &mut state);
        let mut a = SelectableItem::new("a", ItemOptions::default());

        a.on_pointer_down(&PointerEvent::mouse(), &mut m);
        assert_eq!(selected(&m), ["a"]);
        // The click that follows does not select again.
        a.on_click(&PointerEvent::mouse(), &mut m);
        assert_eq!(selected(&m), ["a"]);

        let mut b = SelectableItem::new("b", ItemOptions::default());
        b.on_pointer_down(&PointerEvent::mouse().with_button(2), &mut m);
        assert_eq!(selected(&m), ["a"]);
    }

    #[test]
    fn touch_selects_on_click_and_toggles() {
        let items = items();
        let mut state = state(SelectionMode::Multiple, SelectionBehavior::Replace);
        let mut m = SelectionManager::new(&items, &mut state);
        let mut a = SelectableItem::new("a", ItemOptions::default());
        let mut b = SelectableItem::new("b", ItemOptions::default());

        for item in [&mut a, &mut b] {
            item.on_pointer_down(&PointerEvent::touch(), &mut m);
            assert_eq!(m.selection_size(), if *item.key() == "a" { 0 } else { 1 });
            item.on_click(&PointerEvent::touch(), &mut m);
        }
        assert_eq!(selected(&m), ["a", "b"]);
    }

    #[test]
    fn press_up_selection() {
        let items = items();
        let mut state = state(SelectionMode::Single, SelectionBehavior::Toggle);
        let mut m = SelectionManager::new(&items, &mut state);

        let mut a = SelectableItem::new(
            "a",
            ItemOptions {
                should_select_on_press_up: true,
                ..ItemOptions::default()
            },
        );
        a.on_pointer_down(&PointerEvent::mouse(), &mut m);
        a.on_pointer_up(&PointerEvent::mouse(), &mut m);
        assert!(m.is_empty());
        a.on_click(&PointerEvent::mouse(), &mut m);
        assert_eq!(selected(&m), ["a"]);

        let mut b = SelectableItem::new(
            "b",
            ItemOptions {
                should_select_on_press_up: true,
                allows_different_press_origin: true,
                ..ItemOptions::default()
            },
        );
        // The press began on another item.
        b.on_pointer_up(&PointerEvent::mouse(), &mut m);
        assert_eq!(selected(&m), ["b"]);
        b.on_click(&PointerEvent::mouse(), &mut m);
        assert_eq!(selected(&m), ["b"]);
    }

    #[test]
    fn modifiers_extend_and_toggle() {
        let items = items();
        let mut state = state(SelectionMode::Multiple, SelectionBehavior::Replace);
        let mut m = SelectionManager::new(&items, &mut state);
        let mut a = SelectableItem::new("a", ItemOptions::default());
        let mut b = SelectableItem::new("b", ItemOptions::default());

        a.on_pointer_down(&PointerEvent::mouse(), &mut m);
        let shift = PointerEvent::mouse().with_modifiers(Modifiers::SHIFT);
        b.on_pointer_down(&shift, &mut m);
        assert_eq!(selected(&m), ["a", "b"]);
        let ctrl = PointerEvent::mouse().with_modifiers(Modifiers::CTRL);
        b.on_pointer_down(&ctrl, &mut m);
        assert_eq!(selected(&m), ["a"]);
    }

    #[test]
    fn keyboard_activation() {
        let items = items();
        let mut state = state(SelectionMode::Multiple, SelectionBehavior::Replace);
        let mut m = SelectionManager::new(&items, &mut state);
        let mut a = SelectableItem::new("a", ItemOptions::default());
        let mut b = SelectableItem::new("b", ItemOptions::default());

        let mut ev = KeyEvent::new(Key::Enter);
        a.on_key_down(&mut ev, &mut m);
        assert!(ev.is_default_prevented());
        assert_eq!(selected(&m), ["a"]);

        let mut ev = KeyEvent::new(Key::Character(' ')).with_modifiers(Modifiers::CTRL);
        b.on_key_down(&mut ev, &mut m);
        assert_eq!(selected(&m), ["a", "b"]);

        let mut ev = KeyEvent::new(Key::Character(' '));
        ev.prevent_default();
        a.on_key_down(&mut ev, &mut m);
        assert_eq!(selected(&m), ["a", "b"]);

        let mut ev = KeyEvent::new(Key::Enter);
        b.on_key_down(&mut ev, &mut m);
        assert_eq!(selected(&m), ["b"]);
    }

    #[test]
    fn disabled_items_do_nothing() {
        let items = items();
        let mut state = state(SelectionMode::Multiple, SelectionBehavior::Toggle);
        let mut m = SelectionManager::new(&items, &mut state);
        let mut c = SelectableItem::new("c", ItemOptions::default());
        let mut b = SelectableItem::new(
            "b",
            ItemOptions {
                disabled: true,
                ..ItemOptions::default()
            },
        );

        for item in [&mut b, &mut c] {
            item.on_pointer_down(&PointerEvent::mouse(), &mut m);
            let mut ev = KeyEvent::new(Key::Enter);
            item.on_key_down(&mut ev, &mut m);
            assert!(!ev.is_default_prevented());
            let mut down = PointerEvent::mouse();
            item.on_mouse_down(&mut down, &m);
            assert!(down.is_default_prevented());
            item.on_focus(&FocusEvent::default(), &mut m);
            assert_eq!(item.tab_index(&m), None);
        }
        assert!(m.is_empty());
        assert_eq!(m.focused_key(), None);
    }

    #[test]
    fn long_press_enters_toggle_mode() {
        let items = items();
        let mut state = state(SelectionMode::Multiple, SelectionBehavior::Replace);
        let mut m = SelectionManager::new(&items, &mut state);
        let mut a = SelectableItem::new("a", ItemOptions::default());
        let mut b = SelectableItem::new("b", ItemOptions::default());

        a.on_pointer_down(&PointerEvent::touch(), &mut m);
        a.on_long_press(&PointerEvent::touch(), &mut m);
        a.on_click(&PointerEvent::touch(), &mut m);
        assert_eq!(selected(&m), ["a"]);
        assert_eq!(m.selection_behavior(), SelectionBehavior::Toggle);

        // In toggle behavior a mouse press adds to the selection.
        b.on_pointer_down(&PointerEvent::mouse(), &mut m);
        assert_eq!(selected(&m), ["a", "b"]);

        // Emptying the selection reverts to replace.
        a.on_pointer_down(&PointerEvent::mouse(), &mut m);
        b.on_pointer_down(&PointerEvent::mouse(), &mut m);
        assert!(m.is_empty());
        assert_eq!(m.selection_behavior(), SelectionBehavior::Replace);

        // Mouse long presses are not selection gestures.
        a.on_long_press(&PointerEvent::mouse(), &mut m);
        assert!(m.is_empty());
    }

    #[test]
    fn focus_and_tab_index() {
        let items = items();
        let mut state = state(SelectionMode::Single, SelectionBehavior::Toggle);
        let mut m = SelectionManager::new(&items, &mut state);
        let a = SelectableItem::new("a", ItemOptions::default());
        let b = SelectableItem::new("b", ItemOptions::default());

        assert_eq!(a.tab_index(&m), Some(-1));
        a.on_focus(&FocusEvent::default(), &mut m);
        assert_eq!(m.focused_key(), Some(&"a"));
        assert_eq!(a.tab_index(&m), Some(0));
        assert_eq!(b.tab_index(&m), Some(-1));

        // Focus bubbling up from a child of the item does not claim focus.
        let child = FocusEvent {
            target: EventTarget::Descendant,
            related_target: None,
        };
        b.on_focus(&child, &mut m);
        assert_eq!(m.focused_key(), Some(&"a"));

        let virtual_item = SelectableItem::new(
            "b",
            ItemOptions {
                should_use_virtual_focus: true,
                virtualized: true,
                ..ItemOptions::default()
            },
        );
        assert_eq!(virtual_item.tab_index(&m), None);
        assert_eq!(virtual_item.data_key(), None);
        assert_eq!(a.data_key(), Some(&"a"));
    }

    #[derive(Debug, Default)]
    struct Element {
        focused: bool,
        focus_calls: usize,
    }

    impl ItemElement for Element {
        fn has_focus(&self) -> bool {
            self.focused
        }
        fn focus(&mut self) {
            self.focused = true;
            self.focus_calls += 1;
        }
    }

    #[test]
    fn sync_focus_follows_the_focused_key() {
        let items = items();
        let mut state = state(SelectionMode::Single, SelectionBehavior::Toggle);
        let mut m = SelectionManager::new(&items, &mut state);
        let a = SelectableItem::new("a", ItemOptions::default());
        let mut element = Element::default();

        m.set_focused_key(Some("a"));
        a.sync_focus(&m, &mut element);
        assert_eq!(element.focus_calls, 0);

        m.set_focused(true);
        a.sync_focus(&m, &mut element);
        a.sync_focus(&m, &mut element);
        assert!(element.focused);
        assert_eq!(element.focus_calls, 1);
    }
}

// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Container-level controller: keyboard navigation, focus entry and exit, auto focus, and
//! scroll-into-view for a selectable collection.

use alloc::boxed::Box;
use core::fmt;
use core::hash::Hash;

use kurbo::Vec2;
use trellis_navigation::{Capabilities, KeyboardDelegate};
use trellis_selection::{
    Collection, FocusStrategy, SelectionBehavior, SelectionManager, SelectionMode,
};

use crate::event::{
    EventTarget, FocusEvent, Key, KeyEvent, Modifiers, Platform, PointerEvent, RelatedTarget,
};
use crate::host::CollectionHost;
use crate::scroll::scroll_into_view;
use crate::type_select::TypeSelect;

const LOG_TARGET: &str = "trellis_interaction::collection";

/// Which key, if any, receives focus when the collection mounts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum AutoFocus {
    /// Do not move focus on mount.
    #[default]
    Off,
    /// Focus the first selected key, or the container when nothing is selected.
    Container,
    /// Focus the first key, or the first selected key if any.
    First,
    /// Focus the last key, or the first selected key if any.
    Last,
}

/// Main axis of the collection's layout.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Items stack top to bottom; Up/Down move along the collection.
    #[default]
    Vertical,
    /// Items flow side by side; Left/Right move along the collection.
    Horizontal,
}

/// Reading direction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left.
    Rtl,
}

/// Options for a [`SelectableCollection`].
#[derive(Clone, Debug, Default)]
pub struct CollectionOptions {
    /// Focus to apply on mount.
    pub auto_focus: AutoFocus,
    /// Park auto focus until [`SelectableCollection::flush_deferred_auto_focus`].
    pub defer_auto_focus: bool,
    /// Arrow keys wrap around at the ends.
    pub should_focus_wrap: bool,
    /// Escape leaves the selection alone.
    pub disallow_empty_selection: bool,
    /// Ctrl+A does nothing.
    pub disallow_select_all: bool,
    /// Whether moving focus also replaces the selection. `None` means "when the selection
    /// behavior is replace".
    pub select_on_focus: Option<bool>,
    /// Printable keys do not search.
    pub disallow_type_ahead: bool,
    /// Focus stays on the container and items are highlighted virtually.
    pub should_use_virtual_focus: bool,
    /// Tab moves between items instead of leaving the collection.
    pub allows_tab_navigation: bool,
    /// Items are rendered by an external virtualizer that manages scrolling itself.
    pub is_virtualized: bool,
    /// Layout axis.
    pub orientation: Orientation,
    /// Reading direction.
    pub direction: Direction,
    /// Modifier conventions.
    pub platform: Platform,
}

/// A direction to move focus in, after mapping arrow keys through orientation and direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Motion {
    Below,
    Above,
    LeftOf,
    RightOf,
}

impl Motion {
    fn capability(self) -> Capabilities {
        match self {
            Self::Below => Capabilities::KEY_BELOW,
            Self::Above => Capabilities::KEY_ABOVE,
            Self::LeftOf => Capabilities::KEY_LEFT_OF,
            Self::RightOf => Capabilities::KEY_RIGHT_OF,
        }
    }

    fn step<K, D: KeyboardDelegate<K> + ?Sized>(self, delegate: &D, key: &K) -> Option<K> {
        match self {
            Self::Below => delegate.key_below(key),
            Self::Above => delegate.key_above(key),
            Self::LeftOf => delegate.key_left_of(key),
            Self::RightOf => delegate.key_right_of(key),
        }
    }

    /// Whether this motion heads toward the end of the collection.
    fn is_forward(self, direction: Direction) -> bool {
        match self {
            Self::Below => true,
            Self::Above => false,
            Self::LeftOf => direction == Direction::Rtl,
            Self::RightOf => direction == Direction::Ltr,
        }
    }
}

/// The container-level controller of a selectable collection.
///
/// The controller owns only interaction bookkeeping (typeahead buffer, saved scroll offset,
/// pending auto focus). Selection and focus live in the [`SelectionManager`] handed to each
/// handler, next to the [`KeyboardDelegate`] describing the layout and the [`CollectionHost`]
/// that moves real focus.
pub struct SelectableCollection<K> {
    options: CollectionOptions,
    type_select: TypeSelect,
    scroll_offset: Vec2,
    pending_auto_focus: bool,
    last_focused: Option<K>,
    on_type_select: Option<Box<dyn FnMut(&K)>>,
}

impl<K: fmt::Debug> fmt::Debug for SelectableCollection<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectableCollection")
            .field("options", &self.options)
            .field("type_select", &self.type_select)
            .field("scroll_offset", &self.scroll_offset)
            .field("pending_auto_focus", &self.pending_auto_focus)
            .field("last_focused", &self.last_focused)
            .field("on_type_select", &self.on_type_select.is_some())
            .finish()
    }
}

impl<K: Clone + Eq + Hash> SelectableCollection<K> {
    /// Create a controller.
    pub fn new(options: CollectionOptions) -> Self {
        Self {
            options,
            type_select: TypeSelect::new(),
            scroll_offset: Vec2::ZERO,
            pending_auto_focus: false,
            last_focused: None,
            on_type_select: None,
        }
    }

    /// Current options.
    pub fn options(&self) -> &CollectionOptions {
        &self.options
    }

    /// Mutable options, for syncing changed widget properties.
    pub fn options_mut(&mut self) -> &mut CollectionOptions {
        &mut self.options
    }

    /// The typeahead engine.
    pub fn type_select(&self) -> &TypeSelect {
        &self.type_select
    }

    /// Mutable typeahead engine, for a host timer that calls [`TypeSelect::reset`].
    pub fn type_select_mut(&mut self) -> &mut TypeSelect {
        &mut self.type_select
    }

    /// Install a callback run whenever typeahead moves focus.
    pub fn set_on_type_select(&mut self, callback: impl FnMut(&K) + 'static) {
        self.on_type_select = Some(Box::new(callback));
    }

    /// The scroll offset recorded by [`Self::on_scroll`] or by scrolling an item into view.
    pub fn scroll_offset(&self) -> Vec2 {
        self.scroll_offset
    }

    /// Whether an auto focus request is waiting for [`Self::flush_deferred_auto_focus`].
    pub fn has_pending_auto_focus(&self) -> bool {
        self.pending_auto_focus
    }

    fn select_on_focus<C: Collection<K> + ?Sized>(
        &self,
        manager: &SelectionManager<'_, K, C>,
    ) -> bool {
        self.options
            .select_on_focus
            .unwrap_or(manager.selection_behavior() == SelectionBehavior::Replace)
    }

    fn motion(&self, key: Key) -> Option<Motion> {
        let rtl = self.options.direction == Direction::Rtl;
        let motion = match (self.options.orientation, key) {
            (Orientation::Vertical, Key::ArrowDown) => Motion::Below,
            (Orientation::Vertical, Key::ArrowUp) => Motion::Above,
            (Orientation::Vertical, Key::ArrowLeft) => Motion::LeftOf,
            (Orientation::Vertical, Key::ArrowRight) => Motion::RightOf,
            (Orientation::Horizontal, Key::ArrowRight) if rtl => Motion::Above,
            (Orientation::Horizontal, Key::ArrowLeft) if rtl => Motion::Below,
            (Orientation::Horizontal, Key::ArrowRight) => Motion::Below,
            (Orientation::Horizontal, Key::ArrowLeft) => Motion::Above,
            (Orientation::Horizontal, Key::ArrowDown) => Motion::RightOf,
            (Orientation::Horizontal, Key::ArrowUp) => Motion::LeftOf,
            _ => return None,
        };
        Some(motion)
    }

    /// Handle a key press on the container or anything inside it.
    pub fn on_key_down<C, D, H>(
        &mut self,
        event: &mut KeyEvent,
        manager: &mut SelectionManager<'_, K, C>,
        delegate: &D,
        host: &mut H,
    ) where
        C: Collection<K> + ?Sized,
        D: KeyboardDelegate<K> + ?Sized,
        H: CollectionHost<K> + ?Sized,
    {
        if !self.options.disallow_type_ahead {
            if let Some(key) = self.type_select.on_key_down(event, manager, delegate) {
                if let Some(callback) = self.on_type_select.as_mut() {
                    callback(&key);
                }
                self.sync_focused_key(manager, host);
                return;
            }
        }

        if event.key == Key::Tab && event.modifiers.contains(Modifiers::ALT) {
            event.prevent_default();
        }
        if !event.target.is_within() {
            return;
        }

        let platform = self.options.platform;
        let ctrl = platform.is_ctrl_key_pressed(event.modifiers);
        let multiple = manager.selection_mode() == SelectionMode::Multiple;

        match event.key {
            Key::ArrowDown | Key::ArrowUp | Key::ArrowLeft | Key::ArrowRight => {
                let Some(motion) = self.motion(event.key) else {
                    return;
                };
                if !delegate.supports(motion.capability()) {
                    return;
                }
                event.prevent_default();
                let forward = motion.is_forward(self.options.direction);
                let focused = manager.focused_key().cloned();
                let mut next = match &focused {
                    Some(key) => motion.step(delegate, key),
                    None if forward => delegate.first_key(None, false),
                    None => delegate.last_key(None, false),
                };
                if next.is_none() && self.options.should_focus_wrap {
                    if let Some(key) = &focused {
                        next = if forward {
                            delegate.first_key(Some(key), false)
                        } else {
                            delegate.last_key(Some(key), false)
                        };
                    }
                }
                if let Some(next) = next {
                    let strategy = if forward {
                        FocusStrategy::First
                    } else {
                        FocusStrategy::Last
                    };
                    tracing::trace!(target: LOG_TARGET, ?motion, "arrow navigation");
                    self.navigate_to_key(event, manager, next, Some(strategy));
                }
            }
            Key::Home | Key::End => {
                let (capability, forward) = if event.key == Key::Home {
                    (Capabilities::FIRST_KEY, true)
                } else {
                    (Capabilities::LAST_KEY, false)
                };
                if !delegate.supports(capability) {
                    return;
                }
                let focused = manager.focused_key().cloned();
                if focused.is_none() && event.shift() {
                    return;
                }
                event.prevent_default();
                let target = if forward {
                    delegate.first_key(focused.as_ref(), ctrl)
                } else {
                    delegate.last_key(focused.as_ref(), ctrl)
                };
                let strategy = if forward {
                    FocusStrategy::First
                } else {
                    FocusStrategy::Last
                };
                manager.set_focused_key_with_strategy(target.clone(), Some(strategy));
                if let Some(target) = target {
                    if ctrl && event.shift() && multiple {
                        manager.extend_selection(&target);
                    } else if self.select_on_focus(manager) {
                        manager.replace_selection(&target);
                    }
                }
            }
            Key::PageDown | Key::PageUp => {
                let (capability, below) = if event.key == Key::PageDown {
                    (Capabilities::PAGE_BELOW, true)
                } else {
                    (Capabilities::PAGE_ABOVE, false)
                };
                if !delegate.supports(capability) {
                    return;
                }
                let Some(focused) = manager.focused_key().cloned() else {
                    return;
                };
                let next = if below {
                    delegate.key_page_below(&focused)
                } else {
                    delegate.key_page_above(&focused)
                };
                if let Some(next) = next {
                    self.navigate_to_key(event, manager, next, None);
                }
            }
            Key::Character('a' | 'A') if ctrl => {
                if multiple && !self.options.disallow_select_all {
                    event.prevent_default();
                    manager.select_all();
                }
            }
            Key::Escape => {
                if event.is_default_prevented() {
                    return;
                }
                let disallow_empty =
                    self.options.disallow_empty_selection || manager.disallow_empty_selection();
                if !disallow_empty && !manager.is_empty() {
                    event.prevent_default();
                    event.stop_propagation();
                    manager.clear_selection();
                }
            }
            Key::Tab => {
                if self.options.allows_tab_navigation {
                    return;
                }
                if event.shift() {
                    host.focus_container();
                } else {
                    host.focus_last_tabbable();
                }
            }
            _ => {}
        }

        self.sync_focused_key(manager, host);
    }

    fn navigate_to_key<C: Collection<K> + ?Sized>(
        &self,
        event: &mut KeyEvent,
        manager: &mut SelectionManager<'_, K, C>,
        key: K,
        strategy: Option<FocusStrategy>,
    ) {
        event.prevent_default();
        manager.set_focused_key_with_strategy(Some(key.clone()), strategy);
        if event.shift() && manager.selection_mode() == SelectionMode::Multiple {
            manager.extend_selection(&key);
        } else if self.select_on_focus(manager)
            && !self
                .options
                .platform
                .is_non_contiguous_selection_modifier(event.modifiers)
        {
            manager.replace_selection(&key);
        }
    }

    /// Handle focus entering the container or one of its items.
    pub fn on_focus_in<C, D, H>(
        &mut self,
        event: &FocusEvent,
        manager: &mut SelectionManager<'_, K, C>,
        delegate: &D,
        host: &mut H,
    ) where
        C: Collection<K> + ?Sized,
        D: KeyboardDelegate<K> + ?Sized,
        H: CollectionHost<K> + ?Sized,
    {
        if manager.is_focused() {
            // Focus events can bubble through portals from outside the container.
            if !event.target.is_within() {
                manager.set_focused(false);
            }
            return;
        }
        if !event.target.is_within() {
            return;
        }
        manager.set_focused(true);

        match manager.focused_key().cloned() {
            None => {
                let seed = if event.related_target == Some(RelatedTarget::After) {
                    manager
                        .last_selected_key()
                        .cloned()
                        .or_else(|| delegate.last_key(None, false))
                } else {
                    manager
                        .first_selected_key()
                        .cloned()
                        .or_else(|| delegate.first_key(None, false))
                };
                if let Some(key) = seed {
                    tracing::trace!(target: LOG_TARGET, "seeding focus on entry");
                    manager.set_focused_key(Some(key.clone()));
                    if self.select_on_focus(manager) && !manager.is_selected(&key) {
                        manager.replace_selection(&key);
                    }
                }
                self.sync_focused_key(manager, host);
            }
            Some(key) => {
                if !self.options.is_virtualized {
                    host.set_scroll_offset(self.scroll_offset);
                    if host.focus_item(&key) {
                        self.scroll_to(&key, host);
                    }
                }
                self.last_focused = Some(key);
            }
        }
    }

    /// Handle focus leaving the container or one of its items.
    pub fn on_focus_out<C: Collection<K> + ?Sized>(
        &mut self,
        event: &FocusEvent,
        manager: &mut SelectionManager<'_, K, C>,
    ) {
        if event.related_target != Some(RelatedTarget::Within) {
            manager.set_focused(false);
        }
    }

    /// Handle a mouse press on the container.
    ///
    /// Presses on the container itself (not an item) keep focus where it is.
    pub fn on_mouse_down(&mut self, event: &mut PointerEvent) {
        if event.target == EventTarget::Current {
            event.prevent_default();
        }
    }

    /// Record the container's scroll offset after the user scrolls it.
    pub fn on_scroll(&mut self, offset: Vec2) {
        if !self.options.is_virtualized {
            self.scroll_offset = offset;
        }
    }

    /// Apply the configured auto focus, or park it when deferred.
    pub fn on_mount<C, D, H>(
        &mut self,
        manager: &mut SelectionManager<'_, K, C>,
        delegate: &D,
        host: &mut H,
    ) where
        C: Collection<K> + ?Sized,
        D: KeyboardDelegate<K> + ?Sized,
        H: CollectionHost<K> + ?Sized,
    {
        if self.options.auto_focus == AutoFocus::Off {
            return;
        }
        if self.options.defer_auto_focus {
            self.pending_auto_focus = true;
            return;
        }
        self.apply_auto_focus(manager, delegate, host);
    }

    /// Run a parked auto focus request, once items have registered.
    pub fn flush_deferred_auto_focus<C, D, H>(
        &mut self,
        manager: &mut SelectionManager<'_, K, C>,
        delegate: &D,
        host: &mut H,
    ) where
        C: Collection<K> + ?Sized,
        D: KeyboardDelegate<K> + ?Sized,
        H: CollectionHost<K> + ?Sized,
    {
        if core::mem::take(&mut self.pending_auto_focus) {
            self.apply_auto_focus(manager, delegate, host);
        }
    }

    fn apply_auto_focus<C, D, H>(
        &mut self,
        manager: &mut SelectionManager<'_, K, C>,
        delegate: &D,
        host: &mut H,
    ) where
        C: Collection<K> + ?Sized,
        D: KeyboardDelegate<K> + ?Sized,
        H: CollectionHost<K> + ?Sized,
    {
        let mut target = match self.options.auto_focus {
            AutoFocus::Off => return,
            AutoFocus::Container => None,
            AutoFocus::First => delegate.first_key(None, false),
            AutoFocus::Last => delegate.last_key(None, false),
        };
        if let Some(selected) = manager.first_selected_key() {
            target = Some(selected.clone());
        }
        tracing::debug!(
            target: LOG_TARGET,
            auto_focus = ?self.options.auto_focus,
            "applying auto focus"
        );
        manager.set_focused(true);
        manager.set_focused_key(target.clone());
        if target.is_none() && !self.options.should_use_virtual_focus {
            host.focus_container();
        }
        self.sync_focused_key(manager, host);
    }

    /// Container tab index: `None` with virtual focus, `Some(0)` while no item holds focus so
    /// the container is a tab stop, `Some(-1)` otherwise.
    pub fn tab_index<C: Collection<K> + ?Sized>(
        &self,
        manager: &SelectionManager<'_, K, C>,
    ) -> Option<i32> {
        if self.options.should_use_virtual_focus {
            None
        } else if manager.focused_key().is_none() {
            Some(0)
        } else {
            Some(-1)
        }
    }

    /// Scroll the focused item into view if the focused key changed since the last call.
    ///
    /// Handlers call this themselves; hosts call it after changing the focused key directly.
    pub fn sync_focused_key<C, H>(&mut self, manager: &SelectionManager<'_, K, C>, host: &mut H)
    where
        C: Collection<K> + ?Sized,
        H: CollectionHost<K> + ?Sized,
    {
        let focused = manager.focused_key();
        if focused == self.last_focused.as_ref() {
            return;
        }
        self.last_focused = focused.cloned();
        if let Some(key) = focused {
            if manager.is_focused() && !self.options.is_virtualized {
                self.scroll_to(key, host);
            }
        }
    }

    fn scroll_to<H: CollectionHost<K> + ?Sized>(&mut self, key: &K, host: &mut H) {
        let Some(bounds) = host.item_bounds(key) else {
            return;
        };
        let offset = scroll_into_view(host.viewport(), bounds);
        if offset != host.viewport().origin().to_vec2() {
            host.set_scroll_offset(offset);
        }
        self.scroll_offset = offset;
    }
}

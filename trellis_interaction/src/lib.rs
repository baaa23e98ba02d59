// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Interaction: keyboard, focus, and pointer controllers for selectable collections.
//!
//! This crate turns input events into calls on a [`trellis_selection::SelectionManager`],
//! using a [`trellis_navigation::KeyboardDelegate`] for layout questions. It is headless: the
//! widget's view layer translates native events into [`KeyEvent`], [`PointerEvent`], and
//! [`FocusEvent`], implements [`CollectionHost`] and [`ItemElement`] so the controllers can move
//! real focus and scroll, and reads back [`KeyEvent::is_default_prevented`] to decide whether to
//! run its own default action.
//!
//! - [`SelectableCollection`] handles the container: arrow keys, Home/End, PageUp/PageDown,
//!   Ctrl+A, Escape, Tab leaving the collection, focus entry and exit, auto focus, and
//!   scrolling the focused item into view.
//! - [`SelectableItem`] handles one item: which phase of a press selects, keyboard activation,
//!   long press, and the item's tab index.
//! - [`TypeSelect`] is the typeahead engine the collection controller runs first on every key.
//!
//! Time is explicit. Events carry a millisecond [`KeyEvent::timestamp`], and deferred work such
//! as [`SelectableCollection::flush_deferred_auto_focus`] is run by the host on its next tick.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Vec2};
//! use trellis_interaction::{
//!     CollectionHost, CollectionOptions, Key, KeyEvent, Modifiers, SelectableCollection,
//! };
//! use trellis_navigation::ListKeyboardDelegate;
//! use trellis_selection::{
//!     CollectionNode, ListCollection, SelectionBehavior, SelectionConfig, SelectionManager,
//!     SelectionMode, SelectionState,
//! };
//!
//! struct Listbox;
//!
//! impl CollectionHost<&'static str> for Listbox {
//!     fn focus_container(&mut self) {}
//!     fn focus_item(&mut self, _: &&'static str) -> bool { true }
//!     fn focus_last_tabbable(&mut self) {}
//!     fn item_bounds(&self, _: &&'static str) -> Option<Rect> { None }
//!     fn viewport(&self) -> Rect { Rect::ZERO }
//!     fn set_scroll_offset(&mut self, _: Vec2) {}
//! }
//!
//! let items = ListCollection::new([
//!     CollectionNode::item("1", "One"),
//!     CollectionNode::item("2", "Two"),
//!     CollectionNode::item("3", "Three"),
//! ])
//! .unwrap();
//! let delegate = ListKeyboardDelegate::new(&items);
//! let mut state = SelectionState::new(SelectionConfig {
//!     selection_mode: SelectionMode::Multiple,
//!     selection_behavior: SelectionBehavior::Replace,
//!     ..SelectionConfig::default()
//! });
//! let mut listbox = SelectableCollection::new(CollectionOptions::default());
//! let mut host = Listbox;
//!
//! let mut manager = SelectionManager::new(&items, &mut state);
//! for modifiers in [Modifiers::empty(), Modifiers::empty(), Modifiers::SHIFT] {
//!     let mut event = KeyEvent::new(Key::ArrowDown).with_modifiers(modifiers);
//!     listbox.on_key_down(&mut event, &mut manager, &delegate, &mut host);
//! }
//!
//! assert_eq!(manager.focused_key(), Some(&"3"));
//! assert!(manager.is_selected(&"2") && manager.is_selected(&"3"));
//! assert!(!manager.is_selected(&"1"));
//! ```
//!
//! ## Features
//!
//! - `std` (enabled by default): Use the Rust standard library in `kurbo`.
//! - `libm`: Use `kurbo`'s `libm` support in `no_std` builds.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod collection;
mod event;
mod host;
mod item;
mod scroll;
mod type_select;

pub use collection::{AutoFocus, CollectionOptions, Direction, Orientation, SelectableCollection};
pub use event::{
    Button, EventTarget, FocusEvent, Key, KeyEvent, Modifiers, PRIMARY_BUTTON, Platform,
    PointerEvent, RelatedTarget,
};
pub use host::{CollectionHost, ItemElement};
pub use item::{ItemOptions, SelectableItem};
pub use scroll::scroll_into_view;
pub use trellis_selection::PointerType;
pub use type_select::{TYPEAHEAD_TIMEOUT_MS, TypeSelect};

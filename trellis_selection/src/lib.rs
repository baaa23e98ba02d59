// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Selection: the selection model for headless collection widgets.
//!
//! Listboxes, menus, grids and similar widgets all share one selection model:
//!
//! - [`Selection`]: a set of keys plus the `anchor_key`/`current_key` endpoints of the last
//!   range operation.
//! - [`SelectionMode`] and [`SelectionBehavior`]: which operations are permitted, and whether a
//!   plain select toggles membership or replaces the selection.
//! - [`Collection`]: the ordered entries a widget currently renders, supplied by the widget.
//!   [`ListCollection`] is a ready-made vector-backed implementation.
//! - [`SelectionState`]: observable storage for selected keys, focus, and the live behavior.
//! - [`SelectionManager`]: the policy engine, and the only writer of [`SelectionState`].
//!
//! ## Minimal example
//!
//! Shift-extending a range in a five-item list:
//!
//! ```rust
//! use trellis_selection::{
//!     CollectionNode, ListCollection, SelectionConfig, SelectionManager, SelectionMode,
//!     SelectionState,
//! };
//!
//! let items = ListCollection::new(
//!     ["a", "b", "c", "d", "e"].map(|k| CollectionNode::item(k, k)),
//! )
//! .unwrap();
//! let mut state = SelectionState::new(SelectionConfig {
//!     selection_mode: SelectionMode::Multiple,
//!     ..SelectionConfig::default()
//! });
//!
//! let mut manager = SelectionManager::new(&items, &mut state);
//! manager.toggle_selection(&"c");
//! manager.extend_selection(&"a");
//! assert!(["a", "b", "c"].iter().all(|k| manager.is_selected(k)));
//!
//! // Extending past the anchor drops the previous range.
//! manager.extend_selection(&"e");
//! assert!(!manager.is_selected(&"a"));
//! assert_eq!(manager.selection_size(), 3);
//! ```
//!
//! The manager borrows the collection rather than snapshotting it: build a new manager for
//! each event against the widget's current collection.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod collection;
mod manager;
mod selection;
mod state;

pub use collection::{Collection, CollectionError, CollectionNode, ListCollection, NodeKind};
pub use manager::SelectionManager;
pub use selection::{FocusStrategy, PointerType, Selection, SelectionBehavior, SelectionMode};
pub use state::{ListenerId, SelectionConfig, SelectionState, StateChange};

// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Navigation: keyboard delegates for headless collections.
//!
//! A [`KeyboardDelegate`] answers layout questions about a collection: which key is below,
//! above, left of, or right of a given key, where a page jump lands, which keys are first and
//! last, and which key matches a typeahead search. Controllers turn arrow keys into these
//! questions, so navigation policy stays independent of any particular visual layout.
//!
//! Every delegate function is optional. A delegate advertises the ones it implements through
//! [`KeyboardDelegate::capabilities`]; a controller leaves the matching key unhandled when a
//! capability is missing.
//!
//! Two layouts ship with the crate:
//!
//! - [`ListKeyboardDelegate`]: a one-dimensional list in collection order.
//! - [`GridKeyboardDelegate`]: items flowing row-major into a fixed number of columns.
//!
//! Both skip disabled entries and non-item nodes such as section headings.
//!
//! ## Minimal example
//!
//! ```rust
//! use trellis_navigation::{KeyboardDelegate, ListKeyboardDelegate};
//! use trellis_selection::{CollectionNode, ListCollection};
//!
//! let items = ListCollection::new([
//!     CollectionNode::item("apple", "Apple"),
//!     CollectionNode::item("banana", "Banana").disabled(),
//!     CollectionNode::item("cherry", "Cherry"),
//! ])
//! .unwrap();
//! let delegate = ListKeyboardDelegate::new(&items);
//!
//! // The disabled banana is stepped over.
//! assert_eq!(delegate.key_below(&"apple"), Some("cherry"));
//! assert_eq!(delegate.key_for_search("ch", None), Some("cherry"));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod delegate;
mod grid;
mod list;

pub use delegate::{Capabilities, KeyboardDelegate};
pub use grid::GridKeyboardDelegate;
pub use list::ListKeyboardDelegate;

/// Case-insensitive prefix test used for typeahead matching.
pub(crate) fn matches_search(text: &str, search: &str) -> bool {
    if text.is_empty() || search.is_empty() {
        return false;
    }
    let mut text = text.chars().flat_map(char::to_lowercase);
    search
        .chars()
        .flat_map(char::to_lowercase)
        .all(|c| text.next() == Some(c))
}

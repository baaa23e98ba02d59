// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The view-side interfaces a widget implements for the controllers.
//!
//! The controllers never touch a rendering technology directly. Instead the widget's view layer
//! implements [`CollectionHost`] for the container element and [`ItemElement`] for each rendered
//! item, and the controllers call back through them to move real focus and scroll.

use kurbo::{Rect, Vec2};

/// The container element of a collection widget.
pub trait CollectionHost<K> {
    /// Move focus to the container element itself.
    fn focus_container(&mut self);

    /// Move focus to the element rendering `key` without scrolling.
    ///
    /// Returns `false` if no element for `key` is currently rendered.
    fn focus_item(&mut self, key: &K) -> bool;

    /// Move focus to the last tabbable element inside the container, unless focus is already
    /// inside that element. The next Tab then leaves the collection.
    fn focus_last_tabbable(&mut self);

    /// Bounds of the element rendering `key`, in scroll-content coordinates.
    fn item_bounds(&self, key: &K) -> Option<Rect>;

    /// The visible region of the scroll container, in scroll-content coordinates.
    ///
    /// Its origin is the current scroll offset.
    fn viewport(&self) -> Rect;

    /// Scroll the container so that `offset` is the viewport origin.
    fn set_scroll_offset(&mut self, offset: Vec2);
}

/// The element rendering a single item.
pub trait ItemElement {
    /// Whether this element currently holds focus.
    fn has_focus(&self) -> bool;

    /// Move focus to this element.
    fn focus(&mut self);
}

// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard delegate for one-dimensional lists.

use core::hash::Hash;
use core::marker::PhantomData;

use trellis_selection::{Collection, CollectionNode};

use crate::delegate::{Capabilities, KeyboardDelegate};

/// Default number of items a page jump moves over.
const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Copy, Clone)]
enum Step {
    Forward,
    Backward,
}

/// Navigates a collection as a vertical list in collection order.
///
/// Below/above move to the next/previous enabled item; left/right are not supported, so a
/// controller leaves those arrows to the host. Page jumps move over `page_size` enabled items
/// and stop at the ends.
pub struct ListKeyboardDelegate<'a, K, C: ?Sized> {
    collection: &'a C,
    page_size: usize,
    _key: PhantomData<fn(&K)>,
}

impl<K, C: ?Sized> core::fmt::Debug for ListKeyboardDelegate<'_, K, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListKeyboardDelegate")
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

impl<'a, K, C> ListKeyboardDelegate<'a, K, C>
where
    K: Clone + Eq + Hash,
    C: Collection<K> + ?Sized,
{
    /// Create a delegate over `collection` with the default page size.
    pub fn new(collection: &'a C) -> Self {
        Self {
            collection,
            page_size: DEFAULT_PAGE_SIZE,
            _key: PhantomData,
        }
    }

    /// Set how many items a page jump moves over (at least one).
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    fn navigable(node: &CollectionNode<K>) -> bool {
        node.is_item() && !node.disabled
    }

    // First navigable key strictly past `from` in the given direction.
    fn step(&self, from: &K, step: Step) -> Option<K> {
        let collection = self.collection;
        let advance = |k: &K| match step {
            Step::Forward => collection.key_after(k),
            Step::Backward => collection.key_before(k),
        };
        let mut cursor = advance(from);
        while let Some(key) = cursor {
            if collection.item(key).is_some_and(Self::navigable) {
                return Some(key.clone());
            }
            cursor = advance(key);
        }
        None
    }

    // Navigable key at or past `from`.
    fn scan(&self, from: Option<&K>, step: Step) -> Option<K> {
        let key = from?;
        if self.collection.item(key).is_some_and(Self::navigable) {
            Some(key.clone())
        } else {
            self.step(key, step)
        }
    }

    fn page(&self, from: &K, step: Step) -> Option<K> {
        let mut last = None;
        for _ in 0..self.page_size {
            let origin = last.as_ref().unwrap_or(from);
            match self.step(origin, step) {
                Some(next) => last = Some(next),
                None => break,
            }
        }
        last
    }
}

impl<K, C> KeyboardDelegate<K> for ListKeyboardDelegate<'_, K, C>
where
    K: Clone + Eq + Hash,
    C: Collection<K> + ?Sized,
{
    fn capabilities(&self) -> Capabilities {
        Capabilities::KEY_BELOW
            | Capabilities::KEY_ABOVE
            | Capabilities::PAGE_BELOW
            | Capabilities::PAGE_ABOVE
            | Capabilities::FIRST_KEY
            | Capabilities::LAST_KEY
            | Capabilities::SEARCH
    }

    fn key_below(&self, key: &K) -> Option<K> {
        self.step(key, Step::Forward)
    }

    fn key_above(&self, key: &K) -> Option<K> {
        self.step(key, Step::Backward)
    }

    fn key_page_below(&self, key: &K) -> Option<K> {
        self.page(key, Step::Forward)
    }

    fn key_page_above(&self, key: &K) -> Option<K> {
        self.page(key, Step::Backward)
    }

    fn first_key(&self, _from: Option<&K>, _global: bool) -> Option<K> {
        self.scan(self.collection.first_key(), Step::Forward)
    }

    fn last_key(&self, _from: Option<&K>, _global: bool) -> Option<K> {
        self.scan(self.collection.last_key(), Step::Backward)
    }

    fn key_for_search(&self, search: &str, from: Option<&K>) -> Option<K> {
        let collection = self.collection;
        let mut cursor = match from {
            Some(key) => collection.key_after(key),
            None => collection.first_key(),
        };
        while let Some(key) = cursor {
            if let Some(node) = collection.item(key) {
                if Self::navigable(node) && crate::matches_search(&node.text_value, search) {
                    return Some(key.clone());
                }
            }
            cursor = collection.key_after(key);
        }
        None
    }
}

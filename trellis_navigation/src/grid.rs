// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard delegate for items flowing into a fixed number of columns.

use alloc::vec::Vec;
use core::hash::Hash;
use core::marker::PhantomData;
use core::num::NonZeroUsize;

use trellis_selection::{Collection, CollectionNode};

use crate::delegate::{Capabilities, KeyboardDelegate};

/// Navigates items laid out row-major in `columns` columns.
///
/// Only item nodes take a cell; sections and other nodes are ignored. Moving onto a disabled
/// cell keeps going in the same direction until an enabled cell is found.
///
/// `first_key`/`last_key` stay within the row of `from` unless `global` is set, which matches
/// Home/End versus Ctrl+Home/Ctrl+End in a grid.
pub struct GridKeyboardDelegate<'a, K, C: ?Sized> {
    collection: &'a C,
    columns: NonZeroUsize,
    page_rows: usize,
    _key: PhantomData<fn(&K)>,
}

impl<K, C: ?Sized> core::fmt::Debug for GridKeyboardDelegate<'_, K, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GridKeyboardDelegate")
            .field("columns", &self.columns)
            .field("page_rows", &self.page_rows)
            .finish_non_exhaustive()
    }
}

impl<'a, K, C> GridKeyboardDelegate<'a, K, C>
where
    K: Clone + Eq + Hash,
    C: Collection<K> + ?Sized,
{
    /// Create a delegate with `columns` cells per row; pages move five rows.
    pub fn new(collection: &'a C, columns: NonZeroUsize) -> Self {
        Self {
            collection,
            columns,
            page_rows: 5,
            _key: PhantomData,
        }
    }

    /// Set how many rows a page jump moves over (at least one).
    #[must_use]
    pub fn with_page_rows(mut self, page_rows: usize) -> Self {
        self.page_rows = page_rows.max(1);
        self
    }

    fn cells(&self) -> Vec<&'a CollectionNode<K>> {
        let collection = self.collection;
        core::iter::successors(
            collection.first_key().and_then(|k| collection.item(k)),
            |n| collection.key_after(&n.key).and_then(|k| collection.item(k)),
        )
        .filter(|n| n.is_item())
        .collect()
    }

    fn position(cells: &[&CollectionNode<K>], key: &K) -> Option<usize> {
        cells.iter().position(|n| n.key == *key)
    }

    // Walk from `key` by `stride` cells (negative for backwards) until an enabled cell.
    fn walk(&self, key: &K, stride: isize) -> Option<K> {
        let cells = self.cells();
        let mut pos = Self::position(&cells, key)?;
        loop {
            pos = pos.checked_add_signed(stride)?;
            let cell = cells.get(pos)?;
            if !cell.disabled {
                return Some(cell.key.clone());
            }
        }
    }

    fn columns(&self) -> isize {
        isize::try_from(self.columns.get()).unwrap_or(isize::MAX)
    }

    fn row_edge(&self, from: Option<&K>, global: bool, forward: bool) -> Option<K> {
        let cells = self.cells();
        let cols = self.columns.get();
        let (start, end) = match from.and_then(|k| Self::position(&cells, k)) {
            Some(pos) if !global => {
                let row_start = pos - pos % cols;
                (row_start, (row_start + cols).min(cells.len()))
            }
            _ => (0, cells.len()),
        };
        let row = cells.get(start..end)?;
        let mut enabled = row.iter().filter(|n| !n.disabled);
        let found = if forward {
            enabled.next()
        } else {
            enabled.next_back()
        };
        found.map(|n| n.key.clone())
    }

    fn page(&self, key: &K, below: bool) -> Option<K> {
        let mut last = None;
        for _ in 0..self.page_rows {
            let origin = last.as_ref().unwrap_or(key);
            let next = if below {
                self.key_below(origin)
            } else {
                self.key_above(origin)
            };
            match next {
                Some(next) => last = Some(next),
                None => break,
            }
        }
        last
    }
}

impl<K, C> KeyboardDelegate<K> for GridKeyboardDelegate<'_, K, C>
where
    K: Clone + Eq + Hash,
    C: Collection<K> + ?Sized,
{
    fn capabilities(&self) -> Capabilities {
        Capabilities::all()
    }

    fn key_below(&self, key: &K) -> Option<K> {
        self.walk(key, self.columns())
    }

    fn key_above(&self, key: &K) -> Option<K> {
        self.walk(key, -self.columns())
    }

    fn key_left_of(&self, key: &K) -> Option<K> {
        self.walk(key, -1)
    }

    fn key_right_of(&self, key: &K) -> Option<K> {
        self.walk(key, 1)
    }

    fn key_page_below(&self, key: &K) -> Option<K> {
        self.page(key, true)
    }

    fn key_page_above(&self, key: &K) -> Option<K> {
        self.page(key, false)
    }

    fn first_key(&self, from: Option<&K>, global: bool) -> Option<K> {
        self.row_edge(from, global, true)
    }

    fn last_key(&self, from: Option<&K>, global: bool) -> Option<K> {
        self.row_edge(from, global, false)
    }

    fn key_for_search(&self, search: &str, from: Option<&K>) -> Option<K> {
        let cells = self.cells();
        let start = match from {
            Some(key) => Self::position(&cells, key)? + 1,
            None => 0,
        };
        cells
            .get(start..)?
            .iter()
            .find(|n| !n.disabled && crate::matches_search(&n.text_value, search))
            .map(|n| n.key.clone())
    }
}

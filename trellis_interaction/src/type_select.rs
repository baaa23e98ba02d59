// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typeahead: move focus by typing the start of an item's text.

use alloc::string::String;
use core::hash::Hash;

use trellis_navigation::{Capabilities, KeyboardDelegate};
use trellis_selection::{Collection, SelectionManager};

use crate::event::{Key, KeyEvent, Modifiers};

/// Keystrokes further apart than this start a new search.
pub const TYPEAHEAD_TIMEOUT_MS: u64 = 500;

/// Accumulates typed characters and focuses the first key whose text matches them.
///
/// The buffer resets once [`TYPEAHEAD_TIMEOUT_MS`] pass between qualifying keystrokes, measured
/// with [`KeyEvent::timestamp`]. Typing the same letter repeatedly cycles through the items
/// starting with it.
#[derive(Clone, Debug, Default)]
pub struct TypeSelect {
    search: String,
    last_input: Option<u64>,
}

impl TypeSelect {
    /// Create an idle typeahead.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current search buffer.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Clear the search buffer.
    pub fn reset(&mut self) {
        self.search.clear();
        self.last_input = None;
    }

    /// Clear the buffer if it has been idle for the timeout as of `now`.
    pub fn expire(&mut self, now: u64) {
        if self
            .last_input
            .is_some_and(|last| now.saturating_sub(last) >= TYPEAHEAD_TIMEOUT_MS)
        {
            self.reset();
        }
    }

    /// Feed a key press; returns the key focus moved to, if any.
    ///
    /// Only single printable characters without Ctrl or Meta qualify. The search starts after
    /// the focused key and falls back to the whole collection.
    pub fn on_key_down<K, C, D>(
        &mut self,
        event: &mut KeyEvent,
        manager: &mut SelectionManager<'_, K, C>,
        delegate: &D,
    ) -> Option<K>
    where
        K: Clone + Eq + Hash,
        C: Collection<K> + ?Sized,
        D: KeyboardDelegate<K> + ?Sized,
    {
        if !delegate.supports(Capabilities::SEARCH) {
            return None;
        }
        let Key::Character(character) = event.key else {
            return None;
        };
        if event.modifiers.intersects(Modifiers::CTRL | Modifiers::META) {
            return None;
        }

        self.expire(event.timestamp);
        if character == ' ' {
            if self.search.trim().is_empty() {
                // Space with nothing typed yet is an activation key, not a search.
                return None;
            }
            event.prevent_default();
            event.stop_propagation();
        }
        self.search.push(character);
        self.last_input = Some(event.timestamp);

        let focused = manager.focused_key().cloned();
        let mut found = search_from(delegate, &self.search, focused.as_ref());
        if found.is_none() && is_all_same_letter(&self.search) {
            let mut single = String::new();
            single.push(character);
            found = search_from(delegate, &single, focused.as_ref());
        }

        if let Some(key) = &found {
            tracing::trace!(
                target: "trellis_interaction::type_select",
                search = %self.search,
                "typeahead match"
            );
            manager.set_focused_key(Some(key.clone()));
        }
        found
    }
}

fn search_from<K, D>(delegate: &D, search: &str, focused: Option<&K>) -> Option<K>
where
    D: KeyboardDelegate<K> + ?Sized,
{
    delegate
        .key_for_search(search, focused)
        .or_else(|| delegate.key_for_search(search, None))
}

fn is_all_same_letter(search: &str) -> bool {
    let mut chars = search.chars();
    chars.next().is_some_and(|first| chars.all(|c| c == first))
}

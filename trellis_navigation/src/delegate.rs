// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The keyboard delegate contract.

bitflags::bitflags! {
    /// Which optional [`KeyboardDelegate`] functions a delegate implements.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Capabilities: u16 {
        /// [`KeyboardDelegate::key_below`].
        const KEY_BELOW    = 1 << 0;
        /// [`KeyboardDelegate::key_above`].
        const KEY_ABOVE    = 1 << 1;
        /// [`KeyboardDelegate::key_left_of`].
        const KEY_LEFT_OF  = 1 << 2;
        /// [`KeyboardDelegate::key_right_of`].
        const KEY_RIGHT_OF = 1 << 3;
        /// [`KeyboardDelegate::key_page_below`].
        const PAGE_BELOW   = 1 << 4;
        /// [`KeyboardDelegate::key_page_above`].
        const PAGE_ABOVE   = 1 << 5;
        /// [`KeyboardDelegate::first_key`].
        const FIRST_KEY    = 1 << 6;
        /// [`KeyboardDelegate::last_key`].
        const LAST_KEY     = 1 << 7;
        /// [`KeyboardDelegate::key_for_search`].
        const SEARCH       = 1 << 8;
    }
}

/// Maps a key to its neighbor in a direction, for one particular layout.
///
/// Delegates are stateless views over the current collection. All functions default to `None`;
/// implementors override the ones they support and list them in
/// [`capabilities`](Self::capabilities).
pub trait KeyboardDelegate<K> {
    /// The functions this delegate implements.
    fn capabilities(&self) -> Capabilities;

    /// Key visually below `key`.
    fn key_below(&self, key: &K) -> Option<K> {
        let _ = key;
        None
    }

    /// Key visually above `key`.
    fn key_above(&self, key: &K) -> Option<K> {
        let _ = key;
        None
    }

    /// Key visually left of `key`.
    fn key_left_of(&self, key: &K) -> Option<K> {
        let _ = key;
        None
    }

    /// Key visually right of `key`.
    fn key_right_of(&self, key: &K) -> Option<K> {
        let _ = key;
        None
    }

    /// Key one page below `key`.
    fn key_page_below(&self, key: &K) -> Option<K> {
        let _ = key;
        None
    }

    /// Key one page above `key`.
    fn key_page_above(&self, key: &K) -> Option<K> {
        let _ = key;
        None
    }

    /// First key, relative to `from` unless `global` asks for the whole collection.
    fn first_key(&self, from: Option<&K>, global: bool) -> Option<K> {
        let _ = (from, global);
        None
    }

    /// Last key, relative to `from` unless `global` asks for the whole collection.
    fn last_key(&self, from: Option<&K>, global: bool) -> Option<K> {
        let _ = (from, global);
        None
    }

    /// First key whose text starts with `search`, looking strictly after `from`
    /// (or from the start when `from` is `None`). Does not wrap.
    fn key_for_search(&self, search: &str, from: Option<&K>) -> Option<K> {
        let _ = (search, from);
        None
    }

    /// Whether all of `caps` are supported.
    fn supports(&self, caps: Capabilities) -> bool {
        self.capabilities().contains(caps)
    }
}

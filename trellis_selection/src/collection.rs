// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The collection contract consumed by the selection manager, and a list-backed implementation.

use alloc::string::String;
use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;

/// What a [`CollectionNode`] represents.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A selectable, navigable entry.
    Item,
    /// A heading grouping the items that follow it.
    Section,
    /// A cell inside an item (for example a grid row); resolves to its parent item.
    Cell,
    /// Static content such as a separator.
    Literal,
}

/// A single entry in a [`Collection`].
#[derive(Clone, Debug, PartialEq)]
pub struct CollectionNode<K> {
    /// Unique, stable key of this node.
    pub key: K,
    /// What the node represents.
    pub kind: NodeKind,
    /// Position in collection order.
    pub index: usize,
    /// Disabled nodes can be navigated past but never selected.
    pub disabled: bool,
    /// Plain text used for typeahead matching.
    pub text_value: String,
    /// Owning node, used to resolve cells to their item.
    pub parent_key: Option<K>,
}

impl<K> CollectionNode<K> {
    /// An enabled item node with the given typeahead text.
    pub fn item(key: K, text_value: impl Into<String>) -> Self {
        Self {
            key,
            kind: NodeKind::Item,
            index: 0,
            disabled: false,
            text_value: text_value.into(),
            parent_key: None,
        }
    }

    /// A section heading node.
    pub fn section(key: K, text_value: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Section,
            ..Self::item(key, text_value)
        }
    }

    /// A cell node owned by `parent`.
    pub fn cell(key: K, parent: K, text_value: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Cell,
            parent_key: Some(parent),
            ..Self::item(key, text_value)
        }
    }

    /// Mark the node as disabled.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Whether this node is an [`NodeKind::Item`].
    pub fn is_item(&self) -> bool {
        self.kind == NodeKind::Item
    }
}

/// An ordered, queryable view of the entries a widget currently renders.
///
/// Implementations are recreated whenever the widget's item set changes. The selection manager
/// only ever borrows the current collection, so it always observes the latest entries.
pub trait Collection<K> {
    /// Number of nodes, including non-item nodes.
    fn len(&self) -> usize;

    /// Returns `true` if the collection has no nodes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a node by key.
    fn item(&self, key: &K) -> Option<&CollectionNode<K>>;

    /// Key of the node following `key` in collection order.
    fn key_after(&self, key: &K) -> Option<&K>;

    /// Key of the node preceding `key` in collection order.
    fn key_before(&self, key: &K) -> Option<&K>;

    /// Key of the first node.
    fn first_key(&self) -> Option<&K>;

    /// Key of the last node.
    fn last_key(&self) -> Option<&K>;
}

/// Errors raised while building a [`ListCollection`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CollectionError {
    /// Two nodes share a key.
    #[error("duplicate collection key at index {duplicate} (first seen at index {first})")]
    DuplicateKey {
        /// Index of the first node using the key.
        first: usize,
        /// Index of the node repeating it.
        duplicate: usize,
    },
}

/// A [`Collection`] backed by a vector of nodes in display order.
#[derive(Clone, Debug)]
pub struct ListCollection<K> {
    nodes: Vec<CollectionNode<K>>,
    positions: HashMap<K, usize>,
}

impl<K: Clone + Eq + Hash> ListCollection<K> {
    /// Build a collection, assigning each node its position as `index`.
    pub fn new(
        nodes: impl IntoIterator<Item = CollectionNode<K>>,
    ) -> Result<Self, CollectionError> {
        let mut list = Vec::new();
        let mut positions = HashMap::new();
        for (index, mut node) in nodes.into_iter().enumerate() {
            if let Some(&first) = positions.get(&node.key) {
                return Err(CollectionError::DuplicateKey {
                    first,
                    duplicate: index,
                });
            }
            node.index = index;
            positions.insert(node.key.clone(), index);
            list.push(node);
        }
        Ok(Self {
            nodes: list,
            positions,
        })
    }

    /// Nodes in collection order.
    pub fn nodes(&self) -> &[CollectionNode<K>] {
        &self.nodes
    }
}

impl<K: Clone + Eq + Hash> Collection<K> for ListCollection<K> {
    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn item(&self, key: &K) -> Option<&CollectionNode<K>> {
        self.positions.get(key).map(|&i| &self.nodes[i])
    }

    fn key_after(&self, key: &K) -> Option<&K> {
        let &i = self.positions.get(key)?;
        self.nodes.get(i + 1).map(|n| &n.key)
    }

    fn key_before(&self, key: &K) -> Option<&K> {
        let &i = self.positions.get(key)?;
        let prev = i.checked_sub(1)?;
        self.nodes.get(prev).map(|n| &n.key)
    }

    fn first_key(&self) -> Option<&K> {
        self.nodes.first().map(|n| &n.key)
    }

    fn last_key(&self) -> Option<&K> {
        self.nodes.last().map(|n| &n.key)
    }
}

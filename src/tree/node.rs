// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Fat nodes and the arena that owns them.

use super::EdgeHistory;

/// Stable handle to a node in a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Creates a handle from a raw arena index.
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw arena index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Which child slot of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// A search tree node with per-slot assignment histories.
///
/// The value is fixed at creation. Only the two edge histories grow.
#[derive(Debug, Clone)]
pub struct Node<T> {
    value: T,
    left: EdgeHistory,
    right: EdgeHistory,
}

impl<T> Node<T> {
    /// Creates a leaf holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            value,
            left: EdgeHistory::new(),
            right: EdgeHistory::new(),
        }
    }

    /// Returns the node's value.
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Returns the assignment history of one child slot.
    #[inline]
    pub fn edges(&self, side: Side) -> &EdgeHistory {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    #[inline]
    pub(crate) fn edges_mut(&mut self, side: Side) -> &mut EdgeHistory {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// Append-only store of every node ever created for one set.
#[derive(Debug, Clone)]
pub struct NodeArena<T> {
    nodes: Vec<Node<T>>,
}

impl<T> NodeArena<T> {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Creates an empty arena with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Stores a new leaf and returns its handle.
    pub fn alloc(&mut self, value: T) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node::new(value));
        id
    }

    /// Returns the node behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this arena.
    #[inline]
    pub fn get(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.0]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node<T> {
        &mut self.nodes[id.0]
    }

    /// Returns the number of nodes ever created.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no node was ever created.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the total number of child edges across all nodes.
    pub fn edge_count(&self) -> usize {
        self.nodes
            .iter()
            .map(|n| n.left.len() + n.right.len())
            .sum()
    }
}

impl<T> Default for NodeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

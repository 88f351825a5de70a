// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Configuration for a set entry.

use crate::tree::ResolveStrategy;

/// Configuration fixed when the empty set is created.
///
/// Every handle derived from that set shares it.
#[derive(Debug, Clone, Default)]
pub struct SetConfig {
    /// Edge resolution strategy used by every read and write.
    pub resolve: ResolveStrategy,
    /// Number of nodes to reserve room for up front.
    pub node_capacity: usize,
}

impl SetConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the edge resolution strategy.
    pub fn with_resolve(mut self, resolve: ResolveStrategy) -> Self {
        self.resolve = resolve;
        self
    }

    /// Reserves room for `capacity` nodes.
    pub fn with_node_capacity(mut self, capacity: usize) -> Self {
        self.node_capacity = capacity;
        self
    }
}

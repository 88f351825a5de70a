// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! fatset: a persistent ordered set built on fat-node version trees.
//!
//! Every snapshot of the set stays queryable after later insertions, without
//! copying the tree per version. Nodes are shared between versions and record,
//! per child slot, every assignment ever made to it, stamped with the version
//! that made it. A snapshot is rebuilt on the fly by following, at each node,
//! the newest assignment made on that snapshot's own version history.
//!
//! The tree is an unbalanced binary search tree. Deletion is not supported and
//! storage is never reclaimed: every version, node and edge lives as long as
//! the set does.

pub mod set;
pub mod tree;
pub mod version;

pub use set::{
    CompareError, Comparer, Entry, EntryStats, FnComparer, NaturalOrder, PartialOrder, Set,
    SetConfig, SetError,
};
pub use tree::{Edge, EdgeHistory, Node, NodeArena, NodeId, ResolveStrategy, Side};
pub use version::{Version, VersionError, VersionTracker};

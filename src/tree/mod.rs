// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Fat-node search tree storage.
//!
//! Nodes are never copied per version. Instead, each child slot of a node keeps
//! the full history of assignments made to it, each stamped with the version
//! that made it. Reading the tree "as of version V" picks, per slot, the most
//! recent assignment made on V's own history:
//!
//! - **Visible**: the edge's version is an ancestor of (or equal to) V.
//! - **Skipped**: the edge was made later than V, or on a branch that diverged
//!   from V's history.
//!
//! Nodes live in a [`NodeArena`] and edges refer to them by [`NodeId`], so a
//! node may be reachable from any number of versions without shared ownership.
//! The arena only grows; superseded nodes and edges are kept forever.

mod edge;
mod node;

pub use edge::{Edge, EdgeHistory, ResolveStrategy};
pub use node::{Node, NodeArena, NodeId, Side};

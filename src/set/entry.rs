// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Shared state behind every handle of one logical set.

use std::cmp::Ordering;

use parking_lot::RwLock;
use tracing::debug;

use crate::tree::{EdgeHistory, NodeArena, NodeId, ResolveStrategy, Side};
use crate::version::{Version, VersionError, VersionTracker};

use super::compare::Comparer;
use super::config::SetConfig;
use super::error::{CompareError, SetError};

/// Growth counters for one entry.
///
/// Every counter only increases over the entry's life.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryStats {
    /// Versions allocated, including the root.
    pub versions: usize,
    /// Nodes ever created.
    pub nodes: usize,
    /// Child edges recorded across all nodes.
    pub edges: usize,
    /// Root associations recorded.
    pub roots: usize,
}

/// Where an inserted value lands in the tree seen by its parent version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// The tree was empty; the value becomes the root.
    Root,
    /// An equal value is already reachable.
    Present,
    /// The value becomes a new leaf under `parent`.
    Leaf { parent: NodeId, side: Side },
}

/// Mutable part of an entry, guarded by the entry's lock.
struct EntryState<T> {
    tracker: VersionTracker,
    roots: EdgeHistory,
    nodes: NodeArena<T>,
}

impl<T> EntryState<T> {
    fn root_at(&self, at: Version, strategy: ResolveStrategy) -> Option<NodeId> {
        self.roots.resolve_unchecked(at, &self.tracker, strategy)
    }

    fn child_at(
        &self,
        id: NodeId,
        side: Side,
        at: Version,
        strategy: ResolveStrategy,
    ) -> Option<NodeId> {
        self.nodes
            .get(id)
            .edges(side)
            .resolve_unchecked(at, &self.tracker, strategy)
    }

    /// Walks the tree as seen by `at` to find where `value` belongs.
    ///
    /// Read-only: nothing is recorded until the walk has finished.
    fn locate(
        &self,
        comparer: &dyn Comparer<T>,
        value: &T,
        at: Version,
        strategy: ResolveStrategy,
    ) -> Result<Placement, CompareError> {
        let mut current = match self.root_at(at, strategy) {
            Some(root) => root,
            None => return Ok(Placement::Root),
        };

        loop {
            let side = match comparer.compare(value, self.nodes.get(current).value())? {
                Ordering::Equal => return Ok(Placement::Present),
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
            };
            match self.child_at(current, side, at, strategy) {
                Some(child) => current = child,
                None => return Ok(Placement::Leaf { parent: current, side }),
            }
        }
    }

    /// Allocates a child version of `at` and records `placement` under it.
    ///
    /// Returns the new version and whether a node was created.
    fn record(
        &mut self,
        at: Version,
        value: T,
        placement: Placement,
        strategy: ResolveStrategy,
    ) -> (Version, bool) {
        let root = self.root_at(at, strategy);
        let version = self.tracker.add(at);

        match placement {
            Placement::Root => {
                let id = self.nodes.alloc(value);
                self.roots.push(version, Some(id));
                (version, true)
            }
            Placement::Present => {
                self.roots.push(version, root);
                (version, false)
            }
            Placement::Leaf { parent, side } => {
                let id = self.nodes.alloc(value);
                self.nodes
                    .get_mut(parent)
                    .edges_mut(side)
                    .push(version, Some(id));
                self.roots.push(version, root);
                (version, true)
            }
        }
    }

    /// Visits the tree seen by `at`: left subtree, right subtree, then node.
    ///
    /// Uses an explicit stack since an unbalanced tree can be as deep as it
    /// has members.
    fn visit<F: FnMut(&T)>(&self, at: Version, strategy: ResolveStrategy, mut f: F) {
        let mut stack: Vec<(NodeId, bool)> = Vec::new();
        if let Some(root) = self.root_at(at, strategy) {
            stack.push((root, false));
        }

        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                f(self.nodes.get(id).value());
                continue;
            }
            stack.push((id, true));
            if let Some(right) = self.child_at(id, Side::Right, at, strategy) {
                stack.push((right, false));
            }
            if let Some(left) = self.child_at(id, Side::Left, at, strategy) {
                stack.push((left, false));
            }
        }
    }
}

/// The object shared by every handle of one logical set.
///
/// Owns the version tracker, the comparer, the root associations and every
/// node. State is append-only: a write adds one version, at most one node,
/// at most one child edge and exactly one root association. Nothing is ever
/// removed, so memory grows with the number of writes for the entry's life.
///
/// The state sits behind a read-write lock. Each write holds the write lock
/// for its whole duration, so writes are atomic and version numbers follow
/// lock order when several threads write to one entry.
pub struct Entry<T> {
    comparer: Box<dyn Comparer<T>>,
    config: SetConfig,
    state: RwLock<EntryState<T>>,
}

impl<T> Entry<T> {
    pub(crate) fn new(config: SetConfig, comparer: Box<dyn Comparer<T>>) -> Self {
        let mut roots = EdgeHistory::new();
        roots.push(Version::ROOT, None);

        let state = EntryState {
            tracker: VersionTracker::new(),
            roots,
            nodes: NodeArena::with_capacity(config.node_capacity),
        };
        debug!(
            resolve = ?config.resolve,
            node_capacity = config.node_capacity,
            "created set entry"
        );

        Self {
            comparer,
            config,
            state: RwLock::new(state),
        }
    }

    /// Returns the configuration the entry was created with.
    #[inline]
    pub fn config(&self) -> &SetConfig {
        &self.config
    }

    /// Records `value` as added on top of version `at`.
    ///
    /// Every successful call allocates exactly one version, even when the
    /// value is already present. A failed comparison leaves the entry as it
    /// was.
    pub(crate) fn insert(&self, at: Version, value: T) -> Result<Version, SetError> {
        let strategy = self.config.resolve;
        let mut state = self.state.write();
        state.tracker.check(at)?;

        let placement = state.locate(self.comparer.as_ref(), &value, at, strategy)?;
        let (version, created) = state.record(at, value, placement, strategy);
        debug!(parent = %at, version = %version, created, "recorded version");
        Ok(version)
    }

    pub(crate) fn contains(&self, at: Version, value: &T) -> Result<bool, CompareError> {
        let state = self.state.read();
        let placement = state.locate(self.comparer.as_ref(), value, at, self.config.resolve)?;
        Ok(placement == Placement::Present)
    }

    pub(crate) fn visit<F: FnMut(&T)>(&self, at: Version, f: F) {
        self.state.read().visit(at, self.config.resolve, f);
    }

    pub(crate) fn history_unchecked(&self, at: Version) -> Vec<Version> {
        self.state.read().tracker.ancestors_unchecked(at)
    }

    pub(crate) fn is_ancestor_unchecked(&self, candidate: Version, version: Version) -> bool {
        self.state.read().tracker.is_ancestor_unchecked(candidate, version)
    }

    /// Returns an error unless `version` has been allocated.
    pub fn check(&self, version: Version) -> Result<(), VersionError> {
        self.state.read().tracker.check(version)
    }

    /// Returns the parent of `version`, or `None` for the root.
    pub fn parent_of(&self, version: Version) -> Result<Option<Version>, VersionError> {
        self.state.read().tracker.parent_of(version)
    }

    /// Returns the ancestor chain of `version`, oldest first.
    pub fn history(&self, version: Version) -> Result<Vec<Version>, VersionError> {
        self.state.read().tracker.ancestors_of(version)
    }

    /// Returns true if `child` descends from `parent` (or equals it).
    pub fn is_descendant(&self, child: Version, parent: Version) -> Result<bool, VersionError> {
        self.state.read().tracker.is_descendant(child, parent)
    }

    /// Returns the most recently allocated version.
    pub fn latest(&self) -> Version {
        self.state.read().tracker.latest()
    }

    /// Returns the entry's growth counters.
    pub fn stats(&self) -> EntryStats {
        let state = self.state.read();
        EntryStats {
            versions: state.tracker.count_allocated(),
            nodes: state.nodes.len(),
            edges: state.nodes.edge_count(),
            roots: state.roots.len(),
        }
    }
}

impl<T> std::fmt::Debug for Entry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry")
            .field("config", &self.config)
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

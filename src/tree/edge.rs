// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Version-stamped edge histories and temporal edge resolution.

use crate::version::{Version, VersionError, VersionTracker};

use super::NodeId;

/// How an edge history is searched for the edge visible at a version.
///
/// Both strategies return the same edge for every query. They differ only in
/// how many edges are inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveStrategy {
    /// Scan every edge newest-first, testing ancestry of each.
    Linear,
    /// Binary-search past edges stamped after the query version, then scan
    /// the remainder newest-first.
    #[default]
    Bisect,
}

/// One assignment to a child slot (or to the root).
///
/// "As of `version`, the slot points at `target`", where `None` means empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub version: Version,
    pub target: Option<NodeId>,
}

/// The full assignment history of one slot.
///
/// Edges are appended with strictly increasing versions, so the physical order
/// is also version order.
#[derive(Debug, Clone, Default)]
pub struct EdgeHistory {
    edges: Vec<Edge>,
}

impl EdgeHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an assignment stamped with `version`.
    pub fn push(&mut self, version: Version, target: Option<NodeId>) {
        debug_assert!(
            self.edges.last().map_or(true, |e| e.version < version),
            "edge stamps must increase: {} after {:?}",
            version,
            self.edges.last().map(|e| e.version)
        );
        self.edges.push(Edge { version, target });
    }

    /// Returns the number of assignments recorded.
    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the slot was never assigned.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns the most recently appended edge, on any branch.
    #[inline]
    pub fn latest(&self) -> Option<&Edge> {
        self.edges.last()
    }

    /// Iterates edges newest-first.
    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().rev()
    }

    /// Finds the slot's target as seen by version `at`.
    ///
    /// Returns the target of the newest edge whose version lies on `at`'s
    /// history. `None` means either no such edge exists or the visible edge
    /// points nowhere; both read as an empty slot.
    pub fn resolve(
        &self,
        at: Version,
        tracker: &VersionTracker,
        strategy: ResolveStrategy,
    ) -> Result<Option<NodeId>, VersionError> {
        tracker.check(at)?;
        Ok(self.resolve_unchecked(at, tracker, strategy))
    }

    pub(crate) fn resolve_unchecked(
        &self,
        at: Version,
        tracker: &VersionTracker,
        strategy: ResolveStrategy,
    ) -> Option<NodeId> {
        let visible = |e: &&Edge| tracker.is_ancestor_unchecked(e.version, at);

        let found = match strategy {
            ResolveStrategy::Linear => self
                .edges
                .iter()
                .rev()
                .filter(|e| e.version <= at)
                .find(visible),
            ResolveStrategy::Bisect => {
                let end = self.edges.partition_point(|e| e.version <= at);
                self.edges[..end].iter().rev().find(visible)
            }
        };

        found.and_then(|e| e.target)
    }
}

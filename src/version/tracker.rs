// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Append-only parent table for versions.

use super::error::VersionError;
use super::Version;

/// Per-version record.
#[derive(Debug, Clone, Copy)]
struct Slot {
    parent: Option<Version>,
    /// Number of parent steps to the root.
    depth: u64,
    /// An ancestor further up the chain than `parent`, chosen so that any
    /// ancestor can be reached in a logarithmic number of hops.
    jump: Version,
}

/// Records the parent of every allocated version.
///
/// Slot `i` describes version `i`. The root version occupies slot 0 and has
/// no parent. Slots are only ever appended, never rewritten, so any answer the
/// tracker gives about an existing version stays true forever.
#[derive(Debug, Clone)]
pub struct VersionTracker {
    slots: Vec<Slot>,
}

impl VersionTracker {
    /// Creates a tracker holding only the root version.
    pub fn new() -> Self {
        Self {
            slots: vec![Slot {
                parent: None,
                depth: 0,
                jump: Version::ROOT,
            }],
        }
    }

    /// Allocates a new version whose parent is `parent`.
    ///
    /// The returned version is always greater than every version allocated
    /// before it. The first call on a fresh tracker returns version 1.
    ///
    /// # Panics
    ///
    /// Panics if `parent` has not been allocated (the same condition
    /// [`parent_of`](Self::parent_of) reports as `OutOfRange`).
    pub fn add(&mut self, parent: Version) -> Version {
        assert!(
            self.contains(parent),
            "parent {} out of range: only {} versions allocated",
            parent,
            self.slots.len()
        );
        let version = Version::new(self.slots.len() as u64);

        let up = self.slot(parent);
        let mid = self.slot(up.jump);
        let top = self.slot(mid.jump);
        // Skew-binary jump pointers: merge two equal-length jumps into one.
        let jump = if up.depth - mid.depth == mid.depth - top.depth {
            mid.jump
        } else {
            parent
        };

        self.slots.push(Slot {
            parent: Some(parent),
            depth: up.depth + 1,
            jump,
        });
        version
    }

    /// Returns the parent of `version`, or `None` for the root.
    pub fn parent_of(&self, version: Version) -> Result<Option<Version>, VersionError> {
        self.slots
            .get(version.index())
            .map(|s| s.parent)
            .ok_or_else(|| self.out_of_range(version))
    }

    /// Returns the number of parent steps from `version` to the root.
    pub fn depth_of(&self, version: Version) -> Result<u64, VersionError> {
        self.check(version)?;
        Ok(self.slot(version).depth)
    }

    /// Returns the number of allocated versions, including the root.
    #[inline]
    pub fn count_allocated(&self) -> usize {
        self.slots.len()
    }

    /// Returns the most recently allocated version.
    #[inline]
    pub fn latest(&self) -> Version {
        Version::new(self.slots.len() as u64 - 1)
    }

    /// Returns true if `version` has been allocated.
    #[inline]
    pub fn contains(&self, version: Version) -> bool {
        version.index() < self.slots.len()
    }

    /// Returns the ancestor chain of `version`, oldest first.
    ///
    /// The chain starts at the root and ends with `version` itself.
    pub fn ancestors_of(&self, version: Version) -> Result<Vec<Version>, VersionError> {
        self.check(version)?;
        Ok(self.ancestors_unchecked(version))
    }

    pub(crate) fn ancestors_unchecked(&self, version: Version) -> Vec<Version> {
        let mut chain = Vec::with_capacity(self.slot(version).depth as usize + 1);
        let mut cursor = Some(version);
        while let Some(v) = cursor {
            chain.push(v);
            cursor = self.slot(v).parent;
        }
        chain.reverse();
        chain
    }

    /// Returns true if `candidate` is on the history of `version`.
    ///
    /// Reflexive: every version is an ancestor of itself.
    pub fn is_ancestor(&self, candidate: Version, version: Version) -> Result<bool, VersionError> {
        self.check(candidate)?;
        self.check(version)?;
        Ok(self.is_ancestor_unchecked(candidate, version))
    }

    /// Returns true if `child` descends from `parent` (or equals it).
    #[inline]
    pub fn is_descendant(&self, child: Version, parent: Version) -> Result<bool, VersionError> {
        self.is_ancestor(parent, child)
    }

    /// Ancestry test for versions already known to be allocated.
    pub(crate) fn is_ancestor_unchecked(&self, candidate: Version, version: Version) -> bool {
        if candidate > version {
            return false;
        }
        let target = self.slot(candidate).depth;
        if target > self.slot(version).depth {
            return false;
        }
        self.ancestor_at_depth(version, target) == candidate
    }

    /// Returns the ancestor of `version` that sits `depth` steps below the root.
    ///
    /// `depth` must not exceed the depth of `version`.
    fn ancestor_at_depth(&self, version: Version, depth: u64) -> Version {
        let mut cursor = version;
        loop {
            let slot = self.slot(cursor);
            if slot.depth <= depth {
                return cursor;
            }
            cursor = if self.slot(slot.jump).depth >= depth {
                slot.jump
            } else {
                match slot.parent {
                    Some(parent) => parent,
                    None => return cursor,
                }
            };
        }
    }

    #[inline]
    fn slot(&self, version: Version) -> Slot {
        self.slots[version.index()]
    }

    #[inline]
    pub(crate) fn check(&self, version: Version) -> Result<(), VersionError> {
        if self.contains(version) {
            Ok(())
        } else {
            Err(self.out_of_range(version))
        }
    }

    fn out_of_range(&self, version: Version) -> VersionError {
        VersionError::OutOfRange {
            version,
            allocated: self.slots.len(),
        }
    }
}

impl Default for VersionTracker {
    fn default() -> Self {
        Self::new()
    }
}

// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Version identifier.

/// Identifier of one immutable snapshot of a set.
///
/// Versions are handed out in strictly increasing creation order by a
/// [`VersionTracker`](super::VersionTracker). Ordering between two versions
/// says which was created first, not whether one is on the other's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version(u64);

impl Version {
    /// The version of the initial empty set. It has no parent.
    pub const ROOT: Version = Version(0);

    /// Creates a version from its raw number.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw version number.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns true if this is the root version.
    #[inline]
    pub const fn is_root(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u64> for Version {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<Version> for u64 {
    fn from(version: Version) -> Self {
        version.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

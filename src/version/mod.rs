// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Version identifiers and the ancestry tracker.
//!
//! Every write against a set allocates a new [`Version`] whose parent is the
//! version the write was issued against. Versions therefore form a tree rooted
//! at [`Version::ROOT`], and the tracker answers "is `a` on the history of `b`"
//! queries by walking parent links.
//!
//! # Key Concepts
//!
//! - Parents are always allocated before their children, so `parent(v) < v`
//!   for every `v` other than the root.
//! - The parent chain of any version reaches the root in finitely many steps.
//! - Ancestry is reflexive: a version is on its own history.
//!
//! # Example
//!
//! ```
//! use fatset::version::{Version, VersionTracker};
//!
//! let mut tracker = VersionTracker::new();
//! let v1 = tracker.add(Version::ROOT);
//! let v2 = tracker.add(v1);
//! let v3 = tracker.add(v1);
//!
//! assert!(tracker.is_descendant(v2, v1).unwrap());
//! assert!(!tracker.is_descendant(v2, v3).unwrap());
//! ```

mod error;
mod id;
mod tracker;

pub use error::VersionError;
pub use id::Version;
pub use tracker::VersionTracker;

// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Persistent ordered set handles.
//!
//! A [`Set`] is a lightweight, immutable handle: a version number plus a
//! shared [`Entry`]. Adding a value never changes the handle it was called on;
//! it returns a new handle for a new version. Every handle ever issued keeps
//! answering queries exactly as it did when it was created.
//!
//! # Key Concepts
//!
//! - **Branching**: adding to the same handle twice yields two sibling
//!   versions. Neither sees the other's value.
//! - **Version consumption**: every add allocates a version, including adds
//!   of values already present.
//! - **Traversal order**: [`Set::to_vec`] is deterministic but not sorted.
//!
//! # Example
//!
//! ```
//! use fatset::Set;
//!
//! let empty = Set::new();
//! let a = empty.add(1).unwrap();
//! let b = a.add(2).unwrap();
//! let c = a.add(3).unwrap();
//!
//! assert!(empty.to_vec().is_empty());
//! assert!(b.contains(&2).unwrap() && !b.contains(&3).unwrap());
//! assert!(c.contains(&3).unwrap() && !c.contains(&2).unwrap());
//! assert!(b.is_descendant_of(&a) && !b.is_descendant_of(&c));
//! ```

mod compare;
mod config;
mod entry;
mod error;

pub use compare::{Comparer, FnComparer, NaturalOrder, PartialOrder};
pub use config::SetConfig;
pub use entry::{Entry, EntryStats};
pub use error::{CompareError, SetError};

use std::sync::Arc;

use tracing::trace;

use crate::version::{Version, VersionError};

/// One snapshot of a persistent ordered set.
///
/// Cloning a handle is cheap and yields the same snapshot.
pub struct Set<T> {
    version: Version,
    entry: Arc<Entry<T>>,
}

impl<T: Ord> Set<T> {
    /// Creates an empty set ordered by `T`'s [`Ord`] implementation.
    pub fn new() -> Self {
        Self::with_comparer(NaturalOrder)
    }
}

impl<T: Ord> Default for Set<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Set<T> {
    /// Creates an empty set ordered by `comparer`.
    pub fn with_comparer<C: Comparer<T> + 'static>(comparer: C) -> Self {
        Self::with_config(SetConfig::default(), comparer)
    }

    /// Creates an empty set with explicit configuration.
    pub fn with_config<C: Comparer<T> + 'static>(config: SetConfig, comparer: C) -> Self {
        Self {
            version: Version::ROOT,
            entry: Arc::new(Entry::new(config, Box::new(comparer))),
        }
    }

    /// Returns the version this handle observes.
    #[inline]
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns the entry shared by every handle of this set.
    #[inline]
    pub fn entry(&self) -> &Entry<T> {
        &self.entry
    }

    /// Returns a handle for a new version containing `value`.
    ///
    /// `self` is unaffected. A value already present still yields a new
    /// version, with the same members.
    pub fn add(&self, value: T) -> Result<Self, SetError> {
        let version = self.entry.insert(self.version, value)?;
        Ok(Self {
            version,
            entry: Arc::clone(&self.entry),
        })
    }

    /// Returns true if `value` is a member as of this version.
    pub fn contains(&self, value: &T) -> Result<bool, CompareError> {
        self.entry.contains(self.version, value)
    }

    /// Calls `f` on every member: left subtree, right subtree, then node.
    ///
    /// The entry's read lock is held for the whole traversal. `f` must not
    /// call back into any handle of the same set: an `add` deadlocks, and so
    /// can a nested read (`len`, `to_vec`, `contains`, ...) once a writer is
    /// queued on the lock, since the lock is not reentrant.
    pub fn visit_depth_first<F: FnMut(&T)>(&self, f: F) {
        self.entry.visit(self.version, f);
    }

    /// Returns every member as of this version.
    ///
    /// Each visited value is prepended to the result, so the order is the
    /// reverse of [`visit_depth_first`](Self::visit_depth_first). The order
    /// is deterministic but not sorted.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = Vec::new();
        self.visit_depth_first(|v| out.push(v.clone()));
        out.reverse();
        out
    }

    /// Returns the number of members as of this version.
    pub fn len(&self) -> usize {
        let mut count = 0;
        self.visit_depth_first(|_| count += 1);
        count
    }

    /// Returns true if this version has no members.
    pub fn is_empty(&self) -> bool {
        let mut empty = true;
        self.visit_depth_first(|_| empty = false);
        empty
    }

    /// Returns the versions this snapshot was built from, oldest first.
    ///
    /// The list starts at the root version and ends with this version.
    pub fn history(&self) -> Vec<Version> {
        self.entry.history_unchecked(self.version)
    }

    /// Returns true if this snapshot descends from `other` (or is it).
    ///
    /// Handles of different sets are never related.
    pub fn is_descendant_of(&self, other: &Set<T>) -> bool {
        self.ptr_eq_entry(other) && self.entry.is_ancestor_unchecked(other.version, self.version)
    }

    /// Returns a handle observing `version` of the same set.
    pub fn checkout(&self, version: Version) -> Result<Self, VersionError> {
        self.entry.check(version)?;
        trace!(from = %self.version, to = %version, "checkout");
        Ok(Self {
            version,
            entry: Arc::clone(&self.entry),
        })
    }

    /// Returns the growth counters of the shared entry.
    pub fn entry_stats(&self) -> EntryStats {
        self.entry.stats()
    }

    /// Returns true if both handles belong to the same set.
    #[inline]
    pub fn ptr_eq_entry(&self, other: &Set<T>) -> bool {
        Arc::ptr_eq(&self.entry, &other.entry)
    }
}

impl<T> Clone for Set<T> {
    fn clone(&self) -> Self {
        Self {
            version: self.version,
            entry: Arc::clone(&self.entry),
        }
    }
}

impl<T> std::fmt::Debug for Set<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Set")
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ResolveStrategy;
    use std::collections::BTreeSet;

    fn sorted<T: Ord + Clone>(set: &Set<T>) -> Vec<T> {
        let mut values = set.to_vec();
        values.sort();
        values
    }

    #[test]
    fn test_empty_set() {
        let s1: Set<i64> = Set::new();
        assert_eq!(s1.to_vec(), Vec::<i64>::new());
        assert_eq!(s1.version(), Version::ROOT);
        assert!(s1.is_empty());
        assert_eq!(s1.len(), 0);
    }

    #[test]
    fn test_add_leaves_parent_unchanged() {
        let s1 = Set::new();
        let s2 = s1.add(1234).unwrap();
        assert!(s1.to_vec().is_empty());
        assert_eq!(s2.to_vec(), vec![1234]);
    }

    #[test]
    fn test_add_second_value() {
        let s1 = Set::new();
        let s2 = s1.add(1234).unwrap();
        let s3 = s2.add(5678).unwrap();
        assert_eq!(sorted(&s3), vec![1234, 5678]);
        assert_eq!(s2.to_vec(), vec![1234]);
    }

    #[test]
    fn test_branches_are_isolated() {
        let s1 = Set::new();
        let a = s1.add(1).unwrap();
        let b = a.add(2).unwrap();
        let c = a.add(3).unwrap();

        assert_eq!(sorted(&b), vec![1, 2]);
        assert_eq!(sorted(&c), vec![1, 3]);
        assert_eq!(a.to_vec(), vec![1]);
    }

    #[test]
    fn test_branch_from_interior_version() {
        let base = Set::new().add(50).unwrap().add(30).unwrap();
        let left = base.add(20).unwrap().add(10).unwrap();
        let right = base.add(40).unwrap().add(35).unwrap();

        assert_eq!(sorted(&left), vec![10, 20, 30, 50]);
        assert_eq!(sorted(&right), vec![30, 35, 40, 50]);
        assert_eq!(sorted(&base), vec![30, 50]);
    }

    #[test]
    fn test_duplicate_add_consumes_version() {
        let s1 = Set::new().add(7).unwrap();
        let s2 = s1.add(7).unwrap();

        assert_ne!(s1.version(), s2.version());
        assert_eq!(s2.version(), Version::new(2));
        assert_eq!(s2.to_vec(), vec![7]);
        assert_eq!(s2.entry_stats().nodes, 1);
    }

    #[test]
    fn test_to_vec_prepends_visit_order() {
        let mut set = Set::new();
        for value in [50, 30, 70, 20, 40] {
            set = set.add(value).unwrap();
        }

        let mut visited = Vec::new();
        set.visit_depth_first(|v| visited.push(*v));
        assert_eq!(visited, vec![20, 40, 30, 70, 50]);
        assert_eq!(set.to_vec(), vec![50, 70, 30, 40, 20]);
    }

    #[test]
    fn test_contains() {
        let a = Set::new().add(10).unwrap().add(5).unwrap();
        let b = a.add(15).unwrap();

        assert!(a.contains(&5).unwrap());
        assert!(!a.contains(&15).unwrap());
        assert!(b.contains(&15).unwrap());
        assert!(!b.contains(&6).unwrap());
    }

    #[test]
    fn test_history_and_descent() {
        let s0 = Set::new();
        let s1 = s0.add(1).unwrap();
        let s2 = s1.add(2).unwrap();
        let s3 = s1.add(3).unwrap();

        assert_eq!(
            s2.history(),
            vec![Version::ROOT, s1.version(), s2.version()]
        );
        assert!(s2.is_descendant_of(&s1));
        assert!(s3.is_descendant_of(&s1));
        assert!(s2.is_descendant_of(&s2));
        assert!(!s2.is_descendant_of(&s3));
        assert!(!s3.is_descendant_of(&s2));
        assert!(!s1.is_descendant_of(&s2));
    }

    #[test]
    fn test_unrelated_sets_are_not_descendants() {
        let a = Set::new().add(1).unwrap();
        let b = Set::new().add(1).unwrap();
        assert_eq!(a.version(), b.version());
        assert!(!a.ptr_eq_entry(&b));
        assert!(!a.is_descendant_of(&b));
    }

    #[test]
    fn test_checkout() {
        let s1 = Set::new().add(1).unwrap();
        let s2 = s1.add(2).unwrap();

        let back = s2.checkout(s1.version()).unwrap();
        assert_eq!(back.to_vec(), vec![1]);
        assert!(back.ptr_eq_entry(&s2));

        let err = s2.checkout(Version::new(99)).unwrap_err();
        assert!(matches!(err, VersionError::OutOfRange { allocated: 3, .. }));
    }

    #[test]
    fn test_custom_comparer() {
        let set = Set::with_comparer(|a: &String, b: &String| {
            a.to_lowercase().cmp(&b.to_lowercase())
        });
        let set = set.add("Apple".to_string()).unwrap();
        let set = set.add("APPLE".to_string()).unwrap();
        let set = set.add("banana".to_string()).unwrap();

        assert_eq!(set.len(), 2);
        assert!(set.contains(&"apple".to_string()).unwrap());
    }

    #[test]
    fn test_plain_closure_comparer() {
        let set = Set::with_comparer(|a: &i32, b: &i32| b.cmp(a));
        let set = set.add(1).unwrap().add(3).unwrap().add(2).unwrap().add(3).unwrap();

        assert_eq!(set.len(), 3);
        assert!(set.contains(&2).unwrap());
        // Reversed order puts 3 to the left of the root.
        let mut visited = Vec::new();
        set.visit_depth_first(|v| visited.push(*v));
        assert_eq!(visited, vec![2, 3, 1]);
    }

    #[test]
    fn test_comparer_error_propagates() {
        let set = Set::with_comparer(PartialOrder).add(1.0).unwrap();
        let before = set.entry_stats();

        let err = set.add(f64::NAN).unwrap_err();
        assert!(matches!(err, SetError::Compare(CompareError::Incomparable { .. })));
        assert_eq!(set.entry_stats(), before);
        assert!(set.contains(&f64::NAN).is_err());
    }

    #[test]
    fn test_linear_strategy() {
        let config = SetConfig::new().with_resolve(ResolveStrategy::Linear);
        let s1 = Set::with_config(config, NaturalOrder);
        let a = s1.add(1).unwrap();
        let b = a.add(2).unwrap();
        let c = a.add(3).unwrap();

        assert_eq!(sorted(&b), vec![1, 2]);
        assert_eq!(sorted(&c), vec![1, 3]);
    }

    #[test]
    fn test_entry_growth_is_append_only() {
        let s1 = Set::new().add(2).unwrap();
        let s2 = s1.add(1).unwrap();
        let _s3 = s1.add(3).unwrap();

        let stats = s2.entry_stats();
        assert_eq!(stats.versions, 4);
        assert_eq!(stats.nodes, 3);
        assert_eq!(stats.edges, 2);
        assert_eq!(stats.roots, 4);
    }

    #[test]
    fn test_handles_shared_across_threads() {
        use std::thread;

        let base = Set::new().add(0).unwrap();
        let handles: Vec<_> = (1..=4)
            .map(|i| {
                let base = base.clone();
                thread::spawn(move || {
                    let mut set = base;
                    for j in 0..50 {
                        set = set.add(i * 1000 + j).unwrap();
                    }
                    set
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for (i, set) in (1..=4).zip(&results) {
            let expected: BTreeSet<_> = std::iter::once(0)
                .chain((0..50).map(|j| i * 1000 + j))
                .collect();
            let actual: BTreeSet<_> = set.to_vec().into_iter().collect();
            assert_eq!(actual, expected);
        }
        assert_eq!(base.to_vec(), vec![0]);
        assert_eq!(base.entry_stats().versions, 2 + 4 * 50);
    }
}

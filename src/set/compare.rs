// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Three-way comparison of set elements.

use std::cmp::Ordering;
use std::fmt::Debug;

use super::error::CompareError;

/// Total order over set elements.
///
/// A comparer may refuse a pair it cannot order. The refusal is returned to
/// whoever triggered the comparison without being retried or recorded.
pub trait Comparer<T>: Send + Sync {
    /// Orders `a` relative to `b`.
    fn compare(&self, a: &T, b: &T) -> Result<Ordering, CompareError>;
}

/// Orders elements by their [`Ord`] implementation. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalOrder;

impl<T: Ord> Comparer<T> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Result<Ordering, CompareError> {
        Ok(a.cmp(b))
    }
}

/// Orders elements by their [`PartialOrd`] implementation.
///
/// Fails with [`CompareError::Incomparable`] for pairs without an ordering,
/// such as a float NaN against anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartialOrder;

impl<T: PartialOrd + Debug> Comparer<T> for PartialOrder {
    fn compare(&self, a: &T, b: &T) -> Result<Ordering, CompareError> {
        a.partial_cmp(b).ok_or_else(|| CompareError::Incomparable {
            left: format!("{:?}", a),
            right: format!("{:?}", b),
        })
    }
}

/// Adapts a fallible closure into a [`Comparer`].
#[derive(Clone, Copy)]
pub struct FnComparer<F>(F);

impl<F> FnComparer<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<T, F> Comparer<T> for FnComparer<F>
where
    F: Fn(&T, &T) -> Result<Ordering, CompareError> + Send + Sync,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Result<Ordering, CompareError> {
        (self.0)(a, b)
    }
}

/// Any infallible `Fn(&T, &T) -> Ordering` closure is a comparer.
impl<T, F> Comparer<T> for F
where
    F: Fn(&T, &T) -> Ordering + Send + Sync,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Result<Ordering, CompareError> {
        Ok(self(a, b))
    }
}

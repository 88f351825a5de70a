// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Set error types.

use crate::version::VersionError;

/// Errors raised by a [`Comparer`](super::Comparer).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompareError {
    #[error("values are not comparable: {left} vs {right}")]
    Incomparable { left: String, right: String },

    #[error("comparison failed: {0}")]
    Custom(String),
}

/// Errors that can occur in set operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetError {
    #[error("version error: {0}")]
    Version(#[from] VersionError),

    #[error("comparison error: {0}")]
    Compare(#[from] CompareError),
}

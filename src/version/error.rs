// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Version tracker error types.

use super::Version;

/// Errors that can occur when querying the version tracker.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionError {
    #[error("version {version} out of range: only {allocated} versions allocated")]
    OutOfRange { version: Version, allocated: usize },
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for layout resolution.
//!
//! Only size resolution can fail. Plain-data probing never errors: every
//! failure there is reported as an [`Eligibility`](crate::Eligibility) tag.

use std::fmt;

/// Result type used across the crate.
pub type Result<T, E = LayoutError> = std::result::Result<T, E>;

/// Errors produced while resolving type layouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The measured size does not fit the serializer's signed size range.
    ///
    /// Configuration-fatal: the type breaks the layout assumptions of the
    /// serializer and the call is never retried.
    SizeOverflow {
        /// Full type name as reported by the compiler.
        type_name: &'static str,
        /// Measured size in bytes.
        size: usize,
        /// Largest accepted size in bytes.
        limit: usize,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::SizeOverflow {
                type_name,
                size,
                limit,
            } => write!(
                f,
                "layout of {} is {} bytes, exceeds limit of {} bytes",
                type_name, size, limit
            ),
        }
    }
}

impl std::error::Error for LayoutError {}

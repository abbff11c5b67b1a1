// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Canonical type names.
//!
//! The canonical name is the key a serializer uses for generated-code caches
//! and schema identifiers. It must not change with the crate or module a type
//! lives in, and an `Option<T>` shares its key with `T`:
//!
//! ```text
//! core::option::Option<i32>          -> i32
//! alloc::vec::Vec<app::msg::Point>   -> Vec<Point>
//! [[u8; 4]; 2]                       -> u8
//! ```

use crate::descriptor::TypeDescriptor;

/// Canonical short name of `ty`.
///
/// Optional wrappers are unwrapped one level, every path is cut down to its
/// last segment and array notation is removed.
pub fn canonical_name(ty: TypeDescriptor) -> String {
    let declared = ty.underlying().unwrap_or(ty).type_name();
    strip_array_notation(&short_type_name(declared))
}

/// Drop module qualifiers from every path in a type name.
///
/// `alloc::vec::Vec<core::option::Option<u8>>` becomes `Vec<Option<u8>>`.
pub fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    // Start of the path currently being written; reset after any separator.
    let mut path_start = 0;
    let mut chars = full.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            out.truncate(path_start);
            continue;
        }
        if !(c.is_alphanumeric() || c == '_') {
            out.push(c);
            path_start = out.len();
            continue;
        }
        out.push(c);
    }

    out
}

/// Remove `[`/`]` and array lengths (`; N`) from a type name.
///
/// `[u32; 4]` becomes `u32`, `Vec<[u8; 16]>` becomes `Vec<u8>`.
pub fn strip_array_notation(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut depth = 0usize;
    // Bracket depth at which a `; N` length is being skipped.
    let mut skip_at: Option<usize> = None;

    for c in name.chars() {
        match c {
            '[' => depth += 1,
            ']' => {
                if skip_at == Some(depth) {
                    skip_at = None;
                }
                depth = depth.saturating_sub(1);
            }
            ';' if depth > 0 && skip_at.is_none() => skip_at = Some(depth),
            _ if skip_at.is_some() => {}
            _ => out.push(c),
        }
    }

    out
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Primitive size table.
//!
//! A closed set of value kinds whose size is known without measuring.
//! Sizes are the host's native sizes of the Rust type each kind stands for.

use std::mem::size_of;

/// Value kinds with statically known sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PrimitiveKind {
    Bool,
    /// Unicode scalar value (`char`).
    Char,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    I128,
    U128,
    F32,
    F64,
    /// `uuid::Uuid`.
    Uuid,
    /// `std::time::Duration` / `chrono::TimeDelta`.
    Duration,
    /// `chrono::DateTime<Utc>`.
    Timestamp,
    /// `chrono::DateTime<FixedOffset>`.
    TimestampOffset,
}

impl PrimitiveKind {
    /// Every kind in the table.
    pub const ALL: [PrimitiveKind; 18] = [
        Self::Bool,
        Self::Char,
        Self::I8,
        Self::U8,
        Self::I16,
        Self::U16,
        Self::I32,
        Self::U32,
        Self::I64,
        Self::U64,
        Self::I128,
        Self::U128,
        Self::F32,
        Self::F64,
        Self::Uuid,
        Self::Duration,
        Self::Timestamp,
        Self::TimestampOffset,
    ];

    /// Size in bytes of one value of this kind.
    pub const fn size(self) -> usize {
        match self {
            Self::Bool => size_of::<bool>(),
            Self::Char => size_of::<char>(),
            Self::I8 => size_of::<i8>(),
            Self::U8 => size_of::<u8>(),
            Self::I16 => size_of::<i16>(),
            Self::U16 => size_of::<u16>(),
            Self::I32 => size_of::<i32>(),
            Self::U32 => size_of::<u32>(),
            Self::I64 => size_of::<i64>(),
            Self::U64 => size_of::<u64>(),
            Self::I128 => size_of::<i128>(),
            Self::U128 => size_of::<u128>(),
            Self::F32 => size_of::<f32>(),
            Self::F64 => size_of::<f64>(),
            Self::Uuid => size_of::<uuid::Uuid>(),
            Self::Duration => size_of::<std::time::Duration>(),
            Self::Timestamp => size_of::<chrono::DateTime<chrono::Utc>>(),
            Self::TimestampOffset => size_of::<chrono::DateTime<chrono::FixedOffset>>(),
        }
    }

    /// Short display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::I8 => "i8",
            Self::U8 => "u8",
            Self::I16 => "i16",
            Self::U16 => "u16",
            Self::I32 => "i32",
            Self::U32 => "u32",
            Self::I64 => "i64",
            Self::U64 => "u64",
            Self::I128 => "i128",
            Self::U128 => "u128",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Uuid => "uuid",
            Self::Duration => "duration",
            Self::Timestamp => "timestamp",
            Self::TimestampOffset => "timestamp_offset",
        }
    }
}

/// Table lookup: `None` for anything outside the primitive set.
pub const fn size_of_primitive(kind: Option<PrimitiveKind>) -> Option<usize> {
    match kind {
        Some(kind) => Some(kind.size()),
        None => None,
    }
}

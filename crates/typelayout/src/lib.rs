// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # typelayout - runtime type-layout introspection
//!
//! Answers the three questions a binary serializer asks once per type before
//! choosing between a raw byte copy and a field-by-field walk:
//!
//! - **How big is it?** [`LayoutInspector::size_of`]
//! - **Is it plain data?** [`LayoutInspector::is_plain_data`]
//! - **What is it called?** [`LayoutInspector::canonical_name`]
//!
//! ## Quick Start
//!
//! ```rust
//! use typelayout::{LayoutInspector, Reflect, TypeDescriptor};
//!
//! #[derive(Reflect)]
//! struct Sample {
//!     id: u32,
//!     value: f64,
//! }
//!
//! let inspector = LayoutInspector::new();
//! let ty = TypeDescriptor::of::<Sample>();
//!
//! assert_eq!(inspector.size_of(ty).unwrap(), 16);
//! assert!(inspector.is_plain_data(ty));
//! assert_eq!(inspector.canonical_name(ty), "Sample");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +--------------------------------------------------------------+
//! |                      LayoutInspector                         |
//! |   size_of | is_plain_data | canonical_name | layout          |
//! +---------------+-------------------+--------------------------+
//! | SizeResolver  | probe (pin check) | name (normalizer)        |
//! |  PrimitiveKind table              |                          |
//! |  SizeCache (ArcSwap + Mutex)      |                          |
//! +---------------+-------------------+--------------------------+
//! |        TypeDescriptor  <-  Reflect (#[derive(Reflect)])      |
//! +--------------------------------------------------------------+
//! ```
//!
//! ## Modules Overview
//!
//! - [`descriptor`] - Type descriptors (identity handles)
//! - [`reflect`] - The `Reflect` host facility and its std/chrono/uuid impls
//! - [`primitive`] - Primitive size table
//! - [`resolver`] - Memoized size resolution
//! - [`probe`] - Plain-data eligibility probe
//! - [`name`] - Canonical name normalizer
//! - [`inspector`] - Facade combining the three operations
//! - [`config`] - Limits and environment overrides

extern crate self as typelayout;

pub mod config;
pub mod descriptor;
pub mod error;
pub mod inspector;
pub mod name;
pub mod primitive;
pub mod probe;
pub mod reflect;
pub mod resolver;

pub use config::LayoutConfig;
pub use descriptor::{Composition, TypeDescriptor, ValueKind};
pub use error::{LayoutError, Result};
pub use inspector::{
    get_inspector, init_inspector, CopyStrategy, InspectorStats, LayoutInspector, TypeLayout,
};
pub use name::{canonical_name, short_type_name, strip_array_notation};
pub use primitive::{size_of_primitive, PrimitiveKind};
pub use probe::{is_plain_value, Eligibility};
pub use reflect::Reflect;
pub use resolver::{ResolverStats, SizeCache, SizeResolver};

/// `#[derive(Reflect)]`: generates the [`Reflect`] impl for structs and enums.
pub use typelayout_codegen::Reflect;

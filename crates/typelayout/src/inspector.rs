// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Layout inspector: the serializer-facing facade.
//!
//! One [`LayoutInspector`] owns one size cache. Create isolated instances
//! freely (tests, embedded serializers) or share the process-wide one via
//! [`init_inspector`] / [`get_inspector`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use crate::config::LayoutConfig;
use crate::descriptor::TypeDescriptor;
use crate::error::Result;
use crate::name;
use crate::probe::Eligibility;
use crate::reflect::Reflect;
use crate::resolver::SizeResolver;

static GLOBAL_INSPECTOR: OnceLock<Arc<LayoutInspector>> = OnceLock::new();

/// Initialize the process-wide inspector.
///
/// The first call wins; later calls return the existing instance and ignore
/// `config`.
pub fn init_inspector(config: LayoutConfig) -> Arc<LayoutInspector> {
    GLOBAL_INSPECTOR
        .get_or_init(|| {
            log::debug!("[typelayout] global inspector init: {:?}", config);
            Arc::new(LayoutInspector::with_config(config))
        })
        .clone()
}

/// Process-wide inspector (created with the default config if needed).
pub fn get_inspector() -> Arc<LayoutInspector> {
    GLOBAL_INSPECTOR
        .get()
        .cloned()
        .unwrap_or_else(|| init_inspector(LayoutConfig::default()))
}

/// How a serializer should move values of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CopyStrategy {
    /// Copy `size` bytes verbatim.
    RawBytes { size: usize },
    /// Visit fields one by one.
    FieldWalk,
}

/// Everything the inspector knows about one type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TypeLayout {
    /// Canonical short name (cache/schema key).
    pub name: String,
    /// Full compiler type name.
    pub type_name: &'static str,
    /// Size in bytes of one value.
    pub size: usize,
    pub eligibility: Eligibility,
    pub strategy: CopyStrategy,
}

/// Inspector counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InspectorStats {
    pub primitive_hits: u64,
    pub cache_hits: u64,
    pub measurements: u64,
    /// Pins actually taken by the plain-data probe.
    pub pin_probes: u64,
    pub cached_types: usize,
}

/// Answers size, plain-data and name questions about types.
pub struct LayoutInspector {
    config: LayoutConfig,
    sizes: SizeResolver,
    pin_probes: AtomicU64,
}

impl LayoutInspector {
    /// Inspector with the default (environment-aware) configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::default())
    }

    #[must_use]
    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            sizes: SizeResolver::new(&config),
            config,
            pin_probes: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Byte size of one value of `ty`. Memoized.
    pub fn size_of(&self, ty: TypeDescriptor) -> Result<usize> {
        self.sizes.size_of(ty)
    }

    pub fn size_of_type<T: Reflect>(&self) -> Result<usize> {
        self.size_of(TypeDescriptor::of::<T>())
    }

    /// Whether values of `ty` can be copied as a flat byte range.
    pub fn is_plain_data(&self, ty: TypeDescriptor) -> bool {
        self.eligibility(ty).is_eligible()
    }

    pub fn is_plain_type<T: Reflect>(&self) -> bool {
        self.is_plain_data(TypeDescriptor::of::<T>())
    }

    /// Probe `ty` and report why it is or is not plain data. Never cached.
    pub fn eligibility(&self, ty: TypeDescriptor) -> Eligibility {
        let outcome = ty.probe();
        if outcome.pinned {
            self.pin_probes.fetch_add(1, Ordering::Relaxed);
        }
        log::trace!("[LayoutInspector] {} -> {:?}", ty, outcome.eligibility);
        outcome.eligibility
    }

    /// Canonical short name of `ty`.
    pub fn canonical_name(&self, ty: TypeDescriptor) -> String {
        name::canonical_name(ty)
    }

    pub fn canonical_name_of<T: Reflect>(&self) -> String {
        self.canonical_name(TypeDescriptor::of::<T>())
    }

    /// Full report for `ty`, including the copy strategy.
    pub fn layout(&self, ty: TypeDescriptor) -> Result<TypeLayout> {
        let size = self.size_of(ty)?;
        let eligibility = self.eligibility(ty);
        let strategy = if eligibility.is_eligible() {
            CopyStrategy::RawBytes { size }
        } else {
            CopyStrategy::FieldWalk
        };

        Ok(TypeLayout {
            name: self.canonical_name(ty),
            type_name: ty.type_name(),
            size,
            eligibility,
            strategy,
        })
    }

    /// Number of types in the size cache.
    pub fn cached_types(&self) -> usize {
        self.sizes.cache().len()
    }

    #[must_use]
    pub fn stats(&self) -> InspectorStats {
        let sizes = self.sizes.stats();
        InspectorStats {
            primitive_hits: sizes.primitive_hits,
            cache_hits: sizes.cache_hits,
            measurements: sizes.measurements,
            pin_probes: self.pin_probes.load(Ordering::Relaxed),
            cached_types: self.cached_types(),
        }
    }
}

impl Default for LayoutInspector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    #![allow(dead_code)] // Fixture fields exist only for their layout

    use super::*;

    #[derive(crate::Reflect)]
    struct Telemetry {
        ts: u64,
        temp: f32,
        ok: bool,
    }

    #[derive(crate::Reflect)]
    struct Labeled {
        id: u32,
        label: String,
    }

    fn inspector() -> LayoutInspector {
        LayoutInspector::with_config(LayoutConfig::builtin())
    }

    #[test]
    fn plain_struct_copies_raw_bytes() {
        let inspector = inspector();
        let layout = inspector.layout(TypeDescriptor::of::<Telemetry>()).unwrap();
        assert_eq!(layout.name, "Telemetry");
        assert_eq!(layout.size, std::mem::size_of::<Telemetry>());
        assert_eq!(layout.eligibility, Eligibility::Eligible);
        assert_eq!(
            layout.strategy,
            CopyStrategy::RawBytes {
                size: std::mem::size_of::<Telemetry>()
            }
        );
    }

    #[test]
    fn struct_with_string_walks_fields() {
        let inspector = inspector();
        assert!(!inspector.is_plain_type::<Labeled>());
        let layout = inspector.layout(TypeDescriptor::of::<Labeled>()).unwrap();
        assert_eq!(layout.eligibility, Eligibility::ContainsReferences);
        assert_eq!(layout.strategy, CopyStrategy::FieldWalk);
    }

    #[test]
    fn reference_kind_is_not_pinned() {
        let inspector = inspector();
        assert!(!inspector.is_plain_type::<String>());
        assert!(!inspector.is_plain_type::<Box<u32>>());
        assert!(!inspector.is_plain_type::<Vec<u8>>());
        assert_eq!(inspector.stats().pin_probes, 0);

        assert!(inspector.is_plain_type::<u32>());
        assert_eq!(inspector.stats().pin_probes, 1);
    }

    #[test]
    fn eligibility_is_not_cached() {
        let inspector = inspector();
        for _ in 0..3 {
            assert!(inspector.is_plain_type::<Telemetry>());
        }
        assert_eq!(inspector.stats().pin_probes, 3);
        assert_eq!(inspector.cached_types(), 0);
    }

    #[test]
    fn optional_names_match() {
        let inspector = inspector();
        assert_eq!(
            inspector.canonical_name_of::<Option<i32>>(),
            inspector.canonical_name_of::<i32>()
        );
    }

    #[test]
    fn stats_track_cache() {
        let inspector = inspector();
        inspector.size_of_type::<Telemetry>().unwrap();
        inspector.size_of_type::<Telemetry>().unwrap();
        inspector.size_of_type::<u8>().unwrap();

        let stats = inspector.stats();
        assert_eq!(stats.measurements, 1);
        assert_eq!(stats.cache_hits, 1);
        assert_eq!(stats.primitive_hits, 1);
        assert_eq!(stats.cached_types, 1);
    }

    #[test]
    fn global_inspector_is_shared() {
        let first = get_inspector();
        let second = init_inspector(LayoutConfig::builtin().with_max_type_size(1));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.size_of_type::<u16>().unwrap(), 2);
    }
}

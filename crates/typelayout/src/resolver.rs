// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Memoized size resolution.
//!
//! Sizes come from the primitive table when the type is in it, otherwise
//! from the measurement routine monomorphized into the descriptor. Measured
//! sizes are cached for the lifetime of the [`SizeCache`].
//!
//! Reads are lock-free snapshots of an `ArcSwap`'d map. Inserts copy the map
//! under a mutex held for the insert only; measurement runs outside it, so
//! two threads missing on the same type may both measure. Both write the
//! same value.

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::config::LayoutConfig;
use crate::descriptor::TypeDescriptor;
use crate::error::{LayoutError, Result};
use crate::primitive::size_of_primitive;

/// Grow-only map from type to measured size.
pub struct SizeCache {
    entries: ArcSwap<HashMap<TypeDescriptor, usize>>,
    writer: Mutex<()>,
}

impl SizeCache {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: ArcSwap::from_pointee(HashMap::with_capacity(capacity)),
            writer: Mutex::new(()),
        }
    }

    /// Lock-free lookup.
    pub fn get(&self, ty: TypeDescriptor) -> Option<usize> {
        self.entries.load().get(&ty).copied()
    }

    pub fn contains(&self, ty: TypeDescriptor) -> bool {
        self.entries.load().contains_key(&ty)
    }

    /// Record `size` for `ty`. Idempotent: re-inserting the same size is a no-op.
    pub fn insert(&self, ty: TypeDescriptor, size: usize) {
        let _guard = self.writer.lock();
        let current = self.entries.load();
        if let Some(existing) = current.get(&ty) {
            debug_assert_eq!(*existing, size, "size of {} changed", ty);
            return;
        }

        let mut next = HashMap::with_capacity(current.len() + 1);
        next.extend(current.iter().map(|(k, v)| (*k, *v)));
        next.insert(ty, size);
        self.entries.store(Arc::new(next));
        log::debug!("[SizeCache] cached {} = {} bytes", ty, size);
    }

    pub fn len(&self) -> usize {
        self.entries.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SizeCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolution counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ResolverStats {
    /// Answered from the primitive table.
    pub primitive_hits: u64,
    /// Answered from the size cache.
    pub cache_hits: u64,
    /// Measurement routine invocations.
    pub measurements: u64,
}

/// Resolves type sizes: primitive table, then cache, then measurement.
pub struct SizeResolver {
    cache: SizeCache,
    limit: usize,
    primitive_hits: AtomicU64,
    cache_hits: AtomicU64,
    measurements: AtomicU64,
}

impl SizeResolver {
    #[must_use]
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            cache: SizeCache::with_capacity(config.cache_capacity),
            limit: config.size_limit(),
            primitive_hits: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
            measurements: AtomicU64::new(0),
        }
    }

    /// Size in bytes of one value of `ty`.
    ///
    /// Fails only when a measured size exceeds the configured limit; such a
    /// size is never cached.
    pub fn size_of(&self, ty: TypeDescriptor) -> Result<usize> {
        if let Some(size) = size_of_primitive(ty.primitive()) {
            self.primitive_hits.fetch_add(1, Ordering::Relaxed);
            return Ok(size);
        }

        if let Some(size) = self.cache.get(ty) {
            self.cache_hits.fetch_add(1, Ordering::Relaxed);
            log::trace!("[SizeResolver] hit {} = {} bytes", ty, size);
            return Ok(size);
        }

        let size = self.measure(ty)?;
        self.cache.insert(ty, size);
        Ok(size)
    }

    fn measure(&self, ty: TypeDescriptor) -> Result<usize> {
        self.measurements.fetch_add(1, Ordering::Relaxed);
        let size = ty.measure();

        if size > self.limit {
            log::error!(
                "[SizeResolver] {} measures {} bytes, limit is {}",
                ty,
                size,
                self.limit
            );
            return Err(LayoutError::SizeOverflow {
                type_name: ty.type_name(),
                size,
                limit: self.limit,
            });
        }

        log::debug!("[SizeResolver] measured {} = {} bytes", ty, size);
        Ok(size)
    }

    pub fn cache(&self) -> &SizeCache {
        &self.cache
    }

    /// Largest size accepted from measurement.
    pub fn limit(&self) -> usize {
        self.limit
    }

    #[must_use]
    pub fn stats(&self) -> ResolverStats {
        ResolverStats {
            primitive_hits: self.primitive_hits.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            measurements: self.measurements.load(Ordering::Relaxed),
        }
    }
}

impl Default for SizeResolver {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}

#[cfg(test)]
mod tests;

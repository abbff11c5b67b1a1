// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Layout inspector configuration.
//!
//! Static limits live here as constants; [`LayoutConfig`] carries the
//! per-instance values. `LayoutConfig::default()` honors the environment
//! overrides below, so a deployed serializer can tighten limits without a
//! rebuild.
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `TYPELAYOUT_MAX_TYPE_SIZE` | Largest accepted type size in bytes |
//! | `TYPELAYOUT_CACHE_CAPACITY` | Initial size cache capacity |

/// Largest size the serializer can address: its size fields are signed 32-bit.
pub const SIGNED_SIZE_LIMIT: usize = i32::MAX as usize;

/// Default largest accepted type size (the full signed range).
pub const DEFAULT_MAX_TYPE_SIZE: usize = SIGNED_SIZE_LIMIT;

/// Default initial capacity of the size cache.
///
/// Entries are bounded by the program's type universe, so this only avoids
/// early rehashing.
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Environment variable overriding [`LayoutConfig::max_type_size`].
pub const ENV_MAX_TYPE_SIZE: &str = "TYPELAYOUT_MAX_TYPE_SIZE";

/// Environment variable overriding [`LayoutConfig::cache_capacity`].
pub const ENV_CACHE_CAPACITY: &str = "TYPELAYOUT_CACHE_CAPACITY";

/// Per-inspector configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Largest accepted type size in bytes. Clamped to [`SIGNED_SIZE_LIMIT`].
    pub max_type_size: usize,
    /// Initial capacity of the size cache.
    pub cache_capacity: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_type_size: std::env::var(ENV_MAX_TYPE_SIZE)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_TYPE_SIZE),
            cache_capacity: std::env::var(ENV_CACHE_CAPACITY)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_CACHE_CAPACITY),
        }
    }
}

impl LayoutConfig {
    /// Configuration with the built-in defaults, ignoring the environment.
    pub fn builtin() -> Self {
        Self {
            max_type_size: DEFAULT_MAX_TYPE_SIZE,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }

    /// Set the largest accepted type size.
    pub fn with_max_type_size(mut self, max_type_size: usize) -> Self {
        self.max_type_size = max_type_size;
        self
    }

    /// Set the initial size cache capacity.
    pub fn with_cache_capacity(mut self, cache_capacity: usize) -> Self {
        self.cache_capacity = cache_capacity;
        self
    }

    /// Size limit actually enforced: never above [`SIGNED_SIZE_LIMIT`].
    pub fn size_limit(&self) -> usize {
        self.max_type_size.min(SIGNED_SIZE_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_uses_signed_range() {
        let config = LayoutConfig::builtin();
        assert_eq!(config.max_type_size, i32::MAX as usize);
        assert_eq!(config.cache_capacity, DEFAULT_CACHE_CAPACITY);
        assert_eq!(config.size_limit(), SIGNED_SIZE_LIMIT);
    }

    #[test]
    fn size_limit_is_clamped() {
        let config = LayoutConfig::builtin().with_max_type_size(usize::MAX);
        assert_eq!(config.size_limit(), SIGNED_SIZE_LIMIT);

        let config = LayoutConfig::builtin().with_max_type_size(512);
        assert_eq!(config.size_limit(), 512);
    }

    #[test]
    fn builder_setters() {
        let config = LayoutConfig::builtin()
            .with_max_type_size(64)
            .with_cache_capacity(8);
        assert_eq!(config.max_type_size, 64);
        assert_eq!(config.cache_capacity, 8);
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//! Tests for SizeResolver and SizeCache.

#![allow(dead_code)] // Fixture fields exist only for their layout

use super::*;
use crate::reflect::Reflect;
use std::sync::{Arc, Barrier};
use std::thread;

#[derive(crate::Reflect)]
struct Pose {
    x: f64,
    y: f64,
    heading: f32,
}

#[derive(crate::Reflect)]
struct Frame {
    seq: u32,
    pose: Pose,
    flags: [u8; 3],
}

#[derive(crate::Reflect)]
struct Blob {
    bytes: [u8; 256],
}

fn resolver() -> SizeResolver {
    SizeResolver::new(&LayoutConfig::builtin())
}

#[test]
fn primitive_sizes_bypass_cache() {
    let resolver = resolver();
    assert_eq!(resolver.size_of(i32::descriptor()).unwrap(), 4);
    assert_eq!(resolver.size_of(f64::descriptor()).unwrap(), 8);
    assert_eq!(resolver.size_of(uuid::Uuid::descriptor()).unwrap(), 16);
    assert_eq!(resolver.size_of(bool::descriptor()).unwrap(), 1);

    let stats = resolver.stats();
    assert_eq!(stats.primitive_hits, 4);
    assert_eq!(stats.measurements, 0);
    assert!(resolver.cache().is_empty());
}

#[test]
fn primitive_sizes_independent_of_cache_state() {
    let resolver = resolver();
    let before = resolver.size_of(u64::descriptor()).unwrap();
    resolver.size_of(Pose::descriptor()).unwrap();
    resolver.size_of(Frame::descriptor()).unwrap();
    let after = resolver.size_of(u64::descriptor()).unwrap();
    assert_eq!(before, 8);
    assert_eq!(after, 8);
    assert!(!resolver.cache().contains(u64::descriptor()));
}

#[test]
fn measured_sizes_match_size_of() {
    let resolver = resolver();
    assert_eq!(
        resolver.size_of(Pose::descriptor()).unwrap(),
        std::mem::size_of::<Pose>()
    );
    assert_eq!(
        resolver.size_of(Frame::descriptor()).unwrap(),
        std::mem::size_of::<Frame>()
    );
    assert_eq!(
        resolver.size_of(<Option<u32>>::descriptor()).unwrap(),
        std::mem::size_of::<Option<u32>>()
    );
    assert_eq!(resolver.size_of(<()>::descriptor()).unwrap(), 0);
}

#[test]
fn second_call_does_not_remeasure() {
    let resolver = resolver();
    let first = resolver.size_of(Frame::descriptor()).unwrap();
    let stats = resolver.stats();
    assert_eq!(stats.measurements, 1);
    assert_eq!(stats.cache_hits, 0);

    let second = resolver.size_of(Frame::descriptor()).unwrap();
    assert_eq!(first, second);

    let stats = resolver.stats();
    assert_eq!(stats.measurements, 1);
    assert_eq!(stats.cache_hits, 1);
    assert_eq!(resolver.cache().get(Frame::descriptor()), Some(first));
}

#[test]
fn overflow_is_fatal_and_not_cached() {
    let config = LayoutConfig::builtin().with_max_type_size(128);
    let resolver = SizeResolver::new(&config);

    let err = resolver.size_of(Blob::descriptor()).unwrap_err();
    match err {
        LayoutError::SizeOverflow {
            type_name,
            size,
            limit,
        } => {
            assert!(type_name.ends_with("Blob"));
            assert_eq!(size, 256);
            assert_eq!(limit, 128);
        }
    }
    assert!(!resolver.cache().contains(Blob::descriptor()));

    // Same answer every time, no silent recovery.
    assert!(resolver.size_of(Blob::descriptor()).is_err());
    assert_eq!(resolver.stats().measurements, 2);
}

#[test]
fn limit_does_not_apply_to_primitives() {
    let config = LayoutConfig::builtin().with_max_type_size(4);
    let resolver = SizeResolver::new(&config);
    assert_eq!(resolver.size_of(u128::descriptor()).unwrap(), 16);
    assert!(resolver.size_of(<[u32; 2]>::descriptor()).is_err());
}

#[test]
fn cache_insert_is_idempotent() {
    let cache = SizeCache::new();
    let ty = Pose::descriptor();
    cache.insert(ty, 24);
    cache.insert(ty, 24);
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get(ty), Some(24));
    assert_eq!(cache.get(Frame::descriptor()), None);
}

#[test]
fn concurrent_first_access_agrees() {
    let resolver = Arc::new(resolver());
    let barrier = Arc::new(Barrier::new(8));
    let mut handles = Vec::new();

    for _ in 0..8 {
        let resolver = Arc::clone(&resolver);
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            resolver.size_of(Frame::descriptor()).unwrap()
        }));
    }

    let sizes: Vec<usize> = handles
        .into_iter()
        .map(|h| h.join().expect("thread should succeed"))
        .collect();

    assert!(sizes.iter().all(|&s| s == std::mem::size_of::<Frame>()));
    assert_eq!(resolver.cache().len(), 1);

    let stats = resolver.stats();
    assert!(stats.measurements >= 1);
    assert_eq!(stats.measurements + stats.cache_hits, 8);
}

#[test]
fn concurrent_mixed_types() {
    let resolver = Arc::new(resolver());
    let barrier = Arc::new(Barrier::new(8));
    let mut handles = Vec::new();

    for _ in 0..8 {
        let resolver = Arc::clone(&resolver);
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            for _ in 0..500 {
                let (ty, expected) = match fastrand::usize(..4) {
                    0 => (Pose::descriptor(), std::mem::size_of::<Pose>()),
                    1 => (Frame::descriptor(), std::mem::size_of::<Frame>()),
                    2 => (<[u16; 5]>::descriptor(), 10),
                    _ => (i16::descriptor(), 2),
                };
                assert_eq!(resolver.size_of(ty).unwrap(), expected);
            }
        }));
    }

    for handle in handles {
        handle.join().expect("thread should succeed");
    }

    // i16 is primitive and never cached.
    assert_eq!(resolver.cache().len(), 3);
    assert!(!resolver.cache().contains(i16::descriptor()));
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Plain-data eligibility probe.
//!
//! A type is plain data when its default value can be pinned in place and
//! released again with nothing but inline bytes behind it: no pointers into
//! the heap, no owned resources. Such values are copied by the serializer as
//! an opaque byte range.
//!
//! The probe never fails. Each reason a type is not eligible maps to one
//! [`Eligibility`] variant:
//!
//! | Condition | Result | Pinned |
//! |-----------|--------|--------|
//! | `Reflect::KIND` is `Reference` | `ReferenceKind` | no |
//! | default value reports null | `NullDefault` | no |
//! | composition is `Referential` | `ContainsReferences` | yes |
//! | `needs_drop::<T>()` | `OwnsResources` | yes |
//! | default construction panicked | `ProbeFault` | no |
//! | otherwise | `Eligible` | yes |

use std::mem;
use std::panic;
use std::pin::{pin, Pin};

use crate::descriptor::{Composition, ValueKind};
use crate::reflect::Reflect;

/// Outcome of the plain-data probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Eligibility {
    /// Safe to copy as a flat byte range.
    Eligible,
    /// Reference kind; never probed.
    ReferenceKind,
    /// Default value is null (`None`, null pointer); never pinned.
    NullDefault,
    /// Holds a pointer or a reference-kind field.
    ContainsReferences,
    /// Releasing the value runs drop glue.
    OwnsResources,
    /// Building the default value panicked.
    ProbeFault,
}

impl Eligibility {
    pub fn is_eligible(self) -> bool {
        matches!(self, Eligibility::Eligible)
    }
}

/// Probe result plus whether a pin was actually taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ProbeOutcome {
    pub(crate) eligibility: Eligibility,
    pub(crate) pinned: bool,
}

impl ProbeOutcome {
    fn unpinned(eligibility: Eligibility) -> Self {
        Self {
            eligibility,
            pinned: false,
        }
    }
}

/// Probe `T`'s default value. Monomorphized into every `TypeDescriptor`.
pub(crate) fn probe<T: Reflect>() -> ProbeOutcome {
    if T::KIND == ValueKind::Reference {
        return ProbeOutcome::unpinned(Eligibility::ReferenceKind);
    }

    match panic::catch_unwind(pin_default::<T>) {
        Ok(outcome) => outcome,
        Err(_) => {
            log::warn!(
                "[probe] default value of {} panicked, treating as not plain data",
                std::any::type_name::<T>()
            );
            ProbeOutcome::unpinned(Eligibility::ProbeFault)
        }
    }
}

fn pin_default<T: Reflect>() -> ProbeOutcome {
    let value = T::default_value();
    if T::is_null(&value) {
        return ProbeOutcome::unpinned(Eligibility::NullDefault);
    }

    let pinned = pin!(value);
    let eligibility = check_pinned(pinned.as_ref());
    // Pin released here; the value is dropped in place.
    ProbeOutcome {
        eligibility,
        pinned: true,
    }
}

fn check_pinned<T: Reflect>(_value: Pin<&T>) -> Eligibility {
    if T::COMPOSITION == Composition::Referential {
        Eligibility::ContainsReferences
    } else if mem::needs_drop::<T>() {
        Eligibility::OwnsResources
    } else {
        Eligibility::Eligible
    }
}

/// Whether the type of `value` is plain data.
///
/// Only the type matters; the probe runs on a fresh default value.
pub fn is_plain_value<T: Reflect>(_value: &T) -> bool {
    probe::<T>().eligibility.is_eligible()
}

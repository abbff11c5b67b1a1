// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors: identity handles for runtime types.
//!
//! A [`TypeDescriptor`] compares and hashes by `TypeId` only. Everything
//! else it carries (name, kinds, routines) is what the inspector needs to
//! answer its three questions without knowing the concrete type.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;

use crate::primitive::PrimitiveKind;
use crate::probe::{self, ProbeOutcome};
use crate::reflect::Reflect;

/// Whether a type is a value or a handle to data stored elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Stored inline (numbers, structs, arrays, options, raw pointers).
    Value,
    /// Owning or borrowing handle into the heap (`Box`, `Rc`, `Arc`,
    /// `String`, `Vec`, `&'static str`).
    Reference,
}

/// What a type's bytes contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Composition {
    /// Only inline data; the bytes are position independent.
    Flat,
    /// Holds at least one pointer or reference-kind field.
    Referential,
}

impl Composition {
    /// Combine two compositions: flat only if both are flat.
    pub const fn and(self, other: Composition) -> Composition {
        match (self, other) {
            (Composition::Flat, Composition::Flat) => Composition::Flat,
            _ => Composition::Referential,
        }
    }
}

/// Opaque, copyable handle for a runtime type.
#[derive(Clone, Copy)]
pub struct TypeDescriptor {
    id: TypeId,
    type_name: &'static str,
    kind: ValueKind,
    primitive: Option<PrimitiveKind>,
    measure: fn() -> usize,
    probe: fn() -> ProbeOutcome,
    underlying: fn() -> Option<TypeDescriptor>,
}

impl TypeDescriptor {
    /// Descriptor for `T`.
    pub fn of<T: Reflect>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            kind: T::KIND,
            primitive: T::PRIMITIVE,
            measure: mem::size_of::<T>,
            probe: probe::probe::<T>,
            underlying: T::underlying,
        }
    }

    /// Descriptor for the type of `value`.
    pub fn of_val<T: Reflect>(_value: &T) -> Self {
        Self::of::<T>()
    }

    /// Identity of the described type.
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Full type name as reported by the compiler (module paths included).
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Primitive kind, if the type is in the primitive size table.
    pub fn primitive(&self) -> Option<PrimitiveKind> {
        self.primitive
    }

    /// Wrapped type when this is an optional wrapper (`Option<T>` -> `T`).
    pub fn underlying(&self) -> Option<TypeDescriptor> {
        (self.underlying)()
    }

    pub fn is_optional(&self) -> bool {
        self.underlying().is_some()
    }

    /// Run the measurement routine monomorphized for this type.
    pub(crate) fn measure(&self) -> usize {
        (self.measure)()
    }

    /// Run the default-value pin probe monomorphized for this type.
    pub(crate) fn probe(&self) -> ProbeOutcome {
        (self.probe)()
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type_name", &self.type_name)
            .field("kind", &self.kind)
            .field("primitive", &self.primitive)
            .finish()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The `Reflect` host facility.
//!
//! `Reflect` is how a type tells the inspector what the runtime cannot see
//! on its own: whether it is a value or a reference kind, whether its bytes
//! are flat, how to build its default value and whether that default counts
//! as null. User types get it from `#[derive(Reflect)]`; std, chrono and
//! uuid types are covered here.

use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use crate::descriptor::{Composition, TypeDescriptor, ValueKind};
use crate::primitive::PrimitiveKind;

/// Runtime layout facts about a type.
///
/// # Example
///
/// ```
/// use typelayout::{Composition, Reflect, ValueKind};
///
/// #[derive(Reflect)]
/// struct Reading {
///     sensor: u16,
///     label: String,
/// }
///
/// assert_eq!(Reading::KIND, ValueKind::Value);
/// assert_eq!(Reading::COMPOSITION, Composition::Referential);
/// ```
pub trait Reflect: Sized + 'static {
    /// Value or reference kind.
    const KIND: ValueKind = ValueKind::Value;
    /// Whether the bytes of a value are flat.
    const COMPOSITION: Composition = Composition::Flat;
    /// Entry in the primitive size table, if any.
    const PRIMITIVE: Option<PrimitiveKind> = None;

    /// Default (zero) value used by the plain-data probe.
    fn default_value() -> Self;

    /// Whether `value` reports as null (`None`, null pointers).
    fn is_null(_value: &Self) -> bool {
        false
    }

    /// Wrapped type for optional wrappers.
    fn underlying() -> Option<TypeDescriptor> {
        None
    }

    /// Descriptor for this type.
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::of::<Self>()
    }
}

macro_rules! reflect_primitive {
    ($($ty:ty => $kind:ident, $default:expr;)*) => {
        $(
            impl Reflect for $ty {
                const PRIMITIVE: Option<PrimitiveKind> = Some(PrimitiveKind::$kind);

                fn default_value() -> Self {
                    $default
                }
            }
        )*
    };
}

reflect_primitive! {
    bool => Bool, false;
    char => Char, '\0';
    i8 => I8, 0;
    u8 => U8, 0;
    i16 => I16, 0;
    u16 => U16, 0;
    i32 => I32, 0;
    u32 => U32, 0;
    i64 => I64, 0;
    u64 => U64, 0;
    i128 => I128, 0;
    u128 => U128, 0;
    f32 => F32, 0.0;
    f64 => F64, 0.0;
    uuid::Uuid => Uuid, uuid::Uuid::nil();
    Duration => Duration, Duration::ZERO;
    chrono::TimeDelta => Duration, chrono::TimeDelta::zero();
    chrono::DateTime<chrono::Utc> => Timestamp, chrono::DateTime::default();
    chrono::DateTime<chrono::FixedOffset> => TimestampOffset, chrono::DateTime::default();
}

// Pointer-sized integers depend on the target, so they are measured.
impl Reflect for usize {
    fn default_value() -> Self {
        0
    }
}

impl Reflect for isize {
    fn default_value() -> Self {
        0
    }
}

impl Reflect for () {
    fn default_value() -> Self {}
}

impl<T: ?Sized + 'static> Reflect for PhantomData<T> {
    fn default_value() -> Self {
        PhantomData
    }
}

impl Reflect for SystemTime {
    fn default_value() -> Self {
        SystemTime::UNIX_EPOCH
    }
}

impl<T: Reflect> Reflect for Option<T> {
    const COMPOSITION: Composition = T::COMPOSITION;

    fn default_value() -> Self {
        None
    }

    fn is_null(value: &Self) -> bool {
        value.is_none()
    }

    fn underlying() -> Option<TypeDescriptor> {
        Some(TypeDescriptor::of::<T>())
    }
}

impl<T: Reflect> Reflect for *const T {
    const COMPOSITION: Composition = Composition::Referential;

    fn default_value() -> Self {
        std::ptr::null()
    }

    fn is_null(value: &Self) -> bool {
        value.is_null()
    }
}

impl<T: Reflect> Reflect for *mut T {
    const COMPOSITION: Composition = Composition::Referential;

    fn default_value() -> Self {
        std::ptr::null_mut()
    }

    fn is_null(value: &Self) -> bool {
        value.is_null()
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    const COMPOSITION: Composition = T::COMPOSITION;

    fn default_value() -> Self {
        std::array::from_fn(|_| T::default_value())
    }
}

macro_rules! reflect_reference {
    ($($ty:ty => $default:expr;)*) => {
        $(
            impl Reflect for $ty {
                const KIND: ValueKind = ValueKind::Reference;
                const COMPOSITION: Composition = Composition::Referential;

                fn default_value() -> Self {
                    $default
                }
            }
        )*
    };
}

reflect_reference! {
    String => String::new();
    &'static str => "";
}

macro_rules! reflect_reference_generic {
    ($($wrapper:ident => $default:expr;)*) => {
        $(
            impl<T: Reflect> Reflect for $wrapper<T> {
                const KIND: ValueKind = ValueKind::Reference;
                const COMPOSITION: Composition = Composition::Referential;

                fn default_value() -> Self {
                    $default
                }
            }
        )*
    };
}

reflect_reference_generic! {
    Box => Box::new(T::default_value());
    Rc => Rc::new(T::default_value());
    Arc => Arc::new(T::default_value());
    Vec => Vec::new();
}

macro_rules! reflect_tuple {
    ($($name:ident)+) => {
        impl<$($name: Reflect),+> Reflect for ($($name,)+) {
            const COMPOSITION: Composition =
                Composition::Flat$(.and($name::COMPOSITION))+;

            fn default_value() -> Self {
                ($($name::default_value(),)+)
            }
        }
    };
}

reflect_tuple! { A }
reflect_tuple! { A B }
reflect_tuple! { A B C }
reflect_tuple! { A B C D }
reflect_tuple! { A B C D E }
reflect_tuple! { A B C D E F }
reflect_tuple! { A B C D E F G }
reflect_tuple! { A B C D E F G H }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_carry_table_kind() {
        assert_eq!(i32::PRIMITIVE, Some(PrimitiveKind::I32));
        assert_eq!(uuid::Uuid::PRIMITIVE, Some(PrimitiveKind::Uuid));
        assert_eq!(chrono::TimeDelta::PRIMITIVE, Some(PrimitiveKind::Duration));
        assert_eq!(usize::PRIMITIVE, None);
    }

    #[test]
    fn primitive_table_matches_native_sizes() {
        fn check<T: Reflect>() {
            let kind = T::PRIMITIVE.expect("primitive kind");
            assert_eq!(kind.size(), std::mem::size_of::<T>(), "{:?}", kind);
        }
        check::<bool>();
        check::<char>();
        check::<i16>();
        check::<u64>();
        check::<i128>();
        check::<f32>();
        check::<uuid::Uuid>();
        check::<Duration>();
        check::<chrono::TimeDelta>();
        check::<chrono::DateTime<chrono::Utc>>();
        check::<chrono::DateTime<chrono::FixedOffset>>();
    }

    #[test]
    fn reference_kinds() {
        assert_eq!(String::KIND, ValueKind::Reference);
        assert_eq!(<Vec<u8>>::KIND, ValueKind::Reference);
        assert_eq!(<Box<u8>>::KIND, ValueKind::Reference);
        assert_eq!(<&'static str>::KIND, ValueKind::Reference);
        assert_eq!(<Arc<u8>>::COMPOSITION, Composition::Referential);
    }

    #[test]
    fn compositions_propagate() {
        assert_eq!(<[u16; 8]>::COMPOSITION, Composition::Flat);
        assert_eq!(<[String; 2]>::COMPOSITION, Composition::Referential);
        assert_eq!(<(u8, f64)>::COMPOSITION, Composition::Flat);
        assert_eq!(<(u8, Box<u8>)>::COMPOSITION, Composition::Referential);
        assert_eq!(<Option<u32>>::COMPOSITION, Composition::Flat);
        assert_eq!(<*const u8>::COMPOSITION, Composition::Referential);
    }

    #[test]
    fn null_defaults() {
        assert!(<Option<u8>>::is_null(&<Option<u8>>::default_value()));
        assert!(<*mut u8 as Reflect>::is_null(&<*mut u8>::default_value()));
        assert!(<*const u8 as Reflect>::is_null(&<*const u8>::default_value()));
        assert!(!<*const u8 as Reflect>::is_null(&(&7u8 as *const u8)));
        assert!(!u8::is_null(&u8::default_value()));
        assert!(!<Option<u8>>::is_null(&Some(1)));
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    parse_macro_input, parse_quote, Data, DeriveInput, Fields, GenericParam, Generics, Type,
};

/// `#[derive(Reflect)]` macro: generates a `typelayout::Reflect` impl
///
/// Supports:
/// - Structs with named, unnamed or no fields
/// - Enums with at least one variant (the first variant is the default)
/// - Type and const generic parameters (each type parameter gets a
///   `Reflect` bound)
///
/// The composition is flat only when every field is flat. The default value
/// is built from the fields' own default values.
///
/// Container attribute `#[layout(reference)]` declares the type a reference
/// kind (a handle into data stored elsewhere).
///
/// Example:
/// ```ignore
/// use typelayout::Reflect;
///
/// #[derive(Reflect)]
/// struct ImageMeta {
///     image_id: u32,
///     width: u16,
///     height: u16,
///     format: String,      // makes the type non plain-data
/// }
/// ```
#[proc_macro_derive(Reflect, attributes(layout))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let reference = parse_container_attrs(input)?;
    let generics = add_reflect_bounds(&input.generics)?;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let (types, default_expr) = match &input.data {
        Data::Struct(data) => (
            field_types(&data.fields),
            construct(quote! { Self }, &data.fields),
        ),
        Data::Enum(data) => {
            let Some(first) = data.variants.first() else {
                return Err(syn::Error::new_spanned(
                    input,
                    "Reflect cannot be derived for an enum without variants",
                ));
            };
            let variant = &first.ident;
            let variant_types = data
                .variants
                .iter()
                .flat_map(|v| field_types(&v.fields))
                .collect();
            (variant_types, construct(quote! { Self::#variant }, &first.fields))
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "Reflect cannot be derived for unions",
            ))
        }
    };

    let kind_items = if reference {
        quote! {
            const KIND: ::typelayout::ValueKind = ::typelayout::ValueKind::Reference;
            const COMPOSITION: ::typelayout::Composition =
                ::typelayout::Composition::Referential;
        }
    } else {
        quote! {
            const COMPOSITION: ::typelayout::Composition =
                ::typelayout::Composition::Flat
                #( .and(<#types as ::typelayout::Reflect>::COMPOSITION) )*;
        }
    };

    Ok(quote! {
        impl #impl_generics ::typelayout::Reflect for #name #ty_generics #where_clause {
            #kind_items

            fn default_value() -> Self {
                #default_expr
            }
        }
    })
}

/// Parse `#[layout(...)]`; returns whether `reference` was given.
fn parse_container_attrs(input: &DeriveInput) -> syn::Result<bool> {
    let mut reference = false;
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("layout")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("reference") {
                reference = true;
                Ok(())
            } else {
                Err(meta.error("unsupported layout attribute, expected `reference`"))
            }
        })?;
    }
    Ok(reference)
}

/// Bound every type parameter by `Reflect`; lifetimes are rejected since
/// `Reflect` types are `'static`.
fn add_reflect_bounds(generics: &Generics) -> syn::Result<Generics> {
    let mut generics = generics.clone();
    for param in &mut generics.params {
        match param {
            GenericParam::Type(ty) => ty.bounds.push(parse_quote!(::typelayout::Reflect)),
            GenericParam::Lifetime(lt) => {
                return Err(syn::Error::new_spanned(
                    lt,
                    "Reflect types must be 'static, lifetime parameters are not supported",
                ))
            }
            GenericParam::Const(_) => {}
        }
    }
    Ok(generics)
}

fn field_types(fields: &Fields) -> Vec<Type> {
    fields.iter().map(|f| f.ty.clone()).collect()
}

/// Expression building `path` from its fields' default values.
fn construct(path: proc_macro2::TokenStream, fields: &Fields) -> proc_macro2::TokenStream {
    match fields {
        Fields::Named(named) => {
            let inits = named.named.iter().map(|f| {
                let ident = &f.ident;
                let ty = &f.ty;
                quote! { #ident: <#ty as ::typelayout::Reflect>::default_value() }
            });
            quote! { #path { #(#inits),* } }
        }
        Fields::Unnamed(unnamed) => {
            let inits = unnamed.unnamed.iter().map(|f| {
                let ty = &f.ty;
                quote! { <#ty as ::typelayout::Reflect>::default_value() }
            });
            quote! { #path ( #(#inits),* ) }
        }
        Fields::Unit => path,
    }
}

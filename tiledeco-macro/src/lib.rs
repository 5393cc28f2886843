//! Procedural macros for use in tiledeco.

use proc_macro2::{Span, TokenStream};

use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, FieldsNamed, Ident, Meta, parse_macro_input};

/// Derives the `ConfigSection` trait.
///
/// The trait must be in scope where the derive is used.
///
/// ## Example
///
/// ```ignore
/// #[derive(ConfigSection)]
/// pub struct BorderSection {
///     #[key] // exposed as a key named "width".
///     width: i32,
///     #[key]
///     radius: i32,
///
///     #[subsection] // exposed as a subsection named "colors".
///     colors: ColorSection,
///
///     cache: Vec<u8>, // fields with no attribute are not exposed.
/// }
/// ```
#[proc_macro_derive(ConfigSection, attributes(key, subsection))]
pub fn configsection_derive(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand_configsection(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_configsection(input: DeriveInput) -> syn::Result<TokenStream> {
    let Data::Struct(datastruct) = input.data else {
        return Err(syn::Error::new(
            Span::call_site(),
            "ConfigSection can only be derived on structs",
        ));
    };

    let Fields::Named(fields) = datastruct.fields else {
        return Err(syn::Error::new(
            Span::call_site(),
            "ConfigSection cannot be derived on structs with unnamed fields",
        ));
    };

    let keys = tagged_fields(&fields, "key");
    let subsections = tagged_fields(&fields, "subsection");

    let key_arms = match_arms(&keys, quote! { &dyn ::std::any::Any });
    let subsection_arms = match_arms(&subsections, quote! { &dyn ConfigSection });

    let key_names: Vec<String> = keys.iter().map(|i| i.to_string()).collect();

    let name = input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ConfigSection for #name #ty_generics #where_clause {
            fn get_key(&self, name: &str) -> Option<&dyn ::std::any::Any> {
                #key_arms
            }

            fn subsection(&self, name: &str) -> Option<&dyn ConfigSection> {
                #subsection_arms
            }

            fn keys(&self) -> &'static [&'static str] {
                &[#(#key_names),*]
            }
        }
    })
}

fn match_arms(idents: &[&Ident], cast: TokenStream) -> TokenStream {
    if idents.is_empty() {
        return quote! { let _ = name; None };
    }

    let arms: Vec<TokenStream> = idents
        .iter()
        .map(|ident| {
            let name = ident.to_string();
            quote! { #name => Some(&self.#ident as #cast), }
        })
        .collect();

    quote! {
        match name {
            #(#arms)*
            _ => None,
        }
    }
}

/// Collects the idents of every field marked with `#[helper]`.
fn tagged_fields<'f>(fields: &'f FieldsNamed, helper: &str) -> Vec<&'f Ident> {
    fields
        .named
        .iter()
        .filter(|f| field_has_helper(f, helper))
        .filter_map(|f| f.ident.as_ref())
        .collect()
}

fn field_has_helper(field: &Field, helper: &str) -> bool {
    field.attrs.iter().any(|attr| match &attr.meta {
        Meta::Path(p) => p.is_ident(helper),
        _ => false,
    })
}

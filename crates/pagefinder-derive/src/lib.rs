//! Pagefinder Derive Macros: page and component field containers
//!
//! Page models are plain structs holding element handles. The
//! `FieldContainer` derive exposes their fields by name so the acquisition
//! layer can resolve "the categories list on the HomePage" without any
//! hand-written lookup tables.
//!
//! # Example
//!
//! ```ignore
//! use pagefinder::prelude::*;
//!
//! #[derive(FieldContainer)]
//! struct ProductCard {
//!     #[field(root)]
//!     card: ElementHandle,
//!     title: ElementHandle,
//!     add_to_cart: ElementHandle,
//! }
//!
//! #[derive(FieldContainer)]
//! #[container(name = "HomePage")]
//! struct HomePage {
//!     categories: Vec<ElementHandle>,
//!     #[field(components)]
//!     product_cards: Vec<ProductCard>,
//!     #[field(skip)]
//!     visits: u32,
//! }
//! ```
//!
//! # Field keys
//!
//! Fields are exposed under their lowerCamelCase name (`product_cards`
//! becomes `productCards`), which is the form callers' names take after
//! first-letter normalization. `#[field(rename = "...")]` overrides the key.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Field, Fields, LitStr};

/// Derive macro exposing a struct's fields as a page or component.
///
/// Generates `::pagefinder::container::FieldContainer`, which provides:
/// - `container_name()` - the page or component name (defaults to the struct name)
/// - `fields()` - a `Container` snapshot of every exposed field
///
/// # Attributes
///
/// - `#[container(name = "...")]` - Override the container name
/// - `#[field(rename = "...")]` - Override the field key
/// - `#[field(skip)]` - Do not expose the field
/// - `#[field(root)]` - The element the component itself renders as; its text
///   is what component-by-text selection reads
/// - `#[field(component)]` - A nested container
/// - `#[field(components)]` - A list of nested containers
///
/// Unannotated fields must be `ElementHandle`, `Vec<ElementHandle>` or an
/// `Option` of either. A `None` field is absent from the snapshot.
#[proc_macro_derive(FieldContainer, attributes(field, container))]
pub fn derive_field_container(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_field_container(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_field_container(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let container_name = container_name(&input.attrs)?.unwrap_or_else(|| name.to_string());

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => fields.named.iter().collect::<Vec<_>>(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    name,
                    "FieldContainer needs named fields to derive field keys",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "FieldContainer can only be derived for structs",
            ))
        }
    };

    let statements = fields
        .into_iter()
        .map(field_statement)
        .collect::<syn::Result<Vec<_>>>()?;

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::pagefinder::container::FieldContainer for #name #ty_generics #where_clause {
            fn container_name(&self) -> &str {
                #container_name
            }

            fn fields(&self) -> ::pagefinder::container::Container {
                let mut container = ::pagefinder::container::Container::new(#container_name);
                #(#statements)*
                container
            }
        }
    })
}

// ============================================================================
// Field Options
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldRole {
    Element,
    Root,
    Component,
    Components,
    Skip,
}

#[derive(Debug, PartialEq, Eq)]
struct FieldOptions {
    role: FieldRole,
    rename: Option<String>,
}

impl FieldOptions {
    fn parse(field: &Field) -> syn::Result<Self> {
        let mut options = Self {
            role: FieldRole::Element,
            rename: None,
        };

        for attr in field.attrs.iter().filter(|a| a.path().is_ident("field")) {
            attr.parse_nested_meta(|meta| {
                let role = if meta.path.is_ident("rename") {
                    let value: LitStr = meta.value()?.parse()?;
                    options.rename = Some(value.value());
                    return Ok(());
                } else if meta.path.is_ident("skip") {
                    FieldRole::Skip
                } else if meta.path.is_ident("root") {
                    FieldRole::Root
                } else if meta.path.is_ident("component") {
                    FieldRole::Component
                } else if meta.path.is_ident("components") {
                    FieldRole::Components
                } else {
                    return Err(meta.error(
                        "expected one of: rename, skip, root, component, components",
                    ));
                };

                if options.role != FieldRole::Element {
                    return Err(meta.error("a field can only have one role"));
                }
                options.role = role;
                Ok(())
            })?;
        }

        Ok(options)
    }
}

fn field_statement(field: &Field) -> syn::Result<TokenStream2> {
    let options = FieldOptions::parse(field)?;
    let Some(ident) = field.ident.as_ref() else {
        return Err(syn::Error::new_spanned(field, "expected a named field"));
    };
    let key = options
        .rename
        .unwrap_or_else(|| to_lower_camel_case(&ident.to_string()));

    let statement = match options.role {
        FieldRole::Skip => quote! {},
        FieldRole::Element => quote! {
            container.insert_opt(
                #key,
                ::pagefinder::container::IntoFieldValue::field_value(&self.#ident),
            );
        },
        FieldRole::Root => quote! {
            if let ::core::option::Option::Some(::pagefinder::container::FieldValue::Element(root)) =
                ::pagefinder::container::IntoFieldValue::field_value(&self.#ident)
            {
                container.set_root(root);
            }
        },
        FieldRole::Component => quote! {
            container.insert(#key, ::pagefinder::container::FieldValue::component(&self.#ident));
        },
        FieldRole::Components => quote! {
            container.insert(#key, ::pagefinder::container::FieldValue::components(&self.#ident));
        },
    };

    Ok(statement)
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Extract the `name` from `#[container(name = "...")]`
fn container_name(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut name = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("container")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                name = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("expected `name = \"...\"`"))
            }
        })?;
    }
    Ok(name)
}

/// Convert snake_case to lowerCamelCase
fn to_lower_camel_case(s: &str) -> String {
    let s = s.strip_prefix("r#").unwrap_or(s);
    let mut result = String::with_capacity(s.len());
    let mut upper_next = false;

    for c in s.chars() {
        if c == '_' {
            upper_next = !result.is_empty();
        } else if upper_next {
            result.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

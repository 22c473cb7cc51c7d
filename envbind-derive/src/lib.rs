//! Derive macro implementation for envbind

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Field, Fields, Type, Visibility};

mod attrs;

use attrs::{FieldAttrs, StructAttrs};

/// Extract inner type from Option<T>
fn extract_option_inner_type(ty: &Type) -> Option<&Type> {
    if let Type::Path(type_path) = ty {
        if let Some(seg) = type_path.path.segments.last() {
            if seg.ident != "Option" {
                return None;
            }
            if let syn::PathArguments::AngleBracketed(args) = &seg.arguments {
                if let Some(syn::GenericArgument::Type(inner)) = args.args.first() {
                    return Some(inner);
                }
            }
        }
    }
    None
}

fn optional_str(value: Option<&str>) -> TokenStream2 {
    match value {
        Some(value) => quote! { ::core::option::Option::Some(#value) },
        None => quote! { ::core::option::Option::None },
    }
}

/// Generate the walker call for one field, or nothing for skipped fields.
fn field_statement(field: &Field) -> syn::Result<TokenStream2> {
    let attrs = FieldAttrs::from_field(field)?;
    if !attrs.present || matches!(field.vis, Visibility::Inherited) {
        return Ok(TokenStream2::new());
    }

    let Some(field_name) = field.ident.as_ref() else {
        return Err(syn::Error::new_spanned(field, "expected a named field"));
    };

    if attrs.nested {
        return Ok(match attrs.prefix {
            Some(prefix) => quote! {
                __walker.scoped(#prefix, |__walker| __walker.nested(&mut self.#field_name));
            },
            None => quote! {
                __walker.nested(&mut self.#field_name);
            },
        });
    }

    // Without an explicit key the field name is used in UPPER_SNAKE_CASE
    let tag = attrs
        .tag
        .unwrap_or_else(|| field_name.unraw().to_string().to_uppercase());
    let default = optional_str(attrs.default.as_deref());
    let usage = optional_str(attrs.usage.as_deref());
    let spec = quote! {
        &::envbind::FieldSpec {
            tag: #tag,
            default: #default,
            usage: #usage,
        }
    };

    let field_type = &field.ty;
    let (parse_type, wrap) = match extract_option_inner_type(field_type) {
        Some(inner) => (inner, quote! { .map(::core::option::Option::Some) }),
        None => (field_type, TokenStream2::new()),
    };

    let statement = if let Some(func_path) = attrs.deserializer {
        let func: syn::Path = syn::parse_str(&func_path).map_err(|e| {
            syn::Error::new_spanned(field, format!("invalid deserializer path: {e}"))
        })?;
        quote! {
            __walker.field_with(&mut self.#field_name, #spec, |__raw: &str| {
                #func(__raw)#wrap
            });
        }
    } else if attrs.parse {
        quote! {
            __walker.field_with(&mut self.#field_name, #spec, |__raw: &str| {
                <#parse_type as ::core::str::FromStr>::from_str(__raw)#wrap
            });
        }
    } else {
        quote! {
            __walker.field(&mut self.#field_name, #spec);
        }
    };
    Ok(statement)
}

/// `EnvBind` derive macro
///
/// Implements `envbind::EnvBind` for structs with named fields.
///
/// # Supported Attributes
///
/// **Struct-level**:
/// - `#[env(prefix = "PREFIX_")]`: Add prefix to all keys of the struct
///
/// **Field-level**:
/// - `#[env("KEY,required,expand")]`: Variable name and options
/// - `#[env]`: Use the field name in upper case as the key
/// - `#[env(default = "value")]`: Literal used when the variable is not set
/// - `#[env(usage = "text")]`: Description for usage output (defaults to the doc comment)
/// - `#[env(nested)]` / `#[env(nested, prefix = "DB_")]`: Descend into a nested record
/// - `#[env(parse)]`: Convert with `FromStr`
/// - `#[env(deserializer = "func")]`: Convert with a custom function
///
/// Fields without `#[env]` and non-`pub` fields are skipped.
///
/// # Example
///
/// See the `envbind` crate documentation for usage examples.
#[proc_macro_derive(EnvBind, attributes(env))]
pub fn derive_envbind(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let struct_attrs = StructAttrs::from_attrs(&input.attrs)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "EnvBind only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "EnvBind only supports structs",
            ));
        }
    };

    let statements = fields
        .iter()
        .map(field_statement)
        .collect::<syn::Result<Vec<_>>>()?;

    let body = match struct_attrs.prefix {
        Some(prefix) => quote! {
            __walker.scoped(#prefix, |__walker| {
                #(#statements)*
            });
        },
        None => quote! { #(#statements)* },
    };

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::envbind::EnvBind for #struct_name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn visit(&mut self, __walker: &mut ::envbind::Walker<'_>) {
                #body
            }
        }
    })
}

//! Attribute parsing for `#[env(...)]` annotations.
//!
//! This module extracts and validates binding attributes from structs and
//! their fields during macro expansion.

use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, ExprLit, ExprUnary, Field, Lit, LitStr, Meta, Token, UnOp};

/// One comma-separated argument inside `#[env(...)]`.
enum EnvArg {
    /// The leading `"KEY,options"` annotation
    Tag(LitStr),
    /// `nested`, `parse`, `default = ...` and friends
    Meta(Meta),
}

impl Parse for EnvArg {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(LitStr) {
            input.parse().map(Self::Tag)
        } else {
            input.parse().map(Self::Meta)
        }
    }
}

fn env_args(attr: &Attribute) -> syn::Result<Vec<EnvArg>> {
    if matches!(attr.meta, Meta::Path(_)) {
        return Ok(Vec::new());
    }
    let args = attr.parse_args_with(Punctuated::<EnvArg, Token![,]>::parse_terminated)?;
    Ok(args.into_iter().collect())
}

fn string_value(expr: &Expr) -> syn::Result<String> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) => Ok(s.value()),
        _ => Err(syn::Error::new_spanned(expr, "expected a string literal")),
    }
}

/// Default literals may be written as strings, numbers or booleans.
fn literal_text(expr: &Expr) -> syn::Result<String> {
    match expr {
        Expr::Lit(ExprLit { lit, .. }) => match lit {
            Lit::Str(s) => Ok(s.value()),
            Lit::Int(i) => Ok(i.base10_digits().to_string()),
            Lit::Float(f) => Ok(f.base10_digits().to_string()),
            Lit::Bool(b) => Ok(b.value.to_string()),
            Lit::Char(c) => Ok(c.value().to_string()),
            _ => Err(syn::Error::new_spanned(expr, "unsupported default literal")),
        },
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr: inner,
            ..
        }) => literal_text(inner).map(|text| format!("-{text}")),
        _ => Err(syn::Error::new_spanned(
            expr,
            "default must be a literal, e.g. `default = \"8080\"`",
        )),
    }
}

/// Parsed struct-level `#[env(...)]` attributes.
#[derive(Debug, Default)]
pub struct StructAttrs {
    /// Prefix added to every key of the struct.
    pub prefix: Option<String>,
}

impl StructAttrs {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in attrs.iter().filter(|a| a.path().is_ident("env")) {
            for arg in env_args(attr)? {
                match arg {
                    EnvArg::Meta(Meta::NameValue(nv)) if nv.path.is_ident("prefix") => {
                        parsed.prefix = Some(string_value(&nv.value)?);
                    }
                    EnvArg::Tag(lit) => {
                        return Err(syn::Error::new_spanned(
                            lit,
                            "a key is only valid on fields",
                        ));
                    }
                    EnvArg::Meta(meta) => {
                        return Err(syn::Error::new_spanned(
                            meta,
                            "unsupported struct-level env attribute",
                        ));
                    }
                }
            }
        }

        Ok(parsed)
    }
}

/// Parsed `#[env(...)]` attributes from a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Whether the field carries any `#[env]` attribute at all.
    ///
    /// Fields without one are not bound.
    pub present: bool,

    /// `KEY[,OPTION]*` annotation, if given.
    pub tag: Option<String>,

    /// Default literal text.
    pub default: Option<String>,

    /// Usage text, falling back to the doc comment.
    pub usage: Option<String>,

    /// Descend into the field as a nested record.
    pub nested: bool,

    /// Prefix for a nested record.
    pub prefix: Option<String>,

    /// Convert with `FromStr` instead of `Value`.
    pub parse: bool,

    /// Custom deserializer function path (e.g., `"serde_json::from_str"`).
    pub deserializer: Option<String>,
}

impl FieldAttrs {
    /// Extract and validate `#[env(...)]` attributes from a struct field.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();
        let mut doc = Vec::new();

        for attr in &field.attrs {
            if attr.path().is_ident("doc") {
                if let Meta::NameValue(nv) = &attr.meta {
                    if let Ok(line) = string_value(&nv.value) {
                        doc.push(line.trim().to_string());
                    }
                }
                continue;
            }
            if !attr.path().is_ident("env") {
                continue;
            }
            attrs.present = true;

            for arg in env_args(attr)? {
                match arg {
                    EnvArg::Tag(lit) => {
                        if attrs.tag.is_some() {
                            return Err(syn::Error::new_spanned(lit, "duplicate key"));
                        }
                        let tag = lit.value();
                        if tag.split(',').next().unwrap_or_default().is_empty() {
                            return Err(syn::Error::new_spanned(
                                lit,
                                "key must not be empty; omit the string to use the field name",
                            ));
                        }
                        attrs.tag = Some(tag);
                    }
                    EnvArg::Meta(Meta::Path(path)) if path.is_ident("nested") => {
                        attrs.nested = true;
                    }
                    EnvArg::Meta(Meta::Path(path)) if path.is_ident("parse") => {
                        attrs.parse = true;
                    }
                    EnvArg::Meta(Meta::NameValue(nv)) if nv.path.is_ident("default") => {
                        attrs.default = Some(literal_text(&nv.value)?);
                    }
                    EnvArg::Meta(Meta::NameValue(nv)) if nv.path.is_ident("usage") => {
                        attrs.usage = Some(string_value(&nv.value)?);
                    }
                    EnvArg::Meta(Meta::NameValue(nv)) if nv.path.is_ident("prefix") => {
                        attrs.prefix = Some(string_value(&nv.value)?);
                    }
                    EnvArg::Meta(Meta::NameValue(nv)) if nv.path.is_ident("deserializer") => {
                        attrs.deserializer = Some(string_value(&nv.value)?);
                    }
                    EnvArg::Meta(meta) => {
                        return Err(syn::Error::new_spanned(meta, "unsupported env attribute"));
                    }
                }
            }
        }

        if attrs.usage.is_none() && !doc.is_empty() {
            let text = doc.join(" ").trim().to_string();
            if !text.is_empty() {
                attrs.usage = Some(text);
            }
        }

        attrs.validate(field)?;
        Ok(attrs)
    }

    fn validate(&self, field: &Field) -> syn::Result<()> {
        if self.nested
            && (self.tag.is_some()
                || self.default.is_some()
                || self.parse
                || self.deserializer.is_some())
        {
            return Err(syn::Error::new_spanned(
                field,
                "nested fields cannot have a key, default, parse or deserializer",
            ));
        }
        if self.prefix.is_some() && !self.nested {
            return Err(syn::Error::new_spanned(
                field,
                "prefix is only supported on nested fields",
            ));
        }
        if self.parse && self.deserializer.is_some() {
            return Err(syn::Error::new_spanned(
                field,
                "parse and deserializer cannot be used together",
            ));
        }
        Ok(())
    }
}

//! Token helpers for building declaration trees with `quote`

use std::str::FromStr;

use proc_macro2::{Ident, Literal, Span, TokenStream};
use quote::quote;

use crate::config::sanitize_rust_identifier;

/// Parse a Rust type reference into a `TokenStream`
///
/// Handles plain primitives, `Vec<…>`, `&'static str`, and `super::`-chained
/// module paths.
pub(crate) fn parse_type(type_str: &str) -> TokenStream {
    if let Ok(tokens) = TokenStream::from_str(type_str) {
        return tokens;
    }

    // Fallback, not reachable for references built by the resolver.
    let ident = Ident::new(type_str, Span::call_site());
    quote! { #ident }
}

/// Create an identifier, sanitizing invalid characters and escaping keywords
/// as raw identifiers
pub(crate) fn ident(name: &str) -> Ident {
    let sanitized = sanitize_rust_identifier(name);
    match sanitized.strip_prefix("r#") {
        Some(raw) => Ident::new_raw(raw, Span::call_site()),
        None => Ident::new(&sanitized, Span::call_site()),
    }
}

/// Parse a constant's literal value
///
/// Interface string constants are written without quotes; they become string
/// literals. Everything else must parse as a Rust expression.
pub(crate) fn constant_value(value: &str, is_string: bool) -> Result<TokenStream, syn::Error> {
    if is_string && !(value.starts_with('"') && value.ends_with('"') && value.len() >= 2) {
        let literal = Literal::string(value);
        return Ok(quote! { #literal });
    }
    let expr: syn::Expr = syn::parse_str(value)?;
    Ok(quote! { #expr })
}

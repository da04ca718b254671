use proc_macro2::Span;
use syn::{Error, LitStr, Result};

/// `[A-Za-z_][A-Za-z0-9_]*`
pub(crate) fn is_valid_sql_ident(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Identifier given as a string literal attribute value.
pub(crate) fn sql_ident_from_lit(lit: &LitStr, what: &str) -> Result<String> {
    check_sql_ident(lit.value().trim(), lit.span(), what)
}

/// Accept `name` as a table or column identifier, or explain why not at `span`.
pub(crate) fn check_sql_ident(name: &str, span: Span, what: &str) -> Result<String> {
    if name.is_empty() {
        return Err(Error::new(span, format!("{what} must not be empty")));
    }
    if !is_valid_sql_ident(name) {
        return Err(Error::new(
            span,
            format!("{what} '{name}' is not a valid SQL identifier (expected [A-Za-z_][A-Za-z0-9_]*)"),
        ));
    }
    Ok(name.to_string())
}

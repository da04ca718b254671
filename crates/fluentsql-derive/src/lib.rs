//! Derive macros for fluentsql
//!
//! Provides `#[derive(Table)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod sql_ident;
mod table;

/// Derive the `Table` schema descriptor for a fieldless enum.
///
/// The enum names the table and each variant names one column, in
/// declaration order. The enum must also derive `Clone` and `Copy`.
///
/// # Example
///
/// ```ignore
/// use fluentsql::Table;
///
/// #[derive(Debug, Clone, Copy, Table)]
/// #[table(name = "app_users", rename_all = "snake_case")]
/// enum Users {
///     UserId,
///     #[table(rename = "mail")]
///     EmailAddress,
/// }
///
/// assert_eq!(Users::SCHEMA.name, "app_users");
/// assert_eq!(Users::SCHEMA.columns, &["user_id", "mail"]);
/// ```
///
/// # Attributes
///
/// - `#[table(name = "name")]` - Table name (defaults to the enum's name)
/// - `#[table(rename_all = "...")]` - `snake_case`, `camelCase`, `PascalCase`
///   or `SCREAMING_SNAKE_CASE` applied to variant names
/// - `#[table(rename = "name")]` on a variant - Column name for that variant
///
/// Names must be plain SQL identifiers; duplicates are rejected.
#[proc_macro_derive(Table, attributes(table))]
pub fn derive_table(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    table::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

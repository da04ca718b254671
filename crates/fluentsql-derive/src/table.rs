//! `#[derive(Table)]`: bind a fieldless enum to a table schema.

use std::collections::HashSet;

use heck::{ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};
use proc_macro2::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::{Attribute, Data, DeriveInput, Expr, ExprLit, Fields, Lit, LitStr, Meta, Result, Token};

use crate::sql_ident::{check_sql_ident, sql_ident_from_lit};

#[derive(Clone, Copy)]
enum RenameRule {
    Snake,
    LowerCamel,
    Pascal,
    ScreamingSnake,
}

impl RenameRule {
    fn parse(lit: &LitStr) -> Result<Self> {
        match lit.value().as_str() {
            "snake_case" => Ok(Self::Snake),
            "camelCase" => Ok(Self::LowerCamel),
            "PascalCase" => Ok(Self::Pascal),
            "SCREAMING_SNAKE_CASE" => Ok(Self::ScreamingSnake),
            other => Err(syn::Error::new(
                lit.span(),
                format!(
                    "unknown rename_all rule '{other}' (expected snake_case, camelCase, PascalCase or SCREAMING_SNAKE_CASE)"
                ),
            )),
        }
    }

    fn apply(self, name: &str) -> String {
        match self {
            Self::Snake => name.to_snake_case(),
            Self::LowerCamel => name.to_lower_camel_case(),
            Self::Pascal => name.to_upper_camel_case(),
            Self::ScreamingSnake => name.to_shouty_snake_case(),
        }
    }
}

#[derive(Default)]
struct TableAttrs {
    name: Option<String>,
    rename_all: Option<RenameRule>,
}

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let ident = &input.ident;

    let variants = match &input.data {
        Data::Enum(e) => &e.variants,
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Table can only be derived for fieldless enums",
            ));
        }
    };

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Table cannot be derived for generic enums",
        ));
    }

    if variants.is_empty() {
        return Err(syn::Error::new_spanned(
            ident,
            "Table requires at least one variant (column)",
        ));
    }

    let attrs = parse_table_attrs(&input.attrs)?;
    let table_name = match attrs.name {
        Some(name) => name,
        None => check_sql_ident(&ident.to_string(), ident.span(), "table name")?,
    };

    let mut columns = Vec::with_capacity(variants.len());
    let mut arms = Vec::with_capacity(variants.len());
    let mut seen = HashSet::new();

    for (index, variant) in variants.iter().enumerate() {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "Table variants must be unit variants (one per column)",
            ));
        }

        let variant_ident = &variant.ident;
        let column = match parse_variant_rename(&variant.attrs)? {
            Some(name) => name,
            None => {
                let raw = variant_ident.to_string();
                let name = attrs.rename_all.map_or(raw.clone(), |rule| rule.apply(&raw));
                check_sql_ident(&name, variant_ident.span(), "column name")?
            }
        };

        if !seen.insert(column.clone()) {
            return Err(syn::Error::new_spanned(
                variant,
                format!("duplicate column '{column}' in table '{table_name}'"),
            ));
        }

        arms.push(quote! { #ident::#variant_ident => #index, });
        columns.push(column);
    }

    Ok(quote! {
        impl ::fluentsql::Table for #ident {
            const SCHEMA: ::fluentsql::TableSchema =
                ::fluentsql::TableSchema::new(#table_name, &[#(#columns),*]);

            fn column_index(self) -> usize {
                match self {
                    #(#arms)*
                }
            }
        }
    })
}

fn table_metas(attrs: &[Attribute]) -> Result<Vec<Meta>> {
    let mut metas = Vec::new();
    for attr in attrs {
        if !attr.path().is_ident("table") {
            continue;
        }
        let nested = attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)?;
        metas.extend(nested);
    }
    Ok(metas)
}

fn lit_str(meta: &Meta, key: &str) -> Result<LitStr> {
    if let Meta::NameValue(nv) = meta {
        if let Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) = &nv.value
        {
            return Ok(s.clone());
        }
    }
    Err(syn::Error::new_spanned(
        meta,
        format!("expected #[table({key} = \"...\")]"),
    ))
}

/// `#[table(name = "...", rename_all = "...")]` on the enum.
fn parse_table_attrs(attrs: &[Attribute]) -> Result<TableAttrs> {
    let mut out = TableAttrs::default();
    for meta in table_metas(attrs)? {
        if meta.path().is_ident("name") {
            let lit = lit_str(&meta, "name")?;
            out.name = Some(sql_ident_from_lit(&lit, "table name")?);
        } else if meta.path().is_ident("rename_all") {
            out.rename_all = Some(RenameRule::parse(&lit_str(&meta, "rename_all")?)?);
        } else {
            return Err(syn::Error::new_spanned(
                meta.path(),
                "unknown table attribute (expected `name` or `rename_all`)",
            ));
        }
    }
    Ok(out)
}

/// `#[table(rename = "...")]` on a variant.
fn parse_variant_rename(attrs: &[Attribute]) -> Result<Option<String>> {
    let mut rename = None;
    for meta in table_metas(attrs)? {
        if meta.path().is_ident("rename") {
            let lit = lit_str(&meta, "rename")?;
            rename = Some(sql_ident_from_lit(&lit, "column name")?);
        } else {
            return Err(syn::Error::new_spanned(
                meta.path(),
                "unknown column attribute (expected `rename`)",
            ));
        }
    }
    Ok(rename)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand_str(src: &str) -> Result<String> {
        let input: DeriveInput = syn::parse_str(src)?;
        expand(input).map(|tokens| tokens.to_string())
    }

    #[test]
    fn generates_schema_and_index() {
        let out = expand_str("enum Users { Id, Name }").unwrap();
        assert!(out.contains("\"Users\""));
        assert!(out.contains("\"Id\" , \"Name\""));
        assert!(out.contains("Users :: Name => 1usize"));
    }

    #[test]
    fn applies_renames() {
        let out = expand_str(
            r#"
            #[table(name = "app_users", rename_all = "snake_case")]
            enum Users { UserId, #[table(rename = "mail")] EmailAddress }
            "#,
        )
        .unwrap();
        assert!(out.contains("\"app_users\""));
        assert!(out.contains("\"user_id\" , \"mail\""));
    }

    #[test]
    fn rejects_invalid_input() {
        assert!(expand_str("struct Users { id: i64 }").is_err());
        assert!(expand_str("enum Users { Id(i64) }").is_err());
        assert!(expand_str("enum Users {}").is_err());
        assert!(expand_str("enum Users { Id, #[table(rename = \"Id\")] Key }").is_err());
        assert!(expand_str("#[table(rename_all = \"kebab-case\")] enum Users { Id }").is_err());
        assert!(expand_str("#[table(name = \"bad name\")] enum Users { Id }").is_err());
        assert!(expand_str("#[table(schema = \"x\")] enum Users { Id }").is_err());
    }
}

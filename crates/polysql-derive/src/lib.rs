//! Derive macro mapping structs to SQL statements.
//!
//! This crate provides the `#[derive(Record)]` macro, which implements
//! `polysql_core::Record` from field annotations so that column names and
//! their order are fixed at compile time.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Expr, Fields, Ident, Lit, Meta, parse_macro_input};

/// Derives `polysql_core::Record` for a struct with named fields.
///
/// Only annotated fields are mapped. Columns keep field declaration order.
///
/// # Attributes
///
/// - `#[record(table = "table_name")]` - Specifies the SQL table name
///   (optional, defaults to snake_case of struct name)
///
/// # Field Attributes
///
/// - `#[column]` - Maps the field to a column of the same name
/// - `#[column(name = "column_name")]` - Maps the field to `column_name`
/// - `#[column(primary_key)]` - Maps the field and uses it as the `UPDATE` key
/// - `#[column(ignore)]` - Excludes the field, whatever else is set
///
/// Mapped field types must implement `Clone` and `polysql_core::ToSqlValue`.
#[proc_macro_derive(Record, attributes(record, column))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive_record_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

fn derive_record_impl(input: DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let table_name = get_table_name(&input.attrs, struct_name)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Record derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Record derive only supports structs",
            ));
        }
    };

    let mut columns: Vec<MappedField> = Vec::new();
    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let Some(attrs) = parse_column_attrs(&field.attrs)? else {
            continue;
        };
        if attrs.ignore {
            continue;
        }
        columns.push(MappedField {
            field_name: field_name.clone(),
            column_name: attrs.name.unwrap_or_else(|| field_name.to_string()),
            is_primary_key: attrs.primary_key,
        });
    }

    let keys: Vec<&MappedField> = columns.iter().filter(|c| c.is_primary_key).collect();
    if keys.len() > 1 {
        return Err(syn::Error::new_spanned(
            &keys[1].field_name,
            "Record derive supports at most one primary_key column",
        ));
    }

    let column_names: Vec<&str> = columns.iter().map(|c| c.column_name.as_str()).collect();
    let primary_key_impl = match keys.first() {
        Some(pk) => {
            let pk = &pk.column_name;
            quote! { const PRIMARY_KEY: Option<&'static str> = Some(#pk); }
        }
        None => quote! { const PRIMARY_KEY: Option<&'static str> = None; },
    };
    let values: Vec<TokenStream2> = columns
        .iter()
        .map(|c| {
            let field_name = &c.field_name;
            quote! {
                ::polysql_core::ToSqlValue::to_sql_value(
                    ::core::clone::Clone::clone(&self.#field_name)
                )
            }
        })
        .collect();

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::polysql_core::Record for #struct_name #ty_generics #where_clause {
            const TABLE: &'static str = #table_name;
            const COLUMNS: &'static [&'static str] = &[#(#column_names),*];
            #primary_key_impl

            fn values(&self) -> ::std::vec::Vec<::polysql_core::SqlValue> {
                ::std::vec![#(#values),*]
            }
        }
    })
}

struct MappedField {
    field_name: Ident,
    column_name: String,
    is_primary_key: bool,
}

#[derive(Default)]
struct ColumnAttrs {
    name: Option<String>,
    primary_key: bool,
    ignore: bool,
}

fn get_table_name(attrs: &[Attribute], struct_name: &Ident) -> syn::Result<String> {
    for attr in attrs {
        if attr.path().is_ident("record") {
            let mut table_name = None;
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("table") {
                    table_name = Some(parse_str_value(&meta)?);
                    Ok(())
                } else {
                    Err(meta.error("unsupported record attribute"))
                }
            })?;
            if let Some(name) = table_name {
                return Ok(name);
            }
        }
    }
    Ok(to_snake_case(&struct_name.to_string()))
}

/// Returns `None` for fields without a `#[column]` attribute.
fn parse_column_attrs(attrs: &[Attribute]) -> syn::Result<Option<ColumnAttrs>> {
    let mut result = None;

    for attr in attrs {
        if !attr.path().is_ident("column") {
            continue;
        }
        let parsed = result.get_or_insert_with(ColumnAttrs::default);
        if matches!(attr.meta, Meta::Path(_)) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("primary_key") {
                parsed.primary_key = true;
            } else if meta.path.is_ident("ignore") {
                parsed.ignore = true;
            } else if meta.path.is_ident("name") {
                parsed.name = Some(parse_str_value(&meta)?);
            } else {
                return Err(meta.error("unsupported column attribute"));
            }
            Ok(())
        })?;
    }

    Ok(result)
}

fn parse_str_value(meta: &syn::meta::ParseNestedMeta<'_>) -> syn::Result<String> {
    let value: Expr = meta.value()?.parse()?;
    if let Expr::Lit(lit) = &value {
        if let Lit::Str(s) = &lit.lit {
            return Ok(s.value());
        }
    }
    Err(syn::Error::new_spanned(value, "expected a string literal"))
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

//! FromRow derive macro implementation
//!
//! Raw rows are positional, so fields decode from consecutive column indices in
//! declaration order. `#[frag(column = N)]` pins a field to column `N`; the
//! fields after it continue from `N + 1`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Expr, ExprLit, Field, Fields, Lit, MetaNameValue, Result};

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input,
            "FromRow can only be derived for structs",
        ));
    };

    let mut next_column = 0_usize;
    let mut columns = Vec::new();
    for field in &data.fields {
        let column = column_override(field)?.unwrap_or(next_column);
        next_column = column + 1;
        columns.push(column);
    }

    let body = match &data.fields {
        Fields::Named(fields) => {
            let extracts = fields.named.iter().zip(&columns).map(|(field, column)| {
                let field_name = &field.ident;
                quote! { #field_name: row.try_get_column(#column)? }
            });
            quote! { Self { #(#extracts),* } }
        }
        Fields::Unnamed(_) => {
            let extracts = columns
                .iter()
                .map(|column| quote! { row.try_get_column(#column)? });
            quote! { Self(#(#extracts),*) }
        }
        Fields::Unit => quote! { { let _ = row; Self } },
    };

    Ok(quote! {
        impl #impl_generics ::sqlfrag::FromRow for #name #ty_generics #where_clause {
            fn from_row(row: &[::sqlfrag::SqlValue]) -> ::sqlfrag::FragResult<Self> {
                #[allow(unused_imports)]
                use ::sqlfrag::RowExt;
                Ok(#body)
            }
        }
    })
}

fn column_override(field: &Field) -> Result<Option<usize>> {
    for attr in &field.attrs {
        if !attr.path().is_ident("frag") {
            continue;
        }
        let nv = attr.parse_args::<MetaNameValue>()?;
        if !nv.path.is_ident("column") {
            return Err(syn::Error::new_spanned(
                &nv.path,
                "unknown frag attribute (expected `column = N`)",
            ));
        }
        let Expr::Lit(ExprLit {
            lit: Lit::Int(index),
            ..
        }) = &nv.value
        else {
            return Err(syn::Error::new_spanned(
                &nv.value,
                "column index must be an integer literal",
            ));
        };
        return index.base10_parse::<usize>().map(Some);
    }
    Ok(None)
}

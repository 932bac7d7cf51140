//! Procedural macros for sqlfrag
//!
//! Provides the `sql!` interpolation macro and `#[derive(FromRow)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, LitStr, parse_macro_input};

mod from_row;
mod interpolate;

/// Build a `QueryPart` from a template string.
///
/// Every interpolation must say what it is:
///
/// - `{raw:EXPR}` inserts `EXPR` (anything `Into<String>`) as SQL text. Only use
///   it for trusted syntax such as a table name chosen by the program.
/// - `{param:EXPR}` binds `EXPR` (anything `Into<SqlValue>`) as a `$N` parameter.
///
/// `{{` and `}}` produce literal braces. An untagged `{x}` does not compile.
/// Braces inside string and char literals within `EXPR` are ignored when finding
/// the closing `}`; raw string literals (`r"..."`) are not, so keep their braces
/// balanced or bind them through a local.
///
/// # Example
///
/// ```ignore
/// use sqlfrag::sql;
///
/// let table = "users";
/// let id = "1234";
/// let q = sql!("SELECT * FROM {raw:table} WHERE id={param:id}");
/// assert_eq!(q.to_sql(), "SELECT * FROM users WHERE id=$1");
/// ```
#[proc_macro]
pub fn sql(input: TokenStream) -> TokenStream {
    let template = parse_macro_input!(input as LitStr);
    interpolate::expand(template)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Derive `FromRow` for a struct, decoding fields positionally.
///
/// # Example
///
/// ```ignore
/// use sqlfrag::FromRow;
///
/// #[derive(FromRow)]
/// struct User {
///     id: i64,
///     #[frag(column = 3)]
///     email: Option<String>,
/// }
/// ```
///
/// # Attributes
///
/// - `#[frag(column = N)]` - Read the field from column `N` (0-based)
#[proc_macro_derive(FromRow, attributes(frag))]
pub fn derive_from_row(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    from_row::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

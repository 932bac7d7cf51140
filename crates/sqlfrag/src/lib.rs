//! # sqlfrag
//!
//! Injection-safe SQL fragments for PostgreSQL-style `$N` parameters.
//!
//! ## Features
//!
//! - **Explicit tagging**: every dynamic piece is either raw SQL
//!   ([`Segment::literal`]) or a bound value ([`Segment::param`]), never guessed
//! - **Composable**: fragments concatenate freely; placeholders are numbered at
//!   render time
//! - **Typed queries**: [`Query<A>`] carries the decoder for its result rows
//! - **Driver-agnostic**: rendering produces `(sql, values)`; executing it is up to
//!   the caller (`postgres` feature adds `tokio-postgres` parameter refs)
//!
//! ## Example
//!
//! ```
//! use sqlfrag::{Query, SqlValue, sql};
//!
//! let table = "users";
//! let id = "1234";
//! let email = "mail@objc.io";
//! let by_email = Query::new(
//!     sql!("SELECT * FROM {raw:table} WHERE id={param:id} AND email={param:email}"),
//!     |row: &[SqlValue]| row.first().cloned(),
//! );
//!
//! let city = "Berlin";
//! let in_city = by_email.appending(&sql!(" AND city={param:city}"));
//!
//! let rendered = in_city.render();
//! assert_eq!(
//!     rendered.sql,
//!     "SELECT * FROM users WHERE id=$1 AND email=$2 AND city=$3"
//! );
//! assert_eq!(rendered.values, vec![
//!     SqlValue::from("1234"),
//!     SqlValue::from("mail@objc.io"),
//!     SqlValue::from("Berlin"),
//! ]);
//! ```

pub mod config;
pub mod error;
pub mod ident;
pub mod prelude;
pub mod query;
pub mod row;
pub mod sql;
pub mod value;

pub use config::{LogLevel, MAX_BIND_PARAMS, RenderConfig};
pub use error::{FragError, FragResult};
pub use ident::{Ident, IdentPart, IntoIdent};
pub use query::{Decoder, Query};
pub use row::{FromRow, FromSqlValue, RowExt};
pub use sql::{QueryPart, RenderedSql, Renderer, Segment, literal, param, sql};
pub use value::SqlValue;

// Macros live in their own namespace, so `sqlfrag::sql` names both the
// function and the `sql!` macro.
#[cfg(feature = "derive")]
pub use sqlfrag_derive::{FromRow, sql};

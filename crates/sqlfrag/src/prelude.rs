//! Common imports.
//!
//! ```
//! use sqlfrag::prelude::*;
//!
//! let q = sql("SELECT * FROM t WHERE id = ").param(1);
//! assert_eq!(q.to_sql(), "SELECT * FROM t WHERE id = $1");
//! ```

pub use crate::error::{FragError, FragResult};
pub use crate::query::Query;
pub use crate::row::{FromRow, FromSqlValue, RowExt};
pub use crate::sql::{QueryPart, RenderedSql, Segment, literal, param, sql};
pub use crate::value::SqlValue;

#[cfg(feature = "derive")]
pub use sqlfrag_derive::{FromRow, sql};

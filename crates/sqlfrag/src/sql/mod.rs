//! Fragment model, composition and rendering.
//!
//! A [`QueryPart`] is an ordered list of [`Segment`]s. Every piece of dynamic
//! content is tagged by the caller as either raw SQL ([`Segment::literal`]) or a
//! bound value ([`Segment::param`]); nothing is inferred from the value itself.
//! Placeholder indices are assigned at render time, so fragments can be built
//! independently and concatenated without tracking `$N` by hand.
//!
//! # Example
//!
//! ```
//! use sqlfrag::sql::QueryPart;
//!
//! let mut q = QueryPart::new("SELECT id, username FROM users WHERE 1=1");
//! let status: Option<&str> = Some("active");
//! if let Some(status) = status {
//!     q = q.literal(" AND status = ").param(status);
//! }
//! let q = q.literal(" ORDER BY created_at DESC");
//!
//! let rendered = q.render();
//! assert_eq!(
//!     rendered.sql,
//!     "SELECT id, username FROM users WHERE 1=1 AND status = $1 ORDER BY created_at DESC"
//! );
//! assert_eq!(rendered.values.len(), 1);
//! ```

mod part;
mod render;
mod segment;

#[cfg(test)]
mod tests;

pub use part::QueryPart;
pub use render::{RenderedSql, Renderer};
pub use segment::Segment;

/// Start a fragment with an initial literal.
pub fn sql(initial_sql: impl Into<String>) -> QueryPart {
    QueryPart::new(initial_sql)
}

/// Raw SQL syntax segment. Shorthand for [`Segment::literal`].
pub fn literal(text: impl Into<String>) -> Segment {
    Segment::literal(text)
}

/// Bound value segment. Shorthand for [`Segment::param`].
pub fn param(value: impl Into<crate::value::SqlValue>) -> Segment {
    Segment::param(value)
}

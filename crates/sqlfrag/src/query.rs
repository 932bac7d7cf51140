//! Typed queries: a fragment paired with a row decoder.

use crate::error::FragResult;
use crate::row::FromRow;
use crate::sql::{QueryPart, RenderedSql};
use crate::value::SqlValue;
use std::fmt;
use std::sync::Arc;

/// Shared row decoder.
pub type Decoder<A> = Arc<dyn Fn(&[SqlValue]) -> A + Send + Sync>;

/// A [`QueryPart`] plus the function that turns one raw result row into `A`.
///
/// The decoder is fixed at construction. Appending more SQL only changes the
/// fragment; the extended query shares the very same decoder.
///
/// # Example
///
/// ```
/// use sqlfrag::{Query, sql};
///
/// let by_id = Query::new(sql("SELECT email FROM users WHERE id = ").param(42), |row| {
///     row.first().and_then(|v| v.as_str()).map(str::to_owned)
/// });
/// let active = by_id.appending(&sql(" AND active = ").param(true));
///
/// assert_eq!(active.render().sql, "SELECT email FROM users WHERE id = $1 AND active = $2");
/// ```
#[must_use]
pub struct Query<A> {
    part: QueryPart,
    decoder: Decoder<A>,
}

impl<A> Query<A> {
    pub fn new<F>(part: impl Into<QueryPart>, decoder: F) -> Self
    where
        F: Fn(&[SqlValue]) -> A + Send + Sync + 'static,
    {
        Self {
            part: part.into(),
            decoder: Arc::new(decoder),
        }
    }

    /// Build a query from an already shared decoder.
    pub fn with_decoder(part: impl Into<QueryPart>, decoder: Decoder<A>) -> Self {
        Self {
            part: part.into(),
            decoder,
        }
    }

    pub fn part(&self) -> &QueryPart {
        &self.part
    }

    pub fn decoder(&self) -> &Decoder<A> {
        &self.decoder
    }

    /// Return a query over `self.part` followed by `other`, sharing this
    /// query's decoder.
    pub fn appending(&self, other: &QueryPart) -> Self {
        Self {
            part: self.part.appending(other),
            decoder: Arc::clone(&self.decoder),
        }
    }

    /// By-value counterpart of [`appending`](Query::appending).
    pub fn append(self, other: QueryPart) -> Self {
        Self {
            part: self.part.append(other),
            decoder: self.decoder,
        }
    }

    pub fn render(&self) -> RenderedSql {
        self.part.render()
    }

    /// Apply the decoder to one raw row.
    pub fn decode(&self, row: &[SqlValue]) -> A {
        (self.decoder)(row)
    }

    /// Apply the decoder to every row, in order.
    pub fn decode_all<R: AsRef<[SqlValue]>>(&self, rows: &[R]) -> Vec<A> {
        rows.iter().map(|row| self.decode(row.as_ref())).collect()
    }

    pub fn into_parts(self) -> (QueryPart, Decoder<A>) {
        (self.part, self.decoder)
    }
}

impl<T: FromRow + 'static> Query<FragResult<T>> {
    /// A query decoding each row with `T::from_row`.
    pub fn from_row(part: impl Into<QueryPart>) -> Self {
        Self::new(part, T::from_row)
    }
}

impl<A> Clone for Query<A> {
    fn clone(&self) -> Self {
        Self {
            part: self.part.clone(),
            decoder: Arc::clone(&self.decoder),
        }
    }
}

impl<A> fmt::Debug for Query<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("part", &self.part)
            .finish_non_exhaustive()
    }
}

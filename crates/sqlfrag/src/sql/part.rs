use super::render::{RenderedSql, Renderer};
use super::segment::Segment;
use crate::error::FragResult;
use crate::ident::IntoIdent;
use crate::value::SqlValue;
use std::ops::Add;

/// An ordered sequence of SQL segments.
///
/// Literal text and bound values are kept apart until render time, where each
/// value becomes a `$N` placeholder numbered by its position among the values.
///
/// Composition is by value: builder methods consume `self` and return the
/// extended fragment, and [`appending`](QueryPart::appending) borrows both
/// operands and leaves them untouched. A fragment somebody else can still see is
/// never modified.
#[must_use]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryPart {
    segments: Vec<Segment>,
}

impl QueryPart {
    /// Create a fragment holding a single literal segment.
    pub fn new(literal: impl Into<String>) -> Self {
        Self {
            segments: vec![Segment::Literal(literal.into())],
        }
    }

    /// Create a fragment with no segments.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a fragment from segments, kept in the order given.
    pub fn from_segments(segments: impl IntoIterator<Item = Segment>) -> Self {
        Self {
            segments: segments.into_iter().collect(),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of bound values, i.e. placeholders this fragment renders.
    pub fn param_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_value()).count()
    }

    /// Append raw SQL text.
    pub fn literal(mut self, sql: impl Into<String>) -> Self {
        self.segments.push(Segment::Literal(sql.into()));
        self
    }

    /// Append a bound value.
    pub fn param(mut self, value: impl Into<SqlValue>) -> Self {
        self.segments.push(Segment::Value(value.into()));
        self
    }

    /// Append a comma-separated list of bound values.
    ///
    /// An empty list appends `NULL`, so `IN (NULL)` stays valid SQL and matches
    /// no rows.
    pub fn params<T>(mut self, values: impl IntoIterator<Item = T>) -> Self
    where
        T: Into<SqlValue>,
    {
        let mut iter = values.into_iter();
        let Some(first) = iter.next() else {
            return self.literal("NULL");
        };

        self = self.param(first);
        for v in iter {
            self = self.literal(", ").param(v);
        }
        self
    }

    /// Append a validated SQL identifier as literal text.
    ///
    /// Identifiers cannot be bound, so this is how a dynamic table or column
    /// name gets into the statement without opening an injection hole.
    pub fn ident<I: IntoIdent>(mut self, ident: I) -> FragResult<Self> {
        let ident = ident.into_ident()?;
        let mut text = String::new();
        ident.write_sql(&mut text);
        self.segments.push(Segment::Literal(text));
        Ok(self)
    }

    /// Concatenate `other` onto this fragment, consuming both.
    pub fn append(mut self, mut other: QueryPart) -> Self {
        self.segments.append(&mut other.segments);
        self
    }

    /// Return a new fragment holding this fragment's segments followed by
    /// `other`'s. Neither operand changes.
    pub fn appending(&self, other: &QueryPart) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + other.segments.len());
        segments.extend_from_slice(&self.segments);
        segments.extend_from_slice(&other.segments);
        Self { segments }
    }

    /// Merge adjacent literal segments and drop empty ones.
    ///
    /// Rendering a compacted fragment yields exactly the same SQL and values.
    pub fn compact(self) -> Self {
        let mut segments: Vec<Segment> = Vec::with_capacity(self.segments.len());
        for segment in self.segments {
            match segment {
                Segment::Literal(text) if text.is_empty() => {}
                Segment::Literal(text) => match segments.last_mut() {
                    Some(Segment::Literal(last)) => last.push_str(&text),
                    _ => segments.push(Segment::Literal(text)),
                },
                value => segments.push(value),
            }
        }
        Self { segments }
    }

    /// Render with the default [`Renderer`].
    pub fn render(&self) -> RenderedSql {
        Renderer::default().render(self)
    }

    /// Render SQL with `$1, $2, ...` placeholders.
    pub fn to_sql(&self) -> String {
        Renderer::default().render_sql(self)
    }

    /// Bound values in placeholder order.
    pub fn values(&self) -> Vec<SqlValue> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Value(v) => Some(v.clone()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Check the bound-value count against PostgreSQL's protocol limit.
    pub fn validate(&self) -> FragResult<()> {
        Renderer::default().validate(self)
    }
}

impl From<&str> for QueryPart {
    fn from(literal: &str) -> Self {
        Self::new(literal)
    }
}

impl From<String> for QueryPart {
    fn from(literal: String) -> Self {
        Self::new(literal)
    }
}

impl From<Segment> for QueryPart {
    fn from(segment: Segment) -> Self {
        Self {
            segments: vec![segment],
        }
    }
}

impl FromIterator<Segment> for QueryPart {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self::from_segments(iter)
    }
}

impl Add for QueryPart {
    type Output = QueryPart;

    fn add(self, rhs: QueryPart) -> QueryPart {
        self.append(rhs)
    }
}

impl Add<&QueryPart> for &QueryPart {
    type Output = QueryPart;

    fn add(self, rhs: &QueryPart) -> QueryPart {
        self.appending(rhs)
    }
}

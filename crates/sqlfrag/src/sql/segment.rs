use crate::value::SqlValue;

/// One piece of a [`QueryPart`](super::QueryPart).
///
/// The two variants are the two ways content can enter a statement: trusted SQL
/// syntax written out verbatim, or a value bound as a parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Raw SQL text. Never built from untrusted input.
    Literal(String),
    /// A bound value, rendered as a `$N` placeholder.
    Value(SqlValue),
}

impl Segment {
    /// Raw SQL syntax, inserted as-is.
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// A value to bind as a parameter.
    pub fn param(value: impl Into<SqlValue>) -> Self {
        Self::Value(value.into())
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }
}

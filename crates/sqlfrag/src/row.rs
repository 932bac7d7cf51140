//! Row decoding traits and utilities
//!
//! A raw row is the ordered list of values a driver returned for one result
//! row, addressed by column position. Drivers speaking the text protocol hand
//! back everything as text, so numeric and boolean decoding also accepts text.

use crate::error::{FragError, FragResult};
use crate::value::SqlValue;

/// Decode a Rust value from one raw column value.
///
/// An implementation only sees the value, not where it came from, so its
/// [`FragError::Decode`] errors carry column `0`. [`RowExt::try_get_column`]
/// replaces that with the real index; call it rather than this trait directly
/// when the position matters.
pub trait FromSqlValue: Sized {
    fn from_sql_value(value: &SqlValue) -> FragResult<Self>;
}

fn mismatch(expected: &str, value: &SqlValue) -> FragError {
    FragError::decode(0, format!("expected {expected}, got {}", value.type_name()))
}

fn parse_text<T: std::str::FromStr>(expected: &str, s: &str) -> FragResult<T>
where
    T::Err: std::fmt::Display,
{
    s.trim()
        .parse()
        .map_err(|e| FragError::decode(0, format!("invalid {expected} {s:?}: {e}")))
}

impl FromSqlValue for SqlValue {
    fn from_sql_value(value: &SqlValue) -> FragResult<Self> {
        Ok(value.clone())
    }
}

impl FromSqlValue for String {
    fn from_sql_value(value: &SqlValue) -> FragResult<Self> {
        match value {
            SqlValue::Text(s) => Ok(s.clone()),
            SqlValue::Int(v) => Ok(v.to_string()),
            SqlValue::Float(v) => Ok(v.to_string()),
            SqlValue::Bool(v) => Ok(v.to_string()),
            other => Err(mismatch("text", other)),
        }
    }
}

impl FromSqlValue for i64 {
    fn from_sql_value(value: &SqlValue) -> FragResult<Self> {
        match value {
            SqlValue::Int(v) => Ok(*v),
            SqlValue::Text(s) => parse_text("integer", s),
            other => Err(mismatch("integer", other)),
        }
    }
}

impl FromSqlValue for i32 {
    fn from_sql_value(value: &SqlValue) -> FragResult<Self> {
        let wide = i64::from_sql_value(value)?;
        i32::try_from(wide)
            .map_err(|_| FragError::decode(0, format!("{wide} out of range for i32")))
    }
}

impl FromSqlValue for f64 {
    fn from_sql_value(value: &SqlValue) -> FragResult<Self> {
        match value {
            SqlValue::Float(v) => Ok(*v),
            #[allow(clippy::cast_precision_loss)]
            SqlValue::Int(v) => Ok(*v as f64),
            SqlValue::Text(s) => parse_text("float", s),
            other => Err(mismatch("float", other)),
        }
    }
}

impl FromSqlValue for bool {
    fn from_sql_value(value: &SqlValue) -> FragResult<Self> {
        match value {
            SqlValue::Bool(v) => Ok(*v),
            // Postgres text output for booleans is `t` / `f`.
            SqlValue::Text(s) => match s.trim() {
                "t" | "true" | "TRUE" | "1" => Ok(true),
                "f" | "false" | "FALSE" | "0" => Ok(false),
                _ => Err(FragError::decode(0, format!("invalid boolean {s:?}"))),
            },
            other => Err(mismatch("boolean", other)),
        }
    }
}

impl FromSqlValue for Vec<u8> {
    fn from_sql_value(value: &SqlValue) -> FragResult<Self> {
        match value {
            SqlValue::Bytes(b) => Ok(b.clone()),
            other => Err(mismatch("bytes", other)),
        }
    }
}

impl<T: FromSqlValue> FromSqlValue for Option<T> {
    fn from_sql_value(value: &SqlValue) -> FragResult<Self> {
        match value {
            SqlValue::Null => Ok(None),
            other => T::from_sql_value(other).map(Some),
        }
    }
}

/// Convert a raw row into a Rust type.
///
/// Usually derived with `#[derive(FromRow)]`, which decodes fields in
/// declaration order.
///
/// # Example
///
/// ```
/// use sqlfrag::{FromRow, SqlValue};
///
/// #[derive(FromRow)]
/// struct User {
///     id: i64,
///     email: Option<String>,
/// }
///
/// let user = User::from_row(&[SqlValue::from("7"), SqlValue::Null]).unwrap();
/// assert_eq!(user.id, 7);
/// assert_eq!(user.email, None);
/// ```
pub trait FromRow: Sized {
    fn from_row(row: &[SqlValue]) -> FragResult<Self>;
}

/// Extension trait for raw rows to provide typed access
pub trait RowExt {
    /// Decode the column at `index`, returning [`FragError::Decode`] on failure
    fn try_get_column<T: FromSqlValue>(&self, index: usize) -> FragResult<T>;
}

impl RowExt for [SqlValue] {
    fn try_get_column<T: FromSqlValue>(&self, index: usize) -> FragResult<T> {
        let value = self.get(index).ok_or_else(|| {
            FragError::decode(index, format!("row has only {} columns", self.len()))
        })?;
        T::from_sql_value(value).map_err(|e| e.at_column(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_rows_decode_to_numbers() {
        let row = vec![SqlValue::from("1234"), SqlValue::from(" 2.5 "), SqlValue::from("t")];
        assert_eq!(row.try_get_column::<i64>(0).unwrap(), 1234);
        assert_eq!(row.try_get_column::<f64>(1).unwrap(), 2.5);
        assert!(row.try_get_column::<bool>(2).unwrap());
    }

    #[test]
    fn missing_column_is_decode_error() {
        let row = vec![SqlValue::from("only")];
        let err = row.try_get_column::<String>(3).unwrap_err();
        assert!(matches!(err, FragError::Decode { column: 3, .. }));
        assert_eq!(err.to_string(), "Decode error on column 3: row has only 1 columns");
    }

    #[test]
    fn type_mismatch_reports_column() {
        let row = vec![SqlValue::Null, SqlValue::Bytes(vec![1])];
        let err = row.try_get_column::<i64>(1).unwrap_err();
        assert!(matches!(err, FragError::Decode { column: 1, .. }));
        assert!(err.to_string().contains("expected integer, got bytes"));
    }

    #[test]
    fn value_errors_are_placed_by_row_access() {
        let value = SqlValue::from("abc");
        let err = i64::from_sql_value(&value).unwrap_err();
        assert!(matches!(err, FragError::Decode { column: 0, .. }));

        let row = vec![SqlValue::Int(1), SqlValue::Int(2), value];
        let err = row.try_get_column::<i64>(2).unwrap_err();
        assert!(matches!(err, FragError::Decode { column: 2, .. }));
        assert!(err.to_string().starts_with("Decode error on column 2: invalid integer"));
    }

    #[test]
    fn null_requires_option() {
        let row = vec![SqlValue::Null];
        assert_eq!(row.try_get_column::<Option<String>>(0).unwrap(), None);
        assert!(row.try_get_column::<String>(0).is_err());
    }

    #[test]
    fn i32_range_checked() {
        let row = vec![SqlValue::Int(i64::from(i32::MAX) + 1)];
        assert!(row.try_get_column::<i32>(0).is_err());
    }

    #[test]
    fn unparsable_text() {
        let row = vec![SqlValue::from("abc"), SqlValue::from("maybe")];
        assert!(row.try_get_column::<i64>(0).unwrap_err().is_decode());
        assert!(row.try_get_column::<bool>(1).unwrap_err().is_decode());
    }
}

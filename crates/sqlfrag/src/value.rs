//! Bindable values.
//!
//! [`SqlValue`] is the only type that can travel as a bound parameter. It is
//! never written into SQL text: the renderer emits a `$N` placeholder for it and
//! hands the value itself to the driver in the parameter list.

/// A value bound as a positional query parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// SQL `NULL`.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
}

impl SqlValue {
    /// Whether this is SQL `NULL`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the text payload, if this is a `Text` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Short type name used in decode error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
        }
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&String> for SqlValue {
    fn from(v: &String) -> Self {
        Self::Text(v.clone())
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i16> for SqlValue {
    fn from(v: i16) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f32> for SqlValue {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<&[u8]> for SqlValue {
    fn from(v: &[u8]) -> Self {
        Self::Bytes(v.to_vec())
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

#[cfg(feature = "postgres")]
mod postgres {
    use super::SqlValue;
    use bytes::BytesMut;
    use std::error::Error;
    use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};

    // Integers and floats narrow to the column type the server asked for;
    // everything else delegates to the matching Rust type's checked encoder.
    impl ToSql for SqlValue {
        fn to_sql(
            &self,
            ty: &Type,
            out: &mut BytesMut,
        ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
            match self {
                Self::Null => Ok(IsNull::Yes),
                Self::Bool(v) => v.to_sql_checked(ty, out),
                Self::Int(v) => match *ty {
                    Type::INT2 => i16::try_from(*v)?.to_sql_checked(ty, out),
                    Type::INT4 => i32::try_from(*v)?.to_sql_checked(ty, out),
                    _ => v.to_sql_checked(ty, out),
                },
                #[allow(clippy::cast_possible_truncation)]
                Self::Float(v) => match *ty {
                    Type::FLOAT4 => (*v as f32).to_sql_checked(ty, out),
                    _ => v.to_sql_checked(ty, out),
                },
                Self::Text(v) => v.to_sql_checked(ty, out),
                Self::Bytes(v) => v.to_sql_checked(ty, out),
            }
        }

        fn accepts(_ty: &Type) -> bool {
            true
        }

        to_sql_checked!();
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_become_text() {
        assert_eq!(SqlValue::from("a"), SqlValue::Text("a".into()));
        assert_eq!(SqlValue::from(String::from("b")), SqlValue::Text("b".into()));
        let owned = String::from("c");
        assert_eq!(SqlValue::from(&owned), SqlValue::Text("c".into()));
    }

    #[test]
    fn integers_widen_to_int() {
        assert_eq!(SqlValue::from(7_i16), SqlValue::Int(7));
        assert_eq!(SqlValue::from(7_i32), SqlValue::Int(7));
        assert_eq!(SqlValue::from(-7_i64), SqlValue::Int(-7));
    }

    #[test]
    fn option_none_is_null() {
        assert!(SqlValue::from(None::<i64>).is_null());
        assert_eq!(SqlValue::from(Some("x")), SqlValue::Text("x".into()));
    }

    #[test]
    fn bytes_from_slice() {
        let v = SqlValue::from(&b"\x00\x01"[..]);
        assert_eq!(v, SqlValue::Bytes(vec![0, 1]));
        assert_eq!(v.type_name(), "bytes");
    }
}

//! Bind parameter values.
//!
//! Arguments are never interpolated into SQL text; they travel next to the
//! rendered statement in marker order.

use std::fmt;

use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A positional bind parameter.
///
/// Serializes as the bare primitive it holds (`null`, `true`, `42`, `"x"`),
/// so exported queries read naturally in JSON and YAML.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Binary blob value.
    Blob(Vec<u8>),
}

impl SqlValue {
    /// Returns `true` for [`SqlValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Blob(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

impl Serialize for SqlValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(n) => serializer.serialize_i64(*n),
            Self::Float(x) => serializer.serialize_f64(*x),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Blob(b) => serializer.collect_seq(b),
        }
    }
}

struct SqlValueVisitor;

impl<'de> Visitor<'de> for SqlValueVisitor {
    type Value = SqlValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null, a boolean, a number, a string or a byte sequence")
    }

    fn visit_unit<E: de::Error>(self) -> Result<SqlValue, E> {
        Ok(SqlValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<SqlValue, E> {
        Ok(SqlValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<SqlValue, D::Error> {
        SqlValue::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<SqlValue, E> {
        Ok(SqlValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<SqlValue, E> {
        Ok(SqlValue::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<SqlValue, E> {
        Ok(i64::try_from(v).map_or(SqlValue::Float(v as f64), SqlValue::Int))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<SqlValue, E> {
        Ok(SqlValue::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<SqlValue, E> {
        Ok(SqlValue::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<SqlValue, E> {
        Ok(SqlValue::Text(v))
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<SqlValue, E> {
        Ok(SqlValue::Blob(v.to_vec()))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<SqlValue, A::Error> {
        let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(byte) = seq.next_element::<u8>()? {
            bytes.push(byte);
        }
        Ok(SqlValue::Blob(bytes))
    }
}

impl<'de> Deserialize<'de> for SqlValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SqlValueVisitor)
    }
}

/// Trait for types that can be converted to SQL values.
pub trait ToSqlValue {
    /// Converts the value to a `SqlValue`.
    fn to_sql_value(self) -> SqlValue;
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(self) -> SqlValue {
        self
    }
}

macro_rules! impl_to_sql_value {
    ($variant:ident: $($ty:ty),+) => {
        $(
            impl ToSqlValue for $ty {
                fn to_sql_value(self) -> SqlValue {
                    SqlValue::$variant(self.into())
                }
            }
        )+
    };
}

impl_to_sql_value!(Bool: bool);
impl_to_sql_value!(Int: i64, i32, i16, i8, u32, u16, u8);
impl_to_sql_value!(Float: f64, f32);
impl_to_sql_value!(Text: String, &str, &String);
impl_to_sql_value!(Blob: Vec<u8>, &[u8]);

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(self) -> SqlValue {
        self.map_or(SqlValue::Null, ToSqlValue::to_sql_value)
    }
}

/// A list of bind arguments accompanying one SQL fragment.
///
/// Implemented for `()`, single values, tuples of values, and
/// `Vec<SqlValue>`, so fragment methods read like
/// `.where_clause("age > ? AND status = ?", (18, "active"))`.
pub trait IntoArgs {
    /// Converts into positional arguments.
    fn into_args(self) -> Vec<SqlValue>;
}

impl IntoArgs for () {
    fn into_args(self) -> Vec<SqlValue> {
        vec![]
    }
}

impl IntoArgs for Vec<SqlValue> {
    fn into_args(self) -> Vec<SqlValue> {
        self
    }
}

impl IntoArgs for &[SqlValue] {
    fn into_args(self) -> Vec<SqlValue> {
        self.to_vec()
    }
}

impl<T: ToSqlValue> IntoArgs for Option<T> {
    fn into_args(self) -> Vec<SqlValue> {
        vec![self.to_sql_value()]
    }
}

macro_rules! impl_into_args_scalar {
    ($($ty:ty),+) => {
        $(
            impl IntoArgs for $ty {
                fn into_args(self) -> Vec<SqlValue> {
                    vec![self.to_sql_value()]
                }
            }
        )+
    };
}

impl_into_args_scalar!(
    SqlValue, bool, i64, i32, i16, i8, u32, u16, u8, f64, f32, String, &str, &String, Vec<u8>,
    &[u8]
);

macro_rules! impl_into_args_tuple {
    ($($name:ident),+) => {
        impl<$($name: ToSqlValue),+> IntoArgs for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_args(self) -> Vec<SqlValue> {
                let ($($name,)+) = self;
                vec![$($name.to_sql_value()),+]
            }
        }
    };
}

impl_into_args_tuple!(A);
impl_into_args_tuple!(A, B);
impl_into_args_tuple!(A, B, C);
impl_into_args_tuple!(A, B, C, D);
impl_into_args_tuple!(A, B, C, D, E);
impl_into_args_tuple!(A, B, C, D, E, F);
impl_into_args_tuple!(A, B, C, D, E, F, G);
impl_into_args_tuple!(A, B, C, D, E, F, G, H);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_sql_value_conversions() {
        assert_eq!(true.to_sql_value(), SqlValue::Bool(true));
        assert_eq!(42_i32.to_sql_value(), SqlValue::Int(42));
        assert_eq!(7_u8.to_sql_value(), SqlValue::Int(7));
        assert_eq!(2.5_f32.to_sql_value(), SqlValue::Float(2.5));
        assert_eq!("alice".to_sql_value(), SqlValue::Text(String::from("alice")));
        assert_eq!(None::<i64>.to_sql_value(), SqlValue::Null);
        assert_eq!(Some("x").to_sql_value(), SqlValue::Text(String::from("x")));
        assert_eq!(vec![1_u8, 2].to_sql_value(), SqlValue::Blob(vec![1, 2]));
    }

    #[test]
    fn test_into_args() {
        assert!(().into_args().is_empty());
        assert_eq!("active".into_args(), vec![SqlValue::Text(String::from("active"))]);
        assert_eq!(
            ("alice", 1000).into_args(),
            vec![SqlValue::Text(String::from("alice")), SqlValue::Int(1000)]
        );
        assert_eq!(
            (1, None::<&str>, 2.5).into_args(),
            vec![SqlValue::Int(1), SqlValue::Null, SqlValue::Float(2.5)]
        );
        assert_eq!(vec![SqlValue::Null].into_args(), vec![SqlValue::Null]);
    }

    #[test]
    fn test_serialize_as_plain_json() {
        let args = vec![
            SqlValue::Null,
            SqlValue::Bool(true),
            SqlValue::Int(-3),
            SqlValue::Float(1.5),
            SqlValue::Text(String::from("hi")),
            SqlValue::Blob(vec![1, 2]),
        ];
        let json = serde_json::to_string(&args).unwrap();
        assert_eq!(json, r#"[null,true,-3,1.5,"hi",[1,2]]"#);
    }

    #[test]
    fn test_deserialize_from_json() {
        let args: Vec<SqlValue> =
            serde_json::from_str(r#"[null,false,1000,0.25,"alice",[255],18446744073709551615]"#)
                .unwrap();
        assert_eq!(args[0], SqlValue::Null);
        assert_eq!(args[1], SqlValue::Bool(false));
        assert_eq!(args[2], SqlValue::Int(1000));
        assert_eq!(args[3], SqlValue::Float(0.25));
        assert_eq!(args[4], SqlValue::Text(String::from("alice")));
        assert_eq!(args[5], SqlValue::Blob(vec![255]));
        assert!(matches!(args[6], SqlValue::Float(_)));
    }

    #[test]
    fn test_deserialize_from_yaml() {
        let args: Vec<SqlValue> = serde_yaml::from_str("- ~\n- 42\n- active\n- true\n").unwrap();
        assert_eq!(
            args,
            vec![
                SqlValue::Null,
                SqlValue::Int(42),
                SqlValue::Text(String::from("active")),
                SqlValue::Bool(true),
            ]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(SqlValue::Null.to_string(), "NULL");
        assert_eq!(SqlValue::Text(String::from("a")).to_string(), "\"a\"");
        assert_eq!(SqlValue::Blob(vec![0; 3]).to_string(), "<3 bytes>");
    }
}

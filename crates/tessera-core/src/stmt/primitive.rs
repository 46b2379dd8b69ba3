use super::Value;
use crate::{Error, Result};

use uuid::Uuid;

/// A Rust type that can be stored in a single column.
///
/// `load` accepts the loosely typed values drivers hand back (SQLite has no
/// boolean or 32-bit integer storage, for example) and narrows them to the
/// field's type, failing with a type conversion error when that is not
/// possible.
pub trait Primitive: Sized {
    const NAME: &'static str;

    fn into_value(self) -> Value;

    fn load(value: Value) -> Result<Self>;
}

impl Primitive for String {
    const NAME: &'static str = "String";

    fn into_value(self) -> Value {
        Value::String(self)
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::String(v) => Ok(v),
            value => Err(Error::type_conversion(value, Self::NAME)),
        }
    }
}

impl Primitive for bool {
    const NAME: &'static str = "bool";

    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Bool(v) => Ok(v),
            Value::I32(0) | Value::I64(0) => Ok(false),
            Value::I32(1) | Value::I64(1) => Ok(true),
            value => Err(Error::type_conversion(value, Self::NAME)),
        }
    }
}

impl Primitive for i32 {
    const NAME: &'static str = "i32";

    fn into_value(self) -> Value {
        Value::I32(self)
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::I32(v) => Ok(v),
            Value::I64(v) => {
                i32::try_from(v).map_err(|_| Error::type_conversion(Value::I64(v), Self::NAME))
            }
            value => Err(Error::type_conversion(value, Self::NAME)),
        }
    }
}

impl Primitive for i64 {
    const NAME: &'static str = "i64";

    fn into_value(self) -> Value {
        Value::I64(self)
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::I64(v) => Ok(v),
            Value::I32(v) => Ok(v.into()),
            value => Err(Error::type_conversion(value, Self::NAME)),
        }
    }
}

impl Primitive for f64 {
    const NAME: &'static str = "f64";

    fn into_value(self) -> Value {
        Value::F64(self)
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::F64(v) => Ok(v),
            Value::I32(v) => Ok(v.into()),
            Value::I64(v) => Ok(v as f64),
            value => Err(Error::type_conversion(value, Self::NAME)),
        }
    }
}

impl Primitive for Vec<u8> {
    const NAME: &'static str = "Vec<u8>";

    fn into_value(self) -> Value {
        Value::Bytes(self)
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Bytes(v) => Ok(v),
            value => Err(Error::type_conversion(value, Self::NAME)),
        }
    }
}

impl Primitive for Uuid {
    const NAME: &'static str = "Uuid";

    fn into_value(self) -> Value {
        Value::Uuid(self)
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Uuid(v) => Ok(v),
            Value::String(v) => Uuid::parse_str(&v)
                .map_err(|_| Error::type_conversion(Value::String(v.clone()), Self::NAME)),
            Value::Bytes(v) => Uuid::from_slice(&v)
                .map_err(|_| Error::type_conversion(Value::Bytes(v.clone()), Self::NAME)),
            value => Err(Error::type_conversion(value, Self::NAME)),
        }
    }
}

impl<T: Primitive> Primitive for Option<T> {
    const NAME: &'static str = T::NAME;

    fn into_value(self) -> Value {
        match self {
            Some(value) => value.into_value(),
            None => Value::Null,
        }
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            value => T::load(value).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrows_integers() {
        assert_eq!(i32::load(Value::I64(7)).unwrap(), 7);
        assert!(i32::load(Value::I64(i64::MAX))
            .unwrap_err()
            .is_type_conversion());
        assert_eq!(i64::load(Value::I32(-3)).unwrap(), -3);
    }

    #[test]
    fn integer_booleans() {
        assert!(bool::load(Value::I64(1)).unwrap());
        assert!(!bool::load(Value::I64(0)).unwrap());
        assert!(bool::load(Value::I64(2)).is_err());
    }

    #[test]
    fn uuid_from_text() {
        let id = Uuid::new_v4();
        assert_eq!(Uuid::load(Value::String(id.to_string())).unwrap(), id);
    }

    #[test]
    fn option_accepts_null() {
        assert_eq!(Option::<String>::load(Value::Null).unwrap(), None);
        assert_eq!(
            Option::<String>::load(Value::from("x")).unwrap(),
            Some("x".to_string())
        );
        assert_eq!(None::<i64>.into_value(), Value::Null);
    }

    #[test]
    fn string_rejects_integers() {
        let err = String::load(Value::I64(42)).unwrap_err();
        assert_eq!(err.to_string(), "cannot convert I64 to String");
    }
}

use mysql_async::{prelude::ToValue, Value as MysqlValue};
use tessera_core::{stmt::Value as CoreValue, Error, Result};

#[derive(Debug)]
pub(crate) struct Value<'a>(pub(crate) &'a CoreValue);

impl ToValue for Value<'_> {
    fn to_value(&self) -> MysqlValue {
        match self.0 {
            CoreValue::Null => MysqlValue::NULL,
            CoreValue::Bool(value) => value.to_value(),
            CoreValue::I32(value) => value.to_value(),
            CoreValue::I64(value) => value.to_value(),
            CoreValue::F64(value) => value.to_value(),
            CoreValue::String(value) => value.to_value(),
            CoreValue::Bytes(value) => value.to_value(),
            CoreValue::Uuid(value) => value.to_string().to_value(),
        }
    }
}

/// Converts a column value read from MySQL.
///
/// MySQL sends text and binary columns alike as bytes; valid UTF-8 is read
/// back as a string.
pub(crate) fn from_mysql(value: MysqlValue) -> Result<CoreValue> {
    Ok(match value {
        MysqlValue::NULL => CoreValue::Null,
        MysqlValue::Int(value) => CoreValue::I64(value),
        MysqlValue::UInt(value) => match i64::try_from(value) {
            Ok(value) => CoreValue::I64(value),
            Err(_) => {
                return Err(Error::type_conversion(
                    CoreValue::String(value.to_string()),
                    "i64",
                ))
            }
        },
        MysqlValue::Float(value) => CoreValue::F64(value.into()),
        MysqlValue::Double(value) => CoreValue::F64(value),
        MysqlValue::Bytes(bytes) => match String::from_utf8(bytes) {
            Ok(value) => CoreValue::String(value),
            Err(err) => CoreValue::Bytes(err.into_bytes()),
        },
        value @ (MysqlValue::Date(..) | MysqlValue::Time(..)) => {
            // Read temporal columns as their SQL text
            CoreValue::String(value.as_sql(true).trim_matches('\'').to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bind_values() {
        assert_eq!(Value(&CoreValue::Null).to_value(), MysqlValue::NULL);
        assert_eq!(Value(&CoreValue::I32(3)).to_value(), MysqlValue::Int(3));
        assert_eq!(
            Value(&CoreValue::from("Acme, Inc.")).to_value(),
            MysqlValue::Bytes(b"Acme, Inc.".to_vec())
        );
    }

    #[test]
    fn read_values() {
        assert_eq!(from_mysql(MysqlValue::NULL).unwrap(), CoreValue::Null);
        assert_eq!(from_mysql(MysqlValue::UInt(7)).unwrap(), CoreValue::I64(7));
        assert_eq!(
            from_mysql(MysqlValue::Bytes(b"Dunder Mifflin".to_vec())).unwrap(),
            CoreValue::from("Dunder Mifflin")
        );
        assert_eq!(
            from_mysql(MysqlValue::Bytes(vec![0xff, 0x00])).unwrap(),
            CoreValue::Bytes(vec![0xff, 0x00])
        );
        assert!(from_mysql(MysqlValue::UInt(u64::MAX))
            .unwrap_err()
            .is_type_conversion());
    }
}

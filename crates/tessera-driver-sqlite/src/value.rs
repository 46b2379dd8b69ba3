use rusqlite::types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef};
use tessera_core::{stmt::Value as CoreValue, Error, Result};

/// A parameter bound to a SQLite statement.
#[derive(Debug)]
pub(crate) struct Value<'a>(pub(crate) &'a CoreValue);

impl ToSql for Value<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let output = match self.0 {
            CoreValue::Null => ToSqlOutput::Owned(SqlValue::Null),
            CoreValue::Bool(v) => ToSqlOutput::Owned(SqlValue::Integer(i64::from(*v))),
            CoreValue::I32(v) => ToSqlOutput::Owned(SqlValue::Integer(i64::from(*v))),
            CoreValue::I64(v) => ToSqlOutput::Owned(SqlValue::Integer(*v)),
            CoreValue::F64(v) => ToSqlOutput::Owned(SqlValue::Real(*v)),
            CoreValue::String(v) => ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes())),
            CoreValue::Bytes(v) => ToSqlOutput::Borrowed(ValueRef::Blob(&v[..])),
            // Stored in text form, which `Uuid`'s loader parses back
            CoreValue::Uuid(v) => ToSqlOutput::Owned(SqlValue::Text(v.to_string())),
        };

        Ok(output)
    }
}

/// Converts a column of a result row. SQLite has no declared types to go
/// by, so integers come back as `I64` and are narrowed when loaded.
pub(crate) fn from_sql(value: ValueRef<'_>) -> Result<CoreValue> {
    Ok(match value {
        ValueRef::Null => CoreValue::Null,
        ValueRef::Integer(v) => CoreValue::I64(v),
        ValueRef::Real(v) => CoreValue::F64(v),
        ValueRef::Text(v) => CoreValue::String(
            String::from_utf8(v.to_vec()).map_err(Error::driver_operation_failed)?,
        ),
        ValueRef::Blob(v) => CoreValue::Bytes(v.to_vec()),
    })
}

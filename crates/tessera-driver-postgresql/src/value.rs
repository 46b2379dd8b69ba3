use postgres::types::{private::BytesMut, to_sql_checked, IsNull, ToSql, Type};
use tessera_core::stmt::Value as CoreValue;
use uuid::Uuid;

type BoxError = Box<dyn std::error::Error + Sync + Send>;

/// A parameter bound to a PostgreSQL statement.
///
/// Statements are prepared without declared parameter types, so the server
/// infers each type from the surrounding SQL and the value is converted to
/// it here.
#[derive(Debug)]
pub(crate) struct Value<'a>(pub(crate) &'a CoreValue);

impl ToSql for Value<'_> {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError>
    where
        Self: Sized,
    {
        match self.0 {
            CoreValue::Null => Ok(IsNull::Yes),
            CoreValue::Bool(value) => value.to_sql(ty, out),
            CoreValue::I32(value) => int_to_sql(i64::from(*value), ty, out),
            CoreValue::I64(value) => int_to_sql(*value, ty, out),
            CoreValue::F64(value) => match *ty {
                Type::FLOAT4 => (*value as f32).to_sql(ty, out),
                _ => value.to_sql(ty, out),
            },
            CoreValue::String(value) => match *ty {
                Type::UUID => value.parse::<Uuid>()?.to_sql(ty, out),
                _ => value.to_sql(ty, out),
            },
            CoreValue::Bytes(value) => value.to_sql(ty, out),
            CoreValue::Uuid(value) => match *ty {
                Type::UUID => value.to_sql(ty, out),
                _ => value.to_string().to_sql(ty, out),
            },
        }
    }

    fn accepts(_ty: &Type) -> bool {
        // Checked per value in `to_sql`
        true
    }

    to_sql_checked!();
}

fn int_to_sql(value: i64, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        Type::INT2 => i16::try_from(value)?.to_sql(ty, out),
        Type::INT4 => i32::try_from(value)?.to_sql(ty, out),
        Type::INT8 => value.to_sql(ty, out),
        Type::FLOAT8 => (value as f64).to_sql(ty, out),
        Type::BOOL => (value != 0).to_sql(ty, out),
        _ => Err(format!("cannot bind an integer to a `{ty}` parameter").into()),
    }
}

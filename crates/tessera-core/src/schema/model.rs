use super::Mapping;
use crate::{Error, Result};

use std::any::{self, Any, TypeId};

/// A Rust type stored in a table.
///
/// `mapping` describes the table and is called once when the type is
/// registered in a catalog. Records are created with `Default` before their
/// fields are loaded.
pub trait Model: Default + Send + 'static {
    fn mapping() -> Mapping;
}

/// Identifies a model type.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelId {
    type_id: TypeId,
    name: &'static str,
}

impl ModelId {
    pub fn of<M: 'static>() -> ModelId {
        ModelId {
            type_id: TypeId::of::<M>(),
            name: short_name(any::type_name::<M>()),
        }
    }

    /// The type's name, without its module path.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl std::fmt::Debug for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ModelId({})", self.name)
    }
}

fn short_name(full: &'static str) -> &'static str {
    let end = full.find('<').unwrap_or(full.len());
    match full[..end].rfind("::") {
        Some(pos) => &full[pos + 2..],
        None => full,
    }
}

/// A type-erased model instance produced while loading rows.
pub struct Record(Box<dyn Any + Send>);

impl Record {
    pub fn new<M: Any + Send>(model: M) -> Record {
        Record(Box::new(model))
    }

    pub fn as_any(&self) -> &dyn Any {
        &*self.0
    }

    pub fn as_any_mut(&mut self) -> &mut dyn Any {
        &mut *self.0
    }

    pub fn downcast<M: 'static>(self) -> Result<M> {
        self.0
            .downcast::<M>()
            .map(|model| *model)
            .map_err(|_| mismatch::<M>())
    }
}

impl std::fmt::Debug for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Record { .. }")
    }
}

pub(super) fn downcast_ref<M: 'static>(record: &dyn Any) -> Result<&M> {
    record.downcast_ref::<M>().ok_or_else(mismatch::<M>)
}

pub(super) fn downcast_mut<M: 'static>(record: &mut dyn Any) -> Result<&mut M> {
    record.downcast_mut::<M>().ok_or_else(mismatch::<M>)
}

fn mismatch<M: 'static>() -> Error {
    Error::invalid_argument(format!("record is not a `{}`", ModelId::of::<M>().name()))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Account;

    #[test]
    fn model_id_uses_short_name() {
        assert_eq!(ModelId::of::<Account>().name(), "Account");
        assert_eq!(ModelId::of::<Account>(), ModelId::of::<Account>());
        assert_ne!(ModelId::of::<Account>(), ModelId::of::<String>());
    }

    #[test]
    fn record_downcast() {
        let record = Record::new(42_i64);
        assert_eq!(downcast_ref::<i64>(record.as_any()).unwrap(), &42);
        assert!(downcast_ref::<i32>(record.as_any()).is_err());
        assert_eq!(record.downcast::<i64>().unwrap(), 42);
    }
}

use super::model::{downcast_mut, downcast_ref};
use crate::{
    stmt::{Primitive, Value},
    Result,
};

use std::{any::Any, fmt, sync::Arc};

type Getter = Arc<dyn Fn(&dyn Any) -> Result<Value> + Send + Sync>;
type Setter = Arc<dyn Fn(&mut dyn Any, Value) -> Result<()> + Send + Sync>;

/// A mapped column and the accessors for the field that holds it.
#[derive(Clone)]
pub struct Column {
    /// Column name in the table
    pub name: String,

    /// Name of the model field
    pub field: String,

    pub insertable: bool,
    pub updatable: bool,

    get: Getter,
    set: Setter,
}

impl Column {
    pub(super) fn new<M, T>(
        name: String,
        field: String,
        get: fn(&M) -> &T,
        set: fn(&mut M) -> &mut T,
    ) -> Column
    where
        M: 'static,
        T: Primitive + Clone + 'static,
    {
        Column {
            name,
            field,
            insertable: true,
            updatable: true,
            get: Arc::new(move |record: &dyn Any| {
                Ok(get(downcast_ref::<M>(record)?).clone().into_value())
            }),
            set: Arc::new(move |record: &mut dyn Any, value: Value| {
                *set(downcast_mut::<M>(record)?) = T::load(value)?;
                Ok(())
            }),
        }
    }

    /// Reads the field from a record of the owning model.
    pub fn get(&self, record: &dyn Any) -> Result<Value> {
        (self.get)(record)
    }

    /// Loads a value into the field of a record of the owning model.
    pub fn set(&self, record: &mut dyn Any, value: Value) -> Result<()> {
        (self.set)(record, value)
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("name", &self.name)
            .field("field", &self.field)
            .field("insertable", &self.insertable)
            .field("updatable", &self.updatable)
            .finish()
    }
}

/// A table reference in a compiled query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    pub alias: String,
}

/// A column reference in a compiled query, qualified by its table alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    /// Alias of the table the column is read from
    pub table: String,

    pub name: String,

    /// Output alias, when the column is selected under another name
    pub alias: Option<String>,
}

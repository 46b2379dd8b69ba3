use super::{Column, ColumnRef, JoinPair, Model, ModelId, Record, Relation};
use crate::{
    stmt::{Primitive, Value},
    CompileError, Result,
};

use std::{any::Any, marker::PhantomData};

/// How a model type is stored: its table, keys, columns and relations.
#[derive(Debug)]
pub struct Mapping {
    pub model: ModelId,

    pub table: String,

    /// Primary key column names
    pub primary_key: Vec<String>,

    /// Unique key column groups
    pub unique_keys: Vec<Vec<String>>,

    /// Columns in declaration order
    pub columns: Vec<Column>,

    pub relations: Vec<Relation>,

    construct: fn() -> Record,
}

/// Builds the [`Mapping`] of `M`, usually from `Model::mapping`.
///
/// ```ignore
/// Mapping::builder::<Account>("accounts")
///     .column("id", "ID", |a| &a.id, |a| &mut a.id)
///     .column("company", "Company", |a| &a.company, |a| &mut a.company)
///     .has_many("Users", "users", &[("id", "account_id")], |a| &mut a.users)
///     .primary_key(["id"])
///     .build()
/// ```
#[derive(Debug)]
pub struct MappingBuilder<M> {
    mapping: Mapping,
    _model: PhantomData<fn() -> M>,
}

impl Mapping {
    pub fn builder<M: Model>(table: impl Into<String>) -> MappingBuilder<M> {
        MappingBuilder {
            mapping: Mapping {
                model: ModelId::of::<M>(),
                table: table.into(),
                primary_key: vec![],
                unique_keys: vec![],
                columns: vec![],
                relations: vec![],
                construct: construct::<M>,
            },
            _model: PhantomData,
        }
    }

    /// Creates a default-initialized record of the model.
    pub fn construct(&self) -> Record {
        (self.construct)()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn column_by_field(&self, field: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.field == field)
    }

    pub fn relation(&self, field: &str) -> Option<&Relation> {
        self.relations.iter().find(|relation| relation.field == field)
    }

    /// Primary key columns, in key order.
    pub fn primary_key_columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.primary_key.iter().filter_map(|name| self.column(name))
    }

    /// Reads the primary key of a record of this model.
    pub fn key_of(&self, record: &dyn Any) -> Result<Vec<Value>> {
        self.primary_key_columns()
            .map(|column| column.get(record))
            .collect()
    }

    /// Resolves a field name to a column reference on `table_alias`.
    ///
    /// A non-empty `column_alias_prefix` gives the column an output alias of
    /// the prefix followed by the column name.
    pub fn map_field(
        &self,
        table_alias: &str,
        column_alias_prefix: &str,
        field: &str,
    ) -> Result<ColumnRef> {
        let column = self
            .column_by_field(field)
            .ok_or_else(|| CompileError::UnmappedField {
                model: self.model.name(),
                field: field.to_string(),
            })?;

        Ok(ColumnRef {
            table: table_alias.to_string(),
            name: column.name.clone(),
            alias: if column_alias_prefix.is_empty() {
                None
            } else {
                Some(format!("{column_alias_prefix}{}", column.name))
            },
        })
    }
}

fn construct<M: Model>() -> Record {
    Record::new(M::default())
}

impl<M: Model> MappingBuilder<M> {
    /// Maps `field` to the column `name`.
    pub fn column<T>(
        mut self,
        name: impl Into<String>,
        field: impl Into<String>,
        get: fn(&M) -> &T,
        set: fn(&mut M) -> &mut T,
    ) -> Self
    where
        T: Primitive + Clone + 'static,
    {
        self.mapping
            .columns
            .push(Column::new(name.into(), field.into(), get, set));
        self
    }

    /// Marks the last added column as (not) insertable.
    pub fn insertable(mut self, insertable: bool) -> Self {
        if let Some(column) = self.mapping.columns.last_mut() {
            column.insertable = insertable;
        }
        self
    }

    /// Marks the last added column as (not) updatable.
    pub fn updatable(mut self, updatable: bool) -> Self {
        if let Some(column) = self.mapping.columns.last_mut() {
            column.updatable = updatable;
        }
        self
    }

    /// A to-one relation whose join columns live on this table.
    pub fn belongs_to<U: Model>(
        self,
        field: impl Into<String>,
        target_table: impl Into<String>,
        join_pairs: &[(&str, &str)],
        access: fn(&mut M) -> &mut Option<U>,
    ) -> Self {
        self.has_one(field, target_table, join_pairs, access)
    }

    /// A to-one relation whose join columns live on the related table.
    pub fn has_one<U: Model>(
        mut self,
        field: impl Into<String>,
        target_table: impl Into<String>,
        join_pairs: &[(&str, &str)],
        access: fn(&mut M) -> &mut Option<U>,
    ) -> Self {
        self.mapping.relations.push(Relation::one(
            field.into(),
            target_table.into(),
            join_pairs_from(join_pairs),
            access,
        ));
        self
    }

    pub fn has_many<U: Model>(
        mut self,
        field: impl Into<String>,
        target_table: impl Into<String>,
        join_pairs: &[(&str, &str)],
        access: fn(&mut M) -> &mut Vec<U>,
    ) -> Self {
        self.mapping.relations.push(Relation::many(
            field.into(),
            target_table.into(),
            join_pairs_from(join_pairs),
            access,
        ));
        self
    }

    pub fn primary_key(mut self, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.mapping.primary_key = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn unique_key(mut self, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.mapping
            .unique_keys
            .push(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn build(self) -> Mapping {
        self.mapping
    }
}

fn join_pairs_from(pairs: &[(&str, &str)]) -> Vec<JoinPair> {
    pairs
        .iter()
        .map(|(local, remote)| JoinPair {
            local: local.to_string(),
            remote: remote.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[derive(Debug, Default, PartialEq)]
    struct Account {
        id: String,
        company: Option<String>,
        rank: i32,
    }

    impl Model for Account {
        fn mapping() -> Mapping {
            Mapping::builder::<Self>("accounts")
                .column("id", "ID", |a| &a.id, |a| &mut a.id)
                .updatable(false)
                .column("company", "Company", |a| &a.company, |a| &mut a.company)
                .column("rank", "Rank", |a| &a.rank, |a| &mut a.rank)
                .primary_key(["id"])
                .build()
        }
    }

    #[test]
    fn map_field_without_prefix() {
        let mapping = Account::mapping();
        let column = mapping.map_field("a", "", "Company").unwrap();
        assert_eq!(
            column,
            ColumnRef {
                table: "a".into(),
                name: "company".into(),
                alias: None,
            }
        );
    }

    #[test]
    fn map_field_with_prefix() {
        let mapping = Account::mapping();
        let column = mapping.map_field("accounts", "owner_", "ID").unwrap();
        assert_eq!(column.alias.as_deref(), Some("owner_id"));
    }

    #[test]
    fn map_field_unmapped() {
        let mapping = Account::mapping();
        let err: Error = mapping.map_field("accounts", "", "Nope").unwrap_err();
        assert_eq!(
            err.as_compile_error(),
            Some(&CompileError::UnmappedField {
                model: "Account",
                field: "Nope".into(),
            })
        );
    }

    #[test]
    fn accessors_round_trip_through_records() {
        let mapping = Account::mapping();
        let mut record = mapping.construct();

        mapping
            .column_by_field("ID")
            .unwrap()
            .set(record.as_any_mut(), Value::from("7"))
            .unwrap();
        mapping
            .column_by_field("Rank")
            .unwrap()
            .set(record.as_any_mut(), Value::I64(3))
            .unwrap();

        assert_eq!(mapping.key_of(record.as_any()).unwrap(), vec![Value::from("7")]);
        assert_eq!(
            record.downcast::<Account>().unwrap(),
            Account {
                id: "7".into(),
                company: None,
                rank: 3,
            }
        );
    }

    #[test]
    fn column_flags() {
        let mapping = Account::mapping();
        assert!(!mapping.column("id").unwrap().updatable);
        assert!(mapping.column("company").unwrap().updatable);
        assert!(mapping.column("id").unwrap().insertable);
    }
}

use super::Repository;
use crate::GetOptions;

use tessera_core::{
    err,
    schema::{Column, Record, Relation},
    stmt::{Clause, Element, Value},
    Cx, Error, Model, Result,
};

use std::{any::Any, collections::HashMap};

pub(super) async fn get<M: Model>(
    repository: &Repository,
    cx: &Cx,
    targets: &mut [M],
    options: GetOptions,
) -> Result<()> {
    if targets.is_empty() {
        return Ok(());
    }

    let mapping = repository.shared.catalog.mapping_for::<M>()?;

    let mut keys = Vec::with_capacity(targets.len());
    let mut rows = Vec::with_capacity(targets.len());

    for target in targets.iter() {
        let key = mapping.key_of(target)?;
        keys.push(composite_key(&key)?);
        rows.push(key.into_iter().map(Element::Value).collect::<Vec<_>>());
    }

    let by_key = Clause::in_tuples(
        mapping
            .primary_key_columns()
            .map(|column| Element::field(&column.field)),
        rows,
    );

    let GetOptions {
        filter,
        mut include,
    } = options;
    include.filter = Clause::and_opt(Some(by_key), Clause::and_opt(include.filter, filter));

    let records = repository
        .load(cx, mapping, &include, 0, None)
        .await
        .map_err(|err| err.context(err!("get")))?;

    let mut loaded = HashMap::<String, Record>::with_capacity(records.len());
    for record in records {
        let key = composite_key(&mapping.key_of(record.as_any())?)?;
        loaded.entry(key).or_insert(record);
    }

    let found = keys.iter().filter(|key| loaded.contains_key(*key)).count();
    if found < targets.len() {
        return Err(Error::not_found(targets.len(), found));
    }

    let columns: Vec<&Column> = if include.fields.is_empty() {
        mapping.columns.iter().collect()
    } else {
        include
            .fields
            .iter()
            .filter_map(|field| mapping.column_by_field(field))
            .collect()
    };

    let relations: Vec<&Relation> = include
        .relations
        .keys()
        .filter_map(|name| mapping.relation(name))
        .collect();

    for (target, key) in targets.iter_mut().zip(&keys) {
        let Some(record) = loaded.get_mut(key) else {
            continue;
        };
        let target: &mut dyn Any = target;

        for column in &columns {
            column.set(target, column.get(record.as_any())?)?;
        }

        // Relations move out of the loaded record, so a key requested twice
        // only receives them on its first target.
        for relation in &relations {
            relation.transfer(target, record.as_any_mut())?;
        }
    }

    Ok(())
}

/// Stable string form of a primary key, used to match loaded records to
/// targets.
fn composite_key(key: &[Value]) -> Result<String> {
    Ok(serde_json::to_string(key)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_keys_distinguish_types_and_order() {
        let a = composite_key(&[Value::from("1"), Value::from(2_i64)]).unwrap();
        let b = composite_key(&[Value::from(1_i64), Value::from(2_i64)]).unwrap();
        let c = composite_key(&[Value::from(2_i64), Value::from("1")]).unwrap();

        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, composite_key(&[Value::from("1"), Value::from(2_i64)]).unwrap());
    }
}

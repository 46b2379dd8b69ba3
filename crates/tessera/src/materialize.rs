//! Folds flat result rows back into records.
//!
//! Rows arrive ordered so that every root record's rows are contiguous. A new
//! root record starts whenever the root key slots change. Within a record,
//! each included relation keeps the sub-rows it has already seen, keyed by
//! the child's own primary key, so a child repeated by another join fanning
//! out is only loaded once. A sub-row whose key slots are all NULL is a
//! LEFT JOIN miss and is skipped.
//!
//! A window bounds how many root records are skipped and kept, for plans
//! whose statement cannot bound records with LIMIT itself.

use tessera_core::{driver::Rows, err, schema::Record, stmt::Value, Result};
use tessera_sql::Structure;

use indexmap::IndexMap;

pub(crate) struct Materializer<'a, 'p> {
    structure: &'a Structure<'p>,

    /// Row buffer, allocated once and reused for every row
    slots: Vec<Value>,

    /// Root records to skip before keeping any
    skip: u64,

    /// Most root records to keep
    take: Option<u64>,
}

/// A record being loaded, with the children found so far for each of its
/// included relations.
struct Node {
    record: Record,

    /// One entry per included relation, in structure order
    children: Vec<IndexMap<String, Node>>,
}

impl<'a, 'p> Materializer<'a, 'p> {
    pub(crate) fn new(structure: &'a Structure<'p>) -> Self {
        Self {
            structure,
            slots: vec![Value::Null; structure.width()],
            skip: 0,
            take: None,
        }
    }

    /// Skips the first `skip` root records and stops after `take` more.
    pub(crate) fn window(mut self, skip: u64, take: Option<u64>) -> Self {
        self.skip = skip;
        self.take = take;
        self
    }

    /// Reads rows until they run out or the window is full, and returns the
    /// kept root records in row order.
    pub(crate) async fn read(mut self, rows: &mut Rows) -> Result<Vec<Record>> {
        let mut records = vec![];

        // A skipped record keeps its key but builds no node
        let mut current: Option<(Vec<Value>, Option<Node>)> = None;
        let mut started = 0;
        let mut index = 0;

        while rows
            .next()
            .await
            .map_err(|err| err.context(err!("row {index}")))?
        {
            rows.scan(&mut self.slots)
                .map_err(|err| err.context(err!("row {index}")))?;

            let key = &self.slots[self.structure.key_range()];

            let starts_record = match &current {
                Some((current_key, _)) => current_key[..] != *key,
                None => true,
            };

            if starts_record {
                let key = key.to_vec();

                if let Some((_, Some(node))) = current.take() {
                    records.push(finish(self.structure, node)?);
                }

                if self.take.is_some_and(|take| records.len() as u64 >= take) {
                    break;
                }

                started += 1;

                let node = if started > self.skip {
                    let node = start(self.structure, &mut self.slots)
                        .map_err(|err| err.context(err!("row {index}")))?;
                    Some(node)
                } else {
                    None
                };
                current = Some((key, node));
            }

            if let Some((_, Some(node))) = &mut current {
                absorb(self.structure, node, &mut self.slots)
                    .map_err(|err| err.context(err!("row {index}")))?;
            }

            index += 1;
        }

        if let Some((_, Some(node))) = current {
            records.push(finish(self.structure, node)?);
        }

        tracing::trace!(
            rows = index,
            records = records.len(),
            skipped = started.min(self.skip),
            "materialized records"
        );

        Ok(records)
    }
}

/// Creates the record for `structure` from its key and data slots.
fn start(structure: &Structure<'_>, row: &mut [Value]) -> Result<Node> {
    let mut record = structure.mapping.construct();

    for (i, key) in structure.key_range().zip(&structure.keys) {
        key.field.set(record.as_any_mut(), row[i].clone())?;
    }

    for (i, field) in structure.field_range().zip(&structure.fields) {
        field.field.set(record.as_any_mut(), row[i].take())?;
    }

    Ok(Node {
        record,
        children: structure.relations.values().map(|_| IndexMap::new()).collect(),
    })
}

/// Loads the related sub-rows of one row into `node`, recursively.
fn absorb(structure: &Structure<'_>, node: &mut Node, row: &mut [Value]) -> Result<()> {
    for (nested, children) in structure.relations.values().zip(&mut node.children) {
        let child_structure = &nested.structure;
        let key = &row[child_structure.key_range()];

        if key.iter().all(Value::is_null) {
            continue;
        }

        let id = serde_json::to_string(key)?;

        if !children.contains_key(&id) {
            // A to-one relation keeps the first sub-row it sees
            if !nested.relation.kind.is_many() && !children.is_empty() {
                continue;
            }

            let child = start(child_structure, row)?;
            children.insert(id.clone(), child);
        }

        if let Some(child) = children.get_mut(&id) {
            absorb(child_structure, child, row)?;
        }
    }

    Ok(())
}

/// Attaches the loaded children to their parents, bottom up.
fn finish(structure: &Structure<'_>, node: Node) -> Result<Record> {
    let Node {
        mut record,
        children,
    } = node;

    for (nested, children) in structure.relations.values().zip(children) {
        for (_, child) in children {
            let child = finish(&nested.structure, child)?;
            nested
                .relation
                .attach(record.as_any_mut(), child)
                .map_err(|err| err.context(err!("attach `{}`", nested.relation.field)))?;
        }
    }

    Ok(record)
}

use super::{Nested, Paging, SelectQueryPlan, Structure, StructureColumn};
use crate::{
    compile::{self, check_root_alias, insert_join, merge_joins, Compiler, Fragment, Join},
    resolve::FieldResolver,
};

use tessera_core::{
    schema::{ColumnRef, Table},
    stmt::{Include, Value},
    Catalog, CompileError, Dialect, Mapping, Result,
};

use indexmap::IndexMap;

/// Builds a [`SelectQueryPlan`] for one root mapping.
#[derive(Debug, Clone, Copy)]
pub struct PlanBuilder<'a> {
    catalog: &'a Catalog,
    dialect: &'a dyn Dialect,
    mapping: &'a Mapping,
    alias: Option<&'a str>,
    offset: u64,
    limit: Option<u64>,
}

/// State accumulated while walking the include tree.
#[derive(Default)]
struct Walk {
    joins: IndexMap<String, Join>,

    /// Compiled sorts of included relations, applied after the root order
    sorts: Vec<Fragment>,

    /// Row position of the next structure
    next_offset: usize,
}

impl<'a> PlanBuilder<'a> {
    pub fn new(catalog: &'a Catalog, dialect: &'a dyn Dialect, mapping: &'a Mapping) -> Self {
        Self {
            catalog,
            dialect,
            mapping,
            alias: None,
            offset: 0,
            limit: None,
        }
    }

    /// Alias for the root table. Defaults to the table name.
    pub fn alias(mut self, alias: &'a str) -> Self {
        self.alias = Some(alias);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    pub fn limit(mut self, limit: Option<u64>) -> Self {
        self.limit = limit;
        self
    }

    pub fn build(&self, include: &Include) -> Result<SelectQueryPlan<'a>> {
        let alias = self.alias.unwrap_or(&self.mapping.table);

        let keys = self
            .mapping
            .primary_key_columns()
            .enumerate()
            .map(|(i, column)| StructureColumn {
                column: ColumnRef {
                    table: alias.to_string(),
                    name: column.name.clone(),
                    alias: Some(format!("_{i}")),
                },
                field: column,
            })
            .collect::<Vec<_>>();

        let mut structure = self.structure(self.mapping, alias, keys, &include.fields, 0)?;

        let mut walk = Walk {
            next_offset: structure.keys.len() + structure.fields.len(),
            ..Walk::default()
        };
        self.include_relations(&mut structure, "", include, &mut walk)?;

        let compiler = Compiler::new(self.catalog, self.mapping, self.dialect).with_alias(alias);

        let (where_sql, where_params) = match &include.filter {
            Some(filter) => {
                let fragment = compiler.compile_clause(filter)?;
                merge_joins(&mut walk.joins, fragment.joins)?;
                (Some(fragment.sql), fragment.params)
            }
            None => (None, vec![]),
        };

        let mut order = Vec::with_capacity(include.sort.len());
        for sort in &include.sort {
            let mut fragment = compiler.compile_sort(sort)?;
            merge_joins(&mut walk.joins, std::mem::take(&mut fragment.joins))?;
            order.push(fragment);
        }

        check_root_alias(alias, &walk.joins)?;

        // Keep each root record's rows contiguous when joins fan out. A
        // record then spans several rows, so LIMIT and OFFSET count records
        // while reading instead of rows in SQL.
        let fans_out = walk.joins.values().any(|join| join.kind.is_many());

        if fans_out {
            for key in &structure.keys {
                order.push(Fragment::new(format!(
                    "{} ASC",
                    self.dialect
                        .escape_table_column(&key.column.table, &key.column.name)
                )));
            }
        }

        order.append(&mut walk.sorts);

        let (order_sql, order_params) = if order.is_empty() {
            (None, vec![])
        } else {
            let mut sql = String::new();
            let mut params = Vec::<Value>::new();

            for (i, fragment) in order.into_iter().enumerate() {
                if i > 0 {
                    sql.push_str(", ");
                }
                sql.push_str(&fragment.sql);
                params.extend(fragment.params);
            }

            (Some(sql), params)
        };

        let primary_key_columns = structure.keys.iter().map(|key| key.column.clone()).collect();

        let mut selected_columns = vec![];
        structure.for_each_selected(&mut |column| selected_columns.push(column.clone()), false);

        Ok(SelectQueryPlan {
            dialect: self.dialect,
            table: Table {
                name: self.mapping.table.clone(),
                alias: alias.to_string(),
            },
            joins: walk.joins,
            primary_key_columns,
            selected_columns,
            where_sql,
            where_params,
            order_sql,
            order_params,
            limit: self.limit,
            offset: self.offset,
            paging: if fans_out {
                Paging::Records
            } else {
                Paging::Rows
            },
            structure,
        })
    }

    /// A structure with the given keys and the requested fields (all columns
    /// when none are requested).
    fn structure(
        &self,
        mapping: &'a Mapping,
        alias: &str,
        keys: Vec<StructureColumn<'a>>,
        fields: &[String],
        offset: usize,
    ) -> Result<Structure<'a>> {
        let fields = if fields.is_empty() {
            mapping
                .columns
                .iter()
                .map(|column| StructureColumn {
                    column: ColumnRef {
                        table: alias.to_string(),
                        name: column.name.clone(),
                        alias: None,
                    },
                    field: column,
                })
                .collect()
        } else {
            fields
                .iter()
                .map(|field| -> Result<StructureColumn<'a>> {
                    let field = mapping.column_by_field(field).ok_or_else(|| {
                        CompileError::UnmappedField {
                            model: mapping.model.name(),
                            field: field.to_string(),
                        }
                    })?;

                    Ok(StructureColumn {
                        column: ColumnRef {
                            table: alias.to_string(),
                            name: field.name.clone(),
                            alias: None,
                        },
                        field,
                    })
                })
                .collect::<Result<Vec<_>>>()?
        };

        Ok(Structure {
            mapping,
            alias: alias.to_string(),
            offset,
            keys,
            fields,
            relations: IndexMap::new(),
        })
    }

    /// Adds the joins and nested structures for the relations of `include`.
    /// `prefix` is the join alias of `parent`, empty at the root.
    fn include_relations(
        &self,
        parent: &mut Structure<'a>,
        prefix: &str,
        include: &Include,
        walk: &mut Walk,
    ) -> Result<()> {
        // Only used to take single steps, which name their own mapping and
        // aliases
        let resolver = FieldResolver::new(self.catalog, self.mapping, &self.mapping.table);

        for (name, nested) in &include.relations {
            let path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}.{name}")
            };

            let step = resolver.step(parent.mapping, name, &parent.alias, prefix, &path)?;
            let alias = step.path_alias.as_str();

            let compiler = Compiler::new(self.catalog, step.mapping, self.dialect)
                .with_alias(alias)
                .for_relation(&step.relation.field);

            let filter = match &nested.filter {
                Some(filter) => Some(compiler.compile_clause(filter)?),
                None => None,
            };

            for sort in &nested.sort {
                walk.sorts.push(compiler.compile_sort(sort)?);
            }

            insert_join(
                &mut walk.joins,
                step.path_alias.clone(),
                compile::join(self.dialect, &step, filter),
            )?;

            let keys = step
                .mapping
                .primary_key_columns()
                .enumerate()
                .map(|(i, column)| StructureColumn {
                    column: ColumnRef {
                        table: step.path_alias.clone(),
                        name: column.name.clone(),
                        alias: Some(format!("_{}_{i}", step.path_alias)),
                    },
                    field: column,
                })
                .collect::<Vec<_>>();

            let mut structure =
                self.structure(step.mapping, alias, keys, &nested.fields, walk.next_offset)?;
            walk.next_offset += structure.keys.len() + structure.fields.len();

            self.include_relations(&mut structure, alias, nested, walk)?;

            parent.relations.insert(
                name.clone(),
                Nested {
                    relation: step.relation,
                    structure,
                },
            );
        }

        Ok(())
    }
}

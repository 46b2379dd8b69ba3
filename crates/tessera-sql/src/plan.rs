mod builder;
pub use builder::PlanBuilder;

mod structure;
pub use structure::{Nested, Structure, StructureColumn};

use crate::{
    compile::Join,
    fmt::{Comma, Delimited, Formatter, Ident, ToSql},
};

use tessera_core::{
    schema::{ColumnRef, Table},
    stmt::Value,
    Dialect,
};

use indexmap::IndexMap;

/// A compiled SELECT, ready to execute.
///
/// Built fresh for each call and never cached.
#[derive(Debug)]
pub struct SelectQueryPlan<'a> {
    pub dialect: &'a dyn Dialect,

    pub table: Table,

    /// LEFT JOINs keyed by alias, in emission order
    pub joins: IndexMap<String, Join>,

    /// Root primary key, selected first as `_0`, `_1`, ...
    pub primary_key_columns: Vec<ColumnRef>,

    /// Every other selected column, in row order
    pub selected_columns: Vec<ColumnRef>,

    pub where_sql: Option<String>,
    pub where_params: Vec<Value>,

    pub order_sql: Option<String>,
    pub order_params: Vec<Value>,

    pub limit: Option<u64>,
    pub offset: u64,

    /// What `limit` and `offset` count
    pub paging: Paging,

    pub structure: Structure<'a>,
}

/// How a plan's window is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paging {
    /// One row per record, so the statement carries LIMIT and OFFSET.
    Rows,

    /// A to-many join spreads a record over several rows. The statement is
    /// left unbounded and the window is applied to records while reading.
    Records,
}

impl SelectQueryPlan<'_> {
    /// The statement text, with `?` placeholders.
    pub fn sql(&self) -> String {
        let mut dst = String::new();
        let f = &mut Formatter {
            dialect: self.dialect,
            dst: &mut dst,
        };

        let columns = self
            .primary_key_columns
            .iter()
            .chain(&self.selected_columns)
            .map(SelectColumn);

        f.push("SELECT ")
            .push(Comma(columns))
            .push(" FROM ")
            .push(Ident(&self.table.name))
            .push(" AS ")
            .push(Ident(&self.table.alias));

        if !self.joins.is_empty() {
            f.push(" ")
                .push(Delimited(self.joins.values().map(|join| &join.sql), " "));
        }

        if let Some(where_sql) = &self.where_sql {
            f.push(" WHERE ").push(where_sql);
        }

        if let Some(order_sql) = &self.order_sql {
            f.push(" ORDER BY ").push(order_sql);
        }

        if self.paging == Paging::Records {
            return dst;
        }

        match (self.limit, self.offset) {
            (Some(limit), 0) => {
                f.push(" LIMIT ").push(limit);
            }
            (Some(limit), offset) => {
                f.push(" LIMIT ").push(limit).push(" OFFSET ").push(offset);
            }
            (None, 0) => {}
            (None, offset) => {
                if let Some(unbounded) = self.dialect.unbounded_limit() {
                    f.push(" LIMIT ").push(unbounded);
                }
                f.push(" OFFSET ").push(offset);
            }
        }

        dst
    }

    /// Records to skip and the most to keep while reading rows. The
    /// statement already bounds row-paged plans.
    pub fn record_window(&self) -> (u64, Option<u64>) {
        match self.paging {
            Paging::Rows => (0, None),
            Paging::Records => (self.offset, self.limit),
        }
    }

    /// Parameters in placeholder order: joins, then WHERE, then ORDER BY.
    pub fn params(&self) -> Vec<Value> {
        self.joins
            .values()
            .flat_map(|join| join.params.iter())
            .chain(&self.where_params)
            .chain(&self.order_params)
            .cloned()
            .collect()
    }

    /// Number of columns in each result row.
    pub fn width(&self) -> usize {
        self.primary_key_columns.len() + self.selected_columns.len()
    }
}

struct SelectColumn<'a>(&'a ColumnRef);

impl ToSql for SelectColumn<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let column = f.dialect.escape_table_column(&self.0.table, &self.0.name);
        f.push(&column);

        if let Some(alias) = &self.0.alias {
            f.push(" AS ").push(Ident(alias));
        }
    }
}

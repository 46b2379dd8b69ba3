use tessera_core::schema::{Column, ColumnRef, Mapping, Relation};

use indexmap::IndexMap;
use std::ops::Range;

/// Compiled projection of one mapping within a result row.
///
/// A structure's key columns come first, followed by its data columns,
/// starting at `offset`. Included relations follow, each as a nested
/// structure laid out the same way.
#[derive(Debug)]
pub struct Structure<'a> {
    pub mapping: &'a Mapping,

    /// Alias of the table the columns are read from
    pub alias: String,

    /// Index of the structure's first column in the row
    pub offset: usize,

    pub keys: Vec<StructureColumn<'a>>,

    pub fields: Vec<StructureColumn<'a>>,

    /// Included relations, keyed by relation field name
    pub relations: IndexMap<String, Nested<'a>>,
}

/// A selected column and the mapped column it loads.
#[derive(Debug)]
pub struct StructureColumn<'a> {
    pub column: ColumnRef,
    pub field: &'a Column,
}

/// An included relation.
#[derive(Debug)]
pub struct Nested<'a> {
    pub relation: &'a Relation,
    pub structure: Structure<'a>,
}

impl Structure<'_> {
    /// Row positions of the key columns.
    pub fn key_range(&self) -> Range<usize> {
        self.offset..self.offset + self.keys.len()
    }

    /// Row positions of the data columns.
    pub fn field_range(&self) -> Range<usize> {
        let start = self.offset + self.keys.len();
        start..start + self.fields.len()
    }

    /// Number of columns selected for this structure and its relations.
    pub fn width(&self) -> usize {
        self.keys.len()
            + self.fields.len()
            + self
                .relations
                .values()
                .map(|nested| nested.structure.width())
                .sum::<usize>()
    }

    /// Returns `true` if any included relation, at any depth, is to-many.
    pub fn has_many(&self) -> bool {
        self.relations
            .values()
            .any(|nested| nested.relation.kind.is_many() || nested.structure.has_many())
    }

    /// Visits the selected columns in row order, excluding the root keys.
    pub(crate) fn for_each_selected(&self, f: &mut impl FnMut(&ColumnRef), include_keys: bool) {
        if include_keys {
            for key in &self.keys {
                f(&key.column);
            }
        }

        for field in &self.fields {
            f(&field.column);
        }

        for nested in self.relations.values() {
            nested.structure.for_each_selected(f, true);
        }
    }
}

use super::{Clause, Sort};

use indexmap::IndexMap;

/// Projection and relation-loading request for one mapping.
///
/// `fields` selects the column fields to load (empty loads all of them).
/// Each entry in `relations` loads the named relation with its own nested
/// include. At the root, `filter` and `sort` become the WHERE and ORDER BY
/// of the query; on a nested include the filter restricts which related
/// rows are joined and the sort orders them within each parent.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Include {
    pub fields: Vec<String>,
    pub relations: IndexMap<String, Include>,
    pub filter: Option<Clause>,
    pub sort: Vec<Sort>,
}

impl Include {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.fields.push(field.into());
        self
    }

    pub fn fields(mut self, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn relation(mut self, relation: impl Into<String>, include: Include) -> Self {
        self.relations.insert(relation.into(), include);
        self
    }

    /// Sets the filter, AND-ing it with any filter already present.
    pub fn filter(mut self, clause: Clause) -> Self {
        self.filter = Clause::and_opt(self.filter.take(), Some(clause));
        self
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort.push(sort);
        self
    }
}

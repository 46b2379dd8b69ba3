use tessera_core::stmt::{Clause, Include};

/// Options for [`Repository::find`](crate::Repository::find).
#[derive(Debug, Default, Clone)]
pub struct FindOptions {
    /// Fields, relations, filter and order of the query
    pub include: Include,

    /// Number of rows to skip
    pub offset: u64,

    /// Maximum number of rows to read. Defaults to the capacity of the
    /// target list.
    pub limit: Option<u64>,
}

/// Options for [`Repository::get`](crate::Repository::get).
#[derive(Debug, Default, Clone)]
pub struct GetOptions {
    /// Extra condition the records must satisfy, besides their keys
    pub filter: Option<Clause>,

    /// Fields and relations to load. The filter and sort of the include are
    /// applied as well.
    pub include: Include,
}

impl FindOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include(mut self, include: Include) -> Self {
        self.include = include;
        self
    }

    pub fn filter(mut self, clause: Clause) -> Self {
        self.include = self.include.filter(clause);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl GetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, clause: Clause) -> Self {
        self.filter = Clause::and_opt(self.filter.take(), Some(clause));
        self
    }

    pub fn include(mut self, include: Include) -> Self {
        self.include = include;
        self
    }
}

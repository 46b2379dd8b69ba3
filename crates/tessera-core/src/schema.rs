mod builder;
pub use builder::CatalogBuilder;

mod column;
pub use column::{Column, ColumnRef, Table};

mod mapping;
pub use mapping::{Mapping, MappingBuilder};

mod model;
pub use model::{Model, ModelId, Record};

mod relation;
pub use relation::{JoinPair, Relation, RelationKind};

mod verify;

use crate::{Error, Result};

use indexmap::IndexMap;
use std::sync::Arc;

/// The sealed set of mappings a repository can query.
///
/// A catalog is built once with [`Catalog::builder`], validated, and is
/// immutable afterwards. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct Catalog {
    mappings: Arc<IndexMap<ModelId, Arc<Mapping>>>,
}

impl Catalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Returns the mapping registered for `M`.
    pub fn mapping_for<M: Model>(&self) -> Result<&Arc<Mapping>> {
        let id = ModelId::of::<M>();
        self.mapping(id).ok_or_else(|| Error::no_mapping(id.name()))
    }

    pub fn mapping(&self, id: ModelId) -> Option<&Arc<Mapping>> {
        self.mappings.get(&id)
    }

    pub fn mappings(&self) -> impl ExactSizeIterator<Item = &Arc<Mapping>> {
        self.mappings.values()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

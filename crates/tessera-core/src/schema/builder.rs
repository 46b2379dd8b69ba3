use super::{Catalog, Mapping, Model};
use crate::{Error, Result};

use indexmap::IndexMap;
use std::sync::Arc;

/// Collects mappings and seals them into a [`Catalog`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    mappings: Vec<Mapping>,
}

impl CatalogBuilder {
    /// Registers `M` using its `Model::mapping`.
    pub fn register<M: Model>(self) -> Self {
        self.mapping(M::mapping())
    }

    /// Registers a mapping built by hand.
    pub fn mapping(mut self, mapping: Mapping) -> Self {
        self.mappings.push(mapping);
        self
    }

    /// Validates every mapping and seals the catalog.
    pub fn build(self) -> Result<Catalog> {
        let mut mappings = IndexMap::with_capacity(self.mappings.len());

        for mapping in self.mappings {
            mapping.verify()?;

            let id = mapping.model;
            if mappings.insert(id, Arc::new(mapping)).is_some() {
                return Err(Error::invalid_schema(format!(
                    "`{}` is registered more than once",
                    id.name()
                )));
            }
        }

        let catalog = Catalog {
            mappings: Arc::new(mappings),
        };
        catalog.verify()?;

        Ok(catalog)
    }
}

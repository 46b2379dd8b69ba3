use super::{Repository, Shared};
use crate::db::{Connect, Pool, PoolConfig};

use tessera_core::{
    schema::{CatalogBuilder, Mapping},
    Driver, Model, Result,
};

use std::sync::Arc;

/// Registers models and opens the connection pool of a [`Repository`].
#[derive(Debug, Default)]
pub struct Builder {
    catalog: CatalogBuilder,
    pool: PoolConfig,
}

impl Builder {
    pub fn register<M: Model>(&mut self) -> &mut Self {
        self.catalog = std::mem::take(&mut self.catalog).register::<M>();
        self
    }

    /// Registers a mapping built by hand.
    pub fn mapping(&mut self, mapping: Mapping) -> &mut Self {
        self.catalog = std::mem::take(&mut self.catalog).mapping(mapping);
        self
    }

    pub fn pool_config(&mut self, config: PoolConfig) -> &mut Self {
        self.pool = config;
        self
    }

    /// Seals the catalog and opens a pool over `driver`.
    pub async fn build(&mut self, driver: impl Driver) -> Result<Repository> {
        let catalog = std::mem::take(&mut self.catalog).build()?;
        let pool = Pool::new(driver, self.pool.clone()).await?;

        Ok(Repository {
            shared: Arc::new(Shared { catalog, pool }),
        })
    }

    /// Seals the catalog and opens a pool for the database at `url`.
    pub async fn connect(&mut self, url: &str) -> Result<Repository> {
        self.build(Connect::new(url)?).await
    }
}

//! Connection pooling for database connections.

use super::Connect;

use tessera_core::{Connection, Dialect, Driver, Error, Result};

pub use deadpool::managed::Timeouts;
use deadpool::managed::PoolError;
use std::ops::{Deref, DerefMut};

/// Get the default maximum size of a pool, which is `cpu_core_count * 2`
/// including logical cores (Hyper-Threading).
fn get_default_pool_max_size() -> usize {
    deadpool::managed::PoolConfig::default().max_size
}

/// Configuration for connection pool behavior.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub max_size: usize,
    pub timeouts: Timeouts,
}

impl PoolConfig {
    /// Creates a new pool configuration with default settings.
    pub fn new() -> Self {
        Self {
            max_size: get_default_pool_max_size(),
            timeouts: Default::default(),
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A connection pool that manages database connections.
#[derive(Debug)]
pub struct Pool {
    inner: deadpool::managed::Pool<Manager>,
    dialect: &'static dyn Dialect,
}

impl Pool {
    /// Creates a connection pool from the given driver and opens a first
    /// connection, so configuration errors surface here rather than on the
    /// first query.
    pub async fn new(driver: impl Driver, config: PoolConfig) -> Result<Self> {
        let dialect = driver.dialect();

        // The driver's limit wins over the configured size
        let max_size = driver
            .max_connections()
            .map_or(config.max_size, |max| max.min(config.max_size));

        let inner = deadpool::managed::Pool::builder(Manager {
            driver: Box::new(driver),
        })
        .runtime(deadpool::Runtime::Tokio1)
        .max_size(max_size)
        .timeouts(config.timeouts)
        .build()
        .map_err(Error::connection_pool)?;

        let pool = Self { inner, dialect };
        drop(pool.get().await?);

        tracing::debug!(
            dialect = dialect.name(),
            max_size,
            "connection pool ready"
        );

        Ok(pool)
    }

    /// Creates a new connection pool from a connection URL.
    pub async fn connect(url: &str, config: PoolConfig) -> Result<Self> {
        Self::new(Connect::new(url)?, config).await
    }

    /// Retrieves a connection from the pool.
    pub async fn get(&self) -> Result<PoolConnection> {
        let connection = self.inner.get().await.map_err(|err| match err {
            // Surface the driver's own error when connecting fails
            PoolError::Backend(err) => err,
            err => Error::connection_pool(err),
        })?;

        Ok(PoolConnection { inner: connection })
    }

    /// SQL dialect of the pooled connections.
    pub fn dialect(&self) -> &'static dyn Dialect {
        self.dialect
    }
}

#[derive(Debug)]
struct Manager {
    driver: Box<dyn Driver>,
}

impl deadpool::managed::Manager for Manager {
    type Type = Box<dyn Connection>;
    type Error = Error;

    async fn create(&self) -> Result<Self::Type, Self::Error> {
        self.driver.connect().await
    }

    async fn recycle(
        &self,
        _obj: &mut Self::Type,
        _metrics: &deadpool::managed::Metrics,
    ) -> deadpool::managed::RecycleResult<Self::Error> {
        Ok(())
    }
}

/// A connection retrieved from a pool.
///
/// When dropped, the connection is returned to the pool for reuse.
pub struct PoolConnection {
    inner: deadpool::managed::Object<Manager>,
}

impl Deref for PoolConnection {
    type Target = Box<dyn Connection>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for PoolConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

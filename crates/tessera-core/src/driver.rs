mod cx;
pub use cx::{CancelToken, Cx};

mod dialect;
pub use dialect::Dialect;

mod rows;
pub use rows::Rows;

use crate::{async_trait, stmt::Value, Result};

use std::fmt::Debug;

/// Opens connections to one database.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// SQL dialect spoken by the database.
    fn dialect(&self) -> &'static dyn Dialect;

    /// Creates a new connection.
    async fn connect(&self) -> Result<Box<dyn Connection>>;

    /// Upper bound on open connections, if the database imposes one. An
    /// in-memory SQLite database, for example, only exists on a single
    /// connection.
    fn max_connections(&self) -> Option<usize> {
        None
    }
}

#[async_trait]
pub trait Connection: Debug + Send + 'static {
    /// Runs a query and returns a cursor over its rows.
    ///
    /// `sql` uses `?` placeholders, bound in order to `params`. Both the call
    /// and every row fetch must give up once `cx` is cancelled or past its
    /// deadline.
    async fn query(&mut self, cx: &Cx, sql: &str, params: &[Value]) -> Result<Rows>;

    /// Runs a statement that returns no rows, such as DDL or fixture
    /// inserts, and returns the number of rows it affected.
    async fn execute(&mut self, cx: &Cx, sql: &str, params: &[Value]) -> Result<u64>;
}

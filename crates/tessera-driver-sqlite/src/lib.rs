mod value;
use value::Value;

use rusqlite::{Connection as RusqliteConnection, InterruptHandle};
use std::{
    fmt,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tessera_core::{
    async_trait,
    driver::{Cx, Dialect, Driver, Rows},
    stmt::Value as CoreValue,
    Error, Result,
};
use tessera_sql::Flavor;
use url::Url;

#[derive(Debug)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver from a connection URL, either
    /// `sqlite::memory:` or `sqlite:<path>`.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str)
            .map_err(|err| Error::invalid_connection_url(format!("{err}; url={url_str}")))?;

        if url.scheme() != "sqlite" {
            return Err(Error::invalid_connection_url(format!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            )));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }
}

#[async_trait]
impl Driver for Sqlite {
    fn dialect(&self) -> &'static dyn Dialect {
        &Flavor::Sqlite
    }

    async fn connect(&self) -> Result<Box<dyn tessera_core::Connection>> {
        let connection = match self {
            Sqlite::File(path) => Connection::open(path)?,
            Sqlite::InMemory => Connection::in_memory()?,
        };
        Ok(Box::new(connection))
    }

    /// An in-memory database only exists on the connection that created it.
    fn max_connections(&self) -> Option<usize> {
        matches!(self, Self::InMemory).then_some(1)
    }
}

/// A SQLite connection.
///
/// rusqlite blocks, so statements run on tokio's blocking pool. A statement
/// still running when the context is cancelled or expires is interrupted.
pub struct Connection {
    connection: Arc<Mutex<RusqliteConnection>>,
    interrupt: Arc<InterruptHandle>,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection = RusqliteConnection::open_in_memory().map_err(driver_error)?;
        Ok(Self::from(connection))
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = RusqliteConnection::open(path).map_err(driver_error)?;
        Ok(Self::from(connection))
    }

    /// Runs `f` on the blocking pool, racing it against `cx`.
    async fn run_blocking<T, F>(&self, cx: &Cx, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut RusqliteConnection) -> Result<T> + Send + 'static,
    {
        let connection = self.connection.clone();
        let task_cx = cx.clone();

        let task = tokio::task::spawn_blocking(move || {
            let mut connection = connection.lock().map_err(|_| {
                Error::driver_operation_failed(std::io::Error::other(
                    "sqlite connection lock poisoned",
                ))
            })?;

            // The context may have ended while waiting for the lock
            task_cx.check()?;
            f(&mut connection)
        });

        let res = cx
            .run(async {
                match task.await {
                    Ok(res) => res,
                    Err(err) => Err(Error::driver_operation_failed(err)),
                }
            })
            .await;

        if let Err(err) = &res {
            if err.is_cancelled() || err.is_deadline_exceeded() {
                self.interrupt.interrupt();
            }
        }

        res
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("connection", &self.connection)
            .finish_non_exhaustive()
    }
}

impl From<RusqliteConnection> for Connection {
    fn from(connection: RusqliteConnection) -> Self {
        let interrupt = Arc::new(connection.get_interrupt_handle());
        Self {
            connection: Arc::new(Mutex::new(connection)),
            interrupt,
        }
    }
}

fn read_rows(
    connection: &mut RusqliteConnection,
    sql: &str,
    params: &[CoreValue],
) -> Result<Vec<Vec<CoreValue>>> {
    let mut stmt = connection.prepare_cached(sql).map_err(driver_error)?;
    let width = stmt.column_count();

    let mut rows = stmt
        .query(rusqlite::params_from_iter(params.iter().map(Value)))
        .map_err(driver_error)?;

    let mut ret = vec![];

    while let Some(row) = rows.next().map_err(driver_error)? {
        let mut items = Vec::with_capacity(width);

        for index in 0..width {
            items.push(value::from_sql(row.get_ref(index).map_err(driver_error)?)?);
        }

        ret.push(items);
    }

    Ok(ret)
}

#[async_trait]
impl tessera_core::Connection for Connection {
    async fn query(&mut self, cx: &Cx, sql: &str, params: &[CoreValue]) -> Result<Rows> {
        tracing::trace!(db.system = "sqlite", db.statement = sql, "query");

        let sql = sql.to_string();
        let params = params.to_vec();

        // Rows are buffered; each fetch checks the context again
        let rows = self
            .run_blocking(cx, move |connection| read_rows(connection, &sql, &params))
            .await?;

        Ok(Rows::from_vec(cx, rows))
    }

    async fn execute(&mut self, cx: &Cx, sql: &str, params: &[CoreValue]) -> Result<u64> {
        tracing::trace!(db.system = "sqlite", db.statement = sql, "execute");

        let sql = sql.to_string();
        let params = params.to_vec();

        self.run_blocking(cx, move |connection| {
            let mut stmt = connection.prepare_cached(&sql).map_err(driver_error)?;
            let count = stmt
                .execute(rusqlite::params_from_iter(params.iter().map(Value)))
                .map_err(driver_error)?;

            Ok(count as u64)
        })
        .await
    }
}

/// Wraps a rusqlite error, keeping SQLite's extended result code so
/// constraint violations can be classified.
fn driver_error(err: rusqlite::Error) -> Error {
    match err.sqlite_error() {
        Some(code) => {
            let code = code.extended_code.to_string();
            Error::driver_operation_failed_with_code(err, code)
        }
        None => Error::driver_operation_failed(err),
    }
}

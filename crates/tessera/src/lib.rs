pub mod db;
pub use db::{Connect, Pool, PoolConfig};

mod materialize;

mod options;
pub use options::{FindOptions, GetOptions};

mod repository;
pub use repository::{Builder, Repository};

pub use tessera_core::{
    bail,
    driver::{self, CancelToken, Connection, Cx, Dialect, Driver},
    err,
    schema::{self, Catalog, Mapping, Model},
    stmt, CompileError, Error, NotFoundError, Result,
};
pub use tessera_sql::Flavor;

pub mod driver;
pub use driver::{Connection, Cx, Dialect, Driver};

mod error;
pub use error::{ArgumentError, CompileError, Error, IntoError, NotFoundError};

pub mod schema;
pub use schema::{Catalog, Mapping, Model};

pub mod stmt;

pub type Result<T, E = Error> = core::result::Result<T, E>;

pub use async_trait::async_trait;

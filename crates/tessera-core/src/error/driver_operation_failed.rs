use super::{Error, ErrorKind};

/// Error when a database driver operation fails.
///
/// This wraps errors from the underlying database libraries (rusqlite,
/// tokio-postgres, mysql_async) for connection, query and row-fetch
/// failures. When the library exposes a native error code (SQLite extended
/// result code, PostgreSQL SQLSTATE, MySQL server error number) it is kept so
/// dialects can classify the failure.
#[derive(Debug)]
pub(super) struct DriverOperationFailed {
    pub(super) inner: Box<dyn std::error::Error + Send + Sync>,
    pub(super) code: Option<Box<str>>,
}

impl std::error::Error for DriverOperationFailed {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for DriverOperationFailed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        // Display the error and walk its source chain
        core::fmt::Display::fmt(&self.inner, f)?;
        let mut source = self.inner.source();
        while let Some(err) = source {
            write!(f, ": {}", err)?;
            source = err.source();
        }
        Ok(())
    }
}

impl Error {
    /// Creates an error from a driver operation failure.
    pub fn driver_operation_failed(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(ErrorKind::DriverOperationFailed(DriverOperationFailed {
            inner: Box::new(err),
            code: None,
        }))
    }

    /// Creates an error from a driver operation failure that carries the
    /// database's native error code.
    pub fn driver_operation_failed_with_code(
        err: impl std::error::Error + Send + Sync + 'static,
        code: impl Into<String>,
    ) -> Error {
        Error::from(ErrorKind::DriverOperationFailed(DriverOperationFailed {
            inner: Box::new(err),
            code: Some(code.into().into()),
        }))
    }

    /// Returns `true` if this error, or any error it wraps, is a driver
    /// operation failure.
    pub fn is_driver_operation_failed(&self) -> bool {
        self.find_kind(|kind| match kind {
            ErrorKind::DriverOperationFailed(_) => Some(()),
            _ => None,
        })
        .is_some()
    }

    /// Returns the native error code of the driver failure in the context
    /// chain, if the driver reported one.
    pub fn driver_code(&self) -> Option<&str> {
        self.find_kind(|kind| match kind {
            ErrorKind::DriverOperationFailed(err) => err.code.as_deref(),
            _ => None,
        })
    }
}

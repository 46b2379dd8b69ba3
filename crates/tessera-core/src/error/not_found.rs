use super::{Error, ErrorKind};

/// Returned by a batch lookup when fewer records were found than requested.
///
/// The lookup is all-or-nothing, so this error is never wrapped with extra
/// context: callers match it with [`Error::is_not_found`] or compare
/// [`Error::as_not_found`] directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotFoundError {
    pub requested: usize,
    pub found: usize,
}

impl std::error::Error for NotFoundError {}

impl core::fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "not found: requested {} records, found {}",
            self.requested, self.found
        )
    }
}

impl From<NotFoundError> for Error {
    fn from(err: NotFoundError) -> Error {
        Error::from(ErrorKind::NotFound(err))
    }
}

impl Error {
    pub fn not_found(requested: usize, found: usize) -> Error {
        NotFoundError { requested, found }.into()
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.kind(), ErrorKind::NotFound(_))
    }

    pub fn as_not_found(&self) -> Option<&NotFoundError> {
        match self.kind() {
            ErrorKind::NotFound(err) => Some(err),
            _ => None,
        }
    }
}

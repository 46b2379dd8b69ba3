use super::{Error, ErrorKind};

#[derive(Debug)]
pub(super) struct Cancelled;

#[derive(Debug)]
pub(super) struct DeadlineExceeded;

impl Error {
    /// Returned when the call's [`CancelToken`](crate::driver::CancelToken)
    /// fires before the database responds.
    pub fn cancelled() -> Error {
        ErrorKind::Cancelled(Cancelled).into()
    }

    /// Returns `true` if the call was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.root().kind(), ErrorKind::Cancelled(_))
    }

    /// Returned when the call's deadline elapses before the database
    /// responds.
    pub fn deadline_exceeded() -> Error {
        ErrorKind::DeadlineExceeded(DeadlineExceeded).into()
    }

    /// Returns `true` if the call ran past its deadline.
    pub fn is_deadline_exceeded(&self) -> bool {
        matches!(self.root().kind(), ErrorKind::DeadlineExceeded(_))
    }
}

impl std::error::Error for Cancelled {}

impl core::fmt::Display for Cancelled {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("operation cancelled")
    }
}

impl std::error::Error for DeadlineExceeded {}

impl core::fmt::Display for DeadlineExceeded {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("deadline exceeded")
    }
}

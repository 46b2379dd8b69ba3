use super::{Error, ErrorKind};

/// Error when a caller passes an argument the repository cannot work with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    /// The requested type was never registered in the catalog.
    NoMapping { type_name: &'static str },

    /// The argument is malformed.
    Invalid { message: Box<str> },
}

impl std::error::Error for ArgumentError {}

impl core::fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            ArgumentError::NoMapping { type_name } => {
                write!(f, "no mapping registered for `{type_name}`")
            }
            ArgumentError::Invalid { message } => write!(f, "invalid argument: {message}"),
        }
    }
}

impl From<ArgumentError> for Error {
    fn from(err: ArgumentError) -> Error {
        Error::from(ErrorKind::Argument(err))
    }
}

impl Error {
    /// Creates an error for a type that has no mapping in the catalog.
    pub fn no_mapping(type_name: &'static str) -> Error {
        ArgumentError::NoMapping { type_name }.into()
    }

    /// Creates an error for a malformed caller argument.
    pub fn invalid_argument(message: impl Into<String>) -> Error {
        ArgumentError::Invalid {
            message: message.into().into(),
        }
        .into()
    }

    /// Returns the argument error in the context chain, if any.
    pub fn as_argument_error(&self) -> Option<&ArgumentError> {
        self.find_kind(|kind| match kind {
            ErrorKind::Argument(err) => Some(err),
            _ => None,
        })
    }

    /// Returns `true` if no mapping was registered for the requested type.
    pub fn is_no_mapping(&self) -> bool {
        matches!(
            self.as_argument_error(),
            Some(ArgumentError::NoMapping { .. })
        )
    }
}

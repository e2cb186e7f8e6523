use std::fmt::{self, Display};

/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The provider has no usable credential, nothing was sent.
    MissingCredential,
    /// The request could not be delivered, timed out, or was answered
    /// with a non-successful status.
    Transport,
    /// The provider answered, but the body doesn't have the expected shape.
    MalformedResponse,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::MissingCredential => write!(f, "Missing credential"),
            ErrorKind::Transport => write!(f, "Transport error"),
            ErrorKind::MalformedResponse => write!(f, "Malformed response"),
        }
    }
}

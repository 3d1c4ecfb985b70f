use std::{fmt, io};

/// Type alias for the result of tag operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Kinds of errors that may occur while performing metadata operations.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// The stream doesn't start with a filetype (`ftyp`) atom.
    #[error("unsupported format")]
    UnsupportedFormat,
    /// The stream ended in the middle of an atom.
    #[error("truncated input")]
    TruncatedInput,
    /// An atom declared a content length larger than the configured ceiling.
    #[error("oversized atom ({len} bytes, maximum is {max})")]
    OversizedBox {
        /// The declared content length.
        len: u64,
        /// The configured maximum.
        max: u64,
    },
    /// A track that has to be shifted contains no chunk offset (`stco`) table.
    #[error("chunk offset table not found")]
    OffsetTableNotFound,
    /// A shifted chunk offset doesn't fit into 32 bits.
    #[error("chunk offset overflow")]
    ChunkOffsetOverflow,
    /// The atom structure is malformed.
    #[error("parse error")]
    Parsing,
    /// An IO error has occurred. Contains the original `io::Error`.
    #[error("io error: {0}")]
    Io(#[source] io::Error),
}

/// A structure able to represent any error that may occur while performing metadata operations.
pub struct Error {
    /// The kind of error.
    pub kind: ErrorKind,
    /// A human readable string describing the error.
    pub description: String,
}

impl Error {
    /// Creates a new `Error` using the error kind and description.
    pub fn new(kind: ErrorKind, description: impl Into<String>) -> Self {
        Self { kind, description: description.into() }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self { kind: ErrorKind::Io(err), description: String::new() }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.description.is_empty() {
            write!(f, "{:?}", self.kind)
        } else {
            write!(f, "{:?}: {}", self.kind, self.description)
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.description.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.kind, self.description)
        }
    }
}

//! Error type shared by surfaces and the console.

use std::fmt;
use std::io;

/// Errors raised while mutating a [`TextSurface`](crate::surface::TextSurface).
///
/// Producers never see these: the drain loop swallows them per tick and
/// reports the failure through [`DrainReport`](crate::actor::DrainReport).
#[derive(Debug)]
pub enum ConsoleError {
    /// The surface rejected a mutation because it is read-only.
    ReadOnly,
    /// A character offset lies past the end of the surface.
    OutOfRange {
        /// The offending offset.
        offset: usize,
        /// Surface length in characters.
        len: usize,
    },
    /// Writing to the underlying terminal failed.
    Io(io::Error),
    /// Host-defined surface failure.
    Surface(String),
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadOnly => write!(f, "surface is read-only"),
            Self::OutOfRange { offset, len } => {
                write!(f, "offset {offset} out of range for surface of {len} chars")
            }
            Self::Io(err) => write!(f, "IO error: {err}"),
            Self::Surface(msg) => write!(f, "surface error: {msg}"),
        }
    }
}

impl std::error::Error for ConsoleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ConsoleError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ConsoleError>;

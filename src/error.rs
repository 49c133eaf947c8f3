//! Error types for chunk decoding

use std::io;

use thiserror::Error;

use crate::chunk::FourCC;

/// Errors returned while decoding a chunk body
#[derive(Error, Debug)]
pub enum Error {
    #[error("unexpected end of chunk data while reading {field}")]
    UnexpectedEof { field: &'static str },

    #[error("unknown chunk type: {0}")]
    UnknownChunkType(FourCC),

    #[error("{tag} chunk declares {size} bytes but needs at least {minimum}")]
    SizeMismatch { tag: FourCC, size: u32, minimum: u32 },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Maps a short read to `UnexpectedEof` for `field`, keeping other IO errors as they are.
    pub(crate) fn from_read(field: &'static str, e: io::Error) -> Error {
        match e.kind() {
            io::ErrorKind::UnexpectedEof => Error::UnexpectedEof { field },
            _ => Error::Io(e),
        }
    }
}

/// Result type alias for chunk decoding
pub type Result<T> = std::result::Result<T, Error>;

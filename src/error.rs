use std::io;
use thiserror::Error;

use crate::exif::ExifTag;

type FallbackError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
    /// The image carries no Exif block at all. The image itself is still
    /// usable, it just has no metadata fields.
    #[error("no exif data found")]
    NoExifData,

    /// The decoder could not read the underlying image. Raised at the decoder
    /// boundary, before any extraction happens.
    #[error("image unreadable; {0}")]
    ImageUnreadable(FallbackError),

    #[error("parse failed; {0}")]
    ParseFailed(FallbackError),

    /// A tag code is in neither the standard nor the user-defined table.
    #[error("tag 0x{0:04x} not found in any table")]
    CatalogLookupMiss(u16),

    #[error("unrecognized exif tag 0x{0:04x}")]
    UnrecognizedTag(u16),
}

/// A normalization failure, local to one field.
///
/// When a rule fails, the entry keeps its raw value as `processed` and the
/// failure is recorded on the entry; other fields are unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{tag}: code {code} is out of range (0..{len})")]
    OutOfRange { tag: ExifTag, code: i64, len: usize },

    #[error("malformed timestamp: {0:?}")]
    MalformedTimestamp(String),

    #[error("division by zero: {0}/0")]
    DivisionByZero(i64),

    #[error("{tag}: expected {expected}, got {found}")]
    UnexpectedType {
        tag: ExifTag,
        expected: &'static str,
        found: &'static str,
    },
}

use Error::*;

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        ImageUnreadable(value.into())
    }
}

impl From<String> for Error {
    fn from(src: String) -> Error {
        ParseFailed(src.into())
    }
}

impl From<&str> for Error {
    fn from(src: &str) -> Error {
        src.to_string().into()
    }
}

#[cfg(feature = "json_dump")]
impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        ParseFailed(value.into())
    }
}

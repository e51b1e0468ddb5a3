//! Error types for reading and decoding SafeTensors headers.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout this crate.
pub type Result<T> = std::result::Result<T, HeaderError>;

/// Part of the file a short read happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// The leading 8-byte little-endian header length.
    LengthPrefix,
    /// The JSON header that follows the length prefix.
    Body,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthPrefix => f.write_str("length prefix"),
            Self::Body => f.write_str("header body"),
        }
    }
}

/// Coarse classification of a [`HeaderError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The file could not be opened or read.
    Io,
    /// The file ends before the declared header does, or the declared
    /// header length is above the configured cap.
    Truncated,
    /// The header is not JSON, or not a JSON object.
    MalformedJson,
    /// A metadata or tensor entry has the wrong shape.
    Schema,
    /// Tensor offsets are inconsistent with each other or with the file.
    Integrity,
}

/// Errors produced while reading, decoding, or validating a header.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HeaderError {
    /// The file could not be opened or its metadata read.
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Read or write failure other than a short read.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The source ended before the declared bytes were read.
    #[error("truncated {section}: expected {expected} bytes, found {actual}")]
    Truncated { section: Section, expected: u64, actual: u64 },

    /// Declared header length is above the configured cap.
    #[error("declared header length {len} exceeds the limit of {max} bytes")]
    HeaderTooLarge { len: u64, max: u64 },

    /// Header bytes are not valid JSON.
    #[error("header is not valid JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    /// Header is valid JSON but not an object.
    #[error("header must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    /// The `__metadata__` entry has the wrong shape.
    #[error("invalid `__metadata__` entry: {source}")]
    Metadata {
        #[source]
        source: serde_json::Error,
    },

    /// A tensor entry has the wrong shape.
    #[error("invalid tensor entry '{name}': {source}")]
    Tensor {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// `data_offsets` start is after its end.
    #[error("tensor '{name}' has inverted data offsets [{start}, {end})")]
    InvalidOffsets { name: String, start: u64, end: u64 },

    /// Tensor range runs past the data section.
    #[error("tensor '{name}' ends at byte {end}, past the {data_len}-byte data section")]
    OutOfBounds { name: String, end: u64, data_len: u64 },

    /// Tensor range length disagrees with its dtype and shape.
    #[error("tensor '{name}' spans {actual} bytes but its dtype and shape need {expected}")]
    SizeMismatch { name: String, expected: u64, actual: u64 },
}

impl HeaderError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Open { .. } | Self::Io(_) => ErrorKind::Io,
            Self::Truncated { .. } | Self::HeaderTooLarge { .. } => ErrorKind::Truncated,
            Self::Syntax(_) | Self::NotAnObject { .. } => ErrorKind::MalformedJson,
            Self::Metadata { .. } | Self::Tensor { .. } => ErrorKind::Schema,
            Self::InvalidOffsets { .. } | Self::OutOfBounds { .. } | Self::SizeMismatch { .. } => {
                ErrorKind::Integrity
            }
        }
    }

    /// Name of the header entry this error is about, if any.
    ///
    /// Metadata errors report the reserved `__metadata__` key.
    pub fn entry(&self) -> Option<&str> {
        match self {
            Self::Metadata { .. } => Some(crate::METADATA_KEY),
            Self::Tensor { name, .. }
            | Self::InvalidOffsets { name, .. }
            | Self::OutOfBounds { name, .. }
            | Self::SizeMismatch { name, .. } => Some(name),
            _ => None,
        }
    }
}

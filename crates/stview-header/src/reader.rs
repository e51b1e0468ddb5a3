//! Header reader: length prefix and raw JSON bytes.
//!
//! ```text
//! [0, 8)        u64 little-endian header length L
//! [8, 8 + L)    UTF-8 JSON header
//! [8 + L, EOF)  tensor data (never read here)
//! ```

use std::io::Read;

use tracing::debug;

use crate::error::{HeaderError, Result, Section};

/// Size of the little-endian length prefix.
pub const LENGTH_PREFIX_LEN: u64 = 8;

/// Largest header accepted by default. A declared length above this fails
/// before anything is allocated.
pub const DEFAULT_MAX_HEADER_LEN: u64 = 100_000_000;

// Initial buffer reservation; the buffer grows with the bytes actually read.
const INITIAL_CAPACITY: u64 = 64 * 1024;

/// Header bytes exactly as they appear in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHeader {
    /// Declared header length.
    pub len: u64,
    /// The `len` bytes after the prefix.
    pub bytes: Vec<u8>,
}

impl RawHeader {
    /// File offset where the data section begins.
    pub fn data_start(&self) -> u64 {
        LENGTH_PREFIX_LEN + self.len
    }
}

/// Read the 8-byte little-endian header length.
pub fn read_length_prefix<R: Read>(reader: &mut R) -> Result<u64> {
    let mut prefix = Vec::with_capacity(LENGTH_PREFIX_LEN as usize);
    reader.by_ref().take(LENGTH_PREFIX_LEN).read_to_end(&mut prefix)?;
    let prefix: [u8; 8] = prefix.as_slice().try_into().map_err(|_| HeaderError::Truncated {
        section: Section::LengthPrefix,
        expected: LENGTH_PREFIX_LEN,
        actual: prefix.len() as u64,
    })?;
    Ok(u64::from_le_bytes(prefix))
}

/// Reject a declared length above `max_header_len`.
pub fn check_header_len(len: u64, max_header_len: u64) -> Result<()> {
    if len > max_header_len {
        return Err(HeaderError::HeaderTooLarge { len, max: max_header_len });
    }
    Ok(())
}

/// Read exactly `len` header bytes.
pub fn read_header_body<R: Read>(reader: &mut R, len: u64) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(len.min(INITIAL_CAPACITY) as usize);
    reader.by_ref().take(len).read_to_end(&mut bytes)?;
    let actual = bytes.len() as u64;
    if actual < len {
        return Err(HeaderError::Truncated { section: Section::Body, expected: len, actual });
    }
    Ok(bytes)
}

/// Read the length prefix and the header bytes from a stream positioned at
/// the start of a SafeTensors file.
pub fn read_raw_header<R: Read>(reader: &mut R, max_header_len: u64) -> Result<RawHeader> {
    let len = read_length_prefix(reader)?;
    check_header_len(len, max_header_len)?;
    debug!("header length prefix: {} bytes", len);
    let bytes = read_header_body(reader, len)?;
    Ok(RawHeader { len, bytes })
}

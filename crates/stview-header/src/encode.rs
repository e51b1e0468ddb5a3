//! Header encoding, the inverse of the reader and decoder.
//!
//! Used to build fixtures: the output is a valid file prefix that
//! [`crate::read_raw_header`] and [`crate::decode_header`] accept.

use std::io;

use crate::error::{HeaderError, Result};
use crate::model::Header;

/// Header JSON bytes without the length prefix.
pub fn encode_header_json(header: &Header) -> Result<Vec<u8>> {
    serde_json::to_vec(header).map_err(encode_error)
}

// Serialization failures surface as I/O errors.
fn encode_error(err: serde_json::Error) -> HeaderError {
    HeaderError::Io(io::Error::other(err))
}

/// Length prefix followed by the header JSON.
pub fn encode_header(header: &Header) -> Result<Vec<u8>> {
    let json = encode_header_json(header)?;
    let mut out = Vec::with_capacity(8 + json.len());
    out.extend_from_slice(&(json.len() as u64).to_le_bytes());
    out.extend_from_slice(&json);
    Ok(out)
}

//! Offset checks against the data section.
//!
//! These run on the decoded header and the file size only; tensor bytes are
//! never read.

use tracing::debug;

use crate::dtype::{element_size, is_known};
use crate::error::{HeaderError, Result};
use crate::model::{Header, TensorInfo};

/// Bytes a tensor should occupy given its dtype and shape.
///
/// `None` when the dtype is unknown or the size overflows `u64`.
pub fn expected_byte_len(info: &TensorInfo) -> Option<u64> {
    info.num_elements()?.checked_mul(element_size(&info.dtype)?)
}

/// Check every tensor against a data section of `data_len` bytes.
///
/// Each range must end inside the section, and tensors with a known dtype
/// must span exactly `elements * element_size` bytes.
pub fn check_layout(header: &Header, data_len: u64) -> Result<()> {
    for (name, info) in header.tensors() {
        if info.end() > data_len {
            return Err(HeaderError::OutOfBounds { name: name.to_owned(), end: info.end(), data_len });
        }
        if !is_known(&info.dtype) {
            debug!("tensor '{}': unknown dtype {}, size not checked", name, info.dtype);
        }
        if let Some(expected) = expected_byte_len(info)
            && expected != info.byte_len()
        {
            return Err(HeaderError::SizeMismatch {
                name: name.to_owned(),
                expected,
                actual: info.byte_len(),
            });
        }
    }
    Ok(())
}

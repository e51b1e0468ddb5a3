//! Header decoder: JSON bytes to [`Header`].
//!
//! The buffer is parsed into a generic JSON object first, then each member
//! is classified by key and decoded strictly into either [`MetadataInfo`]
//! or [`TensorInfo`]. Failures name the offending key.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::METADATA_KEY;
use crate::error::{HeaderError, Result};
use crate::model::{Header, MetadataInfo, TensorInfo};

/// One decoded top-level member of the header object.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderEntry {
    Metadata(MetadataInfo),
    Tensor(String, TensorInfo),
}

/// Decode a raw header buffer (the bytes after the length prefix).
pub fn decode_header(bytes: &[u8]) -> Result<Header> {
    let object = parse_object(bytes)?;

    let mut metadata = None;
    let mut tensors = BTreeMap::new();
    for (key, value) in object {
        match decode_entry(key, value)? {
            HeaderEntry::Metadata(meta) => metadata = Some(meta),
            HeaderEntry::Tensor(name, info) => {
                tensors.insert(name, info);
            }
        }
    }

    debug!("decoded header: {} tensors, metadata present: {}", tensors.len(), metadata.is_some());
    if tensors.is_empty() {
        warn!("header describes no tensors");
    }

    Ok(Header { metadata, tensors })
}

/// Parse `bytes` as JSON and require a top-level object.
pub fn parse_object(bytes: &[u8]) -> Result<Map<String, Value>> {
    match serde_json::from_slice::<Value>(bytes).map_err(HeaderError::Syntax)? {
        Value::Object(map) => Ok(map),
        other => Err(HeaderError::NotAnObject { found: json_type_name(&other) }),
    }
}

/// Classify and decode a single top-level member.
pub fn decode_entry(key: String, value: Value) -> Result<HeaderEntry> {
    if key == METADATA_KEY {
        // `null` reads as an empty metadata block.
        let meta = serde_json::from_value::<Option<MetadataInfo>>(value)
            .map_err(|source| HeaderError::Metadata { source })?;
        return Ok(HeaderEntry::Metadata(meta.unwrap_or_default()));
    }

    match serde_json::from_value::<TensorInfo>(value) {
        Ok(info) => {
            check_offsets(&key, &info)?;
            Ok(HeaderEntry::Tensor(key, info))
        }
        Err(source) => Err(HeaderError::Tensor { name: key, source }),
    }
}

/// Reject `start > end`.
pub(crate) fn check_offsets(name: &str, info: &TensorInfo) -> Result<()> {
    let [start, end] = info.data_offsets;
    if start > end {
        return Err(HeaderError::InvalidOffsets { name: name.to_owned(), start, end });
    }
    Ok(())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

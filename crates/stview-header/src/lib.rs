//! SafeTensors header reader and decoder.
//!
//! A SafeTensors file starts with an 8-byte little-endian length `L`, then
//! `L` bytes of JSON describing every tensor, then the raw tensor data. This
//! crate reads and decodes the JSON header only; tensor bytes are never
//! touched.
//!
//! # Example
//!
//! ```no_run
//! use stview_header::{InspectConfig, open};
//!
//! let inspection = open("model.safetensors", &InspectConfig::default()).unwrap();
//! for (name, info) in inspection.header.tensors() {
//!     println!("{name} {} {} {}", info.dtype, info.shape_string(), info.offsets_string());
//! }
//! ```

pub mod config;
pub mod decoder;
pub mod dtype;
pub mod encode;
pub mod error;
pub mod inspect;
pub mod layout;
pub mod model;
pub mod reader;

pub use config::{ConfigError, InspectConfig};
pub use decoder::{HeaderEntry, decode_header};
pub use encode::{encode_header, encode_header_json};
pub use error::{ErrorKind, HeaderError, Result, Section};
pub use inspect::{Inspection, open};
pub use layout::check_layout;
pub use model::{Header, HeaderBuilder, MetadataInfo, TensorInfo};
pub use reader::{DEFAULT_MAX_HEADER_LEN, LENGTH_PREFIX_LEN, RawHeader, read_raw_header};

/// Reserved top-level key holding [`MetadataInfo`] instead of a tensor.
pub const METADATA_KEY: &str = "__metadata__";

/// Read and decode a header from any byte stream positioned at offset 0.
pub fn read_header<R: std::io::Read>(reader: &mut R, max_header_len: u64) -> Result<Header> {
    let raw = read_raw_header(reader, max_header_len)?;
    decode_header(&raw.bytes)
}

//! Decoded header model: optional metadata plus a name-to-tensor mapping.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::METADATA_KEY;
use crate::error::{HeaderError, Result};

/// Free-form metadata stored under the reserved `__metadata__` key.
///
/// Absent or `null` fields decode as empty values, and so does a
/// `__metadata__` value of `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataInfo {
    /// Tag naming the serialization convention (for example `"pt"`).
    #[serde(default, deserialize_with = "null_as_default")]
    pub format: String,
    /// Caller-defined string pairs.
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: BTreeMap<String, String>,
}

/// Descriptor of one tensor in the data section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TensorInfo {
    /// Element type tag, kept as written (`"F32"`, `"BF16"`, ...).
    pub dtype: String,
    /// Dimension sizes; empty for a scalar.
    pub shape: Vec<u64>,
    /// Half-open byte range `[start, end)` relative to the data section.
    pub data_offsets: [u64; 2],
}

impl TensorInfo {
    pub fn new(dtype: impl Into<String>, shape: Vec<u64>, data_offsets: [u64; 2]) -> Self {
        Self { dtype: dtype.into(), shape, data_offsets }
    }

    #[inline]
    pub fn start(&self) -> u64 {
        self.data_offsets[0]
    }

    #[inline]
    pub fn end(&self) -> u64 {
        self.data_offsets[1]
    }

    /// Number of payload bytes, `end - start` (zero if the range is inverted).
    pub fn byte_len(&self) -> u64 {
        self.end().saturating_sub(self.start())
    }

    /// Product of the shape, `1` for a scalar, `None` on overflow.
    pub fn num_elements(&self) -> Option<u64> {
        self.shape.iter().try_fold(1u64, |acc, &d| acc.checked_mul(d))
    }

    /// Shape rendered as `[2,3]`; scalars render as `[]`.
    pub fn shape_string(&self) -> String {
        let dims: Vec<String> = self.shape.iter().map(u64::to_string).collect();
        format!("[{}]", dims.join(","))
    }

    /// Offsets rendered as `[start-end]`.
    pub fn offsets_string(&self) -> String {
        format!("[{}-{}]", self.start(), self.end())
    }
}

/// A fully decoded SafeTensors header.
///
/// Tensors are keyed by name in a [`BTreeMap`], so every iteration order
/// exposed here is sorted by name. The value is immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    pub(crate) metadata: Option<MetadataInfo>,
    pub(crate) tensors: BTreeMap<String, TensorInfo>,
}

impl Header {
    /// Decode a header from its JSON bytes (without the length prefix).
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self> {
        crate::decoder::decode_header(bytes)
    }

    pub fn metadata(&self) -> Option<&MetadataInfo> {
        self.metadata.as_ref()
    }

    /// Tensors sorted by name.
    pub fn tensors(&self) -> impl ExactSizeIterator<Item = (&str, &TensorInfo)> {
        self.tensors.iter().map(|(name, info)| (name.as_str(), info))
    }

    /// Sorted tensor names.
    pub fn tensor_names(&self) -> Vec<&str> {
        self.tensors.keys().map(String::as_str).collect()
    }

    pub fn tensor(&self, name: &str) -> Option<&TensorInfo> {
        self.tensors.get(name)
    }

    /// Borrow the underlying name-to-tensor mapping.
    pub fn tensor_map(&self) -> &BTreeMap<String, TensorInfo> {
        &self.tensors
    }

    pub fn len(&self) -> usize {
        self.tensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tensors.is_empty()
    }

    /// Smallest data section that holds every tensor: the largest `end`.
    pub fn data_len(&self) -> u64 {
        self.tensors.values().map(TensorInfo::end).max().unwrap_or(0)
    }

    /// Sum of element counts, `None` if any shape (or the sum) overflows.
    pub fn total_elements(&self) -> Option<u64> {
        self.tensors.values().try_fold(0u64, |acc, t| acc.checked_add(t.num_elements()?))
    }
}

/// Serializes to the on-disk header JSON: `__metadata__` first, then tensors
/// in name order.
impl Serialize for Header {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let len = self.tensors.len() + usize::from(self.metadata.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(meta) = &self.metadata {
            map.serialize_entry(METADATA_KEY, meta)?;
        }
        for (name, info) in &self.tensors {
            map.serialize_entry(name, info)?;
        }
        map.end()
    }
}

/// Builds a [`Header`] in code, applying the same checks as the decoder.
#[derive(Debug, Clone, Default)]
pub struct HeaderBuilder {
    metadata: Option<MetadataInfo>,
    tensors: Vec<(String, TensorInfo)>,
}

impl HeaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the metadata entry, replacing any earlier one.
    pub fn with_metadata<I, K, V>(mut self, format: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let metadata = pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self.metadata = Some(MetadataInfo { format: format.into(), metadata });
        self
    }

    /// Add a tensor; a later tensor with the same name replaces it.
    pub fn with_tensor(
        mut self,
        name: impl Into<String>,
        dtype: impl Into<String>,
        shape: Vec<u64>,
        data_offsets: [u64; 2],
    ) -> Self {
        self.tensors.push((name.into(), TensorInfo::new(dtype, shape, data_offsets)));
        self
    }

    /// Finish the header.
    ///
    /// Fails if a tensor uses the reserved `__metadata__` name or has
    /// `start > end`.
    pub fn build(self) -> Result<Header> {
        let mut tensors = BTreeMap::new();
        for (name, info) in self.tensors {
            if name == METADATA_KEY {
                return Err(HeaderError::Tensor {
                    source: serde::de::Error::custom("`__metadata__` is reserved for metadata"),
                    name,
                });
            }
            crate::decoder::check_offsets(&name, &info)?;
            tensors.insert(name, info);
        }
        Ok(Header { metadata: self.metadata, tensors })
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

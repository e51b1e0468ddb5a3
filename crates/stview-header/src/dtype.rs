//! Element sizes for the SafeTensors dtype vocabulary.
//!
//! The decoder keeps `dtype` as an opaque string; this table is only used
//! by the optional layout checks.

/// Dtype tags with a known element size.
pub const KNOWN_DTYPES: &[&str] = &[
    "BOOL", "U8", "I8", "F8_E5M2", "F8_E4M3", "I16", "U16", "F16", "BF16", "I32", "U32", "F32",
    "I64", "U64", "F64",
];

/// Size in bytes of one element, or `None` for an unrecognised tag.
pub fn element_size(dtype: &str) -> Option<u64> {
    match dtype {
        "BOOL" | "U8" | "I8" | "F8_E5M2" | "F8_E4M3" => Some(1),
        "I16" | "U16" | "F16" | "BF16" => Some(2),
        "I32" | "U32" | "F32" => Some(4),
        "I64" | "U64" | "F64" => Some(8),
        _ => None,
    }
}

/// Whether `dtype` has an entry in the size table.
#[inline]
pub fn is_known(dtype: &str) -> bool {
    element_size(dtype).is_some()
}

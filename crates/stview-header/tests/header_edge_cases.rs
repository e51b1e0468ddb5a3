//! Edge-case tests for reading and decoding SafeTensors headers.
//!
//! Tests cover:
//! - the concrete metadata + tensor scenario, from bytes and from disk
//! - truncated length prefixes and bodies
//! - non-object top levels vs. syntax errors
//! - per-entry schema errors naming the offending key
//! - metadata optionality
//! - oversized length prefixes

use std::io::{Cursor, Write};

use stview_header::{
    DEFAULT_MAX_HEADER_LEN, ErrorKind, HeaderError, InspectConfig, METADATA_KEY, Section,
    decode_header, open, read_header, read_raw_header,
};

const SCENARIO_JSON: &str = r#"{"__metadata__":{"format":"pt","metadata":{"k":"v"}},"w1":{"dtype":"F32","shape":[2,3],"data_offsets":[0,24]}}"#;

fn with_prefix(json: &[u8]) -> Vec<u8> {
    let mut data = (json.len() as u64).to_le_bytes().to_vec();
    data.extend_from_slice(json);
    data
}

fn temp_file(bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[test]
fn scenario_decodes_from_stream() {
    let data = with_prefix(SCENARIO_JSON.as_bytes());
    let header = read_header(&mut Cursor::new(&data), DEFAULT_MAX_HEADER_LEN).unwrap();

    assert_eq!(header.metadata().unwrap().format, "pt");
    assert_eq!(header.tensor_names(), vec!["w1"]);
    let w1 = header.tensor("w1").unwrap();
    assert_eq!(w1.shape, vec![2, 3]);
    assert_eq!(w1.data_offsets, [0, 24]);
}

#[test]
fn scenario_decodes_from_disk_with_payload() {
    let mut data = with_prefix(SCENARIO_JSON.as_bytes());
    data.extend_from_slice(&[0u8; 24]);
    let file = temp_file(&data);

    let strict = InspectConfig { strict: true, ..Default::default() };
    let inspection = open(file.path(), &strict).unwrap();
    assert_eq!(inspection.header_len, SCENARIO_JSON.len() as u64);
    assert_eq!(inspection.data_section_len(), 24);
    assert_eq!(inspection.header.len(), 1);
}

#[test]
fn empty_object_header_has_no_tensors() {
    let header = read_header(&mut Cursor::new(with_prefix(b"{}")), DEFAULT_MAX_HEADER_LEN).unwrap();
    assert!(header.is_empty());
    assert!(header.metadata().is_none());
}

#[test]
fn unicode_tensor_names_survive() {
    let json = r#"{"模型.权重":{"dtype":"F16","shape":[1],"data_offsets":[0,2]}}"#;
    let header = decode_header(json.as_bytes()).unwrap();
    assert!(header.tensor("模型.权重").is_some());
}

// ---------------------------------------------------------------------------
// Truncation
// ---------------------------------------------------------------------------

#[test]
fn declared_100_followed_by_50_is_truncated() {
    let mut data = 100u64.to_le_bytes().to_vec();
    data.extend_from_slice(&[b'{'; 50]);

    let err = read_raw_header(&mut Cursor::new(&data), DEFAULT_MAX_HEADER_LEN).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Truncated);

    let file = temp_file(&data);
    let err = open(file.path(), &InspectConfig::default()).unwrap_err();
    assert!(matches!(err, HeaderError::Truncated { section: Section::Body, .. }));
}

#[test]
fn every_cut_inside_the_header_is_truncated() {
    let data = with_prefix(SCENARIO_JSON.as_bytes());
    for cut in 0..data.len() {
        let err = read_raw_header(&mut Cursor::new(&data[..cut]), DEFAULT_MAX_HEADER_LEN)
            .expect_err("a cut header must not decode");
        let expected_section = if cut < 8 { Section::LengthPrefix } else { Section::Body };
        match err {
            HeaderError::Truncated { section, .. } => assert_eq!(section, expected_section),
            other => panic!("cut at {cut}: unexpected error {other:?}"),
        }
    }
}

#[test]
fn seven_byte_file_is_truncated_on_disk() {
    let file = temp_file(&[0u8; 7]);
    let err = open(file.path(), &InspectConfig::default()).unwrap_err();
    assert!(matches!(err, HeaderError::Truncated { section: Section::LengthPrefix, actual: 7, .. }));
}

// ---------------------------------------------------------------------------
// Malformed JSON
// ---------------------------------------------------------------------------

#[test]
fn top_level_array_is_shape_error_not_syntax_error() {
    let err = decode_header(b"[1,2,3]").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedJson);
    assert!(matches!(err, HeaderError::NotAnObject { found: "array" }));

    let syntax = decode_header(b"[1,2,").unwrap_err();
    assert_eq!(syntax.kind(), ErrorKind::MalformedJson);
    assert!(matches!(syntax, HeaderError::Syntax(_)));
}

#[test]
fn invalid_utf8_is_a_syntax_error() {
    let err = decode_header(b"{\"\xff\":1}").unwrap_err();
    assert!(matches!(err, HeaderError::Syntax(_)));
}

#[test]
fn syntax_error_reports_position() {
    let err = decode_header(b"{\n  \"w\": ?\n}").unwrap_err();
    let HeaderError::Syntax(inner) = &err else { panic!("expected syntax error, got {err:?}") };
    assert_eq!(inner.line(), 2);
    assert!(inner.column() > 0);
}

// ---------------------------------------------------------------------------
// Schema errors
// ---------------------------------------------------------------------------

#[test]
fn bad_tensor_is_named_among_many() {
    let mut json = String::from("{");
    for i in 0..500 {
        json.push_str(&format!(
            r#""layer.{i}.weight":{{"dtype":"F32","shape":[4],"data_offsets":[{},{}]}},"#,
            i * 16,
            i * 16 + 16
        ));
    }
    json.push_str(r#""layer.bad.weight":{"dtype":"F32","shape":[4],"data_offsets":[0.5,16]}}"#);

    let err = decode_header(json.as_bytes()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Schema);
    assert_eq!(err.entry(), Some("layer.bad.weight"));
}

#[test]
fn tensor_value_must_be_an_object() {
    let err = decode_header(br#"{"w":[1,2]}"#).unwrap_err();
    assert!(matches!(err, HeaderError::Tensor { ref name, .. } if name == "w"));
}

#[test]
fn shape_must_be_an_array() {
    let err = decode_header(br#"{"w":{"dtype":"F32","shape":6,"data_offsets":[0,24]}}"#)
        .unwrap_err();
    assert_eq!(err.entry(), Some("w"));
}

#[test]
fn string_offsets_are_not_coerced() {
    let err = decode_header(br#"{"w":{"dtype":"F32","shape":[1],"data_offsets":["0","4"]}}"#)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Schema);
}

#[test]
fn offsets_beyond_i64_are_accepted() {
    let json = format!(
        r#"{{"w":{{"dtype":"U8","shape":[0],"data_offsets":[{m},{m}]}}}}"#,
        m = u64::MAX
    );
    let header = decode_header(json.as_bytes()).unwrap();
    assert_eq!(header.tensor("w").unwrap().start(), u64::MAX);
}

#[test]
fn metadata_must_be_an_object() {
    let err = decode_header(br#"{"__metadata__":"pt"}"#).unwrap_err();
    assert!(matches!(err, HeaderError::Metadata { .. }));
    assert_eq!(err.entry(), Some(METADATA_KEY));
}

#[test]
fn metadata_format_must_be_a_string() {
    let err = decode_header(br#"{"__metadata__":{"format":1}}"#).unwrap_err();
    assert!(matches!(err, HeaderError::Metadata { .. }));
}

// ---------------------------------------------------------------------------
// Metadata optionality
// ---------------------------------------------------------------------------

#[test]
fn header_without_metadata_decodes_tensors_unaffected() {
    let with = decode_header(SCENARIO_JSON.as_bytes()).unwrap();
    let without = decode_header(
        br#"{"w1":{"dtype":"F32","shape":[2,3],"data_offsets":[0,24]}}"#,
    )
    .unwrap();
    assert!(without.metadata().is_none());
    assert_eq!(with.tensor_map(), without.tensor_map());
}

#[test]
fn metadata_only_header() {
    let header = decode_header(br#"{"__metadata__":{"format":"pt"}}"#).unwrap();
    assert!(header.is_empty());
    assert_eq!(header.metadata().unwrap().format, "pt");
}

// ---------------------------------------------------------------------------
// Length cap
// ---------------------------------------------------------------------------

#[test]
fn length_above_cap_fails_fast() {
    let data = with_prefix(SCENARIO_JSON.as_bytes());
    let err = read_raw_header(&mut Cursor::new(&data), 8).unwrap_err();
    assert!(matches!(err, HeaderError::HeaderTooLarge { max: 8, .. }));
    assert_eq!(err.kind(), ErrorKind::Truncated);
}

#[test]
fn length_equal_to_cap_is_accepted() {
    let data = with_prefix(b"{}");
    read_raw_header(&mut Cursor::new(&data), 2).unwrap();
}

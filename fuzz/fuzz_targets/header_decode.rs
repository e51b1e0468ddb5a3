#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use stview_header::{decode_header, read_raw_header};

fuzz_target!(|data: &[u8]| {
    // Full path: length prefix, body, decode. Any Err is fine; only panics
    // are failures.
    if let Ok(raw) = read_raw_header(&mut Cursor::new(data), 1024 * 1024) {
        let _ = decode_header(&raw.bytes);
    }

    // Decoder alone on the whole input.
    if let Ok(header) = decode_header(data) {
        for (_, info) in header.tensors() {
            let _ = info.num_elements();
            let _ = info.shape_string();
        }
        let _ = header.data_len();
        let _ = header.total_elements();
    }
});

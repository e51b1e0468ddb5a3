// Exit codes for scripted triage
use stview_header::{ConfigError, ErrorKind, HeaderError};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_GENERIC_FAIL: i32 = 1;
pub const EXIT_USAGE: i32 = 2;
pub const EXIT_IO: i32 = 3;
pub const EXIT_TRUNCATED: i32 = 4;
pub const EXIT_MALFORMED_JSON: i32 = 5;
pub const EXIT_SCHEMA: i32 = 6;
pub const EXIT_INTEGRITY: i32 = 7;
pub const EXIT_CONFIG: i32 = 8;

/// Exit code for a header error kind.
pub fn code_for_kind(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Io => EXIT_IO,
        ErrorKind::Truncated => EXIT_TRUNCATED,
        ErrorKind::MalformedJson => EXIT_MALFORMED_JSON,
        ErrorKind::Schema => EXIT_SCHEMA,
        ErrorKind::Integrity => EXIT_INTEGRITY,
    }
}

/// Exit code for an error returned by [`crate::run`].
pub fn code_for_error(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(header_err) = cause.downcast_ref::<HeaderError>() {
            return code_for_kind(header_err.kind());
        }
        if cause.downcast_ref::<ConfigError>().is_some() {
            return EXIT_CONFIG;
        }
    }
    EXIT_GENERIC_FAIL
}

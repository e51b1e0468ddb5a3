//! Read and decode the header of a SafeTensors file on disk.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::InspectConfig;
use crate::decoder::decode_header;
use crate::error::{HeaderError, Result, Section};
use crate::layout::check_layout;
use crate::model::Header;
use crate::reader::{LENGTH_PREFIX_LEN, check_header_len, read_header_body, read_length_prefix};

/// A decoded header together with the file facts needed to interpret it.
#[derive(Debug, Clone, PartialEq)]
pub struct Inspection {
    pub path: PathBuf,
    /// Total file size in bytes. For a pipe read without `strict`, only the
    /// bytes up to the end of the header.
    pub file_len: u64,
    /// Declared JSON header length.
    pub header_len: u64,
    pub header: Header,
}

impl Inspection {
    /// File offset of the first data byte.
    pub fn data_start(&self) -> u64 {
        LENGTH_PREFIX_LEN + self.header_len
    }

    /// Bytes present after the header.
    pub fn data_section_len(&self) -> u64 {
        self.file_len.saturating_sub(self.data_start())
    }

    /// Check tensor ranges and sizes against the data section on disk.
    pub fn check_layout(&self) -> Result<()> {
        check_layout(&self.header, self.data_section_len())
    }
}

/// Open `path`, read its header, and decode it.
///
/// For regular files the declared header length is checked against both the
/// configured cap and the file size before the body is read. Pipes and other
/// streams have no size up front, so only the cap is checked and short reads
/// are caught while reading. With `config.strict` the layout is checked as
/// well. The file handle is closed before returning.
pub fn open(path: impl AsRef<Path>, config: &InspectConfig) -> Result<Inspection> {
    let path = path.as_ref();
    let open_err = |source| HeaderError::Open { path: path.to_path_buf(), source };

    let file = File::open(path).map_err(open_err)?;
    let metadata = file.metadata().map_err(open_err)?;
    let regular = metadata.is_file();
    debug!("opened {} ({} bytes, regular file: {})", path.display(), metadata.len(), regular);

    let mut reader = BufReader::new(file);
    let header_len = read_length_prefix(&mut reader)?;
    check_header_len(header_len, config.max_header_len)?;

    if regular {
        let available = metadata.len().saturating_sub(LENGTH_PREFIX_LEN);
        if header_len > available {
            return Err(HeaderError::Truncated {
                section: Section::Body,
                expected: header_len,
                actual: available,
            });
        }
    }

    let bytes = read_header_body(&mut reader, header_len)?;
    let data_start = LENGTH_PREFIX_LEN + header_len;
    let file_len = if regular {
        metadata.len()
    } else if config.strict {
        // Stream length is only known once drained.
        data_start + io::copy(&mut reader, &mut io::sink())?
    } else {
        data_start
    };
    drop(reader);

    let header = decode_header(&bytes)?;
    let inspection = Inspection { path: path.to_path_buf(), file_len, header_len, header };
    if config.strict {
        inspection.check_layout()?;
    }
    Ok(inspection)
}

//! Whole-file reads and writes for source and header files.
//!
//! Files are always read completely into memory and rewritten completely.
//! Content that is not valid UTF-8 is decoded lossily instead of failing
//! the file.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while touching files on disk.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("reading {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("writing {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read a file as text, replacing invalid UTF-8 sequences.
pub fn read_lossy(path: &Path) -> Result<String, SourceError> {
    let bytes = fs::read(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!(path = %path.display(), "decoding file lossily");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    })
}

/// Read a file if it can be read, logging and returning `None` otherwise.
pub fn try_read(path: &Path) -> Option<String> {
    match read_lossy(path) {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::warn!(error = %e, "skipping unreadable file");
            None
        }
    }
}

/// Replace the full contents of a file.
pub fn write_all(path: &Path, content: &str) -> Result<(), SourceError> {
    fs::write(path, content).map_err(|source| SourceError::Write {
        path: path.to_path_buf(),
        source,
    })
}

//! Unified error type for index persistence.

use thiserror::Error;

/// All errors that can occur while saving or loading an on-disk index.
#[derive(Error, Debug)]
pub enum IndexError {
    /// I/O error (file read/write, directory access)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file's magic bytes don't match `MIDX`.
    #[error("bad magic bytes in index file {path}: expected 0x{expected:08X}, found 0x{found:08X}")]
    BadMagic {
        path: String,
        expected: u32,
        found: u32,
    },

    /// The file declares a version this build doesn't know how to read.
    #[error("unsupported index version in {path}: expected {expected}, found {found}")]
    UnsupportedVersion {
        path: String,
        expected: u32,
        found: u32,
    },

    /// The file ended before a declared record was fully read.
    #[error("truncated index file {path}: {context}")]
    Truncated { path: String, context: String },

    /// A string field was not valid UTF-8.
    #[error("invalid UTF-8 in index file {path}: {context}")]
    InvalidUtf8 { path: String, context: String },
}

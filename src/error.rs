//! Library error type.

use std::path::PathBuf;

use crate::entry::Entry;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid IP address: {0}")]
    InvalidAddress(String),

    #[error("invalid hostname: {0}")]
    InvalidHostname(String),

    #[error("invalid alias: {0}")]
    InvalidAlias(String),

    #[error("invalid comment: {0}")]
    InvalidComment(String),

    /// `add` refused an entry that shares a name or address with `existing`.
    #[error("host entry conflicts with existing entry: {existing}")]
    Duplicate { existing: Box<Entry> },

    #[error("index {index} out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to back up {path} to {backup}: {source}")]
    Backup {
        path: PathBuf,
        backup: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create temporary file next to {target}: {source}")]
    TempFile {
        target: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write entries for {target}: {source}")]
    Write {
        target: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to set permissions for {target}: {source}")]
    Permissions {
        target: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to rename {from} to {to}: {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("platform '{0}' is not supported (supported: Linux, macOS, BSD, Windows)")]
    PlatformNotSupported(String),
}

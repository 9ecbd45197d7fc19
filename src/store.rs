//! Reading and atomically rewriting a hosts file.

use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::codec::{self, Line};
use crate::entry::Entry;
use crate::error::{Error, Result};

/// First line of the managed header.
pub const HEADER_TITLE: &str = concat!("# Managed by ", env!("CARGO_PKG_NAME"));
/// Second line of the managed header.
pub const HEADER_URL: &str = concat!("# ", env!("CARGO_PKG_REPOSITORY"));

/// Permission bits given to a freshly written file.
#[cfg(unix)]
const DEFAULT_MODE: u32 = 0o644;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Copy the current file to `<path>.backup` before replacing it.
    pub backup: bool,
    /// Start the file with the managed header and a blank line.
    pub write_header: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            backup: false,
            write_header: true,
        }
    }
}

/// Sibling path the backup is written to.
///
/// The extension is replaced by `backup`; a file already named `*.backup`
/// gets a second `.backup` appended so the backup never aliases the target.
pub fn backup_path(path: &Path) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == "backup") {
        let mut name = path.as_os_str().to_owned();
        name.push(".backup");
        return PathBuf::from(name);
    }
    path.with_extension("backup")
}

/// Read all valid entries from `path` in file order.
///
/// A missing file reads as empty. Blank, comment and malformed lines are
/// skipped; any other I/O failure is returned.
pub fn read(path: &Path) -> Result<Vec<Entry>> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "hosts file not found, starting empty");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(Error::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let mut entries = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        match codec::classify(line) {
            Line::Entry(e) => entries.push(e),
            Line::Malformed(reason) => {
                tracing::debug!(path = %path.display(), line = idx + 1, %reason, "skipping line");
            }
            Line::Blank | Line::Comment => {}
        }
    }
    tracing::debug!(path = %path.display(), count = entries.len(), "parsed hosts file");
    Ok(entries)
}

/// Replace `path` with `entries`.
///
/// The new content goes to a temporary file in the same directory which is
/// then renamed over the target, so the target is either untouched or fully
/// rewritten. The temporary file is removed on every failure path.
pub fn write(path: &Path, entries: &[Entry], options: WriteOptions) -> Result<()> {
    let exists = path.is_file();

    if options.backup && exists {
        let backup = backup_path(path);
        tracing::debug!(backup = %backup.display(), "creating backup");
        fs::copy(path, &backup).map_err(|source| Error::Backup {
            path: path.to_path_buf(),
            backup,
            source,
        })?;
    }

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    // Dropping the handle on an early return deletes the file.
    let temp = tempfile::Builder::new()
        .prefix(concat!(".", env!("CARGO_PKG_NAME"), "_tmp_"))
        .tempfile_in(dir)
        .map_err(|source| Error::TempFile {
            target: path.to_path_buf(),
            source,
        })?;

    write_content(temp.as_file(), entries, options.write_header)
        .and_then(|()| temp.as_file().sync_all())
        .map_err(|source| Error::Write {
            target: path.to_path_buf(),
            source,
        })?;

    set_permissions(temp.path(), path, exists).map_err(|source| Error::Permissions {
        target: path.to_path_buf(),
        source,
    })?;

    let temp_path = temp.path().to_path_buf();
    temp.persist(path).map_err(|e| Error::Rename {
        from: temp_path,
        to: path.to_path_buf(),
        source: e.error,
    })?;

    tracing::debug!(path = %path.display(), count = entries.len(), "wrote hosts file");
    Ok(())
}

fn write_content(file: &fs::File, entries: &[Entry], header: bool) -> std::io::Result<()> {
    let mut out = BufWriter::new(file);
    if header {
        writeln!(out, "{HEADER_TITLE}")?;
        writeln!(out, "{HEADER_URL}")?;
        writeln!(out)?;
    }
    for entry in entries {
        out.write_all(codec::encode(entry).as_bytes())?;
    }
    out.flush()
}

/// Safe default mode, then the original's permissions unless world-writable.
#[cfg(unix)]
fn set_permissions(temp: &Path, target: &Path, target_exists: bool) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(temp, fs::Permissions::from_mode(DEFAULT_MODE))?;
    if !target_exists {
        return Ok(());
    }
    let original = fs::metadata(target)?.permissions();
    if original.mode() & 0o002 != 0 {
        tracing::warn!(
            path = %target.display(),
            mode = %format!("{:o}", original.mode() & 0o7777),
            "original file is world-writable, using {:o} instead",
            DEFAULT_MODE
        );
        return Ok(());
    }
    fs::set_permissions(temp, original)
}

#[cfg(not(unix))]
fn set_permissions(temp: &Path, target: &Path, target_exists: bool) -> std::io::Result<()> {
    if target_exists {
        fs::set_permissions(temp, fs::metadata(target)?.permissions())?;
    }
    Ok(())
}

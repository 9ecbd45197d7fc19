//! Doctor command: health checks for a hosts file.

use std::collections::{BTreeMap, BTreeSet};
use std::io::ErrorKind;
use std::path::Path;

use crate::codec::{self, Line};
use crate::error::{Error, Result};

/// Result of a single check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub ok: bool,
    pub message: String,
}

impl CheckResult {
    fn pass(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Run all doctor checks against `path`.
pub fn run_checks(path: &Path) -> Result<Vec<CheckResult>> {
    let mut results = Vec::new();

    // 1. File exists
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            results.push(CheckResult::fail(format!(
                "{} does not exist; it will be created on first save.",
                path.display()
            )));
            return Ok(results);
        }
        Err(source) => {
            return Err(Error::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    results.push(CheckResult::pass(format!("Found {}", path.display())));

    // 2. Parse every line
    let mut entries = Vec::new();
    let mut malformed = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        match codec::classify(line) {
            Line::Entry(e) => entries.push(e),
            Line::Malformed(reason) => malformed.push(format!("line {}: {reason}", idx + 1)),
            Line::Blank | Line::Comment => {}
        }
    }
    if malformed.is_empty() {
        results.push(CheckResult::pass(format!("{} entries, no malformed lines.", entries.len())));
    } else {
        results.push(CheckResult::fail(format!(
            "{} entries; {} malformed line(s) will be dropped on save: {}",
            entries.len(),
            malformed.len(),
            malformed.join("; ")
        )));
    }

    // 3. Names claimed by more than one entry
    let mut owners: BTreeMap<&str, usize> = BTreeMap::new();
    for entry in &entries {
        let names: BTreeSet<&str> = entry.all_names().collect();
        for name in names {
            *owners.entry(name).or_default() += 1;
        }
    }
    let shared: Vec<&str> = owners
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(name, _)| name)
        .collect();
    if shared.is_empty() {
        results.push(CheckResult::pass("No name appears in more than one entry."));
    } else {
        results.push(CheckResult::fail(format!(
            "Names used by several entries: {}",
            shared.join(", ")
        )));
    }

    // 4. Permissions
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(path)
            .map_err(|source| Error::Read {
                path: path.to_path_buf(),
                source,
            })?
            .permissions()
            .mode();
        if mode & 0o002 != 0 {
            results.push(CheckResult::fail(format!(
                "{} is world-writable (mode {:o}).",
                path.display(),
                mode & 0o7777
            )));
        } else {
            results.push(CheckResult::pass(format!("Permissions {:o}.", mode & 0o7777)));
        }
    }

    Ok(results)
}

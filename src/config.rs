//! Configuration loading and path resolution.
//!
//! Supports HOSTSFILE_HOME env var override for testing.

use anyhow::{Context, Result};
use std::fs;
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use crate::store::WriteOptions;

/// Environment variable overriding the config directory.
pub const HOME_ENV: &str = "HOSTSFILE_HOME";

/// Paths for the hostsfile config directory.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
}

impl ConfigPaths {
    /// Build paths from base directory (e.g. ProjectDirs config dir or HOSTSFILE_HOME).
    pub fn from_base(base: PathBuf) -> Self {
        let config_file = base.join("config.toml");
        Self {
            config_dir: base,
            config_file,
        }
    }

    /// Paths for testing: use a temp dir as base.
    pub fn for_test(base: impl AsRef<Path>) -> Self {
        Self::from_base(base.as_ref().to_path_buf())
    }

    /// Get default config paths (respects HOSTSFILE_HOME).
    pub fn default_paths() -> Self {
        let base = if let Some(home) = std::env::var_os(HOME_ENV) {
            PathBuf::from(home)
        } else if let Some(dirs) = directories::ProjectDirs::from("rs", "hostsfile-rs", "hostsfile") {
            dirs.config_dir().to_path_buf()
        } else {
            PathBuf::from(".hostsfile")
        };
        Self::from_base(base)
    }
}

/// Main config.toml structure.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Config {
    /// Hosts file to edit instead of the platform default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosts_file: Option<PathBuf>,
    /// Back up the hosts file before each save.
    #[serde(default)]
    pub backup: bool,
    /// Write the managed header on save.
    #[serde(default = "default_true")]
    pub write_header: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hosts_file: None,
            backup: false,
            write_header: true,
        }
    }
}

impl Config {
    /// Load config, or defaults when config.toml does not exist.
    ///
    /// Reads under a shared lock so a concurrent `save` is never seen half-written.
    pub fn load(paths: &ConfigPaths) -> Result<Config> {
        let path = &paths.config_file;
        let mut file = match fs::File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(e).with_context(|| format!("open {}", path.display())),
        };
        fs2::FileExt::lock_shared(&file)?;
        let mut text = String::new();
        file.read_to_string(&mut text)
            .with_context(|| format!("read {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parse {}", path.display()))
    }

    /// Write config.toml, creating the config directory if needed.
    ///
    /// The file is truncated only once the exclusive lock is held.
    pub fn save(&self, paths: &ConfigPaths) -> Result<()> {
        let path = &paths.config_file;
        let text = toml::to_string_pretty(self).context("serialize config")?;
        fs::create_dir_all(&paths.config_dir)
            .with_context(|| format!("create {}", paths.config_dir.display()))?;
        let mut file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)
            .with_context(|| format!("open {}", path.display()))?;
        fs2::FileExt::lock_exclusive(&file)?;
        file.set_len(0)?;
        file.write_all(text.as_bytes())
            .with_context(|| format!("write {}", path.display()))
    }

    /// Write options for a save, with per-command overrides.
    pub fn write_options(&self, backup: bool, no_header: bool) -> WriteOptions {
        WriteOptions {
            backup: self.backup || backup,
            write_header: self.write_header && !no_header,
        }
    }

    /// Hosts file to use: explicit path, HOSTSFILE_PATH, config, platform default.
    pub fn resolve_hosts_path(&self, explicit: Option<&Path>) -> crate::Result<PathBuf> {
        if let Some(p) = explicit {
            return Ok(p.to_path_buf());
        }
        if let Some(p) = std::env::var_os(crate::platform::HOSTS_PATH_ENV) {
            return Ok(PathBuf::from(p));
        }
        if let Some(p) = &self.hosts_file {
            return Ok(p.clone());
        }
        crate::platform::default_hosts_path()
    }
}

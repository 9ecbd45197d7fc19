//! Platform default location of the hosts file.

use std::path::PathBuf;

use crate::error::{Error, Result};

/// Environment variable overriding the hosts file path (e.g. in tests).
pub const HOSTS_PATH_ENV: &str = "HOSTSFILE_PATH";

/// Trait for locating the hosts file on a platform.
pub trait PathResolver: Send + Sync {
    fn hosts_path(&self) -> PathBuf;
}

/// Linux, macOS and the BSDs.
pub struct UnixResolver;

impl PathResolver for UnixResolver {
    fn hosts_path(&self) -> PathBuf {
        PathBuf::from("/etc/hosts")
    }
}

pub struct WindowsResolver;

impl PathResolver for WindowsResolver {
    fn hosts_path(&self) -> PathBuf {
        PathBuf::from(r"C:\Windows\System32\drivers\etc\hosts")
    }
}

/// Resolver for an OS identifier as reported by `std::env::consts::OS`.
pub fn resolver_for(os: &str) -> Result<Box<dyn PathResolver>> {
    match os {
        "linux" | "macos" | "freebsd" | "openbsd" | "netbsd" | "dragonfly" | "android" | "ios"
        | "solaris" | "illumos" => Ok(Box::new(UnixResolver)),
        "windows" => Ok(Box::new(WindowsResolver)),
        other => Err(Error::PlatformNotSupported(other.to_string())),
    }
}

/// Get the hosts file path for this machine.
/// If HOSTSFILE_PATH is set, that path is used instead.
pub fn default_hosts_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(HOSTS_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }
    Ok(resolver_for(std::env::consts::OS)?.hosts_path())
}

//! hostsfile - read, edit and atomically rewrite the system hosts file.

pub mod cli;
pub mod codec;
pub mod config;
pub mod doctor;
pub mod entry;
pub mod error;
pub mod hosts;
pub mod logging;
pub mod platform;
pub mod store;

pub use entry::Entry;
pub use error::{Error, Result};
pub use hosts::{EntrySequence, Hosts};
pub use store::WriteOptions;

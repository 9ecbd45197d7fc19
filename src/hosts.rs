//! The hosts collection: a lazily loaded, editable list of entries bound to a file.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::platform;
use crate::store::{self, WriteOptions};

/// Ordered-container access to entries by position.
///
/// Every method loads the backing file first if that has not happened yet,
/// which is why they all take `&mut self` and return `Result`.
pub trait EntrySequence {
    fn len(&mut self) -> Result<usize>;

    fn is_empty(&mut self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn get(&mut self, index: usize) -> Result<&Entry>;

    /// Replace the entry at `index`, returning the previous one.
    fn set(&mut self, index: usize, entry: Entry) -> Result<Entry>;

    /// Remove and return the entry at `index`, shifting later entries down.
    fn delete(&mut self, index: usize) -> Result<Entry>;

    /// Insert before `index`; `index == len` appends.
    fn insert(&mut self, index: usize, entry: Entry) -> Result<()>;

    fn iter(&mut self) -> Result<std::slice::Iter<'_, Entry>>;
}

/// Entries of one hosts file.
///
/// Created unloaded. The first read or edit loads the file; [`Hosts::load`]
/// can be called again to throw away in-memory edits and re-read it.
/// Nothing reaches disk until [`Hosts::save`].
pub struct Hosts {
    path: PathBuf,
    entries: Option<Vec<Entry>>,
}

impl Hosts {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        tracing::debug!(path = %path.display(), "hosts collection created");
        Self {
            path,
            entries: None,
        }
    }

    /// Collection for the platform's default hosts file.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(platform::default_hosts_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.entries.is_some()
    }

    /// (Re)read the file, discarding any unsaved changes.
    pub fn load(&mut self) -> Result<()> {
        let entries = store::read(&self.path)?;
        tracing::info!(path = %self.path.display(), count = entries.len(), "loaded host entries");
        self.entries = Some(entries);
        Ok(())
    }

    fn loaded(&mut self) -> Result<&mut Vec<Entry>> {
        if self.entries.is_none() {
            self.load()?;
        }
        Ok(self.entries.get_or_insert_with(Vec::new))
    }

    pub fn entries(&mut self) -> Result<&[Entry]> {
        Ok(self.loaded()?.as_slice())
    }

    /// Every entry whose address text or any name equals `query`, in order.
    pub fn find(&mut self, query: &str) -> Result<Vec<&Entry>> {
        Ok(self.loaded()?.iter().filter(|e| e.matches(query)).collect())
    }

    pub fn find_one(&mut self, query: &str) -> Result<Option<&Entry>> {
        Ok(self.loaded()?.iter().find(|e| e.matches(query)))
    }

    pub fn contains(&mut self, query: &str) -> Result<bool> {
        Ok(self.find_one(query)?.is_some())
    }

    pub fn contains_entry(&mut self, entry: &Entry) -> Result<bool> {
        Ok(self.loaded()?.contains(entry))
    }

    /// Append `entry`.
    ///
    /// Unless `allow_duplicates` is set, fails with [`Error::Duplicate`] and
    /// leaves the list untouched when an existing entry has the same address
    /// or shares any name with `entry`.
    pub fn add(&mut self, entry: Entry, allow_duplicates: bool) -> Result<()> {
        let entries = self.loaded()?;
        if !allow_duplicates {
            if let Some(existing) = entries.iter().find(|e| e.conflicts_with(&entry)) {
                return Err(Error::Duplicate {
                    existing: Box::new(existing.clone()),
                });
            }
        }
        tracing::debug!(%entry, "added host");
        entries.push(entry);
        Ok(())
    }

    /// Remove every entry matching `query`; returns how many went.
    pub fn remove(&mut self, query: &str) -> Result<usize> {
        let entries = self.loaded()?;
        let before = entries.len();
        entries.retain(|e| {
            let hit = e.matches(query);
            if hit {
                tracing::debug!(entry = %e, "removed host");
            }
            !hit
        });
        let count = before - entries.len();
        tracing::info!(count, query, "removed matching host entries");
        Ok(count)
    }

    /// Write the in-memory entries to the bound path.
    ///
    /// Loads first if nothing was read yet. Whatever is in memory is written
    /// as is; changes made to the file by others since the load are lost.
    pub fn save(&mut self, options: WriteOptions) -> Result<()> {
        let path = self.path.clone();
        self.save_to(&path, options)
    }

    /// Write the in-memory entries to `path`, leaving the bound path unchanged.
    pub fn save_to(&mut self, path: &Path, options: WriteOptions) -> Result<()> {
        let entries = self.loaded()?;
        store::write(path, entries, options)?;
        tracing::info!(path = %path.display(), count = entries.len(), "saved hosts file");
        Ok(())
    }

    /// Run `f` against this collection and save afterwards.
    ///
    /// The save happens only when `f` returns `Ok`; an `Err` from `f` is
    /// passed through and the file is left as it was.
    pub fn edit<T, E, F>(&mut self, options: WriteOptions, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut Hosts) -> std::result::Result<T, E>,
        E: From<Error>,
    {
        match f(self) {
            Ok(value) => {
                self.save(options)?;
                Ok(value)
            }
            Err(e) => {
                tracing::debug!(path = %self.path.display(), "edit failed, not saving");
                Err(e)
            }
        }
    }
}

impl EntrySequence for Hosts {
    fn len(&mut self) -> Result<usize> {
        Ok(self.loaded()?.len())
    }

    fn get(&mut self, index: usize) -> Result<&Entry> {
        let entries = self.loaded()?;
        let len = entries.len();
        entries
            .get(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    fn set(&mut self, index: usize, entry: Entry) -> Result<Entry> {
        let entries = self.loaded()?;
        let len = entries.len();
        let slot = entries
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })?;
        Ok(std::mem::replace(slot, entry))
    }

    fn delete(&mut self, index: usize) -> Result<Entry> {
        let entries = self.loaded()?;
        if index >= entries.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: entries.len(),
            });
        }
        Ok(entries.remove(index))
    }

    fn insert(&mut self, index: usize, entry: Entry) -> Result<()> {
        let entries = self.loaded()?;
        if index > entries.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: entries.len(),
            });
        }
        entries.insert(index, entry);
        Ok(())
    }

    fn iter(&mut self) -> Result<std::slice::Iter<'_, Entry>> {
        Ok(self.loaded()?.iter())
    }
}

impl fmt::Debug for Hosts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Hosts");
        s.field("path", &self.path);
        match &self.entries {
            Some(entries) => s.field("entries", &entries.len()),
            None => s.field("loaded", &false),
        };
        s.finish()
    }
}

impl fmt::Display for Hosts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hosts file: {}", self.path.display())
    }
}

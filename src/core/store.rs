//! Flat-file store
//!
//! The whole knowledge base is one UTF-8 text file. There is no locking:
//! overlapping writers interleave and the last one wins.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use crate::core::error::StoreError;

/// Step used when a write leaves the mtime unchanged
const MTIME_BUMP: Duration = Duration::from_millis(1);

/// Handle to the backing text file
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last modification time, `None` when the file cannot be stat'ed
    pub fn modified(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).and_then(|m| m.modified()).ok()
    }

    /// Read the whole store, `None` when it is missing or unreadable
    pub fn read(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Some(text),
            Err(e) => {
                log::warn!("Store {} unavailable: {}", self.path.display(), e);
                None
            }
        }
    }

    /// Read the whole store, empty when unavailable
    pub fn read_or_empty(&self) -> String {
        self.read().unwrap_or_default()
    }

    /// Append a new section as `\n\n# <name>\n\n<body>\n`
    ///
    /// Name and body are trimmed first. A blank name, or one spanning
    /// several lines, is rejected without touching the file.
    pub fn append_section(&self, name: &str, body: &str) -> Result<(), StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::Validation(
                "Application name required".to_string(),
            ));
        }
        if name.contains(['\n', '\r']) {
            return Err(StoreError::Validation(
                "Application name must be a single line".to_string(),
            ));
        }

        let entry = format!("\n\n# {}\n\n{}\n", name, body.trim());

        self.write_with(|path| {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            file.write_all(entry.as_bytes())
        })?;

        log::info!("Appended section '{}' to {}", name, self.path.display());
        Ok(())
    }

    /// Overwrite the store with `text` verbatim
    pub fn replace_all(&self, text: &str) -> Result<(), StoreError> {
        self.write_with(|path| fs::write(path, text))?;

        log::info!(
            "Replaced {} ({} bytes)",
            self.path.display(),
            text.len()
        );
        Ok(())
    }

    /// Run a write and make sure readers can see it changed the mtime
    fn write_with<F>(&self, write: F) -> Result<(), StoreError>
    where
        F: FnOnce(&Path) -> io::Result<()>,
    {
        let before = self.modified();

        write(&self.path).map_err(|source| {
            log::error!("Write to {} failed: {}", self.path.display(), source);
            StoreError::Io {
                path: self.path.clone(),
                source,
            }
        })?;

        if let Some(before) = before {
            if let Err(e) = self.ensure_newer_than(before) {
                log::warn!(
                    "Could not bump modification time of {}: {}",
                    self.path.display(),
                    e
                );
            }
        }

        Ok(())
    }

    /// Coarse filesystem clocks can report the old mtime after a write
    fn ensure_newer_than(&self, before: SystemTime) -> io::Result<()> {
        let after = fs::metadata(&self.path)?.modified()?;
        if after > before {
            return Ok(());
        }

        let file = OpenOptions::new().write(true).open(&self.path)?;
        file.set_modified(before + MTIME_BUMP)
    }
}

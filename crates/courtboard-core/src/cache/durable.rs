//! Durable tier of the logo cache
//!
//! A single named slot holding the whole serialized snapshot. There is no
//! partial-update primitive: callers read the slot, modify, and write it back.

use crate::error::CoreError;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};

/// File name of the logo snapshot inside the cache directory
pub const LOGO_SLOT_FILE: &str = "team-logos.json";

/// Single-slot persistent store
pub trait DurableStore: Send + Sync {
    /// Read the raw slot contents, `None` if the slot does not exist
    fn load(&self) -> Result<Option<String>, CoreError>;

    /// Replace the slot contents
    fn save(&self, contents: &str) -> Result<(), CoreError>;

    /// Delete the slot
    fn remove(&self) -> Result<(), CoreError>;
}

/// Slot stored as a JSON file on disk
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Slot at `<cache_dir>/team-logos.json`
    pub fn in_dir(cache_dir: &Path) -> Self {
        Self::new(cache_dir.join(LOGO_SLOT_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DurableStore for FileSlot {
    fn load(&self) -> Result<Option<String>, CoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(CoreError::FileRead {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn save(&self, contents: &str) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| CoreError::FileWrite {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&self.path, contents).map_err(|source| CoreError::FileWrite {
            path: self.path.clone(),
            source,
        })
    }

    fn remove(&self) -> Result<(), CoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(CoreError::FileRemove {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

/// Process-local slot, used when persistence is disabled and in tests
#[derive(Debug, Default)]
pub struct MemorySlot {
    contents: RwLock<Option<String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot pre-seeded with raw contents
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: RwLock::new(Some(contents.into())),
        }
    }
}

impl DurableStore for MemorySlot {
    fn load(&self) -> Result<Option<String>, CoreError> {
        Ok(self.contents.read().clone())
    }

    fn save(&self, contents: &str) -> Result<(), CoreError> {
        *self.contents.write() = Some(contents.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), CoreError> {
        *self.contents.write() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_slot_lifecycle() {
        let dir = tempdir().unwrap();
        let slot = FileSlot::in_dir(&dir.path().join("nested"));

        assert!(slot.load().unwrap().is_none());

        slot.save("{}").unwrap();
        assert_eq!(slot.load().unwrap().as_deref(), Some("{}"));
        assert!(slot.path().ends_with(LOGO_SLOT_FILE));

        slot.remove().unwrap();
        assert!(slot.load().unwrap().is_none());

        // Removing a missing slot is not an error
        slot.remove().unwrap();
    }

    #[test]
    fn test_memory_slot_lifecycle() {
        let slot = MemorySlot::with_contents("seed");
        assert_eq!(slot.load().unwrap().as_deref(), Some("seed"));

        slot.save("next").unwrap();
        assert_eq!(slot.load().unwrap().as_deref(), Some("next"));

        slot.remove().unwrap();
        assert!(slot.load().unwrap().is_none());
    }
}

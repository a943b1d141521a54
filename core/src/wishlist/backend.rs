// vitrine_core/src/wishlist/backend.rs

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use parking_lot::Mutex;

use crate::error::{Result, StoreError};

/// One durable key/value entry holding the serialized wishlist.
///
/// Operations are synchronous; the payload is a small JSON array and every
/// mutation rewrites it wholesale.
pub trait WishlistBackend: Send + Sync + 'static {
  /// The stored payload, or `None` when nothing has been written yet.
  fn load(&self) -> Result<Option<String>>;
  fn store(&self, payload: &str) -> Result<()>;
}

/// Wishlist entry stored as a file on disk.
pub struct FileBackend {
  path: PathBuf,
}

impl FileBackend {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &PathBuf {
    &self.path
  }
}

impl WishlistBackend for FileBackend {
  fn load(&self) -> Result<Option<String>> {
    match fs::read_to_string(&self.path) {
      Ok(payload) => Ok(Some(payload)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(StoreError::Storage {
        message: format!("Could not read '{}': {}", self.path.display(), e),
      }),
    }
  }

  fn store(&self, payload: &str) -> Result<()> {
    if let Some(parent) = self.path.parent() {
      if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent).map_err(|e| StoreError::Storage {
          message: format!("Could not create '{}': {}", parent.display(), e),
        })?;
      }
    }
    fs::write(&self.path, payload).map_err(|e| StoreError::Storage {
      message: format!("Could not write '{}': {}", self.path.display(), e),
    })
  }
}

/// Volatile backend for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryBackend {
  cell: Mutex<Option<String>>,
}

impl MemoryBackend {
  pub fn new() -> Self {
    Self::default()
  }
}

impl WishlistBackend for MemoryBackend {
  fn load(&self) -> Result<Option<String>> {
    Ok(self.cell.lock().clone())
  }

  fn store(&self, payload: &str) -> Result<()> {
    *self.cell.lock() = Some(payload.to_string());
    Ok(())
  }
}

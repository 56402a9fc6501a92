//! Single-slot credential storage.
//!
//! The session controller and the API client never touch the disk directly;
//! they share a [`CredentialStore`] handed to them at construction. At most
//! one credential is stored at a time, under [`CREDENTIAL_KEY`], and `set`
//! overwrites whatever was there.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Fixed key (file name) the credential is stored under.
pub const CREDENTIAL_KEY: &str = "token";

/// Errors that can occur while reading or writing the credential.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("credential storage I/O error at {path}: {source}")]
    Io {
        /// Path that was being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// The stored credential is not valid UTF-8.
    #[error("stored credential at {0} is not valid UTF-8")]
    NotUtf8(PathBuf),
}

/// Capability to persist the session credential.
pub trait CredentialStore: Send + Sync {
    /// Read the stored credential, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be read.
    fn get(&self) -> Result<Option<SecretString>, StorageError>;

    /// Store a credential, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be written.
    fn set(&self, credential: &SecretString) -> Result<(), StorageError>;

    /// Remove the stored credential. Clearing an empty store succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be written.
    fn clear(&self) -> Result<(), StorageError>;
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-process store, used by tests and throwaway shell sessions.
#[derive(Default)]
pub struct MemoryStore {
    slot: Mutex<Option<SecretString>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `credential`.
    #[must_use]
    pub fn with_credential(credential: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(SecretString::from(credential.into()))),
        }
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let occupied = self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some();
        f.debug_struct("MemoryStore")
            .field("occupied", &occupied)
            .finish()
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self) -> Result<Option<SecretString>, StorageError> {
        Ok(self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn set(&self, credential: &SecretString) -> Result<(), StorageError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        Ok(())
    }
}

// =============================================================================
// FileStore
// =============================================================================

/// Store backed by a single file named [`CREDENTIAL_KEY`] in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the credential file.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.join(CREDENTIAL_KEY)
    }

    fn io_error(path: &Path, source: io::Error) -> StorageError {
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl CredentialStore for FileStore {
    fn get(&self) -> Result<Option<SecretString>, StorageError> {
        let path = self.path();
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Self::io_error(&path, e)),
        };
        let text = String::from_utf8(bytes).map_err(|_| StorageError::NotUtf8(path.clone()))?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        Ok(Some(SecretString::from(trimmed.to_owned())))
    }

    fn set(&self, credential: &SecretString) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|e| Self::io_error(&self.dir, e))?;

        let path = self.path();
        let tmp = self.dir.join(format!(".{CREDENTIAL_KEY}.tmp"));

        let mut file = open_private(&tmp).map_err(|e| Self::io_error(&tmp, e))?;
        file.write_all(credential.expose_secret().as_bytes())
            .and_then(|()| file.sync_all())
            .map_err(|e| Self::io_error(&tmp, e))?;
        drop(file);

        fs::rename(&tmp, &path).map_err(|e| Self::io_error(&path, e))?;
        tracing::debug!(path = %path.display(), "Credential stored");
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let path = self.path();
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Credential removed");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(&path, e)),
        }
    }
}

/// Open a file for writing, readable only by the owner on unix.
fn open_private(path: &Path) -> io::Result<fs::File> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_owned())
    }

    fn exposed(store: &dyn CredentialStore) -> Option<String> {
        store
            .get()
            .unwrap()
            .map(|s| s.expose_secret().to_owned())
    }

    #[test]
    fn test_memory_store_single_slot() {
        let store = MemoryStore::new();
        assert_eq!(exposed(&store), None);

        store.set(&secret("first")).unwrap();
        store.set(&secret("second")).unwrap();
        assert_eq!(exposed(&store).as_deref(), Some("second"));

        store.clear().unwrap();
        assert_eq!(exposed(&store), None);
        store.clear().unwrap();
    }

    #[test]
    fn test_memory_store_debug_hides_value() {
        let store = MemoryStore::with_credential("super-secret-token");
        let debug = format!("{store:?}");
        assert!(debug.contains("occupied: true"));
        assert!(!debug.contains("super-secret-token"));
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));
        assert_eq!(exposed(&store), None);

        store.set(&secret("abc.def.ghi")).unwrap();
        assert_eq!(exposed(&store).as_deref(), Some("abc.def.ghi"));
        assert!(store.path().ends_with(CREDENTIAL_KEY));

        store.set(&secret("new.token.value")).unwrap();
        assert_eq!(exposed(&store).as_deref(), Some("new.token.value"));

        store.clear().unwrap();
        assert_eq!(exposed(&store), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_file_store_clear_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_blank_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        fs::write(store.path(), "  \n").unwrap();
        assert_eq!(exposed(&store), None);
    }

    #[test]
    fn test_file_store_rejects_non_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        fs::write(store.path(), [0xff, 0xfe, 0x00]).unwrap();
        assert!(matches!(store.get(), Err(StorageError::NotUtf8(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_owner_only_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.set(&secret("a.b.c")).unwrap();
        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}

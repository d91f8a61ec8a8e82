use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::domain::types::AssetName;

/// Errors raised by an [`AssetStore`].
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(AssetName),
    #[error("asset storage failed for {name}: {source}")]
    Io {
        name: AssetName,
        #[source]
        source: io::Error,
    },
}

pub type AssetResult<T> = Result<T, AssetError>;

/// Flat storage of image files addressed by [`AssetName`].
pub trait AssetStore {
    /// Store `bytes` under `name`, replacing any previous content atomically.
    fn write(&self, name: &AssetName, bytes: &[u8]) -> AssetResult<()>;
    /// Whether a file called `name` is currently stored.
    fn exists(&self, name: &AssetName) -> bool;
    /// Remove `name` if present. Returns `false` when there was nothing to remove.
    fn delete(&self, name: &AssetName) -> AssetResult<bool>;
    /// Read the stored bytes of `name`.
    fn read(&self, name: &AssetName) -> AssetResult<Vec<u8>>;
}

/// [`AssetStore`] keeping every file directly inside one root directory.
#[derive(Debug, Clone)]
pub struct FsAssetStore {
    root: PathBuf,
}

impl FsAssetStore {
    /// Opens the store, creating the root directory when it is missing.
    pub fn new(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_of(&self, name: &AssetName) -> PathBuf {
        self.root.join(name.as_str())
    }
}

impl AssetStore for FsAssetStore {
    fn write(&self, name: &AssetName, bytes: &[u8]) -> AssetResult<()> {
        let io_err = |source: io::Error| AssetError::Io {
            name: name.clone(),
            source,
        };

        // Temp files start with a dot, so they can never shadow a stored name.
        let mut staged = NamedTempFile::new_in(&self.root).map_err(io_err)?;
        staged.write_all(bytes).map_err(io_err)?;
        staged.as_file().sync_all().map_err(io_err)?;
        staged
            .persist(self.path_of(name))
            .map_err(|e| io_err(e.error))?;

        log::debug!("Stored asset {name} ({} bytes)", bytes.len());
        Ok(())
    }

    fn exists(&self, name: &AssetName) -> bool {
        self.path_of(name).is_file()
    }

    fn delete(&self, name: &AssetName) -> AssetResult<bool> {
        match fs::remove_file(self.path_of(name)) {
            Ok(()) => {
                log::debug!("Removed asset {name}");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(AssetError::Io {
                name: name.clone(),
                source,
            }),
        }
    }

    fn read(&self, name: &AssetName) -> AssetResult<Vec<u8>> {
        match fs::read(self.path_of(name)) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(AssetError::NotFound(name.clone()))
            }
            Err(source) => Err(AssetError::Io {
                name: name.clone(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn name(value: &str) -> AssetName {
        AssetName::new(value).unwrap()
    }

    #[test]
    fn creates_missing_root() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("uploads");
        let store = FsAssetStore::new(&root).unwrap();
        assert!(store.root().is_dir());
    }

    #[test]
    fn write_then_read() {
        let dir = TempDir::new().unwrap();
        let store = FsAssetStore::new(dir.path()).unwrap();

        store.write(&name("a.png"), b"first").unwrap();
        assert!(store.exists(&name("a.png")));
        assert_eq!(store.read(&name("a.png")).unwrap(), b"first");

        // A retried write replaces the content whole.
        store.write(&name("a.png"), b"second").unwrap();
        assert_eq!(store.read(&name("a.png")).unwrap(), b"second");
    }

    #[test]
    fn write_leaves_no_staging_files() {
        let dir = TempDir::new().unwrap();
        let store = FsAssetStore::new(dir.path()).unwrap();
        store.write(&name("a.png"), b"bytes").unwrap();

        let entries = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(entries, vec!["a.png".to_string()]);
    }

    #[test]
    fn delete_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = FsAssetStore::new(dir.path()).unwrap();
        store.write(&name("a.gif"), b"gif").unwrap();

        assert!(store.delete(&name("a.gif")).unwrap());
        assert!(!store.exists(&name("a.gif")));
        assert!(!store.delete(&name("a.gif")).unwrap());
    }

    #[test]
    fn reading_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = FsAssetStore::new(dir.path()).unwrap();

        let err = store.read(&name("missing.jpg")).unwrap_err();
        assert!(matches!(err, AssetError::NotFound(n) if n == "missing.jpg"));
        assert!(!store.exists(&name("missing.jpg")));
    }
}

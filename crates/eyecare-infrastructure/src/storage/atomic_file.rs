//! Atomic file operations for small typed documents.
//!
//! Every write goes to a temporary sibling, is fsynced, then renamed over the
//! target under an exclusive lock, so readers see either the old document or
//! the new one and never a torn write.

use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Errors that can occur during atomic file operations.
#[derive(Debug)]
pub enum StorageError {
    /// File I/O error.
    IoError(std::io::Error),
    /// JSON serialization/deserialization error.
    JsonError(serde_json::Error),
    /// TOML parse error.
    TomlError(toml::de::Error),
    /// TOML serialization error.
    TomlSerError(toml::ser::Error),
    /// File locking error.
    LockError(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::IoError(e) => write!(f, "I/O error: {}", e),
            StorageError::JsonError(e) => write!(f, "JSON error: {}", e),
            StorageError::TomlError(e) => write!(f, "TOML parse error: {}", e),
            StorageError::TomlSerError(e) => write!(f, "TOML serialization error: {}", e),
            StorageError::LockError(e) => write!(f, "Lock error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::IoError(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::JsonError(e)
    }
}

impl From<toml::de::Error> for StorageError {
    fn from(e: toml::de::Error) -> Self {
        StorageError::TomlError(e)
    }
}

impl From<toml::ser::Error> for StorageError {
    fn from(e: toml::ser::Error) -> Self {
        StorageError::TomlSerError(e)
    }
}

impl From<StorageError> for eyecare_core::EyecareError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::IoError(io) => io.into(),
            StorageError::JsonError(json) => json.into(),
            StorageError::TomlError(toml) => toml.into(),
            StorageError::TomlSerError(toml) => toml.into(),
            StorageError::LockError(message) => eyecare_core::EyecareError::storage(message),
        }
    }
}

/// On-disk encoding of an [`AtomicFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

/// A handle to one typed document on disk.
///
/// Responsibilities:
/// - **File locking** (exclusive lock while writing or removing)
/// - **Atomic write** (tmp file + fsync + rename)
/// - **Encoding** (JSON or TOML)
///
/// Does NOT:
/// - Cache contents
/// - Know what the document means
pub struct AtomicFile<T> {
    path: PathBuf,
    format: FileFormat,
    /// Unix permission bits applied to the written file.
    mode: Option<u32>,
    _phantom: PhantomData<T>,
}

impl<T> AtomicFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf, format: FileFormat) -> Self {
        Self {
            path,
            format,
            mode: None,
            _phantom: PhantomData,
        }
    }

    /// Restricts the file to the given Unix mode (e.g. `0o600`) on every write.
    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Loads the document.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Loaded and decoded
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or decode
    pub fn load(&self) -> Result<Option<T>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let value = match self.format {
            FileFormat::Json => serde_json::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)?,
        };
        Ok(Some(value))
    }

    /// Writes the document atomically.
    pub fn save(&self, value: &T) -> Result<(), StorageError> {
        let _lock = FileLock::acquire(&self.path)?;
        self.write_unlocked(value)
    }

    /// Deletes the document. Succeeds when it is already absent.
    pub fn remove(&self) -> Result<(), StorageError> {
        let _lock = FileLock::acquire(&self.path)?;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_unlocked(&self, value: &T) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let contents = match self.format {
            FileFormat::Json => serde_json::to_string_pretty(value)?,
            FileFormat::Toml => toml::to_string_pretty(value)?,
        };

        let tmp_path = self.temp_path()?;
        let result = self
            .write_temp(&tmp_path, contents.as_bytes())
            .and_then(|()| fs::rename(&tmp_path, &self.path));
        if let Err(e) = result {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        Ok(())
    }

    /// Writes and fsyncs the temp file; it carries `mode` from creation on.
    fn write_temp(&self, tmp_path: &Path, contents: &[u8]) -> std::io::Result<()> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        if let Some(mode) = self.mode {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(mode);
        }
        let mut tmp_file = options.open(tmp_path)?;

        // A leftover temp file keeps its old bits; `mode` only applies on create.
        #[cfg(unix)]
        if let Some(mode) = self.mode {
            use std::os::unix::fs::PermissionsExt;
            tmp_file.set_permissions(fs::Permissions::from_mode(mode))?;
        }

        tmp_file.write_all(contents)?;
        tmp_file.sync_all()
    }

    fn temp_path(&self) -> Result<PathBuf, StorageError> {
        let parent = self.path.parent().ok_or_else(|| {
            StorageError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no parent directory",
            ))
        })?;
        let file_name = self.path.file_name().ok_or_else(|| {
            StorageError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no file name",
            ))
        })?;
        Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
    }
}

/// Exclusive lock guard; the lock file is removed on drop.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, StorageError> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| StorageError::LockError(format!("Failed to acquire lock: {}", e)))?;
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Doc {
        name: String,
        count: u32,
    }

    fn doc() -> Doc {
        Doc {
            name: "test".to_string(),
            count: 42,
        }
    }

    #[test]
    fn test_json_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::<Doc>::new(temp_dir.path().join("doc.json"), FileFormat::Json);

        file.save(&doc()).unwrap();
        assert_eq!(file.load().unwrap(), Some(doc()));
    }

    #[test]
    fn test_toml_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::<Doc>::new(temp_dir.path().join("doc.toml"), FileFormat::Toml);

        file.save(&doc()).unwrap();
        let raw = fs::read_to_string(file.path()).unwrap();
        assert!(raw.contains("count = 42"));
        assert_eq!(file.load().unwrap(), Some(doc()));
    }

    #[test]
    fn test_load_missing_or_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.json");
        let file = AtomicFile::<Doc>::new(path.clone(), FileFormat::Json);
        assert!(file.load().unwrap().is_none());

        fs::write(&path, "  \n").unwrap();
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_invalid_content_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.json");
        fs::write(&path, "{ invalid json").unwrap();
        let file = AtomicFile::<Doc>::new(path, FileFormat::Json);
        assert!(matches!(file.load(), Err(StorageError::JsonError(_))));
    }

    #[test]
    fn test_no_temp_or_lock_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.json");
        let file = AtomicFile::<Doc>::new(path.clone(), FileFormat::Json);
        file.save(&doc()).unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join(".doc.json.tmp").exists());
        assert!(!temp_dir.path().join("doc.lock").exists());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::<Doc>::new(temp_dir.path().join("doc.json"), FileFormat::Json);
        file.save(&doc()).unwrap();

        file.remove().unwrap();
        assert!(!file.exists());
        file.remove().unwrap();
    }

    #[test]
    fn test_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("doc.json");
        let file = AtomicFile::<Doc>::new(path, FileFormat::Json);
        file.save(&doc()).unwrap();
        assert!(file.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_mode_is_applied() {
        use std::os::unix::fs::PermissionsExt;
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::<Doc>::new(temp_dir.path().join("doc.json"), FileFormat::Json)
            .with_mode(0o600);
        file.save(&doc()).unwrap();
        let mode = fs::metadata(file.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_leftover_temp_file_is_restricted_before_write() {
        use std::os::unix::fs::PermissionsExt;
        let temp_dir = TempDir::new().unwrap();
        let tmp_path = temp_dir.path().join(".doc.json.tmp");
        fs::write(&tmp_path, "stale").unwrap();
        fs::set_permissions(&tmp_path, fs::Permissions::from_mode(0o644)).unwrap();

        let file = AtomicFile::<Doc>::new(temp_dir.path().join("doc.json"), FileFormat::Json)
            .with_mode(0o600);
        file.save(&doc()).unwrap();

        let mode = fs::metadata(file.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert!(!tmp_path.exists());
    }

    #[test]
    fn test_failed_write_removes_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.json");
        // A non-empty directory at the target makes the rename fail.
        fs::create_dir(&path).unwrap();
        fs::write(path.join("occupied"), "x").unwrap();

        let file = AtomicFile::<Doc>::new(path, FileFormat::Json);
        assert!(matches!(file.save(&doc()), Err(StorageError::IoError(_))));
        assert!(!temp_dir.path().join(".doc.json.tmp").exists());
    }
}

//! Atomic file primitives shared by the JSON and TOML stores.
//!
//! - **Atomicity**: writes go to a uniquely named sibling tmp file that is renamed over the target
//! - **Isolation**: read-modify-write cycles hold an exclusive lock on `<path>.lock`
//! - **Durability**: explicit fsync before rename

use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes `bytes` to `path` via tmp file + atomic rename, creating the parent
/// directory when needed.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !parent.exists() {
        fs::create_dir_all(parent)?;
    }

    let mut tmp_file = NamedTempFile::new_in(parent)?;
    tmp_file.write_all(bytes)?;
    tmp_file.as_file().sync_all()?;
    tmp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Reads `path` as text. Missing or blank files yield `None`.
pub(crate) fn read_non_empty(path: &Path) -> std::io::Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(content))
}

/// An exclusive lock on `<path>.lock`, released when dropped.
///
/// The lock file itself is never deleted: unlinking it while held would let a
/// later writer lock a fresh inode while a waiter still locks the old one.
pub(crate) struct FileLock {
    file: File,
}

impl FileLock {
    /// Blocks until the lock next to `path` is acquired.
    pub(crate) fn acquire(path: &Path) -> std::io::Result<Self> {
        use fs2::FileExt;

        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;
        file.lock_exclusive()?;

        Ok(FileLock { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        use fs2::FileExt;

        if let Err(e) = self.file.unlock() {
            tracing::warn!(error = %e, "Failed to release storage lock");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_creates_parent_and_leaves_no_tmp() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("store.json");

        write_atomic(&path, b"{}").unwrap();
        write_atomic(&path, b"{\"a\":\"1\"}").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"a":"1"}"#);
        let names: Vec<_> = fs::read_dir(temp_dir.path().join("nested"))
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("store.json")]);
    }

    #[test]
    fn test_read_non_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blank.json");

        assert_eq!(read_non_empty(&path).unwrap(), None);
        fs::write(&path, "  \n").unwrap();
        assert_eq!(read_non_empty(&path).unwrap(), None);
        fs::write(&path, "{}").unwrap();
        assert_eq!(read_non_empty(&path).unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_lock_file_outlives_guard_and_is_reacquirable() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");

        drop(FileLock::acquire(&path).unwrap());
        assert!(temp_dir.path().join("store.lock").exists());

        let _again = FileLock::acquire(&path).unwrap();
    }
}

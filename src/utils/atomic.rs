//! Atomic file operations
//!
//! Store documents are always replaced whole:
//!
//! 1. Write to a temporary file (.tmp) next to the target
//! 2. Call sync_all() to flush to disk
//! 3. Rename temp file to final path (atomic on most filesystems)
//!
//! A reader therefore sees either the previous document or the new one,
//! never a partial write.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

/// Atomically replace a document on disk
///
/// # Arguments
///
/// * `path` - Target document (`events.json` or `music.json`)
/// * `content` - Full serialized document
///
/// # Example
///
/// ```ignore
/// atomic_write("data/events.json", "[]")?;
/// ```
///
/// # Returns
///
/// * `Ok(())` once the new document is in place
/// * `Err` if any step fails; the previous document is left as it was
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> io::Result<()> {
    let path = path.as_ref();
    let temp_path = path.with_extension("tmp");

    // Data directory may not exist before the first write
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    // Write to temp file
    let mut file = File::create(&temp_path)?;
    file.write_all(content.as_bytes())?;

    // Sync to disk before the rename makes it visible
    file.sync_all()?;
    drop(file);

    // Atomic rename; on failure don't leave the temp file behind
    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    Ok(())
}

/// Remove `.tmp` files left behind by an interrupted write
///
/// # Arguments
///
/// * `dir` - Data directory to scan (not recursive)
///
/// # Returns
///
/// * Number of files removed; a missing directory counts as zero
pub fn cleanup_temp_files<P: AsRef<Path>>(dir: P) -> io::Result<usize> {
    let dir = dir.as_ref();
    if !dir.exists() {
        return Ok(0);
    }

    let mut cleaned = 0;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().map(|e| e == "tmp").unwrap_or(false) {
            fs::remove_file(&path)?;
            cleaned += 1;
        }
    }

    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_replaces_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("events.json");

        atomic_write(&path, "[]").unwrap();
        atomic_write(&path, "[{\"id\":\"1\"}]").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[{\"id\":\"1\"}]");
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("nested").join("music.json");

        atomic_write(&path, "{}").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_cleanup_temp_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("events.tmp"), "partial").unwrap();
        fs::write(temp_dir.path().join("music.tmp"), "partial").unwrap();
        fs::write(temp_dir.path().join("events.json"), "[]").unwrap();

        let cleaned = cleanup_temp_files(temp_dir.path()).unwrap();
        assert_eq!(cleaned, 2);
        assert!(temp_dir.path().join("events.json").exists());
        assert!(!temp_dir.path().join("events.tmp").exists());
    }

    #[test]
    fn test_cleanup_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");
        assert_eq!(cleanup_temp_files(&missing).unwrap(), 0);
    }
}

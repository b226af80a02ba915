use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Trait for filesystem operations to enable testing with mocks
pub trait FileSystem: Send + Sync {
    /// Read file contents as string
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Write string contents to file, creating parent directories
    fn write(&self, path: &Path, contents: &str) -> Result<()>;

    /// Check if path exists
    fn exists(&self, path: &Path) -> bool;
}

/// Real filesystem implementation using std::fs
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create parent directory: {:?}", parent))?;
        }

        std::fs::write(path, contents).with_context(|| format!("Failed to write file: {:?}", path))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Mock filesystem implementation for testing (in-memory)
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockFileSystem {
    files: Arc<RwLock<HashMap<PathBuf, String>>>,
}

#[allow(dead_code)]
impl MockFileSystem {
    /// Create new empty mock filesystem
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock filesystem seeded with one file
    pub fn with_file(path: impl Into<PathBuf>, contents: &str) -> Self {
        let fs = Self::new();
        fs.files
            .write()
            .unwrap()
            .insert(path.into(), contents.to_string());
        fs
    }

    /// Contents of a file, if it was written
    pub fn contents(&self, path: &Path) -> Option<String> {
        self.files.read().unwrap().get(path).cloned()
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let files = self.files.read().unwrap();
        files
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("File not found: {:?}", path))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        let mut files = self.files.write().unwrap();
        files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.read().unwrap().contains_key(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_filesystem_write_and_read() {
        let fs = MockFileSystem::new();
        let path = PathBuf::from("/reports/plan.html");

        fs.write(&path, "<html></html>").unwrap();

        assert!(fs.exists(&path));
        assert_eq!(fs.read_to_string(&path).unwrap(), "<html></html>");
    }

    #[test]
    fn test_mock_filesystem_missing_file() {
        let fs = MockFileSystem::new();
        let err = fs.read_to_string(Path::new("/nope.txt")).unwrap_err();

        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_real_filesystem_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("plan.txt");

        RealFileSystem.write(&path, "Plan: 0 to add").unwrap();

        assert!(RealFileSystem.exists(&path));
        assert_eq!(RealFileSystem.read_to_string(&path).unwrap(), "Plan: 0 to add");
    }
}

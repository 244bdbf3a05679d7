use crate::error::{Result, ZipCatError};
use crate::scanner::extension_filter::{ArchiveKind, ExtensionFilter};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveFile {
    pub source_path: PathBuf,
    pub relative_path: PathBuf,
    pub filename: String,
    pub size: u64,
}

impl ArchiveFile {
    pub fn new(source_path: PathBuf, relative_path: PathBuf, size: u64) -> Self {
        let filename = source_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_string();

        Self {
            source_path,
            relative_path,
            filename,
            size,
        }
    }

    pub fn display_path(&self) -> String {
        self.relative_path.display().to_string()
    }
}

pub struct ArchiveScanner {
    filter: ExtensionFilter,
}

impl ArchiveScanner {
    pub fn new<S: Into<String>>(extension: S) -> Self {
        Self {
            filter: ExtensionFilter::new(extension),
        }
    }

    pub fn kind(&self) -> ArchiveKind {
        self.filter.kind()
    }

    pub fn filter(&self) -> &ExtensionFilter {
        &self.filter
    }

    /// Collect every regular file under `root` whose name ends with the filter.
    ///
    /// Entries are returned in walk order (file names sorted within each
    /// directory). The first traversal error aborts the scan.
    pub fn scan_directory<P: AsRef<Path>>(&self, root: P) -> Result<Vec<ArchiveFile>> {
        let root_path = root.as_ref();

        if !root_path.exists() {
            return Err(ZipCatError::InvalidPath {
                path: root_path.display().to_string(),
            });
        }

        if !root_path.is_dir() {
            return Err(ZipCatError::InvalidPath {
                path: format!("{} is not a directory", root_path.display()),
            });
        }

        let mut archives = Vec::new();

        let walker = WalkDir::new(root_path)
            .follow_links(false)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|source| ZipCatError::Scan {
                path: source
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root_path.to_path_buf()),
                source,
            })?;

            if !entry.file_type().is_file() || !self.filter.matches(entry.path()) {
                continue;
            }

            let metadata = entry.metadata().map_err(|source| ZipCatError::Scan {
                path: entry.path().to_path_buf(),
                source,
            })?;

            let relative_path = entry
                .path()
                .strip_prefix(root_path)
                .unwrap_or(entry.path())
                .to_path_buf();

            archives.push(ArchiveFile::new(
                entry.path().to_path_buf(),
                relative_path,
                metadata.len(),
            ));
        }

        Ok(archives)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_archive_file_creation() {
        let archive = ArchiveFile::new(
            PathBuf::from("/in/logs/app.gz"),
            PathBuf::from("logs/app.gz"),
            42,
        );

        assert_eq!(archive.filename, "app.gz");
        assert_eq!(archive.display_path(), "logs/app.gz");
        assert_eq!(archive.size, 42);
    }

    #[test]
    fn test_scan_selects_only_matching_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("nested/deeper")).unwrap();
        fs::write(root.join("a.gz"), b"x").unwrap();
        fs::write(root.join("b.GZ"), b"x").unwrap();
        fs::write(root.join("c.tgz"), b"x").unwrap();
        fs::write(root.join("d.gz.bak"), b"x").unwrap();
        fs::write(root.join("nested/e.gz"), b"x").unwrap();
        fs::write(root.join("nested/deeper/f.gz"), b"x").unwrap();
        fs::create_dir(root.join("dir.gz")).unwrap();

        let scanner = ArchiveScanner::new(".gz");
        let archives = scanner.scan_directory(root).unwrap();
        let names: Vec<_> = archives.iter().map(|a| a.filename.as_str()).collect();

        assert_eq!(names.len(), 3);
        assert!(names.contains(&"a.gz"));
        assert!(names.contains(&"e.gz"));
        assert!(names.contains(&"f.gz"));
        assert_eq!(scanner.kind(), ArchiveKind::Gzip);
    }

    #[test]
    fn test_scan_relative_paths() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("sub/bundle.zip"), b"PK").unwrap();

        let archives = ArchiveScanner::new(".zip").scan_directory(root).unwrap();

        assert_eq!(archives.len(), 1);
        assert_eq!(archives[0].relative_path, PathBuf::from("sub/bundle.zip"));
        assert_eq!(archives[0].size, 2);
    }

    #[test]
    fn test_scan_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let archives = ArchiveScanner::new(".zip")
            .scan_directory(temp_dir.path())
            .unwrap();
        assert!(archives.is_empty());
    }

    #[test]
    fn test_scan_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let result = ArchiveScanner::new(".zip").scan_directory(temp_dir.path().join("missing"));
        assert!(matches!(result, Err(ZipCatError::InvalidPath { .. })));
    }

    #[test]
    fn test_scan_root_is_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("plain.zip");
        fs::write(&file, b"PK").unwrap();

        let result = ArchiveScanner::new(".zip").scan_directory(&file);
        assert!(matches!(result, Err(ZipCatError::InvalidPath { .. })));
    }
}

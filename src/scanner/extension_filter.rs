use serde::{Deserialize, Serialize};
use std::path::Path;

/// Decompression format selected by the extension filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveKind {
    Zip,
    Gzip,
}

impl ArchiveKind {
    /// `.gz` filters select gzip mode, everything else is read as zip.
    pub fn from_extension(extension: &str) -> Self {
        if extension.ends_with(".gz") {
            ArchiveKind::Gzip
        } else {
            ArchiveKind::Zip
        }
    }

    /// False when the filter ends in neither `.zip` nor `.gz` and zip was picked by default.
    pub fn is_recognized_extension(extension: &str) -> bool {
        extension.ends_with(".gz") || extension.ends_with(".zip")
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArchiveKind::Zip => "zip",
            ArchiveKind::Gzip => "gzip",
        }
    }
}

impl std::fmt::Display for ArchiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct ExtensionFilter {
    extension: String,
}

impl ExtensionFilter {
    pub fn new<S: Into<String>>(extension: S) -> Self {
        Self {
            extension: extension.into(),
        }
    }

    /// Case-sensitive suffix match on the file name.
    pub fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| name.ends_with(self.extension.as_str()))
    }

    /// File name with the filter suffix removed, `None` when it does not match.
    pub fn strip<'a>(&self, filename: &'a str) -> Option<&'a str> {
        filename.strip_suffix(self.extension.as_str())
    }

    pub fn kind(&self) -> ArchiveKind {
        ArchiveKind::from_extension(&self.extension)
    }

    pub fn get_extension(&self) -> &str {
        &self.extension
    }
}

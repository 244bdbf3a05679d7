use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZipCatError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to scan directory {path}")]
    Scan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Unable to read archive {path}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Invalid file path in archive: {entry} resolves to {resolved}")]
    ZipSlip { entry: String, resolved: PathBuf },

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for ZipCatError {
    fn user_message(&self) -> String {
        match self {
            ZipCatError::Scan { path, source } => {
                format!("Failed to scan {}: {}", path.display(), source)
            }
            ZipCatError::Archive { path, source } => {
                format!("Unable to read archive {}: {}", path.display(), source)
            }
            ZipCatError::ZipSlip { entry, resolved } => {
                format!(
                    "Archive entry '{}' would be written outside the output directory ({})",
                    entry,
                    resolved.display()
                )
            }
            ZipCatError::InvalidPath { path } => {
                format!("Invalid file path: {}", path)
            }
            ZipCatError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            ZipCatError::Scan { .. } => Some(
                "Check that the input directory exists and that every subdirectory is readable.".to_string()
            ),
            ZipCatError::Archive { .. } => Some(
                "The file may be corrupt or not a zip archive. Use --ext to select a different filter.".to_string()
            ),
            ZipCatError::ZipSlip { .. } => Some(
                "The archive contains unsafe entry names. Inspect it before extracting.".to_string()
            ),
            ZipCatError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all required fields are present.".to_string()
            ),
            ZipCatError::Io(e) if e.kind() == std::io::ErrorKind::PermissionDenied => Some(
                "Ensure you have the necessary read/write permissions for the input and output directories.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for ZipCatError {
    fn from(error: toml::de::Error) -> Self {
        ZipCatError::Config {
            message: error.to_string(),
        }
    }
}

impl ZipCatError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ZipCatError::Io(_) => 1,
            ZipCatError::Config { .. } => 2,
            ZipCatError::InvalidPath { .. } => 3,
            ZipCatError::Archive { .. } => 4,
            ZipCatError::ZipSlip { .. } => 5,
            ZipCatError::Scan { .. } => 6,
        }
    }
}

pub type Result<T> = std::result::Result<T, ZipCatError>;

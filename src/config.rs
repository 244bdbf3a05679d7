use crate::error::{Result, ZipCatError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_EXTENSION: &str = ".gz";
pub const DEFAULT_AGGREGATE_FILE: &str = "unknown_blob";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Directory searched recursively for archives
    pub input_dir: PathBuf,
    /// File name suffix an archive must end with (".zip" or ".gz")
    pub extension: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub output_dir: PathBuf,
    /// Name of the concatenated blob, relative to `output_dir`
    pub aggregate_file: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            aggregate_file: DEFAULT_AGGREGATE_FILE.to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ZipCatError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ZipCatError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ZipCatError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["zipcat.toml", ".zipcat.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref input_dir) = cli_args.input_dir {
            self.scan.input_dir = input_dir.clone();
        }

        if let Some(ref extension) = cli_args.extension {
            self.scan.extension = extension.clone();
        }

        if let Some(ref output_dir) = cli_args.output_dir {
            self.output.output_dir = output_dir.clone();
        }

        if let Some(ref aggregate_file) = cli_args.aggregate_file {
            self.output.aggregate_file = aggregate_file.clone();
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| ZipCatError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| ZipCatError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.scan.extension.is_empty() {
            return Err(ZipCatError::Config {
                message: "An extension filter must be specified (e.g. .zip or .gz)".to_string(),
            });
        }

        if self.output.aggregate_file.trim().is_empty() {
            return Err(ZipCatError::Config {
                message: "The aggregate output file name cannot be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Location of the concatenated blob.
    pub fn aggregate_path(&self) -> PathBuf {
        self.output.output_dir.join(&self.output.aggregate_file)
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub input_dir: Option<PathBuf>,
    pub extension: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub aggregate_file: Option<String>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input_dir(mut self, input_dir: Option<PathBuf>) -> Self {
        self.input_dir = input_dir;
        self
    }

    pub fn with_extension(mut self, extension: Option<String>) -> Self {
        self.extension = extension;
        self
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }

    pub fn with_aggregate_file(mut self, aggregate_file: Option<String>) -> Self {
        self.aggregate_file = aggregate_file;
        self
    }
}

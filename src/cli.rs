use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::ffi::OsString;
use std::path::PathBuf;

/// Long flags that may also be spelled with a single dash (`-dir`, `-outdir=out`).
const SINGLE_DASH_FLAGS: &[&str] = &[
    "dir",
    "outdir",
    "ext",
    "outfile",
    "help",
    "version",
    "config",
    "output-format",
    "verbose",
    "quiet",
    "dry-run",
    "generate-config",
];

#[derive(Parser, Debug)]
#[command(name = "zipcat")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract zip or gzip files and concatenate their contents into one blob")]
#[command(
    long_about = "zipcat scans a directory for zip or gzip files, extracts every file they \
                  contain into an output directory, and appends each extracted payload to a \
                  single newline-delimited blob file."
)]
#[command(after_help = "EXAMPLES:\n  \
    zipcat --dir logs --outdir extracted\n  \
    zipcat --dir downloads --ext .zip --outfile all.txt\n  \
    zipcat -dir=archives -ext=.gz --dry-run")]
pub struct Cli {
    /// Directory where the input archives are placed
    #[arg(long = "dir")]
    pub dir: Option<PathBuf>,

    /// Directory where the extracted files will be placed
    #[arg(long = "outdir")]
    pub outdir: Option<PathBuf>,

    /// Filter input files by extension: .zip or .gz
    #[arg(long = "ext")]
    pub ext: Option<String>,

    /// Concatenated file containing every extracted file's content
    #[arg(long = "outfile")]
    pub outfile: Option<String>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// List the archives that would be extracted without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    /// Parse process arguments, accepting Go-style single-dash long flags.
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_single_dash_flags(std::env::args_os()))
    }

    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_input_dir(self.dir.clone())
            .with_extension(self.ext.clone())
            .with_output_dir(self.outdir.clone())
            .with_aggregate_file(self.outfile.clone())
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

/// Rewrite `-name` / `-name=value` into `--name` / `--name=value` for known long flags.
pub fn normalize_single_dash_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            let Some(text) = arg.to_str() else {
                return arg;
            };

            if !text.starts_with('-') || text.starts_with("--") {
                return arg;
            }

            let name = text[1..].split('=').next().unwrap_or("");
            if SINGLE_DASH_FLAGS.contains(&name) {
                OsString::from(format!("-{}", text))
            } else {
                arg
            }
        })
        .collect()
}

pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, OutputConfig, ScanConfig};
pub use error::{Result, UserFriendlyError, ZipCatError};

// Core functionality re-exports
pub use extractor::{
    extract_archives, CollisionNamer, ExtractedFile, ExtractionEvent, ExtractionPlan,
    ExtractionProgress, ExtractionReport, ExtractionSession, ExtractionSummary, PayloadSource,
    PlannedArchive,
};
pub use scanner::{ArchiveFile, ArchiveKind, ArchiveScanner, ExtensionFilter};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use extractor::{gzip_extractor, zip_extractor};
use std::path::Path;

/// Main library interface: scan, extract, aggregate.
pub struct ZipCat {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl ZipCat {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        // JSON output must stay machine readable
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    /// Create a ZipCat instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(
            config,
            output_mode,
            cli_args.verbosity_level(),
            cli_args.quiet,
        ))
    }

    /// Scan the input directory, then extract every match into the output
    /// directory while appending each payload to the aggregate file.
    pub fn run(&self) -> Result<ExtractionReport> {
        let scanner = ArchiveScanner::new(self.config.scan.extension.as_str());
        let archives = self.scan(&scanner)?;

        let mut session = ExtractionSession::open(
            &self.config.output.output_dir,
            &self.config.output.aggregate_file,
        )?;
        self.output_formatter.detail(&format!(
            "Aggregate file: {}",
            session.aggregate_path().display()
        ));

        self.output_formatter.start_operation(&format!(
            "Extracting {} {} archives",
            archives.len(),
            scanner.kind()
        ));

        let pb = self
            .progress_manager
            .create_archive_progress(archives.len() as u64);
        let formatter = &self.output_formatter;
        let progress_manager = &self.progress_manager;
        let observer = |event: &ExtractionEvent| {
            ui::progress::update_archive_progress(&pb, event);
            match event {
                ExtractionEvent::FileWritten(file) => progress_manager.suspend(|| {
                    formatter.debug(&format!("output file at {}", file.output_path.display()))
                }),
                ExtractionEvent::DirectoryCreated { path } => progress_manager.suspend(|| {
                    formatter.debug(&format!("created directory {}", path.display()))
                }),
                _ => {}
            }
        };

        if let Err(e) = extract_archives(&mut session, &archives, scanner.filter(), Some(&observer))
        {
            pb.abandon();
            return Err(e);
        }

        let aggregate_file = session.aggregate_path().to_path_buf();
        let output_dir = session.output_root().to_path_buf();
        let (progress, files) = session.finish()?;

        ui::progress::finish_progress_with_summary(&pb, &progress);
        self.output_formatter.print_extraction_summary(&progress);

        Ok(ExtractionReport {
            input_dir: self.config.scan.input_dir.clone(),
            output_dir,
            aggregate_file,
            extension: self.config.scan.extension.clone(),
            kind: scanner.kind(),
            extraction_summary: ExtractionSummary::from_progress(&progress, &files),
            files,
            extraction_time: chrono::Utc::now(),
        })
    }

    /// Compute what `run` would extract without touching the output directory.
    pub fn dry_run_plan(&self) -> Result<ExtractionPlan> {
        let scanner = ArchiveScanner::new(self.config.scan.extension.as_str());
        let archives = self.scan(&scanner)?;

        let mut planned = Vec::with_capacity(archives.len());
        for archive in archives {
            let outputs = match scanner.kind() {
                ArchiveKind::Zip => zip_extractor::list_entries(&archive.source_path)?,
                ArchiveKind::Gzip => vec![gzip_extractor::output_name(&archive, scanner.filter())?],
            };
            planned.push(PlannedArchive { archive, outputs });
        }

        Ok(ExtractionPlan {
            kind: scanner.kind(),
            aggregate_file: self.config.aggregate_path(),
            archives: planned,
        })
    }

    fn scan(&self, scanner: &ArchiveScanner) -> Result<Vec<ArchiveFile>> {
        let extension = scanner.filter().get_extension();
        if !ArchiveKind::is_recognized_extension(extension) {
            self.output_formatter.warning(&format!(
                "Extension {} is neither .zip nor .gz; matches will be read as zip archives",
                extension
            ));
        }

        self.output_formatter.start_operation(&format!(
            "Scanning {} for *{} files",
            self.config.scan.input_dir.display(),
            extension
        ));

        let spinner = self.progress_manager.create_spinner("Scanning...");
        let archives = scanner.scan_directory(&self.config.scan.input_dir);
        spinner.finish_and_clear();
        let archives = archives?;

        if archives.is_empty() {
            self.output_formatter
                .warning(&format!("No files ending in {} were found", extension));
        } else {
            self.output_formatter
                .info(&format!("Found {} archives", archives.len()));
        }

        Ok(archives)
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &ZipCatError) {
        self.progress_manager.clear();
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

use crate::extractor::{ExtractedFile, ExtractionProgress};
use crate::scanner::{ArchiveFile, ArchiveKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub aggregate_file: PathBuf,
    pub extension: String,
    pub kind: ArchiveKind,
    pub extraction_summary: ExtractionSummary,
    pub files: Vec<ExtractedFile>,
    pub extraction_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionSummary {
    pub archives_processed: usize,
    pub files_extracted: usize,
    pub directories_created: usize,
    pub files_renamed: usize,
    pub bytes_written: u64,
    /// Payload bytes plus one separator per file
    pub aggregate_bytes: u64,
    pub extraction_duration: Duration,
}

impl ExtractionSummary {
    pub fn from_progress(progress: &ExtractionProgress, files: &[ExtractedFile]) -> Self {
        Self {
            archives_processed: progress.archives_processed,
            files_extracted: progress.files_extracted,
            directories_created: progress.directories_created,
            files_renamed: files.iter().filter(|f| f.renamed).count(),
            bytes_written: progress.bytes_written,
            aggregate_bytes: progress.bytes_written + progress.files_extracted as u64,
            extraction_duration: progress.elapsed(),
        }
    }
}

impl ExtractionReport {
    pub fn renamed_files(&self) -> impl Iterator<Item = &ExtractedFile> {
        self.files.iter().filter(|f| f.renamed)
    }
}

/// What a run would do, computed without writing anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionPlan {
    pub kind: ArchiveKind,
    pub aggregate_file: PathBuf,
    pub archives: Vec<PlannedArchive>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedArchive {
    pub archive: ArchiveFile,
    /// Entry names for zip, the stripped file name for gzip
    pub outputs: Vec<PathBuf>,
}

impl ExtractionPlan {
    pub fn total_outputs(&self) -> usize {
        self.archives.iter().map(|a| a.outputs.len()).sum()
    }
}

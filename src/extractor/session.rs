use crate::error::Result;
use crate::extractor::collision::CollisionNamer;
use crate::extractor::paths::{normalize_path, resolve_output_root};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const AGGREGATE_SEPARATOR: &[u8] = b"\n";

/// A payload that can be decompressed more than once.
///
/// Decompressed zip entries and gzip streams cannot be rewound, so every
/// destination gets its own reader from a fresh `open()`.
pub trait PayloadSource {
    fn open(&mut self) -> Result<Box<dyn Read + '_>>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedFile {
    /// Archive the payload came from
    pub archive: PathBuf,
    /// Entry name inside a zip archive, `None` for gzip streams
    pub entry: Option<String>,
    pub output_path: PathBuf,
    pub bytes: u64,
    pub renamed: bool,
}

#[derive(Debug, Clone)]
pub struct ExtractionProgress {
    pub archives_processed: usize,
    pub files_extracted: usize,
    pub directories_created: usize,
    pub bytes_written: u64,
    pub start_time: Instant,
}

impl ExtractionProgress {
    pub fn new() -> Self {
        Self {
            archives_processed: 0,
            files_extracted: 0,
            directories_created: 0,
            bytes_written: 0,
            start_time: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

impl Default for ExtractionProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything one run shares: the output root, the collision table and the
/// aggregate sink.
pub struct ExtractionSession {
    output_root: PathBuf,
    aggregate_path: PathBuf,
    aggregate: BufWriter<File>,
    namer: CollisionNamer,
    progress: ExtractionProgress,
    extracted: Vec<ExtractedFile>,
}

impl ExtractionSession {
    /// Create the output directory and truncate the aggregate file.
    pub fn open(output_dir: &Path, aggregate_file: &str) -> Result<Self> {
        fs::create_dir_all(output_dir)?;
        let output_root = resolve_output_root(output_dir)?;

        // normalized like entry targets so the claim below matches them
        let aggregate_path = normalize_path(&output_root.join(aggregate_file));
        if let Some(parent) = aggregate_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let aggregate = BufWriter::new(File::create(&aggregate_path)?);

        // extracted files must never land on the blob itself
        let mut namer = CollisionNamer::new();
        namer.claim(&aggregate_path);

        Ok(Self {
            output_root,
            aggregate_path,
            aggregate,
            namer,
            progress: ExtractionProgress::new(),
            extracted: Vec::new(),
        })
    }

    /// Absolute, normalized output directory.
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn aggregate_path(&self) -> &Path {
        &self.aggregate_path
    }

    pub fn progress(&self) -> &ExtractionProgress {
        &self.progress
    }

    pub fn extracted(&self) -> &[ExtractedFile] {
        &self.extracted
    }

    pub fn namer(&self) -> &CollisionNamer {
        &self.namer
    }

    pub fn record_directory(&mut self) {
        self.progress.directories_created += 1;
    }

    pub fn record_archive(&mut self) {
        self.progress.archives_processed += 1;
    }

    /// Claim an output path for `requested`, then write the payload to it and
    /// to the aggregate file followed by a newline.
    ///
    /// `mode` sets the permission bits of a newly created file on unix.
    pub fn write_payload(
        &mut self,
        source: &mut dyn PayloadSource,
        requested: &Path,
        mode: Option<u32>,
        archive: &Path,
        entry: Option<String>,
    ) -> Result<ExtractedFile> {
        let output_path = self.namer.claim(requested);
        let renamed = output_path != requested;

        let output_file = create_output_file(&output_path, mode)?;
        let mut writer = BufWriter::new(output_file);
        let bytes = io::copy(&mut source.open()?, &mut writer)?;
        writer.flush()?;

        io::copy(&mut source.open()?, &mut self.aggregate)?;
        self.aggregate.write_all(AGGREGATE_SEPARATOR)?;

        self.progress.files_extracted += 1;
        self.progress.bytes_written += bytes;
        let extracted = ExtractedFile {
            archive: archive.to_path_buf(),
            entry,
            output_path,
            bytes,
            renamed,
        };
        self.extracted.push(extracted.clone());

        Ok(extracted)
    }

    /// Flush the aggregate file and hand back what was extracted.
    pub fn finish(mut self) -> Result<(ExtractionProgress, Vec<ExtractedFile>)> {
        self.aggregate.flush()?;
        self.aggregate.get_ref().sync_all()?;
        Ok((self.progress, self.extracted))
    }
}

fn create_output_file(path: &Path, mode: Option<u32>) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        if let Some(mode) = mode {
            options.mode(mode & 0o7777);
        }
    }
    #[cfg(not(unix))]
    let _ = mode;

    options.open(path)
}

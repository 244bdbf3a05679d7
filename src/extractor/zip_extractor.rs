use crate::error::{Result, ZipCatError};
use crate::extractor::paths::resolve_entry_path;
use crate::extractor::session::{ExtractionSession, PayloadSource};
use crate::extractor::ExtractionEvent;
use crate::scanner::ArchiveFile;
use std::fs::{self, File};
use std::io::{BufReader, Read, Seek};
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// Mode for entries whose archive carries no unix permissions.
const DEFAULT_ENTRY_MODE: u32 = 0o644;

/// Reopens one entry of an open archive by index.
struct ZipEntrySource<'a, R: Read + Seek> {
    archive: &'a mut ZipArchive<R>,
    archive_path: &'a Path,
    index: usize,
}

impl<R: Read + Seek> PayloadSource for ZipEntrySource<'_, R> {
    fn open(&mut self) -> Result<Box<dyn Read + '_>> {
        let archive_path = self.archive_path;
        let entry = self
            .archive
            .by_index(self.index)
            .map_err(|source| ZipCatError::Archive {
                path: archive_path.to_path_buf(),
                source,
            })?;
        Ok(Box::new(entry))
    }
}

struct EntryInfo {
    name: String,
    is_dir: bool,
    mode: Option<u32>,
}

pub fn extract_zip(
    session: &mut ExtractionSession,
    archive: &ArchiveFile,
    observer: Option<&dyn Fn(&ExtractionEvent)>,
) -> Result<()> {
    let file = File::open(&archive.source_path)?;
    let mut zip = ZipArchive::new(BufReader::new(file)).map_err(|source| ZipCatError::Archive {
        path: archive.source_path.clone(),
        source,
    })?;

    let root = session.output_root().to_path_buf();

    for index in 0..zip.len() {
        let info = read_entry_info(&mut zip, index, &archive.source_path)?;
        let target = resolve_entry_path(&root, &info.name)?;

        if info.is_dir {
            fs::create_dir_all(&target)?;
            session.record_directory();
            if let Some(observer) = observer {
                observer(&ExtractionEvent::DirectoryCreated { path: target });
            }
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut source = ZipEntrySource {
            archive: &mut zip,
            archive_path: &archive.source_path,
            index,
        };
        let extracted = session.write_payload(
            &mut source,
            &target,
            Some(info.mode.unwrap_or(DEFAULT_ENTRY_MODE)),
            &archive.source_path,
            Some(info.name),
        )?;

        if let Some(observer) = observer {
            observer(&ExtractionEvent::FileWritten(extracted));
        }
    }

    Ok(())
}

fn read_entry_info<R: Read + Seek>(
    zip: &mut ZipArchive<R>,
    index: usize,
    archive_path: &Path,
) -> Result<EntryInfo> {
    let entry = zip.by_index(index).map_err(|source| ZipCatError::Archive {
        path: archive_path.to_path_buf(),
        source,
    })?;

    Ok(EntryInfo {
        name: entry.name().to_string(),
        is_dir: entry.is_dir(),
        mode: entry.unix_mode(),
    })
}

/// Entry names of an archive, in archive order. Used for dry runs.
pub fn list_entries(path: &Path) -> Result<Vec<PathBuf>> {
    let file = File::open(path)?;
    let mut zip = ZipArchive::new(BufReader::new(file)).map_err(|source| ZipCatError::Archive {
        path: path.to_path_buf(),
        source,
    })?;

    let mut names = Vec::with_capacity(zip.len());
    for index in 0..zip.len() {
        names.push(PathBuf::from(read_entry_info(&mut zip, index, path)?.name));
    }
    Ok(names)
}

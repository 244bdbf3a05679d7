use crate::error::{Result, ZipCatError};
use crate::extractor::session::{ExtractionSession, PayloadSource};
use crate::extractor::ExtractionEvent;
use crate::scanner::{ArchiveFile, ExtensionFilter};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Reopens the compressed file from scratch on every `open()`.
struct GzipFileSource<'a> {
    path: &'a Path,
}

impl PayloadSource for GzipFileSource<'_> {
    fn open(&mut self) -> Result<Box<dyn Read + '_>> {
        let file = File::open(self.path)?;
        Ok(Box::new(MultiGzDecoder::new(BufReader::new(file))))
    }
}

/// Output name for a gzip input: its file name without the filter suffix.
pub fn output_name(archive: &ArchiveFile, filter: &ExtensionFilter) -> Result<PathBuf> {
    match filter.strip(&archive.filename) {
        Some(stem) if !stem.is_empty() => Ok(PathBuf::from(stem)),
        _ => Err(ZipCatError::InvalidPath {
            path: format!(
                "cannot derive an output name from {} with filter {}",
                archive.source_path.display(),
                filter.get_extension()
            ),
        }),
    }
}

pub fn extract_gzip(
    session: &mut ExtractionSession,
    archive: &ArchiveFile,
    filter: &ExtensionFilter,
    observer: Option<&dyn Fn(&ExtractionEvent)>,
) -> Result<()> {
    let requested = session.output_root().join(output_name(archive, filter)?);

    let mut source = GzipFileSource {
        path: &archive.source_path,
    };
    let extracted = session.write_payload(&mut source, &requested, None, &archive.source_path, None)?;

    if let Some(observer) = observer {
        observer(&ExtractionEvent::FileWritten(extracted));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::fs;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_gzip(path: &Path, content: &[u8]) {
        let mut encoder = GzEncoder::new(File::create(path).unwrap(), Compression::default());
        encoder.write_all(content).unwrap();
        encoder.finish().unwrap();
    }

    fn archive(path: PathBuf) -> ArchiveFile {
        ArchiveFile::new(path.clone(), path, 0)
    }

    #[test]
    fn test_decompresses_to_stripped_name() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let gz_path = input.path().join("data.csv.gz");
        write_gzip(&gz_path, b"x,y\n1,2\n");

        let filter = ExtensionFilter::new(".gz");
        let mut session = ExtractionSession::open(output.path(), "unknown_blob").unwrap();
        extract_gzip(&mut session, &archive(gz_path), &filter, None).unwrap();
        session.finish().unwrap();

        assert_eq!(fs::read_to_string(output.path().join("data.csv")).unwrap(), "x,y\n1,2\n");
        assert_eq!(
            fs::read_to_string(output.path().join("unknown_blob")).unwrap(),
            "x,y\n1,2\n\n"
        );
    }

    #[test]
    fn test_same_name_from_different_directories() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        fs::create_dir_all(input.path().join("one")).unwrap();
        fs::create_dir_all(input.path().join("two")).unwrap();
        let first = input.path().join("one/app.log.gz");
        let second = input.path().join("two/app.log.gz");
        write_gzip(&first, b"first");
        write_gzip(&second, b"second");

        let filter = ExtensionFilter::new(".gz");
        let mut session = ExtractionSession::open(output.path(), "blob").unwrap();
        extract_gzip(&mut session, &archive(first), &filter, None).unwrap();
        extract_gzip(&mut session, &archive(second), &filter, None).unwrap();
        let (_, files) = session.finish().unwrap();

        assert!(!files[0].renamed);
        assert!(files[1].renamed);
        assert_eq!(fs::read_to_string(output.path().join("app.log")).unwrap(), "first");
        assert_eq!(fs::read_to_string(output.path().join("app(0).log")).unwrap(), "second");
        assert_eq!(fs::read_to_string(output.path().join("blob")).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_output_named_like_the_blob_is_renamed() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let gz_path = input.path().join("blob.gz");
        write_gzip(&gz_path, b"PAYLOAD");

        let filter = ExtensionFilter::new(".gz");
        let mut session = ExtractionSession::open(output.path(), "sub/../blob").unwrap();
        extract_gzip(&mut session, &archive(gz_path), &filter, None).unwrap();
        let (_, files) = session.finish().unwrap();

        assert!(files[0].renamed);
        assert_eq!(fs::read_to_string(output.path().join("blob(0)")).unwrap(), "PAYLOAD");
        assert_eq!(fs::read_to_string(output.path().join("blob")).unwrap(), "PAYLOAD\n");
    }

    #[test]
    fn test_multi_member_stream() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let gz_path = input.path().join("joined.gz");

        let mut bytes = Vec::new();
        for part in [&b"part one, "[..], &b"part two"[..]] {
            let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(part).unwrap();
            bytes.extend(encoder.finish().unwrap());
        }
        fs::write(&gz_path, bytes).unwrap();

        let filter = ExtensionFilter::new(".gz");
        let mut session = ExtractionSession::open(output.path(), "blob").unwrap();
        extract_gzip(&mut session, &archive(gz_path), &filter, None).unwrap();
        session.finish().unwrap();

        assert_eq!(
            fs::read_to_string(output.path().join("joined")).unwrap(),
            "part one, part two"
        );
    }

    #[test]
    fn test_corrupt_gzip_fails() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let gz_path = input.path().join("broken.gz");
        fs::write(&gz_path, b"definitely not gzip").unwrap();

        let filter = ExtensionFilter::new(".gz");
        let mut session = ExtractionSession::open(output.path(), "blob").unwrap();
        let result = extract_gzip(&mut session, &archive(gz_path), &filter, None);
        assert!(matches!(result, Err(ZipCatError::Io(_))));
    }

    #[test]
    fn test_output_name_requires_a_stem() {
        let filter = ExtensionFilter::new(".gz");

        let named = archive(PathBuf::from("in/report.txt.gz"));
        assert_eq!(output_name(&named, &filter).unwrap(), PathBuf::from("report.txt"));

        let bare = archive(PathBuf::from("in/.gz"));
        assert!(matches!(
            output_name(&bare, &filter),
            Err(ZipCatError::InvalidPath { .. })
        ));
    }
}

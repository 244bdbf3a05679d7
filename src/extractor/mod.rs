pub mod collision;
pub mod gzip_extractor;
pub mod paths;
pub mod report;
pub mod session;
pub mod zip_extractor;

pub use collision::CollisionNamer;
pub use report::{ExtractionPlan, ExtractionReport, ExtractionSummary, PlannedArchive};
pub use session::{ExtractedFile, ExtractionProgress, ExtractionSession, PayloadSource};

use crate::error::Result;
use crate::scanner::{ArchiveFile, ArchiveKind, ExtensionFilter};
use std::path::PathBuf;

/// Notifications emitted while archives are extracted.
#[derive(Debug, Clone)]
pub enum ExtractionEvent {
    ArchiveStarted { path: PathBuf, kind: ArchiveKind },
    DirectoryCreated { path: PathBuf },
    FileWritten(ExtractedFile),
    ArchiveFinished { path: PathBuf },
}

/// Extract every archive in order, stopping at the first error.
pub fn extract_archives(
    session: &mut ExtractionSession,
    archives: &[ArchiveFile],
    filter: &ExtensionFilter,
    observer: Option<&dyn Fn(&ExtractionEvent)>,
) -> Result<()> {
    let kind = filter.kind();

    for archive in archives {
        if let Some(observer) = observer {
            observer(&ExtractionEvent::ArchiveStarted {
                path: archive.source_path.clone(),
                kind,
            });
        }

        match kind {
            ArchiveKind::Zip => zip_extractor::extract_zip(session, archive, observer)?,
            ArchiveKind::Gzip => gzip_extractor::extract_gzip(session, archive, filter, observer)?,
        }
        session.record_archive();

        if let Some(observer) = observer {
            observer(&ExtractionEvent::ArchiveFinished {
                path: archive.source_path.clone(),
            });
        }
    }

    Ok(())
}

use crate::extractor::{ExtractionEvent, ExtractionProgress};
use crate::ui::output::format_duration;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Duration;

pub struct ProgressManager {
    multi_progress: MultiProgress,
    enabled: bool,
}

impl ProgressManager {
    pub fn new(enabled: bool) -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            enabled,
        }
    }

    pub fn create_archive_progress(&self, total_archives: u64) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = self.multi_progress.add(ProgressBar::new(total_archives));
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>5}/{len:5} archives {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
        );
        pb.set_message("Extracting...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    pub fn create_spinner(&self, message: &str) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = self.multi_progress.add(ProgressBar::new_spinner());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg} ({elapsed})")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        pb.set_message(message.to_string());
        pb
    }

    /// Run `f` with the bars hidden so printed lines don't tear them.
    pub fn suspend<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        if self.enabled {
            self.multi_progress.suspend(f)
        } else {
            f()
        }
    }

    pub fn clear(&self) {
        if self.enabled {
            self.multi_progress.clear().ok();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new(true)
    }
}

pub fn update_archive_progress(pb: &ProgressBar, event: &ExtractionEvent) {
    match event {
        ExtractionEvent::ArchiveStarted { path, .. } => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            pb.set_message(format!("Extracting {}", name));
        }
        ExtractionEvent::ArchiveFinished { .. } => pb.inc(1),
        ExtractionEvent::DirectoryCreated { .. } | ExtractionEvent::FileWritten(_) => {}
    }
}

pub fn finish_progress_with_summary(pb: &ProgressBar, progress: &ExtractionProgress) {
    let final_message = format!(
        "{} files from {} archives (completed in {})",
        progress.files_extracted,
        progress.archives_processed,
        format_duration(progress.elapsed())
    );
    pb.finish_with_message(final_message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::ArchiveKind;
    use std::path::PathBuf;

    #[test]
    fn test_progress_manager_creation() {
        let manager = ProgressManager::new(true);
        assert!(manager.is_enabled());

        let disabled_manager = ProgressManager::new(false);
        assert!(!disabled_manager.is_enabled());
    }

    #[test]
    fn test_disabled_progress_bars() {
        let manager = ProgressManager::new(false);

        let archive_pb = manager.create_archive_progress(10);
        assert!(archive_pb.is_hidden());

        let spinner = manager.create_spinner("test");
        assert!(spinner.is_hidden());
    }

    #[test]
    fn test_archive_progress_advances_on_finish() {
        let pb = ProgressBar::hidden();
        pb.set_length(2);

        update_archive_progress(
            &pb,
            &ExtractionEvent::ArchiveStarted {
                path: PathBuf::from("in/a.zip"),
                kind: ArchiveKind::Zip,
            },
        );
        assert_eq!(pb.position(), 0);
        assert_eq!(pb.message(), "Extracting a.zip");

        update_archive_progress(
            &pb,
            &ExtractionEvent::ArchiveFinished {
                path: PathBuf::from("in/a.zip"),
            },
        );
        assert_eq!(pb.position(), 1);
    }

    #[test]
    fn test_finish_with_summary() {
        let pb = ProgressBar::hidden();
        let mut progress = ExtractionProgress::new();
        progress.files_extracted = 3;
        progress.archives_processed = 1;

        finish_progress_with_summary(&pb, &progress);
        assert!(pb.is_finished());
        assert!(pb.message().starts_with("3 files from 1 archives"));
    }
}

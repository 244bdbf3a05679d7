use crate::error::{UserFriendlyError, ZipCatError};
use crate::extractor::{ExtractionPlan, ExtractionProgress, ExtractionReport};
use console::{style, Emoji};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

impl OutputMode {
    pub fn from_string(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputMode::Json,
            "plain" => OutputMode::Plain,
            _ => OutputMode::Human,
        }
    }
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static ROCKET: Emoji = Emoji("🚀 ", "> ");
static SPARKLES: Emoji = Emoji("✨ ", "* ");

pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => console::colors_enabled() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            // info is shown by default, -v adds detail, -vv adds per-file debug lines
            verbose_level: if quiet { 0 } else { verbose + 1 },
            quiet,
        }
    }

    // Core messaging methods
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Success, message),
            OutputMode::Json => self.print_json_message("success", message),
            OutputMode::Plain => println!("SUCCESS: {}", message),
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Warning, message),
                OutputMode::Json => self.print_json_message("warning", message),
                OutputMode::Plain => println!("WARNING: {}", message),
            }
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Json => self.print_json_message("info", message),
                OutputMode::Plain => println!("INFO: {}", message),
            }
        }
    }

    pub fn detail(&self, message: &str) {
        if self.should_show_message(2) {
            match self.mode {
                OutputMode::Human => println!("  {}", message),
                OutputMode::Json => self.print_json_message("detail", message),
                OutputMode::Plain => println!("DETAIL: {}", message),
            }
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(3) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("  {}", style(message).dim());
                    } else {
                        println!("  DEBUG: {}", message);
                    }
                }
                OutputMode::Json => self.print_json_message("debug", message),
                OutputMode::Plain => println!("DEBUG: {}", message),
            }
        }
    }

    pub fn start_operation(&self, operation: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("{}{}", ROCKET, style(operation).bold());
                    } else {
                        println!("> {}", operation);
                    }
                }
                OutputMode::Json => self.print_json_message("operation_start", operation),
                OutputMode::Plain => println!("STARTING: {}", operation),
            }
        }
    }

    // User-friendly error handling
    pub fn print_user_friendly_error(&self, error: &ZipCatError) {
        let user_message = error.user_message();
        self.error(&user_message);

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(&format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => {
                    eprintln!("SUGGESTION: {}", suggestion);
                }
            }
        }
    }

    /// Archives a dry run would extract and the outputs each would produce.
    pub fn print_plan(&self, plan: &ExtractionPlan) {
        match self.mode {
            OutputMode::Json => {
                let json_output =
                    serde_json::to_string_pretty(plan).unwrap_or_else(|_| "{}".to_string());
                println!("{}", json_output);
            }
            _ => {
                if self.quiet {
                    return;
                }
                println!("Mode:      {}", plan.kind);
                println!("Aggregate: {}", plan.aggregate_file.display());
                println!(
                    "Archives:  {} ({} outputs)",
                    plan.archives.len(),
                    plan.total_outputs()
                );
                for planned in &plan.archives {
                    println!(
                        "  {} ({})",
                        planned.archive.display_path(),
                        format_bytes(planned.archive.size)
                    );
                    if self.should_show_message(2) {
                        for output in &planned.outputs {
                            println!("    -> {}", output.display());
                        }
                    }
                }
            }
        }
    }

    // Summary and reporting
    pub fn print_extraction_summary(&self, progress: &ExtractionProgress) {
        if self.quiet || self.mode == OutputMode::Json {
            return;
        }

        match self.mode {
            OutputMode::Human => self.print_human_summary(progress),
            _ => self.print_plain_summary(progress),
        }
    }

    pub fn print_extraction_report(&self, report: &ExtractionReport) {
        match self.mode {
            OutputMode::Human => {
                if !self.quiet {
                    self.print_human_report(report);
                }
            }
            OutputMode::Json => {
                let json_output =
                    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
                println!("{}", json_output);
            }
            OutputMode::Plain => {
                if !self.quiet {
                    self.print_plain_report(report);
                }
            }
        }
    }

    pub fn print_header(&self, title: &str) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                println!();
                if self.use_colors {
                    println!("{} {}", SPARKLES, style(title).bold().cyan());
                } else {
                    println!("=== {} ===", title);
                }
                println!();
            }
            OutputMode::Json => {
                self.print_json_object(&serde_json::json!({
                    "type": "header",
                    "title": title
                }));
            }
            OutputMode::Plain => {
                println!("=== {} ===", title);
            }
        }
    }

    pub fn print_separator(&self) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("{}", style("─".repeat(60)).dim());
                } else {
                    println!("{}", "-".repeat(60));
                }
            }
            OutputMode::Plain => {
                println!("{}", "-".repeat(60));
            }
            OutputMode::Json => {}
        }
    }

    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        if self.use_colors {
            let styled = match msg_type {
                MessageType::Success => style(message).green().bold(),
                MessageType::Error => style(message).red().bold(),
                MessageType::Warning => style(message).yellow().bold(),
                MessageType::Info => style(message).cyan(),
            };
            let emoji = match msg_type {
                MessageType::Success => &CHECKMARK,
                MessageType::Error => &CROSS,
                MessageType::Warning => &WARNING,
                MessageType::Info => &INFO,
            };

            match msg_type {
                MessageType::Error => eprintln!("{}{}", emoji, styled),
                _ => println!("{}{}", emoji, styled),
            }
        } else {
            let prefix = match msg_type {
                MessageType::Success => "✓",
                MessageType::Error => "✗",
                MessageType::Warning => "!",
                MessageType::Info => "i",
            };

            match msg_type {
                MessageType::Error => eprintln!("{} {}", prefix, message),
                _ => println!("{} {}", prefix, message),
            }
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        let object = serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        // stdout stays parseable as the final report
        eprintln!(
            "{}",
            serde_json::to_string(&object).unwrap_or_else(|_| "{}".to_string())
        );
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }

    fn print_human_summary(&self, progress: &ExtractionProgress) {
        println!();
        self.print_separator();

        if self.use_colors {
            println!("{} {}", style("Extraction completed!").green().bold(), CHECKMARK);
        } else {
            println!("✓ Extraction completed!");
        }

        println!();
        let rows = [
            ("Archives processed:", progress.archives_processed.to_string()),
            ("Files extracted:   ", progress.files_extracted.to_string()),
            ("Bytes written:     ", format_bytes(progress.bytes_written)),
            ("Time taken:        ", format_duration(progress.elapsed())),
        ];
        for (label, value) in rows {
            if self.use_colors {
                println!("  {} {}", label, style(value).cyan().bold());
            } else {
                println!("  {} {}", label, value);
            }
        }

        self.print_separator();
    }

    fn print_plain_summary(&self, progress: &ExtractionProgress) {
        println!("COMPLETED: Extraction");
        println!("Archives processed: {}", progress.archives_processed);
        println!("Files extracted: {}", progress.files_extracted);
        println!("Bytes written: {}", progress.bytes_written);
        println!("Duration: {:?}", progress.elapsed());
    }

    fn print_human_report(&self, report: &ExtractionReport) {
        self.print_header("Extraction Report");

        println!("Input directory:  {}", report.input_dir.display());
        println!("Output directory: {}", report.output_dir.display());
        println!("Aggregate file:   {}", report.aggregate_file.display());
        println!("Filter:           {} ({})", report.extension, report.kind);
        println!(
            "Extracted at:     {}",
            report.extraction_time.format("%Y-%m-%d %H:%M UTC")
        );
        println!();

        let renamed: Vec<_> = report.renamed_files().collect();
        if !renamed.is_empty() {
            println!("Renamed to avoid collisions:");
            for file in renamed {
                println!(
                    "  {} (from {})",
                    file.output_path.display(),
                    file.archive.display()
                );
            }
        }
    }

    fn print_plain_report(&self, report: &ExtractionReport) {
        println!("REPORT: Extraction completed");
        println!("Aggregate: {}", report.aggregate_file.display());
        println!("Files: {}", report.extraction_summary.files_extracted);
        println!("Renamed: {}", report.extraction_summary.files_renamed);
        println!("Size: {} bytes", report.extraction_summary.aggregate_bytes);
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
    Warning,
    Info,
}

pub(crate) fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

pub(crate) fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}s", secs)
    } else {
        format!("{}ms", duration.as_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_mode_parsing() {
        assert_eq!(OutputMode::from_string("human"), OutputMode::Human);
        assert_eq!(OutputMode::from_string("JSON"), OutputMode::Json);
        assert_eq!(OutputMode::from_string("plain"), OutputMode::Plain);
        assert_eq!(OutputMode::from_string("invalid"), OutputMode::Human);
    }

    #[test]
    fn test_quiet_mode() {
        let formatter = OutputFormatter::new(OutputMode::Human, 2, true);
        assert_eq!(formatter.verbose_level, 0);
        assert!(formatter.quiet);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1048576), "1.0 MB");
        assert_eq!(format_bytes(1073741824), "1.0 GB");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(30)), "30s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
    }

    #[test]
    fn test_should_show_message() {
        let formatter = OutputFormatter::new(OutputMode::Plain, 0, false);
        assert!(formatter.should_show_message(1));
        assert!(!formatter.should_show_message(2));

        let verbose = OutputFormatter::new(OutputMode::Plain, 2, false);
        assert!(verbose.should_show_message(3));

        let quiet_formatter = OutputFormatter::new(OutputMode::Human, 2, true);
        assert!(!quiet_formatter.should_show_message(0));
    }
}

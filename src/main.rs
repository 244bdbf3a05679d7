use std::process;
use zipcat::{Cli, OutputFormatter, OutputMode, UserFriendlyError, ZipCat, ZipCatError};

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse_args();

    // Handle special commands first
    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let zipcat = match ZipCat::from_cli(&cli) {
        Ok(zipcat) => zipcat,
        Err(e) => {
            print_startup_error(&e);
            return e.exit_code();
        }
    };

    if cli.dry_run {
        return handle_dry_run(&zipcat);
    }

    match zipcat.run() {
        Ok(report) => {
            zipcat.output_formatter().print_extraction_report(&report);
            0
        }
        Err(e) => {
            zipcat.handle_error(&e);
            e.exit_code()
        }
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "zipcat.toml".to_string());

    match ZipCat::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  zipcat --config {}", config_path);
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            e.exit_code()
        }
    }
}

fn handle_dry_run(zipcat: &ZipCat) -> i32 {
    let formatter = zipcat.output_formatter();

    formatter.info("DRY RUN MODE - No files will be written");
    formatter.print_separator();

    let config = zipcat.config();
    formatter.detail(&format!("Input directory:  {}", config.scan.input_dir.display()));
    formatter.detail(&format!("Output directory: {}", config.output.output_dir.display()));
    formatter.detail(&format!("Extension filter: {}", config.scan.extension));

    match zipcat.dry_run_plan() {
        Ok(plan) => {
            formatter.print_plan(&plan);
            formatter.print_separator();
            formatter.success("Dry run completed successfully");
            0
        }
        Err(e) => {
            zipcat.handle_error(&e);
            e.exit_code()
        }
    }
}

fn print_startup_error(error: &ZipCatError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}

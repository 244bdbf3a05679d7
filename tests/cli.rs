use assert_cmd::Command;
use flate2::write::GzEncoder;
use flate2::Compression;
use predicates::prelude::*;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

fn zipcat() -> Command {
    Command::cargo_bin("zipcat").unwrap()
}

fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    let mut writer = ZipWriter::new(File::create(path).unwrap());
    for (name, content) in entries {
        writer.start_file(*name, SimpleFileOptions::default()).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
}

fn write_gzip(path: &Path, content: &[u8]) {
    let mut encoder = GzEncoder::new(File::create(path).unwrap(), Compression::default());
    encoder.write_all(content).unwrap();
    encoder.finish().unwrap();
}

#[test]
fn test_help_exits_successfully() {
    zipcat()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--outfile"));
}

#[test]
fn test_single_dash_help_exits_successfully() {
    zipcat()
        .arg("-help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--outdir"));
}

#[test]
fn test_zip_collisions_with_go_style_flags() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_zip(&input.path().join("1.zip"), &[("a.txt", "A1")]);
    write_zip(&input.path().join("2.zip"), &[("a.txt", "A2")]);

    zipcat()
        .arg("-dir")
        .arg(input.path())
        .arg(format!("-outdir={}", output.path().display()))
        .args(["-ext", ".zip", "-q"])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(output.path().join("a.txt")).unwrap(), "A1");
    assert_eq!(fs::read_to_string(output.path().join("a(0).txt")).unwrap(), "A2");
    assert_eq!(
        fs::read_to_string(output.path().join("unknown_blob")).unwrap(),
        "A1\nA2\n"
    );
}

#[test]
fn test_gzip_is_the_default_filter() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_gzip(&input.path().join("data.csv.gz"), b"x,y\n1,2\n");

    zipcat()
        .arg("--dir")
        .arg(input.path())
        .arg("--outdir")
        .arg(output.path())
        .args(["--outfile", "all.txt", "--quiet"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(output.path().join("data.csv")).unwrap(),
        "x,y\n1,2\n"
    );
    assert_eq!(
        fs::read_to_string(output.path().join("all.txt")).unwrap(),
        "x,y\n1,2\n\n"
    );
}

#[test]
fn test_empty_input_creates_empty_blob() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    zipcat()
        .arg("--dir")
        .arg(input.path())
        .arg("--outdir")
        .arg(output.path())
        .args(["--ext", ".zip", "-q"])
        .assert()
        .success();

    let entries: Vec<_> = fs::read_dir(output.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(
        fs::metadata(output.path().join("unknown_blob")).unwrap().len(),
        0
    );
}

#[test]
fn test_zip_slip_fails_the_run() {
    let input = TempDir::new().unwrap();
    let base = TempDir::new().unwrap();
    let output = base.path().join("out");
    write_zip(&input.path().join("evil.zip"), &[("../escaped.txt", "nope")]);

    zipcat()
        .arg("--dir")
        .arg(input.path())
        .arg("--outdir")
        .arg(&output)
        .args(["--ext", ".zip", "--output-format", "plain"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("outside the output directory"));

    assert!(!base.path().join("escaped.txt").exists());
}

#[test]
fn test_missing_input_directory() {
    let base = TempDir::new().unwrap();

    zipcat()
        .arg("--dir")
        .arg(base.path().join("missing"))
        .arg("--outdir")
        .arg(base.path().join("out"))
        .args(["--output-format", "plain"])
        .assert()
        .code(3);
}

#[test]
fn test_dry_run_writes_nothing() {
    let input = TempDir::new().unwrap();
    let base = TempDir::new().unwrap();
    let output = base.path().join("out");
    write_zip(&input.path().join("bundle.zip"), &[("a.txt", "A")]);

    zipcat()
        .arg("--dir")
        .arg(input.path())
        .arg("--outdir")
        .arg(&output)
        .args(["--ext", ".zip", "--dry-run", "--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bundle.zip"));

    assert!(!output.exists());
}

#[test]
fn test_json_report() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_zip(&input.path().join("bundle.zip"), &[("a.txt", "A"), ("b.txt", "B")]);

    let assert = zipcat()
        .arg("--dir")
        .arg(input.path())
        .arg("--outdir")
        .arg(output.path())
        .args(["--ext", ".zip", "--output-format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["kind"], "zip");
    assert_eq!(report["extraction_summary"]["files_extracted"], 2);
    assert_eq!(report["extraction_summary"]["aggregate_bytes"], 4);
}

#[test]
fn test_generate_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("zipcat.toml");

    zipcat()
        .arg("--generate-config")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[scan]"));
    assert!(content.contains("extension"));
    assert!(content.contains(".gz"));
}

#[test]
fn test_config_file_values_are_overridden_by_flags() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let config_path = input.path().join("custom.toml");
    write_zip(&input.path().join("bundle.zip"), &[("a.txt", "A")]);
    fs::write(
        &config_path,
        "[scan]\nextension = \".zip\"\n\n[output]\naggregate_file = \"from_config\"\n",
    )
    .unwrap();

    zipcat()
        .arg("--config")
        .arg(&config_path)
        .arg("--dir")
        .arg(input.path())
        .arg("--outdir")
        .arg(output.path())
        .args(["--outfile", "from_flag", "-q"])
        .assert()
        .success();

    assert!(output.path().join("from_flag").exists());
    assert!(!output.path().join("from_config").exists());
}

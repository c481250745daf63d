//! Integration tests for the `fixbug` binary.
//!
//! Runs the compiled binary against real patch archives in a temp
//! directory and checks the output file, stdout and exit status.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;
use zip::write::SimpleFileOptions;

const INVENTORY_19_21: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<inventory>
  <patch_description>Database Release Update : 19.21.0.0.231017 (35643107)</patch_description>
  <bugs_fixed>
    <bug number="29213893" description="DBMS_STATS FAILING WITH ERROR ORA-01422"/>
  </bugs_fixed>
</inventory>
"#;

fn write_zip(path: &Path, members: &[(&str, &str)]) {
    let file = File::create(path).expect("should create archive");
    let mut zip = zip::ZipWriter::new(file);
    for (name, data) in members {
        zip.start_file(*name, SimpleFileOptions::default())
            .expect("should start member");
        zip.write_all(data.as_bytes()).expect("should write member");
    }
    zip.finish().expect("should finish archive");
}

/// Run the binary in `dir` with a clean `FIXBUG_*` environment.
fn fixbug(dir: &Path, args: &[&str], envs: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_fixbug"));
    cmd.current_dir(dir).args(args).env_remove("RUST_LOG");
    for (key, _) in std::env::vars() {
        if key.starts_with("FIXBUG_") {
            cmd.env_remove(key);
        }
    }
    cmd.envs(envs.iter().copied());
    cmd.output().expect("should run fixbug binary")
}

#[test]
fn test_run_writes_named_output() {
    // Given: One RU archive
    let temp_dir = TempDir::new().expect("should create temp dir");
    write_zip(
        &temp_dir.path().join("p35643107_RU_19.21.zip"),
        &[("35643107/etc/config/inventory.xml", INVENTORY_19_21)],
    );

    // When: Running with an explicit output name
    let output = fixbug(temp_dir.path(), &["bugs.txt"], &[]);

    // Then: Exit 0, path on stdout, report on disk
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "bugs.txt");

    let report = fs::read_to_string(temp_dir.path().join("bugs.txt")).expect("report exists");
    assert_eq!(
        report,
        "### RU 19.21\n \
         *** Database Release Update : 19.21.0.0.231017 (35643107)\n     \
         BUG 29213893 - DBMS_STATS FAILING WITH ERROR ORA-01422\n"
    );
}

#[test]
fn test_run_default_output_name_uses_sub_version() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    write_zip(
        &temp_dir.path().join("RU_19.21.zip"),
        &[("inventory.xml", INVENTORY_19_21)],
    );

    let output = fixbug(temp_dir.path(), &[], &[]);
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let name = stdout.trim();
    assert!(
        name.starts_with("Fixed_Bug_For_19.21.0.0.231017_") && name.ends_with(".txt"),
        "unexpected default name: {name}"
    );
    assert!(temp_dir.path().join(name).is_file());
}

#[test]
fn test_run_without_archives_exits_zero() {
    // Given: A directory with no archives
    let temp_dir = TempDir::new().expect("should create temp dir");
    fs::write(temp_dir.path().join("readme.txt"), "nothing").expect("should write file");

    let output = fixbug(temp_dir.path(), &["bugs.txt"], &[]);

    // Then: Exit 0, nothing on stdout, no report
    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
    assert!(!temp_dir.path().join("bugs.txt").exists());
}

#[test]
fn test_run_invalid_config_exits_two() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    fs::write(temp_dir.path().join("fixbug.toml"), "[scan\ndir = \".\"\n")
        .expect("should write config");

    let output = fixbug(temp_dir.path(), &[], &[]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("configuration error"), "stderr: {stderr}");
}

#[test]
fn test_run_missing_explicit_config_exits_two() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let output = fixbug(
        temp_dir.path(),
        &[],
        &[("FIXBUG_CONFIG", "/nonexistent/fixbug.toml")],
    );
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_run_unwritable_output_exits_one() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    write_zip(
        &temp_dir.path().join("RU_19.21.zip"),
        &[("inventory.xml", INVENTORY_19_21)],
    );

    let output = fixbug(temp_dir.path(), &["no/such/dir/bugs.txt"], &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_run_scan_dir_from_config_file() {
    // Given: Archives in a subdirectory named by fixbug.toml
    let temp_dir = TempDir::new().expect("should create temp dir");
    let patches = temp_dir.path().join("patches");
    fs::create_dir(&patches).expect("should create patches dir");
    write_zip(&patches.join("RU_19.21.zip"), &[("inventory.xml", INVENTORY_19_21)]);
    fs::write(
        temp_dir.path().join("fixbug.toml"),
        "[general]\nlog_level = \"warn\"\n\n[scan]\ndir = \"patches\"\n",
    )
    .expect("should write config");

    let output = fixbug(temp_dir.path(), &["bugs.txt"], &[]);
    assert_eq!(output.status.code(), Some(0));
    let report = fs::read_to_string(temp_dir.path().join("bugs.txt")).expect("report exists");
    assert!(report.contains("BUG 29213893"));
}

#[test]
fn test_run_scan_dir_env_override() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let patches = TempDir::new().expect("should create patches dir");
    write_zip(
        &patches.path().join("RU_19.21.zip"),
        &[("inventory.xml", INVENTORY_19_21)],
    );
    let patches_dir = patches.path().to_string_lossy().into_owned();

    let output = fixbug(
        temp_dir.path(),
        &["bugs.txt"],
        &[("FIXBUG_SCAN_DIR", patches_dir.as_str())],
    );
    assert_eq!(output.status.code(), Some(0));
    assert!(temp_dir.path().join("bugs.txt").is_file());
}

#[test]
fn test_diagnostics_do_not_pollute_stdout() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    write_zip(
        &temp_dir.path().join("RU_19.21.zip"),
        &[("inventory.xml", INVENTORY_19_21)],
    );

    let output = fixbug(
        temp_dir.path(),
        &["bugs.txt"],
        &[("FIXBUG_GENERAL_LOG_FORMAT", "json"), ("FIXBUG_GENERAL_LOG_LEVEL", "debug")],
    );
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "bugs.txt");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("found descriptor"), "stderr: {stderr}");
}

#[test]
fn test_run_invalid_scan_value_exits_two() {
    // Given: A syntactically valid config with an out-of-range scan value
    let temp_dir = TempDir::new().expect("should create temp dir");
    write_zip(
        &temp_dir.path().join("RU_19.21.zip"),
        &[("inventory.xml", INVENTORY_19_21)],
    );
    fs::write(
        temp_dir.path().join("fixbug.toml"),
        "[scan]\nmax_descriptor_size = 0\n",
    )
    .expect("should write config");

    // When: Running
    let output = fixbug(temp_dir.path(), &["bugs.txt"], &[]);

    // Then: Config error, no report
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("scan.max_descriptor_size"), "stderr: {stderr}");
    assert!(!temp_dir.path().join("bugs.txt").exists());
}

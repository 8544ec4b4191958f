use serial_test::serial;
use sift_kernel::config::{ConfigError, load_config, load_config_with_env};
use sift_kernel::domain::config::SiftConfig;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{TempDir, tempdir};

/// Points the re-executed test binary at the sample file.
const CHILD_CONFIG_PATH: &str = "KERNEL_TEST_CONFIG_PATH";

const SAMPLE: &str = r#"
[database]
url = "mem://"
namespace = "sift"
database = "test"

[batch]
page_size = 25

[[content_types]]
uid = "api::movie.movie"
name = "movie"

[[content_types]]
uid = "plugin::upload.file"
name = "file"
collection = "files"
"#;

#[test]
fn loads_file_with_defaults_for_missing_sections() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("sift.toml");
    fs::write(&path, SAMPLE)?;

    let cfg: SiftConfig = load_config(Some(&path))?;

    assert_eq!(cfg.database.database, "test");
    assert_eq!(cfg.batch.page_size, 25);
    assert_eq!(cfg.logger.level, "info");
    assert_eq!(cfg.content_types.len(), 2);
    assert_eq!(cfg.content_types[1].collection_name(), "files");
    Ok(())
}

#[test]
fn missing_file_is_reported() {
    let dir = tempdir().expect("tempdir");
    let err = load_config::<SiftConfig>(Some(dir.path().join("absent.toml")))
        .expect_err("missing file must fail");
    assert!(matches!(err, ConfigError::Config { context: Some(_), .. }));
}

fn write_sample() -> Result<(TempDir, PathBuf), std::io::Error> {
    let dir = tempdir()?;
    let path = dir.path().join("sift.toml");
    fs::write(&path, SAMPLE)?;
    Ok((dir, path))
}

fn assert_overridden(cfg: &SiftConfig) {
    assert_eq!(cfg.batch.page_size, 7);
    assert_eq!(cfg.database.url, "ws://x");
    assert_eq!(cfg.database.database, "test");
    assert_eq!(cfg.content_types.len(), 2);
}

#[test]
fn environment_overrides_win_over_file() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, path) = write_sample()?;

    let cfg: SiftConfig = load_config_with_env(
        Some(&path),
        [("SIFT__BATCH__PAGE_SIZE", "7"), ("SIFT__DATABASE__URL", "ws://x"), ("OTHER__URL", "y")],
    )?;

    assert_overridden(&cfg);
    Ok(())
}

#[test]
#[serial]
fn process_environment_overrides_win_over_file() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, path) = write_sample()?;

    let status = Command::new(std::env::current_exe()?)
        .args(["overrides_read_from_process_environment", "--exact", "--test-threads=1"])
        .env(CHILD_CONFIG_PATH, &path)
        .env("SIFT__BATCH__PAGE_SIZE", "7")
        .env("SIFT__DATABASE__URL", "ws://x")
        .status()?;

    assert!(status.success(), "child test run failed: {status}");
    Ok(())
}

/// Runs for real only when re-executed by `process_environment_overrides_win_over_file`.
#[test]
fn overrides_read_from_process_environment() {
    let Some(path) = std::env::var_os(CHILD_CONFIG_PATH) else {
        return;
    };

    let cfg: SiftConfig = load_config(Some(Path::new(&path))).expect("config with overrides");
    assert_overridden(&cfg);
}

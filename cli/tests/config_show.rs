use std::path::Path;

use anyhow::Result;
use predicates::str::contains;
use pretty_assertions::assert_eq;
use serde_json::Value as JsonValue;
use tempfile::TempDir;

fn illustra_command(home: &Path) -> Result<assert_cmd::Command> {
    let mut cmd = assert_cmd::Command::cargo_bin("illustra")?;
    cmd.env("ILLUSTRA_HOME", home)
        .env_remove("ILLUSTRA_BASE_URL")
        .env_remove("ILLUSTRA_ACCESS_TOKEN")
        .env_remove("RUST_LOG");
    Ok(cmd)
}

#[test]
fn show_reports_defaults() -> Result<()> {
    let home = TempDir::new()?;

    let output = illustra_command(home.path())?
        .args(["config", "show", "--json"])
        .output()?;
    assert!(output.status.success());

    let parsed: JsonValue = serde_json::from_slice(&output.stdout)?;
    assert_eq!(parsed["config"]["base_url"], "http://localhost:8000/api");
    assert_eq!(parsed["config"]["reset_parts_on_engine_change"], true);
    assert_eq!(parsed["home"], &*home.path().to_string_lossy());
    Ok(())
}

#[test]
fn flag_overrides_file_and_environment() -> Result<()> {
    let home = TempDir::new()?;
    std::fs::write(
        home.path().join("config.toml"),
        "base_url = \"https://file.example.com/api\"\ncache_ttl_secs = 5\n",
    )?;

    let output = illustra_command(home.path())?
        .env("ILLUSTRA_BASE_URL", "https://env.example.com/api")
        .args([
            "config",
            "show",
            "--json",
            "--base-url",
            "https://flag.example.com/api",
        ])
        .output()?;
    assert!(output.status.success());

    let parsed: JsonValue = serde_json::from_slice(&output.stdout)?;
    assert_eq!(parsed["config"]["base_url"], "https://flag.example.com/api");
    assert_eq!(parsed["config"]["cache_ttl_secs"], 5);
    Ok(())
}

#[test]
fn invalid_config_fails_with_path() -> Result<()> {
    let home = TempDir::new()?;
    std::fs::write(home.path().join("config.toml"), "timeout_secs = \"forever\"")?;

    illustra_command(home.path())?
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(contains("config.toml"));
    Ok(())
}

#[test]
fn status_without_credentials() -> Result<()> {
    let home = TempDir::new()?;

    illustra_command(home.path())?
        .args(["auth", "status"])
        .assert()
        .success()
        .stdout(contains("Not signed in"));
    Ok(())
}

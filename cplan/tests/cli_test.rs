//! Tests for the cplan binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// =============================================================================
// Helpers
// =============================================================================

/// cplan isolated from the user's config, logs and API keys
fn cplan(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cplan").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("XDG_DATA_HOME", home.path().join("data"))
        .env_remove("OPENAI_API_KEY")
        .env_remove("GOOGLE_API_KEY")
        .env_remove("ANTHROPIC_API_KEY");
    cmd
}

// =============================================================================
// Informational commands
// =============================================================================

#[test]
fn test_graph_prints_every_step() {
    let home = TempDir::new().unwrap();
    cplan(&home)
        .arg("graph")
        .assert()
        .success()
        .stdout(predicate::str::contains("decompose"))
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("advise"))
        .stdout(predicate::str::contains("finalize"));
}

#[test]
fn test_models_lists_all_providers() {
    let home = TempDir::new().unwrap();
    cplan(&home)
        .arg("models")
        .assert()
        .success()
        .stdout(predicate::str::contains("gpt-4o"))
        .stdout(predicate::str::contains("gemini-2.0-flash"))
        .stdout(predicate::str::contains("claude-sonnet-4-20250514"));
}

#[test]
fn test_models_filtered_by_provider() {
    let home = TempDir::new().unwrap();
    cplan(&home)
        .args(["models", "--provider", "google"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gemini-1.5-pro"))
        .stdout(predicate::str::contains("gpt-4o").not());
}

#[test]
fn test_models_rejects_unknown_provider() {
    let home = TempDir::new().unwrap();
    cplan(&home)
        .args(["models", "--provider", "cohere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported provider: cohere"));
}

#[test]
fn test_logs_written_under_data_dir() {
    let home = TempDir::new().unwrap();
    cplan(&home).arg("graph").assert().success();
    assert!(home.path().join("data/codeplanner/logs/codeplanner.log").exists());
}

// =============================================================================
// Configuration checks
// =============================================================================

#[test]
fn test_check_missing_key_fails() {
    let home = TempDir::new().unwrap();
    cplan(&home)
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("OPENAI_API_KEY"));
}

#[test]
fn test_check_with_key_passes() {
    let home = TempDir::new().unwrap();
    cplan(&home)
        .arg("check")
        .env("OPENAI_API_KEY", "sk-test")
        .assert()
        .success()
        .stdout(predicate::str::contains("Model:    gpt-4o"))
        .stdout(predicate::str::contains("Configuration OK"));
}

#[test]
fn test_check_unknown_model_fails() {
    let home = TempDir::new().unwrap();
    cplan(&home)
        .args(["check", "--model", "gpt-9"])
        .env("OPENAI_API_KEY", "sk-test")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Model 'gpt-9' is not available"));
}

#[test]
fn test_check_reads_config_file() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("planner.yml");
    std::fs::write(
        &config,
        "llm:\n  provider: google\n  model: gemini-1.5-pro\n  providers:\n    google:\n      api-key-env: CPLAN_TEST_GOOGLE_KEY\n",
    )
    .unwrap();

    cplan(&home)
        .args(["--config", config.to_str().unwrap(), "check"])
        .env("CPLAN_TEST_GOOGLE_KEY", "g-test")
        .assert()
        .success()
        .stdout(predicate::str::contains("Provider: google"))
        .stdout(predicate::str::contains("API key:  $CPLAN_TEST_GOOGLE_KEY"));
}

#[test]
fn test_project_config_is_picked_up() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join(".codeplanner.yml"), "llm:\n  model: claude-opus-4-20250514\n  provider: auto\n").unwrap();

    cplan(&home)
        .arg("check")
        .env("ANTHROPIC_API_KEY", "a-test")
        .assert()
        .success()
        .stdout(predicate::str::contains("Provider: anthropic"));
}

// =============================================================================
// Analyze argument handling
// =============================================================================

#[test]
fn test_analyze_rejects_depth_out_of_range() {
    let home = TempDir::new().unwrap();
    cplan(&home)
        .args(["analyze", "Build a blog", "--max-depth", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Depth must be between 1 and 5"));
}

#[test]
fn test_analyze_without_key_fails_before_any_request() {
    let home = TempDir::new().unwrap();
    cplan(&home)
        .args(["analyze", "Build a blog", "--provider", "google", "--model", "gemini-2.0-flash"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GOOGLE_API_KEY"));
}

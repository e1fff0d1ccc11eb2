//! CLI tests for the file-based stage flow.

use assert_cmd::Command;
use indoc::indoc;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const INTERNET_USERS: &str = indoc! {"
    country_name,country_iso,year,value
    United States,USA,2020,90.0
    Germany,DEU,2021,95.0
    Japan,JPN,2021,83.0
    Kenya,KEN,2021,
"};

const GDP_PER_CAPITA: &str = indoc! {"
    country_name,country_iso,year,value
    United States,USA,2020,65000.0
    United States,USA,2019,60000.0
    Germany,DEU,2021,50000.0
    Japan,JPN,2021,40000.0
    France,FRA,2021,45000.0
"};

fn ai_maturity(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ai-maturity"));
    cmd.current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("AI_MATURITY_CONFIG")
        .arg("--data-dir")
        .arg(dir);
    cmd
}

fn write_raw_data(dir: &Path) {
    let raw = dir.join("data").join("raw_data");
    fs::create_dir_all(&raw).unwrap();
    fs::write(raw.join("world_bank_internet_users.csv"), INTERNET_USERS).unwrap();
    fs::write(raw.join("world_bank_gdp_per_capita.csv"), GDP_PER_CAPITA).unwrap();
}

#[test]
fn index_without_raw_data_names_collect() {
    let dir = TempDir::new().unwrap();

    let output = ai_maturity(dir.path()).arg("index").output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("world_bank_internet_users.csv"), "stderr: {stderr}");
    assert!(stderr.contains("ai-maturity collect"), "stderr: {stderr}");
    assert!(!dir.path().join("data/processed_data/ai_maturity_index.csv").exists());
}

#[test]
fn view_without_index_names_index() {
    let dir = TempDir::new().unwrap();

    let output = ai_maturity(dir.path()).arg("view").output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ai_maturity_index.csv"), "stderr: {stderr}");
    assert!(stderr.contains("ai-maturity index"), "stderr: {stderr}");
}

#[test]
fn index_then_view_as_json() {
    let dir = TempDir::new().unwrap();
    write_raw_data(dir.path());

    let output = ai_maturity(dir.path()).arg("index").output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("AI Maturity Index calculated and saved to"));

    let index = dir.path().join("data/processed_data/ai_maturity_index.csv");
    assert!(index.exists());

    let output = ai_maturity(dir.path())
        .args(["view", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let document: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let countries = document["countries"].as_array().unwrap();
    let codes: Vec<&str> = countries
        .iter()
        .map(|c| c["country_iso"].as_str().unwrap())
        .collect();
    assert_eq!(document["total_countries"], 3);
    assert_eq!(codes.len(), 3);
    for code in ["USA", "DEU", "JPN"] {
        assert!(codes.contains(&code));
    }
    let indexes: Vec<f64> = countries
        .iter()
        .map(|c| c["ai_maturity_index"].as_f64().unwrap())
        .collect();
    assert!(indexes.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn same_seed_writes_identical_index() {
    let dir = TempDir::new().unwrap();
    write_raw_data(dir.path());
    let index = dir.path().join("data/processed_data/ai_maturity_index.csv");

    ai_maturity(dir.path()).args(["index", "--seed", "7"]).assert().success();
    let first = fs::read_to_string(&index).unwrap();
    ai_maturity(dir.path()).args(["index", "--seed", "7"]).assert().success();
    let second = fs::read_to_string(&index).unwrap();

    assert_eq!(first, second);
}

#[test]
fn prepared_scores_drop_unscored_countries() {
    let dir = TempDir::new().unwrap();
    write_raw_data(dir.path());
    let scores = dir.path().join("scores.csv");
    fs::write(
        &scores,
        indoc! {"
            country_iso,ai_use_cases_score,regulation_score,governance_frameworks_score,talent_availability_score
            USA,4.5,3.5,4.0,4.2
            DEU,3.9,4.4,4.1,3.8
        "},
    )
    .unwrap();

    ai_maturity(dir.path())
        .arg("index")
        .arg("--scores")
        .arg(&scores)
        .assert()
        .success();

    let text = fs::read_to_string(dir.path().join("data/processed_data/ai_maturity_index.csv")).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(!text.contains("JPN"));
}

#[test]
fn non_finite_prepared_score_fails_without_writing_index() {
    let dir = TempDir::new().unwrap();
    write_raw_data(dir.path());
    let scores = dir.path().join("scores.csv");
    fs::write(
        &scores,
        indoc! {"
            country_iso,ai_use_cases_score,regulation_score,governance_frameworks_score,talent_availability_score
            USA,NaN,3,3,3
            DEU,2,2,2,2
            JPN,5,5,5,5
        "},
    )
    .unwrap();

    let output = ai_maturity(dir.path())
        .arg("index")
        .arg("--scores")
        .arg(&scores)
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 2"), "stderr: {stderr}");
    assert!(!dir.path().join("data/processed_data/ai_maturity_index.csv").exists());
}

#[test]
fn render_writes_visuals_listed_by_view() {
    let dir = TempDir::new().unwrap();
    write_raw_data(dir.path());

    ai_maturity(dir.path()).arg("index").assert().success();
    ai_maturity(dir.path()).arg("render").assert().success();

    let visuals = dir.path().join("visuals");
    for name in [
        "ai_maturity_bar_chart.svg",
        "ai_maturity_heatmap.svg",
        "ai_maturity_top_10_bar_chart.svg",
        "ai_maturity_top_10_heatmap.svg",
        "ai_maturity_index.html",
    ] {
        assert!(visuals.join(name).exists(), "missing {name}");
    }

    let output = ai_maturity(dir.path())
        .args(["view", "--format", "markdown", "--top", "2"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Top 2 of 3 countries."));
    assert!(stdout.contains("ai_maturity_index.html"));
}

#[test]
fn init_writes_config_once() {
    let dir = TempDir::new().unwrap();

    ai_maturity(dir.path()).arg("init").assert().success();
    let config = dir.path().join(".ai-maturity.toml");
    assert!(fs::read_to_string(&config).unwrap().contains("[weights]"));

    ai_maturity(dir.path()).arg("init").assert().failure();
    ai_maturity(dir.path()).args(["init", "--force"]).assert().success();
}

mod common;

use assert_cmd::prelude::*;
use common::sample_csv;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

fn write_fixture(dir: &Path) -> (PathBuf, PathBuf) {
    let data = dir.join("loc.csv");
    fs::write(&data, sample_csv()).unwrap();
    let config = dir.join("locmap.toml");
    fs::write(
        &config,
        "commit_url_base = \"https://github.com/owner/repo/commit/\"\n",
    )
    .unwrap();
    (data, config)
}

fn locmap(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("locmap").unwrap();
    cmd.arg("--config").arg(config);
    cmd
}

fn json_output(cmd: &mut Command) -> serde_json::Value {
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).unwrap()
}

#[test]
fn stats_json_outputs_summary() {
    let dir = tempdir().unwrap();
    let (data, config) = write_fixture(dir.path());

    let v = json_output(locmap(&config).arg("stats").arg(&data).arg("--json"));
    assert_eq!(v["version"], 1);
    assert_eq!(v["summary"]["total_rows"], 6);
    assert_eq!(v["summary"]["total_commits"], 3);
    assert_eq!(v["summary"]["distinct_files"], 4);
    assert_eq!(v["summary"]["busiest_period"], "morning");
}

#[test]
fn commits_json_respects_progress() {
    let dir = tempdir().unwrap();
    let (data, config) = write_fixture(dir.path());

    let all = json_output(locmap(&config).arg("commits").arg(&data).arg("--json"));
    let commits = all["commits"].as_array().unwrap();
    assert_eq!(commits.len(), 3);
    assert!(commits[0].get("rows").is_none());
    assert_eq!(commits[0]["url"], "https://github.com/owner/repo/commit/aaa111");

    let first = json_output(
        locmap(&config)
            .arg("commits")
            .arg(&data)
            .args(["--progress", "0", "--json"]),
    );
    assert_eq!(first["commits"].as_array().unwrap().len(), 1);
    assert_eq!(first["cutoff"], "2024-01-01T09:00:00+00:00");
}

#[test]
fn scatter_json_outputs_points_and_ticks() {
    let dir = tempdir().unwrap();
    let (data, config) = write_fixture(dir.path());

    let v = json_output(locmap(&config).arg("scatter").arg(&data).arg("--json"));
    let points = v["points"].as_array().unwrap();
    assert_eq!(points.len(), 3);
    assert_eq!(points[0]["commit_id"], "bbb222");
    assert!(!v["x_ticks"].as_array().unwrap().is_empty());
    assert_eq!(v["y_ticks"][0]["label"], "00:00");
}

#[test]
fn select_without_brush_breaks_down_visible_lines() {
    let dir = tempdir().unwrap();
    let (data, config) = write_fixture(dir.path());

    let v = json_output(locmap(&config).arg("select").arg(&data).arg("--json"));
    assert_eq!(v["selected_count"], 0);
    assert_eq!(v["message"], "No commits selected");
    assert_eq!(v["breakdown"][0]["type"], "js");
    assert_eq!(v["breakdown"][0]["count"], 4);
}

#[test]
fn select_with_whole_plot_brush_selects_everything() {
    let dir = tempdir().unwrap();
    let (data, config) = write_fixture(dir.path());

    let v = json_output(
        locmap(&config)
            .arg("select")
            .arg(&data)
            .args(["--brush", "1000,600,0,0", "--json"]),
    );
    assert_eq!(v["selected_count"], 3);
    assert_eq!(v["message"], "3 commits selected");
}

#[test]
fn malformed_log_fails() {
    let dir = tempdir().unwrap();
    let (_, config) = write_fixture(dir.path());
    let bad = dir.path().join("bad.csv");
    fs::write(&bad, "commit,author\nabc,Ada\n").unwrap();

    locmap(&config).arg("stats").arg(&bad).assert().failure();
}

#[test]
fn projects_json_limits_and_searches() {
    let dir = tempdir().unwrap();
    let (_, config) = write_fixture(dir.path());
    let projects = dir.path().join("projects.json");
    fs::write(
        &projects,
        r#"[{"title":"A","image":"","description":"first","year":"2024"},
            {"title":"B","image":"","description":"second","year":"2023"},
            {"title":"C","image":"","description":"third","year":"2024"},
            {"title":"D","image":"","description":"fourth","year":"2022"}]"#,
    )
    .unwrap();

    let v = json_output(
        locmap(&config)
            .arg("projects")
            .arg("--source")
            .arg(&projects)
            .args(["--limit", "3", "--json"]),
    );
    assert_eq!(v["count"], 3);
    assert!(v.get("per_year").is_none());

    let v = json_output(
        locmap(&config)
            .arg("projects")
            .arg("--source")
            .arg(&projects)
            .args(["--search", "FOURTH", "--json"]),
    );
    assert_eq!(v["count"], 1);
    assert_eq!(v["projects"][0]["title"], "D");

    let v = json_output(
        locmap(&config)
            .arg("projects")
            .arg("--source")
            .arg(&projects)
            .args(["--by-year", "--json"]),
    );
    assert_eq!(v["per_year"]["2024"], 2);
    assert_eq!(v["per_year"]["2023"], 1);
    assert_eq!(v["per_year"]["2022"], 1);
}

#[test]
fn theme_round_trips_through_store() {
    let dir = tempdir().unwrap();
    let (_, config) = write_fixture(dir.path());
    let store = dir.path().join("prefs.toml");

    let out = locmap(&config)
        .arg("theme")
        .arg("--store")
        .arg(&store)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert!(String::from_utf8(out).unwrap().starts_with("auto"));

    locmap(&config)
        .args(["theme", "light", "--store"])
        .arg(&store)
        .assert()
        .success();

    let out = locmap(&config)
        .arg("theme")
        .arg("--store")
        .arg(&store)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert!(String::from_utf8(out).unwrap().starts_with("light"));
}

use locmap::config::Config;
use locmap::portfolio::github::parse_profile;
use locmap::portfolio::projects::parse_projects;
use locmap::portfolio::{filter_projects, latest, load_projects, profile_url, projects_per_year};
use locmap::theme::{ColorScheme, PreferenceStore};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

const PROJECTS: &str = r#"[
  {"title": "Lorem Ipsum", "image": "images/a.png", "description": "A charting study", "year": "2024"},
  {"title": "Haiku Bot", "image": "images/b.png", "description": "Poems on demand", "year": 2023},
  {"title": "Commit Viz", "image": "images/c.png", "description": "Scatterplot of commits", "year": "2024"},
  {"title": "Old Site", "description": "First portfolio", "year": "2022"}
]"#;

#[test]
fn projects_accept_numeric_years_and_missing_images() {
    let projects = parse_projects(PROJECTS).unwrap();
    assert_eq!(projects.len(), 4);
    assert_eq!(projects[1].year, "2023");
    assert_eq!(projects[3].image, "");
}

#[test]
fn latest_takes_a_prefix() {
    let projects = parse_projects(PROJECTS).unwrap();
    let titles: Vec<&str> = latest(&projects, 3).iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Lorem Ipsum", "Haiku Bot", "Commit Viz"]);
    assert_eq!(latest(&projects, 10).len(), 4);
}

#[test]
fn search_matches_any_field_ignoring_case() {
    let projects = parse_projects(PROJECTS).unwrap();
    let by_text: Vec<&str> = filter_projects(&projects, "SCATTER")
        .iter()
        .map(|p| p.title.as_str())
        .collect();
    assert_eq!(by_text, vec!["Commit Viz"]);
    assert_eq!(filter_projects(&projects, "2024").len(), 2);
    assert_eq!(filter_projects(&projects, "  ").len(), 4);
    assert!(filter_projects(&projects, "nothing like this").is_empty());
}

#[test]
fn projects_are_counted_per_year() {
    let projects = parse_projects(PROJECTS).unwrap();
    assert_eq!(
        projects_per_year(&projects),
        vec![
            ("2022".to_string(), 1),
            ("2023".to_string(), 1),
            ("2024".to_string(), 2)
        ]
    );
}

#[test]
fn projects_load_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("projects.json");
    fs::write(&path, PROJECTS).unwrap();
    assert_eq!(load_projects(path.to_str().unwrap()).len(), 4);
}

#[test]
fn unreadable_project_source_yields_nothing() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    assert!(load_projects(missing.to_str().unwrap()).is_empty());

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{ not json").unwrap();
    assert!(load_projects(broken.to_str().unwrap()).is_empty());
}

#[test]
fn github_profile_ignores_extra_fields() {
    let body = r#"{"login": "octocat", "public_repos": 8, "public_gists": 2, "followers": 100, "following": 3, "bio": null}"#;
    let profile = parse_profile(body).unwrap();
    assert_eq!(profile.public_repos, 8);
    assert_eq!(profile.public_gists, 2);
    assert_eq!(profile.followers, 100);
    assert_eq!(profile.following, 3);
    assert!(parse_profile(r#"{"message": "Not Found"}"#).is_err());
}

#[test]
fn github_url_is_built_from_api_base() {
    assert_eq!(profile_url("https://api.github.com/", "octocat"), "https://api.github.com/users/octocat");
}

#[test]
fn color_scheme_defaults_to_auto_and_persists() {
    let dir = tempdir().unwrap();
    let store = PreferenceStore::at(dir.path().join("nested").join("preferences.toml"));

    assert_eq!(store.load().unwrap(), ColorScheme::Auto);
    store.save(ColorScheme::Dark).unwrap();
    assert_eq!(store.load().unwrap(), ColorScheme::Dark);

    let saved = fs::read_to_string(store.path()).unwrap();
    assert!(saved.contains("colorScheme = \"dark\""));
}

#[test]
fn color_scheme_parses_and_maps_to_css() {
    assert_eq!("Light".parse::<ColorScheme>().unwrap(), ColorScheme::Light);
    assert!("sepia".parse::<ColorScheme>().is_err());
    assert_eq!(ColorScheme::Auto.css_value(), "light dark");
    assert_eq!(ColorScheme::Dark.to_string(), "dark");
}

#[test]
fn config_fills_in_defaults() {
    let config = Config::parse(
        r#"
commit_url_base = "https://github.com/owner/repo/commit/"

[plot]
width = 800.0
"#,
    )
    .unwrap();
    assert_eq!(config.commit_url_base.as_deref(), Some("https://github.com/owner/repo/commit/"));
    assert_eq!(config.plot.width, 800.0);
    assert_eq!(config.plot.height, 600.0);
    assert_eq!(config.plot.radius().max, 30.0);
    assert_eq!(config.github_api_url, "https://api.github.com");
}

#[test]
fn config_rejects_impossible_plot() {
    assert!(Config::parse("[plot]\nmin_radius = 40.0\n").is_err());
    assert!(Config::parse("[plot]\nwidth = 20.0\n").is_err());
}

#[test]
fn explicit_config_file_must_exist() {
    let dir = tempdir().unwrap();
    assert!(Config::load(Some(dir.path().join("nope.toml").as_path())).is_err());

    let path = dir.path().join("locmap.toml");
    fs::write(&path, "projects_source = \"data/projects.json\"\n").unwrap();
    assert_eq!(Config::load(Some(path.as_path())).unwrap().projects_source, "data/projects.json");
}

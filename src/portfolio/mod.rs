pub mod github;
pub mod projects;

pub use github::{fetch_github_profile, profile_url, GithubProfile};
pub use projects::{filter_projects, latest, load_projects, projects_per_year, Project};

use crate::error::Result;
use std::time::Duration;

const USER_AGENT: &str = concat!("locmap/", env!("CARGO_PKG_VERSION"));

pub(crate) fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// One GET, no retry. Non-2xx statuses are errors.
pub(crate) fn http_get(url: &str) -> Result<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent(USER_AGENT)
        .build()?;
    let response = client.get(url).send()?.error_for_status()?;
    Ok(response.text()?)
}

use super::http_get;
use crate::error::Result;
use log::{debug, error};
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// The four profile counters shown on the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubProfile {
    pub public_repos: u64,
    pub public_gists: u64,
    pub followers: u64,
    pub following: u64,
}

pub fn profile_url(api_base: &str, username: &str) -> String {
    format!("{}/users/{}", api_base.trim_end_matches('/'), username)
}

pub fn parse_profile(text: &str) -> Result<GithubProfile> {
    Ok(serde_json::from_str(text)?)
}

/// `None` when the request or the response body fails.
pub fn fetch_github_profile(api_base: &str, username: &str) -> Option<GithubProfile> {
    let url = profile_url(api_base, username);
    debug!("Fetching GitHub profile from {url}");
    match http_get(&url).and_then(|body| parse_profile(&body)) {
        Ok(profile) => Some(profile),
        Err(e) => {
            error!("Error fetching GitHub profile for {username}: {e}");
            None
        }
    }
}

use super::{http_get, is_url};
use crate::error::Result;
use log::{debug, error};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub year: String,
}

impl Project {
    fn search_text(&self) -> String {
        [&self.title, &self.image, &self.description, &self.year]
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join("\n")
            .to_lowercase()
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Text(String),
        Number(i64),
    }

    Ok(match Year::deserialize(deserializer)? {
        Year::Text(s) => s,
        Year::Number(n) => n.to_string(),
    })
}

/// Reads the project list from an http(s) URL or a file path. Failures are
/// logged and produce an empty list.
pub fn load_projects(source: &str) -> Vec<Project> {
    match fetch_projects(source) {
        Ok(projects) => {
            debug!("Loaded {} projects from {}", projects.len(), source);
            projects
        }
        Err(e) => {
            error!("Error fetching or parsing project list from {source}: {e}");
            Vec::new()
        }
    }
}

pub fn fetch_projects(source: &str) -> Result<Vec<Project>> {
    let text = if is_url(source) {
        http_get(source)?
    } else {
        std::fs::read_to_string(source)?
    };
    parse_projects(&text)
}

pub fn parse_projects(text: &str) -> Result<Vec<Project>> {
    Ok(serde_json::from_str(text)?)
}

/// The first `n` projects, in list order.
pub fn latest(projects: &[Project], n: usize) -> &[Project] {
    &projects[..n.min(projects.len())]
}

/// Case-insensitive match against every field of each project.
pub fn filter_projects<'a>(projects: &'a [Project], query: &str) -> Vec<&'a Project> {
    let query = query.trim().to_lowercase();
    projects
        .iter()
        .filter(|p| query.is_empty() || p.search_text().contains(&query))
        .collect()
}

/// Project counts per year, ordered by year.
pub fn projects_per_year<'a, I>(projects: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a Project>,
{
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for project in projects {
        *counts.entry(project.year.as_str()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(year, count)| (year.to_string(), count))
        .collect()
}

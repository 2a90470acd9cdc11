use chrono::{DateTime, FixedOffset, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::portfolio::Project;
use crate::scatter::{ScatterPoint, Tick};
use crate::selection::BreakdownEntry;
use crate::stats::Summary;

pub const SCHEMA_VERSION: u32 = 1;

/// One changed source line from the change log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRow {
    pub commit: String,
    pub author: String,
    pub date: DateTime<FixedOffset>,
    pub time: String,
    pub timezone: String,
    pub datetime: DateTime<FixedOffset>,
    pub line: u32,
    pub depth: u32,
    pub length: u32,
    pub file: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// All rows sharing one commit id. Serializing a commit emits the summary
/// fields only; the rows stay behind `rows()`.
#[derive(Debug, Clone, Serialize)]
pub struct Commit {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub author: String,
    pub date: DateTime<FixedOffset>,
    pub time: String,
    pub timezone: String,
    pub datetime: DateTime<FixedOffset>,
    pub hour_fraction: f64,
    pub total_lines: usize,
    #[serde(skip)]
    rows: Arc<[ChangeRow]>,
}

impl Commit {
    pub fn new(id: String, url: Option<String>, first: &ChangeRow, rows: Arc<[ChangeRow]>) -> Self {
        Self {
            id,
            url,
            author: first.author.clone(),
            date: first.date,
            time: first.time.clone(),
            timezone: first.timezone.clone(),
            datetime: first.datetime,
            hour_fraction: hour_fraction(&first.datetime),
            total_lines: rows.len(),
            rows,
        }
    }

    pub fn rows(&self) -> &[ChangeRow] {
        &self.rows
    }

    /// Hour of day in the commit's own offset.
    pub fn local_hour(&self) -> u32 {
        self.datetime.hour()
    }
}

impl PartialEq for Commit {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.url == other.url
            && self.author == other.author
            && self.date == other.date
            && self.datetime == other.datetime
            && self.hour_fraction == other.hour_fraction
            && self.total_lines == other.total_lines
    }
}

pub fn hour_fraction(datetime: &DateTime<FixedOffset>) -> f64 {
    datetime.hour() as f64 + datetime.minute() as f64 / 60.0
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub summary: Summary,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommitsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub progress: f64,
    pub cutoff: Option<DateTime<FixedOffset>>,
    pub commits: Vec<Commit>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScatterOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub progress: f64,
    pub cutoff: Option<DateTime<FixedOffset>>,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectionOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub progress: f64,
    pub visible_count: usize,
    pub selected_count: usize,
    pub message: String,
    pub selected: Vec<String>,
    pub breakdown: Vec<BreakdownEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub count: usize,
    pub projects: Vec<Project>,
    /// Projects per year, present with `--by-year`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_year: Option<BTreeMap<String, usize>>,
}

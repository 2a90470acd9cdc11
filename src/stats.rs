use crate::model::{ChangeRow, Commit};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// Declaration order doubles as the tie-break order.
    pub const ALL: [TimeOfDay; 4] = [
        TimeOfDay::Morning,
        TimeOfDay::Afternoon,
        TimeOfDay::Evening,
        TimeOfDay::Night,
    ];

    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => TimeOfDay::Morning,
            12..=17 => TimeOfDay::Afternoon,
            18..=23 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
            TimeOfDay::Night => "Night",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_rows: usize,
    pub total_commits: usize,
    pub distinct_files: usize,
    pub mean_depth: f64,
    pub max_depth: u32,
    pub longest_line: u32,
    pub busiest_period: Option<TimeOfDay>,
}

pub fn summarize(rows: &[ChangeRow], commits: &[Commit]) -> Summary {
    Summary {
        total_rows: rows.len(),
        total_commits: commits.len(),
        distinct_files: rows.iter().map(|r| r.file.as_str()).collect::<HashSet<_>>().len(),
        mean_depth: mean_file_depth(rows),
        max_depth: rows.iter().map(|r| r.depth).max().unwrap_or(0),
        longest_line: rows.iter().map(|r| r.length).max().unwrap_or(0),
        busiest_period: busiest_period(commits),
    }
}

/// One depth per file, the last row seen for that file wins.
pub fn mean_file_depth(rows: &[ChangeRow]) -> f64 {
    let mut depths: HashMap<&str, u32> = HashMap::new();
    for row in rows {
        depths.insert(row.file.as_str(), row.depth);
    }
    if depths.is_empty() {
        return 0.0;
    }
    depths.values().map(|d| *d as f64).sum::<f64>() / depths.len() as f64
}

pub fn busiest_period(commits: &[Commit]) -> Option<TimeOfDay> {
    if commits.is_empty() {
        return None;
    }
    let mut counts = [0usize; 4];
    for commit in commits {
        let period = TimeOfDay::from_hour(commit.local_hour());
        if let Some(i) = TimeOfDay::ALL.iter().position(|p| *p == period) {
            counts[i] += 1;
        }
    }

    let mut best = 0;
    for i in 1..counts.len() {
        if counts[i] > counts[best] {
            best = i;
        }
    }
    Some(TimeOfDay::ALL[best])
}

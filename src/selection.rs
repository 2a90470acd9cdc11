use crate::model::Commit;
use crate::scatter::Projection;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Brush rectangle in plot pixels, always stored with `x0 <= x1`, `y0 <= y1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    /// Normalizes a drag from `(ax, ay)` to `(bx, by)` in any direction.
    pub fn from_corners(ax: f64, ay: f64, bx: f64, by: f64) -> Self {
        Self {
            x0: ax.min(bx),
            y0: ay.min(by),
            x1: ax.max(bx),
            y1: ay.max(by),
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.x0 <= x && x <= self.x1 && self.y0 <= y && y <= self.y1
    }
}

impl FromStr for Rect {
    type Err = String;

    /// `x0,y0,x1,y1`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<f64> = s
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|e| format!("Invalid brush '{s}': {e}"))?;
        match parts.as_slice() {
            [ax, ay, bx, by] if parts.iter().all(|v| v.is_finite()) => {
                Ok(Rect::from_corners(*ax, *ay, *bx, *by))
            }
            _ => Err(format!("Invalid brush '{s}': expected x0,y0,x1,y1")),
        }
    }
}

/// `None` means no brush is active.
pub type Brush = Option<Rect>;

/// Commits whose projected point lies inside the brush. `projection` must be
/// built from `visible`.
pub fn select(brush: Brush, visible: &[Commit], projection: &Projection) -> Vec<Commit> {
    let Some(rect) = brush else {
        return Vec::new();
    };
    visible
        .iter()
        .filter(|c| {
            projection
                .locate(c)
                .is_some_and(|(x, y)| rect.contains(x, y))
        })
        .cloned()
        .collect()
}

/// The selection when anything is selected, otherwise everything visible.
pub fn scope<'a>(selected: &'a [Commit], visible: &'a [Commit]) -> &'a [Commit] {
    if selected.is_empty() {
        visible
    } else {
        selected
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub count: usize,
    pub proportion: f64,
}

impl BreakdownEntry {
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.proportion * 100.0)
    }
}

/// Row counts per language tag over every row of the commits in scope,
/// largest first.
pub fn breakdown(scope: &[Commit]) -> Vec<BreakdownEntry> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut total = 0usize;
    for row in scope.iter().flat_map(|c| c.rows()) {
        *counts.entry(row.kind.as_str()).or_insert(0) += 1;
        total += 1;
    }
    if total == 0 {
        return Vec::new();
    }

    let mut entries: Vec<BreakdownEntry> = counts
        .into_iter()
        .map(|(kind, count)| BreakdownEntry {
            kind: kind.to_string(),
            count,
            proportion: count as f64 / total as f64,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.kind.cmp(&b.kind)));
    entries
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionSummary {
    pub selected_count: usize,
    pub message: String,
    pub breakdown: Vec<BreakdownEntry>,
}

pub fn summarize(selected: &[Commit], visible: &[Commit]) -> SelectionSummary {
    let message = match selected.len() {
        0 => "No commits selected".to_string(),
        1 => "1 commit selected".to_string(),
        n => format!("{n} commits selected"),
    };
    SelectionSummary {
        selected_count: selected.len(),
        message,
        breakdown: breakdown(scope(selected, visible)),
    }
}

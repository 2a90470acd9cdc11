use crate::model::Commit;
use crate::scale::{format_time_tick, LinearScale, SqrtScale, TimeScale};
use serde::{Deserialize, Serialize};

pub const HOURS_PER_DAY: f64 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl Default for PlotArea {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
            margin: Margin {
                top: 10.0,
                right: 10.0,
                bottom: 30.0,
                left: 20.0,
            },
        }
    }
}

impl PlotArea {
    pub fn left(&self) -> f64 {
        self.margin.left
    }

    pub fn right(&self) -> f64 {
        self.width - self.margin.right
    }

    pub fn top(&self) -> f64 {
        self.margin.top
    }

    pub fn bottom(&self) -> f64 {
        self.height - self.margin.bottom
    }

    pub fn usable_width(&self) -> f64 {
        self.right() - self.left()
    }

    pub fn usable_height(&self) -> f64 {
        self.bottom() - self.top()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusRange {
    pub min: f64,
    pub max: f64,
}

impl Default for RadiusRange {
    fn default() -> Self {
        Self { min: 2.0, max: 30.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub commit_id: String,
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    pub value: String,
    pub position: f64,
    pub label: String,
}

/// Scales and points for one set of commits. Rebuild whenever the set changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub x: Option<TimeScale>,
    pub y: LinearScale,
    pub r: Option<SqrtScale>,
    pub points: Vec<ScatterPoint>,
}

impl Projection {
    pub fn empty(area: &PlotArea) -> Self {
        Self {
            x: None,
            y: hour_scale(area),
            r: None,
            points: Vec::new(),
        }
    }

    /// Plot coordinates of a commit under these scales.
    pub fn locate(&self, commit: &Commit) -> Option<(f64, f64)> {
        let x = self.x.as_ref()?.apply(&commit.datetime);
        Some((x, self.y.apply(commit.hour_fraction)))
    }

    pub fn x_ticks(&self, count: usize) -> Vec<Tick> {
        let Some(x) = self.x.as_ref() else {
            return Vec::new();
        };
        x.ticks(count)
            .into_iter()
            .map(|t| Tick {
                value: t.to_rfc3339(),
                position: x.apply(&t),
                label: format_time_tick(&t),
            })
            .collect()
    }

    pub fn y_ticks(&self, count: usize) -> Vec<Tick> {
        self.y
            .ticks(count)
            .into_iter()
            .map(|h| Tick {
                value: h.to_string(),
                position: self.y.apply(h),
                label: hour_label(h),
            })
            .collect()
    }
}

/// `HH:00`, wrapping 24 back to 00.
pub fn hour_label(hour: f64) -> String {
    format!("{:02}:00", (hour as i64).rem_euclid(24))
}

fn hour_scale(area: &PlotArea) -> LinearScale {
    LinearScale::new((0.0, HOURS_PER_DAY), (area.bottom(), area.top()))
}

/// Projects commits onto the plot. Points come back largest first so the
/// smaller bubbles are drawn on top.
pub fn project(commits: &[Commit], area: &PlotArea, radius: &RadiusRange) -> Projection {
    let x = match TimeScale::from_extent(
        commits.iter().map(|c| c.datetime),
        (area.left(), area.right()),
    ) {
        Some(scale) => scale.nice(),
        None => return Projection::empty(area),
    };
    let y = hour_scale(area);

    let (min_lines, max_lines) = commits
        .iter()
        .map(|c| c.total_lines)
        .fold((usize::MAX, 0), |(lo, hi), n| (lo.min(n), hi.max(n)));
    let r = SqrtScale::new(
        (min_lines as f64, max_lines as f64),
        (radius.min, radius.max),
    );

    let mut ordered: Vec<&Commit> = commits.iter().collect();
    ordered.sort_by(|a, b| b.total_lines.cmp(&a.total_lines));

    let points = ordered
        .into_iter()
        .map(|c| ScatterPoint {
            commit_id: c.id.clone(),
            x: x.apply(&c.datetime),
            y: y.apply(c.hour_fraction),
            r: r.apply(c.total_lines as f64),
        })
        .collect();

    Projection {
        x: Some(x),
        y,
        r: Some(r),
        points,
    }
}

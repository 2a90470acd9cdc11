use crate::model::Commit;
use crate::scale::TimeScale;
use chrono::{DateTime, FixedOffset};

pub const PROGRESS_MIN: f64 = 0.0;
pub const PROGRESS_MAX: f64 = 100.0;

/// Maps slider progress in `[0, 100]` onto the span of commit times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    scale: Option<TimeScale>,
}

impl TimeWindow {
    pub fn new(commits: &[Commit]) -> Self {
        Self {
            scale: TimeScale::from_extent(
                commits.iter().map(|c| c.datetime),
                (PROGRESS_MIN, PROGRESS_MAX),
            ),
        }
    }

    pub fn scale(&self) -> Option<&TimeScale> {
        self.scale.as_ref()
    }

    /// Latest instant shown at `progress`. `None` when there are no commits.
    pub fn cutoff(&self, progress: f64) -> Option<DateTime<FixedOffset>> {
        let progress = clamp_progress(progress);
        self.scale.map(|scale| scale.invert(progress))
    }
}

pub fn clamp_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        PROGRESS_MAX
    } else {
        progress.clamp(PROGRESS_MIN, PROGRESS_MAX)
    }
}

/// Commits at or before `cutoff`, in input order.
pub fn visible(commits: &[Commit], cutoff: Option<&DateTime<FixedOffset>>) -> Vec<Commit> {
    match cutoff {
        Some(cutoff) => commits
            .iter()
            .filter(|c| c.datetime <= *cutoff)
            .cloned()
            .collect(),
        None => Vec::new(),
    }
}

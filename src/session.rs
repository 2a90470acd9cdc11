use crate::model::Commit;
use crate::scatter::{project, PlotArea, Projection, RadiusRange};
use crate::selection::{self, Brush, SelectionSummary};
use crate::window::{clamp_progress, visible, TimeWindow, PROGRESS_MAX};
use chrono::{DateTime, FixedOffset};
use log::debug;

/// State behind one visualization. Each handler consumes the session and
/// returns a fully recomputed one.
#[derive(Debug, Clone)]
pub struct Session {
    commits: Vec<Commit>,
    area: PlotArea,
    radius: RadiusRange,
    window: TimeWindow,
    progress: f64,
    cutoff: Option<DateTime<FixedOffset>>,
    visible: Vec<Commit>,
    projection: Projection,
    brush: Brush,
    selected: Vec<Commit>,
}

impl Session {
    pub fn new(commits: Vec<Commit>, area: PlotArea, radius: RadiusRange) -> Self {
        let window = TimeWindow::new(&commits);
        let session = Self {
            commits,
            area,
            radius,
            window,
            progress: PROGRESS_MAX,
            cutoff: None,
            visible: Vec::new(),
            projection: Projection::empty(&area),
            brush: None,
            selected: Vec::new(),
        };
        session.with_progress(PROGRESS_MAX)
    }

    /// Slider moved. The brush is cleared because its rectangle was drawn
    /// against the previous projection.
    pub fn with_progress(mut self, progress: f64) -> Self {
        self.progress = clamp_progress(progress);
        self.cutoff = self.window.cutoff(self.progress);
        self.visible = visible(&self.commits, self.cutoff.as_ref());
        self.projection = project(&self.visible, &self.area, &self.radius);
        self.brush = None;
        self.selected = Vec::new();
        debug!(
            "progress {:.1}: {} of {} commits visible",
            self.progress,
            self.visible.len(),
            self.commits.len()
        );
        self
    }

    /// Brush started, moved or ended. All phases recompute the same way.
    pub fn with_brush(mut self, brush: Brush) -> Self {
        self.brush = brush;
        self.selected = selection::select(brush, &self.visible, &self.projection);
        debug!("brush {:?}: {} commits selected", brush, self.selected.len());
        self
    }

    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn cutoff(&self) -> Option<&DateTime<FixedOffset>> {
        self.cutoff.as_ref()
    }

    pub fn visible(&self) -> &[Commit] {
        &self.visible
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn brush(&self) -> Brush {
        self.brush
    }

    pub fn selected(&self) -> &[Commit] {
        &self.selected
    }

    pub fn is_selected(&self, commit: &Commit) -> bool {
        self.selected.iter().any(|c| c.id == commit.id)
    }

    pub fn selection_summary(&self) -> SelectionSummary {
        selection::summarize(&self.selected, &self.visible)
    }
}

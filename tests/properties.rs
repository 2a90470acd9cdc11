mod common;

use chrono::{Duration, TimeZone, Timelike, Utc};
use common::row;
use locmap::aggregate::aggregate;
use locmap::model::{ChangeRow, Commit};
use locmap::scatter::{project, PlotArea, RadiusRange};
use locmap::selection::{breakdown, select, Rect};
use locmap::window::{visible, TimeWindow};
use proptest::prelude::*;
use std::collections::HashSet;

const KINDS: [&str; 4] = ["js", "css", "html", "svelte"];

/// Rows for up to six commits; every row of a commit shares its timestamp.
fn rows_strategy() -> impl Strategy<Value = Vec<ChangeRow>> {
    (
        prop::collection::vec((0i64..60, 0i64..24 * 60), 6),
        prop::collection::vec((0usize..6, 0usize..KINDS.len()), 1..80),
    )
        .prop_map(|(stamps, picks)| {
            let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
            picks
                .into_iter()
                .map(|(commit, kind)| {
                    let (day, minute) = stamps[commit];
                    let at = base + Duration::days(day) + Duration::minutes(minute);
                    row(
                        &format!("c{commit}"),
                        &at.to_rfc3339(),
                        &format!("src/f{commit}.{}", KINDS[kind]),
                        KINDS[kind],
                    )
                })
                .collect()
        })
}

fn ids(commits: &[Commit]) -> HashSet<String> {
    commits.iter().map(|c| c.id.clone()).collect()
}

proptest! {
    #[test]
    fn line_counts_are_conserved(rows in rows_strategy()) {
        let commits = aggregate(&rows, None);
        prop_assert_eq!(commits.iter().map(|c| c.total_lines).sum::<usize>(), rows.len());
        for c in &commits {
            prop_assert_eq!(c.total_lines, c.rows().len());
        }
    }

    #[test]
    fn hour_fraction_matches_timestamp(rows in rows_strategy()) {
        for c in aggregate(&rows, None) {
            prop_assert!(c.hour_fraction >= 0.0 && c.hour_fraction < 24.0);
            let expected = c.datetime.hour() as f64 + c.datetime.minute() as f64 / 60.0;
            prop_assert_eq!(c.hour_fraction, expected);
        }
    }

    #[test]
    fn aggregation_is_repeatable(rows in rows_strategy()) {
        prop_assert_eq!(aggregate(&rows, None), aggregate(&rows, None));
    }

    #[test]
    fn later_cutoffs_show_supersets(rows in rows_strategy(), a in 0.0f64..=100.0, b in 0.0f64..=100.0) {
        let commits = aggregate(&rows, None);
        let window = TimeWindow::new(&commits);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

        let early = ids(&visible(&commits, window.cutoff(lo).as_ref()));
        let late = ids(&visible(&commits, window.cutoff(hi).as_ref()));
        prop_assert!(early.is_subset(&late));
        prop_assert!(!early.is_empty());
    }

    #[test]
    fn selection_is_exactly_the_points_inside(
        rows in rows_strategy(),
        corners in (0.0f64..1000.0, 0.0f64..600.0, 0.0f64..1000.0, 0.0f64..600.0),
    ) {
        let commits = aggregate(&rows, None);
        let projection = project(&commits, &PlotArea::default(), &RadiusRange::default());
        let rect = Rect::from_corners(corners.0, corners.1, corners.2, corners.3);
        let selected = ids(&select(Some(rect), &commits, &projection));

        for c in &commits {
            let (x, y) = projection.locate(c).unwrap();
            let inside = rect.x0 <= x && x <= rect.x1 && rect.y0 <= y && y <= rect.y1;
            prop_assert_eq!(selected.contains(&c.id), inside);
        }
    }

    #[test]
    fn breakdown_proportions_sum_to_one(rows in rows_strategy()) {
        let commits = aggregate(&rows, None);
        let parts = breakdown(&commits);
        let total: f64 = parts.iter().map(|p| p.proportion).sum();
        prop_assert!((total - 1.0).abs() < 1e-9);
        prop_assert_eq!(parts.iter().map(|p| p.count).sum::<usize>(), rows.len());
    }
}

use crate::aggregate::{aggregate, sort_chronologically};
use crate::cli::{CommonArgs, WindowArgs};
use crate::config::Config;
use crate::model::{
    ChangeRow, CommitsOutput, ProjectsOutput, ScatterOutput, SelectionOutput, StatsOutput,
    SCHEMA_VERSION,
};
use crate::output;
use crate::parse::read_rows;
use crate::portfolio::{fetch_github_profile, filter_projects, latest, load_projects, projects_per_year};
use crate::selection::Brush;
use crate::session::Session;
use crate::stats;
use crate::theme::{ColorScheme, PreferenceStore};
use anyhow::Context;
use chrono::Utc;
use log::info;
use std::path::{Path, PathBuf};

fn load_config(common: &CommonArgs) -> anyhow::Result<Config> {
    Config::load(common.config.as_deref()).context("Failed to load configuration")
}

fn load_rows(data: &Path) -> anyhow::Result<Vec<ChangeRow>> {
    read_rows(data).with_context(|| format!("Failed to load change log {}", data.display()))
}

fn open_session(common: &CommonArgs, window: &WindowArgs) -> anyhow::Result<Session> {
    let config = load_config(common)?;
    let rows = load_rows(&window.data)?;
    let commits = aggregate(&rows, config.commit_url_base.as_deref());
    info!("Aggregated {} rows into {} commits", rows.len(), commits.len());
    Ok(Session::new(commits, config.plot.area(), config.plot.radius())
        .with_progress(window.progress))
}

fn source_name(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

pub fn stats(common: &CommonArgs, data: &Path, json: bool) -> anyhow::Result<()> {
    let config = load_config(common)?;
    let rows = load_rows(data)?;
    let commits = aggregate(&rows, config.commit_url_base.as_deref());
    let summary = stats::summarize(&rows, &commits);

    if json {
        output::output_json(&StatsOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            source: source_name(data),
            summary,
        })
    } else {
        output::output_stats(&summary)
    }
}

pub fn commits(
    common: &CommonArgs,
    window: &WindowArgs,
    sort: bool,
    json: bool,
    ndjson: bool,
) -> anyhow::Result<()> {
    let session = open_session(common, window)?;
    let mut commits = session.visible().to_vec();
    if sort {
        sort_chronologically(&mut commits);
    }

    if json {
        output::output_json(&CommitsOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            source: source_name(&window.data),
            progress: session.progress(),
            cutoff: session.cutoff().copied(),
            commits,
        })
    } else if ndjson {
        output::output_ndjson(&commits)
    } else {
        output::output_commits(&commits, session.cutoff())
    }
}

pub fn scatter(
    common: &CommonArgs,
    window: &WindowArgs,
    ticks: usize,
    json: bool,
    ndjson: bool,
) -> anyhow::Result<()> {
    let session = open_session(common, window)?;
    let projection = session.projection();
    let x_ticks = projection.x_ticks(ticks);
    let y_ticks = projection.y_ticks(ticks);

    if json {
        output::output_json(&ScatterOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            source: source_name(&window.data),
            progress: session.progress(),
            cutoff: session.cutoff().copied(),
            x_ticks,
            y_ticks,
            points: projection.points.clone(),
        })
    } else if ndjson {
        output::output_ndjson(&projection.points)
    } else {
        output::output_scatter(&projection.points, &x_ticks, &y_ticks)
    }
}

pub fn select(
    common: &CommonArgs,
    window: &WindowArgs,
    brush: Brush,
    json: bool,
) -> anyhow::Result<()> {
    let session = open_session(common, window)?;
    let session = session.with_brush(brush);
    let summary = session.selection_summary();

    if json {
        output::output_json(&SelectionOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            source: source_name(&window.data),
            progress: session.progress(),
            visible_count: session.visible().len(),
            selected_count: summary.selected_count,
            message: summary.message,
            selected: session.selected().iter().map(|c| c.id.clone()).collect(),
            breakdown: summary.breakdown,
        })
    } else {
        output::output_selection(&summary, session.visible().len())
    }
}

pub fn projects(
    common: &CommonArgs,
    source: Option<String>,
    limit: Option<usize>,
    search: Option<&str>,
    by_year: bool,
    json: bool,
) -> anyhow::Result<()> {
    let config = load_config(common)?;
    let source = source.unwrap_or(config.projects_source);
    let all = load_projects(&source);
    let listed = match limit {
        Some(n) => latest(&all, n),
        None => &all[..],
    };
    let matching = filter_projects(listed, search.unwrap_or(""));
    let per_year = by_year.then(|| projects_per_year(matching.iter().copied()));

    if json {
        output::output_json(&ProjectsOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            source,
            count: matching.len(),
            projects: matching.into_iter().cloned().collect(),
            per_year: per_year.map(|years| years.into_iter().collect()),
        })
    } else {
        output::output_projects(&matching, per_year.as_deref())
    }
}

pub fn github(common: &CommonArgs, username: &str, json: bool) -> anyhow::Result<()> {
    let config = load_config(common)?;
    let profile = fetch_github_profile(&config.github_api_url, username);

    if json {
        output::output_json(&profile)
    } else {
        output::output_profile(username, profile.as_ref())
    }
}

pub fn theme(scheme: Option<ColorScheme>, store: Option<PathBuf>) -> anyhow::Result<()> {
    let store = match store {
        Some(path) => PreferenceStore::at(path),
        None => PreferenceStore::default_location().context("Failed to locate preferences")?,
    };

    match scheme {
        Some(scheme) => {
            store
                .save(scheme)
                .with_context(|| format!("Failed to save preferences to {}", store.path().display()))?;
            println!("{} ({})", scheme, scheme.css_value());
        }
        None => {
            let current = store.load().context("Failed to read preferences")?;
            println!("{} ({})", current, current.css_value());
        }
    }
    Ok(())
}

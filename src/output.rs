use crate::model::Commit;
use crate::portfolio::{GithubProfile, Project};
use crate::scatter::{ScatterPoint, Tick};
use crate::selection::SelectionSummary;
use crate::stats::Summary;
use anyhow::Result;
use chrono::{DateTime, FixedOffset};
use console::style;
use serde::Serialize;

const TABLE_LIMIT: usize = 50;

pub fn output_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn output_ndjson<T: Serialize>(items: &[T]) -> Result<()> {
    for item in items {
        println!("{}", serde_json::to_string(item)?);
    }
    Ok(())
}

pub fn output_stats(summary: &Summary) -> Result<()> {
    println!("{}", style("Summary").bold());
    println!("{}", "─".repeat(40));
    println!("{:<24} {}", "Total LOC", style(summary.total_rows).cyan());
    println!("{:<24} {}", "Total Commits", style(summary.total_commits).cyan());
    println!("{:<24} {}", "Codebase File Count", style(summary.distinct_files).cyan());
    println!("{:<24} {}", "Average File Depth", style(format!("{:.2}", summary.mean_depth)).cyan());
    println!("{:<24} {}", "Max Depth", style(summary.max_depth).cyan());
    println!("{:<24} {}", "Longest Line", style(summary.longest_line).cyan());
    let busiest = summary
        .busiest_period
        .map(|p| p.to_string())
        .unwrap_or_else(|| "-".to_string());
    println!("{:<24} {}", "Busiest Time of Day", style(busiest).yellow());
    Ok(())
}

pub fn output_commits(commits: &[Commit], cutoff: Option<&DateTime<FixedOffset>>) -> Result<()> {
    if commits.is_empty() {
        println!("No commits to display");
        return Ok(());
    }
    if let Some(cutoff) = cutoff {
        println!("Showing commits until {}", style(cutoff.format("%Y-%m-%d %H:%M")).dim());
    }

    println!(
        "{:<10} {:<20} {:<17} {:>6} {:>7}",
        style("Commit").bold(),
        style("Author").bold(),
        style("Date").bold(),
        style("Hour").bold(),
        style("Lines").bold()
    );
    println!("{}", "─".repeat(64));
    for c in commits.iter().take(TABLE_LIMIT) {
        println!(
            "{:<10} {:<20} {:<17} {:>6.2} {:>7}",
            short_id(&c.id),
            truncate(&c.author, 20),
            c.datetime.format("%Y-%m-%d %H:%M"),
            c.hour_fraction,
            c.total_lines
        );
    }
    if commits.len() > TABLE_LIMIT {
        println!("\n... and {} more commits", commits.len() - TABLE_LIMIT);
    }
    Ok(())
}

pub fn output_scatter(points: &[ScatterPoint], x_ticks: &[Tick], y_ticks: &[Tick]) -> Result<()> {
    if points.is_empty() {
        println!("No data to display");
        return Ok(());
    }

    println!("{}", style("Axes").bold());
    let x_labels: Vec<_> = x_ticks.iter().map(|t| format!("{} @{:.0}", t.label, t.position)).collect();
    let y_labels: Vec<_> = y_ticks.iter().map(|t| format!("{} @{:.0}", t.label, t.position)).collect();
    println!("  x: {}", x_labels.join(", "));
    println!("  y: {}", y_labels.join(", "));

    println!(
        "\n{:<10} {:>9} {:>9} {:>7}",
        style("Commit").bold(),
        style("x").bold(),
        style("y").bold(),
        style("r").bold()
    );
    println!("{}", "─".repeat(38));
    for p in points.iter().take(TABLE_LIMIT) {
        println!("{:<10} {:>9.2} {:>9.2} {:>7.2}", short_id(&p.commit_id), p.x, p.y, p.r);
    }
    if points.len() > TABLE_LIMIT {
        println!("\n... and {} more points", points.len() - TABLE_LIMIT);
    }
    Ok(())
}

pub fn output_selection(summary: &SelectionSummary, visible_count: usize) -> Result<()> {
    println!("{}", style(&summary.message).bold());
    if summary.selected_count == 0 {
        println!("Breakdown over all {} visible commits", visible_count);
    }
    println!("{}", "─".repeat(40));
    if summary.breakdown.is_empty() {
        println!("No lines in scope");
        return Ok(());
    }
    for entry in &summary.breakdown {
        println!(
            "{:<16} {:>8} lines {:>8}",
            entry.kind,
            style(entry.count).cyan(),
            style(entry.percent_label()).green()
        );
    }
    Ok(())
}

pub fn output_projects(projects: &[&Project], by_year: Option<&[(String, usize)]>) -> Result<()> {
    println!("{} {}", style("Projects").bold(), style(projects.len()).cyan());
    println!("{}", "─".repeat(50));
    for p in projects {
        println!("{} {}", style(&p.title).bold(), style(format!("({})", p.year)).dim());
        if !p.description.is_empty() {
            println!("  {}", p.description);
        }
    }

    if let Some(years) = by_year {
        println!("\n{}", style("Projects per year").bold());
        for (year, count) in years {
            println!("  {:<8} {}", year, style(count).cyan());
        }
    }
    Ok(())
}

pub fn output_profile(username: &str, profile: Option<&GithubProfile>) -> Result<()> {
    let Some(profile) = profile else {
        println!("GitHub profile for {} not found", style(username).yellow());
        return Ok(());
    };
    println!("{}", style(format!("GitHub: {username}")).bold());
    println!("{:<14} {}", "Public Repos:", style(profile.public_repos).cyan());
    println!("{:<14} {}", "Public Gists:", style(profile.public_gists).cyan());
    println!("{:<14} {}", "Followers:", style(profile.followers).cyan());
    println!("{:<14} {}", "Following:", style(profile.following).cyan());
    Ok(())
}

fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{head}...")
    } else {
        s.to_string()
    }
}

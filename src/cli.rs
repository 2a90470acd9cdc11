use crate::selection::Rect;
use crate::theme::ColorScheme;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "locmap")]
#[command(about = "Commit history analysis for line-level change logs")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase log verbosity (-v, -vv, -vvv)")]
    pub verbose: u8,

    #[arg(short, long, global = true, help = "Only log errors")]
    pub quiet: bool,
}

#[derive(Args, Clone)]
pub struct WindowArgs {
    #[arg(help = "Path to the line-level change log (CSV)")]
    pub data: PathBuf,

    #[arg(long, default_value_t = 100.0, help = "Time slider position, 0 to 100")]
    pub progress: f64,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Whole-dataset summary
    Stats {
        #[arg(help = "Path to the line-level change log (CSV)")]
        data: PathBuf,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Commits visible at a slider position
    Commits {
        #[clap(flatten)]
        window: WindowArgs,

        #[arg(long, help = "Sort commits chronologically")]
        sort: bool,

        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Scatterplot coordinates and axis ticks
    Scatter {
        #[clap(flatten)]
        window: WindowArgs,

        #[arg(long, default_value_t = 10, help = "Approximate number of ticks per axis")]
        ticks: usize,

        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output points as NDJSON")]
        ndjson: bool,
    },
    /// Brush a rectangle and break down the selected lines by type
    Select {
        #[clap(flatten)]
        window: WindowArgs,

        #[arg(long, allow_hyphen_values = true, help = "Brush rectangle in plot pixels: x0,y0,x1,y1")]
        brush: Option<Rect>,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Portfolio project list
    Projects {
        #[arg(long, help = "File path or URL of the project list (overrides config)")]
        source: Option<String>,

        #[arg(long, help = "Show only the first N projects")]
        limit: Option<usize>,

        #[arg(long, help = "Case-insensitive search across project fields")]
        search: Option<String>,

        #[arg(long, help = "Include project counts per year")]
        by_year: bool,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Public GitHub profile counters
    Github {
        username: String,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Show or set the persisted color scheme
    Theme {
        #[arg(help = "auto, light or dark")]
        scheme: Option<ColorScheme>,

        #[arg(long, help = "Preferences file (defaults to the user config directory)")]
        store: Option<PathBuf>,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        crate::logging::init_logger(self.common.verbose, self.common.quiet);
        let common = self.common;

        match self.command {
            Commands::Stats { data, json } => crate::exec::stats(&common, &data, json),
            Commands::Commits { window, sort, json, ndjson } => {
                crate::exec::commits(&common, &window, sort, json, ndjson)
            }
            Commands::Scatter { window, ticks, json, ndjson } => {
                crate::exec::scatter(&common, &window, ticks, json, ndjson)
            }
            Commands::Select { window, brush, json } => {
                crate::exec::select(&common, &window, brush, json)
            }
            Commands::Projects { source, limit, search, by_year, json } => {
                crate::exec::projects(&common, source, limit, search.as_deref(), by_year, json)
            }
            Commands::Github { username, json } => crate::exec::github(&common, &username, json),
            Commands::Theme { scheme, store } => crate::exec::theme(scheme, store),
        }
    }
}

//! Configuration for locmap.
//!
//! Looked up in order: an explicit `--config` path, `$LOCMAP_CONFIG`,
//! `<config dir>/locmap/config.toml`, then `./.locmap.toml`. With no file
//! present the defaults apply.

use crate::error::{LocmapError, Result};
use crate::portfolio::github::DEFAULT_API_URL;
use crate::scatter::{Margin, PlotArea, RadiusRange};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "LOCMAP_CONFIG";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prefix joined with a commit id to link to that commit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_url_base: Option<String>,

    /// Project list location, a file path or an http(s) URL.
    pub projects_source: String,

    pub github_api_url: String,

    pub plot: PlotConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            commit_url_base: None,
            projects_source: "lib/projects.json".to_string(),
            github_api_url: DEFAULT_API_URL.to_string(),
            plot: PlotConfig::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub min_radius: f64,
    pub max_radius: f64,
}

impl Default for PlotConfig {
    fn default() -> Self {
        let area = PlotArea::default();
        let radius = RadiusRange::default();
        Self {
            width: area.width,
            height: area.height,
            margin_top: area.margin.top,
            margin_right: area.margin.right,
            margin_bottom: area.margin.bottom,
            margin_left: area.margin.left,
            min_radius: radius.min,
            max_radius: radius.max,
        }
    }
}

impl PlotConfig {
    pub fn area(&self) -> PlotArea {
        PlotArea {
            width: self.width,
            height: self.height,
            margin: Margin {
                top: self.margin_top,
                right: self.margin_right,
                bottom: self.margin_bottom,
                left: self.margin_left,
            },
        }
    }

    pub fn radius(&self) -> RadiusRange {
        RadiusRange {
            min: self.min_radius,
            max: self.max_radius,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let area = self.area();
        if !(area.usable_width() > 0.0 && area.usable_height() > 0.0) {
            return Err(LocmapError::Config(format!(
                "Plot margins leave no usable area ({}x{})",
                area.usable_width(),
                area.usable_height()
            )));
        }
        if !(self.min_radius >= 0.0 && self.min_radius <= self.max_radius) {
            return Err(LocmapError::Config(format!(
                "Invalid radius range: {}..{}",
                self.min_radius, self.max_radius
            )));
        }
        Ok(())
    }
}

impl Config {
    /// Loads the first config found, or defaults when there is none.
    /// An explicit path must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }
        for path in discover_config_files() {
            debug!("Attempting to load config from: {}", path.display());
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }
        debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            LocmapError::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;
        let config = Self::parse(&contents)?;
        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.plot.validate()?;
        Ok(config)
    }
}

fn discover_config_files() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(env_path) = env::var(CONFIG_ENV) {
        paths.push(PathBuf::from(env_path));
    }
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("locmap").join("config.toml"));
    }
    paths.push(PathBuf::from("./.locmap.toml"));

    paths
}

use crate::error::{LocmapError, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Auto,
    Light,
    Dark,
}

impl ColorScheme {
    /// Value for the CSS `color-scheme` property.
    pub fn css_value(&self) -> &'static str {
        match self {
            ColorScheme::Auto => "light dark",
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorScheme::Auto => "auto",
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        };
        f.write_str(name)
    }
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(ColorScheme::Auto),
            "light" => Ok(ColorScheme::Light),
            "dark" => Ok(ColorScheme::Dark),
            _ => Err(format!("Invalid color scheme: {s}. Valid options: auto, light, dark")),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Preferences {
    #[serde(rename = "colorScheme", default, skip_serializing_if = "Option::is_none")]
    color_scheme: Option<ColorScheme>,
}

/// The single persisted `colorScheme` preference.
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn at<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// `<config dir>/locmap/preferences.toml`
    pub fn default_location() -> Result<Self> {
        let dir = dirs::config_dir()
            .ok_or_else(|| LocmapError::Config("Could not determine config directory".into()))?;
        Ok(Self::at(dir.join("locmap").join("preferences.toml")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Falls back to `Auto` when nothing has been saved yet.
    pub fn load(&self) -> Result<ColorScheme> {
        if !self.path.exists() {
            debug!("No preferences at {}, using auto", self.path.display());
            return Ok(ColorScheme::Auto);
        }
        let contents = fs::read_to_string(&self.path)?;
        let prefs: Preferences = toml::from_str(&contents)?;
        Ok(prefs.color_scheme.unwrap_or_default())
    }

    pub fn save(&self, scheme: ColorScheme) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = toml::to_string_pretty(&Preferences {
            color_scheme: Some(scheme),
        })?;

        // Write beside the target, then rename over it.
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(&tmp_path, &self.path)?;

        info!("color scheme changed to {scheme}");
        Ok(())
    }
}

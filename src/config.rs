use crate::curve::{InterpolationMethod, DEFAULT_RECALL_LEVELS, MAX_RECALL_LEVELS};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default config file looked up in the current directory
pub const DEFAULT_CONFIG_FILE: &str = "prcurve.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub prcurve: PrcurveConfig,
    #[serde(default)]
    pub curve: CurveConfig,
    #[serde(default)]
    pub plot: PlotConfig,
    /// File the configuration was read from; `None` for built-in defaults.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// General settings
#[derive(Debug, Clone, Deserialize)]
pub struct PrcurveConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for PrcurveConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Interpolation and averaging settings
#[derive(Debug, Clone, Deserialize)]
pub struct CurveConfig {
    #[serde(default)]
    pub method: InterpolationMethod,
    /// Number of evenly spaced recall levels (11 = 0.0, 0.1, ..., 1.0)
    #[serde(default = "default_levels")]
    pub levels: usize,
    /// Append a panel with the mean interpolated curve
    #[serde(default = "default_average")]
    pub average: bool,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            method: InterpolationMethod::default(),
            levels: default_levels(),
            average: default_average(),
        }
    }
}

/// Where each panel's legend is drawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LegendPosition {
    /// Under the x axis, outside the plot area
    #[default]
    Below,
    UpperRight,
    LowerLeft,
}

/// Chart cosmetics
#[derive(Debug, Clone, Deserialize)]
pub struct PlotConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_panel_height")]
    pub panel_height: u32,
    #[serde(default = "default_limits")]
    pub x_limits: [f64; 2],
    #[serde(default = "default_limits")]
    pub y_limits: [f64; 2],
    #[serde(default)]
    pub legend: LegendPosition,
    #[serde(default = "default_grid")]
    pub grid: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            panel_height: default_panel_height(),
            x_limits: default_limits(),
            y_limits: default_limits(),
            legend: LegendPosition::default(),
            grid: default_grid(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_levels() -> usize {
    DEFAULT_RECALL_LEVELS
}

fn default_average() -> bool {
    true
}

fn default_width() -> u32 {
    900
}

fn default_panel_height() -> u32 {
    360
}

fn default_limits() -> [f64; 2] {
    [0.0, 1.05]
}

fn default_grid() -> bool {
    true
}

impl Config {
    /// Load configuration
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for the config file in this order:
    /// 1. `explicit` path (from `--config`)
    /// 2. Path specified in PRCURVE_CONFIG environment variable
    /// 3. ./prcurve.toml in current directory
    ///
    /// A missing file is only an error when it was named explicitly; otherwise
    /// built-in defaults are used.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        // Load .env file if it exists (ignore errors - file is optional)
        let _ = dotenv::dotenv();

        let (config_path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => match std::env::var("PRCURVE_CONFIG") {
                Ok(path) => (PathBuf::from(path), true),
                Err(_) => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
            },
        };

        if !required && !config_path.exists() {
            return Ok(Self::default());
        }

        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let mut config = Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;
        config.source = Some(config_path);

        Ok(config)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.curve.levels < 2 {
            anyhow::bail!("curve.levels must be at least 2");
        }
        if self.curve.levels > MAX_RECALL_LEVELS {
            anyhow::bail!("curve.levels must be at most {}", MAX_RECALL_LEVELS);
        }

        if self.plot.width == 0 || self.plot.panel_height == 0 {
            anyhow::bail!("plot.width and plot.panel_height must be greater than 0");
        }

        let limits = [("x_limits", self.plot.x_limits), ("y_limits", self.plot.y_limits)];
        for (name, limits) in limits {
            if !limits[0].is_finite() || !limits[1].is_finite() || limits[0] >= limits[1] {
                anyhow::bail!(
                    "plot.{} must be two finite values with min < max, got [{}, {}]",
                    name,
                    limits[0],
                    limits[1]
                );
            }
        }

        Ok(())
    }

    /// Log level used when RUST_LOG is not set
    pub fn log_level(&self) -> &str {
        &self.prcurve.log_level
    }

    /// Report where the configuration came from. Call once the logger is up.
    pub fn log_source(&self) {
        match &self.source {
            Some(path) => log::debug!("Loaded config from {}", path.display()),
            None => log::debug!("No config file found, using defaults"),
        }
    }
}

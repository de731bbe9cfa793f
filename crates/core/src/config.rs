//! Layout configuration
//!
//! Cell widths, bar gaps, row height and virtualization tuning. Values are
//! abstract "pixels": the web client treats them as CSS pixels, the
//! terminal renderer as character cells (see [`LayoutConfig::terminal`]).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::models::ViewMode;

/// Environment variable naming an explicit configuration file
pub const GANTTFLOW_CONFIG_ENV: &str = "GANTTFLOW_CONFIG";

/// Configuration filename under the platform config directory
pub const CONFIG_FILENAME: &str = "config.json";

/// Per-view-mode horizontal scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScaleConfig {
    /// Width of one day column
    pub cell_width: u32,
    /// Visual margin subtracted from every duration bar
    pub gap: u32,
}

impl ScaleConfig {
    pub const fn new(cell_width: u32, gap: u32) -> Self {
        Self { cell_width, gap }
    }
}

/// Geometry settings for the whole timeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Scale used in day view
    pub day: ScaleConfig,
    /// Scale used in week view
    pub week: ScaleConfig,
    /// Scale used in month view
    pub month: ScaleConfig,
    /// Height of one task row
    pub row_height: u32,
    /// Extra columns/rows mounted on each side of the viewport
    pub overscan: usize,
    /// Distance from a scroll edge at which the range is extended
    pub edge_threshold: u32,
    /// Route dependency arrows between bars
    pub dependency_arrows: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            day: ScaleConfig::new(50, 5),
            week: ScaleConfig::new(20, 5),
            month: ScaleConfig::new(8, 5),
            row_height: 50,
            overscan: 3,
            edge_threshold: 500,
            dependency_arrows: true,
        }
    }
}

impl LayoutConfig {
    /// Preset for character-cell renderers, where one unit is one column.
    pub fn terminal() -> Self {
        Self {
            day: ScaleConfig::new(4, 1),
            week: ScaleConfig::new(2, 0),
            month: ScaleConfig::new(1, 0),
            row_height: 1,
            overscan: 2,
            edge_threshold: 8,
            // Arrow margins are pixel sized; dependency groups colour bars instead
            dependency_arrows: false,
        }
    }

    /// Scale for the given view mode.
    pub fn scale(&self, mode: ViewMode) -> ScaleConfig {
        match mode {
            ViewMode::Day => self.day,
            ViewMode::Week => self.week,
            ViewMode::Month => self.month,
        }
    }

    /// Check that every scale yields positive bar widths.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidConfig` if a cell width does not exceed
    /// its gap, or if the row height is zero.
    pub fn validate(&self) -> CoreResult<()> {
        for mode in [ViewMode::Day, ViewMode::Week, ViewMode::Month] {
            let scale = self.scale(mode);
            if scale.cell_width <= scale.gap {
                return Err(CoreError::InvalidConfig {
                    message: format!(
                        "{} cell width ({}) must exceed gap ({})",
                        mode, scale.cell_width, scale.gap
                    ),
                });
            }
        }
        if self.row_height == 0 {
            return Err(CoreError::InvalidConfig {
                message: "row height must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Load and validate a configuration file.
    ///
    /// Missing fields fall back to [`LayoutConfig::default`].
    pub fn load(path: &Path) -> CoreResult<Self> {
        debug!("Loading layout config from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::Config {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self =
            serde_json::from_str(&content).map_err(|e| CoreError::ConfigFormat {
                path: path.to_path_buf(),
                source: e,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Default configuration file location (`<config_dir>/ganttflow/config.json`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ganttflow").join(CONFIG_FILENAME))
    }

    /// Resolve which configuration file to use, if any.
    ///
    /// Priority:
    /// 1. Explicit path (command line)
    /// 2. `GANTTFLOW_CONFIG` environment variable (if non-empty)
    /// 3. Default path, only if the file exists
    pub fn resolve_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path);
        }

        if let Ok(env_path) = std::env::var(GANTTFLOW_CONFIG_ENV)
            && !env_path.is_empty()
        {
            return Some(PathBuf::from(env_path));
        }

        Self::default_path().filter(|p| p.exists())
    }

    /// Load the resolved configuration, or `fallback` when there is none.
    pub fn load_or(explicit: Option<PathBuf>, fallback: Self) -> CoreResult<Self> {
        match Self::resolve_path(explicit) {
            Some(path) => Self::load(&path),
            None => {
                debug!("No layout config file found, using defaults");
                Ok(fallback)
            }
        }
    }
}

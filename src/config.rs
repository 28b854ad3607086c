//! Rendering options for the actuator plots.
//!
//! Resolution order for the output directory: `--out-dir`, then the
//! `out_dir` key of a YAML config file, then `SIMTOOLS_PLOT_DIR`, then the
//! working directory.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::{ToolError, ToolResult};

/// Environment variable naming the default plot output directory.
pub const PLOT_DIR_ENV: &str = "SIMTOOLS_PLOT_DIR";

const DEFAULT_WIDTH: u32 = 1024;
const DEFAULT_HEIGHT: u32 = 768;
const DEFAULT_STROKE_WIDTH: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlotConfig {
    /// Figure width in pixels.
    pub width: u32,
    /// Figure height in pixels.
    pub height: u32,
    /// Line width of every series.
    pub stroke_width: u32,
    /// Directory the figures are written to.
    pub out_dir: Option<PathBuf>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            stroke_width: DEFAULT_STROKE_WIDTH,
            out_dir: None,
        }
    }
}

impl PlotConfig {
    /// Loads a YAML config file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> ToolResult<Self> {
        let text =
            fs::read_to_string(path).map_err(|e| ToolError::io("read plot config", path, e))?;
        Self::from_yaml(&text, path)
    }

    fn from_yaml(text: &str, origin: &Path) -> ToolResult<Self> {
        serde_yaml::from_str(text).map_err(|source| ToolError::Config {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Builds the effective configuration from the optional config file and
    /// `--out-dir` override.
    pub fn resolve(config_file: Option<&Path>, out_dir: Option<PathBuf>) -> ToolResult<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if out_dir.is_some() {
            config.out_dir = out_dir;
        }
        if config.out_dir.is_none() {
            config.out_dir = env::var_os(PLOT_DIR_ENV).map(PathBuf::from);
        }
        Ok(config)
    }

    /// The directory figures go to.
    pub fn output_dir(&self) -> &Path {
        self.out_dir.as_deref().unwrap_or_else(|| Path::new("."))
    }
}

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use veer_core::{AnalyzerConfig, Canvas};

use crate::errors::{Result, SessionError};

/// Configuration for session analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Analyzer tuning (settle window, trace scaling, display places)
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
    /// Width of the surface the drift trace is laid out on
    #[serde(default = "default_canvas_side")]
    pub canvas_width: f64,
    /// Height of the surface the drift trace is laid out on
    #[serde(default = "default_canvas_side")]
    pub canvas_height: f64,
    /// Output directory for reports written without an explicit path
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Pretty-print JSON reports
    #[serde(default)]
    pub pretty: bool,
}

fn default_canvas_side() -> f64 {
    300.0
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./veer-output")
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            analyzer: AnalyzerConfig::default(),
            canvas_width: default_canvas_side(),
            canvas_height: default_canvas_side(),
            output_dir: default_output_dir(),
            pretty: false,
        }
    }
}

impl CliConfig {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SessionError::InvalidConfig(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: CliConfig = serde_yaml::from_str(&contents)?;
        config.validate()?;
        log::debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.canvas()?;

        let trace = &self.analyzer.trace;
        if !trace.x_scale.is_finite() || !trace.y_scale.is_finite() || trace.y_scale <= 0.0 {
            return Err(SessionError::InvalidConfig(format!(
                "trace scales must be finite with a positive y_scale (x_scale={}, y_scale={})",
                trace.x_scale, trace.y_scale
            )));
        }

        if self.analyzer.display_places > 9 {
            return Err(SessionError::InvalidConfig(format!(
                "display_places must be at most 9, got {}",
                self.analyzer.display_places
            )));
        }

        Ok(())
    }

    pub fn canvas(&self) -> Result<Canvas> {
        Canvas::new(self.canvas_width, self.canvas_height)
            .map_err(|e| SessionError::InvalidConfig(e.to_string()))
    }
}

use serde::{Deserialize, Serialize};
use veer_core::{Direction, PathPoint};

/// Complete analysis output in JSON format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VeeringReport {
    pub metadata: Metadata,
    /// `too_short`, `no_veering` or `detected`
    pub status: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_steps: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_steps: Option<usize>,
    /// Truncated to the configured display places
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta_theta_degrees: Option<f64>,
    /// Truncated to the configured display places
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub veering_distance: Option<f64>,
    pub path_points: Vec<PathPoint>,
    /// Trace closed into the filled drift region
    pub outline: Vec<PathPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub session_name: String,
    pub source_file: String,
    pub generated_at: String,
    pub sample_count: usize,
    pub total_elapsed_ms: u64,
    pub walked_distance: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

//! Veering estimation for a completed walking session.
//!
//! [`VeeringAnalyzer::analyze`] runs the whole pipeline on a frozen
//! [`SessionRecord`]: a per-step direction vote, the start/end magnitude and
//! the drift trace. The analyzer holds only configuration, so repeated calls
//! on the same record give identical results.

pub mod anchors;
pub mod direction;
pub mod magnitude;

pub use anchors::heading_anchors;
pub use direction::{classify_direction, Classification, Direction, DirectionVote};
pub use magnitude::{compute_magnitude, magnitude_between, Magnitude};

use log::info;
use serde::{Deserialize, Serialize};

use crate::display::{
    truncate, veering_summary, DEFAULT_DISPLAY_PLACES, NO_VEERING_MESSAGE, TOO_SHORT_MESSAGE,
};
use crate::error::Result;
use crate::session::SessionRecord;
use crate::trace::{build_path_trace, Canvas, PathPoint, TraceConfig};

/// Analyzer tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Start/end averaging window in milliseconds; 0 uses the raw endpoints
    pub settle_window_ms: u64,
    pub trace: TraceConfig,
    /// Decimal places kept in displayed values
    pub display_places: u32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            settle_window_ms: 0,
            trace: TraceConfig::default(),
            display_places: DEFAULT_DISPLAY_PLACES,
        }
    }
}

/// Veering estimate for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VeeringResult {
    pub direction: Direction,
    pub left_steps: usize,
    pub right_steps: usize,
    pub delta_theta_degrees: f64,
    pub veering_distance: f64,
    pub path_points: Vec<PathPoint>,
}

impl VeeringResult {
    /// Display line with values truncated to `places` decimals
    pub fn summary(&self, places: u32) -> String {
        veering_summary(self.veering_distance, self.delta_theta_degrees, places)
    }

    pub fn display_delta_theta(&self, places: u32) -> f64 {
        truncate(self.delta_theta_degrees, places)
    }

    pub fn display_veering_distance(&self, places: u32) -> f64 {
        truncate(self.veering_distance, places)
    }
}

/// Terminal reporting state of an analysis
#[derive(Debug, Clone, PartialEq)]
pub enum VeeringOutcome {
    TooShort,
    NoVeering,
    Detected(VeeringResult),
}

impl VeeringOutcome {
    pub fn message(&self) -> String {
        self.message_with_places(DEFAULT_DISPLAY_PLACES)
    }

    pub fn message_with_places(&self, places: u32) -> String {
        match self {
            VeeringOutcome::TooShort => TOO_SHORT_MESSAGE.to_string(),
            VeeringOutcome::NoVeering => NO_VEERING_MESSAGE.to_string(),
            VeeringOutcome::Detected(result) => result.summary(places),
        }
    }

    /// Short machine-readable status
    pub fn status(&self) -> &'static str {
        match self {
            VeeringOutcome::TooShort => "too_short",
            VeeringOutcome::NoVeering => "no_veering",
            VeeringOutcome::Detected(_) => "detected",
        }
    }

    pub fn result(&self) -> Option<&VeeringResult> {
        match self {
            VeeringOutcome::Detected(result) => Some(result),
            _ => None,
        }
    }

    pub fn path_points(&self) -> &[PathPoint] {
        self.result()
            .map(|r| r.path_points.as_slice())
            .unwrap_or(&[])
    }
}

/// Stateless veering estimator
#[derive(Debug, Clone, Default)]
pub struct VeeringAnalyzer {
    config: AnalyzerConfig,
}

impl VeeringAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Magnitude between the (optionally averaged) session endpoints
    pub fn magnitude(&self, record: &SessionRecord) -> Result<Option<Magnitude>> {
        match heading_anchors(record, self.config.settle_window_ms) {
            Some((start, end)) => {
                magnitude_between(start, end, record.walked_distance()).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Runs the full pipeline on a frozen session.
    pub fn analyze(&self, record: &SessionRecord, canvas: Canvas) -> Result<VeeringOutcome> {
        let vote = match classify_direction(record.headings()) {
            Classification::TooShort => {
                info!("Session has no heading samples: too short to analyse");
                return Ok(VeeringOutcome::TooShort);
            }
            Classification::NoVeering => {
                info!("Session has a single heading sample: no veering");
                return Ok(VeeringOutcome::NoVeering);
            }
            Classification::Voted(vote) => vote,
        };

        let Some(magnitude) = self.magnitude(record)? else {
            return Ok(VeeringOutcome::TooShort);
        };

        let path_points: Vec<PathPoint> = build_path_trace(
            record.headings(),
            record.total_elapsed_ms(),
            vote.direction,
            canvas,
            self.config.trace,
        )?
        .collect();

        info!(
            "Veering {}: delta_theta={:.2} deg, distance={:.2} over {} samples ({} ms)",
            vote.direction,
            magnitude.delta_theta_degrees,
            magnitude.veering_distance,
            record.len(),
            record.total_elapsed_ms()
        );

        Ok(VeeringOutcome::Detected(VeeringResult {
            direction: vote.direction,
            left_steps: vote.left_steps,
            right_steps: vote.right_steps,
            delta_theta_degrees: magnitude.delta_theta_degrees,
            veering_distance: magnitude.veering_distance,
            path_points,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VeeringError;
    use approx::assert_abs_diff_eq;

    fn canvas() -> Canvas {
        Canvas::new(300.0, 300.0).unwrap()
    }

    fn analyze(headings: &[f64], elapsed: &[u64], distance: f64) -> VeeringOutcome {
        let record = SessionRecord::from_parallel(headings, elapsed, distance).unwrap();
        VeeringAnalyzer::new().analyze(&record, canvas()).unwrap()
    }

    #[test]
    fn flat_session_veers_left_by_nothing() {
        let outcome = analyze(&[10.0, 10.0], &[0, 1000], 5.0);
        let result = outcome.result().unwrap();
        assert_eq!(result.direction, Direction::Left);
        assert_eq!(result.left_steps, 1);
        assert_eq!(result.delta_theta_degrees, 0.0);
        assert_eq!(result.veering_distance, 0.0);
        assert_eq!(
            outcome.message(),
            "Estimated Veering: 0.00 m, Change of Angle: 0.00°"
        );
    }

    #[test]
    fn steady_right_drift() {
        let outcome = analyze(&[0.0, 10.0, 20.0], &[0, 500, 500], 10.0);
        let result = outcome.result().unwrap();
        assert_eq!(result.direction, Direction::Right);
        assert_eq!(result.right_steps, 2);
        assert_abs_diff_eq!(result.delta_theta_degrees, 20.0, epsilon = 1e-12);
        assert_abs_diff_eq!(result.veering_distance, 3.42, epsilon = 0.005);
        assert_eq!(result.path_points.len(), 3);
        assert_eq!(
            outcome.message(),
            "Estimated Veering: 3.42 m, Change of Angle: 20.00°"
        );
    }

    #[test]
    fn drift_across_north() {
        let outcome = analyze(&[358.0, 2.0], &[0, 1000], 8.0);
        let result = outcome.result().unwrap();
        assert_eq!(result.direction, Direction::Right);
        assert_abs_diff_eq!(result.delta_theta_degrees, 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(result.veering_distance, 0.558, epsilon = 0.001);
        assert_eq!(result.display_veering_distance(2), 0.55);
    }

    #[test]
    fn small_angle_displays_without_float_drift() {
        let outcome = analyze(&[0.0, 4.1], &[0, 1000], 100.0);
        let result = outcome.result().unwrap();
        assert_eq!(result.display_delta_theta(2), 4.1);
        assert_eq!(
            outcome.message(),
            "Estimated Veering: 7.14 m, Change of Angle: 4.10°"
        );
    }

    #[test]
    fn non_finite_trace_scale_is_an_error() {
        let record =
            SessionRecord::from_parallel(&[0.0, 10.0, 20.0], &[0, 500, 500], 10.0).unwrap();
        let analyzer = VeeringAnalyzer::with_config(AnalyzerConfig {
            trace: TraceConfig {
                x_scale: f64::NAN,
                y_scale: 1.0,
            },
            ..AnalyzerConfig::default()
        });
        let err = analyzer.analyze(&record, canvas()).unwrap_err();
        assert!(matches!(err, VeeringError::InternalInconsistency { .. }));
    }

    #[test]
    fn empty_and_single_sample_sessions() {
        let empty = VeeringAnalyzer::new()
            .analyze(&SessionRecord::empty(), canvas())
            .unwrap();
        assert_eq!(empty, VeeringOutcome::TooShort);
        assert_eq!(empty.message(), TOO_SHORT_MESSAGE);

        // A zero total must not be divided by for a single sample.
        let single = analyze(&[123.0], &[0], 4.0);
        assert_eq!(single, VeeringOutcome::NoVeering);
        assert_eq!(single.message(), NO_VEERING_MESSAGE);
        assert!(single.path_points().is_empty());
    }

    #[test]
    fn zero_elapsed_total_is_an_error() {
        let record = SessionRecord::from_parallel(&[10.0, 20.0], &[0, 0], 3.0).unwrap();
        let err = VeeringAnalyzer::new().analyze(&record, canvas()).unwrap_err();
        assert!(matches!(err, VeeringError::InternalInconsistency { .. }));
    }

    #[test]
    fn zero_distance_never_veers() {
        let outcome = analyze(&[0.0, 45.0, 90.0], &[0, 500, 500], 0.0);
        assert_eq!(outcome.result().unwrap().veering_distance, 0.0);
    }

    #[test]
    fn repeated_analysis_is_identical() {
        let record = SessionRecord::from_parallel(
            &[5.0, 9.0, 3.0, 12.0, 359.0],
            &[0, 250, 400, 350, 300],
            9.5,
        )
        .unwrap();
        let analyzer = VeeringAnalyzer::new();
        let a = analyzer.analyze(&record, canvas()).unwrap();
        let b = analyzer.analyze(&record, canvas()).unwrap();
        assert_eq!(a, b);

        let (ra, rb) = (a.result().unwrap(), b.result().unwrap());
        assert_eq!(
            ra.veering_distance.to_bits(),
            rb.veering_distance.to_bits()
        );
        for (p, q) in ra.path_points.iter().zip(&rb.path_points) {
            assert_eq!(p.x.to_bits(), q.x.to_bits());
            assert_eq!(p.y.to_bits(), q.y.to_bits());
        }
    }

    #[test]
    fn settle_window_smooths_endpoints() {
        let record = SessionRecord::from_parallel(
            &[30.0, 0.0, 0.0, 0.0, 10.0, 10.0, 60.0],
            &[0, 100, 2000, 2000, 2000, 2000, 100],
            10.0,
        )
        .unwrap();

        let raw = VeeringAnalyzer::new().magnitude(&record).unwrap().unwrap();
        assert_abs_diff_eq!(raw.delta_theta_degrees, 30.0, epsilon = 1e-9);

        let smoothed = VeeringAnalyzer::with_config(AnalyzerConfig {
            settle_window_ms: 200,
            ..AnalyzerConfig::default()
        })
        .magnitude(&record)
        .unwrap()
        .unwrap();
        // Start mean of {30, 0} = 15, end mean of {10, 60} = 35.
        assert_abs_diff_eq!(smoothed.delta_theta_degrees, 20.0, epsilon = 1e-6);
    }

    #[test]
    fn outcome_status_strings() {
        assert_eq!(VeeringOutcome::TooShort.status(), "too_short");
        assert_eq!(VeeringOutcome::NoVeering.status(), "no_veering");
    }
}

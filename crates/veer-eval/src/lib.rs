use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use veer_core::{
    Canvas, Direction, HeadingSample, SessionRecord, VeeringAnalyzer, VeeringError,
    VeeringOutcome,
};

#[derive(Debug, Error)]
pub enum ReplayEvalError {
    #[error("failed to read dataset file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse dataset JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("dataset is invalid: {0}")]
    InvalidDataset(String),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReplayDataset {
    pub name: String,
    pub canvas: ReplayCanvas,
    pub sessions: Vec<ReplaySession>,
}

impl ReplayDataset {
    fn validate(&self) -> Result<(), ReplayEvalError> {
        if self.sessions.is_empty() {
            return Err(ReplayEvalError::InvalidDataset(
                "dataset must contain at least one session".to_string(),
            ));
        }

        if Canvas::new(self.canvas.width, self.canvas.height).is_err() {
            return Err(ReplayEvalError::InvalidDataset(
                "canvas width/height must be positive".to_string(),
            ));
        }

        for (index, session) in self.sessions.iter().enumerate() {
            let expected = &session.expected;
            if expected.status == ExpectedStatus::Detected && expected.direction.is_none() {
                return Err(ReplayEvalError::InvalidDataset(format!(
                    "session {index} expects a detection but names no direction"
                )));
            }
            if !(expected.tolerance.is_finite() && expected.tolerance >= 0.0) {
                return Err(ReplayEvalError::InvalidDataset(format!(
                    "session {index} tolerance must be finite and non-negative"
                )));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct ReplayCanvas {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReplaySession {
    pub name: String,
    pub walked_distance: f64,
    #[serde(default)]
    pub headings: Vec<HeadingSample>,
    pub expected: ExpectedOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpectedStatus {
    TooShort,
    NoVeering,
    Detected,
    /// Analysis must fail with an internal inconsistency
    Inconsistent,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExpectedOutcome {
    pub status: ExpectedStatus,
    #[serde(default)]
    pub direction: Option<Direction>,
    #[serde(default)]
    pub delta_theta_degrees: Option<f64>,
    #[serde(default)]
    pub veering_distance: Option<f64>,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

fn default_tolerance() -> f64 {
    1e-6
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayEvaluationReport {
    pub dataset_name: String,
    pub session_count: usize,
    pub detected_count: usize,
    pub mean_abs_delta_theta_error: f64,
    pub mean_abs_veering_error: f64,
    pub failures: Vec<String>,
}

impl ReplayEvaluationReport {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

pub fn load_dataset(path: impl AsRef<Path>) -> Result<ReplayDataset, ReplayEvalError> {
    let path = path.as_ref();
    let payload = fs::read_to_string(path).map_err(|source| ReplayEvalError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let dataset: ReplayDataset = serde_json::from_str(&payload)?;
    dataset.validate()?;
    Ok(dataset)
}

pub fn evaluate_dataset_path(
    path: impl AsRef<Path>,
) -> Result<ReplayEvaluationReport, ReplayEvalError> {
    let dataset = load_dataset(path)?;
    evaluate_dataset(&dataset)
}

pub fn evaluate_dataset(
    dataset: &ReplayDataset,
) -> Result<ReplayEvaluationReport, ReplayEvalError> {
    dataset.validate()?;

    let canvas = Canvas::new(dataset.canvas.width, dataset.canvas.height)
        .map_err(|e| ReplayEvalError::InvalidDataset(e.to_string()))?;
    let analyzer = VeeringAnalyzer::new();

    let mut failures = Vec::new();
    let mut delta_errors = Vec::new();
    let mut veer_errors = Vec::new();
    let mut detected_count = 0usize;

    for session in &dataset.sessions {
        let record = match SessionRecord::new(session.headings.clone(), session.walked_distance) {
            Ok(record) => record,
            Err(source) => {
                warn!("Session {} is not a valid recording: {}", session.name, source);
                failures.push(format!("{}: invalid session: {}", session.name, source));
                continue;
            }
        };

        let first = analyzer.analyze(&record, canvas);
        let second = analyzer.analyze(&record, canvas);
        if first != second {
            failures.push(format!(
                "{}: repeated analysis produced different results",
                session.name
            ));
        }

        let outcome = match (first, session.expected.status) {
            (Err(VeeringError::InternalInconsistency { .. }), ExpectedStatus::Inconsistent) => {
                continue;
            }
            (Err(source), _) => {
                warn!("Session {} failed: {}", session.name, source);
                failures.push(format!("{}: analysis failed: {}", session.name, source));
                continue;
            }
            (Ok(outcome), _) => outcome,
        };

        if let VeeringOutcome::Detected(_) = outcome {
            detected_count += 1;
        }

        check_outcome(
            &session.name,
            &outcome,
            &session.expected,
            &mut failures,
            &mut delta_errors,
            &mut veer_errors,
        );
    }

    let report = ReplayEvaluationReport {
        dataset_name: dataset.name.clone(),
        session_count: dataset.sessions.len(),
        detected_count,
        mean_abs_delta_theta_error: mean(&delta_errors),
        mean_abs_veering_error: mean(&veer_errors),
        failures,
    };

    info!(
        "Replay '{}': {} sessions, {} detected, {} failures",
        report.dataset_name,
        report.session_count,
        report.detected_count,
        report.failures.len()
    );

    Ok(report)
}

fn check_outcome(
    name: &str,
    outcome: &VeeringOutcome,
    expected: &ExpectedOutcome,
    failures: &mut Vec<String>,
    delta_errors: &mut Vec<f64>,
    veer_errors: &mut Vec<f64>,
) {
    let status_matches = matches!(
        (outcome, expected.status),
        (VeeringOutcome::TooShort, ExpectedStatus::TooShort)
            | (VeeringOutcome::NoVeering, ExpectedStatus::NoVeering)
            | (VeeringOutcome::Detected(_), ExpectedStatus::Detected)
    );
    if !status_matches {
        failures.push(format!(
            "{name}: expected status {:?}, got {}",
            expected.status,
            outcome.status()
        ));
        return;
    }

    let Some(result) = outcome.result() else {
        return;
    };

    if let Some(direction) = expected.direction {
        if result.direction != direction {
            failures.push(format!(
                "{name}: expected direction {direction}, got {}",
                result.direction
            ));
        }
    }

    if let Some(delta) = expected.delta_theta_degrees {
        let err = (result.delta_theta_degrees - delta).abs();
        delta_errors.push(err);
        if err > expected.tolerance {
            failures.push(format!(
                "{name}: delta theta {:.4} differs from expected {delta:.4}",
                result.delta_theta_degrees
            ));
        }
    }

    if let Some(veer) = expected.veering_distance {
        let err = (result.veering_distance - veer).abs();
        veer_errors.push(err);
        if err > expected.tolerance {
            failures.push(format!(
                "{name}: veering distance {:.4} differs from expected {veer:.4}",
                result.veering_distance
            ));
        }
    }
}

fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        0.0
    } else {
        samples.iter().sum::<f64>() / samples.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(
        name: &str,
        headings: &[(f64, u64)],
        distance: f64,
        expected: ExpectedOutcome,
    ) -> ReplaySession {
        ReplaySession {
            name: name.to_string(),
            walked_distance: distance,
            headings: headings
                .iter()
                .map(|&(h, dt)| HeadingSample::new(h, dt))
                .collect(),
            expected,
        }
    }

    fn dataset(sessions: Vec<ReplaySession>) -> ReplayDataset {
        ReplayDataset {
            name: "unit".to_string(),
            canvas: ReplayCanvas {
                width: 300.0,
                height: 300.0,
            },
            sessions,
        }
    }

    fn expect(status: ExpectedStatus, direction: Option<Direction>) -> ExpectedOutcome {
        ExpectedOutcome {
            status,
            direction,
            delta_theta_degrees: None,
            veering_distance: None,
            tolerance: default_tolerance(),
        }
    }

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[1.0, 3.0]), 2.0);
    }

    #[test]
    fn wrong_direction_is_reported() {
        let report = evaluate_dataset(&dataset(vec![session(
            "right-drift",
            &[(0.0, 0), (10.0, 500)],
            4.0,
            expect(ExpectedStatus::Detected, Some(Direction::Left)),
        )]))
        .unwrap();

        assert!(!report.passed());
        assert_eq!(report.detected_count, 1);
        assert!(report.failures[0].contains("expected direction left"));
    }

    #[test]
    fn expected_inconsistency_passes() {
        let report = evaluate_dataset(&dataset(vec![session(
            "zero-time",
            &[(0.0, 0), (10.0, 0)],
            4.0,
            expect(ExpectedStatus::Inconsistent, None),
        )]))
        .unwrap();
        assert!(report.passed(), "{:?}", report.failures);
    }

    #[test]
    fn invalid_session_is_a_failure_not_an_abort() {
        let report = evaluate_dataset(&dataset(vec![
            session(
                "bad-heading",
                &[(0.0, 0), (400.0, 500)],
                4.0,
                expect(ExpectedStatus::Detected, Some(Direction::Right)),
            ),
            session(
                "bad-distance",
                &[(0.0, 0), (10.0, 500)],
                -1.0,
                expect(ExpectedStatus::Detected, Some(Direction::Right)),
            ),
            session(
                "fine",
                &[(0.0, 0), (10.0, 500)],
                4.0,
                expect(ExpectedStatus::Detected, Some(Direction::Right)),
            ),
        ]))
        .unwrap();

        assert_eq!(report.session_count, 3);
        assert_eq!(report.detected_count, 1);
        assert_eq!(report.failures.len(), 2);
        assert!(report.failures[0].starts_with("bad-heading: invalid session"));
        assert!(report.failures[1].starts_with("bad-distance: invalid session"));
    }

    #[test]
    fn detection_without_direction_is_invalid() {
        let err = evaluate_dataset(&dataset(vec![session(
            "bad",
            &[(0.0, 0)],
            1.0,
            expect(ExpectedStatus::Detected, None),
        )]))
        .unwrap_err();
        assert!(matches!(err, ReplayEvalError::InvalidDataset(_)));
    }
}

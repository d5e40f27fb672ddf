//! Lateral path trace for drawing a session's drift.
//!
//! The trace starts at the bottom centre of the canvas and climbs towards the
//! top in time-proportional steps. Each step moves sideways by its share of the
//! total turning, so the shape shows when and which way the walker drifted
//! rather than a metric reconstruction of the route.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analyzer::Direction;
use crate::error::{ensure_finite, Result, VeeringError};
use crate::math::signed_step;
use crate::session::HeadingSample;

/// Horizontal spread of the trace in canvas units. Values below ~10 look
/// nearly vertical; much larger values clip at the canvas edge.
pub const DEFAULT_X_SCALE: f64 = 25.0;
/// Fraction of the canvas height the trace climbs over a full session.
pub const DEFAULT_Y_SCALE: f64 = 1.0;

/// Scaling applied when laying the trace onto a canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    pub x_scale: f64,
    pub y_scale: f64,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            x_scale: DEFAULT_X_SCALE,
            y_scale: DEFAULT_Y_SCALE,
        }
    }
}

/// Rendering surface in canvas units; `y` grows downwards
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Result<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(VeeringError::InvalidCanvas { width, height });
        }
        Ok(Self { width, height })
    }

    /// Bottom-centre point where every trace starts
    pub fn origin(&self) -> PathPoint {
        PathPoint::new(self.width / 2.0, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
}

impl PathPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy)]
struct TraceStep {
    delta_y: f64,
    /// Signed sideways contribution; negative for leftward turns
    contribution: f64,
}

/// Lazily emitted trace points, consumed once.
///
/// Yields the canvas origin followed by one point per heading step. Build a
/// new trace to iterate again; construction is pure so the points repeat.
#[derive(Debug, Clone)]
pub struct PathTrace {
    origin: Option<PathPoint>,
    steps: std::vec::IntoIter<TraceStep>,
    x_total: f64,
    x_scale: f64,
    cursor: PathPoint,
}

impl PathTrace {
    fn empty() -> Self {
        Self {
            origin: None,
            steps: Vec::new().into_iter(),
            x_total: 0.0,
            x_scale: 0.0,
            cursor: PathPoint::new(0.0, 0.0),
        }
    }

    /// Sum of absolute sideways contributions; zero for a vertical trace
    pub fn x_total(&self) -> f64 {
        self.x_total
    }
}

impl Iterator for PathTrace {
    type Item = PathPoint;

    fn next(&mut self) -> Option<PathPoint> {
        if let Some(origin) = self.origin.take() {
            return Some(origin);
        }

        let step = self.steps.next()?;
        self.cursor.y -= step.delta_y;
        if self.x_total > 0.0 {
            self.cursor.x += (step.contribution / self.x_total) * self.x_scale;
        }
        Some(self.cursor)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.steps.len() + usize::from(self.origin.is_some());
        (n, Some(n))
    }
}

impl ExactSizeIterator for PathTrace {}

impl std::iter::FusedIterator for PathTrace {}

/// Builds the drift trace for a session.
///
/// Each step's vertical share is `elapsed / total_elapsed * height * y_scale`
/// and its sideways contribution is `delta_y * tan(|turn|)`, signed by the turn
/// direction, then normalised by the summed magnitude so the whole trace
/// spreads over `x_scale`. A `Straight` session, or one with no turning at all,
/// produces a vertical trace.
///
/// Fewer than two samples give an empty trace without touching
/// `total_elapsed_ms`. A zero total with two or more samples, or a
/// non-finite scale in `config`, is an internal inconsistency.
pub fn build_path_trace(
    headings: &[HeadingSample],
    total_elapsed_ms: u64,
    direction: Direction,
    canvas: Canvas,
    config: TraceConfig,
) -> Result<PathTrace> {
    ensure_finite(config.x_scale, "trace x scale")?;
    ensure_finite(config.y_scale, "trace y scale")?;
    if headings.len() < 2 {
        return Ok(PathTrace::empty());
    }
    if total_elapsed_ms == 0 {
        return Err(VeeringError::inconsistent(format!(
            "total elapsed time is zero across {} heading samples",
            headings.len()
        )));
    }

    let total = total_elapsed_ms as f64;
    let mut steps = Vec::with_capacity(headings.len() - 1);
    let mut x_total = 0.0_f64;

    for pair in headings.windows(2) {
        let turn = signed_step(pair[0].heading_degrees, pair[1].heading_degrees);
        let delta_y = ensure_finite(
            (pair[1].elapsed_ms as f64 / total) * canvas.height * config.y_scale,
            "trace step height",
        )?;

        let contribution = if direction == Direction::Straight {
            0.0
        } else {
            let sideways = ensure_finite(
                (delta_y * turn.abs().to_radians().tan()).abs(),
                "trace step offset",
            )?;
            if turn < 0.0 {
                -sideways
            } else {
                sideways
            }
        };

        x_total += contribution.abs();
        steps.push(TraceStep {
            delta_y,
            contribution,
        });
    }

    let x_total = ensure_finite(x_total, "trace horizontal total")?;
    debug!(target: "veer_core::trace",
        "Trace: {} steps, direction={}, x_total={:.4}",
        steps.len(), direction, x_total
    );

    let origin = canvas.origin();
    Ok(PathTrace {
        origin: Some(origin),
        steps: steps.into_iter(),
        x_total,
        x_scale: config.x_scale,
        cursor: origin,
    })
}

/// Closes a trace into the filled drift region: up to the top edge, back to
/// the centre line, and down to the origin.
pub fn close_outline(points: &[PathPoint], canvas: Canvas) -> Vec<PathPoint> {
    let Some(last) = points.last() else {
        return Vec::new();
    };

    let mut outline = Vec::with_capacity(points.len() + 3);
    outline.extend_from_slice(points);
    outline.push(PathPoint::new(last.x, 0.0));
    outline.push(PathPoint::new(canvas.width / 2.0, 0.0));
    outline.push(canvas.origin());
    outline
}

//! Veering estimation for gait and mobility sessions.
//!
//! A walking session is recorded as a sequence of compass headings, each
//! stamped with the time since the previous one, plus the pedometer distance.
//! Once tracking stops the frozen [`SessionRecord`] is analysed into:
//!
//! - a left/right/straight direction from a per-step heading vote,
//! - the angle between start and end heading and the lateral drift it implies
//!   over the walked distance,
//! - a time-weighted 2D trace for drawing the drift.
//!
//! ```
//! use veer_core::{Canvas, SessionRecord, VeeringAnalyzer, Direction};
//!
//! let record = SessionRecord::from_parallel(&[0.0, 10.0, 20.0], &[0, 500, 500], 10.0)?;
//! let outcome = VeeringAnalyzer::new().analyze(&record, Canvas::new(300.0, 300.0)?)?;
//!
//! let result = outcome.result().expect("two or more samples");
//! assert_eq!(result.direction, Direction::Right);
//! assert_eq!(outcome.message(), "Estimated Veering: 3.42 m, Change of Angle: 20.00°");
//! # Ok::<(), veer_core::VeeringError>(())
//! ```

pub mod analyzer;
pub mod display;
pub mod error;
pub mod math;
pub mod recorder;
pub mod session;
pub mod time;
pub mod trace;

pub use analyzer::{
    classify_direction, compute_magnitude, heading_anchors, magnitude_between, AnalyzerConfig,
    Classification, Direction, DirectionVote, Magnitude, VeeringAnalyzer, VeeringOutcome,
    VeeringResult,
};
pub use error::{Result, VeeringError};
pub use recorder::{sensor_feed, RecorderConfig, SensorEvent, SessionRecorder};
pub use session::{HeadingSample, SessionRecord};
pub use trace::{build_path_trace, close_outline, Canvas, PathPoint, PathTrace, TraceConfig};

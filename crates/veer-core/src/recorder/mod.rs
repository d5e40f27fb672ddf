//! Incremental construction of a session while tracking is active.
//!
//! [`SessionRecorder`] stamps compass updates with the time since the previous
//! accepted update and keeps the latest pedometer distance. [`sensor_feed`]
//! moves the same samples across threads: sensor callbacks push events into a
//! channel and the collector freezes the session once every sender is gone.

pub mod feed;

pub use feed::{sensor_feed, FeedCollector, FeedSender, SensorEvent};

use std::time::Duration;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{Result, VeeringError};
use crate::math::{circular_distance, is_valid_heading};
use crate::session::{HeadingSample, SessionRecord};
use crate::time::{elapsed_ms, Clock, SystemClock};

/// Smallest heading change reported by typical compass providers (degrees)
pub const DEFAULT_MIN_HEADING_CHANGE_DEG: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderConfig {
    /// Updates closer than this to the last accepted heading are dropped
    pub min_heading_change_deg: f64,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            min_heading_change_deg: DEFAULT_MIN_HEADING_CHANGE_DEG,
        }
    }
}

/// Builds a [`SessionRecord`] from live compass and pedometer updates.
#[derive(Debug, Clone)]
pub struct SessionRecorder<C: Clock = SystemClock> {
    clock: C,
    config: RecorderConfig,
    last_stamp: Duration,
    samples: Vec<HeadingSample>,
    walked_distance: f64,
    dropped: usize,
}

impl SessionRecorder<SystemClock> {
    /// Starts a session now with the default heading filter.
    pub fn start() -> Self {
        Self::with_clock(SystemClock::default(), RecorderConfig::default())
    }
}

impl<C: Clock> SessionRecorder<C> {
    /// Starts a session at the clock's current time.
    pub fn with_clock(mut clock: C, config: RecorderConfig) -> Self {
        let last_stamp = clock.now();
        Self {
            clock,
            config,
            last_stamp,
            samples: Vec::new(),
            walked_distance: 0.0,
            dropped: 0,
        }
    }

    /// Records a compass update. The first sample is stamped with the time
    /// since the session started.
    ///
    /// Returns `false` when the update was filtered out for moving less than
    /// `min_heading_change_deg`; its time is carried into the next accepted
    /// sample. Updates filtered after the last accepted sample add no time to
    /// the finished session.
    pub fn record_heading(&mut self, heading_deg: f64) -> Result<bool> {
        if !is_valid_heading(heading_deg) {
            return Err(VeeringError::InvalidHeading {
                index: self.samples.len(),
                value: heading_deg,
            });
        }

        let now = self.clock.now();
        if let Some(last) = self.samples.last() {
            if circular_distance(last.heading_degrees, heading_deg)
                < self.config.min_heading_change_deg
            {
                self.dropped += 1;
                return Ok(false);
            }
        }

        let sample = HeadingSample::new(heading_deg, elapsed_ms(self.last_stamp, now));
        self.last_stamp = now;
        debug!(target: "veer_core::recorder",
            "Heading {:.1} deg after {} ms", sample.heading_degrees, sample.elapsed_ms
        );
        self.samples.push(sample);
        Ok(true)
    }

    /// Replaces the walked distance with the latest pedometer reading.
    pub fn update_distance(&mut self, distance: f64) -> Result<()> {
        if !distance.is_finite() || distance < 0.0 {
            return Err(VeeringError::InvalidDistance(distance));
        }
        self.walked_distance = distance;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of updates dropped by the heading filter
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Stops tracking and freezes the session. The session ends at the last
    /// accepted heading.
    pub fn finish(self) -> Result<SessionRecord> {
        info!(
            "Session stopped: {} headings ({} filtered), distance {:.2}",
            self.samples.len(),
            self.dropped,
            self.walked_distance
        );
        SessionRecord::new(self.samples, self.walked_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::SteppingClock;

    fn recorder() -> SessionRecorder<SteppingClock> {
        SessionRecorder::with_clock(
            SteppingClock::new(Duration::from_millis(100)),
            RecorderConfig::default(),
        )
    }

    #[test]
    fn stamps_time_since_previous_sample() {
        let mut rec = recorder();
        assert!(rec.record_heading(10.0).unwrap());
        assert!(rec.record_heading(20.0).unwrap());
        rec.update_distance(12.0).unwrap();

        let record = rec.finish().unwrap();
        let deltas: Vec<u64> = record.time_deltas().collect();
        assert_eq!(deltas, vec![100, 100]);
        assert_eq!(record.total_elapsed_ms(), 200);
        assert_eq!(record.walked_distance(), 12.0);
    }

    #[test]
    fn small_changes_are_filtered_and_time_carried_over() {
        let mut rec = recorder();
        rec.record_heading(10.0).unwrap();
        assert!(!rec.record_heading(10.5).unwrap());
        assert!(rec.record_heading(359.5).unwrap());
        assert!(!rec.record_heading(0.2).unwrap());
        assert_eq!(rec.dropped(), 2);

        let record = rec.finish().unwrap();
        let deltas: Vec<u64> = record.time_deltas().collect();
        assert_eq!(deltas, vec![100, 200]);
    }

    #[test]
    fn trailing_filtered_updates_add_no_time() {
        let mut rec = recorder();
        rec.record_heading(10.0).unwrap();
        rec.record_heading(30.0).unwrap();
        assert!(!rec.record_heading(30.4).unwrap());
        assert!(!rec.record_heading(29.8).unwrap());

        let record = rec.finish().unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record.total_elapsed_ms(), 200);
        assert_eq!(record.end_heading(), Some(30.0));
    }

    #[test]
    fn rejects_invalid_updates() {
        let mut rec = recorder();
        assert!(rec.record_heading(f64::NAN).is_err());
        assert!(rec.update_distance(-3.0).is_err());
        assert!(rec.is_empty());
    }

    #[test]
    fn finished_empty_session_is_valid() {
        let record = recorder().finish().unwrap();
        assert!(record.is_empty());
    }
}

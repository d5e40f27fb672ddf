//! Walking-session data model.
//!
//! A [`SessionRecord`] is the frozen input to analysis: the ordered compass
//! headings collected while tracking plus the pedometer distance. Records are
//! only built through validating constructors, so `total_elapsed_ms` always
//! equals the sum of the per-sample time deltas.

use serde::{Deserialize, Serialize};

use crate::error::{Result, VeeringError};
use crate::math::is_valid_heading;

/// One compass reading and the time since the previous reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadingSample {
    /// Compass heading in degrees, `0 <= h < 360`
    pub heading_degrees: f64,
    /// Milliseconds since the previous sample
    pub elapsed_ms: u64,
}

impl HeadingSample {
    pub fn new(heading_degrees: f64, elapsed_ms: u64) -> Self {
        Self {
            heading_degrees,
            elapsed_ms,
        }
    }
}

/// Immutable session handed to the analyzer once tracking stops.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionRecord {
    headings: Vec<HeadingSample>,
    total_elapsed_ms: u64,
    walked_distance: f64,
}

impl SessionRecord {
    /// Validates the samples and distance and derives the elapsed total.
    pub fn new(headings: Vec<HeadingSample>, walked_distance: f64) -> Result<Self> {
        if !walked_distance.is_finite() || walked_distance < 0.0 {
            return Err(VeeringError::InvalidDistance(walked_distance));
        }

        if let Some((index, sample)) = headings
            .iter()
            .enumerate()
            .find(|(_, s)| !is_valid_heading(s.heading_degrees))
        {
            return Err(VeeringError::InvalidHeading {
                index,
                value: sample.heading_degrees,
            });
        }

        let total_elapsed_ms = headings
            .iter()
            .try_fold(0u64, |acc, s| acc.checked_add(s.elapsed_ms))
            .ok_or_else(|| VeeringError::inconsistent("total elapsed time overflows u64"))?;

        Ok(Self {
            headings,
            total_elapsed_ms,
            walked_distance,
        })
    }

    /// Builds a record from parallel heading and interval arrays.
    pub fn from_parallel(
        headings_deg: &[f64],
        elapsed_ms: &[u64],
        walked_distance: f64,
    ) -> Result<Self> {
        if headings_deg.len() != elapsed_ms.len() {
            return Err(VeeringError::inconsistent(format!(
                "{} headings but {} time intervals",
                headings_deg.len(),
                elapsed_ms.len()
            )));
        }

        let samples = headings_deg
            .iter()
            .zip(elapsed_ms)
            .map(|(&h, &dt)| HeadingSample::new(h, dt))
            .collect();
        Self::new(samples, walked_distance)
    }

    /// An empty session with no distance walked.
    pub fn empty() -> Self {
        Self {
            headings: Vec::new(),
            total_elapsed_ms: 0,
            walked_distance: 0.0,
        }
    }

    pub fn headings(&self) -> &[HeadingSample] {
        &self.headings
    }

    pub fn heading_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.headings.iter().map(|s| s.heading_degrees)
    }

    pub fn time_deltas(&self) -> impl Iterator<Item = u64> + '_ {
        self.headings.iter().map(|s| s.elapsed_ms)
    }

    pub fn total_elapsed_ms(&self) -> u64 {
        self.total_elapsed_ms
    }

    pub fn walked_distance(&self) -> f64 {
        self.walked_distance
    }

    pub fn len(&self) -> usize {
        self.headings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headings.is_empty()
    }

    /// Heading at session start, if any sample was recorded
    pub fn start_heading(&self) -> Option<f64> {
        self.headings.first().map(|s| s.heading_degrees)
    }

    /// Heading at session end, if any sample was recorded
    pub fn end_heading(&self) -> Option<f64> {
        self.headings.last().map(|s| s.heading_degrees)
    }
}

impl Default for SessionRecord {
    fn default() -> Self {
        Self::empty()
    }
}

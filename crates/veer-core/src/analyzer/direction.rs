use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::session::HeadingSample;

/// Width of the band either side of North treated as a seam crossing (degrees)
const NORTH_SEAM_DEG: f64 = 5.0;
const NORTH_SEAM_UPPER_DEG: f64 = 360.0 - NORTH_SEAM_DEG;

/// Net veering direction of a walking session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Straight,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Straight => "straight",
        }
    }

    /// The opposite direction; `Straight` mirrors onto itself.
    pub fn mirrored(&self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Straight => Direction::Straight,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-step vote tallies behind a direction decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionVote {
    pub direction: Direction,
    pub left_steps: usize,
    pub right_steps: usize,
}

impl DirectionVote {
    fn from_counts(left_steps: usize, right_steps: usize) -> Self {
        let direction = if left_steps > right_steps {
            Direction::Left
        } else if right_steps > left_steps {
            Direction::Right
        } else {
            Direction::Straight
        };

        Self {
            direction,
            left_steps,
            right_steps,
        }
    }
}

/// Result of classifying a heading sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// No samples were recorded
    TooShort,
    /// A single sample: nothing to compare against
    NoVeering,
    Voted(DirectionVote),
}

/// Which way a single step between consecutive headings counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepVote {
    Left,
    Right,
}

fn in_north_band(heading: f64) -> bool {
    (0.0..NORTH_SEAM_DEG).contains(&heading)
}

/// Votes on one step. Only a crossing of the North seam gets wraparound
/// treatment; every other step is judged by the sign of the raw difference,
/// and an unchanged heading counts as a left step.
fn vote_step(prev: f64, curr: f64) -> StepVote {
    if in_north_band(prev) && curr > NORTH_SEAM_UPPER_DEG {
        StepVote::Left
    } else if prev > NORTH_SEAM_UPPER_DEG && in_north_band(curr) {
        StepVote::Right
    } else if curr > prev {
        StepVote::Right
    } else {
        StepVote::Left
    }
}

/// Classifies the net veering direction with a per-step derivative vote.
pub fn classify_direction(headings: &[HeadingSample]) -> Classification {
    match headings.len() {
        0 => return Classification::TooShort,
        1 => return Classification::NoVeering,
        _ => {}
    }

    let (mut left, mut right) = (0usize, 0usize);
    for pair in headings.windows(2) {
        match vote_step(pair[0].heading_degrees, pair[1].heading_degrees) {
            StepVote::Left => left += 1,
            StepVote::Right => right += 1,
        }
    }

    let vote = DirectionVote::from_counts(left, right);
    debug!(target: "veer_core::analyzer",
        "Direction vote: left={}, right={} -> {}",
        left, right, vote.direction
    );

    Classification::Voted(vote)
}

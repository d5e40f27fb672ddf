use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, Result, VeeringError};
use crate::math::{circular_distance, is_valid_heading};
use crate::session::HeadingSample;

/// Size of the veer: angle between start and end heading and lateral offset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Magnitude {
    /// Minimal circular difference between start and end heading, `[0, 180]`
    pub delta_theta_degrees: f64,
    /// Lateral drift, same units as the walked distance
    pub veering_distance: f64,
}

/// Magnitude from the first and last heading of a session.
///
/// Returns `Ok(None)` when there are no headings.
pub fn compute_magnitude(headings: &[HeadingSample], distance: f64) -> Result<Option<Magnitude>> {
    match (headings.first(), headings.last()) {
        (Some(start), Some(end)) => {
            magnitude_between(start.heading_degrees, end.heading_degrees, distance).map(Some)
        }
        _ => Ok(None),
    }
}

/// `veering_distance = |sin(delta_theta) * distance|` with `delta_theta` the
/// circular separation of the two anchors.
pub fn magnitude_between(start_deg: f64, end_deg: f64, distance: f64) -> Result<Magnitude> {
    if !distance.is_finite() || distance < 0.0 {
        return Err(VeeringError::InvalidDistance(distance));
    }
    for (index, value) in [start_deg, end_deg].into_iter().enumerate() {
        if !is_valid_heading(value) {
            return Err(VeeringError::InvalidHeading { index, value });
        }
    }

    let delta_theta_degrees = circular_distance(start_deg, end_deg);
    let veering_distance = ensure_finite(
        (delta_theta_degrees.to_radians().sin() * distance).abs(),
        "veering distance",
    )?;

    Ok(Magnitude {
        delta_theta_degrees,
        veering_distance,
    })
}

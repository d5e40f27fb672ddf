//! User-facing text for analysis outcomes.

/// Decimal places kept in displayed values.
pub const DEFAULT_DISPLAY_PLACES: u32 = 2;

pub const TOO_SHORT_MESSAGE: &str = "Session was too short to detect veering";
pub const NO_VEERING_MESSAGE: &str = "No veering was detected in this session";

/// Slack for products such as `4.1 * 100 == 409.99999999999994` that land
/// just below the intended whole number.
const TRUNCATE_EPSILON: f64 = 1e-9;

/// Drops digits beyond `places` decimals, rounding towards negative infinity.
///
/// Display-only: `truncate(3.4202, 2) == 3.42`.
pub fn truncate(value: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places as i32);
    ((value * scale) + TRUNCATE_EPSILON).floor() / scale
}

/// "Estimated Veering: {distance} m, Change of Angle: {angle}°"
pub fn veering_summary(veering_distance: f64, delta_theta_degrees: f64, places: u32) -> String {
    let p = places as usize;
    format!(
        "Estimated Veering: {:.*} m, Change of Angle: {:.*}°",
        p,
        truncate(veering_distance, places),
        p,
        truncate(delta_theta_degrees, places)
    )
}

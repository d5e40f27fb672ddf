/// Degrees in a full compass turn.
pub const FULL_TURN_DEG: f64 = 360.0;

const HALF_TURN_DEG: f64 = 180.0;

/// Returns true for finite headings in `[0, 360)`.
pub fn is_valid_heading(heading_deg: f64) -> bool {
    heading_deg.is_finite() && (0.0..FULL_TURN_DEG).contains(&heading_deg)
}

/// Minimal angular separation between two compass headings, in `[0, 180]`.
///
/// `circular_distance(10.0, 350.0) == 20.0`, never 340.
pub fn circular_distance(a_deg: f64, b_deg: f64) -> f64 {
    let d = (a_deg - b_deg).abs().rem_euclid(FULL_TURN_DEG);
    d.min(FULL_TURN_DEG - d)
}

/// Signed heading change from `prev` to `curr` in `(-180, 180]`.
///
/// Positive values are clockwise (rightward) turns.
pub fn signed_step(prev_deg: f64, curr_deg: f64) -> f64 {
    let d = (curr_deg - prev_deg).rem_euclid(FULL_TURN_DEG);
    if d > HALF_TURN_DEG {
        d - FULL_TURN_DEG
    } else {
        d
    }
}

/// Circular mean of a set of headings, in `[0, 360)`.
///
/// Returns `None` for an empty set or when the headings cancel out
/// (for example two opposite bearings), since no mean direction exists.
pub fn circular_mean<I>(headings_deg: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (mut sum_sin, mut sum_cos, mut count) = (0.0_f64, 0.0_f64, 0usize);
    for h in headings_deg {
        let rad = h.to_radians();
        sum_sin += rad.sin();
        sum_cos += rad.cos();
        count += 1;
    }

    if count == 0 || (sum_sin.hypot(sum_cos) / count as f64) < 1e-9 {
        return None;
    }

    let mean = sum_sin.atan2(sum_cos).to_degrees().rem_euclid(FULL_TURN_DEG);
    // rem_euclid can round tiny negative angles up to exactly 360.
    Some(if mean >= FULL_TURN_DEG { 0.0 } else { mean })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn distance_wraps_across_north() {
        assert_abs_diff_eq!(circular_distance(10.0, 350.0), 20.0, epsilon = 1e-12);
        assert_abs_diff_eq!(circular_distance(350.0, 10.0), 20.0, epsilon = 1e-12);
        assert_abs_diff_eq!(circular_distance(358.0, 2.0), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn distance_stays_within_half_turn() {
        for a in (0..360).step_by(7) {
            for b in (0..360).step_by(11) {
                let d = circular_distance(a as f64, b as f64);
                assert!((0.0..=180.0).contains(&d), "{a} -> {b} gave {d}");
            }
        }
        assert_abs_diff_eq!(circular_distance(0.0, 180.0), 180.0, epsilon = 1e-12);
    }

    #[test]
    fn signed_step_prefers_short_way_round() {
        assert_abs_diff_eq!(signed_step(358.0, 2.0), 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(signed_step(2.0, 358.0), -4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(signed_step(90.0, 45.0), -45.0, epsilon = 1e-12);
        assert_abs_diff_eq!(signed_step(10.0, 10.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn mean_of_headings_straddling_north() {
        let mean = circular_mean([350.0, 10.0]).unwrap();
        assert!(mean < 1e-9 || (FULL_TURN_DEG - mean) < 1e-9);

        let mean = circular_mean([80.0, 100.0]).unwrap();
        assert_abs_diff_eq!(mean, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn mean_is_undefined_for_empty_or_opposite_sets() {
        assert!(circular_mean(std::iter::empty()).is_none());
        assert!(circular_mean([0.0, 180.0]).is_none());
    }

    #[test]
    fn heading_range_check() {
        assert!(is_valid_heading(0.0));
        assert!(is_valid_heading(359.99));
        assert!(!is_valid_heading(360.0));
        assert!(!is_valid_heading(-0.5));
        assert!(!is_valid_heading(f64::NAN));
    }
}

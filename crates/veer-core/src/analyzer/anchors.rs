use log::debug;

use crate::math::circular_mean;
use crate::session::SessionRecord;

/// Start and end headings used for the magnitude.
///
/// With a non-zero `settle_window_ms`, each anchor is the circular mean of the
/// samples in the first (respectively last) `settle_window_ms` of the session,
/// which smooths out the fumbling of starting and stopping. Sessions no longer
/// than the window, and windows whose samples cancel out, fall back to the raw
/// first and last headings.
pub fn heading_anchors(record: &SessionRecord, settle_window_ms: u64) -> Option<(f64, f64)> {
    let raw = (record.start_heading()?, record.end_heading()?);
    let total = record.total_elapsed_ms();
    if settle_window_ms == 0 || total <= settle_window_ms {
        return Some(raw);
    }

    // Time since session start at which each sample arrived.
    let arrival: Vec<u64> = record
        .time_deltas()
        .scan(0u64, |t, dt| {
            *t += dt;
            Some(*t)
        })
        .collect();
    let last = arrival.len() - 1;

    let start_window = record
        .heading_values()
        .zip(&arrival)
        .enumerate()
        .filter(|&(i, (_, t))| i == 0 || *t <= settle_window_ms)
        .map(|(_, (h, _))| h);
    let end_window = record
        .heading_values()
        .zip(&arrival)
        .enumerate()
        .filter(|&(i, (_, t))| i == last || total - *t <= settle_window_ms)
        .map(|(_, (h, _))| h);

    let start = circular_mean(start_window).unwrap_or(raw.0);
    let end = circular_mean(end_window).unwrap_or(raw.1);

    debug!(target: "veer_core::analyzer",
        "Settle window {} ms: anchors {:.2} -> {:.2} (raw {:.2} -> {:.2})",
        settle_window_ms, start, end, raw.0, raw.1
    );

    Some((start, end))
}

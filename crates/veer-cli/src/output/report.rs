use veer_core::{close_outline, Canvas, SessionRecord, VeeringOutcome};

use crate::output::{Metadata, VeeringReport};
use crate::types::SessionData;

/// Assembles the JSON report for one analysed session
pub struct ReportBuilder {
    session: SessionData,
    canvas: Canvas,
    display_places: u32,
}

impl ReportBuilder {
    pub fn new(session: SessionData, canvas: Canvas, display_places: u32) -> Self {
        Self {
            session,
            canvas,
            display_places,
        }
    }

    pub fn finalize(self, record: &SessionRecord, outcome: &VeeringOutcome) -> VeeringReport {
        let ReportBuilder {
            session,
            canvas,
            display_places,
        } = self;

        let metadata = Metadata {
            session_name: session.name.clone(),
            source_file: session.session_file.display().to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            sample_count: record.len(),
            total_elapsed_ms: record.total_elapsed_ms(),
            walked_distance: record.walked_distance(),
            canvas_width: canvas.width,
            canvas_height: canvas.height,
        };

        let result = outcome.result();
        let path_points = outcome.path_points().to_vec();
        let outline = close_outline(&path_points, canvas);

        VeeringReport {
            metadata,
            status: outcome.status().to_string(),
            message: outcome.message_with_places(display_places),
            direction: result.map(|r| r.direction),
            left_steps: result.map(|r| r.left_steps),
            right_steps: result.map(|r| r.right_steps),
            delta_theta_degrees: result.map(|r| r.display_delta_theta(display_places)),
            veering_distance: result.map(|r| r.display_veering_distance(display_places)),
            path_points,
            outline,
        }
    }
}

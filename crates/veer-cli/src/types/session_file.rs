use serde::{Deserialize, Serialize};
use veer_core::{HeadingSample, SessionRecord};

use crate::errors::{Result, SessionError};

/// JSON representation of a recorded session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionFile {
    #[serde(default)]
    pub name: Option<String>,
    pub walked_distance: f64,
    /// Optional declared total; checked against the samples when present
    #[serde(default)]
    pub total_elapsed_ms: Option<u64>,
    #[serde(default)]
    pub headings: Vec<HeadingSample>,
}

impl SessionFile {
    /// Validate and freeze into a [`SessionRecord`]
    pub fn into_record(self) -> Result<SessionRecord> {
        let declared = self.total_elapsed_ms;
        let record = SessionRecord::new(self.headings, self.walked_distance)?;

        if let Some(declared) = declared {
            if declared != record.total_elapsed_ms() {
                return Err(SessionError::InconsistentTotal {
                    declared,
                    computed: record.total_elapsed_ms(),
                });
            }
        }

        Ok(record)
    }
}

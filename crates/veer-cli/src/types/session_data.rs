use std::path::{Path, PathBuf};

use crate::errors::{Result, SessionError};

/// On-disk layout of a recorded session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionFormat {
    Json,
    Csv,
}

impl SessionFormat {
    /// Guess the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("json") => Ok(SessionFormat::Json),
            Some("csv") => Ok(SessionFormat::Csv),
            other => Err(SessionError::UnsupportedFormat(format!(
                "cannot infer session format from extension {:?} of {}",
                other.unwrap_or(""),
                path.display()
            ))),
        }
    }
}

/// A session file to analyse
#[derive(Debug, Clone)]
pub struct SessionData {
    /// Path to the session file
    pub session_file: PathBuf,
    pub format: SessionFormat,
    /// Session name (derived from the filename unless the file names itself)
    pub name: String,
}

impl SessionData {
    pub fn new(session_file: PathBuf, format: SessionFormat) -> Self {
        let name = session_file
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unnamed_session")
            .to_string();

        Self {
            session_file,
            format,
            name,
        }
    }
}

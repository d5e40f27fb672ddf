pub mod errors;
pub mod output;
pub mod session;
pub mod types;

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use veer_core::VeeringAnalyzer;

use crate::errors::Result;
use crate::output::{ReportBuilder, VeeringReport};
use crate::session::SessionParser;
use crate::types::{CliConfig, SessionData, SessionFormat};

/// Runs the veering analyzer on recorded session files
pub struct SessionProcessor {
    analyzer: VeeringAnalyzer,
    config: CliConfig,
}

impl SessionProcessor {
    pub fn new(config: CliConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            analyzer: VeeringAnalyzer::with_config(config.analyzer),
            config,
        })
    }

    pub fn config(&self) -> &CliConfig {
        &self.config
    }

    /// Analyse one session file.
    ///
    /// `format` defaults to the file extension; `distance` is required for
    /// CSV sessions and overrides the recorded distance of JSON sessions.
    pub fn process_session<P: AsRef<Path>>(
        &self,
        session_path: P,
        format: Option<SessionFormat>,
        distance: Option<f64>,
    ) -> Result<VeeringReport> {
        let path = session_path.as_ref();
        let format = match format {
            Some(format) => format,
            None => SessionFormat::from_path(path)?,
        };

        let mut session = SessionData::new(path.to_path_buf(), format);
        let parsed = SessionParser::parse_file(path, format, distance)?;
        if let Some(name) = parsed.name {
            session.name = name;
        }

        info!(
            "Processing session: {} ({} samples)",
            session.name,
            parsed.record.len()
        );

        let canvas = self.config.canvas()?;
        let outcome = self.analyzer.analyze(&parsed.record, canvas)?;
        info!("{}", outcome.message_with_places(self.config.analyzer.display_places));

        Ok(ReportBuilder::new(session, canvas, self.config.analyzer.display_places)
            .finalize(&parsed.record, &outcome))
    }

    /// Serialise a report as JSON
    pub fn render(&self, report: &VeeringReport) -> Result<String> {
        let json = if self.config.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }

    /// Write a report to `path`, or to `<output_dir>/<session>.veering.json`
    pub fn write_report(&self, report: &VeeringReport, path: Option<&Path>) -> Result<PathBuf> {
        let target = match path {
            Some(path) => path.to_path_buf(),
            None => self
                .config
                .output_dir
                .join(format!("{}.veering.json", report_stem(report))),
        };

        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, self.render(report)?)?;
        info!("Wrote report to {}", target.display());
        Ok(target)
    }
}

/// File stem for a saved report. Session names come from the session file
/// itself, so only their final path component is used; names without one
/// fall back to the source file's stem.
fn report_stem(report: &VeeringReport) -> &str {
    let name = report.metadata.session_name.as_str();
    match Path::new(name).file_name().and_then(|n| n.to_str()) {
        Some(stem) => stem,
        None => Path::new(&report.metadata.source_file)
            .file_stem()
            .and_then(|n| n.to_str())
            .unwrap_or("unnamed_session"),
    }
}

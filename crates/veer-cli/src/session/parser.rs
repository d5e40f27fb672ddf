use csv::Reader;
use std::fs::File;
use std::path::Path;
use veer_core::{HeadingSample, SessionRecord};

use crate::errors::{Result, SessionError};
use crate::types::{SessionFile, SessionFormat};

/// A parsed session and the name it declared, if any
#[derive(Debug, Clone)]
pub struct ParsedSession {
    pub name: Option<String>,
    pub record: SessionRecord,
}

/// Parser for recorded heading sessions
pub struct SessionParser;

impl SessionParser {
    /// Parse a session file in the given format.
    ///
    /// CSV sessions carry no distance, so `distance` must be supplied for
    /// them; for JSON sessions it overrides the recorded distance.
    pub fn parse_file<P: AsRef<Path>>(
        path: P,
        format: SessionFormat,
        distance: Option<f64>,
    ) -> Result<ParsedSession> {
        match format {
            SessionFormat::Json => {
                let mut parsed = Self::parse_json(&path)?;
                if let Some(distance) = distance {
                    let headings = parsed.record.headings().to_vec();
                    parsed.record = SessionRecord::new(headings, distance)?;
                }
                Ok(parsed)
            }
            SessionFormat::Csv => {
                let distance = distance.ok_or_else(|| {
                    SessionError::InvalidConfig(
                        "CSV sessions need a walked distance (--distance)".to_string(),
                    )
                })?;
                let record = SessionRecord::new(Self::parse_csv(&path)?, distance)?;
                Ok(ParsedSession { name: None, record })
            }
        }
    }

    /// Parse a JSON session file
    pub fn parse_json<P: AsRef<Path>>(path: P) -> Result<ParsedSession> {
        let file = File::open(path.as_ref()).map_err(|_| {
            SessionError::SessionFileNotFound(path.as_ref().display().to_string())
        })?;

        let session: SessionFile = serde_json::from_reader(std::io::BufReader::new(file))?;
        let name = session.name.clone();
        let record = session.into_record()?;

        log::info!(
            "Loaded {} heading samples from {}",
            record.len(),
            path.as_ref().display()
        );
        Ok(ParsedSession { name, record })
    }

    /// Parse heading samples from a CSV file
    ///
    /// Expected format:
    /// heading_degrees,elapsed_ms
    pub fn parse_csv<P: AsRef<Path>>(path: P) -> Result<Vec<HeadingSample>> {
        let file = File::open(path.as_ref()).map_err(|_| {
            SessionError::SessionFileNotFound(path.as_ref().display().to_string())
        })?;

        let mut reader = Reader::from_reader(file);
        let mut samples = Vec::new();

        for (line_number, result) in reader.records().enumerate() {
            // +1 for header, +1 for 1-based indexing
            let line = line_number + 2;
            let record = result.map_err(|e| SessionError::CsvFormat {
                line,
                message: format!("CSV error: {}", e),
            })?;

            if record.len() < 2 {
                return Err(SessionError::CsvFormat {
                    line,
                    message: format!("Expected at least 2 columns, found {}", record.len()),
                });
            }

            let heading_degrees: f64 =
                record[0]
                    .trim()
                    .parse()
                    .map_err(|e| SessionError::CsvFormat {
                        line,
                        message: format!("Invalid heading_degrees: {}", e),
                    })?;

            let elapsed_ms: u64 = record[1]
                .trim()
                .parse()
                .map_err(|e| SessionError::CsvFormat {
                    line,
                    message: format!("Invalid elapsed_ms: {}", e),
                })?;

            samples.push(HeadingSample::new(heading_degrees, elapsed_ms));
        }

        log::info!("Loaded {} heading samples from CSV", samples.len());
        Ok(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_with_suffix(suffix: &str, lines: &[&str]) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn parse_valid_csv_session() {
        let file = temp_with_suffix(
            ".csv",
            &["heading_degrees,elapsed_ms", "358.0,0", "2.0,1000"],
        );

        let parsed = SessionParser::parse_file(file.path(), SessionFormat::Csv, Some(8.0)).unwrap();
        assert_eq!(parsed.record.len(), 2);
        assert_eq!(parsed.record.total_elapsed_ms(), 1000);
        assert_eq!(parsed.record.walked_distance(), 8.0);
    }

    #[test]
    fn csv_without_distance_is_rejected() {
        let file = temp_with_suffix(".csv", &["heading_degrees,elapsed_ms", "10.0,0"]);
        assert!(matches!(
            SessionParser::parse_file(file.path(), SessionFormat::Csv, None),
            Err(SessionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn csv_reports_bad_line() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "heading_degrees,elapsed_ms").unwrap();
        writeln!(file, "10.0,0").unwrap();
        writeln!(file, "north,500").unwrap();
        file.flush().unwrap();

        match SessionParser::parse_csv(file.path()) {
            Err(SessionError::CsvFormat { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected CSV format error, got {other:?}"),
        }
    }

    #[test]
    fn parse_json_session() {
        let file = temp_with_suffix(
            ".json",
            &[r#"{
                "name": "hallway",
                "walked_distance": 10.0,
                "total_elapsed_ms": 1000,
                "headings": [
                    {"heading_degrees": 0.0, "elapsed_ms": 0},
                    {"heading_degrees": 10.0, "elapsed_ms": 500},
                    {"heading_degrees": 20.0, "elapsed_ms": 500}
                ]
            }"#],
        );

        let parsed = SessionParser::parse_json(file.path()).unwrap();
        assert_eq!(parsed.name.as_deref(), Some("hallway"));
        assert_eq!(parsed.record.len(), 3);
    }

    #[test]
    fn json_distance_can_be_overridden() {
        let file = temp_with_suffix(
            ".json",
            &[r#"{"walked_distance": 3.0, "headings": [{"heading_degrees": 5.0, "elapsed_ms": 0}]}"#],
        );
        let parsed =
            SessionParser::parse_file(file.path(), SessionFormat::Json, Some(7.5)).unwrap();
        assert_eq!(parsed.record.walked_distance(), 7.5);
    }

    #[test]
    fn json_with_wrong_total_is_inconsistent() {
        let file = temp_with_suffix(
            ".json",
            &[r#"{"walked_distance": 1.0, "total_elapsed_ms": 5,
                 "headings": [{"heading_degrees": 5.0, "elapsed_ms": 0},
                              {"heading_degrees": 6.0, "elapsed_ms": 10}]}"#],
        );
        assert!(matches!(
            SessionParser::parse_json(file.path()),
            Err(SessionError::InconsistentTotal {
                declared: 5,
                computed: 10
            })
        ));
    }

    #[test]
    fn missing_file_is_reported() {
        assert!(matches!(
            SessionParser::parse_json("/no/such/session.json"),
            Err(SessionError::SessionFileNotFound(_))
        ));
    }
}

use std::path::PathBuf;

use veer_eval::{evaluate_dataset_path, load_dataset};

fn dataset_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("hallway_sessions_v1.json")
}

#[test]
fn hallway_dataset_passes_quality_gates() {
    let report = evaluate_dataset_path(dataset_path()).expect("dataset should evaluate");

    assert!(report.passed(), "replay gates failed: {:?}", report.failures);
    assert_eq!(report.session_count, 8);
    assert_eq!(report.detected_count, 5);
    assert!(report.mean_abs_delta_theta_error < 1e-6);
    assert!(report.mean_abs_veering_error < 1e-4);
}

#[test]
fn dataset_round_trips_through_loader() {
    let dataset = load_dataset(dataset_path()).expect("dataset should load");
    assert_eq!(dataset.name, "hallway_sessions_v1");
    assert!(dataset.sessions.iter().any(|s| s.headings.is_empty()));
}

#[test]
fn missing_dataset_is_an_io_error() {
    let err = evaluate_dataset_path("tests/data/does_not_exist.json").unwrap_err();
    assert!(err.to_string().contains("does_not_exist.json"));
}

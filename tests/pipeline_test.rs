// End-to-end bookkeeping through the public API, stopping at the score
// resolver (no trained model ships with the crate).

use recycle_assistant::services::classifier::inference::resolve_scores;
use recycle_assistant::services::classifier::model_manager::parse_class_names;
use recycle_assistant::{CategoryKey, LogSeverity, SessionState};

const CLASS_NAMES: &str = "0 Cardboard\n1 Glass\n2 Metal\n3 Paper\n4 Plastic\n5 Trash\n";

#[test]
fn plastic_upload_updates_session_statistics() {
    let labels = parse_class_names(CLASS_NAMES);
    let scores = [0.03, 0.05, 0.02, 0.01, 0.87, 0.02];

    let result = resolve_scores(&scores, &labels).unwrap();
    assert_eq!(result.category, CategoryKey::Plastic);
    assert_eq!(result.confidence, 0.87);

    let mut session = SessionState::new();
    session.record_classification(&result);
    session.append_log(
        format!(
            "Analiz: {} (%{:.1})",
            result.category.info().name,
            result.confidence * 100.0
        ),
        LogSeverity::Success,
    );

    assert_eq!(session.total_analyses(), 1);
    assert_eq!(session.count(CategoryKey::Plastic), 1);
    assert!((session.total_co2_saved_kg() - 0.10).abs() < 1e-9);
    assert_eq!(session.last_prediction(), Some("Plastik"));
    assert_eq!(session.recent_log().count(), 1);
}

#[test]
fn mixed_case_unknown_label_lands_in_the_trash_bin() {
    let labels = vec!["Garbage classification".to_string(), "glass".to_string()];

    let result = resolve_scores(&[0.75, 0.25], &labels).unwrap();
    assert_eq!(result.label, "garbage classification");
    assert_eq!(result.category, CategoryKey::Trash);
    assert!(result.is_fallback());

    let mut session = SessionState::new();
    session.record_classification(&result);
    assert_eq!(session.count(CategoryKey::Trash), 1);
    assert_eq!(session.total_analyses(), 1);
    assert_eq!(session.total_co2_saved_kg(), 0.0);
}

#[test]
fn session_snapshot_serializes_for_the_display_layer() {
    let labels = vec!["paper".to_string(), "glass".to_string()];
    let result = resolve_scores(&[0.1, 0.9], &labels).unwrap();

    let mut session = SessionState::new();
    session.record_classification(&result);

    let snapshot = serde_json::to_value(&session).unwrap();
    assert_eq!(snapshot["total_analyses"], 1);
    assert_eq!(snapshot["counts_by_category"]["glass"], 1);
    assert_eq!(snapshot["counts_by_category"]["paper"], 0);
    assert_eq!(snapshot["last_prediction"], "Cam");

    let distribution = session.distribution();
    assert_eq!(distribution.len(), 1);
    assert_eq!(distribution[0].key, CategoryKey::Glass);
    assert_eq!(distribution[0].color, "#2a9d8f");
}

use super::*;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::ChartError;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("nerchart_input_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_builtin_tables() {
    let input = builtin_chart_input();
    assert_eq!(input.categories, vec!["DISEASE", "GENE", "PROTEIN", "SYMPTOM"]);
    assert_eq!(input.base.label, "BiLSTM");
    assert_eq!(input.stacked.label, "BiLSTM+CRF");
    assert_eq!(input.bar_width, Some(0.25));

    for scores in input.base.scores.values() {
        assert_eq!(scores, &vec![0.0f32; 4]);
    }
    assert_eq!(input.stacked.scores["Precision"], vec![1.0, 1.0, 1.0, 0.99]);
    assert_eq!(input.stacked.scores["Recall"], vec![1.0, 1.0, 0.99, 1.0]);
    assert_eq!(input.stacked.scores["F1-score"], vec![1.0, 1.0, 1.0, 1.0]);
}

#[test]
fn test_load_without_path_is_builtin() {
    let input = load_chart_input(None).unwrap();
    assert_eq!(input, builtin_chart_input());
}

#[test]
fn test_load_json_file() {
    let dir = make_temp_dir();
    let path = dir.join("tables.json");
    fs::write(
        &path,
        r#"{
            "categories": ["A", "B"],
            "base": {"label": "m1", "scores": {"Precision": [0.1, 0.2], "Recall": [0.3, 0.4], "F1-score": [0.5, 0.6]}},
            "stacked": {"label": "m2", "scores": {"Precision": [0.2, 0.2], "Recall": [0.1, 0.1], "F1-score": [0.0, 0.3]}}
        }"#,
    )
    .unwrap();

    let input = load_chart_input(Some(path.as_path())).unwrap();
    assert_eq!(input.categories, vec!["A", "B"]);
    assert_eq!(input.base.label, "m1");
    assert_eq!(input.stacked.scores["F1-score"], vec![0.0, 0.3]);
    assert_eq!(input.bar_width, None);
}

#[test]
fn test_load_json_with_bar_width() {
    let dir = make_temp_dir();
    let path = dir.join("tables.json");
    fs::write(
        &path,
        r#"{"categories": ["A"],
            "base": {"label": "x", "scores": {}},
            "stacked": {"label": "y", "scores": {}},
            "bar_width": 0.2}"#,
    )
    .unwrap();
    let input = load_chart_input(Some(path.as_path())).unwrap();
    assert_eq!(input.bar_width, Some(0.2));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = make_temp_dir();
    let err = load_chart_input(Some(dir.join("absent.json").as_path())).unwrap_err();
    assert!(matches!(err, ChartError::Io(_)));
}

#[test]
fn test_load_malformed_json_is_json_error() {
    let dir = make_temp_dir();
    let path = dir.join("bad.json");
    fs::write(&path, "{\"categories\": [\"A\"]").unwrap();
    let err = load_chart_input(Some(path.as_path())).unwrap_err();
    assert!(matches!(err, ChartError::Json(_)));
}

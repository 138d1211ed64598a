//! JSON batches and configuration.

use pagekit::store::DocumentStore;
use pagekit::transform::parse_batch;
use pagekit::{Config, Outcome, PageEditor, PageKitError};

use crate::common::{memory_store, pdf_labels, pdf_store};

const PRINT_PREP: &str = r#"[
    {"op": "filter", "doc": 0, "pages": {"exclude": [{"last": {"count": 1}}]}},
    {"op": "reverse", "doc": 0, "pages": {"include": [{"range": {"start": 0, "end": 3}}]}},
    {"op": "rotate", "doc": 0, "pages": {"include": ["even_numbers"]},
     "rotation": {"angle": 180}},
    {"op": "copy", "from": 0, "pages": {"include": [{"first": {"count": 1}}]}, "to": 1, "at": 0},
    {"op": "split", "doc": 0, "split": {"at": [1]}}
]"#;

#[test]
fn test_batch_on_memory_store() {
    let (mut store, ids) = memory_store(&[("scan", 6), ("cover", 1)]);
    let batch = parse_batch(PRINT_PREP).unwrap();

    let report = PageEditor::new().run(&mut store, &batch).unwrap();

    assert_eq!(report.changed, 5);
    assert!(report.is_clean());
    assert_eq!(store.labels(ids[1]).unwrap(), ["scan3", "cover0"]);

    let pieces = report.created();
    assert_eq!(pieces.len(), 2);
    assert_eq!(store.labels(pieces[0]).unwrap(), ["scan3", "scan2"]);
    assert_eq!(store.labels(pieces[1]).unwrap(), ["scan1", "scan0", "scan4"]);
    assert!(!store.contains(ids[0]));
}

#[test]
fn test_batch_on_pdf_store() {
    let (mut store, ids) = pdf_store(&[("scan", 6), ("cover", 1)]);
    let batch = parse_batch(PRINT_PREP).unwrap();

    let report = PageEditor::new().run(&mut store, &batch).unwrap();

    assert_eq!(report.changed, 5);
    assert_eq!(pdf_labels(&store, ids[1]), ["scan3", "cover0"]);
    let pieces = report.created();
    assert_eq!(pdf_labels(&store, pieces[1]), ["scan1", "scan0", "scan4"]);
}

#[test]
fn test_batch_continue_on_error() {
    let (mut store, ids) = memory_store(&[("a", 3)]);
    let config = Config::from_json(r#"{"continue_on_error": true}"#).unwrap();
    let batch = parse_batch(
        r#"[
            {"op": "copy", "from": 0, "pages": {"include": [{"indexes": [7]}]}, "to": 0},
            {"op": "reverse", "doc": 0},
            {"op": "filter", "doc": 0}
        ]"#,
    )
    .unwrap();

    let report = PageEditor::with_config(config)
        .unwrap()
        .run(&mut store, &batch)
        .unwrap();

    assert_eq!((report.changed, report.unchanged, report.failed), (1, 1, 1));
    assert!(matches!(
        report.entries[0].outcome,
        Err(PageKitError::Selection { .. })
    ));
    assert!(matches!(
        report.entries[2].outcome,
        Ok(Outcome::NoChange { .. })
    ));
    assert_eq!(store.labels(ids[0]).unwrap(), ["a2", "a1", "a0"]);
}

#[test]
fn test_batch_unknown_document_is_reported() {
    let (mut store, _) = memory_store(&[("a", 3)]);
    let batch = parse_batch(r#"[{"op": "reverse", "doc": 5}]"#).unwrap();
    let err = PageEditor::new().run(&mut store, &batch).unwrap_err();
    assert!(matches!(err, PageKitError::UnknownDocument { .. }));
}

#[test]
fn test_unsorted_selections() {
    let (mut store, ids) = memory_store(&[("a", 4), ("b", 0)]);
    let config = Config {
        sort_selections: false,
        ..Config::default()
    };
    let batch = parse_batch(
        r#"[{"op": "copy", "from": 0, "to": 1,
             "pages": {"include": [{"last": {"count": 1}}, {"first": {"count": 1}}]}}]"#,
    )
    .unwrap();

    PageEditor::with_config(config)
        .unwrap()
        .run(&mut store, &batch)
        .unwrap();

    assert_eq!(store.labels(ids[1]).unwrap(), ["a3", "a0"]);
}

//! The same editing operations against real PDF documents.

use pagekit::geometry::{Angle, AreaSpec, CropMode, Inset, Rect, RotationSpec};
use pagekit::select::{PageDescriptor, PageFilter};
use pagekit::split::SplitDescriptor;
use pagekit::store::{DocumentStore, LopdfStore};
use pagekit::transform::Behavior;
use pagekit::{Operation, PageEditor};

use crate::common::{pdf_document, pdf_labels, pdf_store};

#[test]
fn test_copy_between_pdfs() {
    let (mut store, ids) = pdf_store(&[("a", 5), ("b", 2)]);
    let (a, b) = (ids[0], ids[1]);

    let op = Operation::Copy {
        from: a,
        pages: PageFilter::include(PageDescriptor::Indexes(vec![2, 4])),
        to: b,
        at: Some(1),
    };
    PageEditor::new().apply(&mut store, &op).unwrap();

    assert_eq!(pdf_labels(&store, b), ["b0", "a2", "a4", "b1"]);
    assert_eq!(pdf_labels(&store, a), ["a0", "a1", "a2", "a3", "a4"]);
    // Copied pages carry the media box they used to inherit.
    assert_eq!(
        store.page_bounds(b, 1).unwrap(),
        Rect::new(0.0, 0.0, 612.0, 792.0)
    );
}

#[test]
fn test_move_within_pdf() {
    let (mut store, ids) = pdf_store(&[("a", 4)]);
    let doc = ids[0];

    let op = Operation::Move {
        from: doc,
        pages: PageFilter::include(PageDescriptor::Last { count: 1 }),
        to: doc,
        at: Some(0),
    };
    PageEditor::new().apply(&mut store, &op).unwrap();

    assert_eq!(pdf_labels(&store, doc), ["a3", "a0", "a1", "a2"]);
}

#[test]
fn test_replace_with_move_between_pdfs() {
    let (mut store, ids) = pdf_store(&[("a", 2), ("b", 5)]);
    let (a, b) = (ids[0], ids[1]);

    let op = Operation::Replace {
        from: a,
        pages: PageFilter::All,
        to: b,
        target_pages: PageFilter::include(PageDescriptor::Indexes(vec![3, 4])),
        behavior: Behavior::Move,
    };
    PageEditor::new().apply(&mut store, &op).unwrap();

    assert_eq!(store.page_count(a).unwrap(), 0);
    assert_eq!(pdf_labels(&store, b), ["b0", "b1", "b2", "a0", "a1"]);
}

#[test]
fn test_split_pdf_and_save_pieces() {
    let (mut store, ids) = pdf_store(&[("scan", 5)]);
    let doc = ids[0];

    let op = Operation::Split {
        doc,
        split: SplitDescriptor::Every(2),
        discard_unused: false,
    };
    let outcome = PageEditor::new().apply(&mut store, &op).unwrap();
    assert!(!store.contains(doc));

    let mut reloaded = LopdfStore::new();
    let mut sizes = Vec::new();
    for &piece in outcome.created() {
        let name = store.document_name(piece).unwrap().unwrap();
        let bytes = store.to_bytes(piece).unwrap();
        let copy = reloaded.load(&name, &bytes).unwrap();
        sizes.push(reloaded.page_count(copy).unwrap());
    }

    assert_eq!(sizes, vec![2, 2, 1]);
    let last = reloaded.document_by_name("scan_5-5").unwrap();
    assert_eq!(pdf_labels(&reloaded, last), ["scan4"]);
}

#[test]
fn test_rotate_and_crop_pdf_pages() {
    let (mut store, ids) = pdf_store(&[("a", 3)]);
    let doc = ids[0];
    let editor = PageEditor::new();
    let middle = PageFilter::include(PageDescriptor::Indexes(vec![1]));

    editor
        .apply(
            &mut store,
            &Operation::Rotate {
                doc,
                pages: middle.clone(),
                rotation: RotationSpec::relative(Angle::Deg270),
            },
        )
        .unwrap();
    editor
        .apply(
            &mut store,
            &Operation::Crop {
                doc,
                pages: PageFilter::All,
                area: AreaSpec::Insets {
                    top: Inset::Points(36.0),
                    leading: Inset::Passthrough,
                    bottom: Inset::Passthrough,
                    trailing: Inset::Passthrough,
                },
                mode: CropMode::Absolute,
            },
        )
        .unwrap();

    assert_eq!(store.page_rotation(doc, 1).unwrap(), Angle::Deg270);
    assert_eq!(store.page_rotation(doc, 0).unwrap(), Angle::Deg0);
    assert_eq!(
        store.page_crop(doc, 0).unwrap(),
        Some(Rect::new(0.0, 0.0, 612.0, 756.0))
    );
    // The presented top of a page turned 270 degrees is its storage trailing edge.
    assert_eq!(
        store.page_crop(doc, 1).unwrap(),
        Some(Rect::new(0.0, 0.0, 576.0, 792.0))
    );

    let bytes = store.to_bytes(doc).unwrap();
    let reloaded = store.load("reloaded", &bytes).unwrap();
    assert_eq!(store.page_rotation(reloaded, 1).unwrap(), Angle::Deg270);
    assert_eq!(
        store.page_crop(reloaded, 1).unwrap(),
        Some(Rect::new(0.0, 0.0, 576.0, 792.0))
    );
}

#[test]
fn test_failed_operation_leaves_pdf_untouched() {
    let (mut store, ids) = pdf_store(&[("a", 2), ("b", 2)]);
    let (a, b) = (ids[0], ids[1]);

    let op = Operation::Replace {
        from: a,
        pages: PageFilter::All,
        to: b,
        target_pages: PageFilter::include(PageDescriptor::First { count: 1 }),
        behavior: Behavior::Move,
    };
    assert!(PageEditor::new().apply(&mut store, &op).is_err());

    assert_eq!(pdf_labels(&store, a), ["a0", "a1"]);
    assert_eq!(pdf_labels(&store, b), ["b0", "b1"]);
}

#[test]
fn test_filtered_pages_are_gone_from_saved_pdf() {
    let mut store = LopdfStore::new();
    let page_labels = ["public_p0", "SECRET_p1", "SECRET_p2"].map(String::from);
    let doc = store.add_document("report", pdf_document(&page_labels));

    let op = Operation::Filter {
        doc,
        pages: PageFilter::include(PageDescriptor::First { count: 1 }),
    };
    PageEditor::new().apply(&mut store, &op).unwrap();
    assert_eq!(store.page_count(doc).unwrap(), 1);

    let bytes = store.to_bytes(doc).unwrap();
    assert!(!bytes.windows(6).any(|w| w == b"SECRET"));

    let reloaded = store.load("reloaded", &bytes).unwrap();
    assert_eq!(pdf_labels(&store, reloaded), ["public_p0"]);
}

//! End-to-end: image files on disk → ingest → reorder → export → PDF on disk.
//!
//! The written PDF is loaded back with `lopdf` to check page count, page
//! order (via media boxes) and that every page carries a JPEG image.

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use lopdf::Document;
use pdf_carousel::collection::PageCollection;
use pdf_carousel::export::{ExportError, ExportEvent, ExportOptions, LopdfBuilder, export};
use pdf_carousel::imaging::{Quality, RustBackend};
use pdf_carousel::ingest::{AppendOrder, expand_inputs, ingest};
use pdf_carousel::reorder::{ReorderEngine, apply_move};
use pdf_carousel::status::StatusSurface;
use std::io::Cursor;
use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;
use tempfile::TempDir;

fn write_image(dir: &Path, name: &str, width: u32, height: u32, format: ImageFormat) {
    let img = RgbImage::from_pixel(width, height, Rgb([30, 90, 160]));
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, format)
        .unwrap();
    std::fs::write(dir.join(name), buf.into_inner()).unwrap();
}

fn media_boxes(bytes: &[u8]) -> Vec<(i64, i64)> {
    let doc = Document::load_mem(bytes).unwrap();
    doc.get_pages()
        .values()
        .map(|&id| {
            let page = doc.get_dictionary(id).unwrap();
            let mb = page.get(b"MediaBox").unwrap().as_array().unwrap();
            (mb[2].as_i64().unwrap(), mb[3].as_i64().unwrap())
        })
        .collect()
}

fn options() -> ExportOptions {
    ExportOptions {
        clear_after: Duration::ZERO,
        ..ExportOptions::default()
    }
}

fn names(collection: &PageCollection) -> Vec<&str> {
    collection.iter().map(|p| p.name.as_str()).collect()
}

#[test]
fn directory_to_pdf_in_input_order() {
    let tmp = TempDir::new().unwrap();
    write_image(tmp.path(), "01-wide.png", 80, 60, ImageFormat::Png);
    write_image(tmp.path(), "02-tall.jpg", 40, 50, ImageFormat::Jpeg);
    write_image(tmp.path(), "03-square.png", 30, 30, ImageFormat::Png);

    let files = expand_inputs(&[tmp.path().to_path_buf()]).unwrap();
    let mut collection = PageCollection::new();
    let report = ingest(
        &RustBackend::new(),
        files,
        AppendOrder::Input,
        &mut collection,
        None,
    );
    assert!(report.skipped.is_empty());
    assert_eq!(names(&collection), ["01-wide.png", "02-tall.jpg", "03-square.png"]);

    let artifact = export(
        LopdfBuilder::new(Quality::default(), true),
        &collection.snapshot(),
        &options(),
        None,
        None,
    )
    .unwrap();
    assert_eq!(artifact.page_count, 3);

    let out = tmp.path().join("out");
    let path = artifact.save_into(&out).unwrap();
    assert_eq!(path, out.join("my_images.pdf"));

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(media_boxes(&bytes), [(80, 60), (40, 50), (30, 30)]);
}

#[test]
fn reorder_changes_page_order_in_pdf() {
    let tmp = TempDir::new().unwrap();
    write_image(tmp.path(), "a.png", 10, 10, ImageFormat::Png);
    write_image(tmp.path(), "b.png", 20, 20, ImageFormat::Png);
    write_image(tmp.path(), "c.png", 30, 30, ImageFormat::Png);

    let files = expand_inputs(&[tmp.path().to_path_buf()]).unwrap();
    let mut collection = PageCollection::new();
    ingest(
        &RustBackend::new(),
        files,
        AppendOrder::Input,
        &mut collection,
        None,
    );

    let a = collection.find_by_name("a.png").unwrap().id;
    let c = collection.find_by_name("c.png").unwrap().id;

    // Pointer-style gesture: drag c over b, then onto a
    let b = collection.find_by_name("b.png").unwrap().id;
    let mut engine = ReorderEngine::new();
    engine.drag_start(c);
    engine.drag_enter(b);
    engine.drag_leave(b);
    engine.drag_enter(a);
    assert!(engine.drop_on(a, &mut collection));
    assert_eq!(names(&collection), ["c.png", "a.png", "b.png"]);

    // And the one-shot form
    assert!(apply_move(&mut collection, a, c));
    assert_eq!(names(&collection), ["a.png", "c.png", "b.png"]);

    let artifact = export(
        LopdfBuilder::new(Quality::new(60), false),
        &collection.snapshot(),
        &options(),
        None,
        None,
    )
    .unwrap();
    assert_eq!(media_boxes(&artifact.bytes), [(10, 10), (30, 30), (20, 20)]);
}

#[test]
fn corrupt_file_never_becomes_a_page() {
    let tmp = TempDir::new().unwrap();
    write_image(tmp.path(), "a.png", 100, 50, ImageFormat::Png);
    std::fs::write(tmp.path().join("b.bad"), b"definitely not an image").unwrap();

    let files = expand_inputs(&[tmp.path().to_path_buf()]).unwrap();
    assert_eq!(files.len(), 2);

    let mut collection = PageCollection::new();
    let report = ingest(
        &RustBackend::new(),
        files,
        AppendOrder::Arrival,
        &mut collection,
        None,
    );
    assert_eq!(names(&collection), ["a.png"]);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].0, "b.bad");

    let (tx, rx) = mpsc::channel();
    let artifact = export(
        LopdfBuilder::new(Quality::default(), true),
        &collection.snapshot(),
        &options(),
        Some(tx),
        None,
    )
    .unwrap();
    assert_eq!(media_boxes(&artifact.bytes), [(100, 50)]);

    // The status line only ever shows export progress
    let mut status = StatusSurface::new();
    let mut shown = Vec::new();
    for event in rx.iter() {
        status.apply(&event);
        shown.push(status.text().to_string());
    }
    assert_eq!(shown, ["Generating...", "Processed 1 of 1", "Finished", ""]);
}

#[test]
fn empty_collection_exports_zero_pages() {
    let (tx, rx) = mpsc::channel();
    let artifact = export(
        LopdfBuilder::new(Quality::default(), true),
        &PageCollection::new().snapshot(),
        &options(),
        Some(tx),
        None,
    )
    .unwrap();

    assert_eq!(artifact.page_count, 0);
    assert!(media_boxes(&artifact.bytes).is_empty());
    let events: Vec<ExportEvent> = rx.iter().collect();
    assert_eq!(
        events,
        [
            ExportEvent::Generating { total: 0 },
            ExportEvent::Finished,
            ExportEvent::Cleared
        ]
    );
}

#[test]
fn edits_after_snapshot_do_not_reach_export() {
    let tmp = TempDir::new().unwrap();
    write_image(tmp.path(), "a.png", 10, 10, ImageFormat::Png);
    write_image(tmp.path(), "b.png", 20, 20, ImageFormat::Png);

    let files = expand_inputs(&[tmp.path().to_path_buf()]).unwrap();
    let mut collection = PageCollection::new();
    ingest(
        &RustBackend::new(),
        files,
        AppendOrder::Input,
        &mut collection,
        None,
    );

    let snapshot = collection.snapshot();
    let a = collection.find_by_name("a.png").unwrap().id;
    collection.remove(a);

    let artifact = export(
        LopdfBuilder::new(Quality::default(), true),
        &snapshot,
        &options(),
        None,
        None,
    )
    .unwrap();
    assert_eq!(media_boxes(&artifact.bytes), [(10, 10), (20, 20)]);
    assert_eq!(collection.len(), 1);
}

#[test]
fn image_wider_than_jpeg_allows_still_exports() {
    let tmp = TempDir::new().unwrap();
    write_image(tmp.path(), "strip.png", 70_000, 1, ImageFormat::Png);
    write_image(tmp.path(), "tile.png", 10, 10, ImageFormat::Png);

    let files = expand_inputs(&[tmp.path().to_path_buf()]).unwrap();
    let mut collection = PageCollection::new();
    let report = ingest(
        &RustBackend::new(),
        files,
        AppendOrder::Input,
        &mut collection,
        None,
    );
    assert!(report.skipped.is_empty());
    assert_eq!(names(&collection), ["strip.png", "tile.png"]);

    let artifact = export(
        LopdfBuilder::new(Quality::default(), true),
        &collection.snapshot(),
        &options(),
        None,
        None,
    )
    .unwrap();
    assert_eq!(media_boxes(&artifact.bytes), [(70_000, 1), (10, 10)]);
}

#[test]
fn undecodable_content_fails_export() {
    use pdf_carousel::content::DataUri;
    use pdf_carousel::types::{PageDescriptor, PageId};

    let page = PageDescriptor {
        id: PageId::new(),
        name: "ghost.png".to_string(),
        content: DataUri::encode("image/png", b"gone"),
        size: 4,
        width: 10,
        height: 10,
        mime_type: "image/png".to_string(),
    };
    let (tx, rx) = mpsc::channel();
    let result = export(
        LopdfBuilder::new(Quality::default(), true),
        &[page],
        &options(),
        Some(tx),
        None,
    );
    assert!(matches!(result, Err(ExportError::Image(_))));

    let events: Vec<ExportEvent> = rx.iter().collect();
    assert_eq!(events, [ExportEvent::Generating { total: 1 }]);
}

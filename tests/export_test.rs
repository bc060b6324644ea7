//! PDF export to disk

use chrono::{TimeZone, Utc};
use docshelf::egui_app::export::{export_pdf, layout, save_pdf, NO_CONTENT};
use docshelf::shared::{Document, Visibility};
use tempfile::TempDir;

fn document(title: &str, content: &str) -> Document {
    Document {
        id: 3,
        title: title.to_string(),
        content: content.to_string(),
        visibility: Visibility::Private,
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).single(),
    }
}

#[test]
fn test_empty_document_exports_placeholder() {
    let doc = document("Blank", "");
    assert!(layout(&doc).text().iter().any(|line| line == NO_CONTENT));
    let bytes = export_pdf(&doc).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_layout_includes_title_content_and_timestamp() {
    let doc = document("Meeting notes", "<h2>Agenda</h2><ul><li>Budget</li><li>Hiring</li></ul>");
    let text = layout(&doc).text();
    assert_eq!(text[0], "Meeting notes");
    assert!(text.iter().any(|l| l == "Agenda"));
    assert!(text.iter().any(|l| l == "- Budget"));
    let last = text.last().unwrap();
    assert!(last.starts_with("Created at: "));
    assert!(last.contains("2024"));
}

#[test]
fn test_save_writes_complete_file_only() {
    let dir = TempDir::new().unwrap();
    let doc = document("Quarterly Plan", "<p>Ship it</p>");

    let path = save_pdf(&doc, dir.path()).unwrap();
    assert_eq!(path.file_name().unwrap(), "Quarterly_Plan.pdf");
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .filter(|name| name.to_string_lossy().ends_with(".part"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_save_into_missing_dir_fails_cleanly() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");
    let doc = document("X", "<p>x</p>");
    assert!(save_pdf(&doc, &missing).is_err());
    assert!(!missing.exists());
}

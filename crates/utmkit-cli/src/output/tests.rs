// Tests for output formatting
//
// These tests render through an in-memory writer so the exact text a user
// or script would see can be asserted.

use super::*;
use chrono::NaiveDate;
use std::cell::RefCell;
use std::rc::Rc;
use utmkit_core::{validate_utm_campaign, Field, ValidationContext};

#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

fn writer(format: OutputFormat) -> (OutputWriter, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let writer = OutputWriter::with_writer(format, false, false, Box::new(buffer.clone()));
    (writer, buffer)
}

fn ctx() -> ValidationContext {
    ValidationContext::at(NaiveDate::from_ymd_opt(2025, 8, 14).unwrap())
}

#[test]
fn test_campaign_result_human() {
    let result = validate_utm_campaign("2025_8_Sale", ValidationMode::Library, &ctx());
    let formatted = format_campaign_result_human("2025_8_Sale", ValidationMode::Library, &result);

    assert!(formatted.starts_with("✗ '2025_8_Sale' is invalid (library mode)\n"));
    assert!(formatted.contains("  ✗ lowercase letters only\n"));
    assert!(formatted.contains("  ✗ month must be zero-padded (e.g. 08 not 8)\n"));
}

#[test]
fn test_campaign_result_json_flattens_result() {
    let result = validate_utm_campaign("2025_08_tv", ValidationMode::Library, &ctx());
    let formatted = OutputFormat::Json
        .format_campaign_result("2025_08_tv", ValidationMode::Library, &result)
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&formatted).unwrap();
    assert_eq!(value["value"], "2025_08_tv");
    assert_eq!(value["mode"], "library");
    assert_eq!(value["isValid"], true);
    assert_eq!(value["errors"], serde_json::json!([]));
    assert_eq!(value["warnings"].as_array().unwrap().len(), 1);
}

#[test]
fn test_single_field_report_keeps_flat_shape() {
    let report = FieldReport::new(Field::Term, Some("no spaces allowed".to_string()), None);
    let formatted = OutputFormat::Json.format_field_reports(&[report]).unwrap();
    assert_eq!(formatted, r#"{"term":"no spaces allowed"}"#);
}

#[test]
fn test_field_reports_human() {
    let reports = [
        FieldReport::new(Field::Campaign, None, Some("very short campaign name".to_string())),
        FieldReport::new(Field::Content, Some("lowercase only".to_string()), None),
    ];

    let (mut output, buffer) = writer(OutputFormat::Human);
    output.field_reports(&reports).unwrap();
    assert_eq!(
        buffer.contents(),
        "✓ campaign\n  ⚠ very short campaign name\n✗ content: lowercase only\n"
    );
}

#[test]
fn test_messages_are_suppressed_for_machine_formats() {
    let (mut output, buffer) = writer(OutputFormat::Json);
    output.info("Validating").unwrap();
    output.success("done").unwrap();
    output.section("Details").unwrap();
    output.table(&["Name"], vec![vec!["x".to_string()]]).unwrap();
    output.data(&serde_json::json!({"ok": true})).unwrap();

    assert_eq!(buffer.contents(), "{\"ok\":true}\n");
}

#[test]
fn test_table_alignment() {
    let (mut output, buffer) = writer(OutputFormat::Human);
    output
        .table(
            &["Name", "Source"],
            vec![
                vec!["Google Ads".to_string(), "google".to_string()],
                vec!["SEO".to_string(), "google".to_string()],
            ],
        )
        .unwrap();

    let lines: Vec<String> = buffer.contents().lines().map(str::to_string).collect();
    assert_eq!(lines[0], "Name       │ Source");
    assert_eq!(lines[1], "───────────┼───────");
    assert_eq!(lines[2], "Google Ads │ google");
    assert_eq!(lines[3], "SEO        │ google");
}

#[test]
fn test_quiet_writer_still_reports_errors() {
    let buffer = SharedBuffer::default();
    let mut output =
        OutputWriter::with_writer(OutputFormat::Human, false, true, Box::new(buffer.clone()));
    output.info("hidden").unwrap();
    output.error("shown").unwrap();
    assert_eq!(buffer.contents(), "ERROR: shown\n");
}

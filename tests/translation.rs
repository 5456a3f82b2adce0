use std::io::Write;

use tempfile::NamedTempFile;

use queue_log_report::translate::EventTable;

#[test]
fn loads_a_json_object_file() {
    let table = EventTable::load("tests/fixtures/eventos.json").unwrap();
    assert_eq!(table.label("CONNECT"), Some("Atendida"));
    assert_eq!(table.label("NOPE"), None);
}

#[test]
fn load_reports_missing_file() {
    let err = EventTable::load("no/such/eventos.json").unwrap_err();
    assert!(err.to_string().contains("failed to load event table"));
}

#[test]
fn load_reports_malformed_json() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"{not json").unwrap();

    let err = EventTable::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("failed to load event table"));
}

#[test]
fn load_or_empty_degrades_on_malformed_json() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"[1, 2, 3]").unwrap();

    let table = EventTable::load_or_empty(file.path());
    assert!(table.is_empty());
}

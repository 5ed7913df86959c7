//! Catalog persistence through the XML file format.

use anninfo::catalog::{Catalog, xml};
use anninfo::models::Record;
use anninfo::parser;
use std::path::PathBuf;

const PAGE: &str = include_str!("fixtures/encyclopedia_page.html");

fn temp_catalog() -> PathBuf {
    std::env::temp_dir()
        .join(format!("anninfo-test-{}", uuid::Uuid::new_v4()))
        .join("anime_info.xml")
}

#[test]
fn test_extracted_record_survives_save_and_load() {
    let path = temp_catalog();
    let record = parser::extract(PAGE, "Planetes", "https://example.org/planetes");

    let mut catalog = Catalog::new();
    assert!(catalog.insert(record.clone()));
    assert!(catalog.save(&path));

    let loaded = Catalog::load(&path);
    assert_eq!(loaded.get("Planetes"), Some(&record));
    assert!(!loaded.needs_refresh("Planetes"));

    std::fs::remove_dir_all(path.parent().unwrap()).ok();
}

#[test]
fn test_incomplete_records_are_persisted_and_flagged() {
    let path = temp_catalog();

    let mut catalog = Catalog::new();
    catalog.insert(Record::empty("Unknown Show"));
    catalog.save(&path);

    let loaded = Catalog::load(&path);
    assert_eq!(loaded.len(), 1);
    assert!(loaded.needs_refresh("Unknown Show"));
    assert_eq!(loaded.incomplete_titles(), vec!["Unknown Show".to_string()]);

    std::fs::remove_dir_all(path.parent().unwrap()).ok();
}

#[test]
fn test_saved_file_layout() {
    let path = temp_catalog();

    let mut catalog = Catalog::new();
    catalog.insert(parser::extract(PAGE, "Planetes", "https://example.org/?a=1&b=2"));
    catalog.save(&path);

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("<?xml"));
    assert!(text.contains("<animeInfos>"));
    assert!(text.contains("<animeInfo>"));
    assert!(text.contains("<title>Planetes</title>"));
    assert!(text.contains("a=1&amp;b=2"));

    let records = xml::read(&path).unwrap();
    assert_eq!(records.len(), 1);

    std::fs::remove_dir_all(path.parent().unwrap()).ok();
}

#[test]
fn test_unchanged_catalog_is_not_rewritten() {
    let path = temp_catalog();

    let mut catalog = Catalog::new();
    catalog.insert(Record::empty("A"));
    assert!(catalog.save(&path));

    let mut reloaded = Catalog::load(&path);
    assert!(!reloaded.insert(Record::empty("A")));
    assert!(!reloaded.save(&path));

    std::fs::remove_dir_all(path.parent().unwrap()).ok();
}

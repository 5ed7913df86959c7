//! On-disk catalog format.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <animeInfos>
//!     <animeInfo>
//!         <title>...</title>
//!         <titles>...</titles>
//!         <category>...</category>
//!         <link>...</link>
//!         <dates>...</dates>
//!         <tags>...</tags>
//!         <synopsis>...</synopsis>
//!     </animeInfo>
//! </animeInfos>
//! ```
//!
//! Field text is escaped on write. CDATA sections are accepted on read.

use quick_xml::se::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::Record;

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed catalog: {0}")]
    Parse(#[from] quick_xml::DeError),

    #[error("Failed to serialize catalog: {0}")]
    Serialize(#[from] quick_xml::SeError),
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename = "animeInfos")]
struct CatalogDocument {
    #[serde(rename = "animeInfo", default)]
    entries: Vec<Record>,
}

/// Parses a catalog document. Later entries win when titles repeat.
pub fn from_str(xml: &str) -> Result<BTreeMap<String, Record>, CatalogError> {
    let document: CatalogDocument = quick_xml::de::from_str(xml)?;

    Ok(document
        .entries
        .into_iter()
        .map(|record| (record.title.clone(), record))
        .collect())
}

pub fn to_string(records: &BTreeMap<String, Record>) -> Result<String, CatalogError> {
    let document = CatalogDocument {
        entries: records.values().cloned().collect(),
    };

    let mut xml = String::from(XML_DECLARATION);
    let mut serializer = Serializer::new(&mut xml);
    serializer.indent(' ', 4);
    document.serialize(serializer)?;
    xml.push('\n');

    Ok(xml)
}

pub fn read(path: &Path) -> Result<BTreeMap<String, Record>, CatalogError> {
    let content = std::fs::read_to_string(path)?;
    from_str(&content)
}

/// Writes to a sibling `.tmp` file, then renames it over `path`. The
/// previous file stays intact if writing fails.
pub fn write(path: &Path, records: &BTreeMap<String, Record>) -> Result<(), CatalogError> {
    let xml = to_string(records)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let temp = temp_path(path);
    if let Err(e) = std::fs::write(&temp, xml).and_then(|()| std::fs::rename(&temp, path)) {
        std::fs::remove_file(&temp).ok();
        return Err(e.into());
    }

    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

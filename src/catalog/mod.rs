//! Title-keyed store of extracted records.
//!
//! The catalog is owned by the caller and passed explicitly. Mutations report
//! whether anything changed and mark the catalog dirty so that [`Catalog::save`]
//! only touches the disk when needed.

pub mod xml;

use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::models::Record;
pub use xml::CatalogError;

#[derive(Debug, Default, Clone)]
pub struct Catalog {
    records: BTreeMap<String, Record>,
    dirty: bool,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a catalog file. A missing or unreadable file yields an empty
    /// catalog.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "No catalog file, starting empty");
            return Self::new();
        }

        match xml::read(path) {
            Ok(records) => {
                info!(path = %path.display(), count = records.len(), "Loaded catalog");
                Self {
                    records,
                    dirty: false,
                }
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load catalog, starting empty");
                Self::new()
            }
        }
    }

    /// Writes the catalog if it changed since the last save.
    ///
    /// Returns `true` when the file was written. Failures are logged and leave
    /// the catalog dirty.
    pub fn save(&mut self, path: &Path) -> bool {
        if !self.dirty {
            debug!("Catalog unchanged, skipping save");
            return false;
        }

        match xml::write(path, &self.records) {
            Ok(()) => {
                info!(path = %path.display(), count = self.records.len(), "Saved catalog");
                self.dirty = false;
                true
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to save catalog");
                false
            }
        }
    }

    #[must_use]
    pub fn get(&self, title: &str) -> Option<&Record> {
        self.records.get(title)
    }

    /// A title needs a lookup when it is unknown or its record is incomplete.
    #[must_use]
    pub fn needs_refresh(&self, title: &str) -> bool {
        self.get(title).is_none_or(Record::is_missing_fields)
    }

    /// Stores `record` under its title, replacing any previous record.
    ///
    /// Returns `true` if the catalog changed.
    pub fn insert(&mut self, record: Record) -> bool {
        if self.records.get(&record.title) == Some(&record) {
            return false;
        }
        self.records.insert(record.title.clone(), record);
        self.dirty = true;
        true
    }

    pub fn remove(&mut self, title: &str) -> Option<Record> {
        let removed = self.records.remove(title);
        if removed.is_some() {
            self.dirty = true;
        }
        removed
    }

    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    #[must_use]
    pub fn incomplete_titles(&self) -> Vec<String> {
        self.records()
            .filter(|r| r.is_missing_fields())
            .map(|r| r.title.clone())
            .collect()
    }

    /// Records ordered by season, oldest first, unknown seasons leading.
    #[must_use]
    pub fn by_season(&self) -> Vec<&Record> {
        let mut records: Vec<&Record> = self.records().collect();
        records.sort_by(|a, b| crate::models::season::compare(a.date(), b.date()));
        records
    }
}

//! Catalog-aware record lookup.
//!
//! Cached complete records are returned as-is. Unknown or incomplete titles
//! are searched, fetched and re-extracted, and the result replaces the cached
//! record.

use futures::StreamExt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::catalog::Catalog;
use crate::clients::PageSource;
use crate::models::Record;
use crate::parser;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("No encyclopedia link found for '{0}'")]
    NoLink(String),

    #[error("Search failed: {0}")]
    Search(anyhow::Error),

    #[error("Fetch failed: {0}")]
    Fetch(anyhow::Error),
}

/// Result of a catalog lookup.
#[derive(Debug, Clone)]
pub struct Lookup {
    pub record: Record,
    /// The catalog changed and should be saved.
    pub updated: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSummary {
    pub attempted: usize,
    pub updated: usize,
    pub complete: usize,
}

#[derive(Clone)]
pub struct LookupService {
    source: Arc<dyn PageSource>,
    max_concurrent: usize,
}

impl LookupService {
    #[must_use]
    pub fn new(source: Arc<dyn PageSource>, max_concurrent: usize) -> Self {
        Self {
            source,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Searches, fetches and extracts a record for `title`.
    ///
    /// A missing link or page yields an incomplete record; the reason is
    /// logged.
    pub async fn build_record(&self, title: &str) -> Record {
        match self.try_build_record(title).await {
            Ok(record) => record,
            Err((link, e)) => {
                warn!(title, error = %e, "Lookup failed, storing incomplete record");
                Record::from_page(title, &link, None)
            }
        }
    }

    async fn try_build_record(&self, title: &str) -> Result<Record, (String, LookupError)> {
        let link = self
            .source
            .resolve(title)
            .await
            .map_err(|e| (String::new(), LookupError::Search(e)))?
            .ok_or_else(|| (String::new(), LookupError::NoLink(title.to_string())))?;

        let page = self
            .source
            .fetch(&link)
            .await
            .map_err(|e| (link.clone(), LookupError::Fetch(e)))?;

        Ok(parser::extract(&page, title, &link))
    }

    /// Returns the cached record for `title`, re-extracting it when it is
    /// missing, incomplete, or `force` is set.
    ///
    /// A forced lookup that fails to produce a complete record keeps the
    /// complete record already in the catalog.
    #[instrument(skip(self, catalog))]
    pub async fn lookup(&self, catalog: &mut Catalog, title: &str, force: bool) -> Lookup {
        let cached = catalog
            .get(title)
            .filter(|record| !record.is_missing_fields())
            .cloned();

        if let Some(record) = &cached
            && !force
        {
            debug!("Using cached record");
            return Lookup {
                record: record.clone(),
                updated: false,
            };
        }

        let record = self.build_record(title).await;

        if record.is_missing_fields()
            && let Some(record) = cached
        {
            warn!("Forced lookup came back incomplete, keeping cached record");
            return Lookup {
                record,
                updated: false,
            };
        }

        let updated = catalog.insert(record.clone());
        info!(updated, complete = !record.is_missing_fields(), "Looked up record");

        Lookup { record, updated }
    }

    /// Re-extracts every incomplete record, fetching concurrently.
    pub async fn refresh_incomplete(&self, catalog: &mut Catalog) -> RefreshSummary {
        let titles = catalog.incomplete_titles();
        self.refresh(catalog, titles).await
    }

    pub async fn refresh(&self, catalog: &mut Catalog, titles: Vec<String>) -> RefreshSummary {
        let attempted = titles.len();
        info!(count = attempted, "Refreshing records");

        let records: Vec<Record> = futures::stream::iter(titles)
            .map(|title| async move { self.build_record(&title).await })
            .buffer_unordered(self.max_concurrent)
            .collect()
            .await;

        let mut summary = RefreshSummary {
            attempted,
            ..RefreshSummary::default()
        };
        for record in records {
            if !record.is_missing_fields() {
                summary.complete += 1;
            }
            if catalog.insert(record) {
                summary.updated += 1;
            }
        }

        info!(
            attempted = summary.attempted,
            updated = summary.updated,
            complete = summary.complete,
            "Refresh finished"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const PAGE: &str = r#"<h1 id="page_header">Foo (TV)</h1>
<div id="infotype-2"><strong>Alternative title:</strong>
<div class="tab">Foo Returns (English)</div>
</div>
<div id="infotype-30"><strong>Genres:</strong>
<span><a href="/g?g=drama">drama</a></span>
</div>
<div id="infotype-12"><strong>Plot Summary:</strong>
<span>Foo happens.</span>
</div>
<div id="infotype-7"><strong>Vintage:</strong>
<span>2004-10-02</span>
</div>
<script type="text/javascript"></script>"#;

    #[derive(Default)]
    struct FakeSource {
        links: HashMap<String, String>,
        pages: HashMap<String, String>,
        fetches: AtomicUsize,
    }

    impl FakeSource {
        fn with_page(title: &str, page: &str) -> Self {
            let link = format!("https://example.org/{title}");
            let mut source = Self::default();
            source.links.insert(title.to_string(), link.clone());
            source.pages.insert(link, page.to_string());
            source
        }
    }

    #[async_trait::async_trait]
    impl PageSource for FakeSource {
        async fn resolve(&self, title: &str) -> anyhow::Result<Option<String>> {
            Ok(self.links.get(title).cloned())
        }

        async fn fetch(&self, link: &str) -> anyhow::Result<String> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.pages
                .get(link)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("404 for {link}"))
        }
    }

    fn fake_service(source: FakeSource) -> (LookupService, Arc<FakeSource>) {
        let source = Arc::new(source);
        (LookupService::new(source.clone(), 2), source)
    }

    #[tokio::test]
    async fn test_lookup_extracts_and_caches() {
        let (service, source) = fake_service(FakeSource::with_page("Foo", PAGE));
        let mut catalog = Catalog::new();

        let first = service.lookup(&mut catalog, "Foo", false).await;
        assert!(first.updated);
        assert!(!first.record.is_missing_fields());
        assert_eq!(first.record.season(), "Fall 2004");
        assert!(catalog.is_dirty());

        let second = service.lookup(&mut catalog, "Foo", false).await;
        assert!(!second.updated);
        assert_eq!(second.record, first.record);
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_incomplete_record_is_refetched() {
        let (service, source) = fake_service(FakeSource::with_page("Foo", PAGE));
        let mut catalog = Catalog::new();
        catalog.insert(Record::empty("Foo"));

        let lookup = service.lookup(&mut catalog, "Foo", false).await;
        assert!(lookup.updated);
        assert!(!catalog.needs_refresh("Foo"));
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_force_refetches_complete_record() {
        let (service, source) = fake_service(FakeSource::with_page("Foo", PAGE));
        let mut catalog = Catalog::new();
        service.lookup(&mut catalog, "Foo", false).await;

        let lookup = service.lookup(&mut catalog, "Foo", true).await;
        assert!(!lookup.updated);
        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
    }

    struct FailingSource;

    #[async_trait::async_trait]
    impl PageSource for FailingSource {
        async fn resolve(&self, _title: &str) -> anyhow::Result<Option<String>> {
            Err(anyhow::anyhow!("search unavailable"))
        }

        async fn fetch(&self, link: &str) -> anyhow::Result<String> {
            Err(anyhow::anyhow!("timeout fetching {link}"))
        }
    }

    #[tokio::test]
    async fn test_failed_forced_lookup_keeps_complete_record() {
        let (service, _) = fake_service(FakeSource::with_page("Foo", PAGE));
        let mut catalog = Catalog::new();
        let complete = service.lookup(&mut catalog, "Foo", false).await.record;
        let path = std::env::temp_dir().join(format!("anninfo-forced-{}.xml", std::process::id()));
        assert!(catalog.save(&path));

        let failing = LookupService::new(Arc::new(FailingSource), 1);
        let lookup = failing.lookup(&mut catalog, "Foo", true).await;

        assert!(!lookup.updated);
        assert_eq!(lookup.record, complete);
        assert_eq!(catalog.get("Foo"), Some(&complete));
        assert!(!catalog.is_dirty());
        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn test_failed_forced_lookup_of_incomplete_record() {
        let service = LookupService::new(Arc::new(FailingSource), 1);
        let mut catalog = Catalog::new();
        let mut stale = Record::empty("Foo");
        stale.link = "https://example.org/old".to_string();
        catalog.insert(stale);

        let lookup = service.lookup(&mut catalog, "Foo", true).await;
        assert!(lookup.updated);
        assert_eq!(catalog.get("Foo"), Some(&Record::empty("Foo")));
    }

    #[tokio::test]
    async fn test_missing_link_stores_empty_record() {
        let (service, source) = fake_service(FakeSource::default());
        let mut catalog = Catalog::new();

        let lookup = service.lookup(&mut catalog, "Nothing", false).await;
        assert_eq!(lookup.record, Record::empty("Nothing"));
        assert!(lookup.updated);
        assert!(catalog.needs_refresh("Nothing"));
        assert_eq!(source.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_link() {
        let mut source = FakeSource::default();
        source
            .links
            .insert("Foo".to_string(), "https://example.org/gone".to_string());
        let (service, _) = fake_service(source);

        let record = service.build_record("Foo").await;
        assert_eq!(record.link, "https://example.org/gone");
        assert!(record.titles.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_incomplete() {
        let (service, _) = fake_service(FakeSource::with_page("Foo", PAGE));
        let mut catalog = Catalog::new();
        catalog.insert(Record::empty("Foo"));
        catalog.insert(Record::empty("Bar"));

        let summary = service.refresh_incomplete(&mut catalog).await;
        assert_eq!(
            summary,
            RefreshSummary {
                attempted: 2,
                updated: 1,
                complete: 1,
            }
        );
        assert!(!catalog.needs_refresh("Foo"));
        assert!(catalog.needs_refresh("Bar"));
    }
}

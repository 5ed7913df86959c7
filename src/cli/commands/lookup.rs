//! Lookup command handler

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::clients::encyclopedia::EncyclopediaClient;
use crate::config::Config;
use crate::services::LookupService;

use super::show::print_record;

pub(super) fn lookup_service(config: &Config) -> anyhow::Result<LookupService> {
    let client = EncyclopediaClient::new(&config.search)?;
    Ok(LookupService::new(
        Arc::new(client),
        config.search.max_concurrent_lookups,
    ))
}

pub async fn cmd_lookup(config: &Config, title: &str, refresh: bool) -> anyhow::Result<()> {
    let path = config.catalog_path();
    let mut catalog = Catalog::load(&path);
    let service = lookup_service(config)?;

    if refresh || catalog.needs_refresh(title) {
        println!("Searching for: {title}");
    }

    let lookup = service.lookup(&mut catalog, title, refresh).await;
    print_record(&lookup.record);

    if lookup.updated && !catalog.save(&path) {
        println!("⚠ Catalog could not be saved to {}", path.display());
    }

    Ok(())
}

//! Refresh incomplete records command handler

use crate::catalog::Catalog;
use crate::config::Config;

use super::lookup::lookup_service;

pub async fn cmd_refresh(config: &Config) -> anyhow::Result<()> {
    let path = config.catalog_path();
    let mut catalog = Catalog::load(&path);

    let pending = catalog.incomplete_titles().len();
    if pending == 0 {
        println!("All {} records are complete.", catalog.len());
        return Ok(());
    }

    println!("Refreshing {pending} incomplete records...");
    let service = lookup_service(config)?;
    let summary = service.refresh_incomplete(&mut catalog).await;

    println!(
        "✓ {} updated, {} now complete, {} still incomplete",
        summary.updated,
        summary.complete,
        summary.attempted - summary.complete
    );

    if catalog.is_dirty() && !catalog.save(&path) {
        println!("⚠ Catalog could not be saved to {}", path.display());
    }

    Ok(())
}

//! List records command handler

use crate::catalog::Catalog;
use crate::config::Config;

pub fn cmd_list(config: &Config, incomplete_only: bool) -> anyhow::Result<()> {
    let catalog = Catalog::load(&config.catalog_path());

    if catalog.is_empty() {
        println!("The catalog is empty.");
        println!();
        println!("Add records with: anninfo lookup \"anime name\"");
        return Ok(());
    }

    let records: Vec<_> = catalog
        .by_season()
        .into_iter()
        .filter(|r| !incomplete_only || r.is_missing_fields())
        .collect();

    println!("Catalog ({} of {} records)", records.len(), catalog.len());
    println!("{:-<70}", "");

    for record in records {
        let indicator = if record.is_missing_fields() { "⚠" } else { "✓" };
        let category = if record.category.is_empty() {
            "?"
        } else {
            record.category.as_str()
        };

        println!("{indicator} {} [{}]", record.title, record.season());
        println!("  Category: {category} | Tags: {}", record.tag_list().len());
    }

    println!();
    println!("Legend: ✓ Complete | ⚠ Missing fields");

    Ok(())
}

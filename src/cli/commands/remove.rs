//! Remove record command handler

use crate::catalog::Catalog;
use crate::config::Config;

pub fn cmd_remove(config: &Config, title: &str) -> anyhow::Result<()> {
    let path = config.catalog_path();
    let mut catalog = Catalog::load(&path);

    if catalog.remove(title).is_none() {
        println!("No record for '{title}' in the catalog.");
        return Ok(());
    }

    if catalog.save(&path) {
        println!("✓ Removed '{title}'");
    } else {
        println!("⚠ Catalog could not be saved to {}", path.display());
    }

    Ok(())
}

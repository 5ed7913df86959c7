//! Offline extraction command handler

use anyhow::Context;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::parser;

use super::show::print_record;

pub fn cmd_extract(
    config: &Config,
    file: &str,
    title: &str,
    link: &str,
    save: bool,
) -> anyhow::Result<()> {
    let page = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read page: {file}"))?;

    let record = parser::extract(&page, title, link);
    print_record(&record);

    if save {
        let path = config.catalog_path();
        let mut catalog = Catalog::load(&path);
        if catalog.insert(record) && catalog.save(&path) {
            println!();
            println!("✓ Saved to {}", path.display());
        }
    }

    Ok(())
}

//! Synopsis table command handler

use crate::catalog::Catalog;
use crate::config::Config;
use crate::services::synopsis_table;

pub fn cmd_synopsis(config: &Config, title: &str) -> anyhow::Result<()> {
    let catalog = Catalog::load(&config.catalog_path());

    let Some(record) = catalog.get(title) else {
        println!("No record for '{title}' in the catalog.");
        return Ok(());
    };

    println!(
        "{}",
        synopsis_table(
            record,
            &config.render.table_class,
            &config.render.continue_reading_tag
        )
    );
    Ok(())
}

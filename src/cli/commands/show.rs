//! Show record command handler

use crate::catalog::Catalog;
use crate::config::Config;
use crate::models::{Record, Season};

pub fn cmd_show(config: &Config, title: &str) -> anyhow::Result<()> {
    let catalog = Catalog::load(&config.catalog_path());

    let Some(record) = catalog.get(title) else {
        println!("No record for '{title}' in the catalog.");
        println!("Fetch it with: anninfo lookup \"{title}\"");
        return Ok(());
    };

    print_record(record);
    Ok(())
}

pub(super) fn print_record(record: &Record) {
    let season = Season::parse(record.date());

    println!("Record");
    println!("{:-<60}", "");
    println!("Title:    {}", record.title);
    println!("Display:  {}", record.canonical_titles());
    println!("Category: {}", or_unknown(&record.category));
    println!("Season:   {season}");
    println!("Link:     {}", or_unknown(&record.link));

    let titles = record.title_list();
    if !titles.is_empty() {
        println!("Titles:");
        for t in titles {
            println!("  - {t}");
        }
    }

    let dates = record.date_list();
    if !dates.is_empty() {
        println!("Vintage:");
        for d in dates {
            println!("  - {d}");
        }
    }

    println!("Tags:     {}", or_unknown(&record.tags));

    if !record.synopsis.is_empty() {
        println!();
        println!("{}", record.synopsis);
    }

    if record.is_missing_fields() {
        println!();
        println!("⚠ Record is incomplete and will be fetched again on next lookup.");
    }
}

fn or_unknown(value: &str) -> &str {
    if value.is_empty() { "?" } else { value }
}

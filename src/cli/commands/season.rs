//! Season normalization command handler

use crate::models::Season;

pub fn cmd_season(date: &str) {
    let season = Season::parse(date);

    if season.is_unknown() {
        println!("'{date}' is not a recognized date (expected YYYY-MM-DD or \"<term> <year>\")");
        return;
    }

    println!("Season:  {season}");
    println!("Term:    {}", season.term);
    println!("Year:    {}", season.year);
    println!("Month:   {}", season.month);
    println!("Day:     {}", season.day);
}

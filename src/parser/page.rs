//! Field extraction for encyclopedia pages.
//!
//! Fields are located by scanning for literal markers with first-occurrence
//! searches from a known offset. Every field is optional: a missing marker
//! yields an empty value for that field only.

use std::borrow::Cow;

use tracing::debug;

use crate::models::record::{PARAGRAPH_SEPARATOR, PIPE, Record, TAG_SEPARATOR};

const HEADING_START: &str = "<h1 id=\"page_header\">";
const HEADING_END: &str = "</h1>";

const INFO_BLOCK_START: &str = "<div id=\"infotype-";
const SCRIPT_START: &str = "<script type=\"text/javascript\">";

const SPAN_START: &str = "<span>";
const SPAN_END: &str = "</span>";
const LIST_ITEM_START: &str = "<div class=\"tab\">";
const DIV_END: &str = "</div>";
const TAG_END: &str = "</a></span>";

pub const ALTERNATIVE_TITLE: &str = "Alternative title";
pub const VINTAGE: &str = "Vintage";
pub const PLOT_SUMMARY: &str = "Plot Summary";
pub const GENRES: &str = "Genres";
pub const THEMES: &str = "Themes";

/// Builds a [`Record`] from a fetched page.
///
/// The main title from the heading comes first in `titles`, followed by the
/// listed alternative titles.
#[must_use]
pub fn extract(page: &str, title: &str, link: &str) -> Record {
    let page = normalize_line_endings(page);
    let heading = heading(&page);

    let mut titles = Vec::new();
    let main = main_title(heading);
    if !main.is_empty() {
        titles.push(main);
    }
    titles.extend(misc(&page, ALTERNATIVE_TITLE));

    let record = Record {
        title: title.to_string(),
        titles: titles.join(PIPE),
        category: category(heading).to_string(),
        link: link.to_string(),
        dates: misc(&page, VINTAGE).join(PIPE),
        tags: tags(&page),
        synopsis: misc(&page, PLOT_SUMMARY).join(PARAGRAPH_SEPARATOR),
    };

    debug!(
        title,
        complete = !record.is_missing_fields(),
        "Extracted record from page"
    );

    record
}

impl Record {
    /// Builds a record from an optional page; a missing page leaves every
    /// field except `title` and `link` empty.
    #[must_use]
    pub fn from_page(title: &str, link: &str, page: Option<&str>) -> Self {
        page.map_or_else(
            || Self {
                link: link.to_string(),
                ..Self::empty(title)
            },
            |page| extract(page, title, link),
        )
    }
}

/// Lines are always split on `\n`, whatever the page used.
#[must_use]
pub fn normalize_line_endings(page: &str) -> Cow<'_, str> {
    if page.contains('\r') {
        Cow::Owned(page.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(page)
    }
}

/// Returns the slice between `start` and the first `end` after it.
fn between<'a>(text: &'a str, start: &str, end: &str) -> Option<&'a str> {
    let from = text.find(start)? + start.len();
    let len = text[from..].find(end)?;
    Some(&text[from..from + len])
}

#[must_use]
pub fn heading(page: &str) -> &str {
    between(page, HEADING_START, HEADING_END).unwrap_or_default()
}

/// The contents of the last parenthesized group, e.g. `"TV"` for
/// `"Cowboy Bebop (TV)"`.
#[must_use]
pub fn category(heading: &str) -> &str {
    let Some(end) = heading.rfind(')') else {
        return "";
    };
    let Some(start) = heading[..end].rfind('(') else {
        return "";
    };
    &heading[start + 1..end]
}

#[must_use]
pub fn main_title(heading: &str) -> &str {
    heading.rfind(" (").map_or("", |end| &heading[..end])
}

/// Extracts a labelled info block such as `Vintage` or `Plot Summary`.
///
/// A block holding a `<span>` is a single value. Otherwise each line holding
/// a `<div class="tab">` item contributes one entry, in page order.
#[must_use]
pub fn misc<'a>(page: &'a str, label: &str) -> Vec<&'a str> {
    let marker = format!("<strong>{label}:</strong>");
    let Some(label_at) = page.find(&marker) else {
        return Vec::new();
    };
    let from = label_at + marker.len();

    let Some(len) = page[from..]
        .find(INFO_BLOCK_START)
        .or_else(|| page[from..].find(SCRIPT_START))
    else {
        debug!(label, "No end marker after info block");
        return Vec::new();
    };
    let content = &page[from..from + len];

    if content.contains(SPAN_START) {
        return between(content, SPAN_START, SPAN_END)
            .into_iter()
            .collect();
    }

    content
        .split('\n')
        .filter_map(|line| {
            let start = line.rfind(LIST_ITEM_START)? + LIST_ITEM_START.len();
            let len = line[start..].find('<')?;
            Some(&line[start..start + len])
        })
        .collect()
}

/// Extracts the linked labels listed under `Genres` or `Themes`.
#[must_use]
pub fn tag_list<'a>(page: &'a str, label: &str) -> Vec<&'a str> {
    let marker = format!("<strong>{label}:</strong>");
    let Some(label_at) = page.find(&marker) else {
        return Vec::new();
    };
    let Some(content) = between(&page[label_at..], SPAN_START, DIV_END) else {
        return Vec::new();
    };

    content
        .split('\n')
        .filter_map(|line| {
            let end = line.rfind(TAG_END)?;
            let start = line[..end].rfind('>')? + 1;
            Some(&line[start..end])
        })
        .collect()
}

/// Genres followed by themes, duplicates kept.
#[must_use]
pub fn tags(page: &str) -> String {
    let mut list = tag_list(page, GENRES);
    list.extend(tag_list(page, THEMES));
    list.join(TAG_SEPARATOR)
}

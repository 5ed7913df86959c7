use serde::{Deserialize, Serialize};

use super::season::{self, Season};

/// Separator used for the joined `titles` and `dates` fields.
pub const PIPE: &str = " | ";
/// Separator used for the joined `tags` field.
pub const TAG_SEPARATOR: &str = ", ";
/// Paragraph separator inside `synopsis`.
pub const PARAGRAPH_SEPARATOR: &str = "\n";

/// Metadata retrieved for one queried title.
///
/// A record with any empty field (other than `title`) is incomplete and
/// should be re-extracted on the next lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    pub title: String,
    pub titles: String,
    pub category: String,
    pub link: String,
    pub dates: String,
    pub tags: String,
    pub synopsis: String,
}

impl Record {
    /// An all-empty record for `title`.
    #[must_use]
    pub fn empty(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_missing_fields(&self) -> bool {
        [
            &self.titles,
            &self.category,
            &self.link,
            &self.dates,
            &self.tags,
            &self.synopsis,
        ]
        .iter()
        .any(|field| field.is_empty())
    }

    #[must_use]
    pub fn title_list(&self) -> Vec<&str> {
        split_joined(&self.titles, PIPE)
    }

    #[must_use]
    pub fn date_list(&self) -> Vec<&str> {
        split_joined(&self.dates, PIPE)
    }

    #[must_use]
    pub fn tag_list(&self) -> Vec<&str> {
        split_joined(&self.tags, TAG_SEPARATOR)
    }

    /// The first listed date without any trailing qualifier, e.g.
    /// `"1998-04-03 (Japan)"` becomes `"1998-04-03"`.
    #[must_use]
    pub fn date(&self) -> &str {
        let Some(first) = self.dates.split(PIPE).next().filter(|d| !d.is_empty()) else {
            return season::UNKNOWN;
        };
        first.split_once(' ').map_or(first, |(head, _)| head)
    }

    #[must_use]
    pub fn season(&self) -> String {
        Season::parse(self.date()).display
    }

    #[must_use]
    pub fn canonical_titles(&self) -> String {
        crate::parser::title::canonical_titles(&self.title, &self.titles)
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Record [title={}, link={}, dates={}, tags={}, category={}, titles={}, synopsis={}]",
            self.title, self.link, self.dates, self.tags, self.category, self.titles, self.synopsis
        )
    }
}

fn split_joined<'a>(joined: &'a str, separator: &str) -> Vec<&'a str> {
    if joined.is_empty() {
        return Vec::new();
    }
    joined.split(separator).collect()
}

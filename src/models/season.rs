use regex::Regex;
use std::cmp::Ordering;
use std::convert::Infallible;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::parser::get_regex;

pub const TERMS: [&str; 4] = ["Winter", "Spring", "Summer", "Fall"];
const FIRST_MONTH_FOR_TERM: [i32; 4] = [1, 4, 7, 10];

pub const UNKNOWN: &str = "?";

/// A release date bucketed into a calendar quarter.
///
/// Built from either `"<term> <year>"` (e.g. `"spring 1998"`) or
/// `"YYYY-MM-DD"`. Anything else yields the unknown season, where `term` and
/// `display` are `"?"` and every numeric field is `-1`.
///
/// Equality and ordering only look at `(year, month, day)`.
#[derive(Debug, Clone)]
pub struct Season {
    pub term: String,
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub display: String,
}

impl Season {
    #[must_use]
    pub fn parse(input: &str) -> Self {
        parse_term_year(input)
            .or_else(|| parse_year_month_day(input))
            .unwrap_or_else(Self::unknown)
    }

    #[must_use]
    pub fn unknown() -> Self {
        Self {
            term: UNKNOWN.to_string(),
            year: -1,
            month: -1,
            day: -1,
            display: UNKNOWN.to_string(),
        }
    }

    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        self.year == -1
    }

    const fn key(&self) -> (i32, i32, i32) {
        (self.year, self.month, self.day)
    }
}

impl Default for Season {
    fn default() -> Self {
        Self::unknown()
    }
}

impl From<&str> for Season {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<Option<&str>> for Season {
    fn from(value: Option<&str>) -> Self {
        value.map_or_else(Self::unknown, Self::parse)
    }
}

impl FromStr for Season {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display)
    }
}

impl PartialEq for Season {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Season {}

impl PartialOrd for Season {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Season {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Orders two raw date strings by their normalized seasons.
///
/// Unknown seasons have a year of `-1` and therefore sort first.
#[must_use]
pub fn compare(a: &str, b: &str) -> Ordering {
    Season::parse(a).cmp(&Season::parse(b))
}

fn parse_term_year(input: &str) -> Option<Season> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = get_regex(&RE, r"(?i)^(?P<term>winter|spring|summer|fall) (?P<year>[0-9]+)$");

    let caps = re.captures(input)?;
    let term = caps.name("term")?.as_str();
    let year = caps.name("year")?.as_str().parse::<i32>().ok()?;

    Some(Season {
        term: term.to_string(),
        year,
        month: first_month_for_term(term)?,
        day: 1,
        display: input.to_string(),
    })
}

fn parse_year_month_day(input: &str) -> Option<Season> {
    static LOW: OnceLock<Regex> = OnceLock::new();
    static HIGH: OnceLock<Regex> = OnceLock::new();
    let low = get_regex(&LOW, r"^[0-9]+-0[1-9]-[0-9]{2}$");
    let high = get_regex(&HIGH, r"^[0-9]+-1[0-2]-[0-9]{2}$");

    if !low.is_match(input) && !high.is_match(input) {
        return None;
    }

    let mut parts = input.split('-');
    let year = parts.next()?.parse::<i32>().ok()?;
    let month = parts.next()?.parse::<i32>().ok()?;
    let day = parts.next()?.parse::<i32>().ok()?;

    let term = term_for_month(month);

    Some(Season {
        term: term.to_string(),
        year,
        month,
        day,
        display: format!("{term} {year}"),
    })
}

fn first_month_for_term(term: &str) -> Option<i32> {
    TERMS
        .iter()
        .position(|t| t.eq_ignore_ascii_case(term))
        .map(|i| FIRST_MONTH_FOR_TERM[i])
}

/// Quarter bucketing: 1-3 Winter, 4-6 Spring, 7-9 Summer, everything else Fall.
#[must_use]
pub const fn term_for_month(month: i32) -> &'static str {
    match month {
        1..=3 => TERMS[0],
        4..=6 => TERMS[1],
        7..=9 => TERMS[2],
        _ => TERMS[3],
    }
}

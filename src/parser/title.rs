use regex::Regex;
use std::sync::OnceLock;

use super::get_regex;
use crate::models::record::PIPE;

fn has_word_char(title: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    get_regex(&RE, r"(?-u:\w)").is_match(title)
}

fn has_japanese_script(title: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    get_regex(&RE, r"[\p{Hiragana}\p{Katakana}\p{Han}]").is_match(title)
}

/// Colons are not allowed in file names.
#[must_use]
pub fn clean_title(title: &str) -> String {
    title.replace(": ", " - ")
}

/// Builds the display title list for a record.
///
/// Starts from the cleaned query title, then adds alternative titles longest
/// first: untagged titles, titles tagged `(English)`, and titles tagged
/// `(Japanese)` written in Latin script. Duplicates are compared without case.
#[must_use]
pub fn canonical_titles(title: &str, titles: &str) -> String {
    let mut result = vec![clean_title(title)];

    let cleaned = clean_title(titles);
    let mut candidates: Vec<&str> = if cleaned.is_empty() {
        Vec::new()
    } else {
        cleaned.split(PIPE).collect()
    };
    // stable, so equal lengths keep page order
    candidates.sort_by_key(|t| std::cmp::Reverse(t.chars().count()));

    for candidate in candidates {
        if let Some(accepted) = accepted_title(candidate) {
            add_unique_ignore_case(&mut result, accepted);
        }
    }

    result.join(PIPE)
}

fn accepted_title(candidate: &str) -> Option<&str> {
    let paren_end = candidate.rfind(')');
    let lang_start = paren_end.and_then(|end| candidate[..end].rfind(" ("));

    match (paren_end, lang_start) {
        (None, None) if has_word_char(candidate) => Some(candidate),
        (Some(end), Some(start)) => {
            let language = &candidate[start + 2..end];
            let title = &candidate[..start];
            let latin_japanese = language == "Japanese" && !has_japanese_script(title);
            (language == "English" || latin_japanese).then_some(title)
        }
        _ => None,
    }
}

fn add_unique_ignore_case(list: &mut Vec<String>, title: &str) {
    let lower = title.to_lowercase();
    if !list.iter().any(|t| t.to_lowercase() == lower) {
        list.push(title.to_string());
    }
}

pub mod page;
pub mod title;

use regex::Regex;
use std::sync::OnceLock;

pub use page::extract;
pub use title::canonical_titles;

pub(crate) fn get_regex(re: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    re.get_or_init(|| Regex::new(pattern).expect("Invalid regex pattern defined in code"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_regex_compiles_once() {
        static RE: OnceLock<Regex> = OnceLock::new();
        let first = get_regex(&RE, r"^[0-9]+$");
        let second = get_regex(&RE, r"ignored once initialized");

        assert!(std::ptr::eq(first, second));
        assert!(second.is_match("2004"));
    }
}

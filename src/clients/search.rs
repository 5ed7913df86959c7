//! Resolves a title to its encyclopedia page through web search result pages.

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::SearchConfig;

const SEARCH_SUFFIX: &str = "anime news network";
const QUERY_PLACEHOLDER: &str = "{query}";
const HREF_START: &str = "href=\"";

#[derive(Clone)]
pub struct SearchClient {
    client: Client,
    providers: Vec<String>,
    site_prefix: String,
}

impl SearchClient {
    #[must_use]
    pub fn new(client: Client, config: &SearchConfig) -> Self {
        Self {
            client,
            providers: config.providers.clone(),
            site_prefix: config.site_prefix.clone(),
        }
    }

    #[must_use]
    pub fn search_term(title: &str) -> String {
        format!("{title} {SEARCH_SUFFIX}")
    }

    /// Tries each provider in order and returns the first result link on the
    /// encyclopedia site.
    #[instrument(skip(self))]
    pub async fn find_link(&self, title: &str) -> Result<Option<String>> {
        let term = Self::search_term(title);
        let term = term.as_str();
        first_link(&self.providers, move |provider| {
            self.search_provider(provider, term)
        })
        .await
    }

    async fn search_provider(&self, provider: &str, term: &str) -> Result<Option<String>> {
        let url = provider.replace(QUERY_PLACEHOLDER, &urlencoding::encode(term));
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Search request failed: {url}"))?;

        if !response.status().is_success() {
            anyhow::bail!("Search provider returned {}", response.status());
        }

        let body = response.text().await?;
        Ok(extract_result_link(&body, &self.site_prefix))
    }
}

/// Runs `search` against each provider until one yields a link.
///
/// Providers that answer without a link or fail fall through to the next.
/// The result is an error only when every provider failed.
pub async fn first_link<'a, F, Fut>(
    providers: &'a [String],
    mut search: F,
) -> Result<Option<String>>
where
    F: FnMut(&'a str) -> Fut,
    Fut: Future<Output = Result<Option<String>>>,
{
    let mut last_error = None;
    let mut answered = false;

    for provider in providers {
        match search(provider).await {
            Ok(Some(link)) => {
                debug!(provider = %provider, link = %link, "Found encyclopedia link");
                return Ok(Some(link));
            }
            Ok(None) => {
                answered = true;
                debug!(provider = %provider, "No encyclopedia link in results");
            }
            Err(e) => {
                warn!(provider = %provider, error = %e, "Search provider failed");
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) if !answered => Err(e),
        _ => Ok(None),
    }
}

/// Finds the first link in a result page that points below `site_prefix`.
///
/// Handles entity-encoded hrefs and Google's `/url?q=` redirect links. The
/// scheme of `site_prefix` is ignored when matching.
#[must_use]
pub fn extract_result_link(html: &str, site_prefix: &str) -> Option<String> {
    let prefix = strip_scheme(site_prefix);
    let mut rest = html;

    while let Some(start) = rest.find(HREF_START) {
        rest = &rest[start + HREF_START.len()..];
        let Some(end) = rest.find('"') else {
            break;
        };
        let href = html_escape::decode_html_entities(&rest[..end]);
        rest = &rest[end..];

        let target = unwrap_redirect(&href).unwrap_or_else(|| href.to_string());
        if strip_scheme(&target).starts_with(prefix) {
            return Some(target);
        }
    }

    None
}

fn strip_scheme(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}

fn unwrap_redirect(href: &str) -> Option<String> {
    if !href.starts_with("/url?") {
        return None;
    }
    let url = Url::parse("https://www.google.com").ok()?.join(href).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "q" || key == "url")
        .map(|(_, value)| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "https://www.animenewsnetwork.com/encyclopedia/anime.php";

    #[test]
    fn test_search_term() {
        assert_eq!(
            SearchClient::search_term("Cowboy Bebop"),
            "Cowboy Bebop anime news network"
        );
    }

    #[test]
    fn test_direct_link() {
        let html = r#"<a href="https://example.org/">x</a>
<li class="b_algo"><h2><a href="http://www.animenewsnetwork.com/encyclopedia/anime.php?id=13&amp;page=1">Cowboy Bebop (TV)</a></h2></li>"#;
        assert_eq!(
            extract_result_link(html, PREFIX).as_deref(),
            Some("http://www.animenewsnetwork.com/encyclopedia/anime.php?id=13&page=1")
        );
    }

    #[test]
    fn test_google_redirect_link() {
        let html = r#"<a href="/search?q=more">More</a><a href="/url?q=https://www.animenewsnetwork.com/encyclopedia/anime.php%3Fid%3D13&amp;sa=U&amp;ved=abc">Cowboy Bebop</a>"#;
        assert_eq!(
            extract_result_link(html, PREFIX).as_deref(),
            Some("https://www.animenewsnetwork.com/encyclopedia/anime.php?id=13")
        );
    }

    fn providers(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    fn answer(provider: &str) -> Result<Option<String>> {
        match provider {
            "hit" => Ok(Some(format!("{PREFIX}?id=13"))),
            "miss" => Ok(None),
            _ => Err(anyhow::anyhow!("{provider} unavailable")),
        }
    }

    async fn run(names: &[&str]) -> (Result<Option<String>>, Vec<String>) {
        let providers = providers(names);
        let mut calls = Vec::new();
        let result = first_link(&providers, |provider| {
            calls.push(provider.to_string());
            std::future::ready(answer(provider))
        })
        .await;
        (result, calls)
    }

    #[tokio::test]
    async fn test_primary_hit_skips_fallback() {
        let (result, calls) = run(&["hit", "down"]).await;
        assert_eq!(result.unwrap(), Some(format!("{PREFIX}?id=13")));
        assert_eq!(calls, vec!["hit"]);
    }

    #[tokio::test]
    async fn test_fallback_after_miss_or_error() {
        let (result, calls) = run(&["miss", "hit"]).await;
        assert_eq!(result.unwrap(), Some(format!("{PREFIX}?id=13")));
        assert_eq!(calls, vec!["miss", "hit"]);

        let (result, calls) = run(&["down", "hit"]).await;
        assert_eq!(result.unwrap(), Some(format!("{PREFIX}?id=13")));
        assert_eq!(calls, vec!["down", "hit"]);
    }

    #[tokio::test]
    async fn test_answered_without_link_is_none() {
        let (result, _) = run(&["miss", "down"]).await;
        assert_eq!(result.unwrap(), None);

        let (result, _) = run(&["down", "miss"]).await;
        assert_eq!(result.unwrap(), None);
    }

    #[tokio::test]
    async fn test_all_providers_failing_is_error() {
        let (result, calls) = run(&["down", "also-down"]).await;
        let error = result.unwrap_err();
        assert!(error.to_string().contains("also-down unavailable"));
        assert_eq!(calls.len(), 2);
    }

    #[tokio::test]
    async fn test_no_providers() {
        let (result, calls) = run(&[]).await;
        assert_eq!(result.unwrap(), None);
        assert!(calls.is_empty());
    }

    #[test]
    fn test_no_matching_link() {
        let html = r#"<a href="https://www.animenewsnetwork.com/news/2020">news</a><a href="broken"#;
        assert_eq!(extract_result_link(html, PREFIX), None);
    }
}

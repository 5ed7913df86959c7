pub mod encyclopedia;
pub mod search;

use anyhow::Result;

/// Where pages come from: resolve a title to a link, then fetch its body.
#[async_trait::async_trait]
pub trait PageSource: Send + Sync {
    /// Returns the encyclopedia link for `title`, or `None` if no search
    /// provider found one.
    async fn resolve(&self, title: &str) -> Result<Option<String>>;

    /// Fetches the raw page body at `link`.
    async fn fetch(&self, link: &str) -> Result<String>;
}

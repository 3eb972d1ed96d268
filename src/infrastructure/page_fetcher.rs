//! Deck page fetcher
//!
//! Resolves a deck id to its source URL, serves the page from the cache when
//! present, and otherwise retrieves it once and caches the body.

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use super::fetch_error::{FetchError, FetchResult};
use super::http_client::RemoteSource;
use super::page_cache::PageCache;
use crate::domain::constants::site;

/// Raw deck pages by id
#[async_trait]
pub trait DeckPages: Send + Sync {
    /// Source URL of deck `deck_id`
    fn url_for(&self, deck_id: u32) -> String;

    /// Raw page content of deck `deck_id`
    async fn fetch(&self, deck_id: u32) -> FetchResult<String>;
}

/// URL pattern with a single `{}` placeholder for the deck id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    template: String,
}

impl UrlTemplate {
    pub fn parse(template: &str) -> FetchResult<Self> {
        let placeholders = template.matches(site::ID_PLACEHOLDER).count();
        if placeholders != 1 {
            return Err(FetchError::invalid_url_template(
                template,
                format!("expected exactly one '{}' placeholder, found {}", site::ID_PLACEHOLDER, placeholders),
            ));
        }

        let sample_url = template.replace(site::ID_PLACEHOLDER, &site::FIRST_DECK_ID.to_string());
        Url::parse(&sample_url).map_err(|e| FetchError::invalid_url_template(template, e.to_string()))?;

        Ok(Self {
            template: template.to_string(),
        })
    }

    pub fn format(&self, deck_id: u32) -> String {
        self.template.replace(site::ID_PLACEHOLDER, &deck_id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }
}

pub struct PageFetcher<R> {
    template: UrlTemplate,
    cache: PageCache,
    remote: R,
}

impl<R: RemoteSource> PageFetcher<R> {
    pub fn new(template: UrlTemplate, cache: PageCache, remote: R) -> Self {
        Self { template, cache, remote }
    }

    pub fn cache(&self) -> &PageCache {
        &self.cache
    }
}

#[async_trait]
impl<R: RemoteSource> DeckPages for PageFetcher<R> {
    fn url_for(&self, deck_id: u32) -> String {
        self.template.format(deck_id)
    }

    async fn fetch(&self, deck_id: u32) -> FetchResult<String> {
        let url = self.url_for(deck_id);

        if let Some(content) = self.cache.load(&url).await? {
            return Ok(content);
        }

        debug!("Cache miss for deck {}", deck_id);
        let content = self.remote.get_text(&url).await?;
        self.cache.store(&url, &content).await?;
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;
    use tokio_test::assert_ok;

    /// Remote that serves a fixed body and counts requests
    struct CountingRemote {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl RemoteSource for CountingRemote {
        async fn get_text(&self, url: &str) -> FetchResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("<html>{url}</html>"))
        }
    }

    fn fetcher(dir: &TempDir) -> (PageFetcher<CountingRemote>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let remote = CountingRemote { calls: Arc::clone(&calls) };
        let template = UrlTemplate::parse(site::DECK_URL_TEMPLATE).unwrap();
        (PageFetcher::new(template, PageCache::new(dir.path()), remote), calls)
    }

    #[tokio::test]
    async fn test_second_fetch_is_a_cache_hit() {
        let dir = TempDir::new().unwrap();
        let (fetcher, calls) = fetcher(&dir);

        let first = assert_ok!(fetcher.fetch(3).await);
        let second = assert_ok!(fetcher.fetch(3).await);

        assert_eq!(first, second);
        assert_eq!(first, "<html>https://yugiohtopdecks.com/deck/3</html>");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(dir.path().join("https-yugiohtopdecks-com-deck-3.html").exists());
    }

    #[tokio::test]
    async fn test_existing_cache_entry_skips_the_network() {
        let dir = TempDir::new().unwrap();
        let (fetcher, calls) = fetcher(&dir);
        std::fs::write(dir.path().join("https-yugiohtopdecks-com-deck-5.html"), "cached body").unwrap();

        assert_eq!(fetcher.fetch(5).await.unwrap(), "cached body");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    /// Remote whose every request fails at the transport level
    struct FailingRemote {
        client: reqwest::Client,
    }

    #[async_trait]
    impl RemoteSource for FailingRemote {
        async fn get_text(&self, url: &str) -> FetchResult<String> {
            // nothing listens on the discard port
            let err = self
                .client
                .get("http://127.0.0.1:9/")
                .send()
                .await
                .expect_err("connection to the discard port must fail");
            Err(FetchError::transport(url, err))
        }
    }

    #[tokio::test]
    async fn test_transport_error_reaches_caller_and_is_not_cached() {
        let dir = TempDir::new().unwrap();
        let template = UrlTemplate::parse(site::DECK_URL_TEMPLATE).unwrap();
        let remote = FailingRemote {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(2))
                .build()
                .unwrap(),
        };
        let fetcher = PageFetcher::new(template, PageCache::new(dir.path()), remote);

        let err = fetcher.fetch(1).await.unwrap_err();

        assert!(matches!(err, FetchError::Transport { ref url, .. } if url == "https://yugiohtopdecks.com/deck/1"));
        assert!(!fetcher.cache().path_for(&fetcher.url_for(1)).exists());
    }

    #[test]
    fn test_template_formatting() {
        let template = UrlTemplate::parse("https://example.com/deck/{}?view=full").unwrap();
        assert_eq!(template.format(12), "https://example.com/deck/12?view=full");
    }

    #[test]
    fn test_template_validation() {
        assert!(UrlTemplate::parse("https://example.com/deck/").is_err());
        assert!(UrlTemplate::parse("https://example.com/{}/{}").is_err());
        assert!(UrlTemplate::parse("not a url {}").is_err());
    }
}

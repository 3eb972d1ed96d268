//! Infrastructure layer for page retrieval, parsing and persistence
//!
//! HTTP access, the raw page cache, HTML extraction, configuration,
//! logging, dataset output and publishing.

pub mod config;
pub mod dataset_store;
pub mod fetch_error;
pub mod http_client;
pub mod logging;
pub mod page_cache;
pub mod page_fetcher;
pub mod parsing;
pub mod parsing_error;
pub mod publisher;

// Re-export commonly used items
pub use config::{AppConfig, ConfigManager, CrawlConfig, LoggingConfig};
pub use dataset_store::{write_ndjson, OutputConfig};
pub use fetch_error::{FetchError, FetchResult};
pub use http_client::{HttpClient, HttpClientConfig, RemoteSource};
pub use logging::{init_logging_with_config, LoggingGuard};
pub use page_cache::{CacheConfig, PageCache};
pub use page_fetcher::{DeckPages, PageFetcher, UrlTemplate};
pub use parsing::{DeckParser, ParsingConfig, ParsingError, ParsingResult};
pub use publisher::{DatasetPublisher, KaggleCliPublisher, NoopPublisher, PublishConfig};

// Re-export modules
pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod harvest;
pub mod listing;
pub mod records;
pub mod selectors;
pub mod session;

// Re-export commonly used types for convenience
pub use config::SiteConfig;
pub use error::{HarvestError, Result};
pub use records::ProductRecord;

use std::path::PathBuf;

/// Builder for a scraping run over the configured category list.
pub struct Harvest {
    config: SiteConfig,
}

impl Harvest {
    /// Create a harvest from an explicit configuration.
    pub fn new(config: SiteConfig) -> Self {
        Self { config }
    }

    /// Scrape the built-in category list with default settings.
    pub fn with_defaults() -> Self {
        Self::new(SiteConfig::default())
    }

    /// Load the configuration from a JSON file.
    pub fn from_config_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        Ok(Self::new(SiteConfig::from_file(path)?))
    }

    /// Set where the CSV is written.
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_path = path.into();
        self
    }

    /// Set the WebDriver server URL.
    pub fn with_webdriver_url(mut self, url: &str) -> Self {
        self.config.webdriver_url = url.to_string();
        self
    }

    /// Set how many categories are scraped concurrently.
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.config.max_concurrency = max_concurrency;
        self
    }

    /// Set the per-page operation timeout in seconds.
    pub fn with_page_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config.page_timeout_secs = timeout_seconds;
        self
    }

    /// Flush each category's rows to the CSV as soon as it completes.
    pub fn with_flush_each_category(mut self, flush: bool) -> Self {
        self.config.flush_each_category = flush;
        self
    }

    /// Replace the category list.
    pub fn with_categories(mut self, category_urls: Vec<String>) -> Self {
        self.config.category_urls = category_urls;
        self
    }

    /// Run the scrape, write the CSV, and return the records in category
    /// order.
    pub async fn run(self) -> Result<Vec<ProductRecord>> {
        let mut config = self.config;

        // Override the WebDriver URL with an environment variable if provided
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                config.webdriver_url = webdriver_url;
            }
        }

        harvest::run(&config).await
    }
}

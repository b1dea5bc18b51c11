use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{HarvestError, Result};
use crate::selectors::FieldSelectors;

/// Configuration for one scraping run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Category listing pages to scrape, in order.
    #[serde(default = "default_category_urls")]
    pub category_urls: Vec<String>,

    /// URL of the WebDriver server driving the browser.
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Per-page operation timeout in seconds (navigation + source retrieval).
    #[serde(default = "default_page_timeout_secs")]
    pub page_timeout_secs: u64,

    /// Where the aggregated CSV is written. Overwritten on every run.
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Number of categories scraped concurrently. At 1 (the default) a
    /// single browser session is reused for every navigation; above 1 each
    /// category gets its own session.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Write each category's rows to the CSV as soon as the category
    /// finishes, so a fatal error later in the run preserves completed work.
    #[serde(default)]
    pub flush_each_category: bool,

    /// Markup selectors for every scraped field.
    #[serde(default)]
    pub selectors: FieldSelectors,
}

/// The built-in Timber Manor category list, scraped in this order.
fn default_category_urls() -> Vec<String> {
    [
        "https://timbermanor.in/collections/armchairs",
        "https://timbermanor.in/collections/bar-cabinets",
        "https://timbermanor.in/collections/beds",
        "https://timbermanor.in/collections/bedside-tables",
        "https://timbermanor.in/collections/frontpage",
        "https://timbermanor.in/collections/book-shelves",
        "https://timbermanor.in/collections/cabinets-1",
        "https://timbermanor.in/collections/cane-rattan-beds",
        "https://timbermanor.in/collections/seater",
        "https://timbermanor.in/collections/chest-of-drawers",
        "https://timbermanor.in/collections/tables",
        "https://timbermanor.in/collections/console-tables",
        "https://timbermanor.in/collections/cupboards-wardrobes",
        "https://timbermanor.in/collections/day-beds",
        "https://timbermanor.in/collections/dining-tables",
        "https://timbermanor.in/collections/dressers",
        "https://timbermanor.in/collections/end-tables",
        "https://timbermanor.in/collections/kitchen-items",
        "https://timbermanor.in/collections/nightstands",
        "https://timbermanor.in/collections/ottomans-benches",
        "https://timbermanor.in/collections/premium-beds",
        "https://timbermanor.in/collections/sideboards",
        "https://timbermanor.in/collections/loungers",
        "https://timbermanor.in/collections/solidwood-beds",
        "https://timbermanor.in/collections/study-desk-writing-tables",
        "https://timbermanor.in/collections/cabinets",
        "https://timbermanor.in/collections/whitman-collection",
        "https://timbermanor.in/collections/whitman-collection-1",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_page_timeout_secs() -> u64 {
    60
}

fn default_output_path() -> PathBuf {
    PathBuf::from("timbermanor_products.csv")
}

fn default_max_concurrency() -> usize {
    1
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            category_urls: default_category_urls(),
            webdriver_url: default_webdriver_url(),
            page_timeout_secs: default_page_timeout_secs(),
            output_path: default_output_path(),
            max_concurrency: default_max_concurrency(),
            flush_each_category: false,
            selectors: FieldSelectors::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a JSON file. Missing fields keep their
    /// defaults, so a file may override any subset.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(&path).map_err(|source| HarvestError::ConfigIo {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|source| HarvestError::ConfigIo {
                path: path.as_ref().to_path_buf(),
                source,
            })?;

        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// The per-page timeout as a [`Duration`].
    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_cover_the_full_category_list() {
        let config = SiteConfig::default();
        assert_eq!(config.category_urls.len(), 28);
        assert_eq!(
            config.category_urls[0],
            "https://timbermanor.in/collections/armchairs"
        );
        assert_eq!(config.webdriver_url, "http://localhost:4444");
        assert_eq!(config.page_timeout(), Duration::from_secs(60));
        assert_eq!(config.output_path, PathBuf::from("timbermanor_products.csv"));
        assert_eq!(config.max_concurrency, 1);
        assert!(!config.flush_each_category);
    }

    #[test]
    fn file_overrides_a_subset_of_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"category_urls": ["https://timbermanor.in/collections/beds"], "max_concurrency": 3}}"#
        )
        .unwrap();

        let config = SiteConfig::from_file(file.path()).unwrap();
        assert_eq!(
            config.category_urls,
            vec!["https://timbermanor.in/collections/beds".to_string()]
        );
        assert_eq!(config.max_concurrency, 3);
        // Everything not in the file keeps its default
        assert_eq!(config.page_timeout_secs, 60);
        assert_eq!(config.webdriver_url, "http://localhost:4444");
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = SiteConfig::from_file("/nonexistent/harvest.json").unwrap_err();
        assert!(matches!(err, HarvestError::ConfigIo { .. }));
        assert!(err.to_string().contains("/nonexistent/harvest.json"));
    }
}

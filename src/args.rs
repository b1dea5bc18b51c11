use clap::Parser;
use std::path::PathBuf;
use timber_harvest::config::SiteConfig;

#[derive(Parser, Debug)]
#[command(name = "timber-harvest")]
#[command(about = "Scrapes product listings from the Timber Manor store into a CSV file")]
#[command(version)]
pub struct Args {
    /// Path to a JSON site configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output CSV path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// WebDriver server URL
    #[arg(short, long)]
    pub webdriver_url: Option<String>,

    /// Number of categories scraped concurrently (1 = one shared browser session)
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Per-page operation timeout in seconds
    #[arg(long)]
    pub page_timeout: Option<u64>,

    /// Write each category's rows to the CSV as soon as the category finishes
    #[arg(long)]
    pub flush_each_category: bool,

    /// Scrape only the given category URL instead of the built-in list
    /// (repeatable)
    #[arg(long = "category")]
    pub categories: Vec<String>,
}

impl Args {
    /// Build the run configuration: config file (or defaults) plus any
    /// command-line overrides.
    pub fn site_config(&self) -> timber_harvest::Result<SiteConfig> {
        let mut config = match &self.config {
            Some(path) => SiteConfig::from_file(path)?,
            None => SiteConfig::default(),
        };

        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if let Some(webdriver_url) = &self.webdriver_url {
            config.webdriver_url = webdriver_url.clone();
        }
        if let Some(concurrency) = self.concurrency {
            config.max_concurrency = concurrency;
        }
        if let Some(page_timeout) = self.page_timeout {
            config.page_timeout_secs = page_timeout;
        }
        if self.flush_each_category {
            config.flush_each_category = true;
        }
        if !self.categories.is_empty() {
            config.category_urls = self.categories.clone();
        }

        Ok(config)
    }
}

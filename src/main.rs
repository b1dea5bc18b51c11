use clap::Parser;
use timber_harvest::{Harvest, export};

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    println!("Note: scraping requires a WebDriver server (e.g., chromedriver or geckodriver).");
    println!(
        "Set WEBDRIVER_URL environment variable if not using the default http://localhost:4444"
    );

    let config = match args.site_config() {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("Failed to build configuration: {}", e);
            std::process::exit(1);
        }
    };

    ::log::info!(
        "Starting scrape of {} categories",
        config.category_urls.len()
    );
    let output_path = config.output_path.clone();
    let start_time = std::time::Instant::now();

    let records = match Harvest::new(config).run().await {
        Ok(records) => records,
        Err(e) => {
            ::log::error!("Scrape failed: {}", e);
            std::process::exit(1);
        }
    };

    // Echo the full result table after the run
    export::print_table(&records);

    let duration = start_time.elapsed();
    ::log::info!(
        "Scraped {} products into {} in {:.2} seconds",
        records.len(),
        output_path.display(),
        duration.as_secs_f64()
    );
}

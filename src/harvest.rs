use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

use crate::config::SiteConfig;
use crate::error::{HarvestError, Result};
use crate::export::{self, CsvSink};
use crate::extract;
use crate::listing;
use crate::records::ProductRecord;
use crate::selectors::CompiledSelectors;
use crate::session::Session;

/// Scrape every configured category and write the aggregated CSV.
///
/// Categories are processed in list order and the returned records keep
/// that order: all of category N's products (in listing order) before any
/// of category N+1's. A required-field or navigation failure on any page
/// aborts the run.
pub async fn run(config: &SiteConfig) -> Result<Vec<ProductRecord>> {
    ::log::info!(
        "Starting harvest of {} categories via {}",
        config.category_urls.len(),
        config.webdriver_url
    );

    let mut sink = if config.flush_each_category {
        Some(CsvSink::create(&config.output_path)?)
    } else {
        None
    };

    let records = if config.max_concurrency <= 1 {
        run_sequential(config, &mut sink).await?
    } else {
        run_concurrent(config, &mut sink).await?
    };

    // Without a sink the file is written only once the whole run succeeds.
    if sink.is_none() {
        export::write_csv(&config.output_path, &records)?;
    }

    ::log::info!(
        "Harvest complete: {} products from {} categories",
        records.len(),
        config.category_urls.len()
    );
    Ok(records)
}

/// One browser session reused for every navigation, categories in order.
async fn run_sequential(
    config: &SiteConfig,
    sink: &mut Option<CsvSink>,
) -> Result<Vec<ProductRecord>> {
    let selectors = config.selectors.compile()?;
    let mut session = Session::connect(&config.webdriver_url).await?;

    let result = scrape_categories(&mut session, config, &selectors, sink).await;

    if let Err(e) = session.close().await {
        ::log::warn!("Failed to close browser session: {}", e);
    }
    result
}

async fn scrape_categories(
    session: &mut Session,
    config: &SiteConfig,
    selectors: &CompiledSelectors,
    sink: &mut Option<CsvSink>,
) -> Result<Vec<ProductRecord>> {
    let mut all_products = Vec::new();
    for category_url in &config.category_urls {
        let batch = scrape_category(session, category_url, selectors, config.page_timeout()).await?;
        if let Some(sink) = sink.as_mut() {
            sink.write_batch(&batch)?;
        }
        all_products.extend(batch);
    }
    Ok(all_products)
}

/// One task per category, each with its own browser session, bounded by a
/// semaphore. Batches are joined in list order, so the output is identical
/// to a sequential run.
async fn run_concurrent(
    config: &SiteConfig,
    sink: &mut Option<CsvSink>,
) -> Result<Vec<ProductRecord>> {
    // Surface a bad selector config before spawning anything.
    config.selectors.compile()?;

    let semaphore = Arc::new(Semaphore::new(config.max_concurrency));
    let mut handles = Vec::with_capacity(config.category_urls.len());

    for category_url in config.category_urls.iter().cloned() {
        let semaphore = Arc::clone(&semaphore);
        let webdriver_url = config.webdriver_url.clone();
        let selectors = config.selectors.clone();
        let page_timeout = config.page_timeout();

        handles.push(tokio::spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .expect("semaphore is never closed");

            let selectors = selectors.compile()?;
            let mut session = Session::connect(&webdriver_url).await?;
            let result =
                scrape_category(&mut session, &category_url, &selectors, page_timeout).await;

            if let Err(e) = session.close().await {
                ::log::warn!(
                    "Failed to close browser session for {}: {}",
                    category_url,
                    e
                );
            }
            result
        }));
    }

    let mut all_products = Vec::new();
    for handle in handles {
        let batch = handle
            .await
            .map_err(|e| HarvestError::Worker(e.to_string()))??;
        if let Some(sink) = sink.as_mut() {
            sink.write_batch(&batch)?;
        }
        all_products.extend(batch);
    }
    Ok(all_products)
}

/// Scrape every product linked from one category listing, in listing order.
pub async fn scrape_category(
    session: &mut Session,
    category_url: &str,
    selectors: &CompiledSelectors,
    page_timeout: Duration,
) -> Result<Vec<ProductRecord>> {
    ::log::info!("Scraping category: {}", category_url);

    let html = session.fetch(category_url, page_timeout).await?;
    let product_urls = listing::product_urls(&html, category_url, selectors);
    ::log::info!(
        "Found {} product links in {}",
        product_urls.len(),
        category_url
    );

    let mut products = Vec::with_capacity(product_urls.len());
    for product_url in &product_urls {
        products.push(scrape_product(session, product_url, selectors, page_timeout).await?);
    }
    Ok(products)
}

/// Scrape one product page into a record.
pub async fn scrape_product(
    session: &mut Session,
    product_url: &str,
    selectors: &CompiledSelectors,
    page_timeout: Duration,
) -> Result<ProductRecord> {
    let html = session.fetch(product_url, page_timeout).await?;
    let record = extract::product_record(&html, product_url, selectors)?;
    ::log::debug!("Scraped product: {}", record.title);
    Ok(record)
}

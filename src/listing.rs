use scraper::Html;
use url::Url;

use crate::selectors::CompiledSelectors;

/// Scheme + host prefix of a category URL, used to resolve relative
/// product links. Everything from the `/collections` path segment on is
/// dropped; a URL without that segment is returned unchanged.
pub fn base_url(category_url: &str) -> &str {
    match category_url.find("/collections") {
        Some(idx) => &category_url[..idx],
        None => category_url,
    }
}

/// Collects product page URLs from a category listing, in listing order.
///
/// Hrefs already starting with `http` pass through unchanged; anything else
/// is prefixed with the category's base URL. A product listed twice is
/// returned twice. Only links present in the fetched listing view are
/// collected; content behind "load more" never reaches the page source.
pub fn product_urls(html: &str, category_url: &str, selectors: &CompiledSelectors) -> Vec<String> {
    let doc = Html::parse_document(html);
    let base = base_url(category_url);

    let mut urls = Vec::new();
    for anchor in doc.select(&selectors.listing_links) {
        let href = match anchor.value().attr("href") {
            Some(href) => href,
            None => {
                ::log::debug!("Skipping card heading anchor without href in {}", category_url);
                continue;
            }
        };

        let absolute = if href.starts_with("http") {
            href.to_string()
        } else {
            format!("{}{}", base, href)
        };

        if Url::parse(&absolute).is_err() {
            ::log::warn!(
                "Skipping unparseable product link {} in {}",
                absolute,
                category_url
            );
            continue;
        }

        urls.push(absolute);
    }

    ::log::debug!("Found {} product links in {}", urls.len(), category_url);
    urls
}

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::{HarvestError, Result};

/// CSS selectors for every field scraped from the site, keyed by field name.
///
/// The defaults target the Timber Manor storefront markup. Keeping them in
/// one config type keeps the rest of the flow selector-agnostic, so the
/// extractors can be exercised against fixture pages and the selectors can
/// be swapped from a config file when the site changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSelectors {
    /// Heading inside the product title container.
    #[serde(default = "default_title")]
    pub title: String,

    /// Regular (non-sale) price element.
    #[serde(default = "default_price")]
    pub price: String,

    /// Paragraphs inside the description container.
    #[serde(default = "default_description")]
    pub description: String,

    /// Images inside the product media container.
    #[serde(default = "default_image")]
    pub image: String,

    /// Dimensions span inside the accordion content block.
    #[serde(default = "default_dimensions")]
    pub dimensions: String,

    /// Product links inside a listing page's card headings.
    #[serde(default = "default_listing_links")]
    pub listing_links: String,
}

fn default_title() -> String {
    "div.product__title h1".to_string()
}

fn default_price() -> String {
    "span.price-item.price-item--regular".to_string()
}

fn default_description() -> String {
    "div.product__description.rte.quick-add-hidden p".to_string()
}

fn default_image() -> String {
    "div.product__media.media.media--transparent img".to_string()
}

fn default_dimensions() -> String {
    "div.accordion__content.rte p span".to_string()
}

fn default_listing_links() -> String {
    "h3.card__heading.h5 a".to_string()
}

impl Default for FieldSelectors {
    fn default() -> Self {
        Self {
            title: default_title(),
            price: default_price(),
            description: default_description(),
            image: default_image(),
            dimensions: default_dimensions(),
            listing_links: default_listing_links(),
        }
    }
}

/// Parsed form of [`FieldSelectors`], ready for matching.
#[derive(Debug, Clone)]
pub struct CompiledSelectors {
    pub title: Selector,
    pub price: Selector,
    pub description: Selector,
    pub image: Selector,
    pub dimensions: Selector,
    pub listing_links: Selector,
}

impl FieldSelectors {
    /// Compile every selector, failing with the offending field's name.
    pub fn compile(&self) -> Result<CompiledSelectors> {
        Ok(CompiledSelectors {
            title: compile_one("title", &self.title)?,
            price: compile_one("price", &self.price)?,
            description: compile_one("description", &self.description)?,
            image: compile_one("image", &self.image)?,
            dimensions: compile_one("dimensions", &self.dimensions)?,
            listing_links: compile_one("listing_links", &self.listing_links)?,
        })
    }
}

fn compile_one(field: &'static str, pattern: &str) -> Result<Selector> {
    Selector::parse(pattern).map_err(|e| HarvestError::Selector {
        field,
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

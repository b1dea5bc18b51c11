use serde::{Deserialize, Serialize};

/// Placeholder written when a product page has no description paragraphs.
pub const NO_DESCRIPTION: &str = "No description available";

/// Placeholder written when a product page has no media image.
pub const NO_IMAGE: &str = "No image available";

/// Placeholder written when the dimensions lookup fails.
pub const NO_DIMENSIONS: &str = "No dimensions available";

/// One scraped product listing row.
///
/// Field order is the CSV column order; the serde renames are the exact
/// header names written to the output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Price")]
    pub price: String,

    #[serde(rename = "Description")]
    pub description: String,

    #[serde(rename = "Image URL")]
    pub image_url: String,

    #[serde(rename = "Dimensions")]
    pub dimensions: String,

    /// The URL that was actually fetched for this record.
    #[serde(rename = "Source URL")]
    pub source_url: String,
}

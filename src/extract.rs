use scraper::{ElementRef, Html, Selector};

use crate::error::{HarvestError, Result};
use crate::records::{NO_DESCRIPTION, NO_DIMENSIONS, NO_IMAGE, ProductRecord};
use crate::selectors::CompiledSelectors;

/// Extracts the six product fields from a fetched product page.
///
/// Title and price are required: a page without them fails the whole run.
/// Description, image and dimensions degrade to their sentinels, so every
/// returned record always carries six non-empty fields.
pub fn product_record(
    html: &str,
    url: &str,
    selectors: &CompiledSelectors,
) -> Result<ProductRecord> {
    let doc = Html::parse_document(html);

    let title = required_text(&doc, &selectors.title, "title", url)?;
    let price = required_text(&doc, &selectors.price, "price", url)?;
    let description = description(&doc, selectors);
    let image_url = image_url(&doc, selectors);
    let dimensions = dimensions(&doc, selectors, url);

    Ok(ProductRecord {
        title,
        price,
        description,
        image_url,
        dimensions,
        source_url: url.to_string(),
    })
}

fn required_text(doc: &Html, selector: &Selector, field: &'static str, url: &str) -> Result<String> {
    doc.select(selector)
        .next()
        .map(trimmed_text)
        .ok_or_else(|| HarvestError::ElementNotFound {
            field,
            url: url.to_string(),
        })
}

/// Trimmed text of every description paragraph, empty fragments dropped,
/// joined with a single space.
fn description(doc: &Html, selectors: &CompiledSelectors) -> String {
    let fragments: Vec<String> = doc
        .select(&selectors.description)
        .map(trimmed_text)
        .filter(|text| !text.is_empty())
        .collect();

    if fragments.is_empty() {
        NO_DESCRIPTION.to_string()
    } else {
        fragments.join(" ")
    }
}

/// Source attribute of the first media image. An empty match set, or a
/// matched image without a `src`, yields the sentinel rather than an error.
fn image_url(doc: &Html, selectors: &CompiledSelectors) -> String {
    doc.select(&selectors.image)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(str::to_string)
        .unwrap_or_else(|| NO_IMAGE.to_string())
}

/// Untrimmed text of the accordion dimensions span. The one fault-tolerant
/// field: a failed lookup is logged against the product URL and replaced
/// with the sentinel so the run continues.
fn dimensions(doc: &Html, selectors: &CompiledSelectors, url: &str) -> String {
    match doc.select(&selectors.dimensions).next() {
        Some(span) => span.text().collect::<String>(),
        None => {
            ::log::error!("Error scraping dimensions for {}: no matching element", url);
            NO_DIMENSIONS.to_string()
        }
    }
}

fn trimmed_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selectors::FieldSelectors;

    const PRODUCT_URL: &str = "https://timbermanor.in/products/whitman-oak-bed";

    fn compiled() -> CompiledSelectors {
        FieldSelectors::default().compile().unwrap()
    }

    fn product_page() -> String {
        r#"
        <html><body>
          <div class="product__title"><h1>  Whitman Oak Bed  </h1></div>
          <span class="price-item price-item--regular"> Rs. 54,000 </span>
          <div class="product__description rte quick-add-hidden">
            <p> Solid oak. </p>
            <p>   </p>
            <p>  Hand finished.  </p>
          </div>
          <div class="product__media media media--transparent">
            <img src="//cdn.timbermanor.in/bed-front.jpg">
            <img src="//cdn.timbermanor.in/bed-side.jpg">
          </div>
          <div class="accordion__content rte"><p><span>72 x 60 x 48 in</span></p></div>
        </body></html>"#
            .to_string()
    }

    #[test]
    fn extracts_all_six_fields() {
        let record = product_record(&product_page(), PRODUCT_URL, &compiled()).unwrap();

        assert_eq!(record.title, "Whitman Oak Bed");
        assert_eq!(record.price, "Rs. 54,000");
        assert_eq!(record.description, "Solid oak. Hand finished.");
        assert_eq!(record.image_url, "//cdn.timbermanor.in/bed-front.jpg");
        assert_eq!(record.dimensions, "72 x 60 x 48 in");
        assert_eq!(record.source_url, PRODUCT_URL);
    }

    #[test]
    fn every_field_is_non_empty() {
        let record = product_record(&product_page(), PRODUCT_URL, &compiled()).unwrap();
        for field in [
            &record.title,
            &record.price,
            &record.description,
            &record.image_url,
            &record.dimensions,
            &record.source_url,
        ] {
            assert!(!field.is_empty());
        }
    }

    #[test]
    fn empty_paragraphs_are_dropped_from_the_description() {
        // Paragraph texts " Solid oak. ", "", "  Hand finished.  " must
        // join to "Solid oak. Hand finished."
        let record = product_record(&product_page(), PRODUCT_URL, &compiled()).unwrap();
        assert_eq!(record.description, "Solid oak. Hand finished.");
    }

    #[test]
    fn missing_description_uses_sentinel() {
        let html = r#"
        <html><body>
          <div class="product__title"><h1>Stool</h1></div>
          <span class="price-item price-item--regular">Rs. 2,000</span>
        </body></html>"#;
        let record = product_record(html, PRODUCT_URL, &compiled()).unwrap();
        assert_eq!(record.description, NO_DESCRIPTION);
    }

    #[test]
    fn whitespace_only_paragraphs_still_use_sentinel() {
        let html = r#"
        <html><body>
          <div class="product__title"><h1>Stool</h1></div>
          <span class="price-item price-item--regular">Rs. 2,000</span>
          <div class="product__description rte quick-add-hidden"><p>   </p></div>
        </body></html>"#;
        let record = product_record(html, PRODUCT_URL, &compiled()).unwrap();
        assert_eq!(record.description, NO_DESCRIPTION);
    }

    #[test]
    fn missing_image_uses_sentinel() {
        let html = r#"
        <html><body>
          <div class="product__title"><h1>Stool</h1></div>
          <span class="price-item price-item--regular">Rs. 2,000</span>
        </body></html>"#;
        let record = product_record(html, PRODUCT_URL, &compiled()).unwrap();
        assert_eq!(record.image_url, NO_IMAGE);
    }

    #[test]
    fn image_without_src_uses_sentinel() {
        let html = r#"
        <html><body>
          <div class="product__title"><h1>Stool</h1></div>
          <span class="price-item price-item--regular">Rs. 2,000</span>
          <div class="product__media media media--transparent"><img alt="stool"></div>
        </body></html>"#;
        let record = product_record(html, PRODUCT_URL, &compiled()).unwrap();
        assert_eq!(record.image_url, NO_IMAGE);
    }

    #[test]
    fn first_image_wins() {
        let record = product_record(&product_page(), PRODUCT_URL, &compiled()).unwrap();
        assert_eq!(record.image_url, "//cdn.timbermanor.in/bed-front.jpg");
    }

    #[test]
    fn missing_dimensions_uses_sentinel() {
        let html = r#"
        <html><body>
          <div class="product__title"><h1>Stool</h1></div>
          <span class="price-item price-item--regular">Rs. 2,000</span>
        </body></html>"#;
        let record = product_record(html, PRODUCT_URL, &compiled()).unwrap();
        assert_eq!(record.dimensions, NO_DIMENSIONS);
    }

    #[test]
    fn dimensions_text_is_not_trimmed() {
        let html = r#"
        <html><body>
          <div class="product__title"><h1>Stool</h1></div>
          <span class="price-item price-item--regular">Rs. 2,000</span>
          <div class="accordion__content rte"><p><span> 30 x 30 in </span></p></div>
        </body></html>"#;
        let record = product_record(html, PRODUCT_URL, &compiled()).unwrap();
        assert_eq!(record.dimensions, " 30 x 30 in ");
    }

    #[test]
    fn missing_title_is_fatal() {
        let html = r#"
        <html><body>
          <span class="price-item price-item--regular">Rs. 2,000</span>
        </body></html>"#;
        let err = product_record(html, PRODUCT_URL, &compiled()).unwrap_err();
        match err {
            HarvestError::ElementNotFound { field, url } => {
                assert_eq!(field, "title");
                assert_eq!(url, PRODUCT_URL);
            }
            other => panic!("expected ElementNotFound, got {other:?}"),
        }
    }

    #[test]
    fn missing_price_is_fatal() {
        let html = r#"
        <html><body>
          <div class="product__title"><h1>Stool</h1></div>
        </body></html>"#;
        let err = product_record(html, PRODUCT_URL, &compiled()).unwrap_err();
        assert!(matches!(
            err,
            HarvestError::ElementNotFound { field: "price", .. }
        ));
    }
}

//! Catalog listing and validation.

use std::path::PathBuf;

use fabu_core::Catalog;
use fabu_storefront::content::ContentStore;
use tracing::{error, info};

/// Page the storefront's "Our Story" view renders.
const REQUIRED_PAGES: &[&str] = &[fabu_core::route::OUR_STORY];

/// List every product in catalog order.
///
/// # Errors
///
/// Returns an error if the built-in catalog is inconsistent or JSON
/// serialization fails.
#[allow(clippy::print_stdout)]
pub fn list(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::fabu()?;

    if json {
        println!("{}", serde_json::to_string_pretty(catalog.products())?);
        return Ok(());
    }

    info!("{} products", catalog.len());
    for product in catalog.products() {
        info!(
            "  {:>2}  {:<28} {:<12} {:>9}",
            product.id,
            product.name,
            product.category,
            product.price.display()
        );
    }
    Ok(())
}

/// Check that the catalog builds and every required page parses.
///
/// # Errors
///
/// Returns an error describing the first failure class found.
pub fn validate(content_dir: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let catalog = Catalog::fabu()?;
    info!(
        products = catalog.len(),
        featured = catalog.featured().len(),
        "Catalog OK"
    );

    let content_dir = content_dir.unwrap_or_else(|| {
        std::env::var("STOREFRONT_CONTENT_DIR")
            .map_or_else(|_| PathBuf::from("crates/storefront/content"), PathBuf::from)
    });
    info!(path = %content_dir.display(), "Loading page content");

    let content = ContentStore::load(&content_dir)?;
    let missing = missing_pages(&content);
    if !missing.is_empty() {
        for slug in &missing {
            error!("  - missing page: {slug}");
        }
        return Err(format!("{} required pages missing", missing.len()).into());
    }

    info!(pages = content.len(), "Content OK");
    Ok(())
}

fn missing_pages(content: &ContentStore) -> Vec<&'static str> {
    REQUIRED_PAGES
        .iter()
        .copied()
        .filter(|slug| content.get_page(slug).is_none())
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_pages() {
        assert_eq!(missing_pages(&ContentStore::default()), vec!["our-story"]);

        let content =
            ContentStore::from_sources([("our-story", "---\ntitle: Story\n---\nHello")]).unwrap();
        assert!(missing_pages(&content).is_empty());
    }
}

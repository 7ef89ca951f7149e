//! Product handlers.

use anyhow::Result;
use catalog::store::actions::fetch_products;
use catalog::{CatalogClient, ImageUpload, Product, ProductDraft, Store};
use colored::Colorize;
use serde::Serialize;

use crate::output::{format_price, PlainPrint, TableRow};

/// Product information for display.
#[derive(Debug, Clone, Serialize)]
pub struct ProductInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
    pub image_url: Option<String>,
}

impl From<&Product> for ProductInfo {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name.clone(),
            description: p.description.clone(),
            price: p.price,
            quantity: p.quantity,
            image_url: p.image_url.clone(),
        }
    }
}

impl TableRow for ProductInfo {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Name", "Description", "Price", "Quantity", "Image"]
    }
    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.description.clone(),
            format_price(self.price),
            self.quantity.to_string(),
            self.image_url.clone().unwrap_or_else(|| "-".to_owned()),
        ]
    }
}

impl PlainPrint for ProductInfo {
    fn plain_print(&self) {
        println!(
            "[{}] {} {} x{}",
            self.id.cyan(),
            self.name.bold(),
            format_price(self.price).green(),
            self.quantity
        );
        if !self.description.is_empty() {
            println!("   {}", self.description.dimmed());
        }
    }
}

/// Create-or-edit discriminator for a save.
#[derive(Debug, Clone)]
pub enum SaveMode {
    /// Create from a draft.
    Create(ProductDraft),
    /// Edit an existing product.
    Edit(Product),
}

/// Read the fetch outcome from the store: the error slice on failure,
/// display rows otherwise.
pub fn collect_products(store: &Store) -> Result<Vec<ProductInfo>> {
    let state = store.state();
    if let Some(message) = state.products.error {
        anyhow::bail!("{}", message);
    }
    Ok(state.products.items.iter().map(ProductInfo::from).collect())
}

/// Fetch the product list through the store and return display rows.
pub async fn list_products(store: &Store, client: &CatalogClient) -> Result<Vec<ProductInfo>> {
    let dispatch = fetch_products(store, client).await;
    let items = collect_products(store)?;
    // a failure that never reached the store, such as a missing session
    dispatch?;
    Ok(items)
}

/// Fetch, then filter by name. The store's items are left unfiltered.
pub async fn search_products(
    store: &Store,
    client: &CatalogClient,
    term: &str,
) -> Result<Vec<ProductInfo>> {
    let dispatch = fetch_products(store, client).await;
    collect_products(store)?;
    dispatch?;

    let state = store.state();
    Ok(filter_by_name(&state.products.items, term)
        .into_iter()
        .map(ProductInfo::from)
        .collect())
}

/// Case-insensitive substring filter on product name.
pub fn filter_by_name<'a>(items: &'a [Product], term: &str) -> Vec<&'a Product> {
    let needle = term.to_lowercase();
    items
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .collect()
}

/// Submit a create or update, with an optional image.
pub async fn save_product(
    client: &CatalogClient,
    mode: SaveMode,
    image: Option<ImageUpload>,
) -> Result<()> {
    match mode {
        SaveMode::Create(draft) => client.products().create(&draft, image).await?,
        SaveMode::Edit(product) => client.products().update(&product, image).await?,
    }
    Ok(())
}

/// Interpret a confirmation answer. Only an explicit yes accepts.
pub fn parse_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::ProductId;
    use pretty_assertions::assert_eq;

    fn product(name: &str) -> Product {
        Product {
            id: ProductId::new(name),
            name: name.to_owned(),
            price: 1.0,
            quantity: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let items = vec![product("Apple"), product("Banana"), product("apricot")];

        let matched: Vec<&str> = filter_by_name(&items, "ap")
            .into_iter()
            .map(|p| p.name.as_str())
            .collect();

        assert_eq!(matched, vec!["Apple", "apricot"]);
    }

    #[test]
    fn test_filter_empty_term_matches_all() {
        let items = vec![product("Apple"), product("Banana")];
        assert_eq!(filter_by_name(&items, "").len(), 2);
    }

    #[test]
    fn test_filter_no_match() {
        let items = vec![product("Apple")];
        assert!(filter_by_name(&items, "pear").is_empty());
    }

    #[test]
    fn test_parse_confirmation() {
        assert!(parse_confirmation("y"));
        assert!(parse_confirmation("Y\n"));
        assert!(parse_confirmation("  yes "));

        assert!(!parse_confirmation("n"));
        assert!(!parse_confirmation(""));
        assert!(!parse_confirmation("\n"));
        assert!(!parse_confirmation("yep"));
    }

    #[test]
    fn test_collect_reads_error_slice() {
        let store = Store::new();
        let seq = store.begin_fetch();
        store.complete_fetch(seq, Err("not found".into()));

        let err = collect_products(&store).unwrap_err();
        assert_eq!(err.to_string(), "not found");
    }

    #[test]
    fn test_collect_returns_rows_on_success() {
        let store = Store::new();
        let seq = store.begin_fetch();
        store.complete_fetch(seq, Ok(vec![product("Apple")]));

        let rows = collect_products(&store).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Apple");
    }

    #[test]
    fn test_product_info_row() {
        let mut p = product("Apple");
        p.price = 1.5;
        p.quantity = 10;
        let info = ProductInfo::from(&p);

        assert_eq!(ProductInfo::headers().len(), info.row().len());
        assert_eq!(info.row()[1], "Apple");
        assert_eq!(info.row()[3], "$1.50");
        assert_eq!(info.row()[5], "-");
    }
}

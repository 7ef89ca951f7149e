//! Product commands.

use anyhow::{Context, Result};
use catalog::{ImageUpload, Product, ProductDraft, ProductId};
use clap::Subcommand;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::{build_authed_client, open_store};
use crate::handlers::product::{self as handlers, SaveMode};
use crate::output::{print_table, OutputFormat};

#[derive(Subcommand)]
pub enum ProductAction {
    /// List all products
    #[command(alias = "ls")]
    List,

    /// Search products by name
    Search {
        /// Search term (case-insensitive substring)
        term: String,
    },

    /// Create a product
    Create {
        /// Product name
        #[arg(short, long)]
        name: String,
        /// Description text
        #[arg(short, long, default_value = "")]
        description: String,
        /// Unit price
        #[arg(short, long)]
        price: f64,
        /// Stock quantity
        #[arg(short, long)]
        quantity: i64,
        /// Image file to upload
        #[arg(short, long)]
        image: Option<PathBuf>,
    },

    /// Update a product
    Update {
        /// Product ID
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New unit price
        #[arg(long)]
        price: Option<f64>,
        /// New stock quantity
        #[arg(long)]
        quantity: Option<i64>,
        /// Replacement image file
        #[arg(short, long)]
        image: Option<PathBuf>,
    },

    /// Delete a product
    #[command(alias = "rm")]
    Delete {
        /// Product ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn handle(action: ProductAction, format: OutputFormat, base_url: Option<&str>) -> Result<()> {
    match action {
        ProductAction::List => list_products(format, base_url).await,
        ProductAction::Search { term } => search_products(&term, format, base_url).await,
        ProductAction::Create {
            name,
            description,
            price,
            quantity,
            image,
        } => {
            let draft = ProductDraft {
                name,
                description,
                price,
                quantity,
            };
            create_product(draft, image.as_deref(), format, base_url).await
        }
        ProductAction::Update {
            id,
            name,
            description,
            price,
            quantity,
            image,
        } => {
            let edits = FieldEdits {
                name,
                description,
                price,
                quantity,
            };
            update_product(&id, edits, image.as_deref(), format, base_url).await
        }
        ProductAction::Delete { id, yes } => delete_product(&id, yes, format, base_url).await,
    }
}

/// Optional field overrides for an update.
struct FieldEdits {
    name: Option<String>,
    description: Option<String>,
    price: Option<f64>,
    quantity: Option<i64>,
}

impl FieldEdits {
    /// Apply the overrides onto the fetched product.
    fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(quantity) = self.quantity {
            product.quantity = quantity;
        }
    }
}

async fn list_products(format: OutputFormat, base_url: Option<&str>) -> Result<()> {
    let store = open_store()?;
    let client = build_authed_client(&store, base_url)?;

    let products = handlers::list_products(&store, &client).await?;
    print_table(products, format);

    Ok(())
}

async fn search_products(term: &str, format: OutputFormat, base_url: Option<&str>) -> Result<()> {
    let store = open_store()?;
    let client = build_authed_client(&store, base_url)?;

    let products = handlers::search_products(&store, &client, term).await?;
    print_table(products, format);

    Ok(())
}

async fn create_product(
    draft: ProductDraft,
    image: Option<&Path>,
    format: OutputFormat,
    base_url: Option<&str>,
) -> Result<()> {
    let store = open_store()?;
    let client = build_authed_client(&store, base_url)?;
    let upload = read_image(image)?;

    handlers::save_product(&client, SaveMode::Create(draft), upload).await?;

    // no optimistic update: render the list re-fetched after the write
    let products = handlers::list_products(&store, &client).await?;
    print_table(products, format);

    Ok(())
}

async fn update_product(
    id: &str,
    edits: FieldEdits,
    image: Option<&Path>,
    format: OutputFormat,
    base_url: Option<&str>,
) -> Result<()> {
    let store = open_store()?;
    let client = build_authed_client(&store, base_url)?;
    let upload = read_image(image)?;

    handlers::list_products(&store, &client).await?;
    let mut product = store
        .state()
        .products
        .items
        .iter()
        .find(|p| p.id.as_str() == id)
        .cloned()
        .with_context(|| format!("No product with ID {}", id))?;

    edits.apply(&mut product);
    handlers::save_product(&client, SaveMode::Edit(product), upload).await?;

    let products = handlers::list_products(&store, &client).await?;
    print_table(products, format);

    Ok(())
}

async fn delete_product(
    id: &str,
    yes: bool,
    format: OutputFormat,
    base_url: Option<&str>,
) -> Result<()> {
    if !yes && !confirm_delete()? {
        println!("Aborted");
        return Ok(());
    }

    let store = open_store()?;
    let client = build_authed_client(&store, base_url)?;

    client.products().delete(&ProductId::new(id)).await?;

    let products = handlers::list_products(&store, &client).await?;
    print_table(products, format);

    Ok(())
}

/// Prompt for destructive-action confirmation on stdin.
fn confirm_delete() -> Result<bool> {
    print!("Are you sure you want to delete this product? [y/N] ");
    std::io::stdout().flush().context("Failed to flush stdout")?;

    let mut answer = String::new();
    std::io::stdin()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;

    Ok(handlers::parse_confirmation(&answer))
}

/// Read an image file into an upload, keeping its file name.
fn read_image(path: Option<&Path>) -> Result<Option<ImageUpload>> {
    let Some(path) = path else {
        return Ok(None);
    };

    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read image {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_owned();

    Ok(Some(ImageUpload::new(file_name, bytes)))
}

//! Products API.

use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use reqwest::Method;

use crate::client::CatalogClientInner;
use crate::error::Result;
use crate::models::{ImageUpload, Product, ProductDraft, ProductId};

/// Collection endpoint for products.
const PRODUCTS_PATH: &str = "/api/products";

/// API for product operations. All operations require authentication.
pub struct ProductsApi {
    client: Arc<CatalogClientInner>,
}

impl ProductsApi {
    pub(crate) fn new(client: Arc<CatalogClientInner>) -> Self {
        Self { client }
    }

    /// Fetch the full product list.
    pub async fn list(&self) -> Result<Vec<Product>> {
        let token = self.client.bearer()?;
        self.client
            .executor()
            .get(PRODUCTS_PATH, Some(token))
            .await
    }

    /// Create a product from a draft, with an optional image.
    ///
    /// Sent as multipart: a `product` JSON field plus an `image` file field
    /// when an upload is given.
    pub async fn create(&self, draft: &ProductDraft, image: Option<ImageUpload>) -> Result<()> {
        draft.validate()?;
        let token = self.client.bearer()?;
        let form = product_form(serde_json::to_string(draft)?, image);

        self.client
            .executor()
            .send_multipart(Method::POST, PRODUCTS_PATH, form, Some(token))
            .await
    }

    /// Update an existing product, with an optional replacement image.
    pub async fn update(&self, product: &Product, image: Option<ImageUpload>) -> Result<()> {
        product.validate()?;
        let token = self.client.bearer()?;
        let path = item_path(&product.id);
        let form = product_form(serde_json::to_string(product)?, image);

        self.client
            .executor()
            .send_multipart(Method::PUT, &path, form, Some(token))
            .await
    }

    /// Delete a product by ID.
    pub async fn delete(&self, id: &ProductId) -> Result<()> {
        let token = self.client.bearer()?;
        self.client
            .executor()
            .delete(&item_path(id), Some(token))
            .await
    }
}

/// Item endpoint for a product.
fn item_path(id: &ProductId) -> String {
    format!("{}/{}", PRODUCTS_PATH, id)
}

/// Build the multipart body shared by create and update.
fn product_form(product_json: String, image: Option<ImageUpload>) -> Form {
    let mut form = Form::new().text("product", product_json);
    if let Some(upload) = image {
        form = form.part("image", Part::bytes(upload.bytes).file_name(upload.file_name));
    }
    form
}

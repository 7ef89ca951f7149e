//! Data models.

mod product;
mod session;

pub use product::{ImageUpload, Product, ProductDraft, ProductId};
pub use session::AuthState;

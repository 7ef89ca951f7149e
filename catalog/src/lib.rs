//! Rust client library for the product catalog admin backend.

pub mod api;
pub mod client;
pub mod error;
pub mod models;
pub mod store;

// Re-export main types
pub use client::{CatalogClient, CatalogClientBuilder, HttpConfig, Session, DEFAULT_BASE_URL};
pub use error::{Error, Result};

// Re-export commonly used models
pub use models::{AuthState, ImageUpload, Product, ProductDraft, ProductId};

// Re-export the store
pub use store::{FileStorage, MemoryStorage, StateStorage, Store, AUTH_STATE_KEY};

// Re-export API types
pub use api::{AuthApi, LoginRequest, LoginResponse, ProductsApi};

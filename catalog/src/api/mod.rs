//! API modules.

mod auth;
mod products;

pub use auth::{AuthApi, LoginRequest, LoginResponse};
pub use products::ProductsApi;

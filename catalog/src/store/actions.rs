//! Async actions against the store.

use crate::client::CatalogClient;
use crate::error::{Error, Result};
use crate::store::Store;

/// Fetch the product list and record the outcome in the store.
///
/// The client carries the session, so the token is an explicit dependency
/// rather than a read from global state. The pending transition always
/// precedes exactly one terminal transition; a terminal transition that lost
/// to a later fetch is discarded by the store.
pub async fn fetch_products(store: &Store, client: &CatalogClient) -> Result<()> {
    if !client.is_authenticated() {
        return Err(Error::AuthRequired);
    }

    let seq = store.begin_fetch();

    match client.products().list().await {
        Ok(items) => {
            log::debug!("fetched {} products", items.len());
            store.complete_fetch(seq, Ok(items));
            Ok(())
        }
        Err(err) => {
            store.complete_fetch(seq, Err(err.message()));
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unauthenticated_dispatch_fails_before_transition() {
        let store = Store::new();
        let client = CatalogClient::builder().build().unwrap();

        let err = fetch_products(&store, &client).await.unwrap_err();
        assert!(err.is_auth_error());

        // no pending transition was recorded
        let state = store.state();
        assert!(!state.products.loading);
        assert_eq!(state.products.error, None);
    }
}

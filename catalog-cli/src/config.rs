//! Persisted state and client construction for the catalog CLI.

use anyhow::{Context, Result};
use catalog::{CatalogClient, FileStorage, Store, AUTH_STATE_KEY};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

/// Directory holding persisted CLI state.
pub fn state_dir() -> Result<PathBuf> {
    let exe_path = env::current_exe().context("Could not determine executable path")?;
    let exe_dir = exe_path
        .parent()
        .context("Could not determine executable directory")?;

    Ok(exe_dir.to_path_buf())
}

/// Path of the persisted auth state file.
pub fn state_path() -> Result<PathBuf> {
    Ok(FileStorage::new(state_dir()?).path(AUTH_STATE_KEY))
}

/// Open the state store backed by the persisted state file.
pub fn open_store() -> Result<Store> {
    Ok(Store::with_storage(Arc::new(FileStorage::new(state_dir()?))))
}

/// Build a catalog client from the store's session, if any.
pub fn build_client(store: &Store, base_url: Option<&str>) -> Result<CatalogClient> {
    let mut builder = CatalogClient::builder();

    if let Some(url) = base_url {
        builder = builder.base_url(url);
    }
    if let Some(session) = store.state().auth.to_session() {
        builder = builder.with_session(session);
    }

    builder.build().context("Failed to build catalog client")
}

/// Build a catalog client that requires authentication.
pub fn build_authed_client(store: &Store, base_url: Option<&str>) -> Result<CatalogClient> {
    let session = store
        .state()
        .auth
        .to_session()
        .context("Authentication required. Run 'catalog auth login' first.")?;

    let mut builder = CatalogClient::builder().with_session(session);
    if let Some(url) = base_url {
        builder = builder.base_url(url);
    }

    builder.build().context("Failed to build catalog client")
}

//! Application state store.
//!
//! Single source of truth for the session's auth data and the product list.
//! All transitions are serialized through one lock; after every transition
//! the auth slice is written back to persistent storage and subscribers are
//! notified with a snapshot.

pub mod actions;
mod persist;

pub use persist::{FileStorage, MemoryStorage, StateStorage, AUTH_STATE_KEY};

use crate::client::Session;
use crate::models::{AuthState, Product};
use std::sync::{Arc, RwLock};

/// The products slice of application state.
#[derive(Debug, Clone, Default)]
pub struct ProductsState {
    /// Last fetched product list.
    pub items: Vec<Product>,
    /// A fetch is in flight.
    pub loading: bool,
    /// Message from the last failed fetch.
    pub error: Option<String>,
    /// Sequence number of the most recently started fetch.
    fetch_seq: u64,
}

/// Full application state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Auth slice, persisted across runs.
    pub auth: AuthState,
    /// Products slice, transient.
    pub products: ProductsState,
}

type Subscriber = Box<dyn Fn(&AppState) + Send + Sync>;

/// State store with persistence and change notification.
pub struct Store {
    state: RwLock<AppState>,
    subscribers: RwLock<Vec<Subscriber>>,
    storage: Option<Arc<dyn StateStorage>>,
}

impl Store {
    /// Create a store with default state and no persistence.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(AppState::default()),
            subscribers: RwLock::new(Vec::new()),
            storage: None,
        }
    }

    /// Create a store seeded from persistent storage.
    ///
    /// The auth slice is read from the `authState` key; absent or malformed
    /// data falls back to defaults.
    pub fn with_storage(storage: Arc<dyn StateStorage>) -> Self {
        let auth = storage
            .load(AUTH_STATE_KEY)
            .map(|raw| AuthState::from_persisted(&raw))
            .unwrap_or_default();

        Self {
            state: RwLock::new(AppState {
                auth,
                products: ProductsState::default(),
            }),
            subscribers: RwLock::new(Vec::new()),
            storage: Some(storage),
        }
    }

    /// Get a snapshot of the current state.
    pub fn state(&self) -> AppState {
        self.state.read().expect("state lock poisoned").clone()
    }

    /// Register a callback invoked after every state transition.
    pub fn subscribe(&self, f: impl Fn(&AppState) + Send + Sync + 'static) {
        self.subscribers
            .write()
            .expect("subscriber lock poisoned")
            .push(Box::new(f));
    }

    /// Apply a transition, then persist the auth slice and notify
    /// subscribers. The write-back runs on every transition, whether or not
    /// the auth slice changed.
    fn update<T>(&self, f: impl FnOnce(&mut AppState) -> T) -> T {
        let (out, snapshot) = {
            let mut state = self.state.write().expect("state lock poisoned");
            let out = f(&mut state);
            (out, state.clone())
        };

        if let Some(storage) = &self.storage {
            match serde_json::to_string(&snapshot.auth) {
                Ok(serialized) => {
                    if let Err(err) = storage.store(AUTH_STATE_KEY, &serialized) {
                        log::warn!("failed to persist auth state: {}", err);
                    }
                }
                Err(err) => log::warn!("failed to serialize auth state: {}", err),
            }
        }

        for subscriber in self
            .subscribers
            .read()
            .expect("subscriber lock poisoned")
            .iter()
        {
            subscriber(&snapshot);
        }

        out
    }

    /// Replace the auth slice wholesale with a logged-in session.
    pub fn login(&self, session: &Session) {
        let auth = AuthState::from(session);
        self.update(|state| state.auth = auth);
    }

    /// Replace the auth slice wholesale with defaults.
    pub fn logout(&self) {
        self.update(|state| state.auth = AuthState::default());
    }

    /// Start a fetch: set loading, clear the previous error, and hand out a
    /// sequence number identifying this request.
    pub fn begin_fetch(&self) -> u64 {
        self.update(|state| {
            state.products.loading = true;
            state.products.error = None;
            state.products.fetch_seq += 1;
            state.products.fetch_seq
        })
    }

    /// Finish a fetch with its terminal outcome.
    ///
    /// A result whose sequence number is stale (another fetch began since)
    /// is discarded, so overlapping requests resolve last-write-wins by
    /// request order rather than by response arrival.
    pub fn complete_fetch(&self, seq: u64, outcome: Result<Vec<Product>, String>) {
        self.update(|state| {
            if seq != state.products.fetch_seq {
                log::debug!("discarding stale fetch result (seq {})", seq);
                return;
            }
            state.products.loading = false;
            match outcome {
                Ok(items) => {
                    state.products.items = items;
                    state.products.error = None;
                }
                Err(message) => state.products.error = Some(message),
            }
        });
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();
        f.debug_struct("Store")
            .field("authenticated", &state.auth.is_authenticated())
            .field("products", &state.products.items.len())
            .field("loading", &state.products.loading)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductId;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn product(name: &str) -> Product {
        Product {
            id: ProductId::new(name),
            name: name.to_owned(),
            price: 1.0,
            quantity: 1,
            ..Default::default()
        }
    }

    fn names(state: &AppState) -> Vec<&str> {
        state
            .products
            .items
            .iter()
            .map(|p| p.name.as_str())
            .collect()
    }

    #[test]
    fn test_seeds_from_storage() {
        let storage = Arc::new(MemoryStorage::with_entry(
            AUTH_STATE_KEY,
            r#"{"auth":{"token":"t1","id":"u1","username":"admin","roles":[]}}"#,
        ));
        let store = Store::with_storage(storage);

        assert_eq!(store.state().auth.token.as_deref(), Some("t1"));
    }

    #[test]
    fn test_seeds_defaults_on_malformed_storage() {
        let storage = Arc::new(MemoryStorage::with_entry(AUTH_STATE_KEY, "{oops"));
        let store = Store::with_storage(storage);

        assert_eq!(store.state().auth, AuthState::default());
    }

    #[test]
    fn test_every_transition_writes_back_once() {
        let storage = Arc::new(MemoryStorage::new());
        let store = Store::with_storage(storage.clone());

        store.login(&Session::new("t1", "u1"));
        assert_eq!(storage.write_count(), 1);

        // product-only transitions still write the auth slice back
        let seq = store.begin_fetch();
        assert_eq!(storage.write_count(), 2);
        store.complete_fetch(seq, Ok(vec![product("Apple")]));
        assert_eq!(storage.write_count(), 3);

        let persisted = storage.load(AUTH_STATE_KEY).unwrap();
        assert_eq!(AuthState::from_persisted(&persisted).token.as_deref(), Some("t1"));
    }

    #[test]
    fn test_subscribers_see_every_transition() {
        let store = Store::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        store.subscribe(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        store.login(&Session::new("t", "u"));
        store.logout();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_fetch_lifecycle() {
        let store = Store::new();

        let seq = store.begin_fetch();
        let state = store.state();
        assert!(state.products.loading);
        assert_eq!(state.products.error, None);

        store.complete_fetch(seq, Ok(vec![product("Apple")]));
        let state = store.state();
        assert!(!state.products.loading);
        assert_eq!(names(&state), vec!["Apple"]);
    }

    #[test]
    fn test_fetch_failure_sets_error() {
        let store = Store::new();

        let seq = store.begin_fetch();
        store.complete_fetch(seq, Err("not found".into()));

        let state = store.state();
        assert!(!state.products.loading);
        assert_eq!(state.products.error.as_deref(), Some("not found"));
    }

    #[test]
    fn test_stale_fetch_result_is_discarded() {
        let store = Store::new();

        let first = store.begin_fetch();
        let second = store.begin_fetch();

        // second resolves first, then the slow first response arrives
        store.complete_fetch(second, Ok(vec![product("Banana")]));
        store.complete_fetch(first, Ok(vec![product("Apple")]));

        let state = store.state();
        assert_eq!(names(&state), vec!["Banana"]);
        assert!(!state.products.loading);
    }

    #[test]
    fn test_stale_failure_does_not_clobber_result() {
        let store = Store::new();

        let first = store.begin_fetch();
        let second = store.begin_fetch();

        store.complete_fetch(second, Ok(vec![product("Banana")]));
        store.complete_fetch(first, Err("timed out".into()));

        let state = store.state();
        assert_eq!(names(&state), vec!["Banana"]);
        assert_eq!(state.products.error, None);
    }

    #[test]
    fn test_begin_fetch_clears_previous_error() {
        let store = Store::new();

        let seq = store.begin_fetch();
        store.complete_fetch(seq, Err("boom".into()));
        store.begin_fetch();

        assert_eq!(store.state().products.error, None);
    }
}

//! Session context for the browser build. The provider owns the one
//! `SessionStore`, rehydrates it from `localStorage` before the first render,
//! and mirrors every transition into a signal so guards and the sidebar
//! re-evaluate on login, logout, and forced logout after a 401.

use crate::app_lib::{
    AppError,
    api::ApiClient,
    config::AppConfig,
    storage::{BrowserStorage, MemoryStorage, SessionStorage},
};
use crate::features::auth::{
    session::{SessionState, SessionStore},
    types::Session,
};
use crate::hooks::bindings::mirror;
use leptos::prelude::*;
use std::sync::Arc;

#[derive(Clone)]
/// Session context shared through Leptos.
pub struct SessionContext {
    pub store: SessionStore,
    pub state: RwSignal<SessionState>,
    api: StoredValue<Option<ApiClient>, LocalStorage>,
}

impl SessionContext {
    pub fn is_authenticated(&self) -> bool {
        self.state.with(SessionState::is_authenticated)
    }

    pub fn session(&self) -> Option<Session> {
        self.state.with(|state| state.session().cloned())
    }

    /// Fails only when the HTTP client could not be built at start-up.
    ///
    /// # Errors
    /// Returns `AppError::Config` when no client is available.
    pub fn api(&self) -> Result<ApiClient, AppError> {
        self.api
            .try_get_value()
            .flatten()
            .ok_or_else(|| AppError::Config("API client is not available.".to_string()))
    }
}

fn storage() -> Arc<dyn SessionStorage> {
    if BrowserStorage::is_available() {
        Arc::new(BrowserStorage)
    } else {
        tracing::warn!("localStorage unavailable; session will not survive reloads");
        Arc::new(MemoryStorage::new())
    }
}

/// Provides the session context. Rehydration happens synchronously so the
/// first guard evaluation already sees a restored session.
#[component]
pub fn SessionProvider(config: AppConfig, children: Children) -> impl IntoView {
    let store = SessionStore::new(storage(), &config.storage_prefix);
    store.rehydrate();

    let api = match ApiClient::new(&config, store.clone()) {
        Ok(api) => Some(api),
        Err(err) => {
            tracing::error!(%err, "failed to build API client");
            None
        }
    };

    let state = RwSignal::new(store.snapshot());
    mirror(store.subscribe(), state);

    let api = StoredValue::new_local(api);
    provide_context(SessionContext { store, state, api });

    view! { {children()} }
}

/// Returns the session context or an unauthenticated fallback.
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().unwrap_or_else(|| SessionContext {
        store: SessionStore::new(Arc::new(MemoryStorage::new()), "fallback"),
        state: RwSignal::new(SessionState::Unauthenticated),
        api: StoredValue::new_local(None),
    })
}

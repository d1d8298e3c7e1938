use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    routing::{get, post},
    Router,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::AppError;
use crate::openlibrary::OpenLibraryClient;
use crate::search::SearchSessions;
use crate::store::Store;

pub mod books;
pub mod catalog;
pub mod dashboard;
pub mod quotes;
pub mod search;
pub mod status;

pub struct AppState {
    pub store: Arc<dyn Store>,
    pub catalog: OpenLibraryClient,
    pub sessions: SearchSessions,
}

/// the authenticated caller. the session provider in front of us asserts
/// it and hands it over in a header; every store call scopes to it
/// explicitly, never through ambient state.
pub struct Identity(pub String);

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| Identity(value.to_string()))
            .ok_or(AppError::Unauthorized)
    }
}

/// decode store rows into the expected shape, dropping rows that do not
/// fit rather than failing the whole read.
pub(crate) fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>) -> Vec<T> {
    rows.into_iter()
        .filter_map(|row| {
            serde_json::from_value(row)
                .inspect_err(
                    |e| tracing::warn!(err = ?e, "dropping a stored row that failed to decode"),
                )
                .ok()
        })
        .collect()
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(status::health))
        .route("/books", get(books::list_books).post(books::add_book))
        .route("/quotes", post(quotes::add_quote))
        .route("/quotes/search", get(search::search_quotes))
        .route("/tags", get(search::list_tags))
        .route("/tags/suggest", post(quotes::suggest))
        .route("/dashboard", get(dashboard::dashboard))
        .route("/catalog/search", get(catalog::search_catalog))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod testutil {
    use std::sync::Arc;

    use axum::extract::State;

    use super::AppState;
    use crate::openlibrary::OpenLibraryClient;
    use crate::search::SearchSessions;
    use crate::store::mem::MemStore;
    use crate::store::Store;

    /// build handler state over an in-memory store, keeping a handle to
    /// the store for assertions.
    pub fn state_with(store: MemStore) -> (Arc<MemStore>, State<Arc<AppState>>) {
        let store = Arc::new(store);
        let dyn_store: Arc<dyn Store> = store.clone();

        let state = Arc::new(AppState {
            store: dyn_store,
            catalog: OpenLibraryClient::new(reqwest::Client::new()),
            sessions: SearchSessions::default(),
        });

        (store, State(state))
    }
}

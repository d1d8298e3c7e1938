use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::models::openlibrary::BookCandidate;
use crate::routes::{AppState, Identity};

#[derive(Debug, Deserialize)]
pub struct CatalogParams {
    pub title: String,
}

/// the add-book lookup passthrough: up to five candidates for a title.
/// a failed lookup is not an error, just zero candidates.
#[tracing::instrument(skip_all)]
pub async fn search_catalog(
    state: State<Arc<AppState>>,
    _identity: Identity,
    params: Query<CatalogParams>,
) -> Json<Vec<BookCandidate>> {
    let Query(params) = params;
    let title = params.title.trim();

    if title.is_empty() {
        return Json(Vec::new());
    }

    match state.catalog.search(title).await {
        Ok(candidates) => Json(candidates),
        Err(e) => {
            tracing::error!(err = ?e, "an error occurred when querying the book catalog");
            Json(Vec::new())
        }
    }
}

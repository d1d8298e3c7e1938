use std::collections::BTreeSet;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::models::quote::{QuoteWithBook, TagsRow, QUOTE_WITH_BOOK_COLUMNS};
use crate::routes::{decode_rows, AppState, Identity};
use crate::search::{build_filters, result_order, QuoteFilters};
use crate::store::{Filter, SelectQuery};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub text: Option<String>,
    pub book: Option<String>,
    pub tag: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub quotes: Vec<QuoteWithBook>,
    /// the generation this search ran under. a response marked stale was
    /// superseded by a newer search and carries no rows.
    pub generation: u64,
    pub stale: bool,
}

/// the search flow: one round trip for the full, unpaginated result set,
/// newest first. a failed read degrades to an empty result set.
#[tracing::instrument(skip_all)]
pub async fn search_quotes(
    state: State<Arc<AppState>>,
    identity: Identity,
    params: Query<SearchParams>,
) -> Json<SearchResponse> {
    let Identity(user_id) = identity;
    let Query(params) = params;

    let filters = QuoteFilters::new(params.text, params.book, params.tag);
    let generation = state.sessions.begin(&user_id);

    let query = SelectQuery::new(QUOTE_WITH_BOOK_COLUMNS)
        .filters(build_filters(&user_id, &filters))
        .order(result_order());

    let rows = match state.store.select("quotes", &query).await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(err = ?e, "an error occurred when searching quotes");
            Vec::new()
        }
    };

    if !state.sessions.is_current(&user_id, generation) {
        tracing::debug!(generation, "discarding a stale search completion.");

        return Json(SearchResponse {
            quotes: Vec::new(),
            generation,
            stale: true,
        });
    }

    Json(SearchResponse {
        quotes: decode_rows(rows),
        generation,
        stale: false,
    })
}

/// the derived tag list: union of the caller's quote tags, deduplicated
/// and sorted. tags are never stored as their own entity.
#[tracing::instrument(skip_all)]
pub async fn list_tags(state: State<Arc<AppState>>, identity: Identity) -> Json<Vec<String>> {
    let Identity(user_id) = identity;

    let query = SelectQuery::new("tags").filters(vec![Filter::eq("user_id", user_id)]);

    let rows = match state.store.select("quotes", &query).await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(err = ?e, "an error occurred when fetching tags");
            Vec::new()
        }
    };

    let tags: BTreeSet<String> = decode_rows::<TagsRow>(rows)
        .into_iter()
        .flat_map(|row| row.tags.unwrap_or_default())
        .collect();

    Json(tags.into_iter().collect())
}

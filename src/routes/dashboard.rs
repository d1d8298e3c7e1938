use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::constants::{DASHBOARD_RECENT_BOOKS, DASHBOARD_RECENT_QUOTES};
use crate::models::book::Book;
use crate::models::quote::{QuoteWithBook, QUOTE_WITH_BOOK_COLUMNS};
use crate::routes::{decode_rows, AppState, Identity};
use crate::store::{Filter, Order, SelectQuery};

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub books: Vec<Book>,
    pub recent_quotes: Vec<QuoteWithBook>,
}

/// the dashboard view: the most recent books and quotes. each panel
/// degrades to empty on its own when a read fails.
#[tracing::instrument(skip_all)]
pub async fn dashboard(state: State<Arc<AppState>>, identity: Identity) -> Json<DashboardResponse> {
    let Identity(user_id) = identity;

    let books_query = SelectQuery::new("*")
        .filters(vec![Filter::eq("user_id", user_id.clone())])
        .order(Order::desc("created_at"))
        .limit(DASHBOARD_RECENT_BOOKS);

    let books = match state.store.select("books", &books_query).await {
        Ok(rows) => decode_rows(rows),
        Err(e) => {
            tracing::error!(err = ?e, "an error occurred when fetching recent books");
            Vec::new()
        }
    };

    let quotes_query = SelectQuery::new(QUOTE_WITH_BOOK_COLUMNS)
        .filters(vec![Filter::eq("user_id", user_id)])
        .order(Order::desc("created_at"))
        .limit(DASHBOARD_RECENT_QUOTES);

    let recent_quotes = match state.store.select("quotes", &quotes_query).await {
        Ok(rows) => decode_rows(rows),
        Err(e) => {
            tracing::error!(err = ?e, "an error occurred when fetching recent quotes");
            Vec::new()
        }
    };

    Json(DashboardResponse {
        books,
        recent_quotes,
    })
}

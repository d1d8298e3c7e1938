use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::error::AppError;
use crate::models::book::{BookChoice, NewBook};
use crate::routes::{decode_rows, AppState, Identity};
use crate::store::{Filter, Order, SelectQuery};

#[derive(Debug, Deserialize)]
pub struct AddBookRequest {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub cover_url: Option<String>,
}

/// the add-book flow. a failed write surfaces its message text inline;
/// the client keeps its form data and may resubmit.
#[tracing::instrument(skip_all)]
pub async fn add_book(
    state: State<Arc<AppState>>,
    identity: Identity,
    req: Json<AddBookRequest>,
) -> Result<StatusCode, AppError> {
    let Identity(user_id) = identity;
    let Json(req) = req;

    let title = req.title.trim();
    let author = req.author.trim();

    if title.is_empty() || author.is_empty() {
        return Err(AppError::MalformedPayload);
    }

    let cover_url = req
        .cover_url
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty());

    let record = NewBook {
        id: uuid::Uuid::new_v4().to_string(),
        title: title.to_string(),
        author: author.to_string(),
        cover_url,
        user_id,
    };

    state
        .store
        .insert(
            "books",
            serde_json::to_value(&record).map_err(anyhow::Error::from)?,
        )
        .await
        .map_err(|e| AppError::StoreWrite(e.to_string()))?;

    tracing::info!(book_id = %record.id, "added a book.");

    Ok(StatusCode::CREATED)
}

/// the caller's books, ordered by title, for the book picker and the
/// search filter dropdown. a failed read degrades to an empty list.
#[tracing::instrument(skip_all)]
pub async fn list_books(state: State<Arc<AppState>>, identity: Identity) -> Json<Vec<BookChoice>> {
    let Identity(user_id) = identity;

    let query = SelectQuery::new("id,title,author")
        .filters(vec![Filter::eq("user_id", user_id)])
        .order(Order::asc("title"));

    let rows = match state.store.select("books", &query).await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(err = ?e, "an error occurred when fetching books");
            Vec::new()
        }
    };

    Json(decode_rows(rows))
}

#[cfg(test)]
mod tests {
    use axum::Json;
    use serde_json::json;

    use super::*;
    use crate::routes::testutil::state_with;
    use crate::store::mem::MemStore;

    #[tokio::test]
    async fn add_book_inserts_an_owned_trimmed_record() {
        let (store, state) = state_with(MemStore::new());

        let status = add_book(
            state,
            Identity("u1".to_string()),
            Json(AddBookRequest {
                title: "  Dune ".to_string(),
                author: " Frank Herbert ".to_string(),
                cover_url: Some("https://covers.openlibrary.org/b/id/12345-M.jpg".to_string()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);

        let rows = store.dump("books");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["title"], "Dune");
        assert_eq!(rows[0]["author"], "Frank Herbert");
        assert_eq!(rows[0]["user_id"], "u1");
        assert_eq!(
            rows[0]["cover_url"],
            "https://covers.openlibrary.org/b/id/12345-M.jpg"
        );
        assert!(rows[0]["id"].as_str().is_some_and(|id| !id.is_empty()));
    }

    #[tokio::test]
    async fn blank_cover_url_stores_null() {
        let (store, state) = state_with(MemStore::new());

        add_book(
            state,
            Identity("u1".to_string()),
            Json(AddBookRequest {
                title: "Dune".to_string(),
                author: "Frank Herbert".to_string(),
                cover_url: Some("   ".to_string()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(store.dump("books")[0]["cover_url"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn empty_title_or_author_is_malformed() {
        let (_, state) = state_with(MemStore::new());

        let err = add_book(
            state,
            Identity("u1".to_string()),
            Json(AddBookRequest {
                title: "  ".to_string(),
                author: "Frank Herbert".to_string(),
                cover_url: None,
            }),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::MalformedPayload));
    }

    #[tokio::test]
    async fn write_failures_surface_their_message_inline() {
        let (_, state) = state_with(MemStore::failing_writes("row violates security policy"));

        let err = add_book(
            state,
            Identity("u1".to_string()),
            Json(AddBookRequest {
                title: "Dune".to_string(),
                author: "Frank Herbert".to_string(),
                cover_url: None,
            }),
        )
        .await
        .unwrap_err();

        match err {
            AppError::StoreWrite(message) => {
                assert_eq!(message, "row violates security policy")
            }
            other => panic!("expected a store write error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn list_books_is_owner_scoped_and_title_ordered() {
        let (store, state) = state_with(MemStore::new());

        store.seed(
            "books",
            vec![
                json!({"id": "b2", "title": "Zen", "author": "A", "user_id": "u1"}),
                json!({"id": "b1", "title": "Autumn", "author": "B", "user_id": "u1"}),
                json!({"id": "b3", "title": "Borrowed", "author": "C", "user_id": "u2"}),
            ],
        );

        let Json(books) = list_books(state, Identity("u1".to_string())).await;

        let ids: Vec<_> = books.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["b1", "b2"]);
    }

    #[tokio::test]
    async fn read_failures_degrade_to_an_empty_list() {
        let (_, state) = state_with(MemStore::failing_reads());

        let Json(books) = list_books(state, Identity("u1".to_string())).await;

        assert!(books.is_empty());
    }
}

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::quote::NewQuote;
use crate::routes::{AppState, Identity};
use crate::tags;

#[derive(Debug, Deserialize)]
pub struct AddQuoteRequest {
    pub book_id: String,
    pub text: String,
    /// the raw comma-separated tag string as typed, suggestion or not.
    #[serde(default)]
    pub tags: Option<String>,
}

/// the add-quote flow. the book picker only ever offers the caller's own
/// books, which is what keeps `book_id` honest.
#[tracing::instrument(skip_all)]
pub async fn add_quote(
    state: State<Arc<AppState>>,
    identity: Identity,
    req: Json<AddQuoteRequest>,
) -> Result<StatusCode, AppError> {
    let Identity(user_id) = identity;
    let Json(req) = req;

    let text = req.text.trim();
    let book_id = req.book_id.trim();

    if text.is_empty() || book_id.is_empty() {
        return Err(AppError::MalformedPayload);
    }

    let parsed = tags::parse_tags(req.tags.as_deref().unwrap_or(""));
    let tags = if parsed.is_empty() { None } else { Some(parsed) };

    let record = NewQuote {
        id: uuid::Uuid::new_v4().to_string(),
        book_id: book_id.to_string(),
        text: text.to_string(),
        tags,
        user_id,
    };

    state
        .store
        .insert(
            "quotes",
            serde_json::to_value(&record).map_err(anyhow::Error::from)?,
        )
        .await
        .map_err(|e| AppError::StoreWrite(e.to_string()))?;

    tracing::info!(quote_id = %record.id, book_id = %record.book_id, "added a quote.");

    Ok(StatusCode::CREATED)
}

#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct TagSuggestions {
    pub tags: Vec<String>,
    pub display: String,
}

/// tag suggestion over the quote text. an empty list is the caller's cue
/// to leave whatever tags the user already typed untouched.
#[tracing::instrument(skip_all)]
pub async fn suggest(req: Json<SuggestRequest>) -> Json<TagSuggestions> {
    let Json(req) = req;

    let tags = tags::suggest_tags(&req.text);
    let display = tags.join(", ");

    Json(TagSuggestions { tags, display })
}

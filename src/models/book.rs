use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// a stored book row.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub cover_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// the slim projection backing the book picker and the search filter
/// dropdown.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct BookChoice {
    pub id: String,
    pub title: String,
    pub author: String,
}

/// an insert payload. the id is generated client-side; `created_at` is
/// left to the store's default.
#[derive(Clone, Debug, Serialize)]
pub struct NewBook {
    pub id: String,
    pub title: String,
    pub author: String,
    pub cover_url: Option<String>,
    pub user_id: String,
}

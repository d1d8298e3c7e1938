use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// the projection used everywhere quotes are read back: quote fields plus
/// the owning book, joined by the store.
pub const QUOTE_WITH_BOOK_COLUMNS: &str = "id,text,tags,created_at,books(id,title,author,cover_url)";

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct QuoteWithBook {
    pub id: String,
    pub text: String,
    pub tags: Option<Vec<String>>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub books: QuoteBook,
}

/// the embedded book on a joined quote row.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct QuoteBook {
    pub id: String,
    pub title: String,
    pub author: String,
    pub cover_url: Option<String>,
}

/// an insert payload. a missing tag list stores null, never an empty
/// array.
#[derive(Clone, Debug, Serialize)]
pub struct NewQuote {
    pub id: String,
    pub book_id: String,
    pub text: String,
    pub tags: Option<Vec<String>>,
    pub user_id: String,
}

/// the tags-only projection the derived tag list is built from.
#[derive(Clone, Debug, Deserialize)]
pub struct TagsRow {
    pub tags: Option<Vec<String>>,
}

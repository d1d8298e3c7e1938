use serde::{Deserialize, Serialize};

use crate::openlibrary::{cover_url, CoverSize};

#[derive(Debug, Deserialize)]
pub struct OpenLibrarySearchResponse {
    #[serde(default)]
    pub docs: Vec<OpenLibraryDoc>,
}

#[derive(Debug, Deserialize)]
pub struct OpenLibraryDoc {
    pub title: String,
    pub author_name: Option<Vec<String>>,
    pub cover_i: Option<i64>,
    pub isbn: Option<Vec<String>>,
}

/// a provisional, unsaved candidate from the catalog lookup. carries both
/// cover urls: the small one for the pick list, the medium one to persist
/// on the book once selected.
#[derive(Debug, Serialize)]
pub struct BookCandidate {
    pub title: String,
    pub author: Option<String>,
    pub cover_id: Option<i64>,
    pub cover_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub isbns: Vec<String>,
}

impl From<OpenLibraryDoc> for BookCandidate {
    fn from(doc: OpenLibraryDoc) -> Self {
        BookCandidate {
            title: doc.title,
            author: doc
                .author_name
                .and_then(|authors| authors.into_iter().next()),
            cover_id: doc.cover_i,
            cover_url: doc.cover_i.map(|id| cover_url(id, CoverSize::Medium)),
            thumbnail_url: doc.cover_i.map(|id| cover_url(id, CoverSize::Small)),
            isbns: doc.isbn.unwrap_or_default(),
        }
    }
}

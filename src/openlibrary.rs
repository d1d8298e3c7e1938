use crate::constants::{CATALOG_RESULT_LIMIT, OPENLIBRARY_API_BASE, OPENLIBRARY_COVERS_BASE};
use crate::models::openlibrary::{BookCandidate, OpenLibrarySearchResponse};

#[derive(Clone, Copy, Debug)]
pub enum CoverSize {
    Small,
    Medium,
}

impl CoverSize {
    fn letter(self) -> &'static str {
        match self {
            CoverSize::Small => "S",
            CoverSize::Medium => "M",
        }
    }
}

/// format a cover identifier into the covers host's fixed url template.
pub fn cover_url(cover_id: i64, size: CoverSize) -> String {
    format!(
        "{}/b/id/{}-{}.jpg",
        OPENLIBRARY_COVERS_BASE,
        cover_id,
        size.letter()
    )
}

/// passthrough client for the open library search api. no retries, no
/// caching; a failed lookup is the caller's cue to show zero candidates.
#[derive(Clone)]
pub struct OpenLibraryClient {
    client: reqwest::Client,
    base_url: String,
}

impl OpenLibraryClient {
    pub fn new(client: reqwest::Client) -> Self {
        OpenLibraryClient {
            client,
            base_url: OPENLIBRARY_API_BASE.to_string(),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn search(&self, title: &str) -> anyhow::Result<Vec<BookCandidate>> {
        let resp = self
            .client
            .get(format!(
                "{}/search.json?title={}&limit={}",
                self.base_url,
                urlencoding::encode(title),
                CATALOG_RESULT_LIMIT
            ))
            .send()
            .await
            .inspect_err(
                |e| tracing::error!(err = ?e, "an error occurred when querying open library"),
            )?;

        let resp: OpenLibrarySearchResponse = resp.json().await.inspect_err(
            |e| tracing::error!(err = ?e, "an error occurred when decoding open library response"),
        )?;

        Ok(resp
            .docs
            .into_iter()
            .take(CATALOG_RESULT_LIMIT)
            .map(BookCandidate::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::openlibrary::OpenLibraryDoc;

    #[test]
    fn cover_urls_follow_the_fixed_template() {
        assert_eq!(
            cover_url(12345, CoverSize::Medium),
            "https://covers.openlibrary.org/b/id/12345-M.jpg"
        );
        assert_eq!(
            cover_url(12345, CoverSize::Small),
            "https://covers.openlibrary.org/b/id/12345-S.jpg"
        );
    }

    #[test]
    fn candidates_take_the_first_author_and_derive_covers() {
        let doc = OpenLibraryDoc {
            title: "Dune".to_string(),
            author_name: Some(vec![
                "Frank Herbert".to_string(),
                "Someone Else".to_string(),
            ]),
            cover_i: Some(12345),
            isbn: Some(vec!["9780441172719".to_string()]),
        };

        let candidate = BookCandidate::from(doc);

        assert_eq!(candidate.title, "Dune");
        assert_eq!(candidate.author.as_deref(), Some("Frank Herbert"));
        assert_eq!(
            candidate.cover_url.as_deref(),
            Some("https://covers.openlibrary.org/b/id/12345-M.jpg")
        );
        assert_eq!(
            candidate.thumbnail_url.as_deref(),
            Some("https://covers.openlibrary.org/b/id/12345-S.jpg")
        );
        assert_eq!(candidate.isbns, vec!["9780441172719"]);
    }

    #[test]
    fn candidates_tolerate_sparse_docs() {
        let doc = OpenLibraryDoc {
            title: "Obscure Pamphlet".to_string(),
            author_name: None,
            cover_i: None,
            isbn: None,
        };

        let candidate = BookCandidate::from(doc);

        assert_eq!(candidate.author, None);
        assert_eq!(candidate.cover_url, None);
        assert_eq!(candidate.thumbnail_url, None);
        assert!(candidate.isbns.is_empty());
    }

    #[test]
    fn search_responses_decode_with_unknown_fields() {
        let body = r#"{
            "numFound": 2,
            "start": 0,
            "docs": [
                {"title": "Dune", "author_name": ["Frank Herbert"], "cover_i": 12345,
                 "isbn": ["9780441172719"], "first_publish_year": 1965},
                {"title": "Dune Messiah"}
            ]
        }"#;

        let resp: OpenLibrarySearchResponse = serde_json::from_str(body).unwrap();

        assert_eq!(resp.docs.len(), 2);
        assert_eq!(resp.docs[1].title, "Dune Messiah");
        assert!(resp.docs[1].cover_i.is_none());
    }
}

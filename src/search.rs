use std::collections::HashMap;
use std::sync::Mutex;

use crate::store::{Filter, Order};

/// the three optional search filters. each one is explicitly present or
/// absent; an empty string is never treated as an active filter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuoteFilters {
    pub text: Option<String>,
    pub book_id: Option<String>,
    pub tag: Option<String>,
}

impl QuoteFilters {
    /// normalize raw form values: trim, and treat blank as absent.
    pub fn new(text: Option<String>, book_id: Option<String>, tag: Option<String>) -> Self {
        fn active(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        QuoteFilters {
            text: active(text),
            book_id: active(book_id),
            tag: active(tag),
        }
    }
}

/// compose the conjunction for a quote search: always scoped to the owner,
/// plus exactly the filters that are present.
pub fn build_filters(user_id: &str, filters: &QuoteFilters) -> Vec<Filter> {
    let mut out = vec![Filter::eq("user_id", user_id)];

    if let Some(book_id) = &filters.book_id {
        out.push(Filter::eq("book_id", book_id));
    }

    if let Some(tag) = &filters.tag {
        out.push(Filter::contains("tags", tag));
    }

    if let Some(text) = &filters.text {
        out.push(Filter::ilike("text", text));
    }

    out
}

/// search results always come back newest first.
pub fn result_order() -> Order {
    Order::desc("created_at")
}

/// per-identity request generations. every search bumps its identity's
/// counter; a completion whose generation is no longer current is stale
/// and must be discarded by the consumer. no abort is sent upstream.
#[derive(Default)]
pub struct SearchSessions {
    generations: Mutex<HashMap<String, u64>>,
}

impl SearchSessions {
    pub fn begin(&self, user_id: &str) -> u64 {
        let mut generations = self.generations.lock().unwrap();
        let generation = generations.entry(user_id.to_string()).or_insert(0);
        *generation += 1;

        *generation
    }

    pub fn is_current(&self, user_id: &str, generation: u64) -> bool {
        self.generations.lock().unwrap().get(user_id).copied() == Some(generation)
    }
}

use std::sync::LazyLock;

pub static STARTUP_TIME: LazyLock<std::time::SystemTime> =
    LazyLock::new(std::time::SystemTime::now);

pub static OPENLIBRARY_API_BASE: &str = "https://openlibrary.org";
pub static OPENLIBRARY_COVERS_BASE: &str = "https://covers.openlibrary.org";

/// how many candidates a catalog lookup returns at most.
pub const CATALOG_RESULT_LIMIT: usize = 5;

pub const DASHBOARD_RECENT_BOOKS: u32 = 6;
pub const DASHBOARD_RECENT_QUOTES: u32 = 5;

/// how many tags a suggestion yields at most.
pub const TAG_SUGGESTION_LIMIT: usize = 5;

/// tokens shorter than this never become tag suggestions.
pub const TAG_MIN_LENGTH: usize = 4;

/// common english function words that never make useful tags.
pub const STOP_WORDS: [&str; 51] = [
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is",
    "are", "was", "were", "be", "been", "have", "has", "had", "do", "does", "did", "will", "would",
    "could", "should", "may", "might", "can", "must", "shall", "this", "that", "these", "those",
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them",
];

use crate::constants::{STOP_WORDS, TAG_MIN_LENGTH, TAG_SUGGESTION_LIMIT};

/// derive up to five candidate tags from raw quote text.
///
/// lower-cases the text, splits on whitespace, drops stop words and tokens
/// shorter than four characters, and keeps the first five survivors in
/// original order. an empty result means the caller should leave any
/// user-entered tags untouched.
pub fn suggest_tags(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();

    lowered
        .split_whitespace()
        .filter(|word| word.chars().count() >= TAG_MIN_LENGTH && !STOP_WORDS.contains(word))
        .take(TAG_SUGGESTION_LIMIT)
        .map(str::to_string)
        .collect()
}

/// split a user-entered comma-separated tag string, trimming entries and
/// dropping empty ones. order is preserved.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

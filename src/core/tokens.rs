// File: src/core/tokens.rs
//! Whitespace tokenization and whole-token substitution.

/// Splits a response on any run of whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Joins tokens back with single spaces.
pub fn join(tokens: &[String]) -> String {
    tokens.join(" ")
}

/// Replaces every token equal to `target` with `replacement`.
/// Case-sensitive and whole-token only; length and order are unchanged.
pub fn replace_word(tokens: &mut [String], target: &str, replacement: &str) {
    for token in tokens.iter_mut().filter(|t| t.as_str() == target) {
        *token = replacement.to_string();
    }
}

/// Turns underscores glued into tokens (e.g. `customer_service`) into spaces,
/// for every response in the collection.
pub fn split_words<S: AsRef<str>>(responses: &[S]) -> Vec<String> {
    responses
        .iter()
        .map(|r| r.as_ref().replace('_', " "))
        .collect()
}

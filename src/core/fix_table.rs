// File: src/core/fix_table.rs
use crate::core::tokens::{join, tokenize};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Misspelling -> correction pairs that are applied without asking.
///
/// Kept in a `BTreeMap` so the persisted JSON is stable and easy to edit by hand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixTable {
    fixes: BTreeMap<String, String>,
}

impl FixTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, word: &str) -> Option<&str> {
        self.fixes.get(word).map(String::as_str)
    }

    /// Registers a fix. A later registration for the same word wins.
    pub fn insert(&mut self, word: impl Into<String>, correction: impl Into<String>) {
        self.fixes.insert(word.into(), correction.into());
    }

    pub fn len(&self) -> usize {
        self.fixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }

    /// Drops entries that can never apply: keys that are not a single
    /// token, or corrections that are blank. Returns how many were dropped.
    pub fn prune_unmatchable(&mut self) -> usize {
        let before = self.fixes.len();
        self.fixes.retain(|word, correction| {
            let usable = !word.is_empty()
                && !word.chars().any(char::is_whitespace)
                && !correction.trim().is_empty();
            if !usable {
                log::warn!("Ignoring unusable fix {:?} -> {:?}", word, correction);
            }
            usable
        });
        before - self.fixes.len()
    }

    /// Rewrites one response, mapping every token found in the table.
    pub fn apply(&self, text: &str) -> String {
        let tokens: Vec<String> = tokenize(text)
            .into_iter()
            .map(|token| match self.fixes.get(&token) {
                Some(fixed) => fixed.clone(),
                None => token,
            })
            .collect();
        join(&tokens)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FixTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fixes: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Replays a fix table over a whole collection without prompting.
/// Nothing is deleted and no dictionary is consulted.
pub fn replace_from_table<S: AsRef<str>>(responses: &[S], table: &FixTable) -> Vec<String> {
    let rewritten: Vec<String> = responses.iter().map(|r| table.apply(r.as_ref())).collect();
    log::info!(
        "Reapplied {} fixes over {} responses",
        table.len(),
        rewritten.len()
    );
    rewritten
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> FixTable {
        [("teh", "the"), ("recieve", "receive")].into_iter().collect()
    }

    #[test]
    fn test_reapply_maps_every_listed_token() {
        let out = replace_from_table(&["teh cat did recieve teh box", "a dog ran"], &table());
        assert_eq!(out, vec!["the cat did receive the box", "a dog ran"]);
    }

    #[test]
    fn test_reapply_keeps_collection_length() {
        let input = vec!["", "teh", "ok"];
        let out = replace_from_table(&input, &table());
        assert_eq!(out, vec!["", "the", "ok"]);
    }

    #[test]
    fn test_reapply_is_idempotent_once_keys_are_gone() {
        let once = replace_from_table(&["teh recieve"], &table());
        let twice = replace_from_table(&once, &table());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_reapply_is_a_single_pass() {
        let chained: FixTable = [("a", "b"), ("b", "c")].into_iter().collect();
        assert_eq!(chained.apply("a b"), "b c");
    }

    #[test]
    fn test_prune_drops_only_dead_entries() {
        let mut t = table();
        assert_eq!(t.prune_unmatchable(), 0);

        t.insert("two words", "x");
        t.insert("", "y");
        t.insert("wierd", " ");
        assert_eq!(t.prune_unmatchable(), 3);
        assert_eq!(t, table());
    }

    #[test]
    fn test_json_shape_is_a_plain_object() {
        let json = serde_json::to_string(&table()).unwrap();
        assert_eq!(json, r#"{"recieve":"receive","teh":"the"}"#);
        let back: FixTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table());
    }
}

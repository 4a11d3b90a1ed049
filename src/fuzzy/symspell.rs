// File: src/fuzzy/symspell.rs
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Candidate generator based on the Symmetric Delete (SymSpell) idea.
/// Every dictionary word is indexed under all of its delete variants up to
/// `max_edit_distance`, so a lookup only has to generate the deletes of the
/// input instead of scanning the whole dictionary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymSpell {
    /// Maps a delete variant (e.g. "helo") to the words it could have come from.
    deletes: HashMap<String, HashSet<String>>,
    max_edit_distance: usize,
}

impl SymSpell {
    pub fn new(max_edit_distance: usize) -> Self {
        Self {
            deletes: HashMap::new(),
            max_edit_distance,
        }
    }

    pub fn max_edit_distance(&self) -> usize {
        self.max_edit_distance
    }

    /// Indexes a word under each of its delete variants.
    /// Complexity: amortized O(k^d) in the word length k and edit distance d.
    pub fn add_word(&mut self, word: &str) {
        for edit in self.generate_edits(word) {
            self.deletes
                .entry(edit)
                .or_default()
                .insert(word.to_string());
        }
    }

    /// Returns every indexed word that shares a delete variant with `input`.
    /// This is a superset of the words within `max_edit_distance`; callers
    /// still have to measure the real distance.
    pub fn lookup(&self, input: &str) -> HashSet<String> {
        let mut candidates = HashSet::new();
        for edit in self.generate_edits(input) {
            if let Some(words) = self.deletes.get(&edit) {
                candidates.extend(words.iter().cloned());
            }
        }
        candidates
    }

    /// Generates all unique delete variants within the max edit distance,
    /// the original string included. Works on chars, not bytes.
    fn generate_edits(&self, word: &str) -> HashSet<String> {
        let mut edits = HashSet::new();
        edits.insert(word.to_string());

        let mut current_edits = edits.clone();

        for _ in 0..self.max_edit_distance {
            let mut next_edits = HashSet::new();
            for edit in &current_edits {
                let chars: Vec<char> = edit.chars().collect();
                for i in 0..chars.len() {
                    let deleted_variant: String = chars
                        .iter()
                        .enumerate()
                        .filter(|&(j, _)| j != i)
                        .map(|(_, c)| c)
                        .collect();
                    next_edits.insert(deleted_variant);
                }
            }
            edits.extend(next_edits.iter().cloned());
            current_edits = next_edits;
        }

        edits
    }
}

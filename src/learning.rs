// File: src/learning.rs
use crate::core::fix_table::FixTable;
use crate::speller::SpellChecker;

/// Applies the decisions that outlive a single response: words accepted
/// into the dictionary and corrections registered as permanent fixes.
#[derive(Debug, Default)]
pub struct LearningEngine {
    new_additions: Vec<String>,
}

impl LearningEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// `na`: makes `word` known so no later response flags it again.
    /// The word is recorded once, however many times it is accepted.
    pub fn accept_word<S: SpellChecker + ?Sized>(&mut self, speller: &mut S, word: &str) {
        speller.add_word(word);
        if !self.new_additions.iter().any(|w| w == word) {
            self.new_additions.push(word.to_string());
        }
        log::debug!("Accepted '{}' into the '{}' dictionary", word, speller.language());
    }

    /// `ya`: every later occurrence of `word` becomes `correction` silently.
    pub fn register_fix(&self, fix_table: &mut FixTable, word: &str, correction: &str) {
        fix_table.insert(word, correction);
        log::debug!("Registered permanent fix '{}' -> '{}'", word, correction);
    }

    pub fn into_new_additions(self) -> Vec<String> {
        self.new_additions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speller::{DictionaryOptions, FrequencySpeller};

    #[test]
    fn test_accept_word_records_each_word_once() {
        let mut speller = FrequencySpeller::new("en", DictionaryOptions::default());
        let mut learning = LearningEngine::new();

        learning.accept_word(&mut speller, "covid");
        learning.accept_word(&mut speller, "zoom");
        learning.accept_word(&mut speller, "covid");

        assert!(speller.contains("covid"));
        assert_eq!(learning.into_new_additions(), ["covid", "zoom"]);
    }

    #[test]
    fn test_register_fix_overwrites_previous_choice() {
        let learning = LearningEngine::new();
        let mut table = FixTable::new();
        learning.register_fix(&mut table, "teh", "tea");
        learning.register_fix(&mut table, "teh", "the");
        assert_eq!(table.get("teh"), Some("the"));
        assert_eq!(table.len(), 1);
    }
}

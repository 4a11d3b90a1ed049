// File: src/speller.rs
//! The spelling collaborator seen by the review loop, and the bundled
//! word-frequency implementation of it.

use crate::error::DictionaryError;
use crate::fuzzy::symspell::SymSpell;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// What the review loop needs from a dictionary engine.
pub trait SpellChecker {
    /// Language tag the dictionary was built for.
    fn language(&self) -> &str;

    /// Whether `word` is in the accepted-word set.
    fn contains(&self, word: &str) -> bool;

    /// Best correction for `word`, or `None` when nothing is close enough.
    fn correction(&self, word: &str) -> Option<String>;

    /// Adds `word` to the accepted-word set.
    fn add_word(&mut self, word: &str);

    /// The form under which `word` is looked up. Permanent fixes are keyed
    /// by it too, so `Teh` and `teh` share one fix when case is folded.
    fn normalize<'a>(&self, word: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(word)
    }

    /// Distinct unrecognized tokens, in order of first occurrence, spelled
    /// exactly as they appear in `tokens`.
    fn unknown(&self, tokens: &[String]) -> Vec<String> {
        let mut seen = HashSet::new();
        tokens
            .iter()
            .filter(|t| is_checkable(t) && !self.contains(t))
            .filter(|t| seen.insert(t.as_str()))
            .cloned()
            .collect()
    }
}

/// Lone punctuation marks and anything that reads as a number are never flagged.
pub fn is_checkable(token: &str) -> bool {
    let mut chars = token.chars();
    let lone_punctuation = matches!(
        (chars.next(), chars.next()),
        (Some(c), None) if c.is_ascii_punctuation()
    );
    !lone_punctuation && token.parse::<f64>().is_err()
}

/// Tuning knobs for [`FrequencySpeller`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictionaryOptions {
    pub max_edit_distance: usize,
    pub case_sensitive: bool,
}

impl Default for DictionaryOptions {
    fn default() -> Self {
        Self {
            max_edit_distance: 2,
            case_sensitive: false,
        }
    }
}

/// A word-frequency dictionary with edit-distance corrections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrequencySpeller {
    language: String,
    case_sensitive: bool,
    frequencies: HashMap<String, u64>,
    index: SymSpell,
}

impl FrequencySpeller {
    pub fn new(language: &str, options: DictionaryOptions) -> Self {
        Self {
            language: language.to_string(),
            case_sensitive: options.case_sensitive,
            frequencies: HashMap::new(),
            index: SymSpell::new(options.max_edit_distance),
        }
    }

    /// Builds a dictionary from `(word, count)` pairs.
    pub fn from_counts<I, S>(language: &str, options: DictionaryOptions, counts: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let mut speller = Self::new(language, options);
        for (word, count) in counts {
            speller.insert(word.as_ref(), count);
        }
        speller
    }

    /// Loads the dictionary for `language` from `dir`, trying `<language>.txt`
    /// then `<language>.json`.
    pub fn for_language(
        language: &str,
        dir: &Path,
        options: DictionaryOptions,
    ) -> Result<Self, DictionaryError> {
        let txt = dir.join(format!("{language}.txt"));
        let json = dir.join(format!("{language}.json"));
        let counts = if txt.is_file() {
            read_counts_txt(&txt)?
        } else if json.is_file() {
            read_counts_json(&json)?
        } else {
            return Err(DictionaryError::MissingLanguage {
                language: language.to_string(),
                dir: dir.to_path_buf(),
            });
        };
        log::info!(
            "Loaded {} '{}' dictionary words from {:?}",
            counts.len(),
            language,
            dir
        );
        Ok(Self::from_counts(language, options, counts))
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    pub fn frequency(&self, word: &str) -> u64 {
        self.frequencies.get(&*self.key(word)).copied().unwrap_or(0)
    }

    /// Case-folds unless the dictionary is case-sensitive.
    fn key<'a>(&self, word: &'a str) -> Cow<'a, str> {
        if self.case_sensitive {
            Cow::Borrowed(word)
        } else {
            Cow::Owned(word.to_lowercase())
        }
    }

    fn insert(&mut self, word: &str, count: u64) {
        let key = self.key(word).into_owned();
        if key.is_empty() {
            return;
        }
        let entry = self.frequencies.entry(key.clone()).or_insert(0);
        if *entry == 0 {
            self.index.add_word(&key);
        }
        *entry += count.max(1);
    }
}

impl SpellChecker for FrequencySpeller {
    fn language(&self) -> &str {
        &self.language
    }

    fn contains(&self, word: &str) -> bool {
        self.frequencies.contains_key(&*self.key(word))
    }

    /// Closest known words win; among equally close ones the most frequent,
    /// then the alphabetically first.
    fn correction(&self, word: &str) -> Option<String> {
        let key = self.key(word);
        if self.frequencies.contains_key(&*key) {
            return Some(key.into_owned());
        }
        let max = self.index.max_edit_distance();
        self.index
            .lookup(&key)
            .into_iter()
            .filter_map(|candidate| {
                let distance = strsim::damerau_levenshtein(&key, &candidate);
                (distance <= max).then_some((distance, candidate))
            })
            .min_by(|(da, a), (db, b)| {
                da.cmp(db)
                    .then_with(|| self.frequency(b).cmp(&self.frequency(a)))
                    .then_with(|| a.cmp(b))
            })
            .map(|(_, candidate)| candidate)
    }

    fn add_word(&mut self, word: &str) {
        self.insert(word, 1);
    }

    fn normalize<'a>(&self, word: &'a str) -> Cow<'a, str> {
        self.key(word)
    }
}

fn read_counts_txt(path: &Path) -> Result<Vec<(String, u64)>, DictionaryError> {
    let content = fs::read_to_string(path).map_err(|e| DictionaryError::Load {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let mut counts = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        let mut parts = line.split_whitespace();
        let Some(word) = parts.next() else { continue };
        let count = match parts.next() {
            Some(raw) => raw.parse::<u64>().map_err(|e| DictionaryError::Load {
                path: path.to_path_buf(),
                reason: format!("line {}: bad count {raw:?}: {e}", line_no + 1),
            })?,
            None => 1,
        };
        counts.push((word.to_string(), count));
    }
    Ok(counts)
}

fn read_counts_json(path: &Path) -> Result<Vec<(String, u64)>, DictionaryError> {
    let load_err = |reason: String| DictionaryError::Load {
        path: path.to_path_buf(),
        reason,
    };
    let content = fs::read_to_string(path).map_err(|e| load_err(e.to_string()))?;
    let counts: HashMap<String, u64> =
        serde_json::from_str(&content).map_err(|e| load_err(e.to_string()))?;
    Ok(counts.into_iter().collect())
}

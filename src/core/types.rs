// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Position of a response inside the collection under review.
/// Always 0-based and contiguous, whatever the caller's own numbering was.
pub type ResponseIndex = usize;

/// The operator's answer to a flagged word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// `y`: use the suggestion for this response only.
    Accept,
    /// `ya`: use the suggestion and remember it for every later match.
    AcceptAll,
    /// `n`: keep the word as typed.
    Skip,
    /// `na`: keep the word and add it to the dictionary.
    SkipAll,
    /// `o`: type a custom replacement.
    Other,
    /// `del`: drop the whole response from the output.
    Delete,
    /// `ex`: stop the session and return what has been reviewed so far.
    Exit,
}

impl Disposition {
    /// Parses an operator line. Matching is exact: no trimming, no case folding.
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "y" => Some(Self::Accept),
            "ya" => Some(Self::AcceptAll),
            "n" => Some(Self::Skip),
            "na" => Some(Self::SkipAll),
            "o" => Some(Self::Other),
            "del" => Some(Self::Delete),
            "ex" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// How far a replacement reaches: this occurrence only, or the fix table too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceScope {
    Once,
    Permanent,
}

impl ReplaceScope {
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "y" => Some(Self::Once),
            "ya" => Some(Self::Permanent),
            _ => None,
        }
    }
}

/// Order in which the unknown words of one response are put to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WordOrder {
    #[default]
    FirstOccurrence,
    Alphabetical,
}

impl WordOrder {
    /// Reorders `words` (already in first-occurrence order) in place.
    pub fn arrange(self, words: &mut [String]) {
        if self == Self::Alphabetical {
            words.sort();
        }
    }
}

/// States of the per-word prompt machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptState {
    AwaitDisposition,
    AwaitCustomSpelling,
}

/// What the operator decided for one flagged word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordResolution {
    Replace { with: String, scope: ReplaceScope },
    Keep,
    AcceptIntoDictionary,
    DeleteResponse,
    Exit,
}

/// The result of a review run, whether it finished or was left with `ex`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewOutcome {
    /// Corrected responses in input order, deleted ones excluded.
    pub responses: Vec<String>,
    /// Original position of each entry of `responses`.
    pub kept_indices: Vec<ResponseIndex>,
    pub deleted: BTreeSet<ResponseIndex>,
    /// Words added to the dictionary through `na`, in the order they were added.
    pub new_additions: Vec<String>,
    /// Index of the response at which the operator entered `ex`, or at
    /// which operator input ran out.
    pub exited_at: Option<ResponseIndex>,
    /// The run stopped because the operator stream ended, not on `ex`.
    pub input_closed: bool,
}

impl ReviewOutcome {
    pub fn completed(&self) -> bool {
        self.exited_at.is_none()
    }
}

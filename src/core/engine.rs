use crate::core::fix_table::FixTable;
use crate::core::tokens::{join, replace_word, tokenize};
use crate::core::types::{
    Disposition, PromptState, ReplaceScope, ResponseIndex, ReviewOutcome, WordOrder,
    WordResolution,
};
use crate::error::{DictionaryError, ReviewError};
use crate::learning::LearningEngine;
use crate::operator::Operator;
use crate::speller::{DictionaryOptions, FrequencySpeller, SpellChecker};
use std::path::Path;

pub const UNKNOWN_ARGUMENT: &str = "Unknown argument provided";
pub const WRONG_ARGUMENT_COUNT: &str =
    "You must enter 2 arguments. Please refer to the usage notes";
pub const CUSTOM_SPELLING_PROMPT: &str = "Enter spelling: ";

/// One move of the per-word prompt machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Ask again in the given state.
    Next(PromptState),
    /// The answer was rejected; show the notice and ask again.
    Invalid(PromptState, &'static str),
    Done(WordResolution),
}

/// Feeds one operator answer to the prompt machine.
pub fn transition(state: PromptState, answer: &str, suggestion: &str) -> Step {
    match state {
        PromptState::AwaitDisposition => match Disposition::parse(answer) {
            Some(Disposition::Accept) => Step::Done(WordResolution::Replace {
                with: suggestion.to_string(),
                scope: ReplaceScope::Once,
            }),
            Some(Disposition::AcceptAll) => Step::Done(WordResolution::Replace {
                with: suggestion.to_string(),
                scope: ReplaceScope::Permanent,
            }),
            Some(Disposition::Skip) => Step::Done(WordResolution::Keep),
            Some(Disposition::SkipAll) => Step::Done(WordResolution::AcceptIntoDictionary),
            Some(Disposition::Other) => Step::Next(PromptState::AwaitCustomSpelling),
            Some(Disposition::Delete) => Step::Done(WordResolution::DeleteResponse),
            Some(Disposition::Exit) => Step::Done(WordResolution::Exit),
            None => Step::Invalid(PromptState::AwaitDisposition, UNKNOWN_ARGUMENT),
        },
        PromptState::AwaitCustomSpelling => {
            let parts: Vec<&str> = answer.split_whitespace().collect();
            let [spelling, scope] = parts.as_slice() else {
                return Step::Invalid(PromptState::AwaitCustomSpelling, WRONG_ARGUMENT_COUNT);
            };
            match ReplaceScope::parse(scope) {
                Some(scope) => Step::Done(WordResolution::Replace {
                    with: spelling.to_string(),
                    scope,
                }),
                None => Step::Invalid(PromptState::AwaitCustomSpelling, UNKNOWN_ARGUMENT),
            }
        }
    }
}

/// What happens to a whole response once its flagged words are settled.
enum ResponseFlow {
    Keep(String),
    Delete,
    Exit,
}

/// An interactive spelling review over a collection of responses.
///
/// The session owns the dictionary and the fix table while it runs; both are
/// updated in place and can be taken back with [`ReviewSession::into_parts`]
/// to persist or to seed the next session.
pub struct ReviewSession<S> {
    speller: S,
    fix_table: FixTable,
    word_order: WordOrder,
}

impl<S: SpellChecker> ReviewSession<S> {
    /// Starts a session, with an empty fix table when none is given.
    /// Fix entries that could never match a token are dropped with a warning.
    pub fn new(speller: S, fix_table: Option<FixTable>) -> Self {
        let mut fix_table = fix_table.unwrap_or_default();
        fix_table.prune_unmatchable();
        Self {
            speller,
            fix_table,
            word_order: WordOrder::default(),
        }
    }

    pub fn with_word_order(mut self, word_order: WordOrder) -> Self {
        self.word_order = word_order;
        self
    }

    pub fn speller(&self) -> &S {
        &self.speller
    }

    pub fn fix_table(&self) -> &FixTable {
        &self.fix_table
    }

    pub fn into_parts(self) -> (S, FixTable) {
        (self.speller, self.fix_table)
    }

    /// Reviews every response from `start_index` on. Earlier responses are
    /// passed through untouched.
    ///
    /// Returns normally on `ex` too, with everything before the exit index.
    /// Running out of operator input ends the run the same way.
    pub fn run<T, O>(
        &mut self,
        responses: &[T],
        start_index: ResponseIndex,
        operator: &mut O,
    ) -> Result<ReviewOutcome, ReviewError>
    where
        T: AsRef<str>,
        O: Operator + ?Sized,
    {
        log::info!(
            "Reviewing {} responses from index {} ('{}' dictionary, {} permanent fixes)",
            responses.len(),
            start_index,
            self.speller.language(),
            self.fix_table.len()
        );

        let mut outcome = ReviewOutcome::default();
        let mut learning = LearningEngine::new();

        for (index, response) in responses.iter().enumerate() {
            let text = response.as_ref();
            if index < start_index {
                outcome.responses.push(text.to_string());
                outcome.kept_indices.push(index);
                continue;
            }

            let flow = match self.review_response(index, text, &mut learning, operator) {
                Err(ReviewError::OperatorInputClosed) => {
                    log::warn!("Operator input closed at index {}", index);
                    outcome.input_closed = true;
                    ResponseFlow::Exit
                }
                other => other?,
            };

            match flow {
                ResponseFlow::Keep(corrected) => {
                    outcome.responses.push(corrected);
                    outcome.kept_indices.push(index);
                }
                ResponseFlow::Delete => {
                    outcome.deleted.insert(index);
                }
                ResponseFlow::Exit => {
                    log::info!("Review stopped at index {}", index);
                    outcome.exited_at = Some(index);
                    break;
                }
            }
        }

        outcome.new_additions = learning.into_new_additions();
        log::info!(
            "Review finished: {} kept, {} deleted, {} new words",
            outcome.responses.len(),
            outcome.deleted.len(),
            outcome.new_additions.len()
        );
        Ok(outcome)
    }

    fn review_response<O: Operator + ?Sized>(
        &mut self,
        index: ResponseIndex,
        text: &str,
        learning: &mut LearningEngine,
        operator: &mut O,
    ) -> Result<ResponseFlow, ReviewError> {
        let mut tokens = tokenize(text);
        let mut unknown = self.speller.unknown(&tokens);
        if unknown.is_empty() {
            return Ok(ResponseFlow::Keep(text.to_string()));
        }
        self.word_order.arrange(&mut unknown);
        operator.show_response(index, text)?;

        for word in unknown {
            let key = self.speller.normalize(&word);
            if let Some(fixed) = self.fix_table.get(&key) {
                log::debug!("Applying permanent fix '{}' -> '{}'", word, fixed);
                replace_word(&mut tokens, &word, fixed);
                continue;
            }

            match self.resolve_word(&word, operator)? {
                WordResolution::Replace { with, scope } => {
                    replace_word(&mut tokens, &word, &with);
                    if scope == ReplaceScope::Permanent {
                        learning.register_fix(&mut self.fix_table, &key, &with);
                    }
                }
                WordResolution::Keep => {}
                WordResolution::AcceptIntoDictionary => {
                    learning.accept_word(&mut self.speller, &word);
                }
                // the whole response goes, so its remaining words are not asked about
                WordResolution::DeleteResponse => return Ok(ResponseFlow::Delete),
                WordResolution::Exit => return Ok(ResponseFlow::Exit),
            }
        }

        Ok(ResponseFlow::Keep(join(&tokens)))
    }

    /// Runs the prompt machine for one word until it settles.
    fn resolve_word<O: Operator + ?Sized>(
        &self,
        word: &str,
        operator: &mut O,
    ) -> Result<WordResolution, ReviewError> {
        let suggestion = self
            .speller
            .correction(word)
            .unwrap_or_else(|| word.to_string());
        let mut state = PromptState::AwaitDisposition;

        loop {
            let prompt = match state {
                PromptState::AwaitDisposition => format!("{word} {suggestion} > "),
                PromptState::AwaitCustomSpelling => CUSTOM_SPELLING_PROMPT.to_string(),
            };
            let answer = operator.prompt(&prompt)?;

            match transition(state, &answer, &suggestion) {
                Step::Next(next) => state = next,
                Step::Invalid(next, notice) => {
                    operator.notify(notice)?;
                    state = next;
                }
                Step::Done(resolution) => {
                    log::debug!("'{}' resolved as {:?}", word, resolution);
                    return Ok(resolution);
                }
            }
        }
    }
}

impl ReviewSession<FrequencySpeller> {
    /// Starts a session on a fresh dictionary for `language`.
    pub fn for_language(
        language: &str,
        dictionary_dir: &Path,
        options: DictionaryOptions,
        fix_table: Option<FixTable>,
    ) -> Result<Self, DictionaryError> {
        let speller = FrequencySpeller::for_language(language, dictionary_dir, options)?;
        Ok(Self::new(speller, fix_table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays canned answers and records everything shown.
    struct ScriptedOperator {
        answers: VecDeque<String>,
        prompts: Vec<String>,
        notices: Vec<String>,
        shown: Vec<ResponseIndex>,
    }

    impl ScriptedOperator {
        fn new(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().map(|a| a.to_string()).collect(),
                prompts: Vec::new(),
                notices: Vec::new(),
                shown: Vec::new(),
            }
        }
    }

    impl Operator for ScriptedOperator {
        fn show_response(&mut self, index: ResponseIndex, _text: &str) -> Result<(), ReviewError> {
            self.shown.push(index);
            Ok(())
        }

        fn prompt(&mut self, prompt: &str) -> Result<String, ReviewError> {
            self.prompts.push(prompt.to_string());
            self.answers
                .pop_front()
                .ok_or(ReviewError::OperatorInputClosed)
        }

        fn notify(&mut self, message: &str) -> Result<(), ReviewError> {
            self.notices.push(message.to_string());
            Ok(())
        }
    }

    fn speller() -> FrequencySpeller {
        FrequencySpeller::from_counts(
            "en",
            DictionaryOptions::default(),
            [
                ("a", 200),
                ("the", 100),
                ("cat", 20),
                ("sat", 20),
                ("dog", 20),
                ("ran", 20),
                ("on", 50),
                ("mat", 10),
                ("receive", 10),
            ],
        )
    }

    fn session() -> ReviewSession<FrequencySpeller> {
        ReviewSession::new(speller(), None)
    }

    #[test]
    fn test_transition_table() {
        use PromptState::*;
        assert_eq!(
            transition(AwaitDisposition, "o", "the"),
            Step::Next(AwaitCustomSpelling)
        );
        assert_eq!(
            transition(AwaitDisposition, "yes", "the"),
            Step::Invalid(AwaitDisposition, UNKNOWN_ARGUMENT)
        );
        assert_eq!(
            transition(AwaitCustomSpelling, "thee", "the"),
            Step::Invalid(AwaitCustomSpelling, WRONG_ARGUMENT_COUNT)
        );
        assert_eq!(
            transition(AwaitCustomSpelling, "thee n", "the"),
            Step::Invalid(AwaitCustomSpelling, UNKNOWN_ARGUMENT)
        );
        assert_eq!(
            transition(AwaitCustomSpelling, "thee ya", "the"),
            Step::Done(WordResolution::Replace {
                with: "thee".to_string(),
                scope: ReplaceScope::Permanent
            })
        );
        assert_eq!(
            transition(AwaitDisposition, "na", "the"),
            Step::Done(WordResolution::AcceptIntoDictionary)
        );
    }

    #[test]
    fn test_ya_replaces_and_registers_fix() {
        let mut session = session();
        let mut op = ScriptedOperator::new(&["ya"]);
        let outcome = session
            .run(&["teh cat sat", "a dog ran"], 0, &mut op)
            .unwrap();

        assert_eq!(outcome.responses, vec!["the cat sat", "a dog ran"]);
        assert_eq!(session.fix_table().get("teh"), Some("the"));
        assert_eq!(op.prompts, vec!["teh the > "]);
        assert!(outcome.completed());
    }

    #[test]
    fn test_permanent_fix_applies_without_prompt() {
        let mut session = session();
        let mut op = ScriptedOperator::new(&["ya"]);
        let outcome = session
            .run(&["teh cat", "teh dog", "on teh mat"], 0, &mut op)
            .unwrap();

        assert_eq!(outcome.responses, vec!["the cat", "the dog", "on the mat"]);
        assert_eq!(op.prompts.len(), 1);
        // flagged responses are still shown, even when fixed silently
        assert_eq!(op.shown, vec![0, 1, 2]);
    }

    #[test]
    fn test_y_does_not_remember() {
        let mut session = session();
        let mut op = ScriptedOperator::new(&["y", "n"]);
        let outcome = session.run(&["teh cat", "teh dog"], 0, &mut op).unwrap();

        assert_eq!(outcome.responses, vec!["the cat", "teh dog"]);
        assert!(session.fix_table().is_empty());
        assert_eq!(op.prompts.len(), 2);
    }

    #[test]
    fn test_na_accepts_word_for_rest_of_session() {
        let mut session = session();
        let mut op = ScriptedOperator::new(&["na"]);
        let outcome = session
            .run(&["covid cat", "the covid dog", "covid"], 0, &mut op)
            .unwrap();

        assert_eq!(outcome.responses, vec!["covid cat", "the covid dog", "covid"]);
        assert_eq!(outcome.new_additions, vec!["covid"]);
        assert!(session.speller().contains("covid"));
        assert!(session.fix_table().is_empty());
        assert_eq!(op.shown, vec![0]);
    }

    #[test]
    fn test_custom_spelling_with_reprompts() {
        let mut session = session();
        let mut op = ScriptedOperator::new(&["huh", "o", "kitty", "kitty x", "kitty ya"]);
        let outcome = session.run(&["catt sat", "catt"], 0, &mut op).unwrap();

        assert_eq!(outcome.responses, vec!["kitty sat", "kitty"]);
        assert_eq!(session.fix_table().get("catt"), Some("kitty"));
        assert_eq!(
            op.notices,
            vec![UNKNOWN_ARGUMENT, WRONG_ARGUMENT_COUNT, UNKNOWN_ARGUMENT]
        );
        assert_eq!(
            op.prompts,
            vec![
                "catt cat > ",
                "catt cat > ",
                CUSTOM_SPELLING_PROMPT,
                CUSTOM_SPELLING_PROMPT,
                CUSTOM_SPELLING_PROMPT,
            ]
        );
    }

    #[test]
    fn test_del_drops_response_and_skips_its_other_words() {
        let mut session = session();
        let mut op = ScriptedOperator::new(&["del"]);
        let outcome = session.run(&["teh catt sat", "a dog ran"], 0, &mut op).unwrap();

        assert_eq!(outcome.responses, vec!["a dog ran"]);
        assert_eq!(outcome.kept_indices, vec![1]);
        assert_eq!(outcome.deleted.iter().copied().collect::<Vec<_>>(), vec![0]);
        assert_eq!(op.prompts.len(), 1);
    }

    #[test]
    fn test_ex_returns_reviewed_prefix_only() {
        let mut session = session();
        let mut op = ScriptedOperator::new(&["del", "y", "ex"]);
        let outcome = session
            .run(&["zzz", "teh cat", "the dog", "catt", "teh"], 0, &mut op)
            .unwrap();

        assert_eq!(outcome.responses, vec!["the cat", "the dog"]);
        assert_eq!(outcome.kept_indices, vec![1, 2]);
        assert_eq!(outcome.exited_at, Some(3));
        assert!(!outcome.completed());
    }

    #[test]
    fn test_start_index_passes_earlier_responses_through() {
        let mut session = session();
        let mut op = ScriptedOperator::new(&["y"]);
        let outcome = session.run(&["teh  cat", "teh dog"], 1, &mut op).unwrap();

        assert_eq!(outcome.responses, vec!["teh  cat", "the dog"]);
        assert_eq!(op.shown, vec![1]);
    }

    #[test]
    fn test_clean_responses_are_untouched() {
        let mut session = session();
        let mut op = ScriptedOperator::new(&[]);
        let input = ["the  cat sat", " a dog ran "];
        let outcome = session.run(&input, 0, &mut op).unwrap();

        assert_eq!(outcome.responses, vec!["the  cat sat", " a dog ran "]);
        assert!(op.prompts.is_empty());
    }

    #[test]
    fn test_word_order_is_configurable() {
        let mut first = session();
        let mut op = ScriptedOperator::new(&["n", "n"]);
        first.run(&["zzz catt"], 0, &mut op).unwrap();
        assert!(op.prompts[0].starts_with("zzz "));

        let mut sorted = session().with_word_order(WordOrder::Alphabetical);
        let mut op = ScriptedOperator::new(&["n", "n"]);
        sorted.run(&["zzz catt"], 0, &mut op).unwrap();
        assert!(op.prompts[0].starts_with("catt "));
    }

    #[test]
    fn test_missing_suggestion_falls_back_to_word() {
        let mut session = session();
        let mut op = ScriptedOperator::new(&["y"]);
        let outcome = session.run(&["xylophone"], 0, &mut op).unwrap();
        assert_eq!(op.prompts, vec!["xylophone xylophone > "]);
        assert_eq!(outcome.responses, vec!["xylophone"]);
    }

    #[test]
    fn test_unusable_fixes_are_dropped_not_fatal() {
        let table: FixTable = [("two words", "x"), ("teh", "the")].into_iter().collect();
        let mut session = ReviewSession::new(speller(), Some(table));
        assert_eq!(session.fix_table().len(), 1);

        let mut op = ScriptedOperator::new(&[]);
        let outcome = session.run(&["teh cat"], 0, &mut op).unwrap();
        assert_eq!(outcome.responses, vec!["the cat"]);
    }

    #[test]
    fn test_closed_input_keeps_reviewed_work() {
        let mut session = session();
        let mut op = ScriptedOperator::new(&["na"]);
        let outcome = session
            .run(&["covid cat", "the cat", "zzz", "teh"], 0, &mut op)
            .unwrap();

        assert_eq!(outcome.responses, vec!["covid cat", "the cat"]);
        assert_eq!(outcome.new_additions, vec!["covid"]);
        assert_eq!(outcome.exited_at, Some(2));
        assert!(outcome.input_closed);
        assert!(session.speller().contains("covid"));
    }

    #[test]
    fn test_permanent_fix_follows_case_folding() {
        let mut session = session();
        let mut op = ScriptedOperator::new(&["ya"]);
        let outcome = session
            .run(&["Teh cat", "teh dog", "TEH mat"], 0, &mut op)
            .unwrap();

        assert_eq!(outcome.responses, vec!["the cat", "the dog", "the mat"]);
        assert_eq!(session.fix_table().get("teh"), Some("the"));
        assert_eq!(session.fix_table().get("Teh"), None);
        assert_eq!(op.prompts, vec!["Teh the > "]);
    }
}

// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod fuzzy;
pub mod learning;
pub mod logger;
pub mod operator;
pub mod persistence;
pub mod speller;

pub use crate::core::engine::ReviewSession;
pub use crate::core::fix_table::{replace_from_table, FixTable};
pub use crate::core::tokens::{replace_word, split_words};
pub use crate::core::types::{ReviewOutcome, WordOrder};
pub use crate::operator::{ConsoleOperator, Operator};
pub use crate::speller::{FrequencySpeller, SpellChecker};

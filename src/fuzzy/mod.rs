// src/fuzzy/mod.rs
pub mod symspell;

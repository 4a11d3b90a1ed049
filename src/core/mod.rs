// src/core/mod.rs
pub mod engine;
pub mod fix_table;
pub mod tokens;
pub mod types;

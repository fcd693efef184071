//! File processors built on the translation client

pub mod jsonl;

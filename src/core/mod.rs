//! Core translation client module

pub mod chunking;
pub mod client;
pub mod config;
pub mod errors;
pub mod models;

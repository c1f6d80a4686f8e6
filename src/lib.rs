//! Interview-Prep Library
//!
//! This is the library interface for Interview-Prep.
//! The binaries are in src/main.rs and src/bin/list_models.rs.

pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod logging;
pub mod pipeline;

//! CLI subcommand implementations.

pub mod export;
pub mod mint;

//! Promptcraftctl library - exposes modules for integration tests

pub mod cli;
pub mod commands;
pub mod errors;
pub mod output;

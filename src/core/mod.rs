// src/core/mod.rs

/// Splits the command line into dispatcher flags, tool flags and positional arguments.
pub mod arg_parser;
/// Builds the final argument vector, banner and debug report.
pub mod assembler;
/// Loads and merges `.gm.toml` files.
pub mod config_loader;
/// Upward file searches and `PATH` lookups.
pub mod locator;
/// Path helpers.
pub mod paths;
/// Goal/task renaming between the Gradle and Maven vocabularies.
pub mod remapper;

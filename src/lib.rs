//! # gum
//!
//! `gm` runs the right build tool for the project you are standing in. It
//! classifies the command line, walks the directory tree looking for Gradle,
//! Maven, Ant, Bach or jbang markers, resolves a wrapper or a global binary,
//! rewrites lifecycle goals into the tool's own vocabulary and hands the
//! terminal over to the child process.

// Generated by build.rs: the `t!` macro with the user-facing messages.
include!(concat!(env!("OUT_DIR"), "/translations.rs"));

/// The `gm` command line: raw argument capture, help text and the dispatcher.
pub mod cli;
/// File names, documentation links and exit codes.
pub mod constants;
/// Tool-independent building blocks: classifier, locator, remapper, config, assembler.
pub mod core;
/// Shared data types.
pub mod models;
/// Environment probing and process execution.
pub mod system;
/// The supported build tools.
pub mod tools;

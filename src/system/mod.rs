//! # System Interaction Layer
//!
//! The boundary between the dispatcher and the operating system.
//!
//! ## Modules
//!
//! - **`probe`**: read-only view of the environment (working directory, `PATH`,
//!   home directory, OS family, file existence). Every search goes through it.
//! - **`executor`**: launches the resolved build tool with inherited standard
//!   streams and reports its exit code.

/// Launches the resolved command.
pub mod executor;
/// Read-only view of the environment.
pub mod probe;

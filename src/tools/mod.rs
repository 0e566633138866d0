//! # Build Tools
//!
//! One module per supported tool. Each implements [`BuildTool`]: it inspects
//! the working directory tree, decides whether the project belongs to it, and
//! if so produces a [`ResolvedCommand`] ready to launch.
//!
//! A tool "declines" by returning `Ok(None)`, which lets the dispatcher move on
//! to the next one. Under an explicit selection (`-gg`, `-gm`, ...) declining
//! turns into an error instead.

use crate::{
    core::{arg_parser::ParsedArguments, config_loader::{ConfigError, ConfigLoader}, locator},
    models::{Config, DispatcherFlag, ResolvedCommand, ToolKind},
    system::{
        executor::{self, ExecutionError},
        probe::Probe,
    },
};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Apache Ant.
pub mod ant;
/// Bach, the Java Shell builder.
pub mod bach;
/// Gradle.
pub mod gradle;
/// jbang single-file launcher.
pub mod jbang;
/// Apache Maven.
pub mod maven;

/// Everything that stops `gm` from launching a tool.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// More than one tool-forcing flag was given.
    #[error("Only one of {flags} may be given at a time.")]
    AmbiguousFlags {
        /// The offending flags, comma separated.
        flags: String,
    },
    /// No tool recognised the working directory.
    #[error("Did not find a Gradle, Maven, Ant, Bach, or jbang project")]
    NoProjectFound,
    /// A forced tool found no project of its kind.
    #[error("No {tool} project found")]
    ProjectNotFound {
        /// The tool that was forced.
        tool: ToolKind,
    },
    /// A forced tool has neither a wrapper nor a global executable.
    #[error("No {executable} found in path. Please install {tool}.\n({docs})")]
    MissingExecutable {
        /// The tool that was forced.
        tool: ToolKind,
        /// The global executable name that was looked for.
        executable: String,
        /// Installation instructions.
        docs: &'static str,
    },
    /// Bach was forced from below its project root.
    #[error("Bach must be invoked from {root}")]
    WrongBachDirectory {
        /// The directory holding `.bach`.
        root: String,
    },
    /// A `.gm.toml` file could not be read or understood.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The resolved executable cannot be launched.
    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

/// The state shared by every tool during one `gm` invocation.
#[derive(Clone, Copy)]
pub struct Session<'a> {
    /// Environment the tools search.
    pub probe: &'a dyn Probe,
    /// User config, loaded once per run.
    pub loader: &'a ConfigLoader,
    /// The classified command line.
    pub args: &'a ParsedArguments,
    /// True when the tool was forced with a dispatcher flag.
    pub explicit: bool,
}

impl std::fmt::Debug for Session<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("working_dir", &self.probe.working_dir())
            .field("args", &self.args)
            .field("explicit", &self.explicit)
            .finish()
    }
}

impl Session<'_> {
    /// Whether the dispatcher flag was given.
    pub fn has_flag(&self, flag: DispatcherFlag) -> bool {
        self.args.has_flag(flag)
    }

    /// The directory `gm` was started in.
    pub fn working_dir(&self) -> &Path {
        self.probe.working_dir()
    }

    /// Loads the merged config for `root` and applies the per-invocation
    /// overrides from `-gq`, `-gd` and `-gr`.
    pub fn config_for(&self, root: Option<&Path>) -> Result<Config, DispatchError> {
        let mut config = self.loader.for_root(self.probe, root)?;
        if self.has_flag(DispatcherFlag::Quiet) {
            config.set_quiet(true);
        }
        if self.has_flag(DispatcherFlag::Debug) {
            config.set_debug(true);
        }
        if self.has_flag(DispatcherFlag::SkipReplace) {
            config.gradle.set_replace(false);
            config.maven.goals.set_replace(false);
        }
        Ok(config)
    }

    /// Picks the Unix or Windows spelling of an executable name.
    pub fn platform_name(&self, unix: &'static str, windows: &'static str) -> &'static str {
        if self.probe.is_windows() { windows } else { unix }
    }
}

/// A build tool `gm` can dispatch to.
pub trait BuildTool {
    /// Which tool this is.
    fn kind(&self) -> ToolKind;

    /// Decides whether the project belongs to this tool and, if so, builds the
    /// command to run.
    fn try_resolve(&self, session: &Session<'_>) -> Result<Option<ResolvedCommand>, DispatchError>;

    /// Checks that the resolved executable can be launched at all. Runs
    /// before anything is printed for the command.
    fn verify(&self, command: &ResolvedCommand, windows: bool) -> Result<(), ExecutionError> {
        executor::ensure_executable(&command.executable, windows)
    }

    /// Launches the resolved command and returns the child's exit code.
    fn execute(&self, command: &ResolvedCommand) -> Result<i32, ExecutionError> {
        executor::execute(&command.executable, &command.args, command.working_dir.as_deref())
    }
}

/// Every tool, in the built-in discovery order.
pub fn registry() -> Vec<Box<dyn BuildTool>> {
    ToolKind::DEFAULT_ORDER.into_iter().map(tool_for).collect()
}

/// The implementation for `kind`.
pub fn tool_for(kind: ToolKind) -> Box<dyn BuildTool> {
    match kind {
        ToolKind::Gradle => Box::new(gradle::Gradle),
        ToolKind::Maven => Box::new(maven::Maven),
        ToolKind::Ant => Box::new(ant::Ant),
        ToolKind::Bach => Box::new(bach::Bach),
        ToolKind::Jbang => Box::new(jbang::Jbang),
    }
}

// --- Executable resolution shared by the tools ---

/// A project-local wrapper candidate.
#[derive(Debug)]
pub(crate) struct Wrapper {
    pub(crate) name: &'static str,
    pub(crate) found: Option<PathBuf>,
    pub(crate) docs: &'static str,
}

/// A globally installed binary looked up on `PATH`.
#[derive(Debug)]
pub(crate) struct Global {
    pub(crate) tool: ToolKind,
    pub(crate) name: &'static str,
    pub(crate) docs: &'static str,
}

/// Wrapper first, then the global binary.
///
/// Falling back to the global binary under an explicit selection prints a
/// hint to set up a wrapper. When neither exists the tool declines, or fails
/// with `MissingExecutable` under an explicit selection.
pub(crate) fn resolve_executable(
    session: &Session<'_>,
    config: &Config,
    wrapper: Option<Wrapper>,
    global: &Global,
) -> Result<Option<PathBuf>, DispatchError> {
    if let Some(found) = wrapper.as_ref().and_then(|w| w.found.clone()) {
        return Ok(Some(found));
    }

    if let Some(found) = locator::find_in_path(session.probe, global.name) {
        if let Some(wrapper) = &wrapper {
            hint_missing_wrapper(session, config, wrapper);
        }
        return Ok(Some(found));
    }

    missing_executable(session, global)
}

fn hint_missing_wrapper(session: &Session<'_>, config: &Config, wrapper: &Wrapper) {
    if session.explicit && !config.general.quiet {
        println!(t!("hint.no_wrapper"), wrapper = wrapper.name, docs = wrapper.docs);
        println!();
    }
}

/// Declines, or fails with [`DispatchError::MissingExecutable`] under an explicit selection.
pub(crate) fn missing_executable<T>(session: &Session<'_>, global: &Global) -> Result<Option<T>, DispatchError> {
    if session.explicit {
        return Err(DispatchError::MissingExecutable {
            tool: global.tool,
            executable: global.name.to_string(),
            docs: global.docs,
        });
    }
    log::debug!("{} declined: no {} on PATH", global.tool, global.name);
    Ok(None)
}

/// Declines, or fails under an explicit selection.
pub(crate) fn project_not_found<T>(session: &Session<'_>, tool: ToolKind) -> Result<Option<T>, DispatchError> {
    if session.explicit {
        return Err(DispatchError::ProjectNotFound { tool });
    }
    log::debug!("{} declined: no project", tool);
    Ok(None)
}

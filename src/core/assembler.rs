// src/core/assembler.rs

use crate::models::{Config, ResolvedCommand, ToolKind};
use std::fmt::Display;
use std::path::{Path, PathBuf};

/// Collects the final argument vector, the banner and the debug report for
/// one tool invocation, in the order the pieces are added.
#[derive(Debug)]
pub struct CommandAssembler {
    tool: ToolKind,
    executable: PathBuf,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
    banner: Vec<String>,
    debug_report: Vec<(String, String)>,
}

impl CommandAssembler {
    /// Starts a command for `executable`; the banner opens with "Using <tool> at ...".
    pub fn new(tool: ToolKind, executable: &Path) -> Self {
        let opening = format!(
            t!("banner.using"),
            tool = tool.display_name(),
            executable = executable.display()
        );
        Self {
            tool,
            executable: executable.to_path_buf(),
            args: Vec::new(),
            working_dir: None,
            banner: vec![opening],
            debug_report: Vec::new(),
        }
    }

    /// Appends a fragment to the banner.
    pub fn describe(&mut self, part: String) {
        self.banner.push(part);
    }

    /// Appends one argument.
    pub fn arg(&mut self, arg: impl Into<String>) {
        self.args.push(arg.into());
    }

    /// Appends `flag <path>`.
    pub fn path_flag(&mut self, flag: &str, path: &Path) {
        self.args.push(flag.to_string());
        self.args.push(path.display().to_string());
    }

    /// Appends every non-empty entry of `args`.
    pub fn extend_non_empty(&mut self, args: &[String]) {
        self.args
            .extend(args.iter().filter(|arg| !arg.is_empty()).cloned());
    }

    /// Runs the child in `dir` instead of the current directory.
    pub fn working_dir(&mut self, dir: &Path) {
        self.working_dir = Some(dir.to_path_buf());
    }

    /// Records a value for the `-gd` dump.
    pub fn debug(&mut self, label: &str, value: impl Display) {
        self.debug_report.push((label.to_string(), value.to_string()));
    }

    /// Records an optional path for the `-gd` dump; absent values show empty.
    pub fn debug_path(&mut self, label: &str, value: Option<&Path>) {
        let shown = value.map(|p| p.display().to_string()).unwrap_or_default();
        self.debug(label, shown);
    }

    /// Records an argument vector for the `-gd` dump, shell-quoted.
    pub fn debug_args(&mut self, label: &str, args: &[String]) {
        self.debug(label, render_args(args));
    }

    /// Closes the debug report and produces the command.
    pub fn finish(mut self, config: Config) -> ResolvedCommand {
        let actual = render_args(&self.args);
        self.debug("actual args", actual);

        ResolvedCommand {
            tool: self.tool,
            executable: self.executable,
            args: self.args,
            working_dir: self.working_dir,
            banner: self.banner.join(" "),
            debug_report: self.debug_report,
            config,
        }
    }
}

/// Renders `args` the way a POSIX shell would need them typed.
pub fn render_args(args: &[String]) -> String {
    shlex::try_join(args.iter().map(String::as_str)).unwrap_or_else(|_| format!("{:?}", args))
}

/// A discovered Gradle settings file is passed on only when it lives outside
/// both the project root and the working directory.
pub fn needs_settings_flag(settings_file: &Path, root_dir: &Path, working_dir: &Path) -> bool {
    match settings_file.parent() {
        Some(settings_dir) => settings_dir != root_dir && settings_dir != working_dir,
        None => false,
    }
}

// src/cli/dispatcher.rs

use crate::{
    cli::{help_text, version_text},
    constants::EXIT_DISPATCH_FAILURE,
    core::{arg_parser::ParsedArguments, config_loader::{self, ConfigLoader}},
    models::{Config, DispatcherFlag, ResolvedCommand, ToolKind},
    system::probe::Probe,
    tools::{self, BuildTool, DispatchError, Session},
};
use anyhow::{Context, Result};

/// What a dispatch decided to do.
#[derive(Debug)]
pub enum Outcome {
    /// `-gv`
    ShowVersion,
    /// `-gh`
    ShowHelp,
    /// `-gc`: the configuration that would apply.
    PrintConfig(Box<Config>),
    /// Launch `command` with `tool`.
    Execute {
        /// The tool that claimed the project.
        tool: ToolKind,
        /// What to launch.
        command: Box<ResolvedCommand>,
    },
}

/// Runs the tools in order until one claims the project.
pub struct Dispatcher<'a> {
    probe: &'a dyn Probe,
    tools: Vec<Box<dyn BuildTool>>,
}

impl std::fmt::Debug for Dispatcher<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kinds: Vec<_> = self.tools.iter().map(|tool| tool.kind()).collect();
        f.debug_struct("Dispatcher")
            .field("working_dir", &self.probe.working_dir())
            .field("tools", &kinds)
            .finish()
    }
}

impl<'a> Dispatcher<'a> {
    /// A dispatcher over every registered tool.
    pub fn new(probe: &'a dyn Probe) -> Self {
        Self::with_tools(probe, tools::registry())
    }

    /// A dispatcher over `tools` only.
    pub fn with_tools(probe: &'a dyn Probe, tools: Vec<Box<dyn BuildTool>>) -> Self {
        Self { probe, tools }
    }

    /// The full `gm` run: classify, resolve, print what the user asked for or
    /// launch the tool. Returns the process exit code.
    ///
    /// Dispatch failures are reported on stdout (unless quiet) and map to
    /// `-1`; only unexpected errors are returned.
    pub fn run(&self, raw_args: &[String]) -> Result<i32> {
        let args = ParsedArguments::parse(raw_args);

        let loader = match ConfigLoader::load(self.probe) {
            Ok(loader) => loader,
            Err(e) => return Ok(report(quiet_by_flag_or_user(&args, None), &DispatchError::from(e))),
        };

        let outcome = match self.resolve(&args, &loader) {
            Ok(outcome) => outcome,
            Err(e) => return Ok(report(quiet_by_flag_or_user(&args, Some(&loader)), &e)),
        };

        match outcome {
            Outcome::ShowVersion => {
                println!("{}", version_text());
                Ok(0)
            }
            Outcome::ShowHelp => {
                println!("{}", help_text());
                Ok(0)
            }
            Outcome::PrintConfig(config) => {
                let rendered = config_loader::render(&config).context("Failed to render the configuration")?;
                print!("{}", rendered);
                Ok(0)
            }
            Outcome::Execute { tool, command } => {
                let tool = self.tool(tool).context("Resolved tool is not registered")?;
                let quiet = command.config.general.quiet;

                // Nothing is printed for a command that cannot be launched.
                if let Err(e) = tool.verify(&command, self.probe.is_windows()) {
                    return Ok(report(quiet, &DispatchError::from(e)));
                }

                if !quiet {
                    println!("{}", command.banner);
                }
                if command.config.general.debug {
                    print_debug_report(&command);
                }
                tool.execute(&command)
                    .with_context(|| format!("Failed to run {}", command.executable.display()))
            }
        }
    }

    /// Decides what to do without launching anything.
    pub fn resolve(&self, args: &ParsedArguments, loader: &ConfigLoader) -> Result<Outcome, DispatchError> {
        if args.has_flag(DispatcherFlag::Version) {
            return Ok(Outcome::ShowVersion);
        }
        if args.has_flag(DispatcherFlag::Help) {
            return Ok(Outcome::ShowHelp);
        }

        let forcing = args.forcing_flags();
        if forcing.len() > 1 {
            let flags = forcing.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
            return Err(DispatchError::AmbiguousFlags { flags });
        }

        let resolved = match args.forced_tools().first().copied() {
            Some(kind) => self.resolve_with(kind, args, loader, true)?,
            None => self.discover(args, loader)?,
        };

        match resolved {
            Some(command) if args.has_flag(DispatcherFlag::PrintConfig) => {
                Ok(Outcome::PrintConfig(Box::new(command.config)))
            }
            Some(command) => Ok(Outcome::Execute {
                tool: command.tool,
                command: Box::new(command),
            }),
            None if args.has_flag(DispatcherFlag::PrintConfig) => {
                Ok(Outcome::PrintConfig(Box::new(loader.user_only()?)))
            }
            None => Err(DispatchError::NoProjectFound),
        }
    }

    /// Tries the configured discovery order first, then the remaining tools
    /// in the built-in order.
    fn discover(&self, args: &ParsedArguments, loader: &ConfigLoader) -> Result<Option<ResolvedCommand>, DispatchError> {
        let user = loader.user_only()?;
        let mut order = user.general.discovery.clone();
        for kind in ToolKind::DEFAULT_ORDER {
            if !order.contains(&kind) {
                order.push(kind);
            }
        }
        log::debug!("Discovery order: {:?}", order);

        for kind in order {
            if let Some(command) = self.resolve_with(kind, args, loader, false)? {
                return Ok(Some(command));
            }
        }
        Ok(None)
    }

    fn resolve_with(
        &self,
        kind: ToolKind,
        args: &ParsedArguments,
        loader: &ConfigLoader,
        explicit: bool,
    ) -> Result<Option<ResolvedCommand>, DispatchError> {
        let Some(tool) = self.tool(kind) else {
            return Ok(None);
        };
        let session = Session {
            probe: self.probe,
            loader,
            args,
            explicit,
        };
        log::debug!("Trying {} (explicit: {})", kind, explicit);
        tool.try_resolve(&session)
    }

    fn tool(&self, kind: ToolKind) -> Option<&dyn BuildTool> {
        self.tools
            .iter()
            .find(|tool| tool.kind() == kind)
            .map(|tool| &**tool)
    }
}

/// Quiet mode before any project config is known: `-gq` or the user file.
fn quiet_by_flag_or_user(args: &ParsedArguments, loader: Option<&ConfigLoader>) -> bool {
    args.has_flag(DispatcherFlag::Quiet)
        || loader
            .and_then(|l| l.user_only().ok())
            .is_some_and(|config| config.general.quiet)
}

/// Prints a dispatch failure unless quiet and returns the failure exit code.
fn report(quiet: bool, error: &DispatchError) -> i32 {
    log::debug!("Dispatch failed: {:?}", error);
    if !quiet {
        println!("{}", error);
    }
    EXIT_DISPATCH_FAILURE
}

/// The `-gd` dump: one aligned `label = value` line per entry.
fn print_debug_report(command: &ResolvedCommand) {
    for (label, value) in &command.debug_report {
        println!("{:<22} = {}", label, value);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::probe::testing::{TestProbe, touch};
    use std::fs;
    use tempfile::TempDir;

    fn resolve(probe: &TestProbe, raw: &[&str]) -> Result<Outcome, DispatchError> {
        let loader = ConfigLoader::load(probe).unwrap();
        Dispatcher::new(probe).resolve(&ParsedArguments::parse(raw), &loader)
    }

    #[test]
    fn test_version_and_help_win() {
        let tmp = TempDir::new().unwrap();
        let probe = TestProbe::new(tmp.path());

        assert!(matches!(resolve(&probe, &["-gv", "-gg", "-gm"]), Ok(Outcome::ShowVersion)));
        assert!(matches!(resolve(&probe, &["-gh"]), Ok(Outcome::ShowHelp)));
    }

    #[test]
    fn test_conflicting_force_flags() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("pom.xml"));
        let probe = TestProbe::new(tmp.path());

        let err = resolve(&probe, &["-gg", "-gm", "build"]).unwrap_err();
        match err {
            DispatchError::AmbiguousFlags { flags } => {
                assert!(flags.contains("-gg") && flags.contains("-gm"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_no_project_anywhere() {
        let tmp = TempDir::new().unwrap();
        let empty = tmp.path().join("nothing").join("here");
        fs::create_dir_all(&empty).unwrap();
        let probe = TestProbe::new(&empty);

        let err = resolve(&probe, &["build"]).unwrap_err();
        assert!(matches!(err, DispatchError::NoProjectFound));
        assert!(err.to_string().starts_with("Did not find"));
    }

    #[test]
    fn test_first_claiming_tool_wins() {
        // --- Setup ---
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("pom.xml"));
        touch(&tmp.path().join("build.gradle"));
        touch(&tmp.path().join("mvnw"));
        let probe = TestProbe::new(tmp.path());

        // --- Execute ---
        // Gradle comes first but has no executable, so it declines.
        let outcome = resolve(&probe, &["verify"]).unwrap();

        // --- Assert ---
        match outcome {
            Outcome::Execute { tool, command } => {
                assert_eq!(tool, ToolKind::Maven);
                assert_eq!(command.args.last().map(String::as_str), Some("verify"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_configured_discovery_order_comes_first() {
        let tmp = TempDir::new().unwrap();
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).unwrap();
        fs::write(home.join(".gm.toml"), "[general]\ndiscovery = [\"maven\"]\n").unwrap();
        let project = tmp.path().join("project");
        touch(&project.join("pom.xml"));
        touch(&project.join("build.gradle"));
        touch(&project.join("mvnw"));
        touch(&project.join("gradlew"));
        let probe = TestProbe::new(&project).with_home(&home);

        let outcome = resolve(&probe, &["build"]).unwrap();
        assert!(matches!(outcome, Outcome::Execute { tool: ToolKind::Maven, .. }));
    }

    #[test]
    fn test_forced_tool_skips_others() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("pom.xml"));
        touch(&tmp.path().join("mvnw"));
        let probe = TestProbe::new(tmp.path());

        let err = resolve(&probe, &["-gg", "build"]).unwrap_err();
        assert!(matches!(err, DispatchError::MissingExecutable { tool: ToolKind::Gradle, .. }));
    }

    #[test]
    fn test_print_config_outcomes() {
        let tmp = TempDir::new().unwrap();
        let probe = TestProbe::new(tmp.path());
        assert!(matches!(resolve(&probe, &["-gc"]), Ok(Outcome::PrintConfig(_))));

        touch(&tmp.path().join("pom.xml"));
        touch(&tmp.path().join("mvnw"));
        fs::write(tmp.path().join(".gm.toml"), "[maven]\nreplace = false\n").unwrap();
        match resolve(&probe, &["-gc"]).unwrap() {
            Outcome::PrintConfig(config) => assert!(!config.maven.goals.replace),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_run_reports_failures_with_exit_code() {
        let tmp = TempDir::new().unwrap();
        let probe = TestProbe::new(tmp.path());
        let args = vec!["-gq".to_string(), "-gg".to_string(), "-gm".to_string()];

        let code = Dispatcher::new(&probe).run(&args).unwrap();
        assert_eq!(code, EXIT_DISPATCH_FAILURE);
    }

    #[cfg(unix)]
    #[test]
    fn test_run_rejects_wrapper_without_execute_bit() {
        // --- Setup ---
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("pom.xml"));
        touch(&tmp.path().join("mvnw"));
        let probe = TestProbe::new(tmp.path());
        let args = vec!["-gq".to_string(), "verify".to_string()];

        // --- Execute ---
        let code = Dispatcher::new(&probe).run(&args).unwrap();

        // --- Assert ---
        assert_eq!(code, EXIT_DISPATCH_FAILURE);
    }
}

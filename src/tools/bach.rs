// src/tools/bach.rs

use super::{BuildTool, DispatchError, Global, Session, missing_executable, project_not_found};
use crate::{
    constants::{BACH_MARKER_DIR, BACH_MODULE, BACH_RELEASES_URL, JAVA_INSTALL_URL},
    core::{assembler::CommandAssembler, locator},
    models::{ResolvedCommand, ToolKind},
};
use std::path::{Path, PathBuf};

/// The program that runs Bach plus the arguments it needs before the user's.
#[derive(Debug, PartialEq, Eq)]
struct Launcher {
    program: PathBuf,
    args: Vec<String>,
}

impl Launcher {
    /// `java -p <module path> -m com.github.sormuras.bach build`
    fn module(java: PathBuf, module_path: &Path) -> Self {
        Self {
            program: java,
            args: vec![
                "-p".to_string(),
                module_path.display().to_string(),
                "-m".to_string(),
                BACH_MODULE.to_string(),
                "build".to_string(),
            ],
        }
    }

    /// `jshell <release url>/build.jsh`
    fn bootstrap(jshell: PathBuf, version: &str) -> Self {
        Self {
            program: jshell,
            args: vec![format!("{}/{}/build.jsh", BACH_RELEASES_URL, version)],
        }
    }
}

/// Prefers a prebuilt module path (`.bach/bin`, then `.bach/cache`) run by
/// `java`, and falls back to the `jshell` bootstrap script.
fn pick_launcher(
    session: &Session<'_>,
    root: Option<&Path>,
    version: &str,
) -> Option<Launcher> {
    let probe = session.probe;
    let java = locator::find_in_path(probe, session.platform_name("java", "java.exe"));
    let jshell = locator::find_in_path(probe, session.platform_name("jshell", "jshell.exe"));

    if let (Some(java), Some(root)) = (&java, root) {
        let marker = root.join(BACH_MARKER_DIR);
        for module_path in [marker.join("bin"), marker.join("cache")] {
            if probe.exists(&module_path) {
                return Some(Launcher::module(java.clone(), &module_path));
            }
        }
    }

    jshell.map(|jshell| Launcher::bootstrap(jshell, version))
}

#[derive(Debug)]
pub struct Bach;

impl BuildTool for Bach {
    fn kind(&self) -> ToolKind {
        ToolKind::Bach
    }

    fn try_resolve(&self, session: &Session<'_>) -> Result<Option<ResolvedCommand>, DispatchError> {
        let wd = session.working_dir();
        let root = locator::find_marker_dir(session.probe, wd, BACH_MARKER_DIR);
        let config = session.config_for(Some(root.as_deref().unwrap_or(wd)))?;

        let Some(launcher) = pick_launcher(session, root.as_deref(), &config.bach.version) else {
            let global = Global {
                tool: ToolKind::Bach,
                name: session.platform_name("java", "java.exe"),
                docs: JAVA_INSTALL_URL,
            };
            return missing_executable(session, &global);
        };

        let Some(root) = root else {
            return project_not_found(session, ToolKind::Bach);
        };

        // Bach only runs from the directory that holds `.bach/`.
        if root != wd {
            if session.explicit {
                return Err(DispatchError::WrongBachDirectory {
                    root: root.display().to_string(),
                });
            }
            log::debug!("Bach declined: {} is not the project root {}", wd.display(), root.display());
            return Ok(None);
        }

        let remaining = session.args.remaining();
        let mut assembler = CommandAssembler::new(ToolKind::Bach, &launcher.program);
        assembler.describe(format!(t!("banner.root_dir"), dir = root.display()));
        assembler.extend_non_empty(&launcher.args);
        assembler.extend_non_empty(&remaining.tool);
        assembler.extend_non_empty(&remaining.positional);

        assembler.debug("rootDir", root.display());
        assembler.debug("executable", launcher.program.display());
        assembler.debug("version", &config.bach.version);
        assembler.debug_args("original args", &remaining.positional);

        Ok(Some(assembler.finish(config)))
    }
}

// src/tools/ant.rs

use super::{BuildTool, DispatchError, Global, Session, project_not_found, resolve_executable};
use crate::{
    constants::ANT_INSTALL_URL,
    core::{arg_parser::FlagScope, assembler::CommandAssembler, locator, paths},
    models::{ResolvedCommand, ToolKind},
};
use std::path::Path;

const BUILD_FILE: &str = "build.xml";

#[derive(Debug)]
pub struct Ant;

impl BuildTool for Ant {
    fn kind(&self) -> ToolKind {
        ToolKind::Ant
    }

    fn try_resolve(&self, session: &Session<'_>) -> Result<Option<ResolvedCommand>, DispatchError> {
        let probe = session.probe;
        let wd = session.working_dir();

        let (explicit, remaining) = session
            .args
            .remaining()
            .take(&["-f", "-file", "-buildfile"], FlagScope::ToolOnly);
        let explicit_build_file = explicit.map(|raw| paths::resolve_user_path(probe, &raw));
        let build_file = locator::find_upwards(probe, wd, |_| vec![BUILD_FILE.to_string()]);

        let root_dir = explicit_build_file
            .as_ref()
            .filter(|file| probe.exists(file))
            .or(build_file.as_ref())
            .and_then(|file| file.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| wd.to_path_buf());
        let config = session.config_for(Some(&root_dir))?;

        // Ant has no wrapper convention.
        let global = Global {
            tool: ToolKind::Ant,
            name: session.platform_name("ant", "ant.bat"),
            docs: ANT_INSTALL_URL,
        };
        let Some(executable) = resolve_executable(session, &config, None, &global)? else {
            return Ok(None);
        };

        let Some(file) = explicit_build_file.as_ref().or(build_file.as_ref()) else {
            return project_not_found(session, ToolKind::Ant);
        };

        let mut assembler = CommandAssembler::new(ToolKind::Ant, &executable);
        assembler.path_flag("-f", file);
        assembler.describe(format!(t!("banner.build_file"), file = file.display()));
        assembler.extend_non_empty(&remaining.tool);
        assembler.arg(format!("-Dbasedir={}", root_dir.display()));
        assembler.extend_non_empty(&remaining.positional);

        assembler.debug("rootDir", root_dir.display());
        assembler.debug("executable", executable.display());
        assembler.debug_path("buildFile", build_file.as_deref());
        assembler.debug_path("explicitBuildFile", explicit_build_file.as_deref());
        assembler.debug_args("original args", &remaining.positional);

        Ok(Some(assembler.finish(config)))
    }
}

// src/tools/maven.rs

use super::{BuildTool, DispatchError, Global, Session, Wrapper, project_not_found, resolve_executable};
use crate::{
    constants::{MAVEN_INSTALL_URL, MAVEN_WRAPPER_URL},
    core::{
        arg_parser::FlagScope,
        assembler::CommandAssembler,
        locator, paths,
        remapper::{self, MatchMode},
    },
    models::{DispatcherFlag, ResolvedCommand, ToolKind},
    system::probe::Probe,
};
use std::path::{Path, PathBuf};

const POM: &str = "pom.xml";

/// Climbs from the nearest `pom.xml` while the parent directory holds one too.
/// The last one reached is the root of the multi-module build.
fn topmost_contiguous_pom(probe: &dyn Probe, nearest: &Path) -> PathBuf {
    let mut root = nearest.to_path_buf();
    loop {
        let parent_pom = root
            .parent()
            .and_then(Path::parent)
            .map(|dir| dir.join(POM))
            .filter(|candidate| candidate != &root && probe.exists(candidate));
        match parent_pom {
            Some(candidate) => root = candidate,
            None => return root,
        }
    }
}

#[derive(Debug)]
pub struct Maven;

impl BuildTool for Maven {
    fn kind(&self) -> ToolKind {
        ToolKind::Maven
    }

    fn try_resolve(&self, session: &Session<'_>) -> Result<Option<ResolvedCommand>, DispatchError> {
        let probe = session.probe;
        let wd = session.working_dir();

        // --- 1. Explicit overrides and discovery ---
        let (explicit, remaining) = session
            .args
            .remaining()
            .take(&["-f", "--file"], FlagScope::ToolThenPositional);
        let explicit_build_file = explicit.map(|raw| paths::resolve_user_path(probe, &raw));

        let build_file = locator::find_upwards(probe, wd, |_| vec![POM.to_string()]);
        let root_build_file = build_file.as_deref().map(|pom| topmost_contiguous_pom(probe, pom));

        let root_dir = explicit_build_file
            .as_ref()
            .filter(|file| probe.exists(file))
            .or(root_build_file.as_ref())
            .or(build_file.as_ref())
            .and_then(|file| file.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| wd.to_path_buf());
        let config = session.config_for(Some(&root_dir))?;

        // --- 2. Executable: mvnd when asked for, else wrapper, else mvn ---
        let mvnd = if config.maven.mvnd {
            locator::find_in_path(probe, session.platform_name("mvnd", "mvnd.cmd"))
        } else {
            None
        };
        let executable = match mvnd {
            Some(daemon) => daemon,
            None => {
                let wrapper_name = session.platform_name("mvnw", "mvnw.bat");
                let wrapper = Wrapper {
                    name: wrapper_name,
                    found: locator::find_upwards(probe, wd, |_| vec![wrapper_name.to_string()]),
                    docs: MAVEN_WRAPPER_URL,
                };
                let global = Global {
                    tool: ToolKind::Maven,
                    name: session.platform_name("mvn", "mvn.bat"),
                    docs: MAVEN_INSTALL_URL,
                };
                match resolve_executable(session, &config, Some(wrapper), &global)? {
                    Some(found) => found,
                    None => return Ok(None),
                }
            }
        };

        if explicit_build_file.is_none() && build_file.is_none() {
            return project_not_found(session, ToolKind::Maven);
        }

        // --- 3. Assemble ---
        let nearest = session.has_flag(DispatcherFlag::Nearest);
        let mut assembler = CommandAssembler::new(ToolKind::Maven, &executable);

        let build_flag = explicit_build_file
            .as_ref()
            .or(build_file.as_ref().filter(|_| nearest))
            .or(root_build_file.as_ref());
        if let Some(file) = build_flag {
            assembler.path_flag("-f", file);
            assembler.describe(format!(t!("banner.build_file"), file = file.display()));
        }

        assembler.extend_non_empty(&remaining.tool);

        let replaced = if config.maven.goals.replace {
            remapper::remap_goals(&remaining.positional, &config.maven.goals.mappings, MatchMode::Exact)
        } else {
            remaining.positional.clone()
        };
        assembler.extend_non_empty(&replaced);

        assembler.debug("nearest", nearest);
        assembler.debug("replace", config.maven.goals.replace);
        assembler.debug("mvnd", config.maven.mvnd);
        assembler.debug("rootDir", root_dir.display());
        assembler.debug_path("rootBuildFile", root_build_file.as_deref());
        assembler.debug_path("buildFile", build_file.as_deref());
        assembler.debug_path("explicitBuildFile", explicit_build_file.as_deref());
        assembler.debug_args("original args", &remaining.positional);
        if config.maven.goals.replace {
            assembler.debug_args("replaced args", &replaced);
        }

        Ok(Some(assembler.finish(config)))
    }
}

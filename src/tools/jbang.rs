// src/tools/jbang.rs

use super::{BuildTool, DispatchError, Global, Session, Wrapper, project_not_found, resolve_executable};
use crate::{
    constants::JBANG_INSTALL_URL,
    core::{assembler::CommandAssembler, locator, paths},
    models::{ResolvedCommand, SourceKind, ToolKind},
};
use lazy_static::lazy_static;
use regex::Regex;
use std::path::{Path, PathBuf};

lazy_static! {
    static ref URL_RE: Regex = Regex::new(r"^(https?|file):").unwrap();
    // `alias@catalog`
    static ref CATALOG_RE: Regex = Regex::new(r".+@.+").unwrap();
    // `group:artifact:version`
    static ref COORDINATE_RE: Regex = Regex::new(r".+:.+:.+").unwrap();
}

/// URLs, catalog aliases and Maven coordinates that jbang can launch directly.
pub fn is_remote_source(candidate: &str) -> bool {
    URL_RE.is_match(candidate) || CATALOG_RE.is_match(candidate) || COORDINATE_RE.is_match(candidate)
}

/// The kind of a local launchable file, judged by its extension.
pub fn source_kind(candidate: &str) -> Option<SourceKind> {
    SourceKind::DEFAULT_ORDER
        .into_iter()
        .find(|kind| candidate.ends_with(&format!(".{}", kind.extension())))
}

/// A source named on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ExplicitSource {
    Remote(String),
    File(PathBuf),
}

/// The first positional argument that does not look like a flag, if a
/// recognizer accepts it.
fn explicit_source(session: &Session<'_>, positional: &[String], remote_sources: bool) -> Option<ExplicitSource> {
    let candidate = positional.iter().find(|arg| !arg.starts_with('-'))?;

    if remote_sources && is_remote_source(candidate) {
        return Some(ExplicitSource::Remote(candidate.clone()));
    }
    source_kind(candidate).map(|_| ExplicitSource::File(paths::resolve_user_path(session.probe, candidate)))
}

/// Scans the working directory (and only it) for a launchable file, trying
/// the extensions in `order`.
fn discover_source(session: &Session<'_>, order: &[SourceKind]) -> Option<PathBuf> {
    let files = session.probe.list_files(session.working_dir());
    order.iter().find_map(|kind| {
        files
            .iter()
            .find(|file| file.extension().is_some_and(|ext| ext == kind.extension()))
            .cloned()
    })
}

#[derive(Debug)]
pub struct Jbang;

impl BuildTool for Jbang {
    fn kind(&self) -> ToolKind {
        ToolKind::Jbang
    }

    fn try_resolve(&self, session: &Session<'_>) -> Result<Option<ResolvedCommand>, DispatchError> {
        let probe = session.probe;
        let wd = session.working_dir();
        let remaining = session.args.remaining();

        // The working directory config decides the recognizers and the scan order.
        let mut config = session.config_for(Some(wd))?;
        let explicit = explicit_source(session, &remaining.positional, config.jbang.remote_sources);
        let source_file = match explicit {
            Some(_) => None,
            None => discover_source(session, &config.jbang.discovery),
        };

        let root_dir = match &explicit {
            Some(ExplicitSource::File(file)) if probe.exists(file) => file.parent().map(Path::to_path_buf),
            _ => None,
        };
        if let Some(dir) = root_dir.as_deref()
            && dir != wd
        {
            config = session.config_for(Some(dir))?;
        }

        // The wrapper is only looked for in the working directory.
        let wrapper_name = session.platform_name("jbang", "jbang.cmd");
        let wrapper = Wrapper {
            name: wrapper_name,
            found: locator::find_in_dir(probe, wd, wrapper_name),
            docs: JBANG_INSTALL_URL,
        };
        let global = Global {
            tool: ToolKind::Jbang,
            name: session.platform_name("jbang", "jbang.cmd"),
            docs: JBANG_INSTALL_URL,
        };
        let Some(executable) = resolve_executable(session, &config, Some(wrapper), &global)? else {
            return Ok(None);
        };

        let mut assembler = CommandAssembler::new(ToolKind::Jbang, &executable);
        assembler.extend_non_empty(&remaining.tool);

        match (&explicit, &source_file) {
            (Some(ExplicitSource::Remote(source)), _) => {
                assembler.describe(format!(t!("banner.source"), source = source));
            }
            (Some(ExplicitSource::File(file)), _) => {
                assembler.describe(format!(t!("banner.source"), source = file.display()));
            }
            (None, Some(file)) => {
                assembler.arg(file.display().to_string());
                assembler.describe(format!(t!("banner.source"), source = file.display()));
            }
            (None, None) => return project_not_found(session, ToolKind::Jbang),
        }

        assembler.extend_non_empty(&remaining.positional);

        let discovery: Vec<&str> = config.jbang.discovery.iter().map(|kind| kind.extension()).collect();
        let explicit_shown = match &explicit {
            Some(ExplicitSource::Remote(source)) => source.clone(),
            Some(ExplicitSource::File(file)) => file.display().to_string(),
            None => String::new(),
        };
        assembler.debug("discovery", discovery.join(", "));
        assembler.debug("pwd", wd.display());
        assembler.debug_path("sourceFile", source_file.as_deref());
        assembler.debug("explicitSourceFile", explicit_shown);
        assembler.debug_args("original args", &remaining.positional);

        Ok(Some(assembler.finish(config)))
    }
}

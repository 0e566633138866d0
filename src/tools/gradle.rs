// src/tools/gradle.rs

use super::{BuildTool, DispatchError, Global, Session, Wrapper, project_not_found, resolve_executable};
use crate::{
    constants::{GRADLE_INSTALL_URL, GRADLE_WRAPPER_URL},
    core::{
        arg_parser::FlagScope,
        assembler::{CommandAssembler, needs_settings_flag},
        locator, paths,
        remapper::{self, MatchMode},
    },
    models::{DispatcherFlag, ResolvedCommand, ToolKind},
};
use std::path::{Path, PathBuf};

const SETTINGS_FILES: [&str; 2] = ["settings.gradle", "settings.gradle.kts"];
const ROOT_BUILD_FILES: [&str; 2] = ["build.gradle", "build.gradle.kts"];

/// Build files tried in each directory: the conventional names, then the
/// ones named after the directory itself.
fn build_file_candidates(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = ROOT_BUILD_FILES.iter().map(|s| (*s).to_string()).collect();
    let base = paths::file_name(dir);
    if !base.is_empty() {
        names.push(format!("{}.gradle", base));
        names.push(format!("{}.gradle.kts", base));
    }
    names
}

fn settings_candidates(_: &Path) -> Vec<String> {
    SETTINGS_FILES.iter().map(|s| (*s).to_string()).collect()
}

fn root_build_candidates(_: &Path) -> Vec<String> {
    ROOT_BUILD_FILES.iter().map(|s| (*s).to_string()).collect()
}

/// What discovery and the explicit flags found for a Gradle project.
#[derive(Debug, Default)]
struct GradleLayout {
    build_file: Option<PathBuf>,
    settings_file: Option<PathBuf>,
    root_build_file: Option<PathBuf>,
    explicit_build_file: Option<PathBuf>,
    explicit_settings_file: Option<PathBuf>,
    explicit_project_dir: Option<PathBuf>,
}

impl GradleLayout {
    /// The first existing of: explicit project dir, explicit build file,
    /// root build file, explicit settings file, settings file, build file.
    fn root_dir(&self, session: &Session<'_>) -> PathBuf {
        let exists = |p: &Option<PathBuf>| p.as_ref().filter(|path| session.probe.exists(path)).cloned();

        if let Some(dir) = exists(&self.explicit_project_dir) {
            return dir;
        }
        let file_based = exists(&self.explicit_build_file)
            .or_else(|| exists(&self.root_build_file))
            .or_else(|| exists(&self.explicit_settings_file))
            .or_else(|| exists(&self.settings_file))
            .or_else(|| self.build_file.clone());

        file_based
            .and_then(|file| file.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| session.working_dir().to_path_buf())
    }
}

#[derive(Debug)]
pub struct Gradle;

impl BuildTool for Gradle {
    fn kind(&self) -> ToolKind {
        ToolKind::Gradle
    }

    fn try_resolve(&self, session: &Session<'_>) -> Result<Option<ResolvedCommand>, DispatchError> {
        let probe = session.probe;
        let wd = session.working_dir();

        // --- 1. Explicit overrides ---
        let remaining = session.args.remaining();
        let (project_dir, remaining) = remaining.take(&["-p", "--project-dir"], FlagScope::ToolOnly);
        let (build_file, remaining) = remaining.take(&["-b", "--build-file"], FlagScope::ToolThenPositional);
        let (settings_file, remaining) = remaining.take(&["-c", "--settings-file"], FlagScope::ToolThenPositional);

        let mut layout = GradleLayout {
            explicit_project_dir: project_dir.map(|raw| paths::resolve_user_path(probe, &raw)),
            explicit_build_file: build_file.map(|raw| paths::resolve_user_path(probe, &raw)),
            explicit_settings_file: settings_file.map(|raw| paths::resolve_user_path(probe, &raw)),
            ..Default::default()
        };

        // --- 2. Discovery ---
        layout.settings_file = locator::find_upwards(probe, wd, settings_candidates);
        layout.build_file = locator::find_upwards(probe, wd, build_file_candidates);

        // The root walk starts above the working directory and stops at the
        // settings directory, or at the explicit build file's directory.
        let boundary = layout
            .explicit_build_file
            .as_ref()
            .or(layout.settings_file.as_ref())
            .and_then(|file| file.parent().map(Path::to_path_buf));
        layout.root_build_file = wd
            .parent()
            .and_then(|parent| locator::find_upwards_bounded(probe, parent, boundary.as_deref(), root_build_candidates));

        let root_dir = layout.root_dir(session);
        let config = session.config_for(Some(&root_dir))?;

        // --- 3. Executable ---
        let wrapper_name = session.platform_name("gradlew", "gradlew.bat");
        let wrapper_start = layout.explicit_project_dir.as_deref().unwrap_or(wd);
        let wrapper = Wrapper {
            name: wrapper_name,
            found: locator::find_upwards(probe, wrapper_start, |_| vec![wrapper_name.to_string()]),
            docs: GRADLE_WRAPPER_URL,
        };
        let global = Global {
            tool: ToolKind::Gradle,
            name: session.platform_name("gradle", "gradle.bat"),
            docs: GRADLE_INSTALL_URL,
        };
        let Some(executable) = resolve_executable(session, &config, Some(wrapper), &global)? else {
            return Ok(None);
        };

        // --- 4. Is there a project at all? ---
        if layout.explicit_project_dir.is_none() && layout.explicit_build_file.is_none() {
            if layout.root_build_file.is_none() {
                layout.root_build_file = layout.build_file.clone();
            }

            if layout.build_file.is_none() {
                if let Some(settings) = &layout.explicit_settings_file {
                    if !config.general.quiet {
                        println!(t!("notice.explicit_settings_without_build"), file = settings.display());
                    }
                } else if let Some(settings) = &layout.settings_file {
                    if !config.general.quiet {
                        println!(t!("notice.settings_without_build"), file = settings.display());
                    }
                } else {
                    return project_not_found(session, ToolKind::Gradle);
                }
            }
        }

        // --- 5. Assemble ---
        let nearest = session.has_flag(DispatcherFlag::Nearest);
        let mut assembler = CommandAssembler::new(ToolKind::Gradle, &executable);

        if let Some(project_dir) = &layout.explicit_project_dir {
            assembler.working_dir(project_dir);
            assembler.describe(format!(t!("banner.project_dir"), dir = project_dir.display()));
        } else {
            let build_flag = layout
                .explicit_build_file
                .as_ref()
                .or(layout.build_file.as_ref().filter(|_| nearest))
                .or(layout.root_build_file.as_ref());

            if let Some(file) = build_flag {
                assembler.path_flag("-b", file);
                assembler.describe(format!(t!("banner.build_file"), file = file.display()));
            }

            let settings_flag = match (&layout.explicit_settings_file, &layout.settings_file) {
                (Some(explicit), _) => Some(explicit),
                (None, Some(found)) if needs_settings_flag(found, &root_dir, wd) => Some(found),
                _ => None,
            };
            if let Some(file) = settings_flag {
                assembler.path_flag("-c", file);
            }

            if build_flag.is_none()
                && let Some(file) = layout.explicit_settings_file.as_ref().or(layout.settings_file.as_ref())
            {
                assembler.describe(format!(t!("banner.settings_file"), file = file.display()));
            }
        }

        assembler.extend_non_empty(&remaining.tool);

        let replaced = if config.gradle.replace {
            remapper::remap_goals(&remaining.positional, &config.gradle.mappings, MatchMode::SubPath)
        } else {
            remaining.positional.clone()
        };
        assembler.extend_non_empty(&replaced);

        // --- 6. Debug report ---
        assembler.debug("nearest", nearest);
        assembler.debug("replace", config.gradle.replace);
        assembler.debug("pwd", wd.display());
        assembler.debug("rootDir", root_dir.display());
        assembler.debug_path("rootBuildFile", layout.root_build_file.as_deref());
        assembler.debug_path("buildFile", layout.build_file.as_deref());
        assembler.debug_path("settingsFile", layout.settings_file.as_deref());
        assembler.debug_path("explicitBuildFile", layout.explicit_build_file.as_deref());
        assembler.debug_path("explicitSettingsFile", layout.explicit_settings_file.as_deref());
        assembler.debug_path("explicitProjectDir", layout.explicit_project_dir.as_deref());
        assembler.debug_args("original args", &remaining.positional);
        if config.gradle.replace {
            assembler.debug_args("replaced args", &replaced);
        }

        Ok(Some(assembler.finish(config)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{arg_parser::ParsedArguments, config_loader::ConfigLoader};
    use crate::system::probe::testing::{TestProbe, touch};
    use crate::tools::testing::session;
    use std::fs;
    use tempfile::TempDir;

    fn resolve(probe: &TestProbe, raw: &[&str], explicit: bool) -> Result<Option<ResolvedCommand>, DispatchError> {
        let loader = ConfigLoader::default();
        let args = ParsedArguments::parse(raw);
        Gradle.try_resolve(&session(probe, &loader, &args, explicit))
    }

    fn path_arg(path: &Path) -> String {
        path.display().to_string()
    }

    #[test]
    fn test_wrapper_and_sub_match_remap() {
        // --- Setup ---
        let tmp = TempDir::new().unwrap();
        let build = touch(&tmp.path().join("build.gradle"));
        touch(&tmp.path().join("settings.gradle"));
        let gradlew = touch(&tmp.path().join("gradlew"));
        let probe = TestProbe::new(tmp.path());

        // --- Execute ---
        let command = resolve(&probe, &[":sub:verify"], false).unwrap().unwrap();

        // --- Assert ---
        assert_eq!(command.executable, gradlew);
        assert_eq!(command.args, vec!["-b".to_string(), path_arg(&build), ":sub:build".to_string()]);
        assert!(command.working_dir.is_none());
    }

    #[test]
    fn test_explicit_build_file_used_verbatim() {
        // --- Setup ---
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join("project");
        touch(&project.join("build.gradle"));
        touch(&project.join("gradlew"));
        let other = touch(&tmp.path().join("elsewhere").join("other.gradle"));
        let probe = TestProbe::new(&project);
        let explicit = path_arg(&other);

        // --- Execute ---
        let command = resolve(&probe, &["-b", &explicit, "build"], false).unwrap().unwrap();

        // --- Assert ---
        assert_eq!(command.args, vec!["-b".to_string(), explicit.clone(), "build".to_string()]);
        let root_dir = command
            .debug_report
            .iter()
            .find(|(label, _)| label == "rootDir")
            .map(|(_, value)| value.clone());
        assert_eq!(root_dir, Some(path_arg(&tmp.path().join("elsewhere"))));
    }

    #[test]
    fn test_root_build_file_above_module() {
        // --- Setup ---
        let tmp = TempDir::new().unwrap();
        let root_build = touch(&tmp.path().join("build.gradle"));
        touch(&tmp.path().join("settings.gradle"));
        touch(&tmp.path().join("gradlew"));
        let module = tmp.path().join("app");
        let module_build = touch(&module.join("app.gradle.kts"));
        let probe = TestProbe::new(&module);

        // --- Execute ---
        let root_run = resolve(&probe, &["compile"], false).unwrap().unwrap();
        let nearest_run = resolve(&probe, &["-gn", "compile"], false).unwrap().unwrap();

        // --- Assert ---
        assert_eq!(root_run.args, vec!["-b".to_string(), path_arg(&root_build), "classes".to_string()]);
        assert_eq!(
            nearest_run.args,
            vec!["-b".to_string(), path_arg(&module_build), "classes".to_string()]
        );
    }

    #[test]
    fn test_root_walk_stops_at_settings_dir() {
        // --- Setup ---
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("build.gradle"));
        let project = tmp.path().join("project");
        touch(&project.join("settings.gradle"));
        touch(&project.join("gradlew"));
        let module = project.join("lib");
        let module_build = touch(&module.join("build.gradle"));
        let probe = TestProbe::new(&module);

        // --- Execute ---
        let command = resolve(&probe, &["assemble"], false).unwrap().unwrap();

        // --- Assert ---
        assert_eq!(command.args.get(1), Some(&path_arg(&module_build)));
    }

    #[test]
    fn test_explicit_project_dir_sets_working_dir() {
        let tmp = TempDir::new().unwrap();
        let sub = tmp.path().join("sub");
        touch(&sub.join("build.gradle"));
        let gradlew = touch(&sub.join("gradlew"));
        let probe = TestProbe::new(tmp.path());

        let command = resolve(&probe, &["-p", "sub", "build"], false).unwrap().unwrap();

        assert_eq!(command.executable, gradlew);
        assert_eq!(command.working_dir, Some(sub));
        assert_eq!(command.args, vec!["build".to_string()]);
    }

    #[test]
    fn test_explicit_settings_file_always_passed() {
        let tmp = TempDir::new().unwrap();
        let build = touch(&tmp.path().join("build.gradle"));
        touch(&tmp.path().join("gradlew"));
        let settings = touch(&tmp.path().join("ci").join("settings.gradle"));
        let probe = TestProbe::new(tmp.path());

        let command = resolve(&probe, &["--settings-file=ci/settings.gradle", "build"], false)
            .unwrap()
            .unwrap();

        assert_eq!(
            command.args,
            vec![
                "-b".to_string(),
                path_arg(&build),
                "-c".to_string(),
                path_arg(&settings),
                "build".to_string()
            ]
        );
    }

    #[test]
    fn test_discovered_settings_above_root_is_passed() {
        // --- Setup ---
        let tmp = TempDir::new().unwrap();
        let settings = touch(&tmp.path().join("settings.gradle"));
        touch(&tmp.path().join("gradlew"));
        let module = tmp.path().join("services");
        let module_build = touch(&module.join("build.gradle"));
        let wd = module.join("api").join("src");
        std::fs::create_dir_all(&wd).unwrap();
        let probe = TestProbe::new(&wd);

        // --- Execute ---
        let command = resolve(&probe, &["verify"], false).unwrap().unwrap();

        // --- Assert ---
        assert_eq!(
            command.args,
            vec![
                "-b".to_string(),
                path_arg(&module_build),
                "-c".to_string(),
                path_arg(&settings),
                "build".to_string()
            ]
        );
    }

    #[test]
    fn test_global_gradle_from_path_and_skip_replace() {
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join("project");
        touch(&project.join("build.gradle.kts"));
        let bin = tmp.path().join("bin");
        let gradle = touch(&bin.join("gradle"));
        let probe = TestProbe::new(&project).with_paths(&[bin.as_path()]);

        let command = resolve(&probe, &["-gr", "verify", "--offline"], false).unwrap().unwrap();

        assert_eq!(command.executable, gradle);
        assert_eq!(
            command.args.get(2..),
            Some(&["verify".to_string(), "--offline".to_string()][..])
        );
    }

    #[test]
    fn test_settings_without_build_file_still_runs() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("settings.gradle.kts"));
        touch(&tmp.path().join("gradlew"));
        let probe = TestProbe::new(tmp.path());

        let command = resolve(&probe, &["-gq", "projects"], false).unwrap().unwrap();
        assert_eq!(command.args, vec!["projects".to_string()]);
    }

    #[test]
    fn test_no_project_declines_or_fails() {
        let tmp = TempDir::new().unwrap();
        let empty = tmp.path().join("empty");
        fs::create_dir_all(&empty).unwrap();
        touch(&empty.join("gradlew"));
        let probe = TestProbe::new(&empty);

        assert!(resolve(&probe, &["build"], false).unwrap().is_none());
        let err = resolve(&probe, &["build"], true).unwrap_err();
        assert!(matches!(err, DispatchError::ProjectNotFound { tool: ToolKind::Gradle }));
    }

    #[test]
    fn test_missing_executable_when_explicit() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("build.gradle"));
        let probe = TestProbe::new(tmp.path());

        assert!(resolve(&probe, &["build"], false).unwrap().is_none());
        let err = resolve(&probe, &["build"], true).unwrap_err();
        assert!(matches!(err, DispatchError::MissingExecutable { tool: ToolKind::Gradle, .. }));
    }

    #[test]
    fn test_windows_names() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("build.gradle"));
        touch(&tmp.path().join("gradlew"));
        let wrapper = touch(&tmp.path().join("gradlew.bat"));
        let probe = TestProbe::new(tmp.path()).windows();

        let command = resolve(&probe, &["build"], false).unwrap().unwrap();
        assert_eq!(command.executable, wrapper);
    }
}

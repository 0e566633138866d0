//! # Config Loader
//!
//! Reads the two `.gm.toml` layers (user-global and project-local) and merges
//! them into a [`Config`]. The raw layers keep every field optional so the
//! merge can tell "set to false" apart from "not set": project values win over
//! user values, and the built-in default applies only when neither layer says
//! anything.
use crate::{
    constants::{DEFAULT_BACH_VERSION, PROJECT_CONFIG_FILENAME},
    core::{paths, remapper},
    models::{BachConfig, Config, GeneralConfig, GoalConfig, JbangConfig, MavenConfig, SourceKind, ToolKind},
    system::probe::Probe,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Failures while reading or rendering configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("Could not read config file '{path}': {source}")]
    Io {
        /// The config file.
        path: String,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML or has values of the wrong type.
    #[error("Invalid config file '{path}': {source}")]
    Parse {
        /// The config file.
        path: String,
        /// What the TOML parser reported.
        #[source]
        source: toml::de::Error,
    },
    /// An entry in `general.discovery` names no known tool.
    #[error("Unsupported tool in discovery list: '{0}'")]
    UnsupportedTool(String),
    /// An entry in `jbang.discovery` is not `java`, `jsh` or `jar`.
    #[error("Unsupported extension in jbang discovery list: '{0}'")]
    UnsupportedExtension(String),
    /// `-gc` output could not be produced.
    #[error("Could not render configuration: {0}")]
    Render(#[from] toml::ser::Error),
}

// --- Raw layers ---
// One `.gm.toml` as written on disk. Absent keys stay `None`/empty.

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
struct RawConfig {
    general: RawGeneral,
    gradle: RawGoals,
    maven: RawMaven,
    jbang: RawJbang,
    bach: RawBach,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
struct RawGeneral {
    quiet: Option<bool>,
    debug: Option<bool>,
    discovery: Vec<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
struct RawGoals {
    replace: Option<bool>,
    defaults: Option<bool>,
    mappings: BTreeMap<String, String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
struct RawMaven {
    mvnd: Option<bool>,
    #[serde(flatten)]
    goals: RawGoals,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
struct RawJbang {
    discovery: Vec<String>,
    remote_sources: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
struct RawBach {
    version: Option<String>,
}

/// Holds the user layer for a whole dispatch session; project layers are read
/// per candidate root.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    user: RawConfig,
}

impl ConfigLoader {
    /// Reads the user-global file. A missing file (or unknown home) is an empty layer.
    pub fn load(probe: &dyn Probe) -> Result<Self, ConfigError> {
        let user = match paths::user_config_path(probe) {
            Some(path) => read_layer(probe, &path)?,
            None => RawConfig::default(),
        };
        Ok(Self { user })
    }

    /// The merged configuration for a project rooted at `root`.
    pub fn for_root(&self, probe: &dyn Probe, root: Option<&Path>) -> Result<Config, ConfigError> {
        let project = match root {
            Some(dir) => read_layer(probe, &dir.join(PROJECT_CONFIG_FILENAME))?,
            None => RawConfig::default(),
        };
        merge(&project, &self.user)
    }

    /// The user layer merged over the defaults, with no project layer.
    pub fn user_only(&self) -> Result<Config, ConfigError> {
        merge(&RawConfig::default(), &self.user)
    }
}

fn read_layer(probe: &dyn Probe, path: &Path) -> Result<RawConfig, ConfigError> {
    if !probe.exists(path) {
        log::trace!("No config at {}", path.display());
        return Ok(RawConfig::default());
    }

    log::debug!("Reading config layer {}", path.display());
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}

// --- Merge ---

fn merge(project: &RawConfig, user: &RawConfig) -> Result<Config, ConfigError> {
    let discovery_names = pick_list(&project.general.discovery, &user.general.discovery);
    let mut discovery = Vec::new();
    for name in discovery_names {
        let tool = ToolKind::from_name(name).ok_or_else(|| ConfigError::UnsupportedTool(name.trim().to_string()))?;
        if !discovery.contains(&tool) {
            discovery.push(tool);
        }
    }

    let extension_names = pick_list(&project.jbang.discovery, &user.jbang.discovery);
    let mut extensions = Vec::new();
    for name in extension_names {
        let kind =
            SourceKind::from_name(name).ok_or_else(|| ConfigError::UnsupportedExtension(name.trim().to_string()))?;
        if !extensions.contains(&kind) {
            extensions.push(kind);
        }
    }
    if extensions.is_empty() {
        extensions = SourceKind::DEFAULT_ORDER.to_vec();
    }

    Ok(Config {
        general: GeneralConfig {
            quiet: pick(project.general.quiet, user.general.quiet, false),
            debug: pick(project.general.debug, user.general.debug, false),
            discovery,
        },
        gradle: merge_goals(&project.gradle, &user.gradle, remapper::GRADLE_DEFAULTS),
        maven: MavenConfig {
            mvnd: pick(project.maven.mvnd, user.maven.mvnd, false),
            goals: merge_goals(&project.maven.goals, &user.maven.goals, remapper::MAVEN_DEFAULTS),
        },
        jbang: JbangConfig {
            discovery: extensions,
            remote_sources: pick(project.jbang.remote_sources, user.jbang.remote_sources, true),
        },
        bach: BachConfig {
            version: project
                .bach
                .version
                .clone()
                .or_else(|| user.bach.version.clone())
                .unwrap_or_else(|| DEFAULT_BACH_VERSION.to_string()),
        },
    })
}

fn pick(project: Option<bool>, user: Option<bool>, default: bool) -> bool {
    project.or(user).unwrap_or(default)
}

fn pick_list<'a>(project: &'a [String], user: &'a [String]) -> &'a [String] {
    if project.is_empty() { user } else { project }
}

/// Mappings stack as defaults < user < project.
fn merge_goals(project: &RawGoals, user: &RawGoals, defaults_table: &[(&str, &str)]) -> GoalConfig {
    let replace = pick(project.replace, user.replace, true);
    let defaults = pick(project.defaults, user.defaults, true);

    let mut mappings = if defaults {
        remapper::default_mappings(defaults_table)
    } else {
        BTreeMap::new()
    };
    mappings.extend(user.mappings.clone());
    mappings.extend(project.mappings.clone());

    GoalConfig {
        replace,
        defaults,
        mappings,
    }
}

/// Renders the merged configuration as TOML, the way `-gc` prints it.
pub fn render(config: &Config) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(config)?)
}

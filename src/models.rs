// src/models.rs

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

// --- TOOLS AND DISPATCHER FLAGS ---

/// A build tool `gm` knows how to drive.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    /// `gradlew` or `gradle`.
    Gradle,
    /// `mvnd`, `mvnw` or `mvn`.
    Maven,
    /// `ant`.
    Ant,
    /// `java` with a prebuilt Bach, or the `jshell` bootstrap.
    Bach,
    /// `jbang`.
    Jbang,
}

impl ToolKind {
    /// The order tools are tried in when nothing is forced and no discovery
    /// order is configured.
    pub const DEFAULT_ORDER: [Self; 5] = [Self::Gradle, Self::Maven, Self::Ant, Self::Bach, Self::Jbang];

    /// The lowercase name used in config files and banners.
    pub fn name(self) -> &'static str {
        match self {
            Self::Gradle => "gradle",
            Self::Maven => "maven",
            Self::Ant => "ant",
            Self::Bach => "bach",
            Self::Jbang => "jbang",
        }
    }

    /// The name used in user-facing sentences.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Gradle => "Gradle",
            Self::Maven => "Maven",
            Self::Ant => "Ant",
            Self::Bach => "Bach",
            Self::Jbang => "jbang",
        }
    }

    /// Parses a discovery entry. Matching ignores case and surrounding blanks.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "gradle" => Some(Self::Gradle),
            "maven" => Some(Self::Maven),
            "ant" => Some(Self::Ant),
            "bach" => Some(Self::Bach),
            "jbang" => Some(Self::Jbang),
            _ => None,
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// The two-letter switches that steer `gm` itself (`-gg`, `-gq`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DispatcherFlag {
    /// `-gg`
    ForceGradle,
    /// `-gm`
    ForceMaven,
    /// `-gj`
    ForceJbang,
    /// `-gb`
    ForceBach,
    /// `-ga`
    ForceAnt,
    /// `-gq`: no banner, hints or failure messages.
    Quiet,
    /// `-gd`: print the resolution details.
    Debug,
    /// `-gn`: use the nearest build file instead of the root one.
    Nearest,
    /// `-gr`: pass goals/tasks through unchanged.
    SkipReplace,
    /// `-gc`: print the configuration and stop.
    PrintConfig,
    /// `-gh`
    Help,
    /// `-gv`
    Version,
}

impl DispatcherFlag {
    /// Every flag, in help order.
    pub const ALL: [Self; 12] = [
        Self::ForceGradle,
        Self::ForceMaven,
        Self::ForceJbang,
        Self::ForceBach,
        Self::ForceAnt,
        Self::Quiet,
        Self::Debug,
        Self::Nearest,
        Self::SkipReplace,
        Self::PrintConfig,
        Self::Help,
        Self::Version,
    ];

    /// The code as typed after the leading dash.
    pub fn code(self) -> &'static str {
        match self {
            Self::ForceGradle => "gg",
            Self::ForceMaven => "gm",
            Self::ForceJbang => "gj",
            Self::ForceBach => "gb",
            Self::ForceAnt => "ga",
            Self::Quiet => "gq",
            Self::Debug => "gd",
            Self::Nearest => "gn",
            Self::SkipReplace => "gr",
            Self::PrintConfig => "gc",
            Self::Help => "gh",
            Self::Version => "gv",
        }
    }

    /// Looks up a code given without its leading dash.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| flag.code() == code)
    }

    /// The tool this flag forces, if it is one of the forcing flags.
    pub fn forced_tool(self) -> Option<ToolKind> {
        match self {
            Self::ForceGradle => Some(ToolKind::Gradle),
            Self::ForceMaven => Some(ToolKind::Maven),
            Self::ForceJbang => Some(ToolKind::Jbang),
            Self::ForceBach => Some(ToolKind::Bach),
            Self::ForceAnt => Some(ToolKind::Ant),
            _ => None,
        }
    }
}

impl fmt::Display for DispatcherFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-{}", self.code())
    }
}

/// Launchable file types recognised by jbang, in their default priority.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// `.java` source file.
    Java,
    /// `.jsh` JShell script.
    Jsh,
    /// `.jar` archive.
    Jar,
}

impl SourceKind {
    /// Scan order when `jbang.discovery` is not set.
    pub const DEFAULT_ORDER: [Self; 3] = [Self::Java, Self::Jsh, Self::Jar];

    /// The file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Java => "java",
            Self::Jsh => "jsh",
            Self::Jar => "jar",
        }
    }

    /// Parses a config entry such as `"jar"`.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Self::DEFAULT_ORDER
            .into_iter()
            .find(|kind| kind.extension() == name)
    }
}

// --- RESOLVED CONFIGURATION ---
// The merged view of `.gm.toml` layers. Field order matters for TOML output:
// plain values first, tables last.

/// Settings for one invocation: defaults, then the user file, then the project file.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// `[general]`
    pub general: GeneralConfig,
    /// `[gradle]`
    pub gradle: GoalConfig,
    /// `[maven]`
    pub maven: MavenConfig,
    /// `[jbang]`
    pub jbang: JbangConfig,
    /// `[bach]`
    pub bach: BachConfig,
}

impl Config {
    /// Applies `-gq`.
    pub fn set_quiet(&mut self, quiet: bool) {
        self.general.quiet = quiet;
    }

    /// Applies `-gd`.
    pub fn set_debug(&mut self, debug: bool) {
        self.general.debug = debug;
    }
}

/// `[general]`
#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct GeneralConfig {
    /// Suppress banners, hints and failure messages.
    pub quiet: bool,
    /// Print the resolution details before running.
    pub debug: bool,
    /// Tools to try first when none is forced. Empty means the built-in order.
    pub discovery: Vec<ToolKind>,
}

/// Goal/task replacement settings shared by Gradle and Maven.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GoalConfig {
    /// Rename goals/tasks through `mappings`.
    pub replace: bool,
    /// Start `mappings` from the built-in table.
    pub defaults: bool,
    /// Goal/task name to its replacement.
    pub mappings: BTreeMap<String, String>,
}

impl GoalConfig {
    /// Applies `-gr` when called with `false`.
    pub fn set_replace(&mut self, replace: bool) {
        self.replace = replace;
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MavenConfig {
    /// Prefer the Maven daemon (`mvnd`) over the wrapper when it is installed.
    pub mvnd: bool,
    #[serde(flatten)]
    pub goals: GoalConfig,
}

/// `[jbang]`
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct JbangConfig {
    /// Extension priority when scanning the working directory.
    pub discovery: Vec<SourceKind>,
    /// Whether URLs, catalog aliases and Maven coordinates count as launchable sources.
    pub remote_sources: bool,
}

/// `[bach]`
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BachConfig {
    /// Release fetched by the `jshell` bootstrap.
    pub version: String,
}

// --- DISPATCH RESULT ---

/// Everything needed to launch a build tool, produced by a successful resolution.
#[derive(Debug, Clone)]
pub struct ResolvedCommand {
    /// The tool that claimed the project.
    pub tool: ToolKind,
    /// Wrapper or global binary to launch.
    pub executable: PathBuf,
    /// Final arguments, after goal replacement.
    pub args: Vec<String>,
    /// Directory to run the child in; `None` inherits ours.
    pub working_dir: Option<PathBuf>,
    /// The "Using ..." line printed before launching.
    pub banner: String,
    /// Label/value pairs shown by `-gd`.
    pub debug_report: Vec<(String, String)>,
    /// The configuration the command was resolved with.
    pub config: Config,
}

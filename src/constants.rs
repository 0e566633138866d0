// src/constants.rs

/// The name of the per-project configuration file, looked up in the project root.
pub const PROJECT_CONFIG_FILENAME: &str = ".gm.toml";

/// The name of the per-user configuration file, looked up in the home directory.
pub const USER_CONFIG_FILENAME: &str = ".gm.toml";

/// On Windows the user file lives at `%APPDATA%\Gum\gm.toml`.
pub const WINDOWS_USER_CONFIG_DIR: &str = "Gum";
/// File name of the Windows user config.
pub const WINDOWS_USER_CONFIG_FILENAME: &str = "gm.toml";

/// Exit status for every dispatch failure that is not the child's own.
pub const EXIT_DISPATCH_FAILURE: i32 = -1;

/// Bach release used by the `jshell` bootstrap when the config pins none.
pub const DEFAULT_BACH_VERSION: &str = "17.0.0";
/// The directory that marks a Bach project root.
pub const BACH_MARKER_DIR: &str = ".bach";
/// Main module of a prebuilt Bach.
pub const BACH_MODULE: &str = "com.github.sormuras.bach";
/// Base URL of the Bach `build.jsh` bootstrap scripts.
pub const BACH_RELEASES_URL: &str = "https://github.com/sormuras/bach/releases/download";

// Documentation links shown next to missing-executable messages.
/// Gradle installation guide.
pub const GRADLE_INSTALL_URL: &str = "https://gradle.org/docs/current/userguide/installation.html";
/// Gradle wrapper guide.
pub const GRADLE_WRAPPER_URL: &str = "https://gradle.org/docs/current/userguide/gradle_wrapper.html";
/// Maven downloads.
pub const MAVEN_INSTALL_URL: &str = "https://maven.apache.org/download.cgi";
/// Maven wrapper guide.
pub const MAVEN_WRAPPER_URL: &str = "https://maven.apache.org/wrapper/";
/// Ant downloads.
pub const ANT_INSTALL_URL: &str = "https://ant.apache.org/bindownload.cgi";
/// jbang project page.
pub const JBANG_INSTALL_URL: &str = "https://github.com/jbangdev";
/// JDK downloads.
pub const JAVA_INSTALL_URL: &str = "https://jdk.java.net/";

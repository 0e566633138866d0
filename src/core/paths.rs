// src/core/paths.rs

use crate::constants::{USER_CONFIG_FILENAME, WINDOWS_USER_CONFIG_DIR, WINDOWS_USER_CONFIG_FILENAME};
use crate::system::probe::Probe;
use std::path::{Component, Path, PathBuf};

/// Lexically cleans a path: drops `.` segments and folds `..` into its parent.
/// The filesystem is never consulted, so symlinks are left alone.
pub fn normalize(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` above the root stays at the root.
                if !result.pop() && !result.has_root() {
                    result.push("..");
                }
            }
            other => result.push(other.as_os_str()),
        }
    }
    result
}

/// Makes `path` absolute against the probe's working directory and normalizes it.
pub fn absolutize(probe: &dyn Probe, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        probe.working_dir().join(path)
    };
    normalize(dunce::simplified(&joined))
}

/// Resolves a path typed by the user on the command line: `~` is expanded,
/// then the result is made absolute.
pub fn resolve_user_path(probe: &dyn Probe, raw: &str) -> PathBuf {
    let expanded = shellexpand::tilde(raw);
    absolutize(probe, Path::new(expanded.as_ref()))
}

/// Location of the per-user config file, if a home directory is known.
pub fn user_config_path(probe: &dyn Probe) -> Option<PathBuf> {
    let home = probe.home_dir()?;
    let path = if probe.is_windows() {
        home.join(WINDOWS_USER_CONFIG_DIR).join(WINDOWS_USER_CONFIG_FILENAME)
    } else {
        home.join(USER_CONFIG_FILENAME)
    };
    Some(path)
}

/// The file name of `path` as a string, or an empty one.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// src/system/probe.rs

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Failures while snapshotting the environment.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// `std::env::current_dir` failed.
    #[error("Could not determine the current working directory: {0}")]
    WorkingDir(#[source] std::io::Error),
}

/// Everything the search algorithms need to know about the machine they run on.
///
/// All locators go through this trait so tests can pin the working directory,
/// the PATH list and the OS family while still probing a real (temporary) tree.
pub trait Probe {
    /// The directory `gm` was started in, absolute.
    fn working_dir(&self) -> &Path;

    /// The directory holding the user config: `$HOME`, or `%APPDATA%` on Windows.
    fn home_dir(&self) -> Option<&Path>;

    /// The entries of `PATH`, in order.
    fn paths(&self) -> &[PathBuf];

    /// Whether executable names take their Windows spelling.
    fn is_windows(&self) -> bool;

    /// Whether anything exists at `path`.
    fn exists(&self, path: &Path) -> bool {
        fs::metadata(path).is_ok()
    }

    /// Regular files directly inside `dir`, sorted by name. Unreadable
    /// directories yield nothing.
    fn list_files(&self, dir: &Path) -> Vec<PathBuf> {
        WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .map(walkdir::DirEntry::into_path)
            .collect()
    }
}

/// The probe backed by the real process environment.
#[derive(Debug, Clone)]
pub struct OsProbe {
    working_dir: PathBuf,
    home_dir: Option<PathBuf>,
    paths: Vec<PathBuf>,
    windows: bool,
}

impl OsProbe {
    /// Snapshots the current process environment.
    pub fn from_env() -> Result<Self, ProbeError> {
        let working_dir = env::current_dir().map_err(ProbeError::WorkingDir)?;
        let windows = cfg!(target_os = "windows");

        // `dirs::config_dir` is `%APPDATA%` on Windows.
        let home_dir = if windows {
            dirs::config_dir()
        } else {
            dirs::home_dir()
        };

        let path_var = if windows { "Path" } else { "PATH" };
        let paths: Vec<PathBuf> = env::var_os(path_var)
            .or_else(|| env::var_os("PATH"))
            .map(|value| env::split_paths(&value).collect())
            .unwrap_or_default();

        log::debug!(
            "Probe: cwd={}, home={:?}, {} PATH entries",
            working_dir.display(),
            home_dir,
            paths.len()
        );

        Ok(Self {
            working_dir: dunce::simplified(&working_dir).to_path_buf(),
            home_dir,
            paths,
            windows,
        })
    }
}

impl Probe for OsProbe {
    fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    fn home_dir(&self) -> Option<&Path> {
        self.home_dir.as_deref()
    }

    fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    fn is_windows(&self) -> bool {
        self.windows
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Probe;
    use std::fs;
    use std::path::{Path, PathBuf};

    /// A probe with a fixed working directory, PATH and OS family.
    /// Existence checks still hit the real filesystem.
    #[derive(Debug, Clone)]
    pub(crate) struct TestProbe {
        pub(crate) working_dir: PathBuf,
        pub(crate) home_dir: Option<PathBuf>,
        pub(crate) paths: Vec<PathBuf>,
        pub(crate) windows: bool,
    }

    impl TestProbe {
        pub(crate) fn new(working_dir: &Path) -> Self {
            Self {
                working_dir: working_dir.to_path_buf(),
                home_dir: None,
                paths: Vec::new(),
                windows: false,
            }
        }

        pub(crate) fn with_paths(mut self, paths: &[&Path]) -> Self {
            self.paths = paths.iter().map(|p| p.to_path_buf()).collect();
            self
        }

        pub(crate) fn with_home(mut self, home: &Path) -> Self {
            self.home_dir = Some(home.to_path_buf());
            self
        }

        pub(crate) fn windows(mut self) -> Self {
            self.windows = true;
            self
        }
    }

    impl Probe for TestProbe {
        fn working_dir(&self) -> &Path {
            &self.working_dir
        }

        fn home_dir(&self) -> Option<&Path> {
            self.home_dir.as_deref()
        }

        fn paths(&self) -> &[PathBuf] {
            &self.paths
        }

        fn is_windows(&self) -> bool {
            self.windows
        }
    }

    /// Creates an empty file (and its parent directories), returning its path.
    pub(crate) fn touch(path: &Path) -> PathBuf {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
        path.to_path_buf()
    }

    /// Like `touch`, but marks the file executable on Unix.
    pub(crate) fn touch_executable(path: &Path) -> PathBuf {
        let path = touch(path);
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        }
        path
    }
}

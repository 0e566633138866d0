//! Shared helpers for the `gm` integration tests.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// An isolated home directory, an empty `PATH` directory and a project
/// directory to run `gm` from.
pub struct TestEnv {
    temp: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp dir");
        for dir in ["home", "bin", "project"] {
            fs::create_dir_all(temp.path().join(dir)).expect("Failed to create test dir");
        }
        Self { temp }
    }

    pub fn home(&self) -> PathBuf {
        self.temp.path().join("home")
    }

    pub fn bin(&self) -> PathBuf {
        self.temp.path().join("bin")
    }

    pub fn project(&self) -> PathBuf {
        self.temp.path().join("project")
    }

    /// Writes a file under the project directory, creating parents.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.project().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Writes an executable shell script that prints its arguments.
    #[cfg(unix)]
    pub fn script(&self, path: &Path, exit_code: i32) {
        use std::os::unix::fs::PermissionsExt;

        let body = format!("#!/bin/sh\necho \"args: $*\"\nexit {}\n", exit_code);
        fs::write(path, body).expect("Failed to write script");
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).expect("Failed to chmod script");
    }

    /// Writes a plain, non-executable file at `path`.
    pub fn plain_file(&self, path: &Path) {
        fs::write(path, "#!/bin/sh\n").expect("Failed to write file");
    }

    /// A `gm` command running in the project directory with nothing inherited
    /// from the real environment.
    pub fn gm(&self) -> Command {
        let mut cmd = Command::cargo_bin("gm").expect("Failed to find gm binary");
        cmd.current_dir(self.project())
            .env("HOME", self.home())
            .env("APPDATA", self.home())
            .env("PATH", self.bin())
            .env_remove("RUST_LOG");
        cmd
    }
}

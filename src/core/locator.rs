// src/core/locator.rs

use crate::core::paths;
use crate::system::probe::Probe;
use std::path::{Path, PathBuf};

/// Walks from `start` up to the filesystem root. At each directory the names
/// produced by `candidates` are tried in order, and the first one that exists
/// is returned as an absolute path.
pub fn find_upwards<F>(probe: &dyn Probe, start: &Path, candidates: F) -> Option<PathBuf>
where
    F: Fn(&Path) -> Vec<String>,
{
    find_upwards_bounded(probe, start, None, candidates)
}

/// Like [`find_upwards`], but never leaves `boundary`: the boundary directory
/// is the last one inspected, and a walk starting outside of it finds nothing.
pub fn find_upwards_bounded<F>(
    probe: &dyn Probe,
    start: &Path,
    boundary: Option<&Path>,
    candidates: F,
) -> Option<PathBuf>
where
    F: Fn(&Path) -> Vec<String>,
{
    let mut dir = paths::absolutize(probe, start);
    let boundary = boundary.map(|b| paths::absolutize(probe, b));

    loop {
        if let Some(limit) = &boundary
            && !dir.starts_with(limit)
        {
            log::trace!("Left boundary {} at {}", limit.display(), dir.display());
            return None;
        }

        for name in candidates(&dir) {
            let path = dir.join(&name);
            log::trace!("Probing {}", path.display());
            if probe.exists(&path) {
                log::debug!("Found {}", path.display());
                return Some(path);
            }
        }

        if boundary.as_deref() == Some(dir.as_path()) {
            return None;
        }

        match dir.parent() {
            Some(parent) if parent != dir => dir = parent.to_path_buf(),
            _ => return None,
        }
    }
}

/// Finds the nearest directory (at or above `start`) that contains `marker`,
/// returning the directory holding it.
pub fn find_marker_dir(probe: &dyn Probe, start: &Path, marker: &str) -> Option<PathBuf> {
    find_upwards(probe, start, |_| vec![marker.to_string()])
        .and_then(|found| found.parent().map(Path::to_path_buf))
}

/// Checks a single directory for `name`.
pub fn find_in_dir(probe: &dyn Probe, dir: &Path, name: &str) -> Option<PathBuf> {
    let path = paths::absolutize(probe, &dir.join(name));
    probe.exists(&path).then_some(path)
}

/// Scans every `PATH` entry, in order, for an executable called `name`.
pub fn find_in_path(probe: &dyn Probe, name: &str) -> Option<PathBuf> {
    probe.paths().iter().find_map(|dir| {
        let found = find_in_dir(probe, dir, name);
        if found.is_some() {
            log::debug!("Found {} on PATH in {}", name, dir.display());
        }
        found
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::probe::testing::{TestProbe, touch};
    use std::fs;
    use tempfile::TempDir;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_finds_marker_n_levels_up() {
        // --- Setup ---
        let tmp = TempDir::new().unwrap();
        let marker = touch(&tmp.path().join("pom.xml"));
        let deep = tmp.path().join("a").join("b").join("c");
        fs::create_dir_all(&deep).unwrap();
        let probe = TestProbe::new(&deep);

        // --- Execute ---
        let found = find_upwards(&probe, &deep, |_| names(&["pom.xml"]));

        // --- Assert ---
        assert_eq!(found, Some(marker));
    }

    #[test]
    fn test_nearest_wins() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("build.xml"));
        let nearer = touch(&tmp.path().join("module").join("build.xml"));
        let probe = TestProbe::new(&tmp.path().join("module"));

        let found = find_upwards(&probe, &tmp.path().join("module"), |_| names(&["build.xml"]));
        assert_eq!(found, Some(nearer));
    }

    #[test]
    fn test_candidate_order_within_one_directory() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("build.gradle.kts"));
        let first = touch(&tmp.path().join("build.gradle"));
        let probe = TestProbe::new(tmp.path());

        let found = find_upwards(&probe, tmp.path(), |_| names(&["build.gradle", "build.gradle.kts"]));
        assert_eq!(found, Some(first));
    }

    #[test]
    fn test_missing_marker_returns_none() {
        let tmp = TempDir::new().unwrap();
        let probe = TestProbe::new(tmp.path());
        let found = find_upwards(&probe, tmp.path(), |_| names(&["definitely-not-here.marker"]));
        assert!(found.is_none());
    }

    #[test]
    fn test_boundary_is_inspected_but_not_crossed() {
        // --- Setup ---
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("build.gradle"));
        let root = tmp.path().join("root");
        let root_build = touch(&root.join("build.gradle"));
        let leaf = root.join("sub").join("leaf");
        fs::create_dir_all(&leaf).unwrap();
        let probe = TestProbe::new(&leaf);

        // --- Execute & Assert ---
        let found = find_upwards_bounded(&probe, &leaf, Some(root.as_path()), |_| names(&["build.gradle"]));
        assert_eq!(found, Some(root_build));

        fs::remove_file(root.join("build.gradle")).unwrap();
        let found = find_upwards_bounded(&probe, &leaf, Some(root.as_path()), |_| names(&["build.gradle"]));
        assert!(found.is_none());
    }

    #[test]
    fn test_walk_starting_above_boundary_finds_nothing() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("build.gradle"));
        let boundary = tmp.path().join("inner");
        fs::create_dir_all(&boundary).unwrap();
        let probe = TestProbe::new(&boundary);

        let found = find_upwards_bounded(&probe, tmp.path(), Some(boundary.as_path()), |_| names(&["build.gradle"]));
        assert!(found.is_none());
    }

    #[test]
    fn test_find_marker_dir_returns_holder() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join(".bach").join("bin")).unwrap();
        let sub = tmp.path().join("src");
        fs::create_dir_all(&sub).unwrap();
        let probe = TestProbe::new(&sub);

        assert_eq!(find_marker_dir(&probe, &sub, ".bach"), Some(tmp.path().to_path_buf()));
    }

    #[test]
    fn test_find_in_path_respects_order() {
        let tmp = TempDir::new().unwrap();
        let first = tmp.path().join("first");
        let second = tmp.path().join("second");
        fs::create_dir_all(&first).unwrap();
        let expected = touch(&second.join("mvn"));
        touch(&tmp.path().join("third").join("mvn"));
        let third = tmp.path().join("third");
        let probe = TestProbe::new(tmp.path()).with_paths(&[first.as_path(), second.as_path(), third.as_path()]);

        assert_eq!(find_in_path(&probe, "mvn"), Some(expected));
        assert_eq!(find_in_path(&probe, "gradle"), None);
    }
}

//! Repo scanning - locating the packages to bootstrap.

use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;

use crate::domain::model::{Package, PackageManifest};

/// Directory under the repo root that holds the member packages.
pub const PACKAGES_DIR: &str = "packages";

/// Find all packages by scanning for `package.json` manifests.
///
/// Directory structure: `<root>/packages/<name>/package.json`. Subdirectories
/// without a manifest are skipped; a missing `packages/` directory yields an
/// empty list. The scan is sorted by path so the package list (and therefore
/// graph node order) is stable across runs.
#[tracing::instrument(skip(root))]
pub fn find_packages(root: &Path) -> Result<Vec<Package>> {
    let packages_dir = root.join(PACKAGES_DIR);
    if !packages_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut entries: Vec<_> = fs::read_dir(&packages_dir)
        .with_context(|| format!("failed to read {}", packages_dir.display()))?
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("failed to read {}", packages_dir.display()))?
        .into_iter()
        .map(|entry| entry.path())
        .collect();
    entries.sort();

    let mut packages = Vec::new();
    for path in entries {
        let manifest_path = path.join("package.json");
        if !manifest_path.is_file() {
            continue;
        }
        let contents = fs::read_to_string(&manifest_path)
            .with_context(|| format!("failed to read {}", manifest_path.display()))?;
        let manifest = PackageManifest::from_json_str(&contents)
            .with_context(|| format!("failed to parse {}", manifest_path.display()))?;
        debug!(
            "found package {}@{} at {}",
            manifest.name,
            manifest.version,
            path.display()
        );
        packages.push(Package::from_manifest(manifest, path));
    }

    Ok(packages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_package(root: &Path, name: &str, version: &str) -> PathBuf {
        let dir = root.join(PACKAGES_DIR).join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("package.json"),
            format!(r#"{{ "name": "{name}", "version": "{version}" }}"#),
        )
        .unwrap();
        dir
    }

    #[test]
    fn test_find_packages() {
        let repo = tempfile::tempdir().unwrap();
        let core_dir = write_package(repo.path(), "core", "1.2.0");
        write_package(repo.path(), "web", "0.4.0");

        let packages = find_packages(repo.path()).unwrap();

        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].name, "core");
        assert_eq!(packages[0].location, core_dir);
        assert_eq!(packages[1].name, "web");
    }

    #[test]
    fn test_find_packages_no_packages_dir() {
        let repo = tempfile::tempdir().unwrap();
        let packages = find_packages(repo.path()).unwrap();
        assert!(packages.is_empty());
    }

    #[test]
    fn test_find_packages_skips_dirs_without_manifest() {
        let repo = tempfile::tempdir().unwrap();
        write_package(repo.path(), "core", "1.0.0");
        fs::create_dir_all(repo.path().join(PACKAGES_DIR).join("scratch")).unwrap();

        let packages = find_packages(repo.path()).unwrap();
        assert_eq!(packages.len(), 1);
    }

    #[test]
    fn test_find_packages_invalid_manifest_is_an_error() {
        let repo = tempfile::tempdir().unwrap();
        let dir = repo.path().join(PACKAGES_DIR).join("broken");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("package.json"), "{ not json").unwrap();

        let error = find_packages(repo.path()).unwrap_err();
        assert!(format!("{error:#}").contains("failed to parse"));
    }

    #[test]
    fn test_find_packages_order_is_stable() {
        let repo = tempfile::tempdir().unwrap();
        write_package(repo.path(), "zebra", "1.0.0");
        write_package(repo.path(), "apple", "1.0.0");

        let names: Vec<_> = find_packages(repo.path())
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["apple", "zebra"]);
    }
}

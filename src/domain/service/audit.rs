//! Advisory version checks.
//!
//! These checks compare what a package declares against what is actually
//! present - a sibling in the repo, or a copy already installed under the
//! package's install root. They only ever produce warnings; scheduling is
//! never affected by their outcome.

use std::collections::HashMap;
use std::fs;

use log::warn;
use semver::Version;

use crate::domain::model::{Package, PackageManifest};

/// Outcome of checking one declared dependency against an actual version.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclaredDependencyCheck {
    /// The actual version satisfies the declaration.
    Satisfied,
    /// The declaration exists but the actual version falls outside it.
    Mismatched { expected: String, actual: Version },
    /// The package does not declare this dependency at all.
    NotDeclared,
}

/// Test `package`'s declaration for `dependency_name` against `actual`.
pub fn check_declared(
    package: &Package,
    dependency_name: &str,
    actual: &Version,
) -> DeclaredDependencyCheck {
    match package.dependencies.get(dependency_name) {
        None => DeclaredDependencyCheck::NotDeclared,
        Some(spec) if spec.satisfied_by(actual) => DeclaredDependencyCheck::Satisfied,
        Some(spec) => DeclaredDependencyCheck::Mismatched {
            expected: spec.to_string(),
            actual: actual.clone(),
        },
    }
}

/// Warn about packages whose declared range on a sibling does not match the
/// sibling's actual version. Such declarations never become graph edges, so
/// the mismatch is easy to miss otherwise.
pub fn warn_on_sibling_mismatches(packages: &[Package]) {
    let versions: HashMap<&str, &Version> = packages
        .iter()
        .map(|package| (package.name.as_str(), &package.version))
        .collect();

    for package in packages {
        for dependency_name in package.dependencies.keys() {
            let Some(actual) = versions.get(dependency_name.as_str()).copied() else {
                continue;
            };
            if let DeclaredDependencyCheck::Mismatched { expected, actual } =
                check_declared(package, dependency_name, actual)
            {
                warn!(
                    "Version mismatch inside \"{}\". Depends on \"{}@{}\" instead of \"{}@{}\".",
                    package.name, dependency_name, expected, dependency_name, actual
                );
            }
        }
    }
}

/// Whether an installed copy of `dependency_name` under the package's install
/// root satisfies the declared range. A missing or unreadable installed
/// manifest counts as not satisfied.
pub fn installed_dependency_satisfies(package: &Package, dependency_name: &str) -> bool {
    let manifest_path = package
        .install_root
        .join(dependency_name)
        .join("package.json");
    let Ok(contents) = fs::read_to_string(&manifest_path) else {
        return false;
    };
    let Ok(manifest) = PackageManifest::from_json_str(&contents) else {
        return false;
    };
    check_declared(package, dependency_name, &manifest.version) == DeclaredDependencyCheck::Satisfied
}

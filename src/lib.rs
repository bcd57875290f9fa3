pub mod application;
pub mod commands;
pub mod domain;
pub mod install;
pub mod package;
pub mod progress;

/// Test utilities for building in-memory packages.
#[cfg(test)]
pub mod test_utils {
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    use crate::domain::model::{DependencySpec, Package};

    /// Build a package for graph and scheduler tests. Dependencies are given
    /// as `(name, declared spec)` pairs, e.g. `("a", "^1.0.0")` or
    /// `("a", "file:../a")`.
    pub fn package(name: &str, version: &str, dependencies: &[(&str, &str)]) -> Package {
        let dependencies: BTreeMap<String, DependencySpec> = dependencies
            .iter()
            .map(|(dep_name, spec)| {
                (
                    dep_name.to_string(),
                    spec.parse().expect("dependency spec must parse"),
                )
            })
            .collect();
        let location = PathBuf::from(format!("/repo/packages/{name}"));
        let install_root = location.join("node_modules");
        Package {
            name: name.to_string(),
            version: version.parse().expect("version must parse"),
            dependencies,
            location,
            install_root,
        }
    }
}

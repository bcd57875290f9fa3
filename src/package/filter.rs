//! Ignore filtering.

use log::debug;

use crate::domain::model::Package;

/// Drop packages whose names match any of the ignore patterns.
///
/// Patterns are glob-matched against package names; an invalid pattern
/// matches nothing.
pub fn filter_packages(packages: Vec<Package>, ignore: &[String]) -> Vec<Package> {
    if ignore.is_empty() {
        return packages;
    }

    packages
        .into_iter()
        .filter(|package| {
            let ignored = ignore.iter().any(|pattern| {
                glob::Pattern::new(pattern)
                    .map(|p| p.matches(&package.name))
                    .unwrap_or(false)
            });
            if ignored {
                debug!("ignoring package {}", package.name);
            }
            !ignored
        })
        .collect()
}

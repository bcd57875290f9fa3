//! Command entry points - wiring the default collaborators.
//!
//! Each command discovers the packages, builds its collaborators (installer,
//! progress bar) and hands off to the application layer.

use anyhow::Result;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::BootstrapUseCase;
use crate::domain::model::Package;
use crate::domain::service::audit;
use crate::install::NpmInstaller;
use crate::package::{filter_packages, find_packages};
use crate::progress::ProgressBarReporter;

/// Settings for a bootstrap run.
#[derive(Debug, Clone)]
pub struct BootstrapOptions {
    /// Repo root containing the `packages/` directory.
    pub root: PathBuf,
    /// Maximum number of installs in flight at once.
    pub concurrency: usize,
    /// Glob patterns of package names to skip.
    pub ignore: Vec<String>,
    /// Package-manager executable used for installs.
    pub npm_client: String,
}

/// Install and link dependencies across all packages under the repo root.
#[tracing::instrument(skip(options))]
pub async fn bootstrap(options: BootstrapOptions) -> Result<()> {
    let packages = find_packages(&options.root)?;
    let packages = filter_packages(packages, &options.ignore);
    if packages.is_empty() {
        info!("no packages to bootstrap under {}", options.root.display());
        return Ok(());
    }

    info!("Linking all dependencies");
    audit::warn_on_sibling_mismatches(&packages);
    log_installed_dependencies(&packages);

    let installer = Arc::new(NpmInstaller::new(options.npm_client));
    let use_case = BootstrapUseCase::new(
        installer,
        ProgressBarReporter::new(),
        options.concurrency,
    );
    let summary = use_case.run(packages).await?;

    info!("Successfully bootstrapped {} packages.", summary.completed);
    Ok(())
}

/// Debug-level report of dependencies that already have a satisfying copy
/// installed under the package's install root.
fn log_installed_dependencies(packages: &[Package]) {
    for package in packages {
        for dependency_name in package.dependencies.keys() {
            if audit::installed_dependency_satisfies(package, dependency_name) {
                debug!(
                    "\"{}\" already has a satisfying copy of \"{}\" installed",
                    package.name, dependency_name
                );
            }
        }
    }
}

/// Print the packages found under the repo root.
#[tracing::instrument(skip(root))]
pub fn list(root: &Path, long: bool) -> Result<()> {
    let packages = find_packages(root)?;
    for package in &packages {
        if long {
            println!(
                "{}@{} {}",
                package.name,
                package.version,
                package.location.display()
            );
        } else {
            println!("{}@{}", package.name, package.version);
        }
    }
    Ok(())
}

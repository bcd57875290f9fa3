//! The install collaborator.
//!
//! The scheduler only ever talks to the [`PackageInstaller`] trait; the
//! default implementation wraps directory creation plus a shell-out to the
//! configured package-manager client. Keeping the boundary here makes the
//! scheduler testable without touching the filesystem or spawning processes.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use log::debug;
#[cfg(test)]
use mockall::automock;

use crate::domain::model::Package;

/// Installs one package's external dependencies.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PackageInstaller: Send + Sync {
    /// Install the external dependencies of `package`.
    ///
    /// Called at most once per package per run. Any error is treated as that
    /// package's failure; its content is opaque to the scheduler.
    async fn install(&self, package: &Package) -> Result<()>;
}

/// Default installer: ensures the package's install root exists, then runs
/// `<client> install` in the package directory.
pub struct NpmInstaller {
    client: String,
}

impl NpmInstaller {
    pub fn new(client: impl Into<String>) -> Self {
        Self {
            client: client.into(),
        }
    }
}

#[async_trait]
impl PackageInstaller for NpmInstaller {
    async fn install(&self, package: &Package) -> Result<()> {
        tokio::fs::create_dir_all(&package.install_root)
            .await
            .with_context(|| format!("failed to create {}", package.install_root.display()))?;

        debug!(
            "running `{} install` in {}",
            self.client,
            package.location.display()
        );

        let output = tokio::process::Command::new(&self.client)
            .arg("install")
            .current_dir(&package.location)
            .output()
            .await
            .with_context(|| format!("failed to run `{} install` for {}", self.client, package.name))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "`{} install` failed for {}: {}",
                self.client,
                package.name,
                stderr.trim()
            );
        }

        Ok(())
    }
}

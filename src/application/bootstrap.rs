//! Bootstrap use case - batched topological execution of installs.
//!
//! Packages run in waves: a wave is every not-yet-completed package whose
//! intra-repo dependencies have all completed. Wave membership is computed
//! from the completion set between rounds - never mutated from inside the
//! concurrent install futures - and at most `concurrency` installs are in
//! flight at any moment. A failed install lets its wave drain and then halts
//! the run; a wave that comes up empty while work remains means the remaining
//! packages can never be scheduled, which fails fast as a cycle.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use futures_util::{StreamExt, stream};
use log::{debug, info, warn};

use crate::domain::model::{Package, PackageGraph};
use crate::install::PackageInstaller;
use crate::progress::ProgressReporter;

/// Terminal error for a run whose remaining packages can never be scheduled.
#[derive(Debug)]
pub struct CycleError {
    /// Names of the packages that could not be scheduled, sorted.
    pub packages: Vec<String>,
}

impl fmt::Display for CycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "dependency cycle detected involving: {}",
            self.packages.join(", ")
        )
    }
}

impl std::error::Error for CycleError {}

/// Result of a successful bootstrap run.
#[derive(Debug)]
pub struct BootstrapSummary {
    pub completed: usize,
}

/// Drives installs for a set of packages in dependency order.
pub struct BootstrapUseCase<I, P> {
    installer: Arc<I>,
    progress: P,
    concurrency: usize,
}

impl<I, P> BootstrapUseCase<I, P>
where
    I: PackageInstaller + 'static,
    P: ProgressReporter,
{
    pub fn new(installer: Arc<I>, progress: P, concurrency: usize) -> Self {
        Self {
            installer,
            progress,
            concurrency,
        }
    }

    /// Install every package, each strictly after its intra-repo dependencies.
    ///
    /// Returns the first install failure (wrapped with a processed count), or
    /// a [`CycleError`] when the remaining packages only depend on each other.
    pub async fn run(&self, packages: Vec<Package>) -> Result<BootstrapSummary> {
        let graph = PackageGraph::build(&packages);
        let total = packages.len();
        let concurrency = self.concurrency.max(1);

        self.progress.init(total);

        let mut todo = packages;
        let mut done: HashSet<String> = HashSet::new();

        while !todo.is_empty() {
            // A package is eligible once everything it depends on in the
            // graph has completed.
            let (batch, rest): (Vec<Package>, Vec<Package>) =
                todo.into_iter().partition(|package| {
                    graph
                        .get(&package.name)
                        .map(|node| node.dependency_names.iter().all(|name| done.contains(name)))
                        .unwrap_or(true)
                });

            if batch.is_empty() {
                self.progress.terminate();
                let mut stalled: Vec<String> =
                    rest.into_iter().map(|package| package.name).collect();
                stalled.sort();
                return Err(CycleError { packages: stalled }.into());
            }
            todo = rest;

            debug!("starting wave of {} packages", batch.len());

            let results: Vec<(Package, Result<()>)> =
                stream::iter(batch.into_iter().map(|package| {
                    let installer = Arc::clone(&self.installer);
                    async move {
                        let result = installer.install(&package).await;
                        (package, result)
                    }
                }))
                .buffer_unordered(concurrency)
                .collect()
                .await;

            let mut first_failure: Option<anyhow::Error> = None;
            for (package, result) in results {
                self.progress.tick(&package.name);
                match result {
                    Ok(()) => {
                        done.insert(package.name);
                    }
                    Err(error) => {
                        let error = error
                            .context(format!("failed to bootstrap package {}", package.name));
                        if first_failure.is_none() {
                            first_failure = Some(error);
                        } else {
                            warn!("{error:#}");
                        }
                    }
                }
            }

            if let Some(error) = first_failure {
                self.progress.terminate();
                return Err(error.context(format!(
                    "bootstrap halted after {} of {} packages",
                    done.len(),
                    total
                )));
            }
        }

        self.progress.terminate();
        info!("bootstrapped {} packages", done.len());
        Ok(BootstrapSummary {
            completed: done.len(),
        })
    }
}

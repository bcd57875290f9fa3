//! The package model - the unit of work for bootstrapping.
//!
//! A [`Package`] is built from a `package.json` manifest found in the repo.
//! Dependency declarations are parsed up front into [`DependencySpec`] so the
//! `file:` local-link convention is an explicit variant instead of a string
//! prefix sniffed at every use site.

use semver::{Version, VersionReq};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::domain::service::version::is_compatible;

/// Marker prefix for a dependency bound to a sibling's filesystem location.
pub const LINK_PREFIX: &str = "file:";

/// A declared dependency: either a semver range on a published version, or a
/// local link to a sibling package's location.
#[derive(Debug, Clone, PartialEq)]
pub enum DependencySpec {
    /// Published dependency constrained by a semver range (e.g. "^1.2.0")
    Range(VersionReq),
    /// Local-link dependency ("file:../sibling"), always considered satisfied
    Link(String),
}

impl DependencySpec {
    /// Whether `version` satisfies this declaration.
    ///
    /// Local links are satisfied by construction; ranges defer to semver.
    pub fn satisfied_by(&self, version: &Version) -> bool {
        match self {
            DependencySpec::Link(_) => true,
            DependencySpec::Range(requirement) => is_compatible(version, requirement),
        }
    }
}

impl FromStr for DependencySpec {
    type Err = semver::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(path) = s.strip_prefix(LINK_PREFIX) {
            return Ok(DependencySpec::Link(path.to_string()));
        }
        Ok(DependencySpec::Range(VersionReq::parse(s)?))
    }
}

impl fmt::Display for DependencySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencySpec::Range(requirement) => write!(f, "{requirement}"),
            DependencySpec::Link(path) => write!(f, "{LINK_PREFIX}{path}"),
        }
    }
}

impl<'de> Deserialize<'de> for DependencySpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// The parts of a `package.json` manifest the bootstrapper reads.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageManifest {
    pub name: String,
    pub version: Version,
    #[serde(default)]
    pub dependencies: BTreeMap<String, DependencySpec>,
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: BTreeMap<String, DependencySpec>,
}

impl PackageManifest {
    pub fn from_json_str(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }

    /// Runtime and development dependencies merged. Development entries win
    /// when a name is declared in both sections.
    pub fn all_dependencies(&self) -> BTreeMap<String, DependencySpec> {
        let mut merged = self.dependencies.clone();
        merged.extend(
            self.dev_dependencies
                .iter()
                .map(|(name, spec)| (name.clone(), spec.clone())),
        );
        merged
    }
}

/// One member of the repo, as handed to the graph and the scheduler.
#[derive(Debug, Clone)]
pub struct Package {
    pub name: String,
    pub version: Version,
    /// Merged dependency declarations (runtime and development).
    pub dependencies: BTreeMap<String, DependencySpec>,
    /// Directory containing the package's manifest.
    pub location: PathBuf,
    /// Directory external dependencies are installed into.
    pub install_root: PathBuf,
}

impl Package {
    pub fn from_manifest(manifest: PackageManifest, location: impl Into<PathBuf>) -> Self {
        let location = location.into();
        let install_root = location.join("node_modules");
        let dependencies = manifest.all_dependencies();
        Package {
            name: manifest.name,
            version: manifest.version,
            dependencies,
            location,
            install_root,
        }
    }
}

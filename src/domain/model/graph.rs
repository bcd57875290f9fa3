//! Intra-repo dependency graph.
//!
//! Built once per bootstrap invocation from the package snapshot and never
//! mutated afterwards. A dependency declaration becomes an edge only when the
//! target package exists in the same graph and the declaration is satisfied
//! by the target's version (local links are always satisfied). Anything else
//! is assumed to come from an external registry and is not represented.

use std::collections::HashMap;

use crate::domain::model::Package;

/// A package plus the names of the in-graph packages it depends on.
#[derive(Debug, Clone)]
pub struct PackageGraphNode {
    pub package: Package,
    /// Names of other graph members that must be processed before this one.
    pub dependency_names: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct PackageGraph {
    nodes: Vec<PackageGraphNode>,
    index: HashMap<String, usize>,
}

impl PackageGraph {
    /// Build the graph for `packages`, preserving input order.
    ///
    /// Duplicate names are a caller error and are not validated; the last
    /// occurrence wins in the name index.
    pub fn build(packages: &[Package]) -> Self {
        let mut index = HashMap::with_capacity(packages.len());
        for (position, package) in packages.iter().enumerate() {
            index.insert(package.name.clone(), position);
        }

        let nodes = packages
            .iter()
            .map(|package| {
                let dependency_names = package
                    .dependencies
                    .iter()
                    .filter(|(name, spec)| {
                        index
                            .get(name.as_str())
                            .is_some_and(|&target| spec.satisfied_by(&packages[target].version))
                    })
                    .map(|(name, _)| name.clone())
                    .collect();
                PackageGraphNode {
                    package: package.clone(),
                    dependency_names,
                }
            })
            .collect();

        PackageGraph { nodes, index }
    }

    /// Look up a node by package name. Absence is not an error; it means the
    /// package is not part of this graph.
    pub fn get(&self, name: &str) -> Option<&PackageGraphNode> {
        self.index.get(name).map(|&position| &self.nodes[position])
    }

    pub fn nodes(&self) -> &[PackageGraphNode] {
        &self.nodes
    }
}

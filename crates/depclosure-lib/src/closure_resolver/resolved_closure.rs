//! The outcome of a successful walk.

use petgraph::prelude::*;

use super::*;

/// A validated closure and the graph of which build required which.
#[derive(Debug, Clone)]
pub struct ResolvedClosure {
	snapshot: DependencySnapshot,
	/// Nodes are every requirement accepted into the closure, edges point from a build to its dependency.
	graph: DiGraph<DependencyRequirement, ()>,
}

impl ResolvedClosure {
	pub(super) fn new(snapshot: DependencySnapshot, graph: DiGraph<DependencyRequirement, ()>) -> Self {
		Self { snapshot, graph }
	}

	pub fn snapshot(&self) -> &DependencySnapshot {
		&self.snapshot
	}

	pub fn into_snapshot(self) -> DependencySnapshot {
		self.snapshot
	}

	/// Every distinct requirement in the closure, in the order first accepted.
	pub fn requirements(&self) -> impl Iterator<Item = &DependencyRequirement> {
		self.graph.node_weights()
	}

	/// Names of the packages `package_name` directly depends on.
	pub fn dependencies_of(&self, package_name: &str) -> BTreeSet<&str> {
		self.neighbours(package_name, Outgoing)
	}

	/// Names of the packages that directly depend on `package_name`.
	pub fn requesters_of(&self, package_name: &str) -> BTreeSet<&str> {
		self.neighbours(package_name, Incoming)
	}

	fn neighbours(&self, package_name: &str, direction: Direction) -> BTreeSet<&str> {
		self.graph.node_indices()
			.filter(|i| self.graph[*i].package_name() == package_name)
			.flat_map(|i| self.graph.neighbors_directed(i, direction))
			.map(|n| self.graph[n].package_name())
			.collect()
	}
}

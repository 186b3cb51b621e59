use serde::{Serialize, Deserialize};

use super::*;

/// A registry entry describing the direct dependencies of one published build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRecord {
	pub package_name: String,
	pub version: VersionId,
	#[serde(default)]
	pub architecture: ArchitectureTag,
	/// In declared order, the resolver preserves it when queueing.
	#[serde(default)]
	pub dependencies: Vec<DependencyRequirement>,
}

impl BuildRecord {
	pub fn new(package_name: impl Into<String>, version: VersionId, architecture: ArchitectureTag, dependencies: Vec<DependencyRequirement>) -> Self {
		Self {
			package_name: package_name.into(),
			version,
			architecture,
			dependencies,
		}
	}
}

impl std::fmt::Display for BuildRecord {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}@{} ({})", self.package_name, self.version, self.architecture)
	}
}

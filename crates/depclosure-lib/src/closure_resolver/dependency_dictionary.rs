use std::collections::{BTreeMap, BTreeSet};

use serde::{Serialize, Deserialize};

use super::*;

/// Raised when an insertion would give a package a version set the policy rejects.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("incompatible versions requested for {package}")]
pub struct VersionConflict {
	pub package: String,
	/// The rejected set, including the version that was being inserted.
	pub versions: BTreeSet<VersionId>,
}

/// Package names mapped to every version requested for them during one resolve.
///
/// Insertion is checked against a [`CompatibilityPolicy`] before anything is committed,
/// so a failed insertion leaves the dictionary as it was.
#[derive(Debug, Clone)]
pub struct DependencyDictionary<P = StrictSingleVersion> {
	entries: BTreeMap<String, BTreeSet<VersionId>>,
	policy: P,
}

impl<P: CompatibilityPolicy + Default> Default for DependencyDictionary<P> {
	fn default() -> Self {
		Self::with_policy(P::default())
	}
}

impl DependencyDictionary<StrictSingleVersion> {
	pub fn new() -> Self {
		Self::default()
	}
}

impl<P: CompatibilityPolicy> DependencyDictionary<P> {
	pub fn with_policy(policy: P) -> Self {
		Self {
			entries: Default::default(),
			policy,
		}
	}

	/// Records that `package_name` is required at `version`.
	///
	/// # Errors
	/// [`VersionConflict`] when the policy rejects the resulting version set, the dictionary is unchanged.
	pub fn insert(&mut self, package_name: &str, version: &VersionId) -> Result<(), VersionConflict> {
		let mut versions = self.entries.get(package_name).cloned().unwrap_or_default();
		versions.insert(version.clone());

		if !self.policy.is_compatible(&versions) {
			return Err(VersionConflict { package: package_name.to_string(), versions })
		}

		self.entries.insert(package_name.to_string(), versions);
		Ok(())
	}

	pub fn get(&self, package_name: &str) -> Option<&BTreeSet<VersionId>> {
		self.entries.get(package_name)
	}

	/// Number of distinct package names.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn snapshot(&self) -> DependencySnapshot {
		DependencySnapshot(self.entries.clone())
	}
}

/// Read only copy of a [`DependencyDictionary`], the result of a successful resolve.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencySnapshot(BTreeMap<String, BTreeSet<VersionId>>);

impl DependencySnapshot {
	pub fn get(&self, package_name: &str) -> Option<&BTreeSet<VersionId>> {
		self.0.get(package_name)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<VersionId>)> {
		self.0.iter()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Each package with its only version.
	///
	/// Always complete under [`StrictSingleVersion`]. Packages that ended up with several
	/// versions under a more lenient policy are left out.
	pub fn single_versions(&self) -> BTreeMap<&str, &VersionId> {
		self.0.iter()
			.filter(|(_, versions)| versions.len() == 1)
			.filter_map(|(name, versions)| versions.iter().next().map(|v| (name.as_str(), v)))
			.collect()
	}

	pub fn into_inner(self) -> BTreeMap<String, BTreeSet<VersionId>> {
		self.0
	}
}

impl<'a> IntoIterator for &'a DependencySnapshot {
	type Item = (&'a String, &'a BTreeSet<VersionId>);
	type IntoIter = std::collections::btree_map::Iter<'a, String, BTreeSet<VersionId>>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

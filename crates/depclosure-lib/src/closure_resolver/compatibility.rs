use std::collections::BTreeSet;

use crate::package::VersionId;

/// Decides whether a set of versions requested for one package can coexist.
///
/// Called with the set a package would have after each insertion, before it is committed.
/// Any `Fn(&BTreeSet<VersionId>) -> bool` can be used as a policy.
pub trait CompatibilityPolicy {
	fn is_compatible(&self, requested_versions: &BTreeSet<VersionId>) -> bool;
}

/// Only one version of a package may be requested anywhere in the closure.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StrictSingleVersion;

impl CompatibilityPolicy for StrictSingleVersion {
	fn is_compatible(&self, requested_versions: &BTreeSet<VersionId>) -> bool {
		requested_versions.len() <= 1
	}
}

impl<F> CompatibilityPolicy for F
where
	F: Fn(&BTreeSet<VersionId>) -> bool,
{
	fn is_compatible(&self, requested_versions: &BTreeSet<VersionId>) -> bool {
		self(requested_versions)
	}
}

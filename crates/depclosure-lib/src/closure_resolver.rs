//! Validates that a set of chosen package versions can be built together.
//!
//! The resolver does not choose versions, it walks the dependency closure of the given root
//! requirements and stops at the first package requested at incompatible versions or the first
//! build the registry has no record of.
//!
//! # Usage
//! - [`resolve()`] with a [`Registry`] and the root requirements for the default single version policy.
//! - [`resolve_with_policy()`] to substitute a [`CompatibilityPolicy`].
//! - [`resolve_closure()`] to also keep the requester graph for diagnostics.
//! - [`ClosureWalker`] directly to drive the walk one requirement at a time.

use std::collections::{BTreeMap, BTreeSet};

use crate::package::*;
use crate::registry::*;

mod compatibility;
pub use compatibility::CompatibilityPolicy;
pub use compatibility::StrictSingleVersion;

mod dependency_dictionary;
pub use dependency_dictionary::DependencyDictionary;
pub use dependency_dictionary::DependencySnapshot;
pub use dependency_dictionary::VersionConflict;

mod closure_walker;
pub use closure_walker::ClosureWalker;
pub use closure_walker::WalkerStatus;

mod resolved_closure;
pub use resolved_closure::ResolvedClosure;

/// Who asked for a requirement to be part of the closure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requester {
	/// Given directly by the caller.
	Root,
	/// Declared as a dependency by this build.
	Package(DependencyRequirement),
}

impl std::fmt::Display for Requester {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Requester::Root => write!(f, "root"),
			Requester::Package(requirement) => write!(f, "{}", requirement),
		}
	}
}

/// These errors halt the resolve.
///
/// All of them describe the input rather than a fault in the resolver and can be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
	/// The compatibility policy rejected the versions requested for `package`.
	#[error("incompatible versions of {package} required: {}", describe_requesters(.requested_by))]
	Conflict {
		package: String,
		/// Every version requested for `package` up to and including the rejected one.
		versions: BTreeSet<VersionId>,
		/// The first requester of each version in `versions`.
		requested_by: BTreeMap<VersionId, Requester>,
	},
	/// The registry has no record for this build, not even for the wildcard architecture.
	#[error("unknown dependency {package}@{version} ({architecture})")]
	UnknownDependency {
		package: String,
		version: VersionId,
		architecture: ArchitectureTag,
	},
	/// The registry client could not answer, only produced by clients with a transport.
	#[error("registry unavailable while looking up {package}@{version} ({architecture}): {reason}")]
	LookupUnavailable {
		package: String,
		version: VersionId,
		architecture: ArchitectureTag,
		reason: String,
	},
}

fn describe_requesters(requested_by: &BTreeMap<VersionId, Requester>) -> String {
	requested_by.iter()
		.map(|(version, requester)| format!("{} by {}", version, requester))
		.collect::<Vec<_>>()
		.join(", ")
}

/// Resolves `roots` allowing only a single version of each package.
///
/// # Errors
/// The first [`ResolveError`] met in breadth first order.
pub fn resolve<R: Registry + ?Sized>(registry: &R, roots: impl IntoIterator<Item = DependencyRequirement>) -> Result<DependencySnapshot, ResolveError> {
	resolve_with_policy(registry, StrictSingleVersion, roots)
}

/// Resolves `roots` accepting version sets according to `policy`.
pub fn resolve_with_policy<R, P>(registry: &R, policy: P, roots: impl IntoIterator<Item = DependencyRequirement>) -> Result<DependencySnapshot, ResolveError>
where
	R: Registry + ?Sized,
	P: CompatibilityPolicy,
{
	resolve_closure(registry, policy, roots).map(ResolvedClosure::into_snapshot)
}

/// Same as [`resolve_with_policy()`] but keeps the graph of who required what.
pub fn resolve_closure<R, P>(registry: &R, policy: P, roots: impl IntoIterator<Item = DependencyRequirement>) -> Result<ResolvedClosure, ResolveError>
where
	R: Registry + ?Sized,
	P: CompatibilityPolicy,
{
	ClosureWalker::new(registry, policy, roots).run()
}

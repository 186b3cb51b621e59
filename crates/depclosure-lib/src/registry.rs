//! Clients for the package registry.
//!
//! The resolver only ever asks a registry one question: what are the direct dependencies of this published build?
//! Everything about where the records live (a fixture, a database, a web service) stays behind [`Registry`].

use crate::package::*;

mod memory;
pub use memory::MemoryRegistry;

mod http;
pub use http::HttpRegistry;

/// Reasons a registry could not answer a lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
	/// No record matches the package, version and architecture, not even a wildcard one.
	#[error("no matching build record.")]
	NotFound,
	/// The registry could not be reached or returned something unusable.
	#[error("registry unavailable: {0}")]
	Unavailable(String),
}

/// A source of build records.
///
/// Implementations shared between threads must be safe for concurrent reads, the resolver never writes.
pub trait Registry {
	/// Gets the declared dependencies of `package_name` at `version` for `architecture`.
	///
	/// A record for exactly `architecture` takes precedence over a wildcard record, the two are never merged.
	/// Asking with the wildcard returns the wildcard record.
	/// 
	/// # Errors
	/// - [`LookupError::NotFound`] when neither an exact nor a wildcard record exists.
	/// - [`LookupError::Unavailable`] for transport failures.
	fn lookup(&self, package_name: &str, version: &VersionId, architecture: &ArchitectureTag) -> Result<Vec<DependencyRequirement>, LookupError>;
}

impl<R: Registry + ?Sized> Registry for &R {
	fn lookup(&self, package_name: &str, version: &VersionId, architecture: &ArchitectureTag) -> Result<Vec<DependencyRequirement>, LookupError> {
		(**self).lookup(package_name, version, architecture)
	}
}

impl<R: Registry + ?Sized> Registry for Box<R> {
	fn lookup(&self, package_name: &str, version: &VersionId, architecture: &ArchitectureTag) -> Result<Vec<DependencyRequirement>, LookupError> {
		(**self).lookup(package_name, version, architecture)
	}
}

impl<R: Registry + ?Sized> Registry for std::sync::Arc<R> {
	fn lookup(&self, package_name: &str, version: &VersionId, architecture: &ArchitectureTag) -> Result<Vec<DependencyRequirement>, LookupError> {
		(**self).lookup(package_name, version, architecture)
	}
}

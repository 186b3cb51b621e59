//! Various helper functions for testing
//! 
//! Fixture literals are expected to be valid, helpers panic on malformed versions or architectures.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use depclosure::registry::{LookupError, MemoryRegistry};
use depclosure::{ArchitectureTag, BuildRecord, DependencyRequirement, Registry, VersionId};

pub fn init_logger() {
	let _ = env_logger::builder().is_test(true).try_init();
}

pub fn version(version: &str) -> VersionId {
	VersionId::new(version).expect("fixture version should be valid")
}

pub fn architecture(tag: &str) -> ArchitectureTag {
	ArchitectureTag::new(tag).expect("fixture architecture should be valid")
}

/// A requirement for any architecture.
pub fn requirement(name: &str, version_str: &str) -> DependencyRequirement {
	DependencyRequirement::new(name, version(version_str), ArchitectureTag::All)
}

pub fn requirement_for(name: &str, version_str: &str, tag: &str) -> DependencyRequirement {
	DependencyRequirement::new(name, version(version_str), architecture(tag))
}

/// Builder for registries used in tests.
#[derive(Debug, Default, Clone)]
pub struct RegistryFixture {
	records: Vec<BuildRecord>,
}

impl RegistryFixture {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a wildcard architecture record whose dependencies are also wildcard.
	pub fn build(self, name: &str, version_str: &str, dependencies: &[(&str, &str)]) -> Self {
		self.build_for(name, version_str, "all", dependencies)
	}

	/// Adds a record for a specific architecture whose dependencies are wildcard.
	pub fn build_for(mut self, name: &str, version_str: &str, tag: &str, dependencies: &[(&str, &str)]) -> Self {
		self.records.push(BuildRecord::new(
			name,
			version(version_str),
			architecture(tag),
			dependencies.iter().map(|(n, v)| requirement(n, v)).collect(),
		));
		self
	}

	pub fn registry(self) -> MemoryRegistry {
		MemoryRegistry::from_records(self.records).expect("fixture records should be unique")
	}

	/// Writes the records as a JSON fixture file that is removed when dropped.
	pub fn write_json(&self) -> tempfile::NamedTempFile {
		let file = tempfile::NamedTempFile::new().expect("failed to create temp file");
		serde_json::to_writer_pretty(file.as_file(), &self.records).expect("failed to write fixture");
		file
	}
}

/// Counts lookups made through it.
#[derive(Debug)]
pub struct CountingRegistry<R> {
	inner: R,
	lookups: AtomicUsize,
}

impl<R> CountingRegistry<R> {
	pub fn new(inner: R) -> Self {
		Self { inner, lookups: AtomicUsize::new(0) }
	}

	pub fn lookups(&self) -> usize {
		self.lookups.load(Ordering::SeqCst)
	}
}

impl<R: Registry> Registry for CountingRegistry<R> {
	fn lookup(&self, package_name: &str, version: &VersionId, architecture: &ArchitectureTag) -> Result<Vec<DependencyRequirement>, LookupError> {
		self.lookups.fetch_add(1, Ordering::SeqCst);
		self.inner.lookup(package_name, version, architecture)
	}
}

/// Sleeps before every lookup, for exercising deadlines.
#[derive(Debug)]
pub struct DelayedRegistry<R> {
	inner: R,
	delay: Duration,
}

impl<R> DelayedRegistry<R> {
	pub fn new(inner: R, delay: Duration) -> Self {
		Self { inner, delay }
	}
}

impl<R: Registry> Registry for DelayedRegistry<R> {
	fn lookup(&self, package_name: &str, version: &VersionId, architecture: &ArchitectureTag) -> Result<Vec<DependencyRequirement>, LookupError> {
		std::thread::sleep(self.delay);
		self.inner.lookup(package_name, version, architecture)
	}
}

//! Registry held entirely in memory, usually loaded from a JSON fixture.

use std::collections::HashMap;

use super::*;

type ArchitectureRecords = HashMap<ArchitectureTag, Vec<DependencyRequirement>>;

#[derive(Debug, Default, Clone)]
pub struct MemoryRegistry {
	/// package name -> version -> architecture -> dependencies
	records: HashMap<String, HashMap<VersionId, ArchitectureRecords>>,
	record_count: usize,
}

impl MemoryRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// # Errors
	/// - [`AlreadyExists`](crate::Error::AlreadyExists) when two records share a package, version and architecture.
	pub fn from_records(records: impl IntoIterator<Item = BuildRecord>) -> crate::Result<Self> {
		let mut registry = Self::new();
		for record in records {
			registry.add_record(record)?;
		}
		Ok(registry)
	}

	/// Parses a JSON array of [`BuildRecord`]s.
	pub fn from_json(json: &str) -> crate::Result<Self> {
		let records: Vec<BuildRecord> = serde_json::from_str(json)?;
		Self::from_records(records)
	}

	/// Reads a JSON fixture file, see [`from_json()`](MemoryRegistry::from_json()).
	pub fn load_from_path(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
		let path = path.as_ref();
		let json = std::fs::read_to_string(path)?;
		let registry = Self::from_json(&json)?;
		log::info!("Loaded {} build records from {}", registry.len(), path.display());
		Ok(registry)
	}

	/// # Errors
	/// - [`AlreadyExists`](crate::Error::AlreadyExists) when a record with the same package, version and architecture is already registered.
	pub fn add_record(&mut self, record: BuildRecord) -> crate::Result<()> {
		let builds = self.records
			.entry(record.package_name.clone())
			.or_default()
			.entry(record.version.clone())
			.or_default();

		if builds.contains_key(&record.architecture) {
			return Err(crate::Error::AlreadyExists(record.to_string()))
		}

		builds.insert(record.architecture, record.dependencies);
		self.record_count += 1;
		Ok(())
	}

	/// Number of build records held.
	pub fn len(&self) -> usize {
		self.record_count
	}

	pub fn is_empty(&self) -> bool {
		self.record_count == 0
	}
}

impl Registry for MemoryRegistry {
	fn lookup(&self, package_name: &str, version: &VersionId, architecture: &ArchitectureTag) -> Result<Vec<DependencyRequirement>, LookupError> {
		let builds = self.records
			.get(package_name)
			.and_then(|versions| versions.get(version))
			.ok_or(LookupError::NotFound)?;

		builds.get(architecture)
			.or_else(|| builds.get(&ArchitectureTag::All))
			.cloned()
			.ok_or(LookupError::NotFound)
	}
}

use serde::{Serialize, Deserialize};

use super::*;

/// Requires `package_name` at exactly `version` for `architecture`.
///
/// Also used as the identity of a node in the dependency graph, two requirements are
/// the same node when all three fields match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyRequirement {
	package_name: String,
	version: VersionId,
	#[serde(default)]
	architecture: ArchitectureTag,
}

impl DependencyRequirement {
	pub fn new(package_name: impl Into<String>, version: VersionId, architecture: ArchitectureTag) -> Self {
		Self {
			package_name: package_name.into(),
			version,
			architecture,
		}
	}

	/// Parses a requirement in the form `name@version`.
	/// 
	/// # Errors
	/// - [`Parse`](crate::Error::Parse) when the `@` separator or either half is missing.
	pub fn parse(requirement: &str, architecture: ArchitectureTag) -> crate::Result<Self> {
		/* Split on the last '@' so scoped names such as "@scope/name@1.0" still work */
		let (name, version) = requirement.rsplit_once('@')
			.ok_or_else(|| crate::Error::Parse(format!("requirement \"{}\" is not in the form name@version", requirement)))?;
		if name.is_empty() {
			return Err(crate::Error::Parse(format!("requirement \"{}\" is missing a package name", requirement)))
		}
		Ok(Self::new(name, VersionId::new(version)?, architecture))
	}

	pub fn package_name(&self) -> &str {
		&self.package_name
	}

	pub fn version(&self) -> &VersionId {
		&self.version
	}

	pub fn architecture(&self) -> &ArchitectureTag {
		&self.architecture
	}
}

impl std::fmt::Display for DependencyRequirement {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}@{} ({})", self.package_name, self.version, self.architecture)
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn requirement_parse() {
		let r = DependencyRequirement::parse("A@1.0.0", ArchitectureTag::All).unwrap();
		assert_eq!(r.package_name(), "A");
		assert_eq!(r.version().as_str(), "1.0.0");
		assert!(r.architecture().is_wildcard());
	}

	#[test]
	fn requirement_parse_scoped_name() {
		let r = DependencyRequirement::parse("@scope/pkg@2.0", ArchitectureTag::All).unwrap();
		assert_eq!(r.package_name(), "@scope/pkg");
		assert_eq!(r.version().as_str(), "2.0");
	}

	#[test] fn requirement_parse_missing_version() { assert!(DependencyRequirement::parse("A@", ArchitectureTag::All).is_err()) }
	#[test] fn requirement_parse_missing_separator() { assert!(DependencyRequirement::parse("A", ArchitectureTag::All).is_err()) }
	#[test] fn requirement_parse_missing_name() { assert!(DependencyRequirement::parse("@1.0", ArchitectureTag::All).is_err()) }

	#[test]
	fn requirement_display() {
		let r = DependencyRequirement::new("A", VersionId::new("1.0.0").unwrap(), ArchitectureTag::new("linux-x64").unwrap());
		assert_eq!(r.to_string(), "A@1.0.0 (linux-x64)");
	}

	#[test]
	fn requirement_architecture_defaults_to_wildcard() {
		let r: DependencyRequirement = serde_json::from_str(r#"{"package_name":"A","version":"1.0.0"}"#).unwrap();
		assert_eq!(r.architecture(), &ArchitectureTag::All);
	}
}

use serde::{Serialize, Deserialize};

/// The version of a published build.
///
/// Versions are opaque to the resolver, it only ever compares them for equality.
/// The ordering is plain lexical ordering and only exists so sets of versions display in a stable order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionId(String);

impl VersionId {
	/// # Errors
	/// - [`Parse`](crate::Error::Parse) when `version` is empty or has leading/trailing whitespace.
	pub fn new(version: &str) -> crate::Result<Self> {
		if version.is_empty() {
			return Err(crate::Error::Parse("version can't be empty".to_string()))
		}
		if version.trim() != version {
			return Err(crate::Error::Parse(format!("version \"{}\" has surrounding whitespace", version)))
		}
		Ok(VersionId(version.to_string()))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl TryFrom<String> for VersionId {
	type Error = crate::Error;
	fn try_from(value: String) -> Result<Self, Self::Error> { Self::new(&value) }
}

impl TryFrom<&str> for VersionId {
	type Error = crate::Error;
	fn try_from(value: &str) -> Result<Self, Self::Error> { Self::new(value) }
}

impl std::str::FromStr for VersionId {
	type Err = crate::Error;
	fn from_str(s: &str) -> Result<Self, Self::Err> { Self::new(s) }
}

impl From<VersionId> for String {
	fn from(value: VersionId) -> Self {
		value.0
	}
}

impl AsRef<str> for VersionId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl std::fmt::Display for VersionId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

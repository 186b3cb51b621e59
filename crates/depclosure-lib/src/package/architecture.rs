use serde::{Serialize, Deserialize};

const WILDCARD: &str = "all";

/// The architecture a build was published for.
///
/// Construct named tags with [`ArchitectureTag::new`] so `"all"` always maps to the wildcard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ArchitectureTag {
	/// Applies to every architecture unless a more specific record exists.
	#[default] All,
	Named(NamedArchitecture),
}

/// A validated architecture name other than the wildcard, only created by [`ArchitectureTag::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamedArchitecture(String);

impl NamedArchitecture {
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl ArchitectureTag {
	/// # Errors
	/// - [`Parse`](crate::Error::Parse) when the tag is empty or contains anything other than ASCII alphanumerics, `.`, `_` or `-`.
	pub fn new(tag: &str) -> crate::Result<Self> {
		if tag == WILDCARD {
			return Ok(ArchitectureTag::All)
		}
		if tag.is_empty() {
			return Err(crate::Error::Parse("architecture can't be empty".to_string()))
		}
		if let Some(c) = tag.chars().find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))) {
			return Err(crate::Error::Parse(format!("architecture \"{}\" contains invalid character '{}'", tag, c)))
		}
		Ok(ArchitectureTag::Named(NamedArchitecture(tag.to_string())))
	}

	pub fn is_wildcard(&self) -> bool {
		matches!(self, ArchitectureTag::All)
	}

	pub fn as_str(&self) -> &str {
		match self {
			ArchitectureTag::All => WILDCARD,
			ArchitectureTag::Named(tag) => tag.as_str(),
		}
	}
}

impl TryFrom<String> for ArchitectureTag {
	type Error = crate::Error;
	fn try_from(value: String) -> Result<Self, Self::Error> { Self::new(&value) }
}

impl TryFrom<&str> for ArchitectureTag {
	type Error = crate::Error;
	fn try_from(value: &str) -> Result<Self, Self::Error> { Self::new(value) }
}

impl std::str::FromStr for ArchitectureTag {
	type Err = crate::Error;
	fn from_str(s: &str) -> Result<Self, Self::Err> { Self::new(s) }
}

impl From<ArchitectureTag> for String {
	fn from(value: ArchitectureTag) -> Self {
		value.as_str().to_string()
	}
}

impl std::fmt::Display for ArchitectureTag {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

//! Registry served over HTTP.
//!
//! Records are fetched from `{base}/builds/{package}/{version}/{architecture}` and expected as a JSON [`BuildRecord`].

use super::*;

pub struct HttpRegistry {
	client: reqwest::blocking::Client,
	base_url: reqwest::Url,
}

impl HttpRegistry {
	/// # Errors
	/// - [`Parse`](crate::Error::Parse) when `base_url` is not a valid base URL.
	/// - [`Reqwest`](crate::Error::Reqwest) when the client can't be created.
	pub fn new(base_url: &str, https_only: bool) -> crate::Result<Self> {
		let base_url = reqwest::Url::parse(base_url).map_err(|e| crate::Error::Parse(format!("invalid registry url \"{}\": {}", base_url, e)))?;
		if base_url.cannot_be_a_base() {
			return Err(crate::Error::Parse(format!("registry url \"{}\" can't be used as a base", base_url)))
		}

		let client = reqwest::blocking::Client::builder()
			.https_only(https_only)
			.build()?;

		Ok(Self { client, base_url })
	}

	pub(crate) fn record_url(&self, package_name: &str, version: &VersionId, architecture: &ArchitectureTag) -> reqwest::Url {
		let mut url = self.base_url.clone();
		if let Ok(mut segments) = url.path_segments_mut() {
			segments
				.pop_if_empty()
				.push("builds")
				.push(package_name)
				.push(version.as_str())
				.push(architecture.as_str());
		}
		url
	}

	/// `Ok(None)` when the registry answers 404.
	fn fetch(&self, package_name: &str, version: &VersionId, architecture: &ArchitectureTag) -> Result<Option<BuildRecord>, LookupError> {
		let url = self.record_url(package_name, version, architecture);
		log::debug!("Requesting build record {}", url);

		let response = self.client
			.get(url)
			.send()
			.map_err(|e| LookupError::Unavailable(e.to_string()))?;

		if response.status() == reqwest::StatusCode::NOT_FOUND {
			return Ok(None)
		}

		let record = response
			.error_for_status()
			.and_then(|r| r.json::<BuildRecord>())
			.map_err(|e| LookupError::Unavailable(e.to_string()))?;

		if record.package_name != package_name || &record.version != version || &record.architecture != architecture {
			return Err(LookupError::Unavailable(format!("registry answered {} for {}@{} ({})", record, package_name, version, architecture)))
		}

		Ok(Some(record))
	}
}

impl Registry for HttpRegistry {
	fn lookup(&self, package_name: &str, version: &VersionId, architecture: &ArchitectureTag) -> Result<Vec<DependencyRequirement>, LookupError> {
		if let Some(record) = self.fetch(package_name, version, architecture)? {
			return Ok(record.dependencies)
		}
		if !architecture.is_wildcard() {
			if let Some(record) = self.fetch(package_name, version, &ArchitectureTag::All)? {
				return Ok(record.dependencies)
			}
		}
		Err(LookupError::NotFound)
	}
}

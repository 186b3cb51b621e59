//! Configuration for tools built on the resolver.
//!
//! Stored as JSON, by default in `$XDG_CONFIG_HOME/depclosure/config.json`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Serialize, Deserialize};

use crate::registry::{Registry, MemoryRegistry, HttpRegistry};

/// Where build records come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegistrySource {
	/// A JSON array of build records, see [`MemoryRegistry::from_json()`].
	Fixture { path: PathBuf },
	/// A registry web service, see [`HttpRegistry`].
	Http { url: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
	#[serde(default)]
	registry: Option<RegistrySource>,
	#[serde(default = "default_https_only")]
	https_only: bool,
	/// Milliseconds a single resolve may run for.
	#[serde(default)]
	deadline_ms: Option<u64>,
}

fn default_https_only() -> bool { true }

impl Default for Config {
	fn default() -> Self {
		Self {
			registry: None,
			https_only: default_https_only(),
			deadline_ms: None,
		}
	}
}

impl Config {
	/// Location of the config file for the current user.
	///
	/// # Errors
	/// - [`Validation`](crate::Error::Validation) when the environment doesn't name a home or config directory.
	pub fn config_path() -> crate::Result<PathBuf> {
		#[cfg(target_os = "windows")]
		let path = std::env::var("APPDATA")
			.map(PathBuf::from)
			.map_err(|_| crate::Error::Validation("APPDATA environment variable not set.".to_string()))?;

		#[cfg(not(target_os = "windows"))]
		let path = if let Ok(e) = std::env::var("XDG_CONFIG_HOME") {
			PathBuf::from(e)
		} else {
			std::env::var("HOME")
				.map(|home| PathBuf::from(home).join(".config"))
				.map_err(|_| crate::Error::Validation("HOME environment variable not set.".to_string()))?
		};

		Ok(path.join("depclosure").join("config.json"))
	}

	pub fn load_from_disk() -> crate::Result<Config> {
		Self::load_from_path(Self::config_path()?)
	}

	pub fn load_from_path(path: impl AsRef<Path>) -> crate::Result<Config> {
		let path = path.as_ref();
		let json = std::fs::read_to_string(path)?;
		let config = serde_json::from_str(&json)?;
		log::info!("Loaded config from {}", path.display());
		Ok(config)
	}

	pub fn save_to_path(&self, path: impl AsRef<Path>) -> crate::Result<()> {
		let path = path.as_ref();
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(path, serde_json::to_string_pretty(self)?)?;
		Ok(())
	}

	pub fn registry(&self) -> Option<&RegistrySource> {
		self.registry.as_ref()
	}
	pub fn set_registry(&mut self, registry: RegistrySource) {
		self.registry = Some(registry);
	}

	pub fn https_only(&self) -> bool {
		self.https_only
	}
	pub fn set_https_only(&mut self, https_only: bool) {
		self.https_only = https_only;
	}

	pub fn deadline(&self) -> Option<Duration> {
		self.deadline_ms.map(Duration::from_millis)
	}
	pub fn set_deadline(&mut self, deadline: Option<Duration>) {
		self.deadline_ms = deadline.map(|d| d.as_millis().try_into().unwrap_or(u64::MAX));
	}

	/// Creates a client for the configured registry source.
	///
	/// # Errors
	/// - [`Validation`](crate::Error::Validation) when no registry is configured.
	/// - Any error from loading the fixture or creating the HTTP client.
	pub fn open_registry(&self) -> crate::Result<Box<dyn Registry + Send + Sync>> {
		match &self.registry {
			Some(RegistrySource::Fixture { path }) => Ok(Box::new(MemoryRegistry::load_from_path(path)?)),
			Some(RegistrySource::Http { url }) => Ok(Box::new(HttpRegistry::new(url, self.https_only)?)),
			None => Err(crate::Error::Validation("no registry source configured.".to_string())),
		}
	}
}

//! Async front for running resolves from a service.
//!
//! Resolves block on registry lookups, so each one runs on tokio's blocking pool.
//! A deadline can be placed around the whole resolve, the resolver itself knows nothing about time.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::closure_resolver::*;
use crate::package::DependencyRequirement;
use crate::registry::Registry;

#[derive(Debug, Error)]
pub enum ServiceError {
	#[error(transparent)]
	Resolve(#[from] ResolveError),
	/// The resolve was still running when the deadline passed.
	#[error("resolve did not finish within {0:?}")]
	DeadlineExceeded(Duration),
	#[error("resolve worker failed: {0}")]
	Worker(#[from] tokio::task::JoinError),
}

/// Validates root requirement sets against a shared registry.
///
/// Every call to [`validate()`](ValidationService::validate()) is an independent resolve,
/// the registry is the only thing shared between them.
pub struct ValidationService<R: ?Sized, P = StrictSingleVersion> {
	registry: Arc<R>,
	policy: P,
	deadline: Option<Duration>,
}

impl<R> ValidationService<R>
where
	R: Registry + Send + Sync + ?Sized + 'static,
{
	pub fn new(registry: Arc<R>) -> Self {
		Self::with_policy(registry, StrictSingleVersion)
	}
}

impl<R, P> ValidationService<R, P>
where
	R: Registry + Send + Sync + ?Sized + 'static,
	P: CompatibilityPolicy + Clone + Send + 'static,
{
	pub fn with_policy(registry: Arc<R>, policy: P) -> Self {
		Self {
			registry,
			policy,
			deadline: None,
		}
	}

	/// Limit how long a single resolve may take.
	///
	/// When the deadline passes the caller gets [`ServiceError::DeadlineExceeded`],
	/// the resolve keeps running on the blocking pool until its current lookup returns.
	pub fn deadline(mut self, deadline: Duration) -> Self {
		self.deadline = Some(deadline);
		self
	}

	pub fn registry(&self) -> &Arc<R> {
		&self.registry
	}

	pub async fn validate(&self, roots: Vec<DependencyRequirement>) -> Result<DependencySnapshot, ServiceError> {
		let registry = Arc::clone(&self.registry);
		let policy = self.policy.clone();
		log::debug!("Validating {} root requirements", roots.len());

		let task = tokio::task::spawn_blocking(move || resolve_with_policy(&*registry, policy, roots));

		let snapshot = match self.deadline {
			Some(deadline) => tokio::time::timeout(deadline, task)
				.await
				.map_err(|_| ServiceError::DeadlineExceeded(deadline))???,
			None => task.await??,
		};

		Ok(snapshot)
	}
}

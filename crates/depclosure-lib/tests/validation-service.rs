use std::sync::Arc;
use std::time::Duration;

use depclosure::closure_resolver::ResolveError;
use depclosure::service::*;
use depclosure_test_utils::*;

fn conflicting_fixture() -> RegistryFixture {
	RegistryFixture::new()
		.build("A", "1.0.0", &[("B", "1.0.0")])
		.build("C", "1.0.0", &[("B", "2.0.0")])
		.build("B", "1.0.0", &[])
		.build("B", "2.0.0", &[])
}

#[tokio::test]
async fn service_validates_closure() {
	init_logger();
	let service = ValidationService::new(Arc::new(conflicting_fixture().registry()));

	let snapshot = service.validate(vec![requirement("A", "1.0.0")]).await.expect("validate should succeed");
	assert_eq!(snapshot.len(), 2);
}

#[tokio::test]
async fn service_reports_conflict() {
	let service = ValidationService::new(Arc::new(conflicting_fixture().registry()))
		.deadline(Duration::from_secs(10));

	let e = service.validate(vec![requirement("A", "1.0.0"), requirement("C", "1.0.0")]).await.unwrap_err();
	assert!(matches!(e, ServiceError::Resolve(ResolveError::Conflict { ref package, .. }) if package == "B"));
}

#[tokio::test]
async fn service_deadline_exceeded() {
	let registry = DelayedRegistry::new(conflicting_fixture().registry(), Duration::from_millis(500));
	let service = ValidationService::new(Arc::new(registry))
		.deadline(Duration::from_millis(20));

	let e = service.validate(vec![requirement("A", "1.0.0")]).await.unwrap_err();
	assert!(matches!(e, ServiceError::DeadlineExceeded(d) if d == Duration::from_millis(20)));
}

#[tokio::test]
async fn service_runs_concurrent_validations() {
	let service = Arc::new(ValidationService::new(Arc::new(conflicting_fixture().registry())));

	let ok = {
		let service = Arc::clone(&service);
		tokio::spawn(async move { service.validate(vec![requirement("A", "1.0.0")]).await })
	};
	let conflict = {
		let service = Arc::clone(&service);
		tokio::spawn(async move { service.validate(vec![requirement("A", "1.0.0"), requirement("C", "1.0.0")]).await })
	};

	assert!(ok.await.expect("task panicked").is_ok());
	assert!(matches!(conflict.await.expect("task panicked"), Err(ServiceError::Resolve(_))));
}

#[tokio::test]
async fn service_accepts_boxed_registry() {
	let registry: Arc<dyn depclosure::Registry + Send + Sync> = Arc::new(conflicting_fixture().registry());
	let service = ValidationService::new(registry);

	assert!(service.validate(vec![requirement("C", "1.0.0")]).await.is_ok());
}

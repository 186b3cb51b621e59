use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::prelude::*;

use super::*;

/// Progress of a [`ClosureWalker`] after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkerStatus {
	/// Requirements are still waiting in the worklist.
	Pending,
	/// The worklist is empty and every requirement was compatible.
	Done,
}

#[derive(Debug)]
struct QueuedRequirement {
	requirement: DependencyRequirement,
	requester: Requester,
}

/// Walks the dependency closure of a set of root requirements breadth first.
///
/// Every requirement taken from the worklist is inserted into the [`DependencyDictionary`] first,
/// then expanded through the registry unless the same package, version and architecture was already expanded.
/// The visited set bounds the walk by the number of distinct builds reachable, so cyclic graphs terminate.
///
/// The first conflict or missing record halts the walker, later steps keep returning that error.
pub struct ClosureWalker<'r, R: ?Sized, P = StrictSingleVersion> {
	registry: &'r R,
	dictionary: DependencyDictionary<P>,
	visited: HashSet<DependencyRequirement>,
	worklist: VecDeque<QueuedRequirement>,
	/* Kept per version so conflicts can name who asked for what */
	first_requesters: HashMap<(String, VersionId), Requester>,
	graph: DiGraph<DependencyRequirement, ()>,
	nodes: HashMap<DependencyRequirement, NodeIndex>,
	halted: Option<ResolveError>,
}

impl<'r, R, P> ClosureWalker<'r, R, P>
where
	R: Registry + ?Sized,
	P: CompatibilityPolicy,
{
	/// `roots` are queued in the given order.
	pub fn new(registry: &'r R, policy: P, roots: impl IntoIterator<Item = DependencyRequirement>) -> Self {
		ClosureWalker {
			registry,
			dictionary: DependencyDictionary::with_policy(policy),
			visited: Default::default(),
			worklist: roots.into_iter()
				.map(|requirement| QueuedRequirement { requirement, requester: Requester::Root })
				.collect(),
			first_requesters: Default::default(),
			graph: Default::default(),
			nodes: Default::default(),
			halted: None,
		}
	}

	/// Processes the requirement at the front of the worklist.
	///
	/// # Errors
	/// - [`ResolveError::Conflict`] when the policy rejects the requirement's version.
	/// - [`ResolveError::UnknownDependency`] when the registry has no record to expand.
	/// - [`ResolveError::LookupUnavailable`] when the registry could not answer.
	pub fn step(&mut self) -> Result<WalkerStatus, ResolveError> {
		if let Some(e) = &self.halted {
			return Err(e.clone())
		}

		let Some(QueuedRequirement { requirement, requester }) = self.worklist.pop_front() else {
			return Ok(WalkerStatus::Done)
		};

		if let Err(conflict) = self.dictionary.insert(requirement.package_name(), requirement.version()) {
			log::debug!("{} requested by {} conflicts with {:?}", requirement, requester, conflict.versions);
			return Err(self.halt(self.conflict_error(conflict, &requirement, requester)))
		}

		self.record_edge(&requirement, &requester);
		self.first_requesters
			.entry((requirement.package_name().to_string(), requirement.version().clone()))
			.or_insert(requester);

		if !self.visited.insert(requirement.clone()) {
			/* Already expanded, its dependencies are queued or processed */
			return Ok(self.status())
		}

		log::trace!("Expanding {}", requirement);
		let dependencies = match self.registry.lookup(requirement.package_name(), requirement.version(), requirement.architecture()) {
			Ok(dependencies) => dependencies,
			Err(e) => {
				log::debug!("Lookup of {} failed: {}", requirement, e);
				return Err(self.halt(lookup_error(e, &requirement)))
			}
		};

		for dependency in dependencies {
			self.worklist.push_back(QueuedRequirement { requirement: dependency, requester: Requester::Package(requirement.clone()) });
		}

		Ok(self.status())
	}

	/// Steps until the worklist is empty or an error halts the walk.
	pub fn run(mut self) -> Result<ResolvedClosure, ResolveError> {
		while self.step()? == WalkerStatus::Pending {}
		Ok(self.finish())
	}

	/// The dictionary as accumulated so far.
	pub fn dictionary(&self) -> &DependencyDictionary<P> {
		&self.dictionary
	}

	/// Number of requirements waiting to be processed.
	pub fn pending(&self) -> usize {
		self.worklist.len()
	}

	fn finish(self) -> ResolvedClosure {
		ResolvedClosure::new(self.dictionary.snapshot(), self.graph)
	}

	fn status(&self) -> WalkerStatus {
		if self.worklist.is_empty() {
			WalkerStatus::Done
		} else {
			WalkerStatus::Pending
		}
	}

	fn halt(&mut self, e: ResolveError) -> ResolveError {
		self.halted = Some(e.clone());
		e
	}

	fn conflict_error(&self, conflict: VersionConflict, requirement: &DependencyRequirement, requester: Requester) -> ResolveError {
		let mut requested_by = BTreeMap::new();
		for version in &conflict.versions {
			let first = self.first_requesters.get(&(conflict.package.clone(), version.clone()));
			if let Some(first) = first {
				requested_by.insert(version.clone(), first.clone());
			}
		}
		/* The rejected version was never committed so it has no recorded requester yet */
		requested_by.entry(requirement.version().clone()).or_insert(requester);

		ResolveError::Conflict {
			package: conflict.package,
			versions: conflict.versions,
			requested_by,
		}
	}

	fn node_index(&mut self, requirement: &DependencyRequirement) -> NodeIndex {
		if let Some(i) = self.nodes.get(requirement) {
			return *i
		}
		let i = self.graph.add_node(requirement.clone());
		self.nodes.insert(requirement.clone(), i);
		i
	}

	fn record_edge(&mut self, requirement: &DependencyRequirement, requester: &Requester) {
		let target = self.node_index(requirement);
		if let Requester::Package(source) = requester {
			let source = self.node_index(source);
			self.graph.update_edge(source, target, ());
		}
	}
}

fn lookup_error(e: LookupError, requirement: &DependencyRequirement) -> ResolveError {
	let package = requirement.package_name().to_string();
	let version = requirement.version().clone();
	let architecture = requirement.architecture().clone();
	match e {
		LookupError::NotFound => ResolveError::UnknownDependency { package, version, architecture },
		LookupError::Unavailable(reason) => ResolveError::LookupUnavailable { package, version, architecture, reason },
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn v(s: &str) -> VersionId { VersionId::new(s).unwrap() }
	fn req(name: &str, version: &str) -> DependencyRequirement { DependencyRequirement::new(name, v(version), ArchitectureTag::All) }
	fn record(name: &str, version: &str, deps: &[(&str, &str)]) -> BuildRecord {
		BuildRecord::new(name, v(version), ArchitectureTag::All, deps.iter().map(|(n, ver)| req(n, ver)).collect())
	}

	#[test]
	fn empty_roots_are_done() {
		let registry = MemoryRegistry::new();
		let mut walker = ClosureWalker::new(&registry, StrictSingleVersion, Vec::<DependencyRequirement>::new());
		assert_eq!(walker.step(), Ok(WalkerStatus::Done));
		assert!(walker.dictionary().is_empty());
	}

	#[test]
	fn step_expands_one_requirement() {
		let registry = MemoryRegistry::from_records([
			record("A", "1.0.0", &[("B", "1.0.0"), ("C", "1.0.0")]),
			record("B", "1.0.0", &[]),
			record("C", "1.0.0", &[]),
		]).unwrap();
		let mut walker = ClosureWalker::new(&registry, StrictSingleVersion, [req("A", "1.0.0")]);

		assert_eq!(walker.step(), Ok(WalkerStatus::Pending));
		assert_eq!(walker.pending(), 2);
		assert_eq!(walker.step(), Ok(WalkerStatus::Pending));
		assert_eq!(walker.step(), Ok(WalkerStatus::Done));
		assert_eq!(walker.dictionary().len(), 3);
	}

	#[test]
	fn halted_walker_repeats_error() {
		let registry = MemoryRegistry::from_records([record("A", "1.0.0", &[])]).unwrap();
		let mut walker = ClosureWalker::new(&registry, StrictSingleVersion, [req("X", "1.0.0"), req("A", "1.0.0")]);

		let first = walker.step().unwrap_err();
		assert!(matches!(first, ResolveError::UnknownDependency { .. }));
		assert_eq!(walker.step(), Err(first));
		assert!(walker.dictionary().get("A").is_none());
	}

	#[test]
	fn conflict_names_requesters() {
		let registry = MemoryRegistry::from_records([
			record("A", "1.0.0", &[("B", "1.0.0")]),
			record("C", "1.0.0", &[("B", "2.0.0")]),
			record("B", "1.0.0", &[]),
			record("B", "2.0.0", &[]),
		]).unwrap();

		let e = ClosureWalker::new(&registry, StrictSingleVersion, [req("A", "1.0.0"), req("C", "1.0.0")]).run().unwrap_err();
		let ResolveError::Conflict { requested_by, .. } = &e else { panic!("expected a conflict, got {:?}", e) };
		assert_eq!(requested_by.get(&v("1.0.0")), Some(&Requester::Package(req("A", "1.0.0"))));
		assert_eq!(requested_by.get(&v("2.0.0")), Some(&Requester::Package(req("C", "1.0.0"))));
	}

	#[test]
	fn conflicting_roots_name_root() {
		let registry = MemoryRegistry::from_records([record("A", "1.0.0", &[])]).unwrap();
		let e = ClosureWalker::new(&registry, StrictSingleVersion, [req("A", "1.0.0"), req("A", "2.0.0")]).run().unwrap_err();
		assert_eq!(e.to_string(), "incompatible versions of A required: 1.0.0 by root, 2.0.0 by root");
	}

	#[test]
	fn unavailable_registry_is_reported() {
		struct Offline;
		impl Registry for Offline {
			fn lookup(&self, _: &str, _: &VersionId, _: &ArchitectureTag) -> Result<Vec<DependencyRequirement>, LookupError> {
				Err(LookupError::Unavailable("connection refused".to_string()))
			}
		}

		let e = ClosureWalker::new(&Offline, StrictSingleVersion, [req("A", "1.0.0")]).run().unwrap_err();
		assert!(matches!(e, ResolveError::LookupUnavailable { ref reason, .. } if reason == "connection refused"));
	}
}

use std::sync::Arc;

use depclosure::config::RegistrySource;
use depclosure::service::{ServiceError, ValidationService};
use depclosure::{ArchitectureTag, Config, DependencyRequirement};

#[derive(Debug, thiserror::Error)]
enum Error {
	#[error("depclosure error: {0}")]
	Depclosure(#[from] depclosure::Error),
	#[error("{0}")]
	Validation(#[from] ServiceError),
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	#[error("{0}")]
	Usage(String),
}

fn main() {
	let args: Vec<String> = std::env::args().collect();

	let mut opts = getopts::Options::new();
	opts.optflag("h", "help", "Show help");
	opts.optflag("v", "verbose", "Increased verbosity");
	opts.optopt("c", "config", "Config file to use instead of the default location", "PATH");
	opts.optopt("r", "registry", "JSON fixture of build records, overrides the configured registry", "PATH");
	opts.optopt("a", "arch", "Architecture of the root requirements, defaults to \"all\"", "ARCH");
	opts.parsing_style(getopts::ParsingStyle::FloatingFrees);

	let parsed_options = match opts.parse(&args[1..]) {
		Ok(m) => m,
		Err(e) => { eprintln!("Unable to parse options: {}", e); std::process::exit(2) }
	};

	if parsed_options.opt_present("h") {
		eprintln!("{}", opts.usage("Usage: depclosure-terminal [options] name@version..."));
		return;
	}

	let mut logger = env_logger::Builder::from_default_env();
	if parsed_options.opt_present("v") {
		logger.filter_level(log::LevelFilter::Debug);
	}
	logger.init();

	match run(&parsed_options) {
		Ok(lines) => {
			for line in lines {
				println!("{}", line);
			}
		},
		Err(e) => {
			log::error!("{}", e);
			std::process::exit(1);
		}
	}
}

fn run(parsed_options: &getopts::Matches) -> Result<Vec<String>, Error> {
	let mut config = match parsed_options.opt_str("c") {
		Some(path) => Config::load_from_path(path)?,
		None => Config::load_from_disk().unwrap_or_else(|e| {
			log::warn!("Failed to read config file: {}", e);
			log::warn!("Using default config.");
			Config::default()
		}),
	};

	if let Some(path) = parsed_options.opt_str("r") {
		config.set_registry(RegistrySource::Fixture { path: path.into() });
	}

	let architecture = match parsed_options.opt_str("a") {
		Some(tag) => ArchitectureTag::new(&tag)?,
		None => ArchitectureTag::All,
	};

	let roots = parse_roots(&parsed_options.free, &architecture)?;
	let registry: Arc<dyn depclosure::Registry + Send + Sync> = Arc::from(config.open_registry()?);

	let mut service = ValidationService::new(registry);
	if let Some(deadline) = config.deadline() {
		service = service.deadline(deadline);
	}

	/* The HTTP registry uses a blocking client which must not be created inside the runtime */
	let runtime = tokio::runtime::Runtime::new()?;
	let snapshot = runtime.block_on(service.validate(roots))?;

	Ok(snapshot.single_versions()
		.into_iter()
		.map(|(name, version)| format!("{} {}", name, version))
		.collect())
}

fn parse_roots(free: &[String], architecture: &ArchitectureTag) -> Result<Vec<DependencyRequirement>, Error> {
	if free.is_empty() {
		return Err(Error::Usage("no requirements given, expected name@version arguments.".to_string()))
	}
	Ok(free.iter()
		.map(|s| DependencyRequirement::parse(s, architecture.clone()))
		.collect::<depclosure::Result<Vec<_>>>()?)
}

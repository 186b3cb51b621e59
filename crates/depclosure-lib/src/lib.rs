pub mod error;
pub use error::Result;
pub use error::Error;

pub mod config;
pub use config::Config;

pub mod package;
pub use package::VersionId;
pub use package::ArchitectureTag;
pub use package::DependencyRequirement;
pub use package::BuildRecord;

pub mod registry;
pub use registry::Registry;

pub mod closure_resolver;
pub use closure_resolver::resolve;
pub use closure_resolver::resolve_with_policy;
pub use closure_resolver::ResolveError;

pub mod service;

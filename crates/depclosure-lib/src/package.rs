//! Various types describing published builds and the requirements placed on them.

mod version;
pub use version::VersionId;

mod architecture;
pub use architecture::ArchitectureTag;
pub use architecture::NamedArchitecture;

mod requirement;
pub use requirement::DependencyRequirement;

mod build_record;
pub use build_record::BuildRecord;

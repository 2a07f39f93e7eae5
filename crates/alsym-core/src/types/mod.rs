//! Core data types for symbol-package resolution.

pub mod package;
pub mod range;
pub mod requirement;
pub mod version;

pub use package::PackageId;
pub use range::VersionRange;
pub use requirement::Requirement;
pub use version::AppVersion;

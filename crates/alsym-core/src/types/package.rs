//! Symbol-package identity.
//!
//! A symbol package is addressed by a dotted key derived from the dependency
//! declaration: `{publisher}.{name}.symbols.{appId}`. The root application's
//! own platform package uses a fixed sentinel name instead. Keys are
//! case-insensitive wherever they act as lookup keys (feeds, maps) but the
//! declared casing is preserved for display, the lock-file, and payload
//! filenames.

use crate::types::AppVersion;
use crate::utils::sanitize_name;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Sentinel package name for the root application's platform symbols
pub const PLATFORM_PACKAGE: &str = "Microsoft.Application.symbols";

/// File extension of the extracted symbol payload
pub const PAYLOAD_EXTENSION: &str = "app";

/// Unique identifier for a symbol package
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageId {
    name: String,
}

impl PackageId {
    /// Identifier for a declared dependency's symbol package
    pub fn for_dependency(publisher: &str, name: &str, app_id: &str) -> Self {
        Self {
            name: format!("{}.{}.symbols.{}", publisher, name, app_id),
        }
    }

    /// The fixed platform symbols package
    pub fn platform() -> Self {
        Self {
            name: PLATFORM_PACKAGE.to_string(),
        }
    }

    /// Wrap an already-formed package identifier (e.g. a lock-file key)
    pub fn from_name(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Display/cache key with declared casing preserved
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Lowercased key used for feed lookups
    pub fn feed_key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Identifier with filesystem-hostile characters replaced, used to
    /// name payload files
    pub fn clean_name(&self) -> String {
        sanitize_name(&self.name)
    }

    /// Payload filename for a concrete version of this package
    pub fn payload_file_name(&self, version: &AppVersion) -> String {
        format!(
            "{}.{}.{}",
            self.clean_name(),
            sanitize_name(version.as_str()),
            PAYLOAD_EXTENSION
        )
    }
}

impl PartialEq for PackageId {
    fn eq(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
    }
}

impl Eq for PackageId {}

impl Hash for PackageId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in self.name.bytes() {
            state.write_u8(byte.to_ascii_lowercase());
        }
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependency_identifier() {
        let id = PackageId::for_dependency("Acme", "Lib", "y");
        assert_eq!(id.as_str(), "Acme.Lib.symbols.y");
        assert_eq!(id.feed_key(), "acme.lib.symbols.y");
    }

    #[test]
    fn test_platform_identifier() {
        assert_eq!(PackageId::platform().as_str(), "Microsoft.Application.symbols");
    }

    #[test]
    fn test_case_insensitive_equality() {
        let a = PackageId::for_dependency("Acme", "Lib", "y");
        let b = PackageId::from_name("acme.lib.SYMBOLS.y");
        assert_eq!(a, b);

        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn test_payload_file_name() {
        let id = PackageId::for_dependency("Acme Corp", "My Lib", "y");
        let version = AppVersion::parse("1.0");
        assert_eq!(id.payload_file_name(&version), "Acme_Corp.My_Lib.symbols.y.1.0.app");
    }
}

//! Minimum-version requirements.

use crate::types::{AppVersion, PackageId};

/// A minimum-version constraint on a package, from the root manifest or from
/// another package's archive manifest. `None` means the package is required
/// at any version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub package: PackageId,
    pub minimum: Option<AppVersion>,
}

impl Requirement {
    pub fn new(package: PackageId, minimum: Option<AppVersion>) -> Self {
        Self { package, minimum }
    }

    /// Whether a resolved version satisfies this requirement
    pub fn is_satisfied_by(&self, version: &AppVersion) -> bool {
        match &self.minimum {
            Some(min) => version >= min,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_satisfaction() {
        let req = Requirement::new(
            PackageId::for_dependency("Acme", "Lib", "y"),
            Some(AppVersion::parse("1.0")),
        );
        assert!(req.is_satisfied_by(&AppVersion::parse("1.5")));
        assert!(req.is_satisfied_by(&AppVersion::parse("1.0.0.0")));
        assert!(!req.is_satisfied_by(&AppVersion::parse("0.9")));

        let open = Requirement::new(PackageId::platform(), None);
        assert!(open.is_satisfied_by(&AppVersion::parse("0.1")));
    }
}

//! Resolution results and conflict reporting.
//!
//! A conflict is non-fatal: the resolver picks the best version the feed has
//! and keeps going, and the caller decides what to do with the report. For
//! each conflicted package the report carries the requested minimum, the
//! version actually resolved, the feed's ceiling, and the provenance edges
//! that raised the minimum, so the source of an unsatisfiable range can be
//! located without re-deriving the graph by hand.

use std::collections::HashMap;
use std::fmt::Write as _;

use indexmap::IndexMap;

use alsym_core::types::{AppVersion, PackageId, Requirement};

/// A package resolved below its effective minimum requirement
#[derive(Debug, Clone)]
pub struct Conflict {
    pub package: PackageId,
    /// The final effective minimum the run arrived at
    pub requested: AppVersion,
    /// The version actually resolved (best the feed had)
    pub resolved: AppVersion,
    /// The highest version observed on the feed
    pub best_available: Option<AppVersion>,
}

/// A provenance edge: resolving `parent` raised `child`'s minimum
#[derive(Debug, Clone)]
pub struct Raise {
    pub parent: PackageId,
    pub child: PackageId,
    pub minimum: AppVersion,
}

/// The outcome of one successful resolution run
#[derive(Debug, Default)]
pub struct Resolution {
    /// Resolved package versions, in resolution order
    pub packages: IndexMap<PackageId, AppVersion>,
    /// Packages resolved below their effective minimum
    pub conflicts: Vec<Conflict>,
    /// Every minimum-raising provenance edge recorded during the run
    pub raises: Vec<Raise>,
    /// Each package's discovered requirements (persisted to the lock-file)
    pub dependencies: HashMap<PackageId, Vec<Requirement>>,
}

impl Resolution {
    /// Provenance edges that contributed to a package's final minimum
    pub fn raises_for(&self, package: &PackageId) -> Vec<&Raise> {
        self.raises.iter().filter(|r| r.child == *package).collect()
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    /// Render the human-readable conflict report
    pub fn render_conflicts(&self) -> String {
        let mut out = String::new();

        for conflict in &self.conflicts {
            let _ = writeln!(
                out,
                "{}: requested >= {}, resolved {}, best available {}",
                conflict.package,
                conflict.requested,
                conflict.resolved,
                conflict
                    .best_available
                    .as_ref()
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "unknown".to_string()),
            );

            let raises = self.raises_for(&conflict.package);
            if raises.is_empty() {
                let _ = writeln!(out, "  required by: root manifest");
            } else {
                for raise in raises {
                    let _ = writeln!(
                        out,
                        "  raised to {} by {}",
                        raise.minimum, raise.parent
                    );
                }
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_conflicts() {
        let foo = PackageId::for_dependency("Acme", "Foo", "f");
        let bar = PackageId::for_dependency("Acme", "Bar", "b");

        let mut resolution = Resolution::default();
        resolution
            .packages
            .insert(foo.clone(), AppVersion::parse("4.9"));
        resolution.conflicts.push(Conflict {
            package: foo.clone(),
            requested: AppVersion::parse("5.0"),
            resolved: AppVersion::parse("4.9"),
            best_available: Some(AppVersion::parse("4.9")),
        });
        resolution.raises.push(Raise {
            parent: bar,
            child: foo.clone(),
            minimum: AppVersion::parse("5.0"),
        });

        let report = resolution.render_conflicts();
        assert!(report.contains("requested >= 5.0"));
        assert!(report.contains("resolved 4.9"));
        assert!(report.contains("raised to 5.0 by Acme.Bar.symbols.b"));

        assert_eq!(resolution.raises_for(&foo).len(), 1);
        assert!(resolution.has_conflicts());
    }

    #[test]
    fn test_root_only_conflict_blames_manifest() {
        let foo = PackageId::for_dependency("Acme", "Foo", "f");
        let mut resolution = Resolution::default();
        resolution.conflicts.push(Conflict {
            package: foo,
            requested: AppVersion::parse("5.0"),
            resolved: AppVersion::parse("4.9"),
            best_available: Some(AppVersion::parse("4.9")),
        });

        assert!(resolution.render_conflicts().contains("root manifest"));
    }
}

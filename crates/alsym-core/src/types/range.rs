//! Declared version-range constraints.
//!
//! A dependency entry inside a symbol archive declares its constraint as a
//! range string in interval notation (`[1.0,)`, `[1.0,2.0)`) or as a bare
//! minimum (`1.0`). Only the lower bound matters to resolution; an absent or
//! open-ended lower bound means "no minimum".

use crate::types::AppVersion;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A declared version-range constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionRange {
    raw: String,
}

impl VersionRange {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The range string as declared
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The minimum version this range demands, if it has one.
    ///
    /// `"1.0"` and `"[1.0,)"` both yield `1.0`; `"*"`, `""` and `"(,2.0)"`
    /// yield no minimum.
    pub fn floor(&self) -> Option<AppVersion> {
        let raw = self.raw.trim();
        if raw.is_empty() || raw == "*" {
            return None;
        }

        let lower = if raw.starts_with('[') || raw.starts_with('(') {
            let inner = raw
                .trim_start_matches(['[', '('])
                .trim_end_matches([']', ')']);
            match inner.split_once(',') {
                Some((lo, _)) => lo.trim(),
                None => inner.trim(), // exact pin like "[1.0]"
            }
        } else {
            raw
        };

        if lower.is_empty() {
            return None;
        }

        Some(AppVersion::parse(lower))
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

//! Version manifest loading and the fallback chain.
//!
//! Documentation content is versioned per release. Not every page is
//! rewritten for every release, so a page missing from the requested
//! version is served from the newest older version that has it (shown as
//! "inherited" in the UI). The manifest fixes the probing order:
//!
//! ```text
//! contents/docs/versions.json
//! {
//!   "order": ["v1.2.0", "v1.1.0", "v1.0.0"],   // newest first
//!   "latest": "v1.2.0",
//!   "deprecated": ["v1.0.0"]
//! }
//! ```
//!
//! [`VersionManifest::fallback_chain`] for a known version is the suffix of
//! `order` starting at that version; for an unknown version it degrades to
//! the whole list. Absence of content anywhere in the chain is reported by
//! the content locator, never here.
//!
//! The manifest is read once at startup and passed by reference — there is
//! no hidden global. A malformed manifest is the one hard failure in the
//! docs pipeline: without it no docs page can be served, so loading errors
//! are fatal rather than degraded.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("manifest validation error: {0}")]
    Validation(String),
}

/// The ordered set of documentation versions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VersionManifest {
    /// All supported versions, newest first. Fallback walks left to right.
    pub order: Vec<String>,
    /// The version the docs landing page links to.
    pub latest: String,
    /// Versions still served but flagged as deprecated in the UI.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deprecated: Vec<String>,
}

impl VersionManifest {
    /// Read and validate `versions.json`.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let raw = fs::read_to_string(path)?;
        let manifest: VersionManifest = serde_json::from_str(&raw)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Check the invariants every other component relies on.
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.order.is_empty() {
            return Err(ManifestError::Validation(
                "order must list at least one version".into(),
            ));
        }
        if !self.order.contains(&self.latest) {
            return Err(ManifestError::Validation(format!(
                "latest \"{}\" is not in order",
                self.latest
            )));
        }
        for v in &self.deprecated {
            if !self.order.contains(v) {
                return Err(ManifestError::Validation(format!(
                    "deprecated \"{v}\" is not in order"
                )));
            }
        }
        Ok(())
    }

    /// The ordered list of versions to probe for a requested version.
    ///
    /// Known version: the suffix of `order` starting there (requested
    /// first, then progressively older). Unknown version: the entire
    /// `order`, unchanged — try every known version, newest first.
    pub fn fallback_chain(&self, requested: &str) -> &[String] {
        match self.order.iter().position(|v| v == requested) {
            Some(start) => &self.order[start..],
            None => &self.order,
        }
    }

    pub fn is_deprecated(&self, version: &str) -> bool {
        self.deprecated.iter().any(|v| v == version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(order: &[&str], latest: &str) -> VersionManifest {
        VersionManifest {
            order: order.iter().map(|s| s.to_string()).collect(),
            latest: latest.to_string(),
            deprecated: Vec::new(),
        }
    }

    #[test]
    fn chain_for_newest_is_whole_order() {
        let m = manifest(&["v1.2.0", "v1.1.0", "v1.0.0"], "v1.2.0");
        assert_eq!(m.fallback_chain("v1.2.0"), ["v1.2.0", "v1.1.0", "v1.0.0"]);
    }

    #[test]
    fn chain_starts_at_requested_version() {
        let m = manifest(&["v1.2.0", "v1.1.0", "v1.0.0"], "v1.2.0");
        assert_eq!(m.fallback_chain("v1.1.0"), ["v1.1.0", "v1.0.0"]);
        assert_eq!(m.fallback_chain("v1.0.0"), ["v1.0.0"]);
    }

    #[test]
    fn chain_is_contiguous_suffix_for_every_known_version() {
        let m = manifest(&["v3", "v2", "v1"], "v3");
        for (i, v) in m.order.iter().enumerate() {
            let chain = m.fallback_chain(v);
            assert_eq!(chain.first().map(String::as_str), Some(v.as_str()));
            assert_eq!(chain, &m.order[i..]);
        }
    }

    #[test]
    fn unknown_version_degrades_to_full_order() {
        let m = manifest(&["v1.2.0", "v1.1.0"], "v1.2.0");
        assert_eq!(m.fallback_chain("v9.9.9"), m.order.as_slice());
        assert_eq!(m.fallback_chain(""), m.order.as_slice());
    }

    #[test]
    fn single_version_manifest() {
        let m = manifest(&["v1.0.0"], "v1.0.0");
        assert_eq!(m.fallback_chain("v1.0.0"), ["v1.0.0"]);
    }

    #[test]
    fn validate_rejects_latest_outside_order() {
        let m = manifest(&["v1.0.0"], "v2.0.0");
        assert!(matches!(m.validate(), Err(ManifestError::Validation(_))));
    }

    #[test]
    fn validate_rejects_empty_order() {
        let m = manifest(&[], "v1.0.0");
        assert!(matches!(m.validate(), Err(ManifestError::Validation(_))));
    }

    #[test]
    fn validate_rejects_unknown_deprecated() {
        let mut m = manifest(&["v1.1.0", "v1.0.0"], "v1.1.0");
        m.deprecated.push("v0.9.0".into());
        assert!(matches!(m.validate(), Err(ManifestError::Validation(_))));
    }

    #[test]
    fn load_parses_and_validates() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("versions.json");
        std::fs::write(
            &path,
            r#"{"order": ["v1.1.0", "v1.0.0"], "latest": "v1.1.0", "deprecated": ["v1.0.0"]}"#,
        )
        .unwrap();

        let m = VersionManifest::load(&path).unwrap();
        assert_eq!(m.latest, "v1.1.0");
        assert!(m.is_deprecated("v1.0.0"));
        assert!(!m.is_deprecated("v1.1.0"));
    }

    #[test]
    fn load_fails_on_malformed_json() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("versions.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            VersionManifest::load(&path),
            Err(ManifestError::Json(_))
        ));
    }

    #[test]
    fn load_fails_on_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(matches!(
            VersionManifest::load(&dir.path().join("versions.json")),
            Err(ManifestError::Io(_))
        ));
    }
}

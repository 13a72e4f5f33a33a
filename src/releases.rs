//! Release manifest shapes for the download and releases pages.
//!
//! The manifest is published next to the release artifacts and fetched by
//! the pages at view time:
//!
//! ```text
//! {
//!   "baseUrl": "https://dl.bnlang.dev/",
//!   "latest": "v1.1.0",
//!   "releases": [
//!     { "version": "v1.1.0", "date": "2026-05-01", "status": "stable",
//!       "files": [ { "name": "bnlang-linux-x64.tar.gz", "type": "binary",
//!                    "platform": "linux", "arch": "x64",
//!                    "sizeBytes": 14680064, "sha256": "…" } ] }
//!   ]
//! }
//! ```
//!
//! Fetching, retry, and caching policy belong to the page layer; this
//! module only defines the wire shape plus the small presentation helpers
//! the UI depends on (artifact-kind inference, human size labels,
//! per-locale release notes). Unknown fields are tolerated — the manifest
//! is produced by the release pipeline and may grow fields ahead of us.

use crate::locale::Locale;
use serde::{Deserialize, Serialize};

/// Top-level release manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseIndex {
    /// Download URL prefix, trailing slash included.
    pub base_url: String,
    pub latest: String,
    pub releases: Vec<Release>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    pub version: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_english: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_bangla: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_banglish: Option<String>,
    pub files: Vec<ReleaseFile>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scripts: Vec<ReleaseScript>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseFile {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

/// Install scripts (`install.sh`, `install.ps1`) shipped per release.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseScript {
    pub name: String,
    pub platform: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

/// What kind of artifact a file is, as the download page groups them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Installer,
    Binary,
    Source,
}

impl ReleaseIndex {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn release(&self, version: &str) -> Option<&Release> {
        self.releases.iter().find(|r| r.version == version)
    }

    pub fn latest_release(&self) -> Option<&Release> {
        self.release(&self.latest)
    }

    /// Absolute download URL for one file of one release.
    pub fn download_url(&self, version: &str, file: &ReleaseFile) -> String {
        format!("{}{}/{}", self.base_url, version, file.name)
    }
}

impl Release {
    /// Release note for a locale, falling back to the English note.
    pub fn note(&self, locale: Locale) -> Option<&str> {
        let localized = match locale {
            Locale::En => self.note_english.as_deref(),
            Locale::Bn => self.note_bangla.as_deref(),
            Locale::Banglish => self.note_banglish.as_deref(),
        };
        localized.or(self.note_english.as_deref())
    }
}

impl ReleaseFile {
    /// Explicit `type` field when recognized; otherwise a file without a
    /// platform is a source archive and the rest are binaries.
    pub fn artifact_kind(&self) -> ArtifactKind {
        match self.kind.as_deref() {
            Some("installer") => ArtifactKind::Installer,
            Some("binary") => ArtifactKind::Binary,
            Some("source") => ArtifactKind::Source,
            _ if self.platform.is_none() => ArtifactKind::Source,
            _ => ArtifactKind::Binary,
        }
    }

    /// Pre-rendered size label when the manifest carries one, otherwise
    /// formatted from the byte count.
    pub fn size_display(&self) -> String {
        match &self.size_label {
            Some(label) if !label.is_empty() => label.clone(),
            _ => format_bytes(self.size_bytes),
        }
    }
}

/// Human-readable size: two decimals below 10 in a scaled unit, none
/// otherwise. Missing/zero sizes render as an empty string.
pub fn format_bytes(n: Option<u64>) -> String {
    let Some(n) = n.filter(|&n| n > 0) else {
        return String::new();
    };
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut v = n as f64;
    let mut i = 0;
    while v >= 1024.0 && i < UNITS.len() - 1 {
        v /= 1024.0;
        i += 1;
    }
    if v < 10.0 && i > 0 {
        format!("{v:.2} {}", UNITS[i])
    } else {
        format!("{v:.0} {}", UNITS[i])
    }
}

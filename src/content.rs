//! Content storage and the version-fallback locator.
//!
//! Content lives on disk as one directory per page with an `index.md`
//! inside, versioned for docs and unversioned for the learn section:
//!
//! ```text
//! contents/
//! ├── docs/
//! │   ├── v1.1.0/
//! │   │   └── introduction/index.md
//! │   └── v1.0.0/
//! │       ├── introduction/index.md
//! │       └── keywords/if-keyword/index.md
//! └── learn/
//!     └── get-started/index.md
//! ```
//!
//! [`locate`] probes the fallback chain in order and serves the first
//! version that has the page; the result records which version actually
//! supplied it so the UI can show an "inherited" badge. A page missing
//! from every version is a normal outcome ([`LoadedContent::NotFound`]),
//! not an error — the rendering layer shows a not-found card.
//!
//! ## Front-matter
//!
//! Files start with an optional `+++`-delimited TOML block. Keys keep the
//! site's historical camelCase names (`title`, `bnTitle`, `banglishTitle`,
//! `description`, …); [`localized_meta`] resolves them per locale with the
//! route-table title as the fallback of last resort.

use crate::headings::{self, Heading};
use crate::locale::Locale;
use crate::versions::VersionManifest;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("front-matter parse error: {0}")]
    FrontMatter(#[from] toml::de::Error),
    #[error("unterminated front-matter block")]
    UnterminatedFrontMatter,
}

/// Which tree a piece of content was served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    Docs { version: String },
    Learn,
}

impl fmt::Display for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentSource::Docs { version } => f.write_str(version),
            ContentSource::Learn => f.write_str("learn"),
        }
    }
}

/// Result of locating one content item.
#[derive(Debug)]
pub enum LoadedContent {
    Found(DocContent),
    NotFound,
}

impl LoadedContent {
    pub fn found(&self) -> Option<&DocContent> {
        match self {
            LoadedContent::Found(doc) => Some(doc),
            LoadedContent::NotFound => None,
        }
    }
}

/// A located page: where it came from, its metadata, and its body.
#[derive(Debug)]
pub struct DocContent {
    /// The version (or learn tree) that actually supplied the content —
    /// may be older than the requested version.
    pub source: ContentSource,
    pub front_matter: toml::Table,
    /// Headings visible to the requested locale, depth 2–4.
    pub headings: Vec<Heading>,
    /// Markdown body with front-matter stripped.
    pub body: String,
}

impl DocContent {
    /// True when the content was served from an older version than the
    /// one the visitor asked for.
    pub fn inherited_from(&self, requested_version: &str) -> Option<&str> {
        match &self.source {
            ContentSource::Docs { version } if version != requested_version => Some(version),
            _ => None,
        }
    }
}

/// Storage collaborator the locator probes. One content item per
/// `(source, slug path)` address.
pub trait ContentStore {
    fn exists(&self, source: &ContentSource, slug: &[String]) -> bool;
    /// Raw content text, or `None` when the address has no content.
    fn read(&self, source: &ContentSource, slug: &[String]) -> io::Result<Option<String>>;
}

/// Filesystem-backed store rooted at the content directory.
pub struct FsContentStore {
    root: PathBuf,
}

impl FsContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsContentStore { root: root.into() }
    }

    fn path_for(&self, source: &ContentSource, slug: &[String]) -> PathBuf {
        let mut path = match source {
            ContentSource::Docs { version } => self.root.join("docs").join(version),
            ContentSource::Learn => self.root.join("learn"),
        };
        for segment in slug {
            path.push(segment);
        }
        path.push("index.md");
        path
    }
}

impl ContentStore for FsContentStore {
    fn exists(&self, source: &ContentSource, slug: &[String]) -> bool {
        self.path_for(source, slug).is_file()
    }

    fn read(&self, source: &ContentSource, slug: &[String]) -> io::Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(source, slug)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Find the most specific content for `(locale, slug, version)`.
///
/// With a requested version, each version in the fallback chain is probed
/// in order and the first hit wins. With `None`, the slug addresses the
/// unversioned learn tree — exactly one lookup, no chain.
pub fn locate(
    store: &dyn ContentStore,
    manifest: &VersionManifest,
    locale: Locale,
    slug: &[String],
    requested_version: Option<&str>,
) -> Result<LoadedContent, ContentError> {
    let hit = match requested_version {
        Some(requested) => {
            let mut hit = None;
            for version in manifest.fallback_chain(requested) {
                let source = ContentSource::Docs {
                    version: version.clone(),
                };
                if let Some(raw) = store.read(&source, slug)? {
                    hit = Some((source, raw));
                    break;
                }
            }
            hit
        }
        None => store
            .read(&ContentSource::Learn, slug)?
            .map(|raw| (ContentSource::Learn, raw)),
    };

    let Some((source, raw)) = hit else {
        return Ok(LoadedContent::NotFound);
    };

    let (front_matter, body) = split_front_matter(&raw)?;
    let headings = headings::extract(body, locale);
    Ok(LoadedContent::Found(DocContent {
        source,
        front_matter,
        headings,
        body: body.to_string(),
    }))
}

/// Split an optional leading `+++` TOML front-matter block from the body.
///
/// No block yields an empty table and the whole input as body. An opened
/// but never closed block is an authoring error worth surfacing.
pub fn split_front_matter(raw: &str) -> Result<(toml::Table, &str), ContentError> {
    let Some(after_open) = raw.strip_prefix("+++") else {
        return Ok((toml::Table::new(), raw));
    };
    let Some(after_open) = after_open
        .strip_prefix("\r\n")
        .or_else(|| after_open.strip_prefix('\n'))
    else {
        // "+++" embedded in the first line is content, not a fence
        return Ok((toml::Table::new(), raw));
    };

    let (fm_raw, rest) = if let Some(rest) = after_open.strip_prefix("+++") {
        ("", rest)
    } else {
        let Some(close) = after_open.find("\n+++") else {
            return Err(ContentError::UnterminatedFrontMatter);
        };
        (
            after_open[..close].trim_end_matches('\r'),
            &after_open[close + 4..],
        )
    };
    let body = match rest.find('\n') {
        Some(nl) => &rest[nl + 1..],
        None => "",
    };
    let table: toml::Table = toml::from_str(fm_raw)?;
    Ok((table, body))
}

/// Localized page title/description.
#[derive(Debug, Clone, PartialEq)]
pub struct PageMeta {
    pub title: String,
    pub description: Option<String>,
}

/// Resolve title/description for a locale from front-matter, with the
/// static route-table title (`fallback_title`) used when front-matter has
/// no localized or default title — e.g. for not-found pages.
pub fn localized_meta(locale: Locale, fm: &toml::Table, fallback_title: &str) -> PageMeta {
    let get = |key: &str| fm.get(key).and_then(toml::Value::as_str);
    let (title_sources, description_sources): (Vec<Option<&str>>, Vec<Option<&str>>) = match locale
    {
        Locale::Bn => (
            vec![get("bnTitle"), Some(fallback_title), get("title")],
            vec![get("bnDescription"), get("description")],
        ),
        Locale::Banglish => (
            vec![
                get("banglishTitle"),
                get("bnLatnTitle"),
                Some(fallback_title),
                get("title"),
            ],
            vec![
                get("banglishDescription"),
                get("bnLatnDescription"),
                get("description"),
            ],
        ),
        Locale::En => (
            vec![get("title"), Some(fallback_title)],
            vec![get("description")],
        ),
    };
    PageMeta {
        title: resolve(&title_sources).unwrap_or_default(),
        description: resolve(&description_sources),
    }
}

/// First non-empty source wins. Same merge rule for titles and
/// descriptions.
fn resolve(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .filter_map(|opt| {
            opt.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
        .next()
}

/// Discover every learn page on disk, as slug paths relative to the learn
/// root. The learn tree has no version fallback, so the filesystem is the
/// authority on which pages exist.
pub fn learn_slugs_from_fs(content_dir: &Path) -> Vec<Vec<String>> {
    let base = content_dir.join("learn");
    let mut out = Vec::new();
    if !base.is_dir() {
        return out;
    }
    for entry in WalkDir::new(&base)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        if entry.file_type().is_file() && entry.file_name() == "index.md" {
            let Some(parent) = entry.path().parent() else {
                continue;
            };
            let rel = parent
                .strip_prefix(&base)
                .unwrap_or(parent)
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            out.push(rel);
        }
    }
    out
}

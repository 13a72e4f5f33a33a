//! CLI output formatting for the site toolchain.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.
//!
//! ## Sidebar
//!
//! ```text
//! Introduction  (introduction)
//! Keywords  (keywords) *
//!     if  (keywords/if-keyword) *
//!     else  (keywords/else-keyword)
//! ```
//!
//! Active nodes — the viewed page and its ancestors — carry a trailing
//! `*`, matching what the web sidebar auto-expands.
//!
//! ## Resolve
//!
//! ```text
//! Found: keywords/if-keyword
//!     Source: v1.0.0 (inherited)
//!     Title: jodi
//!     Headings:
//!         h2  usage  Usage
//!     Prev: -
//!     Next: else (keywords/else-keyword)
//! ```

use crate::content::{ContentSource, LoadedContent, PageMeta};
use crate::releases::ReleaseIndex;
use crate::routes::DocPath;
use crate::sidebar::{PrevNext, SidebarNode};
use crate::locale::Locale;

// ============================================================================
// Sidebar tree
// ============================================================================

pub fn format_sidebar(nodes: &[SidebarNode]) -> Vec<String> {
    let mut lines = Vec::new();
    sidebar_lines(nodes, 0, &mut lines);
    if lines.is_empty() {
        lines.push("(empty sidebar)".to_string());
    }
    lines
}

fn sidebar_lines(nodes: &[SidebarNode], depth: usize, lines: &mut Vec<String>) {
    for node in nodes {
        let pad = "    ".repeat(depth);
        let marker = if node.active { " *" } else { "" };
        lines.push(format!("{pad}{}  ({}){marker}", node.label, node.href));
        sidebar_lines(&node.children, depth + 1, lines);
    }
}

pub fn print_sidebar(nodes: &[SidebarNode]) {
    for line in format_sidebar(nodes) {
        println!("{line}");
    }
}

// ============================================================================
// Resolve
// ============================================================================

pub fn format_resolve(
    path: &str,
    requested_version: Option<&str>,
    loaded: &LoadedContent,
    meta: &PageMeta,
    nav: &PrevNext,
) -> Vec<String> {
    let mut lines = Vec::new();
    match loaded {
        LoadedContent::NotFound => {
            lines.push(format!("Not found: {path}"));
            if let Some(version) = requested_version {
                lines.push(format!(
                    "    No content in {version} or any older version"
                ));
            }
            if !meta.title.is_empty() {
                lines.push(format!("    Title: {} (from route table)", meta.title));
            }
        }
        LoadedContent::Found(doc) => {
            lines.push(format!("Found: {path}"));
            let inherited = matches!(
                (&doc.source, requested_version),
                (ContentSource::Docs { version }, Some(requested)) if version != requested
            );
            let badge = if inherited { " (inherited)" } else { "" };
            lines.push(format!("    Source: {}{badge}", doc.source));
            lines.push(format!("    Title: {}", meta.title));
            if let Some(description) = &meta.description {
                lines.push(format!("    Description: {description}"));
            }
            if !doc.headings.is_empty() {
                lines.push("    Headings:".to_string());
                for h in &doc.headings {
                    lines.push(format!("        h{}  {}  {}", h.depth, h.id, h.text));
                }
            }
        }
    }
    let link = |l: &Option<crate::sidebar::NavLink>| match l {
        Some(l) => format!("{} ({})", l.label, l.href),
        None => "-".to_string(),
    };
    lines.push(format!("    Prev: {}", link(&nav.prev)));
    lines.push(format!("    Next: {}", link(&nav.next)));
    lines
}

pub fn print_resolve(
    path: &str,
    requested_version: Option<&str>,
    loaded: &LoadedContent,
    meta: &PageMeta,
    nav: &PrevNext,
) {
    for line in format_resolve(path, requested_version, loaded, meta, nav) {
        println!("{line}");
    }
}

// ============================================================================
// Check
// ============================================================================

/// Everything the `check` command discovered, assembled by the caller and
/// formatted here.
#[derive(Debug, Default)]
pub struct CheckReport {
    pub latest: String,
    pub versions: Vec<VersionSummary>,
    pub learn_routes: usize,
    pub learn_pages: usize,
    /// Routes that resolve to no content through the whole fallback chain.
    pub missing: Vec<MissingPage>,
}

#[derive(Debug)]
pub struct VersionSummary {
    pub version: String,
    pub routes: usize,
    pub deprecated: bool,
}

#[derive(Debug)]
pub struct MissingPage {
    pub version: String,
    pub path: String,
}

pub fn format_check(report: &CheckReport) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push("Versions".to_string());
    for v in &report.versions {
        let mut flags = Vec::new();
        if v.version == report.latest {
            flags.push("latest");
        }
        if v.deprecated {
            flags.push("deprecated");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!("  [{}]", flags.join(", "))
        };
        lines.push(format!("    {} ({} routes){flags}", v.version, v.routes));
    }
    lines.push(format!(
        "Learn ({} routes, {} pages on disk)",
        report.learn_routes, report.learn_pages
    ));
    if report.missing.is_empty() {
        lines.push("All routes resolve to content".to_string());
    } else {
        lines.push(format!("Missing content ({})", report.missing.len()));
        for m in &report.missing {
            lines.push(format!("    {}: {}", m.version, m.path));
        }
    }
    lines
}

pub fn print_check(report: &CheckReport) {
    for line in format_check(report) {
        println!("{line}");
    }
}

// ============================================================================
// Paths
// ============================================================================

/// Full URLs for every static page, prefixed with the configured base URL.
pub fn format_paths(
    base_url: &str,
    doc_paths: &[DocPath],
    learn_slugs: &[Vec<String>],
) -> Vec<String> {
    let base = base_url.trim_end_matches('/');
    let mut lines = Vec::new();
    for locale in Locale::ALL {
        for p in doc_paths {
            lines.push(format!(
                "{base}/{locale}/docs/{}/{}",
                p.version,
                p.slug.join("/")
            ));
        }
        for slug in learn_slugs {
            if slug.is_empty() {
                lines.push(format!("{base}/{locale}/learn"));
            } else {
                lines.push(format!("{base}/{locale}/learn/{}", slug.join("/")));
            }
        }
    }
    lines
}

pub fn print_paths(base_url: &str, doc_paths: &[DocPath], learn_slugs: &[Vec<String>]) {
    for line in format_paths(base_url, doc_paths, learn_slugs) {
        println!("{line}");
    }
}

// ============================================================================
// Releases
// ============================================================================

pub fn format_releases(index: &ReleaseIndex, locale: Locale) -> Vec<String> {
    let mut lines = Vec::new();
    for release in &index.releases {
        let mut header = format!("{} ({})", release.version, release.date);
        if let Some(status) = &release.status {
            header.push_str(&format!("  [{status}]"));
        }
        if release.version == index.latest {
            header.push_str("  [latest]");
        }
        lines.push(header);
        if let Some(note) = release.note(locale) {
            lines.push(format!("    {note}"));
        }
        for file in &release.files {
            let platform = file.platform.as_deref().unwrap_or("any");
            let arch = file.arch.as_deref().unwrap_or("-");
            let size = file.size_display();
            let size = if size.is_empty() { "?".to_string() } else { size };
            lines.push(format!(
                "    {}  {platform}/{arch}  {size}",
                file.name
            ));
            lines.push(format!(
                "        {}",
                index.download_url(&release.version, file)
            ));
        }
    }
    if lines.is_empty() {
        lines.push("(no releases)".to_string());
    }
    lines
}

pub fn print_releases(index: &ReleaseIndex, locale: Locale) {
    for line in format_releases(index, locale) {
        println!("{line}");
    }
}

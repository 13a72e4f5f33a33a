//! # BNLang Site
//!
//! The content backbone of the BNLang website: version-aware docs routing,
//! locale handling, and page resolution. Plain files under a site root are
//! the data source — JSON route tables and a version manifest describe the
//! navigation, markdown files with TOML front-matter carry the content,
//! and per-locale JSON dictionaries hold the UI strings.
//!
//! # Architecture: Resolution Pipeline
//!
//! Resolving one docs URL runs through four independent layers, each a pure
//! function over data loaded once at startup:
//!
//! ```text
//! 1. Locale    "bn-BD"            →  Locale::Bn         (alias table)
//! 2. Version   v1.1.0 + manifest  →  [v1.1.0, v1.0.0]   (fallback chain)
//! 3. Content   chain + slug       →  index.md + meta    (first hit wins)
//! 4. Sidebar   route forest       →  tree + prev/next   (per version)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Predictability**: every layer is deterministic over explicit inputs,
//!   so a broken page can be reproduced from the files alone.
//! - **Testability**: each layer is exercised in isolation against in-memory
//!   fixtures, with one integration test covering the full pipeline.
//! - **Stable URLs**: a page that existed in an old version keeps working in
//!   every newer version until it is explicitly replaced, because fallback
//!   is a property of the resolver, not of the content.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Optional `site.toml` loading, validation, stock defaults |
//! | [`versions`] | Version manifest (`versions.json`) and the fallback chain |
//! | [`routes`] | Route forests (`routes.json`), flattening, path lookup |
//! | [`locale`] | Closed locale set, alias normalization, UI-string translation |
//! | [`content`] | Page location through the fallback chain, front-matter, metadata |
//! | [`headings`] | On-this-page heading extraction from markdown, slug ids |
//! | [`sidebar`] | Sidebar tree construction, active-chain marking, prev/next |
//! | [`releases`] | Release manifest shapes for the download page |
//! | [`output`] | CLI output formatting — pure `format_*` + `print_*` pairs |
//!
//! # Design Decisions
//!
//! ## Version Fallback Over Content Duplication
//!
//! Docs content is written once, in the oldest version it applies to. A
//! request for a newer version walks the manifest's `order` backwards from
//! the requested version and serves the first file it finds
//! ([`versions::VersionManifest::fallback_chain`]). Releasing a new version
//! means adding one entry to `versions.json` — unchanged pages need no
//! copying, and a page is overridden by simply creating it in the new
//! version's directory.
//!
//! ## A Closed Locale Set
//!
//! The site ships exactly three locales — English, Bangla, and Banglish
//! (romanized Bangla) — so [`locale::Locale`] is an enum, not a string.
//! Browser-style aliases (`bn-BD`, `en-US`, `bn-Latn`) normalize into the
//! closed set and anything unknown degrades to English. Every match over a
//! locale is exhaustive; adding a fourth locale is a compile-guided change.
//!
//! ## TOML Front-Matter, `+++` Delimited
//!
//! Page metadata sits between `+++` fences at the top of each `index.md`
//! and parses as TOML into a plain table. Localized fields use suffixed
//! keys (`title`, `bnTitle`, `banglishTitle`) resolved per locale with a
//! documented precedence in [`content::localized_meta`].
//!
//! ## Everything Loaded Once, Passed by Reference
//!
//! There is no global state. The manifest, route tables, and translation
//! dictionaries are loaded once into plain structs and passed down by
//! reference. Loaders are fallible and explicit; lookups after that point
//! are infallible and cheap.

pub mod config;
pub mod content;
pub mod headings;
pub mod locale;
pub mod output;
pub mod releases;
pub mod routes;
pub mod sidebar;
pub mod versions;

#[cfg(test)]
pub(crate) mod test_helpers;

//! The static route tables for the docs and learn sections.
//!
//! Routes are hand-authored data, not derived from the content tree: the
//! table fixes ordering, nesting, and per-locale labels for the sidebar,
//! while the content store decides which pages concretely exist in which
//! version. The two are reconciled at request time by the content locator
//! and the sidebar's existing-page filter.
//!
//! ```text
//! contents/
//! ├── docs/
//! │   ├── versions.json        # see crate::versions
//! │   └── routes.json          # { "v1.0.0": [RouteNode, ...], ... }
//! └── learn/
//!     └── routes.json          # [RouteNode, ...]  (unversioned)
//! ```
//!
//! A node's full path is the slash-join of its ancestors' slugs plus its
//! own. Sibling slugs must be unique — [`RouteTable::validate`] rejects
//! duplicates, since a duplicate would make two nodes share a URL.
//!
//! Trees are walked iteratively with an explicit stack. [`RouteTable`]
//! builds a [`RouteIndex`] per forest at load time, so flat projections
//! are computed once and "does this path exist" is a hash lookup rather
//! than a tree descent.

use crate::locale::Locale;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RouteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate slug \"{slug}\" under \"{parent}\"")]
    DuplicateSlug { slug: String, parent: String },
}

/// One addressable content item in a documentation tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteNode {
    /// Path segment, unique among siblings.
    pub slug: String,
    /// Default (English) label.
    pub title: String,
    /// Bangla label; falls back to `title` when absent.
    #[serde(rename = "titleBn", default, skip_serializing_if = "Option::is_none")]
    pub title_bn: Option<String>,
    /// Banglish label; falls back to `title` when absent.
    #[serde(
        rename = "titleBanglish",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub title_banglish: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteNode>,
}

/// A route node denormalized to its full path.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRoute {
    /// Full slash-joined path, e.g. `keywords/if-keyword`.
    pub path: String,
    pub title: String,
    pub title_bn: Option<String>,
    pub title_banglish: Option<String>,
    /// Nesting depth; top-level nodes are depth 0.
    pub depth: usize,
}

impl FlatRoute {
    /// Localized sidebar label, falling back to the default title.
    pub fn label(&self, locale: Locale) -> &str {
        match locale {
            Locale::Bn => self.title_bn.as_deref().unwrap_or(&self.title),
            Locale::Banglish => self.title_banglish.as_deref().unwrap_or(&self.title),
            Locale::En => &self.title,
        }
    }
}

/// Pre-order flatten of a route forest, iterative over an explicit stack.
pub fn flatten(nodes: &[RouteNode]) -> Vec<FlatRoute> {
    let mut out = Vec::new();
    let mut stack: Vec<(&RouteNode, String, usize)> = Vec::new();
    for node in nodes.iter().rev() {
        stack.push((node, String::new(), 0));
    }
    while let Some((node, base, depth)) = stack.pop() {
        let path = if base.is_empty() {
            node.slug.clone()
        } else {
            format!("{base}/{}", node.slug)
        };
        out.push(FlatRoute {
            path: path.clone(),
            title: node.title.clone(),
            title_bn: node.title_bn.clone(),
            title_banglish: node.title_banglish.clone(),
            depth,
        });
        for child in node.children.iter().rev() {
            stack.push((child, path.clone(), depth + 1));
        }
    }
    out
}

/// Flat routes plus an O(1) path lookup, built once per forest.
#[derive(Debug, Default)]
pub struct RouteIndex {
    flat: Vec<FlatRoute>,
    by_path: HashMap<String, usize>,
}

impl RouteIndex {
    pub fn build(nodes: &[RouteNode]) -> Self {
        let flat = flatten(nodes);
        let by_path = flat
            .iter()
            .enumerate()
            .map(|(i, r)| (r.path.clone(), i))
            .collect();
        RouteIndex { flat, by_path }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.by_path.contains_key(path)
    }

    pub fn get(&self, path: &str) -> Option<&FlatRoute> {
        self.by_path.get(path).map(|&i| &self.flat[i])
    }

    /// All routes in sidebar (pre-)order.
    pub fn routes(&self) -> &[FlatRoute] {
        &self.flat
    }

}

/// One statically-addressable docs page: a version plus a slug path.
#[derive(Debug, Clone, PartialEq)]
pub struct DocPath {
    pub version: String,
    pub slug: Vec<String>,
}

/// The full route data for the site: per-version docs forests plus the
/// unversioned learn forest. Loaded once at startup, read-only after.
#[derive(Debug, Default)]
pub struct RouteTable {
    docs: BTreeMap<String, Vec<RouteNode>>,
    docs_index: BTreeMap<String, RouteIndex>,
    learn: Vec<RouteNode>,
    learn_index: RouteIndex,
}

impl RouteTable {
    /// Load `docs/routes.json` and `learn/routes.json` from the content
    /// directory. The docs table is required; a site without a learn
    /// section may omit the learn file.
    pub fn load(content_dir: &Path) -> Result<Self, RouteError> {
        let docs_path = content_dir.join("docs").join("routes.json");
        let docs: BTreeMap<String, Vec<RouteNode>> =
            serde_json::from_str(&fs::read_to_string(&docs_path)?)?;

        let learn_path = content_dir.join("learn").join("routes.json");
        let learn: Vec<RouteNode> = if learn_path.exists() {
            serde_json::from_str(&fs::read_to_string(&learn_path)?)?
        } else {
            Vec::new()
        };

        let table = RouteTable::from_parts(docs, learn);
        table.validate()?;
        Ok(table)
    }

    pub fn from_parts(docs: BTreeMap<String, Vec<RouteNode>>, learn: Vec<RouteNode>) -> Self {
        let docs_index = docs
            .iter()
            .map(|(version, nodes)| (version.clone(), RouteIndex::build(nodes)))
            .collect();
        let learn_index = RouteIndex::build(&learn);
        RouteTable {
            docs,
            docs_index,
            learn,
            learn_index,
        }
    }

    /// The docs forest for one version; empty for unknown versions.
    pub fn doc_routes(&self, version: &str) -> &[RouteNode] {
        self.docs.get(version).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn learn_routes(&self) -> &[RouteNode] {
        &self.learn
    }

    /// Pre-flattened docs routes for one version, from the index built at
    /// load; empty for unknown versions.
    pub fn doc_routes_flat(&self, version: &str) -> &[FlatRoute] {
        self.docs_index
            .get(version)
            .map(RouteIndex::routes)
            .unwrap_or(&[])
    }

    pub fn learn_routes_flat(&self) -> &[FlatRoute] {
        self.learn_index.routes()
    }

    /// The path index for one version's forest.
    pub fn doc_index(&self, version: &str) -> Option<&RouteIndex> {
        self.docs_index.get(version)
    }

    /// Reject duplicate sibling slugs anywhere in any forest.
    pub fn validate(&self) -> Result<(), RouteError> {
        for nodes in self.docs.values() {
            validate_forest(nodes)?;
        }
        validate_forest(&self.learn)
    }

    /// The static label for a docs path, independent of content
    /// front-matter. Used as the title fallback for missing pages.
    pub fn find_doc_title(&self, version: &str, slug: &[String]) -> Option<String> {
        self.docs_index
            .get(version)?
            .get(&slug.join("/"))
            .map(|r| r.title.clone())
    }

    pub fn find_learn_title(&self, slug: &[String]) -> Option<String> {
        self.learn_index
            .get(&slug.join("/"))
            .map(|r| r.title.clone())
    }

    /// Every (version, slug) pair over the union of slugs across all
    /// versions, in manifest order. Pages absent from a version still get
    /// a path — the locator serves them from an older version or renders
    /// the not-found state.
    pub fn all_doc_paths_union(&self, order: &[String]) -> Vec<DocPath> {
        let mut union: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        for version in order {
            for route in self.doc_routes_flat(version) {
                if seen.insert(route.path.clone()) {
                    union.push(route.path.clone());
                }
            }
        }
        let mut out = Vec::new();
        for version in order {
            for path in &union {
                out.push(DocPath {
                    version: version.clone(),
                    slug: path.split('/').map(String::from).collect(),
                });
            }
        }
        out
    }
}

fn validate_forest(nodes: &[RouteNode]) -> Result<(), RouteError> {
    // (siblings, parent path) pairs, walked iteratively
    let mut stack: Vec<(&[RouteNode], String)> = vec![(nodes, String::new())];
    while let Some((siblings, parent)) = stack.pop() {
        let mut seen: HashSet<&str> = HashSet::new();
        for node in siblings {
            if !seen.insert(&node.slug) {
                return Err(RouteError::DuplicateSlug {
                    slug: node.slug.clone(),
                    parent: if parent.is_empty() {
                        "<root>".to_string()
                    } else {
                        parent.clone()
                    },
                });
            }
            if !node.children.is_empty() {
                let path = if parent.is_empty() {
                    node.slug.clone()
                } else {
                    format!("{parent}/{}", node.slug)
                };
                stack.push((&node.children, path));
            }
        }
    }
    Ok(())
}

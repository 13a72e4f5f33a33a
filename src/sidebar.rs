//! Sidebar tree construction and prev/next navigation.
//!
//! The sidebar starts life as a flat, localized projection of the route
//! table ([`SidebarFlat`]) — one entry per route, denormalized for one
//! version, one locale, one currently-viewed path. [`build_tree`] folds
//! the flat list back into a nested tree by grouping on shared path
//! prefixes, then propagates the active flag upward so every ancestor of
//! the current page renders expanded.
//!
//! The tree is rebuilt fresh per request. The route set is small and
//! static, so this costs nothing and keeps the builder a pure function.
//!
//! [`prev_next`] computes linear reading-order navigation within one
//! nesting level: previous/next sibling only, no wrap-around, no crossing
//! into parent or child levels. An optional existing-page filter restricts
//! the sibling set to pages that concretely exist in the active version —
//! but never at the cost of hiding the current page's own neighbors.

use crate::locale::Locale;
use crate::routes::FlatRoute;
use std::collections::{HashMap, HashSet};

/// Denormalized sidebar entry: one route, localized, with the active flag
/// already computed against the currently-viewed path.
#[derive(Debug, Clone, PartialEq)]
pub struct SidebarFlat {
    /// Full slash-joined path from the section root.
    pub href: String,
    pub label: String,
    pub depth: usize,
    pub active: bool,
}

/// Nested sidebar node rebuilt from the flat projection.
#[derive(Debug, Clone, PartialEq)]
pub struct SidebarNode {
    pub href: String,
    pub label: String,
    pub active: bool,
    pub children: Vec<SidebarNode>,
}

/// Flat docs-sidebar projection: localized labels, and active on the
/// viewed path and every ancestor of it.
pub fn entries_for_docs(routes: &[FlatRoute], locale: Locale, active_path: &str) -> Vec<SidebarFlat> {
    routes
        .iter()
        .map(|r| SidebarFlat {
            href: r.path.clone(),
            label: r.label(locale).to_string(),
            depth: r.depth,
            active: r.path == active_path
                || (active_path.len() > r.path.len()
                    && active_path.starts_with(r.path.as_str())
                    && active_path.as_bytes()[r.path.len()] == b'/'),
        })
        .collect()
}

/// Flat learn-sidebar projection. The learn page marks only the exact
/// viewed path active; ancestors light up via tree propagation instead.
pub fn entries_for_learn(routes: &[FlatRoute], locale: Locale, active_path: &str) -> Vec<SidebarFlat> {
    routes
        .iter()
        .map(|r| SidebarFlat {
            href: r.path.clone(),
            label: r.label(locale).to_string(),
            depth: r.depth,
            active: r.path == active_path,
        })
        .collect()
}

struct Slot {
    href: String,
    label: String,
    active: bool,
    children: Vec<usize>,
}

/// Fold a flat entry list into a nested tree.
///
/// Entries are processed in input order. Each href's prefix paths are
/// created exactly once (memoized by full prefix string), so shared
/// ancestors keep first-seen order among siblings. A node created only as
/// an implicit ancestor gets a label derived from its path segment
/// (dashes/underscores to spaces) until an explicit entry for that path
/// overwrites it. The final segment of each entry overwrites the label
/// and ORs the active flag. Afterwards active propagates upward: any node
/// with an active descendant is itself active.
pub fn build_tree(flat: &[SidebarFlat]) -> Vec<SidebarNode> {
    let mut slots: Vec<Slot> = Vec::new();
    let mut roots: Vec<usize> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for item in flat {
        let parts: Vec<&str> = item.href.split('/').filter(|p| !p.is_empty()).collect();
        let mut path = String::new();
        let mut parent: Option<usize> = None;

        for (i, part) in parts.iter().enumerate() {
            if path.is_empty() {
                path.push_str(part);
            } else {
                path.push('/');
                path.push_str(part);
            }

            let idx = match index.get(&path) {
                Some(&idx) => idx,
                None => {
                    let idx = slots.len();
                    slots.push(Slot {
                        href: path.clone(),
                        label: part.replace(['-', '_'], " "),
                        active: false,
                        children: Vec::new(),
                    });
                    index.insert(path.clone(), idx);
                    match parent {
                        Some(p) => slots[p].children.push(idx),
                        None => roots.push(idx),
                    }
                    idx
                }
            };

            if i == parts.len() - 1 {
                slots[idx].label = item.label.clone();
                slots[idx].active = slots[idx].active || item.active;
            }
            parent = Some(idx);
        }
    }

    let mut slots: Vec<Option<Slot>> = slots.into_iter().map(Some).collect();
    let mut tree: Vec<SidebarNode> = roots.iter().map(|&r| assemble(r, &mut slots)).collect();
    propagate_active(&mut tree);
    tree
}

fn assemble(idx: usize, slots: &mut Vec<Option<Slot>>) -> SidebarNode {
    let slot = slots[idx].take().expect("slot consumed twice");
    let children = slot.children.iter().map(|&c| assemble(c, slots)).collect();
    SidebarNode {
        href: slot.href,
        label: slot.label,
        active: slot.active,
        children,
    }
}

/// Post-order pass: a node with an active descendant is itself active.
/// Monotonic (OR-only), so sibling order cannot affect the result.
fn propagate_active(nodes: &mut [SidebarNode]) -> bool {
    let mut any = false;
    for node in nodes {
        if propagate_active(&mut node.children) {
            node.active = true;
        }
        any = any || node.active;
    }
    any
}

/// Depth-first collection of every href in the tree. Round-trip property:
/// this yields exactly the distinct hrefs of the flat input.
pub fn collect_hrefs(nodes: &[SidebarNode]) -> Vec<String> {
    let mut out = Vec::new();
    let mut stack: Vec<&SidebarNode> = nodes.iter().rev().collect();
    while let Some(node) = stack.pop() {
        out.push(node.href.clone());
        for child in node.children.iter().rev() {
            stack.push(child);
        }
    }
    out
}

/// Locate the node for `target` plus its sibling list (the parent's
/// children, or the root list for top-level nodes).
pub fn find_with_siblings<'a>(
    nodes: &'a [SidebarNode],
    target: &str,
) -> Option<(&'a SidebarNode, &'a [SidebarNode])> {
    for node in nodes {
        if node.href == target {
            return Some((node, nodes));
        }
        if let Some(found) = find_with_siblings(&node.children, target) {
            return Some(found);
        }
    }
    None
}

/// A prev/next navigation target.
#[derive(Debug, Clone, PartialEq)]
pub struct NavLink {
    pub href: String,
    pub label: String,
}

impl NavLink {
    fn of(node: &SidebarNode) -> Self {
        NavLink {
            href: node.href.clone(),
            label: node.label.clone(),
        }
    }
}

/// Linear prev/next within the current page's sibling level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrevNext {
    pub prev: Option<NavLink>,
    pub next: Option<NavLink>,
}

/// Compute prev/next siblings for `current`.
///
/// `existing` optionally restricts siblings to pages that exist in the
/// active version. The filter is discarded when it would exclude the
/// current page itself or empty the list — filtering must never hide the
/// current page's own neighbors. Never wraps, never crosses levels.
pub fn prev_next(
    tree: &[SidebarNode],
    current: &str,
    existing: Option<&HashSet<String>>,
) -> PrevNext {
    let current = norm(current);
    let Some((node, siblings)) = find_with_siblings(tree, current) else {
        return PrevNext::default();
    };

    let all: Vec<&SidebarNode> = siblings.iter().collect();
    let filtered: Vec<&SidebarNode> = match existing {
        Some(set) => {
            let list: Vec<&SidebarNode> =
                all.iter().copied().filter(|s| set.contains(norm(&s.href))).collect();
            if list.is_empty() || !list.iter().any(|s| s.href == node.href) {
                all
            } else {
                list
            }
        }
        None => all,
    };

    let Some(idx) = filtered.iter().position(|s| s.href == node.href) else {
        return PrevNext::default();
    };
    PrevNext {
        prev: idx.checked_sub(1).map(|i| NavLink::of(filtered[i])),
        next: filtered.get(idx + 1).map(|s| NavLink::of(s)),
    }
}

/// Sidebar label for a slug-prefix path, used for breadcrumbs: the entry's
/// own label, or the last path segment when the prefix has no entry.
pub fn label_for_path<'a>(entries: &'a [SidebarFlat], path: &'a str) -> &'a str {
    entries
        .iter()
        .find(|e| e.href == path)
        .map(|e| e.label.as_str())
        .unwrap_or_else(|| path.rsplit('/').next().unwrap_or(path))
}

fn norm(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

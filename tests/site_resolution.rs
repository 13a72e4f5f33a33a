//! End-to-end resolution over a complete on-disk site fixture: config,
//! version manifest, route tables, locale dictionaries, and page content
//! all loaded from a temp directory the way the CLI loads them.

use bnlang_site::content::{self, ContentStore, FsContentStore, LoadedContent};
use bnlang_site::locale::{normalize, Locale, Translations};
use bnlang_site::routes::RouteTable;
use bnlang_site::sidebar;
use bnlang_site::versions::VersionManifest;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Fixture
// ============================================================================

fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

/// Three docs versions. `introduction` and `else-keyword` only exist in
/// v1.0.0 and are inherited by v1.1.0; `operators` is routed in v1.1.0 but
/// has no content anywhere; v0.9.0 is deprecated.
fn site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    write(
        root,
        "contents/docs/versions.json",
        r#"{
            "order": ["v1.1.0", "v1.0.0", "v0.9.0"],
            "latest": "v1.1.0",
            "deprecated": ["v0.9.0"]
        }"#,
    );

    write(
        root,
        "contents/docs/routes.json",
        r#"{
            "v1.1.0": [
                {"slug": "introduction", "title": "Introduction", "titleBn": "ভূমিকা"},
                {"slug": "keywords", "title": "Keywords", "children": [
                    {"slug": "if-keyword", "title": "if", "titleBn": "যদি"},
                    {"slug": "else-keyword", "title": "else"}
                ]},
                {"slug": "operators", "title": "Operators"}
            ],
            "v1.0.0": [
                {"slug": "introduction", "title": "Introduction"},
                {"slug": "keywords", "title": "Keywords", "children": [
                    {"slug": "if-keyword", "title": "if"},
                    {"slug": "else-keyword", "title": "else"}
                ]}
            ],
            "v0.9.0": [
                {"slug": "introduction", "title": "Introduction"}
            ]
        }"#,
    );

    write(
        root,
        "contents/learn/routes.json",
        r#"[
            {"slug": "get-started", "title": "Get Started"},
            {"slug": "variables", "title": "Variables", "titleBanglish": "Variable"}
        ]"#,
    );

    write(
        root,
        "contents/docs/v1.1.0/keywords/if-keyword/index.md",
        "+++\n\
         title = \"if\"\n\
         bnTitle = \"যদি\"\n\
         description = \"Branching with if\"\n\
         +++\n\
         \n\
         # if\n\
         \n\
         ## Usage\n\
         \n\
         <I18nBangla>\n\
         \n\
         ## ব্যবহার\n\
         \n\
         </I18nBangla>\n\
         \n\
         Condition first, block after.\n",
    );
    write(
        root,
        "contents/docs/v1.0.0/keywords/else-keyword/index.md",
        "+++\ntitle = \"else\"\n+++\n\n## Fallback branch\n",
    );
    write(
        root,
        "contents/docs/v1.0.0/keywords/index.md",
        "+++\ntitle = \"Keywords\"\n+++\n\nEvery BNLang keyword.\n",
    );
    write(
        root,
        "contents/docs/v1.0.0/introduction/index.md",
        "+++\n\
         title = \"Introduction\"\n\
         bnTitle = \"ভূমিকা\"\n\
         description = \"What BNLang is\"\n\
         bnDescription = \"BNLang কী\"\n\
         +++\n\
         \n\
         Welcome.\n",
    );
    write(
        root,
        "contents/learn/get-started/index.md",
        "+++\ntitle = \"Get Started\"\n+++\n\n## Install\n",
    );
    write(
        root,
        "contents/learn/variables/index.md",
        "No front-matter here, just prose.\n",
    );

    write(
        root,
        "locales/en/common.json",
        r#"{"siteName": "BNLang", "nav": {"docs": "Docs", "learn": "Learn"},
            "greeting": "Hello {name}!"}"#,
    );
    write(root, "locales/bn/common.json", r#"{"nav": {"docs": "ডকস"}}"#);
    write(
        root,
        "locales/banglish/common.json",
        r#"{"nav": {"learn": "Shikha"}}"#,
    );

    tmp
}

fn load(
    tmp: &TempDir,
) -> (
    VersionManifest,
    RouteTable,
    FsContentStore,
    Translations,
) {
    let content_dir = tmp.path().join("contents");
    let manifest =
        VersionManifest::load(&content_dir.join("docs").join("versions.json")).unwrap();
    let table = RouteTable::load(&content_dir).unwrap();
    let store = FsContentStore::new(&content_dir);
    let translations = Translations::load(&tmp.path().join("locales")).unwrap();
    (manifest, table, store, translations)
}

fn slug(path: &str) -> Vec<String> {
    path.split('/').map(String::from).collect()
}

// ============================================================================
// Content resolution through the fallback chain
// ============================================================================

#[test]
fn page_present_in_requested_version_is_served_from_it() {
    let tmp = site();
    let (manifest, _, store, _) = load(&tmp);
    let loaded = content::locate(
        &store,
        &manifest,
        Locale::En,
        &slug("keywords/if-keyword"),
        Some("v1.1.0"),
    )
    .unwrap();
    let doc = loaded.found().unwrap();
    assert_eq!(doc.source.to_string(), "v1.1.0");
    assert_eq!(doc.inherited_from("v1.1.0"), None);
    assert!(doc.body.contains("Condition first"));
}

#[test]
fn missing_page_is_inherited_from_an_older_version() {
    let tmp = site();
    let (manifest, _, store, _) = load(&tmp);
    let loaded = content::locate(
        &store,
        &manifest,
        Locale::En,
        &slug("keywords/else-keyword"),
        Some("v1.1.0"),
    )
    .unwrap();
    let doc = loaded.found().unwrap();
    assert_eq!(doc.source.to_string(), "v1.0.0");
    assert_eq!(doc.inherited_from("v1.1.0"), Some("v1.0.0"));
}

#[test]
fn page_absent_from_the_whole_chain_is_not_found() {
    let tmp = site();
    let (manifest, _, store, _) = load(&tmp);
    let loaded = content::locate(
        &store,
        &manifest,
        Locale::En,
        &slug("operators"),
        Some("v1.1.0"),
    )
    .unwrap();
    assert!(matches!(loaded, LoadedContent::NotFound));
}

#[test]
fn fallback_never_reaches_newer_versions() {
    let tmp = site();
    let (manifest, _, store, _) = load(&tmp);
    // if-keyword content lives only in v1.1.0; a v1.0.0 request must not
    // see it.
    let loaded = content::locate(
        &store,
        &manifest,
        Locale::En,
        &slug("keywords/if-keyword"),
        Some("v1.0.0"),
    )
    .unwrap();
    assert!(matches!(loaded, LoadedContent::NotFound));
}

#[test]
fn learn_pages_resolve_without_a_version() {
    let tmp = site();
    let (manifest, _, store, _) = load(&tmp);
    let loaded =
        content::locate(&store, &manifest, Locale::En, &slug("get-started"), None).unwrap();
    let doc = loaded.found().unwrap();
    assert_eq!(doc.source.to_string(), "learn");
    assert_eq!(doc.headings[0].id, "install");

    // A body without front-matter is still a valid page.
    let bare =
        content::locate(&store, &manifest, Locale::En, &slug("variables"), None).unwrap();
    let bare = bare.found().unwrap();
    assert!(bare.front_matter.is_empty());
    assert!(bare.body.starts_with("No front-matter"));
}

// ============================================================================
// Localized metadata and headings
// ============================================================================

#[test]
fn metadata_prefers_the_locale_field_and_falls_back() {
    let tmp = site();
    let (manifest, table, store, _) = load(&tmp);
    let loaded = content::locate(
        &store,
        &manifest,
        Locale::Bn,
        &slug("introduction"),
        Some("v1.1.0"),
    )
    .unwrap();
    let doc = loaded.found().unwrap();
    let fallback = table
        .find_doc_title("v1.1.0", &slug("introduction"))
        .unwrap();

    let bn = content::localized_meta(Locale::Bn, &doc.front_matter, &fallback);
    assert_eq!(bn.title, "ভূমিকা");
    assert_eq!(bn.description.as_deref(), Some("BNLang কী"));

    // No banglishTitle or bnLatnTitle in the front-matter: banglish ends
    // up on the plain title.
    let banglish = content::localized_meta(Locale::Banglish, &doc.front_matter, &fallback);
    assert_eq!(banglish.title, "Introduction");
    assert_eq!(banglish.description.as_deref(), Some("What BNLang is"));
}

#[test]
fn wrapped_headings_only_surface_for_their_locale() {
    let tmp = site();
    let (manifest, _, store, _) = load(&tmp);
    let for_locale = |locale| {
        let loaded = content::locate(
            &store,
            &manifest,
            locale,
            &slug("keywords/if-keyword"),
            Some("v1.1.0"),
        )
        .unwrap();
        loaded
            .found()
            .unwrap()
            .headings
            .iter()
            .map(|h| h.text.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(for_locale(Locale::En), ["Usage"]);
    assert_eq!(for_locale(Locale::Bn), ["Usage", "ব্যবহার"]);
}

// ============================================================================
// Sidebar and prev/next over the same fixture
// ============================================================================

#[test]
fn sidebar_tree_matches_the_route_forest() {
    let tmp = site();
    let (_, table, _, _) = load(&tmp);
    let entries = sidebar::entries_for_docs(
        table.doc_routes_flat("v1.1.0"),
        Locale::Bn,
        "keywords/if-keyword",
    );
    let tree = sidebar::build_tree(&entries);

    assert_eq!(tree.len(), 3);
    assert_eq!(tree[0].label, "ভূমিকা");
    assert!(tree[1].active, "ancestor of the viewed page");
    assert_eq!(tree[1].children[0].label, "যদি");
    assert!(tree[1].children[0].active);
    assert!(!tree[2].active);
}

#[test]
fn prev_next_skips_routes_without_content() {
    let tmp = site();
    let (manifest, table, store, _) = load(&tmp);
    let entries = sidebar::entries_for_docs(
        table.doc_routes_flat("v1.1.0"),
        Locale::En,
        "introduction",
    );
    let tree = sidebar::build_tree(&entries);

    let existing: HashSet<String> = entries
        .iter()
        .filter(|e| {
            let s = slug(&e.href);
            manifest.fallback_chain("v1.1.0").iter().any(|v| {
                store.exists(
                    &content::ContentSource::Docs {
                        version: v.clone(),
                    },
                    &s,
                )
            })
        })
        .map(|e| e.href.clone())
        .collect();
    assert!(!existing.contains("operators"));

    let nav = sidebar::prev_next(&tree, "introduction", Some(&existing));
    assert!(nav.prev.is_none());
    assert_eq!(nav.next.unwrap().href, "keywords");

    // Unfiltered, operators is a legitimate next sibling of keywords.
    let nav = sidebar::prev_next(&tree, "keywords", None);
    assert_eq!(nav.next.unwrap().href, "operators");
    // Filtered, the chapter ends at keywords.
    let nav = sidebar::prev_next(&tree, "keywords", Some(&existing));
    assert!(nav.next.is_none());
}

// ============================================================================
// Static paths and translations
// ============================================================================

#[test]
fn doc_path_union_covers_old_routes_in_every_version() {
    let tmp = site();
    let (manifest, table, _, _) = load(&tmp);
    let paths = table.all_doc_paths_union(&manifest.order);
    // 5 distinct routes across the three tables, times 3 versions.
    assert_eq!(paths.len(), 15);
    assert!(paths
        .iter()
        .any(|p| p.version == "v0.9.0" && p.slug == slug("keywords/if-keyword")));
}

#[test]
fn learn_slugs_come_from_the_filesystem() {
    let tmp = site();
    let slugs = content::learn_slugs_from_fs(&tmp.path().join("contents"));
    assert_eq!(slugs.len(), 2);
    assert!(slugs.contains(&slug("get-started")));
    assert!(slugs.contains(&slug("variables")));
}

#[test]
fn translations_alias_and_fall_back_across_locales() {
    let tmp = site();
    let (_, _, _, translations) = load(&tmp);

    let bn = translations.translator(Some("bn-BD"));
    assert_eq!(bn.locale(), Locale::Bn);
    assert_eq!(bn.translate("nav.docs"), "ডকস");
    // Missing in bn, present in en.
    assert_eq!(bn.translate("nav.learn"), "Learn");
    // Missing everywhere: the key itself.
    assert_eq!(bn.translate("nav.missing"), "nav.missing");

    let banglish = translations.for_locale(normalize(Some("bn-Latn")));
    assert_eq!(banglish.translate("nav.learn"), "Shikha");
    assert_eq!(
        banglish.translate_args("greeting", &[("name", "Rafi")]),
        "Hello Rafi!"
    );
}

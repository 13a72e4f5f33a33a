use bnlang_site::config::SiteConfig;
use bnlang_site::content::{self, FsContentStore};
use bnlang_site::locale::{normalize, Translations};
use bnlang_site::releases::ReleaseIndex;
use bnlang_site::routes::RouteTable;
use bnlang_site::sidebar;
use bnlang_site::versions::VersionManifest;
use bnlang_site::{content::ContentSource, output};
use clap::{Parser, Subcommand};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "bnlang-site")]
#[command(about = "Docs resolver and site toolchain for the BNLang website")]
#[command(long_about = "\
Docs resolver and site toolchain for the BNLang website

Routes, versions, and page content are plain files under the site root.
The toolchain validates them, resolves pages exactly the way the website
does (locale aliasing, version fallback, sidebar, prev/next), and lists
the static paths the site serves.

Site structure:

  site/
  ├── site.toml                    # Site config (optional)
  ├── locales/
  │   ├── en/common.json           # UI strings, one namespace per file
  │   ├── bn/...
  │   └── banglish/...
  └── contents/
      ├── docs/
      │   ├── versions.json        # {order, latest, deprecated?}
      │   ├── routes.json          # version → route forest
      │   └── v1.0.0/introduction/index.md
      └── learn/
          ├── routes.json          # unversioned route forest
          └── get-started/index.md

Page files carry optional +++‑delimited TOML front-matter (title,
bnTitle, banglishTitle, description, ...). A page missing from the
requested version is served from the newest older version that has it.")]
#[command(version = version_string())]
struct Cli {
    /// Site root directory
    #[arg(long, default_value = ".", global = true)]
    site: PathBuf,

    #[command(subcommand)]
    command: Command,
}

/// Shared flags for commands that resolve one section of the site.
#[derive(clap::Args, Clone)]
struct SectionArgs {
    /// Docs version (defaults to the manifest's latest)
    #[arg(long)]
    version: Option<String>,

    /// Locale or locale alias (en, bn-BD, banglish, ...)
    #[arg(long, default_value = "en")]
    locale: String,

    /// Address the unversioned learn tree instead of the docs tree
    #[arg(long)]
    learn: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Validate config, manifest, route tables, dictionaries, and content
    Check,
    /// Print the sidebar tree for one version and locale
    Sidebar {
        #[command(flatten)]
        section: SectionArgs,
        /// Currently-viewed path, marks the active chain
        #[arg(long)]
        active: Option<String>,
    },
    /// Resolve one page the way the website does
    Resolve {
        #[command(flatten)]
        section: SectionArgs,
        /// Slash-joined slug path, e.g. keywords/if-keyword
        path: String,
    },
    /// List every static (locale, version, slug) path the site serves
    Paths,
    /// Print a downloaded release manifest as a file table
    Releases {
        /// Path to the release manifest JSON
        file: PathBuf,
        #[arg(long, default_value = "en")]
        locale: String,
    },
}

/// Everything loaded once at startup and passed by reference below.
struct Site {
    config: SiteConfig,
    manifest: VersionManifest,
    table: RouteTable,
    store: FsContentStore,
    content_dir: PathBuf,
    locales_dir: PathBuf,
}

fn load_site(root: &Path) -> Result<Site, Box<dyn std::error::Error>> {
    let config = SiteConfig::load(root)?;
    let content_dir = config.content_path(root);
    // Without a valid version manifest no docs page can be served; this
    // is the one hard failure in the pipeline.
    let manifest = VersionManifest::load(&content_dir.join("docs").join("versions.json"))?;
    let table = RouteTable::load(&content_dir)?;
    let store = FsContentStore::new(&content_dir);
    let locales_dir = config.locales_path(root);
    Ok(Site {
        config,
        manifest,
        table,
        store,
        content_dir,
        locales_dir,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Check => {
            let site = load_site(&cli.site)?;
            Translations::load(&site.locales_dir)?;
            let report = run_check(&site);
            output::print_check(&report);
            if !report.missing.is_empty() {
                return Err(format!("{} route(s) resolve to no content", report.missing.len()).into());
            }
        }
        Command::Sidebar { section, active } => {
            let site = load_site(&cli.site)?;
            let locale = normalize(Some(&section.locale));
            let active = active.as_deref().unwrap_or("");
            let entries = if section.learn {
                sidebar::entries_for_learn(site.table.learn_routes_flat(), locale, active)
            } else {
                let version = section.version.as_deref().unwrap_or(site.manifest.latest.as_str());
                sidebar::entries_for_docs(site.table.doc_routes_flat(version), locale, active)
            };
            output::print_sidebar(&sidebar::build_tree(&entries));
        }
        Command::Resolve { section, path } => {
            let site = load_site(&cli.site)?;
            let locale = normalize(Some(&section.locale));
            let slug: Vec<String> = path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
            let active = slug.join("/");

            let (requested_version, fallback_title, entries) = if section.learn {
                let title = site.table.find_learn_title(&slug).unwrap_or_default();
                let entries =
                    sidebar::entries_for_learn(site.table.learn_routes_flat(), locale, &active);
                (None, title, entries)
            } else {
                let version = section
                    .version
                    .clone()
                    .unwrap_or_else(|| site.manifest.latest.clone());
                let title = site
                    .table
                    .find_doc_title(&version, &slug)
                    .unwrap_or_default();
                let entries =
                    sidebar::entries_for_docs(site.table.doc_routes_flat(&version), locale, &active);
                (Some(version), title, entries)
            };

            let loaded = content::locate(
                &site.store,
                &site.manifest,
                locale,
                &slug,
                requested_version.as_deref(),
            )?;
            let meta = match loaded.found() {
                Some(doc) => content::localized_meta(locale, &doc.front_matter, &fallback_title),
                None => content::localized_meta(locale, &toml::Table::new(), &fallback_title),
            };

            let tree = sidebar::build_tree(&entries);
            let existing = existing_pages(&site, &entries, requested_version.as_deref());
            let nav = sidebar::prev_next(&tree, &active, existing.as_ref());
            output::print_resolve(&active, requested_version.as_deref(), &loaded, &meta, &nav);
        }
        Command::Paths => {
            let site = load_site(&cli.site)?;
            let doc_paths = site.table.all_doc_paths_union(&site.manifest.order);
            let learn_slugs = content::learn_slugs_from_fs(&site.content_dir);
            output::print_paths(&site.config.base_url, &doc_paths, &learn_slugs);
        }
        Command::Releases { file, locale } => {
            let raw = std::fs::read_to_string(&file)?;
            let index = ReleaseIndex::from_json(&raw)?;
            output::print_releases(&index, normalize(Some(&locale)));
        }
    }

    Ok(())
}

/// Hrefs that resolve to concrete content for the requested version —
/// the prev/next filter the website applies.
fn existing_pages(
    site: &Site,
    entries: &[sidebar::SidebarFlat],
    requested_version: Option<&str>,
) -> Option<HashSet<String>> {
    let requested = requested_version?;
    let set = entries
        .iter()
        .filter(|e| {
            let slug: Vec<String> = e.href.split('/').map(String::from).collect();
            site.manifest.fallback_chain(requested).iter().any(|v| {
                use bnlang_site::content::ContentStore;
                site.store.exists(
                    &ContentSource::Docs {
                        version: v.clone(),
                    },
                    &slug,
                )
            })
        })
        .map(|e| e.href.clone())
        .collect();
    Some(set)
}

fn run_check(site: &Site) -> output::CheckReport {
    use bnlang_site::content::ContentStore;

    let mut versions = Vec::new();
    let mut missing = Vec::new();
    for version in &site.manifest.order {
        let routes = site.table.doc_routes_flat(version);
        for route in routes {
            let slug: Vec<String> = route.path.split('/').map(String::from).collect();
            let resolvable = site.manifest.fallback_chain(version).iter().any(|v| {
                site.store
                    .exists(&ContentSource::Docs { version: v.clone() }, &slug)
            });
            if !resolvable {
                missing.push(output::MissingPage {
                    version: version.clone(),
                    path: route.path.clone(),
                });
            }
        }
        versions.push(output::VersionSummary {
            version: version.clone(),
            routes: routes.len(),
            deprecated: site.manifest.is_deprecated(version),
        });
    }

    let learn_routes = site.table.learn_routes_flat();
    for route in learn_routes {
        let slug: Vec<String> = route.path.split('/').map(String::from).collect();
        if !site.store.exists(&ContentSource::Learn, &slug) {
            missing.push(output::MissingPage {
                version: "learn".to_string(),
                path: route.path.clone(),
            });
        }
    }

    output::CheckReport {
        latest: site.manifest.latest.clone(),
        versions,
        learn_routes: learn_routes.len(),
        learn_pages: content::learn_slugs_from_fs(&site.content_dir).len(),
        missing,
    }
}

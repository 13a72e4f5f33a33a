//! Locale normalization and UI-string translation.
//!
//! The site serves three locales: English (`en`), Bangla (`bn`), and
//! Banglish — Bangla written in Latin script (`banglish`). URLs and HTTP
//! clients supply looser identifiers (`en-US`, `bn-BD`, `bn-Latn`, …), so
//! every raw locale passes through [`normalize`] before any lookup.
//! Unrecognized input degrades to English rather than erroring — a wrong
//! locale in the URL should never 404 the page.
//!
//! ## Dictionaries
//!
//! UI strings live in JSON files, one namespace per file:
//!
//! ```text
//! locales/
//! ├── en/
//! │   ├── common.json
//! │   ├── header.json
//! │   └── home.json
//! ├── bn/
//! │   └── ...
//! └── banglish/
//!     └── ...
//! ```
//!
//! Lookup keys are dotted paths whose first segment selects the namespace:
//! `header.home` reads `home` from `header.json`; a key with no dot reads
//! from `common.json`. Missing keys fall back to the English dictionary,
//! and if English is missing too, the key itself is returned as a visible
//! placeholder. Missing-key warnings are logged in debug builds only.
//!
//! Strings may contain `{name}` tokens filled from caller-supplied
//! arguments; tokens with no matching argument stay literal.

use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslationsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON in {file}: {source}")]
    Json {
        file: String,
        source: serde_json::Error,
    },
}

/// The closed set of locales the site serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Bn,
    Banglish,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::En, Locale::Bn, Locale::Banglish];

    /// Canonical identifier as used in URLs and directory names.
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Bn => "bn",
            Locale::Banglish => "banglish",
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single place to expand/alias locales (e.g. `bn-BD` → `bn`).
///
/// Unrecognized or missing input maps to English. Never fails.
pub fn normalize(raw: Option<&str>) -> Locale {
    match raw.unwrap_or("") {
        "en" | "en-US" | "en-GB" => Locale::En,
        "bn" | "bn-BD" => Locale::Bn,
        "banglish" | "bn-Latn" => Locale::Banglish,
        _ => Locale::En,
    }
}

/// All UI-string dictionaries, loaded once at startup and passed by
/// reference wherever a label is needed.
#[derive(Debug, Default)]
pub struct Translations {
    /// locale → namespace → parsed JSON object
    dicts: HashMap<Locale, HashMap<String, Value>>,
}

impl Translations {
    /// Load every `<locale>/<namespace>.json` under `dir`.
    ///
    /// A locale directory may be absent (that locale then resolves
    /// everything through the English fallback); a malformed JSON file is
    /// an error.
    pub fn load(dir: &Path) -> Result<Self, TranslationsError> {
        let mut dicts = HashMap::new();
        for locale in Locale::ALL {
            let locale_dir = dir.join(locale.as_str());
            let mut namespaces = HashMap::new();
            if locale_dir.is_dir() {
                for entry in fs::read_dir(&locale_dir)? {
                    let path = entry?.path();
                    if path.extension().and_then(|e| e.to_str()) != Some("json") {
                        continue;
                    }
                    let Some(ns) = path.file_stem().and_then(|s| s.to_str()) else {
                        continue;
                    };
                    let raw = fs::read_to_string(&path)?;
                    let value: Value =
                        serde_json::from_str(&raw).map_err(|source| TranslationsError::Json {
                            file: path.display().to_string(),
                            source,
                        })?;
                    namespaces.insert(ns.to_string(), value);
                }
            }
            dicts.insert(locale, namespaces);
        }
        Ok(Translations { dicts })
    }

    /// Build translations directly from `(locale, namespace, dict)` triples.
    /// Used by tests and by embedded defaults.
    pub fn from_parts(parts: Vec<(Locale, &str, Value)>) -> Self {
        let mut dicts: HashMap<Locale, HashMap<String, Value>> = HashMap::new();
        for (locale, ns, value) in parts {
            dicts.entry(locale).or_default().insert(ns.to_string(), value);
        }
        Translations { dicts }
    }

    /// A [`Translator`] bound to one (normalized) locale.
    pub fn translator(&self, raw_locale: Option<&str>) -> Translator<'_> {
        Translator {
            locale: normalize(raw_locale),
            table: self,
        }
    }

    /// A [`Translator`] for an already-normalized locale.
    pub fn for_locale(&self, locale: Locale) -> Translator<'_> {
        Translator { locale, table: self }
    }

    fn lookup(&self, locale: Locale, ns: &str, inner: &str) -> Option<&Value> {
        self.dicts
            .get(&locale)
            .and_then(|namespaces| namespaces.get(ns))
            .and_then(|dict| get_path(dict, inner))
    }
}

/// Locale-bound view over [`Translations`].
pub struct Translator<'a> {
    locale: Locale,
    table: &'a Translations,
}

impl Translator<'_> {
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Resolve a dotted key to a display string.
    pub fn translate(&self, key: &str) -> String {
        self.translate_args(key, &[])
    }

    /// Resolve a dotted key, filling `{name}` tokens from `args`.
    pub fn translate_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        if key.is_empty() {
            return String::new();
        }
        let (ns, inner) = split_key(key);
        match self.resolve(ns, inner) {
            Some(Value::String(s)) => interpolate(s, args),
            // Non-string values get a readable hint instead of a panic
            Some(other) => other.to_string(),
            None => key.to_string(),
        }
    }

    /// Raw structured value (arrays/objects) without interpolation, under
    /// the same locale-fallback rule as [`translate`](Self::translate).
    pub fn raw(&self, key: &str) -> Option<&Value> {
        let (ns, inner) = split_key(key);
        self.resolve(ns, inner)
    }

    fn resolve(&self, ns: &str, inner: &str) -> Option<&Value> {
        if let Some(value) = self.table.lookup(self.locale, ns, inner) {
            return Some(value);
        }
        if cfg!(debug_assertions) {
            log::warn!(
                "missing translation \"{ns}.{inner}\" for locale \"{}\"",
                self.locale
            );
        }
        self.table.lookup(Locale::En, ns, inner)
    }
}

/// `"header.home"` → `("header", "home")`; a bare key reads from `common`.
fn split_key(key: &str) -> (&str, &str) {
    match key.find('.') {
        Some(i) => (&key[..i], &key[i + 1..]),
        None => ("common", key),
    }
}

/// Walk a dotted path through nested JSON objects.
fn get_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Substitute `{name}` tokens from `args`, leaving unknown tokens literal.
fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) if !after[..close].is_empty() && is_token(&after[..close]) => {
                let name = &after[..close];
                match args.iter().find(|(k, _)| *k == name) {
                    Some((_, v)) => out.push_str(v),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn is_token(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

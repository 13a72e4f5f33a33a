//! Table-of-contents extraction from markdown bodies.
//!
//! Collects headings of depth 2–4 (h2–h4) with GitHub-style slugged ids,
//! the same shape the "On this page" rail renders.
//!
//! ## Locale-conditional blocks
//!
//! Content files mix languages with wrapper tags that render only for one
//! locale:
//!
//! ```text
//! <I18nEnglish>
//! ## Installing
//! </I18nEnglish>
//! <I18nBangla>
//! ## ইনস্টল করা
//! </I18nBangla>
//! ```
//!
//! A heading inside a wrapper for a *different* locale must not appear in
//! that locale's table of contents; headings outside any wrapper always
//! appear. Wrappers can nest — the innermost enclosing wrapper is
//! authoritative. The pass tracks open wrappers as a stack while walking
//! the pulldown-cmark event stream, so no rendered tree is ever inspected.

use crate::locale::Locale;
use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use std::collections::HashMap;

/// One table-of-contents entry.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Heading {
    /// Anchor id, slugged from the text; duplicates get `-1`, `-2`, …
    pub id: String,
    pub text: String,
    /// Markdown heading level, 2–4.
    pub depth: u32,
}

const WRAPPERS: [(&str, Locale); 3] = [
    ("I18nEnglish", Locale::En),
    ("I18nBangla", Locale::Bn),
    ("I18nBanglish", Locale::Banglish),
];

/// Extract the depth-2..4 headings visible to `locale`.
pub fn extract(body: &str, locale: Locale) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut scopes: Vec<Locale> = Vec::new();
    let mut seen_ids: HashMap<String, u32> = HashMap::new();

    // (depth, accumulated text, scope at the opening tag) while inside a
    // heading, None otherwise
    let mut current: Option<(u32, String, Option<Locale>)> = None;

    for event in Parser::new(body) {
        match event {
            Event::Html(html) | Event::InlineHtml(html) => {
                scan_wrapper_tags(&html, &mut scopes);
            }
            Event::Start(Tag::Heading { level, .. }) => {
                current = Some((level as u32, String::new(), scopes.last().copied()));
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, buf, _)) = current.as_mut() {
                    buf.push_str(&text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                let Some((depth, text, scope)) = current.take() else {
                    continue;
                };
                if !(2..=4).contains(&depth) {
                    continue;
                }
                if scope.is_some_and(|s| s != locale) {
                    continue;
                }
                let text = text.trim().to_string();
                let id = unique_id(slugify(&text), &mut seen_ids);
                if !id.is_empty() && !text.is_empty() {
                    headings.push(Heading { id, text, depth });
                }
            }
            _ => {}
        }
    }
    headings
}

/// Push/pop locale scopes for every wrapper tag in an HTML chunk. A chunk
/// may carry several tags; they are processed in textual order.
fn scan_wrapper_tags(html: &str, scopes: &mut Vec<Locale>) {
    let mut rest = html;
    while let Some(open) = rest.find('<') {
        rest = &rest[open + 1..];
        let (closing, tag) = match rest.strip_prefix('/') {
            Some(after) => (true, after),
            None => (false, rest),
        };
        for (name, wrapper_locale) in WRAPPERS {
            let Some(after_name) = tag.strip_prefix(name) else {
                continue;
            };
            if !after_name.starts_with('>') {
                continue;
            }
            if closing {
                // Unbalanced closers are ignored rather than corrupting
                // the scope of unrelated wrappers.
                if scopes.last() == Some(&wrapper_locale) {
                    scopes.pop();
                }
            } else {
                scopes.push(wrapper_locale);
            }
            break;
        }
    }
}

/// GitHub-style anchor slug: lowercase, spaces become dashes, ASCII
/// punctuation other than `-`/`_` is dropped. Non-ASCII text is kept
/// whole — Bangla headings carry combining vowel signs that must survive
/// into the anchor.
fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_whitespace() {
            out.push('-');
        } else if c == '-' || c == '_' {
            out.push(c);
        } else if c.is_ascii() {
            if c.is_ascii_alphanumeric() {
                out.push(c.to_ascii_lowercase());
            }
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

fn unique_id(base: String, seen: &mut HashMap<String, u32>) -> String {
    let count = seen.entry(base.clone()).or_insert(0);
    let id = if *count == 0 {
        base.clone()
    } else {
        format!("{base}-{count}")
    };
    *count += 1;
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_depth_two_to_four() {
        let body = "# Title\n\n## Section\n\n### Sub\n\n#### Deep\n\n##### Too deep\n";
        let hs = extract(body, Locale::En);
        let depths: Vec<u32> = hs.iter().map(|h| h.depth).collect();
        assert_eq!(depths, [2, 3, 4]);
        assert_eq!(hs[0].text, "Section");
    }

    #[test]
    fn slugs_are_github_style() {
        let hs = extract("## Usage and Example\n\n## with_underscores\n", Locale::En);
        assert_eq!(hs[0].id, "usage-and-example");
        assert_eq!(hs[1].id, "with_underscores");
    }

    #[test]
    fn duplicate_texts_get_numbered_ids() {
        let hs = extract("## Setup\n\n## Setup\n\n## Setup\n", Locale::En);
        let ids: Vec<&str> = hs.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, ["setup", "setup-1", "setup-2"]);
    }

    #[test]
    fn bangla_heading_text_survives_slugging() {
        let hs = extract("## ইনস্টল করা\n", Locale::En);
        assert_eq!(hs[0].text, "ইনস্টল করা");
        assert_eq!(hs[0].id, "ইনস্টল-করা");
    }

    #[test]
    fn inline_code_in_heading_is_kept_as_text() {
        let hs = extract("## The `jodi` keyword\n", Locale::En);
        assert_eq!(hs[0].text, "The jodi keyword");
        assert_eq!(hs[0].id, "the-jodi-keyword");
    }

    #[test]
    fn heading_outside_any_wrapper_always_appears() {
        let body = "## Shared\n\n<I18nEnglish>\n\n## English only\n\n</I18nEnglish>\n";
        for locale in Locale::ALL {
            let hs = extract(body, locale);
            assert!(hs.iter().any(|h| h.text == "Shared"), "{locale}");
        }
    }

    #[test]
    fn wrapped_heading_hidden_from_other_locales() {
        let body = "\
<I18nEnglish>

## Installing

</I18nEnglish>

<I18nBangla>

## ইনস্টল করা

</I18nBangla>
";
        let en = extract(body, Locale::En);
        assert_eq!(en.len(), 1);
        assert_eq!(en[0].text, "Installing");

        let bn = extract(body, Locale::Bn);
        assert_eq!(bn.len(), 1);
        assert_eq!(bn[0].text, "ইনস্টল করা");

        assert!(extract(body, Locale::Banglish).is_empty());
    }

    #[test]
    fn innermost_wrapper_wins_when_nested() {
        let body = "\
<I18nEnglish>

## Outer english

<I18nBangla>

## Inner bangla

</I18nBangla>

## Outer english again

</I18nEnglish>
";
        let en = extract(body, Locale::En);
        let texts: Vec<&str> = en.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(texts, ["Outer english", "Outer english again"]);

        let bn = extract(body, Locale::Bn);
        assert_eq!(bn.len(), 1);
        assert_eq!(bn[0].text, "Inner bangla");
    }

    #[test]
    fn unbalanced_closer_is_ignored() {
        let body = "</I18nBangla>\n\n## Still here\n";
        let hs = extract(body, Locale::En);
        assert_eq!(hs.len(), 1);
    }

    #[test]
    fn unrelated_html_tags_do_not_open_scopes() {
        let body = "<div class=\"note\">\n\n## Inside a div\n\n</div>\n";
        let hs = extract(body, Locale::Bn);
        assert_eq!(hs.len(), 1);
        assert_eq!(hs[0].text, "Inside a div");
    }

    #[test]
    fn empty_heading_is_skipped() {
        let hs = extract("##   \n\n## Real\n", Locale::En);
        assert_eq!(hs.len(), 1);
        assert_eq!(hs[0].text, "Real");
    }
}

// src/analyzer/links.rs
// =============================================================================
// Link resolution and classification.
//
// Walks every anchor on the page in document order, resolves each href
// against the page's base URL, and classifies the result as internal
// (same host as the page) or external (anything else).
//
// Skip rules, applied before resolution:
// - anchors without an href attribute
// - empty hrefs
// - fragment-only hrefs ("#section")
// Skipped anchors appear in no count and are never probed. An href that
// fails to resolve is logged and skipped the same way - a single bad link
// never aborts the analysis.
// =============================================================================

use scraper::{Html, Selector};
use url::Url;

// What the classification pass produces: the two counts plus the resolved
// absolute URLs that go on to the liveness checker
#[derive(Debug, Default)]
pub struct ClassifiedLinks {
    pub internal_count: usize,
    pub external_count: usize,
    pub candidates: Vec<Url>,
}

// Classifies every hyperlink on the page
//
// Parameters:
//   doc: the parsed document
//   base: the page's own URL, used to resolve relative hrefs
//
// Counting happens synchronously in document order, so the counts are
// deterministic for a given page. Each candidate lands in `candidates`
// exactly once, in the same order.
pub fn classify_links(doc: &Html, base: &Url) -> ClassifiedLinks {
    let mut links = ClassifiedLinks::default();
    let selector = Selector::parse("a").unwrap();

    for anchor in doc.select(&selector) {
        let href = match anchor.value().attr("href") {
            Some(href) if !href.is_empty() && !href.starts_with('#') => href,
            _ => continue,
        };

        let resolved = match resolve_href(base, href) {
            Some(url) => url,
            None => {
                log::warn!("skipping unresolvable href '{}'", href);
                continue;
            }
        };

        // Same host as the page -> internal; anything else -> external.
        // Hostless targets (mailto:, tel:) have no host_str and therefore
        // classify as external.
        if resolved.host_str() == base.host_str() {
            links.internal_count += 1;
        } else {
            links.external_count += 1;
        }

        links.candidates.push(resolved);
    }

    links
}

// Resolves a possibly-relative href to an absolute URL
//
// Examples, with base = "https://example.com/page":
//   "/docs"              -> Some("https://example.com/docs")
//   "https://other.com"  -> Some("https://other.com/")
//   "http://[bad"        -> None
fn resolve_href(base: &Url, href: &str) -> Option<Url> {
    // If the href is already absolute this parse succeeds; otherwise it is
    // a relative reference and we join it onto the base
    match Url::parse(href) {
        Ok(url) => Some(url),
        Err(_) => base.join(href).ok(),
    }
}

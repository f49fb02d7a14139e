// src/analyzer/structure.rs
// =============================================================================
// Structural extraction from the parsed document.
//
// Three independent lookups over the same tree:
// - count_headings: how many h1..h6 elements the page has, per level
// - extract_title: the text of the first <title> element
// - detect_login_form: is there a form with a password input?
//
// All of these are pure functions over the parsed document; the orchestrator
// parses once and hands the tree to each of them.
// =============================================================================

use scraper::{Html, Selector};
use std::collections::BTreeMap;

// Counts heading elements per level
//
// Returns a map with exactly six entries, "h1" through "h6". Levels that
// don't occur on the page are present with count 0. BTreeMap keeps the keys
// in level order, which also makes the JSON output deterministic.
pub fn count_headings(doc: &Html) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();

    for level in 1..=6 {
        let tag = format!("h{}", level);
        // The selector is a constant tag name and known to be valid
        let selector = Selector::parse(&tag).unwrap();
        counts.insert(tag, doc.select(&selector).count());
    }

    counts
}

// Extracts the text of the first <title> element in document order
//
// Returns an empty string if the page has no title. The text is
// whitespace-trimmed, since titles routinely carry layout newlines.
pub fn extract_title(doc: &Html) -> String {
    let selector = Selector::parse("title").unwrap();

    doc.select(&selector)
        .next()
        .map(|title| title.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

// Detects a credential-entry form
//
// True iff at least one <form> contains a nested password input. A password
// input floating outside any form does not count. `any` short-circuits on
// the first matching form.
pub fn detect_login_form(doc: &Html) -> bool {
    let form_selector = Selector::parse("form").unwrap();
    let password_selector = Selector::parse(r#"input[type="password"]"#).unwrap();

    doc.select(&form_selector)
        .any(|form| form.select(&password_selector).next().is_some())
}

// src/analyzer/version.rs
// =============================================================================
// Markup version detection.
//
// Works on the raw response text, not the parsed tree: html5ever rewrites the
// doctype node, so the only reliable place to read the original declaration
// is the body as the server sent it. Pure function, no I/O, never fails.
// =============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;

// The document types we recognize, plus a catch-all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkupVersion {
    #[serde(rename = "HTML5")]
    Html5,
    #[serde(rename = "XHTML 1.0 Strict")]
    Xhtml10Strict,
    #[serde(rename = "XHTML 1.0 Transitional")]
    Xhtml10Transitional,
    #[serde(rename = "XHTML 1.1")]
    Xhtml11,
    #[serde(rename = "HTML 4.01 Strict")]
    Html401Strict,
    #[serde(rename = "HTML 4.01 Transitional")]
    Html401Transitional,
    #[serde(rename = "HTML 4.01 Frameset")]
    Html401Frameset,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl fmt::Display for MarkupVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MarkupVersion::Html5 => "HTML5",
            MarkupVersion::Xhtml10Strict => "XHTML 1.0 Strict",
            MarkupVersion::Xhtml10Transitional => "XHTML 1.0 Transitional",
            MarkupVersion::Xhtml11 => "XHTML 1.1",
            MarkupVersion::Html401Strict => "HTML 4.01 Strict",
            MarkupVersion::Html401Transitional => "HTML 4.01 Transitional",
            MarkupVersion::Html401Frameset => "HTML 4.01 Frameset",
            MarkupVersion::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

// Ordered rule table; the first matching needle wins.
//
// The bare "html 4.01" rule must stay below the Transitional and Frameset
// rules, because their declarations contain it as a substring.
const VERSION_RULES: &[(&str, MarkupVersion)] = &[
    ("<!doctype html>", MarkupVersion::Html5),
    ("xhtml 1.0 strict", MarkupVersion::Xhtml10Strict),
    ("xhtml 1.0 transitional", MarkupVersion::Xhtml10Transitional),
    ("xhtml 1.1", MarkupVersion::Xhtml11),
    ("html 4.01 transitional", MarkupVersion::Html401Transitional),
    ("html 4.01 frameset", MarkupVersion::Html401Frameset),
    ("html 4.01", MarkupVersion::Html401Strict),
];

// Detects the markup version by case-insensitive substring search
// over the raw page text
//
// Example:
//   "<!DOCTYPE html><html>..." -> MarkupVersion::Html5
//   "<p>no doctype</p>"        -> MarkupVersion::Unknown
pub fn detect_version(raw: &str) -> MarkupVersion {
    let lowered = raw.to_lowercase();

    for (needle, version) in VERSION_RULES {
        if lowered.contains(needle) {
            return *version;
        }
    }

    MarkupVersion::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_html5() {
        assert_eq!(
            detect_version("<!DOCTYPE html><html></html>"),
            MarkupVersion::Html5
        );
    }

    #[test]
    fn test_detect_html5_case_insensitive() {
        assert_eq!(
            detect_version("  \n<!DoCtYpE hTmL>\n<html></html>"),
            MarkupVersion::Html5
        );
    }

    #[test]
    fn test_detect_xhtml_transitional() {
        let raw = r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN"
            "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">"#;
        assert_eq!(detect_version(raw), MarkupVersion::Xhtml10Transitional);
    }

    #[test]
    fn test_detect_html401_strict_after_transitional() {
        // The Transitional declaration contains "html 4.01" as a substring,
        // so rule order decides this case
        let transitional = r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN">"#;
        assert_eq!(
            detect_version(transitional),
            MarkupVersion::Html401Transitional
        );

        let strict = r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01//EN">"#;
        assert_eq!(detect_version(strict), MarkupVersion::Html401Strict);
    }

    #[test]
    fn test_missing_doctype_is_unknown() {
        assert_eq!(detect_version("<html><body></body></html>"), MarkupVersion::Unknown);
        assert_eq!(detect_version(""), MarkupVersion::Unknown);
    }

    #[test]
    fn test_xhtml_doctype_is_not_html5() {
        // XHTML declarations start with "<!DOCTYPE html " (note the space),
        // which must not trigger the "<!doctype html>" rule
        let raw = r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.1//EN">"#;
        assert_eq!(detect_version(raw), MarkupVersion::Xhtml11);
    }
}

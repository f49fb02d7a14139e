// src/analyzer/page.rs
// =============================================================================
// The page analyzer orchestrator.
//
// What happens here, in order:
// 1. Parse the input URL (it doubles as the base for resolving hrefs)
// 2. Fetch the page with a single GET and read the full body
// 3. Parse the body once into a tree
// 4. Run the extractors over the tree (and the raw text, for the doctype)
// 5. Probe every classified link concurrently and wait for all of them
// 6. Assemble one immutable AnalysisResult
//
// Nothing is shared between invocations: the HTTP client, the parsed tree
// and the result are all built fresh per call and owned by the caller after
// return.
// =============================================================================

use reqwest::{redirect, Client};
use scraper::Html;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

use super::links::classify_links;
use super::probe::probe_links;
use super::structure::{count_headings, detect_login_form, extract_title};
use super::version::{detect_version, MarkupVersion};
use crate::config::AnalyzerConfig;
use crate::error::AnalyzeError;

// Everything we extract from one page, produced atomically after all link
// probes have completed
//
// Field names serialize in camelCase, matching the wire format the
// surrounding system stores and displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Detected document type, or Unknown
    pub markup_version: MarkupVersion,
    /// Text of the first <title> element, empty if the page has none
    pub page_title: String,
    /// Heading counts keyed "h1" through "h6"; all six keys always present
    pub heading_counts: BTreeMap<String, usize>,
    /// Links whose host equals the page's host
    pub internal_link_count: usize,
    /// Links pointing at any other host
    pub external_link_count: usize,
    /// Probed links that did not answer with a status below 400
    pub inaccessible_link_count: usize,
    /// Whether the page carries a form with a password input
    pub has_login_form: bool,
}

// Analyzes a single web page
//
// Parameters:
//   page_url: the page to analyze, as given by the caller
//   config: read-only settings shared with every probe task
//
// Errors:
//   InvalidUrl - the input cannot be parsed as an absolute URL
//   Fetch      - the GET failed or returned a non-2xx status
//   Parse      - the response body could not be read as text
//
// Link-level failures never surface here; they end up in the counts.
pub async fn analyze(
    page_url: &str,
    config: &AnalyzerConfig,
) -> Result<AnalysisResult, AnalyzeError> {
    let base = Url::parse(page_url).map_err(|e| AnalyzeError::InvalidUrl {
        url: page_url.to_string(),
        source: e,
    })?;

    // One client for the page fetch and every probe: the connection pool
    // and the settings ride along with each cheap clone.
    // Redirect handling is pinned explicitly rather than left to the
    // transport default: up to 5 hops, terminal status decides.
    let client = Client::builder()
        .user_agent(&config.user_agent)
        .timeout(config.probe_timeout)
        .redirect(redirect::Policy::limited(5))
        .build()
        .map_err(|e| AnalyzeError::Fetch {
            url: page_url.to_string(),
            source: e,
        })?;

    let body = fetch_page(&client, &base).await?;

    // scraper::Html is not Send, so every tree query happens inside this
    // block and the tree is dropped before the probe await below. That
    // keeps the analyze() future spawnable.
    let (markup_version, page_title, heading_counts, has_login_form, links) = {
        let document = Html::parse_document(&body);
        (
            detect_version(&body),
            extract_title(&document),
            count_headings(&document),
            detect_login_form(&document),
            classify_links(&document, &base),
        )
    };

    log::info!(
        "{}: {} internal / {} external links, probing {} candidate(s)",
        page_url,
        links.internal_count,
        links.external_count,
        links.candidates.len()
    );

    let inaccessible_link_count =
        probe_links(&client, links.candidates, config.max_concurrent_probes).await;

    Ok(AnalysisResult {
        markup_version,
        page_title,
        heading_counts,
        internal_link_count: links.internal_count,
        external_link_count: links.external_count,
        inaccessible_link_count,
        has_login_form,
    })
}

// Fetches the page and returns the full body text
//
// The body is read in full before parsing so the version detector can see
// the raw text without a second fetch.
async fn fetch_page(client: &Client, url: &Url) -> Result<String, AnalyzeError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|e| AnalyzeError::Fetch {
            url: url.to_string(),
            source: e,
        })?;

    response.text().await.map_err(|e| AnalyzeError::Parse {
        url: url.to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    // A minimal HTTP fixture server on a loopback port.
    //
    // Routes:
    //   "/"         -> 200 with the given page HTML
    //   "/missing"  -> 404
    //   "/broken"   -> 500
    //   anything else -> 200 with an empty body
    //
    // HEAD requests are counted so tests can assert how many probes were
    // actually issued.
    struct TestSite {
        base: String,
        head_requests: Arc<AtomicUsize>,
    }

    async fn serve(page_html: String) -> TestSite {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let head_requests = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&head_requests);

        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    break;
                };
                let page = page_html.clone();
                let counter = Arc::clone(&counter);

                tokio::spawn(async move {
                    let mut buf = vec![0u8; 4096];
                    let n = stream.read(&mut buf).await.unwrap_or(0);
                    let request = String::from_utf8_lossy(&buf[..n]).into_owned();

                    let mut parts = request.split_whitespace();
                    let method = parts.next().unwrap_or("");
                    let path = parts.next().unwrap_or("/");

                    if method == "HEAD" {
                        counter.fetch_add(1, Ordering::SeqCst);
                    }

                    let (status, body) = match path {
                        "/" => ("200 OK", page.as_str()),
                        "/missing" => ("404 Not Found", ""),
                        "/broken" => ("500 Internal Server Error", ""),
                        _ => ("200 OK", ""),
                    };
                    let body = if method == "HEAD" { "" } else { body };

                    let response = format!(
                        "HTTP/1.1 {status}\r\nContent-Type: text/html\r\nContent-Length: {len}\r\nConnection: close\r\n\r\n{body}",
                        len = body.len(),
                    );
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        TestSite {
            base: format!("http://{addr}"),
            head_requests,
        }
    }

    fn test_config() -> AnalyzerConfig {
        AnalyzerConfig {
            probe_timeout: Duration::from_secs(5),
            ..AnalyzerConfig::default()
        }
    }

    const FIXTURE_PAGE: &str = r##"<!DOCTYPE html>
<html>
<head><title> Demo Page </title></head>
<body>
<h1>One</h1>
<h2>Two</h2>
<h2>Three</h2>
<form action="/login">
  <input type="text" name="user">
  <input type="password" name="pass">
</form>
<a href="/ok">fine</a>
<a href="/missing">gone</a>
<a href="#top">anchor only</a>
<a href="">empty</a>
<a href="http://unreachable.invalid/x">offsite</a>
</body>
</html>"##;

    #[tokio::test]
    async fn test_analyze_full_page() {
        let site = serve(FIXTURE_PAGE.to_string()).await;
        let result = analyze(&site.base, &test_config()).await.unwrap();

        assert_eq!(result.markup_version, MarkupVersion::Html5);
        assert_eq!(result.page_title, "Demo Page");
        assert_eq!(result.heading_counts["h1"], 1);
        assert_eq!(result.heading_counts["h2"], 2);
        assert_eq!(result.heading_counts["h3"], 0);
        assert!(result.has_login_form);

        // "/ok" and "/missing" are internal; the .invalid host is external;
        // the fragment and empty anchors count nowhere
        assert_eq!(result.internal_link_count, 2);
        assert_eq!(result.external_link_count, 1);

        // "/missing" answers 404 and the .invalid host never resolves
        assert_eq!(result.inaccessible_link_count, 2);

        // One probe per candidate, no duplicates
        assert_eq!(site.head_requests.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_analyze_is_idempotent_for_static_page() {
        let site = serve(FIXTURE_PAGE.to_string()).await;
        let config = test_config();

        let first = analyze(&site.base, &config).await.unwrap();
        let second = analyze(&site.base, &config).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_analyze_many_links_probes_each_exactly_once() {
        let anchors: String = (0..50)
            .map(|i| format!(r#"<a href="/link-{i}">link {i}</a>"#))
            .collect();
        let page = format!("<!DOCTYPE html><html><body>{anchors}</body></html>");

        let site = serve(page).await;
        let result = analyze(&site.base, &test_config()).await.unwrap();

        assert_eq!(result.internal_link_count, 50);
        assert_eq!(result.external_link_count, 0);
        assert_eq!(result.inaccessible_link_count, 0);
        assert_eq!(site.head_requests.load(Ordering::SeqCst), 50);
    }

    #[tokio::test]
    async fn test_analyze_page_without_links_or_title() {
        let site = serve("<p>bare</p>".to_string()).await;
        let result = analyze(&site.base, &test_config()).await.unwrap();

        assert_eq!(result.markup_version, MarkupVersion::Unknown);
        assert_eq!(result.page_title, "");
        assert_eq!(result.internal_link_count, 0);
        assert_eq!(result.external_link_count, 0);
        assert_eq!(result.inaccessible_link_count, 0);
        assert!(!result.has_login_form);
        assert_eq!(site.head_requests.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_analyze_rejects_malformed_url() {
        let err = analyze("not a url at all", &test_config()).await.unwrap_err();
        assert!(matches!(err, AnalyzeError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_analyze_non_2xx_page_is_fetch_error() {
        let site = serve(String::new()).await;
        let err = analyze(&format!("{}/broken", site.base), &test_config())
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyzeError::Fetch { .. }));
    }

    #[tokio::test]
    async fn test_analyze_unreachable_host_is_fetch_error() {
        // Port 9 (discard) is not listening on loopback
        let err = analyze("http://127.0.0.1:9/", &test_config())
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyzeError::Fetch { .. }));
    }

    #[test]
    fn test_result_serializes_with_camel_case_fields() {
        let result = AnalysisResult {
            markup_version: MarkupVersion::Html5,
            page_title: "t".to_string(),
            heading_counts: BTreeMap::new(),
            internal_link_count: 1,
            external_link_count: 2,
            inaccessible_link_count: 0,
            has_login_form: false,
        };
        let json = serde_json::to_string(&result).unwrap();

        assert!(json.contains(r#""markupVersion":"HTML5""#));
        assert!(json.contains(r#""internalLinkCount":1"#));
        assert!(json.contains(r#""hasLoginForm":false"#));
    }
}

//! URL fetching and visible-text extraction.
//!
//! Fetches a page with a browser-like `User-Agent` (some sites refuse the
//! default reqwest one), follows redirects, and reduces the HTML to the text
//! a reader would actually see: script, style and noscript subtrees are
//! skipped, whitespace is trimmed per line, and blank lines are dropped.

use std::time::Duration;

use ego_tree::NodeRef;
use scraper::{Html, Node};

use crate::error::FetchError;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const TOTAL_TIMEOUT: Duration = Duration::from_secs(10);

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Build the shared fetch client with production timeouts.
pub fn build_client() -> reqwest::Client {
    build_client_with_timeouts(CONNECT_TIMEOUT, TOTAL_TIMEOUT)
}

/// Client construction with explicit timeouts, used by tests to avoid
/// waiting out the production values.
pub fn build_client_with_timeouts(connect: Duration, total: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(connect)
        .timeout(total)
        .user_agent(BROWSER_USER_AGENT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Fetch a URL and return its visible text.
///
/// Error statuses (>= 400), timeouts, connection failures and pages with no
/// visible text all map to distinct [`FetchError`] kinds.
pub async fn fetch_page_text(client: &reqwest::Client, url: &str) -> Result<String, FetchError> {
    let response = client.get(url).send().await.map_err(classify)?;

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        return Err(FetchError::Status {
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(classify)?;
    let text = visible_text(&body);
    if text.is_empty() {
        return Err(FetchError::EmptyDocument);
    }
    Ok(text)
}

fn classify(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Request(err)
    }
}

/// Reduce an HTML document to its visible text.
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut out = String::new();

    for node in document.root_element().descendants() {
        if let Node::Text(text) = node.value() {
            if in_hidden_subtree(&node) {
                continue;
            }
            out.push_str(text);
            out.push('\n');
        }
    }

    out.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn in_hidden_subtree(node: &NodeRef<'_, Node>) -> bool {
    node.ancestors().any(|ancestor| {
        matches!(
            ancestor.value(),
            Node::Element(el) if matches!(el.name(), "script" | "style" | "noscript")
        )
    })
}

// src/checker/http.rs
// =============================================================================
// This module checks if external URLs are alive by making HTTP requests.
//
// It is only used in strict mode. Key functionality:
// - Makes one HTTP HEAD request per link (lightweight, no body download)
// - Status >= 400 means the link is broken
// - Network failures (timeout, DNS, TLS, ...) mean "could not verify"
// - Runs probes concurrently with a bounded number in flight, then puts the
//   results back in the order they were submitted
// =============================================================================

use std::time::Duration;

use futures::stream::{self, StreamExt}; // StreamExt gives us .buffer_unordered()
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::link::{LinkKind, ValidationResult};
use crate::error::ValidateError;

/// Probes External links over HTTP.
///
/// The client is built once and cloned into each probe; clones share the
/// connection pool.
#[derive(Debug, Clone)]
pub struct ExternalChecker {
    client: Client,
    concurrency: usize,
}

impl ExternalChecker {
    pub fn new(timeout: Duration, concurrency: usize) -> Result<Self, ValidateError> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5)) // Follow up to 5 redirects
            .user_agent(concat!("doc-link-guardian/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            concurrency: concurrency.max(1),
        })
    }

    /// Probes every URL, at most `concurrency` at a time.
    ///
    /// Results come back in the same order as `urls`, whatever order the
    /// probes finished in.
    pub async fn check_all(&self, urls: Vec<String>) -> Vec<ValidationResult> {
        let futures = urls.into_iter().enumerate().map(move |(index, url)| async move {
            let result = self.check(&url).await;
            (index, result)
        });

        // .buffer_unordered(N) returns results as they complete, so we
        // remember each index and sort afterwards
        let mut results: Vec<(usize, ValidationResult)> = stream::iter(futures)
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        results.sort_by_key(|(index, _)| *index);
        results.into_iter().map(|(_, result)| result).collect()
    }

    /// Makes exactly one HEAD request for `url`. No retries.
    pub async fn check(&self, url: &str) -> ValidationResult {
        if let Err(e) = Url::parse(url) {
            return ValidationResult::check_failed(LinkKind::External, format!("Invalid URL: {e}"));
        }

        let result = match self.client.head(url).send().await {
            Ok(response) => analyze_status(response.status().as_u16()),
            Err(e) => categorize_error(&e),
        };

        debug!(url, status = ?result.status, detail = ?result.detail, "external link probed");
        result
    }
}

// Decides what an HTTP status code means for a link
//
// Redirects have already been followed by the client, so anything below 400
// counts as reachable.
fn analyze_status(code: u16) -> ValidationResult {
    if code >= 400 {
        ValidationResult::broken(LinkKind::External, format!("HTTP {code}"))
    } else {
        ValidationResult::ok(LinkKind::External)
    }
}

// Turns a transport failure into a short, human-readable cause
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure
// - SSL certificate issues
// - Too many redirects
fn categorize_error(error: &reqwest::Error) -> ValidationResult {
    let message = if error.is_timeout() {
        "Request timed out".to_string()
    } else if error.is_redirect() {
        "Too many redirects".to_string()
    } else if error.is_connect() {
        // Connection errors often mean DNS issues, TLS failures or host unreachable
        let causes = source_chain(error);
        if mentions_tls(&causes) {
            "SSL certificate error".to_string()
        } else if causes.contains("dns") || causes.contains("resolve") {
            "Could not resolve hostname".to_string()
        } else {
            "Connection failed".to_string()
        }
    } else if mentions_tls(&source_chain(error)) {
        "SSL certificate error".to_string()
    } else {
        format!("External link check failed: {error}")
    };

    ValidationResult::check_failed(LinkKind::External, message)
}

// Lowercased text of the errors underneath `error`
//
// The top-level message is left out: it contains the request URL, and a
// URL like /tls-setup says nothing about why the request failed.
fn source_chain(error: &reqwest::Error) -> String {
    let mut causes = Vec::new();
    let mut source = std::error::Error::source(error);
    while let Some(inner) = source {
        causes.push(inner.to_string().to_lowercase());
        source = inner.source();
    }
    causes.join(": ")
}

fn mentions_tls(causes: &str) -> bool {
    causes.contains("certificate") || causes.contains("ssl") || causes.contains("tls")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::LinkStatus;

    #[test]
    fn test_status_codes() {
        assert!(analyze_status(200).is_ok());
        assert!(analyze_status(204).is_ok());
        assert!(analyze_status(304).is_ok());

        let not_found = analyze_status(404);
        assert_eq!(not_found.status, LinkStatus::Broken);
        assert_eq!(not_found.detail.as_deref(), Some("HTTP 404"));

        assert_eq!(analyze_status(500).detail.as_deref(), Some("HTTP 500"));
    }

    #[tokio::test]
    async fn test_invalid_url_is_check_failed() {
        let checker = ExternalChecker::new(Duration::from_secs(1), 1).unwrap();
        let result = checker.check("https://").await;
        assert_eq!(result.status, LinkStatus::CheckFailed);
        assert!(result.detail.unwrap().starts_with("Invalid URL"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_check_failed() {
        // Bind then drop a listener so the port is (almost certainly) closed
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let checker = ExternalChecker::new(Duration::from_secs(2), 1).unwrap();

        let result = checker.check(&format!("http://127.0.0.1:{port}/")).await;
        assert_eq!(result.status, LinkStatus::CheckFailed);
        assert_eq!(result.kind, LinkKind::External);
        assert!(result.detail.is_some());
    }

    #[tokio::test]
    async fn test_url_text_does_not_change_the_cause() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let checker = ExternalChecker::new(Duration::from_secs(2), 1).unwrap();

        for path in ["guide", "tls-setup", "ssl-certificate", "resolve", "dns"] {
            let result = checker.check(&format!("http://127.0.0.1:{port}/{path}")).await;
            assert_eq!(result.status, LinkStatus::CheckFailed);
            assert_eq!(
                result.detail.as_deref(),
                Some("Connection failed"),
                "wrong cause for /{path}"
            );
        }
    }
}

//! Library search and documentation bundle fetching.
//!
//! A query goes through two sequential requests: `GET <base>/search?query=`
//! resolves a library name to an identifier such as `/vercel/next.js`, then
//! `GET <base>/<id>?topic=` returns the raw bundle text, which is handed to
//! [`docfetch_bundle::parse_documentation_response`]. There is no retry; any
//! failure is returned to the caller as a [`DocFetchError`].

mod tool;

use docfetch_shared::{DocFetchError, DocumentationResult, FetchOptions, Result};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

pub use tool::FetchLibraryDocsTool;

/// Maximum number of redirects to follow.
const MAX_REDIRECTS: usize = 3;

/// Error bodies are cut to this many characters before landing in messages.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// User-Agent string for upstream requests.
const USER_AGENT: &str = concat!("docfetch/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Search types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

/// One match from the library search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Library identifier, e.g. `/vercel/next.js`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Any other fields the upstream sends along.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ---------------------------------------------------------------------------
// DocsClient
// ---------------------------------------------------------------------------

/// HTTP client for the search and documentation endpoints.
#[derive(Debug, Clone)]
pub struct DocsClient {
    client: Client,
    opts: FetchOptions,
}

impl DocsClient {
    /// Build a client with the configured timeout and redirect policy.
    pub fn new(opts: &FetchOptions) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(std::time::Duration::from_secs(opts.timeout_secs))
            .build()
            .map_err(|e| DocFetchError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            opts: opts.clone(),
        })
    }

    /// Search the upstream index for libraries matching `query`.
    #[instrument(skip_all, fields(query = %query))]
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let url = format!("{}/search", self.opts.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("query", query)])
            .send()
            .await
            .map_err(|e| DocFetchError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DocFetchError::Upstream {
                url,
                status: status.as_u16(),
                body: error_body(response).await,
            });
        }

        let parsed: SearchResponse = response.json().await.map_err(|e| {
            DocFetchError::validation(format!("{url}: malformed search response: {e}"))
        })?;

        debug!(results = parsed.results.len(), "library search complete");
        Ok(parsed.results)
    }

    /// Resolve a library name to the identifier of the top search result.
    pub async fn resolve_library_id(&self, query: &str) -> Result<String> {
        let results = self.search(query).await?;

        let Some(top) = results.first() else {
            return Err(DocFetchError::NoResults {
                query: query.to_string(),
            });
        };

        match top.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => Ok(id.to_string()),
            _ => Err(DocFetchError::MissingIdentifier {
                result: serde_json::to_string_pretty(top).unwrap_or_else(|_| format!("{top:?}")),
            }),
        }
    }

    /// Fetch the raw documentation bundle for a library and topic.
    #[instrument(skip_all, fields(library_id = %library_id, topic = %topic))]
    pub async fn fetch_bundle(&self, library_id: &str, topic: &str) -> Result<String> {
        let url = format!(
            "{}/{}",
            self.opts.base_url,
            library_id.trim_start_matches('/')
        );

        let response = self
            .client
            .get(&url)
            .query(&[("topic", topic)])
            .send()
            .await
            .map_err(|e| DocFetchError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DocFetchError::Fetch {
                library_id: library_id.to_string(),
                topic: topic.to_string(),
                status: status.as_u16(),
                body: error_body(response).await,
            });
        }

        let max = self.opts.max_response_bytes;
        if let Some(len) = response.content_length() {
            if len > max {
                return Err(DocFetchError::validation(format!(
                    "{url}: response too large ({len} bytes, max {max})"
                )));
            }
        }

        let body = response
            .text()
            .await
            .map_err(|e| DocFetchError::Network(format!("{url}: failed to read body: {e}")))?;

        // Chunked responses carry no content-length.
        if body.len() as u64 > max {
            return Err(DocFetchError::validation(format!(
                "{url}: response too large ({} bytes, max {max})",
                body.len()
            )));
        }

        debug!(bytes = body.len(), "documentation bundle fetched");
        Ok(body)
    }

    /// Resolve `query`, fetch its bundle for `topic`, and parse it.
    #[instrument(skip_all, fields(query = %query, topic = %topic))]
    pub async fn fetch_library_docs(
        &self,
        query: &str,
        topic: &str,
    ) -> Result<DocumentationResult> {
        let library_id = self.resolve_library_id(query).await?;
        info!(%library_id, "resolved library");

        let body = self.fetch_bundle(&library_id, topic).await?;
        let result = docfetch_bundle::parse_documentation_response(&body);

        info!(
            %library_id,
            snippets = result.snippets.len(),
            qa = result.qa.len(),
            "documentation fetched and parsed"
        );

        Ok(result)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Read an error response body, cut to a loggable length.
async fn error_body(response: Response) -> String {
    match response.text().await {
        Ok(body) => truncate_error_body(body),
        Err(e) => {
            debug!(error = %e, "failed to read error response body");
            String::new()
        }
    }
}

fn truncate_error_body(body: String) -> String {
    if body.chars().count() > MAX_ERROR_BODY_CHARS {
        let cut: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
        format!("{cut}...")
    } else {
        body
    }
}

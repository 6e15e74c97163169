//! Tool descriptor exposing [`DocsClient::fetch_library_docs`] to an agent.
//!
//! The agent framework registers the tool from [`FetchLibraryDocsTool::definition`]
//! and calls [`FetchLibraryDocsTool::respond`] with the model's JSON arguments.
//! Failures come back as plain messages so the agent can fall back to its own
//! knowledge instead of aborting its loop.

use docfetch_shared::{DocFetchError, DocumentationResult, Result};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::DocsClient;

/// Arguments the model supplies when calling the tool.
#[derive(Debug, Deserialize)]
struct FetchArgs {
    query: String,
    topic: String,
}

/// The `fetch_library_docs` tool.
#[derive(Debug, Clone)]
pub struct FetchLibraryDocsTool {
    client: DocsClient,
}

impl FetchLibraryDocsTool {
    pub const NAME: &'static str = "fetch_library_docs";

    pub fn new(client: DocsClient) -> Self {
        Self { client }
    }

    pub fn name(&self) -> &str {
        Self::NAME
    }

    pub fn description(&self) -> &str {
        "Fetches documentation for a specific code library, framework, or API. \
         Returns code snippets (title, description, source, language, code) and \
         question/answer pairs (topic, question, answer, source)."
    }

    pub fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The name of the library, framework, or API to fetch documentation for."
                },
                "topic": {
                    "type": "string",
                    "description": "The specific topic within the library or framework to fetch documentation for."
                }
            },
            "required": ["query", "topic"]
        })
    }

    /// Function-calling definition in the shape chat-completion APIs expect.
    pub fn definition(&self) -> Value {
        json!({
            "type": "function",
            "function": {
                "name": self.name(),
                "description": self.description(),
                "parameters": self.parameters_schema(),
            }
        })
    }

    /// Validate the arguments and run the fetch.
    pub async fn call(&self, args: &Value) -> Result<DocumentationResult> {
        let args: FetchArgs = serde_json::from_value(args.clone()).map_err(|e| {
            DocFetchError::validation(format!("invalid {} arguments: {e}", Self::NAME))
        })?;

        let query = args.query.trim();
        if query.is_empty() {
            return Err(DocFetchError::validation("query must not be empty"));
        }
        let topic = args.topic.trim();
        if topic.is_empty() {
            return Err(DocFetchError::validation("topic must not be empty"));
        }

        self.client.fetch_library_docs(query, topic).await
    }

    /// What the agent sees: the result as JSON, or the error message.
    pub async fn respond(&self, args: &Value) -> String {
        let err = match self.call(args).await {
            Ok(result) => match serde_json::to_string(&result) {
                Ok(json) => return json,
                Err(e) => DocFetchError::validation(format!("failed to encode result: {e}")),
            },
            Err(e) => e,
        };

        if err.is_not_found() {
            debug!(error = %err, "no documentation available");
        } else {
            warn!(error = %err, "documentation fetch failed");
        }
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docfetch_shared::FetchOptions;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn tool_for(server: &MockServer) -> FetchLibraryDocsTool {
        let opts = FetchOptions::default()
            .with_base_url(&server.uri())
            .expect("mock server URL");
        FetchLibraryDocsTool::new(DocsClient::new(&opts).expect("build client"))
    }

    #[tokio::test]
    async fn definition_names_required_params() {
        let server = MockServer::start().await;
        let def = tool_for(&server).definition();

        assert_eq!(def["function"]["name"], "fetch_library_docs");
        assert_eq!(
            def["function"]["parameters"]["required"],
            json!(["query", "topic"])
        );
    }

    #[tokio::test]
    async fn respond_returns_result_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "results": [{ "id": "/vercel/next.js" }] })),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/vercel/next.js"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "====================\nCODE SNIPPETS\n====================\n\
                 TITLE: Example\nDESCRIPTION: Demo\n\nSOURCE: https://docs\nLANGUAGE: python\n\
                 CODE:\n```\nprint('ok')\n```\n",
            ))
            .mount(&server)
            .await;

        let out = tool_for(&server)
            .respond(&json!({ "query": "next.js", "topic": "routing" }))
            .await;

        let parsed: DocumentationResult = serde_json::from_str(&out).expect("result JSON");
        assert_eq!(parsed.snippets.len(), 1);
        assert_eq!(parsed.snippets[0].code, "print('ok')");
    }

    #[tokio::test]
    async fn respond_reports_no_results_as_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
            .mount(&server)
            .await;

        let out = tool_for(&server)
            .respond(&json!({ "query": "missing-lib", "topic": "anything" }))
            .await;
        assert!(out.contains("No documentation found"));
    }

    #[tokio::test]
    async fn respond_reports_fetch_error_as_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "results": [{ "id": "/org/pkg" }] })),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/org/pkg"))
            .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
            .mount(&server)
            .await;

        let out = tool_for(&server)
            .respond(&json!({ "query": "org-pkg", "topic": "intro" }))
            .await;
        assert!(out.contains("Error fetching documentation"));
        assert!(out.contains("500 - oops"));
    }

    #[tokio::test]
    async fn call_rejects_bad_arguments() {
        let server = MockServer::start().await;
        let tool = tool_for(&server);

        let err = tool.call(&json!({ "query": "react" })).await.unwrap_err();
        assert!(matches!(err, DocFetchError::Validation { .. }));

        let err = tool
            .call(&json!({ "query": "  ", "topic": "hooks" }))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("query must not be empty"));

        let err = tool
            .call(&json!({ "query": "react", "topic": " " }))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("topic must not be empty"));
    }
}

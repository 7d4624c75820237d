//! HTTP client for the `/query` endpoint

use reqwest::{Client, Method, header};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::QUERY_ENDPOINT;
use crate::core::payload::{QueryEnvelope, QueryRequest};

/// Any non-success outcome of a query request.
///
/// The form renders all of these the same way, through [`RequestFailure::response_text`].
#[derive(Debug, Error)]
pub enum RequestFailure {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Server returned error: {status} - {body}")]
    Status { status: u16, body: String },
    #[error("Malformed response body: {source}")]
    MalformedBody {
        body: String,
        #[source]
        source: serde_json::Error,
    },
}

impl RequestFailure {
    /// Raw response body, or an empty string when no response arrived.
    pub fn response_text(&self) -> &str {
        match self {
            RequestFailure::Transport(_) => "",
            RequestFailure::Status { body, .. } | RequestFailure::MalformedBody { body, .. } => {
                body
            }
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            RequestFailure::Transport(e) => e.status().map(|s| s.as_u16()),
            RequestFailure::Status { status, .. } => Some(*status),
            RequestFailure::MalformedBody { .. } => None,
        }
    }
}

/// Sends a query string and yields the decoded answer envelope.
///
/// The controller awaits the request on its own task, so the returned future
/// is not required to be `Send`.
#[allow(async_fn_in_trait)]
pub trait QueryTransport {
    async fn post_query(&self, query: &str) -> Result<QueryEnvelope, RequestFailure>;
}

#[derive(Clone)]
pub struct QueryClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl QueryClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.map(String::from),
        }
    }

    /// Get the base URL for this client
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a JSON body and decode a JSON reply. Non-2xx replies keep their raw body.
    pub async fn request<T, R>(
        &self,
        method: Method,
        url: &str,
        data: Option<&T>,
    ) -> Result<R, RequestFailure>
    where
        T: Serialize + Sync,
        R: for<'de> Deserialize<'de>,
    {
        let mut request = self
            .client
            .request(method, url)
            .header(header::ACCEPT, "application/json");

        if let Some(api_key) = &self.api_key {
            request = request.header("x-api-key", api_key);
        }

        if let Some(data) = data {
            request = request.json(data);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(RequestFailure::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body)
            .map_err(|source| RequestFailure::MalformedBody { body, source })
    }

    /// Helper to resolve URL (full URL or relative endpoint)
    fn resolve_url(&self, url_or_endpoint: &str) -> String {
        if url_or_endpoint.starts_with("http://") || url_or_endpoint.starts_with("https://") {
            url_or_endpoint.to_string()
        } else {
            let base = self.base_url.trim_end_matches('/');
            let endpoint = url_or_endpoint.trim_start_matches('/');
            format!("{base}/{endpoint}")
        }
    }

    pub async fn post<T, R>(&self, url_or_endpoint: &str, data: &T) -> Result<R, RequestFailure>
    where
        T: Serialize + Sync,
        R: for<'de> Deserialize<'de>,
    {
        let url = self.resolve_url(url_or_endpoint);
        self.request(Method::POST, &url, Some(data)).await
    }
}

impl QueryTransport for QueryClient {
    async fn post_query(&self, query: &str) -> Result<QueryEnvelope, RequestFailure> {
        self.post(QUERY_ENDPOINT, &QueryRequest::new(query)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url_relative_endpoint() {
        let client = QueryClient::new("http://localhost:8888", None);

        assert_eq!(client.resolve_url("query"), "http://localhost:8888/query");
        assert_eq!(client.resolve_url("/query"), "http://localhost:8888/query");
    }

    #[test]
    fn test_resolve_url_base_url_with_trailing_slash() {
        let client = QueryClient::new("http://localhost:9000/", None);

        assert_eq!(client.resolve_url("/query"), "http://localhost:9000/query");
    }

    #[test]
    fn test_resolve_url_full_url() {
        let client = QueryClient::new("http://localhost:8888", Some("key"));

        let result = client.resolve_url("https://answers.example.org/query");
        assert_eq!(result, "https://answers.example.org/query");
    }

    #[test]
    fn test_status_failure_response_text_is_raw_body() {
        let failure = RequestFailure::Status {
            status: 500,
            body: "Internal error".to_string(),
        };

        assert_eq!(failure.response_text(), "Internal error");
        assert_eq!(failure.status(), Some(500));
    }

    #[test]
    fn test_malformed_body_response_text_is_raw_body() {
        let source = serde_json::from_str::<QueryEnvelope>("not json").unwrap_err();
        let failure = RequestFailure::MalformedBody {
            body: "not json".to_string(),
            source,
        };

        assert_eq!(failure.response_text(), "not json");
        assert_eq!(failure.status(), None);
    }

    #[tokio::test]
    async fn test_transport_failure_has_empty_response_text() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = QueryClient::new(format!("http://{addr}"), None);
        let failure = client.post_query("anything").await.unwrap_err();

        assert!(matches!(failure, RequestFailure::Transport(_)));
        assert_eq!(failure.response_text(), "");
    }
}

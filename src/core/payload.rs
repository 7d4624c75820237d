//! Wire types exchanged between the query form, the proxy and the answer engine

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /query`: `{"q": "<query>"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub q: String,
}

impl QueryRequest {
    pub fn new(q: impl Into<String>) -> Self {
        Self { q: q.into() }
    }
}

/// Fields rendered into the page after a successful query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponsePayload {
    pub plain: String,
    pub query: String,
    pub params: Value,
    pub tree: String,
    pub sparql_query: String,
}

impl ResponsePayload {
    /// Compact JSON text of `params`, key order preserved.
    pub fn params_text(&self) -> String {
        // Serializing a `Value` cannot fail.
        serde_json::to_string(&self.params).unwrap_or_default()
    }
}

/// Top-level response of `POST /query`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryEnvelope {
    pub data: ResponsePayload,
}

/// Raw answer produced by the upstream answer engine.
///
/// Every field is optional: the engine returns an empty object when it
/// could not make sense of the question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineAnswer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tree: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sparql_query: Option<String>,
}

impl EngineAnswer {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Wrap the parse tree and the SPARQL text in `<pre>` blocks so the page
    /// keeps their whitespace.
    pub fn into_display(mut self) -> Self {
        self.tree = self.tree.map(wrap_pre);
        self.sparql_query = self.sparql_query.map(wrap_pre);
        self
    }

    /// Fill in absent fields so the form always receives all five.
    pub fn into_payload(self) -> ResponsePayload {
        ResponsePayload {
            plain: self.plain.unwrap_or_default(),
            query: self.query.unwrap_or_default(),
            params: self.params.unwrap_or(Value::Null),
            tree: self.tree.unwrap_or_default(),
            sparql_query: self.sparql_query.unwrap_or_default(),
        }
    }
}

fn wrap_pre(text: String) -> String {
    if text.is_empty() {
        text
    } else {
        format!("<pre>{text}</pre>")
    }
}

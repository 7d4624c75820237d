//! HTTP handlers for the query proxy

use axum::{
    Router,
    body::Bytes,
    extract::State,
    response::Json,
    routing::post,
};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::{
    AppState, QUERY_ENDPOINT,
    core::payload::{EngineAnswer, QueryRequest},
    web::errors::ApiError,
};

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route(QUERY_ENDPOINT, post(query_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

#[axum_macros::debug_handler]
pub async fn query_handler(
    State(app_state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let request = parse_query_request(&body)?;
    info!("Query: {}", request.q);

    let answer = match app_state
        .engine_client
        .post::<_, EngineAnswer>(QUERY_ENDPOINT, &request)
        .await
    {
        Ok(answer) => answer,
        Err(e) => {
            warn!(
                "Error querying answer engine at {}: {e}",
                app_state.engine_client.base_url()
            );
            return Err(e.into());
        }
    };

    if answer.is_empty() {
        return Ok(Json(json!({ "data": {} })));
    }

    Ok(Json(json!({ "data": answer.into_display().into_payload() })))
}

/// Accepts `{"q": ...}`. A non-string `q` is taken as its JSON text.
fn parse_query_request(body: &[u8]) -> Result<QueryRequest, ApiError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| {
        warn!("Unparsable request body: {}", String::from_utf8_lossy(body));
        ApiError::InvalidJson
    })?;

    match value.get("q") {
        Some(Value::String(q)) => Ok(QueryRequest::new(q.as_str())),
        Some(Value::Null) | None => Err(ApiError::MissingQuery),
        Some(other) => Ok(QueryRequest::new(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query_client::QueryClient;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    fn unreachable_engine_state() -> AppState {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        AppState {
            engine_client: QueryClient::new(format!("http://{addr}"), None),
        }
    }

    fn post_query(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/query")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_parse_query_request_string() {
        let request = parse_query_request(br#"{"q": "Who is Obama?"}"#).unwrap();
        assert_eq!(request.q, "Who is Obama?");
    }

    #[test]
    fn test_parse_query_request_non_string() {
        let request = parse_query_request(br#"{"q": 42}"#).unwrap();
        assert_eq!(request.q, "42");
    }

    #[test]
    fn test_parse_query_request_missing_q() {
        let result = parse_query_request(br#"{"query": "x"}"#);
        assert!(matches!(result, Err(ApiError::MissingQuery)));
    }

    #[tokio::test]
    async fn test_invalid_json_is_bad_request() {
        let app = router(unreachable_engine_state());

        let response = app.oneshot(post_query("{not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Unable to parse JSON.");
    }

    #[tokio::test]
    async fn test_unreachable_engine_is_internal_error() {
        let app = router(unreachable_engine_state());

        let response = app
            .oneshot(post_query(r#"{"q": "How many rivers are in Asia?"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Cannot connect to answer engine");
    }

    #[tokio::test]
    async fn test_get_is_not_allowed() {
        let app = router(unreachable_engine_state());

        let response = app
            .oneshot(Request::builder().uri("/query").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}

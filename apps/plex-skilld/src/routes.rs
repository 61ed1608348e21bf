//! HTTP surface for the voice platform

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use plex_skill::{handle_request, Dispatcher, SkillError, SkillRequest};
use time::OffsetDateTime;
use tracing::{debug, warn};

pub fn router(dispatcher: Dispatcher) -> Router {
    Router::new()
        .route("/", post(skill))
        .route("/healthz", get(healthz))
        .with_state(dispatcher)
}

async fn healthz(State(dispatcher): State<Dispatcher>) -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok", "backend": dispatcher.backend() }))
}

async fn skill(State(dispatcher): State<Dispatcher>, body: Bytes) -> Response {
    let request = match SkillRequest::from_slice(&body) {
        Ok(request) => request,
        Err(e) => return bad_request(e),
    };
    if let Some(age) = request.age_seconds(OffsetDateTime::now_utc()) {
        debug!(
            request_id = request.request.request_id.as_deref().unwrap_or("-"),
            age_s = age,
            "platform request received"
        );
    }
    match handle_request(&dispatcher, &request).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => bad_request(e),
    }
}

fn bad_request(e: SkillError) -> Response {
    warn!("rejecting platform request: {}", e);
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": e.to_string() })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use plex_skill::{create_dispatcher, BackendKind, SkillConfig};
    use tower::ServiceExt;

    fn app() -> Router {
        let config = SkillConfig::new("http://media.local:3000", "key").unwrap();
        router(create_dispatcher(config, BackendKind::Mock).unwrap())
    }

    async fn post_json(body: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_pause_with_zone() {
        let (status, json) = post_json(
            r#"{"request":{"type":"IntentRequest","intent":{"name":"AMAZON.PauseIntent",
                "slots":{"zone":{"name":"zone","value":"Den"}}}}}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["response"]["outputSpeech"]["text"], "OK, pausing");
        assert_eq!(json["response"]["shouldEndSession"], true);
    }

    #[tokio::test]
    async fn test_launch_keeps_session_open() {
        let (status, json) = post_json(r#"{"request":{"type":"LaunchRequest"}}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json["response"]["outputSpeech"]["text"],
            "What would you like Plex to do?"
        );
        assert_eq!(json["response"]["shouldEndSession"], false);
    }

    #[tokio::test]
    async fn test_odd_requests_still_get_a_reply() {
        let (status, json) = post_json(
            r#"{"request":{"type":"LaunchRequest","timestamp":"not-a-time"}}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json["response"]["outputSpeech"]["text"],
            "What would you like Plex to do?"
        );

        let (status, json) = post_json(r#"{"request":{"type":"IntentRequest"}}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json["response"]["outputSpeech"]["text"],
            "Sorry, please could you re-phrase that?"
        );
        assert_eq!(json["response"]["shouldEndSession"], false);
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let (status, json) = post_json("{nope").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("invalid platform request"));
    }

    #[tokio::test]
    async fn test_healthz() {
        let request = Request::builder()
            .uri("/healthz")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["backend"], "mock");
    }
}

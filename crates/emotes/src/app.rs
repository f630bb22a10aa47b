use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        emotes::{create_emote, delete_emote, get_emote, list_emotes, update_emote},
        health::livez,
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/emotes", get(list_emotes).post(create_emote))
        .route(
            "/emotes/{id}",
            get(get_emote).put(update_emote).delete(delete_emote),
        )
        .layer(cors);

    Router::new()
        .route("/livez", get(livez))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::repository::EmoteRepository;
    use crate::storage::inmemory::{InMemoryStore, StoreOperation};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use emotes_core::logging::{Logger, MemorySink};
    use tower::ServiceExt;

    /// State over `store` whose log records stay in memory.
    fn test_state(store: InMemoryStore) -> AppState {
        let logger = Logger::new().with_sink(Arc::new(MemorySink::default()));
        AppState::new(EmoteRepository::new(Arc::new(store), Some(logger)))
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    async fn create(app: &Router, trigger: &str) -> Value {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/emotes",
                json!({"trigger": trigger, "url": format!("https://cdn/{trigger}.gif")}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }

    #[tokio::test]
    async fn test_livez() {
        let app = create_app(test_state(InMemoryStore::new()));

        let response = app.oneshot(empty_request("GET", "/livez")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_emotes_empty() {
        let app = create_app(test_state(InMemoryStore::new()));

        let response = app
            .oneshot(empty_request("GET", "/api/emotes"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_create_and_get_emote() {
        let app = create_app(test_state(InMemoryStore::new()));

        let emote = create(&app, "hi").await;
        assert_eq!(emote["trigger"], "hi");
        assert_eq!(emote["url"], "https://cdn/hi.gif");

        let id = emote["id"].as_str().unwrap();
        let response = app
            .oneshot(empty_request("GET", &format!("/api/emotes/{id}")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, emote);
    }

    #[tokio::test]
    async fn test_create_emote_rejects_empty_trigger() {
        let app = create_app(test_state(InMemoryStore::new()));

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/emotes",
                json!({"trigger": "  ", "url": "https://cdn/x.gif"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_emote_rejects_malformed_body() {
        let app = create_app(test_state(InMemoryStore::new()));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/emotes")
                    .header("Content-Type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_emote_store_fault() {
        let app = create_app(test_state(
            InMemoryStore::new().with_fault(StoreOperation::Put),
        ));

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/emotes",
                json!({"trigger": "hi", "url": "https://cdn/hi.gif"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_json(response).await;
        assert_eq!(body["name"], "ErrorNotFound");
        assert_eq!(body["message"], "No attributes were returned");
    }

    #[tokio::test]
    async fn test_list_emotes_with_query_filter_is_empty() {
        let app = create_app(test_state(InMemoryStore::new()));
        create(&app, "hi").await;
        create(&app, "bye").await;

        let response = app
            .oneshot(empty_request("GET", "/api/emotes?trigger=bye"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_update_emote_partial() {
        let app = create_app(test_state(InMemoryStore::new()));
        let emote = create(&app, "hi").await;
        let id = emote["id"].as_str().unwrap();

        let response = app
            .oneshot(json_request(
                "PUT",
                &format!("/api/emotes/{id}"),
                json!({"url": "https://cdn/new.gif"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let updated = body_json(response).await;
        assert_eq!(updated["id"], id);
        assert_eq!(updated["trigger"], "hi");
        assert_eq!(updated["url"], "https://cdn/new.gif");
    }

    #[tokio::test]
    async fn test_update_nonexistent_emote() {
        let app = create_app(test_state(InMemoryStore::new()));

        let response = app
            .oneshot(json_request(
                "PUT",
                "/api/emotes/missing",
                json!({"trigger": "hi"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_emote() {
        let app = create_app(test_state(InMemoryStore::new()));
        let emote = create(&app, "hi").await;
        let uri = format!("/api/emotes/{}", emote["id"].as_str().unwrap());

        let response = app
            .clone()
            .oneshot(empty_request("DELETE", &uri))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app.oneshot(empty_request("GET", &uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_emote_store_fault() {
        let app = create_app(test_state(
            InMemoryStore::new().with_fault(StoreOperation::Delete),
        ));

        let response = app
            .oneshot(empty_request("DELETE", "/api/emotes/1"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

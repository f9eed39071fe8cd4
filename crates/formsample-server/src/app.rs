// File: src/app.rs
// Purpose: Shared state and the axum router

use crate::handlers;
use axum::routing::{get, post};
use axum::Router;
use formsample::{
    sample_schema, Config, FormValues, Fetcher, Post, ResourceCache, ValidatedForm,
    ValidationSchema,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub posts: ResourceCache<Post>,
    pub schema: &'static ValidationSchema,
}

impl AppState {
    pub fn new(config: Config, fetcher: Arc<dyn Fetcher<Post>>) -> Self {
        Self {
            config: Arc::new(config),
            posts: ResourceCache::new(fetcher),
            schema: sample_schema(),
        }
    }

    /// Cache key of the post shown on the fetch page
    pub fn post_url(&self, id: u32) -> String {
        self.config.fetch.post_url(id)
    }

    /// A validated form bound to the app's schema and validation mode
    pub fn validated_form(&self, values: FormValues) -> ValidatedForm<'static> {
        ValidatedForm::new(self.schema, self.config.forms.validation_mode).with_values(values)
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/partials/post/:id", get(handlers::post_partial))
        .route("/form/manual", post(handlers::manual_submit))
        .route("/form/manual/change", post(handlers::manual_change))
        .route("/form/manual/reset", post(handlers::manual_reset))
        .route("/form/validated", post(handlers::validated_submit))
        .route("/form/validated/change", post(handlers::validated_change))
        .route("/form/validated/reset", post(handlers::validated_reset))
        // Page routes are matched against the route table
        .fallback(handlers::page)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use formsample::FetchError;
    use pretty_assertions::assert_eq;
    use serde_json::Value as JsonValue;
    use tower::ServiceExt;

    struct StubFetcher {
        fail: bool,
    }

    #[async_trait]
    impl Fetcher<Post> for StubFetcher {
        async fn fetch(&self, key: &str) -> Result<Post, FetchError> {
            if self.fail {
                return Err(FetchError::Status {
                    url: key.to_string(),
                    status: 500,
                });
            }
            Ok(Post {
                user_id: 1,
                id: 1,
                title: "sunt aut facere".to_string(),
                body: "quia et suscipit".to_string(),
            })
        }
    }

    fn app_with(fail: bool) -> Router {
        build_router(AppState::new(Config::default(), Arc::new(StubFetcher { fail })))
    }

    fn app() -> Router {
        app_with(false)
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn form_post(uri: &str) -> axum::http::request::Builder {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
    }

    #[tokio::test]
    async fn test_index_renders_placeholder() {
        let response = app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("loading..."));
        assert!(html.contains(r#"hx-get="/partials/post/1""#));
    }

    #[tokio::test]
    async fn test_post_partial_renders_post() {
        let response = app()
            .oneshot(Request::get("/partials/post/1").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("<h3>sunt aut facere</h3>"));
        assert!(!html.contains("<!DOCTYPE html>"));
    }

    #[tokio::test]
    async fn test_post_partial_json() {
        let response = app()
            .oneshot(
                Request::get("/partials/post/1")
                    .header(header::ACCEPT, "application/json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: JsonValue = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["userId"], 1);
        assert_eq!(json["title"], "sunt aut facere");
    }

    #[tokio::test]
    async fn test_post_partial_failure_offers_retry() {
        let response = app_with(true)
            .oneshot(Request::get("/partials/post/1").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("Could not load the post"));
        assert!(html.contains("refresh=true"));
    }

    #[tokio::test]
    async fn test_form_page_routes() {
        for path in ["/form", "/form/", "/Form"] {
            let response = app()
                .oneshot(Request::get(path).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "path {}", path);
            let html = body_string(response).await;
            assert!(html.contains("<h1>FormSample</h1>"));
        }
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let response = app()
            .oneshot(Request::get("/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_string(response).await.contains("Route '/missing' not found"));
    }

    #[tokio::test]
    async fn test_page_rejects_non_get() {
        let response = app()
            .oneshot(Request::post("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_validated_submit_success_json() {
        let body = "username=Alice&zipcode=1000001&gender=f&isAgreed=on";
        let response = app()
            .oneshot(
                form_post("/form/validated")
                    .header(header::ACCEPT, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: JsonValue = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["status"], "submitted");
        assert_eq!(
            json["values"],
            serde_json::json!({
                "username": "Alice",
                "zipcode": "1000001",
                "gender": "f",
                "isAgreed": true
            })
        );
    }

    #[tokio::test]
    async fn test_validated_submit_rejected_json() {
        let body = "username=";
        let response = app()
            .oneshot(
                form_post("/form/validated")
                    .header(header::ACCEPT, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json: JsonValue = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["status"], "rejected");
        assert_eq!(json["errors"]["username"], "This field is required");
        assert_eq!(json["errors"]["isAgreed"], "You must agree to the terms");
        assert!(json["errors"].get("zipcode").is_none());
    }

    #[tokio::test]
    async fn test_validated_submit_htmx_returns_fragment_with_errors() {
        let body = "username=&zipcode=123";
        let response = app()
            .oneshot(
                form_post("/form/validated")
                    .header("hx-request", "true")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.starts_with("<form"));
        assert!(html.contains("This field is required"));
        assert!(html.contains("Enter a 7-digit number"));
        assert!(html.contains(r#"name="_submitted""#));
    }

    #[tokio::test]
    async fn test_validated_submit_json_body() {
        let body = r#"{"username":"Alice","isAgreed":true}"#;
        let response = app()
            .oneshot(
                Request::post("/form/validated")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::ACCEPT, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: JsonValue = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["status"], "submitted");
    }

    async fn post_json(uri: &str, body: JsonValue) -> (StatusCode, JsonValue) {
        let response = app()
            .oneshot(
                Request::post(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::ACCEPT, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let json = serde_json::from_str(&body_string(response).await).unwrap();
        (status, json)
    }

    #[tokio::test]
    async fn test_validated_submit_keeps_whitespace() {
        let (status, json) = post_json(
            "/form/validated",
            serde_json::json!({"username": "   ", "isAgreed": true}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["values"]["username"], "   ");

        let (status, json) = post_json(
            "/form/validated",
            serde_json::json!({"username": "  Alice  ", "isAgreed": true}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["values"]["username"], "  Alice  ");

        let (status, json) = post_json(
            "/form/validated",
            serde_json::json!({"username": "Alice", "zipcode": " 1234567 ", "isAgreed": true}),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["errors"]["zipcode"], "Must be at most 7 characters");
    }

    #[tokio::test]
    async fn test_validated_submit_requires_boolean_agreement() {
        for agreed in [serde_json::json!(1), serde_json::json!("yes"), serde_json::json!("on")] {
            let (status, json) = post_json(
                "/form/validated",
                serde_json::json!({"username": "Alice", "isAgreed": agreed}),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "isAgreed {}", agreed);
            assert_eq!(json["status"], "invalid");
        }
    }

    #[tokio::test]
    async fn test_urlencoded_agreement_only_accepts_on() {
        let body = "username=Alice&isAgreed=yes";
        let response = app()
            .oneshot(
                form_post("/form/validated")
                    .header(header::ACCEPT, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json: JsonValue = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["errors"]["isAgreed"], "You must agree to the terms");
    }

    #[tokio::test]
    async fn test_malformed_json_body_is_bad_request() {
        let response = app()
            .oneshot(
                Request::post("/form/manual")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{\"username\":"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_post_partial_only_serves_configured_post() {
        let state = AppState::new(Config::default(), Arc::new(StubFetcher { fail: false }));
        let router = build_router(state.clone());

        for id in [2, 3, 500] {
            let response = router
                .clone()
                .oneshot(
                    Request::get(format!("/partials/post/{}", id))
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "post {}", id);
        }
        assert!(state.posts.is_empty());

        let response = router
            .oneshot(Request::get("/partials/post/1").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(state.posts.len(), 1);
    }

    #[tokio::test]
    async fn test_validated_change_revalidates_after_submit() {
        let body = "_submitted=true&username=Alice&isAgreed=on";
        let response = app()
            .oneshot(
                form_post("/form/validated/change")
                    .header("hx-request", "true")
                    .header("hx-trigger-name", "isAgreed")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let html = body_string(response).await;
        assert!(!html.contains(r#"class="error""#));
        assert!(html.contains(r#"name="_submitted""#));
    }

    #[tokio::test]
    async fn test_validated_change_before_submit_shows_no_errors() {
        let body = "username=&zipcode=12";
        let response = app()
            .oneshot(
                form_post("/form/validated/change")
                    .header("hx-request", "true")
                    .header("hx-trigger-name", "zipcode")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let html = body_string(response).await;
        assert!(!html.contains(r#"class="error""#));
    }

    #[tokio::test]
    async fn test_manual_submit_skips_validation() {
        let body = "username=&zipcode=abc";
        let response = app()
            .oneshot(
                form_post("/form/manual")
                    .header(header::ACCEPT, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: JsonValue = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["status"], "logged");
        assert_eq!(json["values"]["zipcode"], "abc");
    }

    #[tokio::test]
    async fn test_manual_reset_restores_defaults() {
        let body = "username=Bob&zipcode=1000001&gender=m&isAgreed=on";
        let response = app()
            .oneshot(
                form_post("/form/manual/reset")
                    .header("hx-request", "true")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let html = body_string(response).await;
        assert!(html.contains(r#"id="manual-form""#));
        assert!(!html.contains("Bob"));
        assert!(!html.contains("checked"));
    }

    #[tokio::test]
    async fn test_validated_reset_clears_errors() {
        let body = "_submitted=true&username=";
        let response = app()
            .oneshot(
                form_post("/form/validated/reset")
                    .header("hx-request", "true")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let html = body_string(response).await;
        assert!(!html.contains(r#"class="error""#));
        assert!(!html.contains("_submitted"));
    }

    #[tokio::test]
    async fn test_plain_form_post_renders_whole_page() {
        let body = "username=Alice";
        let response = app()
            .oneshot(form_post("/form/manual").body(Body::from(body)).unwrap())
            .await
            .unwrap();

        let html = body_string(response).await;
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"value="Alice""#));
    }
}

// region:    --- Imports
use crate::auth::AdminAuth;
use crate::document_store::DocumentStore;
use crate::error::ApiError;
use crate::handlers;
use axum::extract::DefaultBodyLimit;
use axum::http::header::{ALLOW, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, StatusCode};
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

// endregion: --- Imports

// region:    --- App State
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn DocumentStore>,
    pub auth: AdminAuth,
    pub max_page_size: usize,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, auth: AdminAuth, max_page_size: usize) -> Self {
        Self {
            store,
            auth,
            max_page_size,
        }
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }
}

// endregion: --- App State

// region:    --- Router
/// 라우터 구성. 모든 경로는 `/api` 접두사로도 제공된다
pub fn create_router(state: AppState, body_limit_bytes: usize) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::handle_health))
        .route(
            "/editions",
            get(handlers::handle_get_editions).post(handlers::handle_create_edition),
        )
        .route(
            "/editions/:id",
            get(handlers::handle_get_edition)
                .put(handlers::handle_update_edition)
                .delete(handlers::handle_delete_edition),
        )
        .route(
            "/owners",
            get(handlers::handle_get_owners).post(handlers::handle_create_owner),
        )
        .route(
            "/owners/:id",
            put(handlers::handle_update_owner).delete(handlers::handle_delete_owner),
        )
        .route("/bids", post(handlers::handle_place_bid))
        // GET은 에디션 식별자, PUT/DELETE는 입찰 식별자
        .route(
            "/bids/:id",
            get(handlers::handle_get_edition_bids)
                .put(handlers::handle_decide_bid)
                .delete(handlers::handle_delete_bid),
        );

    // 브라우저 관리 페이지를 위한 cors 설정
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    Router::new()
        .merge(api.clone())
        .nest("/api", api)
        .fallback(handlers::handle_not_found)
        .layer(middleware::map_response(json_method_not_allowed))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .with_state(state)
}

/// 405 응답도 `{"error": ...}` 본문으로 통일
async fn json_method_not_allowed(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }
    let allow = response.headers().get(ALLOW).cloned();
    let mut json = ApiError::MethodNotAllowed.into_response();
    if let Some(allow) = allow {
        json.headers_mut().insert(ALLOW, allow);
    }
    json
}

// endregion: --- Router

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document_store::MemoryDocumentStore;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let state = AppState::new(
            Arc::new(MemoryDocumentStore::new()),
            AdminAuth::new("test-token"),
            50,
        );
        create_router(state, 1024 * 1024)
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_is_served_with_and_without_prefix() {
        for uri in ["/health", "/api/health"] {
            let response = test_router()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            assert_eq!(body_json(response).await["status"], "ok");
        }
    }

    #[tokio::test]
    async fn wrong_method_is_a_json_405() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method(Method::PATCH)
                    .uri("/editions")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert!(response.headers().contains_key(ALLOW));
        assert_eq!(body_json(response).await["error"], "Method not allowed");
    }

    #[tokio::test]
    async fn unknown_path_is_a_json_404() {
        let response = test_router()
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "Not found");
    }

    #[tokio::test]
    async fn preflight_allows_any_origin() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/editions")
                    .header("Origin", "https://example.com")
                    .header("Access-Control-Request-Method", "POST")
                    .header("Access-Control-Request-Headers", "authorization")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "*"
        );
    }

    #[tokio::test]
    async fn malformed_json_is_a_400() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/bids")
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON body"));
    }

    #[tokio::test]
    async fn invalid_pagination_is_a_400() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/editions?limit=many")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::{make_span_with_request_id, request_id_middleware};

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Mood
        .route("/mood", post(handlers::analyze_mood))
        // Recommendations
        .route("/recommendations", post(handlers::recommend))
        .route("/recommendations/reroll", post(handlers::reroll))
        .route("/series", get(handlers::search_series))
        // Details
        .route("/details/:kind/:id", get(handlers::get_detail))
        // Catalog status and artwork
        .route("/configuration", get(handlers::get_configuration))
        .route("/covers", get(handlers::get_covers))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::middleware::request_id::REQUEST_ID_HEADER;

    fn unconfigured_router() -> Router {
        let state = AppState::from_config(&Config::default()).unwrap();
        create_router(state)
    }

    #[tokio::test]
    async fn test_every_response_carries_request_id() {
        let response = unconfigured_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn test_unknown_detail_kind_is_bad_request() {
        let response = unconfigured_router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/details/book/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

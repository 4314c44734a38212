/// HTTP server setup and routing
use crate::{
    context::AppContext,
    db,
    error::{DetailResponse, PhotoError, PhotoResult},
};
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde_json::json;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Build the main application router
pub fn build_router(ctx: AppContext) -> PhotoResult<Router> {
    // Credentialed CORS cannot use wildcards, so methods and headers mirror the preflight
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([ctx.config.cors_origin()?]))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    Ok(Router::new()
        .route("/health", get(health_check))
        .merge(crate::api::routes())
        .fallback(not_found)
        .with_state(ctx)
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

/// Health check handler
async fn health_check(State(ctx): State<AppContext>) -> PhotoResult<Json<serde_json::Value>> {
    db::test_connection(&ctx.db).await?;

    Ok(Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    })))
}

/// 404 handler
async fn not_found() -> (StatusCode, Json<DetailResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(DetailResponse {
            detail: "Not Found".to_string(),
        }),
    )
}

/// Start the HTTP server
pub async fn serve(ctx: AppContext) -> PhotoResult<()> {
    let addr = ctx.config.bind_address();
    let app = build_router(ctx)?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| PhotoError::Internal(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Photo catalog listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| PhotoError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use axum::http::{header, HeaderValue, Method};
    use axum_test::TestServer;

    async fn test_server() -> TestServer {
        let pool = db::create_memory_pool().await.unwrap();
        let config = ServerConfig::for_tests("unused.db".into());
        let ctx = AppContext::with_pool(config, pool).await.unwrap();

        TestServer::new(build_router(ctx).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = test_server().await;

        let response = server.get("/health").await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let server = test_server().await;

        let response = server.get("/albums").await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: DetailResponse = response.json();
        assert_eq!(body.detail, "Not Found");
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin_only() {
        let server = test_server().await;

        let response = server
            .method(Method::OPTIONS, "/photos")
            .add_header(header::ORIGIN, HeaderValue::from_static("http://localhost:5173"))
            .add_header(
                header::ACCESS_CONTROL_REQUEST_METHOD,
                HeaderValue::from_static("PATCH"),
            )
            .await;
        assert_eq!(
            response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            "http://localhost:5173"
        );
        assert_eq!(
            response.header(header::ACCESS_CONTROL_ALLOW_CREDENTIALS),
            "true"
        );

        let response = server
            .get("/photos")
            .add_header(header::ORIGIN, HeaderValue::from_static("http://evil.example"))
            .await;
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }
}

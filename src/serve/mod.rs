//! FitWell Web Host
//!
//! Serves the built browser app, built with Axum.
//!
//! # Endpoints
//!
//! - `GET /health` - Liveness and version
//! - `GET /client-config.json` - Public client settings for the browser app
//! - everything else - files from the UI build directory; unknown paths get
//!   `index.html` so client-side routes such as `/oauth/callback?code=...`
//!   reach the browser router

mod error;
mod routes;

pub use error::ServeError;

use axum::{http::HeaderValue, routing::get, Router};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::client::ClientConfig;
use crate::config::ServeConfig;

/// Shared state of the web host
pub struct ServeState {
    pub client_config: ClientConfig,
    started_at: Instant,
}

impl ServeState {
    pub fn new(client_config: ClientConfig) -> Self {
        Self {
            client_config,
            started_at: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

/// Build the router serving `static_dir`
pub fn build_router(state: ServeState, static_dir: &Path, cors_origins: &[String]) -> Router {
    let index = static_dir.join("index.html");
    let assets = ServeDir::new(static_dir).fallback(ServeFile::new(index));

    Router::new()
        .route("/health", get(routes::health))
        .route("/client-config.json", get(routes::client_config))
        .fallback_service(assets)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
        .with_state(Arc::new(state))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([axum::http::Method::GET])
}

/// Start the web host
pub async fn serve(state: ServeState, config: &ServeConfig) -> Result<(), ServeError> {
    let static_dir = PathBuf::from(&config.static_dir);
    if !static_dir.join("index.html").exists() {
        tracing::warn!(
            "No index.html in {:?}; build the UI first (trunk build in fitwell-ui)",
            static_dir
        );
    }

    let router = build_router(state, &static_dir, &config.cors_origins);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ServeError::Bind {
            addr: addr.clone(),
            error: e,
        })?;

    tracing::info!("FitWell web host listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("FitWell web host shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::OAuthProvider;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use tempfile::tempdir;
    use tower::util::ServiceExt;

    const INDEX: &str = "<!DOCTYPE html><html><body>fitwell</body></html>";

    fn create_test_app() -> (Router, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), INDEX).unwrap();
        std::fs::write(dir.path().join("fitwell-ui.js"), "console.log(1)").unwrap();

        let state = ServeState::new(ClientConfig {
            api_base_url: "http://api.fitwell.test".into(),
            oauth_base_url: None,
            oauth: OAuthProvider {
                client_id: "kakao-key".into(),
                ..Default::default()
            },
        });
        let router = build_router(state, dir.path(), &["http://localhost:8080".to_string()]);

        (router, dir)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _dir) = create_test_app();

        let (status, body) = get(app, "/health").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_client_config() {
        let (app, _dir) = create_test_app();

        let (status, body) = get(app, "/client-config.json").await;

        assert_eq!(status, StatusCode::OK);
        let config: ClientConfig = serde_json::from_str(&body).unwrap();
        assert_eq!(config.api_base_url, "http://api.fitwell.test");
        assert_eq!(config.oauth.client_id, "kakao-key");
    }

    #[tokio::test]
    async fn test_serves_index_and_assets() {
        let (app, _dir) = create_test_app();
        let (status, body) = get(app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, INDEX);

        let (app, _dir) = create_test_app();
        let (status, body) = get(app, "/fitwell-ui.js").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "console.log(1)");
    }

    #[tokio::test]
    async fn test_client_routes_fall_back_to_index() {
        for uri in ["/dashboard", "/oauth/callback?code=abc", "/signup?user=%7B%7D"] {
            let (app, _dir) = create_test_app();
            let (status, body) = get(app, uri).await;
            assert_eq!(status, StatusCode::OK, "{}", uri);
            assert_eq!(body, INDEX, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin() {
        let (app, _dir) = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/client-config.json")
                    .header(header::ORIGIN, "http://localhost:8080")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:8080"
        );
    }
}

//! Plant catalog HTTP server
//!
//! Serves the read-only catalog over JSON endpoints plus static image
//! files. The catalog is loaded before the server starts and injected as
//! shared state; per-request work is pure in-memory filtering.

pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::Request,
    http::{Method, StatusCode},
    middleware::Next,
    response::Response,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{error, info};
use vd_catalog::Catalog;

use self::state::AppState;

/// Web server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory the `/images` routes serve plant illustrations from.
    pub images_dir: PathBuf,
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            images_dir: PathBuf::from("img"),
            enable_cors: true,
        }
    }
}

/// Start the web server.
///
/// Endpoints (each JSON route is also served without the /api prefix):
/// - GET /api/filters
/// - GET /api/plants
/// - GET /images/{name}
/// - GET /health
///
/// Returns the AppState, the serve task's JoinHandle, and the actual port
/// used (binding falls back to the next free port when the configured one
/// is taken).
pub async fn start_server(
    config: ServerConfig,
    catalog: Arc<Catalog>,
) -> anyhow::Result<(AppState, tokio::task::JoinHandle<()>, u16)> {
    info!("Starting catalog server on {}:{}", config.host, config.port);

    let state = AppState::new(catalog);
    let app = build_app(state.clone(), &config);

    let host_ip = config.host.parse::<std::net::IpAddr>()?;
    let mut port = config.port;
    let max_attempts = 100;

    let listener = loop {
        let addr = SocketAddr::from((host_ip, port));

        match TcpListener::bind(addr).await {
            Ok(listener) => {
                if port != config.port {
                    info!("Port {} was taken, using port {} instead", config.port, port);
                }
                break listener;
            }
            Err(e) => {
                if port - config.port >= max_attempts {
                    return Err(anyhow::anyhow!(
                        "Could not bind to any port between {} and {} (last error: {})",
                        config.port,
                        port,
                        e
                    ));
                }
                tracing::debug!("Port {} is taken, trying next port", port);
                port += 1;
            }
        }
    };

    info!(
        "Catalog server listening on http://{}:{}",
        config.host, port
    );

    let state_clone = state.clone();

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Server error: {}", e);
        }
    });

    Ok((state_clone, handle, port))
}

/// Build the Axum app with all routes and middleware
fn build_app(state: AppState, config: &ServerConfig) -> Router {
    // JSON routes are registered under /api and bare, so clients written
    // against either prefix keep working.
    let mut router = Router::new()
        .route("/health", get(health_check))
        .route("/", get(root_handler))
        .route("/api/filters", get(routes::get_filters))
        .route("/api/plants", get(routes::get_plants))
        .route("/filters", get(routes::get_filters))
        .route("/plants", get(routes::get_plants))
        .nest_service("/images", ServeDir::new(&config.images_dir))
        .with_state(state);

    // Add logging middleware
    router = router.layer(axum::middleware::from_fn(logging_middleware));

    // Add CORS if enabled. Permissive, same as the original dev setup.
    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
            .allow_headers(Any);

        router = router.layer(cors);
    }

    router
}

/// Health check endpoint
async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Root handler
async fn root_handler() -> &'static str {
    "Verdant - Plant Catalog API\n\
     \n\
     Endpoints (JSON routes also work without the /api prefix):\n\
       GET /api/filters                 - distinct values per filter column\n\
       GET /api/plants?q=&ids=&...      - query the catalog\n\
       GET /images/{name}               - plant illustrations\n\
       GET /health                      - liveness check\n"
}

/// Logging middleware to log all requests
async fn logging_middleware(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = std::time::Instant::now();

    let response = next.run(req).await;

    let elapsed = start.elapsed();
    let status = response.status();

    if status.is_success() {
        info!("{} {} - {} ({:?})", method, uri, status, elapsed);
    } else {
        error!("{} {} - {} ({:?})", method, uri, status, elapsed);
    }

    response
}

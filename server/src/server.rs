use crate::advisor::Advisor;
use crate::config::Config;
use crate::error::ApiError;
use crate::web;
use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use routesim::GeneratorConfig;
use shared::{AnalysisRequest, AnalysisResponse, RoutesResponse, END, START};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub advisor: Arc<Advisor>,
    pub generator: Arc<GeneratorConfig>,
}

impl AppState {
    pub fn new(advisor: Advisor, generator: GeneratorConfig) -> Self {
        Self {
            advisor: Arc::new(advisor),
            generator: Arc::new(generator),
        }
    }
}

/// Build the full router: JSON API, health checks, then static assets for
/// everything else
pub fn app(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/api/get_routes", post(handle_get_routes))
        .route("/api/analyze_safety", post(handle_analyze_safety))
        .route("/health", get(web::health))
        .route("/healthz", get(web::health))
        .fallback_service(web::static_files(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run(config: Config) -> anyhow::Result<()> {
    let advisor = Advisor::new(&config.credential, &config.gemini)?;
    match &advisor {
        Advisor::Configured(client) => {
            tracing::info!("Safety advisor calling {}", client.endpoint());
        }
        Advisor::Unconfigured => {
            tracing::warn!("GEMINI_API_KEY not set; safety advice will be simulated");
        }
    }

    let generator = GeneratorConfig {
        route_count: config.route_count,
        ..Default::default()
    };
    generator.validate()?;

    tracing::info!("Serving static files from {}", config.static_dir.display());
    let app = app(AppState::new(advisor, generator), &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

/// Generate candidate routes between the fixed demo endpoints.
///
/// The body is optional; when present it must be JSON but is otherwise
/// ignored.
async fn handle_get_routes(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RoutesResponse>, ApiError> {
    if !body.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_slice::<serde_json::Value>(&body)?;
    }

    let routes = routesim::generate_routes(&mut rand::thread_rng(), START, END, &state.generator)?;

    tracing::debug!("Generated {} routes", routes.len());

    Ok(Json(RoutesResponse { routes }))
}

/// Produce safety advice for one route.
///
/// Language service failures still answer 200 with an `error` field.
#[axum::debug_handler]
async fn handle_analyze_safety(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let Json(request) =
        payload.map_err(|rejection| ApiError::InvalidRequest(rejection.body_text()))?;

    tracing::info!(
        route_id = request.route_id.as_deref().unwrap_or("-"),
        score = request.safety_score.value(),
        "Analyzing route safety"
    );

    let advice = state.advisor.analyze(&request).await;

    Ok(Json(advice.into()))
}

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use brand_color_match::api::{ColorInfo, MatchParams, MatchResponse, PaletteGroupInfo};
use brand_color_match::config::Config;
use brand_color_match::error::AppError;
use brand_color_match::{Matcher, Metric, Rgb};

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    matcher: Matcher,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Brand Color Match API",
        description = "Find the closest brand palette color for any hex or rgb() value",
        version = "0.1.0"
    ),
    tags(
        (name = "Palette", description = "Brand palette listing and lookup"),
        (name = "Match", description = "Nearest palette color matching")
    ),
    paths(health, get_palette, get_color, match_color),
    components(schemas(ColorInfo, PaletteGroupInfo, MatchResponse, Metric, Rgb))
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let palette = match config.load_palette() {
        Ok(palette) => palette,
        Err(e) => {
            tracing::error!("Failed to load palette from {}: {}", config.palette_source(), e);
            std::process::exit(1);
        }
    };

    if palette.is_empty() {
        tracing::error!(
            "Palette from {} has no colors, refusing to start",
            config.palette_source()
        );
        std::process::exit(1);
    }

    tracing::info!(
        "Loaded {} palette: {} colors in {} groups, default metric {}",
        config.palette_source(),
        palette.len(),
        palette.group_count(),
        config.metric
    );

    let state = AppState {
        matcher: Matcher::new(Arc::new(palette), config.metric),
    };

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, router(state)).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/palette", get(get_palette))
        .route("/palette/{name}", get(get_color))
        .route("/match", get(match_color))
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .route("/openapi.json", get(openapi_json))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = String)
    )
)]
async fn health() -> &'static str {
    "ok"
}

/// Get OpenAPI JSON specification
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// List the palette
///
/// Returns every group with its colors, in canonical order.
#[utoipa::path(
    get,
    path = "/palette",
    tag = "Palette",
    responses(
        (status = 200, description = "Palette groups", body = Vec<PaletteGroupInfo>)
    )
)]
async fn get_palette(State(state): State<AppState>) -> Json<Vec<PaletteGroupInfo>> {
    Json(
        state
            .matcher
            .palette()
            .groups()
            .map(PaletteGroupInfo::from)
            .collect(),
    )
}

/// Get one palette color by name
#[utoipa::path(
    get,
    path = "/palette/{name}",
    tag = "Palette",
    params(
        ("name" = String, Path, description = "Unique color name")
    ),
    responses(
        (status = 200, description = "Palette color", body = ColorInfo),
        (status = 404, description = "No color with that name")
    )
)]
async fn get_color(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ColorInfo>, AppError> {
    tracing::debug!("Palette lookup: {}", name);

    state
        .matcher
        .palette()
        .get(&name)
        .map(|entry| Json(ColorInfo::from(entry)))
        .ok_or(AppError::ColorNotFound(name))
}

/// Match a color
///
/// Returns the nearest palette color and a 0-100 match percentage.
#[utoipa::path(
    get,
    path = "/match",
    tag = "Match",
    params(MatchParams),
    responses(
        (status = 200, description = "Nearest palette color", body = MatchResponse),
        (status = 400, description = "Missing or unrecognized color"),
        (status = 500, description = "Palette is empty")
    )
)]
async fn match_color(
    State(state): State<AppState>,
    Query(params): Query<MatchParams>,
) -> Result<Json<MatchResponse>, AppError> {
    let input = params
        .color
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(AppError::EmptyInput)?;

    let matcher = &state.matcher;
    let (result, metric) = match params.metric {
        Some(metric) => (matcher.parse_and_match_with(input, metric)?, metric),
        None => (matcher.parse_and_match(input)?, matcher.metric()),
    };
    let percentage = matcher.match_percentage(result.distance, metric);

    tracing::info!(
        "Match request: {} -> {} ({:.1}%, {})",
        input,
        result.name,
        percentage,
        metric
    );

    Ok(Json(MatchResponse::new(result, percentage, metric)))
}

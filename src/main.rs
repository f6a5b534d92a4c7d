//! Tavros Signage Server
//!
//! Backend for the gym floor display: slide rotation, live platform
//! assignments and built-in content behind a REST JSON API.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tavros_signage::{
    api, carousel::CarouselEngine, config::AppConfig, feed, services::Services, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing; the guard flushes the file appender on shutdown
    let _log_guard = init_tracing(&config);

    tracing::info!("Starting Tavros Signage Server v{}", env!("CARGO_PKG_VERSION"));

    // Shared HTTP client for both upstream feeds
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.upstream.request_timeout_secs))
        .build()
        .expect("Failed to build HTTP client");

    let checkin: Arc<dyn feed::CheckinApi> = Arc::new(feed::CheckinClient::new(
        http.clone(),
        &config.upstream.checkin_base_url,
    ));
    let sheet: Arc<dyn feed::SheetApi> =
        Arc::new(feed::SheetClient::new(http, &config.upstream.sheet_csv_url));

    // Rotation engine and services
    let engine = CarouselEngine::new();
    let services = Services::new(engine.clone(), &config);
    let display = Arc::clone(&services.display);

    // Background feed pollers
    let default_slide_ms = config.carousel.default_slide_secs * 1_000;
    let sheet_poller =
        feed::spawn_sheet_poller(sheet, engine.clone(), &config.upstream, default_slide_ms);
    let checkin_poller = feed::spawn_checkin_poller(
        Arc::clone(&checkin),
        display,
        &config.upstream,
        config.display.utc_offset_hours,
    );
    let keep_alive = feed::spawn_keep_alive(checkin, &config.upstream);

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    // Stop timers and pollers once the server loop returns
    engine.shutdown();
    sheet_poller.abort();
    checkin_poller.abort();
    keep_alive.abort();

    Ok(())
}

/// Initialize the tracing subscriber from the logging configuration.
///
/// Returns the file appender guard when a log directory is configured; it
/// must stay alive for the duration of the process.
fn init_tracing(config: &AppConfig) -> Option<WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("tavros_signage={},tower_http=debug", config.logging.level).into()
    });

    let (pretty_layer, json_layer) = if config.logging.format == "json" {
        (None, Some(tracing_subscriber::fmt::layer().json()))
    } else {
        (Some(tracing_subscriber::fmt::layer()), None)
    };

    let (file_layer, file_guard) = match config.logging.directory.as_deref() {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "tavros-signage.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let journald_layer = if config.logging.journald {
        match tracing_journald::layer() {
            Ok(layer) => Some(layer),
            Err(err) => {
                eprintln!("journald logging requested but unavailable: {}", err);
                None
            }
        }
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(pretty_layer)
        .with(json_layer)
        .with(file_layer)
        .with(journald_layer)
        .init();

    file_guard
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Display rotation
        .route("/display", get(api::display::get_frame))
        .route("/display/events", get(api::display::frame_events))
        .route("/display/next", post(api::display::next_slide))
        .route("/display/previous", post(api::display::previous_slide))
        .route("/display/jump", post(api::display::jump_to_slide))
        // Slide deck
        .route("/slides", get(api::slides::list_slides))
        // Gym floor
        .route("/floor/session", get(api::floor::get_session))
        .route("/floor/platforms", get(api::floor::get_platforms))
        // Built-in content
        .route("/gallery", get(api::content::list_gallery))
        .route("/schedule", get(api::content::list_schedule))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}

mod config;
mod core;
mod models;
mod routes;
mod services;

use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use config::Settings;
use core::{RateLimiter, RetryPolicy};
use routes::recommend::AppState;
use services::{AiClient, ModelTiers, RequestOrchestrator};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .content_type("application/json")
            .body(serde_json::to_string(self).unwrap())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Styla recommendation engine...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // Initialize the AI client
    let ai = Arc::new(AiClient::new(
        settings.ai.endpoint,
        settings.ai.api_key,
        settings.ai.request_timeout_secs,
    ));

    info!("AI client initialized");

    // One limiter per quota-bearing call site
    let generation_limiter = Arc::new(RateLimiter::new(
        settings.rate_limit.generation_max_calls,
        Duration::from_secs(settings.rate_limit.generation_window_secs),
    ));
    let validation_limiter = Arc::new(RateLimiter::new(
        settings.rate_limit.validation_max_calls,
        Duration::from_secs(settings.rate_limit.validation_window_secs),
    ));

    info!(
        "Rate limiters initialized (generation: {}/{}s, validation: {}/{}s)",
        settings.rate_limit.generation_max_calls,
        settings.rate_limit.generation_window_secs,
        settings.rate_limit.validation_max_calls,
        settings.rate_limit.validation_window_secs,
    );

    let retry = RetryPolicy::linear(
        settings.retry.max_attempts,
        Duration::from_millis(settings.retry.backoff_base_ms),
    );

    let models = ModelTiers {
        primary: settings.ai.primary_model,
        fallback: settings.ai.fallback_model,
    };

    let orchestrator = Arc::new(RequestOrchestrator::new(
        ai,
        generation_limiter,
        validation_limiter,
        retry,
        models,
    ));

    info!("Orchestrator initialized");

    // Build application state
    let app_state = AppState { orchestrator };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}

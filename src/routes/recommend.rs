use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use validator::Validate;

use crate::core::scorer;
use crate::models::{
    CategoryKey, ErrorResponse, FilterCatalogRequest, FilterCatalogResponse, GenerateRequest,
    HealthResponse, RateLimitResponse, ValidateImagesRequest,
};
use crate::services::{EngineError, RequestOrchestrator};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<RequestOrchestrator>,
}

/// Configure all recommendation-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route(
            "/recommendations/generate",
            web::post().to(generate_recommendation),
        )
        .route("/images/validate", web::post().to(validate_images))
        .route("/catalog/filter", web::post().to(filter_catalog));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Generate an outfit recommendation
///
/// POST /api/v1/recommendations/generate
///
/// Returns 429 when the generation quota is exhausted; every other failure
/// mode degrades to a complete rule-based result with a 200.
async fn generate_recommendation(
    state: web::Data<AppState>,
    req: web::Json<GenerateRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for generate request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let cancel = CancellationToken::new();
    let request = req.into_inner().into();

    match state.orchestrator.generate(request, &cancel).await {
        Ok(set) => HttpResponse::Ok().json(set),
        Err(EngineError::RateLimited { retry_after }) => {
            let secs = retry_after.as_secs().max(1);
            tracing::info!(retry_after_secs = secs, "Generation request rate limited");
            HttpResponse::TooManyRequests().json(RateLimitResponse {
                error: "rate_limited".to_string(),
                message: format!("Generation quota exhausted, retry in {}s", secs),
                retry_after_secs: secs,
                status_code: 429,
            })
        }
    }
}

/// Validate a batch of uploaded images
///
/// POST /api/v1/images/validate
///
/// Responds with `valid` and `invalid` lists preserving input order.
async fn validate_images(
    state: web::Data<AppState>,
    req: web::Json<ValidateImagesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let cancel = CancellationToken::new();
    let report = Arc::clone(&state.orchestrator)
        .validate_images(req.into_inner().uris, &cancel)
        .await;

    HttpResponse::Ok().json(report)
}

/// Filter a catalog against a user profile
///
/// POST /api/v1/catalog/filter
///
/// Pure and synchronous; an empty candidate list means no confident match.
async fn filter_catalog(req: web::Json<FilterCatalogRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let request = req.into_inner();
    let key = CategoryKey::parse(&request.category);
    let candidates = scorer::filter(&request.catalog, &request.profile, &key);

    tracing::debug!(
        category = %key.category,
        candidates = candidates.len(),
        total = request.catalog.len(),
        "Catalog filtered"
    );

    HttpResponse::Ok().json(FilterCatalogResponse {
        total_entries: request.catalog.len(),
        candidates,
    })
}

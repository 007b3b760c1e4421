use serde::{Deserialize, Serialize};

use crate::models::domain::ScoredCandidate;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Rate limit response, carrying the wait until the next free slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "retryAfterSecs")]
    pub retry_after_secs: u64,
    pub status_code: u16,
}

/// Response for the catalog filter endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterCatalogResponse {
    pub candidates: Vec<ScoredCandidate>,
    #[serde(rename = "totalEntries")]
    pub total_entries: usize,
}

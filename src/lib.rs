//! Styla Engine - Resilient outfit recommendation engine for the Styla fashion app
//!
//! This library wraps a rate-limited external generative AI service with a
//! retry/escalation/fallback pipeline that always yields a structurally valid,
//! profile-aware outfit recommendation.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{RateLimiter, RetryError, RetryPolicy};
pub use models::{
    CatalogEntry, CategoryKey, OutfitRecommendation, RecommendationRequest, RecommendationSet,
    RecommendationSource, ShoppingLink, UserProfile,
};
pub use services::{AiClient, EngineError, ModelTiers, RequestOrchestrator};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let key = CategoryKey::parse("female-office");
        assert_eq!(key.category, "office");
    }
}

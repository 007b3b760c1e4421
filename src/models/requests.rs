use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{
    CatalogEntry, ImageData, RecommendationRequest, SituationalContext, UserProfile,
};

/// Request to generate an outfit recommendation
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateRequest {
    #[validate(length(min = 1))]
    pub prompt: String,
    #[serde(default)]
    pub image: Option<ImageData>,
    pub profile: UserProfile,
    #[serde(default)]
    pub context: Option<SituationalContext>,
}

impl From<GenerateRequest> for RecommendationRequest {
    fn from(req: GenerateRequest) -> Self {
        RecommendationRequest {
            prompt: req.prompt,
            image: req.image,
            profile: req.profile,
            context: req.context,
        }
    }
}

/// Request to validate a batch of uploaded images
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ValidateImagesRequest {
    #[validate(length(min = 1, max = 10))]
    pub uris: Vec<String>,
}

/// Request to filter a catalog against a user profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FilterCatalogRequest {
    pub catalog: Vec<CatalogEntry>,
    pub profile: UserProfile,
    /// Category tag; legacy gender-prefixed forms like "male-gym" are accepted
    #[validate(length(min = 1))]
    pub category: String,
}

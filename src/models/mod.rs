// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BodyType, CatalogEntry, CategoryKey, ForecastSlot, Gender, HeightBucket, ImageData,
    ImageVerdict, LocationProfile, OutfitRecommendation, RecommendationRequest,
    RecommendationSet, RecommendationSource, ScoredCandidate, ShoppingLink, SituationalContext,
    SkinTone, UserProfile, WeatherSnapshot,
};
pub use requests::{FilterCatalogRequest, GenerateRequest, ValidateImagesRequest};
pub use responses::{
    ErrorResponse, FilterCatalogResponse, HealthResponse, RateLimitResponse,
};

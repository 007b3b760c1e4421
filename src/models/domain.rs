use serde::{Deserialize, Serialize};

/// User gender, used to scope outfit vocabularies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[serde(other)]
    Unknown,
}

impl Default for Gender {
    fn default() -> Self {
        Gender::Unknown
    }
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unknown => "unknown",
        }
    }

    /// Parse a gender tag such as "male" / "female"; anything else is Unknown
    pub fn from_tag(tag: &str) -> Gender {
        match tag.to_lowercase().as_str() {
            "male" => Gender::Male,
            "female" => Gender::Female,
            _ => Gender::Unknown,
        }
    }
}

/// Coarse silhouette classification used to tailor styling reasoning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyType {
    Slim,
    Athletic,
    Heavy,
    Hourglass,
    Pear,
    Apple,
    Rectangle,
    #[serde(other)]
    Unspecified,
}

impl Default for BodyType {
    fn default() -> Self {
        BodyType::Unspecified
    }
}

impl BodyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyType::Slim => "slim",
            BodyType::Athletic => "athletic",
            BodyType::Heavy => "heavy",
            BodyType::Hourglass => "hourglass",
            BodyType::Pear => "pear",
            BodyType::Apple => "apple",
            BodyType::Rectangle => "rectangle",
            BodyType::Unspecified => "unspecified",
        }
    }
}

/// Coarse skin tone classification used to select flattering palettes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkinTone {
    Fair,
    Wheatish,
    Dusky,
    Dark,
    #[serde(other)]
    Unspecified,
}

impl Default for SkinTone {
    fn default() -> Self {
        SkinTone::Unspecified
    }
}

impl SkinTone {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkinTone::Fair => "fair",
            SkinTone::Wheatish => "wheatish",
            SkinTone::Dusky => "dusky",
            SkinTone::Dark => "dark",
            SkinTone::Unspecified => "unspecified",
        }
    }
}

/// Height bucket derived from height in centimeters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeightBucket {
    Short,
    Average,
    Tall,
}

impl HeightBucket {
    /// Short below 165 cm, tall above 180 cm, average in between
    pub fn from_cm(height_cm: u16) -> HeightBucket {
        if height_cm < 165 {
            HeightBucket::Short
        } else if height_cm > 180 {
            HeightBucket::Tall
        } else {
            HeightBucket::Average
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HeightBucket::Short => "short",
            HeightBucket::Average => "average",
            HeightBucket::Tall => "tall",
        }
    }
}

/// User appearance profile, immutable per request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "heightCm")]
    pub height_cm: u16,
    #[serde(rename = "weightKg", default)]
    pub weight_kg: Option<f32>,
    #[serde(rename = "bodyType", default)]
    pub body_type: BodyType,
    #[serde(rename = "skinTone", default)]
    pub skin_tone: SkinTone,
    #[serde(default)]
    pub gender: Gender,
}

impl UserProfile {
    pub fn height_bucket(&self) -> HeightBucket {
        HeightBucket::from_cm(self.height_cm)
    }
}

/// Weather forecast slot for a time of day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastSlot {
    #[serde(rename = "timeOfDay")]
    pub time_of_day: String,
    pub condition: String,
    #[serde(rename = "temperatureC")]
    pub temperature_c: f32,
}

/// Current weather conditions supplied by the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    #[serde(rename = "temperatureC")]
    pub temperature_c: f32,
    pub condition: String,
    #[serde(default)]
    pub humidity: Option<u8>,
    #[serde(rename = "windKph", default)]
    pub wind_kph: Option<f32>,
    #[serde(default)]
    pub forecast: Vec<ForecastSlot>,
}

/// Location attributes supplied by the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationProfile {
    pub place: String,
    pub region: String,
    pub climate: String,
    pub terrain: String,
    #[serde(rename = "culturalStyle")]
    pub cultural_style: String,
    #[serde(rename = "localTrends", default)]
    pub local_trends: Vec<String>,
}

/// Optional weather and/or location context for a recommendation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SituationalContext {
    #[serde(default)]
    pub weather: Option<WeatherSnapshot>,
    #[serde(default)]
    pub location: Option<LocationProfile>,
}

/// Base64-encoded image payload with its MIME type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageData {
    pub data: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

/// A single recommendation request as seen by the orchestrator
#[derive(Debug, Clone)]
pub struct RecommendationRequest {
    pub prompt: String,
    pub image: Option<ImageData>,
    pub profile: UserProfile,
    pub context: Option<SituationalContext>,
}

/// Shopping or inspiration search link for one platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingLink {
    pub platform: String,
    pub query: String,
    pub url: String,
    pub description: String,
}

/// A complete outfit suggestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutfitRecommendation {
    pub style: String,
    pub colors: Vec<String>,
    pub items: Vec<String>,
    pub accessories: String,
    pub mood: String,
    pub reasoning: String,
    #[serde(default)]
    pub links: Vec<ShoppingLink>,
}

/// Where a recommendation set came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RecommendationSource {
    AiGenerated { model: String },
    RuleBased,
}

/// Full recommendation payload handed to the rendering layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationSet {
    #[serde(rename = "requestId")]
    pub request_id: uuid::Uuid,
    pub source: RecommendationSource,
    pub outfits: Vec<OutfitRecommendation>,
    pub palette: Vec<String>,
    #[serde(rename = "stylingTips")]
    pub styling_tips: Vec<String>,
    #[serde(rename = "generatedAt")]
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Explicit category/gender pair, parsed once at the boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryKey {
    pub category: String,
    pub gender: Gender,
}

impl CategoryKey {
    /// Parse a category tag, accepting legacy gender-prefixed forms
    /// such as "male-gym" as well as plain category names.
    pub fn parse(raw: &str) -> CategoryKey {
        let normalized = raw.trim().to_lowercase();
        if let Some((prefix, rest)) = normalized.split_once('-') {
            let gender = Gender::from_tag(prefix);
            if gender != Gender::Unknown && !rest.is_empty() {
                return CategoryKey {
                    category: rest.to_string(),
                    gender,
                };
            }
        }
        CategoryKey {
            category: normalized,
            gender: Gender::Unknown,
        }
    }
}

/// Catalog entry with appearance constraint sets; "any" is a wildcard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub genders: Vec<String>,
    #[serde(default)]
    pub heights: Vec<String>,
    #[serde(rename = "bodyTypes", default)]
    pub body_types: Vec<String>,
    #[serde(rename = "skinTones", default)]
    pub skin_tones: Vec<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CatalogEntry {
    /// True if any attribute set on this entry contains the wildcard "any"
    pub fn has_wildcard(&self) -> bool {
        [&self.genders, &self.heights, &self.body_types, &self.skin_tones]
            .iter()
            .any(|set| set.iter().any(|v| v.eq_ignore_ascii_case("any")))
    }
}

/// Catalog entry paired with its score for one filtering pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub entry: CatalogEntry,
    pub score: u32,
}

/// Structured verdict from the image rating call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageVerdict {
    #[serde(rename = "isValid")]
    pub is_valid: bool,
    #[serde(default)]
    pub reasoning: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_buckets() {
        assert_eq!(HeightBucket::from_cm(150), HeightBucket::Short);
        assert_eq!(HeightBucket::from_cm(165), HeightBucket::Average);
        assert_eq!(HeightBucket::from_cm(180), HeightBucket::Average);
        assert_eq!(HeightBucket::from_cm(181), HeightBucket::Tall);
    }

    #[test]
    fn test_category_key_parses_gender_prefix() {
        let key = CategoryKey::parse("male-gym");
        assert_eq!(key.category, "gym");
        assert_eq!(key.gender, Gender::Male);

        let key = CategoryKey::parse("Female-Office");
        assert_eq!(key.category, "office");
        assert_eq!(key.gender, Gender::Female);
    }

    #[test]
    fn test_category_key_plain_category() {
        let key = CategoryKey::parse("party");
        assert_eq!(key.category, "party");
        assert_eq!(key.gender, Gender::Unknown);

        // Unrecognized prefix stays part of the category
        let key = CategoryKey::parse("beach-party");
        assert_eq!(key.category, "beach-party");
        assert_eq!(key.gender, Gender::Unknown);
    }

    #[test]
    fn test_wildcard_detection() {
        let entry = CatalogEntry {
            id: "1".to_string(),
            name: "Relaxed tee".to_string(),
            category: "casual".to_string(),
            genders: vec!["Any".to_string()],
            heights: vec![],
            body_types: vec!["slim".to_string()],
            skin_tones: vec![],
            city: None,
            tags: vec![],
        };
        assert!(entry.has_wildcard());
    }

    #[test]
    fn test_unknown_enum_values_fall_through() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"heightCm": 170, "bodyType": "stocky", "skinTone": "olive", "gender": "other"}"#,
        )
        .unwrap();
        assert_eq!(profile.body_type, BodyType::Unspecified);
        assert_eq!(profile.skin_tone, SkinTone::Unspecified);
        assert_eq!(profile.gender, Gender::Unknown);
    }
}

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::core::extractor::{self, AiOutfit, ExtractError};
use crate::core::{fallback, links, RateLimiter, RetryPolicy};
use crate::models::{
    ImageVerdict, OutfitRecommendation, RecommendationRequest, RecommendationSet,
    RecommendationSource,
};
use crate::services::ai::{AiClient, AiError};

/// Model tier per attempt: the primary model first, then a less capable
/// but more available tier for the remaining attempts.
#[derive(Debug, Clone)]
pub struct ModelTiers {
    pub primary: String,
    pub fallback: String,
}

impl ModelTiers {
    fn for_attempt(&self, attempt: u32) -> &str {
        if attempt <= 1 {
            &self.primary
        } else {
            &self.fallback
        }
    }
}

/// The only error surfaced to callers; everything else degrades to a
/// rule-based result.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("rate limit exceeded, retry in {}s", .retry_after.as_secs())]
    RateLimited { retry_after: Duration },
}

/// Per-attempt failure inside the generation loop
#[derive(Debug, thiserror::Error)]
enum AttemptError {
    #[error(transparent)]
    Service(#[from] AiError),

    #[error(transparent)]
    Parse(#[from] ExtractError),
}

/// Unparsable output is worth another attempt just like far-end throttling;
/// only a definitive service error ends the loop early.
fn retryable(err: &AttemptError) -> bool {
    match err {
        AttemptError::Service(e) => e.is_retryable(),
        AttemptError::Parse(_) => true,
    }
}

/// Image rejected by the rating call, with the model's reasoning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRejection {
    pub uri: String,
    pub reasoning: String,
}

/// Order-preserving outcome of a batch image validation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageValidationReport {
    pub valid: Vec<String>,
    pub invalid: Vec<ImageRejection>,
}

/// Central coordinator for the recommendation pipeline.
///
/// Consults the injected rate limiters, drives the external AI call
/// through the retry policy with per-attempt model selection, extracts
/// the structured result, and falls back to the rule engine whenever the
/// AI path cannot produce one. Once a request is admitted, a usable
/// recommendation set is always returned.
pub struct RequestOrchestrator {
    ai: Arc<AiClient>,
    generation_limiter: Arc<RateLimiter>,
    validation_limiter: Arc<RateLimiter>,
    retry: RetryPolicy,
    models: ModelTiers,
}

impl RequestOrchestrator {
    pub fn new(
        ai: Arc<AiClient>,
        generation_limiter: Arc<RateLimiter>,
        validation_limiter: Arc<RateLimiter>,
        retry: RetryPolicy,
        models: ModelTiers,
    ) -> Self {
        Self {
            ai,
            generation_limiter,
            validation_limiter,
            retry,
            models,
        }
    }

    /// Generate a recommendation set for the request.
    ///
    /// Fails only on rate-limit denial; AI and parse failures degrade to
    /// the rule-based fallback after the attempt budget is spent.
    pub async fn generate(
        &self,
        request: RecommendationRequest,
        cancel: &CancellationToken,
    ) -> Result<RecommendationSet, EngineError> {
        self.generation_limiter
            .try_admit()
            .map_err(|wait| EngineError::RateLimited { retry_after: wait })?;

        let request_id = uuid::Uuid::new_v4();
        let prompt = build_generation_prompt(&request);

        tracing::info!(%request_id, "Generating recommendation");

        let attempt_result = self
            .retry
            .run(cancel, retryable, |attempt| {
                let model = self.models.for_attempt(attempt).to_string();
                let prompt = prompt.clone();
                let image = request.image.clone();
                let ai = Arc::clone(&self.ai);
                async move {
                    let raw = ai.generate_content(&model, &prompt, image.as_ref()).await?;
                    let outfits = extractor::extract_outfits(&raw)?;
                    Ok::<(String, Vec<AiOutfit>), AttemptError>((model, outfits))
                }
            })
            .await;

        match attempt_result {
            Ok((model, ai_outfits)) => {
                tracing::info!(%request_id, %model, "AI path produced a valid result");
                Ok(self.assemble_ai_set(request_id, model, ai_outfits, &request))
            }
            Err(err) => {
                tracing::warn!(%request_id, error = %err, "AI path failed, using rule-based fallback");
                Ok(self.assemble_fallback_set(request_id, &request))
            }
        }
    }

    /// Validate a batch of uploaded images concurrently.
    ///
    /// Each image is rated independently; results are collected in input
    /// order regardless of completion order. Rating failures of any kind
    /// accept the image rather than rejecting it.
    pub async fn validate_images(
        self: Arc<Self>,
        uris: Vec<String>,
        cancel: &CancellationToken,
    ) -> ImageValidationReport {
        let mut handles = Vec::with_capacity(uris.len());
        for uri in uris {
            let this = Arc::clone(&self);
            let cancel = cancel.clone();
            let task_uri = uri.clone();
            let handle =
                tokio::spawn(async move { this.rate_image(&task_uri, &cancel).await });
            handles.push((uri, handle));
        }

        let mut report = ImageValidationReport::default();
        for (uri, handle) in handles {
            let verdict = match handle.await {
                Ok(verdict) => verdict,
                Err(e) => {
                    tracing::error!(%uri, error = %e, "Image rating task failed");
                    unverified_verdict()
                }
            };

            if verdict.is_valid {
                report.valid.push(uri);
            } else {
                report.invalid.push(ImageRejection {
                    uri,
                    reasoning: verdict.reasoning,
                });
            }
        }
        report
    }

    async fn rate_image(&self, uri: &str, cancel: &CancellationToken) -> ImageVerdict {
        if self.validation_limiter.try_admit().is_err() {
            tracing::debug!(%uri, "Rating quota exhausted, accepting unverified");
            return unverified_verdict();
        }

        let prompt = build_rating_prompt(uri);

        let result = self
            .retry
            .run(cancel, retryable, |attempt| {
                let model = self.models.for_attempt(attempt).to_string();
                let prompt = prompt.clone();
                let ai = Arc::clone(&self.ai);
                async move {
                    let raw = ai.generate_content(&model, &prompt, None).await?;
                    Ok::<ImageVerdict, AttemptError>(extractor::extract_verdict(&raw)?)
                }
            })
            .await;

        match result {
            Ok(verdict) => verdict,
            Err(err) => {
                tracing::warn!(%uri, error = %err, "Image rating failed, accepting unverified");
                unverified_verdict()
            }
        }
    }

    fn assemble_ai_set(
        &self,
        request_id: uuid::Uuid,
        model: String,
        ai_outfits: Vec<AiOutfit>,
        request: &RecommendationRequest,
    ) -> RecommendationSet {
        let outfits: Vec<OutfitRecommendation> = ai_outfits
            .into_iter()
            .map(|o| {
                let outfit_links = links::build_links(&o.items.join(" "), Some(&request.prompt));
                OutfitRecommendation {
                    style: o.style,
                    colors: o.colors,
                    items: o.items,
                    accessories: o.accessories,
                    mood: o.mood,
                    reasoning: o.reasoning,
                    links: outfit_links,
                }
            })
            .collect();

        let palette = fallback::palette_union(&outfits);
        let styling_tips = fallback::styling_tips(&request.profile);

        RecommendationSet {
            request_id,
            source: RecommendationSource::AiGenerated { model },
            outfits,
            palette,
            styling_tips,
            generated_at: chrono::Utc::now(),
        }
    }

    fn assemble_fallback_set(
        &self,
        request_id: uuid::Uuid,
        request: &RecommendationRequest,
    ) -> RecommendationSet {
        let mut set = fallback::generate(
            &request.prompt,
            &request.profile,
            request.context.as_ref(),
        );
        set.request_id = request_id;
        for outfit in &mut set.outfits {
            outfit.links = links::build_links(&outfit.items.join(" "), Some(&request.prompt));
        }
        set
    }
}

fn unverified_verdict() -> ImageVerdict {
    ImageVerdict {
        is_valid: true,
        reasoning: "Could not verify the image; accepting it.".to_string(),
    }
}

fn build_generation_prompt(request: &RecommendationRequest) -> String {
    let profile = &request.profile;
    let mut prompt = String::from(
        "You are a fashion stylist. Recommend exactly 2 complete outfits for this user.\n",
    );

    prompt.push_str(&format!(
        "User: gender {}, height {} cm, body type {}, skin tone {}.\n",
        profile.gender.as_str(),
        profile.height_cm,
        profile.body_type.as_str(),
        profile.skin_tone.as_str(),
    ));
    if let Some(weight) = profile.weight_kg {
        prompt.push_str(&format!("Weight: {} kg.\n", weight));
    }

    if let Some(context) = &request.context {
        if let Some(weather) = &context.weather {
            prompt.push_str(&format!(
                "Weather: {}, {} degrees C.\n",
                weather.condition, weather.temperature_c
            ));
        }
        if let Some(location) = &context.location {
            prompt.push_str(&format!(
                "Location: {} ({} climate, {} terrain, {} style).\n",
                location.place, location.climate, location.terrain, location.cultural_style
            ));
        }
    }

    prompt.push_str(&format!("Request: {}\n", request.prompt));
    prompt.push_str(
        "Respond with ONLY a JSON array of 2 objects, each with string field \
         \"style\", string array \"colors\", string array \"items\", string \
         \"accessories\", string \"mood\", and string \"reasoning\". No prose, \
         no markdown fences.",
    );

    prompt
}

fn build_rating_prompt(uri: &str) -> String {
    format!(
        "Assess whether the image at {} shows clothing or a dressed person \
         suitable for outfit analysis. Respond with ONLY a JSON object with \
         boolean field \"isValid\" and string field \"reasoning\".",
        uri
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BodyType, Gender, SkinTone, UserProfile};

    #[test]
    fn test_model_tiers_escalation() {
        let tiers = ModelTiers {
            primary: "styla-pro".to_string(),
            fallback: "styla-lite".to_string(),
        };
        assert_eq!(tiers.for_attempt(1), "styla-pro");
        assert_eq!(tiers.for_attempt(2), "styla-lite");
        assert_eq!(tiers.for_attempt(3), "styla-lite");
    }

    #[test]
    fn test_generation_prompt_carries_profile_and_contract() {
        let request = RecommendationRequest {
            prompt: "date night".to_string(),
            image: None,
            profile: UserProfile {
                height_cm: 158,
                weight_kg: Some(52.0),
                body_type: BodyType::Pear,
                skin_tone: SkinTone::Wheatish,
                gender: Gender::Female,
            },
            context: None,
        };

        let prompt = build_generation_prompt(&request);
        assert!(prompt.contains("158 cm"));
        assert!(prompt.contains("pear"));
        assert!(prompt.contains("wheatish"));
        assert!(prompt.contains("date night"));
        assert!(prompt.contains("JSON array of 2 objects"));
    }

    #[test]
    fn test_rating_prompt_requests_verdict_shape() {
        let prompt = build_rating_prompt("file:///tmp/upload-1.jpg");
        assert!(prompt.contains("upload-1.jpg"));
        assert!(prompt.contains("isValid"));
    }
}

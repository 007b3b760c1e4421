// Integration tests for Styla Engine
//
// Exercises the full orchestrator loop against a mocked AI endpoint.

use mockito::Matcher;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use styla_engine::core::{RateLimiter, RetryPolicy};
use styla_engine::models::{
    BodyType, Gender, RecommendationRequest, RecommendationSource, SkinTone, UserProfile,
};
use styla_engine::services::{AiClient, EngineError, ModelTiers, RequestOrchestrator};

fn test_profile() -> UserProfile {
    UserProfile {
        height_cm: 172,
        weight_kg: Some(68.0),
        body_type: BodyType::Athletic,
        skin_tone: SkinTone::Wheatish,
        gender: Gender::Male,
    }
}

fn test_request(prompt: &str) -> RecommendationRequest {
    RecommendationRequest {
        prompt: prompt.to_string(),
        image: None,
        profile: test_profile(),
        context: None,
    }
}

fn build_orchestrator(
    server_url: &str,
    generation_quota: usize,
    validation_quota: usize,
) -> Arc<RequestOrchestrator> {
    let ai = Arc::new(AiClient::new(server_url.to_string(), "test-key".to_string(), 5));
    Arc::new(RequestOrchestrator::new(
        ai,
        Arc::new(RateLimiter::new(generation_quota, Duration::from_secs(60))),
        Arc::new(RateLimiter::new(validation_quota, Duration::from_secs(60))),
        // Millisecond-scale backoff keeps the retry path fast under test
        RetryPolicy::linear(3, Duration::from_millis(10)),
        ModelTiers {
            primary: "styla-vision-pro".to_string(),
            fallback: "styla-vision-lite".to_string(),
        },
    ))
}

/// Wrap model text in the generateContent response envelope
fn envelope(text: &str) -> String {
    serde_json::json!({
        "candidates": [{ "content": { "parts": [{ "text": text }] } }]
    })
    .to_string()
}

const VALID_OUTFITS: &str = r#"```json
[
  {"style": "Weekend Easy", "colors": ["white", "blue"],
   "items": ["white crew t-shirt", "blue slim jeans", "white sneakers"],
   "accessories": "Canvas cap", "mood": "Relaxed",
   "reasoning": "A white tee over blue denim suits an athletic build."},
  {"style": "Layered Street", "colors": ["olive", "black"],
   "items": ["olive overshirt", "black joggers"],
   "accessories": "Crossbody sling", "mood": "Street-smart",
   "reasoning": "An olive overshirt adds structure without formality."}
]
```"#;

#[tokio::test]
async fn test_ai_result_used_when_parsable() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Regex(r"^/v1beta/models/.*".to_string()))
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(VALID_OUTFITS))
        .expect(1)
        .create_async()
        .await;

    let orchestrator = build_orchestrator(&server.url(), 10, 10);
    let cancel = CancellationToken::new();

    let set = orchestrator
        .generate(test_request("weekend outfit"), &cancel)
        .await
        .unwrap();

    mock.assert_async().await;

    assert_eq!(
        set.source,
        RecommendationSource::AiGenerated {
            model: "styla-vision-pro".to_string()
        }
    );
    assert_eq!(set.outfits.len(), 2);
    for outfit in &set.outfits {
        assert!(!outfit.items.is_empty());
        assert!(!outfit.links.is_empty());
    }
    assert!(!set.palette.is_empty() && set.palette.len() <= 4);
    assert!(set.styling_tips.len() >= 4 && set.styling_tips.len() <= 6);
}

#[tokio::test]
async fn test_malformed_responses_exhaust_three_attempts_then_fall_back() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Regex(r"^/v1beta/models/.*".to_string()))
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope("Here are some ideas, but in prose only."))
        .expect(3)
        .create_async()
        .await;

    let orchestrator = build_orchestrator(&server.url(), 10, 10);
    let cancel = CancellationToken::new();

    let started = std::time::Instant::now();
    let set = orchestrator
        .generate(test_request("office look"), &cancel)
        .await
        .unwrap();
    let elapsed = started.elapsed();

    // Exactly three attempts before degrading, with the standard backoff
    // between them (10 ms then 20 ms at the test policy's base)
    mock.assert_async().await;
    assert!(elapsed >= Duration::from_millis(30), "elapsed {:?}", elapsed);

    assert_eq!(set.source, RecommendationSource::RuleBased);
    assert_eq!(set.outfits.len(), 2);
    for outfit in &set.outfits {
        assert!(!outfit.items.is_empty());
        assert!(!outfit.links.is_empty());
    }
}

#[tokio::test]
async fn test_throttled_service_retries_with_backoff_then_falls_back() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Regex(r"^/v1beta/models/.*".to_string()))
        .match_query(Matcher::Any)
        .with_status(429)
        .with_body("quota exceeded")
        .expect(3)
        .create_async()
        .await;

    let orchestrator = build_orchestrator(&server.url(), 10, 10);
    let cancel = CancellationToken::new();

    let started = std::time::Instant::now();
    let set = orchestrator
        .generate(test_request("party tonight"), &cancel)
        .await
        .unwrap();
    let elapsed = started.elapsed();

    mock.assert_async().await;
    assert_eq!(set.source, RecommendationSource::RuleBased);

    // Backoff between attempts grows linearly (10 ms then 20 ms at the
    // test policy's base; 2 s then 4 s at the production default). The
    // curve is linear, not exponential.
    assert!(elapsed >= Duration::from_millis(30), "elapsed {:?}", elapsed);
}

#[tokio::test]
async fn test_fatal_api_error_skips_remaining_attempts() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Regex(r"^/v1beta/models/.*".to_string()))
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body("invalid request")
        .expect(1)
        .create_async()
        .await;

    let orchestrator = build_orchestrator(&server.url(), 10, 10);
    let cancel = CancellationToken::new();

    let set = orchestrator
        .generate(test_request("something nice"), &cancel)
        .await
        .unwrap();

    // A non-retryable error stops the loop after a single attempt
    mock.assert_async().await;
    assert_eq!(set.source, RecommendationSource::RuleBased);
}

#[tokio::test]
async fn test_rate_limited_admission_makes_no_http_call() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Regex(r"^/v1beta/models/.*".to_string()))
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(envelope(VALID_OUTFITS))
        .expect(0)
        .create_async()
        .await;

    // Zero-capacity generation limiter denies at admission
    let orchestrator = build_orchestrator(&server.url(), 0, 10);
    let cancel = CancellationToken::new();

    let result = orchestrator
        .generate(test_request("anything"), &cancel)
        .await;

    assert!(matches!(result, Err(EngineError::RateLimited { .. })));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_cancelled_request_degrades_without_spending_attempts() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Regex(r"^/v1beta/models/.*".to_string()))
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(envelope(VALID_OUTFITS))
        .expect(0)
        .create_async()
        .await;

    let orchestrator = build_orchestrator(&server.url(), 10, 10);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let set = orchestrator
        .generate(test_request("abandoned request"), &cancel)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(set.source, RecommendationSource::RuleBased);
}

#[tokio::test]
async fn test_image_validation_preserves_order_and_rejects_on_verdict() {
    let mut server = mockito::Server::new_async().await;

    // The rating prompt embeds the image URI, so each image gets its own mock
    let reject_mock = server
        .mock("POST", Matcher::Regex(r"^/v1beta/models/.*".to_string()))
        .match_query(Matcher::Any)
        .match_body(Matcher::Regex("landscape.jpg".to_string()))
        .with_status(200)
        .with_body(envelope(
            r#"{"isValid": false, "reasoning": "The image shows scenery, not clothing."}"#,
        ))
        .create_async()
        .await;
    let accept_mock = server
        .mock("POST", Matcher::Regex(r"^/v1beta/models/.*".to_string()))
        .match_query(Matcher::Any)
        .match_body(Matcher::Regex("outfit.jpg".to_string()))
        .with_status(200)
        .with_body(envelope(r#"{"isValid": true, "reasoning": "Clear outfit photo."}"#))
        .create_async()
        .await;

    let orchestrator = build_orchestrator(&server.url(), 10, 10);
    let cancel = CancellationToken::new();

    let report = orchestrator
        .validate_images(
            vec![
                "https://cdn.test/outfit.jpg".to_string(),
                "https://cdn.test/landscape.jpg".to_string(),
            ],
            &cancel,
        )
        .await;

    reject_mock.assert_async().await;
    accept_mock.assert_async().await;

    assert_eq!(report.valid, vec!["https://cdn.test/outfit.jpg".to_string()]);
    assert_eq!(report.invalid.len(), 1);
    assert_eq!(report.invalid[0].uri, "https://cdn.test/landscape.jpg");
    assert!(report.invalid[0].reasoning.contains("scenery"));
}

#[tokio::test]
async fn test_image_validation_degrades_to_acceptance() {
    let mut server = mockito::Server::new_async().await;
    // Rating endpoint is hard down
    let _mock = server
        .mock("POST", Matcher::Regex(r"^/v1beta/models/.*".to_string()))
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let orchestrator = build_orchestrator(&server.url(), 10, 10);
    let cancel = CancellationToken::new();

    let report = orchestrator
        .validate_images(vec!["https://cdn.test/a.jpg".to_string()], &cancel)
        .await;

    // Failure accepts the image rather than rejecting it
    assert_eq!(report.valid, vec!["https://cdn.test/a.jpg".to_string()]);
    assert!(report.invalid.is_empty());
}

#[tokio::test]
async fn test_exhausted_validation_quota_accepts_unverified() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Regex(r"^/v1beta/models/.*".to_string()))
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(envelope(r#"{"isValid": true, "reasoning": "ok"}"#))
        .expect(0)
        .create_async()
        .await;

    // Zero-capacity validation limiter denies every rating call
    let orchestrator = build_orchestrator(&server.url(), 10, 0);
    let cancel = CancellationToken::new();

    let report = orchestrator
        .validate_images(
            vec![
                "https://cdn.test/a.jpg".to_string(),
                "https://cdn.test/b.jpg".to_string(),
            ],
            &cancel,
        )
        .await;

    mock.assert_async().await;
    assert_eq!(
        report.valid,
        vec![
            "https://cdn.test/a.jpg".to_string(),
            "https://cdn.test/b.jpg".to_string()
        ]
    );
    assert!(report.invalid.is_empty());
}

#[tokio::test]
async fn test_second_attempt_downgrades_model_tier() {
    let mut server = mockito::Server::new_async().await;

    // Primary tier responds with prose; the downgraded tier parses
    let primary_mock = server
        .mock("POST", Matcher::Regex(r"styla-vision-pro".to_string()))
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(envelope("No JSON from the primary tier this time."))
        .expect(1)
        .create_async()
        .await;
    let fallback_mock = server
        .mock("POST", Matcher::Regex(r"styla-vision-lite".to_string()))
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(envelope(VALID_OUTFITS))
        .expect(1)
        .create_async()
        .await;

    let orchestrator = build_orchestrator(&server.url(), 10, 10);
    let cancel = CancellationToken::new();

    let set = orchestrator
        .generate(test_request("dinner plans"), &cancel)
        .await
        .unwrap();

    primary_mock.assert_async().await;
    fallback_mock.assert_async().await;

    assert_eq!(
        set.source,
        RecommendationSource::AiGenerated {
            model: "styla-vision-lite".to_string()
        }
    );
}

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while extracting structured data from AI text
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no JSON payload found in response text")]
    NoJsonPayload,

    #[error("malformed JSON payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("payload field must not be empty: {0}")]
    EmptyField(&'static str),
}

/// Narrative lead-ins the model sometimes prepends to its JSON payload
const NARRATIVE_PREFIXES: &[&str] = &[
    "sure",
    "certainly",
    "of course",
    "okay",
    "here is",
    "here's",
    "here are",
    "below is",
    "i'll create",
    "i will create",
    "i have created",
];

/// One outfit as returned by the AI, before links are attached
#[derive(Debug, Clone, Deserialize)]
pub struct AiOutfit {
    pub style: String,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub accessories: String,
    #[serde(default)]
    pub mood: String,
    #[serde(default)]
    pub reasoning: String,
}

/// Recover the embedded JSON value from a raw model response.
///
/// Strips markdown code fences and known narrative lead-ins, then takes the
/// substring from the first `[`/`{` to the last matching `]`/`}` and parses
/// it strictly. There is no partial recovery: anything that fails here fails
/// the whole attempt.
pub fn extract_json(raw: &str) -> Result<serde_json::Value, ExtractError> {
    let defenced = strip_fences(raw);
    let payload = isolate_payload(&defenced)?;
    Ok(serde_json::from_str(payload)?)
}

/// Extract the outfit list the generation prompt asks for.
///
/// Accepts either a JSON array of outfit objects or a single object.
/// Each outfit must carry non-empty items, colors and reasoning.
pub fn extract_outfits(raw: &str) -> Result<Vec<AiOutfit>, ExtractError> {
    let value = extract_json(raw)?;
    let outfits: Vec<AiOutfit> = match value {
        serde_json::Value::Array(_) => serde_json::from_value(value)?,
        other => vec![serde_json::from_value(other)?],
    };

    for outfit in &outfits {
        if outfit.items.is_empty() {
            return Err(ExtractError::EmptyField("items"));
        }
        if outfit.colors.is_empty() {
            return Err(ExtractError::EmptyField("colors"));
        }
        if outfit.reasoning.trim().is_empty() {
            return Err(ExtractError::EmptyField("reasoning"));
        }
    }

    Ok(outfits)
}

/// Extract the `{ isValid, reasoning }` verdict of the image rating prompt
pub fn extract_verdict(raw: &str) -> Result<crate::models::ImageVerdict, ExtractError> {
    let value = extract_json(raw)?;
    Ok(serde_json::from_value(value)?)
}

fn strip_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "")
}

fn isolate_payload(text: &str) -> Result<&str, ExtractError> {
    let stripped = strip_narrative_prefixes(text);

    let open = stripped
        .find(|c| c == '[' || c == '{')
        .ok_or(ExtractError::NoJsonPayload)?;
    let closer = match stripped.as_bytes()[open] {
        b'[' => ']',
        _ => '}',
    };
    let close = stripped.rfind(closer).ok_or(ExtractError::NoJsonPayload)?;
    if close < open {
        return Err(ExtractError::NoJsonPayload);
    }

    Ok(&stripped[open..=close])
}

fn strip_narrative_prefixes(text: &str) -> &str {
    let mut rest = text.trim_start();
    loop {
        let lower = rest.to_lowercase();
        let matched = NARRATIVE_PREFIXES
            .iter()
            .find(|prefix| lower.starts_with(*prefix));

        match matched {
            Some(prefix) => {
                rest = rest[prefix.len()..].trim_start_matches([',', ':', '!', '.']);
                rest = rest.trim_start();
            }
            None => return rest,
        }
    }
}

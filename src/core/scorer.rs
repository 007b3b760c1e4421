use crate::models::{CatalogEntry, CategoryKey, Gender, ScoredCandidate, UserProfile};

/// Minimum score a best match must reach before exact-score filtering
/// applies; below it the looser wildcard pass runs instead.
const CONFIDENT_MATCH_THRESHOLD: u32 = 2;

/// Score awarded when any attribute set on an entry holds the wildcard,
/// deliberately above a single attribute match so general-purpose entries
/// survive as fallback candidates.
const WILDCARD_BONUS: u32 = 2;

fn contains_ci(set: &[String], value: &str) -> bool {
    set.iter().any(|v| v.eq_ignore_ascii_case(value))
}

/// Score one catalog entry against the user field-set
pub fn score_entry(entry: &CatalogEntry, profile: &UserProfile, key: &CategoryKey) -> u32 {
    let mut score = 0;

    if contains_ci(&entry.heights, profile.height_bucket().as_str()) {
        score += 1;
    }
    if contains_ci(&entry.body_types, profile.body_type.as_str()) {
        score += 1;
    }
    if contains_ci(&entry.skin_tones, profile.skin_tone.as_str()) {
        score += 1;
    }

    // Gender and category share one point: either signal qualifies
    let gender = if key.gender != Gender::Unknown {
        key.gender
    } else {
        profile.gender
    };
    if entry.category.eq_ignore_ascii_case(&key.category)
        || contains_ci(&entry.genders, gender.as_str())
    {
        score += 1;
    }

    if entry.has_wildcard() {
        score += WILDCARD_BONUS;
    }

    score
}

/// Filter a catalog down to the best-fitting candidates.
///
/// Returns exactly the entries achieving the maximum score when that score
/// is confident (>= 2, ties all included). Below that, falls back to every
/// wildcard-bearing entry regardless of score. An empty result means no
/// confident match, not an error.
pub fn filter(
    catalog: &[CatalogEntry],
    profile: &UserProfile,
    key: &CategoryKey,
) -> Vec<ScoredCandidate> {
    let scored: Vec<ScoredCandidate> = catalog
        .iter()
        .map(|entry| ScoredCandidate {
            score: score_entry(entry, profile, key),
            entry: entry.clone(),
        })
        .collect();

    let max_score = scored.iter().map(|c| c.score).max().unwrap_or(0);

    if max_score >= CONFIDENT_MATCH_THRESHOLD {
        scored.into_iter().filter(|c| c.score == max_score).collect()
    } else {
        scored
            .into_iter()
            .filter(|c| c.entry.has_wildcard())
            .collect()
    }
}

use crate::models::ShoppingLink;

/// Clothing nouns recognized when extracting purchasable key items
const CLOTHING_NOUNS: &[&str] = &[
    "t-shirt", "tshirt", "tee", "shirt", "polo", "kurta", "kurti", "saree", "lehenga",
    "dress", "sundress", "gown", "top", "blouse", "sweater", "cardigan", "hoodie",
    "sweatshirt", "jacket", "blazer", "coat", "overcoat", "overshirt", "windcheater",
    "jeans", "denim", "trousers", "chinos", "pants", "palazzos", "leggings", "joggers",
    "skirt", "shorts", "jumpsuit", "dupatta", "scarf", "sneakers", "loafers", "boots",
    "heels", "sandals", "flats", "suit", "waistcoat",
];

/// Color words recognized when extracting purchasable key items
const COLOR_WORDS: &[&str] = &[
    "black", "white", "navy", "blue", "red", "green", "olive", "emerald", "beige",
    "brown", "tan", "camel", "grey", "gray", "charcoal", "maroon", "burgundy", "pink",
    "blush", "yellow", "mustard", "orange", "rust", "cream", "ivory", "teal",
    "turquoise", "aqua", "lavender", "purple", "khaki", "pastel", "gold", "silver",
];

/// Connector words dropped during normalization
const CONNECTOR_WORDS: &[&str] = &["with", "and", "paired"];

const INSPIRATION_PLATFORMS: &[(&str, &str)] = &[
    ("Pinterest", "https://www.pinterest.com/search/pins/?q="),
    ("Instagram", "https://www.instagram.com/explore/search/keyword/?q="),
];

const PURCHASE_PLATFORMS: &[(&str, &str)] = &[
    ("Myntra", "https://www.myntra.com/search?q="),
    ("Amazon", "https://www.amazon.in/s?k="),
    ("Flipkart", "https://www.flipkart.com/search?q="),
];

/// Maximum prompt tokens appended to inspiration queries
const MAX_PROMPT_TOKENS: usize = 8;

/// Lowercase the text, drop punctuation and connector words, collapse spaces
pub fn normalize_outfit_text(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '\'' { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .filter(|token| !CONNECTOR_WORDS.contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_noun(token: &str) -> bool {
    CLOTHING_NOUNS.contains(&token)
}

fn is_color(token: &str) -> bool {
    COLOR_WORDS.contains(&token)
}

/// Extract one or two key item phrases from normalized outfit text.
///
/// Scans adjacent token pairs for color+noun or noun+color, then falls back
/// to the first recognized noun, the first recognized color, and finally the
/// first token.
pub fn extract_key_items(normalized: &str) -> Vec<String> {
    let tokens: Vec<&str> = normalized.split_whitespace().collect();
    let mut used = vec![false; tokens.len()];
    let mut phrases: Vec<String> = Vec::new();

    // Color-before-noun is the dominant word order, so it gets first claim
    // on tokens; both tokens of a matched pair are consumed so one garment
    // never bleeds into the next phrase.
    let mut i = 0;
    while i + 1 < tokens.len() && phrases.len() < 2 {
        if !used[i] && !used[i + 1] && is_color(tokens[i]) && is_noun(tokens[i + 1]) {
            phrases.push(format!("{} {}", tokens[i], tokens[i + 1]));
            used[i] = true;
            used[i + 1] = true;
            i += 2;
        } else {
            i += 1;
        }
    }

    let mut i = 0;
    while i + 1 < tokens.len() && phrases.len() < 2 {
        if !used[i] && !used[i + 1] && is_noun(tokens[i]) && is_color(tokens[i + 1]) {
            let phrase = format!("{} {}", tokens[i + 1], tokens[i]);
            if !phrases.contains(&phrase) {
                phrases.push(phrase);
            }
            used[i] = true;
            used[i + 1] = true;
            i += 2;
        } else {
            i += 1;
        }
    }

    if !phrases.is_empty() {
        return phrases;
    }

    if let Some(noun) = tokens.iter().find(|t| is_noun(t)) {
        return vec![noun.to_string()];
    }
    if let Some(color) = tokens.iter().find(|t| is_color(t)) {
        return vec![color.to_string()];
    }
    match tokens.first() {
        Some(first) => vec![first.to_string()],
        None => vec!["outfit".to_string()],
    }
}

fn encode_into(template: &str, query: &str) -> String {
    format!("{}{}", template, urlencoding::encode(query))
}

/// Build inspiration and purchase links for an outfit.
///
/// Inspiration platforms get the full normalized outfit text (plus up to
/// eight prompt tokens); purchase platforms get only the one or two key
/// item phrases, since marketplaces return poor results for multi-item
/// queries.
pub fn build_links(outfit_text: &str, prompt: Option<&str>) -> Vec<ShoppingLink> {
    let normalized = normalize_outfit_text(outfit_text);

    let mut inspiration_query = normalized.clone();
    if let Some(p) = prompt {
        let extra = normalize_outfit_text(p)
            .split_whitespace()
            .take(MAX_PROMPT_TOKENS)
            .collect::<Vec<_>>()
            .join(" ");
        if !extra.is_empty() {
            inspiration_query.push(' ');
            inspiration_query.push_str(&extra);
        }
    }
    let inspiration_query = inspiration_query.trim().to_string();

    let key_items = extract_key_items(&normalized);
    let purchase_query = key_items.join(" ");

    let mut links: Vec<ShoppingLink> = Vec::with_capacity(
        INSPIRATION_PLATFORMS.len() + PURCHASE_PLATFORMS.len(),
    );

    for (name, template) in INSPIRATION_PLATFORMS {
        links.push(ShoppingLink {
            platform: name.to_string(),
            query: inspiration_query.clone(),
            url: encode_into(template, &inspiration_query),
            description: format!("Outfit inspiration on {}", name),
        });
    }

    for (name, template) in PURCHASE_PLATFORMS {
        links.push(ShoppingLink {
            platform: name.to_string(),
            query: purchase_query.clone(),
            url: encode_into(template, &purchase_query),
            description: format!("Shop {} on {}", key_items.join(" and "), name),
        });
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization_drops_connectors() {
        let normalized =
            normalize_outfit_text("White shirt paired with blue jeans, and white sneakers.");
        assert_eq!(normalized, "white shirt blue jeans white sneakers");
    }

    #[test]
    fn test_key_items_color_noun_adjacency() {
        let items = extract_key_items("white shirt blue jeans white sneakers");
        assert_eq!(items, vec!["white shirt", "blue jeans"]);
    }

    #[test]
    fn test_key_items_noun_color_adjacency() {
        let items = extract_key_items("kurta mustard flowing cut");
        assert_eq!(items, vec!["mustard kurta"]);
    }

    #[test]
    fn test_key_items_fallback_chain() {
        // No adjacency: lone recognized noun wins
        assert_eq!(extract_key_items("something hoodie something"), vec!["hoodie"]);
        // No noun: first color
        assert_eq!(extract_key_items("vivid maroon everything"), vec!["maroon"]);
        // Neither: first token
        assert_eq!(extract_key_items("bohemian vibes"), vec!["bohemian"]);
        // Empty text still yields a query
        assert_eq!(extract_key_items(""), vec!["outfit"]);
    }

    #[test]
    fn test_purchase_links_never_carry_full_outfit() {
        let links = build_links(
            "white linen shirt with beige shorts and espadrilles",
            Some("beach vacation in july"),
        );

        for link in links
            .iter()
            .filter(|l| l.platform != "Pinterest" && l.platform != "Instagram")
        {
            // Only the key item phrase, not the whole outfit
            assert_eq!(link.query, "beige shorts");
            assert!(!link.query.contains("espadrilles"));
        }
    }

    #[test]
    fn test_inspiration_links_carry_full_outfit_and_prompt() {
        let links = build_links(
            "olive overshirt with black joggers",
            Some("casual friday look for work"),
        );

        let pinterest = links.iter().find(|l| l.platform == "Pinterest").unwrap();
        assert!(pinterest.query.contains("olive overshirt"));
        assert!(pinterest.query.contains("black joggers"));
        assert!(pinterest.query.contains("casual friday"));
    }

    #[test]
    fn test_urls_embed_encoded_query() {
        let links = build_links("navy blazer", None);
        for link in &links {
            let encoded = urlencoding::encode(&link.query).into_owned();
            assert!(link.url.ends_with(&encoded), "{} !~ {}", link.url, encoded);
        }
    }

    #[test]
    fn test_prompt_tokens_capped_at_eight() {
        let long_prompt = "one two three four five six seven eight nine ten";
        let links = build_links("grey tee", Some(long_prompt));
        let pinterest = links.iter().find(|l| l.platform == "Pinterest").unwrap();
        assert!(pinterest.query.contains("eight"));
        assert!(!pinterest.query.contains("nine"));
    }

    #[test]
    fn test_one_link_per_platform() {
        let links = build_links("black jumpsuit", None);
        assert_eq!(links.len(), 5);
        let platforms: Vec<&str> = links.iter().map(|l| l.platform.as_str()).collect();
        assert_eq!(
            platforms,
            vec!["Pinterest", "Instagram", "Myntra", "Amazon", "Flipkart"]
        );
    }
}

// Core algorithm exports
pub mod extractor;
pub mod fallback;
pub mod limiter;
pub mod links;
pub mod retry;
pub mod scorer;

pub use extractor::{extract_json, extract_outfits, extract_verdict, AiOutfit, ExtractError};
pub use fallback::{classify_theme, palette_union, styling_tips, Theme};
pub use limiter::RateLimiter;
pub use links::{build_links, extract_key_items, normalize_outfit_text};
pub use retry::{RetryError, RetryPolicy};
pub use scorer::{filter, score_entry};

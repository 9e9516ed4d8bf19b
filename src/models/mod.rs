pub mod content;
pub mod cover;
pub mod detail;
pub mod mood;

pub use content::{
    BundleStatus, ContentId, ContentItem, ContentKind, FilmAttributes, GameAttributes, ImageRef,
    ItemAttributes, MusicAttributes, RecommendationBundle, Recommendations,
};
pub use cover::{Cover, CoverCategory, CoverKind};
pub use detail::{DetailAttributes, DetailQuery, DetailRecord, FilmDetail, GameDetail, MusicDetail};
pub use mood::{EmotionalState, MoodLabel};

/// Literal substituted for optional textual fields a provider left out
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder artwork per content kind
pub const GAME_PLACEHOLDER: &str = "🎮";
pub const FILM_PLACEHOLDER: &str = "🎬";
pub const MUSIC_PLACEHOLDER: &str = "🎵";
pub const SERIES_PLACEHOLDER: &str = "📺";

/// Returns the value, or "N/A" when absent or blank
pub fn or_not_available(value: Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => NOT_AVAILABLE.to_string(),
    }
}

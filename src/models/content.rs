use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

use crate::error::AppError;

use super::MoodLabel;

/// The three kinds of content a bundle carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Game,
    Film,
    Music,
}

impl ContentKind {
    pub const ALL: [ContentKind; 3] = [ContentKind::Game, ContentKind::Film, ContentKind::Music];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Game => "game",
            ContentKind::Film => "film",
            ContentKind::Music => "music",
        }
    }
}

impl Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = AppError;

    /// Accepts the canonical names plus the slot names used by older clients
    /// (`jugar`, `ver`, `escuchar`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "game" | "jugar" => Ok(ContentKind::Game),
            "film" | "film_or_series" | "ver" => Ok(ContentKind::Film),
            "music" | "music_album" | "escuchar" => Ok(ContentKind::Music),
            other => Err(AppError::InvalidInput(format!(
                "Unknown content kind: {}",
                other
            ))),
        }
    }
}

/// Provider-scoped identifier: numeric for TMDB/RAWG, a composite string key
/// for Last.fm albums. Unique only within one kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentId {
    Numeric(u64),
    Key(String),
}

impl ContentId {
    /// Interprets a raw path segment, preferring the numeric form
    pub fn parse(raw: &str) -> Self {
        raw.parse::<u64>()
            .map(ContentId::Numeric)
            .unwrap_or_else(|_| ContentId::Key(raw.to_string()))
    }
}

impl Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentId::Numeric(id) => write!(f, "{}", id),
            ContentId::Key(key) => write!(f, "{}", key),
        }
    }
}

/// Artwork reference: a real URL, or a symbolic placeholder when the
/// provider has no image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ImageRef {
    Url(String),
    Placeholder(String),
}

impl ImageRef {
    /// Uses `url` when it is present and non-empty, the placeholder otherwise
    pub fn url_or(url: Option<String>, placeholder: &str) -> Self {
        match url {
            Some(url) if !url.trim().is_empty() => ImageRef::Url(url),
            _ => ImageRef::Placeholder(placeholder.to_string()),
        }
    }

    pub fn placeholder(symbol: &str) -> Self {
        ImageRef::Placeholder(symbol.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameAttributes {
    /// Comma-joined genre names
    pub genre: String,
    pub platforms: Vec<String>,
    pub developer: String,
    pub release_year: Option<i32>,
    pub rating: Option<f64>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilmAttributes {
    pub year: Option<i32>,
    pub duration: String,
    pub genres: Vec<String>,
    pub description: String,
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MusicAttributes {
    pub artist: String,
    pub year: Option<i32>,
    pub genres: Vec<String>,
    pub url: Option<String>,
    pub playcount: Option<u64>,
}

/// Kind-specific part of a [`ContentItem`]; its variant is the item's kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ItemAttributes {
    Game(GameAttributes),
    Film(FilmAttributes),
    Music(MusicAttributes),
}

/// A normalized recommendation, whatever catalog (or fallback table)
/// produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ContentId,
    pub title: String,
    pub image: ImageRef,
    pub moods: Vec<MoodLabel>,
    #[serde(flatten)]
    pub attributes: ItemAttributes,
}

impl ContentItem {
    pub fn kind(&self) -> ContentKind {
        match self.attributes {
            ItemAttributes::Game(_) => ContentKind::Game,
            ItemAttributes::Film(_) => ContentKind::Film,
            ItemAttributes::Music(_) => ContentKind::Music,
        }
    }
}

/// One optional item per content kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationBundle {
    pub game: Option<ContentItem>,
    pub film: Option<ContentItem>,
    pub music: Option<ContentItem>,
}

impl RecommendationBundle {
    pub fn new(game: ContentItem, film: ContentItem, music: ContentItem) -> Self {
        Self {
            game: Some(game),
            film: Some(film),
            music: Some(music),
        }
    }

    pub fn slot(&self, kind: ContentKind) -> Option<&ContentItem> {
        match kind {
            ContentKind::Game => self.game.as_ref(),
            ContentKind::Film => self.film.as_ref(),
            ContentKind::Music => self.music.as_ref(),
        }
    }

    fn slot_mut(&mut self, kind: ContentKind) -> &mut Option<ContentItem> {
        match kind {
            ContentKind::Game => &mut self.game,
            ContentKind::Film => &mut self.film,
            ContentKind::Music => &mut self.music,
        }
    }

    /// True when every kind has an item
    pub fn is_complete(&self) -> bool {
        ContentKind::ALL.iter().all(|kind| self.slot(*kind).is_some())
    }

    /// Applies the outcome of a reroll. A `None` outcome (failed reroll)
    /// leaves the slot as it was. Returns whether the slot changed.
    pub fn apply_reroll(&mut self, kind: ContentKind, rerolled: Option<ContentItem>) -> bool {
        match rerolled {
            Some(item) => {
                *self.slot_mut(kind) = Some(item);
                true
            }
            None => false,
        }
    }
}

/// Where a bundle came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleStatus {
    Live,
    Fallback,
}

/// Result of one aggregation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    pub mood: MoodLabel,
    pub status: BundleStatus,
    pub bundle: RecommendationBundle,
}

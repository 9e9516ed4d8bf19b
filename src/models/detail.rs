use serde::{Deserialize, Serialize};

use super::{ContentId, ContentKind, ImageRef};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameDetail {
    pub genre: String,
    pub platforms: Vec<String>,
    pub developer: String,
    pub publisher: String,
    pub release_date: String,
    /// Age rating label, e.g. "M (Mature)"
    pub esrb_rating: String,
    pub metacritic: Option<u32>,
    pub screenshots: Vec<String>,
    pub tags: Vec<String>,
    pub website: Option<String>,
    pub reddit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilmDetail {
    pub year: Option<i32>,
    pub duration: String,
    pub genres: Vec<String>,
    pub director: String,
    pub studio: String,
    pub country: String,
    pub language: String,
    /// Average audience score, 0-10
    pub rating: Option<f64>,
    pub cast: Vec<String>,
    pub backdrop: Option<String>,
    /// Provider video key or URL of the trailer
    pub trailer: Option<String>,
    /// Streaming services carrying the title
    pub platforms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MusicDetail {
    pub artist: String,
    pub year: Option<i32>,
    pub genres: Vec<String>,
    pub duration: String,
    pub tracks: Option<u32>,
    pub top_tracks: Vec<String>,
    pub url: Option<String>,
    pub playcount: Option<u64>,
    pub label: String,
    pub platforms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DetailAttributes {
    Game(GameDetail),
    Film(FilmDetail),
    Music(MusicDetail),
}

/// Fully detailed record for the detail view. Only produced by the detail
/// resolver (live catalog or static table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub id: ContentId,
    pub title: String,
    pub image: ImageRef,
    pub description: String,
    #[serde(flatten)]
    pub attributes: DetailAttributes,
}

impl DetailRecord {
    pub fn kind(&self) -> ContentKind {
        match self.attributes {
            DetailAttributes::Game(_) => ContentKind::Game,
            DetailAttributes::Film(_) => ContentKind::Film,
            DetailAttributes::Music(_) => ContentKind::Music,
        }
    }
}

/// What a catalog needs to locate one detailed record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailQuery {
    /// Lookup by provider id (TMDB, RAWG)
    Id(ContentId),
    /// Lookup by artist and album title (Last.fm)
    Album { artist: String, album: String },
}

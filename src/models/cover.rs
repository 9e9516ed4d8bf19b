use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::ContentId;

/// Kind of artwork shown in the cover showcase. Films and series are kept
/// apart here because they come from different catalog endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverKind {
    Movie,
    Series,
    Game,
    Music,
}

impl CoverKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoverKind::Movie => "movie",
            CoverKind::Series => "series",
            CoverKind::Game => "game",
            CoverKind::Music => "music",
        }
    }
}

/// Popular content artwork
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cover {
    pub id: ContentId,
    pub title: String,
    pub image: Option<String>,
    pub kind: CoverKind,
    pub year: Option<i32>,
    pub rating: f64,
    pub genre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
}

/// Category requested from the showcase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverCategory {
    Movies,
    Series,
    Games,
    Music,
    Mixed,
}

impl CoverCategory {
    /// The single cover kind behind a category, `None` for `Mixed`
    pub fn cover_kind(&self) -> Option<CoverKind> {
        match self {
            CoverCategory::Movies => Some(CoverKind::Movie),
            CoverCategory::Series => Some(CoverKind::Series),
            CoverCategory::Games => Some(CoverKind::Game),
            CoverCategory::Music => Some(CoverKind::Music),
            CoverCategory::Mixed => None,
        }
    }
}

impl FromStr for CoverCategory {
    type Err = std::convert::Infallible;

    /// Unknown categories are served as `Mixed`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "movies" => CoverCategory::Movies,
            "series" => CoverCategory::Series,
            "games" => CoverCategory::Games,
            "music" => CoverCategory::Music,
            _ => CoverCategory::Mixed,
        })
    }
}

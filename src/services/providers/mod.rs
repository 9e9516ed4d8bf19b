//! Catalog provider abstraction
//!
//! One provider per content kind (RAWG for games, TMDB for films and series,
//! Last.fm for albums). Each provider absorbs its catalog's schema,
//! pagination and id format, and hands back only normalized items.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::{ContentItem, ContentKind, Cover, CoverKind, DetailQuery, DetailRecord, MoodLabel},
};

pub mod lastfm;
pub mod rawg;
pub mod tmdb;

pub use lastfm::LastfmProvider;
pub use rawg::RawgProvider;
pub use tmdb::TmdbProvider;

/// Trait for content catalogs
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Items matching a mood, one provider page at a time (pages start at 1)
    ///
    /// Fails with `CatalogUnavailable` when the provider cannot be reached,
    /// answers with an error status, or the payload has no result list.
    async fn search_by_mood(&self, mood: MoodLabel, page: u32) -> AppResult<Vec<ContentItem>>;

    /// One fully detailed record
    ///
    /// `Ok(None)` when the provider reports the item does not exist.
    async fn get_details(&self, query: &DetailQuery) -> AppResult<Option<DetailRecord>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Mood search over TV series. Series share the film slot but never feed a
/// bundle; they are only listed on request.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SeriesSource: Send + Sync {
    async fn search_series_by_mood(&self, mood: MoodLabel, page: u32)
        -> AppResult<Vec<ContentItem>>;
}

/// Source of popular-content artwork
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CoverSource: Send + Sync {
    async fn popular_covers(&self, kind: CoverKind) -> AppResult<Vec<Cover>>;
}

/// One catalog per content kind
#[derive(Clone)]
pub struct CatalogSet {
    pub game: Arc<dyn CatalogProvider>,
    pub film: Arc<dyn CatalogProvider>,
    pub music: Arc<dyn CatalogProvider>,
}

impl CatalogSet {
    pub fn for_kind(&self, kind: ContentKind) -> &Arc<dyn CatalogProvider> {
        match kind {
            ContentKind::Game => &self.game,
            ContentKind::Film => &self.film,
            ContentKind::Music => &self.music,
        }
    }
}

/// Artwork sources behind the cover showcase. The film source serves both
/// movies and series.
#[derive(Clone)]
pub struct CoverSources {
    pub film: Arc<dyn CoverSource>,
    pub game: Arc<dyn CoverSource>,
    pub music: Arc<dyn CoverSource>,
}

impl CoverSources {
    pub fn for_kind(&self, kind: CoverKind) -> &Arc<dyn CoverSource> {
        match kind {
            CoverKind::Movie | CoverKind::Series => &self.film,
            CoverKind::Game => &self.game,
            CoverKind::Music => &self.music,
        }
    }
}

/// Extracts the year from an ISO date (`2016-08-26`) or any string that
/// starts with a four digit year.
pub(crate) fn year_from_date(date: Option<&str>) -> Option<i32> {
    let date = date?.trim();
    if let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(parsed.year());
    }
    date.get(..4).and_then(|y| y.parse().ok())
}

/// Returns the array at `pointer`, or fails with `CatalogUnavailable` when the
/// payload does not carry it.
pub(crate) fn require_list<'a>(
    payload: &'a Value,
    pointer: &str,
    provider: &str,
) -> AppResult<&'a Vec<Value>> {
    payload
        .pointer(pointer)
        .and_then(Value::as_array)
        .ok_or_else(|| {
            AppError::CatalogUnavailable(format!(
                "Invalid {} response format: missing {}",
                provider, pointer
            ))
        })
}

/// Decodes every entry it can, skipping the ones that do not match `T`
pub(crate) fn decode_entries<T: serde::de::DeserializeOwned>(
    entries: &[Value],
    provider: &str,
) -> Vec<T> {
    entries
        .iter()
        .filter_map(|entry| match serde_json::from_value::<T>(entry.clone()) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::debug!(provider = %provider, error = %e, "Skipping malformed entry");
                None
            }
        })
        .collect()
}

/// A listing endpoint answering 404 is as unusable as one that is down
pub(crate) fn unavailable(error: AppError) -> AppError {
    match error {
        AppError::NotFound(url) => {
            AppError::CatalogUnavailable(format!("listing endpoint not found: {}", url))
        }
        other => other,
    }
}

/// Turns a fetch outcome into the `get_details` contract: 404 becomes `None`
pub(crate) fn found(result: AppResult<Value>) -> AppResult<Option<Value>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(AppError::NotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// RAWG provider (games)
///
/// API Flow:
/// 1. Mood search: /games filtered by genre slugs, best rated first
/// 2. Details: /games/{id} and /games/{id}/screenshots, fetched together
/// 3. Covers: /games ordered by how often they were added to libraries
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::{
        or_not_available, ContentId, ContentItem, Cover, CoverKind, DetailAttributes,
        DetailQuery, DetailRecord, GameAttributes, GameDetail, ImageRef, ItemAttributes,
        MoodLabel, GAME_PLACEHOLDER,
    },
    services::{
        classifier::search_tags,
        fetcher::{CatalogRequest, JsonFetcher},
        providers::{
            decode_entries, found, require_list, unavailable, year_from_date, CatalogProvider,
            CoverSource,
        },
    },
};

const PROVIDER: &str = "rawg";
const PAGE_SIZE: u32 = 20;
const TAG_LIMIT: usize = 10;
const DESCRIPTION_UNAVAILABLE: &str = "Descripción no disponible";
const DEFAULT_COVER_GENRE: &str = "Action";

#[derive(Debug, Deserialize)]
struct RawgNamed {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawgPlatformEntry {
    platform: RawgNamed,
}

#[derive(Debug, Deserialize)]
struct RawgScreenshot {
    image: String,
}

#[derive(Debug, Deserialize)]
struct RawgEsrb {
    name: String,
}

/// Listing entry. RAWG sends `null` for several collections, hence the
/// `Option<Vec<_>>` fields.
#[derive(Debug, Deserialize)]
struct RawgGame {
    id: u64,
    name: String,
    released: Option<String>,
    background_image: Option<String>,
    rating: Option<f64>,
    genres: Option<Vec<RawgNamed>>,
    platforms: Option<Vec<RawgPlatformEntry>>,
    developers: Option<Vec<RawgNamed>>,
    description_raw: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawgGameDetails {
    id: u64,
    name: String,
    released: Option<String>,
    background_image: Option<String>,
    genres: Option<Vec<RawgNamed>>,
    platforms: Option<Vec<RawgPlatformEntry>>,
    developers: Option<Vec<RawgNamed>>,
    publishers: Option<Vec<RawgNamed>>,
    esrb_rating: Option<RawgEsrb>,
    metacritic: Option<u32>,
    description_raw: Option<String>,
    tags: Option<Vec<RawgNamed>>,
    website: Option<String>,
    reddit_url: Option<String>,
}

fn joined_names(entries: &Option<Vec<RawgNamed>>) -> String {
    entries
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|g| g.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn platform_names(entries: Option<Vec<RawgPlatformEntry>>) -> Vec<String> {
    entries
        .unwrap_or_default()
        .into_iter()
        .map(|p| p.platform.name)
        .collect()
}

fn first_name(entries: Option<Vec<RawgNamed>>) -> Option<String> {
    entries.unwrap_or_default().into_iter().next().map(|n| n.name)
}

fn description(raw: Option<String>) -> String {
    match raw {
        Some(text) if !text.trim().is_empty() => text,
        _ => DESCRIPTION_UNAVAILABLE.to_string(),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Clone)]
pub struct RawgProvider {
    fetcher: Arc<dyn JsonFetcher>,
    api_key: String,
    api_url: String,
}

impl RawgProvider {
    pub fn new(fetcher: Arc<dyn JsonFetcher>, api_key: String, api_url: String) -> Self {
        Self {
            fetcher,
            api_key,
            api_url,
        }
    }

    fn request(&self, path: &str) -> CatalogRequest {
        CatalogRequest::get(format!("{}{}", self.api_url, path)).query("key", &self.api_key)
    }

    fn game_to_item(game: RawgGame, mood: MoodLabel) -> ContentItem {
        let genre = joined_names(&game.genres);
        ContentItem {
            id: ContentId::Numeric(game.id),
            title: game.name,
            image: ImageRef::url_or(game.background_image, GAME_PLACEHOLDER),
            moods: vec![mood],
            attributes: ItemAttributes::Game(GameAttributes {
                genre: or_not_available(Some(genre)),
                platforms: platform_names(game.platforms),
                developer: or_not_available(first_name(game.developers)),
                release_year: year_from_date(game.released.as_deref()),
                rating: game.rating,
                description: description(game.description_raw),
            }),
        }
    }

    fn details_to_record(game: RawgGameDetails, screenshots: Vec<String>) -> DetailRecord {
        let genre = joined_names(&game.genres);
        DetailRecord {
            id: ContentId::Numeric(game.id),
            title: game.name,
            image: ImageRef::url_or(game.background_image, GAME_PLACEHOLDER),
            description: description(game.description_raw),
            attributes: DetailAttributes::Game(GameDetail {
                genre: or_not_available(Some(genre)),
                platforms: platform_names(game.platforms),
                developer: or_not_available(first_name(game.developers)),
                publisher: or_not_available(first_name(game.publishers)),
                release_date: or_not_available(game.released),
                esrb_rating: or_not_available(game.esrb_rating.map(|r| r.name)),
                metacritic: game.metacritic,
                screenshots,
                tags: game
                    .tags
                    .unwrap_or_default()
                    .into_iter()
                    .take(TAG_LIMIT)
                    .map(|t| t.name)
                    .collect(),
                website: non_empty(game.website),
                reddit: non_empty(game.reddit_url),
            }),
        }
    }

    /// Screenshot URLs of a game. They only decorate the detail record, so
    /// any failure yields an empty list.
    fn screenshot_urls(game_id: u64, result: AppResult<Value>) -> Vec<String> {
        let payload = match result {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(game_id = game_id, provider = PROVIDER, error = %e, "Screenshots unavailable");
                return Vec::new();
            }
        };

        match payload.get("results").and_then(Value::as_array) {
            Some(results) => decode_entries::<RawgScreenshot>(results, PROVIDER)
                .into_iter()
                .map(|s| s.image)
                .filter(|url| !url.trim().is_empty())
                .collect(),
            None => Vec::new(),
        }
    }

    async fn fetch_games(&self, request: CatalogRequest) -> AppResult<Vec<RawgGame>> {
        let payload = self.fetcher.get_json(request).await.map_err(unavailable)?;
        let results = require_list(&payload, "/results", PROVIDER)?;
        Ok(decode_entries(results, PROVIDER))
    }
}

#[async_trait::async_trait]
impl CatalogProvider for RawgProvider {
    async fn search_by_mood(&self, mood: MoodLabel, page: u32) -> AppResult<Vec<ContentItem>> {
        let request = self
            .request("/games")
            .query("genres", search_tags(mood).game_genres)
            .query("page", page.max(1))
            .query("page_size", PAGE_SIZE)
            .query("ordering", "-rating");

        let items: Vec<ContentItem> = self
            .fetch_games(request)
            .await?
            .into_iter()
            .map(|game| Self::game_to_item(game, mood))
            .collect();

        tracing::info!(
            mood = %mood,
            page = page,
            results = items.len(),
            provider = PROVIDER,
            "Mood search completed"
        );

        Ok(items)
    }

    async fn get_details(&self, query: &DetailQuery) -> AppResult<Option<DetailRecord>> {
        let game_id = match query {
            DetailQuery::Id(ContentId::Numeric(id)) => *id,
            _ => return Ok(None),
        };

        let details_request = self.request(&format!("/games/{}", game_id));
        let screenshots_request = self.request(&format!("/games/{}/screenshots", game_id));

        let (details, screenshots) = tokio::join!(
            self.fetcher.get_json(details_request),
            self.fetcher.get_json(screenshots_request),
        );

        let Some(payload) = found(details)? else {
            tracing::debug!(game_id = game_id, provider = PROVIDER, "Game not found");
            return Ok(None);
        };

        let details: RawgGameDetails = serde_json::from_value(payload).map_err(|e| {
            AppError::CatalogUnavailable(format!("Failed to parse RAWG game details: {}", e))
        })?;

        tracing::info!(game_id = game_id, provider = PROVIDER, "Details fetched");

        let screenshots = Self::screenshot_urls(game_id, screenshots);

        Ok(Some(Self::details_to_record(details, screenshots)))
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }
}

#[async_trait::async_trait]
impl CoverSource for RawgProvider {
    async fn popular_covers(&self, kind: CoverKind) -> AppResult<Vec<Cover>> {
        if kind != CoverKind::Game {
            return Err(AppError::InvalidInput(format!(
                "RAWG has no {} covers",
                kind.as_str()
            )));
        }

        let request = self
            .request("/games")
            .query("ordering", "-added")
            .query("page_size", PAGE_SIZE);

        let covers: Vec<Cover> = self
            .fetch_games(request)
            .await?
            .into_iter()
            .map(|game| Cover {
                id: ContentId::Numeric(game.id),
                title: game.name,
                image: non_empty(game.background_image),
                kind: CoverKind::Game,
                year: year_from_date(game.released.as_deref()),
                rating: game.rating.unwrap_or(0.0),
                genre: first_name(game.genres).unwrap_or_else(|| DEFAULT_COVER_GENRE.to_string()),
                artist: None,
            })
            .collect();

        tracing::info!(results = covers.len(), provider = PROVIDER, "Popular covers fetched");

        Ok(covers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentKind, NOT_AVAILABLE};
    use crate::services::fetcher::MockJsonFetcher;
    use serde_json::json;

    fn provider_with(fetcher: MockJsonFetcher) -> RawgProvider {
        RawgProvider::new(
            Arc::new(fetcher),
            "test_key".to_string(),
            "http://rawg.test/api".to_string(),
        )
    }

    #[tokio::test]
    async fn test_search_by_mood_maps_games() {
        let mut fetcher = MockJsonFetcher::new();
        fetcher
            .expect_get_json()
            .withf(|req| {
                req.url == "http://rawg.test/api/games"
                    && req.param("key") == Some("test_key")
                    && req.param("genres") == Some("indie,puzzle,simulation")
                    && req.param("page_size") == Some("20")
                    && req.param("ordering") == Some("-rating")
            })
            .times(1)
            .returning(|_| {
                Ok(json!({
                    "count": 1,
                    "results": [{
                        "id": 3498,
                        "name": "The Stanley Parable",
                        "released": "2013-10-17",
                        "background_image": "https://media.rawg.io/stanley.jpg",
                        "rating": 4.3,
                        "genres": [{"name": "Indie"}, {"name": "Adventure"}],
                        "platforms": [{"platform": {"name": "PC"}}, {"platform": {"name": "macOS"}}],
                        "developers": null
                    }]
                }))
            });

        let items = provider_with(fetcher)
            .search_by_mood(MoodLabel::Creativo, 1)
            .await
            .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind(), ContentKind::Game);
        match &items[0].attributes {
            ItemAttributes::Game(game) => {
                assert_eq!(game.genre, "Indie, Adventure");
                assert_eq!(game.platforms, vec!["PC", "macOS"]);
                assert_eq!(game.developer, NOT_AVAILABLE);
                assert_eq!(game.release_year, Some(2013));
                assert_eq!(game.description, DESCRIPTION_UNAVAILABLE);
            }
            other => panic!("expected game attributes, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_empty_genres_is_not_available() {
        let mut fetcher = MockJsonFetcher::new();
        fetcher.expect_get_json().returning(|_| {
            Ok(json!({"results": [{"id": 1, "name": "Mystery Game", "genres": []}]}))
        });

        let items = provider_with(fetcher)
            .search_by_mood(MoodLabel::Curioso, 1)
            .await
            .unwrap();

        match &items[0].attributes {
            ItemAttributes::Game(game) => {
                assert_eq!(game.genre, NOT_AVAILABLE);
                assert!(game.platforms.is_empty());
            }
            other => panic!("expected game attributes, got {:?}", other),
        }
        assert_eq!(items[0].image, ImageRef::placeholder(GAME_PLACEHOLDER));
    }

    #[tokio::test]
    async fn test_search_transport_failure_propagates() {
        let mut fetcher = MockJsonFetcher::new();
        fetcher.expect_get_json().returning(|_| {
            Err(AppError::CatalogUnavailable("connection refused".to_string()))
        });

        let result = provider_with(fetcher)
            .search_by_mood(MoodLabel::Triste, 1)
            .await;

        assert!(matches!(result, Err(AppError::CatalogUnavailable(_))));
    }

    #[tokio::test]
    async fn test_get_details_maps_extended_fields() {
        let mut fetcher = MockJsonFetcher::new();
        fetcher
            .expect_get_json()
            .withf(|req| {
                req.url == "http://rawg.test/api/games/52725/screenshots"
                    && req.param("key") == Some("test_key")
            })
            .times(1)
            .returning(|_| {
                Ok(json!({
                    "count": 2,
                    "results": [
                        {"id": 1, "image": "https://media.rawg.io/s1.jpg"},
                        {"id": 2, "image": "https://media.rawg.io/s2.jpg"}
                    ]
                }))
            });
        fetcher
            .expect_get_json()
            .withf(|req| req.url == "http://rawg.test/api/games/52725")
            .times(1)
            .returning(|_| {
                Ok(json!({
                    "id": 52725,
                    "name": "GRIS",
                    "released": "2018-12-13",
                    "background_image": "https://media.rawg.io/gris.jpg",
                    "genres": [{"name": "Adventure"}, {"name": "Platformer"}],
                    "platforms": [{"platform": {"name": "PC"}}],
                    "developers": [{"name": "Nomada Studio"}],
                    "publishers": [{"name": "Devolver Digital"}],
                    "esrb_rating": {"name": "Everyone"},
                    "metacritic": 83,
                    "description_raw": "A serene and evocative experience.",
                    "tags": [{"name": "Singleplayer"}, {"name": "Atmospheric"}],
                    "website": "https://nomada.studio",
                    "reddit_url": ""
                }))
            });

        let record = provider_with(fetcher)
            .get_details(&DetailQuery::Id(ContentId::Numeric(52725)))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(record.kind(), ContentKind::Game);
        assert_eq!(record.description, "A serene and evocative experience.");
        match record.attributes {
            DetailAttributes::Game(game) => {
                assert_eq!(game.publisher, "Devolver Digital");
                assert_eq!(game.esrb_rating, "Everyone");
                assert_eq!(game.metacritic, Some(83));
                assert_eq!(
                    game.screenshots,
                    vec!["https://media.rawg.io/s1.jpg", "https://media.rawg.io/s2.jpg"]
                );
                assert_eq!(game.tags, vec!["Singleplayer", "Atmospheric"]);
                assert_eq!(game.website.as_deref(), Some("https://nomada.studio"));
                assert_eq!(game.reddit, None);
            }
            other => panic!("expected game detail, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_details_survives_screenshot_failure() {
        let mut fetcher = MockJsonFetcher::new();
        fetcher
            .expect_get_json()
            .withf(|req| req.url.ends_with("/screenshots"))
            .times(1)
            .returning(|_| Err(AppError::CatalogUnavailable("timeout".to_string())));
        fetcher
            .expect_get_json()
            .withf(|req| req.url == "http://rawg.test/api/games/3498")
            .times(1)
            .returning(|_| Ok(json!({"id": 3498, "name": "The Stanley Parable"})));

        let record = provider_with(fetcher)
            .get_details(&DetailQuery::Id(ContentId::Numeric(3498)))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(record.title, "The Stanley Parable");
        match record.attributes {
            DetailAttributes::Game(game) => assert!(game.screenshots.is_empty()),
            other => panic!("expected game detail, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_details_not_found() {
        let mut fetcher = MockJsonFetcher::new();
        fetcher
            .expect_get_json()
            .returning(|req| Err(AppError::NotFound(req.url)));

        let record = provider_with(fetcher)
            .get_details(&DetailQuery::Id(ContentId::Numeric(1)))
            .await
            .unwrap();

        assert!(record.is_none());
    }

    #[tokio::test]
    async fn test_covers_reject_other_kinds() {
        let result = provider_with(MockJsonFetcher::new())
            .popular_covers(CoverKind::Music)
            .await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}

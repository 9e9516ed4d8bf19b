/// Last.fm provider (music albums)
///
/// API Flow:
/// 1. Mood search: tag.gettopalbums with the mood's primary tag
/// 2. Details: album.getinfo by artist + album name
/// 3. Covers: tag.gettopalbums for a broad tag
///
/// Last.fm albums have no stable numeric id, so items carry a composite key
/// built from artist and album name (see [`encode_album_id`]).
use std::sync::Arc;

use chrono::{Datelike, NaiveDateTime};
use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::{
        or_not_available, ContentId, ContentItem, Cover, CoverKind, DetailAttributes,
        DetailQuery, DetailRecord, ImageRef, ItemAttributes, MoodLabel, MusicAttributes,
        MusicDetail, MUSIC_PLACEHOLDER,
    },
    services::{
        classifier::search_tags,
        fetcher::{CatalogRequest, JsonFetcher},
        providers::{found, require_list, unavailable, CatalogProvider, CoverSource},
    },
};

const PROVIDER: &str = "lastfm";
const PAGE_SIZE: u32 = 20;
const TOP_TRACKS: usize = 5;
const COVER_TAG: &str = "indie";
const COVER_GENRE: &str = "Music";
const DESCRIPTION_UNAVAILABLE: &str = "Descripción no disponible";
/// Last.fm error code for an unknown artist/album
const ERROR_NOT_FOUND: i64 = 6;

/// Joins the artist and album halves of a composite album id
pub const ALBUM_ID_SEPARATOR: &str = "--";

/// Marks an escaped byte inside an album id word
const ESCAPE: char = '_';

fn encode_word(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    for byte in word.to_lowercase().bytes() {
        if byte.is_ascii_lowercase() || byte.is_ascii_digit() {
            out.push(byte as char);
        } else {
            out.push_str(&format!("{}{:02x}", ESCAPE, byte));
        }
    }
    out
}

fn decode_word(word: &str) -> Option<String> {
    if word.is_empty() {
        return None;
    }

    let mut bytes = Vec::with_capacity(word.len());
    let mut chars = word.chars();
    while let Some(c) = chars.next() {
        match c {
            ESCAPE => {
                let hex: String = chars.by_ref().take(2).collect();
                if hex.len() != 2 {
                    return None;
                }
                bytes.push(u8::from_str_radix(&hex, 16).ok()?);
            }
            'a'..='z' | '0'..='9' => bytes.push(c as u8),
            _ => return None,
        }
    }
    String::from_utf8(bytes).ok()
}

fn encode_name(name: &str) -> String {
    name.split_whitespace()
        .map(encode_word)
        .collect::<Vec<_>>()
        .join("-")
}

fn decode_name(encoded: &str) -> Option<String> {
    let words = encoded
        .split('-')
        .map(decode_word)
        .collect::<Option<Vec<_>>>()?;
    Some(words.join(" "))
}

/// Builds the composite id of an album: each name is lower-cased, its
/// whitespace runs collapsed to `-`, every byte outside `[a-z0-9]` written
/// as `_` plus two hex digits (literal `-` and `_` included), and the halves
/// joined with [`ALBUM_ID_SEPARATOR`].
///
/// The result only holds `[a-z0-9_-]`, so it survives URL paths and query
/// strings unchanged. `("Bon Iver", "For Emma, Forever Ago")` becomes
/// `bon-iver--for-emma_2c-forever-ago`.
pub fn encode_album_id(artist: &str, album: &str) -> String {
    format!(
        "{}{}{}",
        encode_name(artist),
        ALBUM_ID_SEPARATOR,
        encode_name(album)
    )
}

/// Recovers `(artist, album)` from a composite id. The result is lower-case
/// with single spaces; `None` when the id is not a composite album key.
pub fn decode_album_id(id: &str) -> Option<(String, String)> {
    let (artist, album) = id.split_once(ALBUM_ID_SEPARATOR)?;
    Some((decode_name(artist)?, decode_name(album)?))
}

/// Picks the image of the given size, `None` when missing or blank
fn image_of_size(images: &Value, size: &str) -> Option<String> {
    images
        .as_array()?
        .iter()
        .find(|img| img["size"].as_str() == Some(size))
        .and_then(|img| img["#text"].as_str())
        .filter(|url| !url.is_empty())
        .map(str::to_string)
}

/// Last.fm sends counters as strings
fn count(value: &Value) -> Option<u64> {
    match value {
        Value::String(s) => s.parse().ok(),
        other => other.as_u64(),
    }
}

/// Artist is an object in listings and a plain string in album.getinfo
fn artist_name(value: &Value) -> Option<String> {
    match value {
        Value::String(name) => Some(name.clone()),
        Value::Object(_) => value["name"].as_str().map(str::to_string),
        _ => None,
    }
    .filter(|name| !name.is_empty())
}

/// A single-element collection arrives as a bare object instead of an array
fn as_list(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(_) => vec![value],
        _ => Vec::new(),
    }
}

/// `wiki.published` looks like `27 Feb 2008, 00:00`
fn published_year(published: Option<&str>) -> Option<i32> {
    NaiveDateTime::parse_from_str(published?.trim(), "%d %b %Y, %H:%M")
        .ok()
        .map(|dt| dt.year())
}

#[derive(Clone)]
pub struct LastfmProvider {
    fetcher: Arc<dyn JsonFetcher>,
    api_key: String,
    api_url: String,
}

impl LastfmProvider {
    pub fn new(fetcher: Arc<dyn JsonFetcher>, api_key: String, api_url: String) -> Self {
        Self {
            fetcher,
            api_key,
            api_url,
        }
    }

    fn request(&self, method: &str) -> CatalogRequest {
        CatalogRequest::get(format!("{}/", self.api_url))
            .query("method", method)
            .query("api_key", &self.api_key)
            .query("format", "json")
    }

    /// Last.fm reports API errors inside a successful body
    fn api_error(payload: &Value) -> Option<(i64, String)> {
        let code = payload.get("error")?.as_i64()?;
        let message = payload["message"].as_str().unwrap_or_default().to_string();
        Some((code, message))
    }

    async fn top_albums(&self, tag: &str, page: u32) -> AppResult<Vec<Value>> {
        let request = self
            .request("tag.gettopalbums")
            .query("tag", tag)
            .query("page", page.max(1))
            .query("limit", PAGE_SIZE);

        let payload = self.fetcher.get_json(request).await.map_err(unavailable)?;
        if let Some((code, message)) = Self::api_error(&payload) {
            return Err(AppError::CatalogUnavailable(format!(
                "Last.fm error {}: {}",
                code, message
            )));
        }

        Ok(require_list(&payload, "/albums/album", PROVIDER)?.clone())
    }

    fn album_to_item(album: &Value, tag: &str, mood: MoodLabel) -> Option<ContentItem> {
        let title = album["name"].as_str().filter(|n| !n.is_empty())?.to_string();
        let artist = artist_name(&album["artist"])?;

        Some(ContentItem {
            id: ContentId::Key(encode_album_id(&artist, &title)),
            title,
            image: ImageRef::url_or(image_of_size(&album["image"], "large"), MUSIC_PLACEHOLDER),
            moods: vec![mood],
            attributes: ItemAttributes::Music(MusicAttributes {
                artist,
                year: None,
                genres: vec![tag.to_string()],
                url: album["url"].as_str().map(str::to_string),
                playcount: count(&album["playcount"]),
            }),
        })
    }

    fn info_to_record(info: &Value, artist: &str, album: &str) -> Option<DetailRecord> {
        let title = info["name"].as_str().filter(|n| !n.is_empty())?.to_string();
        let tracks = as_list(&info["tracks"]["track"]);
        let total_seconds: u64 = tracks.iter().filter_map(|t| count(&t["duration"])).sum();
        let summary = info["wiki"]["summary"]
            .as_str()
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string);

        Some(DetailRecord {
            id: ContentId::Key(encode_album_id(artist, album)),
            title,
            image: ImageRef::url_or(
                image_of_size(&info["image"], "extralarge"),
                MUSIC_PLACEHOLDER,
            ),
            description: summary.unwrap_or_else(|| DESCRIPTION_UNAVAILABLE.to_string()),
            attributes: DetailAttributes::Music(MusicDetail {
                artist: artist_name(&info["artist"]).unwrap_or_else(|| artist.to_string()),
                year: published_year(info["wiki"]["published"].as_str()),
                genres: as_list(&info["tags"]["tag"])
                    .iter()
                    .filter_map(|t| t["name"].as_str().map(str::to_string))
                    .collect(),
                duration: or_not_available(
                    (total_seconds > 0).then(|| format!("{} min", total_seconds / 60)),
                ),
                tracks: (!tracks.is_empty()).then_some(tracks.len() as u32),
                top_tracks: tracks
                    .iter()
                    .take(TOP_TRACKS)
                    .filter_map(|t| t["name"].as_str().map(str::to_string))
                    .collect(),
                url: info["url"].as_str().map(str::to_string),
                playcount: count(&info["playcount"]),
                label: or_not_available(None),
                platforms: Vec::new(),
            }),
        })
    }
}

#[async_trait::async_trait]
impl CatalogProvider for LastfmProvider {
    async fn search_by_mood(&self, mood: MoodLabel, page: u32) -> AppResult<Vec<ContentItem>> {
        let tag = search_tags(mood).primary_music_tag();
        let albums = self.top_albums(tag, page).await?;

        let items: Vec<ContentItem> = albums
            .iter()
            .filter_map(|album| Self::album_to_item(album, tag, mood))
            .collect();

        tracing::info!(
            mood = %mood,
            tag = tag,
            page = page,
            results = items.len(),
            provider = PROVIDER,
            "Mood search completed"
        );

        Ok(items)
    }

    async fn get_details(&self, query: &DetailQuery) -> AppResult<Option<DetailRecord>> {
        let (artist, album) = match query {
            DetailQuery::Album { artist, album } => (artist.as_str(), album.as_str()),
            DetailQuery::Id(_) => return Ok(None),
        };

        let request = self
            .request("album.getinfo")
            .query("artist", artist)
            .query("album", album);

        let Some(payload) = found(self.fetcher.get_json(request).await)? else {
            return Ok(None);
        };

        match Self::api_error(&payload) {
            Some((ERROR_NOT_FOUND, _)) => {
                tracing::debug!(artist = %artist, album = %album, provider = PROVIDER, "Album not found");
                return Ok(None);
            }
            Some((code, message)) => {
                return Err(AppError::CatalogUnavailable(format!(
                    "Last.fm error {}: {}",
                    code, message
                )));
            }
            None => {}
        }

        let info = payload.get("album").ok_or_else(|| {
            AppError::CatalogUnavailable("Invalid lastfm response format: missing album".to_string())
        })?;

        tracing::info!(artist = %artist, album = %album, provider = PROVIDER, "Details fetched");

        Ok(Self::info_to_record(info, artist, album))
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }
}

#[async_trait::async_trait]
impl CoverSource for LastfmProvider {
    async fn popular_covers(&self, kind: CoverKind) -> AppResult<Vec<Cover>> {
        if kind != CoverKind::Music {
            return Err(AppError::InvalidInput(format!(
                "Last.fm has no {} covers",
                kind.as_str()
            )));
        }

        let covers: Vec<Cover> = self
            .top_albums(COVER_TAG, 1)
            .await?
            .iter()
            .filter_map(|album| {
                let title = album["name"].as_str().filter(|n| !n.is_empty())?.to_string();
                let artist = artist_name(&album["artist"])?;
                Some(Cover {
                    id: ContentId::Key(encode_album_id(&artist, &title)),
                    title,
                    image: image_of_size(&album["image"], "large")
                        .or_else(|| image_of_size(&album["image"], "medium")),
                    kind: CoverKind::Music,
                    year: None,
                    rating: 0.0,
                    genre: COVER_GENRE.to_string(),
                    artist: Some(artist),
                })
            })
            .collect();

        tracing::info!(results = covers.len(), provider = PROVIDER, "Popular covers fetched");

        Ok(covers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NOT_AVAILABLE;
    use crate::services::fetcher::MockJsonFetcher;
    use serde_json::json;

    fn provider_with(fetcher: MockJsonFetcher) -> LastfmProvider {
        LastfmProvider::new(
            Arc::new(fetcher),
            "test_key".to_string(),
            "http://lastfm.test/2.0".to_string(),
        )
    }

    #[test]
    fn test_album_id_roundtrip() {
        let id = encode_album_id("Bon Iver", "For Emma, Forever Ago");
        assert_eq!(id, "bon-iver--for-emma_2c-forever-ago");

        let (artist, album) = decode_album_id(&id).unwrap();
        assert!(artist.eq_ignore_ascii_case("Bon Iver"));
        assert!(album.eq_ignore_ascii_case("For Emma, Forever Ago"));
    }

    #[test]
    fn test_album_id_keeps_hyphenated_names() {
        let id = encode_album_id("Jay-Z", "The Blueprint");
        assert_eq!(id, "jay_2dz--the-blueprint");
        assert_eq!(
            decode_album_id(&id),
            Some(("jay-z".to_string(), "the blueprint".to_string()))
        );
    }

    #[test]
    fn test_album_id_separator_inside_name() {
        let id = encode_album_id("A -- B", "C");
        assert_eq!(id, "a-_2d_2d-b--c");
        assert_eq!(
            decode_album_id(&id),
            Some(("a -- b".to_string(), "c".to_string()))
        );
    }

    #[test]
    fn test_album_id_is_url_safe() {
        let id = encode_album_id("Sigur Rós", "( )");
        assert_eq!(id, "sigur-r_c3_b3s--_28-_29");
        assert!(id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-'));
        assert_eq!(
            decode_album_id(&id),
            Some(("sigur rós".to_string(), "( )".to_string()))
        );
    }

    #[test]
    fn test_album_id_escapes_underscores() {
        let id = encode_album_id("the_artist", "b-sides");
        assert_eq!(id, "the_5fartist--b_2dsides");
        assert_eq!(
            decode_album_id(&id),
            Some(("the_artist".to_string(), "b-sides".to_string()))
        );
    }

    #[test]
    fn test_album_id_collapses_whitespace() {
        let id = encode_album_id("  Frank   Ocean ", "Blonde");
        assert_eq!(id, "frank-ocean--blonde");
    }

    #[test]
    fn test_decode_rejects_non_composite_ids() {
        assert_eq!(decode_album_id("42"), None);
        assert_eq!(decode_album_id("radiohead-in-rainbows"), None);
        assert_eq!(decode_album_id("--in-rainbows"), None);
        assert_eq!(decode_album_id("radiohead---in-rainbows"), None);
        assert_eq!(decode_album_id("jay%2dz--the-blueprint"), None);
        assert_eq!(decode_album_id("bad_zz--album"), None);
        assert_eq!(decode_album_id("short_2--album"), None);
    }

    #[tokio::test]
    async fn test_search_by_mood_uses_primary_tag() {
        let mut fetcher = MockJsonFetcher::new();
        fetcher
            .expect_get_json()
            .withf(|req| {
                req.url == "http://lastfm.test/2.0/"
                    && req.param("method") == Some("tag.gettopalbums")
                    && req.param("tag") == Some("sad")
                    && req.param("format") == Some("json")
                    && req.param("limit") == Some("20")
            })
            .times(1)
            .returning(|_| {
                Ok(json!({"albums": {"album": [
                    {
                        "name": "Blonde",
                        "url": "https://www.last.fm/music/Frank+Ocean/Blonde",
                        "artist": {"name": "Frank Ocean"},
                        "image": [
                            {"#text": "https://img/s.png", "size": "small"},
                            {"#text": "https://img/l.png", "size": "large"}
                        ]
                    },
                    {"name": "", "artist": {"name": "Nobody"}}
                ]}}))
            });

        let items = provider_with(fetcher)
            .search_by_mood(MoodLabel::Triste, 1)
            .await
            .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, ContentId::Key("frank-ocean--blonde".to_string()));
        assert_eq!(items[0].image, ImageRef::Url("https://img/l.png".to_string()));
        match &items[0].attributes {
            ItemAttributes::Music(music) => {
                assert_eq!(music.artist, "Frank Ocean");
                assert_eq!(music.genres, vec!["sad"]);
            }
            other => panic!("expected music attributes, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_api_error_is_unavailable() {
        let mut fetcher = MockJsonFetcher::new();
        fetcher
            .expect_get_json()
            .returning(|_| Ok(json!({"error": 10, "message": "Invalid API key"})));

        let result = provider_with(fetcher)
            .search_by_mood(MoodLabel::Creativo, 1)
            .await;

        assert!(matches!(result, Err(AppError::CatalogUnavailable(_))));
    }

    #[tokio::test]
    async fn test_get_details_parses_album_info() {
        let mut fetcher = MockJsonFetcher::new();
        fetcher
            .expect_get_json()
            .withf(|req| {
                req.param("method") == Some("album.getinfo")
                    && req.param("artist") == Some("bon iver")
                    && req.param("album") == Some("for emma, forever ago")
            })
            .returning(|_| {
                Ok(json!({"album": {
                    "name": "For Emma, Forever Ago",
                    "artist": "Bon Iver",
                    "url": "https://www.last.fm/music/Bon+Iver/For+Emma,+Forever+Ago",
                    "playcount": "41234567",
                    "image": [{"#text": "https://img/xl.png", "size": "extralarge"}],
                    "tags": {"tag": [{"name": "folk"}, {"name": "indie"}]},
                    "tracks": {"track": [
                        {"name": "Flume", "duration": 219},
                        {"name": "Lump Sum", "duration": 201},
                        {"name": "Skinny Love", "duration": 238}
                    ]},
                    "wiki": {
                        "published": "19 Feb 2008, 00:00",
                        "summary": "Recorded in a remote cabin in Wisconsin."
                    }
                }}))
            });

        let record = provider_with(fetcher)
            .get_details(&DetailQuery::Album {
                artist: "bon iver".to_string(),
                album: "for emma, forever ago".to_string(),
            })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            record.id,
            ContentId::Key("bon-iver--for-emma_2c-forever-ago".to_string())
        );
        assert_eq!(record.description, "Recorded in a remote cabin in Wisconsin.");
        match record.attributes {
            DetailAttributes::Music(music) => {
                assert_eq!(music.artist, "Bon Iver");
                assert_eq!(music.year, Some(2008));
                assert_eq!(music.genres, vec!["folk", "indie"]);
                assert_eq!(music.tracks, Some(3));
                assert_eq!(music.duration, "10 min");
                assert_eq!(music.top_tracks, vec!["Flume", "Lump Sum", "Skinny Love"]);
                assert_eq!(music.playcount, Some(41234567));
                assert_eq!(music.label, NOT_AVAILABLE);
            }
            other => panic!("expected music detail, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_details_single_track_and_empty_tags() {
        let mut fetcher = MockJsonFetcher::new();
        fetcher.expect_get_json().returning(|_| {
            Ok(json!({"album": {
                "name": "Single",
                "artist": "Someone",
                "tags": "",
                "tracks": {"track": {"name": "Only Song"}}
            }}))
        });

        let record = provider_with(fetcher)
            .get_details(&DetailQuery::Album {
                artist: "someone".to_string(),
                album: "single".to_string(),
            })
            .await
            .unwrap()
            .unwrap();

        match record.attributes {
            DetailAttributes::Music(music) => {
                assert_eq!(music.tracks, Some(1));
                assert!(music.genres.is_empty());
                assert_eq!(music.duration, NOT_AVAILABLE);
                assert_eq!(music.year, None);
            }
            other => panic!("expected music detail, got {:?}", other),
        }
        assert_eq!(record.image, ImageRef::placeholder(MUSIC_PLACEHOLDER));
    }

    #[tokio::test]
    async fn test_get_details_error_six_is_not_found() {
        let mut fetcher = MockJsonFetcher::new();
        fetcher
            .expect_get_json()
            .returning(|_| Ok(json!({"error": 6, "message": "Album not found"})));

        let record = provider_with(fetcher)
            .get_details(&DetailQuery::Album {
                artist: "nobody".to_string(),
                album: "nothing".to_string(),
            })
            .await
            .unwrap();

        assert!(record.is_none());
    }

    #[tokio::test]
    async fn test_get_details_ignores_id_queries() {
        let record = provider_with(MockJsonFetcher::new())
            .get_details(&DetailQuery::Id(ContentId::Numeric(1)))
            .await
            .unwrap();
        assert!(record.is_none());
    }

    #[test]
    fn test_count_accepts_strings_and_numbers() {
        assert_eq!(count(&json!("1234")), Some(1234));
        assert_eq!(count(&json!(99)), Some(99));
        assert_eq!(count(&json!(null)), None);
    }
}

/// TMDB provider (films and series)
///
/// API Flow:
/// 1. Mood search: /discover/movie filtered by the mood's genre ids
///    (/discover/tv with the tv genre ids for series)
/// 2. Details: /movie/{id} with credits, videos and watch providers appended
/// 3. Covers: /movie/popular and /tv/popular
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::{
        or_not_available, ContentId, ContentItem, Cover, CoverKind, DetailAttributes,
        DetailQuery, DetailRecord, FilmAttributes, FilmDetail, ImageRef, ItemAttributes,
        MoodLabel, FILM_PLACEHOLDER, SERIES_PLACEHOLDER,
    },
    services::{
        classifier::search_tags,
        fetcher::{CatalogRequest, JsonFetcher},
        providers::{
            decode_entries, found, require_list, unavailable, year_from_date, CatalogProvider,
            CoverSource, SeriesSource,
        },
    },
};

const PROVIDER: &str = "tmdb";
const POSTER_SIZE: &str = "w500";
const COVER_SIZE: &str = "w300";
const MIN_VOTE_COUNT: u32 = 100;
const MIN_SERIES_VOTE_COUNT: u32 = 50;
const CAST_LIMIT: usize = 5;
const WATCH_REGION: &str = "US";
const DEFAULT_COVER_GENRE: &str = "Drama";

#[derive(Debug, Deserialize)]
struct TmdbMovie {
    id: u64,
    title: String,
    release_date: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
    #[serde(default)]
    genre_ids: Vec<u32>,
    vote_average: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct TmdbSeries {
    id: u64,
    name: String,
    first_air_date: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
    #[serde(default)]
    genre_ids: Vec<u32>,
    vote_average: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct TmdbNamed {
    name: String,
}

#[derive(Debug, Deserialize)]
struct TmdbCrewMember {
    name: String,
    job: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct TmdbCredits {
    #[serde(default)]
    cast: Vec<TmdbNamed>,
    #[serde(default)]
    crew: Vec<TmdbCrewMember>,
}

#[derive(Debug, Deserialize)]
struct TmdbVideo {
    key: String,
    #[serde(rename = "type")]
    video_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct TmdbVideos {
    #[serde(default)]
    results: Vec<TmdbVideo>,
}

#[derive(Debug, Deserialize)]
struct TmdbMovieDetails {
    id: u64,
    title: String,
    release_date: Option<String>,
    runtime: Option<u32>,
    #[serde(default)]
    genres: Vec<TmdbNamed>,
    #[serde(default)]
    credits: TmdbCredits,
    #[serde(default)]
    production_companies: Vec<TmdbNamed>,
    #[serde(default)]
    production_countries: Vec<TmdbNamed>,
    original_language: Option<String>,
    vote_average: Option<f64>,
    overview: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    #[serde(default)]
    videos: TmdbVideos,
    #[serde(rename = "watch/providers")]
    watch_providers: Option<Value>,
}

/// TMDB's fixed genre table (movie and tv genres share one id space)
fn genre_name(id: u32) -> Option<&'static str> {
    Some(match id {
        28 => "Action",
        12 => "Adventure",
        16 => "Animation",
        35 => "Comedy",
        80 => "Crime",
        99 => "Documentary",
        18 => "Drama",
        10751 => "Family",
        14 => "Fantasy",
        36 => "History",
        27 => "Horror",
        10402 => "Music",
        9648 => "Mystery",
        10749 => "Romance",
        878 => "Science Fiction",
        10770 => "TV Movie",
        53 => "Thriller",
        10752 => "War",
        37 => "Western",
        10759 => "Action & Adventure",
        10762 => "Kids",
        10763 => "News",
        10764 => "Reality",
        10765 => "Sci-Fi & Fantasy",
        10766 => "Soap",
        10767 => "Talk",
        10768 => "War & Politics",
        _ => return None,
    })
}

fn genre_names(ids: &[u32]) -> Vec<String> {
    ids.iter()
        .map(|id| genre_name(*id).map(str::to_string).unwrap_or_else(|| id.to_string()))
        .collect()
}

#[derive(Clone)]
pub struct TmdbProvider {
    fetcher: Arc<dyn JsonFetcher>,
    api_key: String,
    api_url: String,
    image_url: String,
}

impl TmdbProvider {
    pub fn new(
        fetcher: Arc<dyn JsonFetcher>,
        api_key: String,
        api_url: String,
        image_url: String,
    ) -> Self {
        Self {
            fetcher,
            api_key,
            api_url,
            image_url,
        }
    }

    fn request(&self, path: &str) -> CatalogRequest {
        CatalogRequest::get(format!("{}{}", self.api_url, path)).query("api_key", &self.api_key)
    }

    fn image(&self, size: &str, path: Option<&str>) -> Option<String> {
        path.filter(|p| !p.is_empty())
            .map(|p| format!("{}/{}{}", self.image_url, size, p))
    }

    fn movie_to_item(&self, movie: TmdbMovie, mood: MoodLabel) -> ContentItem {
        ContentItem {
            id: ContentId::Numeric(movie.id),
            title: movie.title,
            image: ImageRef::url_or(
                self.image(POSTER_SIZE, movie.poster_path.as_deref()),
                FILM_PLACEHOLDER,
            ),
            moods: vec![mood],
            attributes: ItemAttributes::Film(FilmAttributes {
                year: year_from_date(movie.release_date.as_deref()),
                // Runtime is only available from the details endpoint
                duration: or_not_available(None),
                genres: genre_names(&movie.genre_ids),
                description: or_not_available(movie.overview),
                rating: movie.vote_average,
            }),
        }
    }

    fn series_to_item(&self, series: TmdbSeries, mood: MoodLabel) -> ContentItem {
        ContentItem {
            id: ContentId::Numeric(series.id),
            title: series.name,
            image: ImageRef::url_or(
                self.image(POSTER_SIZE, series.poster_path.as_deref()),
                SERIES_PLACEHOLDER,
            ),
            moods: vec![mood],
            attributes: ItemAttributes::Film(FilmAttributes {
                year: year_from_date(series.first_air_date.as_deref()),
                duration: or_not_available(None),
                genres: genre_names(&series.genre_ids),
                description: or_not_available(series.overview),
                rating: series.vote_average,
            }),
        }
    }

    fn details_to_record(&self, movie: TmdbMovieDetails) -> DetailRecord {
        let director = movie
            .credits
            .crew
            .iter()
            .find(|person| person.job.as_deref() == Some("Director"))
            .map(|person| person.name.clone());

        let trailer = movie
            .videos
            .results
            .iter()
            .find(|video| video.video_type.as_deref() == Some("Trailer"))
            .map(|video| video.key.clone());

        let platforms = movie
            .watch_providers
            .as_ref()
            .and_then(|providers| {
                providers.pointer(&format!("/results/{}/flatrate", WATCH_REGION))
            })
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|p| p["provider_name"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        DetailRecord {
            id: ContentId::Numeric(movie.id),
            title: movie.title,
            image: ImageRef::url_or(
                self.image(POSTER_SIZE, movie.poster_path.as_deref()),
                FILM_PLACEHOLDER,
            ),
            description: or_not_available(movie.overview),
            attributes: DetailAttributes::Film(FilmDetail {
                year: year_from_date(movie.release_date.as_deref()),
                duration: or_not_available(movie.runtime.map(|r| format!("{} min", r))),
                genres: movie.genres.into_iter().map(|g| g.name).collect(),
                director: or_not_available(director),
                studio: or_not_available(
                    movie.production_companies.into_iter().next().map(|c| c.name),
                ),
                country: or_not_available(
                    movie.production_countries.into_iter().next().map(|c| c.name),
                ),
                language: or_not_available(movie.original_language),
                rating: movie.vote_average,
                cast: movie
                    .credits
                    .cast
                    .into_iter()
                    .take(CAST_LIMIT)
                    .map(|actor| actor.name)
                    .collect(),
                backdrop: self.image(POSTER_SIZE, movie.backdrop_path.as_deref()),
                trailer,
                platforms,
            }),
        }
    }

    async fn fetch_results(&self, request: CatalogRequest) -> AppResult<Vec<Value>> {
        let payload = self.fetcher.get_json(request).await.map_err(unavailable)?;
        Ok(require_list(&payload, "/results", PROVIDER)?.clone())
    }
}

#[async_trait::async_trait]
impl CatalogProvider for TmdbProvider {
    async fn search_by_mood(&self, mood: MoodLabel, page: u32) -> AppResult<Vec<ContentItem>> {
        let request = self
            .request("/discover/movie")
            .query("with_genres", search_tags(mood).movie_genres)
            .query("page", page.max(1))
            .query("sort_by", "vote_average.desc")
            .query("vote_count.gte", MIN_VOTE_COUNT);

        let results = self.fetch_results(request).await?;
        let items: Vec<ContentItem> = decode_entries::<TmdbMovie>(&results, PROVIDER)
            .into_iter()
            .map(|movie| self.movie_to_item(movie, mood))
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
        let movie_id = match query {
            DetailQuery::Id(ContentId::Numeric(id)) => *id,
            _ => return Ok(None),
        };

        let request = self
            .request(&format!("/movie/{}", movie_id))
            .query("append_to_response", "credits,videos,watch/providers");

        let Some(payload) = found(self.fetcher.get_json(request).await)? else {
            tracing::debug!(movie_id = movie_id, provider = PROVIDER, "Movie not found");
            return Ok(None);
        };

        let details: TmdbMovieDetails = serde_json::from_value(payload).map_err(|e| {
            AppError::CatalogUnavailable(format!("Failed to parse TMDB movie details: {}", e))
        })?;

        tracing::info!(movie_id = movie_id, provider = PROVIDER, "Details fetched");

        Ok(Some(self.details_to_record(details)))
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }
}

#[async_trait::async_trait]
impl SeriesSource for TmdbProvider {
    async fn search_series_by_mood(
        &self,
        mood: MoodLabel,
        page: u32,
    ) -> AppResult<Vec<ContentItem>> {
        let request = self
            .request("/discover/tv")
            .query("with_genres", search_tags(mood).series_genres)
            .query("page", page.max(1))
            .query("sort_by", "vote_average.desc")
            .query("vote_count.gte", MIN_SERIES_VOTE_COUNT);

        let results = self.fetch_results(request).await?;
        let items: Vec<ContentItem> = decode_entries::<TmdbSeries>(&results, PROVIDER)
            .into_iter()
            .map(|series| self.series_to_item(series, mood))
            .collect();

        tracing::info!(
            mood = %mood,
            page = page,
            results = items.len(),
            provider = PROVIDER,
            "Series search completed"
        );

        Ok(items)
    }
}

#[async_trait::async_trait]
impl CoverSource for TmdbProvider {
    async fn popular_covers(&self, kind: CoverKind) -> AppResult<Vec<Cover>> {
        let covers: Vec<Cover> = match kind {
            CoverKind::Movie => {
                let results = self.fetch_results(self.request("/movie/popular")).await?;
                decode_entries::<TmdbMovie>(&results, PROVIDER)
                    .into_iter()
                    .map(|movie| Cover {
                        id: ContentId::Numeric(movie.id),
                        title: movie.title,
                        image: self.image(COVER_SIZE, movie.poster_path.as_deref()),
                        kind: CoverKind::Movie,
                        year: year_from_date(movie.release_date.as_deref()),
                        rating: movie.vote_average.unwrap_or(0.0),
                        genre: first_genre(&movie.genre_ids),
                        artist: None,
                    })
                    .collect()
            }
            CoverKind::Series => {
                let results = self.fetch_results(self.request("/tv/popular")).await?;
                decode_entries::<TmdbSeries>(&results, PROVIDER)
                    .into_iter()
                    .map(|series| Cover {
                        id: ContentId::Numeric(series.id),
                        title: series.name,
                        image: self.image(COVER_SIZE, series.poster_path.as_deref()),
                        kind: CoverKind::Series,
                        year: year_from_date(series.first_air_date.as_deref()),
                        rating: series.vote_average.unwrap_or(0.0),
                        genre: first_genre(&series.genre_ids),
                        artist: None,
                    })
                    .collect()
            }
            other => {
                return Err(AppError::InvalidInput(format!(
                    "TMDB has no {} covers",
                    other.as_str()
                )))
            }
        };

        tracing::info!(
            kind = kind.as_str(),
            results = covers.len(),
            provider = PROVIDER,
            "Popular covers fetched"
        );

        Ok(covers)
    }
}

fn first_genre(ids: &[u32]) -> String {
    genre_names(ids)
        .into_iter()
        .next()
        .unwrap_or_else(|| DEFAULT_COVER_GENRE.to_string())
}

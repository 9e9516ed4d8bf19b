use std::{sync::Arc, time::Duration};

use crate::{
    config::{Config, ConfigurationStatus},
    error::AppResult,
    services::{
        fetcher::{HttpJsonFetcher, JsonFetcher},
        providers::{
            CatalogSet, CoverSources, LastfmProvider, RawgProvider, SeriesSource, TmdbProvider,
        },
        random::{RandomSource, ThreadRandom},
        CoverShowcase, DetailResolver, RecommendationService,
    },
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub recommendations: Arc<RecommendationService>,
    pub details: Arc<DetailResolver>,
    pub showcase: Arc<CoverShowcase>,
    pub series: Arc<dyn SeriesSource>,
    pub configuration: ConfigurationStatus,
}

impl AppState {
    /// Wires the services over the given catalogs
    pub fn new(
        catalogs: CatalogSet,
        covers: CoverSources,
        series: Arc<dyn SeriesSource>,
        random: Arc<dyn RandomSource>,
        configuration: ConfigurationStatus,
    ) -> Self {
        let configured = configuration.is_configured;

        Self {
            recommendations: Arc::new(RecommendationService::new(
                catalogs.clone(),
                random.clone(),
                configured,
            )),
            details: Arc::new(DetailResolver::new(catalogs, configured)),
            showcase: Arc::new(CoverShowcase::new(covers, random, configured)),
            series,
            configuration,
        }
    }

    /// Builds the live TMDB, RAWG and Last.fm clients from configuration
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let fetcher: Arc<dyn JsonFetcher> = Arc::new(HttpJsonFetcher::new(Duration::from_secs(
            config.http_timeout_secs,
        ))?);

        let tmdb = Arc::new(TmdbProvider::new(
            fetcher.clone(),
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            config.tmdb_image_url.clone(),
        ));
        let rawg = Arc::new(RawgProvider::new(
            fetcher.clone(),
            config.rawg_api_key.clone(),
            config.rawg_api_url.clone(),
        ));
        let lastfm = Arc::new(LastfmProvider::new(
            fetcher,
            config.lastfm_api_key.clone(),
            config.lastfm_api_url.clone(),
        ));

        let catalogs = CatalogSet {
            game: rawg.clone(),
            film: tmdb.clone(),
            music: lastfm.clone(),
        };
        let covers = CoverSources {
            film: tmdb.clone(),
            game: rawg,
            music: lastfm,
        };

        let configuration = config.check_configuration();
        if !configuration.is_configured {
            tracing::warn!(
                missing = ?configuration.missing_keys,
                "Catalog credentials missing, serving static content only"
            );
        }

        Ok(Self::new(
            catalogs,
            covers,
            tmdb,
            Arc::new(ThreadRandom),
            configuration,
        ))
    }
}

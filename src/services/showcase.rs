use std::sync::Arc;

use crate::{
    cache::CatalogCache,
    error::{AppError, AppResult},
    models::{Cover, CoverCategory, CoverKind},
    services::{
        fallback,
        providers::CoverSources,
        random::{shuffle_with, RandomSource},
    },
};

/// Covers taken from each kind when building a mixed showcase
pub const MIXED_PER_KIND: usize = 8;

/// Popular-content artwork per category
///
/// The first successful fetch of each kind is kept for the life of the
/// process. Failed fetches serve the static covers and are retried on the
/// next call.
pub struct CoverShowcase {
    sources: CoverSources,
    cache: CatalogCache<CoverKind, Vec<Cover>>,
    random: Arc<dyn RandomSource>,
    catalogs_configured: bool,
}

impl CoverShowcase {
    pub fn new(
        sources: CoverSources,
        random: Arc<dyn RandomSource>,
        catalogs_configured: bool,
    ) -> Self {
        Self {
            sources,
            cache: CatalogCache::new(),
            random,
            catalogs_configured,
        }
    }

    /// Covers for a category. Single categories return at most `limit`
    /// covers; `Mixed` takes [`MIXED_PER_KIND`] movies, games and albums
    /// and shuffles them.
    pub async fn covers(&self, category: CoverCategory, limit: usize) -> Vec<Cover> {
        match category.cover_kind() {
            Some(kind) => self.covers_of(kind, limit).await,
            None => self.mixed().await,
        }
    }

    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }

    async fn mixed(&self) -> Vec<Cover> {
        let (movies, games, music) = tokio::join!(
            self.covers_of(CoverKind::Movie, MIXED_PER_KIND),
            self.covers_of(CoverKind::Game, MIXED_PER_KIND),
            self.covers_of(CoverKind::Music, MIXED_PER_KIND),
        );

        let mut covers: Vec<Cover> = movies.into_iter().chain(games).chain(music).collect();
        shuffle_with(self.random.as_ref(), &mut covers);
        covers
    }

    async fn covers_of(&self, kind: CoverKind, limit: usize) -> Vec<Cover> {
        if !self.catalogs_configured {
            return fallback::covers_for(kind, limit);
        }

        match self.cached_covers(kind).await {
            Ok(covers) => covers.into_iter().take(limit).collect(),
            Err(e) => {
                tracing::warn!(kind = kind.as_str(), error = %e, "Serving static covers");
                fallback::covers_for(kind, limit)
            }
        }
    }

    async fn cached_covers(&self, kind: CoverKind) -> AppResult<Vec<Cover>> {
        crate::cached!(self.cache, kind, self.fetch_covers(kind))
    }

    async fn fetch_covers(&self, kind: CoverKind) -> AppResult<Vec<Cover>> {
        let covers = self.sources.for_kind(kind).popular_covers(kind).await?;
        if covers.is_empty() {
            return Err(AppError::CatalogUnavailable(format!(
                "no {} covers returned",
                kind.as_str()
            )));
        }
        Ok(covers)
    }
}

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{
        BundleStatus, ContentItem, ContentKind, EmotionalState, MoodLabel, RecommendationBundle,
        Recommendations,
    },
    services::{
        classifier::classify,
        fallback,
        providers::{CatalogProvider, CatalogSet},
        random::{pick, RandomSource},
    },
};

/// Builds mood-matched bundles from the three catalogs
///
/// Every bundle is either fully live (one random pick from each catalog) or
/// the curated fallback bundle for the mood; the two are never mixed.
pub struct RecommendationService {
    catalogs: CatalogSet,
    random: Arc<dyn RandomSource>,
    catalogs_configured: bool,
}

impl RecommendationService {
    pub fn new(
        catalogs: CatalogSet,
        random: Arc<dyn RandomSource>,
        catalogs_configured: bool,
    ) -> Self {
        Self {
            catalogs,
            random,
            catalogs_configured,
        }
    }

    /// Classifies the state and returns a complete bundle for its mood.
    /// Never fails: any catalog problem yields the fallback bundle.
    pub async fn get_recommendations(&self, state: &EmotionalState) -> Recommendations {
        let mood = classify(state);

        if !self.catalogs_configured {
            tracing::warn!(mood = %mood, "Catalogs not configured, serving fallback bundle");
            return Self::fallback(mood);
        }

        let (games, films, albums) = tokio::join!(
            self.catalogs.game.search_by_mood(mood, 1),
            self.catalogs.film.search_by_mood(mood, 1),
            self.catalogs.music.search_by_mood(mood, 1),
        );

        let game = self.pick_one(self.catalogs.game.as_ref(), mood, games);
        let film = self.pick_one(self.catalogs.film.as_ref(), mood, films);
        let music = self.pick_one(self.catalogs.music.as_ref(), mood, albums);

        match (game, film, music) {
            (Some(game), Some(film), Some(music)) => {
                tracing::info!(mood = %mood, "Live bundle assembled");
                Recommendations {
                    mood,
                    status: BundleStatus::Live,
                    bundle: RecommendationBundle::new(game, film, music),
                }
            }
            _ => {
                tracing::warn!(mood = %mood, "At least one catalog failed, serving fallback bundle");
                Self::fallback(mood)
            }
        }
    }

    /// Fresh pick for one slot. `None` when the catalog fails or returns
    /// nothing; the caller keeps its current item in that case.
    pub async fn reroll_slot(&self, kind: ContentKind, mood: MoodLabel) -> Option<ContentItem> {
        if !self.catalogs_configured {
            tracing::warn!(kind = %kind, mood = %mood, "Catalogs not configured, reroll skipped");
            return None;
        }

        let provider = self.catalogs.for_kind(kind);
        let result = provider.search_by_mood(mood, 1).await;
        self.pick_one(provider.as_ref(), mood, result)
    }

    fn pick_one(
        &self,
        provider: &dyn CatalogProvider,
        mood: MoodLabel,
        result: AppResult<Vec<ContentItem>>,
    ) -> Option<ContentItem> {
        match result {
            Ok(items) => {
                let picked = pick(self.random.as_ref(), &items).cloned();
                if picked.is_none() {
                    tracing::warn!(provider = provider.name(), mood = %mood, "Catalog returned no items");
                }
                picked
            }
            Err(e) => {
                tracing::warn!(provider = provider.name(), mood = %mood, error = %e, "Catalog search failed");
                None
            }
        }
    }

    fn fallback(mood: MoodLabel) -> Recommendations {
        Recommendations {
            mood,
            status: BundleStatus::Fallback,
            bundle: fallback::bundle_for(mood),
        }
    }
}

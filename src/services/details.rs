use crate::{
    models::{ContentId, ContentKind, DetailQuery, DetailRecord},
    services::{fallback, providers::lastfm::decode_album_id, providers::CatalogSet},
};

/// Resolves one detailed record, live first and static table second
pub struct DetailResolver {
    catalogs: CatalogSet,
    catalogs_configured: bool,
}

impl DetailResolver {
    pub fn new(catalogs: CatalogSet, catalogs_configured: bool) -> Self {
        Self {
            catalogs,
            catalogs_configured,
        }
    }

    /// `None` means neither the catalog nor the static table knows the item
    pub async fn get_detail(&self, kind: ContentKind, id: &ContentId) -> Option<DetailRecord> {
        if let Some(record) = self.fetch_live(kind, id).await {
            return Some(record);
        }

        let record = fallback::detail_for(kind, id);
        if record.is_some() {
            tracing::info!(kind = %kind, id = %id, "Serving static detail record");
        }
        record
    }

    async fn fetch_live(&self, kind: ContentKind, id: &ContentId) -> Option<DetailRecord> {
        if !self.catalogs_configured {
            return None;
        }

        let query = live_query(kind, id)?;
        let provider = self.catalogs.for_kind(kind);

        match provider.get_details(&query).await {
            Ok(Some(record)) => Some(record),
            Ok(None) => {
                tracing::debug!(kind = %kind, id = %id, provider = provider.name(), "Item not in catalog");
                None
            }
            Err(e) if e.is_unavailable() => {
                tracing::warn!(kind = %kind, id = %id, provider = provider.name(), error = %e, "Catalog unavailable for details");
                None
            }
            Err(e) => {
                tracing::error!(kind = %kind, id = %id, provider = provider.name(), error = %e, "Detail fetch failed");
                None
            }
        }
    }
}

/// Catalog query for an id. Albums need a composite key; films and games
/// need a numeric id. Anything else can only live in the static table.
fn live_query(kind: ContentKind, id: &ContentId) -> Option<DetailQuery> {
    match (kind, id) {
        (ContentKind::Music, ContentId::Key(key)) => {
            decode_album_id(key).map(|(artist, album)| DetailQuery::Album { artist, album })
        }
        (ContentKind::Music, ContentId::Numeric(_)) => None,
        (_, ContentId::Numeric(_)) => Some(DetailQuery::Id(id.clone())),
        (_, ContentId::Key(_)) => None,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::AppError;
    use crate::models::{DetailAttributes, FilmDetail, ImageRef};
    use crate::services::providers::{CatalogProvider, MockCatalogProvider};

    fn idle() -> Arc<dyn CatalogProvider> {
        let mut mock = MockCatalogProvider::new();
        mock.expect_get_details().never();
        mock.expect_name().return_const("idle");
        Arc::new(mock)
    }

    fn inception() -> DetailRecord {
        DetailRecord {
            id: ContentId::Numeric(27205),
            title: "Inception".to_string(),
            image: ImageRef::placeholder("🎬"),
            description: "A thief who steals corporate secrets.".to_string(),
            attributes: DetailAttributes::Film(FilmDetail {
                year: Some(2010),
                duration: "148 min".to_string(),
                genres: vec!["Action".to_string()],
                director: "Christopher Nolan".to_string(),
                studio: "N/A".to_string(),
                country: "N/A".to_string(),
                language: "N/A".to_string(),
                rating: Some(8.4),
                cast: vec![],
                backdrop: None,
                trailer: None,
                platforms: vec![],
            }),
        }
    }

    #[test]
    fn test_live_query_shapes() {
        assert_eq!(
            live_query(ContentKind::Music, &ContentId::Key("bon-iver--blood-bank".to_string())),
            Some(DetailQuery::Album {
                artist: "bon iver".to_string(),
                album: "blood bank".to_string()
            })
        );
        assert_eq!(live_query(ContentKind::Music, &ContentId::Numeric(1)), None);
        assert_eq!(
            live_query(ContentKind::Music, &ContentId::Key("radiohead".to_string())),
            None
        );
        assert_eq!(
            live_query(ContentKind::Game, &ContentId::Numeric(3498)),
            Some(DetailQuery::Id(ContentId::Numeric(3498)))
        );
        assert_eq!(live_query(ContentKind::Film, &ContentId::Key("abc".to_string())), None);
    }

    #[tokio::test]
    async fn test_live_record_wins() {
        let mut film = MockCatalogProvider::new();
        film.expect_get_details()
            .withf(|q| *q == DetailQuery::Id(ContentId::Numeric(27205)))
            .times(1)
            .returning(|_| Ok(Some(inception())));
        film.expect_name().return_const("tmdb");

        let catalogs = CatalogSet {
            game: idle(),
            film: Arc::new(film),
            music: idle(),
        };

        let record = DetailResolver::new(catalogs, true)
            .get_detail(ContentKind::Film, &ContentId::Numeric(27205))
            .await;

        assert_eq!(record.unwrap().title, "Inception");
    }

    #[tokio::test]
    async fn test_catalog_failure_uses_static_table() {
        let mut game = MockCatalogProvider::new();
        game.expect_get_details()
            .returning(|_| Err(AppError::CatalogUnavailable("rawg down".to_string())));
        game.expect_name().return_const("rawg");

        let catalogs = CatalogSet {
            game: Arc::new(game),
            film: idle(),
            music: idle(),
        };

        let record = DetailResolver::new(catalogs, true)
            .get_detail(ContentKind::Game, &ContentId::Numeric(4))
            .await
            .unwrap();

        assert_eq!(record.title, "Silent Hill 2");
    }

    #[tokio::test]
    async fn test_unknown_everywhere_is_none() {
        let mut film = MockCatalogProvider::new();
        film.expect_get_details().returning(|_| Ok(None));
        film.expect_name().return_const("tmdb");

        let catalogs = CatalogSet {
            game: idle(),
            film: Arc::new(film),
            music: idle(),
        };

        let record = DetailResolver::new(catalogs, true)
            .get_detail(ContentKind::Film, &ContentId::Numeric(999_999))
            .await;

        assert!(record.is_none());
    }

    #[tokio::test]
    async fn test_numeric_music_id_skips_catalog() {
        let catalogs = CatalogSet {
            game: idle(),
            film: idle(),
            music: idle(),
        };

        let record = DetailResolver::new(catalogs, true)
            .get_detail(ContentKind::Music, &ContentId::Numeric(1))
            .await
            .unwrap();

        assert_eq!(record.title, "For Emma, Forever Ago");
    }

    #[tokio::test]
    async fn test_unconfigured_skips_catalog() {
        let catalogs = CatalogSet {
            game: idle(),
            film: idle(),
            music: idle(),
        };

        let record = DetailResolver::new(catalogs, false)
            .get_detail(ContentKind::Film, &ContentId::Numeric(3))
            .await
            .unwrap();

        assert_eq!(record.title, "Spirited Away");
    }
}

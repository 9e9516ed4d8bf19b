/// Static content served when the catalogs cannot answer
///
/// Holds one curated bundle per mood, a small table of fully detailed
/// records keyed by (kind, id), and a few covers per showcase kind. Item ids
/// 1-4 follow the mood declaration order so bundle items and detail records
/// share ids.
use crate::models::{
    ContentId, ContentItem, ContentKind, Cover, CoverKind, DetailAttributes, DetailRecord,
    FilmAttributes, FilmDetail, GameAttributes, GameDetail, ImageRef, ItemAttributes, MoodLabel,
    MusicAttributes, MusicDetail, RecommendationBundle, NOT_AVAILABLE,
};

fn na() -> String {
    NOT_AVAILABLE.to_string()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn film(id: u64, title: &str, year: i32, image: &str, mood: MoodLabel) -> ContentItem {
    ContentItem {
        id: ContentId::Numeric(id),
        title: title.to_string(),
        image: ImageRef::placeholder(image),
        moods: vec![mood],
        attributes: ItemAttributes::Film(FilmAttributes {
            year: Some(year),
            duration: na(),
            genres: Vec::new(),
            description: na(),
            rating: None,
        }),
    }
}

fn game(id: u64, title: &str, genre: &str, image: &str, mood: MoodLabel) -> ContentItem {
    ContentItem {
        id: ContentId::Numeric(id),
        title: title.to_string(),
        image: ImageRef::placeholder(image),
        moods: vec![mood],
        attributes: ItemAttributes::Game(GameAttributes {
            genre: genre.to_string(),
            platforms: Vec::new(),
            developer: na(),
            release_year: None,
            rating: None,
            description: na(),
        }),
    }
}

fn album(id: u64, title: &str, artist: &str, image: &str, mood: MoodLabel) -> ContentItem {
    ContentItem {
        id: ContentId::Numeric(id),
        title: title.to_string(),
        image: ImageRef::placeholder(image),
        moods: vec![mood],
        attributes: ItemAttributes::Music(MusicAttributes {
            artist: artist.to_string(),
            year: None,
            genres: Vec::new(),
            url: None,
            playcount: None,
        }),
    }
}

/// Curated bundle for a mood. Always complete.
pub fn bundle_for(mood: MoodLabel) -> RecommendationBundle {
    match mood {
        MoodLabel::Nostalgico => RecommendationBundle::new(
            game(1, "Journey", "Aventura", "🌟", mood),
            film(1, "Your Name", 2016, "🌟", mood),
            album(1, "For Emma, Forever Ago", "Bon Iver", "🌲", mood),
        ),
        MoodLabel::Triste => RecommendationBundle::new(
            game(2, "GRIS", "Aventura Artística", "🎨", mood),
            film(2, "Her", 2013, "💭", mood),
            album(2, "Blonde", "Frank Ocean", "🌊", mood),
        ),
        MoodLabel::Creativo => RecommendationBundle::new(
            game(3, "The Stanley Parable", "Narrativo", "🤔", mood),
            film(3, "Spirited Away", 2001, "🐲", mood),
            album(3, "In Rainbows", "Radiohead", "🌈", mood),
        ),
        MoodLabel::Curioso => RecommendationBundle::new(
            game(4, "Silent Hill 2", "Horror Psicológico", "🎮", mood),
            film(4, "The Grand Budapest Hotel", 2014, "🏨", mood),
            album(4, "American Idiot", "Green Day", "💚", mood),
        ),
    }
}

/// Detailed record from the static table, `None` when the table has no
/// entry for this kind and id.
pub fn detail_for(kind: ContentKind, id: &ContentId) -> Option<DetailRecord> {
    let ContentId::Numeric(id) = id else {
        return None;
    };

    match (kind, id) {
        (ContentKind::Game, 2) => Some(DetailRecord {
            id: ContentId::Numeric(2),
            title: "GRIS".to_string(),
            image: ImageRef::placeholder("🎨"),
            description: "Una experiencia serena y evocadora, libre de peligro, frustración o muerte. Los jugadores explorarán un mundo meticulosamente diseñado que cobra vida con arte delicado, animación detallada y una banda sonora elegante.".to_string(),
            attributes: DetailAttributes::Game(GameDetail {
                genre: "Aventura Artística".to_string(),
                platforms: strings(&["PC", "Switch", "PS4", "Xbox One"]),
                developer: "Nomada Studio".to_string(),
                publisher: "Devolver Digital".to_string(),
                release_date: "2018".to_string(),
                esrb_rating: "E (Everyone)".to_string(),
                metacritic: Some(83),
                screenshots: strings(&["🌈", "🎭", "🦋", "🌸"]),
                tags: strings(&["Arte único", "Música emotiva", "Sin violencia", "Experiencia contemplativa"]),
                website: None,
                reddit: None,
            }),
        }),
        (ContentKind::Game, 4) => Some(DetailRecord {
            id: ContentId::Numeric(4),
            title: "Silent Hill 2".to_string(),
            image: ImageRef::placeholder("🎮"),
            description: "James Sunderland llega a la siniestra ciudad de Silent Hill tras recibir una carta de su difunta esposa. Ahora perdido en la niebla, debe confrontar su propio tormento psicológico en un lugar lleno de horrores.".to_string(),
            attributes: DetailAttributes::Game(GameDetail {
                genre: "Horror Psicológico".to_string(),
                platforms: strings(&["PC", "PS5", "Xbox Series X/S"]),
                developer: "Bloober Team".to_string(),
                publisher: "Konami".to_string(),
                release_date: "2024".to_string(),
                esrb_rating: "M (Mature)".to_string(),
                metacritic: Some(87),
                screenshots: strings(&["🌫️", "🏚️", "👻", "🔦"]),
                tags: strings(&["Historia inmersiva", "Gráficos renovados", "Audio 3D", "Múltiples finales"]),
                website: None,
                reddit: None,
            }),
        }),
        (ContentKind::Film, 1) => Some(DetailRecord {
            id: ContentId::Numeric(1),
            title: "Your Name".to_string(),
            image: ImageRef::placeholder("🌟"),
            description: "Mitsuha y Taki son dos adolescentes que no se conocen, pero están conectados por un fenómeno sobrenatural que les permite intercambiar cuerpos. A medida que navegan por esta extraña situación, desarrollan una conexión profunda.".to_string(),
            attributes: DetailAttributes::Film(FilmDetail {
                year: Some(2016),
                duration: "107 min".to_string(),
                genres: strings(&["Animación", "Romance", "Drama"]),
                director: "Makoto Shinkai".to_string(),
                studio: "CoMix Wave Films".to_string(),
                country: "Japón".to_string(),
                language: "Japonés".to_string(),
                rating: None,
                cast: strings(&["Ryunosuke Kamiki", "Mone Kamishiraishi", "Masami Nagasawa"]),
                backdrop: None,
                trailer: None,
                platforms: strings(&["Netflix", "Crunchyroll", "Amazon Prime"]),
            }),
        }),
        (ContentKind::Film, 3) => Some(DetailRecord {
            id: ContentId::Numeric(3),
            title: "Spirited Away".to_string(),
            image: ImageRef::placeholder("🐲"),
            description: "Chihiro, una niña de 10 años, se muda con sus padres a una nueva ciudad. En el camino, entran en lo que su padre cree que es un parque temático abandonado, pero en realidad es un mundo habitado por espíritus.".to_string(),
            attributes: DetailAttributes::Film(FilmDetail {
                year: Some(2001),
                duration: "125 min".to_string(),
                genres: strings(&["Animación", "Fantasía", "Familia"]),
                director: "Hayao Miyazaki".to_string(),
                studio: "Studio Ghibli".to_string(),
                country: "Japón".to_string(),
                language: "Japonés".to_string(),
                rating: None,
                cast: strings(&["Rumi Hiiragi", "Miyu Irino", "Mari Natsuki"]),
                backdrop: None,
                trailer: None,
                platforms: strings(&["HBO Max", "Netflix", "Amazon Prime"]),
            }),
        }),
        (ContentKind::Music, 1) => Some(DetailRecord {
            id: ContentId::Numeric(1),
            title: "For Emma, Forever Ago".to_string(),
            image: ImageRef::placeholder("🌲"),
            description: "Grabado en una cabaña remota en Wisconsin durante el invierno, este álbum debut captura la soledad y la introspección con una belleza etérea y melancólica.".to_string(),
            attributes: DetailAttributes::Music(MusicDetail {
                artist: "Bon Iver".to_string(),
                year: Some(2007),
                genres: strings(&["Indie Folk", "Alternative"]),
                duration: "37 min".to_string(),
                tracks: Some(9),
                top_tracks: strings(&["Skinny Love", "Re: Stacks", "Flume", "For Emma"]),
                url: None,
                playcount: None,
                label: "Jagjaguwar".to_string(),
                platforms: strings(&["Spotify", "Apple Music", "Bandcamp", "Vinyl"]),
            }),
        }),
        (ContentKind::Music, 4) => Some(DetailRecord {
            id: ContentId::Numeric(4),
            title: "American Idiot".to_string(),
            image: ImageRef::placeholder("💚"),
            description: "Álbum conceptual que critica la sociedad estadounidense post-11 de septiembre. Marcó el regreso triunfal de Green Day con un sonido más maduro y teatral.".to_string(),
            attributes: DetailAttributes::Music(MusicDetail {
                artist: "Green Day".to_string(),
                year: Some(2004),
                genres: strings(&["Punk Rock", "Alternative Rock"]),
                duration: "57 min".to_string(),
                tracks: Some(13),
                top_tracks: strings(&[
                    "American Idiot",
                    "Boulevard of Broken Dreams",
                    "Holiday",
                    "Wake Me Up When September Ends",
                ]),
                url: None,
                playcount: None,
                label: "Reprise Records".to_string(),
                platforms: strings(&["Spotify", "Apple Music", "YouTube Music", "Amazon Music"]),
            }),
        }),
        _ => None,
    }
}

fn cover(
    id: u64,
    title: &str,
    kind: CoverKind,
    year: i32,
    rating: f64,
    genre: &str,
    artist: Option<&str>,
) -> Cover {
    Cover {
        id: ContentId::Numeric(id),
        title: title.to_string(),
        image: None,
        kind,
        year: Some(year),
        rating,
        genre: genre.to_string(),
        artist: artist.map(str::to_string),
    }
}

/// Static covers for a kind, at most `limit` of them
pub fn covers_for(kind: CoverKind, limit: usize) -> Vec<Cover> {
    let covers = match kind {
        CoverKind::Movie => vec![
            cover(1, "Avatar", kind, 2009, 8.5, "Sci-Fi", None),
            cover(2, "Titanic", kind, 1997, 8.8, "Romance", None),
            cover(3, "Avengers", kind, 2019, 8.4, "Action", None),
            cover(4, "Inception", kind, 2010, 8.8, "Sci-Fi", None),
            cover(5, "Interstellar", kind, 2014, 8.6, "Sci-Fi", None),
        ],
        CoverKind::Series => vec![
            cover(1, "Breaking Bad", kind, 2008, 9.5, "Drama", None),
            cover(2, "Game of Thrones", kind, 2011, 9.3, "Fantasy", None),
            cover(3, "Stranger Things", kind, 2016, 8.7, "Sci-Fi", None),
            cover(4, "The Office", kind, 2005, 8.9, "Comedy", None),
            cover(5, "Friends", kind, 1994, 8.9, "Comedy", None),
        ],
        CoverKind::Game => vec![
            cover(1, "The Witcher 3", kind, 2015, 9.3, "RPG", None),
            cover(2, "Red Dead Redemption 2", kind, 2018, 9.7, "Action", None),
            cover(3, "Cyberpunk 2077", kind, 2020, 7.2, "RPG", None),
            cover(4, "God of War", kind, 2018, 9.4, "Action", None),
            cover(5, "Minecraft", kind, 2011, 8.0, "Sandbox", None),
        ],
        CoverKind::Music => vec![
            cover(1, "Abbey Road", kind, 1969, 9.5, "Rock", Some("The Beatles")),
            cover(2, "Dark Side of the Moon", kind, 1973, 9.7, "Rock", Some("Pink Floyd")),
            cover(3, "Thriller", kind, 1982, 9.3, "Pop", Some("Michael Jackson")),
            cover(4, "Back in Black", kind, 1980, 9.1, "Rock", Some("AC/DC")),
            cover(5, "Nevermind", kind, 1991, 8.9, "Grunge", Some("Nirvana")),
        ],
    };

    covers.into_iter().take(limit).collect()
}

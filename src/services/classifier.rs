use crate::models::{EmotionalState, MoodLabel};

/// Picks the dominant mood: the axis with the highest value, earliest
/// declared axis on ties.
pub fn classify(state: &EmotionalState) -> MoodLabel {
    let mut dominant = MoodLabel::ALL[0];
    for (axis, value) in state.iter().skip(1) {
        if value > state.get(dominant) {
            dominant = axis;
        }
    }
    dominant
}

/// Provider filters for one mood
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTags {
    /// TMDB movie genre ids, comma separated
    pub movie_genres: &'static str,
    /// TMDB tv genre ids, comma separated
    pub series_genres: &'static str,
    /// RAWG genre slugs, comma separated
    pub game_genres: &'static str,
    /// Last.fm tags, most specific first
    pub music_tags: &'static [&'static str],
}

impl SearchTags {
    /// Last.fm only accepts one tag per call
    pub fn primary_music_tag(&self) -> &'static str {
        self.music_tags.first().copied().unwrap_or("indie")
    }
}

pub fn search_tags(mood: MoodLabel) -> SearchTags {
    match mood {
        MoodLabel::Nostalgico => SearchTags {
            movie_genres: "18,10749",
            series_genres: "18,10765",
            game_genres: "indie,adventure",
            music_tags: &["nostalgic", "indie", "alternative"],
        },
        MoodLabel::Triste => SearchTags {
            movie_genres: "18,10402",
            series_genres: "18",
            game_genres: "indie,adventure,puzzle",
            music_tags: &["sad", "melancholic", "indie"],
        },
        MoodLabel::Creativo => SearchTags {
            movie_genres: "16,878",
            series_genres: "16,10765",
            game_genres: "indie,puzzle,simulation",
            music_tags: &["experimental", "electronic", "indie"],
        },
        MoodLabel::Curioso => SearchTags {
            movie_genres: "9648,53,27",
            series_genres: "9648,80",
            game_genres: "adventure,puzzle,strategy",
            music_tags: &["alternative", "rock", "electronic"],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highest_axis_wins() {
        assert_eq!(classify(&EmotionalState::new(10, 20, 95, 30)), MoodLabel::Creativo);
        assert_eq!(classify(&EmotionalState::new(10, 99, 20, 30)), MoodLabel::Triste);
        assert_eq!(classify(&EmotionalState::default()), MoodLabel::Curioso);
    }

    #[test]
    fn test_ties_resolve_to_earliest_axis() {
        assert_eq!(classify(&EmotionalState::new(70, 20, 20, 70)), MoodLabel::Nostalgico);
        assert_eq!(classify(&EmotionalState::new(10, 40, 40, 40)), MoodLabel::Triste);
        assert_eq!(classify(&EmotionalState::new(0, 0, 0, 0)), MoodLabel::Nostalgico);
    }

    #[test]
    fn test_every_state_maps_to_a_known_label() {
        for n in (0..=100).step_by(25) {
            for c in (0..=100).step_by(25) {
                let mood = classify(&EmotionalState::new(n, 50, c, 50));
                assert!(MoodLabel::ALL.contains(&mood));
            }
        }
    }

    #[test]
    fn test_search_tags() {
        let tags = search_tags(MoodLabel::Curioso);
        assert_eq!(tags.movie_genres, "9648,53,27");
        assert_eq!(tags.game_genres, "adventure,puzzle,strategy");
        assert_eq!(tags.primary_music_tag(), "alternative");
        assert_eq!(search_tags(MoodLabel::Triste).primary_music_tag(), "sad");
    }
}

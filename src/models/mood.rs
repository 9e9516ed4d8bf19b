use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

use crate::error::AppError;

/// Upper bound of every emotional axis
pub const AXIS_MAX: u8 = 100;

/// Neutral slider position; drift is measured from here
pub const AXIS_NEUTRAL: u8 = 50;

/// Distance from neutral above which an axis counts as a significant change
pub const DRIFT_THRESHOLD: u8 = 20;

/// One of the four moods.
///
/// The same enumeration names the axes of [`EmotionalState`]. Declaration
/// order matters: it is the tie-break order used by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodLabel {
    Nostalgico,
    Triste,
    Creativo,
    Curioso,
}

impl MoodLabel {
    /// All moods in declaration order
    pub const ALL: [MoodLabel; 4] = [
        MoodLabel::Nostalgico,
        MoodLabel::Triste,
        MoodLabel::Creativo,
        MoodLabel::Curioso,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodLabel::Nostalgico => "nostalgico",
            MoodLabel::Triste => "triste",
            MoodLabel::Creativo => "creativo",
            MoodLabel::Curioso => "curioso",
        }
    }

    /// Short message shown next to the recommendations for this mood
    pub fn summary(&self) -> &'static str {
        match self {
            MoodLabel::Nostalgico => {
                "Tu semana fue muy nostálgica... ¿Quieres seguir así o cambiar de aires?"
            }
            MoodLabel::Triste => {
                "Has estado un poco melancólico... Te recomendamos algo que te anime."
            }
            MoodLabel::Creativo => "Tu lado creativo está en su mejor momento. ¡Aprovéchalo!",
            MoodLabel::Curioso => {
                "Tu curiosidad está al máximo. Perfecto para descubrir cosas nuevas."
            }
        }
    }

    /// Parses a mood name, falling back to the first declared mood when the
    /// name is unknown.
    pub fn parse_or_default(name: &str) -> MoodLabel {
        name.parse().unwrap_or_else(|_| {
            tracing::debug!(mood = %name, "Unknown mood label, defaulting to nostalgico");
            MoodLabel::ALL[0]
        })
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl Display for MoodLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MoodLabel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        MoodLabel::ALL
            .into_iter()
            .find(|mood| mood.as_str() == normalized)
            .ok_or_else(|| AppError::InvalidInput(format!("Unknown mood: {}", s)))
    }
}

/// Slider values for the four mood axes, each in `0..=100`.
///
/// Serialized as `{"nostalgico": 70, "triste": 20, ...}`; all four axes are
/// required when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawEmotionalState", into = "RawEmotionalState")]
pub struct EmotionalState {
    values: [u8; 4],
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawEmotionalState {
    nostalgico: u8,
    triste: u8,
    creativo: u8,
    curioso: u8,
}

impl TryFrom<RawEmotionalState> for EmotionalState {
    type Error = String;

    fn try_from(raw: RawEmotionalState) -> Result<Self, Self::Error> {
        let values = [raw.nostalgico, raw.triste, raw.creativo, raw.curioso];
        if let Some(mood) = MoodLabel::ALL
            .into_iter()
            .find(|mood| values[mood.index()] > AXIS_MAX)
        {
            return Err(format!(
                "axis {} must be between 0 and {}",
                mood, AXIS_MAX
            ));
        }
        Ok(Self { values })
    }
}

impl From<EmotionalState> for RawEmotionalState {
    fn from(state: EmotionalState) -> Self {
        Self {
            nostalgico: state.get(MoodLabel::Nostalgico),
            triste: state.get(MoodLabel::Triste),
            creativo: state.get(MoodLabel::Creativo),
            curioso: state.get(MoodLabel::Curioso),
        }
    }
}

impl Default for EmotionalState {
    /// Slider positions at the start of a session
    fn default() -> Self {
        Self {
            values: [70, 20, 60, 80],
        }
    }
}

impl EmotionalState {
    /// Builds a state from values given in axis declaration order, clamping
    /// each to the valid range.
    pub fn new(nostalgico: u8, triste: u8, creativo: u8, curioso: u8) -> Self {
        Self {
            values: [nostalgico, triste, creativo, curioso].map(|v| v.min(AXIS_MAX)),
        }
    }

    pub fn get(&self, axis: MoodLabel) -> u8 {
        self.values[axis.index()]
    }

    /// Replaces a single axis value
    pub fn set(&mut self, axis: MoodLabel, value: u8) {
        self.values[axis.index()] = value.min(AXIS_MAX);
    }

    /// Axis/value pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (MoodLabel, u8)> + '_ {
        MoodLabel::ALL.into_iter().map(|axis| (axis, self.get(axis)))
    }

    /// Whether any axis sits far enough from neutral to warrant an automatic
    /// refresh of the recommendations.
    pub fn has_significant_drift(&self) -> bool {
        self.values
            .iter()
            .any(|value| value.abs_diff(AXIS_NEUTRAL) > DRIFT_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_label_serialization() {
        let json = serde_json::to_string(&MoodLabel::Creativo).unwrap();
        assert_eq!(json, "\"creativo\"");

        let mood: MoodLabel = serde_json::from_str("\"curioso\"").unwrap();
        assert_eq!(mood, MoodLabel::Curioso);
    }

    #[test]
    fn test_mood_label_from_str_is_lenient_about_case() {
        assert_eq!(" Triste ".parse::<MoodLabel>().unwrap(), MoodLabel::Triste);
        assert!("feliz".parse::<MoodLabel>().is_err());
    }

    #[test]
    fn test_parse_or_default_falls_back_to_first_mood() {
        assert_eq!(MoodLabel::parse_or_default("feliz"), MoodLabel::Nostalgico);
        assert_eq!(MoodLabel::parse_or_default("curioso"), MoodLabel::Curioso);
    }

    #[test]
    fn test_emotional_state_roundtrips_as_map() {
        let state = EmotionalState::new(90, 10, 10, 10);
        let json = serde_json::to_value(state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"nostalgico": 90, "triste": 10, "creativo": 10, "curioso": 10})
        );
    }

    #[test]
    fn test_emotional_state_requires_all_axes() {
        let result: Result<EmotionalState, _> =
            serde_json::from_str(r#"{"nostalgico": 90, "triste": 10, "creativo": 10}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_emotional_state_rejects_out_of_range() {
        let result: Result<EmotionalState, _> = serde_json::from_str(
            r#"{"nostalgico": 101, "triste": 10, "creativo": 10, "curioso": 10}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_set_replaces_one_axis_and_clamps() {
        let mut state = EmotionalState::default();
        state.set(MoodLabel::Triste, 250);

        assert_eq!(state.get(MoodLabel::Triste), 100);
        assert_eq!(state.get(MoodLabel::Nostalgico), 70);
        assert_eq!(state.get(MoodLabel::Creativo), 60);
        assert_eq!(state.get(MoodLabel::Curioso), 80);
    }

    #[test]
    fn test_significant_drift() {
        assert!(!EmotionalState::new(50, 60, 40, 70).has_significant_drift());
        assert!(EmotionalState::new(50, 50, 50, 71).has_significant_drift());
        assert!(EmotionalState::new(29, 50, 50, 50).has_significant_drift());
        assert!(EmotionalState::default().has_significant_drift());
    }
}

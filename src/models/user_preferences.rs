use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkinType {
    Dry,
    Oily,
    Combination,
    #[default]
    Normal,
    Sensitive,
}

impl SkinType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkinType::Dry => "dry",
            SkinType::Oily => "oily",
            SkinType::Combination => "combination",
            SkinType::Normal => "normal",
            SkinType::Sensitive => "sensitive",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitnessLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl FitnessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessLevel::Beginner => "beginner",
            FitnessLevel::Intermediate => "intermediate",
            FitnessLevel::Advanced => "advanced",
            FitnessLevel::Expert => "expert",
        }
    }
}

/// Stage of the menstrual cycle, used to reorder recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclePhase {
    Menstrual,
    Follicular,
    Ovulatory,
    Luteal,
}

impl CyclePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            CyclePhase::Menstrual => "menstrual",
            CyclePhase::Follicular => "follicular",
            CyclePhase::Ovulatory => "ovulatory",
            CyclePhase::Luteal => "luteal",
        }
    }

    /// Catalog tag marking content for this phase (e.g. "luteal phase")
    pub fn tag(&self) -> String {
        format!("{} phase", self.as_str())
    }
}

impl Display for CyclePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Loosely filled preference profile as supplied by the caller
///
/// Every field is optional; an absent field means no filtering on that
/// dimension. Defaults from [`UserPreferences::normalize`] only feed synthesis.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserPreferences {
    #[serde(default)]
    pub skin_type: Option<SkinType>,
    #[serde(default)]
    pub fitness_level: Option<FitnessLevel>,
    /// Mental focus areas in the order the user entered them
    #[serde(default)]
    pub mental_focus: Option<Vec<String>>,
    #[serde(default)]
    pub style_preferences: Option<Vec<String>>,
    #[serde(default)]
    pub nutrition_preferences: Option<Vec<String>>,
    #[serde(default)]
    pub cycle_phase: Option<CyclePhase>,
    #[serde(default)]
    pub mood: Option<String>,
}

impl UserPreferences {
    /// Creates an empty profile
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_skin_type(mut self, skin_type: SkinType) -> Self {
        self.skin_type = Some(skin_type);
        self
    }

    pub fn with_fitness_level(mut self, level: FitnessLevel) -> Self {
        self.fitness_level = Some(level);
        self
    }

    pub fn with_mental_focus<I, S>(mut self, focus: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mental_focus = Some(focus.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_style_preferences<I, S>(mut self, styles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.style_preferences = Some(styles.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_nutrition_preferences<I, S>(mut self, prefs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nutrition_preferences = Some(prefs.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_cycle_phase(mut self, phase: CyclePhase) -> Self {
        self.cycle_phase = Some(phase);
        self
    }

    pub fn with_mood(mut self, mood: impl Into<String>) -> Self {
        self.mood = Some(mood.into());
        self
    }

    /// Fills defaults for every dimension the filters and synthesis consume
    ///
    /// Skin type falls back to `normal`, fitness level to `beginner`; the
    /// caller's own choice is kept separately so filters skip dimensions
    /// that were never set. Tag lists are trimmed and blank entries dropped;
    /// a blank mood is treated as absent. Never fails.
    pub fn normalize(&self) -> NormalizedPreferences {
        NormalizedPreferences {
            skin_type: self.skin_type.unwrap_or_default(),
            fitness_level: self.fitness_level.unwrap_or_default(),
            skin_filter: self.skin_type,
            fitness_filter: self.fitness_level,
            mental_focus: clean_tags(self.mental_focus.as_deref()),
            style_preferences: clean_tags(self.style_preferences.as_deref()),
            nutrition_preferences: clean_tags(self.nutrition_preferences.as_deref()),
            cycle_phase: self.cycle_phase,
            mood: self
                .mood
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string),
        }
    }
}

fn clean_tags(tags: Option<&[String]>) -> Vec<String> {
    tags.unwrap_or_default()
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Profile with defaults applied, consumed by filters and synthesis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedPreferences {
    pub skin_type: SkinType,
    pub fitness_level: FitnessLevel,
    /// Skin type as supplied; `None` disables skincare filtering
    pub skin_filter: Option<SkinType>,
    /// Fitness level as supplied; `None` disables fitness filtering
    pub fitness_filter: Option<FitnessLevel>,
    pub mental_focus: Vec<String>,
    pub style_preferences: Vec<String>,
    pub nutrition_preferences: Vec<String>,
    pub cycle_phase: Option<CyclePhase>,
    pub mood: Option<String>,
}

impl Default for NormalizedPreferences {
    fn default() -> Self {
        UserPreferences::default().normalize()
    }
}

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt::Display, sync::Arc};

pub mod routine;
pub mod user_preferences;

pub use routine::{RoutineCategory, RoutineSuggestion, TimeOfDay};
pub use user_preferences::{
    CyclePhase, FitnessLevel, NormalizedPreferences, SkinType, UserPreferences,
};

/// Recommendation category, one tab of the recommendations page
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Skincare,
    Fitness,
    Mental,
    Style,
    Nutrition,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Skincare,
        Category::Fitness,
        Category::Mental,
        Category::Style,
        Category::Nutrition,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Skincare => "skincare",
            Category::Fitness => "fitness",
            Category::Mental => "mental",
            Category::Style => "style",
            Category::Nutrition => "nutrition",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A single recommendation shown to the user
///
/// Catalog records are immutable and shared through `Arc`; synthesized records
/// are built per call and carry `ai_generated = true`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    /// Stable identifier, unique within its category
    pub id: String,
    pub category: Category,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    /// Human readable duration label (e.g. "15 minutes")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Free-text labels matched against preference dimensions
    #[serde(default)]
    pub tags: Vec<String>,
    /// Whether the record was synthesized from the user's profile
    #[serde(default)]
    pub ai_generated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personalized_reason: Option<String>,
}

impl Recommendation {
    /// Creates a catalog record with no optional fields set
    pub fn new(
        id: impl Into<String>,
        category: Category,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            title: title.into(),
            description: description.into(),
            image_url: None,
            difficulty: None,
            duration: None,
            tags: Vec::new(),
            ai_generated: false,
            personalized_reason: None,
        }
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Marks the record as synthesized and attaches the reason shown to the user
    pub fn personalized(mut self, reason: impl Into<String>) -> Self {
        self.ai_generated = true;
        self.personalized_reason = Some(reason.into());
        self
    }

    /// Whole-tag match, ignoring ASCII case
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Recommendations keyed by category
///
/// Every category is always present, possibly with an empty list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct RecommendationSet {
    by_category: BTreeMap<Category, Vec<Arc<Recommendation>>>,
}

impl Default for RecommendationSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl RecommendationSet {
    /// A set with every category present and empty
    pub fn empty() -> Self {
        Self {
            by_category: Category::ALL.iter().map(|c| (*c, Vec::new())).collect(),
        }
    }

    /// Replaces the list for a category
    pub fn insert(&mut self, category: Category, recommendations: Vec<Arc<Recommendation>>) {
        self.by_category.insert(category, recommendations);
    }

    pub fn get(&self, category: Category) -> &[Arc<Recommendation>] {
        self.by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &[Arc<Recommendation>])> {
        self.by_category.iter().map(|(c, recs)| (*c, recs.as_slice()))
    }

    /// Total number of recommendations across categories
    pub fn len(&self) -> usize {
        self.by_category.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

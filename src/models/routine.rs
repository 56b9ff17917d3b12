use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutineCategory {
    Beauty,
    Fitness,
    Mental,
    Nutrition,
    Personal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

/// A suggested item for the user's daily routine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoutineSuggestion {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: RoutineCategory,
    pub duration_minutes: u32,
    pub time_of_day: TimeOfDay,
    pub reminder_enabled: bool,
    /// Reminder clock time as "HH:MM"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<String>,
}

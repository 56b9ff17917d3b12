use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;

use crate::{
    error::{AppError, AppResult},
    models::{RoutineCategory, RoutineSuggestion, TimeOfDay},
};

/// Maximum number of suggestions returned for one set of goals
pub const MAX_SUGGESTIONS: usize = 6;

/// Maximum number of goals accepted in one request
pub const MAX_GOALS: usize = 20;

/// Longest duration a suggestion can carry: one day
pub const MAX_DURATION_MINUTES: u32 = 24 * 60;

/// "30 min", "45 minutes"
fn duration_pattern() -> &'static Regex {
    static PATTERN: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(\d+)\s*min").expect("Valid duration regex"));
    &PATTERN
}

/// "20 min" or a range such as "10-30 mins"
fn duration_range_pattern() -> &'static Regex {
    static PATTERN: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(\d+)(?:\s*-\s*(\d+))?\s*min").expect("Valid duration range regex")
    });
    &PATTERN
}

/// Generates routine suggestions with a simulated backend delay
#[derive(Debug, Clone)]
pub struct RoutineSuggester {
    latency: Duration,
}

impl RoutineSuggester {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// Validates the goals, waits out the simulated latency and builds suggestions
    pub async fn suggest(&self, goals: &[String]) -> AppResult<Vec<RoutineSuggestion>> {
        if goals.len() > MAX_GOALS {
            return Err(AppError::InvalidInput(format!(
                "At most {} goals can be submitted at once",
                MAX_GOALS
            )));
        }

        tracing::info!(goal_count = goals.len(), "Generating routine suggestions");
        tokio::time::sleep(self.latency).await;

        let suggestions = suggest_routines(goals);
        tracing::info!(suggestions = suggestions.len(), "Routine suggestions generated");
        Ok(suggestions)
    }
}

/// Keyword-driven suggestions for a list of free-text goals
///
/// Each goal may trigger several rules. With no match at all, two default
/// routines are returned. At most [`MAX_SUGGESTIONS`] are kept.
pub fn suggest_routines(goals: &[String]) -> Vec<RoutineSuggestion> {
    let mut suggestions = Vec::new();

    for (index, goal) in goals.iter().enumerate() {
        let goal = goal.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| goal.contains(w));
        let id = |rule: u32| format!("suggestion-{}-{}", index, rule);

        if has(&["skin", "face", "cleanse"]) {
            let suggestion = if has(&["morning", "am"]) {
                routine(
                    id(1),
                    "Morning Skincare Routine",
                    "Cleanse, tone, moisturize, and apply sunscreen to protect your skin throughout the day.",
                    RoutineCategory::Beauty,
                    10,
                    TimeOfDay::Morning,
                )
                .with_reminder("07:00")
            } else if has(&["evening", "night", "pm"]) {
                routine(
                    id(2),
                    "Evening Skincare Routine",
                    "Double cleanse, exfoliate (if needed), apply serum, moisturize, and use night cream.",
                    RoutineCategory::Beauty,
                    15,
                    TimeOfDay::Evening,
                )
                .with_reminder("21:00")
            } else {
                routine(
                    id(3),
                    "Daily Skincare Routine",
                    "Complete your personalized skincare regimen for healthy, glowing skin.",
                    RoutineCategory::Beauty,
                    10,
                    TimeOfDay::Morning,
                )
                .reminder_on()
            };
            suggestions.push(suggestion);
        }

        if has(&["hair", "detangle", "rejuvenate"]) {
            let time = if has(&["morning"]) {
                TimeOfDay::Morning
            } else {
                TimeOfDay::Evening
            };
            suggestions.push(routine(
                id(4),
                "Hair Care Routine",
                "Detangle, apply hair treatment, and style your hair for the day.",
                RoutineCategory::Beauty,
                15,
                time,
            ));
        }

        if has(&["workout", "exercise", "fitness", "gym", "legs", "cardio"]) {
            let (title, description) = if has(&["leg"]) {
                (
                    "Leg Workout",
                    "Focus on strengthening and toning your legs with targeted exercises.",
                )
            } else if has(&["cardio"]) {
                ("Cardio Session", "Get your heart rate up with an energizing cardio workout.")
            } else if has(&["strength", "weight"]) {
                (
                    "Strength Training",
                    "Build muscle and increase strength with resistance exercises.",
                )
            } else {
                (
                    "Daily Workout",
                    "Complete your daily exercise routine for better health and fitness.",
                )
            };
            let duration = minutes(&goal).unwrap_or(30);
            suggestions.push(
                routine(
                    id(5),
                    title,
                    description,
                    RoutineCategory::Fitness,
                    duration,
                    time_of_day(&goal, TimeOfDay::Afternoon),
                )
                .reminder_on(),
            );
        }

        if has(&["read", "book"]) {
            let duration = minutes_or_range(&goal).unwrap_or(20);
            let time = if has(&["morning"]) {
                TimeOfDay::Morning
            } else if has(&["afternoon"]) {
                TimeOfDay::Afternoon
            } else {
                TimeOfDay::Evening
            };
            suggestions.push(routine(
                id(6),
                "Reading Time",
                format!("Dedicate {} minutes to reading for knowledge and relaxation.", duration),
                RoutineCategory::Personal,
                duration,
                time,
            ));
        }

        if has(&["meditat", "mindful", "relax", "mental", "affirmation"]) {
            let suggestion = if has(&["affirmation"]) {
                routine(
                    id(7),
                    "Daily Affirmations",
                    "Practice positive affirmations to boost confidence and mental wellbeing.",
                    RoutineCategory::Mental,
                    5,
                    TimeOfDay::Morning,
                )
            } else {
                routine(
                    id(8),
                    "Meditation Session",
                    "Take time to center yourself with mindful meditation.",
                    RoutineCategory::Mental,
                    10,
                    time_of_day(&goal, TimeOfDay::Afternoon),
                )
            };
            suggestions.push(suggestion.reminder_on());
        }

        if has(&["meal", "nutrition", "eat", "diet", "food"]) {
            let time = if has(&["morning"]) {
                TimeOfDay::Morning
            } else if has(&["evening"]) {
                TimeOfDay::Evening
            } else {
                TimeOfDay::Afternoon
            };
            suggestions.push(routine(
                id(9),
                "Healthy Meal Preparation",
                "Prepare nutritious meals that support your wellness goals.",
                RoutineCategory::Nutrition,
                30,
                time,
            ));
        }

        if has(&["self", "care", "time"]) {
            suggestions.push(routine(
                id(10),
                "Self-Care Time",
                "Dedicate time to activities that bring you joy and relaxation.",
                RoutineCategory::Personal,
                20,
                TimeOfDay::Evening,
            ));
        }
    }

    if suggestions.is_empty() {
        suggestions.push(
            routine(
                "suggestion-default-1",
                "Morning Wellness Routine",
                "Start your day with intention through a combination of skincare, light exercise, and mindfulness.",
                RoutineCategory::Personal,
                20,
                TimeOfDay::Morning,
            )
            .reminder_on(),
        );
        suggestions.push(
            routine(
                "suggestion-default-2",
                "Evening Wind-Down",
                "Prepare your mind and body for restful sleep with a calming routine.",
                RoutineCategory::Mental,
                15,
                TimeOfDay::Evening,
            )
            .reminder_on(),
        );
    }

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

fn routine(
    id: impl Into<String>,
    title: impl Into<String>,
    description: impl Into<String>,
    category: RoutineCategory,
    duration_minutes: u32,
    time_of_day: TimeOfDay,
) -> RoutineSuggestion {
    RoutineSuggestion {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        category,
        duration_minutes,
        time_of_day,
        reminder_enabled: false,
        reminder_time: None,
    }
}

impl RoutineSuggestion {
    fn reminder_on(mut self) -> Self {
        self.reminder_enabled = true;
        self
    }

    fn with_reminder(mut self, time: &str) -> Self {
        self.reminder_enabled = true;
        self.reminder_time = Some(time.to_string());
        self
    }
}

/// Morning / evening-or-night / fallback
fn time_of_day(goal: &str, fallback: TimeOfDay) -> TimeOfDay {
    if goal.contains("morning") {
        TimeOfDay::Morning
    } else if goal.contains("evening") || goal.contains("night") {
        TimeOfDay::Evening
    } else {
        fallback
    }
}

fn minutes(goal: &str) -> Option<u32> {
    duration_pattern()
        .captures(goal)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u64>().ok())
        .map(cap_minutes)
}

/// Single duration, or the rounded-down midpoint of a range
fn minutes_or_range(goal: &str) -> Option<u32> {
    let caps = duration_range_pattern().captures(goal)?;
    let low: u64 = caps.get(1)?.as_str().parse().ok()?;
    let minutes = match caps.get(2).and_then(|m| m.as_str().parse::<u64>().ok()) {
        Some(high) => low / 2 + high / 2 + (low % 2 + high % 2) / 2,
        None => low,
    };
    Some(cap_minutes(minutes))
}

fn cap_minutes(minutes: u64) -> u32 {
    minutes.min(u64::from(MAX_DURATION_MINUTES)) as u32
}

use std::sync::Arc;

use crate::{
    models::{
        Category, Difficulty, FitnessLevel, NormalizedPreferences, Recommendation,
        RecommendationSet,
    },
    services::catalog::Catalog,
};

/// Maximum recommendations returned per category
pub const MAX_PER_CATEGORY: usize = 3;

/// Filters every category of the catalog against the profile
pub fn filter_all(catalog: &Catalog, prefs: &NormalizedPreferences) -> RecommendationSet {
    let mut set = RecommendationSet::empty();
    for category in Category::ALL {
        set.insert(category, filter_category(catalog.slice(category), category, prefs));
    }
    set
}

/// Selects up to [`MAX_PER_CATEGORY`] records from one category slice
///
/// 1. keep records matching the category's primary dimension, or the whole
///    slice if nothing matches
/// 2. move records tagged `"{phase} phase"` to the front
/// 3. for fitness and mental, when no phase match moved anything, move
///    records tagged with the mood to the front
/// 4. truncate
///
/// Every reordering is a stable partition. Returned records are the slice's
/// own `Arc`s.
pub fn filter_category(
    slice: &[Arc<Recommendation>],
    category: Category,
    prefs: &NormalizedPreferences,
) -> Vec<Arc<Recommendation>> {
    let candidates = narrow_or_keep(slice, |rec| matches_primary(category, rec, prefs));

    let (mut ordered, phase_matched) = match prefs.cycle_phase {
        Some(phase) => {
            let tag = phase.tag();
            prioritize(candidates, |rec| rec.has_tag(&tag))
        }
        None => (candidates, false),
    };

    // A phase match already decides the order; mood only breaks the tie when it didn't.
    if !phase_matched && considers_mood(category) {
        if let Some(mood) = prefs.mood.as_deref() {
            ordered = prioritize(ordered, |rec| rec.has_tag(mood)).0;
        }
    }

    ordered.truncate(MAX_PER_CATEGORY);
    ordered
}

fn considers_mood(category: Category) -> bool {
    matches!(category, Category::Fitness | Category::Mental)
}

/// Primary-dimension predicate for a category
///
/// Dimensions the caller never set (no skin type, no mental focus) accept every record.
fn matches_primary(category: Category, rec: &Recommendation, prefs: &NormalizedPreferences) -> bool {
    match category {
        Category::Skincare => match prefs.skin_filter {
            Some(skin) => rec.has_tag(skin.as_str()) || rec.has_tag("all skin types"),
            None => true,
        },
        Category::Fitness => prefs
            .fitness_filter
            .map_or(true, |level| matches_fitness_level(rec, level)),
        Category::Mental => matches_any(rec, &prefs.mental_focus),
        Category::Style => matches_any(rec, &prefs.style_preferences),
        Category::Nutrition => matches_any(rec, &prefs.nutrition_preferences),
    }
}

/// Level tag match, or a difficulty inside the level's band
fn matches_fitness_level(rec: &Recommendation, level: FitnessLevel) -> bool {
    if rec.has_tag(level.as_str()) {
        return true;
    }

    match level {
        FitnessLevel::Beginner => rec.difficulty == Some(Difficulty::Easy),
        FitnessLevel::Intermediate => matches!(
            rec.difficulty,
            Some(Difficulty::Easy) | Some(Difficulty::Medium)
        ),
        FitnessLevel::Advanced | FitnessLevel::Expert => rec.difficulty != Some(Difficulty::Easy),
    }
}

fn matches_any(rec: &Recommendation, wanted: &[String]) -> bool {
    wanted.is_empty() || wanted.iter().any(|tag| rec.has_tag(tag))
}

/// Keeps matching records, falling back to the full slice when none match
fn narrow_or_keep<F>(slice: &[Arc<Recommendation>], predicate: F) -> Vec<Arc<Recommendation>>
where
    F: Fn(&Recommendation) -> bool,
{
    let narrowed: Vec<Arc<Recommendation>> = slice
        .iter()
        .filter(|rec| predicate(rec))
        .cloned()
        .collect();

    if narrowed.is_empty() {
        slice.to_vec()
    } else {
        narrowed
    }
}

/// Stable partition with matches first; the flag reports whether anything matched
fn prioritize<F>(items: Vec<Arc<Recommendation>>, predicate: F) -> (Vec<Arc<Recommendation>>, bool)
where
    F: Fn(&Recommendation) -> bool,
{
    let (mut front, rest): (Vec<_>, Vec<_>) = items.into_iter().partition(|rec| predicate(rec));
    let matched = !front.is_empty();
    front.extend(rest);
    (front, matched)
}

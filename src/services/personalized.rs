use std::sync::Arc;

use crate::models::{
    Category, Difficulty, FitnessLevel, NormalizedPreferences, Recommendation, RecommendationSet,
};

/// Builds profile-derived recommendations, two per category
///
/// No catalog lookup and no randomness: identical profiles produce identical
/// sets. Every record is marked `ai_generated` and carries a personalized reason.
pub fn synthesize(prefs: &NormalizedPreferences) -> RecommendationSet {
    let mut set = RecommendationSet::empty();
    set.insert(Category::Skincare, wrap(skincare(prefs)));
    set.insert(Category::Fitness, wrap(fitness(prefs)));
    set.insert(Category::Mental, wrap(mental(prefs)));
    set.insert(Category::Style, wrap(style(prefs)));
    set.insert(Category::Nutrition, wrap(nutrition(prefs)));
    set
}

fn wrap(records: Vec<Recommendation>) -> Vec<Arc<Recommendation>> {
    records.into_iter().map(Arc::new).collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn image(photo: &str) -> String {
    format!("https://images.unsplash.com/photo-{}?w=500&q=80", photo)
}

fn skincare(prefs: &NormalizedPreferences) -> Vec<Recommendation> {
    let skin = prefs.skin_type.as_str();

    let routine = Recommendation::new(
        "ai-skin-1",
        Category::Skincare,
        format!("AI Routine for {} Skin", capitalize(skin)),
        format!(
            "A personalized skincare routine designed specifically for your {} skin type, considering your current concerns and goals.",
            skin
        ),
    )
    .with_image(image("1556228578-0d85b1a4d571"))
    .with_duration("10 minutes")
    .with_tags([skin, "personalized", "AI-generated"])
    .personalized(format!(
        "Based on your {} skin type and current concerns, this routine focuses on optimal hydration and protection.",
        skin
    ));

    let cycle = match prefs.cycle_phase {
        Some(phase) => Recommendation::new(
            "ai-skin-2",
            Category::Skincare,
            format!("{} Phase Skincare", capitalize(phase.as_str())),
            "Skincare recommendations that adapt to your hormonal cycle for optimal results.",
        )
        .with_tags([phase.tag().as_str(), "hormonal balance", "skincare"])
        .personalized(format!(
            "During your {} phase, your skin needs specific care to address hormonal changes.",
            phase
        )),
        None => Recommendation::new(
            "ai-skin-2",
            Category::Skincare,
            "Adaptive Skincare",
            "Skincare recommendations that adapt to your hormonal cycle for optimal results.",
        )
        .with_tags(["adaptive", "hormonal balance", "skincare"])
        .personalized("This routine adapts to your current skin needs."),
    }
    .with_image(image("1576091160550-2173dba999ef"))
    .with_duration("8 minutes");

    vec![routine, cycle]
}

fn fitness(prefs: &NormalizedPreferences) -> Vec<Recommendation> {
    let level = prefs.fitness_level.as_str();
    let difficulty = match prefs.fitness_level {
        FitnessLevel::Beginner => Difficulty::Easy,
        FitnessLevel::Intermediate => Difficulty::Medium,
        FitnessLevel::Advanced | FitnessLevel::Expert => Difficulty::Hard,
    };

    let plan = Recommendation::new(
        "ai-fitness-1",
        Category::Fitness,
        format!("AI {} Workout Plan", capitalize(level)),
        format!(
            "A personalized workout routine tailored to your {} fitness level and goals.",
            level
        ),
    )
    .with_image(image("1571019613454-1cb2f99b2d8b"))
    .with_difficulty(difficulty)
    .with_duration("25 minutes")
    .with_tags([level, "personalized", "AI-generated"])
    .personalized(format!(
        "This workout is designed for your {} level, focusing on progressive improvement while preventing burnout.",
        level
    ));

    let mood = match prefs.mood.as_deref() {
        Some(mood) => Recommendation::new(
            "ai-fitness-2",
            Category::Fitness,
            format!("Mood-Boosting {} Workout", capitalize(mood)),
            "Exercise designed to complement and enhance your current mood state.",
        )
        .with_tags([mood, "mood-enhancement", "energy"])
        .personalized(format!(
            "When you're feeling {}, this workout helps optimize your energy and mental state.",
            mood
        )),
        None => Recommendation::new(
            "ai-fitness-2",
            Category::Fitness,
            "Energy-Balancing Exercise",
            "Exercise designed to complement and enhance your current mood state.",
        )
        .with_tags(["balanced", "mood-enhancement", "energy"])
        .personalized("This workout adapts to your current energy levels."),
    }
    .with_image(image("1518611012118-696072aa579a"))
    .with_difficulty(Difficulty::Medium)
    .with_duration("20 minutes");

    vec![plan, mood]
}

fn mental(prefs: &NormalizedPreferences) -> Vec<Recommendation> {
    let focus = &prefs.mental_focus;

    let (title, reason) = match focus.first() {
        Some(first) => (
            format!("AI {} Support", capitalize(first)),
            format!(
                "Focusing on your {} concerns with targeted mental wellness techniques.",
                focus.join(", ")
            ),
        ),
        None => (
            "Mental Wellness Boost".to_string(),
            "General mental wellness support tailored to your profile.".to_string(),
        ),
    };
    let support = Recommendation::new(
        "ai-mental-1",
        Category::Mental,
        title,
        "Personalized mental wellness practices based on your current focus areas and needs.",
    )
    .with_image(image("1506126613408-eca07ce68773"))
    .with_duration("15 minutes")
    .with_tags(
        focus
            .iter()
            .map(String::as_str)
            .chain(["mindfulness", "personalized"]),
    )
    .personalized(reason);

    let cycle = match prefs.cycle_phase {
        Some(phase) => Recommendation::new(
            "ai-mental-2",
            Category::Mental,
            format!("{} Phase Mental Support", capitalize(phase.as_str())),
            "Mental wellness practices that adapt to your hormonal cycle and current mood.",
        )
        .with_tags([phase.tag().as_str(), "hormonal balance", "mental"])
        .personalized(format!(
            "During your {} phase, these mental wellness techniques help balance mood fluctuations.",
            phase
        )),
        None => Recommendation::new(
            "ai-mental-2",
            Category::Mental,
            "Adaptive Mental Wellness",
            "Mental wellness practices that adapt to your hormonal cycle and current mood.",
        )
        .with_tags(["adaptive", "hormonal balance", "mental"])
        .personalized("These techniques adapt to your current mental state."),
    }
    .with_image(image("1528319725582-ddc096101511"))
    .with_duration("10 minutes");

    vec![support, cycle]
}

fn style(prefs: &NormalizedPreferences) -> Vec<Recommendation> {
    let styles = &prefs.style_preferences;

    let (title, reason) = match styles.first() {
        Some(first) => (
            format!("AI {} Style Guide", capitalize(first)),
            format!(
                "Enhancing your {} style preferences with personalized recommendations.",
                styles.join(", ")
            ),
        ),
        None => (
            "Personal Style Enhancement".to_string(),
            "Style recommendations based on your profile and current trends.".to_string(),
        ),
    };
    let guide = Recommendation::new(
        "ai-style-1",
        Category::Style,
        title,
        "Personalized style recommendations based on your preferences and current trends.",
    )
    .with_image(image("1489987707025-afc232f7ea0f"))
    .with_tags(
        styles
            .iter()
            .map(String::as_str)
            .chain(["personalized", "current trends"]),
    )
    .personalized(reason);

    let cycle = match prefs.cycle_phase {
        Some(phase) => Recommendation::new(
            "ai-style-2",
            Category::Style,
            format!("{} Phase Style Guide", capitalize(phase.as_str())),
            "Style recommendations that adapt to your hormonal cycle and comfort needs.",
        )
        .with_tags([phase.tag().as_str(), "comfort", "style"])
        .personalized(format!(
            "During your {} phase, these style choices optimize both comfort and confidence.",
            phase
        )),
        None => Recommendation::new(
            "ai-style-2",
            Category::Style,
            "Adaptive Style Guide",
            "Style recommendations that adapt to your hormonal cycle and comfort needs.",
        )
        .with_tags(["adaptive", "comfort", "style"])
        .personalized("These style recommendations adapt to your current comfort needs."),
    }
    .with_image(image("1515886657613-9f3515b0c78f"));

    vec![guide, cycle]
}

fn nutrition(prefs: &NormalizedPreferences) -> Vec<Recommendation> {
    let diet = &prefs.nutrition_preferences;

    let (title, reason) = match diet.first() {
        Some(first) => (
            format!("AI {} Meal Plan", capitalize(first)),
            format!(
                "These meal suggestions follow your {} preferences while supporting your overall wellness goals.",
                diet.join(", ")
            ),
        ),
        None => (
            "AI Personalized Meal Plan".to_string(),
            "These meal suggestions are designed to support your overall wellness goals while considering your preferences.".to_string(),
        ),
    };
    let mut plan_tags: Vec<&str> = diet.iter().map(String::as_str).collect();
    if plan_tags.is_empty() {
        plan_tags.push("balanced");
    }
    plan_tags.extend(["personalized", "nutrition"]);

    let plan = Recommendation::new(
        "ai-nutrition-1",
        Category::Nutrition,
        title,
        "Nutritional recommendations tailored to your health goals and preferences.",
    )
    .with_image(image("1512621776951-a57141f2eefd"))
    .with_duration("Weekly plan")
    .with_tags(plan_tags)
    .personalized(reason);

    let cycle = match prefs.cycle_phase {
        Some(phase) => Recommendation::new(
            "ai-nutrition-2",
            Category::Nutrition,
            format!("{} Phase Nutrition", capitalize(phase.as_str())),
            "Nutritional recommendations that support hormonal balance throughout your cycle.",
        )
        .with_tags([phase.tag().as_str(), "nutrition", "wellness"])
        .personalized(format!(
            "During your {} phase, these foods help support your body's changing nutritional needs.",
            phase
        )),
        None => Recommendation::new(
            "ai-nutrition-2",
            Category::Nutrition,
            "Hormone-Balancing Nutrition",
            "Nutritional recommendations that support hormonal balance throughout your cycle.",
        )
        .with_tags(["hormonal balance", "nutrition", "wellness"])
        .personalized("These nutritional choices support hormonal balance throughout your cycle."),
    }
    .with_image(image("1505253716362-afaea1d3d1af"))
    .with_duration("Daily suggestions");

    vec![plan, cycle]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CyclePhase, SkinType, UserPreferences};

    #[test]
    fn test_empty_profile_uses_defaults() {
        let set = synthesize(&UserPreferences::new().normalize());

        let skincare = set.get(Category::Skincare);
        assert_eq!(skincare[0].title, "AI Routine for Normal Skin");
        assert_eq!(skincare[1].title, "Adaptive Skincare");

        let fitness = set.get(Category::Fitness);
        assert_eq!(fitness[0].title, "AI Beginner Workout Plan");
        assert_eq!(fitness[0].difficulty, Some(Difficulty::Easy));
        assert_eq!(fitness[1].title, "Energy-Balancing Exercise");

        assert_eq!(set.get(Category::Mental)[0].title, "Mental Wellness Boost");
        assert_eq!(set.get(Category::Style)[0].title, "Personal Style Enhancement");
        assert_eq!(set.get(Category::Nutrition)[0].title, "AI Personalized Meal Plan");
    }

    #[test]
    fn test_two_synthesized_records_per_category() {
        let set = synthesize(&UserPreferences::new().normalize());
        for category in Category::ALL {
            let recs = set.get(category);
            assert_eq!(recs.len(), 2, "category {}", category);
            assert!(recs.iter().all(|r| r.ai_generated));
            assert!(recs.iter().all(|r| r.personalized_reason.is_some()));
            assert!(recs.iter().all(|r| r.category == category));
        }
    }

    #[test]
    fn test_profile_fields_are_templated() {
        let prefs = UserPreferences::new()
            .with_skin_type(SkinType::Combination)
            .with_fitness_level(FitnessLevel::Intermediate)
            .with_mental_focus(["anxiety", "sleep"])
            .with_style_preferences(["minimalist", "professional"])
            .with_cycle_phase(CyclePhase::Follicular)
            .with_mood("energetic")
            .normalize();
        let set = synthesize(&prefs);

        assert_eq!(set.get(Category::Skincare)[0].title, "AI Routine for Combination Skin");
        assert_eq!(set.get(Category::Skincare)[1].title, "Follicular Phase Skincare");
        assert_eq!(set.get(Category::Fitness)[0].difficulty, Some(Difficulty::Medium));
        assert_eq!(set.get(Category::Fitness)[1].title, "Mood-Boosting Energetic Workout");
        assert_eq!(set.get(Category::Mental)[0].title, "AI Anxiety Support");
        assert_eq!(
            set.get(Category::Mental)[0].personalized_reason.as_deref(),
            Some("Focusing on your anxiety, sleep concerns with targeted mental wellness techniques.")
        );
        assert!(set.get(Category::Mental)[0].has_tag("sleep"));
        assert_eq!(set.get(Category::Style)[0].title, "AI Minimalist Style Guide");
        assert!(set.get(Category::Style)[1].has_tag("follicular phase"));
    }

    #[test]
    fn test_expert_maps_to_hard() {
        let prefs = UserPreferences::new()
            .with_fitness_level(FitnessLevel::Expert)
            .normalize();
        let set = synthesize(&prefs);
        assert_eq!(set.get(Category::Fitness)[0].difficulty, Some(Difficulty::Hard));
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let prefs = UserPreferences::new()
            .with_nutrition_preferences(["plant-based"])
            .with_cycle_phase(CyclePhase::Luteal)
            .normalize();
        assert_eq!(synthesize(&prefs), synthesize(&prefs));
        assert_eq!(
            synthesize(&prefs).get(Category::Nutrition)[0].title,
            "AI Plant-based Meal Plan"
        );
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("oily"), "Oily");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("über"), "Über");
    }
}

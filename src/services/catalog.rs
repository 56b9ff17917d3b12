use std::{
    collections::{HashMap, HashSet},
    path::Path,
    sync::Arc,
};

use crate::{
    error::{AppError, AppResult},
    models::{Category, Difficulty, Recommendation},
};

/// Read-only recommendation catalog, grouped by category
///
/// Built once at startup and shared through `Arc`. Slices keep the order the
/// records were supplied in; filters rely on that order for tie-breaking.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: HashMap<Category, Vec<Arc<Recommendation>>>,
}

impl Catalog {
    /// Builds a catalog from records, rejecting duplicate ids within a category
    pub fn from_records(records: Vec<Recommendation>) -> AppResult<Self> {
        let mut seen: HashSet<(Category, String)> = HashSet::new();
        for record in &records {
            if !seen.insert((record.category, record.id.clone())) {
                return Err(AppError::InvalidInput(format!(
                    "Duplicate recommendation id '{}' in category {}",
                    record.id, record.category
                )));
            }
        }

        Ok(Self::group(records))
    }

    /// Loads a catalog from a JSON array of records
    pub fn from_json_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let records: Vec<Recommendation> = serde_json::from_str(&raw)?;

        tracing::info!(
            path = %path.display(),
            records = records.len(),
            "Loaded catalog from file"
        );

        Self::from_records(records)
    }

    /// Records for one category in catalog order
    pub fn slice(&self, category: Category) -> &[Arc<Recommendation>] {
        self.entries
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of records
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn group(records: Vec<Recommendation>) -> Self {
        let mut entries: HashMap<Category, Vec<Arc<Recommendation>>> = HashMap::new();
        for record in records {
            entries.entry(record.category).or_default().push(Arc::new(record));
        }
        Self { entries }
    }

    /// The built-in wellness catalog
    pub fn builtin() -> Self {
        Self::group(builtin_records())
    }
}

fn unsplash(photo: &str) -> String {
    format!("https://images.unsplash.com/photo-{}?w=500&q=80", photo)
}

fn builtin_records() -> Vec<Recommendation> {
    use Category::*;

    vec![
        // Skincare
        Recommendation::new("s1", Skincare, "Hydrating Face Mask", "A soothing mask perfect for dry or sensitive skin types.")
            .with_image(unsplash("1570172619644-dfd03ed5d881"))
            .with_duration("15 minutes")
            .with_tags(["dry", "sensitive", "hydration"]),
        Recommendation::new("s2", Skincare, "Oil Control Routine", "A three-step routine to manage oily skin and prevent breakouts.")
            .with_image(unsplash("1556228578-0d85b1a4d571"))
            .with_duration("10 minutes")
            .with_tags(["oily", "acne-prone", "cleansing"]),
        Recommendation::new("s3", Skincare, "Gentle Exfoliation", "A mild exfoliation technique suitable for all skin types.")
            .with_image(unsplash("1567721913486-6585f069b332"))
            .with_duration("5 minutes")
            .with_tags(["all skin types", "exfoliation", "glow"]),
        Recommendation::new("s4", Skincare, "Hormonal Acne Treatment", "Targeted care for hormonal breakouts during luteal phase.")
            .with_image(unsplash("1576091160550-2173dba999ef"))
            .with_duration("10 minutes")
            .with_tags(["hormonal", "acne", "luteal phase"]),
        Recommendation::new("s5", Skincare, "Calming Redness Routine", "Soothe irritated skin with these gentle products and techniques.")
            .with_image(unsplash("1596755094514-f87e34085b2c"))
            .with_duration("8 minutes")
            .with_tags(["sensitive", "redness", "calming"]),
        // Fitness
        Recommendation::new("f1", Fitness, "Low-Impact Morning Stretch", "Gentle stretching routine to start your day with energy.")
            .with_image(unsplash("1552196563-55cd4e45efb3"))
            .with_difficulty(Difficulty::Easy)
            .with_duration("10 minutes")
            .with_tags(["beginner", "stretching", "morning"]),
        Recommendation::new("f2", Fitness, "HIIT Cardio Blast", "High-intensity interval training to boost metabolism.")
            .with_image(unsplash("1571019613454-1cb2f99b2d8b"))
            .with_difficulty(Difficulty::Hard)
            .with_duration("25 minutes")
            .with_tags(["advanced", "cardio", "weight loss"]),
        Recommendation::new("f3", Fitness, "Menstrual Phase Yoga", "Gentle yoga poses designed for comfort during your period.")
            .with_image(unsplash("1506126613408-eca07ce68773"))
            .with_difficulty(Difficulty::Easy)
            .with_duration("20 minutes")
            .with_tags(["menstrual phase", "yoga", "comfort"]),
        Recommendation::new("f4", Fitness, "Energy-Boosting Workout", "Medium intensity workout perfect for the follicular phase.")
            .with_image(unsplash("1518611012118-696072aa579a"))
            .with_difficulty(Difficulty::Medium)
            .with_duration("30 minutes")
            .with_tags(["follicular phase", "energy", "strength"]),
        Recommendation::new("f5", Fitness, "Mood-Lifting Dance Routine", "Fun dance workout to improve mood and energy levels.")
            .with_image(unsplash("1535648451240-482a0bbd6e02"))
            .with_difficulty(Difficulty::Medium)
            .with_duration("15 minutes")
            .with_tags(["mood", "dance", "energy"]),
        // Mental
        Recommendation::new("m1", Mental, "Guided Anxiety Relief", "A calming meditation focused on reducing anxiety.")
            .with_image(unsplash("1506126613408-eca07ce68773"))
            .with_duration("10 minutes")
            .with_tags(["anxiety", "meditation", "calm"]),
        Recommendation::new("m2", Mental, "Sleep Improvement Routine", "Evening practices to help you fall asleep faster and sleep better.")
            .with_image(unsplash("1511295742362-92c96b5adb63"))
            .with_duration("15 minutes")
            .with_tags(["sleep", "evening", "relaxation"]),
        Recommendation::new("m3", Mental, "PMS Mood Support", "Mindfulness techniques to manage mood swings during luteal phase.")
            .with_image(unsplash("1528319725582-ddc096101511"))
            .with_duration("12 minutes")
            .with_tags(["luteal phase", "mood", "PMS"]),
        Recommendation::new("m4", Mental, "Focus Enhancement", "Techniques to improve concentration and productivity.")
            .with_image(unsplash("1522202176988-66273c2fd55f"))
            .with_duration("8 minutes")
            .with_tags(["focus", "productivity", "work"]),
        Recommendation::new("m5", Mental, "Self-Compassion Practice", "Exercises to develop greater kindness toward yourself.")
            .with_image(unsplash("1499209974431-9dddcece7f88"))
            .with_duration("10 minutes")
            .with_tags(["self-love", "compassion", "mental health"]),
        // Style
        Recommendation::new("st1", Style, "Minimalist Capsule Wardrobe", "Create a versatile wardrobe with fewer, high-quality pieces.")
            .with_image(unsplash("1489987707025-afc232f7ea0f"))
            .with_tags(["minimalist", "capsule", "sustainable"]),
        Recommendation::new("st2", Style, "Color Analysis Guide", "Discover which colors complement your skin tone best.")
            .with_image(unsplash("1526406915894-7bcd65f60845"))
            .with_tags(["color analysis", "personal style", "skin tone"]),
        Recommendation::new("st3", Style, "Comfortable Period Outfits", "Stylish yet comfortable outfit ideas for your menstrual phase.")
            .with_image(unsplash("1515886657613-9f3515b0c78f"))
            .with_tags(["menstrual phase", "comfort", "style"]),
        Recommendation::new("st4", Style, "Confidence-Boosting Looks", "Outfit formulas designed to help you feel your best during important moments.")
            .with_image(unsplash("1483985988355-763728e1935b"))
            .with_tags(["confidence", "professional", "special occasion"]),
        Recommendation::new("st5", Style, "Seasonal Color Trends", "Current season color trends and how to incorporate them.")
            .with_image(unsplash("1520006403909-838d6b92c22e"))
            .with_tags(["trends", "seasonal", "color"]),
        // Nutrition
        Recommendation::new("n1", Nutrition, "Iron-Rich Recovery Bowl", "Replenish iron and warmth with lentils, leafy greens and ginger during your period.")
            .with_image(unsplash("1512621776951-a57141f2eefd"))
            .with_duration("20 minutes")
            .with_tags(["menstrual phase", "iron", "balanced"]),
        Recommendation::new("n2", Nutrition, "Plant-Based Protein Plate", "A simple plate built around tofu, legumes and seeds for steady energy.")
            .with_duration("15 minutes")
            .with_tags(["plant-based", "protein", "energy"]),
        Recommendation::new("n3", Nutrition, "Balanced Mediterranean Week", "A week of meals centered on vegetables, whole grains and healthy fats.")
            .with_duration("Weekly plan")
            .with_tags(["balanced", "mediterranean", "heart health"]),
        Recommendation::new("n4", Nutrition, "Magnesium Comfort Meals", "Complex carbs and magnesium-rich foods to ease cravings before your period.")
            .with_image(unsplash("1505253716362-afaea1d3d1af"))
            .with_duration("Daily suggestions")
            .with_tags(["luteal phase", "cravings", "magnesium"]),
        Recommendation::new("n5", Nutrition, "Fresh Follicular Greens", "Light, fiber-rich salads and fermented foods to match rising energy.")
            .with_duration("10 minutes")
            .with_tags(["follicular phase", "plant-based", "fiber"]),
    ]
}

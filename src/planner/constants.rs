use crate::models::{ExchangeCategory, MacroAmounts};

// ─────────────────────────────────────────────────────────────────────────────
// Energy estimation
// ─────────────────────────────────────────────────────────────────────────────

/// Coefficients of one branch of the revised Harris-Benedict equation.
///
/// BMR = intercept + weight * kg + height * cm - age * years
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarrisBenedict {
    pub intercept: f64,
    pub weight: f64,
    pub height: f64,
    pub age: f64,
}

pub const HARRIS_BENEDICT_MALE: HarrisBenedict = HarrisBenedict {
    intercept: 66.5,
    weight: 13.75,
    height: 5.003,
    age: 6.755,
};

pub const HARRIS_BENEDICT_FEMALE: HarrisBenedict = HarrisBenedict {
    intercept: 655.1,
    weight: 9.563,
    height: 1.850,
    age: 4.676,
};

/// Stress factor applied when none is selected.
pub const DEFAULT_STRESS_FACTOR: f64 = 1.0;

/// Activity factor applied when none is selected (sedentary).
pub const DEFAULT_ACTIVITY_FACTOR: f64 = 1.2;

// ─────────────────────────────────────────────────────────────────────────────
// Macronutrients
// ─────────────────────────────────────────────────────────────────────────────

/// Atwater factors in kcal/g (carbohydrate, protein, fat).
pub const ATWATER_FACTORS: MacroAmounts = MacroAmounts::new(4.0, 4.0, 9.0);

/// Default energy split in percent (carbohydrate, protein, fat).
pub const DEFAULT_MACRO_SPLIT: MacroAmounts = MacroAmounts::new(50.0, 20.0, 30.0);

/// Macro percentages are expected to add up to this.
pub const PERCENTAGE_SUM_TARGET: f64 = 100.0;

/// Allowed drift of the percentage sum before an advisory is raised.
pub const PERCENTAGE_SUM_TOLERANCE: f64 = 1.0;

/// Largest accepted percentage for a single macronutrient.
pub const MAX_MACRO_PERCENTAGE: f64 = 100.0;

/// Fractional deviation of an exchange tally from its gram target that
/// triggers an advisory.
pub const EXCHANGE_DEVIATION_TOLERANCE: f64 = 0.10;

// ─────────────────────────────────────────────────────────────────────────────
// Lookup tables
// ─────────────────────────────────────────────────────────────────────────────

/// (key, label, factor)
pub const STRESS_LEVELS: &[(&str, &str, f64)] = &[
    ("none", "None", 1.0),
    ("mild", "Mild illness, minor surgery", 1.2),
    ("moderate", "Moderate infection or surgery", 1.3),
    ("major", "Major trauma, burns", 1.4),
    ("severe", "Severe stress", 1.5),
];

/// (key, label, factor)
pub const ACTIVITY_LEVELS: &[(&str, &str, f64)] = &[
    ("sedentary", "Sedentary", 1.2),
    ("light", "Light activity", 1.375),
    ("moderate", "Moderate activity", 1.55),
    ("very-active", "Very active", 1.725),
    ("extra-active", "Extra active", 1.9),
];

/// (key, label, percent of body weight)
pub const AMPUTATIONS: &[(&str, &str, f64)] = &[
    ("none", "None", 0.0),
    ("hand-foot", "Hand or foot", 0.8),
    ("below-knee", "Below-knee amputation", 5.9),
    ("above-knee", "Above-knee amputation", 11.0),
    ("leg", "Entire leg", 16.0),
    ("lower-arm", "Lower arm and hand", 2.3),
    ("arm", "Entire arm", 5.0),
];

/// Grams of (carbohydrate, protein, fat) in one exchange.
pub const EXCHANGE_CONTENT: &[(ExchangeCategory, MacroAmounts)] = &[
    (ExchangeCategory::Starch, MacroAmounts::new(15.0, 3.0, 0.0)),
    (ExchangeCategory::Sugar, MacroAmounts::new(5.0, 0.0, 0.0)),
    (ExchangeCategory::Vegetables, MacroAmounts::new(5.0, 2.0, 0.0)),
    (ExchangeCategory::Fruit, MacroAmounts::new(15.0, 0.0, 0.0)),
    (ExchangeCategory::Protein, MacroAmounts::new(0.0, 7.0, 3.0)),
    (ExchangeCategory::Milk, MacroAmounts::new(12.0, 8.0, 5.0)),
    (ExchangeCategory::Fat, MacroAmounts::new(0.0, 0.0, 5.0)),
    (ExchangeCategory::Alcohol, MacroAmounts::new(5.0, 0.0, 0.0)),
];

/// (description, MET)
pub const MET_ACTIVITIES: &[(&str, f64)] = &[
    ("Aerobics, general", 7.3),
    ("Basketball, general", 6.5),
    ("Bicycling, leisure, 10-11.9 mph", 6.8),
    ("Bicycling, stationary, moderate effort", 6.8),
    ("Dancing, general", 7.8),
    ("Elliptical trainer, moderate effort", 5.0),
    ("Gardening, general, moderate effort", 3.8),
    ("Hiking, cross country", 6.0),
    ("Household cleaning, general, moderate effort", 3.5),
    ("Resistance training, multiple exercises, 8-15 reps", 3.5),
    ("Rowing, stationary, moderate effort", 4.8),
    ("Running, 5 mph (12 min/mile)", 8.3),
    ("Running, 6 mph (10 min/mile)", 9.8),
    ("Soccer, casual, general", 7.0),
    ("Stretching, mild", 2.3),
    ("Swimming laps, freestyle, light or moderate effort", 5.8),
    ("Tennis, singles", 8.0),
    ("Walking, 3.0 mph, level, moderate pace", 3.5),
    ("Walking, 4.0 mph, level, very brisk pace", 5.0),
    ("Yoga, Hatha", 2.5),
];

/// Minimum Jaro-Winkler similarity for a fuzzy METs match to be offered.
pub const MET_MATCH_THRESHOLD: f64 = 0.7;

/// Maximum number of METs candidates offered for a query.
pub const MET_MATCH_LIMIT: usize = 5;

// ─────────────────────────────────────────────────────────────────────────────
// Body composition references
// ─────────────────────────────────────────────────────────────────────────────

/// Healthy body fat ranges in percent: (min age, max age, male, female).
/// Ages outside every bracket use [`BODY_FAT_FALLBACK`].
pub const BODY_FAT_RANGES: &[(u32, u32, (f64, f64), (f64, f64))] = &[
    (20, 39, (8.0, 19.0), (21.0, 32.0)),
    (40, 59, (11.0, 21.0), (23.0, 33.0)),
];

/// (male, female) range for ages outside [`BODY_FAT_RANGES`].
pub const BODY_FAT_FALLBACK: ((f64, f64), (f64, f64)) = ((13.0, 24.0), (24.0, 35.0));

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::models::{ProfileInputs, Sex};
use crate::planner::constants::{
    BODY_FAT_FALLBACK, BODY_FAT_RANGES, HARRIS_BENEDICT_FEMALE, HARRIS_BENEDICT_MALE,
    HarrisBenedict,
};

/// Energy target together with the intermediate values it was built from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergyEstimate {
    /// Weight after the amputation adjustment (kg).
    pub adjusted_weight_kg: f64,
    pub bmr_kcal: f64,
    /// BMR scaled by stress and activity factors.
    pub base_tdee_kcal: f64,
    /// Sum of the fixed pregnancy/lactation, goal and custom additions.
    pub adjustments_kcal: f64,
    pub exercise_kcal: f64,
    /// Final daily energy target.
    pub tdee_kcal: f64,
}

impl EnergyEstimate {
    /// Final TDEE per kilogram of adjusted weight.
    pub fn kcal_per_kg(&self) -> f64 {
        if self.adjusted_weight_kg > 0.0 {
            self.tdee_kcal / self.adjusted_weight_kg
        } else {
            0.0
        }
    }
}

/// Reference body weight after an amputation adjustment.
///
/// The adjustment raises the weight, estimating the pre-amputation mass.
pub fn adjusted_weight(weight_kg: f64, amputation_pct: f64) -> f64 {
    if amputation_pct > 0.0 {
        weight_kg * (1.0 + amputation_pct / 100.0)
    } else {
        weight_kg
    }
}

fn coefficients(sex: Sex) -> HarrisBenedict {
    match sex {
        Sex::Male => HARRIS_BENEDICT_MALE,
        Sex::Female => HARRIS_BENEDICT_FEMALE,
    }
}

/// Basal metabolic rate from the revised Harris-Benedict equation.
pub fn basal_metabolic_rate(sex: Sex, weight_kg: f64, height_cm: f64, age_years: u32) -> f64 {
    let c = coefficients(sex);
    c.intercept + c.weight * weight_kg + c.height * height_cm - c.age * age_years as f64
}

/// kcal burned by an activity of `met_value` for `duration_minutes`.
pub fn exercise_kcal(met_value: f64, weight_kg: f64, duration_minutes: f64) -> f64 {
    met_value * weight_kg * (duration_minutes / 60.0)
}

/// Estimate total daily energy expenditure for a profile.
///
/// Formula: BMR * stress * activity + fixed adjustments + exercise
pub fn estimate_tdee(profile: &ProfileInputs) -> Result<EnergyEstimate> {
    profile.validate()?;

    let weight = profile.basis_weight();
    let adjusted_weight_kg = adjusted_weight(weight, profile.amputation_pct);
    let bmr_kcal = basal_metabolic_rate(
        profile.sex,
        adjusted_weight_kg,
        profile.height_cm,
        profile.age_years,
    );
    let base_tdee_kcal = bmr_kcal * profile.stress_factor * profile.activity_factor;
    let adjustments_kcal = profile.adjustments.total();

    // METs are priced on the unadjusted calculation weight.
    let exercise_kcal = profile
        .exercise
        .as_ref()
        .map(|e| exercise_kcal(e.met_value, weight, e.duration_minutes))
        .unwrap_or(0.0);

    let tdee_kcal = base_tdee_kcal + adjustments_kcal + exercise_kcal;

    debug!(
        adjusted_weight_kg,
        bmr_kcal, base_tdee_kcal, adjustments_kcal, exercise_kcal, tdee_kcal, "estimated TDEE"
    );

    Ok(EnergyEstimate {
        adjusted_weight_kg,
        bmr_kcal,
        base_tdee_kcal,
        adjustments_kcal,
        exercise_kcal,
        tdee_kcal,
    })
}

/// Body mass index (kg/m²).
pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    if height_m > 0.0 {
        weight_kg / (height_m * height_m)
    } else {
        0.0
    }
}

/// Healthy body fat percentage band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyFatRange {
    pub min_pct: f64,
    pub max_pct: f64,
}

impl BodyFatRange {
    pub fn contains(&self, body_fat_pct: f64) -> bool {
        (self.min_pct..=self.max_pct).contains(&body_fat_pct)
    }
}

/// Reference body fat range for a sex and age.
pub fn ideal_body_fat_range(sex: Sex, age_years: u32) -> BodyFatRange {
    let (male, female) = BODY_FAT_RANGES
        .iter()
        .find(|(min_age, max_age, _, _)| (*min_age..=*max_age).contains(&age_years))
        .map(|&(_, _, male, female)| (male, female))
        .unwrap_or(BODY_FAT_FALLBACK);

    let (min_pct, max_pct) = match sex {
        Sex::Male => male,
        Sex::Female => female,
    };
    BodyFatRange { min_pct, max_pct }
}

/// Body composition figures shown next to the energy target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyComposition {
    pub bmi: f64,
    pub ideal_body_fat: BodyFatRange,
    pub body_fat_pct: Option<f64>,
    /// Whether the measured body fat lies in the ideal range.
    pub body_fat_in_range: Option<bool>,
}

impl BodyComposition {
    pub fn for_profile(profile: &ProfileInputs) -> Self {
        let ideal_body_fat = ideal_body_fat_range(profile.sex, profile.age_years);
        Self {
            bmi: bmi(profile.weight_kg, profile.height_cm),
            ideal_body_fat,
            body_fat_pct: profile.body_fat_pct,
            body_fat_in_range: profile.body_fat_pct.map(|pct| ideal_body_fat.contains(pct)),
        }
    }
}

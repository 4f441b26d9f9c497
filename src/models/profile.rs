use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::planner::constants::{DEFAULT_ACTIVITY_FACTOR, DEFAULT_STRESS_FACTOR};

/// Biological sex, which selects the Harris-Benedict coefficient set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

/// Fixed kcal additions applied after the stress and activity factors.
///
/// Values may be negative (a weight-loss goal is usually a deficit).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KcalAdjustments {
    pub pregnancy_lactation: f64,
    pub goal: f64,
    pub custom: f64,
}

impl KcalAdjustments {
    pub fn total(&self) -> f64 {
        self.pregnancy_lactation + self.goal + self.custom
    }
}

/// A single bout of exercise, priced by its MET intensity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSession {
    /// Activity description, when it came from the METs table.
    pub description: Option<String>,
    pub met_value: f64,
    pub duration_minutes: f64,
}

impl ExerciseSession {
    pub fn new(met_value: f64, duration_minutes: f64) -> Self {
        Self {
            description: None,
            met_value,
            duration_minutes,
        }
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Body metrics and adjustment factors for one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileInputs {
    /// Actual body weight (kg).
    pub weight_kg: f64,

    /// Weight used for calculations, when it differs from the actual weight.
    pub calc_weight_kg: Option<f64>,

    pub height_cm: f64,
    pub age_years: u32,
    pub sex: Sex,
    pub stress_factor: f64,
    pub activity_factor: f64,

    /// Amputation adjustment (percent of body weight), 0 when none.
    pub amputation_pct: f64,

    pub adjustments: KcalAdjustments,
    pub exercise: Option<ExerciseSession>,

    /// Measured body fat percentage, if known.
    pub body_fat_pct: Option<f64>,
}

impl ProfileInputs {
    /// Profile with neutral stress, sedentary activity and no adjustments.
    pub fn new(weight_kg: f64, height_cm: f64, age_years: u32, sex: Sex) -> Self {
        Self {
            weight_kg,
            calc_weight_kg: None,
            height_cm,
            age_years,
            sex,
            stress_factor: DEFAULT_STRESS_FACTOR,
            activity_factor: DEFAULT_ACTIVITY_FACTOR,
            amputation_pct: 0.0,
            adjustments: KcalAdjustments::default(),
            exercise: None,
            body_fat_pct: None,
        }
    }

    pub fn with_factors(mut self, stress_factor: f64, activity_factor: f64) -> Self {
        self.stress_factor = stress_factor;
        self.activity_factor = activity_factor;
        self
    }

    pub fn with_calc_weight(mut self, calc_weight_kg: f64) -> Self {
        self.calc_weight_kg = Some(calc_weight_kg);
        self
    }

    pub fn with_amputation(mut self, amputation_pct: f64) -> Self {
        self.amputation_pct = amputation_pct;
        self
    }

    pub fn with_adjustments(mut self, adjustments: KcalAdjustments) -> Self {
        self.adjustments = adjustments;
        self
    }

    pub fn with_exercise(mut self, exercise: ExerciseSession) -> Self {
        self.exercise = Some(exercise);
        self
    }

    pub fn with_body_fat(mut self, body_fat_pct: f64) -> Self {
        self.body_fat_pct = Some(body_fat_pct);
        self
    }

    /// Weight that every per-kilogram figure is based on.
    pub fn basis_weight(&self) -> f64 {
        self.calc_weight_kg.unwrap_or(self.weight_kg)
    }

    /// Reject physically meaningless values before any arithmetic runs.
    pub fn validate(&self) -> Result<()> {
        require_positive("weight", self.weight_kg)?;
        if let Some(calc) = self.calc_weight_kg {
            require_positive("calculation weight", calc)?;
        }
        require_positive("height", self.height_cm)?;
        if self.age_years == 0 {
            return Err(PlannerError::InvalidInput(
                "age must be greater than 0".to_string(),
            ));
        }
        require_positive("stress factor", self.stress_factor)?;
        require_positive("activity factor", self.activity_factor)?;
        require_non_negative("amputation adjustment", self.amputation_pct)?;

        let adjustments = [
            ("pregnancy/lactation kcal", self.adjustments.pregnancy_lactation),
            ("goal kcal", self.adjustments.goal),
            ("custom kcal", self.adjustments.custom),
        ];
        for (name, value) in adjustments {
            if !value.is_finite() {
                return Err(PlannerError::InvalidInput(format!(
                    "{} must be a finite number",
                    name
                )));
            }
        }

        if let Some(exercise) = &self.exercise {
            require_non_negative("MET value", exercise.met_value)?;
            require_non_negative("exercise duration", exercise.duration_minutes)?;
        }

        if let Some(body_fat) = self.body_fat_pct {
            require_non_negative("body fat", body_fat)?;
            if body_fat > 100.0 {
                return Err(PlannerError::InvalidInput(format!(
                    "body fat must be at most 100% (got {})",
                    body_fat
                )));
            }
        }

        Ok(())
    }
}

fn require_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PlannerError::InvalidInput(format!(
            "{} must be greater than 0 (got {})",
            name, value
        )))
    }
}

pub(crate) fn require_non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PlannerError::InvalidInput(format!(
            "{} must not be negative (got {})",
            name, value
        )))
    }
}

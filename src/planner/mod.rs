pub mod advisory;
pub mod constants;
pub mod energy;
pub mod evaluation;
pub mod reconciler;
pub mod tables;
pub mod tally;

pub use advisory::Advisory;
pub use energy::{
    BodyComposition, BodyFatRange, EnergyEstimate, adjusted_weight, basal_metabolic_rate, bmi,
    estimate_tdee, exercise_kcal, ideal_body_fat_range,
};
pub use evaluation::{Evaluation, EvaluationRequest, MealTally, evaluate};
pub use reconciler::{
    EnergyBasis, MacroEntry, MacroGoal, MacroReconciler, percentage_total,
};
pub use tables::{LabeledFactor, MetActivity, ReferenceTables};
pub use tally::{ComparisonRow, ComparisonTable, MacroTally, compare, deviations, tally, tally_by_meal};

pub mod exchange;
pub mod meal;
pub mod nutrient;
pub mod profile;

pub use exchange::{ExchangeCategory, ExchangePlan};
pub use meal::{Meal, MealSchedule};
pub use nutrient::{Macro, MacroAmounts};
pub use profile::{ExerciseSession, KcalAdjustments, ProfileInputs, Sex};

pub mod cli;
pub mod error;
pub mod interface;
pub mod models;
pub mod planner;

pub use error::{PlannerError, Result};
pub use models::{ExchangeCategory, ExchangePlan, Macro, MealSchedule, ProfileInputs, Sex};
pub use planner::{Evaluation, EvaluationRequest, ReferenceTables, evaluate};

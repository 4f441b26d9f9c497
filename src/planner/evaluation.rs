use serde::Serialize;
use tracing::{info, warn};

use crate::error::Result;
use crate::models::profile::require_non_negative;
use crate::models::{ExchangePlan, Macro, Meal, MealSchedule, ProfileInputs};
use crate::planner::advisory::Advisory;
use crate::planner::constants::EXCHANGE_DEVIATION_TOLERANCE;
use crate::planner::energy::{BodyComposition, EnergyEstimate, estimate_tdee};
use crate::planner::reconciler::{MacroEntry, MacroGoal, MacroReconciler};
use crate::planner::tables::ReferenceTables;
use crate::planner::tally::{ComparisonTable, MacroTally, compare, deviations, tally, tally_by_meal};

/// Everything the form supplies for one evaluation pass.
#[derive(Debug, Clone)]
pub struct EvaluationRequest {
    pub profile: ProfileInputs,

    /// Macro edits in the order they were made; later edits win.
    /// Macros without an edit keep the default split.
    pub macro_entries: Vec<(Macro, MacroEntry)>,

    /// Day-level exchange counts.
    pub exchanges: ExchangePlan,

    /// Per-meal exchange counts, added on top of `exchanges`.
    pub meals: MealSchedule,

    /// Fractional tolerance for exchange deviation advisories.
    pub deviation_tolerance: f64,
}

impl EvaluationRequest {
    pub fn new(profile: ProfileInputs) -> Self {
        Self {
            profile,
            macro_entries: Vec::new(),
            exchanges: ExchangePlan::new(),
            meals: MealSchedule::new(),
            deviation_tolerance: EXCHANGE_DEVIATION_TOLERANCE,
        }
    }

    pub fn with_entry(mut self, nutrient: Macro, entry: MacroEntry) -> Self {
        self.macro_entries.push((nutrient, entry));
        self
    }

    pub fn with_exchanges(mut self, exchanges: ExchangePlan) -> Self {
        self.exchanges = exchanges;
        self
    }

    pub fn with_meals(mut self, meals: MealSchedule) -> Self {
        self.meals = meals;
        self
    }

    /// Day plan combining the loose counts and the meal schedule.
    pub fn day_plan(&self) -> ExchangePlan {
        let mut plan = self.exchanges.clone();
        if !self.meals.is_empty() {
            plan.merge(&self.meals.total());
        }
        plan
    }

    /// Reject out-of-range numbers before any arithmetic runs.
    pub fn validate(&self) -> Result<()> {
        self.profile.validate()?;
        require_non_negative("deviation tolerance", self.deviation_tolerance)
    }
}

/// Per-meal tally row.
#[derive(Debug, Clone, Serialize)]
pub struct MealTally {
    pub meal: Meal,
    pub exchanges: ExchangePlan,
    pub tally: MacroTally,
}

/// Result of one full pass.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub energy: EnergyEstimate,
    pub kcal_per_kg: f64,
    pub body: BodyComposition,
    pub goals: Vec<MacroGoal>,
    pub exchanges: ExchangePlan,
    pub tally: MacroTally,
    pub tally_kcal: f64,
    pub meals: Vec<MealTally>,
    pub comparison: ComparisonTable,
    pub advisories: Vec<Advisory>,
}

impl Evaluation {
    pub fn goal(&self, nutrient: Macro) -> Option<&MacroGoal> {
        self.goals.iter().find(|g| g.nutrient() == nutrient)
    }
}

/// Run energy estimation, macro reconciliation and the exchange comparison.
///
/// Invalid inputs abort the pass; imbalances only add advisories.
pub fn evaluate(request: &EvaluationRequest, tables: &ReferenceTables) -> Result<Evaluation> {
    request.validate()?;

    let energy = estimate_tdee(&request.profile)?;
    let weight = request.profile.basis_weight();

    let mut reconciler = MacroReconciler::new(tables, energy.tdee_kcal, weight)?;
    for &(nutrient, entry) in &request.macro_entries {
        reconciler.apply(nutrient, entry, energy.tdee_kcal, weight)?;
    }

    let goals = reconciler.goals().to_vec();
    let mut advisories = Vec::new();
    if let Some(imbalance) = reconciler.percentage_balance() {
        warn!(%imbalance, "macro percentages do not sum to 100");
        advisories.push(imbalance);
    }

    let exchanges = request.day_plan();
    let day_tally = tally(&exchanges, tables);
    let comparison = compare(&day_tally, &goals);
    if !exchanges.is_empty() {
        advisories.extend(deviations(&comparison, request.deviation_tolerance)?);
    }

    let meals = tally_by_meal(&request.meals, tables)
        .into_iter()
        .map(|(meal, tally)| MealTally {
            meal,
            exchanges: request.meals.meal(meal).cloned().unwrap_or_default(),
            tally,
        })
        .collect();

    info!(
        tdee_kcal = energy.tdee_kcal,
        exchange_units = exchanges.total_units(),
        advisories = advisories.len(),
        "evaluation complete"
    );

    Ok(Evaluation {
        kcal_per_kg: energy.kcal_per_kg(),
        energy,
        body: BodyComposition::for_profile(&request.profile),
        goals,
        tally_kcal: day_tally.kcal(tables),
        exchanges,
        tally: day_tally,
        meals,
        comparison,
        advisories,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlannerError;
    use crate::models::{ExchangeCategory, KcalAdjustments, Sex};

    fn profile() -> ProfileInputs {
        ProfileInputs::new(65.0, 165.0, 30, Sex::Female)
    }

    #[test]
    fn test_default_pass_has_no_exchange_advisories() {
        let tables = ReferenceTables::standard();
        let evaluation = evaluate(&EvaluationRequest::new(profile()), &tables).unwrap();

        assert_eq!(evaluation.goals.len(), 3);
        assert!(evaluation.advisories.is_empty());
        assert_eq!(evaluation.tally_kcal, 0.0);
        assert!(evaluation.meals.is_empty());
    }

    #[test]
    fn test_later_entry_wins() {
        let tables = ReferenceTables::standard();
        let request = EvaluationRequest::new(profile())
            .with_entry(Macro::Protein, MacroEntry::Percentage(25.0))
            .with_entry(Macro::Protein, MacroEntry::GramsPerKg(1.2));

        let evaluation = evaluate(&request, &tables).unwrap();
        let protein = evaluation.goal(Macro::Protein).unwrap();
        assert_eq!(protein.entry(), MacroEntry::GramsPerKg(1.2));
        assert!((protein.grams() - 78.0).abs() < 1e-9);
    }

    #[test]
    fn test_meals_added_to_day_plan() {
        let tables = ReferenceTables::standard();
        let mut meals = MealSchedule::new();
        meals.set(Meal::Breakfast, ExchangeCategory::Starch, 2);
        meals.set(Meal::Lunch, ExchangeCategory::Starch, 1);
        let exchanges: ExchangePlan = [(ExchangeCategory::Starch, 1)].into_iter().collect();

        let request = EvaluationRequest::new(profile())
            .with_exchanges(exchanges)
            .with_meals(meals);
        let evaluation = evaluate(&request, &tables).unwrap();

        assert_eq!(evaluation.exchanges.count(ExchangeCategory::Starch), 4);
        assert_eq!(evaluation.tally.grams(Macro::Carbohydrate), 60.0);
        assert_eq!(evaluation.meals.len(), 2);
        assert_eq!(evaluation.meals[1].meal, Meal::Lunch);
    }

    #[test]
    fn test_non_positive_energy_is_fatal() {
        let tables = ReferenceTables::standard();
        let starving = profile().with_adjustments(KcalAdjustments {
            goal: -5000.0,
            ..Default::default()
        });

        let result = evaluate(&EvaluationRequest::new(starving), &tables);
        assert!(matches!(result, Err(PlannerError::InvalidEnergyBasis { .. })));
    }

    #[test]
    fn test_imbalance_reported_once() {
        let tables = ReferenceTables::standard();
        let request = EvaluationRequest::new(profile())
            .with_entry(Macro::Protein, MacroEntry::Percentage(40.0));

        let evaluation = evaluate(&request, &tables).unwrap();
        let imbalances = evaluation
            .advisories
            .iter()
            .filter(|a| matches!(a, Advisory::PercentageImbalance { .. }))
            .count();
        assert_eq!(imbalances, 1);
    }

    #[test]
    fn test_invalid_tolerance_is_rejected() {
        let tables = ReferenceTables::standard();
        let exchanges: ExchangePlan = [(ExchangeCategory::Starch, 1)].into_iter().collect();

        for tolerance in [-0.5, f64::NAN] {
            let mut request =
                EvaluationRequest::new(profile()).with_exchanges(exchanges.clone());
            request.deviation_tolerance = tolerance;
            assert!(matches!(
                evaluate(&request, &tables),
                Err(PlannerError::InvalidInput(_))
            ));
        }

        // Still rejected when there is nothing to compare.
        let mut request = EvaluationRequest::new(profile());
        request.deviation_tolerance = f64::NAN;
        assert!(evaluate(&request, &tables).is_err());
    }

    #[test]
    fn test_huge_exchange_counts_do_not_overflow() {
        let tables = ReferenceTables::standard();
        let exchanges: ExchangePlan = [
            (ExchangeCategory::Starch, u32::MAX),
            (ExchangeCategory::Fat, 1),
        ]
        .into_iter()
        .collect();

        let request = EvaluationRequest::new(profile()).with_exchanges(exchanges);
        let evaluation = evaluate(&request, &tables).unwrap();
        assert_eq!(evaluation.exchanges.total_units(), u32::MAX);
        assert!(!evaluation.advisories.is_empty());
    }

    #[test]
    fn test_serializes_to_json() {
        let tables = ReferenceTables::standard();
        let evaluation = evaluate(&EvaluationRequest::new(profile()), &tables).unwrap();
        let json = serde_json::to_value(&evaluation).unwrap();
        assert!(json["energy"]["tdee_kcal"].as_f64().unwrap() > 0.0);
        assert_eq!(json["goals"].as_array().unwrap().len(), 3);
        assert_eq!(json["comparison"]["rows"][0]["nutrient"], "carbohydrate");
    }
}

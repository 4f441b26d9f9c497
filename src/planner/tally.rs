use serde::Serialize;
use tracing::warn;

use crate::error::Result;
use crate::models::profile::require_non_negative;
use crate::models::{ExchangePlan, Macro, MacroAmounts, Meal, MealSchedule};
use crate::planner::advisory::Advisory;
use crate::planner::reconciler::MacroGoal;
use crate::planner::tables::ReferenceTables;

/// Grams of each macronutrient supplied by an exchange plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MacroTally {
    pub grams: MacroAmounts,
}

impl MacroTally {
    pub fn grams(&self, nutrient: Macro) -> f64 {
        self.grams.get(nutrient)
    }

    /// Energy of the tallied grams.
    pub fn kcal(&self, tables: &ReferenceTables) -> f64 {
        self.grams.kcal(&tables.atwater)
    }
}

/// Sum the per-unit content of every planned exchange.
pub fn tally(plan: &ExchangePlan, tables: &ReferenceTables) -> MacroTally {
    let grams = plan
        .iter()
        .map(|(category, count)| tables.exchange_content(category).scaled(count as f64))
        .fold(MacroAmounts::default(), |acc, g| acc.plus(&g));

    MacroTally { grams }
}

/// Tally every meal of a schedule separately, in meal order.
pub fn tally_by_meal(schedule: &MealSchedule, tables: &ReferenceTables) -> Vec<(Meal, MacroTally)> {
    schedule
        .iter()
        .map(|(meal, plan)| (meal, tally(plan, tables)))
        .collect()
}

/// Target vs. exchange grams for one macronutrient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub nutrient: Macro,
    pub target_g: f64,
    pub tallied_g: f64,
    /// tallied - target
    pub difference_g: f64,
    /// Share of the target reached, absent for a zero target.
    pub percent_achieved: Option<f64>,
}

impl ComparisonRow {
    fn new(nutrient: Macro, target_g: f64, tallied_g: f64) -> Self {
        let percent_achieved = if target_g > 0.0 {
            Some(tallied_g / target_g * 100.0)
        } else {
            None
        };
        Self {
            nutrient,
            target_g,
            tallied_g,
            difference_g: tallied_g - target_g,
            percent_achieved,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonTable {
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    pub fn row(&self, nutrient: Macro) -> Option<&ComparisonRow> {
        self.rows.iter().find(|r| r.nutrient == nutrient)
    }
}

/// Compare an exchange tally with the gram targets of the given goals.
pub fn compare(tally: &MacroTally, goals: &[MacroGoal]) -> ComparisonTable {
    let rows = goals
        .iter()
        .map(|goal| ComparisonRow::new(goal.nutrient(), goal.grams(), tally.grams(goal.nutrient())))
        .collect();

    ComparisonTable { rows }
}

/// Advisories for rows whose tally misses a positive target by more than
/// `tolerance` (a fraction of the target).
///
/// A negative or non-finite tolerance is rejected.
pub fn deviations(table: &ComparisonTable, tolerance: f64) -> Result<Vec<Advisory>> {
    require_non_negative("deviation tolerance", tolerance)?;

    let advisories = table
        .rows
        .iter()
        .filter(|row| row.target_g > 0.0 && row.difference_g.abs() > row.target_g * tolerance)
        .map(|row| {
            warn!(
                nutrient = %row.nutrient,
                target_g = row.target_g,
                tallied_g = row.tallied_g,
                "exchange tally deviates from target"
            );
            Advisory::ExchangeDeviation {
                nutrient: row.nutrient,
                target_g: row.target_g,
                tallied_g: row.tallied_g,
            }
        })
        .collect();
    Ok(advisories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlannerError;
    use crate::models::ExchangeCategory;
    use crate::planner::reconciler::MacroReconciler;

    #[test]
    fn test_empty_plan_tallies_zero() {
        let tables = ReferenceTables::standard();
        let result = tally(&ExchangePlan::new(), &tables);
        assert_eq!(result, MacroTally::default());
        assert_eq!(result.kcal(&tables), 0.0);
    }

    #[test]
    fn test_milk_and_starch() {
        let tables = ReferenceTables::standard();
        let plan: ExchangePlan = [(ExchangeCategory::Milk, 2), (ExchangeCategory::Starch, 1)]
            .into_iter()
            .collect();

        let result = tally(&plan, &tables);
        assert_eq!(result.grams(Macro::Carbohydrate), 39.0);
        assert_eq!(result.grams(Macro::Protein), 19.0);
        assert_eq!(result.grams(Macro::Fat), 10.0);
        // 39*4 + 19*4 + 10*9
        assert_eq!(result.kcal(&tables), 322.0);
    }

    #[test]
    fn test_compare_rows() {
        let tables = ReferenceTables::standard();
        let reconciler = MacroReconciler::new(&tables, 2000.0, 65.0).unwrap();
        let plan: ExchangePlan = [(ExchangeCategory::Starch, 10)].into_iter().collect();

        let table = compare(&tally(&plan, &tables), &reconciler.goals());
        let carbs = table.row(Macro::Carbohydrate).unwrap();
        assert_eq!(carbs.target_g, 250.0);
        assert_eq!(carbs.tallied_g, 150.0);
        assert_eq!(carbs.difference_g, -100.0);
        assert!((carbs.percent_achieved.unwrap() - 60.0).abs() < 1e-9);
        assert_eq!(table.rows.len(), 3);
    }

    #[test]
    fn test_zero_target_has_no_percent() {
        let tables = ReferenceTables::standard();
        let mut reconciler = MacroReconciler::new(&tables, 2000.0, 65.0).unwrap();
        reconciler.set_percentage(Macro::Fat, 0.0, 2000.0, 65.0).unwrap();
        let plan: ExchangePlan = [(ExchangeCategory::Fat, 2)].into_iter().collect();

        let table = compare(&tally(&plan, &tables), &reconciler.goals());
        let fat = table.row(Macro::Fat).unwrap();
        assert_eq!(fat.percent_achieved, None);
        assert_eq!(fat.difference_g, 10.0);
        assert!(deviations(&table, 0.1)
            .unwrap()
            .iter()
            .all(|a| !matches!(a, Advisory::ExchangeDeviation { nutrient: Macro::Fat, .. })));
    }

    #[test]
    fn test_deviations_respect_tolerance() {
        let row = |nutrient, target_g, tallied_g| ComparisonRow::new(nutrient, target_g, tallied_g);
        let table = ComparisonTable {
            rows: vec![
                row(Macro::Carbohydrate, 100.0, 95.0),
                row(Macro::Protein, 100.0, 80.0),
                row(Macro::Fat, 50.0, 56.0),
            ],
        };

        let advisories = deviations(&table, 0.10).unwrap();
        assert_eq!(advisories.len(), 2);
        assert!(matches!(
            advisories[0],
            Advisory::ExchangeDeviation { nutrient: Macro::Protein, .. }
        ));
        assert!(matches!(
            advisories[1],
            Advisory::ExchangeDeviation { nutrient: Macro::Fat, .. }
        ));
    }

    #[test]
    fn test_deviations_reject_bad_tolerance() {
        let table = ComparisonTable {
            rows: vec![ComparisonRow::new(Macro::Protein, 100.0, 100.0)],
        };

        assert!(deviations(&table, 0.0).unwrap().is_empty());
        for tolerance in [-0.5, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                deviations(&table, tolerance),
                Err(PlannerError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_tally_by_meal() {
        let tables = ReferenceTables::standard();
        let mut schedule = MealSchedule::new();
        schedule.set(Meal::Breakfast, ExchangeCategory::Starch, 2);
        schedule.set(Meal::Supper, ExchangeCategory::Protein, 3);

        let per_meal = tally_by_meal(&schedule, &tables);
        assert_eq!(per_meal.len(), 2);
        assert_eq!(per_meal[0].0, Meal::Breakfast);
        assert_eq!(per_meal[0].1.grams(Macro::Carbohydrate), 30.0);
        assert_eq!(per_meal[1].1.grams(Macro::Fat), 9.0);
    }
}

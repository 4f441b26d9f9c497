#[macro_use]
extern crate assert_float_eq;

use meal_planner_rs::models::{
    ExchangeCategory, ExchangePlan, Macro, Meal, MealSchedule, ProfileInputs, Sex,
};
use meal_planner_rs::planner::{
    Advisory, EvaluationRequest, MacroEntry, MacroReconciler, ReferenceTables, compare, evaluate,
    tally,
};

fn scenario_plan() -> ExchangePlan {
    [
        (ExchangeCategory::Starch, 7),
        (ExchangeCategory::Protein, 5),
        (ExchangeCategory::Fat, 8),
        (ExchangeCategory::Milk, 0),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_scenario_tally_matches_manual_sum() {
    let tables = ReferenceTables::standard();
    let result = tally(&scenario_plan(), &tables);

    // Starch 7 * (15, 3, 0) + Protein 5 * (0, 7, 3) + Fat 8 * (0, 0, 5)
    assert_eq!(result.grams(Macro::Carbohydrate), 105.0);
    assert_eq!(result.grams(Macro::Protein), 56.0);
    assert_eq!(result.grams(Macro::Fat), 55.0);
    assert_eq!(result.kcal(&tables), 105.0 * 4.0 + 56.0 * 4.0 + 55.0 * 9.0);
}

#[test]
fn test_every_category_contributes() {
    let tables = ReferenceTables::standard();
    let plan: ExchangePlan = ExchangeCategory::ALL.into_iter().map(|c| (c, 1)).collect();
    let result = tally(&plan, &tables);

    assert_eq!(result.grams(Macro::Carbohydrate), 15.0 + 5.0 + 5.0 + 15.0 + 12.0 + 5.0);
    assert_eq!(result.grams(Macro::Protein), 3.0 + 2.0 + 7.0 + 8.0);
    assert_eq!(result.grams(Macro::Fat), 3.0 + 5.0 + 5.0);
}

#[test]
fn test_comparison_against_goals() {
    let tables = ReferenceTables::standard();
    let reconciler = MacroReconciler::new(&tables, 2000.0, 65.0).unwrap();
    let table = compare(&tally(&scenario_plan(), &tables), &reconciler.goals());

    let protein = table.row(Macro::Protein).unwrap();
    assert_float_absolute_eq!(protein.target_g, 100.0, 1e-9);
    assert_eq!(protein.tallied_g, 56.0);
    assert_float_absolute_eq!(protein.difference_g, -44.0, 1e-9);
    assert_float_absolute_eq!(protein.percent_achieved.unwrap(), 56.0, 1e-9);
}

#[test]
fn test_evaluation_reports_imbalance_and_deviation() {
    let tables = ReferenceTables::standard();
    let request = EvaluationRequest::new(ProfileInputs::new(65.0, 165.0, 30, Sex::Female))
        .with_entry(Macro::Carbohydrate, MacroEntry::Percentage(50.0))
        .with_entry(Macro::Protein, MacroEntry::Percentage(20.0))
        .with_entry(Macro::Fat, MacroEntry::Percentage(20.0))
        .with_exchanges(scenario_plan());

    let evaluation = evaluate(&request, &tables).unwrap();

    assert!(evaluation.advisories.iter().any(|a| matches!(
        a,
        Advisory::PercentageImbalance { total_pct } if (total_pct - 90.0).abs() < 1e-9
    )));
    assert!(evaluation
        .advisories
        .iter()
        .any(|a| matches!(a, Advisory::ExchangeDeviation { nutrient: Macro::Carbohydrate, .. })));
    assert_eq!(evaluation.comparison.rows.len(), 3);
}

#[test]
fn test_meal_schedule_feeds_comparison() {
    let tables = ReferenceTables::standard();
    let mut meals = MealSchedule::new();
    meals.set(Meal::Breakfast, ExchangeCategory::Starch, 3);
    meals.set(Meal::Breakfast, ExchangeCategory::Milk, 1);
    meals.set(Meal::Lunch, ExchangeCategory::Starch, 4);
    meals.set(Meal::Supper, ExchangeCategory::Protein, 5);
    meals.set(Meal::Treat, ExchangeCategory::Fat, 8);

    let request = EvaluationRequest::new(ProfileInputs::new(65.0, 165.0, 30, Sex::Female))
        .with_meals(meals);
    let evaluation = evaluate(&request, &tables).unwrap();

    assert_eq!(evaluation.meals.len(), 4);
    assert_eq!(evaluation.tally.grams(Macro::Carbohydrate), 105.0 + 12.0);
    assert_eq!(evaluation.tally.grams(Macro::Protein), 56.0 + 8.0);
    assert_eq!(evaluation.tally.grams(Macro::Fat), 55.0 + 5.0);
}

use crate::models::ExchangeCategory;
use crate::planner::reconciler::percentage_total;
use crate::planner::tables::{MetActivity, ReferenceTables};
use crate::planner::{
    Advisory, BodyComposition, ComparisonTable, EnergyEstimate, Evaluation, MacroEntry, MacroGoal,
    MealTally,
};

/// Display the energy breakdown and body composition references.
pub fn display_energy(energy: &EnergyEstimate, body: &BodyComposition) {
    println!();
    println!("=== Energy ===");
    println!();
    println!("Adjusted weight: {:.1} kg", energy.adjusted_weight_kg);
    println!("BMI:             {:.1}", body.bmi);
    println!(
        "Ideal body fat:  {:.0}-{:.0}%",
        body.ideal_body_fat.min_pct, body.ideal_body_fat.max_pct
    );
    if let (Some(pct), Some(in_range)) = (body.body_fat_pct, body.body_fat_in_range) {
        let status = if in_range { "within" } else { "outside" };
        println!("Body fat:        {:.1}% ({} ideal range)", pct, status);
    }
    println!("BMR:             {:.0} kcal/day", energy.bmr_kcal);
    println!("Base TDEE:       {:.0} kcal/day", energy.base_tdee_kcal);

    if energy.adjustments_kcal != 0.0 {
        println!("Adjustments:     {:+.0} kcal", energy.adjustments_kcal);
    }
    if energy.exercise_kcal > 0.0 {
        println!("Exercise (METs): {:+.0} kcal", energy.exercise_kcal);
    }

    println!(
        "Final TDEE:      {:.0} kcal/day | {:.1} kcal/kg",
        energy.tdee_kcal,
        energy.kcal_per_kg()
    );
}

/// Display the macro goals, marking the authoritative field of each.
pub fn display_goals(goals: &[MacroGoal]) {
    println!();
    println!("=== Macronutrient Goals ===");
    println!();
    println!(
        "{:<8} {:>8} {:>9} {:>8} {:>7}",
        "Macro", "%", "g", "g/kg", "kcal"
    );

    for goal in goals {
        let (pct_mark, gkg_mark) = match goal.entry() {
            MacroEntry::Percentage(_) => ("*", " "),
            MacroEntry::GramsPerKg(_) => (" ", "*"),
        };

        println!(
            "{:<8} {:>7.1}{} {:>9.1} {:>7.2}{} {:>7.0}",
            goal.nutrient().label(),
            goal.percentage(),
            pct_mark,
            goal.grams(),
            goal.grams_per_kg(),
            gkg_mark,
            goal.kcal()
        );
    }

    println!("{:<8} {:>7.1}", "Total", percentage_total(goals));
    println!("(* = entered value)");
}

/// Display target vs. exchange grams.
pub fn display_comparison(table: &ComparisonTable, tally_kcal: f64) {
    println!();
    println!("=== Macronutrient Comparison (g) ===");
    println!();
    println!(
        "{:<8} {:>10} {:>15} {:>9} {:>9}",
        "Macro", "Target (g)", "Exchanges (g)", "Diff", "Achieved"
    );

    for row in &table.rows {
        let achieved = row
            .percent_achieved
            .map(|p| format!("{:.0}%", p))
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{:<8} {:>10.1} {:>15.1} {:>+9.1} {:>9}",
            row.nutrient.label(),
            row.target_g,
            row.tallied_g,
            row.difference_g,
            achieved
        );
    }

    println!();
    println!("Energy from exchanges: {:.0} kcal", tally_kcal);
}

/// Display each meal's exchanges and grams.
pub fn display_meals(meals: &[MealTally]) {
    if meals.is_empty() {
        return;
    }

    println!();
    println!("=== Daily Summary ===");

    for entry in meals {
        println!();
        println!("{}", entry.meal);

        let exchanges: Vec<String> = entry
            .exchanges
            .iter()
            .map(|(category, count)| format!("{} x{}", category, count))
            .collect();
        println!("  Exchanges: {}", exchanges.join(", "));

        let grams = entry.tally.grams;
        println!(
            "  C:{:.0} g P:{:.0} g F:{:.0} g",
            grams.carbohydrate, grams.protein, grams.fat
        );
    }
}

/// Display advisories as warnings.
pub fn display_advisories(advisories: &[Advisory]) {
    if advisories.is_empty() {
        return;
    }

    println!();
    for advisory in advisories {
        println!("Warning: {}", advisory);
    }
}

/// Display a complete evaluation.
pub fn display_evaluation(evaluation: &Evaluation) {
    display_energy(&evaluation.energy, &evaluation.body);
    display_goals(&evaluation.goals);
    display_comparison(&evaluation.comparison, evaluation.tally_kcal);
    display_meals(&evaluation.meals);
    display_advisories(&evaluation.advisories);
    println!();
}

/// Display METs activities, optionally with their match score.
pub fn display_met_activities<'a>(
    activities: impl IntoIterator<Item = (&'a MetActivity, Option<f64>)>,
) {
    let mut any = false;
    for (activity, score) in activities {
        any = true;
        match score {
            Some(score) => println!(
                "  {:>5.1} MET  {}  (match {:.2})",
                activity.met, activity.description, score
            ),
            None => println!("  {:>5.1} MET  {}", activity.met, activity.description),
        }
    }

    if !any {
        println!("  (no matching activities)");
    }
}

/// Display every reference table.
pub fn display_tables(tables: &ReferenceTables) {
    println!();
    println!("=== Atwater factors (kcal/g) ===");
    for (nutrient, factor) in tables.atwater.iter() {
        println!("  {:<8} {:.1}", nutrient.label(), factor);
    }

    let factor_tables = [
        ("Stress levels", &tables.stress_levels),
        ("Activity levels", &tables.activity_levels),
        ("Amputation adjustments (% body weight)", &tables.amputations),
    ];
    for (title, rows) in factor_tables {
        println!();
        println!("=== {} ===", title);
        for row in rows {
            println!("  {:<14} {:<32} {}", row.key, row.label, row.value);
        }
    }

    println!();
    println!("=== Exchange content (g per exchange) ===");
    println!("  {:<11} {:>5} {:>7} {:>4}", "Category", "Carbs", "Protein", "Fat");
    for category in ExchangeCategory::ALL {
        let content = tables.exchange_content(category);
        println!(
            "  {:<11} {:>5.0} {:>7.0} {:>4.0}",
            category.name(),
            content.carbohydrate,
            content.protein,
            content.fat
        );
    }

    println!();
    println!("=== METs activities ===");
    display_met_activities(tables.mets.iter().map(|a| (a, None)));
    println!();
}

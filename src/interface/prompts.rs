use dialoguer::{Confirm, Input, Select};

use crate::error::{PlannerError, Result};
use crate::models::{
    ExchangeCategory, ExchangePlan, ExerciseSession, KcalAdjustments, Macro, Meal, MealSchedule,
    ProfileInputs, Sex,
};
use crate::planner::reconciler::{MacroEntry, MacroReconciler};
use crate::planner::tables::{LabeledFactor, ReferenceTables};

/// Prompt for a number, re-parsing the text input.
pub fn prompt_number(prompt: &str, default: f64) -> Result<f64> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;

    input
        .trim()
        .parse()
        .map_err(|_| PlannerError::InvalidInput(format!("Invalid number: {}", input)))
}

/// Prompt for a number that must be greater than zero.
pub fn prompt_positive(prompt: &str, default: f64) -> Result<f64> {
    let value = prompt_number(prompt, default)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(PlannerError::InvalidInput(format!(
            "{} must be greater than 0",
            prompt
        )))
    }
}

/// Prompt for a whole, non-negative count.
pub fn prompt_count(prompt: &str, default: u32) -> Result<u32> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;

    input
        .trim()
        .parse()
        .map_err(|_| PlannerError::InvalidInput(format!("Invalid count: {}", input)))
}

/// Prompt for biological sex.
pub fn prompt_sex() -> Result<Sex> {
    let selection = Select::new()
        .with_prompt("Sex (biological)")
        .items(&["Male", "Female"])
        .default(0)
        .interact()?;

    Ok(if selection == 0 { Sex::Male } else { Sex::Female })
}

/// Pick one row of a factor table; the first row is the default.
pub fn prompt_factor(prompt: &str, table: &[LabeledFactor]) -> Result<f64> {
    let items: Vec<String> = table
        .iter()
        .map(|f| format!("{} ({})", f.label, f.value))
        .collect();

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact()?;

    Ok(table.get(selection).map(|f| f.value).unwrap_or(0.0))
}

/// Prompt for an exercise session, searching the METs table by name.
pub fn prompt_exercise(tables: &ReferenceTables) -> Result<Option<ExerciseSession>> {
    if !prompt_yes_no("Add an exercise session?", false)? {
        return Ok(None);
    }

    loop {
        let query: String = Input::new()
            .with_prompt("Activity (or press Enter to skip)")
            .allow_empty(true)
            .interact_text()?;

        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }

        let candidates = tables.search_mets(query);
        if candidates.is_empty() {
            println!("No matching activity found for '{}'", query);
            continue;
        }

        let mut options: Vec<String> = candidates
            .iter()
            .map(|(a, _)| format!("{} ({} MET)", a.description, a.met))
            .collect();
        options.push("None of these".to_string());

        let selection = Select::new()
            .with_prompt("Which activity?")
            .items(&options)
            .default(0)
            .interact()?;

        let Some((activity, _)) = candidates.get(selection) else {
            continue;
        };

        let minutes = prompt_number("Duration (minutes)", 30.0)?;
        return Ok(Some(
            ExerciseSession::new(activity.met, minutes).described(activity.description.clone()),
        ));
    }
}

/// Prompt for all personal details.
pub fn prompt_profile(tables: &ReferenceTables) -> Result<ProfileInputs> {
    let weight = prompt_positive("Actual weight (kg)", 65.0)?;
    let calc_weight = prompt_positive("Weight for calculations (kg)", weight)?;
    let height = prompt_positive("Height (cm)", 165.0)?;
    let age = prompt_count("Age (years)", 30)?;
    let sex = prompt_sex()?;

    let amputation = prompt_factor("Amputation adjustment (% body weight)", &tables.amputations)?;
    let stress = prompt_factor("Stress level", &tables.stress_levels)?;
    let activity = prompt_factor("Activity level", &tables.activity_levels)?;

    let adjustments = KcalAdjustments {
        pregnancy_lactation: prompt_number("Pregnancy/breastfeeding kcal", 0.0)?,
        goal: prompt_number("Weight goal adjustment kcal", 0.0)?,
        custom: prompt_number("Custom kcal adjustment", 0.0)?,
    };

    let mut profile = ProfileInputs::new(weight, height, age, sex)
        .with_factors(stress, activity)
        .with_amputation(amputation)
        .with_adjustments(adjustments);

    if calc_weight != weight {
        profile = profile.with_calc_weight(calc_weight);
    }
    if let Some(exercise) = prompt_exercise(tables)? {
        profile = profile.with_exercise(exercise);
    }

    let body_fat = prompt_number("Body fat % (0 if not measured)", 0.0)?;
    if body_fat > 0.0 {
        profile = profile.with_body_fat(body_fat);
    }

    profile.validate()?;
    Ok(profile)
}

/// Prompt for each macro as a percentage or g/kg, echoing the derived values.
///
/// Returns the edits in the order they were made.
pub fn prompt_macro_entries(
    reconciler: &mut MacroReconciler,
) -> Result<Vec<(Macro, MacroEntry)>> {
    let basis = reconciler.basis();
    let mut entries = Vec::new();

    for nutrient in Macro::ALL {
        let current = reconciler.goal(nutrient);
        let options = [
            format!(
                "Keep {:.1}% ({:.2} g/kg)",
                current.percentage(),
                current.grams_per_kg()
            ),
            "Enter %".to_string(),
            "Enter g/kg".to_string(),
        ];

        let selection = Select::new()
            .with_prompt(format!("{} goal", nutrient))
            .items(&options)
            .default(0)
            .interact()?;

        let entry = match selection {
            1 => MacroEntry::Percentage(prompt_number(
                &format!("{} %", nutrient),
                current.percentage(),
            )?),
            2 => MacroEntry::GramsPerKg(prompt_number(
                &format!("{} g/kg", nutrient),
                current.grams_per_kg(),
            )?),
            _ => continue,
        };

        let goal = reconciler.apply(nutrient, entry, basis.energy_kcal(), basis.weight_kg())?;
        println!(
            "  -> {:.1} g | {:.1}% | {:.2} g/kg | {:.0} kcal",
            goal.grams(),
            goal.percentage(),
            goal.grams_per_kg(),
            goal.kcal()
        );
        entries.push((nutrient, entry));
    }

    Ok(entries)
}

/// Prompt for a count in every exchange category.
pub fn prompt_exchange_plan(label: &str) -> Result<ExchangePlan> {
    let mut plan = ExchangePlan::new();
    for category in ExchangeCategory::ALL {
        let count = prompt_count(&format!("{} {} exchanges", label, category), 0)?;
        plan.set(category, count);
    }
    Ok(plan)
}

/// Prompt for exchange counts meal by meal.
pub fn prompt_meal_schedule() -> Result<MealSchedule> {
    let mut schedule = MealSchedule::new();
    for meal in Meal::ALL {
        if prompt_yes_no(&format!("Add exchanges to {}?", meal), false)? {
            let plan = prompt_exchange_plan(meal.name())?;
            schedule.add_plan(meal, &plan);
        }
    }
    Ok(schedule)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

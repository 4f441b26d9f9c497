use crate::error::{PlannerError, Result};
use crate::models::{ExchangeCategory, ExchangePlan, Meal, MealSchedule};

/// Parse `category=count` pairs separated by commas.
///
/// A category listed twice accumulates.
pub fn parse_exchange_list(input: &str) -> Result<ExchangePlan> {
    let mut plan = ExchangePlan::new();

    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (category, count) = part.split_once('=').ok_or_else(|| {
            PlannerError::InvalidInput(format!("expected CATEGORY=COUNT, got '{}'", part))
        })?;

        let category: ExchangeCategory = category.parse()?;
        let count: u32 = count.trim().parse().map_err(|_| {
            PlannerError::InvalidInput(format!(
                "exchange count for {} must be a whole number >= 0 (got '{}')",
                category,
                count.trim()
            ))
        })?;

        plan.add(category, count);
    }

    Ok(plan)
}

/// Parse every `--exchange` argument into one plan.
pub fn parse_exchange_args(args: &[String]) -> Result<ExchangePlan> {
    let mut plan = ExchangePlan::new();
    for arg in args {
        plan.merge(&parse_exchange_list(arg)?);
    }
    Ok(plan)
}

/// Parse `meal:category=count,...`.
pub fn parse_meal_entry(input: &str) -> Result<(Meal, ExchangePlan)> {
    let (meal, list) = input.split_once(':').ok_or_else(|| {
        PlannerError::InvalidInput(format!("expected MEAL:CATEGORY=COUNT, got '{}'", input))
    })?;

    Ok((meal.parse()?, parse_exchange_list(list)?))
}

/// Parse every `--meal` argument into one schedule.
pub fn parse_meal_args(args: &[String]) -> Result<MealSchedule> {
    let mut schedule = MealSchedule::new();
    for arg in args {
        let (meal, plan) = parse_meal_entry(arg)?;
        schedule.add_plan(meal, &plan);
    }
    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_list() {
        let plan = parse_exchange_list("starch=7, protein=5,fat=8,milk=0").unwrap();
        assert_eq!(plan.count(ExchangeCategory::Starch), 7);
        assert_eq!(plan.count(ExchangeCategory::Protein), 5);
        assert_eq!(plan.count(ExchangeCategory::Fat), 8);
        assert_eq!(plan.count(ExchangeCategory::Milk), 0);
    }

    #[test]
    fn test_exchange_list_errors() {
        assert!(parse_exchange_list("starch").is_err());
        assert!(parse_exchange_list("starch=-1").is_err());
        assert!(parse_exchange_list("bread=2").is_err());
        assert!(parse_exchange_list("").unwrap().is_empty());
    }

    #[test]
    fn test_exchange_args_accumulate() {
        let args = vec!["starch=2".to_string(), "starch=3,fruit=1".to_string()];
        let plan = parse_exchange_args(&args).unwrap();
        assert_eq!(plan.count(ExchangeCategory::Starch), 5);
        assert_eq!(plan.count(ExchangeCategory::Fruit), 1);
    }

    #[test]
    fn test_meal_args() {
        let args = vec![
            "breakfast:starch=2,milk=1".to_string(),
            "supper:protein=3".to_string(),
            "Breakfast:fruit=1".to_string(),
        ];
        let schedule = parse_meal_args(&args).unwrap();

        let breakfast = schedule.meal(Meal::Breakfast).unwrap();
        assert_eq!(breakfast.count(ExchangeCategory::Starch), 2);
        assert_eq!(breakfast.count(ExchangeCategory::Fruit), 1);
        assert_eq!(schedule.total().total_units(), 7);

        assert!(parse_meal_entry("starch=2").is_err());
        assert!(parse_meal_entry("elevenses:starch=2").is_err());
    }
}

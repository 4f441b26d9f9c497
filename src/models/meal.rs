use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::models::{ExchangeCategory, ExchangePlan};

/// Eating occasions of a daily plan, in chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Meal {
    Breakfast,
    MorningSnack,
    Lunch,
    AfternoonSnack,
    Supper,
    Treat,
}

impl Meal {
    pub const ALL: [Meal; 6] = [
        Meal::Breakfast,
        Meal::MorningSnack,
        Meal::Lunch,
        Meal::AfternoonSnack,
        Meal::Supper,
        Meal::Treat,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Meal::Breakfast => "Breakfast",
            Meal::MorningSnack => "Morning Snack",
            Meal::Lunch => "Lunch",
            Meal::AfternoonSnack => "Afternoon Snack",
            Meal::Supper => "Supper",
            Meal::Treat => "Treat",
        }
    }
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Meal {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        Meal::ALL
            .into_iter()
            .find(|m| m.name().replace(' ', "").to_lowercase() == wanted)
            .ok_or_else(|| PlannerError::InvalidInput(format!("unknown meal '{}'", s)))
    }
}

/// Exchange counts distributed across the meals of one day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealSchedule {
    meals: BTreeMap<Meal, ExchangePlan>,
}

impl MealSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, meal: Meal, category: ExchangeCategory, count: u32) {
        let plan = self.meals.entry(meal).or_default();
        plan.set(category, count);
        if plan.is_empty() {
            self.meals.remove(&meal);
        }
    }

    /// Merge a whole plan into one meal.
    pub fn add_plan(&mut self, meal: Meal, plan: &ExchangePlan) {
        if plan.is_empty() {
            return;
        }
        self.meals.entry(meal).or_default().merge(plan);
    }

    pub fn meal(&self, meal: Meal) -> Option<&ExchangePlan> {
        self.meals.get(&meal)
    }

    /// Meals that have at least one exchange, in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (Meal, &ExchangePlan)> {
        self.meals.iter().map(|(m, p)| (*m, p))
    }

    /// All meals folded into a single day plan.
    pub fn total(&self) -> ExchangePlan {
        let mut total = ExchangePlan::new();
        for plan in self.meals.values() {
            total.merge(plan);
        }
        total
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }
}

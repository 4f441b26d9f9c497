use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

/// A food group whose serving ("exchange") carries a fixed macronutrient load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExchangeCategory {
    Starch,
    Sugar,
    Vegetables,
    Fruit,
    Protein,
    Milk,
    Fat,
    Alcohol,
}

impl ExchangeCategory {
    pub const ALL: [ExchangeCategory; 8] = [
        ExchangeCategory::Starch,
        ExchangeCategory::Sugar,
        ExchangeCategory::Vegetables,
        ExchangeCategory::Fruit,
        ExchangeCategory::Protein,
        ExchangeCategory::Milk,
        ExchangeCategory::Fat,
        ExchangeCategory::Alcohol,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ExchangeCategory::Starch => "Starch",
            ExchangeCategory::Sugar => "Sugar",
            ExchangeCategory::Vegetables => "Vegetables",
            ExchangeCategory::Fruit => "Fruit",
            ExchangeCategory::Protein => "Protein",
            ExchangeCategory::Milk => "Milk",
            ExchangeCategory::Fat => "Fat",
            ExchangeCategory::Alcohol => "Alcohol",
        }
    }
}

impl fmt::Display for ExchangeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExchangeCategory {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        let singular = wanted.strip_suffix('s').unwrap_or(&wanted);

        ExchangeCategory::ALL
            .into_iter()
            .find(|c| {
                let name = c.name().to_lowercase();
                name == wanted || name == singular || name.strip_suffix('s') == Some(singular)
            })
            .ok_or_else(|| PlannerError::InvalidInput(format!("unknown exchange category '{}'", s)))
    }
}

/// Number of exchanges planned per category.
///
/// Categories that were never set count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangePlan {
    counts: BTreeMap<ExchangeCategory, u32>,
}

impl ExchangePlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the count for a category.
    pub fn set(&mut self, category: ExchangeCategory, count: u32) {
        if count == 0 {
            self.counts.remove(&category);
        } else {
            self.counts.insert(category, count);
        }
    }

    /// Add to the count for a category.
    pub fn add(&mut self, category: ExchangeCategory, count: u32) {
        let current = self.count(category);
        self.set(category, current.saturating_add(count));
    }

    pub fn count(&self, category: ExchangeCategory) -> u32 {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    /// Non-zero entries in category order.
    pub fn iter(&self) -> impl Iterator<Item = (ExchangeCategory, u32)> + '_ {
        self.counts.iter().map(|(c, n)| (*c, *n))
    }

    /// Fold another plan's counts into this one.
    pub fn merge(&mut self, other: &ExchangePlan) {
        for (category, count) in other.iter() {
            self.add(category, count);
        }
    }

    /// Total exchanges across categories, saturating like `add`.
    pub fn total_units(&self) -> u32 {
        self.counts
            .values()
            .fold(0u32, |total, n| total.saturating_add(*n))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl FromIterator<(ExchangeCategory, u32)> for ExchangePlan {
    fn from_iter<I: IntoIterator<Item = (ExchangeCategory, u32)>>(iter: I) -> Self {
        let mut plan = ExchangePlan::new();
        for (category, count) in iter {
            plan.add(category, count);
        }
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_is_lenient() {
        assert_eq!(
            "starch".parse::<ExchangeCategory>().unwrap(),
            ExchangeCategory::Starch
        );
        assert_eq!(
            "Vegetable".parse::<ExchangeCategory>().unwrap(),
            ExchangeCategory::Vegetables
        );
        assert_eq!(
            "FATS".parse::<ExchangeCategory>().unwrap(),
            ExchangeCategory::Fat
        );
        assert!("Free".parse::<ExchangeCategory>().is_err());
    }

    #[test]
    fn test_set_zero_removes_entry() {
        let mut plan = ExchangePlan::new();
        plan.set(ExchangeCategory::Milk, 2);
        assert_eq!(plan.count(ExchangeCategory::Milk), 2);

        plan.set(ExchangeCategory::Milk, 0);
        assert!(plan.is_empty());
        assert_eq!(plan.count(ExchangeCategory::Milk), 0);
    }

    #[test]
    fn test_merge_adds_counts() {
        let mut a: ExchangePlan = [(ExchangeCategory::Starch, 2), (ExchangeCategory::Fruit, 1)]
            .into_iter()
            .collect();
        let b: ExchangePlan = [(ExchangeCategory::Starch, 3)].into_iter().collect();

        a.merge(&b);
        assert_eq!(a.count(ExchangeCategory::Starch), 5);
        assert_eq!(a.count(ExchangeCategory::Fruit), 1);
        assert_eq!(a.total_units(), 6);
    }

    #[test]
    fn test_total_units_saturates() {
        let plan: ExchangePlan = [
            (ExchangeCategory::Starch, u32::MAX),
            (ExchangeCategory::Fat, 1),
        ]
        .into_iter()
        .collect();
        assert_eq!(plan.total_units(), u32::MAX);

        let mut doubled = plan.clone();
        doubled.merge(&plan);
        assert_eq!(doubled.count(ExchangeCategory::Starch), u32::MAX);
        assert_eq!(doubled.total_units(), u32::MAX);
    }
}

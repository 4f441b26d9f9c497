use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

/// An energy-yielding macronutrient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Macro {
    Carbohydrate,
    Protein,
    Fat,
}

impl Macro {
    /// All macronutrients in display order.
    pub const ALL: [Macro; 3] = [Macro::Carbohydrate, Macro::Protein, Macro::Fat];

    /// Position within [`Macro::ALL`].
    pub fn index(self) -> usize {
        match self {
            Macro::Carbohydrate => 0,
            Macro::Protein => 1,
            Macro::Fat => 2,
        }
    }

    /// Short label used in tables.
    pub fn label(self) -> &'static str {
        match self {
            Macro::Carbohydrate => "Carbs",
            Macro::Protein => "Protein",
            Macro::Fat => "Fat",
        }
    }
}

impl fmt::Display for Macro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Macro {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "carbs" | "carb" | "carbohydrate" | "carbohydrates" => Ok(Macro::Carbohydrate),
            "protein" => Ok(Macro::Protein),
            "fat" | "fats" => Ok(Macro::Fat),
            other => Err(PlannerError::InvalidInput(format!(
                "unknown macronutrient '{}'",
                other
            ))),
        }
    }
}

/// One value per macronutrient.
///
/// Used for gram totals, per-exchange content, Atwater factors and
/// percentage splits alike.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroAmounts {
    pub carbohydrate: f64,
    pub protein: f64,
    pub fat: f64,
}

impl MacroAmounts {
    pub const fn new(carbohydrate: f64, protein: f64, fat: f64) -> Self {
        Self {
            carbohydrate,
            protein,
            fat,
        }
    }

    pub fn get(&self, nutrient: Macro) -> f64 {
        match nutrient {
            Macro::Carbohydrate => self.carbohydrate,
            Macro::Protein => self.protein,
            Macro::Fat => self.fat,
        }
    }

    pub fn set(&mut self, nutrient: Macro, value: f64) {
        match nutrient {
            Macro::Carbohydrate => self.carbohydrate = value,
            Macro::Protein => self.protein = value,
            Macro::Fat => self.fat = value,
        }
    }

    /// Sum of the three values.
    pub fn total(&self) -> f64 {
        self.carbohydrate + self.protein + self.fat
    }

    /// Every value multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(
            self.carbohydrate * factor,
            self.protein * factor,
            self.fat * factor,
        )
    }

    /// Element-wise sum.
    pub fn plus(&self, other: &MacroAmounts) -> Self {
        Self::new(
            self.carbohydrate + other.carbohydrate,
            self.protein + other.protein,
            self.fat + other.fat,
        )
    }

    /// Energy in kcal when `self` holds grams and `atwater` holds kcal/g.
    pub fn kcal(&self, atwater: &MacroAmounts) -> f64 {
        Macro::ALL
            .iter()
            .map(|&m| self.get(m) * atwater.get(m))
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Macro, f64)> + '_ {
        Macro::ALL.into_iter().map(move |m| (m, self.get(m)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("Carbs".parse::<Macro>().unwrap(), Macro::Carbohydrate);
        assert_eq!(" protein ".parse::<Macro>().unwrap(), Macro::Protein);
        assert_eq!("FATS".parse::<Macro>().unwrap(), Macro::Fat);
        assert!("fibre".parse::<Macro>().is_err());
    }

    #[test]
    fn test_index_matches_all_order() {
        for (i, m) in Macro::ALL.iter().enumerate() {
            assert_eq!(m.index(), i);
        }
    }

    #[test]
    fn test_kcal_uses_atwater() {
        let grams = MacroAmounts::new(10.0, 10.0, 10.0);
        let atwater = MacroAmounts::new(4.0, 4.0, 9.0);
        assert!((grams.kcal(&atwater) - 170.0).abs() < 1e-9);
    }

    #[test]
    fn test_scaled_and_plus() {
        let a = MacroAmounts::new(15.0, 3.0, 0.0).scaled(2.0);
        let b = a.plus(&MacroAmounts::new(0.0, 7.0, 3.0));
        assert_eq!(b, MacroAmounts::new(30.0, 13.0, 3.0));
        assert!((b.total() - 46.0).abs() < 1e-9);
    }
}

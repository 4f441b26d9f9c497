use std::str::FromStr;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

use crate::error::{PlannerError, Result};
use crate::models::{Macro, MacroAmounts};
use crate::planner::advisory::Advisory;
use crate::planner::constants::{
    MAX_MACRO_PERCENTAGE, PERCENTAGE_SUM_TARGET, PERCENTAGE_SUM_TOLERANCE,
};
use crate::planner::tables::ReferenceTables;

/// Energy target and body weight that macro conversions are based on.
///
/// Both values are guaranteed positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergyBasis {
    energy_kcal: f64,
    weight_kg: f64,
}

impl EnergyBasis {
    pub fn new(energy_kcal: f64, weight_kg: f64) -> Result<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(energy_kcal) || !valid(weight_kg) {
            return Err(PlannerError::InvalidEnergyBasis {
                energy_kcal,
                weight_kg,
            });
        }
        Ok(Self {
            energy_kcal,
            weight_kg,
        })
    }

    pub fn energy_kcal(&self) -> f64 {
        self.energy_kcal
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }
}

/// The field of a macro goal that the user entered last.
///
/// Only this value is stored; everything else is derived on read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum MacroEntry {
    /// Percent of the daily energy target.
    Percentage(f64),
    /// Grams per kilogram of body weight.
    GramsPerKg(f64),
}

impl MacroEntry {
    pub fn value(self) -> f64 {
        match self {
            MacroEntry::Percentage(v) | MacroEntry::GramsPerKg(v) => v,
        }
    }

    fn validated(self) -> Result<Self> {
        match self {
            MacroEntry::Percentage(pct) if !(0.0..=MAX_MACRO_PERCENTAGE).contains(&pct) => {
                Err(PlannerError::InvalidInput(format!(
                    "percentage must be between 0 and {} (got {})",
                    MAX_MACRO_PERCENTAGE, pct
                )))
            }
            MacroEntry::GramsPerKg(gkg) if !(gkg.is_finite() && gkg >= 0.0) => Err(
                PlannerError::InvalidInput(format!("g/kg must not be negative (got {})", gkg)),
            ),
            entry => Ok(entry),
        }
    }
}

impl FromStr for MacroEntry {
    type Err = PlannerError;

    /// Accepts `50`, `50%`, `1.5g/kg` or `1.5 gkg`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let lower = compact.to_lowercase();

        let (number, per_kg) = if let Some(n) = lower.strip_suffix("g/kg") {
            (n, true)
        } else if let Some(n) = lower.strip_suffix("gkg") {
            (n, true)
        } else if let Some(n) = lower.strip_suffix('%') {
            (n, false)
        } else {
            (lower.as_str(), false)
        };

        let value: f64 = number
            .parse()
            .map_err(|_| PlannerError::InvalidInput(format!("invalid macro entry '{}'", s)))?;

        let entry = if per_kg {
            MacroEntry::GramsPerKg(value)
        } else {
            MacroEntry::Percentage(value)
        };
        entry.validated()
    }
}

/// A macronutrient target, consistent by construction.
///
/// grams = pct / 100 * energy / atwater, g/kg = grams / weight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroGoal {
    nutrient: Macro,
    entry: MacroEntry,
    basis: EnergyBasis,
    atwater: f64,
}

impl MacroGoal {
    pub fn new(
        nutrient: Macro,
        entry: MacroEntry,
        basis: EnergyBasis,
        atwater: f64,
    ) -> Result<Self> {
        Ok(Self {
            nutrient,
            entry: entry.validated()?,
            basis,
            atwater,
        })
    }

    pub fn nutrient(&self) -> Macro {
        self.nutrient
    }

    /// The authoritative (last edited) field.
    pub fn entry(&self) -> MacroEntry {
        self.entry
    }

    pub fn basis(&self) -> EnergyBasis {
        self.basis
    }

    pub fn grams(&self) -> f64 {
        match self.entry {
            MacroEntry::Percentage(pct) => pct / 100.0 * self.basis.energy_kcal / self.atwater,
            MacroEntry::GramsPerKg(gkg) => gkg * self.basis.weight_kg,
        }
    }

    pub fn percentage(&self) -> f64 {
        match self.entry {
            MacroEntry::Percentage(pct) => pct,
            MacroEntry::GramsPerKg(_) => self.kcal() / self.basis.energy_kcal * 100.0,
        }
    }

    pub fn grams_per_kg(&self) -> f64 {
        match self.entry {
            MacroEntry::GramsPerKg(gkg) => gkg,
            MacroEntry::Percentage(_) => self.grams() / self.basis.weight_kg,
        }
    }

    pub fn kcal(&self) -> f64 {
        self.grams() * self.atwater
    }
}

impl Serialize for MacroGoal {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let authoritative = match self.entry {
            MacroEntry::Percentage(_) => "percentage",
            MacroEntry::GramsPerKg(_) => "grams_per_kg",
        };

        let mut state = serializer.serialize_struct("MacroGoal", 6)?;
        state.serialize_field("nutrient", &self.nutrient)?;
        state.serialize_field("authoritative", authoritative)?;
        state.serialize_field("percentage", &self.percentage())?;
        state.serialize_field("grams", &self.grams())?;
        state.serialize_field("grams_per_kg", &self.grams_per_kg())?;
        state.serialize_field("kcal", &self.kcal())?;
        state.end()
    }
}

/// Keeps the three macro goals consistent under edits from either side.
///
/// Each macro stores exactly one authoritative entry. An edit replaces it
/// and, together with it, the shared energy basis.
#[derive(Debug, Clone)]
pub struct MacroReconciler {
    atwater: MacroAmounts,
    basis: EnergyBasis,
    entries: [MacroEntry; 3],
}

impl MacroReconciler {
    /// Start from the default percentage split of `tables`.
    pub fn new(tables: &ReferenceTables, energy_kcal: f64, weight_kg: f64) -> Result<Self> {
        let basis = EnergyBasis::new(energy_kcal, weight_kg)?;
        let split = tables.default_split;
        Ok(Self {
            atwater: tables.atwater,
            basis,
            entries: Macro::ALL.map(|m| MacroEntry::Percentage(split.get(m))),
        })
    }

    pub fn basis(&self) -> EnergyBasis {
        self.basis
    }

    /// Make `pct` the authoritative value for `nutrient`.
    pub fn set_percentage(
        &mut self,
        nutrient: Macro,
        pct: f64,
        energy_kcal: f64,
        weight_kg: f64,
    ) -> Result<MacroGoal> {
        self.apply(nutrient, MacroEntry::Percentage(pct), energy_kcal, weight_kg)
    }

    /// Make `gkg` the authoritative value for `nutrient`.
    pub fn set_grams_per_kg(
        &mut self,
        nutrient: Macro,
        gkg: f64,
        energy_kcal: f64,
        weight_kg: f64,
    ) -> Result<MacroGoal> {
        self.apply(nutrient, MacroEntry::GramsPerKg(gkg), energy_kcal, weight_kg)
    }

    /// Apply an edit of either kind.
    ///
    /// Nothing changes unless both the basis and the entry are valid.
    pub fn apply(
        &mut self,
        nutrient: Macro,
        entry: MacroEntry,
        energy_kcal: f64,
        weight_kg: f64,
    ) -> Result<MacroGoal> {
        let basis = EnergyBasis::new(energy_kcal, weight_kg)?;
        let goal = MacroGoal::new(nutrient, entry, basis, self.atwater.get(nutrient))?;

        self.basis = basis;
        self.entries[nutrient.index()] = goal.entry;

        debug!(
            %nutrient,
            pct = goal.percentage(),
            grams = goal.grams(),
            gkg = goal.grams_per_kg(),
            "macro goal updated"
        );
        Ok(goal)
    }

    /// Re-derive every goal for a new energy target or weight, keeping each
    /// macro's authoritative field.
    pub fn rebase(&mut self, energy_kcal: f64, weight_kg: f64) -> Result<()> {
        self.basis = EnergyBasis::new(energy_kcal, weight_kg)?;
        Ok(())
    }

    pub fn goal(&self, nutrient: Macro) -> MacroGoal {
        MacroGoal {
            nutrient,
            entry: self.entries[nutrient.index()],
            basis: self.basis,
            atwater: self.atwater.get(nutrient),
        }
    }

    pub fn goals(&self) -> [MacroGoal; 3] {
        Macro::ALL.map(|m| self.goal(m))
    }

    /// Gram targets for all three macros.
    pub fn target_grams(&self) -> MacroAmounts {
        let mut grams = MacroAmounts::default();
        for goal in self.goals() {
            grams.set(goal.nutrient, goal.grams());
        }
        grams
    }

    pub fn percentage_total(&self) -> f64 {
        percentage_total(&self.goals())
    }

    /// Advisory when the percentages drift more than one point from 100.
    pub fn percentage_balance(&self) -> Option<Advisory> {
        let total_pct = self.percentage_total();
        if (total_pct - PERCENTAGE_SUM_TARGET).abs() > PERCENTAGE_SUM_TOLERANCE {
            Some(Advisory::PercentageImbalance { total_pct })
        } else {
            None
        }
    }
}

/// Sum of the (authoritative or derived) percentages of `goals`.
pub fn percentage_total(goals: &[MacroGoal]) -> f64 {
    goals.iter().map(|g| g.percentage()).sum()
}

use std::collections::BTreeMap;

use serde::Serialize;
use strsim::jaro_winkler;
use tracing::debug;

use crate::error::{PlannerError, Result};
use crate::models::{ExchangeCategory, Macro, MacroAmounts};
use crate::planner::constants::*;

/// A selectable named factor such as a stress or activity level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledFactor {
    pub key: String,
    pub label: String,
    pub value: f64,
}

impl LabeledFactor {
    fn from_row(&(key, label, value): &(&str, &str, f64)) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            value,
        }
    }
}

/// One entry of the METs activity table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetActivity {
    pub description: String,
    pub met: f64,
}

/// Immutable reference data consumed by the planner components.
///
/// Built once per session and passed by reference, so separate evaluations
/// never share mutable tables.
#[derive(Debug, Clone, Serialize)]
pub struct ReferenceTables {
    pub atwater: MacroAmounts,
    pub default_split: MacroAmounts,
    pub stress_levels: Vec<LabeledFactor>,
    pub activity_levels: Vec<LabeledFactor>,
    pub amputations: Vec<LabeledFactor>,
    pub exchange_content: BTreeMap<ExchangeCategory, MacroAmounts>,
    pub mets: Vec<MetActivity>,
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self::standard()
    }
}

impl ReferenceTables {
    /// The clinical defaults shipped with the planner.
    pub fn standard() -> Self {
        Self {
            atwater: ATWATER_FACTORS,
            default_split: DEFAULT_MACRO_SPLIT,
            stress_levels: STRESS_LEVELS.iter().map(LabeledFactor::from_row).collect(),
            activity_levels: ACTIVITY_LEVELS.iter().map(LabeledFactor::from_row).collect(),
            amputations: AMPUTATIONS.iter().map(LabeledFactor::from_row).collect(),
            exchange_content: EXCHANGE_CONTENT.iter().copied().collect(),
            mets: MET_ACTIVITIES
                .iter()
                .map(|&(description, met)| MetActivity {
                    description: description.to_string(),
                    met,
                })
                .collect(),
        }
    }

    /// kcal per gram of a macronutrient.
    pub fn atwater(&self, nutrient: Macro) -> f64 {
        self.atwater.get(nutrient)
    }

    /// Grams contributed by one exchange of `category`.
    pub fn exchange_content(&self, category: ExchangeCategory) -> MacroAmounts {
        self.exchange_content
            .get(&category)
            .copied()
            .unwrap_or_default()
    }

    /// Resolve a stress level by key, or accept a raw numeric factor.
    pub fn stress_factor(&self, input: &str) -> Result<f64> {
        resolve_factor(&self.stress_levels, input, "stress level")
    }

    /// Resolve an activity level by key, or accept a raw numeric factor.
    pub fn activity_factor(&self, input: &str) -> Result<f64> {
        resolve_factor(&self.activity_levels, input, "activity level")
    }

    /// Resolve an amputation by key, or accept a raw percentage.
    pub fn amputation_pct(&self, input: &str) -> Result<f64> {
        resolve_factor(&self.amputations, input, "amputation")
    }

    /// METs entries resembling `query`, best match first.
    pub fn search_mets(&self, query: &str) -> Vec<(&MetActivity, f64)> {
        let query = query.trim().to_lowercase();

        let mut candidates: Vec<(&MetActivity, f64)> = self
            .mets
            .iter()
            .map(|a| {
                let description = a.description.to_lowercase();
                // Substring hits rank above anything fuzzy.
                let score = if !query.is_empty() && description.contains(&query) {
                    1.0 + query.len() as f64 / description.len() as f64
                } else {
                    jaro_winkler(&description, &query)
                };
                (a, score)
            })
            .filter(|(_, score)| *score > MET_MATCH_THRESHOLD)
            .collect();

        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        candidates.truncate(MET_MATCH_LIMIT);
        candidates
    }

    /// Exact (case-insensitive) description lookup, falling back to the best
    /// fuzzy match.
    pub fn find_met(&self, query: &str) -> Result<&MetActivity> {
        if let Some(exact) = self
            .mets
            .iter()
            .find(|a| a.description.eq_ignore_ascii_case(query.trim()))
        {
            return Ok(exact);
        }

        let best = self
            .search_mets(query)
            .into_iter()
            .next()
            .map(|(a, score)| {
                debug!(query, matched = %a.description, score, "fuzzy METs match");
                a
            });

        best.ok_or_else(|| PlannerError::UnknownActivity(query.to_string()))
    }
}

fn resolve_factor(table: &[LabeledFactor], input: &str, what: &str) -> Result<f64> {
    let input = input.trim();

    if let Some(row) = table.iter().find(|f| f.key.eq_ignore_ascii_case(input)) {
        return Ok(row.value);
    }

    input.parse::<f64>().map_err(|_| {
        let keys: Vec<&str> = table.iter().map(|f| f.key.as_str()).collect();
        PlannerError::InvalidInput(format!(
            "unknown {} '{}' (expected a number or one of: {})",
            what,
            input,
            keys.join(", ")
        ))
    })
}

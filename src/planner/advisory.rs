use std::fmt;

use serde::Serialize;

use crate::models::Macro;

/// A non-fatal observation attached to an evaluation.
///
/// Advisories never stop a computation; they only annotate its output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// Macro percentages do not add up to 100.
    PercentageImbalance { total_pct: f64 },

    /// The exchange tally for a macro is far from its gram target.
    ExchangeDeviation {
        nutrient: Macro,
        target_g: f64,
        tallied_g: f64,
    },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::PercentageImbalance { total_pct } => write!(
                f,
                "Macros total {:.1}%. Consider adjusting to 100% for balance.",
                total_pct
            ),
            Advisory::ExchangeDeviation {
                nutrient,
                target_g,
                tallied_g,
            } => {
                let diff = tallied_g - target_g;
                let sign = if diff >= 0.0 { "+" } else { "" };
                write!(
                    f,
                    "{} from exchanges is {:.1} g against a {:.1} g target ({}{:.1} g).",
                    nutrient, tallied_g, target_g, sign, diff
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let imbalance = Advisory::PercentageImbalance { total_pct: 90.0 };
        assert!(imbalance.to_string().contains("90.0%"));

        let deviation = Advisory::ExchangeDeviation {
            nutrient: Macro::Protein,
            target_g: 100.0,
            tallied_g: 56.0,
        };
        assert_eq!(
            deviation.to_string(),
            "Protein from exchanges is 56.0 g against a 100.0 g target (-44.0 g)."
        );
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let json = serde_json::to_value(Advisory::PercentageImbalance { total_pct: 90.0 }).unwrap();
        assert_eq!(json["kind"], "percentage_imbalance");
        assert_eq!(json["total_pct"], 90.0);
    }
}

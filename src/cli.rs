use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::models::Sex;
use crate::planner::constants::EXCHANGE_DEVIATION_TOLERANCE;

/// Meal planner: estimate energy needs, set macro goals and check them
/// against dietary exchanges.
#[derive(Parser, Debug)]
#[command(name = "meal_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Walk through the planner with prompts.
    Interactive,

    /// Evaluate a profile, macro goals and exchanges given as flags.
    Evaluate(EvaluateArgs),

    /// Search the METs activity table.
    Mets {
        /// Activity to look for; lists the whole table when omitted.
        query: Option<String>,
    },

    /// Print the reference tables.
    Tables,
}

impl Default for Command {
    fn default() -> Self {
        Command::Interactive
    }
}

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Actual weight (kg).
    #[arg(long)]
    pub weight: f64,

    /// Weight for calculations (kg), if different from the actual weight.
    #[arg(long)]
    pub calc_weight: Option<f64>,

    /// Height (cm).
    #[arg(long)]
    pub height: f64,

    /// Age (years).
    #[arg(long)]
    pub age: u32,

    #[arg(long, value_enum)]
    pub sex: Sex,

    /// Measured body fat (%), compared against the ideal range.
    #[arg(long)]
    pub body_fat: Option<f64>,

    /// Stress level key (none, mild, moderate, major, severe) or a factor.
    #[arg(long, default_value = "none")]
    pub stress: String,

    /// Activity level key (sedentary, light, moderate, very-active,
    /// extra-active) or a factor.
    #[arg(long, default_value = "sedentary")]
    pub activity: String,

    /// Amputation key (see `tables`) or a percentage.
    #[arg(long, default_value = "none")]
    pub amputation: String,

    /// Pregnancy/breastfeeding kcal.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub pregnancy_kcal: f64,

    /// Weight goal adjustment kcal (negative for a deficit).
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub goal_kcal: f64,

    /// Custom kcal adjustment.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub custom_kcal: f64,

    /// Exercise activity, matched against the METs table.
    #[arg(long, conflicts_with = "met_value")]
    pub met_activity: Option<String>,

    /// Exercise intensity as a raw MET value.
    #[arg(long)]
    pub met_value: Option<f64>,

    /// Exercise duration (minutes).
    #[arg(long, default_value_t = 0.0)]
    pub exercise_minutes: f64,

    /// Carbohydrate goal, e.g. `50%` or `4g/kg`.
    #[arg(long)]
    pub carbs: Option<String>,

    /// Protein goal, e.g. `20%` or `1.5g/kg`.
    #[arg(long)]
    pub protein: Option<String>,

    /// Fat goal, e.g. `30%` or `1g/kg`.
    #[arg(long)]
    pub fat: Option<String>,

    /// Exchange counts, e.g. `starch=7,protein=5`. Repeatable.
    #[arg(long = "exchange", value_name = "CATEGORY=COUNT")]
    pub exchanges: Vec<String>,

    /// Per-meal exchange counts, e.g. `breakfast:starch=2,milk=1`. Repeatable.
    #[arg(long = "meal", value_name = "MEAL:CATEGORY=COUNT")]
    pub meals: Vec<String>,

    /// Fraction of a gram target an exchange tally may miss before it is
    /// reported.
    #[arg(long, default_value_t = EXCHANGE_DEVIATION_TOLERANCE)]
    pub tolerance: f64,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable tables.
    Table,
    /// The full evaluation as JSON.
    Json,
    /// The comparison table as CSV.
    Csv,
}

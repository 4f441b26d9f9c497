pub mod export;
pub mod parse;
pub mod prompts;
pub mod render;

pub use export::{write_comparison_csv, write_json};
pub use parse::{parse_exchange_args, parse_exchange_list, parse_meal_args, parse_meal_entry};
pub use prompts::{
    prompt_exchange_plan, prompt_exercise, prompt_macro_entries, prompt_meal_schedule,
    prompt_profile, prompt_yes_no,
};
pub use render::{
    display_advisories, display_comparison, display_energy, display_evaluation, display_goals,
    display_meals, display_met_activities, display_tables,
};

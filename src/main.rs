use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use meal_planner_rs::cli::{Cli, Command, EvaluateArgs, OutputFormat};
use meal_planner_rs::error::Result;
use meal_planner_rs::interface::{
    display_advisories, display_comparison, display_energy, display_evaluation, display_goals,
    display_meals, display_met_activities, display_tables, parse_exchange_args, parse_meal_args,
    prompt_exchange_plan, prompt_macro_entries, prompt_meal_schedule, prompt_profile,
    prompt_yes_no, write_comparison_csv, write_json,
};
use meal_planner_rs::models::{ExerciseSession, KcalAdjustments, Macro, ProfileInputs};
use meal_planner_rs::planner::{
    Advisory, BodyComposition, EvaluationRequest, MacroEntry, MacroReconciler, ReferenceTables,
    estimate_tdee, evaluate,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();
    let tables = ReferenceTables::standard();

    match command {
        Command::Interactive => cmd_interactive(&tables),
        Command::Evaluate(args) => cmd_evaluate(&args, &tables),
        Command::Mets { query } => cmd_mets(query.as_deref(), &tables),
        Command::Tables => {
            display_tables(&tables);
            Ok(())
        }
    }
}

/// Walk through profile, macro goals and exchanges with prompts.
fn cmd_interactive(tables: &ReferenceTables) -> Result<()> {
    println!("=== Personal Details ===");
    let profile = prompt_profile(tables)?;

    let energy = estimate_tdee(&profile)?;
    display_energy(&energy, &BodyComposition::for_profile(&profile));
    println!();

    // Edits are echoed live; the pass below recomputes from the same entries.
    let mut reconciler = MacroReconciler::new(tables, energy.tdee_kcal, profile.basis_weight())?;
    let macro_entries = prompt_macro_entries(&mut reconciler)?;
    display_goals(&reconciler.goals());
    display_advisories(&reconciler.percentage_balance().into_iter().collect::<Vec<_>>());
    println!();

    let by_meal = prompt_yes_no("Plan exchanges meal by meal?", false)?;
    let mut request = EvaluationRequest::new(profile);
    request.macro_entries = macro_entries;
    if by_meal {
        request.meals = prompt_meal_schedule()?;
    } else {
        request.exchanges = prompt_exchange_plan("Daily")?;
    }

    let evaluation = evaluate(&request, tables)?;
    display_comparison(&evaluation.comparison, evaluation.tally_kcal);
    display_meals(&evaluation.meals);

    // The percentage imbalance was already shown with the goals.
    let exchange_advisories: Vec<Advisory> = evaluation
        .advisories
        .into_iter()
        .filter(|a| !matches!(a, Advisory::PercentageImbalance { .. }))
        .collect();
    display_advisories(&exchange_advisories);
    println!();

    Ok(())
}

/// Evaluate everything from command-line flags.
fn cmd_evaluate(args: &EvaluateArgs, tables: &ReferenceTables) -> Result<()> {
    let request = build_request(args, tables)?;
    let evaluation = evaluate(&request, tables)?;

    match args.format {
        OutputFormat::Table => display_evaluation(&evaluation),
        OutputFormat::Json => write_json(&evaluation, io::stdout().lock())?,
        OutputFormat::Csv => write_comparison_csv(&evaluation.comparison, io::stdout().lock())?,
    }

    Ok(())
}

fn build_request(args: &EvaluateArgs, tables: &ReferenceTables) -> Result<EvaluationRequest> {
    let adjustments = KcalAdjustments {
        pregnancy_lactation: args.pregnancy_kcal,
        goal: args.goal_kcal,
        custom: args.custom_kcal,
    };

    let mut profile = ProfileInputs::new(args.weight, args.height, args.age, args.sex)
        .with_factors(
            tables.stress_factor(&args.stress)?,
            tables.activity_factor(&args.activity)?,
        )
        .with_amputation(tables.amputation_pct(&args.amputation)?)
        .with_adjustments(adjustments);

    if let Some(calc_weight) = args.calc_weight {
        profile = profile.with_calc_weight(calc_weight);
    }
    if let Some(body_fat) = args.body_fat {
        profile = profile.with_body_fat(body_fat);
    }

    let exercise = match (&args.met_activity, args.met_value) {
        (Some(query), _) => {
            let activity = tables.find_met(query)?;
            Some(
                ExerciseSession::new(activity.met, args.exercise_minutes)
                    .described(activity.description.clone()),
            )
        }
        (None, Some(met)) => Some(ExerciseSession::new(met, args.exercise_minutes)),
        (None, None) => None,
    };
    if let Some(exercise) = exercise {
        profile = profile.with_exercise(exercise);
    }

    let mut request = EvaluationRequest::new(profile)
        .with_exchanges(parse_exchange_args(&args.exchanges)?)
        .with_meals(parse_meal_args(&args.meals)?);
    request.deviation_tolerance = args.tolerance;

    let macro_args = [
        (Macro::Carbohydrate, &args.carbs),
        (Macro::Protein, &args.protein),
        (Macro::Fat, &args.fat),
    ];
    for (nutrient, value) in macro_args {
        if let Some(value) = value {
            request = request.with_entry(nutrient, value.parse::<MacroEntry>()?);
        }
    }

    Ok(request)
}

/// Search the METs table, or list it when no query is given.
fn cmd_mets(query: Option<&str>, tables: &ReferenceTables) -> Result<()> {
    println!();
    match query {
        Some(query) => {
            println!("=== METs matches for '{}' ===", query);
            let matches = tables.search_mets(query);
            display_met_activities(matches.iter().map(|(a, score)| (*a, Some(*score))));
        }
        None => {
            println!("=== METs activities ===");
            display_met_activities(tables.mets.iter().map(|a| (a, None)));
        }
    }
    println!();
    Ok(())
}

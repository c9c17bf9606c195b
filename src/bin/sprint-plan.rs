//! Plan a backlog into sprints from a JSON description.
//!
//! Usage: `sprint-plan <input.json> [--output FILE] [--no-normalize] [--no-calendar]`

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use u_sprint::io::{load_path, render_report, write_summary};
use u_sprint::planner::{PlanConfig, Planner};
use u_sprint::slotting::SlotConfig;

#[derive(Parser, Debug)]
#[command(name = "sprint-plan")]
#[command(about = "Slot a dependency-aware backlog into capacity-bounded sprints")]
struct Args {
    /// Input JSON with `sprints` and `stories`
    input: PathBuf,

    /// Where to write the JSON summary
    #[arg(long, short, default_value = "output.json")]
    output: PathBuf,

    /// Skip priority/deadline propagation from dependents
    #[arg(long)]
    no_normalize: bool,

    /// Ignore story start dates and deadlines when slotting
    #[arg(long)]
    no_calendar: bool,

    /// Ignore per-assignee sprint budgets
    #[arg(long)]
    no_assignee_limits: bool,

    /// Do not print the text report
    #[arg(long, short)]
    quiet: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let args = Args::parse();

    let (backlog, sprints) = load_path(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;

    let slotting = SlotConfig::default()
        .with_calendar(!args.no_calendar)
        .with_start_date_propagation(!args.no_calendar)
        .with_assignee_capacity(!args.no_assignee_limits);
    let config = PlanConfig::default()
        .with_normalization(!args.no_normalize)
        .with_slotting(slotting);

    let schedule = Planner::new(config)
        .plan(backlog, sprints)
        .context("planning failed")?;

    if !args.quiet {
        println!("{}", render_report(&schedule));
    }

    write_summary(&schedule, &args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!(path = %args.output.display(), "Wrote summary");

    Ok(())
}

use std::path::PathBuf;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;
use tracing::info;

use crowd_simulation::{Environment, Report};

pub struct SimulateArgs {
    pub scenario: Option<PathBuf>,
    pub agents: usize,
    pub seed: u64,
    pub max_ticks: u64,
    pub json: bool,
    pub verbose: bool,
}

/// Machine-readable result of a run.
#[derive(Serialize)]
struct RunSummary {
    ticks: u64,
    elapsed_seconds: f64,
    agents: usize,
    escaped: usize,
    complete: bool,
    report: Report,
}

pub fn run(args: &SimulateArgs) -> Result<(), String> {
    let scenario = super::load_scenario(args.scenario.as_deref(), args.agents, args.seed)?;
    let mut env = scenario
        .build()
        .map_err(|e| format!("invalid scenario: {e}"))?;

    info!(
        agents = env.agents().len(),
        max_ticks = args.max_ticks,
        "starting run"
    );
    while !env.is_complete() && env.current_tick() < args.max_ticks {
        env.step().map_err(|e| format!("simulation error: {e}"))?;
    }

    let report = env.plot(0).map_err(|e| e.to_string())?;
    let summary = RunSummary {
        ticks: env.current_tick(),
        elapsed_seconds: env.clock().elapsed(),
        agents: env.agents().len(),
        escaped: env.escaped_count().unwrap_or(0),
        complete: env.is_complete(),
        report,
    };

    if args.json {
        let json = serde_json::to_string_pretty(&summary).map_err(|e| e.to_string())?;
        println!("{json}");
        return Ok(());
    }

    print_summary(&env, &summary, args);
    Ok(())
}

fn print_summary(env: &Environment, summary: &RunSummary, args: &SimulateArgs) {
    let source = match &args.scenario {
        Some(path) => path.display().to_string(),
        None => format!("room with doorway (seed={})", args.seed),
    };
    println!("  {} {}", "Simulation".bold(), source.dimmed());
    println!(
        "  {} ticks, {:.2}s simulated, {} of {} agents escaped",
        summary.ticks, summary.elapsed_seconds, summary.escaped, summary.agents
    );
    if summary.complete {
        println!("  {}", "All agents escaped".green().bold());
    } else {
        println!(
            "  {} stopped after {} ticks",
            "INCOMPLETE".yellow().bold(),
            args.max_ticks
        );
    }
    println!();

    if summary.agents > 0 {
        println!("  {}", "Escape Progress".bold().underline());
        println!();
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Escaped", "Tick", "Seconds"]);
        let dt = env.clock().time_step();
        for n in 1..=summary.agents {
            let row = match summary.report.first_tick_reaching(n as f64) {
                Some(tick) => vec![
                    n.to_string(),
                    tick.to_string(),
                    format!("{:.2}", tick as f64 * dt),
                ],
                None => vec![n.to_string(), "--".into(), "--".into()],
            };
            table.add_row(row);
        }
        println!("{table}");
        println!();
    }

    if args.verbose {
        println!("  {}", "Per-Tick Samples".bold().underline());
        for (i, value) in summary.report.metric.iter().enumerate() {
            let tick_label = format!("[tick {:>4}]", i + 1).dimmed();
            println!("  {tick_label} {value}");
        }
        println!();
    }
}

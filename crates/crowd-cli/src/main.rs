//! CLI frontend for the crowd evacuation engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "crowd",
    about = "Crowd evacuation simulator",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the built-in room-with-doorway scenario to a JSON file
    Init {
        /// Path of the scenario file to create
        path: PathBuf,

        /// Number of agents to place in the room
        #[arg(short, long, default_value = "10")]
        agents: usize,

        /// RNG seed for agent placement
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },

    /// Validate a scenario file without running it
    Check {
        /// Scenario file to validate
        path: PathBuf,
    },

    /// Run a simulation until every agent has escaped
    Simulate {
        /// Scenario file (default: built-in room with a doorway)
        #[arg(long)]
        scenario: Option<PathBuf>,

        /// Number of agents for the built-in scenario
        #[arg(short, long, default_value = "10")]
        agents: usize,

        /// RNG seed for the built-in scenario
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Give up after this many ticks
        #[arg(long, default_value = "5000")]
        max_ticks: u64,

        /// Print the result as JSON instead of tables
        #[arg(long)]
        json: bool,

        /// Also print the escaped count for every tick
        #[arg(short, long)]
        verbose: bool,
    },
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { path, agents, seed } => commands::init::run(&path, agents, seed),
        Commands::Check { path } => commands::check::run(&path),
        Commands::Simulate {
            scenario,
            agents,
            seed,
            max_ticks,
            json,
            verbose,
        } => commands::simulate::run(
            &commands::simulate::SimulateArgs {
                scenario,
                agents,
                seed,
                max_ticks,
                json,
                verbose,
            },
        ),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

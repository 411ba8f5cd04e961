//! Grain CLI - headless driver for the sand simulation

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{init, run};

#[derive(Parser)]
#[command(name = "grain")]
#[command(about = "Falling-sand simulation with delta rendering", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init {
        /// Path of the config file to create
        #[arg(default_value = "grain.toml")]
        path: String,
    },

    /// Run the simulation headlessly
    Run {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<String>,

        /// Number of ticks to simulate
        #[arg(short, long, default_value = "600")]
        ticks: u64,

        /// RNG seed (overrides the config file)
        #[arg(long)]
        seed: Option<u64>,

        /// Spawn probability per tick (overrides the config file)
        #[arg(long, value_parser = parse_probability)]
        spawn_rate: Option<f64>,

        /// Canvas height in pixels (default: floor + 4)
        #[arg(long)]
        height: Option<u32>,

        /// Write the final frame to this PNG
        #[arg(short, long)]
        output: Option<String>,

        /// Print an ASCII preview of the final frame
        #[arg(long)]
        ascii: bool,

        /// Pixels per ASCII character
        #[arg(long, default_value = "4")]
        ascii_step: u32,

        /// Print stats every N ticks (0 disables)
        #[arg(long, default_value = "0")]
        stats_every: u64,
    },
}

fn parse_probability(s: &str) -> Result<f64, String> {
    let p: f64 = s.trim().parse().map_err(|e| format!("invalid number: {}", e))?;
    if !(0.0..=1.0).contains(&p) {
        return Err(format!("expected a value between 0 and 1, got {}", p));
    }
    Ok(p)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { path } => init::run(&path),
        Commands::Run {
            config,
            ticks,
            seed,
            spawn_rate,
            height,
            output,
            ascii,
            ascii_step,
            stats_every,
        } => run::run(run::RunArgs {
            config,
            ticks,
            seed,
            spawn_rate,
            height,
            output,
            ascii,
            ascii_step,
            stats_every,
        }),
    }
}

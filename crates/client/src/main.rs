//! Effect engine demo driver.
//!
//! Steps a scripted actor through a scenario with a fixed time step and
//! reports its effects along the way.
//!
//! ```bash
//! # Built-in venom scenario, one second per step
//! cargo run -p aura-client -- run
//!
//! # Scenario file, quarter-second steps, JSON lines on stdout
//! cargo run -p aura-client -- run fight.ron --step 0.25 --json
//! ```

mod config;
mod simulation;

use anyhow::Result;
use aura_content::{EffectName, Scenario};
use clap::Parser;
use strum::IntoEnumIterator;
use tracing::info;

use config::{ClientConfig, ScenarioSource};

/// Effect engine demo driver
#[derive(Parser)]
#[command(name = "aura")]
#[command(about = "Runs timed status effect scenarios", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run a scenario until its effects run out
    Run(RunArgs),

    /// List effect kinds and built-in scenarios
    List,
}

#[derive(Parser)]
struct RunArgs {
    /// Built-in scenario name or path to a `.ron` file
    scenario: Option<String>,

    /// Seconds advanced per step
    #[arg(long)]
    step: Option<f64>,

    /// Maximum number of steps
    #[arg(long)]
    max_steps: Option<usize>,

    /// Print every step as a JSON line
    #[arg(long)]
    json: bool,
}

impl RunArgs {
    /// Flags override the environment.
    fn into_config(self) -> ClientConfig {
        let mut config = ClientConfig::from_env();
        if let Some(scenario) = self.scenario {
            config.scenario = ScenarioSource::parse(&scenario);
        }
        if let Some(step) = self.step {
            config.time_step = step;
        }
        if let Some(max_steps) = self.max_steps {
            config.max_steps = max_steps;
        }
        config.json = self.json;
        config
    }

    fn execute(self) -> Result<()> {
        let config = self.into_config();
        let json = config.json;

        let summary = simulation::run(&config, |report| {
            if json {
                println!("{}", serde_json::to_string(report)?);
            } else {
                info!("{report}");
            }
            Ok(())
        })?;

        if json {
            println!("{}", serde_json::to_string(&summary)?);
        } else {
            println!("{summary}");
        }
        Ok(())
    }
}

fn list() -> Result<()> {
    println!("Effects:");
    for name in EffectName::iter() {
        let spec = name.spec();
        let duration = if spec.is_permanent() {
            "permanent".to_owned()
        } else {
            format!("{:.1}s", spec.max_duration)
        };
        println!(
            "  {:<14} {:<13} {:<10} [{}]",
            name.as_ref(),
            spec.variant.as_ref(),
            duration,
            spec.dispel_groups.join(", ")
        );
    }

    println!("Scenarios:");
    for name in Scenario::BUILTIN {
        let scenario = Scenario::builtin(name)?;
        println!(
            "  {:<14} {} initial, {} events",
            name,
            scenario.initial.len(),
            scenario.events.len()
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    // Load .env file if it exists (for AURA_* settings)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => args.execute(),
        Command::List => list(),
    }
}

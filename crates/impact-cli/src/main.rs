use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use impact::report;
use impact::scenarios::Preset;
use tracing::info;
use tracing_subscriber::EnvFilter;
use units::Time;

mod scenario_file;
#[cfg(test)]
mod scenario_file_test;

use scenario_file::ScenarioFile;

#[derive(Parser, Debug)]
#[command(name = "impact", version, about = "Asteroid encounter simulator")]
struct Args {
    /// Preset scenario to run
    #[arg(short, long, default_value = "direct-impact")]
    scenario: Preset,

    /// YAML scenario file, run instead of the preset
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Simulated time in days, overriding the scenario's own
    #[arg(short, long)]
    days: Option<f64>,

    /// Log progress milestones (RUST_LOG takes precedence)
    #[arg(short, long)]
    progress: bool,

    /// Write the full result as YAML
    #[arg(long)]
    save: Option<PathBuf>,

    /// List the preset scenarios and exit
    #[arg(short, long)]
    list: bool,
}

fn init_tracing(progress: bool) {
    let fallback = if progress { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.progress);

    if args.list {
        println!("Available scenarios:");
        for preset in Preset::all() {
            println!("  {:<16} {}", preset.name(), preset.description());
        }
        return Ok(());
    }

    let (mut system, scenario_duration, label) = match &args.file {
        Some(path) => {
            let file = ScenarioFile::load(path)?;
            (file.build()?, file.duration(), path.display().to_string())
        }
        None => (
            args.scenario.build()?,
            args.scenario.default_duration(),
            args.scenario.to_string(),
        ),
    };
    let duration = match args.days {
        Some(days) => Time::from_days(days).to_seconds(),
        None => scenario_duration,
    };

    info!(
        scenario = %label,
        bodies = system.body_count(),
        days = Time::from_seconds(duration).to_days(),
        "running scenario"
    );
    let result = system
        .simulate(duration)
        .with_context(|| format!("simulating {label}"))?;

    println!("{}", report::render(&result));

    if let Some(path) = &args.save {
        let yaml = serde_yaml::to_string(&result).context("serializing result")?;
        fs::write(path, yaml).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "result saved");
    }

    Ok(())
}

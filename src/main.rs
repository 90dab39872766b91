use anyhow::{Context, Result};
use bit_common::{history_path, load_world_pair, BitConfig, Checkpoint, RunState};
use bit_engine::Simulation;
use clap::Parser;
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Runs the configured program against a start world and records every step
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the run's config.toml
    #[arg(default_value = "config.toml")]
    config: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize the logger
    env_logger::init();

    info!("Starting Bit World engine...");

    // --- Load Configuration ---
    let config = BitConfig::load(&args.config)?;
    debug!("Configuration: {:#?}", config);

    // --- Load Worlds ---
    info!(
        "Loading start world {} and goal world {}",
        config.world.start.display(),
        config.world.goal.display()
    );
    let (start, goal) = load_world_pair(&config.world.start, &config.world.goal)?;
    let mut sim = Simulation::new(start, goal).context("Worlds cannot be simulated")?;

    // --- Run Program ---
    let actions = &config.program.actions;
    info!("Running {} actions...", actions.len());
    let start_time = Instant::now();
    let recorded = sim.perform_all(actions);
    info!(
        "Recorded {} of {} actions in {:.3} ms ({} history entries).",
        recorded,
        actions.len(),
        start_time.elapsed().as_secs_f64() * 1000.0,
        sim.history_len()
    );

    match sim.run_state() {
        RunState::Running => info!("Run finished without errors."),
        RunState::Halted(reason) => {
            warn!(
                "Run halted: {}. {} later actions were ignored.",
                reason,
                actions.len() - recorded
            );
        }
    }
    let final_label = &sim.history().latest().label;
    info!("Final step: {}", final_label);

    // --- Save Recorded Data ---
    let output = config.output.clone();
    if output.save_checkpoints {
        let filename = format!("{}_checkpoints.csv", output.base_filename);
        match write_checkpoints(&filename, sim.checkpoints()) {
            Ok(()) => info!("{} checkpoints saved to {}", sim.checkpoints().len(), filename),
            Err(e) => error!("Error saving checkpoints to '{}': {:#}", filename, e),
        }
    } else {
        info!("Skipping saving checkpoints as per config.");
    }

    if output.save_history {
        let path = history_path(&output.base_filename, output.format);
        let record = sim.into_record();
        record.save(&path, output.format)?;
        info!(
            "History of {} entries saved to {} ({:?} format)",
            record.history.len(),
            path.display(),
            output.format
        );
    } else {
        info!("Skipping saving history as per config (save_history is false).");
    }

    info!("Done.");
    Ok(())
}

fn write_checkpoints(filename: impl AsRef<Path>, checkpoints: &[Checkpoint]) -> Result<()> {
    let mut writer = csv::Writer::from_path(filename.as_ref())?;
    writer.write_record(["step_count", "name"])?;
    for checkpoint in checkpoints {
        writer.write_record([checkpoint.step_count.to_string(), checkpoint.name.clone()])?;
    }
    writer.flush()?;
    Ok(())
}

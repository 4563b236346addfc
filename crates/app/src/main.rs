use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use stimulus_runner_core::{
    build_sequence, play, prepare_output_dir, preflight, read_sections, Action, HeadlessDriver,
    PresentationDriver, RunMode, RunnerConfig,
};
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Covers --help/--version as well; usage problems exit with 1.
            let _ = err.print();
            std::process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    };

    let result = match cli.command {
        Commands::Run { config } => run_present(&config),
        Commands::Record { config, experiment } => run_record(&config, &experiment),
    };

    if let Err(err) = result {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run_present(config_path: &Path) -> stimulus_runner_core::Result<()> {
    let config = RunnerConfig::load(config_path, RunMode::Present)?;
    let actions = prepare_actions(&config)?;
    present(&config, &actions)
}

fn run_record(config_path: &Path, experiment: &str) -> stimulus_runner_core::Result<()> {
    let config = RunnerConfig::load(config_path, RunMode::Record)?;
    let actions = prepare_actions(&config)?;

    if let Some(base) = config.output_dir.as_deref() {
        let session_dir = prepare_output_dir(base, experiment)?;
        tracing::info!(session_dir = %session_dir.display(), "recording session directory ready");
    }

    present(&config, &actions)
}

/// Runs the whole pre-flight pipeline: discover sections, validate every
/// stimulus file, then build the flat action sequence. Nothing is rendered
/// until all of this has succeeded.
fn prepare_actions(config: &RunnerConfig) -> stimulus_runner_core::Result<Vec<Action>> {
    let sections = read_sections(&config.section_dir)?;
    tracing::info!(sections = sections.len(), "experiment script loaded");

    preflight(&sections)?;

    let actions = build_sequence(config, &sections)?;
    tracing::info!(actions = actions.len(), "action sequence built");
    Ok(actions)
}

fn present(config: &RunnerConfig, actions: &[Action]) -> stimulus_runner_core::Result<()> {
    let mut driver = HeadlessDriver::new();
    driver.open(config.window_width, config.window_height)?;
    let played = play(&mut driver, actions);
    driver.close()?;
    played
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Presents an experiment script of timed stimuli", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Present the experiment script described by a configuration file.
    Run {
        /// Path to the YAML configuration file.
        config: PathBuf,
    },
    /// Present the script and prepare a per-experiment output directory.
    Record {
        /// Path to the YAML configuration file.
        config: PathBuf,
        /// Name of the experiment; names the session output directory.
        experiment: String,
    },
}

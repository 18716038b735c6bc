mod args;
mod commands;
pub mod defaults;
mod printing;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use cultevo_sim::simulation::HeteroConfig;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use args::{ModelArgs, OutputFormat};
use commands::{batch, hetero, predictive, pulse, run};

/// Cultevo: A Cultural Transmission Simulator
///
/// Simulates a population that copies cultural variants from the previous
/// generation, invents new ones, and favours or shuns popular variants
/// according to a transmission bias.
#[derive(Parser, Debug)]
#[command(name = "cultevo")]
#[command(author, version, about = "Simulates cultural transmission under copying bias", long_about = None)]
struct Cli {
    /// Number of threads to use for parallel processing
    ///
    /// If not specified, defaults to the number of logical CPUs.
    #[arg(short = 't', long, global = true)]
    threads: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    ///
    /// RUST_LOG takes precedence when set.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a single transmission simulation.
    ///
    /// Reports observed diversity over the statistics window, the neutral
    /// expectation and, with --top, the turnover exponent.
    Run {
        #[command(flatten)]
        model: ModelArgs,

        /// Include the per-generation variant frequencies in the output
        #[arg(long)]
        raw: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "pretty")]
        format: OutputFormat,

        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,
    },

    /// Run a population whose members each draw their own bias.
    ///
    /// No warm-up: diversity is reported for every generation.
    Hetero {
        /// Population size N
        #[arg(short = 'n', long, default_value_t = defaults::POPULATION_SIZE)]
        population_size: usize,

        /// Mean of the per-birth bias distribution
        #[arg(long, allow_negative_numbers = true, default_value_t = defaults::BIAS_MEAN)]
        bias_mean: f64,

        /// Standard deviation of the per-birth bias distribution
        #[arg(long, allow_negative_numbers = true, default_value_t = defaults::BIAS_SD)]
        bias_sd: f64,

        /// Per-birth innovation rate mu
        #[arg(short = 'm', long, default_value_t = defaults::INNOVATION_RATE)]
        innovation_rate: f64,

        /// Number of generations
        #[arg(short = 'T', long, default_value_t = defaults::TIMESTEPS)]
        timesteps: usize,

        /// Run this many independent repetitions and summarize them
        #[arg(short, long)]
        repetitions: Option<usize>,

        /// Random seed (base seed of the repetition streams with --repetitions)
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "pretty")]
        format: OutputFormat,
    },

    /// Run many independent repetitions in parallel and summarize them.
    ///
    /// --seed sets the base seed; repetition i always uses stream i.
    Batch {
        #[command(flatten)]
        model: ModelArgs,

        /// Number of repetitions
        #[arg(short, long, default_value_t = defaults::REPETITIONS)]
        repetitions: usize,

        /// Also estimate the turnover exponent on trailing windows of these
        /// lengths (requires --top)
        #[arg(long, value_delimiter = ',', requires = "top")]
        windows: Vec<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "pretty")]
        format: OutputFormat,

        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,
    },

    /// Measure how diversity responds to a short bias pulse.
    ///
    /// Runs a control and a pulsed run from the same seed and reports their
    /// per-generation difference from the onset.
    Pulse {
        #[command(flatten)]
        model: ModelArgs,

        /// Bias outside the pulse
        #[arg(long, allow_negative_numbers = true, default_value_t = defaults::BIAS_MEAN)]
        baseline: f64,

        /// Bias during the pulse
        #[arg(long, allow_negative_numbers = true, default_value_t = defaults::PULSE_BIAS)]
        pulse: f64,

        /// First pulsed generation (default: middle of the statistics window)
        #[arg(long)]
        onset: Option<usize>,

        /// Pulse length in generations
        #[arg(long, default_value_t = defaults::PULSE_DURATION)]
        duration: usize,

        /// Trailing generations averaged for the recovery gap
        #[arg(long, default_value_t = defaults::RECOVERY_WINDOW)]
        recovery_window: usize,

        /// Output format
        #[arg(short, long, value_enum, default_value = "pretty")]
        format: OutputFormat,
    },

    /// Simulate forward from posterior samples of the bias.
    ///
    /// Runs one simulation per draw of a posterior column, or per joint draw
    /// of the phased model with --phase-lengths.
    Predictive {
        /// JSON file with `equilibrium`, `variable_population` and `phases`
        #[arg(short, long)]
        posterior: PathBuf,

        /// Posterior column to draw from (equilibrium, variable_population, phase_1 .. phase_7)
        #[arg(long, default_value = "equilibrium", conflicts_with = "phase_lengths")]
        column: String,

        /// Generations per phase, e.g. "300,300,300,300,300,300,200"
        #[arg(long, value_delimiter = ',')]
        phase_lengths: Vec<usize>,

        #[command(flatten)]
        model: ModelArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "pretty")]
        format: OutputFormat,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
        info!(threads, "configured global thread pool");
    }

    match cli.command {
        Commands::Run {
            model,
            raw,
            format,
            no_progress,
        } => {
            run::run_transmission(&model, raw, format, !no_progress)?;
        }
        Commands::Hetero {
            population_size,
            bias_mean,
            bias_sd,
            innovation_rate,
            timesteps,
            repetitions,
            seed,
            format,
        } => {
            let mut config = HeteroConfig::new(
                population_size,
                bias_mean,
                bias_sd,
                innovation_rate,
                timesteps,
            );
            config.seed = seed;
            hetero::run_hetero(&config, repetitions, format)?;
        }
        Commands::Batch {
            model,
            repetitions,
            windows,
            format,
            no_progress,
        } => {
            batch::run_batch(&model, repetitions, &windows, format, !no_progress)?;
        }
        Commands::Pulse {
            model,
            baseline,
            pulse,
            onset,
            duration,
            recovery_window,
            format,
        } => {
            pulse::run_pulse(
                &model,
                baseline,
                pulse,
                onset,
                duration,
                recovery_window,
                format,
            )?;
        }
        Commands::Predictive {
            posterior,
            column,
            phase_lengths,
            model,
            format,
        } => {
            predictive::run_predictive(&posterior, &column, &phase_lengths, &model, format)?;
        }
    }

    Ok(())
}

//! camsampler CLI
//!
//! Runs a JSON job through the external sampler and prints the updated
//! geometry as JSON on stdout.

use anyhow::Result;
use camsampler::job::{run_job, Job, JobCommand};
use camsampler::{init_logging, Sampler, SamplerConfig, BUILD_DATE, VERSION};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "camsampler")]
#[command(about = "Drop-cutter and waterline sampling through an external sampler", long_about = None)]
struct Cli {
    /// Sampler configuration file (.json or .toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON result
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample a height for every point in the job
    SamplePoints {
        /// Job file
        job: PathBuf,
    },
    /// Sample chunk points inside the ambient region
    SampleChunks {
        /// Job file
        job: PathBuf,
    },
    /// Resample the job's requested ranges, keeping the higher height
    Resample {
        /// Job file
        job: PathBuf,
    },
    /// Slice the job's models into waterline loops
    Waterline {
        /// Job file
        job: PathBuf,
    },
    /// Write the default configuration to a file
    InitConfig {
        /// Output file (.json or .toml)
        output: PathBuf,
    },
    /// Print version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    let (command, job_path) = match cli.command {
        Commands::SamplePoints { job } => (JobCommand::SamplePoints, job),
        Commands::SampleChunks { job } => (JobCommand::SampleChunks, job),
        Commands::Resample { job } => (JobCommand::Resample, job),
        Commands::Waterline { job } => (JobCommand::Waterline, job),
        Commands::InitConfig { output } => {
            SamplerConfig::default().save_to_file(&output)?;
            println!("Wrote default configuration to {}", output.display());
            return Ok(());
        }
        Commands::Version => {
            println!("camsampler {} (built {})", VERSION, BUILD_DATE);
            return Ok(());
        }
    };

    let config = load_config(cli.config.as_ref())?;
    let job = Job::load_from_file(&job_path)?;
    let sampler = Sampler::from_config(&config);

    info!("Running {:?} on {}", command, job_path.display());
    let output = run_job(&sampler, command, job)?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", json);

    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<SamplerConfig> {
    let config = match path {
        Some(path) => SamplerConfig::load_from_file(path)?,
        None => SamplerConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

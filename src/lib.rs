//! # camsampler
//!
//! Bridge between CAM toolpath chunks and an external drop-cutter /
//! waterline sampler.
//!
//! ## Architecture
//!
//! camsampler is organized as a workspace with multiple crates:
//!
//! 1. **camsampler-core** - Points, path chunks, ambient region, operation model, unit scaling
//! 2. **camsampler-sampling** - Exchange files, layer planning, waterline parsing, sampler driver
//! 3. **camsampler-settings** - Sampler configuration
//! 4. **camsampler** - This crate: job files, logging and the command line binary

pub mod job;

pub use camsampler_core::{
    AmbientRegion, CutterType, Operation, PathChunk, Point, Polygon, Triangle, TriangleMesh,
};
pub use camsampler_sampling::{
    ExchangeDir, ModelExporter, NoExport, ResampleRequest, Sampler, SamplerProcess,
    SamplerScript, SamplingError, ScriptRunner, StlExporter,
};
pub use camsampler_settings::{ExchangeMode, ExitStatusPolicy, SamplerConfig};
pub use job::{Job, JobCommand, JobOutput};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - stderr output with pretty formatting, keeping stdout for job results
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

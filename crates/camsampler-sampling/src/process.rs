//! Sampler process invocation.
//!
//! The sampler scripts take no arguments; they find their input through the
//! temp directory. The child's temp directory variables point at the
//! exchange directory so scoped invocations see their own files.

use camsampler_settings::{ExitStatusPolicy, SamplerConfig};
use std::fmt;
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, warn};

use crate::error::{SamplingError, SamplingResult};
use crate::exchange_dir::ExchangeDir;

/// Which sampler program to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerScript {
    /// Drop-cutter height sampling
    Sample,
    /// Waterline slicing
    Waterline,
}

impl fmt::Display for SamplerScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sample => write!(f, "sample"),
            Self::Waterline => write!(f, "waterline"),
        }
    }
}

/// Runs the external sampler to completion.
///
/// Implementations read the request files from `dir` and must have written
/// the result files there when they return `Ok`.
pub trait SamplerProcess {
    fn run(&self, script: SamplerScript, dir: &ExchangeDir) -> SamplingResult<()>;
}

/// Launches the sampler scripts with the configured interpreter
#[derive(Debug, Clone)]
pub struct ScriptRunner {
    program: PathBuf,
    sample_script: PathBuf,
    waterline_script: PathBuf,
    exit_status: ExitStatusPolicy,
}

impl ScriptRunner {
    pub fn new(config: &SamplerConfig) -> Self {
        Self {
            program: PathBuf::from(&config.python_bin),
            sample_script: config.sample_script_path(),
            waterline_script: config.waterline_script_path(),
            exit_status: config.exit_status,
        }
    }

    fn script_path(&self, script: SamplerScript) -> &PathBuf {
        match script {
            SamplerScript::Sample => &self.sample_script,
            SamplerScript::Waterline => &self.waterline_script,
        }
    }

    fn command(&self, script: SamplerScript, dir: &ExchangeDir) -> Command {
        let mut command = Command::new(&self.program);
        command.arg(self.script_path(script));
        for var in ["TMPDIR", "TEMP", "TMP"] {
            command.env(var, dir.path());
        }
        command
    }
}

impl SamplerProcess for ScriptRunner {
    fn run(&self, script: SamplerScript, dir: &ExchangeDir) -> SamplingResult<()> {
        debug!(
            "Running {:?} {:?} in {:?}",
            self.program,
            self.script_path(script),
            dir.path()
        );

        let status = self
            .command(script, dir)
            .status()
            .map_err(|source| SamplingError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if status.success() {
            return Ok(());
        }

        match self.exit_status {
            ExitStatusPolicy::Abort => Err(SamplingError::ProcessFailed {
                script: script.to_string(),
                status,
            }),
            ExitStatusPolicy::Ignore => {
                warn!(
                    "Sampler script {} failed ({}), reading results anyway",
                    script, status
                );
                Ok(())
            }
        }
    }
}

//! Exchange directory
//!
//! Resolves the well-known file names the sampler scripts read and write.
//! The directory is either the shared system temp dir or a fresh uniquely
//! named directory for one invocation.

use camsampler_settings::ExchangeMode;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

use crate::error::{SamplingError, SamplingResult};

const SETTINGS_FILE: &str = "ocl_settings.txt";
const REQUEST_FILE: &str = "ocl_chunks.txt";
const SAMPLES_FILE: &str = "ocl_chunk_samples.txt";
const HEIGHTS_FILE: &str = "ocl_wl_heights.txt";

/// Directory holding one invocation's exchange files
#[derive(Debug)]
pub struct ExchangeDir {
    path: PathBuf,
    scoped: Option<TempDir>,
}

impl ExchangeDir {
    /// Opens the directory for the given mode.
    pub fn open(mode: ExchangeMode) -> SamplingResult<Self> {
        match mode {
            ExchangeMode::Shared => Ok(Self::shared()),
            ExchangeMode::Scoped => Self::scoped(),
        }
    }

    /// The system temp directory, with fixed file names.
    pub fn shared() -> Self {
        Self::at(std::env::temp_dir())
    }

    /// A new uniquely named directory, removed on drop.
    pub fn scoped() -> SamplingResult<Self> {
        let temp = tempfile::Builder::new()
            .prefix("camsampler-")
            .tempdir()
            .map_err(|e| SamplingError::io(&std::env::temp_dir(), e))?;
        debug!("Opened scoped exchange dir {:?}", temp.path());
        Ok(Self {
            path: temp.path().to_path_buf(),
            scoped: Some(temp),
        })
    }

    /// An existing directory chosen by the caller.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            scoped: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_scoped(&self) -> bool {
        self.scoped.is_some()
    }

    /// Keeps a scoped directory on disk after this value is dropped.
    pub fn persist(&mut self) -> &Path {
        if let Some(temp) = self.scoped.take() {
            self.path = temp.keep();
        }
        &self.path
    }

    /// Cutter type, diameter and minimum height
    pub fn settings_file(&self) -> PathBuf {
        self.path.join(SETTINGS_FILE)
    }

    /// Points to sample, one `x y` per line
    pub fn request_file(&self) -> PathBuf {
        self.path.join(REQUEST_FILE)
    }

    /// Sampled heights, one scaled value per line
    pub fn samples_file(&self) -> PathBuf {
        self.path.join(SAMPLES_FILE)
    }

    /// Waterline slice heights, one scaled value per line
    pub fn heights_file(&self) -> PathBuf {
        self.path.join(HEIGHTS_FILE)
    }

    /// Loops found on waterline layer `layer`
    pub fn waterline_file(&self, layer: usize) -> PathBuf {
        self.path.join(format!("oclWaterline{}.txt", layer))
    }

    /// Collision model number `index`
    pub fn model_file(&self, index: usize) -> PathBuf {
        self.path.join(format!("model{}.stl", index))
    }
}

//! Sampling driver.
//!
//! Each entry point writes the settings and request files, exports the
//! collision models where needed, runs the sampler to completion and reads
//! the results back into the caller's points. Calls are synchronous and
//! blocking. With [`ExchangeMode::Shared`] callers must not overlap calls.

use camsampler_core::{Operation, PathChunk, Point};
use camsampler_settings::{ExchangeMode, SamplerConfig};
use tracing::{debug, info};

use crate::error::SamplingResult;
use crate::exchange::{self, ResampleRequest};
use crate::exchange_dir::ExchangeDir;
use crate::layers::compute_layer_heights;
use crate::model_export::{ModelExporter, StlExporter};
use crate::process::{SamplerProcess, SamplerScript, ScriptRunner};
use crate::waterline::parse_waterline_layers;

/// Front end to the external sampler
#[derive(Debug, Clone)]
pub struct Sampler<P = ScriptRunner, E = StlExporter> {
    exchange_mode: ExchangeMode,
    keep_exchange_files: bool,
    process: P,
    exporter: E,
}

impl Sampler {
    /// Sampler that launches the configured scripts and exports STL models.
    pub fn from_config(config: &SamplerConfig) -> Self {
        Self::with_parts(config, ScriptRunner::new(config), StlExporter)
    }
}

impl<P: SamplerProcess, E: ModelExporter> Sampler<P, E> {
    pub fn with_parts(config: &SamplerConfig, process: P, exporter: E) -> Self {
        Self {
            exchange_mode: config.exchange_mode,
            keep_exchange_files: config.keep_exchange_files,
            process,
            exporter,
        }
    }

    pub fn process(&self) -> &P {
        &self.process
    }

    /// Samples a height for every point of a flat point list.
    pub fn sample_points(&self, operation: &Operation, points: &mut [Point]) -> SamplingResult<()> {
        info!("Sampling {} points", points.len());
        operation.validate_cutter()?;
        let mut dir = ExchangeDir::open(self.exchange_mode)?;

        exchange::write_settings(&dir, operation)?;
        exchange::write_points(&dir, points)?;
        self.export_models(operation, &dir)?;
        self.process.run(SamplerScript::Sample, &dir)?;
        exchange::read_point_samples(&dir, points)?;

        self.finish(&mut dir);
        Ok(())
    }

    /// Samples heights for chunk points inside the ambient region.
    ///
    /// Points outside the region are not sampled and end up at
    /// [`camsampler_core::SKIPPED_SAMPLE_Z`].
    pub fn sample_chunks(
        &self,
        operation: &Operation,
        chunks: &mut [PathChunk],
    ) -> SamplingResult<()> {
        info!("Sampling {} chunks", chunks.len());
        operation.validate_cutter()?;
        let mut dir = ExchangeDir::open(self.exchange_mode)?;

        exchange::write_settings(&dir, operation)?;
        let requested = exchange::write_chunk_points(&dir, operation, chunks)?;
        debug!("{} points inside the ambient region", requested);
        self.export_models(operation, &dir)?;
        self.process.run(SamplerScript::Sample, &dir)?;
        exchange::read_chunk_point_samples(&dir, chunks)?;

        self.finish(&mut dir);
        Ok(())
    }

    /// Samples the requested ranges again, keeping the higher height.
    ///
    /// In shared mode the collision models left by the previous sampling
    /// call are reused. A scoped directory starts empty, so the models are
    /// exported again.
    pub fn resample_chunks(
        &self,
        operation: &Operation,
        chunks: &mut [PathChunk],
        requests: &[ResampleRequest],
    ) -> SamplingResult<()> {
        info!("Resampling {} ranges", requests.len());
        operation.validate_cutter()?;
        exchange::validate_requests(chunks, requests)?;
        let mut dir = ExchangeDir::open(self.exchange_mode)?;

        exchange::write_settings(&dir, operation)?;
        exchange::write_resample_requests(&dir, chunks, requests)?;
        if dir.is_scoped() {
            self.export_models(operation, &dir)?;
        }
        self.process.run(SamplerScript::Sample, &dir)?;
        exchange::read_resample_results(&dir, chunks, requests)?;

        self.finish(&mut dir);
        Ok(())
    }

    /// Slices the models at every layer height and appends the loops to
    /// `chunks`, followed by one empty terminator chunk.
    pub fn waterline(&self, operation: &Operation, chunks: &mut Vec<PathChunk>) -> SamplingResult<()> {
        operation.validate()?;
        let heights = compute_layer_heights(operation);
        info!("Waterline over {} layers", heights.len());
        let mut dir = ExchangeDir::open(self.exchange_mode)?;

        exchange::write_layer_heights(&dir, &heights)?;
        exchange::write_settings(&dir, operation)?;
        self.export_models(operation, &dir)?;
        self.process.run(SamplerScript::Waterline, &dir)?;
        parse_waterline_layers(&dir, &heights, chunks)?;

        self.finish(&mut dir);
        Ok(())
    }

    fn export_models(&self, operation: &Operation, dir: &ExchangeDir) -> SamplingResult<()> {
        let exported = self.exporter.export_models(operation, dir)?;
        debug!("Exported {} collision models", exported);
        Ok(())
    }

    fn finish(&self, dir: &mut ExchangeDir) {
        if self.keep_exchange_files && dir.is_scoped() {
            let kept = dir.persist();
            info!("Kept exchange files in {:?}", kept);
        }
    }
}

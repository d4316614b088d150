//! Job files for the command line front end.
//!
//! A job is a JSON document holding an operation and the geometry to run
//! it on. Running a job fills in the heights and returns the updated
//! geometry as a [`JobOutput`].

use anyhow::Context;
use camsampler_core::{Operation, PathChunk, Point};
use camsampler_sampling::{ModelExporter, ResampleRequest, Sampler, SamplerProcess};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Operation plus the geometry it applies to
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Job {
    pub operation: Operation,
    #[serde(default)]
    pub points: Vec<Point>,
    #[serde(default)]
    pub chunks: Vec<PathChunk>,
    #[serde(default)]
    pub requests: Vec<ResampleRequest>,
}

impl Job {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading job file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("parsing job file {}", path.display()))
    }
}

/// What to do with a job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobCommand {
    SamplePoints,
    SampleChunks,
    Resample,
    Waterline,
}

/// Result of a job, written as JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobOutput {
    Points { points: Vec<Point> },
    Chunks { chunks: Vec<PathChunk> },
}

impl JobOutput {
    pub fn points(&self) -> &[Point] {
        match self {
            Self::Points { points } => points,
            Self::Chunks { .. } => &[],
        }
    }

    pub fn chunks(&self) -> &[PathChunk] {
        match self {
            Self::Chunks { chunks } => chunks,
            Self::Points { .. } => &[],
        }
    }
}

/// Runs `command` on `job` and returns the updated geometry.
///
/// Waterline replaces the job's chunks with the sliced loops.
pub fn run_job<P, E>(
    sampler: &Sampler<P, E>,
    command: JobCommand,
    job: Job,
) -> anyhow::Result<JobOutput>
where
    P: SamplerProcess,
    E: ModelExporter,
{
    let Job {
        operation,
        mut points,
        mut chunks,
        requests,
    } = job;

    match command {
        JobCommand::SamplePoints => {
            sampler
                .sample_points(&operation, &mut points)
                .context("sampling points")?;
            Ok(JobOutput::Points { points })
        }
        JobCommand::SampleChunks => {
            sampler
                .sample_chunks(&operation, &mut chunks)
                .context("sampling chunks")?;
            Ok(JobOutput::Chunks { chunks })
        }
        JobCommand::Resample => {
            sampler
                .resample_chunks(&operation, &mut chunks, &requests)
                .context("resampling chunks")?;
            Ok(JobOutput::Chunks { chunks })
        }
        JobCommand::Waterline => {
            let mut loops = Vec::new();
            sampler
                .waterline(&operation, &mut loops)
                .context("computing waterline")?;
            Ok(JobOutput::Chunks { chunks: loops })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_defaults_geometry() {
        let job: Job = serde_json::from_str(
            r#"{"operation": {"cutter_type": "END", "cutter_diameter": 2.0,
                "minz": -1.0, "maxz": 0.0, "stepdown": 0.5}}"#,
        )
        .unwrap();
        assert!(job.points.is_empty());
        assert!(job.chunks.is_empty());
        assert!(job.requests.is_empty());
        assert_eq!(job.operation.cutter_diameter, 2.0);
    }

    #[test]
    fn test_output_serializes_without_tag() {
        let output = JobOutput::Points {
            points: vec![Point::with_z(1.0, 2.0, 3.0)],
        };
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["points"][0]["z"], 3.0);
        assert!(output.chunks().is_empty());
    }
}

// Job runner tests with a stand-in sampler process

use camsampler::job::{run_job, Job, JobCommand};
use camsampler::{ExchangeDir, NoExport, Sampler, SamplerConfig, SamplerProcess, SamplerScript};
use camsampler_sampling::SamplingResult;
use std::io::Write;

/// Answers every request with a flat surface at z = -1
struct FlatSampler;

impl SamplerProcess for FlatSampler {
    fn run(&self, script: SamplerScript, dir: &ExchangeDir) -> SamplingResult<()> {
        match script {
            SamplerScript::Sample => {
                let requests = std::fs::read_to_string(dir.request_file()).unwrap();
                let out = "-1000\n".repeat(requests.lines().count());
                std::fs::write(dir.samples_file(), out).unwrap();
            }
            SamplerScript::Waterline => {
                let heights = std::fs::read_to_string(dir.heights_file()).unwrap();
                for (i, z) in heights.lines().enumerate() {
                    let text = format!("l\n0 0 {z}\n1000 0 {z}\n1000 1000 {z}\n");
                    std::fs::write(dir.waterline_file(i), text).unwrap();
                }
            }
        }
        Ok(())
    }
}

fn sampler() -> Sampler<FlatSampler, NoExport> {
    Sampler::with_parts(&SamplerConfig::default(), FlatSampler, NoExport)
}

const JOB: &str = r#"{
    "operation": {
        "cutter_type": "BALLNOSE",
        "cutter_diameter": 2.0,
        "minz": -2.0,
        "maxz": 0.0,
        "stepdown": 1.0
    },
    "points": [{"x": 0.0, "y": 0.0}, {"x": 1.0, "y": 1.0}],
    "chunks": [
        {"points": [{"x": 0.0, "y": 0.0, "z": -5.0}, {"x": 1.0, "y": 0.0, "z": 0.5}], "closed": false}
    ],
    "requests": [{"chunk": 0, "start": 0, "length": 2}]
}"#;

fn job() -> Job {
    serde_json::from_str(JOB).unwrap()
}

#[test]
fn test_sample_points_job() {
    let output = run_job(&sampler(), JobCommand::SamplePoints, job()).unwrap();
    let zs: Vec<_> = output.points().iter().map(|p| p.z).collect();
    assert_eq!(zs, vec![Some(-1.0), Some(-1.0)]);
}

#[test]
fn test_sample_chunks_job() {
    let output = run_job(&sampler(), JobCommand::SampleChunks, job()).unwrap();
    assert_eq!(output.chunks().len(), 1);
    assert!(output.chunks()[0].points.iter().all(|p| p.z == Some(-1.0)));
}

#[test]
fn test_resample_job_keeps_higher() {
    let output = run_job(&sampler(), JobCommand::Resample, job()).unwrap();
    let zs: Vec<_> = output.chunks()[0].points.iter().map(|p| p.z).collect();
    assert_eq!(zs, vec![Some(-1.0), Some(0.5)]);
}

#[test]
fn test_waterline_job_replaces_chunks() {
    let output = run_job(&sampler(), JobCommand::Waterline, job()).unwrap();
    let chunks = output.chunks();
    // Layers -1 and -2, then the terminator
    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0].depth, Some(-1.0));
    assert_eq!(chunks[1].depth, Some(-2.0));
    assert!(chunks[2].is_empty());
}

#[test]
fn test_invalid_operation_fails_job() {
    let mut job = job();
    job.operation.stepdown = 0.0;
    assert!(run_job(&sampler(), JobCommand::Waterline, job).is_err());
}

#[test]
fn test_load_job_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(JOB.as_bytes()).unwrap();

    let job = Job::load_from_file(file.path()).unwrap();
    assert_eq!(job.points.len(), 2);
    assert_eq!(job.requests.len(), 1);
}

#[test]
fn test_load_job_reports_bad_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{ not json").unwrap();

    let err = Job::load_from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("parsing job file"));
}

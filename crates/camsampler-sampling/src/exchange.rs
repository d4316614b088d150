//! Plain text exchange protocol
//!
//! Requests go out as one `x y` line per point, in model units. Results come
//! back as one height per line, scaled by [`SAMPLER_SCALE`]. Results carry no
//! key: the n-th result line belongs to the n-th request line, so every
//! reader here walks the points in exactly the order its writer did.
//!
//! [`SAMPLER_SCALE`]: camsampler_core::SAMPLER_SCALE

use camsampler_core::{
    to_external, to_internal, Operation, PathChunk, Point, OUTSIDE_AMBIENT_Z, SKIPPED_SAMPLE_Z,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Lines, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{SamplingError, SamplingResult};
use crate::exchange_dir::ExchangeDir;

/// A contiguous range of points in `chunks[chunk]` to sample again.
///
/// New heights are merged with `max`, so a resample can only raise a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResampleRequest {
    pub chunk: usize,
    pub start: usize,
    pub length: usize,
}

impl ResampleRequest {
    pub fn new(chunk: usize, start: usize, length: usize) -> Self {
        Self {
            chunk,
            start,
            length,
        }
    }

    /// Point indices covered by the request, or `None` on overflow.
    fn range(&self) -> Option<std::ops::Range<usize>> {
        self.start
            .checked_add(self.length)
            .map(|end| self.start..end)
    }
}

/// Line-oriented writer that tags I/O errors with the file path.
struct ExchangeWriter {
    path: PathBuf,
    inner: BufWriter<File>,
    lines: usize,
}

impl ExchangeWriter {
    fn create(path: PathBuf) -> SamplingResult<Self> {
        let file = File::create(&path).map_err(|e| SamplingError::io(&path, e))?;
        Ok(Self {
            path,
            inner: BufWriter::new(file),
            lines: 0,
        })
    }

    fn line(&mut self, args: fmt::Arguments<'_>) -> SamplingResult<()> {
        writeln!(self.inner, "{}", args).map_err(|e| SamplingError::io(&self.path, e))?;
        self.lines += 1;
        Ok(())
    }

    fn point(&mut self, point: &Point) -> SamplingResult<()> {
        self.line(format_args!("{} {}", point.x, point.y))
    }

    fn finish(mut self) -> SamplingResult<usize> {
        self.inner
            .flush()
            .map_err(|e| SamplingError::io(&self.path, e))?;
        debug!("Wrote {} lines to {:?}", self.lines, self.path);
        Ok(self.lines)
    }
}

/// Reads one scaled height per line.
struct SampleReader {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
    expected: usize,
    consumed: usize,
}

impl SampleReader {
    fn open(path: PathBuf, expected: usize) -> SamplingResult<Self> {
        let file = File::open(&path).map_err(|e| SamplingError::io(&path, e))?;
        Ok(Self {
            path,
            lines: BufReader::new(file).lines(),
            expected,
            consumed: 0,
        })
    }

    /// Next height, already converted to model units.
    fn next_height(&mut self) -> SamplingResult<f64> {
        let line = match self.lines.next() {
            Some(line) => line.map_err(|e| SamplingError::io(&self.path, e))?,
            None => {
                return Err(SamplingError::MissingSample {
                    path: self.path.clone(),
                    expected: self.expected,
                    found: self.consumed,
                })
            }
        };
        self.consumed += 1;
        let value = parse_value(&line, &self.path, self.consumed)?;
        Ok(to_internal(value))
    }
}

pub(crate) fn parse_value(token: &str, path: &Path, line: usize) -> SamplingResult<f64> {
    token
        .trim()
        .parse::<f64>()
        .map_err(|e| SamplingError::parse(path, line, format!("'{}': {}", token.trim(), e)))
}

/// Writes cutter type, cutter diameter and minimum height, one per line.
pub fn write_settings(dir: &ExchangeDir, operation: &Operation) -> SamplingResult<()> {
    let mut out = ExchangeWriter::create(dir.settings_file())?;
    out.line(format_args!("{}", operation.cutter_type))?;
    out.line(format_args!("{}", operation.cutter_diameter))?;
    out.line(format_args!("{}", operation.minz))?;
    out.finish()?;
    Ok(())
}

/// Writes every point as a request line, in order.
pub fn write_points(dir: &ExchangeDir, points: &[Point]) -> SamplingResult<usize> {
    let mut out = ExchangeWriter::create(dir.request_file())?;
    for point in points {
        out.point(point)?;
    }
    out.finish()
}

/// Assigns one sampled height to every point, in order.
pub fn read_point_samples(dir: &ExchangeDir, points: &mut [Point]) -> SamplingResult<()> {
    let mut samples = SampleReader::open(dir.samples_file(), points.len())?;
    for point in points.iter_mut() {
        point.set_z(samples.next_height()?);
    }
    Ok(())
}

/// Writes the chunk points that lie inside the ambient region.
///
/// Points outside it are not written; their height is set to
/// [`OUTSIDE_AMBIENT_Z`] in place so the reader knows to skip them.
/// Returns the number of request lines written.
pub fn write_chunk_points(
    dir: &ExchangeDir,
    operation: &Operation,
    chunks: &mut [PathChunk],
) -> SamplingResult<usize> {
    let mut out = ExchangeWriter::create(dir.request_file())?;
    let mut skipped = 0usize;
    for chunk in chunks.iter_mut() {
        for point in chunk.points.iter_mut() {
            if operation.ambient.contains(point.x, point.y) {
                out.point(point)?;
            } else {
                point.set_z(OUTSIDE_AMBIENT_Z);
                skipped += 1;
            }
        }
    }
    if skipped > 0 {
        debug!("{} points outside the ambient region", skipped);
    }
    out.finish()
}

/// Reads sampled heights back into chunk points.
///
/// Points flagged with [`OUTSIDE_AMBIENT_Z`] consume no result line and get
/// [`SKIPPED_SAMPLE_Z`]; every other point takes the next result.
///
/// The flag is the height itself, so a point inside the region that already
/// sits at exactly [`OUTSIDE_AMBIENT_Z`] when written is also skipped here,
/// and every later point in the pass reads the result meant for its
/// predecessor. Clear such heights before calling [`write_chunk_points`].
pub fn read_chunk_point_samples(dir: &ExchangeDir, chunks: &mut [PathChunk]) -> SamplingResult<()> {
    let expected = chunks
        .iter()
        .flat_map(|c| c.points.iter())
        .filter(|p| !p.is_outside_ambient())
        .count();
    let mut samples = SampleReader::open(dir.samples_file(), expected)?;

    for chunk in chunks.iter_mut() {
        for point in chunk.points.iter_mut() {
            if point.is_outside_ambient() {
                point.set_z(SKIPPED_SAMPLE_Z);
            } else {
                point.set_z(samples.next_height()?);
            }
        }
    }
    Ok(())
}

/// Checks every request against the chunks before any file is touched.
pub fn validate_requests(chunks: &[PathChunk], requests: &[ResampleRequest]) -> SamplingResult<()> {
    for (index, request) in requests.iter().enumerate() {
        let chunk = chunks
            .get(request.chunk)
            .ok_or_else(|| SamplingError::InvalidRequest {
                index,
                reason: format!(
                    "chunk {} does not exist ({} chunks)",
                    request.chunk,
                    chunks.len()
                ),
            })?;
        match request.range() {
            Some(range) if range.end <= chunk.len() => {}
            _ => {
                return Err(SamplingError::InvalidRequest {
                    index,
                    reason: format!(
                        "points {}+{} exceed chunk length {}",
                        request.start,
                        request.length,
                        chunk.len()
                    ),
                })
            }
        }
    }
    Ok(())
}

fn requested_points(requests: &[ResampleRequest]) -> usize {
    requests.iter().map(|r| r.length).sum()
}

/// Writes the points of every requested range, request by request.
pub fn write_resample_requests(
    dir: &ExchangeDir,
    chunks: &[PathChunk],
    requests: &[ResampleRequest],
) -> SamplingResult<usize> {
    validate_requests(chunks, requests)?;
    let mut out = ExchangeWriter::create(dir.request_file())?;
    for request in requests {
        let chunk = &chunks[request.chunk];
        for point in &chunk.points[request.start..request.start + request.length] {
            out.point(point)?;
        }
    }
    out.finish()
}

/// Reads resampled heights in request order, keeping the higher of the
/// existing and the new height.
pub fn read_resample_results(
    dir: &ExchangeDir,
    chunks: &mut [PathChunk],
    requests: &[ResampleRequest],
) -> SamplingResult<()> {
    validate_requests(chunks, requests)?;
    let mut samples = SampleReader::open(dir.samples_file(), requested_points(requests))?;
    for request in requests {
        let chunk = &mut chunks[request.chunk];
        for point in &mut chunk.points[request.start..request.start + request.length] {
            point.raise_to(samples.next_height()?);
        }
    }
    Ok(())
}

/// Writes waterline slice heights, scaled, one per line.
pub fn write_layer_heights(dir: &ExchangeDir, heights: &[f64]) -> SamplingResult<usize> {
    let mut out = ExchangeWriter::create(dir.heights_file())?;
    for height in heights {
        out.line(format_args!("{}", to_external(*height)))?;
    }
    out.finish()
}

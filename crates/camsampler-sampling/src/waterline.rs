//! Waterline chunk reconstruction.
//!
//! The sampler writes one result file per layer. A line starting with
//! [`LOOP_MARKER`] opens a new loop; every other line holds one scaled
//! `x y z` point of the current loop.

use camsampler_core::{to_internal, Operation, PathChunk, Point};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

use crate::error::{SamplingError, SamplingResult};
use crate::exchange::parse_value;
use crate::exchange_dir::ExchangeDir;
use crate::layers::compute_layer_heights;

/// First character of a loop boundary line
pub const LOOP_MARKER: char = 'l';

/// Parses every layer file for `operation` and appends the loops to `chunks`,
/// followed by one empty terminator chunk.
pub fn parse_waterline_output(
    dir: &ExchangeDir,
    operation: &Operation,
    chunks: &mut Vec<PathChunk>,
) -> SamplingResult<()> {
    let heights = compute_layer_heights(operation);
    parse_waterline_layers(dir, &heights, chunks)
}

/// Same as [`parse_waterline_output`] with precomputed layer heights.
pub fn parse_waterline_layers(
    dir: &ExchangeDir,
    heights: &[f64],
    chunks: &mut Vec<PathChunk>,
) -> SamplingResult<()> {
    for (layer, depth) in heights.iter().enumerate() {
        let path = dir.waterline_file(layer);
        let file = File::open(&path).map_err(|e| SamplingError::io(&path, e))?;
        let before = chunks.len();
        parse_waterline_layer(BufReader::new(file), &path, *depth, chunks)?;
        debug!(
            "Layer {} at {}: {} loops",
            layer,
            depth,
            chunks.len() - before
        );
    }
    chunks.push(PathChunk::new());
    Ok(())
}

/// Parses one layer stream, appending loops to `chunks`.
///
/// `path` is only used for error reporting. Point lines before the first
/// marker extend the last chunk already in `chunks`.
pub fn parse_waterline_layer<R: BufRead>(
    reader: R,
    path: &Path,
    depth: f64,
    chunks: &mut Vec<PathChunk>,
) -> SamplingResult<()> {
    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|e| SamplingError::io(path, e))?;

        if line.starts_with(LOOP_MARKER) {
            chunks.push(PathChunk {
                closed: true,
                depth: Some(depth),
                ..PathChunk::default()
            });
            continue;
        }

        let point = parse_point(&line, path, line_no)?;
        match chunks.last_mut() {
            Some(chunk) => chunk.push(point),
            None => {
                return Err(SamplingError::parse(
                    path,
                    line_no,
                    "point before the first loop marker",
                ))
            }
        }
    }
    Ok(())
}

fn parse_point(line: &str, path: &Path, line_no: usize) -> SamplingResult<Point> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 3 {
        return Err(SamplingError::parse(
            path,
            line_no,
            format!("expected 3 coordinates, found {}", tokens.len()),
        ));
    }
    let x = to_internal(parse_value(tokens[0], path, line_no)?);
    let y = to_internal(parse_value(tokens[1], path, line_no)?);
    let z = to_internal(parse_value(tokens[2], path, line_no)?);
    Ok(Point::with_z(x, y, z))
}

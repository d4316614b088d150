//! Collision model export.
//!
//! The sampler loads `model{N}.stl` files from the exchange directory, in
//! sampler units. Hosts that write those files themselves use [`NoExport`].

use camsampler_core::{to_external, Operation, TriangleMesh};
use std::fs::File;
use std::io::{BufWriter, Write};
use tracing::debug;

use crate::error::{SamplingError, SamplingResult};
use crate::exchange_dir::ExchangeDir;

/// Writes the operation's source geometry where the sampler expects it.
pub trait ModelExporter {
    /// Returns the number of model files written.
    fn export_models(&self, operation: &Operation, dir: &ExchangeDir) -> SamplingResult<usize>;
}

/// Leaves model export to the caller
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExport;

impl ModelExporter for NoExport {
    fn export_models(&self, _operation: &Operation, _dir: &ExchangeDir) -> SamplingResult<usize> {
        Ok(0)
    }
}

/// Binary STL export of the operation's triangle meshes, scaled for the sampler
#[derive(Debug, Clone, Copy, Default)]
pub struct StlExporter;

impl StlExporter {
    fn to_stl(mesh: &TriangleMesh) -> Vec<stl_io::Triangle> {
        mesh.triangles
            .iter()
            .map(|tri| {
                let n = tri.normal();
                let [a, b, c] = tri.vertices.map(|v| {
                    stl_io::Vertex::new([
                        to_external(v[0]) as f32,
                        to_external(v[1]) as f32,
                        to_external(v[2]) as f32,
                    ])
                });
                stl_io::Triangle {
                    normal: stl_io::Normal::new([n[0] as f32, n[1] as f32, n[2] as f32]),
                    vertices: [a, b, c],
                }
            })
            .collect()
    }
}

impl ModelExporter for StlExporter {
    fn export_models(&self, operation: &Operation, dir: &ExchangeDir) -> SamplingResult<usize> {
        for (index, mesh) in operation.objects.iter().enumerate() {
            let path = dir.model_file(index);
            let file = File::create(&path).map_err(|e| SamplingError::io(&path, e))?;
            let mut writer = BufWriter::new(file);
            let triangles = Self::to_stl(mesh);
            stl_io::write_stl(&mut writer, triangles.iter())
                .and_then(|_| writer.flush())
                .map_err(|e| SamplingError::io(&path, e))?;
            debug!(
                "Exported '{}' ({} triangles) to {:?}",
                mesh.name,
                triangles.len(),
                path
            );
        }
        Ok(operation.objects.len())
    }
}

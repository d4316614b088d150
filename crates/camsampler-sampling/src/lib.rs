//! # camsampler Sampling
//!
//! Plumbing between in-memory toolpath chunks and an external drop-cutter /
//! waterline sampler that runs as a subprocess and talks through plain text
//! files.
//!
//! - **Exchange**: request/result file formats and positional matching
//! - **Layers**: waterline slice heights
//! - **Waterline**: rebuilding loop chunks from per-layer result files
//! - **Model Export**: STL files for the sampler's collision model
//! - **Process**: launching the sampler scripts
//! - **Driver**: the sampling entry points tying the above together

pub mod driver;
pub mod error;
pub mod exchange;
pub mod exchange_dir;
pub mod layers;
pub mod model_export;
pub mod process;
pub mod waterline;

pub use driver::Sampler;
pub use error::{SamplingError, SamplingResult};
pub use exchange::ResampleRequest;
pub use exchange_dir::ExchangeDir;
pub use layers::{compute_layer_heights, layer_heights, LAYER_EPSILON};
pub use model_export::{ModelExporter, NoExport, StlExporter};
pub use process::{SamplerProcess, SamplerScript, ScriptRunner};
pub use waterline::{parse_waterline_layer, parse_waterline_layers, parse_waterline_output};

//! camsampler Settings Crate
//!
//! Handles sampler configuration: where the external sampler lives, how it
//! is invoked, and how exchange files are managed.

pub mod config;
pub mod error;

pub use config::{ExchangeMode, ExitStatusPolicy, SamplerConfig};
pub use error::{ConfigError, SettingsError, SettingsResult};

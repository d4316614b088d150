//! Sampler unit scaling
//!
//! The external sampler works on coordinates multiplied by a fixed factor.
//! Every value crossing the process boundary in scaled form goes through
//! [`to_external`] on the way out and [`to_internal`] on the way in.

/// Factor between model space and the sampler's scaled representation
pub const SAMPLER_SCALE: f64 = 1000.0;

/// Convert a model-space value to the sampler's scaled representation
pub fn to_external(value: f64) -> f64 {
    value * SAMPLER_SCALE
}

/// Convert a scaled sampler value back to model space
pub fn to_internal(value: f64) -> f64 {
    value / SAMPLER_SCALE
}

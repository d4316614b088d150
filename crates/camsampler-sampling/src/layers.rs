//! Waterline layer planning.
//!
//! Slice heights run from one step below the stock top down to the floor.
//! The same list feeds the heights file and the per-layer result parsing, so
//! both must come from a single call.

use camsampler_core::Operation;

/// Slack that keeps float error from adding a layer just above the floor.
pub const LAYER_EPSILON: f64 = 1e-7;

/// Slice heights for `operation`, highest first, always ending at `minz`.
pub fn compute_layer_heights(operation: &Operation) -> Vec<f64> {
    layer_heights(operation.minz, operation.maxz, operation.stepdown)
}

/// Slice heights from `maxz - stepdown` down to `minz`.
///
/// A non-positive step yields only the floor.
pub fn layer_heights(minz: f64, maxz: f64, stepdown: f64) -> Vec<f64> {
    let mut layers = Vec::new();
    if stepdown > 0.0 {
        let mut depth = maxz - stepdown;
        while depth > minz + LAYER_EPSILON {
            layers.push(depth);
            depth -= stepdown;
        }
    }
    layers.push(minz);
    layers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uneven_range_ends_at_floor() {
        assert_eq!(layer_heights(0.0, 10.0, 3.0), vec![7.0, 4.0, 1.0, 0.0]);
    }

    #[test]
    fn test_even_range_has_no_duplicate_floor() {
        assert_eq!(layer_heights(0.0, 9.0, 3.0), vec![6.0, 3.0, 0.0]);
    }

    #[test]
    fn test_step_larger_than_range() {
        assert_eq!(layer_heights(-1.0, 0.0, 5.0), vec![-1.0]);
    }

    #[test]
    fn test_float_steps_do_not_add_near_floor_layer() {
        let layers = layer_heights(0.0, 1.0, 0.1);
        assert_eq!(layers.len(), 10);
        assert!((layers[0] - 0.9).abs() < 1e-12);
        assert_eq!(*layers.last().unwrap(), 0.0);
    }

    #[test]
    fn test_zero_step_only_floor() {
        assert_eq!(layer_heights(-2.0, 0.0, 0.0), vec![-2.0]);
        assert_eq!(layer_heights(-2.0, 0.0, -1.0), vec![-2.0]);
    }

    #[test]
    fn test_from_operation() {
        let op = Operation {
            minz: -6.0,
            maxz: 0.0,
            stepdown: 2.0,
            ..Operation::default()
        };
        assert_eq!(compute_layer_heights(&op), vec![-2.0, -4.0, -6.0]);
    }
}

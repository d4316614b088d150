//! Ambient containment region
//!
//! The ambient region is the 2D area inside which heights actually need to be
//! sampled. Points on or outside its boundary are skipped.

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};

/// A simple polygon with optional holes, given as closed rings of `[x, y]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub exterior: Vec<[f64; 2]>,
    #[serde(default)]
    pub holes: Vec<Vec<[f64; 2]>>,
}

impl Polygon {
    /// Creates a polygon without holes.
    pub fn new(exterior: Vec<[f64; 2]>) -> Result<Self> {
        Self::with_holes(exterior, Vec::new())
    }

    /// Creates a polygon with holes. Every ring needs at least three vertices.
    pub fn with_holes(exterior: Vec<[f64; 2]>, holes: Vec<Vec<[f64; 2]>>) -> Result<Self> {
        let polygon = Self { exterior, holes };
        polygon.validate()?;
        Ok(polygon)
    }

    /// Axis aligned rectangle from two corners.
    pub fn rectangle(min: [f64; 2], max: [f64; 2]) -> Self {
        Self {
            exterior: vec![min, [max[0], min[1]], max, [min[0], max[1]]],
            holes: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.exterior.len() < 3 {
            return Err(GeometryError::DegenerateRing {
                vertices: self.exterior.len(),
            }
            .into());
        }
        if let Some(hole) = self.holes.iter().find(|h| h.len() < 3) {
            return Err(GeometryError::DegenerateRing {
                vertices: hole.len(),
            }
            .into());
        }
        Ok(())
    }

    /// Strict interior test: boundary points are not contained.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        if !ring_interior(&self.exterior, x, y) {
            return false;
        }
        !self
            .holes
            .iter()
            .any(|hole| ring_interior(hole, x, y) || on_ring(hole, x, y))
    }
}

/// Region inside which points are sent to the sampler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AmbientRegion {
    /// Every point is inside
    #[default]
    Unbounded,
    /// Union of polygons
    Polygons { polygons: Vec<Polygon> },
}

impl AmbientRegion {
    pub fn polygon(polygon: Polygon) -> Self {
        Self::Polygons {
            polygons: vec![polygon],
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        match self {
            Self::Unbounded => true,
            Self::Polygons { polygons } => polygons.iter().any(|p| p.contains(x, y)),
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Unbounded => Ok(()),
            Self::Polygons { polygons } => polygons.iter().try_for_each(Polygon::validate),
        }
    }
}

fn ring_interior(ring: &[[f64; 2]], x: f64, y: f64) -> bool {
    if ring.len() < 3 || on_ring(ring, x, y) {
        return false;
    }

    // Ray casting
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let [xi, yi] = ring[i];
        let [xj, yj] = ring[j];
        if ((yi > y) != (yj > y)) && (x < (xj - xi) * (y - yi) / (yj - yi) + xi) {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn on_ring(ring: &[[f64; 2]], x: f64, y: f64) -> bool {
    const EPS: f64 = 1e-12;
    if ring.is_empty() {
        return false;
    }
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let [x1, y1] = ring[j];
        let [x2, y2] = ring[i];
        let cross = (x2 - x1) * (y - y1) - (y2 - y1) * (x - x1);
        if cross.abs() <= EPS
            && x >= x1.min(x2) - EPS
            && x <= x1.max(x2) + EPS
            && y >= y1.min(y2) - EPS
            && y <= y1.max(y2) + EPS
        {
            return true;
        }
        j = i;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_contains() {
        let rect = Polygon::rectangle([0.0, 0.0], [10.0, 5.0]);
        assert!(rect.contains(5.0, 2.5));
        assert!(!rect.contains(11.0, 2.5));
        assert!(!rect.contains(5.0, -1.0));
    }

    #[test]
    fn test_boundary_is_outside() {
        let rect = Polygon::rectangle([0.0, 0.0], [10.0, 10.0]);
        assert!(!rect.contains(0.0, 5.0));
        assert!(!rect.contains(10.0, 10.0));
        assert!(!rect.contains(5.0, 10.0));
    }

    #[test]
    fn test_holes_are_excluded() {
        let poly = Polygon::with_holes(
            vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]],
            vec![vec![[4.0, 4.0], [6.0, 4.0], [6.0, 6.0], [4.0, 6.0]]],
        )
        .unwrap();
        assert!(poly.contains(2.0, 2.0));
        assert!(!poly.contains(5.0, 5.0));
        assert!(!poly.contains(4.0, 5.0));
    }

    #[test]
    fn test_degenerate_ring_rejected() {
        let err = Polygon::new(vec![[0.0, 0.0], [1.0, 1.0]]).unwrap_err();
        assert_eq!(err.to_string(), "Degenerate ring with 2 vertices");
    }

    #[test]
    fn test_unbounded_contains_everything() {
        let region = AmbientRegion::default();
        assert!(region.contains(1e9, -1e9));
    }

    #[test]
    fn test_union_of_polygons() {
        let region = AmbientRegion::Polygons {
            polygons: vec![
                Polygon::rectangle([0.0, 0.0], [1.0, 1.0]),
                Polygon::rectangle([5.0, 5.0], [6.0, 6.0]),
            ],
        };
        assert!(region.contains(0.5, 0.5));
        assert!(region.contains(5.5, 5.5));
        assert!(!region.contains(3.0, 3.0));
    }
}
